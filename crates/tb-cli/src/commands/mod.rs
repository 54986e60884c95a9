//! CLI subcommand implementations.

pub mod clusters;
pub mod compare;
pub mod generate;
pub mod segment;
