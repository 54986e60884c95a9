//! Typical build finder CLI library.
//!
//! This crate provides the CLI interface for the typical build finder.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod item_set;

#[cfg(test)]
mod fixtures;

pub use cli::{Cli, Commands};
pub use config::Config;
