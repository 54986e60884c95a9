//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Typical build finder.
///
/// Clusters a player's item purchase timelines per champion and picks the
/// most representative build of each cluster.
#[derive(Debug, Parser)]
#[command(name = "tb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the item catalog (overrides config).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split one game's timeline into purchase windows.
    Segment {
        /// Purchase event feed (JSON Lines).
        #[arg(long)]
        events: PathBuf,

        /// Game to segment.
        #[arg(long)]
        game: u64,

        /// Player who played the game (needed if several did).
        #[arg(long)]
        subject: Option<u64>,

        /// Purchase window in seconds (overrides config).
        #[arg(long)]
        window: Option<u32>,
    },

    /// Print the distance between two games' timelines.
    Compare {
        /// Purchase event feed (JSON Lines).
        #[arg(long)]
        events: PathBuf,

        /// The two games to compare.
        #[arg(long = "game", num_args = 1, required = true)]
        games: Vec<u64>,

        /// Player who played both games (needed if several did).
        #[arg(long)]
        subject: Option<u64>,
    },

    /// Cluster every eligible player/champion group.
    Clusters {
        /// Purchase event feed (JSON Lines).
        #[arg(long)]
        events: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate an item set from the typical build of every eligible group.
    Generate {
        /// Purchase event feed (JSON Lines).
        #[arg(long)]
        events: PathBuf,

        /// Title of the generated item sets.
        #[arg(long, default_value = "Item Set")]
        title: String,
    },
}
