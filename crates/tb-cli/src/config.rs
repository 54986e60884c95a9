//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tb_core::{ComparerConfig, DbscanConfig};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the item catalog document.
    pub catalog_path: PathBuf,

    /// Clustering neighborhood radius (inclusive edit distance).
    pub eps: usize,

    /// Minimum neighborhood size for a core point.
    pub min_pts: usize,

    /// Groups with fewer games than this are not clustered.
    pub min_games: usize,

    /// Purchase window, used both for comparison and for item set blocks.
    pub window_seconds: u32,

    /// Drop consumables before comparing timelines.
    pub ignore_consumables: bool,

    /// Let items bought in the same window match in any order.
    pub group_by_time: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let dbscan = DbscanConfig::default();
        let comparer = ComparerConfig::default();
        Self {
            catalog_path: data_dir.join("items.json"),
            eps: dbscan.eps,
            min_pts: dbscan.min_pts,
            min_games: 5,
            window_seconds: comparer.window_seconds,
            ignore_consumables: comparer.ignore_consumables,
            group_by_time: comparer.group_by_time,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally layering a
    /// specific file on top.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (TB_*)
        figment = figment.merge(Env::prefixed("TB_"));

        figment.extract()
    }

    pub const fn dbscan(&self) -> DbscanConfig {
        DbscanConfig {
            eps: self.eps,
            min_pts: self.min_pts,
        }
    }

    pub const fn comparer(&self) -> ComparerConfig {
        ComparerConfig {
            ignore_consumables: self.ignore_consumables,
            group_by_time: self.group_by_time,
            window_seconds: self.window_seconds,
        }
    }
}

/// Returns the platform-specific config directory for tb.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tb"))
}

/// Returns the platform-specific data directory for tb.
///
/// On Linux: `~/.local/share/tb`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tb"))
}
