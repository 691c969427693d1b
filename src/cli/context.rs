//! Context passed to command handlers
//!
//! Bundles the data directory, loaded config and global CLI flags into a
//! single struct.

use std::path::PathBuf;

use crate::core::config::{Config, CONFIG_FILE};
use crate::core::manager::SiteManager;
use crate::core::seed::default_categories;
use crate::storage::{GitHubStorage, LocalStore};

/// Subdirectory of the data directory holding local storage slots
pub const STORAGE_DIR: &str = "storage";

/// Context available to all command handlers.
pub struct CliContext {
    /// Data directory (`--data-dir` / `BIRDNAV_HOME`)
    pub data_dir: PathBuf,
    /// Parsed `config.yaml`, empty when the file does not exist
    pub config: Config,
    /// Output in JSON format (`--json`)
    pub json: bool,
    /// Treat the network as unavailable (`--offline`)
    pub offline: bool,
    /// Show verbose output (`--verbose`)
    pub verbose: bool,
}

impl CliContext {
    /// Load the config from `data_dir`
    pub fn load(data_dir: PathBuf, json: bool, offline: bool, verbose: bool) -> anyhow::Result<Self> {
        let config = Config::load_or_default(&data_dir)?;
        Ok(Self {
            data_dir,
            config,
            json,
            offline,
            verbose,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn store(&self) -> LocalStore {
        LocalStore::new(self.data_dir.join(STORAGE_DIR))
    }

    /// Open the site manager: GitHub-synced when the config has a `github`
    /// section, local-only otherwise.
    pub async fn open_manager(&self) -> SiteManager {
        match self.config.github {
            Some(ref github) => {
                let remote = GitHubStorage::new(github.clone());
                let mut manager =
                    SiteManager::new(Box::new(remote), self.store(), default_categories())
                        .with_online(!self.offline);
                manager.load().await;
                manager
            }
            None => SiteManager::open_local(self.store(), default_categories()),
        }
    }
}
