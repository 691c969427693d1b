//! Configuration loading and validation
//!
//! The config file (`<data-dir>/config.yaml`) names the GitHub repository used
//! as the remote sync target. Without a `github` section the dashboard runs
//! purely locally.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the config inside the data directory
pub const CONFIG_FILE: &str = "config.yaml";
/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Errors that can occur when loading or validating a config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Location of the remote data file and the credential used to write it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Path of the JSON file inside the repository
    #[serde(default = "default_data_path")]
    pub path: String,
    /// Write credential; falls back to `GITHUB_TOKEN` / `GH_TOKEN`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API base URL for GitHub Enterprise or tests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_data_path() -> String {
    "data/navigation.json".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            branch: default_branch(),
            path: default_data_path(),
            token: None,
            api_url: None,
        }
    }
}

impl GitHubConfig {
    /// Create a config for `owner/repo` with default branch and path
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            ..Default::default()
        }
    }

    /// Credential from the config, else from the environment.
    /// Empty values count as absent.
    pub fn resolve_token(&self) -> Option<String> {
        let non_empty = |t: &String| !t.trim().is_empty();
        self.token
            .clone()
            .filter(non_empty)
            .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(non_empty))
            .or_else(|| std::env::var("GH_TOKEN").ok().filter(non_empty))
    }

    /// API base URL without a trailing slash
    pub fn api_url(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Top-level config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubConfig>,
}

impl Config {
    /// Load a config from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `<data_dir>/config.yaml`, or an empty config when it does not exist
    pub fn load_or_default(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a config from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config to a file, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(ref github) = self.github else {
            return Ok(());
        };

        for (field, value) in [("owner", &github.owner), ("repo", &github.repo)] {
            if value.contains('/') {
                return Err(ConfigError::ValidationError(format!(
                    "github.{} must not contain '/': {}",
                    field, value
                )));
            }
        }

        if path_escapes_repo(&github.path) {
            return Err(ConfigError::ValidationError(format!(
                "github.path must be relative to the repository root: {}",
                github.path
            )));
        }

        Ok(())
    }
}

/// Default data directory: `$HOME/.birdnav`, or `./.birdnav` without a home
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".birdnav")
}

fn path_escapes_repo(path: &str) -> bool {
    path.starts_with('/') || path.split('/').any(|segment| segment == "..")
}
