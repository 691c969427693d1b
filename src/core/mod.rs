//! Core business logic for birdnav

pub mod config;
pub mod ids;
pub mod import;
pub mod manager;
pub mod seed;
pub mod types;

pub use config::{Config, GitHubConfig};
pub use manager::SiteManager;
pub use types::{Category, Collection, Site};
