//! birdnav - personal navigation dashboard
//!
//! A curated, categorized list of sites that can be browsed, searched and
//! edited, persisted locally and optionally synchronised to a JSON file in a
//! GitHub repository.

pub mod cli;
pub mod core;
pub mod favicon;
pub mod storage;
pub mod telemetry;

pub use crate::core::manager::SiteManager;
pub use crate::core::types::{Category, Collection, SearchResult, Site};
