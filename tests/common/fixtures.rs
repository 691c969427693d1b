//! Test fixtures for site manager tests.
//!
//! `FakeRemote` is an in-memory `RemoteStore` whose state stays observable
//! after the manager takes ownership of it.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tempfile::TempDir;

use birdnav::core::manager::SiteManager;
use birdnav::core::types::{Collection, NewCategory, NewSite};
use birdnav::storage::{LocalStore, RemoteStore, StorageError};

/// State shared between a `FakeRemote` and the test.
#[derive(Debug, Default)]
pub struct FakeState {
    /// Remote collection; `None` behaves like a missing file
    pub data: Option<Collection>,
    pub configured: bool,
    pub writable: bool,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: usize,
    /// Every accepted write with its commit message
    pub writes: Vec<(Collection, String)>,
    /// Number of rejected writes
    pub failed_writes: usize,
}

/// In-memory remote store.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    /// Configured and writable, holding `data`.
    pub fn with_data(data: Option<Collection>) -> Self {
        let remote = Self::default();
        {
            let mut state = remote.state();
            state.data = data;
            state.configured = true;
            state.writable = true;
        }
        remote
    }

    /// Configured but without a credential.
    pub fn read_only(data: Option<Collection>) -> Self {
        let remote = Self::with_data(data);
        remote.state().writable = false;
        remote
    }

    /// Not configured at all.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn write_count(&self) -> usize {
        self.state().writes.len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.state().writes.iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn last_message(&self) -> Option<String> {
        self.state().writes.last().map(|(_, m)| m.clone())
    }

    pub fn last_written(&self) -> Option<Collection> {
        self.state().writes.last().map(|(c, _)| c.clone())
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_configured(&self) -> bool {
        self.state().configured
    }

    fn can_write(&self) -> bool {
        let state = self.state();
        state.configured && state.writable
    }

    async fn try_read(&self) -> Result<Collection, StorageError> {
        let mut state = self.state();
        state.reads += 1;
        if state.fail_reads {
            return Err(StorageError::NetworkError("connection refused".to_string()));
        }
        Ok(state.data.clone().unwrap_or_default())
    }

    async fn try_write(&self, categories: &Collection, message: &str) -> Result<(), StorageError> {
        let mut state = self.state();
        if state.fail_writes {
            state.failed_writes += 1;
            return Err(StorageError::ApiError {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        state.data = Some(categories.clone());
        state.writes.push((categories.clone(), message.to_string()));
        Ok(())
    }
}

/// Scratch directory holding the local store.
pub struct StoreFixture {
    pub _temp: TempDir,
    pub store: LocalStore,
}

impl StoreFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path().join("storage"));
        Self { _temp: temp, store }
    }

    /// Remote-synced manager over `remote`, loaded.
    pub async fn manager(&self, remote: &FakeRemote, seed: Collection) -> SiteManager {
        let mut manager = SiteManager::new(Box::new(remote.clone()), self.store.clone(), seed);
        manager.load().await;
        manager
    }
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        icon: "fas fa-folder".to_string(),
        color: None,
    }
}

pub fn new_site(name: &str, url: &str) -> NewSite {
    NewSite {
        name: name.to_string(),
        url: url.to_string(),
        description: String::new(),
        icon: "fas fa-globe".to_string(),
        tags: None,
    }
}

/// A small collection distinct from the built-in default.
pub fn sample_collection() -> Collection {
    serde_json::from_str(
        r##"[
          {"id":"c1","name":"Work","icon":"fas fa-briefcase","sites":[
            {"id":"s1","name":"Tracker","url":"https://tracker.example.com","description":"Issues","icon":"i"},
            {"id":"s2","name":"Wiki","url":"https://wiki.example.com","description":"Docs","icon":"i","tags":["docs"]}
          ]},
          {"id":"c2","name":"Empty","icon":"fas fa-box","color":"#123456","sites":[]}
        ]"##,
    )
    .unwrap()
}
