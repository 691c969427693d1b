//! Storage backends
//!
//! Remote storage (a JSON file in a GitHub repository) and local storage
//! (named slots on disk) for the navigation collection.

pub mod github;
pub mod local;
pub mod persisted;
pub mod rate_limit;
pub mod traits;

pub use github::GitHubStorage;
pub use local::{LocalStore, StoreError};
pub use persisted::{Codec, JsonCodec, Persisted};
pub use traits::{RemoteStore, StorageError};
