//! Site manager
//!
//! Owns the category/site tree and is the only way to change it. Every
//! mutation is written to a local slot straight away; when a writable remote
//! is available and the manager is online, the change is then pushed with a
//! commit message describing it. A failed push leaves the dirty flag set and
//! never rolls back the local change.
//!
//! Until a push succeeds the change is also recorded in the
//! `bird-nav-pending` slot, so a later process starts from the local backup
//! and pushes it instead of adopting the older remote copy.
//!
//! Lookups of unknown identifiers are silent no-ops: the operation returns
//! `false`/`None` and nothing is written.

use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::ids::{next_unique_id, CATEGORY_PREFIX, SITE_PREFIX};
use super::import::parse_collection;
use super::types::{
    count, Category, CategoryUpdate, Collection, NewCategory, NewSite, SearchResult, Site,
    SiteUpdate, Stats,
};
use crate::storage::{JsonCodec, LocalStore, Persisted, RemoteStore};

/// Slot holding the backup of the remotely synced collection
pub const BACKUP_KEY: &str = "bird-nav-backup";
/// Slot holding the collection in local-only mode
pub const LOCAL_KEY: &str = "bird-nav-categories";
/// Slot marking unpushed changes; holds the last unpushed commit message
pub const PENDING_KEY: &str = "bird-nav-pending";
/// File name used by `export_to`
pub const EXPORT_FILE_NAME: &str = "bird-nav-backup.json";

/// Category/site state with local persistence and optional remote sync
pub struct SiteManager {
    categories: Persisted<Collection>,
    pending: Persisted<Option<String>>,
    remote: Option<Box<dyn RemoteStore>>,
    seed: Collection,
    loading: bool,
    online: bool,
    last_sync: Option<DateTime<Utc>>,
    dirty: bool,
}

impl SiteManager {
    /// Create a manager synced to `remote`, backed up to the `bird-nav-backup`
    /// slot of `store`. The collection starts empty; call [`load`](Self::load).
    pub fn new(remote: Box<dyn RemoteStore>, store: LocalStore, seed: Collection) -> Self {
        let pending = match Persisted::open(store.clone(), PENDING_KEY, None) {
            Ok(bound) => bound,
            Err(e) => {
                warn!(error = %e, key = PENDING_KEY, "Pending marker unreadable, treating as pending");
                let message = Some(default_commit_message());
                Persisted::detached(store.clone(), PENDING_KEY, message, JsonCodec)
            }
        };

        Self {
            categories: Persisted::detached(store, BACKUP_KEY, Vec::new(), JsonCodec),
            pending,
            remote: Some(remote),
            seed,
            loading: false,
            online: true,
            last_sync: None,
            dirty: false,
        }
    }

    /// Create a manager with no remote. The collection is bound to the
    /// `bird-nav-categories` slot, starting from `seed` when the slot is empty
    /// or unreadable.
    pub fn open_local(store: LocalStore, seed: Collection) -> Self {
        let categories = match Persisted::open(store.clone(), LOCAL_KEY, seed.clone()) {
            Ok(bound) => bound,
            Err(e) => {
                warn!(error = %e, key = LOCAL_KEY, "Local data unreadable, using default data");
                Persisted::detached(store.clone(), LOCAL_KEY, seed.clone(), JsonCodec)
            }
        };

        Self {
            categories,
            pending: Persisted::detached(store, PENDING_KEY, None, JsonCodec),
            remote: None,
            seed,
            loading: false,
            online: true,
            last_sync: None,
            dirty: false,
        }
    }

    /// Set the initial connectivity state without triggering a push
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Startup: adopt the remote collection, else the local backup, else the
    /// built-in default.
    ///
    /// An empty remote collection (including a missing file) adopts the
    /// default. A transport failure, or starting offline, uses the local
    /// backup. Changes left unpushed by an earlier session win over the
    /// remote: the backup is adopted, marked dirty and pushed when online.
    pub async fn load(&mut self) {
        let Some(remote) = self.remote.as_deref() else {
            return;
        };

        if !remote.is_configured() {
            warn!("Remote storage not configured, using default data");
            *self.categories.get_mut() = self.seed.clone();
            return;
        }

        if self.pending.get().is_some() {
            info!("Unpushed local changes found, using local backup");
            self.load_from_backup();
            self.dirty = true;
            if self.online {
                self.push(&default_commit_message()).await;
            }
            return;
        }

        if !self.online {
            debug!("Starting offline, using local backup");
            self.load_from_backup();
            return;
        }

        self.loading = true;
        let result = remote.try_read().await;

        match result {
            Ok(data) => {
                let adopted = if data.is_empty() {
                    info!("Remote collection is empty, starting from default data");
                    self.seed.clone()
                } else {
                    data
                };
                if let Err(e) = self.categories.set(adopted) {
                    warn!(error = %e, "Failed to write local backup");
                }
                self.last_sync = Some(Utc::now());
                self.dirty = false;
            }
            Err(e) => {
                error!(error = %e, "Failed to load from remote, using local backup");
                self.load_from_backup();
            }
        }

        self.loading = false;
    }

    fn load_from_backup(&mut self) {
        let restored = match self.categories.stored() {
            Ok(Some(categories)) => categories,
            Ok(None) => self.seed.clone(),
            Err(e) => {
                warn!(error = %e, key = BACKUP_KEY, "Local backup unreadable, using default data");
                self.seed.clone()
            }
        };
        *self.categories.get_mut() = restored;
    }

    // ── Read-only projections ──────────────────────────────────────

    /// All categories in display order
    pub fn categories(&self) -> &[Category] {
        self.categories.get()
    }

    /// A category by identifier
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == category_id)
    }

    /// A site by owning category and identifier
    pub fn site(&self, category_id: &str, site_id: &str) -> Option<&Site> {
        self.category(category_id)?
            .sites
            .iter()
            .find(|s| s.id == site_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// True while local changes have not been confirmed by the remote,
    /// including changes left over from an earlier session
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    /// Whether a remote exists and accepts writes
    pub fn can_write(&self) -> bool {
        self.remote.as_deref().is_some_and(|r| r.can_write())
    }

    /// Derived statistics
    pub fn stats(&self) -> Stats {
        let (total_categories, total_sites, categories_with_sites) = count(self.categories());
        Stats {
            total_categories,
            total_sites,
            categories_with_sites,
            last_sync: self.last_sync,
            has_unsaved_changes: self.dirty,
            is_online: self.online,
            can_sync: self.can_write(),
        }
    }

    /// Sites matching `query` in display order
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.categories()
            .iter()
            .flat_map(|category| {
                category
                    .sites
                    .iter()
                    .filter(|site| site.matches(&needle))
                    .map(move |site| SearchResult { site, category })
            })
            .collect()
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Add a category at the end; returns its identifier
    pub async fn add_category(&mut self, fields: NewCategory) -> String {
        let categories = self.categories.get();
        let id = next_unique_id(CATEGORY_PREFIX, |candidate| {
            categories.iter().any(|c| c.id == candidate)
        });
        let message = format!("Add category: {}", fields.name);

        self.categories
            .get_mut()
            .push(Category::new(id.clone(), fields));
        self.commit(&message).await;
        id
    }

    /// Merge `update` into a category
    pub async fn edit_category(&mut self, category_id: &str, update: CategoryUpdate) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let message = format!("Update category: {}", category.name);
        category.apply(update);

        self.commit(&message).await;
        true
    }

    /// Remove a category together with all of its sites
    pub async fn delete_category(&mut self, category_id: &str) -> bool {
        let categories = self.categories.get_mut();
        let Some(index) = categories.iter().position(|c| c.id == category_id) else {
            return false;
        };
        let removed = categories.remove(index);
        let message = format!("Delete category: {}", removed.name);

        self.commit(&message).await;
        true
    }

    /// Append a site to a category; returns its identifier
    pub async fn add_site(&mut self, category_id: &str, fields: NewSite) -> Option<String> {
        let category = self.category_mut(category_id)?;
        let id = next_unique_id(SITE_PREFIX, |candidate| {
            category.sites.iter().any(|s| s.id == candidate)
        });
        let message = format!("Add site: {} to {}", fields.name, category.name);
        category.sites.push(Site::new(id.clone(), fields));

        self.commit(&message).await;
        Some(id)
    }

    /// Merge `update` into a site
    pub async fn edit_site(&mut self, category_id: &str, site_id: &str, update: SiteUpdate) -> bool {
        let Some(site) = self
            .category_mut(category_id)
            .and_then(|c| c.sites.iter_mut().find(|s| s.id == site_id))
        else {
            return false;
        };
        let message = format!("Update site: {}", site.name);
        site.apply(update);

        self.commit(&message).await;
        true
    }

    /// Remove a site from its category
    pub async fn delete_site(&mut self, category_id: &str, site_id: &str) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let Some(index) = category.site_index(site_id) else {
            return false;
        };
        let removed = category.sites.remove(index);
        let message = format!("Delete site: {}", removed.name);

        self.commit(&message).await;
        true
    }

    /// Move a site to the end of another category.
    ///
    /// No-op unless both categories exist and the site is in the source.
    /// Moving within one category sends the site to the end.
    pub async fn move_site(&mut self, from_id: &str, to_id: &str, site_id: &str) -> bool {
        let categories = self.categories.get_mut();
        let from = categories.iter().position(|c| c.id == from_id);
        let to = categories.iter().position(|c| c.id == to_id);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        let Some(index) = categories[from].site_index(site_id) else {
            return false;
        };

        let site = categories[from].sites.remove(index);
        let message = format!(
            "Move site: {} from {} to {}",
            site.name, categories[from].name, categories[to].name
        );
        categories[to].sites.push(site);

        self.commit(&message).await;
        true
    }

    /// Replace the collection with the built-in default
    pub async fn reset_to_default(&mut self) {
        *self.categories.get_mut() = self.seed.clone();
        self.commit("Reset to default navigation data").await;
    }

    /// Replace the collection with an import document.
    ///
    /// Returns `false` and leaves the collection untouched when the document
    /// fails validation.
    pub async fn import_json(&mut self, json: &str) -> bool {
        let imported = match parse_collection(json) {
            Ok(imported) => imported,
            Err(e) => {
                warn!(error = %e, "Import rejected");
                return false;
            }
        };

        info!(categories = imported.len(), "Importing navigation data");
        *self.categories.get_mut() = imported;
        self.commit("Import navigation data").await;
        true
    }

    /// Import from a file; unreadable files are rejected like invalid ones
    pub async fn import_file(&mut self, path: &Path) -> bool {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => self.import_json(&json).await,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read import file");
                false
            }
        }
    }

    /// The collection as indented JSON
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.categories())
    }

    /// Write `bird-nav-backup.json` into `dir`; returns the written path
    pub fn export_to(&self, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        let written = self
            .export_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        match written {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Export failed");
                None
            }
        }
    }

    // ── Synchronisation ────────────────────────────────────────────

    /// Push the current collection now, whatever the dirty flag says
    pub async fn sync_now(&mut self) -> bool {
        self.push("Manual sync").await
    }

    /// Record a connectivity change. Coming back online pushes pending changes.
    pub async fn set_online(&mut self, online: bool) {
        let was_online = self.online;
        self.online = online;

        if online && !was_online && self.dirty {
            debug!("Back online with unsaved changes, pushing");
            self.push(&default_commit_message()).await;
        }
    }

    fn category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.categories
            .get_mut()
            .iter_mut()
            .find(|c| c.id == category_id)
    }

    /// Mark dirty, write the local slot, then push if possible
    async fn commit(&mut self, message: &str) {
        self.dirty = true;
        if let Err(e) = self.categories.flush() {
            warn!(key = self.categories.key(), error = %e, "Failed to write local data");
        }
        if self.remote.is_some() {
            if let Err(e) = self.pending.set(Some(message.to_string())) {
                warn!(key = PENDING_KEY, error = %e, "Failed to record pending change");
            }
        }

        if self.online && self.can_write() {
            self.push(message).await;
        }
    }

    async fn push(&mut self, message: &str) -> bool {
        let Some(remote) = self.remote.as_deref() else {
            self.dirty = true;
            return false;
        };
        if !remote.can_write() || !self.online {
            self.dirty = true;
            return false;
        }

        self.loading = true;
        let accepted = remote.write(self.categories.get(), message).await;
        self.loading = false;

        if accepted {
            self.last_sync = Some(Utc::now());
            self.dirty = false;
            if let Err(e) = self.categories.flush() {
                warn!(error = %e, "Failed to refresh local backup");
            }
            if let Err(e) = self.pending.set(None) {
                warn!(key = PENDING_KEY, error = %e, "Failed to clear pending marker");
            }
            info!(message, "Pushed navigation data");
        } else {
            warn!(message, "Push failed, changes kept locally");
        }
        accepted
    }
}

/// Commit message for pushes that have no more specific description
fn default_commit_message() -> String {
    format!(
        "Update navigation data - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::default_categories;
    use tempfile::TempDir;

    fn local_manager(temp: &TempDir) -> SiteManager {
        SiteManager::open_local(LocalStore::new(temp.path()), Vec::new())
    }

    fn new_site(name: &str) -> NewSite {
        NewSite {
            name: name.to_string(),
            url: format!("https://{}.example.com", name.to_lowercase()),
            description: "d".to_string(),
            icon: "y".to_string(),
            tags: None,
        }
    }

    #[tokio::test]
    async fn test_add_category_and_site() {
        let temp = TempDir::new().unwrap();
        let mut manager = local_manager(&temp);

        let cat = manager
            .add_category(NewCategory {
                name: "Tools".to_string(),
                icon: "x".to_string(),
                color: None,
            })
            .await;
        let site = manager.add_site(&cat, new_site("Example")).await;

        assert!(site.is_some());
        let stats = manager.stats();
        assert_eq!(stats.total_categories, 1);
        assert_eq!(stats.total_sites, 1);
        assert_eq!(stats.categories_with_sites, 1);
        assert!(!stats.can_sync);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let temp = TempDir::new().unwrap();
        let mut manager = local_manager(&temp);

        assert!(manager.add_site("missing", new_site("A")).await.is_none());
        assert!(!manager.edit_category("missing", CategoryUpdate::default()).await);
        assert!(!manager.delete_category("missing").await);
        assert!(!manager.delete_site("missing", "s").await);
        assert!(!manager.move_site("a", "b", "s").await);
        assert!(!manager.is_dirty());
        assert!(!LocalStore::new(temp.path()).contains(LOCAL_KEY));
    }

    #[tokio::test]
    async fn test_local_mode_persists_every_change() {
        let temp = TempDir::new().unwrap();
        let mut manager = local_manager(&temp);
        let cat = manager
            .add_category(NewCategory {
                name: "Tools".to_string(),
                icon: "x".to_string(),
                color: None,
            })
            .await;
        assert!(manager.is_dirty());

        let reopened = local_manager(&temp);
        assert_eq!(reopened.categories().len(), 1);
        assert_eq!(reopened.categories()[0].id, cat);
    }

    #[tokio::test]
    async fn test_local_mode_starts_from_seed() {
        let temp = TempDir::new().unwrap();
        let manager = SiteManager::open_local(LocalStore::new(temp.path()), default_categories());
        assert_eq!(manager.categories(), default_categories().as_slice());
    }

    #[tokio::test]
    async fn test_local_mode_corrupt_slot_uses_seed() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path());
        store.set(LOCAL_KEY, "{broken").unwrap();

        let manager = SiteManager::open_local(store, default_categories());
        assert_eq!(manager.categories().len(), 4);
    }

    #[tokio::test]
    async fn test_search() {
        let temp = TempDir::new().unwrap();
        let manager = SiteManager::open_local(LocalStore::new(temp.path()), default_categories());

        let hits = manager.search("  JavaScript ");
        assert!(!hits.is_empty());
        assert!(hits.iter().any(|h| h.site.id == "mdn"));
        assert!(hits.iter().all(|h| h.category.sites.contains(h.site)));

        assert!(manager.search("   ").is_empty());
        assert!(manager.search("zzzz-no-match").is_empty());
    }

    #[tokio::test]
    async fn test_move_within_same_category_goes_to_end() {
        let temp = TempDir::new().unwrap();
        let mut manager =
            SiteManager::open_local(LocalStore::new(temp.path()), default_categories());

        assert!(manager.move_site("tools", "tools", "google-translate").await);
        let tools = manager.category("tools").unwrap();
        assert_eq!(tools.sites.len(), 6);
        assert_eq!(tools.sites.last().unwrap().id, "google-translate");
    }

    #[test]
    fn test_default_commit_message() {
        assert!(default_commit_message().starts_with("Update navigation data - "));
    }
}
