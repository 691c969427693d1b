//! Identifier generation for categories and sites.
//!
//! Identifiers combine a millisecond timestamp with a process-wide counter,
//! so two creations inside the same millisecond still get distinct values.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter shared by every generator in the process
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Prefix for category identifiers
pub const CATEGORY_PREFIX: &str = "category";
/// Prefix for site identifiers
pub const SITE_PREFIX: &str = "site";

/// Generate a new identifier.
///
/// Format: `{prefix}-{timestamp_ms}-{counter}`
pub fn next_id(prefix: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{timestamp}-{counter}")
}

/// Generate an identifier that `taken` reports as unused.
///
/// The counter guarantees uniqueness within one process; the check covers
/// identifiers that arrived from elsewhere (imports, other machines).
pub fn next_unique_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = next_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}
