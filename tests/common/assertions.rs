//! Custom assertion helpers for birdnav integration tests.

use birdnav::core::types::Collection;
use birdnav::storage::LocalStore;

/// Assert that a local slot decodes to `expected`.
pub fn assert_slot_holds(store: &LocalStore, key: &str, expected: &Collection) {
    let raw = store
        .get(key)
        .unwrap()
        .unwrap_or_else(|| panic!("Expected slot '{}' to hold data", key));
    let actual: Collection = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        &actual, expected,
        "Slot '{}' does not hold the expected collection",
        key
    );
}

/// Assert that a local slot is empty.
pub fn assert_slot_empty(store: &LocalStore, key: &str) {
    assert!(
        !store.contains(key),
        "Expected slot '{}' to be empty, found {:?}",
        key,
        store.get(key).unwrap()
    );
}
