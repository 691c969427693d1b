//! Two-way binding between an in-memory value and one local storage slot.
//!
//! The slot is read once when the binding is opened; after that every change
//! made through the binding is encoded and written back. A value that encodes
//! to nothing (`null` for the JSON codec) empties the slot instead.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::local::{LocalStore, StoreError};

/// Encoding between a value and the text stored in a slot
pub trait Codec<T> {
    /// Decode slot text
    fn decode(&self, raw: &str) -> Result<T, StoreError>;

    /// Encode a value; `None` means the slot should be emptied
    fn encode(&self, value: &T) -> Result<Option<String>, StoreError>;
}

/// JSON codec; `null` values empty the slot
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec {
    fn decode(&self, raw: &str) -> Result<T, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn encode(&self, value: &T) -> Result<Option<String>, StoreError> {
        let json = serde_json::to_value(value)?;
        if json.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&json)?))
    }
}

/// A value bound to a named slot
pub struct Persisted<T, C = JsonCodec> {
    store: LocalStore,
    key: String,
    codec: C,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Persisted<T, JsonCodec> {
    /// Bind `key` with the JSON codec
    pub fn open(store: LocalStore, key: &str, default: T) -> Result<Self, StoreError> {
        Self::open_with(store, key, default, JsonCodec)
    }
}

impl<T, C: Codec<T>> Persisted<T, C> {
    /// Bind `key` with a custom codec. An occupied slot is decoded as the
    /// initial value, otherwise `default` is used. Decode failures are
    /// returned to the caller.
    pub fn open_with(
        store: LocalStore,
        key: &str,
        default: T,
        codec: C,
    ) -> Result<Self, StoreError> {
        let value = match store.get(key)? {
            Some(raw) => codec.decode(&raw)?,
            None => default,
        };
        Ok(Self {
            store,
            key: key.to_string(),
            codec,
            value,
        })
    }

    /// Bind `key` without reading it; the first write replaces whatever it holds
    pub fn detached(store: LocalStore, key: &str, value: T, codec: C) -> Self {
        Self {
            store,
            key: key.to_string(),
            codec,
            value,
        }
    }

    /// Slot name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Decode what the slot currently holds, without touching the bound value
    pub fn stored(&self) -> Result<Option<T>, StoreError> {
        self.store
            .get(&self.key)?
            .map(|raw| self.codec.decode(&raw))
            .transpose()
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it back
    pub fn set(&mut self, value: T) -> Result<(), StoreError> {
        self.value = value;
        self.flush()
    }

    /// Mutate the value in place and write it back
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = f(&mut self.value);
        self.flush()?;
        Ok(result)
    }

    /// Mutate the value in place without writing; call `flush` afterwards
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Write the current value to the slot
    pub fn flush(&self) -> Result<(), StoreError> {
        match self.codec.encode(&self.value)? {
            Some(raw) => self.store.set(&self.key, &raw),
            None => self.store.remove(&self.key),
        }
    }
}
