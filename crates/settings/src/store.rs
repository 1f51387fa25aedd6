//! Settings storage capability.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use sitewide_core::{DomainError, DomainResult};

/// Key/value settings storage owned by the host platform.
///
/// Values are stored raw (whatever the form submitted); readers coerce.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> DomainResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> DomainResult<()>;
}

impl<S> SettingsStore for Arc<S>
where
    S: SettingsStore + ?Sized,
{
    fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> DomainResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory settings store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    inner: RwLock<HashMap<String, Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from `(key, value)` pairs.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let map = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        let map = self
            .inner
            .read()
            .map_err(|_| DomainError::unavailable("settings store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::unavailable("settings store lock poisoned"))?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
