//! Per-user session values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SessionKey;
use crate::Result;

/// The key-value mapping held for one user's browsing session.
///
/// Presence is decided by the key alone: a key stored with a JSON `null`
/// counts as present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData {
    values: Map<String, Value>,
}

impl SessionData {
    /// Create an empty session mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a recognized key is present.
    pub fn contains(&self, key: SessionKey) -> bool {
        self.values.contains_key(key.as_str())
    }

    /// Get the value stored under a recognized key.
    pub fn get(&self, key: SessionKey) -> Option<&Value> {
        self.values.get(key.as_str())
    }

    /// Get the value stored under an arbitrary name.
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Store a value under a recognized key, returning the previous value.
    pub fn insert(&mut self, key: SessionKey, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.as_str().to_string(), value.into())
    }

    /// Store a value under an arbitrary name, returning the previous value.
    pub fn insert_raw(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Overwrite recognized keys with every entry of `updates`.
    ///
    /// Every name must be a [`SessionKey`]; on an unknown name nothing is
    /// written and `InvalidUpdate` is returned.
    pub fn apply_updates(&mut self, updates: Map<String, Value>) -> Result<()> {
        let mut parsed = Vec::with_capacity(updates.len());
        for (name, value) in updates {
            parsed.push((name.parse::<SessionKey>()?, value));
        }

        for (key, value) in parsed {
            self.insert(key, value);
        }
        Ok(())
    }

    /// Recognized keys that are not yet present.
    pub fn missing_keys(&self) -> Vec<SessionKey> {
        SessionKey::ALL
            .into_iter()
            .filter(|key| !self.contains(*key))
            .collect()
    }

    /// Number of stored entries, recognized or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
