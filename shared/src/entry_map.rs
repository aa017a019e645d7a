use std::fmt;

use indexmap::IndexMap;

use crate::Payload;

/// Opaque comparable identifier for an entry within a mirrored map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(String);

impl EntryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for EntryKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Insertion-ordered `EntryKey -> Payload` mapping backing a map
/// mirror. Keys are unique at any instant; iteration order is
/// insertion order, and removal preserves the order of the remaining
/// entries.
pub struct EntryMap {
    inner: IndexMap<EntryKey, Payload>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &EntryKey) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Payload> {
        self.inner.get(key)
    }

    /// Inserts or overwrites. Last write wins; a key already present
    /// keeps its original position in the iteration order.
    pub fn upsert(&mut self, key: EntryKey, payload: Payload) -> Option<Payload> {
        self.inner.insert(key, payload)
    }

    /// Removes the entry for `key`, preserving the order of the rest.
    /// Returns `None` if the key was never present.
    pub fn remove(&mut self, key: &EntryKey) -> Option<Payload> {
        self.inner.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &Payload)> {
        self.inner.iter()
    }

    /// Owned copy of the entries, in insertion order.
    pub fn snapshot(&self) -> Vec<(EntryKey, Payload)> {
        self.inner
            .iter()
            .map(|(key, payload)| (key.clone(), payload.clone()))
            .collect()
    }
}

impl Default for EntryMap {
    fn default() -> Self {
        Self::new()
    }
}
