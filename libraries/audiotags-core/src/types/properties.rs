/// Normalized tag properties
use serde::{Deserialize, Serialize};

/// An ordered mapping from canonical field keys to one or more string values.
///
/// Keys are canonical uppercase names in the Vorbis comment style
/// (`ARTIST`, `TITLE`, `TRACKNUMBER`, `CROSSONIC_ID_<instance>`), produced by
/// the per-format normalizers. Lookups are case-sensitive; the normalization
/// layer guarantees the canonical form.
///
/// Value order within a key is preserved. A key that is present always has at
/// least one value; removing the last value removes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl PropertyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of values across all keys
    pub fn value_count(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }

    /// Check for emptiness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// First value under the key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// All values under the key, in insertion order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Append a value under the key, creating the key if absent.
    ///
    /// Empty values are ignored so the at-least-one-value invariant holds.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }

        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace the whole field with a single value, inserting if absent.
    ///
    /// This is field-level replacement, not a value-level merge: any existing
    /// values under the key are dropped.
    pub fn replace(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.remove(&key);
        self.push(key, value);
    }

    /// Remove a key, returning its values if it was present
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Keep only the keys for which the predicate returns true
    pub fn retain_keys<F: FnMut(&str) -> bool>(&mut self, mut predicate: F) {
        self.entries.retain(|(k, _)| predicate(k));
    }

    /// Iterate over `(key, values)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Iterate over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.push(key, value);
        }
        map
    }
}
