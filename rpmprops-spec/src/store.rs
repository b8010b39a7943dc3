//! Multi-valued key/value store produced by a parse

use crate::error::SpecError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fields and macros extracted from a spec file.
///
/// A key may hold several values, e.g. one per repeated `Requires:` line. Values keep the
/// order in which they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyStore {
    entries: BTreeMap<String, Vec<String>>,
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to `key`, keeping any values already stored.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// All values stored for `key`, empty if the key is absent.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The single value of `key`.
    ///
    /// # Errors
    /// - [`SpecError::AmbiguousValue`] if `key` holds more than one value
    pub fn get(&self, key: &str) -> Result<Option<&str>, SpecError> {
        match self.get_all(key) {
            [] => Ok(None),
            [value] => Ok(Some(value.as_str())),
            values => Err(SpecError::AmbiguousValue { key: key.to_owned(), count: values.len() }),
        }
    }

    /// The most recently stored value of `key`.
    #[must_use]
    pub fn last(&self, key: &str) -> Option<&str> {
        self.get_all(key).last().map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every `(key, value)` pair, one per stored value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vals)| vals.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for PropertyStore {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, String)> for PropertyStore {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (k, v) in iter {
            store.insert(k, v);
        }
        store
    }
}
