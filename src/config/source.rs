//! Key-value sources the binder reads from.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ConfigError;

/// Read-only lookup of raw configuration values by exact key.
///
/// The binder only ever looks up the keys a settings type asks for; it never
/// enumerates a source. Implementations are expected to behave as a snapshot
/// for the duration of a bind call.
pub trait KeyValueSource {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<S: KeyValueSource + ?Sized> KeyValueSource for &S {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl KeyValueSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl KeyValueSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// A provider of named configuration sections.
///
/// Returns `Ok(None)` when this provider does not define the section.
pub trait SectionSource: Send + Sync + fmt::Debug {
    fn section(&self, name: &str) -> Result<Option<KeyValues>, ConfigError>;
}

/// An insertion-ordered set of string settings with unique keys.
///
/// Inserting an existing key replaces its value in place, so the first
/// position a key was seen at is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, String)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Applies every entry of `overlay` on top of this set.
    pub fn extend_from(&mut self, overlay: KeyValues) {
        for (key, value) in overlay.entries {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl KeyValueSource for KeyValues {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = KeyValues::new();
        for (key, value) in iter {
            values.insert(key, value);
        }
        values
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for KeyValues {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for KeyValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyValuesVisitor;

        impl<'de> Visitor<'de> for KeyValuesVisitor {
            type Value = KeyValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a flat map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<KeyValues, A::Error> {
                let mut values = KeyValues::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    values.insert(key, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(KeyValuesVisitor)
    }
}
