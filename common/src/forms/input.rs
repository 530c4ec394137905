use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw, uncoerced values keyed by field, exactly as the controls hold them.
///
/// A key that was never set reads as the empty string, which is also what an
/// untouched HTML control submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Whether the field holds anything other than whitespace.
    pub fn is_filled(&self, key: &str) -> bool {
        !self.get(key).trim().is_empty()
    }

    pub fn clear(&mut self, key: &str) {
        self.0.remove(key);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormInput(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
