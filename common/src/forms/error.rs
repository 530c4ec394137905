use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field key to message, for every field that failed validation.
///
/// An empty map means the input is valid. A cross-field refinement failure is
/// reported under the refinement's anchor field, like any other field error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, key: &str, message: &str) {
        self.0.insert(key.to_string(), message.to_string());
    }
}

/// Errors raised while declaring a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema `{schema}` declares field `{field}` more than once")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },
    #[error("schema `{schema}` refinement references unknown field `{field}`")]
    UnknownField {
        schema: &'static str,
        field: &'static str,
    },
}

/// Errors raised when turning an untrusted payload into a typed record.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{0}")]
    Invalid(String),
    #[error("cleaned data does not match the record shape: {0}")]
    Record(#[from] serde_json::Error),
    #[error("unknown form kind `{0}`")]
    UnknownKind(String),
}
