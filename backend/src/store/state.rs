//! Application state shared by every Actix worker.

use common::forms::error::SchemaError;
use common::forms::{FormDefinition, FormKind};
use common::model::reference::{ReferenceData, ReferenceKind, ReferenceOption};
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::records::RecordStore;

const BUILTIN_REFERENCE: &str = include_str!("../../fixtures/reference.json");

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("cannot read reference file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("reference data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads the reference lookups from `path`, or the built-in set when `None`.
pub fn load_reference(path: Option<&Path>) -> Result<ReferenceData, ReferenceError> {
    let data = match path {
        Some(path) => {
            info!("Loading reference data from {}", path.display());
            let text = fs::read_to_string(path).map_err(|source| ReferenceError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text)?
        }
        None => serde_json::from_str(BUILTIN_REFERENCE)?,
    };
    Ok(data)
}

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    definitions: Arc<HashMap<FormKind, FormDefinition>>,
    reference: Arc<ReferenceData>,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Builds every form definition up front, so a broken schema fails at startup.
    pub fn new(reference: ReferenceData, upload_dir: PathBuf) -> Result<Self, SchemaError> {
        let definitions = FormKind::ALL
            .into_iter()
            .map(|kind| kind.definition().map(|definition| (kind, definition)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        // Stored ids must not collide with the ids of the built-in lookups.
        let last_id = ReferenceKind::ALL
            .into_iter()
            .flat_map(|kind| reference.options(kind))
            .filter_map(|option| option.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Ok(Self {
            store: RecordStore::starting_after(last_id),
            definitions: Arc::new(definitions),
            reference: Arc::new(reference),
            upload_dir,
        })
    }

    pub fn definition(&self, kind: FormKind) -> Option<&FormDefinition> {
        self.definitions.get(&kind)
    }

    /// The lookups rendered by `kind`'s form. Lessons and assignments created
    /// through the forms are offered next to the configured ones.
    pub async fn reference_for(&self, kind: FormKind) -> ReferenceData {
        let mut reference = (*self.reference).clone();
        for (source, stored) in [
            (ReferenceKind::Lessons, FormKind::Lesson),
            (ReferenceKind::Assignments, FormKind::Assignment),
        ] {
            let records = self.store.list(stored).await;
            reference.extend(source, records.iter().filter_map(as_option));
        }

        let kinds = self
            .definition(kind)
            .map(|definition| definition.layout.reference_kinds())
            .unwrap_or_default();
        reference.restricted_to(&kinds)
    }
}

fn as_option(record: &Value) -> Option<ReferenceOption> {
    let id = record.get("id")?.as_i64()?;
    let title = record.get("title")?.as_str()?;
    Some(ReferenceOption::new(id.to_string(), title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(load_reference(None).unwrap(), PathBuf::from("uploads")).unwrap()
    }

    #[test]
    fn builtin_reference_parses() {
        let reference = load_reference(None).unwrap();
        for kind in ReferenceKind::ALL {
            assert!(!reference.options(kind).is_empty(), "{}", kind.as_str());
        }
    }

    #[test]
    fn missing_reference_file_is_reported() {
        let err = load_reference(Some(Path::new("/nonexistent/reference.json"))).unwrap_err();
        assert!(matches!(err, ReferenceError::Read { .. }));
    }

    #[actix_web::test]
    async fn reference_is_limited_to_the_form_and_includes_stored_lessons() {
        let state = state();
        let record = json!({"title": "Organic chemistry"});
        let id = state
            .store
            .create(FormKind::Lesson, record.as_object().cloned().unwrap())
            .await;

        let reference = state.reference_for(FormKind::Attendance).await;
        let lessons = reference.options(ReferenceKind::Lessons);
        assert!(lessons.contains(&ReferenceOption::new(id.to_string(), "Organic chemistry")));
        assert!(!reference.options(ReferenceKind::Students).is_empty());
        assert!(reference.options(ReferenceKind::Teachers).is_empty());
    }

    #[actix_web::test]
    async fn stored_ids_start_after_reference_ids() {
        let state = state();
        let id = state
            .store
            .create(FormKind::Assignment, serde_json::Map::new())
            .await;
        assert!(id > 3);
    }
}
