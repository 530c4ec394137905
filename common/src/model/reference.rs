use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kinds of related entities a form can offer in a selection control.
///
/// Serialized in lowercase plural form (`"teachers"`, `"lessons"`, ...), which is
/// also the key used in the JSON payload returned by
/// `GET /api/forms/{kind}/reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Teachers,
    Students,
    Lessons,
    Subjects,
    Classes,
    Exams,
    Assignments,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 7] = [
        ReferenceKind::Teachers,
        ReferenceKind::Students,
        ReferenceKind::Lessons,
        ReferenceKind::Subjects,
        ReferenceKind::Classes,
        ReferenceKind::Exams,
        ReferenceKind::Assignments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Teachers => "teachers",
            ReferenceKind::Students => "students",
            ReferenceKind::Lessons => "lessons",
            ReferenceKind::Subjects => "subjects",
            ReferenceKind::Classes => "classes",
            ReferenceKind::Exams => "exams",
            ReferenceKind::Assignments => "assignments",
        }
    }
}

/// A single `{id, label}` entry of a lookup list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub id: String,
    pub label: String,
}

impl ReferenceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Lookup lists supplied by the caller before a form opens.
///
/// The form only reads from it. A missing kind and an empty list are treated
/// the same way: the selection control falls back to a disabled placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceData(BTreeMap<ReferenceKind, Vec<ReferenceOption>>);

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ReferenceKind, options: Vec<ReferenceOption>) -> Self {
        self.0.insert(kind, options);
        self
    }

    pub fn insert(&mut self, kind: ReferenceKind, options: Vec<ReferenceOption>) {
        self.0.insert(kind, options);
    }

    /// Returns the options for `kind`, or an empty slice when none were supplied.
    pub fn options(&self, kind: ReferenceKind) -> &[ReferenceOption] {
        self.0.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keeps only the given kinds. Used to answer a form with the lookups it renders.
    pub fn restricted_to(&self, kinds: &[ReferenceKind]) -> ReferenceData {
        ReferenceData(
            self.0
                .iter()
                .filter(|(kind, _)| kinds.contains(kind))
                .map(|(kind, options)| (*kind, options.clone()))
                .collect(),
        )
    }

    /// Appends options to a kind, skipping ids that are already listed.
    pub fn extend(
        &mut self,
        kind: ReferenceKind,
        options: impl IntoIterator<Item = ReferenceOption>,
    ) {
        let list = self.0.entry(kind).or_default();
        for option in options {
            if !list.iter().any(|existing| existing.id == option.id) {
                list.push(option);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_kind_reads_as_empty() {
        let data = ReferenceData::new().with(
            ReferenceKind::Teachers,
            vec![ReferenceOption::new("t1", "Ada Lovelace")],
        );

        assert_eq!(data.options(ReferenceKind::Teachers).len(), 1);
        assert!(data.options(ReferenceKind::Lessons).is_empty());
    }

    #[test]
    fn json_uses_plural_lowercase_keys() {
        let data = ReferenceData::new().with(
            ReferenceKind::Lessons,
            vec![ReferenceOption::new("4", "Algebra")],
        );

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["lessons"][0]["label"], "Algebra");

        let back: ReferenceData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn extend_skips_known_ids() {
        let mut data = ReferenceData::new().with(
            ReferenceKind::Lessons,
            vec![ReferenceOption::new("1", "Algebra")],
        );
        data.extend(
            ReferenceKind::Lessons,
            vec![
                ReferenceOption::new("1", "Algebra (copy)"),
                ReferenceOption::new("2", "Geometry"),
            ],
        );

        let labels: Vec<_> = data
            .options(ReferenceKind::Lessons)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, ["Algebra", "Geometry"]);
    }

    #[test]
    fn restricted_to_drops_other_kinds() {
        let data = ReferenceData::new()
            .with(ReferenceKind::Teachers, vec![ReferenceOption::new("t1", "Ada")])
            .with(ReferenceKind::Exams, vec![ReferenceOption::new("9", "Finals")]);

        let only_exams = data.restricted_to(&[ReferenceKind::Exams]);
        assert!(only_exams.options(ReferenceKind::Teachers).is_empty());
        assert_eq!(only_exams.options(ReferenceKind::Exams).len(), 1);
    }
}
