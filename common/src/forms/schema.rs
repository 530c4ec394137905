//! Declarative form schemas: fields, coercion rules and cross-field refinements.
//!
//! A schema cleans a [`FormInput`] in two passes. Every field is coerced and
//! checked on its own first; only when all fields pass are the refinements
//! evaluated, in declaration order, over the coerced set. The first failing
//! refinement is the only one reported.

use log::debug;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

use super::error::{SchemaError, ValidationErrors};
use super::input::FormInput;
use super::value::{
    format_date_input, format_datetime_input, parse_date, parse_datetime, parse_number,
    CleanedData, FieldValue,
};

/// Shown when a number has a fractional part but the field holds ids or counts.
pub const NOT_A_WHOLE_NUMBER: &str = "Must be a whole number";

/// Primitive type of a field together with its fixed coercion rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number { min: Option<f64>, integer: bool },
    Date,
    DateTime,
    Choice(&'static [&'static str]),
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Reported when a required value is missing or a value cannot be coerced.
    pub message: &'static str,
    /// Reported when a number is below its minimum. Defaults to `message`.
    pub min_message: Option<&'static str>,
    /// Initial value in create mode.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    fn new(key: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            key,
            kind,
            required: true,
            message,
            min_message: None,
            default: None,
        }
    }

    pub fn text(key: &'static str, message: &'static str) -> Self {
        Self::new(key, FieldKind::Text, message)
    }

    pub fn number(key: &'static str, message: &'static str) -> Self {
        Self::new(
            key,
            FieldKind::Number {
                min: None,
                integer: false,
            },
            message,
        )
    }

    /// A whole number, typically the id of a related record.
    pub fn integer(key: &'static str, message: &'static str) -> Self {
        Self::new(
            key,
            FieldKind::Number {
                min: None,
                integer: true,
            },
            message,
        )
    }

    pub fn date(key: &'static str, message: &'static str) -> Self {
        Self::new(key, FieldKind::Date, message)
    }

    pub fn datetime(key: &'static str, message: &'static str) -> Self {
        Self::new(key, FieldKind::DateTime, message)
    }

    pub fn choice(
        key: &'static str,
        values: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self::new(key, FieldKind::Choice(values), message)
    }

    /// The optional numeric `id` carried by every record form.
    pub fn identifier() -> Self {
        Self::integer("id", "Invalid id").optional()
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Lower bound for a number field. Ignored for other kinds.
    pub fn min(mut self, min: f64, message: &'static str) -> Self {
        if let FieldKind::Number { integer, .. } = self.kind {
            self.kind = FieldKind::Number {
                min: Some(min),
                integer,
            };
            self.min_message = Some(message);
        }
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Coerces and checks one raw value.
    ///
    /// Surrounding whitespace is ignored. An empty optional value yields
    /// `Ok(None)`, so it is left out of the cleaned data.
    pub fn clean(&self, raw: &str) -> Result<Option<FieldValue>, &'static str> {
        let raw = raw.trim();
        if raw.is_empty() {
            return if self.required {
                Err(self.message)
            } else {
                Ok(None)
            };
        }

        let value = match self.kind {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Number { min, integer } => {
                let number = parse_number(raw).ok_or(self.message)?;
                if let Some(min) = min {
                    if number < min {
                        return Err(self.min_message.unwrap_or(self.message));
                    }
                }
                if integer {
                    if number.fract() != 0.0 || number.abs() >= i64::MAX as f64 {
                        return Err(NOT_A_WHOLE_NUMBER);
                    }
                    FieldValue::Integer(number as i64)
                } else {
                    FieldValue::Number(number)
                }
            }
            FieldKind::Date => FieldValue::Date(parse_date(raw).ok_or(self.message)?),
            FieldKind::DateTime => FieldValue::DateTime(parse_datetime(raw).ok_or(self.message)?),
            FieldKind::Choice(values) => {
                if !values.contains(&raw) {
                    return Err(self.message);
                }
                FieldValue::Text(raw.to_string())
            }
        };
        Ok(Some(value))
    }

    /// Renders a stored JSON value back into the string a control expects.
    fn input_text(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => match self.kind {
                FieldKind::Date => parse_date(s).map_or_else(|| s.clone(), format_date_input),
                FieldKind::DateTime => {
                    parse_datetime(s).map_or_else(|| s.clone(), format_datetime_input)
                }
                _ => s.clone(),
            },
            other => other.to_string(),
        }
    }

    /// Raw text for a submitted JSON value. Numbers must arrive as JSON
    /// numbers, every other kind as a string; null reads as empty.
    fn payload_text(&self, value: &Value) -> Result<String, &'static str> {
        match (value, self.kind) {
            (Value::Null, _) => Ok(String::new()),
            (Value::Number(n), FieldKind::Number { .. }) => Ok(n.to_string()),
            (Value::String(s), kind) if !matches!(kind, FieldKind::Number { .. }) => {
                Ok(s.clone())
            }
            _ => Err(self.message),
        }
    }
}

#[derive(Clone, Copy)]
enum Rule {
    Ordered {
        start: &'static str,
        end: &'static str,
    },
    AnyOf(&'static str, &'static str),
    Custom(fn(&CleanedData) -> bool),
}

/// A cross-field rule evaluated over the fully coerced field set.
///
/// A failure is reported under `anchor`, which is not necessarily the field
/// that holds the wrong value.
#[derive(Clone, Copy)]
pub struct Refinement {
    anchor: &'static str,
    message: &'static str,
    rule: Rule,
}

impl Refinement {
    /// `end` must not come before `start`. Reported under `end`.
    /// Passes when either side is absent.
    pub fn ordered(start: &'static str, end: &'static str, message: &'static str) -> Self {
        Self {
            anchor: end,
            message,
            rule: Rule::Ordered { start, end },
        }
    }

    /// At least one of the two fields must be present. Reported under `first`.
    pub fn any_of(first: &'static str, second: &'static str, message: &'static str) -> Self {
        Self {
            anchor: first,
            message,
            rule: Rule::AnyOf(first, second),
        }
    }

    pub fn custom(
        anchor: &'static str,
        message: &'static str,
        check: fn(&CleanedData) -> bool,
    ) -> Self {
        Self {
            anchor,
            message,
            rule: Rule::Custom(check),
        }
    }

    pub fn anchor(&self) -> &'static str {
        self.anchor
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn holds(&self, data: &CleanedData) -> bool {
        match self.rule {
            Rule::Ordered { start, end } => match (data.get(start), data.get(end)) {
                (Some(start), Some(end)) => matches!(
                    start.compare(end),
                    Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
                ),
                _ => true,
            },
            Rule::AnyOf(first, second) => data.contains(first) || data.contains(second),
            Rule::Custom(check) => check(data),
        }
    }

    fn keys(&self) -> Vec<&'static str> {
        match self.rule {
            Rule::Ordered { start, end } => vec![start, end],
            Rule::AnyOf(first, second) => vec![first, second],
            Rule::Custom(_) => vec![self.anchor],
        }
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("anchor", &self.anchor)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A named, ordered set of fields plus ordered refinements.
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl FormSchema {
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
            refinements: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Returns every failing field. Empty means valid.
    pub fn validate(&self, input: &FormInput) -> ValidationErrors {
        match self.clean(input) {
            Ok(_) => ValidationErrors::default(),
            Err(errors) => errors,
        }
    }

    /// Validates `input` and returns the coerced field set.
    ///
    /// Keys of `input` that the schema does not declare are ignored.
    pub fn clean(&self, input: &FormInput) -> Result<CleanedData, ValidationErrors> {
        let mut cleaned = CleanedData::default();
        let mut errors = ValidationErrors::default();

        for spec in &self.fields {
            match spec.clean(input.get(spec.key)) {
                Ok(Some(value)) => cleaned.insert(spec.key, value),
                Ok(None) => {}
                Err(message) => errors.insert(spec.key, message),
            }
        }

        if !errors.is_empty() {
            debug!("{}: {} field(s) failed validation", self.name, errors.len());
            return Err(errors);
        }

        if let Some(failed) = self.refinements.iter().find(|r| !r.holds(&cleaned)) {
            debug!("{}: refinement on `{}` failed", self.name, failed.anchor);
            errors.insert(failed.anchor, failed.message);
            return Err(errors);
        }

        Ok(cleaned)
    }

    /// Builds control values from a stored record (a JSON object with
    /// camelCase keys). Missing and null fields become empty strings.
    pub fn input_from_value(&self, record: &Value) -> FormInput {
        self.fields
            .iter()
            .map(|spec| {
                let text = record
                    .get(spec.key)
                    .map(|value| spec.input_text(value))
                    .unwrap_or_default();
                (spec.key, text)
            })
            .collect()
    }

    /// Builds control values from an untrusted JSON payload.
    ///
    /// Unlike [`input_from_value`](Self::input_from_value), a value whose JSON
    /// type does not fit its field is an error under that field's key.
    pub fn input_from_payload(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<FormInput, ValidationErrors> {
        let mut input = FormInput::new();
        let mut errors = ValidationErrors::default();

        for spec in &self.fields {
            let Some(value) = payload.get(spec.key) else {
                continue;
            };
            match spec.payload_text(value) {
                Ok(text) => input.set(spec.key, text),
                Err(message) => errors.insert(spec.key, message),
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            debug!("{}: {} field(s) have the wrong type", self.name, errors.len());
            Err(errors)
        }
    }

    /// First error in field declaration order, as `(key, message)`.
    pub fn first_error<'e>(&self, errors: &'e ValidationErrors) -> Option<(&'static str, &'e str)> {
        self.fields
            .iter()
            .find_map(|spec| errors.get(spec.key).map(|message| (spec.key, message)))
    }
}

pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Fails on a repeated field key or on a refinement naming an undeclared field.
    pub fn build(self) -> Result<FormSchema, SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.key) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.key,
                });
            }
        }

        for refinement in &self.refinements {
            if let Some(field) = refinement.keys().into_iter().find(|k| !seen.contains(k)) {
                return Err(SchemaError::UnknownField {
                    schema: self.name,
                    field,
                });
            }
        }

        Ok(FormSchema {
            name: self.name,
            fields: self.fields,
            refinements: self.refinements,
        })
    }
}
