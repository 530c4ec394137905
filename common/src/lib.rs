//! Shared types for the school forms client and its host service.
//!
//! - `model`: typed records, reference lookups and the submission result shape.
//! - `forms`: the declarative validated-form workflow and its six instantiations.
//! - `requests`: small payloads exchanged over HTTP that are not records.

pub mod forms;
pub mod model;
pub mod requests;
