//! Schemas and layouts of the six record forms.
//!
//! Each module exposes `schema()` and `layout()`; `FormKind::definition`
//! pairs them. Labels, option lists and messages match what users of the
//! school application already see.

pub mod announcement;
pub mod assignment;
pub mod attendance;
pub mod event;
pub mod lesson;
pub mod result;
