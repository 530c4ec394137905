//! Shared server state: the record store and the data the forms are served with.

pub mod records;
pub mod state;
