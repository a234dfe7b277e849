//! Adapters between the facility and external formats.

pub mod csv;
