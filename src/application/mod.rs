//! Application layer: the facility coordinator.
//!
//! `Facility` owns the slot inventory and the ledger of active stays, and runs
//! park and exit against the pluggable allocation and pricing policies. Its
//! mutable state sits behind a single `tokio` lock.

pub mod availability;
pub mod facility;
