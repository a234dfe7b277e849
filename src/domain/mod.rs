//! Domain model of the facility: vehicles, slots, stays, money, and the
//! pluggable allocation and pricing policies.

pub mod allocation;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod slot;
pub mod stay;
pub mod vehicle;
