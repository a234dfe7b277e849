use super::money::Amount;
use super::slot::Slot;
use super::stay::StayRecord;
use super::vehicle::Vehicle;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Chooses a slot for a vehicle among the currently free ones.
///
/// Implementations must only return a slot for which `Slot::can_fit` holds.
/// `None` means the facility has no capacity for this vehicle.
pub trait AllocationPolicy: Send + Sync {
    fn find_slot<'a>(&self, available: &[&'a Slot], vehicle: &Vehicle) -> Option<&'a Slot>;
    fn name(&self) -> &'static str;
}

/// Computes the fee of a closed stay.
///
/// `vehicle` carries the drawing-power flag as it was while the vehicle was parked.
pub trait PricingPolicy: Send + Sync {
    fn calculate_price(&self, stay: &StayRecord, slot: &Slot, vehicle: &Vehicle) -> Result<Amount>;
    fn name(&self) -> &'static str;
}

/// External channel that collects a fee.
#[async_trait]
pub trait PaymentSettler: Send + Sync {
    async fn attempt(&self, amount: Amount) -> bool;
    fn channel(&self) -> &str;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type AllocationPolicyBox = Box<dyn AllocationPolicy>;
pub type PricingPolicyBox = Box<dyn PricingPolicy>;
pub type SettlerBox = Box<dyn PaymentSettler>;
pub type ClockBox = Box<dyn Clock>;
