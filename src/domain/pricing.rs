use super::money::Amount;
use super::ports::PricingPolicy;
use super::slot::{Slot, SlotCategory};
use super::stay::StayRecord;
use super::vehicle::Vehicle;
use crate::error::{ParkingError, Result};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Per-hour rates by slot category, plus the hourly charging surcharge.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(default)]
pub struct HourlyRates {
    pub motorcycle: Amount,
    pub car: Amount,
    pub truck: Amount,
    pub charging: Amount,
}

impl Default for HourlyRates {
    fn default() -> Self {
        Self {
            motorcycle: Amount::from_const(dec!(10)),
            car: Amount::from_const(dec!(20)),
            truck: Amount::from_const(dec!(50)),
            charging: Amount::from_const(dec!(5)),
        }
    }
}

impl HourlyRates {
    pub fn for_slot(&self, category: SlotCategory) -> Amount {
        match category {
            SlotCategory::Motorcycle => self.motorcycle,
            SlotCategory::Car => self.car,
            SlotCategory::Truck => self.truck,
        }
    }
}

/// Fixed fee per stay by slot category, plus the one-off charging surcharge.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(default)]
pub struct FlatRates {
    pub motorcycle: Amount,
    pub car: Amount,
    pub truck: Amount,
    pub charging: Amount,
}

impl Default for FlatRates {
    fn default() -> Self {
        Self {
            motorcycle: Amount::from_const(dec!(50)),
            car: Amount::from_const(dec!(100)),
            truck: Amount::from_const(dec!(200)),
            charging: Amount::from_const(dec!(25)),
        }
    }
}

impl FlatRates {
    pub fn for_slot(&self, category: SlotCategory) -> Amount {
        match category {
            SlotCategory::Motorcycle => self.motorcycle,
            SlotCategory::Car => self.car,
            SlotCategory::Truck => self.truck,
        }
    }
}

fn charged_while_parked(vehicle: &Vehicle) -> bool {
    vehicle.is_electric() && vehicle.is_drawing_power()
}

/// Bills every started hour rounded down, with a one hour minimum.
#[derive(Debug, Default, Clone)]
pub struct HourlyPricingPolicy {
    rates: HourlyRates,
}

impl HourlyPricingPolicy {
    pub fn new(rates: HourlyRates) -> Self {
        Self { rates }
    }

    /// Whole hours between entry and exit, never less than one.
    pub fn billable_hours(stay: &StayRecord) -> Result<u32> {
        let duration = stay.duration().ok_or(ParkingError::StayStillOpen(stay.id))?;
        let hours = duration.num_hours().clamp(1, i64::from(u32::MAX));
        Ok(u32::try_from(hours).unwrap_or(u32::MAX))
    }
}

impl PricingPolicy for HourlyPricingPolicy {
    fn calculate_price(&self, stay: &StayRecord, slot: &Slot, vehicle: &Vehicle) -> Result<Amount> {
        let hours = Self::billable_hours(stay)?;
        let mut price = self.rates.for_slot(slot.category()).times(hours)?;
        if charged_while_parked(vehicle) {
            price = price.checked_add(self.rates.charging.times(hours)?)?;
        }
        Ok(price)
    }

    fn name(&self) -> &'static str {
        "hourly"
    }
}

/// Charges a fixed fee per stay, whatever its duration.
#[derive(Debug, Default, Clone)]
pub struct FlatPricingPolicy {
    rates: FlatRates,
}

impl FlatPricingPolicy {
    pub fn new(rates: FlatRates) -> Self {
        Self { rates }
    }
}

impl PricingPolicy for FlatPricingPolicy {
    fn calculate_price(&self, stay: &StayRecord, slot: &Slot, vehicle: &Vehicle) -> Result<Amount> {
        if stay.exited_at.is_none() {
            return Err(ParkingError::StayStillOpen(stay.id));
        }
        let mut price = self.rates.for_slot(slot.category());
        if charged_while_parked(vehicle) {
            price = price.checked_add(self.rates.charging)?;
        }
        Ok(price)
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}
