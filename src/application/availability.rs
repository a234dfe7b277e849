use crate::domain::slot::{Slot, SlotCategory};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Free and total slot counts for one slice of the inventory.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct Occupancy {
    pub available: usize,
    pub total: usize,
}

impl Occupancy {
    fn count(&mut self, slot: &Slot) {
        self.total += 1;
        if !slot.is_occupied() {
            self.available += 1;
        }
    }

    pub fn occupied(&self) -> usize {
        self.total - self.available
    }

    /// Share of occupied slots in percent, one decimal place. Zero when empty.
    pub fn occupancy_pct(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.occupied() * 100) / Decimal::from(self.total)).round_dp(1)
    }
}

/// Point-in-time view of the facility.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct AvailabilitySnapshot {
    pub by_category: BTreeMap<SlotCategory, Occupancy>,
    pub charging: Occupancy,
    pub active_stays: usize,
}

impl AvailabilitySnapshot {
    pub(crate) fn collect(slots: &[Slot], active_stays: usize) -> Self {
        let mut by_category: BTreeMap<SlotCategory, Occupancy> = SlotCategory::ALL
            .iter()
            .map(|category| (*category, Occupancy::default()))
            .collect();
        let mut charging = Occupancy::default();

        for slot in slots {
            by_category.entry(slot.category()).or_default().count(slot);
            if slot.has_charger() {
                charging.count(slot);
            }
        }

        Self {
            by_category,
            charging,
            active_stays,
        }
    }

    pub fn category(&self, category: SlotCategory) -> Occupancy {
        self.by_category.get(&category).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Occupancy {
        self.by_category
            .values()
            .fold(Occupancy::default(), |acc, o| Occupancy {
                available: acc.available + o.available,
                total: acc.total + o.total,
            })
    }
}
