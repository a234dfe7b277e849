use super::ports::AllocationPolicy;
use super::slot::Slot;
use super::vehicle::Vehicle;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Picks the lowest floor first, then the smallest slot id.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestSlotPolicy;

impl AllocationPolicy for NearestSlotPolicy {
    fn find_slot<'a>(&self, available: &[&'a Slot], vehicle: &Vehicle) -> Option<&'a Slot> {
        available
            .iter()
            .copied()
            .filter(|slot| slot.can_fit(vehicle))
            .min_by(|a, b| (a.floor(), a.id()).cmp(&(b.floor(), b.id())))
    }

    fn name(&self) -> &'static str {
        "nearest"
    }
}

/// Picks uniformly among the qualifying slots.
pub struct RandomSlotPolicy {
    rng: Mutex<StdRng>,
}

impl RandomSlotPolicy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of picks for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSlotPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationPolicy for RandomSlotPolicy {
    fn find_slot<'a>(&self, available: &[&'a Slot], vehicle: &Vehicle) -> Option<&'a Slot> {
        let suitable: Vec<&'a Slot> = available
            .iter()
            .copied()
            .filter(|slot| slot.can_fit(vehicle))
            .collect();

        // A poisoned rng is still a usable rng.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        suitable.choose(&mut *rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
