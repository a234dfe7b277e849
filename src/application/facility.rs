use super::availability::AvailabilitySnapshot;
use crate::domain::allocation::NearestSlotPolicy;
use crate::domain::money::Amount;
use crate::domain::ports::{AllocationPolicyBox, ClockBox, PaymentSettler, PricingPolicyBox};
use crate::domain::pricing::HourlyPricingPolicy;
use crate::domain::slot::{Slot, SlotId};
use crate::domain::stay::{StayId, StayRecord, StaySequence};
use crate::domain::vehicle::Vehicle;
use crate::error::{ParkingError, Result};
use crate::infrastructure::clock::SystemClock;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Everything that changes while the facility runs. Guarded by a single lock
/// so park, exit and policy swaps are linearizable.
struct FacilityState {
    slots: Vec<Slot>,
    ledger: BTreeMap<StayId, StayRecord>,
    sequence: StaySequence,
    allocation: AllocationPolicyBox,
    pricing: PricingPolicyBox,
}

/// The parking facility coordinator.
///
/// `Facility` owns the slot inventory and the ledger of active stays, and
/// orchestrates parking and exits with the current allocation and pricing
/// policies. All methods take `&self`; mutations go through an internal
/// `RwLock`, so a facility can be shared behind an `Arc`.
pub struct Facility {
    name: String,
    clock: ClockBox,
    state: RwLock<FacilityState>,
}

/// Configures a [`Facility`] before it opens.
pub struct FacilityBuilder {
    name: String,
    slots: Vec<Slot>,
    allocation: Option<AllocationPolicyBox>,
    pricing: Option<PricingPolicyBox>,
    clock: Option<ClockBox>,
    first_stay: u64,
}

impl FacilityBuilder {
    pub fn slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn slots(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.slots.extend(slots);
        self
    }

    pub fn allocation(mut self, policy: AllocationPolicyBox) -> Self {
        self.allocation = Some(policy);
        self
    }

    pub fn pricing(mut self, policy: PricingPolicyBox) -> Self {
        self.pricing = Some(policy);
        self
    }

    pub fn clock(mut self, clock: ClockBox) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sequence number of the first stay id handed out.
    pub fn first_stay(mut self, sequence: u64) -> Self {
        self.first_stay = sequence;
        self
    }

    /// Defaults to nearest-slot allocation, hourly pricing and the system clock.
    pub fn build(self) -> Result<Facility> {
        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.id().clone()) {
                return Err(ParkingError::Validation(format!(
                    "Duplicate slot id: {}",
                    slot.id()
                )));
            }
        }

        Ok(Facility {
            name: self.name,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            state: RwLock::new(FacilityState {
                slots: self.slots,
                ledger: BTreeMap::new(),
                sequence: StaySequence::starting_at(self.first_stay),
                allocation: self
                    .allocation
                    .unwrap_or_else(|| Box::new(NearestSlotPolicy)),
                pricing: self
                    .pricing
                    .unwrap_or_else(|| Box::new(HourlyPricingPolicy::default())),
            }),
        })
    }
}

impl Facility {
    pub fn builder(name: impl Into<String>) -> FacilityBuilder {
        FacilityBuilder {
            name: name.into(),
            slots: Vec::new(),
            allocation: None,
            pricing: None,
            clock: None,
            first_stay: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a slot to the inventory. Slot ids must be unique.
    pub async fn add_slot(&self, slot: Slot) -> Result<()> {
        let mut state = self.state.write().await;
        if state.slots.iter().any(|s| s.id() == slot.id()) {
            return Err(ParkingError::Validation(format!(
                "Duplicate slot id: {}",
                slot.id()
            )));
        }
        debug!(slot = %slot, "Slot added");
        state.slots.push(slot);
        Ok(())
    }

    pub async fn set_allocation_policy(&self, policy: AllocationPolicyBox) {
        let mut state = self.state.write().await;
        debug!(from = state.allocation.name(), to = policy.name(), "Allocation policy changed");
        state.allocation = policy;
    }

    pub async fn set_pricing_policy(&self, policy: PricingPolicyBox) {
        let mut state = self.state.write().await;
        debug!(from = state.pricing.name(), to = policy.name(), "Pricing policy changed");
        state.pricing = policy;
    }

    /// Parks a vehicle in the slot chosen by the current allocation policy.
    ///
    /// Fails with [`ParkingError::Capacity`] when no qualifying slot is free.
    pub async fn park(&self, vehicle: Vehicle) -> Result<StayRecord> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let chosen = {
            let available: Vec<&Slot> = state.slots.iter().filter(|s| !s.is_occupied()).collect();
            state
                .allocation
                .find_slot(&available, &vehicle)
                .map(|slot| slot.id().clone())
        };
        let Some(slot_id) = chosen else {
            warn!(
                facility = %self.name,
                plate = vehicle.plate(),
                category = %vehicle.category(),
                "No available slot"
            );
            return Err(ParkingError::Capacity {
                plate: vehicle.plate().to_owned(),
            });
        };

        let id = state.sequence.next_id()?;
        let slot = find_slot_mut(&mut state.slots, &slot_id)?;
        let floor = slot.floor();
        let plate = vehicle.plate().to_owned();
        slot.occupy(vehicle)?;

        let stay = StayRecord::open(id, plate, slot_id, self.clock.now());
        state.ledger.insert(stay.id, stay.clone());

        info!(
            facility = %self.name,
            stay = %stay.id,
            plate = %stay.plate,
            slot = %stay.slot,
            floor,
            "Vehicle parked"
        );
        Ok(stay)
    }

    /// Closes a stay, prices it and collects the fee through `settler`.
    ///
    /// When the settler declines, the vehicle is put back in its slot and the
    /// stay stays in the ledger unpaid, ready to be retried with the same id.
    pub async fn exit(&self, stay_id: StayId, settler: &dyn PaymentSettler) -> Result<Amount> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let stay = state
            .ledger
            .get_mut(&stay_id)
            .ok_or(ParkingError::UnknownStay(stay_id))?;
        let slot = find_slot_mut(&mut state.slots, &stay.slot)?;
        // Taken before the slot is vacated: pricing needs the charging state of the stay.
        let parked = slot.occupant().cloned().ok_or_else(|| {
            ParkingError::InconsistentState(format!(
                "Slot {} has no vehicle for ticket {stay_id}",
                slot.id()
            ))
        })?;

        stay.begin_exit(self.clock.now())?;
        slot.vacate();

        let fee = match state.pricing.calculate_price(stay, slot, &parked) {
            Ok(fee) => fee,
            Err(e) => {
                slot.occupy(parked)?;
                stay.reopen(None)?;
                warn!(
                    facility = %self.name,
                    stay = %stay_id,
                    error = %e,
                    "Pricing failed, vehicle stays parked"
                );
                return Err(e);
            }
        };

        if settler.attempt(fee).await {
            stay.settle(fee)?;
            state.ledger.remove(&stay_id);
            info!(
                facility = %self.name,
                stay = %stay_id,
                plate = parked.plate(),
                %fee,
                channel = settler.channel(),
                "Vehicle exited"
            );
            Ok(fee)
        } else {
            slot.occupy(parked)?;
            stay.reopen(Some(fee))?;
            warn!(
                facility = %self.name,
                stay = %stay_id,
                %fee,
                channel = settler.channel(),
                "Payment failed, vehicle stays parked"
            );
            Err(ParkingError::PaymentFailed {
                stay: stay_id,
                channel: settler.channel().to_owned(),
            })
        }
    }

    pub async fn availability_snapshot(&self) -> AvailabilitySnapshot {
        let state = self.state.read().await;
        AvailabilitySnapshot::collect(&state.slots, state.ledger.len())
    }

    /// Copy of the slot inventory, in insertion order.
    pub async fn slots(&self) -> Vec<Slot> {
        self.state.read().await.slots.clone()
    }

    pub async fn slot(&self, id: &SlotId) -> Option<Slot> {
        let state = self.state.read().await;
        state.slots.iter().find(|s| s.id() == id).cloned()
    }

    /// Unsettled stays ordered by id.
    pub async fn active_stays(&self) -> Vec<StayRecord> {
        self.state.read().await.ledger.values().cloned().collect()
    }

    pub async fn stay(&self, id: StayId) -> Option<StayRecord> {
        self.state.read().await.ledger.get(&id).cloned()
    }

    /// Most recent unsettled stay of the vehicle with this plate.
    pub async fn active_stay_for(&self, plate: &str) -> Option<StayRecord> {
        let state = self.state.read().await;
        state
            .ledger
            .values()
            .rev()
            .find(|stay| stay.plate == plate)
            .cloned()
    }

    pub async fn allocation_policy(&self) -> &'static str {
        self.state.read().await.allocation.name()
    }

    pub async fn pricing_policy(&self) -> &'static str {
        self.state.read().await.pricing.name()
    }
}

fn find_slot_mut<'a>(slots: &'a mut [Slot], id: &SlotId) -> Result<&'a mut Slot> {
    slots
        .iter_mut()
        .find(|slot| slot.id() == id)
        .ok_or_else(|| ParkingError::InconsistentState(format!("Slot not found: {id}")))
}
