use super::vehicle::{Vehicle, VehicleCategory};
use crate::error::{ParkingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Motorcycle,
    Car,
    Truck,
}

impl SlotCategory {
    pub const ALL: [SlotCategory; 3] = [
        SlotCategory::Motorcycle,
        SlotCategory::Car,
        SlotCategory::Truck,
    ];

    pub fn size(self) -> u8 {
        match self {
            SlotCategory::Motorcycle => 1,
            SlotCategory::Car => 2,
            SlotCategory::Truck => 3,
        }
    }

    pub fn can_fit(self, vehicle: VehicleCategory) -> bool {
        self.size() >= vehicle.required_slot_size()
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SlotCategory::Motorcycle => "motorcycle",
            SlotCategory::Car => "car",
            SlotCategory::Truck => "truck",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical parking space.
///
/// Occupancy is represented only by the occupant, so `is_occupied()` and the
/// presence of a vehicle cannot drift apart.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Slot {
    id: SlotId,
    category: SlotCategory,
    floor: u16,
    has_charger: bool,
    occupant: Option<Vehicle>,
}

impl Slot {
    pub fn new(
        id: impl Into<String>,
        category: SlotCategory,
        floor: u16,
        has_charger: bool,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParkingError::Validation("Slot id must not be empty".into()));
        }
        if floor == 0 {
            return Err(ParkingError::Validation(format!(
                "Slot {id} must be on floor 1 or above"
            )));
        }
        Ok(Self {
            id: SlotId(id),
            category,
            floor,
            has_charger,
            occupant: None,
        })
    }

    pub fn id(&self) -> &SlotId {
        &self.id
    }

    pub fn category(&self) -> SlotCategory {
        self.category
    }

    pub fn floor(&self) -> u16 {
        self.floor
    }

    pub fn has_charger(&self) -> bool {
        self.has_charger
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    /// Whether this slot would accept the vehicle right now.
    pub fn can_fit(&self, vehicle: &Vehicle) -> bool {
        !self.is_occupied()
            && self.category.can_fit(vehicle.category())
            && (!vehicle.is_electric() || self.has_charger)
    }

    /// Parks the vehicle, raising its drawing-power flag when a charger is present.
    pub fn occupy(&mut self, mut vehicle: Vehicle) -> Result<()> {
        if !self.can_fit(&vehicle) {
            return Err(ParkingError::InconsistentState(format!(
                "Cannot park {vehicle} in slot {}",
                self.id
            )));
        }
        vehicle.set_drawing_power(self.has_charger);
        self.occupant = Some(vehicle);
        Ok(())
    }

    /// Removes the occupant, lowering its drawing-power flag.
    pub fn vacate(&mut self) -> Option<Vehicle> {
        let mut vehicle = self.occupant.take()?;
        vehicle.set_drawing_power(false);
        Some(vehicle)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Floor {}, {}", self.id, self.floor, self.category)?;
        if self.has_charger {
            f.write_str(", Charging Available")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_category_fit_by_size() {
        assert!(SlotCategory::Truck.can_fit(VehicleCategory::Car));
        assert!(SlotCategory::Car.can_fit(VehicleCategory::Motorcycle));
        assert!(!SlotCategory::Car.can_fit(VehicleCategory::Truck));
        assert!(!SlotCategory::Motorcycle.can_fit(VehicleCategory::ElectricCar));
    }

    #[test]
    fn test_slot_rejects_ground_floor_zero() {
        assert!(matches!(
            Slot::new("F0-C001", SlotCategory::Car, 0, false),
            Err(ParkingError::Validation(_))
        ));
        assert!(Slot::new("  ", SlotCategory::Car, 1, false).is_err());
    }

    #[test]
    fn test_electric_vehicle_needs_charger() {
        let plain = Slot::new("F1-C001", SlotCategory::Car, 1, false).unwrap();
        let charging = Slot::new("F1-C002", SlotCategory::Car, 1, true).unwrap();
        let ev = Vehicle::new("EV001", VehicleCategory::ElectricCar);

        assert!(!plain.can_fit(&ev));
        assert!(charging.can_fit(&ev));
    }

    #[test]
    fn test_occupy_and_vacate_toggle_drawing_power() {
        let mut slot = Slot::new("F1-C002", SlotCategory::Car, 1, true).unwrap();
        slot.occupy(Vehicle::new("EV001", VehicleCategory::ElectricCar))
            .unwrap();

        assert!(slot.is_occupied());
        assert!(slot.occupant().unwrap().is_drawing_power());

        let vehicle = slot.vacate().unwrap();
        assert!(!slot.is_occupied());
        assert!(slot.occupant().is_none());
        assert!(!vehicle.is_drawing_power());
    }

    #[test]
    fn test_occupied_slot_rejects_second_vehicle() {
        let mut slot = Slot::new("F1-T001", SlotCategory::Truck, 1, false).unwrap();
        slot.occupy(Vehicle::new("TRUCK01", VehicleCategory::Truck))
            .unwrap();

        let result = slot.occupy(Vehicle::new("ABC123", VehicleCategory::Car));
        assert!(matches!(result, Err(ParkingError::InconsistentState(_))));
        assert_eq!(slot.occupant().unwrap().plate(), "TRUCK01");
    }

    #[test]
    fn test_vacate_empty_slot() {
        let mut slot = Slot::new("F1-M001", SlotCategory::Motorcycle, 1, false).unwrap();
        assert!(slot.vacate().is_none());
    }

    #[test]
    fn test_slot_display() {
        let slot = Slot::new("F3-E001", SlotCategory::Car, 3, true).unwrap();
        assert_eq!(slot.to_string(), "F3-E001 (Floor 3, car, Charging Available)");
    }
}
