use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Motorcycle,
    Car,
    Truck,
    ElectricCar,
    ElectricMotorcycle,
}

impl VehicleCategory {
    /// Smallest slot size this category fits into.
    pub fn required_slot_size(self) -> u8 {
        match self {
            VehicleCategory::Motorcycle | VehicleCategory::ElectricMotorcycle => 1,
            VehicleCategory::Car | VehicleCategory::ElectricCar => 2,
            VehicleCategory::Truck => 3,
        }
    }

    pub fn is_electric(self) -> bool {
        matches!(
            self,
            VehicleCategory::ElectricCar | VehicleCategory::ElectricMotorcycle
        )
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VehicleCategory::Motorcycle => "Motorcycle",
            VehicleCategory::Car => "Car",
            VehicleCategory::Truck => "Truck",
            VehicleCategory::ElectricCar => "Electric car",
            VehicleCategory::ElectricMotorcycle => "Electric motorcycle",
        };
        f.write_str(label)
    }
}

/// A vehicle entering or parked in the facility.
///
/// The drawing-power flag is owned by the slot lifecycle: it is raised when an
/// electric vehicle is parked next to a charger and lowered when it leaves.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Vehicle {
    plate: String,
    category: VehicleCategory,
    #[serde(default)]
    drawing_power: bool,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, category: VehicleCategory) -> Self {
        Self {
            plate: plate.into(),
            category,
            drawing_power: false,
        }
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    pub fn is_electric(&self) -> bool {
        self.category.is_electric()
    }

    pub fn is_drawing_power(&self) -> bool {
        self.drawing_power
    }

    pub(crate) fn set_drawing_power(&mut self, drawing: bool) {
        self.drawing_power = drawing && self.is_electric();
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.plate)
    }
}
