use crate::domain::slot::{Slot, SlotCategory};
use crate::error::{ParkingError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct SlotRow {
    slot: String,
    category: SlotCategory,
    floor: u16,
    charger: bool,
}

/// Reads the facility layout from CSV with columns `slot, category, floor, charger`.
pub struct SlotReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SlotReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn slots(self) -> impl Iterator<Item = Result<Slot>> {
        self.reader.into_deserialize().map(|row| {
            let row: SlotRow = row.map_err(ParkingError::from)?;
            Slot::new(row.slot, row.category, row.floor, row.charger)
        })
    }
}
