#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use parkade::application::facility::Facility;
use parkade::domain::slot::{Slot, SlotCategory};
use parkade::infrastructure::clock::ManualClock;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

pub fn slot(id: &str, category: SlotCategory, floor: u16, charger: bool) -> Slot {
    Slot::new(id, category, floor, charger).expect("valid slot")
}

/// A facility on a manual clock starting at `opening_time()`.
pub fn facility_with(slots: Vec<Slot>) -> (Facility, ManualClock) {
    parkade::logging::init_test();
    let clock = ManualClock::new(opening_time());
    let facility = Facility::builder("Test Parking")
        .slots(slots)
        .clock(Box::new(clock.clone()))
        .build()
        .expect("valid facility");
    (facility, clock)
}

pub fn write_csv(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub const SLOT_HEADER: &str = "slot, category, floor, charger";
pub const EVENT_HEADER: &str = "type, at, plate, category, stay, channel, policy";
