use crate::application::availability::{AvailabilitySnapshot, Occupancy};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ReportRow {
    scope: String,
    available: Option<usize>,
    total: usize,
    occupancy: Option<String>,
}

impl ReportRow {
    fn new(scope: impl Into<String>, occupancy: Occupancy) -> Self {
        Self {
            scope: scope.into(),
            available: Some(occupancy.available),
            total: occupancy.total,
            occupancy: Some(format!("{:.1}", occupancy.occupancy_pct())),
        }
    }
}

/// Writes an availability snapshot as CSV: one row per slot category, one for
/// charger-equipped slots, one for the whole facility and the active stay count.
pub struct AvailabilityWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AvailabilityWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_snapshot(&mut self, snapshot: &AvailabilitySnapshot) -> Result<()> {
        for (category, occupancy) in &snapshot.by_category {
            self.writer
                .serialize(ReportRow::new(category.to_string(), *occupancy))?;
        }
        self.writer
            .serialize(ReportRow::new("charging", snapshot.charging))?;
        self.writer.serialize(ReportRow::new("all", snapshot.total()))?;
        self.writer.serialize(ReportRow {
            scope: "active_stays".to_string(),
            available: None,
            total: snapshot.active_stays,
            occupancy: None,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
