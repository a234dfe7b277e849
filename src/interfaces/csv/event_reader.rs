use crate::config::{AllocationKind, PricingKind};
use crate::domain::ports::SettlerBox;
use crate::domain::stay::StayId;
use crate::domain::vehicle::{Vehicle, VehicleCategory};
use crate::error::{ParkingError, Result};
use crate::infrastructure::settlement::{CardSettler, CashSettler, DecliningSettler, DigitalSettler};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum EventType {
    Park,
    Exit,
    Allocation,
    Pricing,
}

/// Payment channel named in an exit event.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Card,
    Cash,
    Digital,
    Decline,
}

impl Channel {
    pub fn settler(self) -> SettlerBox {
        match self {
            Channel::Card => Box::new(CardSettler::default()),
            Channel::Cash => Box::new(CashSettler),
            Channel::Digital => Box::new(DigitalSettler::default()),
            Channel::Decline => Box::new(DecliningSettler::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventRow {
    r#type: EventType,
    at: DateTime<Utc>,
    plate: Option<String>,
    category: Option<VehicleCategory>,
    stay: Option<StayId>,
    channel: Option<Channel>,
    policy: Option<String>,
}

/// Which stay an exit event refers to.
#[derive(Debug, PartialEq, Clone)]
pub enum ExitTarget {
    Stay(StayId),
    /// The active stay of the vehicle with this plate.
    Plate(String),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Event {
    Park {
        at: DateTime<Utc>,
        vehicle: Vehicle,
    },
    Exit {
        at: DateTime<Utc>,
        target: ExitTarget,
        channel: Channel,
    },
    Allocation {
        at: DateTime<Utc>,
        kind: AllocationKind,
    },
    Pricing {
        at: DateTime<Utc>,
        kind: PricingKind,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::Park { at, .. }
            | Event::Exit { at, .. }
            | Event::Allocation { at, .. }
            | Event::Pricing { at, .. } => *at,
        }
    }
}

fn missing(column: &str, kind: EventType) -> ParkingError {
    ParkingError::Validation(format!("{kind:?} event is missing `{column}`"))
}

impl TryFrom<EventRow> for Event {
    type Error = ParkingError;

    fn try_from(row: EventRow) -> Result<Self> {
        let at = row.at;
        match row.r#type {
            EventType::Park => {
                let plate = row.plate.ok_or_else(|| missing("plate", row.r#type))?;
                let category = row.category.ok_or_else(|| missing("category", row.r#type))?;
                Ok(Event::Park {
                    at,
                    vehicle: Vehicle::new(plate, category),
                })
            }
            EventType::Exit => {
                let target = match (row.stay, row.plate) {
                    (Some(stay), _) => ExitTarget::Stay(stay),
                    (None, Some(plate)) => ExitTarget::Plate(plate),
                    (None, None) => return Err(missing("stay", row.r#type)),
                };
                Ok(Event::Exit {
                    at,
                    target,
                    channel: row.channel.unwrap_or(Channel::Card),
                })
            }
            EventType::Allocation => {
                let policy = row.policy.ok_or_else(|| missing("policy", row.r#type))?;
                let kind = AllocationKind::from_str(&policy, true)
                    .map_err(|_| ParkingError::Validation(format!("Unknown allocation policy: {policy}")))?;
                Ok(Event::Allocation { at, kind })
            }
            EventType::Pricing => {
                let policy = row.policy.ok_or_else(|| missing("policy", row.r#type))?;
                let kind = PricingKind::from_str(&policy, true)
                    .map_err(|_| ParkingError::Validation(format!("Unknown pricing policy: {policy}")))?;
                Ok(Event::Pricing { at, kind })
            }
        }
    }
}

/// Reads facility events from CSV with columns
/// `type, at, plate, category, stay, channel, policy`.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses events; a bad row yields an error and reading goes on.
    pub fn events(self) -> impl Iterator<Item = Result<Event>> {
        self.reader.into_deserialize().map(|row| {
            let row: EventRow = row.map_err(ParkingError::from)?;
            Event::try_from(row)
        })
    }
}
