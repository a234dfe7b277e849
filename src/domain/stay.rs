use super::money::Amount;
use super::slot::SlotId;
use crate::error::{ParkingError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const STAY_PREFIX: &str = "TICKET-";

/// Identifier of a stay, rendered as `TICKET-000042`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(try_from = "String", into = "String")]
pub struct StayId(u64);

impl StayId {
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STAY_PREFIX}{:06}", self.0)
    }
}

impl FromStr for StayId {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .strip_prefix(STAY_PREFIX)
            .and_then(|digits| digits.parse().ok())
            .map(Self)
            .ok_or_else(|| ParkingError::Validation(format!("Malformed ticket ID: {s}")))
    }
}

impl TryFrom<String> for StayId {
    type Error = ParkingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StayId> for String {
    fn from(id: StayId) -> Self {
        id.to_string()
    }
}

/// Hands out stay ids in increasing order. Owned by a single facility.
#[derive(Debug, Clone)]
pub struct StaySequence {
    next: Option<u64>,
}

impl StaySequence {
    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// Fails once `u64::MAX` has been handed out.
    pub fn next_id(&mut self) -> Result<StayId> {
        let next = self
            .next
            .ok_or_else(|| ParkingError::Validation("Stay id sequence exhausted".to_owned()))?;
        self.next = next.checked_add(1);
        Ok(StayId(next))
    }
}

impl Default for StaySequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Lifecycle of a stay.
///
/// `Open -> Closing -> Paid`, or `Closing -> Reopened` when the exit could not
/// be completed (typically a declined payment). A reopened stay keeps its exit
/// time and fee and may enter `Closing` again.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    #[default]
    Open,
    Closing,
    Paid,
    Reopened,
}

/// The record of one vehicle's occupancy of one slot.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct StayRecord {
    pub id: StayId,
    pub plate: String,
    pub slot: SlotId,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    pub fee: Option<Amount>,
    pub status: StayStatus,
}

impl StayRecord {
    pub fn open(id: StayId, plate: impl Into<String>, slot: SlotId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            plate: plate.into(),
            slot,
            entered_at: at,
            exited_at: None,
            fee: None,
            status: StayStatus::Open,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == StayStatus::Paid
    }

    /// Time between entry and exit, if the stay has an exit time.
    pub fn duration(&self) -> Option<TimeDelta> {
        self.exited_at.map(|exit| exit - self.entered_at)
    }

    /// Starts an exit attempt. A retry after a declined payment overwrites the
    /// previous exit time.
    pub fn begin_exit(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.transition(
            &[StayStatus::Open, StayStatus::Reopened],
            StayStatus::Closing,
        )?;
        self.exited_at = Some(at);
        Ok(())
    }

    pub fn settle(&mut self, fee: Amount) -> Result<()> {
        self.transition(&[StayStatus::Closing], StayStatus::Paid)?;
        self.fee = Some(fee);
        Ok(())
    }

    /// Keeps the exit time, and the fee when one was computed.
    pub fn reopen(&mut self, fee: Option<Amount>) -> Result<()> {
        self.transition(&[StayStatus::Closing], StayStatus::Reopened)?;
        if fee.is_some() {
            self.fee = fee;
        }
        Ok(())
    }

    fn transition(&mut self, allowed: &[StayStatus], to: StayStatus) -> Result<()> {
        if !allowed.contains(&self.status) {
            return Err(ParkingError::InvalidTransition {
                stay: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
