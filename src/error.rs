use crate::domain::stay::{StayId, StayStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkingError {
    #[error("No available slot for vehicle: {plate}")]
    Capacity { plate: String },
    #[error("Invalid ticket ID: {0}")]
    UnknownStay(StayId),
    #[error("Inconsistent facility state: {0}")]
    InconsistentState(String),
    #[error("Payment failed for ticket {stay} via {channel}")]
    PaymentFailed { stay: StayId, channel: String },
    #[error("Stay {0} has no exit time yet")]
    StayStillOpen(StayId),
    #[error("Stay {stay} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        stay: StayId,
        from: StayStatus,
        to: StayStatus,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParkingError>;
