use crate::domain::allocation::{NearestSlotPolicy, RandomSlotPolicy};
use crate::domain::ports::{AllocationPolicyBox, PricingPolicyBox};
use crate::domain::pricing::{FlatPricingPolicy, FlatRates, HourlyPricingPolicy, HourlyRates};
use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationKind {
    #[default]
    Nearest,
    Random,
}

impl AllocationKind {
    /// `seed` only affects random allocation.
    pub fn build(self, seed: Option<u64>) -> AllocationPolicyBox {
        match (self, seed) {
            (AllocationKind::Nearest, _) => Box::new(NearestSlotPolicy),
            (AllocationKind::Random, Some(seed)) => Box::new(RandomSlotPolicy::seeded(seed)),
            (AllocationKind::Random, None) => Box::new(RandomSlotPolicy::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingKind {
    #[default]
    Hourly,
    Flat,
}

/// Rate tables for both pricing policies.
///
/// Loaded from JSON; every field is optional and falls back to the default
/// tariff. Rates must be positive.
///
/// ```json
/// { "hourly": { "car": 25, "charging": 6 }, "flat": { "truck": 250 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub hourly: HourlyRates,
    pub flat: FlatRates,
}

impl PricingConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn policy(&self, kind: PricingKind) -> PricingPolicyBox {
        match kind {
            PricingKind::Hourly => Box::new(HourlyPricingPolicy::new(self.hourly)),
            PricingKind::Flat => Box::new(FlatPricingPolicy::new(self.flat)),
        }
    }
}
