//! Distance-based fare tiers.

use serde::{Deserialize, Serialize};

/// A fare charged for journeys within `[min, max)` kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareTier {
    pub min: f64,
    pub max: f64,
    pub fare: f64,
}

impl FareTier {
    pub fn new(min: f64, max: f64, fare: f64) -> Self {
        Self { min, max, fare }
    }

    /// Lower-inclusive, upper-exclusive containment.
    pub fn contains(&self, distance_km: f64) -> bool {
        self.min <= distance_km && distance_km < self.max
    }
}
