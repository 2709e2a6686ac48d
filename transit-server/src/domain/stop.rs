//! Stop type and name comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bus stop as supplied by the data store.
///
/// Two stops are the same physical stop when their coordinates are equal;
/// the name alone does not identify a stop, since a terminus shared by
/// several routes may appear under the same name at different positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    /// Create a new stop.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Key used to deduplicate stops by position.
    pub fn coord_key(&self) -> CoordKey {
        CoordKey {
            lat: self.lat.to_bits(),
            lon: self.lon.to_bits(),
        }
    }

    /// Case-insensitive comparison of this stop's name with `name`.
    pub fn has_name(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.5}, {:.5})", self.name, self.lat, self.lon)
    }
}

/// Hashable identity of a stop's coordinates.
///
/// Compares the exact bit patterns, so `-0.0` and `0.0` are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat: u64,
    lon: u64,
}

/// Normalise a stop name for comparison: trimmed and lowercased.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive name equality.
pub fn same_name(a: &str, b: &str) -> bool {
    fold_name(a) == fold_name(b)
}
