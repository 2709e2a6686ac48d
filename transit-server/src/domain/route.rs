//! Bus route type.

use serde::{Deserialize, Serialize};

use super::stop::{Stop, same_name};

/// Coordinates closer than this (in degrees, on both axes) count as the same
/// place when deciding whether a route loops back on itself.
pub const CIRCULAR_TOLERANCE_DEG: f64 = 0.001;

/// A configured bus route: an ordered sequence of stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_number: i64,
    pub name: String,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

impl Route {
    /// Create a new route.
    pub fn new(route_number: i64, name: impl Into<String>, stops: Vec<Stop>) -> Self {
        Self {
            route_number,
            name: name.into(),
            stops,
        }
    }

    /// Whether the route returns to its starting point.
    ///
    /// A route is circular when its first and last stops share a name
    /// (case-insensitively) or lie within [`CIRCULAR_TOLERANCE_DEG`] of each
    /// other on both axes. Routes with fewer than two stops never loop.
    pub fn is_circular(&self) -> bool {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return false;
        };
        if self.stops.len() < 2 {
            return false;
        }

        same_name(&first.name, &last.name)
            || ((first.lat - last.lat).abs() < CIRCULAR_TOLERANCE_DEG
                && (first.lon - last.lon).abs() < CIRCULAR_TOLERANCE_DEG)
    }

    /// Position of the first stop on this route with the given name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.stops.iter().position(|s| s.has_name(name))
    }

    /// Whether any stop on this route has the given name.
    pub fn serves(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }
}
