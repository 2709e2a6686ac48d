//! Fare estimation for a journey between two stops.

use tracing::debug;

use crate::domain::Stop;
use crate::geodesic;
use crate::planner::{NotFoundReason, Resolution, ResolutionKind, Resolver};

use super::table::FareTable;

/// Errors from fare estimation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// An endpoint matches no known stop.
    #[error("stop not found: {name}")]
    StopNotFound {
        name: String,
        available_stops: Vec<String>,
    },

    /// The network has no stops to measure between.
    #[error("no path can be resolved: network has no stops")]
    NoPathResolvable,
}

/// A fare quote.
#[derive(Debug, Clone, PartialEq)]
pub struct FareEstimate {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub fare: f64,
    /// How the measured path was obtained; `None` when the caller supplied it.
    pub resolution: Option<ResolutionKind>,
}

impl FareEstimate {
    /// Distance rounded to two decimal places.
    pub fn distance_display(&self) -> String {
        format!("{:.2}", self.distance_km)
    }

    /// Fare without decimals when whole, otherwise to two places.
    pub fn fare_display(&self) -> String {
        format_fare(self.fare)
    }
}

/// Render a fare amount.
pub fn format_fare(fare: f64) -> String {
    if fare.is_finite() && fare.fract() == 0.0 {
        format!("{fare:.0}")
    } else {
        format!("{fare:.2}")
    }
}

/// Estimate the fare from `start` to `end`.
///
/// A supplied `path` is measured as given. Otherwise the path is resolved
/// first; the resolver's straight-line fallback means only unknown stops
/// prevent an estimate.
pub fn estimate_fare(
    resolver: &Resolver<'_>,
    fares: &FareTable,
    start: &str,
    end: &str,
    path: Option<&[Stop]>,
) -> Result<FareEstimate, FareError> {
    let (distance_km, resolution) = match path {
        Some(stops) => (geodesic::path_length(stops), None),
        None => {
            let resolution = resolver.resolve(start, end);
            let kind = resolution.kind();
            match resolution {
                Resolution::NotFound {
                    reason: NotFoundReason::StopNotFound { name },
                    available_stops,
                } => {
                    return Err(FareError::StopNotFound {
                        name,
                        available_stops,
                    });
                }
                Resolution::NotFound {
                    reason: NotFoundReason::NoPathResolvable,
                    ..
                } => return Err(FareError::NoPathResolvable),
                other => {
                    let length = other.path().map_or(0.0, |p| p.length_km());
                    (length, Some(kind))
                }
            }
        }
    };

    let fare = fares.fare_for(distance_km);
    debug!(start, end, distance_km, fare, "estimated fare");

    Ok(FareEstimate {
        from: start.trim().to_string(),
        to: end.trim().to_string(),
        distance_km,
        fare,
        resolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareTier, Route, TransferLink};
    use crate::planner::RouteSet;
    use crate::stops::StopIndex;

    fn stop(name: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(name, lat, lon)
    }

    struct Fixture {
        routes: RouteSet,
        stops: StopIndex,
        transfers: Vec<TransferLink>,
        fares: FareTable,
    }

    impl Fixture {
        fn new() -> Self {
            // One degree of latitude is ~111.19 km; 0.01 degree is ~1.11 km.
            let routes = vec![Route::new(
                7,
                "Main Street",
                vec![
                    stop("A", 0.0, 0.0),
                    stop("B", 0.01, 0.0),
                    stop("C", 0.05, 0.0),
                ],
            )];
            Self {
                stops: StopIndex::build(&routes),
                routes: RouteSet::new(routes),
                transfers: Vec::new(),
                fares: FareTable::new(vec![
                    FareTier::new(0.0, 2.0, 8.0),
                    FareTier::new(2.0, 5.0, 12.5),
                ]),
            }
        }

        fn resolver(&self) -> Resolver<'_> {
            Resolver::new(&self.routes, &self.transfers, &self.stops)
        }
    }

    #[test]
    fn resolves_then_prices() {
        let fx = Fixture::new();
        let estimate = estimate_fare(&fx.resolver(), &fx.fares, "A", "C", None).unwrap();
        assert_eq!(estimate.distance_display(), "5.56");
        // Past the top tier's range: capped at the top tier.
        assert_eq!(estimate.fare, 12.5);
        assert_eq!(estimate.fare_display(), "12.50");
        assert_eq!(estimate.resolution, Some(ResolutionKind::Direct));
    }

    #[test]
    fn short_hop_uses_first_tier() {
        let fx = Fixture::new();
        let estimate = estimate_fare(&fx.resolver(), &fx.fares, "A", "B", None).unwrap();
        assert_eq!(estimate.distance_display(), "1.11");
        assert_eq!(estimate.fare_display(), "8");
    }

    #[test]
    fn backwards_trip_measured_in_straight_line() {
        let fx = Fixture::new();
        let estimate = estimate_fare(&fx.resolver(), &fx.fares, "C", "A", None).unwrap();
        assert_eq!(estimate.resolution, Some(ResolutionKind::SyntheticFallback));
        assert_eq!(estimate.distance_display(), "5.56");
    }

    #[test]
    fn supplied_path_is_measured_directly() {
        let fx = Fixture::new();
        let path = vec![stop("A", 0.0, 0.0), stop("X", 0.0, 0.01)];
        let estimate =
            estimate_fare(&fx.resolver(), &fx.fares, " A ", "X", Some(&path)).unwrap();
        assert_eq!(estimate.resolution, None);
        assert_eq!(estimate.from, "A");
        assert_eq!(estimate.distance_display(), "1.11");
    }

    #[test]
    fn empty_supplied_path_is_free_distance() {
        let fx = Fixture::new();
        let estimate = estimate_fare(&fx.resolver(), &fx.fares, "A", "B", Some(&[])).unwrap();
        assert_eq!(estimate.distance_km, 0.0);
        assert_eq!(estimate.fare, 8.0);
    }

    #[test]
    fn unknown_stop_is_an_error() {
        let fx = Fixture::new();
        let err = estimate_fare(&fx.resolver(), &fx.fares, "A", "Nowhere", None).unwrap_err();
        assert_eq!(
            err,
            FareError::StopNotFound {
                name: "Nowhere".to_string(),
                available_stops: vec!["A".into(), "B".into(), "C".into()],
            }
        );
        assert_eq!(err.to_string(), "stop not found: Nowhere");
    }

    #[test]
    fn empty_network_is_an_error() {
        let routes = RouteSet::default();
        let stops = StopIndex::default();
        let resolver = Resolver::new(&routes, &[], &stops);
        let err = estimate_fare(&resolver, &FareTable::default(), "A", "B", None).unwrap_err();
        assert_eq!(err, FareError::NoPathResolvable);
    }

    #[test]
    fn fare_formatting() {
        assert_eq!(format_fare(10.0), "10");
        assert_eq!(format_fare(12.5), "12.50");
        assert_eq!(format_fare(0.126), "0.13");
    }
}
