//! Great-circle distances between stops.
//!
//! Uses the Haversine formula on a spherical Earth.

use crate::domain::Stop;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two stops in kilometres.
///
/// NaN coordinates propagate to a NaN result.
pub fn distance(a: &Stop, b: &Stop) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Total distance along a path, summed over consecutive stops.
///
/// Paths with fewer than two stops have length zero.
pub fn path_length(path: &[Stop]) -> f64 {
    path.windows(2).map(|pair| distance(&pair[0], &pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(lat: f64, lon: f64) -> Stop {
        Stop::new("x", lat, lon)
    }

    #[test]
    fn same_point_is_zero() {
        let a = stop(51.5, -0.12);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let d = distance(&stop(0.0, 0.0), &stop(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.001, "got {d}");
    }

    #[test]
    fn known_city_pair() {
        // London to Paris is roughly 344 km
        let london = stop(51.5074, -0.1278);
        let paris = stop(48.8566, 2.3522);
        let d = distance(&london, &paris);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn nan_propagates() {
        assert!(distance(&stop(f64::NAN, 0.0), &stop(1.0, 1.0)).is_nan());
    }

    #[test]
    fn short_paths_have_zero_length() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[stop(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn path_length_sums_legs() {
        let path = [stop(0.0, 0.0), stop(1.0, 0.0), stop(2.0, 0.0)];
        let direct = distance(&path[0], &path[2]);
        assert!((path_length(&path) - direct).abs() < 1e-9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = Stop> {
        (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Stop::new("p", lat, lon))
    }

    proptest! {
        /// Haversine is symmetric
        #[test]
        fn distance_symmetric(a in coord(), b in coord()) {
            prop_assert!((distance(&a, &b) - distance(&b, &a)).abs() < 1e-9);
        }

        /// Distances are non-negative and bounded by half the circumference
        #[test]
        fn distance_bounded(a in coord(), b in coord()) {
            let d = distance(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        /// Reversing a path leaves its length unchanged
        #[test]
        fn reversed_path_same_length(path in prop::collection::vec(coord(), 0..12)) {
            let mut reversed = path.clone();
            reversed.reverse();
            prop_assert!((path_length(&path) - path_length(&reversed)).abs() < 1e-6);
        }
    }
}
