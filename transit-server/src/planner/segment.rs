//! Direct route matching.
//!
//! Finds a contiguous run of stops on a single route connecting two named
//! stops, wrapping through the terminus on circular routes.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Route, Stop, fold_name};

/// A contiguous stretch of one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Position of the route in the collection it was matched from.
    pub route: usize,
    /// Stops from boarding to alighting, inclusive.
    pub stops: Vec<Stop>,
    /// Whether the segment wraps through the terminus of a circular route.
    pub wraps: bool,
}

impl Segment {
    pub fn first(&self) -> &Stop {
        &self.stops[0]
    }

    pub fn last(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }
}

/// Match a single route against a start and end stop name.
///
/// Names are compared case-insensitively against the first stop carrying
/// each name. Returns `(stops, wraps)` on a forward match, or on a
/// wraparound match when the route is circular.
pub fn match_route(route: &Route, start: &str, end: &str) -> Option<(Vec<Stop>, bool)> {
    let start_idx = route.position_of(start)?;
    let end_idx = route.position_of(end)?;

    match start_idx.cmp(&end_idx) {
        Ordering::Less => Some((route.stops[start_idx..=end_idx].to_vec(), false)),
        Ordering::Greater if route.is_circular() => {
            // Index 0 duplicates the closing stop, so resume from index 1.
            let mut stops = route.stops[start_idx..].to_vec();
            stops.extend_from_slice(&route.stops[1..end_idx + 1]);
            // Boarding on the closing stop to alight at the opening one
            // goes nowhere.
            (stops.len() >= 2).then_some((stops, true))
        }
        _ => None,
    }
}

/// Find the first route, in collection order, connecting `start` to `end`.
///
/// This is the unindexed scan; [`RouteSet::find_direct`] gives the same
/// answer without visiting every route.
pub fn find_direct_route(routes: &[Route], start: &str, end: &str) -> Option<Segment> {
    routes.iter().enumerate().find_map(|(i, route)| {
        match_route(route, start, end).map(|(stops, wraps)| Segment {
            route: i,
            stops,
            wraps,
        })
    })
}

/// An ordered route collection with a stop-name index.
///
/// The index maps each folded stop name to the positions of the routes
/// serving it, ascending, so candidate routes are still tried in collection
/// order. Build a new set whenever the routes change.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
    by_stop: HashMap<String, Vec<usize>>,
}

impl RouteSet {
    /// Index a route collection.
    pub fn new(routes: Vec<Route>) -> Self {
        let mut by_stop: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, route) in routes.iter().enumerate() {
            for stop in &route.stops {
                let positions = by_stop.entry(fold_name(&stop.name)).or_default();
                if positions.last() != Some(&i) {
                    positions.push(i);
                }
            }
        }

        Self { routes, by_stop }
    }

    /// The routes, in collection order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Positions of the routes serving a stop name, ascending.
    pub fn routes_serving(&self, name: &str) -> &[usize] {
        self.by_stop
            .get(&fold_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find the first route, in collection order, connecting `start` to `end`.
    pub fn find_direct(&self, start: &str, end: &str) -> Option<Segment> {
        let from = self.routes_serving(start);
        let to = self.routes_serving(end);

        for i in intersect_sorted(from, to) {
            let route = &self.routes[i];
            trace!(route = route.route_number, start, end, "trying route");
            if let Some((stops, wraps)) = match_route(route, start, end) {
                return Some(Segment {
                    route: i,
                    stops,
                    wraps,
                });
            }
        }

        None
    }
}

/// Elements common to two ascending slices, ascending.
fn intersect_sorted<'a>(a: &'a [usize], b: &'a [usize]) -> impl Iterator<Item = usize> + 'a {
    let mut j = 0;
    a.iter().copied().filter(move |&x| {
        while j < b.len() && b[j] < x {
            j += 1;
        }
        j < b.len() && b[j] == x
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(name, lat, lon)
    }

    fn names(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|s| s.name.as_str()).collect()
    }

    fn line() -> Route {
        Route::new(
            1,
            "Line",
            vec![
                stop("A", 0.0, 0.0),
                stop("B", 0.0, 0.01),
                stop("C", 0.0, 0.02),
                stop("D", 0.0, 0.03),
            ],
        )
    }

    fn loop_route() -> Route {
        Route::new(
            2,
            "Loop",
            vec![
                stop("A", 1.0, 1.0),
                stop("B", 1.0, 1.01),
                stop("C", 1.01, 1.01),
                stop("A", 1.0, 1.0),
            ],
        )
    }

    #[test]
    fn forward_match_is_inclusive() {
        let (stops, wraps) = match_route(&line(), "B", "D").unwrap();
        assert_eq!(names(&stops), vec!["B", "C", "D"]);
        assert!(!wraps);
    }

    #[test]
    fn match_ignores_case() {
        let (stops, _) = match_route(&line(), "b", "c").unwrap();
        assert_eq!(names(&stops), vec!["B", "C"]);
    }

    #[test]
    fn backward_on_line_does_not_match() {
        assert!(match_route(&line(), "D", "A").is_none());
    }

    #[test]
    fn same_stop_does_not_match() {
        assert!(match_route(&line(), "B", "B").is_none());
    }

    #[test]
    fn missing_stop_does_not_match() {
        assert!(match_route(&line(), "A", "Z").is_none());
        assert!(match_route(&line(), "Z", "A").is_none());
    }

    #[test]
    fn wraparound_skips_duplicate_terminus() {
        let (stops, wraps) = match_route(&loop_route(), "C", "B").unwrap();
        assert_eq!(names(&stops), vec!["C", "A", "B"]);
        assert!(wraps);
    }

    #[test]
    fn wraparound_to_terminus() {
        // "A" resolves to index 0, so travelling C → A ends on the closing stop.
        let (stops, wraps) = match_route(&loop_route(), "C", "A").unwrap();
        assert_eq!(names(&stops), vec!["C", "A"]);
        assert!(wraps);
    }

    #[test]
    fn wraparound_by_coordinates() {
        let route = Route::new(
            3,
            "Ring",
            vec![
                stop("North Gate", 5.0, 5.0),
                stop("Mill", 5.0, 5.1),
                stop("Pond", 5.1, 5.1),
                stop("South Gate", 5.0005, 5.0005),
            ],
        );
        let (stops, _) = match_route(&route, "South Gate", "Mill").unwrap();
        assert_eq!(names(&stops), vec!["South Gate", "Mill"]);
    }

    #[test]
    fn wraparound_between_coincident_ends_is_rejected() {
        let route = Route::new(
            4,
            "Ring",
            vec![
                stop("North Gate", 5.0, 5.0),
                stop("Mill", 5.0, 5.1),
                stop("South Gate", 5.0005, 5.0005),
            ],
        );
        assert!(match_route(&route, "South Gate", "North Gate").is_none());
    }

    #[test]
    fn first_route_in_collection_order_wins() {
        let routes = vec![
            Route::new(10, "Short", vec![stop("X", 0.0, 0.0), stop("Y", 0.0, 0.1)]),
            Route::new(
                11,
                "Long",
                vec![stop("X", 0.0, 0.0), stop("M", 0.5, 0.5), stop("Y", 0.0, 0.1)],
            ),
        ];
        let segment = find_direct_route(&routes, "X", "Y").unwrap();
        assert_eq!(segment.route, 0);

        let set = RouteSet::new(routes);
        assert_eq!(set.find_direct("X", "Y").unwrap().route, 0);
    }

    #[test]
    fn later_route_used_when_earlier_fails() {
        let routes = vec![line(), loop_route()];
        let set = RouteSet::new(routes.clone());

        // Backwards on the line, but the loop wraps.
        let segment = set.find_direct("C", "B").unwrap();
        assert_eq!(segment.route, 1);
        assert_eq!(Some(segment), find_direct_route(&routes, "C", "B"));
    }

    #[test]
    fn routes_serving_is_ascending_without_duplicates() {
        let set = RouteSet::new(vec![line(), loop_route()]);
        assert_eq!(set.routes_serving("a"), &[0, 1]);
        assert_eq!(set.routes_serving("D"), &[0]);
        assert!(set.routes_serving("Z").is_empty());
    }

    #[test]
    fn intersect() {
        let v: Vec<usize> = intersect_sorted(&[0, 2, 3, 7], &[1, 2, 7, 9]).collect();
        assert_eq!(v, vec![2, 7]);
        assert_eq!(intersect_sorted(&[], &[1]).count(), 0);
    }
}
