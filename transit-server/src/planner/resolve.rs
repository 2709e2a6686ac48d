//! Path resolution with a fixed fallback order.
//!
//! Tries, in order: a direct route, a single transfer, and finally a
//! straight-line guess between the best-matching known stops. The first
//! strategy that succeeds wins; candidate paths are never compared.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Route, Stop, TransferLink};
use crate::geodesic;
use crate::stops::StopIndex;

use super::segment::RouteSet;
use super::transfer::find_route_with_transfers;

/// An ordered itinerary of at least two stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedPath(Vec<Stop>);

impl ResolvedPath {
    /// Wrap a stop sequence; `None` if it has fewer than two stops.
    pub fn new(stops: Vec<Stop>) -> Option<Self> {
        (stops.len() >= 2).then_some(Self(stops))
    }

    pub fn stops(&self) -> &[Stop] {
        &self.0
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &Stop {
        &self.0[0]
    }

    pub fn last(&self) -> &Stop {
        &self.0[self.0.len() - 1]
    }

    /// Great-circle length of the path in kilometres.
    pub fn length_km(&self) -> f64 {
        geodesic::path_length(&self.0)
    }
}

/// How a path was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Direct,
    Transfer,
    #[serde(rename = "synthetic")]
    SyntheticFallback,
    NotFound,
}

impl ResolutionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionKind::Direct => "direct",
            ResolutionKind::Transfer => "transfer",
            ResolutionKind::SyntheticFallback => "synthetic",
            ResolutionKind::NotFound => "not_found",
        }
    }
}

/// Why no path could be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No stop matches this name, exactly or as a substring.
    StopNotFound { name: String },
    /// The network has no stops at all.
    NoPathResolvable,
}

/// Outcome of resolving a path between two stop names.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Both stops lie, in order, on one route.
    Direct { path: ResolvedPath, route: usize },
    /// One change of route at a transfer link.
    Transfer {
        path: ResolvedPath,
        via: TransferLink,
        walked: bool,
    },
    /// A two-stop straight line between known stops. Not checked against
    /// any route.
    SyntheticFallback(ResolvedPath),
    NotFound {
        reason: NotFoundReason,
        /// Every distinct stop name, for suggesting corrections.
        available_stops: Vec<String>,
    },
}

impl Resolution {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            Resolution::Direct { .. } => ResolutionKind::Direct,
            Resolution::Transfer { .. } => ResolutionKind::Transfer,
            Resolution::SyntheticFallback(_) => ResolutionKind::SyntheticFallback,
            Resolution::NotFound { .. } => ResolutionKind::NotFound,
        }
    }

    /// The resolved path, if any.
    pub fn path(&self) -> Option<&ResolvedPath> {
        match self {
            Resolution::Direct { path, .. }
            | Resolution::Transfer { path, .. }
            | Resolution::SyntheticFallback(path) => Some(path),
            Resolution::NotFound { .. } => None,
        }
    }

    /// Whether the path follows configured routes.
    pub fn is_verified(&self) -> bool {
        matches!(
            self,
            Resolution::Direct { .. } | Resolution::Transfer { .. }
        )
    }
}

/// Resolves paths over one snapshot of the network.
pub struct Resolver<'a> {
    routes: &'a RouteSet,
    transfers: &'a [TransferLink],
    stops: &'a StopIndex,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    ///
    /// `stops` must be built from the same routes as `routes`.
    pub fn new(routes: &'a RouteSet, transfers: &'a [TransferLink], stops: &'a StopIndex) -> Self {
        Self {
            routes,
            transfers,
            stops,
        }
    }

    /// Resolve a path from `start` to `end`.
    pub fn resolve(&self, start: &str, end: &str) -> Resolution {
        if let Some(segment) = self.routes.find_direct(start, end)
            && let Some(path) = ResolvedPath::new(segment.stops)
        {
            debug!(start, end, route = segment.route, "direct path");
            return Resolution::Direct {
                path,
                route: segment.route,
            };
        }

        if let Some(found) = find_route_with_transfers(self.routes, self.transfers, start, end)
            && let Some(path) = ResolvedPath::new(found.stops)
        {
            return Resolution::Transfer {
                path,
                via: found.via,
                walked: found.walked,
            };
        }

        self.synthesize(start, end)
    }

    /// Straight line between the best-matching known stops.
    fn synthesize(&self, start: &str, end: &str) -> Resolution {
        let available_stops = || self.stops.stop_names();

        if self.stops.is_empty() {
            info!(start, end, "no stops known; cannot resolve");
            return Resolution::NotFound {
                reason: NotFoundReason::NoPathResolvable,
                available_stops: available_stops(),
            };
        }

        let Some(from) = self.stops.find_fuzzy(start) else {
            info!(name = start, "stop not found");
            return Resolution::NotFound {
                reason: NotFoundReason::StopNotFound {
                    name: start.to_string(),
                },
                available_stops: available_stops(),
            };
        };
        let Some(to) = self.stops.find_fuzzy(end) else {
            info!(name = end, "stop not found");
            return Resolution::NotFound {
                reason: NotFoundReason::StopNotFound {
                    name: end.to_string(),
                },
                available_stops: available_stops(),
            };
        };

        debug!(start, end, from = %from, to = %to, "synthetic fallback path");
        Resolution::SyntheticFallback(ResolvedPath(vec![from.clone(), to.clone()]))
    }
}

/// Resolve a path directly from raw collections.
///
/// Builds the route and stop indices on every call; long-lived callers
/// should keep a [`Resolver`] over prebuilt indices instead.
pub fn resolve(routes: &[Route], transfers: &[TransferLink], start: &str, end: &str) -> Resolution {
    let stops = StopIndex::build(routes);
    let routes = RouteSet::new(routes.to_vec());
    Resolver::new(&routes, transfers, &stops).resolve(start, end)
}
