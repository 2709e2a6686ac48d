//! A resolved-ready snapshot of the network.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{Stop, TransferLink};
use crate::fare::{FareError, FareEstimate, FareTable, estimate_fare};
use crate::planner::{Resolution, Resolver, RouteSet};
use crate::stops::StopIndex;
use crate::store::NetworkData;

/// Routes, transfers and fares as of one load, with their lookup indices.
///
/// A snapshot is immutable; when the underlying data changes, build a new
/// one.
#[derive(Debug)]
pub struct Network {
    routes: RouteSet,
    transfers: Vec<TransferLink>,
    fares: FareTable,
    stops: StopIndex,
    loaded_at: DateTime<Utc>,
}

/// Counts describing a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub routes: usize,
    pub stops: usize,
    pub transfers: usize,
    pub fare_tiers: usize,
    pub loaded_at: DateTime<Utc>,
    pub fare_issues: Vec<String>,
}

impl Network {
    /// Index loaded data. Fare table problems are logged, not rejected.
    pub fn build(data: NetworkData, default_fare: f64) -> Self {
        let stops = StopIndex::build(&data.routes);
        let fares = FareTable::new(data.fare_tiers).with_default_fare(default_fare);

        for issue in fares.issues() {
            warn!(%issue, "fare tiers are ambiguous; affected distances use fallback fares");
        }

        let network = Self {
            routes: RouteSet::new(data.routes),
            transfers: data.transfers,
            fares,
            stops,
            loaded_at: Utc::now(),
        };

        info!(
            routes = network.routes.len(),
            stops = network.stops.len(),
            transfers = network.transfers.len(),
            "built network snapshot"
        );

        network
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    pub fn transfers(&self) -> &[TransferLink] {
        &self.transfers
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    pub fn stops(&self) -> &StopIndex {
        &self.stops
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.routes, &self.transfers, &self.stops)
    }

    /// Resolve a path between two stop names.
    pub fn resolve(&self, start: &str, end: &str) -> Resolution {
        self.resolver().resolve(start, end)
    }

    /// Estimate the fare between two stops, optionally along a known path.
    pub fn estimate_fare(
        &self,
        start: &str,
        end: &str,
        path: Option<&[Stop]>,
    ) -> Result<FareEstimate, FareError> {
        estimate_fare(&self.resolver(), &self.fares, start, end, path)
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            routes: self.routes.len(),
            stops: self.stops.len(),
            transfers: self.transfers.len(),
            fare_tiers: self.fares.tiers().len(),
            loaded_at: self.loaded_at,
            fare_issues: self.fares.issues().iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareTier, Route};
    use crate::planner::ResolutionKind;

    fn data() -> NetworkData {
        NetworkData {
            routes: vec![
                Route::new(
                    1,
                    "One",
                    vec![Stop::new("A", 0.0, 0.0), Stop::new("B", 0.0, 0.01)],
                ),
                Route::new(
                    2,
                    "Two",
                    vec![Stop::new("C", 0.01, 0.01), Stop::new("D", 0.02, 0.01)],
                ),
            ],
            transfers: vec![TransferLink::new("B", "C")],
            fare_tiers: vec![FareTier::new(0.0, 1.0, 5.0), FareTier::new(2.0, 4.0, 9.0)],
        }
    }

    #[test]
    fn resolves_through_snapshot() {
        let network = Network::build(data(), 10.0);
        assert_eq!(network.resolve("A", "D").kind(), ResolutionKind::Transfer);
    }

    #[test]
    fn estimate_uses_configured_default() {
        let network = Network::build(data(), 3.0);
        // A → B → C → D is ~3.34 km, inside the second tier.
        let estimate = network.estimate_fare("A", "D", None).unwrap();
        assert_eq!(estimate.fare, 9.0);

        // ~1.11 km falls in the gap between tiers, where the first tier caps it.
        let estimate = network.estimate_fare("A", "B", None).unwrap();
        assert_eq!(estimate.fare, 5.0);

        let empty = Network::build(NetworkData::default(), 3.0);
        let estimate = empty.estimate_fare("A", "B", Some(&[])).unwrap();
        assert_eq!(estimate.fare, 3.0);
    }

    #[test]
    fn summary_counts() {
        let summary = Network::build(data(), 10.0).summary();
        assert_eq!(summary.routes, 2);
        assert_eq!(summary.stops, 4);
        assert_eq!(summary.transfers, 1);
        assert_eq!(summary.fare_tiers, 2);
        assert_eq!(summary.fare_issues, vec!["no tier covers 1 km to 2 km"]);
    }
}
