//! Deduplicated registry of stops.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Route, Stop, fold_name};

/// Every distinct stop across a route collection, with case-insensitive
/// lookup by name.
///
/// Stops are deduplicated by coordinates and kept in first-seen order
/// (routes in collection order, stops in route order). The index is a
/// snapshot: rebuild it whenever the route collection changes.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    all_stops: Vec<Stop>,
    /// Folded name → positions in `all_stops`, ascending.
    by_name: HashMap<String, Vec<usize>>,
}

impl StopIndex {
    /// Build the index from a route collection.
    pub fn build(routes: &[Route]) -> Self {
        let mut seen = HashSet::new();
        let mut all_stops = Vec::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for stop in routes.iter().flat_map(|r| r.stops.iter()) {
            if !seen.insert(stop.coord_key()) {
                continue;
            }
            by_name
                .entry(fold_name(&stop.name))
                .or_default()
                .push(all_stops.len());
            all_stops.push(stop.clone());
        }

        debug!(
            stops = all_stops.len(),
            names = by_name.len(),
            "built stop index"
        );

        Self { all_stops, by_name }
    }

    /// All distinct stops in first-seen order.
    pub fn all_stops(&self) -> &[Stop] {
        &self.all_stops
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.all_stops.len()
    }

    /// Whether the index holds no stops.
    pub fn is_empty(&self) -> bool {
        self.all_stops.is_empty()
    }

    /// All stops whose name matches exactly (ignoring case).
    pub fn stops_named(&self, name: &str) -> Vec<&Stop> {
        self.by_name
            .get(&fold_name(name))
            .map(|positions| positions.iter().map(|&i| &self.all_stops[i]).collect())
            .unwrap_or_default()
    }

    /// First stop whose name matches exactly (ignoring case).
    pub fn find_exact(&self, name: &str) -> Option<&Stop> {
        self.by_name
            .get(&fold_name(name))
            .and_then(|positions| positions.first())
            .map(|&i| &self.all_stops[i])
    }

    /// Best-effort lookup: an exact match, or else the first stop whose name
    /// contains the query or is contained in it.
    ///
    /// When several stops share the substring, the first in index order
    /// wins. Blank queries match nothing, and stops with blank names are
    /// never matched.
    pub fn find_fuzzy(&self, name: &str) -> Option<&Stop> {
        let query = fold_name(name);
        if query.is_empty() {
            return None;
        }

        self.find_exact(&query).or_else(|| {
            self.all_stops.iter().find(|stop| {
                let candidate = fold_name(&stop.name);
                !candidate.is_empty()
                    && (candidate.contains(&query) || query.contains(&candidate))
            })
        })
    }

    /// Distinct stop names (case-insensitively), first spelling kept.
    pub fn stop_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.all_stops
            .iter()
            .filter(|s| seen.insert(fold_name(&s.name)))
            .map(|s| s.name.clone())
            .collect()
    }

    /// Search stop names for autocompletion.
    ///
    /// Names starting with the query come first, then names containing it
    /// elsewhere; each group keeps index order. Returns at most `limit`
    /// distinct names.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Stop> {
        let query = fold_name(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let distinct: Vec<(&Stop, String)> = self
            .all_stops
            .iter()
            .filter_map(|s| {
                let folded = fold_name(&s.name);
                seen.insert(folded.clone()).then_some((s, folded))
            })
            .collect();

        let prefix = distinct
            .iter()
            .filter(|(_, folded)| folded.starts_with(&query));
        let infix = distinct
            .iter()
            .filter(|(_, folded)| !folded.starts_with(&query) && folded.contains(&query));

        prefix.chain(infix).take(limit).map(|(s, _)| *s).collect()
    }
}
