//! Fare tier lookup.

use std::fmt;

use crate::domain::FareTier;

/// Fare charged when no tier applies.
pub const DEFAULT_FARE: f64 = 10.0;

/// Look up the fare for a distance using [`DEFAULT_FARE`] as the fallback.
pub fn fare_for(tiers: &[FareTier], distance_km: f64) -> f64 {
    lookup(tiers, distance_km).unwrap_or(DEFAULT_FARE)
}

/// Tier lookup without the default.
///
/// The first tier containing the distance wins. Past the configured ranges,
/// the tier with the greatest `max` at or below the distance caps the fare.
fn lookup(tiers: &[FareTier], distance_km: f64) -> Option<f64> {
    if let Some(tier) = tiers.iter().find(|t| t.contains(distance_km)) {
        return Some(tier.fare);
    }

    tiers
        .iter()
        .filter(|t| t.max <= distance_km)
        .fold(None::<&FareTier>, |best, t| match best {
            Some(b) if b.max >= t.max => Some(b),
            _ => Some(t),
        })
        .map(|t| t.fare)
}

/// An ordered list of fare tiers with a default fare.
#[derive(Debug, Clone, PartialEq)]
pub struct FareTable {
    tiers: Vec<FareTier>,
    default_fare: f64,
}

impl FareTable {
    /// Create a table using [`DEFAULT_FARE`] as the fallback.
    pub fn new(tiers: Vec<FareTier>) -> Self {
        Self {
            tiers,
            default_fare: DEFAULT_FARE,
        }
    }

    /// Set a custom fallback fare.
    pub fn with_default_fare(mut self, fare: f64) -> Self {
        self.default_fare = fare;
        self
    }

    pub fn tiers(&self) -> &[FareTier] {
        &self.tiers
    }

    pub fn default_fare(&self) -> f64 {
        self.default_fare
    }

    /// Fare for a journey of `distance_km`.
    ///
    /// Never fails: misconfigured or missing tiers degrade to the default.
    pub fn fare_for(&self, distance_km: f64) -> f64 {
        lookup(&self.tiers, distance_km).unwrap_or(self.default_fare)
    }

    /// Configuration problems that make lookups ambiguous.
    ///
    /// Tiers are compared in order of their lower bound.
    pub fn issues(&self) -> Vec<TierIssue> {
        let mut issues = Vec::new();

        let mut ordered: Vec<(usize, &FareTier)> = Vec::new();
        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.min < tier.max {
                ordered.push((i, tier));
            } else {
                issues.push(TierIssue::Empty { tier: i });
            }
        }
        ordered.sort_by(|a, b| a.1.min.total_cmp(&b.1.min));

        if let Some((i, first)) = ordered.first()
            && first.min > 0.0
        {
            issues.push(TierIssue::Gap {
                after: None,
                before: *i,
                from_km: 0.0,
                to_km: first.min,
            });
        }

        for pair in ordered.windows(2) {
            let (i, a) = pair[0];
            let (j, b) = pair[1];
            if b.min < a.max {
                issues.push(TierIssue::Overlap {
                    first: i,
                    second: j,
                });
            } else if b.min > a.max {
                issues.push(TierIssue::Gap {
                    after: Some(i),
                    before: j,
                    from_km: a.max,
                    to_km: b.min,
                });
            }
        }

        issues
    }
}

impl Default for FareTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// A problem in a fare table. Tiers are identified by their position in
/// the configured list.
#[derive(Debug, Clone, PartialEq)]
pub enum TierIssue {
    /// `min >= max`, so the tier never matches.
    Empty { tier: usize },
    /// Two ranges share distances; the earlier-listed tier wins.
    Overlap { first: usize, second: usize },
    /// No tier covers these distances.
    Gap {
        after: Option<usize>,
        before: usize,
        from_km: f64,
        to_km: f64,
    },
}

impl fmt::Display for TierIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierIssue::Empty { tier } => write!(f, "tier {tier} has an empty range"),
            TierIssue::Overlap { first, second } => {
                write!(f, "tiers {first} and {second} overlap")
            }
            TierIssue::Gap {
                from_km, to_km, ..
            } => write!(f, "no tier covers {from_km} km to {to_km} km"),
        }
    }
}
