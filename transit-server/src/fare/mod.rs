//! Distance-based fares.
//!
//! Fares are looked up from configured distance tiers. Lookup never fails:
//! distances beyond every tier are capped at the top tier, and anything
//! else unmatched falls back to a default fare.

mod estimate;
mod table;

pub use estimate::{FareError, FareEstimate, estimate_fare, format_fare};
pub use table::{DEFAULT_FARE, FareTable, TierIssue, fare_for};
