//! Domain types for the transit network.
//!
//! These are plain snapshots of what the data store supplies. Nothing in
//! this module is ever mutated by path resolution.

mod fare_tier;
mod route;
mod stop;
mod transfer;

pub use fare_tier::FareTier;
pub use route::{CIRCULAR_TOLERANCE_DEG, Route};
pub use stop::{CoordKey, Stop, fold_name, same_name};
pub use transfer::TransferLink;
