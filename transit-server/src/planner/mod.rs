//! Path resolution between named stops.
//!
//! This module implements the core question the service answers:
//! "which stops do I pass through to get from here to there?"
//!
//! Resolution follows a fixed priority rather than searching for an optimal
//! path: a single route first, then one change at a configured transfer
//! link, then an unverified straight line between the closest-named stops.
//! At most one transfer is ever made.

mod resolve;
mod segment;
mod transfer;

pub use resolve::{NotFoundReason, Resolution, ResolutionKind, ResolvedPath, Resolver, resolve};
pub use segment::{RouteSet, Segment, find_direct_route, match_route};
pub use transfer::{TransferPath, find_route_with_transfers};
