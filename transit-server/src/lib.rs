//! Transit path and fare server.
//!
//! Resolves a rider's path between two named stops over a bus network
//! (directly, through one transfer, or as an unverified straight line) and
//! prices it by distance.

pub mod cache;
pub mod config;
pub mod domain;
pub mod fare;
pub mod geodesic;
pub mod network;
pub mod planner;
pub mod stops;
pub mod store;
pub mod web;
