//! Stop registry and name lookup.
//!
//! Provides the deduplicated stop list used for fuzzy endpoint matching,
//! "did you mean" suggestions, and stop-name autocompletion.

mod index;

pub use index::StopIndex;
