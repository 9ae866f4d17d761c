//! Core library modules for aurorax-search
//!
//! This module contains the internal implementation details of the aurorax-search library.

pub mod error;
pub mod criteria;
pub mod pair;
pub mod distance;
pub mod request;

// Re-export main types for internal use
pub use criteria::{BlockKind, CriteriaBlock, CriteriaBlockSet, MAX_CRITERIA_BLOCKS};
pub use distance::{build_distance_matrix, DistanceMatrix, DistanceValue, MaxDistances, STANDARD_DEFAULT_DISTANCE};
pub use pair::{enumerate_pair_keys, pair_key_count, PairKey};
pub use request::{ConjunctionType, EpochPrecision, SearchInput, SearchOptions, SearchRequest, TimeRange};
