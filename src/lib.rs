//! # Aurorax-search Library
//!
//! Builds validated request bodies for the AuroraX conjunction search API.
//! The crate never talks to the network: it turns criteria blocks, a time
//! range and a few distance knobs into the JSON the search endpoint expects,
//! and rejects anything the server would refuse.
//!
//! ## Features
//!
//! - **Complete distance matrix**: one entry per ground-space and space-space
//!   block pair, resolved as override > default distance > 300 km
//! - **Unconstrained pairs**: a first-class "no maximum" value, serialized as `null`
//! - **Early validation**: block limit, pair keys, distances, epoch precision
//! - **Helpful errors**: unknown pair keys report the valid range and the closest valid key
//!
//! ## Basic Usage
//!
//! ```rust
//! use aurorax_search::{CriteriaBlock, SearchOptions};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ground = vec![CriteriaBlock::new().with("programs", json!(["themis-asi"]))];
//! let space = vec![
//!     CriteriaBlock::new().with("programs", json!(["swarm"])),
//!     CriteriaBlock::new().with("programs", json!(["themis"])),
//! ];
//!
//! let request = aurorax_search::build_search_request(
//!     "2019-01-01T00:00:00",
//!     "2019-01-01T23:59:59",
//!     ground,
//!     space,
//!     &SearchOptions::default(),
//! )?;
//!
//! assert_eq!(request.max_distances().len(), 3);
//! println!("{}", request.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Per-pair Distances
//!
//! ```rust
//! use aurorax_search::{CriteriaBlock, CriteriaBlockSet, DistanceValue, MaxDistances};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let block = || CriteriaBlock::new().with("programs", json!(["rego"]));
//! let blocks = CriteriaBlockSet::new(vec![block(), block()], vec![block(), block()])?;
//!
//! let mut overrides = MaxDistances::new();
//! overrides.insert("ground2-space2".to_string(), DistanceValue::Unconstrained);
//! overrides.insert("space1-space2".to_string(), DistanceValue::Kilometers(700.0));
//!
//! let matrix = aurorax_search::build_distance_matrix(&blocks, Some(400.0), Some(&overrides))?;
//! assert_eq!(matrix.get_str("ground1-space1"), Some(DistanceValue::Kilometers(400.0)));
//! assert_eq!(matrix.get_str("ground2-space2"), Some(DistanceValue::Unconstrained));
//! # Ok(())
//! # }
//! ```

// Re-export core types that users might need
pub use crate::core::error::{Error, Result};
pub use crate::core::{
    build_distance_matrix, enumerate_pair_keys, pair_key_count, BlockKind, ConjunctionType,
    CriteriaBlock, CriteriaBlockSet, DistanceMatrix, DistanceValue, EpochPrecision, MaxDistances,
    PairKey, SearchInput, SearchOptions, SearchRequest, TimeRange, MAX_CRITERIA_BLOCKS,
    STANDARD_DEFAULT_DISTANCE,
};

// Internal modules
mod core;

// C-compatible FFI bindings (optional)
#[cfg(feature = "c-bindings")]
pub mod ffi;

/// Build a conjunction search request
///
/// # Arguments
/// * `start`, `end` - Search window as `YYYY-MM-DDTHH:MM:SS` (UTC)
/// * `ground` - Ground criteria blocks, in order
/// * `space` - Space criteria blocks, in order
/// * `options` - Distances, epoch precision and conjunction types
///
/// # Examples
/// ```rust
/// use aurorax_search::{CriteriaBlock, SearchOptions};
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = SearchOptions {
///     default_distance: Some(1000.0),
///     ..Default::default()
/// };
///
/// let request = aurorax_search::build_search_request(
///     "2020-01-01T00:00:00",
///     "2020-01-01T06:00:00",
///     vec![CriteriaBlock::new().with("programs", json!(["trex"]))],
///     vec![CriteriaBlock::new().with("programs", json!(["swarm"]))],
///     &options,
/// )?;
/// assert_eq!(request.max_distances().get_str("ground1-space1").unwrap().kilometers(), Some(1000.0));
/// # Ok(())
/// # }
/// ```
pub fn build_search_request(
    start: &str,
    end: &str,
    ground: Vec<CriteriaBlock>,
    space: Vec<CriteriaBlock>,
    options: &SearchOptions,
) -> Result<SearchRequest> {
    let time_range = TimeRange::parse(start, end)?;
    let blocks = CriteriaBlockSet::new(ground, space)?;

    SearchRequest::new(time_range, blocks, options)
}

/// Build a request from a JSON search description and return the request body
///
/// The input document carries `start`, `end`, `ground`, `space` and the
/// optional `default_distance`, `max_distances`, `epoch_search_precision`
/// and `conjunction_types` fields.
pub fn build_request_json(input: &str) -> Result<String> {
    SearchInput::from_json(input)?.into_request()?.to_json()
}
