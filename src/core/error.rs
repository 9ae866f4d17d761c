//! Error types for aurorax-search
//!
//! Every failure is a local validation error raised before a request leaves
//! the crate. Pair-key errors carry the valid key range and, when a close
//! match exists, a fuzzy-matched suggestion.

use chrono::NaiveDateTime;
use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

use crate::core::criteria::BlockKind;

/// Minimum combined similarity for a pair-key suggestion
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Main error type for aurorax-search operations
#[derive(Debug, Error)]
pub enum Error {
    /// More criteria blocks than the API accepts in one search
    #[error(
        "Too many criteria blocks: {count} supplied, at most {} allowed (ground + space)",
        crate::core::criteria::MAX_CRITERIA_BLOCKS
    )]
    TooManyCriteriaBlocks { count: usize },

    /// Override key that cannot exist for the given block counts
    #[error(
        "Unknown max distance pair '{key}' for {ground_count} ground and {space_count} space blocks (valid: {}){}",
        describe_valid_keys(.ground_count, .space_count),
        suggestion_hint(.suggestion)
    )]
    UnknownPairKey {
        key: String,
        ground_count: usize,
        space_count: usize,
        suggestion: Option<String>,
    },

    /// Negative or non-finite distance
    #[error(
        "Invalid distance {value} for {}: distances must be finite, non-negative kilometers",
        distance_subject(.key)
    )]
    InvalidDistance { key: Option<String>, value: f64 },

    /// Epoch search precision other than 30 or 60 seconds
    #[error("Invalid epoch search precision {0}: must be 30 or 60 seconds")]
    InvalidEpochPrecision(f64),

    /// Criteria block that is not a JSON object
    #[error("Invalid {kind} criteria block #{position}: {reason}")]
    InvalidCriteriaBlock {
        kind: BlockKind,
        position: usize,
        reason: String,
    },

    /// Search without any ground or space block
    #[error("A conjunction search needs at least one ground or space criteria block")]
    NoCriteriaBlocks,

    /// End of the search window precedes its start
    #[error("Invalid time range: end {end} is before start {start}")]
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Invalid configuration or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by request contents rather than malformed input
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::InvalidInput(_) | Error::Json(_))
    }
}

/// Convenience result type for aurorax-search operations
pub type Result<T> = std::result::Result<T, Error>;

fn describe_valid_keys(ground_count: &usize, space_count: &usize) -> String {
    let (g, s) = (*ground_count, *space_count);
    let mut parts = Vec::new();

    if g > 0 && s > 0 {
        parts.push(format!("ground{{1..{g}}}-space{{1..{s}}}"));
    }
    if s >= 2 {
        parts.push(format!("space{{i}}-space{{j}} with 1 <= i < j <= {s}"));
    }

    if parts.is_empty() {
        "no configurable pairs".to_string()
    } else {
        parts.join("; ")
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(key) => format!(". Did you mean '{key}'?"),
        None => String::new(),
    }
}

fn distance_subject(key: &Option<String>) -> String {
    match key {
        Some(key) => format!("pair '{key}'"),
        None => "the default distance".to_string(),
    }
}

/// Suggest the closest valid pair key for a rejected override key.
///
/// Scores combine Jaro-Winkler (rewards shared prefixes such as `ground`
/// or `space`) with normalized Levenshtein (penalizes swapped indexes).
pub fn suggest_pair_key<S: AsRef<str>>(input: &str, candidates: &[S]) -> Option<String> {
    let input_lower = input.trim().to_lowercase();
    let mut best_match = None;
    let mut best_score = 0.0;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score =
            0.5 * jaro_winkler(&input_lower, candidate) + 0.5 * normalized_levenshtein(&input_lower, candidate);

        if score >= SUGGESTION_THRESHOLD && score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}
