//! Search request assembly
//!
//! Packages the time range, the criteria blocks, the epoch precision and the
//! distance matrix into the JSON body the conjunction search endpoint expects.

use std::str::FromStr;

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::criteria::{CriteriaBlock, CriteriaBlockSet};
use crate::core::distance::{build_distance_matrix, DistanceMatrix, MaxDistances};
use crate::core::error::{Error, Result};

/// Timestamp layout used on the wire (UTC, no offset)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a wire-format timestamp
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        Error::InvalidInput(format!(
            "Invalid timestamp '{raw}': {e} (expected YYYY-MM-DDTHH:MM:SS)"
        ))
    })
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::TIMESTAMP_FORMAT))
    }
}

/// Time grid at which the server evaluates candidate conjunction epochs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u32")]
pub enum EpochPrecision {
    /// One-minute grid
    #[default]
    SixtySeconds,
    /// Thirty-second grid
    ThirtySeconds,
}

impl EpochPrecision {
    pub fn seconds(&self) -> u32 {
        match self {
            EpochPrecision::SixtySeconds => 60,
            EpochPrecision::ThirtySeconds => 30,
        }
    }
}

/// Only exactly 30 or 60 is accepted; `30.0` counts, `30.5` does not
impl TryFrom<f64> for EpochPrecision {
    type Error = Error;

    fn try_from(seconds: f64) -> Result<Self> {
        if seconds == 60.0 {
            Ok(EpochPrecision::SixtySeconds)
        } else if seconds == 30.0 {
            Ok(EpochPrecision::ThirtySeconds)
        } else {
            Err(Error::InvalidEpochPrecision(seconds))
        }
    }
}

impl TryFrom<i64> for EpochPrecision {
    type Error = Error;

    fn try_from(seconds: i64) -> Result<Self> {
        Self::try_from(seconds as f64)
    }
}

impl TryFrom<u32> for EpochPrecision {
    type Error = Error;

    fn try_from(seconds: u32) -> Result<Self> {
        Self::try_from(f64::from(seconds))
    }
}

impl From<EpochPrecision> for u32 {
    fn from(precision: EpochPrecision) -> Self {
        precision.seconds()
    }
}

/// Magnetic field-line trace used to position space instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConjunctionType {
    /// North B-trace footprint
    Nbtrace,
    /// South B-trace footprint
    Sbtrace,
}

impl FromStr for ConjunctionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nbtrace" => Ok(ConjunctionType::Nbtrace),
            "sbtrace" => Ok(ConjunctionType::Sbtrace),
            other => Err(Error::InvalidInput(format!(
                "Unknown conjunction type '{other}' (expected nbtrace or sbtrace)"
            ))),
        }
    }
}

/// Closed search window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from wire-format timestamps
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Options controlling how strictly conjunctions are matched
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Distance for every pair without an override (standard default if `None`)
    pub default_distance: Option<f64>,

    /// Sparse per-pair overrides
    pub max_distances: Option<MaxDistances>,

    /// Epoch search precision
    pub epoch_search_precision: EpochPrecision,

    /// Trace types to search; empty means the default
    pub conjunction_types: Vec<ConjunctionType>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            default_distance: None,
            max_distances: None,
            epoch_search_precision: EpochPrecision::default(),
            conjunction_types: vec![ConjunctionType::Nbtrace],
        }
    }
}

/// Validated conjunction search request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(with = "timestamp")]
    start: NaiveDateTime,
    #[serde(with = "timestamp")]
    end: NaiveDateTime,
    ground: Vec<CriteriaBlock>,
    space: Vec<CriteriaBlock>,
    conjunction_types: Vec<ConjunctionType>,
    max_distances: DistanceMatrix,
    epoch_search_precision: EpochPrecision,
}

impl SearchRequest {
    /// Assemble a request, building its distance matrix from `options`
    pub fn new(time_range: TimeRange, blocks: CriteriaBlockSet, options: &SearchOptions) -> Result<Self> {
        if blocks.is_empty() {
            return Err(Error::NoCriteriaBlocks);
        }

        let max_distances = build_distance_matrix(
            &blocks,
            options.default_distance,
            options.max_distances.as_ref(),
        )?;

        let conjunction_types = if options.conjunction_types.is_empty() {
            SearchOptions::default().conjunction_types
        } else {
            options.conjunction_types.clone()
        };

        debug!(
            "Assembled search {} -> {}: {} ground, {} space blocks, precision {}s",
            time_range.start(),
            time_range.end(),
            blocks.ground_count(),
            blocks.space_count(),
            options.epoch_search_precision.seconds()
        );

        Ok(Self {
            start: time_range.start(),
            end: time_range.end(),
            ground: blocks.ground().to_vec(),
            space: blocks.space().to_vec(),
            conjunction_types,
            max_distances,
            epoch_search_precision: options.epoch_search_precision,
        })
    }

    pub fn max_distances(&self) -> &DistanceMatrix {
        &self.max_distances
    }

    pub fn epoch_search_precision(&self) -> EpochPrecision {
        self.epoch_search_precision
    }

    pub fn conjunction_types(&self) -> &[ConjunctionType] {
        &self.conjunction_types
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loosely typed search description, as accepted from JSON documents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInput {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub ground: Vec<Value>,
    #[serde(default)]
    pub space: Vec<Value>,
    #[serde(default)]
    pub default_distance: Option<f64>,
    #[serde(default)]
    pub max_distances: Option<MaxDistances>,
    #[serde(default)]
    pub epoch_search_precision: Option<f64>,
    #[serde(default)]
    pub conjunction_types: Vec<ConjunctionType>,
}

impl SearchInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every field and assemble the request
    pub fn into_request(self) -> Result<SearchRequest> {
        let time_range = TimeRange::parse(&self.start, &self.end)?;
        let blocks = CriteriaBlockSet::from_values(self.ground, self.space)?;
        let epoch_search_precision = match self.epoch_search_precision {
            Some(seconds) => EpochPrecision::try_from(seconds)?,
            None => EpochPrecision::default(),
        };

        let options = SearchOptions {
            default_distance: self.default_distance,
            max_distances: self.max_distances,
            epoch_search_precision,
            conjunction_types: self.conjunction_types,
        };

        SearchRequest::new(time_range, blocks, &options)
    }
}
