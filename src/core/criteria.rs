//! Criteria blocks for conjunction searches
//!
//! A criteria block selects data sources (programs, platforms, instrument
//! types, metadata filters). Its filter schema belongs to the API; here a
//! block is an opaque JSON object whose only relevant properties are its kind
//! and its 1-indexed position within its list.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::{Error, Result};

/// Maximum number of criteria blocks (ground + space) in one search
pub const MAX_CRITERIA_BLOCKS: usize = 10;

/// Which list a criteria block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Ground-based instruments (all-sky imagers, magnetometers, ...)
    Ground,
    /// Space-based instruments (spacecraft ephemeris sources)
    Space,
}

impl BlockKind {
    /// Prefix used when rendering pair keys
    pub fn prefix(&self) -> &'static str {
        match self {
            BlockKind::Ground => "ground",
            BlockKind::Space => "space",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Opaque selector payload, serialized verbatim into the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaBlock(Map<String, Value>);

impl CriteriaBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a selector field, replacing any previous value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Validate an arbitrary JSON value as the `position`-th block of `kind`
    pub fn from_value(kind: BlockKind, position: usize, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidCriteriaBlock {
                kind,
                position,
                reason: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
        }
    }

    /// Selector fields of the block
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for CriteriaBlock {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validated ground and space block lists of one search
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaBlockSet {
    ground: Vec<CriteriaBlock>,
    space: Vec<CriteriaBlock>,
}

impl CriteriaBlockSet {
    /// Build a block set, enforcing the criteria-block limit
    pub fn new(ground: Vec<CriteriaBlock>, space: Vec<CriteriaBlock>) -> Result<Self> {
        let count = ground.len() + space.len();
        if count > MAX_CRITERIA_BLOCKS {
            return Err(Error::TooManyCriteriaBlocks { count });
        }

        Ok(Self { ground, space })
    }

    /// Build a block set from raw JSON values, validating each block's shape
    pub fn from_values(ground: Vec<Value>, space: Vec<Value>) -> Result<Self> {
        let ground = blocks_from_values(BlockKind::Ground, ground)?;
        let space = blocks_from_values(BlockKind::Space, space)?;
        Self::new(ground, space)
    }

    /// Number of ground blocks (`G`)
    pub fn ground_count(&self) -> usize {
        self.ground.len()
    }

    /// Number of space blocks (`S`)
    pub fn space_count(&self) -> usize {
        self.space.len()
    }

    pub fn total(&self) -> usize {
        self.ground.len() + self.space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn ground(&self) -> &[CriteriaBlock] {
        &self.ground
    }

    pub fn space(&self) -> &[CriteriaBlock] {
        &self.space
    }
}

fn blocks_from_values(kind: BlockKind, values: Vec<Value>) -> Result<Vec<CriteriaBlock>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| CriteriaBlock::from_value(kind, idx + 1, value))
        .collect()
}
