//! Maximum-distance matrix construction
//!
//! Expands a default distance and a sparse override map into one entry per
//! configurable block pair. Resolution per pair: explicit override, then the
//! caller's default distance, then [`STANDARD_DEFAULT_DISTANCE`].

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::criteria::CriteriaBlockSet;
use crate::core::error::{suggest_pair_key, Error, Result};
use crate::core::pair::{enumerate_pair_keys, PairKey};

/// Default maximum distance in kilometers when the caller gives none
pub const STANDARD_DEFAULT_DISTANCE: f64 = 300.0;

/// Maximum distance for one block pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceValue {
    /// Pair must lie within this many kilometers
    Kilometers(f64),
    /// No maximum; any distance satisfies the pair
    Unconstrained,
}

impl DistanceValue {
    pub fn kilometers(&self) -> Option<f64> {
        match self {
            DistanceValue::Kilometers(km) => Some(*km),
            DistanceValue::Unconstrained => None,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, DistanceValue::Unconstrained)
    }
}

impl From<f64> for DistanceValue {
    fn from(km: f64) -> Self {
        DistanceValue::Kilometers(km)
    }
}

impl From<Option<f64>> for DistanceValue {
    fn from(km: Option<f64>) -> Self {
        km.map_or(DistanceValue::Unconstrained, DistanceValue::Kilometers)
    }
}

/// Integral kilometers go on the wire as JSON integers, unconstrained as `null`
impl Serialize for DistanceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            DistanceValue::Kilometers(km)
                if km.is_finite() && km.fract() == 0.0 && km.abs() < i64::MAX as f64 =>
            {
                serializer.serialize_i64(km as i64)
            }
            DistanceValue::Kilometers(km) => serializer.serialize_f64(km),
            DistanceValue::Unconstrained => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DistanceValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(DistanceValue::from)
    }
}

/// Sparse per-pair overrides keyed by rendered pair key
pub type MaxDistances = BTreeMap<String, DistanceValue>;

/// Complete pair → distance mapping for one search
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    entries: BTreeMap<PairKey, DistanceValue>,
}

impl DistanceMatrix {
    pub fn get(&self, key: &PairKey) -> Option<DistanceValue> {
        self.entries.get(key).copied()
    }

    /// Look up a rendered key; malformed keys yield `None`
    pub fn get_str(&self, key: &str) -> Option<DistanceValue> {
        PairKey::parse(key).and_then(|key| self.get(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &DistanceValue)> {
        self.entries.iter()
    }

    /// Render back to the string-keyed wire map
    pub fn to_max_distances(&self) -> MaxDistances {
        self.entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }
}

impl Serialize for DistanceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Build the complete distance matrix for `blocks`.
///
/// Fails atomically: either every pair resolves or an error names the first
/// offending default, key or value.
pub fn build_distance_matrix(
    blocks: &CriteriaBlockSet,
    default_distance: Option<f64>,
    overrides: Option<&MaxDistances>,
) -> Result<DistanceMatrix> {
    let ground_count = blocks.ground_count();
    let space_count = blocks.space_count();

    if let Some(km) = default_distance {
        validate_kilometers(None, km)?;
    }

    let keys = enumerate_pair_keys(ground_count, space_count);
    let resolved_overrides = match overrides {
        Some(overrides) => resolve_overrides(overrides, &keys, ground_count, space_count)?,
        None => BTreeMap::new(),
    };

    let fallback = DistanceValue::Kilometers(default_distance.unwrap_or(STANDARD_DEFAULT_DISTANCE));

    let entries: BTreeMap<PairKey, DistanceValue> = keys
        .into_iter()
        .map(|key| {
            let value = match resolved_overrides.get(&key) {
                Some(value) => {
                    trace!("{key}: override {value:?}");
                    *value
                }
                None => fallback,
            };
            (key, value)
        })
        .collect();

    debug!(
        "Built distance matrix: {} pairs ({} ground, {} space blocks), {} overridden ({} unconstrained), fallback {:?}",
        entries.len(),
        ground_count,
        space_count,
        resolved_overrides.len(),
        resolved_overrides.values().filter(|v| v.is_unconstrained()).count(),
        fallback
    );

    Ok(DistanceMatrix { entries })
}

/// Map every override onto a known pair key and validate its distance
fn resolve_overrides(
    overrides: &MaxDistances,
    keys: &[PairKey],
    ground_count: usize,
    space_count: usize,
) -> Result<BTreeMap<PairKey, DistanceValue>> {
    let mut resolved = BTreeMap::new();

    for raw in overrides.keys() {
        match PairKey::parse(raw) {
            Some(key) if key.is_valid_for(ground_count, space_count) => {
                resolved.insert(key, overrides[raw]);
            }
            _ => {
                let candidates: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
                return Err(Error::UnknownPairKey {
                    key: raw.clone(),
                    ground_count,
                    space_count,
                    suggestion: suggest_pair_key(raw, &candidates),
                });
            }
        }
    }

    for (key, value) in &resolved {
        if let DistanceValue::Kilometers(km) = *value {
            validate_kilometers(Some(key), km)?;
        }
    }

    Ok(resolved)
}

fn validate_kilometers(key: Option<&PairKey>, km: f64) -> Result<()> {
    if km.is_finite() && km >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDistance {
            key: key.map(|k| k.to_string()),
            value: km,
        })
    }
}
