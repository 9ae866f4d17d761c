//! Pair keys identifying configurable block pairs
//!
//! Only ground-space and space-space pairs are configurable; the distance
//! between ground instruments is fixed by the API. Keys render 1-indexed as
//! `ground{i}-space{j}` and `space{i}-space{j}` (with `i < j`).

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::core::criteria::BlockKind;
use crate::core::error::Error;

/// Canonical identifier of a configurable block pair.
///
/// The derived ordering matches enumeration order: all ground-space pairs
/// by `(ground, space)`, then all space-space pairs by `(first, second)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PairKey {
    GroundSpace { ground: usize, space: usize },
    SpaceSpace { first: usize, second: usize },
}

impl PairKey {
    /// Strictly parse a rendered key.
    ///
    /// Only the canonical rendering is accepted: no leading zeros, no zero
    /// indexes, no reversed or self-referencing space pairs, no ground-ground
    /// pairs.
    pub fn parse(raw: &str) -> Option<Self> {
        let (left, right) = raw.split_once('-')?;
        let (left_kind, first) = parse_side(left)?;
        let (right_kind, second) = parse_side(right)?;

        match (left_kind, right_kind) {
            (BlockKind::Ground, BlockKind::Space) => Some(PairKey::GroundSpace {
                ground: first,
                space: second,
            }),
            (BlockKind::Space, BlockKind::Space) if first < second => {
                Some(PairKey::SpaceSpace { first, second })
            }
            _ => None,
        }
    }

    /// Whether this pair exists for `ground_count` ground and `space_count` space blocks
    pub fn is_valid_for(&self, ground_count: usize, space_count: usize) -> bool {
        match *self {
            PairKey::GroundSpace { ground, space } => {
                (1..=ground_count).contains(&ground) && (1..=space_count).contains(&space)
            }
            PairKey::SpaceSpace { first, second } => {
                first >= 1 && first < second && second <= space_count
            }
        }
    }
}

fn parse_side(side: &str) -> Option<(BlockKind, usize)> {
    let (kind, digits) = [BlockKind::Ground, BlockKind::Space]
        .into_iter()
        .find_map(|kind| side.strip_prefix(kind.prefix()).map(|rest| (kind, rest)))?;

    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok().map(|index| (kind, index))
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairKey::GroundSpace { ground, space } => {
                write!(f, "{}{ground}-{}{space}", BlockKind::Ground, BlockKind::Space)
            }
            PairKey::SpaceSpace { first, second } => {
                write!(f, "{}{first}-{}{second}", BlockKind::Space, BlockKind::Space)
            }
        }
    }
}

impl FromStr for PairKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PairKey::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "'{s}' is not a pair key (expected groundI-spaceJ or spaceI-spaceJ with I < J)"
            ))
        })
    }
}

impl Serialize for PairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Number of configurable pairs: `G·S + C(S, 2)`
pub fn pair_key_count(ground_count: usize, space_count: usize) -> usize {
    ground_count * space_count + space_count * space_count.saturating_sub(1) / 2
}

/// Enumerate every configurable pair key in canonical order
pub fn enumerate_pair_keys(ground_count: usize, space_count: usize) -> Vec<PairKey> {
    let mut keys = Vec::with_capacity(pair_key_count(ground_count, space_count));

    for ground in 1..=ground_count {
        for space in 1..=space_count {
            keys.push(PairKey::GroundSpace { ground, space });
        }
    }

    for first in 1..=space_count {
        for second in (first + 1)..=space_count {
            keys.push(PairKey::SpaceSpace { first, second });
        }
    }

    keys
}
