use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which side of the board's signed arithmetic a hazard sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardFamily {
    Mine,
    AntiMine,
}

/// Signed hazard identifier: magnitude is the power class, sign the family, `0` is no hazard.
///
/// Ordering follows the enumeration used for placement and marker cycling: no hazard first,
/// then every mine by ascending power, then every anti-mine by ascending power.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardType(i8);

impl HazardType {
    pub const NONE: Self = Self(0);

    /// Hazards offered by the reference configuration, in enumeration order.
    pub const REFERENCE: [Self; 8] = [
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(-1),
        Self(-2),
        Self(-3),
        Self(-4),
    ];

    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_hazard(self) -> bool {
        self.0 != 0
    }

    pub const fn power(self) -> u8 {
        self.0.unsigned_abs()
    }

    pub const fn family(self) -> Option<HazardFamily> {
        match self.0 {
            0 => None,
            1.. => Some(HazardFamily::Mine),
            _ => Some(HazardFamily::AntiMine),
        }
    }

    const fn order_key(self) -> (bool, u8) {
        (self.0 < 0, self.0.unsigned_abs())
    }
}

impl Ord for HazardType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for HazardType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i8> for HazardType {
    fn from(value: i8) -> Self {
        Self(value)
    }
}

impl From<HazardType> for Clue {
    fn from(hazard: HazardType) -> Self {
        hazard.0.into()
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a hazard count list, as it appears in configuration files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardCount {
    pub hazard: HazardType,
    pub count: CellCount,
}

/// Requested number of cells per hazard type, iterated in enumeration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HazardCount>", into = "Vec<HazardCount>")]
pub struct HazardCounts(BTreeMap<HazardType, CellCount>);

impl HazardCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HazardCounts::set`].
    pub fn with(mut self, hazard: HazardType, count: CellCount) -> Result<Self> {
        self.set(hazard, count)?;
        Ok(self)
    }

    /// Sets the requested count for `hazard`, a zero count removes the entry.
    pub fn set(&mut self, hazard: HazardType, count: CellCount) -> Result<()> {
        if hazard.is_none() {
            return Err(GameError::InvalidHazard);
        }
        if count == 0 {
            self.0.remove(&hazard);
        } else {
            self.0.insert(hazard, count);
        }
        Ok(())
    }

    pub fn get(&self, hazard: HazardType) -> CellCount {
        self.0.get(&hazard).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HazardType, CellCount)> + '_ {
        self.0.iter().map(|(&hazard, &count)| (hazard, count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> CellCount {
        self.0
            .values()
            .fold(0, |total: CellCount, &count| total.saturating_add(count))
    }
}

impl TryFrom<Vec<HazardCount>> for HazardCounts {
    type Error = GameError;

    fn try_from(entries: Vec<HazardCount>) -> Result<Self> {
        let mut counts = Self::new();
        for HazardCount { hazard, count } in entries {
            if counts.0.contains_key(&hazard) {
                return Err(GameError::DuplicateHazard);
            }
            counts.set(hazard, count)?;
        }
        Ok(counts)
    }
}

impl From<HazardCounts> for Vec<HazardCount> {
    fn from(counts: HazardCounts) -> Self {
        counts
            .iter()
            .map(|(hazard, count)| HazardCount { hazard, count })
            .collect()
    }
}
