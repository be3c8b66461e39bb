use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Radius of the editing window the presets are defined over.
pub const PRESET_RADIUS: isize = 2;

/// Largest offset magnitude a neighborhood may hold on either axis, one full board side.
pub const MAX_OFFSET: isize = Coord::MAX as isize;

/// Raw neighbor candidates, before bounds filtering.
pub type NeighborList = SmallVec<[SignedCoord2; 8]>;

bitflags! {
    /// Edge wrapping rules, applied in declaration order.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WrapMode: u8 {
        /// Left and right edges meet, like a cylinder.
        const HORIZONTAL_NORMAL = 1 << 0;
        /// Left and right edges meet with the rows flipped, like a Möbius strip.
        const HORIZONTAL_INVERTED = 1 << 1;
        /// Top and bottom edges meet.
        const VERTICAL_NORMAL = 1 << 2;
        /// Top and bottom edges meet with the columns flipped.
        const VERTICAL_INVERTED = 1 << 3;
    }
}

impl Default for WrapMode {
    fn default() -> Self {
        Self::empty()
    }
}

impl WrapMode {
    pub const TORUS: Self = Self::HORIZONTAL_NORMAL.union(Self::VERTICAL_NORMAL);

    /// Whether a normal and an inverted rule are both set on one axis.
    ///
    /// The normal rule runs first and leaves nothing for the inverted rule to do.
    pub fn has_shadowed_rule(self) -> bool {
        self.contains(Self::HORIZONTAL_NORMAL | Self::HORIZONTAL_INVERTED)
            || self.contains(Self::VERTICAL_NORMAL | Self::VERTICAL_INVERTED)
    }
}

/// Set of offsets that count as adjacent, iterated row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Neighborhood {
    offsets: BTreeSet<Delta>,
}

impl Neighborhood {
    pub fn new(offsets: impl IntoIterator<Item = Delta>) -> Result<Self> {
        let neighborhood = Self {
            offsets: offsets.into_iter().collect(),
        };
        neighborhood.validate()?;
        Ok(neighborhood)
    }

    /// Every offset within `radius` of the center that satisfies `include`.
    pub fn from_predicate(radius: isize, include: impl Fn(Delta) -> bool) -> Self {
        let offsets = (-radius..=radius)
            .flat_map(|dr| (-radius..=radius).map(move |dc| (dr, dc)))
            .filter(|&delta| delta != (0, 0) && include(delta))
            .collect();
        Self { offsets }
    }

    pub fn validate(&self) -> Result<()> {
        if self.offsets.contains(&(0, 0)) {
            return Err(GameError::InvalidOffset);
        }
        let far = self
            .iter()
            .find(|&(dr, dc)| !offset_in_range(dr) || !offset_in_range(dc));
        if let Some(delta) = far {
            log::warn!(
                "Neighborhood offset {:?} is further than {} cells",
                delta,
                MAX_OFFSET
            );
            return Err(GameError::InvalidOffset);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Delta> + '_ {
        self.offsets.iter().copied()
    }

    pub fn contains(&self, delta: Delta) -> bool {
        self.offsets.contains(&delta)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Smallest square radius that holds every offset.
    pub fn radius(&self) -> isize {
        self.iter()
            .map(|(dr, dc)| dr.saturating_abs().max(dc.saturating_abs()))
            .max()
            .unwrap_or(0)
    }

    /// Adds `delta` if missing, removes it otherwise.
    pub fn toggle(&mut self, delta: Delta) -> Result<()> {
        if delta == (0, 0) || !offset_in_range(delta.0) || !offset_in_range(delta.1) {
            return Err(GameError::InvalidOffset);
        }
        if !self.offsets.remove(&delta) {
            self.offsets.insert(delta);
        }
        Ok(())
    }
}

const fn offset_in_range(offset: isize) -> bool {
    -MAX_OFFSET <= offset && offset <= MAX_OFFSET
}

impl Default for Neighborhood {
    fn default() -> Self {
        NeighborhoodPreset::Moore.neighborhood()
    }
}

/// Renders the mask as a square grid: `#` for an offset, `.` for none, `o` for the center.
impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let radius = self.radius();
        for dr in -radius..=radius {
            if dr != -radius {
                writeln!(f)?;
            }
            for dc in -radius..=radius {
                let symbol = if (dr, dc) == (0, 0) {
                    'o'
                } else if self.contains((dr, dc)) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Neighborhood {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let side = rows.len();
        if side % 2 == 0 || rows.iter().any(|row| row.chars().count() != side) {
            return Err(GameError::InvalidConfig);
        }
        let radius = (side / 2) as isize;

        let mut offsets = BTreeSet::new();
        for (dr, row) in (-radius..=radius).zip(&rows) {
            for (dc, symbol) in (-radius..=radius).zip(row.chars()) {
                match (symbol, (dr, dc) == (0, 0)) {
                    ('#', true) => return Err(GameError::InvalidOffset),
                    ('#', false) => {
                        offsets.insert((dr, dc));
                    }
                    ('o' | '.', true) | ('.', false) => {}
                    _ => return Err(GameError::InvalidConfig),
                }
            }
        }
        Ok(Self { offsets })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodPreset {
    /// Classic eight surrounding cells.
    Moore,
    Knight,
    /// Every other row, three columns wide.
    Stripes,
    /// Four orthogonal cells.
    Adjacent,
    /// Only cells above.
    Upward,
}

impl NeighborhoodPreset {
    pub const ALL: [Self; 5] = [
        Self::Moore,
        Self::Knight,
        Self::Stripes,
        Self::Adjacent,
        Self::Upward,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Moore => "Default",
            Self::Knight => "Knight",
            Self::Stripes => "Stripes",
            Self::Adjacent => "Adjacent",
            Self::Upward => "Upward",
        }
    }

    pub const fn includes(self, (dr, dc): Delta) -> bool {
        match self {
            Self::Moore => dr.abs() <= 1 && dc.abs() <= 1,
            Self::Knight => dr * dr + dc * dc == 5,
            Self::Stripes => dr.abs() <= 2 && dr % 2 == 0 && dc.abs() <= 1,
            Self::Adjacent => dr * dr + dc * dc == 1,
            Self::Upward => dr < 0 && dc.abs() <= 1,
        }
    }

    pub fn neighborhood(self) -> Neighborhood {
        Neighborhood::from_predicate(PRESET_RADIUS, |delta| self.includes(delta))
    }
}

/// Adjacency rule: which offsets count as neighbors and how edges wrap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub neighborhood: Neighborhood,
    #[serde(default)]
    pub wrap: WrapMode,
}

impl Topology {
    pub fn new(neighborhood: Neighborhood, wrap: WrapMode) -> Self {
        Self { neighborhood, wrap }
    }

    pub fn preset(preset: NeighborhoodPreset) -> Self {
        Self::new(preset.neighborhood(), WrapMode::empty())
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.wrap.has_shadowed_rule() {
            log::warn!(
                "Both normal and inverted wrapping set on one axis, normal wrapping takes precedence: {:?}",
                self.wrap
            );
        }
        self.neighborhood.validate()
    }

    /// Neighbor candidates of `center`, one per offset, in offset order.
    ///
    /// Candidates may fall outside the board or repeat when the board is smaller than the
    /// neighborhood and wraps. Candidates that overflow `isize` are skipped.
    pub fn neighbors(&self, center: Coord2, size: Coord2) -> NeighborList {
        if size.0 == 0 || size.1 == 0 {
            return NeighborList::new();
        }
        let (row, col) = (isize::from(center.0), isize::from(center.1));
        self.neighborhood
            .iter()
            .filter_map(|(dr, dc)| Some((row.checked_add(dr)?, col.checked_add(dc)?)))
            .filter_map(|coords| self.wrap_coords(coords, size))
            .collect()
    }

    /// Neighbors of `center` that land on the board, duplicates kept.
    pub fn neighbors_in_bounds(
        &self,
        center: Coord2,
        size: Coord2,
    ) -> impl Iterator<Item = Coord2> + use<> {
        self.neighbors(center, size)
            .into_iter()
            .filter_map(move |coords| clamp_to_board(coords, size))
    }

    fn wrap_coords(
        &self,
        (mut row, mut col): SignedCoord2,
        (rows, cols): Coord2,
    ) -> Option<SignedCoord2> {
        let height = isize::from(rows);
        let width = isize::from(cols);

        if self.wrap.contains(WrapMode::HORIZONTAL_NORMAL) {
            col = col.rem_euclid(width);
        }
        if self.wrap.contains(WrapMode::HORIZONTAL_INVERTED) {
            let wrapped = col.rem_euclid(width);
            if wrapped != col {
                row = (height - 1).checked_sub(row)?;
                col = wrapped;
            }
        }
        if self.wrap.contains(WrapMode::VERTICAL_NORMAL) {
            row = row.rem_euclid(height);
        }
        if self.wrap.contains(WrapMode::VERTICAL_INVERTED) {
            let wrapped = row.rem_euclid(height);
            if wrapped != row {
                col = (width - 1).checked_sub(col)?;
                row = wrapped;
            }
        }

        Some((row, col))
    }
}
