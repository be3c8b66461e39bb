#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use error::*;
pub use generator::*;
pub use hazard::*;
pub use tile::*;
pub use topology::*;
pub use types::*;

mod analysis;
mod board;
mod engine;
mod error;
mod generator;
mod hazard;
mod tile;
mod topology;
mod types;

/// How a revealed cell decides that enough neighbors are marked to chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordRule {
    /// Every marked neighbor counts as one.
    MarkerCount,
    /// Marker values are summed with their sign, like clues are.
    MarkerSum,
}

impl Default for ChordRule {
    fn default() -> Self {
        Self::MarkerCount
    }
}

/// Everything needed to start a new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub hazards: HazardCounts,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub chord_rule: ChordRule,
}

impl GameConfig {
    pub fn new(size: Coord2, hazards: HazardCounts) -> Self {
        Self {
            size,
            hazards,
            topology: Topology::default(),
            chord_rule: ChordRule::default(),
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_chord_rule(mut self, chord_rule: ChordRule) -> Self {
        self.chord_rule = chord_rule;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.hazards.total() > self.total_cells() {
            log::warn!(
                "Requested {} hazards but the board only fits {}",
                self.hazards.total(),
                self.total_cells()
            );
        }
        self.topology.validate()
    }

    /// Parses and validates a JSON game configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|err| {
            log::warn!("Could not parse game config: {}", err);
            GameError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitHazard,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard => true,
            Won => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitHazard, _) => HitHazard,
            (_, HitHazard) => HitHazard,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
