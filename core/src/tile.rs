use serde::{Deserialize, Serialize};

use crate::*;

/// Single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub hazard: HazardType,
    pub marker: HazardType,
    pub opened: bool,
    /// `None` when no neighbor carries a hazard, which is distinct from a sum that cancels to 0.
    pub clue: Option<Clue>,
}

impl Cell {
    pub const fn is_marked(self) -> bool {
        self.marker.is_hazard()
    }

    pub const fn is_safe(self) -> bool {
        self.hazard.is_none()
    }

    /// Safe cells must be opened and hazards left closed for the board to be won.
    pub const fn is_settled(self) -> bool {
        self.opened == self.hazard.is_none()
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Marked(HazardType),
    /// Opened with no hazardous neighbor.
    Empty,
    Clue(Clue),
    /// Opened hazard, only shown once the game is over.
    Detonated(HazardType),
    /// Hazard left unmarked or marked with the wrong type, shown once the game is over.
    Exposed(HazardType),
    /// Marker on a safe cell, shown once the game is over.
    Mismarked(HazardType),
}

impl TileView {
    pub const fn of(cell: Cell, game_over: bool) -> Self {
        use TileView::*;

        if game_over {
            if !cell.opened {
                if cell.marker.is_hazard() && cell.hazard.is_none() {
                    return Mismarked(cell.marker);
                }
                if cell.marker.value() != cell.hazard.value() {
                    return Exposed(cell.hazard);
                }
            } else if cell.hazard.is_hazard() {
                return Detonated(cell.hazard);
            }
        }

        if cell.marker.is_hazard() {
            return Marked(cell.marker);
        }

        match (cell.opened, cell.clue) {
            (false, _) => Hidden,
            (true, None) => Empty,
            (true, Some(clue)) => Clue(clue),
        }
    }

    // whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        use TileView::*;
        match self {
            Hidden => true,
            Marked(_) => true,
            Empty => false,
            Clue(_) => false,
            Detonated(_) => false,
            Exposed(_) => true,
            Mismarked(_) => true,
        }
    }
}
