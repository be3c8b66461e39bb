use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::iter;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Background highlight for a cell. A finished board highlights every cell the same way,
/// ignoring the hover.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    Hover,
    Neighbor,
    Won,
    GameOver,
}

/// A live game: every cell plus the rules it was generated with.
///
/// All cells, clues included, are final once the board is built. Playing only changes
/// `opened`, `marker` and the terminal flags. Deserializing rebuilds the board through
/// [`Board::from_layout`], so stored clues are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardState")]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) requested: HazardCounts,
    pub(crate) topology: Topology,
    pub(crate) chord_rule: ChordRule,
    pub(crate) game_over: bool,
    pub(crate) win: bool,
}

#[derive(Deserialize)]
struct BoardState {
    cells: Array2<Cell>,
    requested: HazardCounts,
    topology: Topology,
    chord_rule: ChordRule,
    game_over: bool,
    win: bool,
}

impl TryFrom<BoardState> for Board {
    type Error = GameError;

    fn try_from(state: BoardState) -> Result<Self> {
        let (rows, cols) = state.cells.dim();
        let size = (
            Coord::try_from(rows).map_err(|_| GameError::InvalidDimensions)?,
            Coord::try_from(cols).map_err(|_| GameError::InvalidDimensions)?,
        );
        let config = GameConfig {
            size,
            hazards: state.requested,
            topology: state.topology,
            chord_rule: state.chord_rule,
        };

        let mut board = Self::from_layout(&config, state.cells.mapv(|cell| cell.hazard))?;
        for (cell, saved) in board.cells.iter_mut().zip(&state.cells) {
            cell.opened = saved.opened;
            cell.marker = saved.marker;
        }
        board.win = state.win && board.is_win();
        board.game_over = state.game_over || board.win;
        Ok(board)
    }
}

impl Board {
    /// Builds a board from a fixed hazard grid of `config.size`, deriving every clue.
    pub fn from_layout(config: &GameConfig, layout: Array2<HazardType>) -> Result<Self> {
        config.validate()?;
        if layout.dim() != (usize::from(config.size.0), usize::from(config.size.1)) {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = layout.mapv(|hazard| Cell {
            hazard,
            ..Cell::default()
        });
        let mut board = Self {
            cells,
            requested: config.hazards.clone(),
            topology: config.topology.clone(),
            chord_rule: config.chord_rule,
            game_over: false,
            win: false,
        };
        board.derive_clues();
        Ok(board)
    }

    /// Builds a board of `config.size` with the listed hazards, every other cell safe.
    pub fn from_hazard_coords(
        config: &GameConfig,
        hazards: &[(Coord2, HazardType)],
    ) -> Result<Self> {
        config.validate()?;
        let mut layout = Array2::from_elem(config.size.to_nd_index(), HazardType::NONE);

        for &(coords, hazard) in hazards {
            if coords.0 >= config.size.0 || coords.1 >= config.size.1 {
                return Err(GameError::InvalidCoords);
            }
            layout[coords.to_nd_index()] = hazard;
        }

        Self::from_layout(config, layout)
    }

    fn derive_clues(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let clue = self
                    .neighbors(coords)
                    .map(|pos| self.cells[pos.to_nd_index()].hazard)
                    .filter(|hazard| hazard.is_hazard())
                    .fold(None, |sum: Option<Clue>, hazard| {
                        Some(sum.unwrap_or(0) + Clue::from(hazard))
                    });
                self.cells[coords.to_nd_index()].clue = clue;
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // every constructor checks the dimensions fit a `Coord2`
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn chord_rule(&self) -> ChordRule {
        self.chord_rule
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.win
    }

    /// Requested count for `hazard`, which may exceed what fit on the board.
    pub fn requested(&self, hazard: HazardType) -> CellCount {
        self.requested.get(hazard)
    }

    /// In-bounds neighbors of `coords` under the board topology, duplicates kept.
    pub fn neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        self.topology.neighbors_in_bounds(coords, self.size())
    }

    /// Distinct hazard types on the board, in enumeration order.
    pub fn present_hazards(&self) -> BTreeSet<HazardType> {
        self.cells
            .iter()
            .map(|cell| cell.hazard)
            .filter(|hazard| hazard.is_hazard())
            .collect()
    }

    /// Markers a cell cycles through, starting with no marker.
    ///
    /// Empty when the board has no hazards at all.
    pub fn marker_cycle(&self) -> Vec<HazardType> {
        let present = self.present_hazards();
        if present.is_empty() {
            return Vec::new();
        }
        iter::once(HazardType::NONE).chain(present).collect()
    }

    pub fn tile_view(&self, coords: Coord2) -> Option<TileView> {
        self.cell_at(coords)
            .map(|cell| TileView::of(cell, self.game_over))
    }

    pub fn highlight(&self, hover: Option<Coord2>, coords: Coord2) -> Highlight {
        if self.win {
            return Highlight::Won;
        }
        if self.game_over {
            return Highlight::GameOver;
        }
        match hover {
            Some(hover) if hover == coords => Highlight::Hover,
            Some(hover) if self.contains(hover) && self.neighbors(hover).any(|pos| pos == coords) => {
                Highlight::Neighbor
            }
            _ => Highlight::None,
        }
    }
}
