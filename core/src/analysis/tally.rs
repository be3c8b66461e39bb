use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Per-type counts for a status display, derived from the board on every call.
///
/// The [`HazardType::NONE`] row tracks safe cells: `requested` is what the configuration left
/// free, `placed` the actual number of safe cells and `marked` how many cells have been opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardTally {
    pub hazard: HazardType,
    pub requested: CellCount,
    pub placed: CellCount,
    pub marked: CellCount,
}

impl Board {
    /// One row for safe cells followed by one row per requested or placed hazard type, in
    /// enumeration order.
    pub fn tally(&self) -> Vec<HazardTally> {
        let mut hazards = self.present_hazards();
        hazards.extend(self.requested.iter().map(|(hazard, _)| hazard));

        let safe = HazardTally {
            hazard: HazardType::NONE,
            requested: self.total_cells().saturating_sub(self.requested.total()),
            placed: self.count_cells(|cell| cell.is_safe()),
            marked: self.count_cells(|cell| cell.opened && !cell.is_marked()),
        };

        let mut rows = Vec::with_capacity(hazards.len() + 1);
        rows.push(safe);
        rows.extend(hazards.into_iter().map(|hazard| HazardTally {
            hazard,
            requested: self.requested(hazard),
            placed: self.placed(hazard),
            marked: self.count_cells(|cell| cell.marker == hazard),
        }));
        rows
    }

    pub fn placed(&self, hazard: HazardType) -> CellCount {
        self.count_cells(|cell| cell.hazard == hazard)
    }

    pub fn total_placed(&self) -> CellCount {
        self.count_cells(|cell| cell.hazard.is_hazard())
    }

    /// Requested hazards that did not fit on the board.
    pub fn unfulfilled(&self) -> CellCount {
        self.requested.total().saturating_sub(self.total_placed())
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        // cell counts are bounded by `mult`, which fits `CellCount`
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(value: i8) -> HazardType {
        HazardType::new(value)
    }

    #[test]
    fn tally_tracks_markers_and_progress() {
        let counts = HazardCounts::new()
            .with(h(1), 1)
            .and_then(|counts| counts.with(h(-2), 1))
            .unwrap();
        let config = GameConfig::new((1, 4), counts);
        let mut board =
            Board::from_hazard_coords(&config, &[((0, 0), h(1)), ((0, 3), h(-2))]).unwrap();

        board.cycle((0, 0));
        board.open((0, 1));

        assert_eq!(
            board.tally(),
            alloc::vec![
                HazardTally {
                    hazard: h(0),
                    requested: 2,
                    placed: 2,
                    marked: 1
                },
                HazardTally {
                    hazard: h(1),
                    requested: 1,
                    placed: 1,
                    marked: 1
                },
                HazardTally {
                    hazard: h(-2),
                    requested: 1,
                    placed: 1,
                    marked: 0
                },
            ]
        );
    }

    #[test]
    fn unfulfilled_counts_what_did_not_fit() {
        let counts = HazardCounts::new().with(h(3), 6).unwrap();
        let config = GameConfig::new((2, 2), counts);

        let board = RandomBoardGenerator::from_seed(9).generate(&config).unwrap();

        assert_eq!(board.total_placed(), 4);
        assert_eq!(board.unfulfilled(), 2);
        assert_eq!(board.tally()[0].requested, 0);
        assert_eq!(board.tally()[1].placed, 4);
    }
}
