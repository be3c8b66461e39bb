use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

impl Board {
    /// Opens `target`, flood-filling from cells without clues.
    ///
    /// Opening a cell that is already open chords instead: when the marked neighbors match its
    /// clue, every neighbor is opened. Hitting a hazard ends the game but the rest of the queue
    /// is still opened. Out-of-bounds targets are ignored. The caller is expected to stop
    /// sending moves once [`Board::is_game_over`] is true.
    pub fn open(&mut self, target: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.contains(target) {
            return NoChange;
        }

        let mut outcome = NoChange;
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([target]);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            let cell = self.cells[coords.to_nd_index()];
            if cell.is_marked() {
                log::trace!("Skipping marked cell at {:?}", coords);
                continue;
            }

            if cell.hazard.is_hazard() {
                log::debug!("Hazard {} opened at {:?}", cell.hazard, coords);
                self.game_over = true;
                outcome = outcome | HitHazard;
            }

            self.cells[coords.to_nd_index()].opened = true;
            if !cell.opened {
                outcome = outcome | Revealed;
                log::trace!("Opened cell at {:?}, clue: {:?}", coords, cell.clue);
            }

            if cell.opened && coords == target {
                if Some(self.marked_neighbor_total(coords)) == cell.clue {
                    log::trace!("Chording from {:?}", coords);
                    to_visit.extend(self.neighbors(coords));
                }
            } else if cell.clue.is_none() && cell.is_safe() {
                to_visit.extend(self.neighbors(coords));
            }
        }

        if self.is_win() {
            if !self.win {
                log::debug!("Board won");
                outcome = outcome | Won;
            }
            self.win = true;
            self.game_over = true;
        }

        outcome
    }

    /// Advances the marker of an unopened cell to the next hazard type present on the board,
    /// wrapping back to no marker.
    pub fn cycle(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.opened {
            return MarkOutcome::NoChange;
        }

        let markers = self.marker_cycle();
        if markers.is_empty() {
            return MarkOutcome::NoChange;
        }

        let next = match markers.iter().position(|&marker| marker == cell.marker) {
            Some(index) => markers[(index + 1) % markers.len()],
            None => markers[0],
        };
        if next == cell.marker {
            return MarkOutcome::NoChange;
        }

        self.cells[coords.to_nd_index()].marker = next;
        MarkOutcome::Changed
    }

    /// Whether every safe cell is open and every hazard is still closed.
    pub fn is_win(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_settled())
    }

    fn marked_neighbor_total(&self, coords: Coord2) -> Clue {
        self.neighbors(coords)
            .map(|pos| self.cells[pos.to_nd_index()].marker)
            .filter(|marker| marker.is_hazard())
            .map(|marker| match self.chord_rule {
                ChordRule::MarkerCount => 1,
                ChordRule::MarkerSum => Clue::from(marker),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(value: i8) -> HazardType {
        HazardType::new(value)
    }

    fn board(size: Coord2, hazards: &[(Coord2, HazardType)]) -> Board {
        let config = GameConfig::new(size, HazardCounts::new());
        Board::from_hazard_coords(&config, hazards).unwrap()
    }

    fn opened(board: &Board, coords: Coord2) -> bool {
        board.cell_at(coords).unwrap().opened
    }

    #[test]
    fn opening_hazard_ends_game() {
        let mut board = board((2, 2), &[((0, 0), h(1))]);

        assert_eq!(board.open((0, 0)), RevealOutcome::HitHazard);
        assert!(board.is_game_over());
        assert!(!board.is_won());
        assert!(opened(&board, (0, 0)));
    }

    #[test]
    fn flood_fill_stops_at_clues() {
        let mut board = board((1, 5), &[((0, 0), h(2))]);

        assert_eq!(board.open((0, 4)), RevealOutcome::Won);
        assert!(opened(&board, (0, 1)));
        assert!(!opened(&board, (0, 0)));
        assert!(board.is_game_over());
    }

    #[test]
    fn flood_fill_does_not_pass_clue_cells() {
        let mut board = board((1, 6), &[((0, 0), h(1)), ((0, 3), h(-1))]);

        assert_eq!(board.open((0, 5)), RevealOutcome::Revealed);
        assert!(opened(&board, (0, 4)));
        assert!(!opened(&board, (0, 2)));
        assert!(!board.is_game_over());
    }

    #[test]
    fn zero_clue_does_not_cascade() {
        let mut board = board((3, 3), &[((0, 0), h(2)), ((0, 1), h(-2))]);

        assert_eq!(board.cell_at((1, 1)).unwrap().clue, Some(0));
        assert_eq!(board.open((1, 1)), RevealOutcome::Revealed);
        assert!(!opened(&board, (2, 2)));
    }

    #[test]
    fn marked_cells_are_not_opened() {
        let mut board = board((1, 3), &[((0, 0), h(1))]);
        board.cycle((0, 2));

        assert_eq!(board.open((0, 2)), RevealOutcome::NoChange);
        assert!(!opened(&board, (0, 2)));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut board = board((2, 2), &[((0, 0), h(1))]);

        assert_eq!(board.open((2, 0)), RevealOutcome::NoChange);
        assert_eq!(board.cycle((0, 9)), MarkOutcome::NoChange);
        assert_eq!(board, self::board((2, 2), &[((0, 0), h(1))]));
    }

    #[test]
    fn reopening_without_matching_markers_changes_nothing() {
        let mut board = board((1, 4), &[((0, 0), h(1)), ((0, 3), h(1))]);

        assert_eq!(board.open((0, 1)), RevealOutcome::Revealed);
        assert_eq!(board.open((0, 1)), RevealOutcome::NoChange);
        assert!(!opened(&board, (0, 2)));
    }

    #[test]
    fn wrong_marker_chord_keeps_draining_after_hit() {
        let mut board = board((2, 3), &[((0, 0), h(1))]);

        assert_eq!(board.open((1, 1)), RevealOutcome::Revealed);
        assert_eq!(board.cycle((1, 0)), MarkOutcome::Changed);

        assert_eq!(board.open((1, 1)), RevealOutcome::HitHazard);
        assert!(board.is_game_over());
        assert!(!board.is_won());
        assert!(opened(&board, (0, 0)));
        assert!(opened(&board, (0, 2)));
        assert!(opened(&board, (1, 2)));
        assert!(!opened(&board, (1, 0)));
    }

    #[test]
    fn marker_sum_rule_lets_families_cancel() {
        let hazards = [((0, 0), h(1)), ((0, 2), h(-1))];
        let config = GameConfig::new((3, 3), HazardCounts::new());

        let mut count_board = Board::from_hazard_coords(&config, &hazards).unwrap();
        let mut sum_board = Board::from_hazard_coords(
            &config.clone().with_chord_rule(ChordRule::MarkerSum),
            &hazards,
        )
        .unwrap();

        for board in [&mut count_board, &mut sum_board] {
            board.open((1, 1));
            board.cycle((0, 0));
            board.cycle((0, 2));
            board.cycle((0, 2));
            assert_eq!(board.cell_at((0, 2)).unwrap().marker, h(-1));
        }

        assert_eq!(count_board.open((1, 1)), RevealOutcome::NoChange);
        assert_eq!(sum_board.open((1, 1)), RevealOutcome::Won);
    }

    #[test]
    fn cycling_skips_absent_types_and_clears() {
        let mut board = board((2, 2), &[((0, 0), h(-2)), ((1, 1), h(4))]);

        let mut seen = alloc::vec::Vec::new();
        for _ in 0..3 {
            assert_eq!(board.cycle((0, 1)), MarkOutcome::Changed);
            seen.push(board.cell_at((0, 1)).unwrap().marker);
        }

        assert_eq!(seen, alloc::vec![h(4), h(-2), h(0)]);
    }

    #[test]
    fn cycling_opened_or_hazardless_cells_is_noop() {
        let mut board = board((1, 3), &[((0, 0), h(1))]);
        board.open((0, 1));
        assert_eq!(board.cycle((0, 1)), MarkOutcome::NoChange);

        let mut empty = self::board((2, 2), &[]);
        assert_eq!(empty.cycle((0, 0)), MarkOutcome::NoChange);
        assert_eq!(empty.cell_at((0, 0)).unwrap().marker, h(0));
    }

    #[test]
    fn win_ignores_markers() {
        let mut board = board((1, 3), &[((0, 0), h(1))]);
        board.cycle((0, 0));

        assert!(!board.is_win());
        assert_eq!(board.open((0, 2)), RevealOutcome::Won);
        assert!(board.is_win());
        assert!(board.is_won());
    }
}
