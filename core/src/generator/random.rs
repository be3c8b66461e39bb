use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that places every requested hazard uniformly at random, one type at a
/// time in enumeration order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBoardGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(mut self, config: &GameConfig) -> Result<Board> {
        generate(config, &mut self.rng)
    }
}

/// Generates a fresh board for `config`, drawing hazard positions from `rng`.
pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Board> {
    let layout = place_hazards(config, rng)?;
    let board = Board::from_layout(config, layout)?;
    log::debug!(
        "Generated {}x{} board with {} hazards",
        config.size.0,
        config.size.1,
        board.total_placed()
    );
    Ok(board)
}

/// Samples hazard positions without replacement, stopping quietly once the board is full.
pub fn place_hazards<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Array2<HazardType>> {
    config.validate()?;

    let (rows, cols) = config.size;
    let mut layout = Array2::from_elem(config.size.to_nd_index(), HazardType::NONE);
    let mut free_cells: Vec<Coord2> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect();

    'placement: for (hazard, count) in config.hazards.iter() {
        for placed in 0..count {
            if free_cells.is_empty() {
                log::warn!(
                    "Board already full, placed {} of {} hazards of type {}, requested {} in total",
                    placed,
                    count,
                    hazard,
                    config.hazards.total()
                );
                break 'placement;
            }
            let pick = rng.random_range(0..free_cells.len());
            let coords = free_cells.remove(pick);
            layout[coords.to_nd_index()] = hazard;
        }
    }

    Ok(layout)
}
