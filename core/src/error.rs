use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Hazard type 0 is not a hazard")]
    InvalidHazard,
    #[error("Hazard type listed more than once")]
    DuplicateHazard,
    #[error("Neighborhood offset must be non-zero and at most one board side long")]
    InvalidOffset,
    #[error("Invalid game configuration")]
    InvalidConfig,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
