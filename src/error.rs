use thiserror::Error;

use crate::tiles::Tile;

pub type Result<T> = std::result::Result<T, TilesError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilesError {
    #[error("Tile map size must be {expected}, got {actual}")]
    Size { expected: usize, actual: usize },

    #[error("Grid size {0} is not a perfect square of at least 4")]
    NotSquare(usize),

    #[error("Grid side {0} must be between 2 and {}", crate::config::MAX_SIDE)]
    Side(usize),

    #[error("Win threshold {0} is not a power of two of at least 4")]
    WinThreshold(Tile),

    #[error("Chance of a new 2 tile must be a percentage, got {0}")]
    TwoChance(u8),
}
