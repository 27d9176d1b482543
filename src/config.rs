use crate::error::{Result, TilesError};
use crate::tiles::Tile;

pub const DEFAULT_SIDE: usize = 4;
pub const DEFAULT_WIN_THRESHOLD: Tile = 2048;
pub const DEFAULT_TWO_CHANCE: u8 = 90;
pub const MAX_SIDE: usize = 256;

/// Construction-time settings of a [`Tiles`](crate::Tiles) grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of cells along one edge; the grid holds `side * side` tiles.
    pub side: usize,
    /// A tile at or above this value wins the game.
    pub win_threshold: Tile,
    /// Percent chance that a spawned tile is a 2 rather than a 4.
    pub two_chance: u8,
    /// Spawn a tile after every move that changed the grid. When off, the
    /// caller spawns (or doesn't) through [`Tiles::spawn`](crate::Tiles::spawn).
    pub auto_spawn: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            side: DEFAULT_SIDE,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            two_chance: DEFAULT_TWO_CHANCE,
            auto_spawn: true,
        }
    }
}

impl Config {
    pub fn with_side(side: usize) -> Self {
        Config { side, ..Config::default() }
    }

    /// Config for a grid of `size` cells, which must be a perfect square of at least 4.
    pub fn from_size(size: usize) -> Result<Self> {
        let side = match exact_sqrt(size) {
            Some(side) if side >= 2 => side,
            _ => return Err(TilesError::NotSquare(size)),
        };

        let config = Config::with_side(side);
        config.validate()?;
        Ok(config)
    }

    pub fn win_threshold(self, win_threshold: Tile) -> Self {
        Config { win_threshold, ..self }
    }

    pub fn two_chance(self, two_chance: u8) -> Self {
        Config { two_chance, ..self }
    }

    pub fn auto_spawn(self, auto_spawn: bool) -> Self {
        Config { auto_spawn, ..self }
    }

    /// Number of cells. Saturates for a side that [`validate`](Config::validate) rejects.
    pub fn size(&self) -> usize {
        self.side.saturating_mul(self.side)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_SIDE).contains(&self.side) {
            return Err(TilesError::Side(self.side));
        }

        if self.win_threshold < 4 || !self.win_threshold.is_power_of_two() {
            return Err(TilesError::WinThreshold(self.win_threshold));
        }

        if self.two_chance > 100 {
            return Err(TilesError::TwoChance(self.two_chance));
        }

        Ok(())
    }
}

fn exact_sqrt(n: usize) -> Option<usize> {
    let mut root = (n as f64).sqrt() as usize;

    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }

    if root * root == n { Some(root) } else { None }
}
