use std::convert::TryFrom;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::error::{Result, TilesError};
use Direction::*;

pub type Tile = u64;

pub const NO_TILE: Tile = 0;
const NEW_TILE_2: Tile = 2;
const NEW_TILE_4: Tile = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Grid index of the `pos`-th cell of line `line`, counting from the edge
    /// tiles travel towards. Lines are columns for vertical moves and rows
    /// for horizontal ones.
    fn cell(self, side: usize, line: usize, pos: usize) -> usize {
        let far = side - 1 - pos;

        match self {
            Up => pos * side + line,
            Down => far * side + line,
            Left => line * side + pos,
            Right => line * side + far,
        }
    }
}

/// Everything the engine can be asked to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    Undo,
}

/// A square 2048 board.
///
/// Tiles are stored row-major: index `i` is row `i / side`, column `i % side`.
/// `0` is an empty cell, anything else a power of two.
#[derive(Debug, Clone)]
pub struct Tiles<R = StdRng> {
    items: Vec<Tile>,
    history: Option<Vec<Tile>>,
    config: Config,
    rng: R,
}

impl Tiles<StdRng> {
    /// Empty grid seeded with one random tile.
    pub fn new(config: Config) -> Result<Self> {
        Tiles::with_rng(config, StdRng::from_entropy())
    }

    /// Default game on a grid of `size` cells (a perfect square of at least 4).
    pub fn with_size(size: usize) -> Result<Self> {
        Tiles::new(Config::from_size(size)?)
    }

    /// Grid holding exactly `items`; no tile is spawned.
    pub fn from_items(config: Config, items: Vec<Tile>) -> Result<Self> {
        Tiles::from_items_with_rng(config, items, StdRng::from_entropy())
    }
}

impl TryFrom<Vec<Tile>> for Tiles<StdRng> {
    type Error = TilesError;

    fn try_from(items: Vec<Tile>) -> Result<Self> {
        Tiles::from_items(Config::default(), items)
    }
}

impl<R: Rng> Tiles<R> {
    pub fn with_rng(config: Config, rng: R) -> Result<Self> {
        config.validate()?;

        let mut tiles = Tiles { items: vec![NO_TILE; config.size()], history: None, config, rng };
        tiles.spawn();
        Ok(tiles)
    }

    pub fn from_items_with_rng(config: Config, items: Vec<Tile>, rng: R) -> Result<Self> {
        config.validate()?;

        if items.len() != config.size() {
            return Err(TilesError::Size { expected: config.size(), actual: items.len() });
        }

        Ok(Tiles { items, history: None, config, rng })
    }

    pub fn items(&self) -> &[Tile] {
        &self.items
    }

    pub fn side(&self) -> usize {
        self.config.side
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> Tile {
        self.items.iter().fold(NO_TILE, |sum, tile| sum.saturating_add(*tile))
    }

    /// Clears the board, forgets the undo snapshot and spawns one tile.
    pub fn reset(&mut self) {
        self.items.iter_mut().for_each(|tile| *tile = NO_TILE);
        self.history = None;
        self.spawn();
    }

    /// Puts a 2 or a 4 on a random empty cell and returns its index.
    /// A full board is left alone.
    pub fn spawn(&mut self) -> Option<usize> {
        let empty: Vec<usize> = self.items.iter()
            .enumerate()
            .filter(|(_, tile)| **tile == NO_TILE)
            .map(|(i, _)| i)
            .collect();

        let index = *empty.choose(&mut self.rng)?;
        let value = if self.rng.gen_range(1..=100) <= self.config.two_chance {
            NEW_TILE_2
        } else {
            NEW_TILE_4
        };

        self.items[index] = value;
        trace!("spawned {} at {}", value, index);
        Some(index)
    }

    pub fn move_up(&mut self) -> bool {
        self.slide(Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.slide(Down)
    }

    pub fn move_left(&mut self) -> bool {
        self.slide(Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.slide(Right)
    }

    /// Slides and merges every line towards `direction`.
    ///
    /// Returns whether the grid changed. A move that changes nothing leaves
    /// the undo snapshot alone and spawns nothing. Otherwise the previous grid
    /// becomes the undo snapshot and, with auto-spawn on, one tile is spawned.
    pub fn slide(&mut self, direction: Direction) -> bool {
        let side = self.side();
        let before = self.items.clone();
        let mut line = Vec::with_capacity(side);
        let mut merges = 0;

        for l in 0..side {
            line.clear();
            line.extend((0..side).map(|pos| direction.cell(side, l, pos)));

            self.compact(&line);
            merges += self.merge(&line);
            self.compact(&line);
        }

        if self.items == before {
            return false;
        }

        debug!("moved {:?} with {} merge(s)", direction, merges);
        self.history = Some(before);

        if self.config.auto_spawn {
            self.spawn();
        }

        true
    }

    /// Restores the grid from before the last move. Only one level deep:
    /// a second undo without a move in between does nothing.
    pub fn undo(&mut self) -> bool {
        match self.history.take() {
            Some(previous) => {
                self.items = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.is_some()
    }

    /// Runs `command`, returning whether the grid changed.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self.slide(direction),
            Command::Undo => self.undo(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// No empty cell and no two equal neighbours along any row or column.
    pub fn is_game_over(&self) -> bool {
        if self.items.contains(&NO_TILE) {
            return false;
        }

        let side = self.side();

        for (i, tile) in self.items.iter().enumerate() {
            let right = i % side != side - 1 && self.items[i + 1] == *tile;
            let below = i + side < self.items.len() && self.items[i + side] == *tile;

            if right || below {
                return false;
            }
        }

        true
    }

    pub fn is_win(&self) -> bool {
        self.items.iter().any(|tile| *tile >= self.config.win_threshold)
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Packs the nonzero tiles of `line` against its near end, keeping their order.
    fn compact(&mut self, line: &[usize]) {
        let mut free = 0;

        for pos in 0..line.len() {
            let tile = self.items[line[pos]];
            if tile == NO_TILE {
                continue;
            }

            if pos != free {
                self.items[line[free]] = tile;
                self.items[line[pos]] = NO_TILE;
            }
            free += 1;
        }
    }

    /// Merges equal neighbours of a compacted `line` into the nearer cell.
    /// A merged tile is skipped over so it can't merge twice in one move.
    /// Sums saturate at `Tile::MAX`, which only caller-supplied grids reach.
    fn merge(&mut self, line: &[usize]) -> usize {
        let mut merges = 0;
        let mut pos = 0;

        while pos + 1 < line.len() {
            let (near, next) = (line[pos], line[pos + 1]);

            if self.items[near] == NO_TILE {
                break;
            }

            if self.items[near] == self.items[next] {
                self.items[near] = self.items[near].saturating_add(self.items[next]);
                self.items[next] = NO_TILE;
                merges += 1;
                pos += 2;
            } else {
                pos += 1;
            }
        }

        merges
    }
}
