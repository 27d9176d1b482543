//! Grid engine for the sliding-tile puzzle 2048.
//!
//! The engine owns a square board of tiles stored row-major, slides and
//! merges it in the four directions, spawns new tiles, keeps one level of
//! undo and reports win / game over. It knows nothing about terminals:
//! the `game-2048` binary draws it.
//!
//! ```
//! use game_2048::{Config, Direction, Tiles};
//!
//! let config = Config::default().auto_spawn(false);
//! let mut tiles = Tiles::from_items(config, vec![
//!     2, 2, 4, 0,
//!     0, 0, 0, 0,
//!     0, 0, 0, 0,
//!     0, 0, 0, 0,
//! ]).unwrap();
//!
//! assert!(tiles.slide(Direction::Left));
//! assert_eq!(&tiles.items()[..4], &[4, 4, 0, 0]);
//! ```

pub mod config;
pub mod error;
pub mod tiles;

pub use config::Config;
pub use error::{Result, TilesError};
pub use tiles::{Command, Direction, Tile, Tiles, NO_TILE};
