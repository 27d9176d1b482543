mod game;
mod render;
mod term;

use std::{fs::File, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use game_2048::config::{DEFAULT_SIDE, DEFAULT_TWO_CHANCE, DEFAULT_WIN_THRESHOLD};
use game_2048::{Config, Tile, Tiles};
use rand::{rngs::StdRng, SeedableRng};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Debug, Parser)]
#[command(version, about = "The 2048 sliding-tile puzzle in your terminal")]
struct Args {
    /// Number of cells along each edge of the grid
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SIDE)]
    side: usize,
    /// Tile value that wins the game
    #[arg(long, value_name = "TILE", default_value_t = DEFAULT_WIN_THRESHOLD)]
    win: Tile,
    /// Percent chance that a new tile is a 2 instead of a 4
    #[arg(long, value_name = "PERCENT", default_value_t = DEFAULT_TWO_CHANCE)]
    two_chance: u8,
    /// Seed for the tile spawner, for replayable games
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = Config::with_side(args.side)
        .win_threshold(args.win)
        .two_chance(args.two_chance);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tiles = Tiles::with_rng(config, rng).context("invalid game settings")?;

    let mut game = game::Game2048::new(tiles);
    game.run().context("terminal error")?;

    println!("Score: {}", game.tiles().score());
    Ok(())
}

/// The game owns the screen, so logs only go to a file and only when asked.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
