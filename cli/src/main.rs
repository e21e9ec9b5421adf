use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use sweeper_core::{Board, CellCount, Coord, GameConfig};

mod command;
mod display;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows and columns
    #[arg(short, long, default_value_t = GameConfig::DEFAULT.size)]
    size: Coord,

    /// Number of mines to place
    #[arg(short, long, default_value_t = GameConfig::DEFAULT.mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = GameConfig::new(args.size, args.mines).context("Invalid board settings")?;
    let mut board = Board::with_seed(config, seed)?;

    let ending = session::play(&mut board, io::stdin().lock(), io::stdout().lock())?;
    log::debug!("session finished: {:?}", ending);
    Ok(())
}
