use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minesweep_core::{CellCount, Coord, GameConfig, GameSession, SessionStatus, StartTile};

mod keymap;
mod terminal;

use terminal::{TerminalFrontend, outcome_message};

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// Number of table rows
    #[arg(short, long, default_value_t = 10)]
    rows: Coord,

    /// Number of table columns
    #[arg(short, long, default_value_t = 10)]
    cols: Coord,

    /// Number of bombs
    #[arg(short, long, default_value_t = 10)]
    bombs: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How much room is kept free of bombs around the first opened cell
    #[arg(long, value_enum, default_value_t = StartArea::Safe)]
    start: StartArea,

    /// Write logs to this file, the screen belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StartArea {
    /// Only the opened cell
    Safe,
    /// The opened cell and its neighbours
    Zero,
}

impl From<StartArea> for StartTile {
    fn from(area: StartArea) -> Self {
        match area {
            StartArea::Safe => StartTile::SimpleSafe,
            StartArea::Zero => StartTile::AlwaysZero,
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let log_file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = GameConfig::new(args.rows, args.cols, args.bombs)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting {:?} with seed {}", config, seed);

    let mut session = GameSession::with_seed(config, seed, args.start.into())?;
    let status = {
        let mut frontend = TerminalFrontend::new(io::stdout())?;
        minesweep_core::play(&mut session, &mut frontend)?
    };

    log::info!(
        "Session finished {:?}, opened {} flagged {}",
        status,
        session.board().opened_count(),
        session.board().flagged_count()
    );
    if status != SessionStatus::Quit {
        println!("{} (seed {})", outcome_message(status).0, seed);
    }
    Ok(())
}
