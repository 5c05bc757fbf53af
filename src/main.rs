//! Republica CLI - play, balance and check scenarios.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use republica::{Difficulty, GameMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Republica - govern an island republic, one season at a time
#[derive(Parser, Debug)]
#[command(name = "republica")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scenario interactively
    Play {
        /// Scenario file (JSON)
        #[arg(required = true)]
        scenario: PathBuf,

        /// Difficulty
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,

        /// Game mode: scenario or sandbox
        #[arg(short, long, default_value = "scenario")]
        mode: GameMode,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file (default: <scenario>.save.json)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Run many automatic games and aggregate statistics
    Autoplay {
        /// Scenario file (JSON)
        #[arg(required = true)]
        scenario: PathBuf,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Years played before the automatic player quits (default: 10)
        #[arg(short = 'y', long)]
        max_years: Option<u32>,

        /// Difficulty
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,

        /// Game mode: scenario or sandbox
        #[arg(short, long, default_value = "scenario")]
        mode: GameMode,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::AutoplayFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Check that a scenario file loads and launches at every difficulty
    Validate {
        /// Scenario file (JSON)
        #[arg(required = true)]
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("republica=warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Play {
            scenario,
            difficulty,
            mode,
            seed,
            save,
        } => cli::play::execute(&scenario, difficulty, mode, seed, save),

        Commands::Autoplay {
            scenario,
            games,
            seed,
            threads,
            max_years,
            difficulty,
            mode,
            format,
            progress,
        } => cli::autoplay::execute(
            &scenario,
            &cli::autoplay::AutoplayArgs {
                games,
                seed,
                threads,
                max_years,
                difficulty,
                mode,
                format,
                progress,
            },
        ),

        Commands::Validate { scenario } => cli::validate::execute(&scenario),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
