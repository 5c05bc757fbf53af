//! Autoplay command implementation.

use super::output::{format_autoplay_text, AutoplayStats, JsonAutoplayResult};
use super::{seed_or_clock, AutoplayFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use republica::autoplay::{run_autoplay, AutoplayConfig};
use republica::{content, Difficulty, GameMode};
use std::path::Path;
use std::time::Instant;

/// Options of the autoplay command.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AutoplayArgs {
    /// Number of games to run.
    pub(crate) games: u64,
    /// Starting seed.
    pub(crate) seed: Option<u64>,
    /// Parallel threads.
    pub(crate) threads: Option<usize>,
    /// Years before the automatic player quits.
    pub(crate) max_years: Option<u32>,
    /// Difficulty.
    pub(crate) difficulty: Difficulty,
    /// Scenario or sandbox play.
    pub(crate) mode: GameMode,
    /// Output format.
    pub(crate) format: AutoplayFormat,
    /// Show a progress bar.
    pub(crate) progress: bool,
}

/// Execute the autoplay command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or launched.
pub(crate) fn execute(scenario_path: &Path, args: &AutoplayArgs) -> Result<(), CliError> {
    let scenario = content::load(scenario_path, args.difficulty)?;

    // Fail fast on content that cannot launch, instead of counting errors
    scenario.new_game(republica::GameConfig::default()).launch()?;

    // Set thread pool size if specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_clock(args.seed);

    let mut config = AutoplayConfig {
        mode: args.mode,
        ..AutoplayConfig::default()
    };
    if let Some(years) = args.max_years {
        config.max_years = years;
    }

    let pb = if args.progress {
        let pb = ProgressBar::new(args.games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own stats, merged at the end
    let stats = (0..args.games)
        .into_par_iter()
        .fold(AutoplayStats::default, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);
            match run_autoplay(&scenario, &config, game_seed) {
                Ok(result) => local_stats.add_result(&result),
                Err(e) => {
                    tracing::warn!(seed = game_seed, error = %e, "autoplay game failed");
                    local_stats.add_error();
                }
            }
            local_stats
        })
        .reduce(AutoplayStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.set_position(stats.games_played + stats.errors);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match args.format {
        AutoplayFormat::Text => {
            println!();
            print!("{}", format_autoplay_text(&stats, &scenario.name));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        AutoplayFormat::Json => {
            let json_result = JsonAutoplayResult::from_stats(&stats, &scenario.name);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
