//! Scenario validation command implementation.

use super::CliError;
use republica::{content, Difficulty, GameConfig, Season};
use std::path::Path;

/// Execute the validate command.
///
/// Loads the scenario at every difficulty and checks that it can launch.
///
/// # Errors
///
/// Returns an error if the scenario fails to load or launch at any
/// difficulty.
pub(crate) fn execute(scenario_path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", scenario_path.display());
    println!();

    let mut failures = 0;
    for difficulty in Difficulty::ALL {
        print!("{:<8} ", difficulty.to_string());
        let scenario = match content::load(scenario_path, difficulty) {
            Ok(scenario) => scenario,
            Err(e) => {
                println!("FAILED to load: {e}");
                failures += 1;
                continue;
            }
        };

        let config = GameConfig {
            difficulty,
            ..GameConfig::default()
        };
        match scenario.new_game(config).launch() {
            Ok(()) => print!("OK"),
            Err(e) => {
                print!("FAILED to launch: {e}");
                failures += 1;
            }
        }
        if scenario.start_difficulty == difficulty {
            println!();
        } else {
            println!(" (start parameters of {})", scenario.start_difficulty);
        }
    }

    // Difficulty does not change the event layout, report it once
    let scenario = content::load(scenario_path, Difficulty::Normal)?;
    let counts = scenario.event_counts();
    let total: usize = counts.iter().sum();

    println!();
    println!("Summary:");
    println!("  Name:         {}", scenario.name);
    println!("  First season: {}", scenario.first_season.capitalized());
    println!("  Citizens:     {}", scenario.republic.population().total_supporters());
    for (season, count) in Season::ALL.iter().zip(counts) {
        println!("  {:<13} {count} events", format!("{}:", season.capitalized()));
    }
    println!("  Total:        {total} events");
    println!();

    if failures > 0 {
        return Err(CliError::new(format!("{failures} difficulty level(s) failed")));
    }
    println!("Validation successful!");

    Ok(())
}
