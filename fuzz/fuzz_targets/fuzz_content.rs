#![no_main]

//! Scenario loader fuzzer.
//!
//! Arbitrary text must either load into a scenario that launches or fail
//! with a content error. Never panic.

use libfuzzer_sys::fuzz_target;
use republica::{content, Difficulty, GameConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    for difficulty in Difficulty::ALL {
        let Ok(scenario) = content::parse(json, difficulty) else {
            continue;
        };

        // Every loaded event has between 1 and 4 choices
        for events in &scenario.seasons {
            for event in events {
                assert!((1..=4).contains(&event.nb_choices()));
            }
        }

        let config = GameConfig {
            difficulty,
            ..GameConfig::default()
        };
        let mut game = scenario.new_game(config);
        let launched = game.launch();
        let any_empty = scenario.event_counts().contains(&0);
        assert_eq!(launched.is_err(), any_empty);
    }
});
