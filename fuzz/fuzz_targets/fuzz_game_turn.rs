#![no_main]

//! Full game turn fuzzer.
//!
//! Plays the sample scenario with arbitrary answers:
//! 1. Event choices, in and out of range
//! 2. Year-end bribes and food purchases
//! 3. Year-end decisions
//!
//! The game must end cleanly or report a typed error, and the republic must
//! stay valid after every turn.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use republica::game::ScriptedInput;
use republica::republic::check_invariants;
use republica::{content, Difficulty, FactionKind, GameConfig, GameError, GameMode, YearEndDecision, YearEndOption};

const SCENARIO: &str = include_str!("../../scenarios/isla_bonita.json");

/// A fuzzer-generated year-end option.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzOption {
    /// Bribe the faction at this index.
    Bribe(u8),
    /// Buy food units.
    BuyFood(u16),
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Difficulty index.
    difficulty: u8,
    /// Play the sandbox instead of the scenario.
    sandbox: bool,
    /// Seed for sandbox draws and growth.
    seed: u64,
    /// Answers to events.
    choices: Vec<u8>,
    /// Year-end options.
    options: Vec<FuzzOption>,
    /// Number of turns to play.
    turns: u8,
}

fuzz_target!(|input: GameInput| {
    let difficulty = Difficulty::ALL[usize::from(input.difficulty) % Difficulty::ALL.len()];
    let Ok(scenario) = content::parse(SCENARIO, difficulty) else {
        return;
    };
    let config = GameConfig {
        difficulty,
        mode: if input.sandbox { GameMode::Sandbox } else { GameMode::Scenario },
        seed: input.seed,
        ..GameConfig::default()
    };
    let mut game = scenario.new_game(config);
    if game.launch().is_err() {
        return;
    }

    let mut player = ScriptedInput::with_choices(input.choices.iter().map(|&c| usize::from(c % 6)));
    player.options = input
        .options
        .iter()
        .take(8)
        .map(|option| match *option {
            FuzzOption::Bribe(index) => {
                YearEndOption::Bribe(FactionKind::ALL[usize::from(index) % FactionKind::ALL.len()])
            }
            FuzzOption::BuyFood(units) => YearEndOption::BuyFood(u64::from(units)),
        })
        .collect();
    player.decisions = std::iter::repeat(YearEndDecision::Continue).take(8).collect();

    let turns = input.turns % 40;
    for _ in 0..turns {
        if !game.keeps_playing() {
            break;
        }
        match game.play_current_game_turn(&mut player) {
            Ok(_) => {}
            // Scripted choices fall back to 1 when exhausted, so only a
            // long run of out-of-range answers can exhaust the retries
            Err(GameError::Choice(_)) => return,
            Err(e) => panic!("unexpected game error: {e}"),
        }

        let violations = check_invariants(game.republic());
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
        assert!(game.score().is_finite());
    }
});
