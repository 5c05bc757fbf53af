//! Multi-turn integration tests for game mechanics.
//!
//! These tests play the sample scenarios from start to finish, through
//! year ends, related events, saves and resumes.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::PathBuf;

use republica::autoplay::{run_autoplay, AutoplayConfig};
use republica::game::{SaveFile, ScriptedInput, TurnContext, YearEndSummary};
use republica::{
    content, Difficulty, Event, Game, GameConfig, GameMode, GameOutcome, LaunchError, PlayerInput, Republic, Scenario,
    Season, YearEndDecision, YearEndOption,
};

/// Path of a fixture in the scenarios directory.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/scenarios/{name}", env!("CARGO_MANIFEST_DIR")))
}

fn isla_bonita(difficulty: Difficulty) -> Scenario {
    content::load(&fixture("isla_bonita.json"), difficulty).unwrap()
}

/// The sample scenario starting in another season.
fn isla_bonita_from(first_season: &str) -> Scenario {
    let json = std::fs::read_to_string(fixture("isla_bonita.json")).unwrap();
    let json = json.replace("\"firstSeason\": \"SPRING\"", &format!("\"firstSeason\": \"{first_season}\""));
    content::parse(&json, Difficulty::Normal).unwrap()
}

fn new_game(scenario: &Scenario, mode: GameMode, seed: u64) -> Game {
    let config = GameConfig {
        difficulty: scenario.difficulty,
        mode,
        seed,
        ..GameConfig::default()
    };
    scenario.new_game(config)
}

/// Answers from a list (then the first choice), and records what it sees.
#[derive(Debug, Default)]
struct RecordingInput {
    choices: VecDeque<usize>,
    events: Vec<String>,
    year_ends: usize,
}

impl PlayerInput for RecordingInput {
    fn choose_event_choice(&mut self, _event: &Event, _context: &TurnContext) -> usize {
        self.choices.pop_front().unwrap_or(1)
    }

    fn choose_year_end_option(&mut self, _republic: &Republic) -> YearEndOption {
        YearEndOption::DoNothing
    }

    fn show_event(&mut self, event: &Event, _context: &TurnContext) {
        self.events.push(event.name().to_string());
    }

    fn show_year_end(&mut self, _summary: &YearEndSummary, _republic: &Republic) {
        self.year_ends += 1;
    }
}

/// Always takes the last choice, which is the one that brings follow-up
/// events in the sample scenario.
#[derive(Debug, Default)]
struct LastChoice {
    events: Vec<String>,
}

impl PlayerInput for LastChoice {
    fn choose_event_choice(&mut self, event: &Event, _context: &TurnContext) -> usize {
        event.nb_choices()
    }

    fn choose_year_end_option(&mut self, _republic: &Republic) -> YearEndOption {
        YearEndOption::DoNothing
    }

    fn show_event(&mut self, event: &Event, _context: &TurnContext) {
        self.events.push(event.name().to_string());
    }
}

#[test]
fn test_empty_season_blocks_launch() {
    let scenario = content::load(&fixture("empty_winter.json"), Difficulty::Normal).unwrap();
    assert_eq!(scenario.event_counts(), [1, 1, 1, 0]);

    let mut game = new_game(&scenario, GameMode::Scenario, 1);
    assert!(!game.gameplay().can_play_events());
    assert_eq!(
        game.launch(),
        Err(LaunchError::InsufficientContent { season: Season::Winter })
    );

    // Sandbox mode needs every season too
    let mut sandbox = new_game(&scenario, GameMode::Sandbox, 1);
    assert!(sandbox.launch().is_err());
}

#[test]
fn test_one_year_end_every_four_turns_from_any_season() {
    for first_season in ["SPRING", "SUMMER", "AUTUMN", "WINTER"] {
        let scenario = isla_bonita_from(first_season);
        let mut game = new_game(&scenario, GameMode::Scenario, 3);
        game.launch().unwrap();
        let mut input = RecordingInput::default();

        for turn in 1..=8 {
            let report = game.play_current_game_turn(&mut input).unwrap();
            assert_eq!(report.year_end.is_some(), turn % 4 == 0, "{first_season}, turn {turn}");
            if turn == 4 {
                assert_eq!(input.year_ends, 1, "{first_season}");
                assert_eq!(game.year(), 1);
            }
        }
        assert_eq!(input.year_ends, 2, "{first_season}");
        assert_eq!(game.year(), 2);
    }
}

#[test]
fn test_scenario_played_to_the_end_is_a_victory() {
    let scenario = isla_bonita(Difficulty::Normal);
    let mut game = new_game(&scenario, GameMode::Scenario, 11);
    let mut input = RecordingInput::default();

    let outcome = game.play(&mut input).unwrap();

    assert_eq!(outcome, GameOutcome::Victory);
    assert_eq!(input.events.len(), 12);
    assert_eq!(input.events[0], "The Fishermen's Strike");
    assert_eq!(input.events[4], "A New School");
    assert_eq!(input.year_ends, 3);
    assert_eq!(game.year(), 3);
    assert!(game.score() > 10.0);
}

#[test]
fn test_related_events_are_played_next_in_their_season() {
    let scenario = isla_bonita(Difficulty::Normal);
    let mut game = new_game(&scenario, GameMode::Scenario, 11);
    // Send in the navy: the harbour riots next spring
    let mut input = RecordingInput {
        choices: VecDeque::from([2]),
        ..RecordingInput::default()
    };

    game.play(&mut input).unwrap();

    assert_eq!(input.events[4], "Riot at the Harbour");
    assert_eq!(input.events[8], "A New School");
    assert_eq!(input.events[12], "Spring Festival");
    assert_eq!(input.events.len(), 13);
}

#[test]
fn test_sandbox_runs_until_the_player_quits() {
    let scenario = isla_bonita(Difficulty::Normal);
    let mut game = new_game(&scenario, GameMode::Sandbox, 5);
    let mut input = ScriptedInput::default();
    input.decisions = VecDeque::from([
        YearEndDecision::Continue,
        YearEndDecision::Continue,
        YearEndDecision::Continue,
        YearEndDecision::Continue,
        YearEndDecision::Quit,
    ]);

    let outcome = game.play(&mut input).unwrap();

    // Five years is more events than the scenario holds
    assert_eq!(outcome, GameOutcome::Quit);
    assert_eq!(game.year(), 5);
    assert_eq!(game.event_count(), 21);
}

#[test]
fn test_sandbox_draws_depend_only_on_the_seed() {
    let scenario = isla_bonita(Difficulty::Normal);
    let names = |seed: u64| {
        let mut game = new_game(&scenario, GameMode::Sandbox, seed);
        game.launch().unwrap();
        let mut input = RecordingInput::default();
        for _ in 0..12 {
            game.play_current_game_turn(&mut input).unwrap();
        }
        input.events
    };

    assert_eq!(names(42), names(42));
    let spring: Vec<String> = names(42).into_iter().step_by(4).collect();
    let spring_events = ["The Fishermen's Strike", "A New School", "Spring Festival"];
    assert!(spring.iter().all(|name| spring_events.contains(&name.as_str())));
}

#[test]
fn test_save_and_resume_reproduce_the_next_turn() {
    let scenario = isla_bonita(Difficulty::Normal);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("isla_bonita.save.json");

    for mode in [GameMode::Scenario, GameMode::Sandbox] {
        for k in 1..=10 {
            let mut original = new_game(&scenario, mode, 99);
            original.launch().unwrap();
            let mut input = ScriptedInput::default();
            for _ in 0..k {
                original.play_current_game_turn(&mut input).unwrap();
            }

            let mut file = SaveFile::default();
            file.insert(original.save_state());
            file.save(&path).unwrap();
            let saved = SaveFile::load(&path).unwrap().get(Difficulty::Normal).cloned().unwrap();

            let mut resumed = new_game(&scenario, mode, 99);
            resumed.resume(&saved).unwrap();
            resumed.launch().unwrap();

            assert_eq!(resumed.current_season(), original.current_season(), "{mode}, k={k}");
            assert_eq!(resumed.year(), original.year());
            assert_eq!(resumed.event_count(), original.event_count());
            assert!((resumed.score() - original.score()).abs() < 1e-9);
            assert_eq!(resumed.republic(), original.republic());
            assert_eq!(
                resumed.current_event().map(Event::name),
                original.current_event().map(Event::name),
                "{mode}, k={k}"
            );

            let next_original = original.play_current_game_turn(&mut ScriptedInput::default()).unwrap();
            let next_resumed = resumed.play_current_game_turn(&mut ScriptedInput::default()).unwrap();
            assert_eq!(next_resumed, next_original);
            assert_eq!(resumed.republic(), original.republic());
        }
    }
}

#[test]
fn test_riot_follows_the_strike_after_a_resume() {
    let scenario = isla_bonita(Difficulty::Normal);
    let mut original = new_game(&scenario, GameMode::Scenario, 3);
    original.launch().unwrap();
    // Send in the navy, then save at the year end
    let mut input = ScriptedInput::with_choices([2, 1, 1, 1]);
    for _ in 0..4 {
        original.play_current_game_turn(&mut input).unwrap();
    }
    let saved = original.save_state();

    let mut resumed = new_game(&scenario, GameMode::Scenario, 3);
    resumed.resume(&saved).unwrap();
    resumed.launch().unwrap();

    assert_eq!(original.current_event().map(Event::name), Some("Riot at the Harbour"));
    assert_eq!(resumed.current_event().map(Event::name), Some("Riot at the Harbour"));
}

#[test]
fn test_resume_keeps_pending_related_events() {
    let scenario = isla_bonita(Difficulty::Normal);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("isla_bonita.save.json");

    for mode in [GameMode::Scenario, GameMode::Sandbox] {
        for k in 1..=12 {
            let mut original = new_game(&scenario, mode, 21);
            original.launch().unwrap();
            let mut input = LastChoice::default();
            for _ in 0..k {
                original.play_current_game_turn(&mut input).unwrap();
            }

            let mut file = SaveFile::default();
            file.insert(original.save_state());
            file.save(&path).unwrap();
            let saved = SaveFile::load(&path).unwrap().get(Difficulty::Normal).cloned().unwrap();

            // The seed comes from the save
            let mut resumed = new_game(&scenario, mode, 1234);
            resumed.resume(&saved).unwrap();
            resumed.launch().unwrap();

            let mut rest_original = LastChoice::default();
            let mut rest_resumed = LastChoice::default();
            for _ in 0..8 {
                if !original.keeps_playing() {
                    break;
                }
                let expected = original.play_current_game_turn(&mut rest_original).unwrap();
                let actual = resumed.play_current_game_turn(&mut rest_resumed).unwrap();
                assert_eq!(actual, expected, "{mode}, k={k}");
            }
            assert_eq!(rest_resumed.events, rest_original.events, "{mode}, k={k}");
            assert_eq!(resumed.keeps_playing(), original.keeps_playing());
            assert_eq!(resumed.republic(), original.republic());
        }
    }
}

#[test]
fn test_saved_and_quit_game_resumes_to_the_same_end() {
    let scenario = isla_bonita(Difficulty::Hard);

    let mut straight = new_game(&scenario, GameMode::Scenario, 8);
    let straight_outcome = straight.play(&mut ScriptedInput::default()).unwrap();

    let mut first = new_game(&scenario, GameMode::Scenario, 8);
    let mut input = ScriptedInput::default();
    input.decisions = VecDeque::from([YearEndDecision::SaveAndQuit]);
    assert_eq!(first.play(&mut input).unwrap(), GameOutcome::SavedAndQuit);
    let saved = first.save_state();
    assert_eq!(saved.difficulty, Difficulty::Hard);
    assert_eq!(saved.event_count, 5);

    let mut second = new_game(&scenario, GameMode::Scenario, 8);
    second.resume(&saved).unwrap();
    let resumed_outcome = second.play(&mut ScriptedInput::default()).unwrap();

    assert_eq!(resumed_outcome, straight_outcome);
    assert_eq!(second.year(), straight.year());
    assert!((second.score() - straight.score()).abs() < 1e-9);
}

#[test]
fn test_missing_difficulty_falls_back_to_normal_start() {
    let easy = isla_bonita(Difficulty::Easy);
    let normal = isla_bonita(Difficulty::Normal);

    assert_eq!(easy.start_difficulty, Difficulty::Normal);
    assert_eq!(easy.republic, normal.republic);
    // Effects keep the requested difficulty
    assert_ne!(easy.seasons, normal.seasons);
}

#[test]
fn test_autoplay_is_deterministic() {
    let scenario = isla_bonita(Difficulty::Normal);
    for mode in [GameMode::Scenario, GameMode::Sandbox] {
        let config = AutoplayConfig {
            max_years: 5,
            mode,
            ..AutoplayConfig::default()
        };
        for seed in 0..20 {
            let a = run_autoplay(&scenario, &config, seed).unwrap();
            let b = run_autoplay(&scenario, &config, seed).unwrap();
            assert_eq!(a, b);
            assert!(a.years <= 5);
            assert_ne!(a.outcome, GameOutcome::SavedAndQuit);
        }
    }
}
