//! Game orchestration: turns, year ends, scoring and the end of the game.

use serde::Serialize;

use crate::error::{ChoiceError, GameError, LaunchError, SaveError};
use crate::game::economy::{self, simple_hash};
use crate::game::input::{PlayerInput, TurnContext, YearEndDecision, YearEndSummary};
use crate::game::rules::{INITIAL_SCORE, TURNS_PER_YEAR};
use crate::game::{Event, GameConfig, GamePlay, SavedGame, Season};
use crate::republic::{assert_invariants, BribeOutcome, Republic, SatisfactionShift};

/// Consecutive invalid choices tolerated before a turn gives up.
pub const MAX_INVALID_CHOICES: u32 = 16;

/// Stream mixed into the seed for population growth draws.
const GROWTH_STREAM: u64 = 0x6772_6f77_7468;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// The scenario ran out of events with the player still winning.
    Victory,
    /// The player lost and could not catch up.
    Defeat,
    /// The player stopped at the end of a year.
    Quit,
    /// The player stopped and saved at the end of a year.
    SavedAndQuit,
}

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Name of the event that was played.
    pub event: String,
    /// 1-based choice the player made.
    pub choice: usize,
    /// Year-end phase, if the turn closed a year.
    pub year_end: Option<YearEndSummary>,
    /// Player's decision after the year end, if any.
    pub decision: Option<YearEndDecision>,
}

/// A game in progress: the republic, its events and the score.
#[derive(Debug, Clone)]
pub struct Game {
    /// Difficulty, mode, seed and scoring.
    config: GameConfig,
    /// The player's republic.
    republic: Republic,
    /// Season, year and event cursor.
    gameplay: GamePlay,
    /// Current score.
    score: f64,
    /// 1-based number of the turn being played.
    event_count: u32,
    /// Whether the first event was loaded.
    launched: bool,
    /// Whether the catch-up phase was already used.
    caught_up: bool,
    /// Whether the last year end still has to be judged, for a game saved
    /// right after it.
    judgment_pending: bool,
}

impl Game {
    /// Create a game. The score starts at the initial score divided by the
    /// difficulty coefficient.
    #[must_use]
    pub fn new(config: GameConfig, republic: Republic, gameplay: GamePlay) -> Self {
        Self {
            score: INITIAL_SCORE / config.difficulty.coefficient(),
            config,
            republic,
            gameplay,
            event_count: 1,
            launched: false,
            caught_up: false,
            judgment_pending: false,
        }
    }

    /// Check the content and load the first event.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InsufficientContent`] if a season has no event.
    pub fn launch(&mut self) -> Result<(), LaunchError> {
        if self.launched {
            return Ok(());
        }
        if let Some(season) = self.gameplay.first_empty_season() {
            return Err(LaunchError::InsufficientContent { season });
        }
        // A restored game already holds the event of its next turn
        if self.gameplay.current_event().is_none() {
            self.gameplay.next_event();
        }
        self.launched = true;
        tracing::info!(
            scenario = self.gameplay.name(),
            difficulty = %self.config.difficulty,
            mode = %self.gameplay.mode(),
            event_count = self.event_count,
            "game launched"
        );
        Ok(())
    }

    /// Game configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The republic.
    #[must_use]
    pub const fn republic(&self) -> &Republic {
        &self.republic
    }

    /// Season, year and event cursor.
    #[must_use]
    pub const fn gameplay(&self) -> &GamePlay {
        &self.gameplay
    }

    /// Event of the turn being played.
    #[must_use]
    pub const fn current_event(&self) -> Option<&Event> {
        self.gameplay.current_event()
    }

    /// Season of the turn being played.
    #[must_use]
    pub const fn current_season(&self) -> Season {
        self.gameplay.current_season()
    }

    /// Years completed.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.gameplay.year()
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// 1-based number of the turn being played.
    #[must_use]
    pub const fn event_count(&self) -> u32 {
        self.event_count
    }

    fn turn_context(&self) -> TurnContext {
        TurnContext {
            season: self.gameplay.current_season(),
            year: self.gameplay.year(),
            event_count: self.event_count,
        }
    }

    /// Play exactly one turn.
    ///
    /// The event's irreversible effect applies first, then the player's
    /// choice. Invalid choices are rejected and asked again. Every fourth
    /// turn closes the year.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoCurrentEvent`] if there is nothing to play, or
    /// [`GameError::Choice`] if the input keeps answering out of range. A
    /// failed turn leaves the game as it was.
    pub fn play_current_game_turn(&mut self, input: &mut impl PlayerInput) -> Result<TurnReport, GameError> {
        let context = self.turn_context();
        let weights = self.config.scoring;
        let Some(event) = self.gameplay.current_event() else {
            return Err(GameError::NoCurrentEvent);
        };
        let event_name = event.name().to_string();
        tracing::debug!(event = %event_name, season = %context.season, year = context.year, "turn");

        input.show_event(event, &context);
        let checkpoint = event.irreversible().map(|_| (self.republic.clone(), self.score));
        if let Some(effect) = event.irreversible() {
            let shift = self.republic.apply_effects(effect);
            self.score += weights.satisfaction_shift_score(shift.delta());
        }
        let choice = match ask_choice(event, &context, input) {
            Ok(choice) => choice,
            Err(error) => {
                // Undo the irreversible effect so a retry applies it once
                if let Some((republic, score)) = checkpoint {
                    self.republic = republic;
                    self.score = score;
                }
                return Err(error.into());
            }
        };

        self.player_choice_effects(choice)?;
        self.gameplay.next_season();
        self.gameplay.next_event();

        let mut report = TurnReport {
            event: event_name,
            choice,
            year_end: None,
            decision: None,
        };
        if self.is_end_of_year() {
            let summary = self.end_of_year(input);
            self.gameplay.next_year();
            input.show_year_end(&summary, &self.republic);
            report.decision = Some(input.year_end_decision(&self.republic, self.score));
            report.year_end = Some(summary);
        }
        self.event_count += 1;

        assert_invariants(&self.republic);
        Ok(report)
    }

    /// Apply the effects of a 1-based choice of the current event and queue
    /// its related events.
    ///
    /// # Errors
    ///
    /// Returns [`ChoiceError::OutOfRange`] outside `1..=nb_choices`. Nothing
    /// changes in that case.
    pub fn player_choice_effects(&mut self, choice: usize) -> Result<(), ChoiceError> {
        let Some(event) = self.gameplay.current_event() else {
            return Err(ChoiceError::OutOfRange { choice, available: 0 });
        };
        let picked = event.choice(choice)?;
        let shift = self.republic.apply_effects(&picked.effect);
        let related = picked.related_events.clone();
        self.record_shift(shift);
        if !related.is_empty() {
            self.gameplay.place_related_events(related);
        }
        Ok(())
    }

    /// Whether the turn being played closes a year.
    #[must_use]
    pub const fn is_end_of_year(&self) -> bool {
        self.event_count % TURNS_PER_YEAR == 0
    }

    fn record_shift(&mut self, shift: SatisfactionShift) {
        self.score += self.config.scoring.satisfaction_shift_score(shift.delta());
    }

    /// Incomes, year-end options until the player does nothing, then
    /// starvation or growth.
    fn end_of_year(&mut self, input: &mut impl PlayerInput) -> YearEndSummary {
        let incomes = economy::generate_incomes(&mut self.republic);

        let mut options = Vec::new();
        loop {
            let option = input.choose_year_end_option(&self.republic);
            let outcome = economy::apply_year_end_option(&mut self.republic, option);
            if let economy::OptionOutcome::Bribe(BribeOutcome::Bribed { shift, .. }) = outcome {
                self.record_shift(shift);
            }
            input.show_option_outcome(&outcome, &self.republic);
            options.push(outcome);
            if !outcome.allows_another_option() {
                break;
            }
        }

        let growth_seed = simple_hash(
            self.config.seed ^ GROWTH_STREAM,
            (u64::from(self.gameplay.year()) << 1) | u64::from(self.caught_up),
        );
        let food = economy::feed_population(&mut self.republic, growth_seed);

        assert_invariants(&self.republic);
        YearEndSummary { incomes, options, food }
    }

    /// Whether the score is non-negative and citizens are satisfied enough.
    #[must_use]
    pub fn is_player_winning(&self) -> bool {
        self.score >= 0.0
            && self
                .republic
                .is_global_satisfaction_rate_okay(self.config.difficulty.coefficient())
    }

    /// Whether a losing player still gets a catch-up year end: someone must
    /// be left to satisfy, and only one catch-up is granted per game.
    #[must_use]
    pub fn can_catch_up(&self) -> bool {
        !self.caught_up && self.republic.is_there_any_population()
    }

    /// Give a losing player one last year end.
    ///
    /// Returns `true` if the player lost for good: no catch-up was possible,
    /// or the extra year end did not restore the win condition.
    pub fn did_player_fail_catching_up(&mut self, input: &mut impl PlayerInput) -> bool {
        if !self.can_catch_up() {
            tracing::info!(score = self.score, "player lost and cannot catch up");
            return true;
        }
        tracing::info!(score = self.score, "player is losing, catch-up year end");
        let summary = self.end_of_year(input);
        self.caught_up = true;
        input.show_year_end(&summary, &self.republic);
        !self.is_player_winning()
    }

    /// Add the end-of-game score: years, citizens, rates, money and food.
    pub fn add_end_game_score(&mut self) {
        let weights = &self.config.scoring;
        let republic = &self.republic;
        self.score += f64::from(self.gameplay.year()) * weights.per_year
            + republic.population_score(weights)
            + republic.industry_rate_score(weights)
            + republic.money_score(weights)
            + republic.farm_rate_score(weights)
            + republic.food_score(weights);
    }

    /// Whether there is an event left to play.
    #[must_use]
    pub const fn keeps_playing(&self) -> bool {
        self.gameplay.current_event().is_some()
    }

    /// Play until the scenario ends, the player loses or the player stops.
    ///
    /// The win condition is checked after each year end and when the
    /// scenario runs out of events. The end-of-game score is added unless
    /// the player saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot launch or a turn cannot be played.
    pub fn play(&mut self, input: &mut impl PlayerInput) -> Result<GameOutcome, GameError> {
        self.launch()?;

        let mut judge = std::mem::take(&mut self.judgment_pending);
        let outcome = loop {
            if judge && !self.is_player_winning() && self.did_player_fail_catching_up(input) {
                break GameOutcome::Defeat;
            }
            if !self.keeps_playing() {
                // Out of events: judged like a year end
                if !self.is_player_winning() && self.did_player_fail_catching_up(input) {
                    break GameOutcome::Defeat;
                }
                break GameOutcome::Victory;
            }
            let report = self.play_current_game_turn(input)?;
            match report.decision {
                Some(YearEndDecision::SaveAndQuit) => {
                    tracing::info!(score = self.score, year = self.year(), "game saved");
                    return Ok(GameOutcome::SavedAndQuit);
                }
                Some(YearEndDecision::Quit) => break GameOutcome::Quit,
                Some(YearEndDecision::Continue) | None => {}
            }
            judge = report.year_end.is_some();
        };

        self.add_end_game_score();
        tracing::info!(?outcome, score = self.score, year = self.year(), "game over");
        Ok(outcome)
    }

    /// Everything needed to resume: the turn, the score, the republic
    /// numbers and the events left.
    #[must_use]
    pub fn save_state(&self) -> SavedGame {
        SavedGame {
            difficulty: self.config.difficulty,
            mode: self.gameplay.mode(),
            seed: Some(self.config.seed),
            season: self.gameplay.current_season(),
            year: self.gameplay.year(),
            event_count: self.event_count,
            score: self.score,
            republic: Some(self.republic.snapshot()),
            events: Some(self.gameplay.saved_events()),
            caught_up: self.caught_up,
        }
    }

    /// Put a freshly built game where a save left it. Call before
    /// [`Game::launch`]. The saved seed replaces the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::ModeMismatch`] if the game was built for another
    /// mode, [`SaveError::Content`] if the saved republic is invalid, or
    /// [`SaveError::UnknownEvent`] if a saved event is not in the scenario.
    /// The game is left untouched on error.
    pub fn resume(&mut self, saved: &SavedGame) -> Result<(), SaveError> {
        let mode = self.gameplay.mode();
        if saved.mode != mode {
            return Err(SaveError::ModeMismatch {
                saved: saved.mode,
                requested: mode,
            });
        }
        let republic = saved
            .republic
            .as_ref()
            .map(|snapshot| Republic::from_snapshot(snapshot.clone()))
            .transpose()?;
        let seed = saved.seed.unwrap_or(self.config.seed);
        match &saved.events {
            Some(events) => self.gameplay.restore(saved.season, saved.year, seed, events)?,
            None => {
                let turns_played = saved.event_count.saturating_sub(1);
                self.gameplay.resume(saved.season, saved.year, turns_played);
            }
        }

        if let Some(republic) = republic {
            self.republic = republic;
        }
        self.config.seed = seed;
        self.caught_up = saved.caught_up;
        self.event_count = saved.event_count.max(1);
        self.judgment_pending = self.event_count > 1 && (self.event_count - 1) % TURNS_PER_YEAR == 0;
        self.score = saved.score;
        self.launched = false;
        tracing::info!(event_count = self.event_count, year = saved.year, mode = %mode, "game resumed");
        Ok(())
    }
}

/// Ask for a choice until it is valid, giving up after
/// [`MAX_INVALID_CHOICES`] rejections in a row.
fn ask_choice(event: &Event, context: &TurnContext, input: &mut impl PlayerInput) -> Result<usize, ChoiceError> {
    let mut rejected = 0;
    loop {
        let choice = input.choose_event_choice(event, context);
        match event.choice(choice) {
            Ok(_) => return Ok(choice),
            Err(error) => {
                rejected += 1;
                tracing::debug!(%error, rejected, "choice rejected");
                if rejected >= MAX_INVALID_CHOICES {
                    return Err(error);
                }
                input.reject_choice(&error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::event::tests::event_with_choices;
    use crate::game::{Choice, Difficulty, GameMode, ScriptedInput, YearEndOption};
    use crate::republic::population::tests::uniform_population;
    use crate::republic::{Effect, Factor, FactionKind, Resources};

    fn seasons(per_season: usize) -> crate::game::SeasonEvents {
        Season::ALL.map(|season| {
            (0..per_season)
                .map(|i| event_with_choices(&format!("{season} {i}"), 3))
                .collect()
        })
    }

    fn create_test_game(difficulty: Difficulty) -> Game {
        let config = GameConfig {
            difficulty,
            ..GameConfig::default()
        };
        let republic = Republic::new(uniform_population(10, 50), Resources::new(1000, 0, 50, 50).unwrap());
        let gameplay = GamePlay::scenario("test", "", Season::Spring, seasons(3));
        Game::new(config, republic, gameplay)
    }

    #[test]
    fn test_initial_score_scales_with_difficulty() {
        assert!((create_test_game(Difficulty::Easy).score() - 20.0).abs() < 1e-9);
        assert!((create_test_game(Difficulty::Normal).score() - 10.0).abs() < 1e-9);
        assert!((create_test_game(Difficulty::Hard).score() - 10.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_launch_fails_with_an_empty_season() {
        let mut events = seasons(1);
        events[Season::Autumn.index()].clear();
        let republic = Republic::new(uniform_population(10, 50), Resources::new(0, 0, 50, 50).unwrap());
        let mut game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, events),
        );
        assert_eq!(
            game.launch(),
            Err(LaunchError::InsufficientContent { season: Season::Autumn })
        );
    }

    #[test]
    fn test_turn_applies_choice_and_advances_season() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        let report = game.play_current_game_turn(&mut ScriptedInput::with_choices([2])).unwrap();

        assert_eq!(report.event, "spring 0");
        assert_eq!(report.choice, 2);
        assert!(report.year_end.is_none());
        assert_eq!(game.republic().resources().money(), 200);
        assert_eq!(game.current_season(), Season::Summer);
        assert_eq!(game.current_event().unwrap().name(), "summer 0");
        assert_eq!(game.event_count(), 2);
    }

    #[test]
    fn test_invalid_choice_is_asked_again() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        let mut input = ScriptedInput::with_choices([0, 7, 3]);
        let report = game.play_current_game_turn(&mut input).unwrap();
        assert_eq!(report.choice, 3);
        assert_eq!(input.rejected, 2);
    }

    #[test]
    fn test_endless_invalid_choices_give_up() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        let mut input = ScriptedInput::with_choices(std::iter::repeat_n(9, 100));
        let result = game.play_current_game_turn(&mut input);
        assert!(matches!(result, Err(GameError::Choice(_))));
    }

    #[test]
    fn test_failed_turn_can_be_played_again() {
        let irreversible = Effect::new().with_factor(Factor::Money, -300);
        let storm = Event::new("storm", "", Some(irreversible), vec![Choice::new("wait", "", Effect::new())]).unwrap();
        let mut events = seasons(1);
        events[Season::Spring.index()].insert(0, storm);
        let republic = Republic::new(uniform_population(10, 50), Resources::new(1000, 1000, 50, 50).unwrap());
        let mut game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, events),
        );
        game.launch().unwrap();
        let score = game.score();

        let mut stubborn = ScriptedInput::with_choices(std::iter::repeat_n(5, usize::try_from(MAX_INVALID_CHOICES).unwrap()));
        assert!(matches!(game.play_current_game_turn(&mut stubborn), Err(GameError::Choice(_))));
        assert_eq!(game.republic().resources().money(), 1000);
        assert!((game.score() - score).abs() < 1e-9);
        assert_eq!(game.event_count(), 1);
        assert_eq!(game.current_event().unwrap().name(), "storm");

        game.play_current_game_turn(&mut ScriptedInput::default()).unwrap();
        assert_eq!(game.republic().resources().money(), 700);
    }

    #[test]
    fn test_player_choice_effects_out_of_range() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        assert_eq!(
            game.player_choice_effects(4),
            Err(ChoiceError::OutOfRange { choice: 4, available: 3 })
        );
        assert_eq!(game.republic().resources().money(), 0);
    }

    #[test]
    fn test_one_year_end_every_four_turns() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        let mut input = ScriptedInput::default();
        let year_ends: Vec<bool> = (0..8)
            .map(|_| game.play_current_game_turn(&mut input).unwrap().year_end.is_some())
            .collect();
        assert_eq!(year_ends, vec![false, false, false, true, false, false, false, true]);
        assert_eq!(game.year(), 2);
    }

    #[test]
    fn test_irreversible_effect_applies_before_the_choice() {
        let irreversible = Effect::new().with_factor(Factor::Money, -300);
        let choice = Choice::new("pay", "", Effect::new().with_factor(Factor::Money, 50));
        let storm = Event::new("storm", "", Some(irreversible), vec![choice]).unwrap();
        let mut events = seasons(1);
        events[Season::Spring.index()].insert(0, storm);

        let republic = Republic::new(uniform_population(10, 50), Resources::new(1000, 100, 50, 50).unwrap());
        let mut game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, events),
        );
        game.launch().unwrap();
        game.play_current_game_turn(&mut ScriptedInput::default()).unwrap();
        assert_eq!(game.republic().resources().money(), -150);
    }

    #[test]
    fn test_satisfaction_shift_moves_the_score() {
        let gain = Effect::new().with_factor(Factor::SatisfactionRate, 5);
        let loss = Effect::new().with_factor(Factor::SatisfactionRate, -5);
        let event = Event::new(
            "referendum",
            "",
            None,
            vec![Choice::new("yes", "", gain), Choice::new("no", "", loss)],
        )
        .unwrap();
        let mut events = seasons(1);
        events[Season::Spring.index()] = vec![event.clone(), event];

        let mut game = create_test_game(Difficulty::Normal);
        game.gameplay = GamePlay::scenario("test", "", Season::Spring, events);
        game.launch().unwrap();

        game.player_choice_effects(1).unwrap();
        assert!((game.score() - 20.0).abs() < 1e-9);
        game.player_choice_effects(2).unwrap();
        assert!((game.score() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_year_end_bribe_and_food() {
        let mut game = create_test_game(Difficulty::Normal);
        game.launch().unwrap();
        let mut input = ScriptedInput::with_choices([3, 3, 3, 3]);
        input.options.extend([
            YearEndOption::Bribe(FactionKind::Liberals),
            YearEndOption::BuyFood(10),
            YearEndOption::DoNothing,
        ]);
        let mut report = None;
        for _ in 0..4 {
            report = Some(game.play_current_game_turn(&mut input).unwrap());
        }
        let summary = report.unwrap().year_end.unwrap();
        assert_eq!(summary.options.len(), 3);
        // 4 × 300 from choices, 500 from industry, 150 for the bribe, 80 for food
        assert_eq!(game.republic().resources().money(), 1200 + 500 - 150 - 80);
        assert_eq!(game.republic().population().faction(FactionKind::Liberals).satisfaction_rate(), 60);
    }

    #[test]
    fn test_end_game_score() {
        let mut game = create_test_game(Difficulty::Normal);
        game.add_end_game_score();
        // 10 initial + 80 citizens × 2 + 50 × 5 + 0 money + 50 × 5 + 1000 × 0.5
        assert!((game.score() - (10.0 + 160.0 + 250.0 + 250.0 + 500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unsatisfied_republic_is_losing() {
        let republic = Republic::new(uniform_population(10, 10), Resources::new(1000, 0, 50, 50).unwrap());
        let game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, seasons(1)),
        );
        assert!(!game.is_player_winning());
        assert!(game.can_catch_up());
    }

    #[test]
    fn test_catch_up_once_per_game() {
        let republic = Republic::new(uniform_population(10, 10), Resources::new(1000, 0, 50, 50).unwrap());
        let mut game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, seasons(1)),
        );
        let mut input = ScriptedInput::default();
        assert!(game.did_player_fail_catching_up(&mut input));
        assert!(!game.can_catch_up());
        assert!(game.did_player_fail_catching_up(&mut input));
    }

    #[test]
    fn test_losing_is_judged_at_the_year_end() {
        let collapse = Effect::new().with_factor(Factor::SatisfactionRate, -100);
        let scandal = Event::new("scandal", "", None, vec![Choice::new("deny", "", collapse)]).unwrap();
        let mut events = seasons(3);
        events[Season::Spring.index()].insert(0, scandal);
        let mut game = create_test_game(Difficulty::Normal);
        game.gameplay = GamePlay::scenario("test", "", Season::Spring, events);

        let outcome = game.play(&mut ScriptedInput::default()).unwrap();

        // Losing from the first turn on, yet the year is played out first
        assert_eq!(outcome, GameOutcome::Defeat);
        assert_eq!(game.event_count(), 5);
        assert_eq!(game.year(), 1);
        assert!(!game.can_catch_up());
    }

    #[test]
    fn test_year_end_saved_before_judgment_is_judged_on_resume() {
        let scandal_game = || {
            let collapse = Effect::new().with_factor(Factor::SatisfactionRate, -100);
            let scandal = Event::new("scandal", "", None, vec![Choice::new("deny", "", collapse)]).unwrap();
            let mut events = seasons(3);
            events[Season::Spring.index()].insert(0, scandal);
            let mut game = create_test_game(Difficulty::Normal);
            game.gameplay = GamePlay::scenario("test", "", Season::Spring, events);
            game
        };
        let mut first = scandal_game();
        let mut input = ScriptedInput::default();
        input.decisions.push_back(YearEndDecision::SaveAndQuit);
        assert_eq!(first.play(&mut input).unwrap(), GameOutcome::SavedAndQuit);

        let mut resumed = scandal_game();
        resumed.resume(&first.save_state()).unwrap();
        assert_eq!(resumed.play(&mut ScriptedInput::default()).unwrap(), GameOutcome::Defeat);
        assert_eq!(resumed.event_count(), 5);
    }

    #[test]
    fn test_resumed_game_keeps_its_used_catch_up() {
        let mut played = create_test_game(Difficulty::Normal);
        played.launch().unwrap();
        played.caught_up = true;
        let saved = played.save_state();
        assert!(saved.caught_up);

        let mut resumed = create_test_game(Difficulty::Normal);
        resumed.resume(&saved).unwrap();
        assert!(!resumed.can_catch_up());
    }

    #[test]
    fn test_resume_refuses_another_mode() {
        let mut played = create_test_game(Difficulty::Normal);
        played.launch().unwrap();
        let saved = played.save_state();

        let config = GameConfig {
            mode: GameMode::Sandbox,
            ..GameConfig::default()
        };
        let republic = Republic::new(uniform_population(10, 50), Resources::new(1000, 0, 50, 50).unwrap());
        let mut sandbox = Game::new(config, republic, GamePlay::sandbox("test", "", Season::Spring, seasons(3), 0));
        assert!(matches!(
            sandbox.resume(&saved),
            Err(SaveError::ModeMismatch {
                saved: GameMode::Scenario,
                requested: GameMode::Sandbox
            })
        ));
        assert_eq!(sandbox.event_count(), 1);
    }

    #[test]
    fn test_empty_republic_cannot_catch_up() {
        let republic = Republic::new(uniform_population(0, 50), Resources::new(0, 0, 50, 50).unwrap());
        let game = Game::new(
            GameConfig::default(),
            republic,
            GamePlay::scenario("test", "", Season::Spring, seasons(1)),
        );
        assert!(!game.can_catch_up());
    }

    #[test]
    fn test_scenario_played_to_the_end_is_a_victory() {
        let mut game = create_test_game(Difficulty::Normal);
        let outcome = game.play(&mut ScriptedInput::default()).unwrap();
        assert_eq!(outcome, GameOutcome::Victory);
        assert_eq!(game.year(), 3);
        assert!(game.current_event().is_none());
    }

    #[test]
    fn test_save_and_quit_skips_end_score() {
        let mut game = create_test_game(Difficulty::Normal);
        let mut input = ScriptedInput::default();
        input.decisions.push_back(YearEndDecision::SaveAndQuit);
        let outcome = game.play(&mut input).unwrap();
        assert_eq!(outcome, GameOutcome::SavedAndQuit);

        let saved = game.save_state();
        assert_eq!(saved.event_count, 5);
        assert_eq!(saved.year, 1);
        assert_eq!(saved.season, Season::Spring);
        assert!((saved.score - game.score()).abs() < 1e-9);
    }

    #[test]
    fn test_resume_shows_the_same_next_event() {
        let mut played = create_test_game(Difficulty::Hard);
        played.launch().unwrap();
        let mut input = ScriptedInput::default();
        for _ in 0..6 {
            played.play_current_game_turn(&mut input).unwrap();
        }
        let saved = played.save_state();

        let mut resumed = create_test_game(Difficulty::Hard);
        resumed.resume(&saved).unwrap();
        resumed.launch().unwrap();

        assert_eq!(resumed.current_season(), played.current_season());
        assert_eq!(resumed.year(), played.year());
        assert_eq!(resumed.event_count(), played.event_count());
        assert!((resumed.score() - played.score()).abs() < 1e-9);
        assert_eq!(resumed.republic(), played.republic());
        assert_eq!(
            resumed.current_event().map(Event::name),
            played.current_event().map(Event::name)
        );
    }
}
