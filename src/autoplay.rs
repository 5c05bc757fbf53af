//! Automatic play for balancing scenarios.
//!
//! Provides a pure function interface: `(scenario, config, seed) -> AutoplayResult`
//!
//! The automatic player picks event choices at random and follows a simple
//! year-end policy:
//! - buy the food the population is missing, if the treasury allows it
//! - bribe the least satisfied bribable faction once, if it can pay
//! - then do nothing
//!
//! It stops after `max_years` years. Every draw comes from the seed, so a
//! run can be reproduced exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::content::Scenario;
use crate::error::GameError;
use crate::game::rules::NEEDED_FOOD_PER_CITIZEN;
use crate::game::{
    Event, GameConfig, GameMode, GameOutcome, PlayerInput, ScoringWeights, TurnContext, YearEndDecision,
    YearEndOption,
};
use crate::republic::{FactionKind, Republic};

/// Configuration for automatic runs.
#[derive(Debug, Clone, Copy)]
pub struct AutoplayConfig {
    /// Years played before the automatic player quits.
    pub max_years: u32,
    /// Scenario or sandbox play.
    pub mode: GameMode,
    /// Scoring weights.
    pub scoring: ScoringWeights,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_years: 10,
            mode: GameMode::Scenario,
            scoring: ScoringWeights::default(),
        }
    }
}

/// Final result of an automatic game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutoplayResult {
    /// The seed used for this game.
    pub seed: u64,
    /// How the game ended.
    pub outcome: GameOutcome,
    /// Final score.
    pub score: f64,
    /// Years completed.
    pub years: u32,
    /// Turns played.
    pub turns: u32,
    /// Citizens left.
    pub population: u64,
    /// Final global satisfaction rate.
    pub global_satisfaction: f64,
}

/// A seeded player with a simple year-end policy.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Source of every decision.
    rng: ChaCha8Rng,
    /// Years after which the player quits.
    max_years: u32,
    /// Years completed so far.
    years: u32,
    /// Whether food was already bought this year end.
    bought_food: bool,
    /// Whether a bribe was already attempted this year end.
    bribed: bool,
}

impl AutoPlayer {
    /// Create a player.
    #[must_use]
    pub fn new(seed: u64, max_years: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_years,
            years: 0,
            bought_food: false,
            bribed: false,
        }
    }
}

/// Food units missing to feed everyone next year.
fn missing_food(republic: &Republic) -> u64 {
    let needed = i64::try_from(republic.population().total_supporters())
        .unwrap_or(i64::MAX)
        .saturating_mul(NEEDED_FOOD_PER_CITIZEN);
    u64::try_from(needed.saturating_sub(republic.food_units())).unwrap_or(0)
}

/// Bribable faction with the lowest satisfaction among those with supporters.
fn least_satisfied_bribable(republic: &Republic) -> Option<FactionKind> {
    republic
        .population()
        .factions()
        .filter(|faction| faction.kind().is_bribable() && faction.supporters() > 0)
        .min_by_key(|faction| faction.satisfaction_rate())
        .map(|faction| faction.kind())
}

impl PlayerInput for AutoPlayer {
    fn choose_event_choice(&mut self, event: &Event, _context: &TurnContext) -> usize {
        self.rng.gen_range(1..=event.nb_choices())
    }

    fn choose_year_end_option(&mut self, republic: &Republic) -> YearEndOption {
        if !self.bought_food {
            self.bought_food = true;
            let units = missing_food(republic).min(republic.resources().affordable_food_units());
            if units > 0 {
                return YearEndOption::BuyFood(units);
            }
        }
        if !self.bribed {
            self.bribed = true;
            if let Some(kind) = least_satisfied_bribable(republic) {
                let price = republic.population().faction(kind).bribe_price();
                if i64::try_from(price).is_ok_and(|price| price <= republic.resources().money()) {
                    return YearEndOption::Bribe(kind);
                }
            }
        }
        self.bought_food = false;
        self.bribed = false;
        YearEndOption::DoNothing
    }

    fn year_end_decision(&mut self, _republic: &Republic, _score: f64) -> YearEndDecision {
        self.years += 1;
        if self.years >= self.max_years {
            YearEndDecision::Quit
        } else {
            YearEndDecision::Continue
        }
    }
}

/// Play one game of `scenario` automatically.
///
/// # Errors
///
/// Returns an error if the scenario cannot be launched.
pub fn run_autoplay(scenario: &Scenario, config: &AutoplayConfig, seed: u64) -> Result<AutoplayResult, GameError> {
    let game_config = GameConfig {
        difficulty: scenario.difficulty,
        mode: config.mode,
        seed,
        scoring: config.scoring,
    };
    let mut game = scenario.new_game(game_config);
    let mut player = AutoPlayer::new(seed, config.max_years);
    let outcome = game.play(&mut player)?;

    Ok(AutoplayResult {
        seed,
        outcome,
        score: game.score(),
        years: game.year(),
        turns: game.event_count().saturating_sub(1),
        population: game.republic().population().total_supporters(),
        global_satisfaction: game.republic().population().global_satisfaction_rate(),
    })
}
