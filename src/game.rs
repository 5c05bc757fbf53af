//! Game layer for Republica.
//!
//! Drives a [`Republic`](crate::republic::Republic) through turns:
//! - Events with choices, grouped by season
//! - Scenario and sandbox event sources
//! - Year-end economy (incomes, bribes, food market, starvation, growth)
//! - Scoring, catch-up and the end of the game
//! - Save files

mod config;
mod economy;
mod event;
mod gameplay;
mod input;
pub mod rules;
mod save;
mod season;
mod state;

pub use config::{Difficulty, GameConfig, GameMode};
pub use economy::{
    apply_year_end_option, feed_population, generate_incomes, FoodOutcome, Incomes, OptionOutcome,
};
pub use event::{Choice, Event};
pub use gameplay::{EventSource, GamePlay, SavedEvents, SeasonEvents};
pub use input::{
    PlayerInput, ScriptedInput, TurnContext, YearEndDecision, YearEndOption, YearEndSummary,
};
pub use rules::ScoringWeights;
pub use save::{SaveFile, SavedGame};
pub use season::Season;
pub use state::{Game, GameOutcome, TurnReport, MAX_INVALID_CHOICES};
