//! Player input: the seam between the engine and whoever plays.
//!
//! The engine never reads a terminal. It asks a [`PlayerInput`] for every
//! decision and tells it what happened through the optional `show_*` hooks.

use crate::error::ChoiceError;
use crate::game::economy::{FoodOutcome, Incomes, OptionOutcome};
use crate::game::{Event, Season};
use crate::republic::{FactionKind, Republic};

/// Where the game stands when the player is asked something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    /// Season of the turn.
    pub season: Season,
    /// Years completed.
    pub year: u32,
    /// 1-based turn number.
    pub event_count: u32,
}

/// Options offered at the end of every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearEndOption {
    /// Close the year-end phase.
    DoNothing,
    /// Pay a faction to raise its satisfaction.
    Bribe(FactionKind),
    /// Buy food units on the market.
    BuyFood(u64),
}

/// What to do once a year is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearEndDecision {
    /// Play another year.
    #[default]
    Continue,
    /// Stop now and keep the game for later.
    SaveAndQuit,
    /// Stop now for good.
    Quit,
}

/// Summary of a year-end phase, shown to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct YearEndSummary {
    /// Incomes of the year.
    pub incomes: Incomes,
    /// Every option the player picked, in order.
    pub options: Vec<OptionOutcome>,
    /// What feeding the population did.
    pub food: FoodOutcome,
}

/// Source of the player's decisions.
pub trait PlayerInput {
    /// Pick a 1-based choice for the current event.
    fn choose_event_choice(&mut self, event: &Event, context: &TurnContext) -> usize;

    /// Pick the next year-end option.
    fn choose_year_end_option(&mut self, republic: &Republic) -> YearEndOption;

    /// Decide whether to keep playing after a year.
    fn year_end_decision(&mut self, _republic: &Republic, _score: f64) -> YearEndDecision {
        YearEndDecision::Continue
    }

    /// Called when an event is about to be resolved.
    fn show_event(&mut self, _event: &Event, _context: &TurnContext) {}

    /// Called when a choice was rejected, before asking again.
    fn reject_choice(&mut self, _error: &ChoiceError) {}

    /// Called with the outcome of each year-end option.
    fn show_option_outcome(&mut self, _outcome: &OptionOutcome, _republic: &Republic) {}

    /// Called after the year-end phase.
    fn show_year_end(&mut self, _summary: &YearEndSummary, _republic: &Republic) {}
}

/// Plays a fixed list of answers, then the first choice and nothing at year end.
///
/// Handy for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// Answers to events, consumed front to back.
    pub choices: std::collections::VecDeque<usize>,
    /// Year-end options, consumed front to back.
    pub options: std::collections::VecDeque<YearEndOption>,
    /// Decisions after each year, consumed front to back.
    pub decisions: std::collections::VecDeque<YearEndDecision>,
    /// Number of rejected choices seen.
    pub rejected: usize,
}

impl ScriptedInput {
    /// Input that answers `choices` in order.
    #[must_use]
    pub fn with_choices(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl PlayerInput for ScriptedInput {
    fn choose_event_choice(&mut self, _event: &Event, _context: &TurnContext) -> usize {
        self.choices.pop_front().unwrap_or(1)
    }

    fn choose_year_end_option(&mut self, _republic: &Republic) -> YearEndOption {
        self.options.pop_front().unwrap_or(YearEndOption::DoNothing)
    }

    fn year_end_decision(&mut self, _republic: &Republic, _score: f64) -> YearEndDecision {
        self.decisions.pop_front().unwrap_or_default()
    }

    fn reject_choice(&mut self, _error: &ChoiceError) {
        self.rejected += 1;
    }
}
