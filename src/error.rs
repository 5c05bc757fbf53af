//! Error types for the republic engine.
//!
//! Errors follow the engine's failure taxonomy:
//! - [`ContentError`]: a scenario is malformed, detected while loading.
//! - [`LaunchError`]: a scenario parsed fine but cannot be played.
//! - [`ChoiceError`]: the player picked something that does not exist.
//!   Recoverable, the driver asks again.
//! - [`GameError`]: a turn could not be played at all.
//! - [`SaveError`]: the save file could not be read or written.

use std::io;

use crate::game::{GameMode, Season};
use crate::republic::FactionKind;

/// A scenario failed validation while it was being loaded.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The scenario file is not valid JSON or misses a required key.
    #[error("invalid scenario file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The scenario file could not be read.
    #[error("cannot read scenario file: {0}")]
    Io(#[from] io::Error),

    /// An event has fewer than 1 or more than 4 choices.
    #[error("event \"{event}\" has {count} choices (expected between {min} and {max})")]
    InvalidChoiceCount {
        /// Name of the offending event.
        event: String,
        /// Number of choices found.
        count: usize,
        /// Minimum number of choices.
        min: usize,
        /// Maximum number of choices.
        max: usize,
    },

    /// Farm and industry rates do not add up to a value in [0, 100].
    #[error("farm rate {farm_rate} and industry rate {industry_rate} must sum to a value in [0, 100]")]
    InvalidRateConfiguration {
        /// Farm rate that was requested.
        farm_rate: i64,
        /// Industry rate that was requested.
        industry_rate: i64,
    },

    /// A faction seed has a satisfaction rate outside [0, 100].
    #[error("{faction} satisfaction rate {rate} is outside [0, 100]")]
    InvalidSatisfactionRate {
        /// Faction the seed belongs to.
        faction: FactionKind,
        /// The rejected rate.
        rate: i64,
    },

    /// A faction starts with more supporters than a faction can hold.
    #[error("{faction} cannot have {supporters} supporters (at most {max})", max = crate::republic::MAX_SUPPORTERS_PER_FACTION)]
    TooManySupporters {
        /// Faction the seed belongs to.
        faction: FactionKind,
        /// The rejected count.
        supporters: u32,
    },

    /// A seed value that counts things is negative.
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A faction name does not match any faction.
    #[error("unknown faction \"{0}\"")]
    UnknownFaction(String),

    /// A season name does not match any season.
    #[error("unknown season \"{0}\"")]
    UnknownSeason(String),

    /// A faction is missing from the start parameters, or listed twice.
    #[error("start parameters must list every faction exactly once ({0} is missing or duplicated)")]
    IncompletePopulation(FactionKind),

    /// Neither the requested difficulty nor NORMAL has start parameters.
    #[error("no start parameters for difficulty {requested} nor for NORMAL")]
    MissingStartParameters {
        /// The difficulty the player asked for.
        requested: String,
    },
}

/// A well-formed scenario does not hold enough events to be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// A season has no event at all.
    #[error("there is not enough events in {season}")]
    InsufficientContent {
        /// The empty season.
        season: Season,
    },
}

/// The player picked a choice that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    /// The 1-based choice index is outside `[1, available]`.
    #[error("choice {choice} is out of range (expected 1 to {available})")]
    OutOfRange {
        /// The index the player typed.
        choice: usize,
        /// Number of choices the event offers.
        available: usize,
    },
}

/// A turn could not be played.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The game was not launched, or the scenario ran out of events.
    #[error("there is no current event to play")]
    NoCurrentEvent,

    /// The game cannot start.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The player input source kept answering with invalid choices.
    #[error("too many invalid choices in a row: {0}")]
    Choice(#[from] ChoiceError),
}

/// The save file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// File system failure.
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The save file is not valid JSON.
    #[error("save file is corrupted: {0}")]
    Json(#[from] serde_json::Error),

    /// The saved state does not fit the loaded scenario.
    #[error("saved game does not fit this scenario: {0}")]
    Content(#[from] ContentError),

    /// The save names an event the scenario does not hold.
    #[error("saved game refers to unknown event \"{0}\"")]
    UnknownEvent(String),

    /// The save was made in another game mode.
    #[error("saved game is a {saved} game, not a {requested} one")]
    ModeMismatch {
        /// Mode of the saved game.
        saved: GameMode,
        /// Mode of the game being resumed.
        requested: GameMode,
    },
}
