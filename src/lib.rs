// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Republica: a deterministic turn-based engine for governing a small republic.
//!
//! The player leads an island republic made of eight factions and a
//! two-sector economy. Every season an event asks for a decision; every
//! year ends with incomes, bribes, a food market and a harvest that feeds or
//! starves the population.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Content loader  ·  Autoplay       │
//! ├─────────────────────────────────────┤
//! │   Game (turns, year ends, score)    │
//! ├─────────────────────────────────────┤
//! │   Republic (factions, economy)      │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine never reads a terminal or exits the process: decisions come
//! from a [`PlayerInput`] and outcomes are returned.

pub mod autoplay;
pub mod content;
pub mod error;
pub mod game;
pub mod republic;

pub use error::{ChoiceError, ContentError, GameError, LaunchError, SaveError};

// Re-export key game types at crate root for convenience
pub use content::Scenario;
pub use game::{
    Difficulty, Event, Game, GameConfig, GameMode, GameOutcome, PlayerInput, Season, YearEndDecision,
    YearEndOption,
};
pub use republic::{Effect, Faction, FactionKind, Population, Republic, Resources};
