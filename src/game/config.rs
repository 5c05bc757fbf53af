//! Game configuration: difficulty, mode and seed.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::game::ScoringWeights;

/// How hard the game is. Scales event effects, the initial score and the
/// satisfaction threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Half-strength events, lower satisfaction threshold.
    Easy,
    /// Events as written.
    #[default]
    Normal,
    /// Stronger events, higher satisfaction threshold.
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Multiplier applied to event effects and to the satisfaction threshold.
    #[must_use]
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Normal => 1.0,
            Self::Hard => 1.5,
        }
    }

    /// Key used for this difficulty in scenario and save files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Normal => "NORMAL",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// How the next event of a season is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Events are played in the authored order, the game ends with them.
    #[default]
    Scenario,
    /// Events are drawn at random from each season, forever.
    Sandbox,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario => f.write_str("scenario"),
            Self::Sandbox => f.write_str("sandbox"),
        }
    }
}

/// Configuration for one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Difficulty chosen by the player.
    pub difficulty: Difficulty,
    /// Scenario or sandbox play.
    pub mode: GameMode,
    /// Seed for every random draw of the game (sandbox events, growth).
    pub seed: u64,
    /// Scoring weights.
    pub scoring: ScoringWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            mode: GameMode::Scenario,
            seed: 0,
            scoring: ScoringWeights::default(),
        }
    }
}
