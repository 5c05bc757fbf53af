//! Save file: one saved game per difficulty.
//!
//! ```json
//! {
//!   "NORMAL": { "difficulty": "NORMAL", "mode": "sandbox", "seed": 42,
//!               "season": "AUTUMN", "year": 1, "event_count": 7,
//!               "score": 12.5, "republic": { ... }, "events": { ... } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::game::{Difficulty, GameMode, SavedEvents, Season};
use crate::republic::RepublicSnapshot;

/// State needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Difficulty of the saved game.
    pub difficulty: Difficulty,
    /// Scenario or sandbox.
    #[serde(default)]
    pub mode: GameMode,
    /// Seed of the saved game's draws.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Season of the next turn.
    pub season: Season,
    /// Years completed.
    pub year: u32,
    /// Number of the next turn, 1-based.
    pub event_count: u32,
    /// Score when the game was saved.
    pub score: f64,
    /// Faction and resource numbers. Older saves may not carry them, in
    /// which case the republic starts from the scenario values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub republic: Option<RepublicSnapshot>,
    /// Events left to play. Without them, the events of the turns played
    /// are skipped from the start of the scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<SavedEvents>,
    /// Whether the one catch-up year end was already used.
    #[serde(default)]
    pub caught_up: bool,
}

/// All saved games of a scenario, keyed by difficulty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveFile {
    /// Saved games.
    games: BTreeMap<Difficulty, SavedGame>,
}

impl SaveFile {
    /// Read a save file. A missing file is an empty save file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SaveError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write the save file. An empty save file removes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or removed.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        if self.games.is_empty() {
            return match fs::remove_file(path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), games = self.games.len(), "save file written");
        Ok(())
    }

    /// Saved game for a difficulty.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> Option<&SavedGame> {
        self.games.get(&difficulty)
    }

    /// Store a game, replacing any previous save of the same difficulty.
    pub fn insert(&mut self, saved: SavedGame) {
        self.games.insert(saved.difficulty, saved);
    }

    /// Remove and return the saved game of a difficulty.
    pub fn remove_entry(&mut self, difficulty: Difficulty) -> Option<SavedGame> {
        self.games.remove(&difficulty)
    }

    /// Whether no game is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
