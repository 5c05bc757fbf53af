//! Effects: the numeric consequences of events and choices.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::republic::FactionKind;

/// Change applied to a single faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionDelta {
    /// Satisfaction points to add.
    pub satisfaction_rate: Option<i32>,
    /// Percentage of supporters to add.
    pub supporters: Option<i32>,
}

/// Republic-wide quantities an effect can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Factor {
    /// Industry rate points.
    IndustryRate,
    /// Farm rate points.
    FarmRate,
    /// Food units.
    FoodUnits,
    /// Dollars.
    Money,
    /// Percentage of every faction's supporters.
    Population,
    /// Satisfaction points of every faction.
    SatisfactionRate,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IndustryRate => "industry rate",
            Self::FarmRate => "farm rate",
            Self::FoodUnits => "food",
            Self::Money => "money",
            Self::Population => "population",
            Self::SatisfactionRate => "satisfaction",
        };
        f.write_str(name)
    }
}

/// A bundle of deltas, already scaled to the game difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Per-faction deltas.
    factions: BTreeMap<FactionKind, FactionDelta>,
    /// Republic-wide deltas.
    factors: BTreeMap<Factor, i32>,
}

impl Effect {
    /// An effect that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a satisfaction delta for a faction.
    #[must_use]
    pub fn with_satisfaction(mut self, kind: FactionKind, delta: i32) -> Self {
        self.factions.entry(kind).or_default().satisfaction_rate = Some(delta);
        self
    }

    /// Add a supporters percentage delta for a faction.
    #[must_use]
    pub fn with_supporters(mut self, kind: FactionKind, percent: i32) -> Self {
        self.factions.entry(kind).or_default().supporters = Some(percent);
        self
    }

    /// Add a republic-wide delta.
    #[must_use]
    pub fn with_factor(mut self, factor: Factor, delta: i32) -> Self {
        self.factors.insert(factor, delta);
        self
    }

    /// Set the whole delta of a faction.
    pub fn set_faction(&mut self, kind: FactionKind, delta: FactionDelta) {
        self.factions.insert(kind, delta);
    }

    /// Set a republic-wide delta.
    pub fn set_factor(&mut self, factor: Factor, delta: i32) {
        self.factors.insert(factor, delta);
    }

    /// Per-faction deltas, in faction order.
    pub fn faction_deltas(&self) -> impl Iterator<Item = (FactionKind, FactionDelta)> + '_ {
        self.factions.iter().map(|(kind, delta)| (*kind, *delta))
    }

    /// Republic-wide deltas, in factor order.
    pub fn factor_deltas(&self) -> impl Iterator<Item = (Factor, i32)> + '_ {
        self.factors.iter().map(|(factor, delta)| (*factor, *delta))
    }

    /// Delta for a factor, if the effect sets one.
    #[must_use]
    pub fn factor(&self, factor: Factor) -> Option<i32> {
        self.factors.get(&factor).copied()
    }

    /// Whether the effect changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty() && self.factions.is_empty()
    }
}
