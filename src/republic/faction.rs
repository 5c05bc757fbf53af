//! Factions: the political groups citizens support.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::game::rules::{
    BRIBE_FACTION_DECREASE_LOYALISTS_SATISFACTION, BRIBE_INCREASE_SATISFACTION_RATE,
    BRIBE_PRICE_PER_SUPPORTER,
};

/// Highest satisfaction rate a faction can reach.
pub const MAX_SATISFACTION_RATE: u8 = 100;

/// Most supporters a faction can have. Growth stops there.
pub const MAX_SUPPORTERS_PER_FACTION: u32 = 100_000_000;

/// The political groups of the republic. Every population holds exactly
/// one faction of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactionKind {
    /// Free market first.
    Capitalists,
    /// Workers first.
    Communists,
    /// Individual rights first.
    Liberals,
    /// Tradition and faith.
    Religious,
    /// A strong army.
    Militarists,
    /// The island's nature.
    Ecologists,
    /// The nation before all.
    Nationalists,
    /// Loyal to the president. Cannot be bribed, and resent every bribe
    /// paid to another faction.
    Loyalists,
}

impl FactionKind {
    /// All faction kinds, in the fixed order used for iteration.
    pub const ALL: [Self; 8] = [
        Self::Capitalists,
        Self::Communists,
        Self::Liberals,
        Self::Religious,
        Self::Militarists,
        Self::Ecologists,
        Self::Nationalists,
        Self::Loyalists,
    ];

    /// Whether money can buy this faction's satisfaction.
    #[must_use]
    pub const fn is_bribable(self) -> bool {
        !matches!(self, Self::Loyalists)
    }

    /// Position of the faction in [`FactionKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Key used for this faction in scenario files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Capitalists => "CAPITALISTS",
            Self::Communists => "COMMUNISTS",
            Self::Liberals => "LIBERALS",
            Self::Religious => "RELIGIOUS",
            Self::Militarists => "MILITARISTS",
            Self::Ecologists => "ECOLOGISTS",
            Self::Nationalists => "NATIONALISTS",
            Self::Loyalists => "LOYALISTS",
        }
    }
}

impl fmt::Display for FactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Capitalists => "Capitalists",
            Self::Communists => "Communists",
            Self::Liberals => "Liberals",
            Self::Religious => "Religious",
            Self::Militarists => "Militarists",
            Self::Ecologists => "Ecologists",
            Self::Nationalists => "Nationalists",
            Self::Loyalists => "Loyalists",
        };
        f.write_str(name)
    }
}

impl FromStr for FactionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownFaction(s.to_string()))
    }
}

/// Notification published when a faction accepts a bribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bribery {
    /// The faction that was bribed.
    pub briber: FactionKind,
    /// Price paid for the bribe.
    pub price: u64,
}

impl Bribery {
    /// Satisfaction change the bribe causes for a faction that resents it.
    #[must_use]
    pub fn resentment(&self) -> i32 {
        let price = i64::try_from(self.price).unwrap_or(i64::MAX);
        let delta = price / BRIBE_FACTION_DECREASE_LOYALISTS_SATISFACTION;
        i32::try_from(delta).unwrap_or(i32::MIN)
    }
}

/// A faction with its supporters and how satisfied they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    /// Which group this is.
    kind: FactionKind,
    /// Number of citizens supporting the faction.
    supporters: u32,
    /// Satisfaction in percent, always in [0, 100].
    satisfaction_rate: u8,
}

impl Faction {
    /// Create a faction.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidSatisfactionRate`] if the rate is
    /// above 100, or [`ContentError::TooManySupporters`] above
    /// [`MAX_SUPPORTERS_PER_FACTION`].
    pub fn new(kind: FactionKind, supporters: u32, satisfaction_rate: u32) -> Result<Self, ContentError> {
        if supporters > MAX_SUPPORTERS_PER_FACTION {
            return Err(ContentError::TooManySupporters {
                faction: kind,
                supporters,
            });
        }
        let rate = u8::try_from(satisfaction_rate)
            .ok()
            .filter(|rate| *rate <= MAX_SATISFACTION_RATE)
            .ok_or(ContentError::InvalidSatisfactionRate {
                faction: kind,
                rate: i64::from(satisfaction_rate),
            })?;
        Ok(Self {
            kind,
            supporters,
            satisfaction_rate: rate,
        })
    }

    /// The faction's kind.
    #[must_use]
    pub const fn kind(&self) -> FactionKind {
        self.kind
    }

    /// Number of supporters.
    #[must_use]
    pub const fn supporters(&self) -> u32 {
        self.supporters
    }

    /// Satisfaction rate in percent.
    #[must_use]
    pub const fn satisfaction_rate(&self) -> u8 {
        self.satisfaction_rate
    }

    /// Add `delta` points to the satisfaction rate, clamped to [0, 100].
    pub fn update_satisfaction_rate(&mut self, delta: i32) {
        let updated = (i32::from(self.satisfaction_rate).saturating_add(delta))
            .clamp(0, i32::from(MAX_SATISFACTION_RATE));
        self.satisfaction_rate = u8::try_from(updated).unwrap_or(MAX_SATISFACTION_RATE);
    }

    /// Grow or shrink the supporters by `percent` percent.
    ///
    /// Citizens are discrete: the new count is rounded down, so a faction of
    /// 44 shrinking by 98% keeps 0.88 citizens, that is nobody. Shrinking by
    /// more than 100% empties the faction. Growth stops at
    /// [`MAX_SUPPORTERS_PER_FACTION`].
    pub fn update_supporters_by(&mut self, percent: i32) {
        let scaled = i64::from(self.supporters) * (100 + i64::from(percent));
        let updated = scaled.div_euclid(100).clamp(0, i64::from(MAX_SUPPORTERS_PER_FACTION));
        self.supporters = u32::try_from(updated).unwrap_or(MAX_SUPPORTERS_PER_FACTION);
    }

    /// Remove exactly one supporter, if any is left.
    pub fn eliminate_a_supporter(&mut self) {
        self.supporters = self.supporters.saturating_sub(1);
    }

    /// Money needed to bribe the faction.
    #[must_use]
    pub fn bribe_price(&self) -> u64 {
        u64::from(self.supporters) * BRIBE_PRICE_PER_SUPPORTER
    }

    /// Bribe the faction.
    ///
    /// A bribable faction gains satisfaction and returns the notification its
    /// listeners must receive. Loyalists cannot be bribed: nothing changes
    /// and nothing is published.
    pub fn bribe(&mut self) -> Option<Bribery> {
        if !self.kind.is_bribable() {
            return None;
        }
        self.update_satisfaction_rate(BRIBE_INCREASE_SATISFACTION_RATE);
        Some(Bribery {
            briber: self.kind,
            price: self.bribe_price(),
        })
    }

    /// React to a bribe paid to another faction.
    pub fn receive_bribery(&mut self, bribery: &Bribery) {
        self.update_satisfaction_rate(bribery.resentment());
    }
}
