//! Population: every faction of the republic and the bribery channel that
//! links them.

use rand::Rng;

use crate::error::ContentError;
use crate::game::rules::{
    MAX_POPULATION_GROWTH_PERCENT, MINIMUM_GLOBAL_SATISFACTION_RATE, MIN_POPULATION_GROWTH_PERCENT,
    NEEDED_FOOD_PER_CITIZEN,
};
use crate::republic::{Bribery, Faction, FactionKind};

/// Synchronous publish/subscribe channel for bribery notifications.
///
/// Listeners are registered when the population is built and are notified
/// in registration order, before [`Population::bribe`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriberyChannel {
    /// `(publisher, listener)` pairs in registration order.
    subscriptions: Vec<(FactionKind, FactionKind)>,
}

impl BriberyChannel {
    /// Channel where every bribable faction notifies the loyalists.
    #[must_use]
    pub fn loyalists_resent_bribes() -> Self {
        let mut channel = Self::default();
        for kind in FactionKind::ALL {
            if kind.is_bribable() {
                channel.subscribe(kind, FactionKind::Loyalists);
            }
        }
        channel
    }

    /// Make `listener` receive every bribe published by `publisher`.
    ///
    /// Non-bribable factions never publish, so subscribing to them is
    /// ignored.
    pub fn subscribe(&mut self, publisher: FactionKind, listener: FactionKind) {
        if publisher.is_bribable() && publisher != listener {
            self.subscriptions.push((publisher, listener));
        }
    }

    /// Listeners of `publisher`, in registration order.
    pub fn listeners(&self, publisher: FactionKind) -> impl Iterator<Item = FactionKind> + '_ {
        self.subscriptions
            .iter()
            .filter(move |(from, _)| *from == publisher)
            .map(|(_, to)| *to)
    }
}

/// All factions of the republic, one of each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    /// Factions indexed by [`FactionKind::index`].
    factions: Vec<Faction>,
    /// Who resents whose bribes.
    bribery: BriberyChannel,
}

impl Population {
    /// Build a population from one faction of each kind, in any order, and
    /// wire every bribable faction to the loyalists.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::IncompletePopulation`] if a kind is missing
    /// or listed twice.
    pub fn new(factions: impl IntoIterator<Item = Faction>) -> Result<Self, ContentError> {
        let mut slots: Vec<Option<Faction>> = vec![None; FactionKind::ALL.len()];
        for faction in factions {
            let slot = &mut slots[faction.kind().index()];
            if slot.is_some() {
                return Err(ContentError::IncompletePopulation(faction.kind()));
            }
            *slot = Some(faction);
        }

        let factions = slots
            .into_iter()
            .zip(FactionKind::ALL)
            .map(|(slot, kind)| slot.ok_or(ContentError::IncompletePopulation(kind)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            factions,
            bribery: BriberyChannel::loyalists_resent_bribes(),
        })
    }

    /// Get a faction.
    #[must_use]
    pub fn faction(&self, kind: FactionKind) -> &Faction {
        &self.factions[kind.index()]
    }

    /// Get a mutable faction.
    #[must_use]
    pub fn faction_mut(&mut self, kind: FactionKind) -> &mut Faction {
        &mut self.factions[kind.index()]
    }

    /// Iterate over the factions in [`FactionKind::ALL`] order.
    pub fn factions(&self) -> impl Iterator<Item = &Faction> {
        self.factions.iter()
    }

    /// Total number of citizens.
    #[must_use]
    pub fn total_supporters(&self) -> u64 {
        self.factions.iter().map(|f| u64::from(f.supporters())).sum()
    }

    /// Whether anyone still lives in the republic.
    #[must_use]
    pub fn is_there_any_population(&self) -> bool {
        self.total_supporters() > 0
    }

    /// Average satisfaction of all citizens, each faction weighted by its
    /// supporters. An empty republic has a global satisfaction of 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn global_satisfaction_rate(&self) -> f64 {
        let total = self.total_supporters();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .factions
            .iter()
            .map(|f| u64::from(f.supporters()) * u64::from(f.satisfaction_rate()))
            .sum();
        weighted as f64 / total as f64
    }

    /// Whether citizens are satisfied enough for the given difficulty.
    #[must_use]
    pub fn is_global_satisfaction_rate_okay(&self, difficulty_coefficient: f64) -> bool {
        self.global_satisfaction_rate() >= MINIMUM_GLOBAL_SATISFACTION_RATE * difficulty_coefficient
    }

    /// Add `delta` satisfaction points to every faction.
    pub fn update_satisfaction_rates(&mut self, delta: i32) {
        for faction in &mut self.factions {
            faction.update_satisfaction_rate(delta);
        }
    }

    /// Grow or shrink every faction by `percent` percent.
    pub fn update_supporters_by(&mut self, percent: i32) {
        for faction in &mut self.factions {
            faction.update_supporters_by(percent);
        }
    }

    /// Bribe a faction and notify its listeners.
    ///
    /// Returns the notification that was published, or `None` if the
    /// faction cannot be bribed.
    pub fn bribe(&mut self, kind: FactionKind) -> Option<Bribery> {
        let bribery = self.faction_mut(kind).bribe()?;
        let listeners: Vec<FactionKind> = self.bribery.listeners(kind).collect();
        for listener in listeners {
            self.faction_mut(listener).receive_bribery(&bribery);
        }
        Some(bribery)
    }

    /// Number of citizens that must die for `food_units` to feed everyone
    /// left. Partial citizens are not counted.
    #[must_use]
    pub fn supporters_to_eliminate_for_food(&self, food_units: i64) -> u64 {
        let total = i64::try_from(self.total_supporters()).unwrap_or(i64::MAX);
        let required = total.saturating_mul(NEEDED_FOOD_PER_CITIZEN);
        if food_units >= required {
            return 0;
        }
        let shortfall = required.saturating_sub(food_units);
        u64::try_from(shortfall / NEEDED_FOOD_PER_CITIZEN).unwrap_or(0)
    }

    /// Eliminate `count` citizens, one at a time, cycling through the
    /// factions in [`FactionKind::ALL`] order and skipping empty ones.
    ///
    /// Returns whether anybody was eliminated.
    pub fn eliminate_supporters_until_enough_food(&mut self, count: u64) -> bool {
        let mut remaining = count.min(self.total_supporters());
        let eliminated_any = remaining > 0;
        while remaining > 0 {
            for faction in &mut self.factions {
                if remaining == 0 {
                    break;
                }
                if faction.supporters() > 0 {
                    faction.eliminate_a_supporter();
                    remaining -= 1;
                }
            }
        }
        eliminated_any
    }

    /// Grow every faction by a random 1 to 10 percent.
    ///
    /// Returns the number of new citizens.
    pub fn increase_population_randomly(&mut self, rng: &mut impl Rng) -> u64 {
        let before = self.total_supporters();
        for faction in &mut self.factions {
            let percent = rng.gen_range(MIN_POPULATION_GROWTH_PERCENT..=MAX_POPULATION_GROWTH_PERCENT);
            faction.update_supporters_by(percent);
        }
        self.total_supporters().saturating_sub(before)
    }
}
