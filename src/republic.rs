//! The republic: its population and its economy.
//!
//! A [`Republic`] is the single owner of all mutable game numbers. Effects,
//! bribes and year-end purchases all go through it, and it reports how each
//! operation moved the global satisfaction rate so the game can score it.

mod effect;
mod faction;
mod invariants;
pub(crate) mod population;
mod resources;

pub use effect::{Effect, Factor, FactionDelta};
pub use faction::{Bribery, Faction, FactionKind, MAX_SATISFACTION_RATE, MAX_SUPPORTERS_PER_FACTION};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use population::{BriberyChannel, Population};
pub use resources::{Farm, Industry, Resources, MAX_TOTAL_RATE};

use serde::{Deserialize, Serialize};

use crate::game::ScoringWeights;

/// Change of the global satisfaction rate caused by one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatisfactionShift {
    /// Global satisfaction before the operation.
    pub before: f64,
    /// Global satisfaction after the operation.
    pub after: f64,
}

impl SatisfactionShift {
    /// Signed change in satisfaction points.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

/// Result of a bribe attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BribeOutcome {
    /// The faction took the money.
    Bribed {
        /// The published notification.
        bribery: Bribery,
        /// How global satisfaction moved.
        shift: SatisfactionShift,
    },
    /// The faction cannot be bribed.
    NotBribable,
    /// The treasury cannot pay the price.
    InsufficientFunds {
        /// Price asked.
        price: u64,
        /// Money available.
        money: i64,
    },
}

/// Plain numbers of a republic, used to save and restore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepublicSnapshot {
    /// Every faction.
    pub factions: Vec<Faction>,
    /// The economy.
    pub resources: Resources,
}

/// A population and its economy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Republic {
    /// Citizens and their factions.
    population: Population,
    /// Money and food.
    resources: Resources,
}

impl Republic {
    /// Create a republic.
    #[must_use]
    pub const fn new(population: Population, resources: Resources) -> Self {
        Self {
            population,
            resources,
        }
    }

    /// Restore a republic from saved numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot does not hold every faction once,
    /// or holds numbers no game can reach.
    pub fn from_snapshot(snapshot: RepublicSnapshot) -> Result<Self, crate::error::ContentError> {
        let factions = snapshot
            .factions
            .iter()
            .map(|f| Faction::new(f.kind(), f.supporters(), u32::from(f.satisfaction_rate())))
            .collect::<Result<Vec<_>, _>>()?;
        let saved = snapshot.resources;
        let resources = Resources::new(saved.food_units(), saved.money(), saved.farm_rate(), saved.industry_rate())?;
        Ok(Self::new(Population::new(factions)?, resources))
    }

    /// Plain numbers of this republic.
    #[must_use]
    pub fn snapshot(&self) -> RepublicSnapshot {
        RepublicSnapshot {
            factions: self.population.factions().cloned().collect(),
            resources: self.resources,
        }
    }

    /// The population.
    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    /// The economy.
    #[must_use]
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Mutable access to the economy.
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Mutable access to the population.
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Food in store.
    #[must_use]
    pub const fn food_units(&self) -> i64 {
        self.resources.food_units()
    }

    /// Whether anybody still lives in the republic.
    #[must_use]
    pub fn is_there_any_population(&self) -> bool {
        self.population.is_there_any_population()
    }

    /// Whether citizens are satisfied enough for the difficulty.
    #[must_use]
    pub fn is_global_satisfaction_rate_okay(&self, difficulty_coefficient: f64) -> bool {
        self.population.is_global_satisfaction_rate_okay(difficulty_coefficient)
    }

    /// Apply every delta of `effect`.
    ///
    /// Entries touch disjoint numbers, so their order does not matter.
    pub fn apply_effects(&mut self, effect: &Effect) -> SatisfactionShift {
        let before = self.population.global_satisfaction_rate();

        for (kind, delta) in effect.faction_deltas() {
            let faction = self.population.faction_mut(kind);
            if let Some(points) = delta.satisfaction_rate {
                faction.update_satisfaction_rate(points);
            }
            if let Some(percent) = delta.supporters {
                faction.update_supporters_by(percent);
            }
        }

        for (factor, delta) in effect.factor_deltas() {
            match factor {
                Factor::IndustryRate => self.resources.update_industry_rate(delta),
                Factor::FarmRate => self.resources.update_farm_rate(delta),
                Factor::FoodUnits => self.resources.add_food(i64::from(delta)),
                Factor::Money => self.resources.earn_money(i64::from(delta)),
                Factor::Population => self.population.update_supporters_by(delta),
                Factor::SatisfactionRate => self.population.update_satisfaction_rates(delta),
            }
        }

        tracing::debug!(?effect, "effects applied");

        SatisfactionShift {
            before,
            after: self.population.global_satisfaction_rate(),
        }
    }

    /// Pay a faction to raise its satisfaction.
    pub fn bribe(&mut self, kind: FactionKind) -> BribeOutcome {
        if !kind.is_bribable() {
            return BribeOutcome::NotBribable;
        }
        let price = self.population.faction(kind).bribe_price();
        let money = self.resources.money();
        let cost = i64::try_from(price).unwrap_or(i64::MAX);
        if cost > money {
            tracing::warn!(faction = %kind, price, money, "bribe refused: not enough money");
            return BribeOutcome::InsufficientFunds { price, money };
        }

        let before = self.population.global_satisfaction_rate();
        let Some(bribery) = self.population.bribe(kind) else {
            return BribeOutcome::NotBribable;
        };
        self.resources.use_money(cost);
        BribeOutcome::Bribed {
            bribery,
            shift: SatisfactionShift {
                before,
                after: self.population.global_satisfaction_rate(),
            },
        }
    }

    /// Buy food on the year-end market.
    pub fn buy_food(&mut self, food_units: u64) {
        self.resources.buy_food(food_units);
    }

    /// Harvest and collect the year's incomes. Returns `(food, money)`.
    pub fn generate_incomes(&mut self) -> (i64, i64) {
        let food = self.resources.food_income_from_farm();
        let money = self.resources.money_income_from_industry();
        self.resources.generate_farm_income();
        self.resources.generate_industry_income();
        (food, money)
    }

    /// Feed everyone for a year.
    pub fn feed_population(&mut self) {
        self.resources.feed(self.population.total_supporters());
    }

    /// End-of-game score for the population.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn population_score(&self, weights: &ScoringWeights) -> f64 {
        self.population.total_supporters() as f64 * weights.per_citizen
    }

    /// End-of-game score for the industry rate.
    #[must_use]
    pub fn industry_rate_score(&self, weights: &ScoringWeights) -> f64 {
        f64::from(self.resources.industry_rate()) * weights.per_industry_rate
    }

    /// End-of-game score for the treasury.
    #[must_use]
    pub fn money_score(&self, weights: &ScoringWeights) -> f64 {
        weights.money_score(self.resources.money())
    }

    /// End-of-game score for the farm rate.
    #[must_use]
    pub fn farm_rate_score(&self, weights: &ScoringWeights) -> f64 {
        f64::from(self.resources.farm_rate()) * weights.per_farm_rate
    }

    /// End-of-game score for the food in store.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn food_score(&self, weights: &ScoringWeights) -> f64 {
        self.resources.food_units() as f64 * weights.per_food_unit
    }
}
