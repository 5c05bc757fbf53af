//! Resources: the industry that makes money and the farm that makes food.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::game::rules::{
    FOOD_PRICE, GENERATED_FOOD_BY_FARM_RATE, GENERATED_MONEY_BY_INDUSTRY_RATE, NEEDED_FOOD_PER_CITIZEN,
};

/// Upper bound of `farm_rate + industry_rate`.
pub const MAX_TOTAL_RATE: u32 = 100;

/// The industrial sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    /// Treasury in dollars. Negative when in debt.
    pub money: i64,
    /// Share of the island devoted to industry, in percent.
    pub rate: u32,
}

/// The farming sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farm {
    /// Food in store. Negative right after a famine.
    pub food_units: i64,
    /// Share of the island devoted to farming, in percent.
    pub rate: u32,
}

/// The two-sector economy of the republic.
///
/// Invariant: `farm.rate + industry.rate` is always in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Industry sector.
    industry: Industry,
    /// Farming sector.
    farm: Farm,
}

/// Clamp a rate delta so that `rate + delta` stays within `[0, 100 - other]`.
fn balanced_rate_delta(rate: u32, delta: i32, other: u32) -> i32 {
    let ceiling = i64::from(MAX_TOTAL_RATE.saturating_sub(other));
    let updated = (i64::from(rate) + i64::from(delta)).clamp(0, ceiling);
    i32::try_from(updated - i64::from(rate)).unwrap_or(0)
}

impl Resources {
    /// Create the economy.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidRateConfiguration`] if the two rates do
    /// not sum to a value in [0, 100].
    pub fn new(food_units: i64, money: i64, farm_rate: u32, industry_rate: u32) -> Result<Self, ContentError> {
        if farm_rate.saturating_add(industry_rate) > MAX_TOTAL_RATE {
            return Err(ContentError::InvalidRateConfiguration {
                farm_rate: i64::from(farm_rate),
                industry_rate: i64::from(industry_rate),
            });
        }
        Ok(Self {
            industry: Industry {
                money,
                rate: industry_rate,
            },
            farm: Farm {
                food_units,
                rate: farm_rate,
            },
        })
    }

    /// The industry sector.
    #[must_use]
    pub const fn industry(&self) -> &Industry {
        &self.industry
    }

    /// The farming sector.
    #[must_use]
    pub const fn farm(&self) -> &Farm {
        &self.farm
    }

    /// Farm rate in percent.
    #[must_use]
    pub const fn farm_rate(&self) -> u32 {
        self.farm.rate
    }

    /// Industry rate in percent.
    #[must_use]
    pub const fn industry_rate(&self) -> u32 {
        self.industry.rate
    }

    /// Food in store.
    #[must_use]
    pub const fn food_units(&self) -> i64 {
        self.farm.food_units
    }

    /// Money in the treasury.
    #[must_use]
    pub const fn money(&self) -> i64 {
        self.industry.money
    }

    /// Add `delta` points to the farm rate. The delta is cut short so the
    /// farm rate stays non-negative and the industry rate is left untouched
    /// within the 100 point budget.
    pub fn update_farm_rate(&mut self, delta: i32) {
        let applied = balanced_rate_delta(self.farm.rate, delta, self.industry.rate);
        self.farm.rate = self.farm.rate.saturating_add_signed(applied);
    }

    /// Add `delta` points to the industry rate, cut short like
    /// [`Resources::update_farm_rate`].
    pub fn update_industry_rate(&mut self, delta: i32) {
        let applied = balanced_rate_delta(self.industry.rate, delta, self.farm.rate);
        self.industry.rate = self.industry.rate.saturating_add_signed(applied);
    }

    /// Food the farm produces in a year.
    #[must_use]
    pub fn food_income_from_farm(&self) -> i64 {
        i64::from(self.farm.rate) * GENERATED_FOOD_BY_FARM_RATE
    }

    /// Money the industry produces in a year.
    #[must_use]
    pub fn money_income_from_industry(&self) -> i64 {
        i64::from(self.industry.rate) * GENERATED_MONEY_BY_INDUSTRY_RATE
    }

    /// Harvest the year's food.
    pub fn generate_farm_income(&mut self) {
        self.add_food(self.food_income_from_farm());
    }

    /// Collect the year's industrial income.
    pub fn generate_industry_income(&mut self) {
        self.earn_money(self.money_income_from_industry());
    }

    /// Add (or remove, when negative) food.
    pub fn add_food(&mut self, food_units: i64) {
        self.farm.food_units = self.farm.food_units.saturating_add(food_units);
    }

    /// Add (or remove, when negative) money. The treasury may go into debt.
    pub fn earn_money(&mut self, amount: i64) {
        self.industry.money = self.industry.money.saturating_add(amount);
    }

    /// Spend money. Spending more than the treasury holds empties it.
    pub fn use_money(&mut self, amount: i64) {
        if amount > self.industry.money {
            self.industry.money = 0;
        } else {
            self.industry.money -= amount;
        }
    }

    /// Feed `population` citizens for a year. Food may go negative; the
    /// caller decides who starves.
    pub fn feed(&mut self, population: u64) {
        let eaten = i64::try_from(population)
            .unwrap_or(i64::MAX)
            .saturating_mul(NEEDED_FOOD_PER_CITIZEN);
        self.farm.food_units = self.farm.food_units.saturating_sub(eaten);
    }

    /// Price of `food_units` units on the market.
    #[must_use]
    pub fn food_price(food_units: u64) -> i64 {
        i64::try_from(food_units)
            .unwrap_or(i64::MAX)
            .saturating_mul(FOOD_PRICE)
    }

    /// How many food units the treasury can pay for.
    #[must_use]
    pub fn affordable_food_units(&self) -> u64 {
        u64::try_from(self.industry.money / FOOD_PRICE).unwrap_or(0)
    }

    /// Buy food. When the treasury is short, it is emptied and the food is
    /// delivered anyway.
    pub fn buy_food(&mut self, food_units: u64) {
        self.use_money(Self::food_price(food_units));
        self.add_food(i64::try_from(food_units).unwrap_or(i64::MAX));
    }
}
