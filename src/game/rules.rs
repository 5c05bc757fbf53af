//! Game rules: every tunable number of the simulation.
//!
//! Rates are percentage points, food is counted in units, money in dollars.

/// Global satisfaction (weighted by supporters) below which the republic
/// revolts, before the difficulty coefficient is applied.
pub const MINIMUM_GLOBAL_SATISFACTION_RATE: f64 = 25.0;

/// Minimum number of choices an event must offer.
pub const MIN_CHOICE_PER_EVENT: usize = 1;
/// Maximum number of choices an event may offer.
pub const MAX_CHOICE_PER_EVENT: usize = 4;

/// Food units eaten by one citizen every year.
pub const NEEDED_FOOD_PER_CITIZEN: i64 = 4;
/// Price of one food unit on the year-end market.
pub const FOOD_PRICE: i64 = 8;

/// Money produced every year per industry rate point.
pub const GENERATED_MONEY_BY_INDUSTRY_RATE: i64 = 10;
/// Food produced every year per farm rate point.
pub const GENERATED_FOOD_BY_FARM_RATE: i64 = 40;

/// Divisor applied to a bribe price to get the loyalists' satisfaction loss.
pub const BRIBE_FACTION_DECREASE_LOYALISTS_SATISFACTION: i64 = -10;
/// Satisfaction points a bribed faction gains.
pub const BRIBE_INCREASE_SATISFACTION_RATE: i32 = 10;
/// Bribe cost per supporter of the bribed faction.
pub const BRIBE_PRICE_PER_SUPPORTER: u64 = 15;

/// Score every game starts with, divided by the difficulty coefficient.
pub const INITIAL_SCORE: f64 = 10.0;
/// Score per global satisfaction point gained.
pub const SCORE_POINTS_PER_SATISFACTION_WON: f64 = 2.0;
/// Score per global satisfaction point lost.
pub const SCORE_POINTS_PER_SATISFACTION_LOST: f64 = -1.0;

/// Final score per year survived.
pub const END_SCORE_POINTS_PER_YEAR: f64 = 10.0;
/// Final score per citizen.
pub const END_SCORE_POINTS_PER_CITIZEN: f64 = 2.0;
/// Final score per industry rate point.
pub const END_SCORE_POINTS_PER_INDUSTRY_RATE: f64 = 5.0;
/// Final score per dollar while the treasury is positive.
pub const END_SCORE_POINTS_PER_DOLLAR_POSITIVE: f64 = 3.0;
/// Final score per dollar of debt.
pub const END_SCORE_POINTS_PER_DOLLAR_NEGATIVE: f64 = -2.0;
/// Final score per farm rate point.
pub const END_SCORE_POINTS_PER_FARM_RATE: f64 = 5.0;
/// Final score per food unit in store.
pub const END_SCORE_POINTS_PER_FOOD_UNITS: f64 = 0.5;

/// Turns (one per season) in a year.
pub const TURNS_PER_YEAR: u32 = 4;

/// Smallest yearly growth, in percent, of a well fed faction.
pub const MIN_POPULATION_GROWTH_PERCENT: i32 = 1;
/// Largest yearly growth, in percent, of a well fed faction.
pub const MAX_POPULATION_GROWTH_PERCENT: i32 = 10;

/// Scoring weights for the final score calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Points per year played.
    pub per_year: f64,
    /// Points per citizen.
    pub per_citizen: f64,
    /// Points per industry rate point.
    pub per_industry_rate: f64,
    /// Points per dollar when money is positive.
    pub per_dollar_positive: f64,
    /// Points per dollar of debt.
    pub per_dollar_negative: f64,
    /// Points per farm rate point.
    pub per_farm_rate: f64,
    /// Points per food unit.
    pub per_food_unit: f64,
    /// Points per global satisfaction point gained during play.
    pub per_satisfaction_won: f64,
    /// Points per global satisfaction point lost during play.
    pub per_satisfaction_lost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            per_year: END_SCORE_POINTS_PER_YEAR,
            per_citizen: END_SCORE_POINTS_PER_CITIZEN,
            per_industry_rate: END_SCORE_POINTS_PER_INDUSTRY_RATE,
            per_dollar_positive: END_SCORE_POINTS_PER_DOLLAR_POSITIVE,
            per_dollar_negative: END_SCORE_POINTS_PER_DOLLAR_NEGATIVE,
            per_farm_rate: END_SCORE_POINTS_PER_FARM_RATE,
            per_food_unit: END_SCORE_POINTS_PER_FOOD_UNITS,
            per_satisfaction_won: SCORE_POINTS_PER_SATISFACTION_WON,
            per_satisfaction_lost: SCORE_POINTS_PER_SATISFACTION_LOST,
        }
    }
}

impl ScoringWeights {
    /// Score change for a shift of the global satisfaction rate.
    #[must_use]
    pub fn satisfaction_shift_score(&self, shift: f64) -> f64 {
        if shift > 0.0 {
            shift * self.per_satisfaction_won
        } else {
            shift.abs() * self.per_satisfaction_lost
        }
    }

    /// Score for the treasury at the end of the game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn money_score(&self, money: i64) -> f64 {
        if money >= 0 {
            money as f64 * self.per_dollar_positive
        } else {
            money.unsigned_abs() as f64 * self.per_dollar_negative
        }
    }
}
