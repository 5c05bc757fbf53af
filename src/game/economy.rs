//! Year-end economy: incomes, the player's year-end options, and feeding.
//!
//! # Year end
//!
//! 1. The farm harvests `farm_rate × 40` food, the industry earns
//!    `industry_rate × 10` dollars.
//! 2. The player picks options until choosing to do nothing: bribe a
//!    faction, or buy food at 8 dollars a unit.
//! 3. Every citizen eats 4 units. If food is short, citizens starve one at
//!    a time across the factions; otherwise every faction grows by a random
//!    1 to 10 percent.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::game::YearEndOption;
use crate::republic::{BribeOutcome, Republic};

/// Food and money produced during the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incomes {
    /// Food harvested.
    pub food: i64,
    /// Money earned.
    pub money: i64,
}

/// What feeding the population did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodOutcome {
    /// Food was short and citizens died.
    Starvation {
        /// Citizens eliminated.
        eliminated: u64,
    },
    /// Everyone ate and the population grew.
    Growth {
        /// New citizens.
        newcomers: u64,
    },
}

/// Result of one year-end option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionOutcome {
    /// The player is done with the year-end options.
    Done,
    /// A bribe was attempted.
    Bribe(BribeOutcome),
    /// Food was bought.
    FoodBought {
        /// Units delivered.
        food_units: u64,
        /// Price charged.
        price: i64,
    },
}

impl OptionOutcome {
    /// Whether the player may pick another option afterwards.
    #[must_use]
    pub const fn allows_another_option(&self) -> bool {
        !matches!(self, Self::Done)
    }
}

/// Harvest and collect the year's incomes.
pub fn generate_incomes(republic: &mut Republic) -> Incomes {
    let (food, money) = republic.generate_incomes();
    tracing::debug!(food, money, "year-end incomes");
    Incomes { food, money }
}

/// Apply one year-end option.
pub fn apply_year_end_option(republic: &mut Republic, option: YearEndOption) -> OptionOutcome {
    match option {
        YearEndOption::DoNothing => OptionOutcome::Done,
        YearEndOption::Bribe(kind) => OptionOutcome::Bribe(republic.bribe(kind)),
        YearEndOption::BuyFood(food_units) => {
            let price = crate::republic::Resources::food_price(food_units);
            republic.buy_food(food_units);
            tracing::debug!(food_units, price, "food bought");
            OptionOutcome::FoodBought { food_units, price }
        }
    }
}

/// Feed the population, starving or growing it.
///
/// The `rng_seed` parameter drives the growth draw. It should be derived
/// from the game seed and the year.
pub fn feed_population(republic: &mut Republic, rng_seed: u64) -> FoodOutcome {
    let to_eliminate = republic
        .population()
        .supporters_to_eliminate_for_food(republic.food_units());
    let before = republic.population().total_supporters();
    let eliminated_any = republic
        .population_mut()
        .eliminate_supporters_until_enough_food(to_eliminate);
    republic.feed_population();

    if eliminated_any {
        let eliminated = before.saturating_sub(republic.population().total_supporters());
        tracing::debug!(eliminated, "citizens starved");
        FoodOutcome::Starvation { eliminated }
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        let newcomers = republic.population_mut().increase_population_randomly(&mut rng);
        tracing::debug!(newcomers, "population grew");
        FoodOutcome::Growth { newcomers }
    }
}

/// Simple deterministic hash for deriving per-draw seeds.
pub(crate) fn simple_hash(seed: u64, index: u64) -> u64 {
    let mut x = seed.wrapping_add(index);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::republic::population::tests::uniform_population;
    use crate::republic::{FactionKind, Resources};

    fn republic(food_units: i64, money: i64) -> Republic {
        Republic::new(
            uniform_population(10, 50),
            Resources::new(food_units, money, 30, 20).unwrap(),
        )
    }

    #[test]
    fn test_incomes() {
        let mut republic = republic(0, 0);
        let incomes = generate_incomes(&mut republic);
        assert_eq!(incomes, Incomes { food: 1200, money: 200 });
        assert_eq!(republic.food_units(), 1200);
        assert_eq!(republic.resources().money(), 200);
    }

    #[test]
    fn test_starvation_when_food_is_short() {
        // 80 citizens need 320; 300 food feeds 75
        let mut republic = republic(300, 0);
        let outcome = feed_population(&mut republic, 1);
        assert_eq!(outcome, FoodOutcome::Starvation { eliminated: 5 });
        assert_eq!(republic.population().total_supporters(), 75);
        assert_eq!(republic.food_units(), 0);
    }

    #[test]
    fn test_growth_when_everyone_eats() {
        let mut republic = republic(500, 0);
        let outcome = feed_population(&mut republic, 1);
        let FoodOutcome::Growth { newcomers } = outcome else {
            panic!("expected growth, got {outcome:?}");
        };
        assert_eq!(republic.food_units(), 500 - 320);
        assert_eq!(republic.population().total_supporters(), 80 + newcomers);
    }

    #[test]
    fn test_growth_is_deterministic_for_a_seed() {
        let mut first = republic(1000, 0);
        let mut second = republic(1000, 0);
        assert_eq!(feed_population(&mut first, 99), feed_population(&mut second, 99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_year_end_options() {
        let mut republic = republic(0, 1000);
        assert_eq!(
            apply_year_end_option(&mut republic, YearEndOption::BuyFood(25)),
            OptionOutcome::FoodBought {
                food_units: 25,
                price: 200
            }
        );
        assert_eq!(republic.resources().money(), 800);

        let outcome = apply_year_end_option(&mut republic, YearEndOption::Bribe(FactionKind::Militarists));
        assert!(matches!(outcome, OptionOutcome::Bribe(BribeOutcome::Bribed { .. })));
        assert!(outcome.allows_another_option());

        let done = apply_year_end_option(&mut republic, YearEndOption::DoNothing);
        assert!(!done.allows_another_option());
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(simple_hash(12345, 0), simple_hash(12345, 0));
        assert_ne!(simple_hash(12345, 0), simple_hash(12345, 1));
    }
}
