#![no_main]

//! Effect engine fuzzer.
//!
//! Builds a republic from arbitrary start values, applies a sequence of
//! arbitrary effects, bribes and year ends, and checks that the republic
//! never leaves its valid ranges.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use republica::game::{apply_year_end_option, feed_population, generate_incomes, FoodOutcome};
use republica::republic::{check_invariants, Factor};
use republica::{Effect, Faction, FactionKind, Population, Republic, Resources, YearEndOption};

/// One arbitrary operation on the republic.
#[derive(Arbitrary, Debug)]
enum Operation {
    /// Change one faction.
    Faction {
        kind: u8,
        satisfaction: Option<i16>,
        supporters: Option<i16>,
    },
    /// Change a republic-wide factor.
    Factor { factor: u8, delta: i16 },
    /// Bribe a faction.
    Bribe { kind: u8 },
    /// Buy food.
    BuyFood { units: u16 },
    /// Close a year.
    YearEnd { seed: u64 },
}

/// Structured input for effect fuzzing.
#[derive(Arbitrary, Debug)]
struct EffectsInput {
    /// Supporters and satisfaction of each faction.
    factions: [(u16, u8); 8],
    /// Farm and industry rates.
    rates: (u8, u8),
    /// Starting money and food.
    money: u16,
    food: u16,
    /// Operations to apply.
    operations: Vec<Operation>,
}

const FACTORS: [Factor; 6] = [
    Factor::IndustryRate,
    Factor::FarmRate,
    Factor::FoodUnits,
    Factor::Money,
    Factor::Population,
    Factor::SatisfactionRate,
];

/// Supporter changes are capped so a few operations cannot reach the
/// supporter sanity bound.
fn percent(delta: i16) -> i32 {
    i32::from(delta).clamp(-100, 50)
}

fn kind(index: u8) -> FactionKind {
    FactionKind::ALL[usize::from(index) % FactionKind::ALL.len()]
}

fuzz_target!(|input: EffectsInput| {
    // Out-of-range start values are rejected, not clamped
    let factions: Vec<Faction> = match FactionKind::ALL
        .into_iter()
        .zip(input.factions)
        .map(|(kind, (supporters, satisfaction))| Faction::new(kind, u32::from(supporters % 1024), u32::from(satisfaction)))
        .collect()
    {
        Ok(factions) => factions,
        Err(_) => return,
    };
    let Ok(population) = Population::new(factions) else {
        return;
    };
    let Ok(resources) = Resources::new(
        i64::from(input.food),
        i64::from(input.money),
        u32::from(input.rates.0),
        u32::from(input.rates.1),
    ) else {
        return;
    };
    let mut republic = Republic::new(population, resources);

    for operation in input.operations.into_iter().take(16) {
        match operation {
            Operation::Faction {
                kind: index,
                satisfaction,
                supporters,
            } => {
                let mut effect = Effect::new();
                if let Some(points) = satisfaction {
                    effect = effect.with_satisfaction(kind(index), i32::from(points));
                }
                if let Some(supporters) = supporters {
                    effect = effect.with_supporters(kind(index), percent(supporters));
                }
                let shift = republic.apply_effects(&effect);
                assert!((0.0..=100.0).contains(&shift.after));
            }
            Operation::Factor { factor, delta } => {
                let factor = FACTORS[usize::from(factor) % FACTORS.len()];
                let delta = if factor == Factor::Population {
                    percent(delta)
                } else {
                    i32::from(delta)
                };
                republic.apply_effects(&Effect::new().with_factor(factor, delta));
            }
            Operation::Bribe { kind: index } => {
                let money = republic.resources().money();
                apply_year_end_option(&mut republic, YearEndOption::Bribe(kind(index)));
                assert!(republic.resources().money() <= money);
            }
            Operation::BuyFood { units } => {
                apply_year_end_option(&mut republic, YearEndOption::BuyFood(u64::from(units)));
            }
            Operation::YearEnd { seed } => {
                let before = republic.population().total_supporters();
                generate_incomes(&mut republic);
                let food = feed_population(&mut republic, seed);
                if let FoodOutcome::Starvation { eliminated } = food {
                    assert!(eliminated <= before);
                }
            }
        }

        let violations = check_invariants(&republic);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});
