//! Property-based tests for republic mechanics.
//!
//! These tests verify that factions and the economy stay within their
//! valid ranges whatever deltas events throw at them.
//! Run with: cargo test --release prop_republic

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use republica::republic::{check_invariants, Factor, MAX_TOTAL_RATE};
use republica::{Effect, Faction, FactionKind, Population, Republic, Resources};

/// Republic where every faction starts with the given numbers.
fn republic(supporters: &[u32; 8], satisfaction: &[u32; 8], farm_rate: u32, industry_rate: u32) -> Republic {
    let factions = FactionKind::ALL
        .into_iter()
        .enumerate()
        .map(|(i, kind)| Faction::new(kind, supporters[i], satisfaction[i]).unwrap());
    Republic::new(
        Population::new(factions).unwrap(),
        Resources::new(1000, 1000, farm_rate, industry_rate).unwrap(),
    )
}

fn any_kind() -> impl Strategy<Value = FactionKind> {
    (0..FactionKind::ALL.len()).prop_map(|i| FactionKind::ALL[i])
}

fn any_factor() -> impl Strategy<Value = Factor> {
    prop_oneof![
        Just(Factor::IndustryRate),
        Just(Factor::FarmRate),
        Just(Factor::FoodUnits),
        Just(Factor::Money),
        Just(Factor::Population),
        Just(Factor::SatisfactionRate),
    ]
}

/// Effects of the size scenarios use: supporters change by at most 10%
/// upwards so the sequence stays far from the sanity bounds.
fn any_effect() -> impl Strategy<Value = Effect> {
    (
        prop::collection::vec((any_kind(), -200i32..200, -150i32..=10), 0..4),
        prop::collection::vec((any_factor(), -200i32..200), 0..3),
    )
        .prop_map(|(factions, factors)| {
            let mut effect = Effect::new();
            for (kind, satisfaction, supporters) in factions {
                effect = effect.with_satisfaction(kind, satisfaction).with_supporters(kind, supporters);
            }
            for (factor, delta) in factors {
                let delta = if factor == Factor::Population { delta.min(10) } else { delta };
                effect = effect.with_factor(factor, delta);
            }
            effect
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Satisfaction is always the clamped sum of the old rate and the delta.
    #[test]
    fn prop_satisfaction_rate_is_clamped(start in 0u32..=100, delta in any::<i32>()) {
        let mut faction = Faction::new(FactionKind::Liberals, 10, start).unwrap();
        faction.update_satisfaction_rate(delta);
        let expected = (i64::from(start) + i64::from(delta)).clamp(0, 100);
        prop_assert_eq!(i64::from(faction.satisfaction_rate()), expected);
    }

    /// Supporters follow floor(n * (100 + p) / 100) and never go below zero.
    #[test]
    fn prop_supporters_never_negative(start in 0u32..1_000_000, percent in -1000i32..1000) {
        let mut faction = Faction::new(FactionKind::Ecologists, start, 50).unwrap();
        faction.update_supporters_by(percent);
        let expected = (i64::from(start) * (100 + i64::from(percent))).div_euclid(100).max(0);
        prop_assert_eq!(i64::from(faction.supporters()), expected);
    }

    /// A growth that amounts to less than one citizen changes nobody.
    #[test]
    fn prop_sub_citizen_growth_is_a_no_op(start in 1u32..100, percent in 0i32..100) {
        prop_assume!(i64::from(start) * i64::from(percent) < 100);
        let mut faction = Faction::new(FactionKind::Religious, start, 50).unwrap();
        faction.update_supporters_by(percent);
        prop_assert_eq!(faction.supporters(), start);
    }

    /// Farm and industry rates always sum to at most 100, whatever the deltas.
    #[test]
    fn prop_rate_sum_bounded(
        farm in 0u32..=100,
        industry_share in 0u32..=100,
        deltas in prop::collection::vec((any::<bool>(), any::<i32>()), 0..50)
    ) {
        let industry = industry_share.min(MAX_TOTAL_RATE - farm);
        let mut resources = Resources::new(0, 0, farm, industry).unwrap();
        for (on_farm, delta) in deltas {
            if on_farm {
                resources.update_farm_rate(delta);
            } else {
                resources.update_industry_rate(delta);
            }
            prop_assert!(resources.farm_rate() + resources.industry_rate() <= MAX_TOTAL_RATE);
        }
    }

    /// A rate delta that fits the budget is applied exactly.
    #[test]
    fn prop_fitting_rate_delta_is_exact(farm in 0u32..=50, industry in 0u32..=50, delta in -100i32..=100) {
        let mut resources = Resources::new(0, 0, farm, industry).unwrap();
        let target = i64::from(farm) + i64::from(delta);
        resources.update_farm_rate(delta);
        if (0..=i64::from(MAX_TOTAL_RATE - industry)).contains(&target) {
            prop_assert_eq!(i64::from(resources.farm_rate()), target);
        }
        prop_assert_eq!(resources.industry_rate(), industry);
    }

    /// Republic invariants hold after any sequence of effects.
    #[test]
    fn prop_invariants_hold_under_effects(
        supporters in prop::array::uniform8(0u32..1000),
        satisfaction in prop::array::uniform8(0u32..=100),
        farm in 0u32..=60,
        industry in 0u32..=40,
        effects in prop::collection::vec(any_effect(), 0..20)
    ) {
        let mut republic = republic(&supporters, &satisfaction, farm, industry);
        for effect in &effects {
            let shift = republic.apply_effects(effect);
            prop_assert!((0.0..=100.0).contains(&shift.before));
            prop_assert!((0.0..=100.0).contains(&shift.after));
            let violations = check_invariants(&republic);
            prop_assert!(violations.is_empty(), "violations: {:?}", violations);
        }
    }

    /// Global satisfaction is the supporter-weighted average.
    #[test]
    fn prop_global_satisfaction_is_weighted(
        supporters in prop::array::uniform8(0u32..1000),
        satisfaction in prop::array::uniform8(0u32..=100)
    ) {
        let republic = republic(&supporters, &satisfaction, 50, 50);
        let total: u64 = supporters.iter().map(|&s| u64::from(s)).sum();
        let weighted: u64 = supporters
            .iter()
            .zip(satisfaction)
            .map(|(&n, s)| u64::from(n) * u64::from(s))
            .sum();
        let global = republic.population().global_satisfaction_rate();
        if total == 0 {
            prop_assert!(global.abs() < f64::EPSILON);
        } else {
            #[allow(clippy::cast_precision_loss)]
            let expected = weighted as f64 / total as f64;
            prop_assert!((global - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn test_supporter_rounding_sequence() {
    let mut liberals = Faction::new(FactionKind::Liberals, 40, 100).unwrap();
    for (percent, expected) in [(100, 80), (-50, 40), (10, 44), (-98, 0), (1000, 0)] {
        liberals.update_supporters_by(percent);
        assert_eq!(liberals.supporters(), expected, "after {percent}%");
    }
}

#[test]
fn test_global_satisfaction_literal_example() {
    // 30 happy capitalists and 70 citizens at 0%: 30% globally, not 12.5%
    let mut supporters = [10; 8];
    supporters[0] = 30;
    let mut satisfaction = [0; 8];
    satisfaction[0] = 100;
    let republic = republic(&supporters, &satisfaction, 50, 50);
    assert!((republic.population().global_satisfaction_rate() - 30.0).abs() < 1e-9);
}

#[test]
fn test_bribe_raises_briber_and_lowers_loyalists() {
    let mut supporters = [10; 8];
    supporters[FactionKind::Ecologists.index()] = 20;
    let mut satisfaction = [50; 8];
    satisfaction[FactionKind::Loyalists.index()] = 100;
    let mut republic = republic(&supporters, &satisfaction, 50, 50);

    let population = republic.population_mut();
    let bribery = population.bribe(FactionKind::Ecologists).unwrap();
    assert_eq!(bribery.price, 300);
    assert_eq!(population.faction(FactionKind::Ecologists).satisfaction_rate(), 60);
    assert_eq!(population.faction(FactionKind::Loyalists).satisfaction_rate(), 70);

    // Loyalists cannot be bought
    assert!(population.bribe(FactionKind::Loyalists).is_none());
    assert_eq!(population.faction(FactionKind::Loyalists).satisfaction_rate(), 70);
}
