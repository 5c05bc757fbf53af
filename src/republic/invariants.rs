//! Republic invariants - sanity checks that detect bugs.
//!
//! Every operation on a [`Republic`] clamps its numbers, so these should
//! never trigger. If they do, a clamp is missing somewhere.

use crate::republic::{Republic, MAX_SATISFACTION_RATE, MAX_SUPPORTERS_PER_FACTION, MAX_TOTAL_RATE};

/// Sanity bound: no faction should ever go past the supporter cap.
pub const SANITY_MAX_SUPPORTERS_PER_FACTION: u32 = MAX_SUPPORTERS_PER_FACTION;

/// Sanity bound on food in store, in either direction.
pub const SANITY_MAX_FOOD_UNITS: u64 = 1_000_000_000_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all republic invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(republic: &Republic) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for faction in republic.population().factions() {
        if faction.satisfaction_rate() > MAX_SATISFACTION_RATE {
            violations.push(InvariantViolation {
                message: format!(
                    "{} satisfaction {} exceeds {MAX_SATISFACTION_RATE}",
                    faction.kind(),
                    faction.satisfaction_rate()
                ),
            });
        }
        if faction.supporters() > SANITY_MAX_SUPPORTERS_PER_FACTION {
            violations.push(InvariantViolation {
                message: format!(
                    "{} has {} supporters > sanity max {SANITY_MAX_SUPPORTERS_PER_FACTION}",
                    faction.kind(),
                    faction.supporters()
                ),
            });
        }
    }

    let resources = republic.resources();
    let total_rate = resources.farm_rate().saturating_add(resources.industry_rate());
    if total_rate > MAX_TOTAL_RATE {
        violations.push(InvariantViolation {
            message: format!(
                "farm rate {} + industry rate {} exceeds {MAX_TOTAL_RATE}",
                resources.farm_rate(),
                resources.industry_rate()
            ),
        });
    }

    if resources.food_units().unsigned_abs() > SANITY_MAX_FOOD_UNITS {
        violations.push(InvariantViolation {
            message: format!(
                "{} food units beyond sanity max {SANITY_MAX_FOOD_UNITS}",
                resources.food_units()
            ),
        });
    }

    let global = republic.population().global_satisfaction_rate();
    if !(0.0..=f64::from(MAX_SATISFACTION_RATE)).contains(&global) {
        violations.push(InvariantViolation {
            message: format!("global satisfaction {global} is outside [0, {MAX_SATISFACTION_RATE}]"),
        });
    }

    violations
}

/// Assert all republic invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(republic: &Republic) {
    let violations = check_invariants(republic);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Republic invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_republic: &Republic) {}
