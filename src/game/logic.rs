//! Economy rules: pure functions over a catalog and a player state.

use std::cmp::Ordering;

use tracing::{debug, info};

use super::catalog::{Catalog, MultiplierTarget, UnlockCondition, UpgradeCategory, UpgradeDefinition};
use super::state::PlayerEconomyState;
use crate::error::EconomyError;
use crate::sci::Sci;

/// Prestige unlocks once the score reaches `10^PRESTIGE_EXPONENT`.
pub const PRESTIGE_EXPONENT: i64 = 9;
/// Score divisor inside the prestige payout square root.
pub const PRESTIGE_DIVISOR: f64 = 1e9;
/// Production and click bonus per prestige level.
pub const PRESTIGE_BONUS_PER_LEVEL: f64 = 0.5;

/// A completed purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Purchase {
    pub key: &'static str,
    /// Level after the purchase.
    pub level: u32,
    pub cost: Sci,
}

fn level_exponent(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

fn raw_cost(def: &UpgradeDefinition, current_level: u32) -> f64 {
    (def.base_cost * def.cost_multiplier.powi(level_exponent(current_level))).floor()
}

/// `floor(base_cost × cost_multiplier^current_level)`, saturating at `u64::MAX`.
pub fn upgrade_cost(def: &UpgradeDefinition, current_level: u32) -> u64 {
    raw_cost(def, current_level) as u64
}

/// Same cost as [`upgrade_cost`] but without the integer ceiling.
pub fn cost_value(def: &UpgradeDefinition, current_level: u32) -> Sci {
    Sci::from(raw_cost(def, current_level))
}

/// Cost of the next level of `key`, if the key exists.
pub fn next_cost(catalog: &Catalog, state: &PlayerEconomyState, key: &str) -> Option<Sci> {
    catalog
        .get(key)
        .map(|def| cost_value(def, state.level(key)))
}

pub fn condition_met(condition: &UnlockCondition, state: &PlayerEconomyState) -> bool {
    match condition {
        UnlockCondition::Start => true,
        UnlockCondition::ScoreAtLeast { threshold } => {
            state.score.compare(&Sci::from(*threshold)) != Ordering::Less
        }
        UnlockCondition::UpgradeLevelAtLeast { upgrade_key, level } => {
            state.level(upgrade_key) >= *level
        }
        UnlockCondition::PrestigeAtLeast { level } => state.prestige_level >= *level,
    }
}

/// Whether `key` is currently visible and purchasable. Never cached: items
/// lock again when a prestige resets the score and levels.
pub fn is_unlocked(catalog: &Catalog, state: &PlayerEconomyState, key: &str) -> bool {
    catalog
        .get(key)
        .is_some_and(|def| condition_met(&def.unlock, state))
}

/// Unlocked upgrades in catalog order.
pub fn available_upgrades<'a>(
    catalog: &'a Catalog,
    state: &'a PlayerEconomyState,
) -> impl Iterator<Item = &'a UpgradeDefinition> + 'a {
    catalog.iter().filter(|def| condition_met(&def.unlock, state))
}

pub fn can_afford(catalog: &Catalog, state: &PlayerEconomyState, key: &str) -> bool {
    next_cost(catalog, state, key)
        .is_some_and(|cost| state.score.compare(&cost) != Ordering::Less)
}

fn prestige_multiplier(state: &PlayerEconomyState) -> f64 {
    1.0 + state.prestige_level as f64 * PRESTIGE_BONUS_PER_LEVEL
}

/// Product of `base_value^level` over owned multipliers accepted by `applies`.
fn multiplier_product(
    catalog: &Catalog,
    state: &PlayerEconomyState,
    applies: fn(MultiplierTarget) -> bool,
) -> f64 {
    catalog
        .iter()
        .filter_map(|def| match def.category {
            UpgradeCategory::Multiplier(target) if applies(target) => {
                let level = state.level(def.key);
                (level > 0).then(|| def.base_value.powi(level_exponent(level)))
            }
            _ => None,
        })
        .product()
}

/// `Σ level × base_value` over owned upgrades of `category`.
fn additive_sum(catalog: &Catalog, state: &PlayerEconomyState, category: UpgradeCategory) -> f64 {
    catalog
        .iter()
        .filter(|def| def.category == category)
        .map(|def| state.level(def.key) as f64 * def.base_value)
        .sum()
}

/// Passive production per second. Always a full recompute: multipliers
/// interact non-linearly.
pub fn compute_rate_per_sec(catalog: &Catalog, state: &PlayerEconomyState) -> Sci {
    let base = additive_sum(catalog, state, UpgradeCategory::Auto);
    let mult = multiplier_product(catalog, state, MultiplierTarget::boosts_auto);
    Sci::from(base * mult * prestige_multiplier(state))
}

/// Score gained by one manual click.
pub fn compute_click_gain(catalog: &Catalog, state: &PlayerEconomyState) -> Sci {
    let base = 1.0 + additive_sum(catalog, state, UpgradeCategory::Click);
    let mult = multiplier_product(catalog, state, MultiplierTarget::boosts_click);
    Sci::from(base * mult * prestige_multiplier(state))
}

/// Score of at least 1e9.
///
/// An older rule also accepted `exponent == 8 && mantissa >= 10`, which a
/// normalized score can never satisfy, so only the exponent is checked.
pub fn can_prestige(state: &PlayerEconomyState) -> bool {
    state.score.exponent >= PRESTIGE_EXPONENT
}

/// `floor(sqrt(score / 1e9))`, or 0 below the threshold.
pub fn calculate_prestige_gain(state: &PlayerEconomyState) -> u64 {
    if !can_prestige(state) {
        return 0;
    }
    (state.score.to_f64() / PRESTIGE_DIVISOR).sqrt().floor() as u64
}

/// Buy one level of `key`. On error nothing changes.
pub fn apply_purchase(
    catalog: &Catalog,
    state: &mut PlayerEconomyState,
    key: &str,
) -> Result<Purchase, EconomyError> {
    let def = catalog
        .get(key)
        .ok_or_else(|| EconomyError::UnknownUpgrade(key.to_string()))?;
    if !condition_met(&def.unlock, state) {
        return Err(EconomyError::UpgradeLocked(def.key.to_string()));
    }
    let current = state.level(def.key);
    if current == u32::MAX {
        return Err(EconomyError::MaxLevel(def.key.to_string()));
    }
    let cost = cost_value(def, current);
    if state.score.compare(&cost) == Ordering::Less {
        return Err(EconomyError::InsufficientFunds {
            key: def.key.to_string(),
            cost,
            score: state.score,
        });
    }

    state.score -= cost;
    let upgrade = state.upgrades.entry(def.key.to_string()).or_default();
    upgrade.level = current + 1;
    let level = upgrade.level;
    state.refresh_rate(catalog);

    debug!(key = def.key, level, %cost, rate = %state.rate_per_sec, "Upgrade purchased");
    Ok(Purchase {
        key: def.key,
        level,
        cost,
    })
}

/// Convert the score into prestige points and reset the run.
/// Returns the points earned.
pub fn apply_prestige(
    catalog: &Catalog,
    state: &mut PlayerEconomyState,
) -> Result<u64, EconomyError> {
    if !can_prestige(state) {
        return Err(EconomyError::PrestigeNotEligible { score: state.score });
    }
    let gain = calculate_prestige_gain(state);
    let final_score = state.score;

    state.prestige_points = state.prestige_points.saturating_add(gain);
    state.prestige_level = state.prestige_level.saturating_add(1);
    state.score = Sci::ZERO;
    state.total_earned = Sci::ZERO;
    state.total_clicks = 0;
    for upgrade in state.upgrades.values_mut() {
        upgrade.level = 0;
    }
    state.refresh_rate(catalog);

    info!(
        gain,
        level = state.prestige_level,
        points = state.prestige_points,
        score = %final_score,
        "Prestige"
    );
    Ok(gain)
}

/// Passive production over `dt_seconds`. Returns the amount gained.
pub fn tick(state: &mut PlayerEconomyState, dt_seconds: f64) -> Sci {
    if !(dt_seconds > 0.0) || !dt_seconds.is_finite() {
        debug!(dt_seconds, "Tick skipped");
        return Sci::ZERO;
    }
    let gain = state.rate_per_sec.scale(dt_seconds);
    if gain.is_positive() {
        state.score += gain;
        state.total_earned += gain;
    }
    gain
}

/// Manual click. Returns the amount gained.
pub fn click(catalog: &Catalog, state: &mut PlayerEconomyState) -> Sci {
    let gain = compute_click_gain(catalog, state);
    state.score += gain;
    state.total_earned += gain;
    state.total_clicks = state.total_clicks.saturating_add(1);
    gain
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_score() -> impl Strategy<Value = Sci> {
        prop_oneof![
            Just(Sci::ZERO),
            (1.0f64..10.0, 0i64..40).prop_map(|(m, e)| Sci::new(m, e)),
        ]
    }

    proptest! {
        #[test]
        fn prop_cost_monotonic(idx in 0usize..8, level in 0u32..500) {
            let def = Catalog::standard().iter().nth(idx).unwrap();
            prop_assert!(upgrade_cost(def, level + 1) >= upgrade_cost(def, level));
        }

        #[test]
        fn prop_prestige_gain_monotonic(a in arb_score(), b in arb_score()) {
            let (hi, lo) = if a.compare(&b) != Ordering::Less { (a, b) } else { (b, a) };
            let mut s_hi = PlayerEconomyState::new(Catalog::standard());
            s_hi.score = hi;
            let mut s_lo = PlayerEconomyState::new(Catalog::standard());
            s_lo.score = lo;
            prop_assert!(calculate_prestige_gain(&s_hi) >= calculate_prestige_gain(&s_lo));
        }

        #[test]
        fn prop_failed_purchase_is_noop(score in 0.0f64..10.0) {
            let catalog = Catalog::standard();
            let mut state = PlayerEconomyState::new(catalog);
            state.score = Sci::from(score);
            let before = state.clone();
            prop_assert!(apply_purchase(catalog, &mut state, "generator").is_err());
            prop_assert_eq!(state, before);
        }

        #[test]
        fn prop_rate_nonnegative(gen in 0u32..200, boost in 0u32..50, prestige in 0u32..20) {
            let catalog = Catalog::standard();
            let mut state = PlayerEconomyState::new(catalog);
            state.upgrades.get_mut("generator").unwrap().level = gen;
            state.upgrades.get_mut("autoMultiplier").unwrap().level = boost;
            state.prestige_level = prestige;
            prop_assert!(compute_rate_per_sec(catalog, &state).mantissa >= 0.0);
        }
    }
}
