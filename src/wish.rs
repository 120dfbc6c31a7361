//! Single-wish state machine: rarity roll, 50/50, guarantee and capturing radiance

use crate::config::{BannerRules, PityState, RadianceRule, RADIANCE_THRESHOLD};
use crate::error::RngError;
use crate::rng::WishRng;

/// Weight added per wish inside the soft pity window
pub const SOFT_PITY_STEP: i64 = 6;
/// Soft pity rolls are drawn from `0..=SOFT_PITY_ROLL_MAX`
pub const SOFT_PITY_ROLL_MAX: u32 = 100;
/// Base-rate rolls are drawn from `0..=BASE_ROLL_MAX`
pub const BASE_ROLL_MAX: u32 = 999;
/// The one base-rate roll that yields a 5-star (1 in 1000)
pub const BASE_RATE_SENTINEL: u32 = 6;

/// What a single wish produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishOutcome {
    /// No 5-star
    Miss,
    /// Lost the 50/50
    OffBanner,
    /// Won the 50/50 outright
    WonFiftyFifty,
    /// Limited via the guarantee carried from a lost 50/50
    Guaranteed,
    /// Lost the 50/50 but capturing radiance forced the limited item
    CapturingRadiance,
}

impl WishOutcome {
    #[inline]
    pub fn is_five_star(self) -> bool {
        self != WishOutcome::Miss
    }

    #[inline]
    pub fn is_limited(self) -> bool {
        matches!(
            self,
            WishOutcome::WonFiftyFifty | WishOutcome::Guaranteed | WishOutcome::CapturingRadiance
        )
    }
}

/// Soft pity weight for a given distance to hard pity.
///
/// Negative and zero distances are not clamped; the weight keeps growing.
#[inline]
pub fn soft_pity_weight(soft_pity_distance: i64, window: u32) -> i64 {
    SOFT_PITY_STEP * (1 + window as i64 - soft_pity_distance)
}

/// Rarity roll. Hard pity short-circuits without consuming randomness.
fn rolls_five_star<R: WishRng>(
    state: &PityState,
    rules: &BannerRules,
    rng: &mut R,
) -> Result<bool, RngError> {
    if state.current_pity == rules.banner_pity {
        return Ok(true);
    }

    let soft_pity_distance = rules.banner_pity as i64 - state.current_pity as i64;
    if soft_pity_distance <= rules.soft_pity_window as i64 {
        let weight = soft_pity_weight(soft_pity_distance, rules.soft_pity_window);
        let roll = rng.uniform_inclusive(0, SOFT_PITY_ROLL_MAX)?;
        Ok(roll as i64 <= weight)
    } else {
        let roll = rng.uniform_inclusive(0, BASE_ROLL_MAX)?;
        Ok(roll == BASE_RATE_SENTINEL)
    }
}

/// Resolve which 5-star was obtained, updating guarantee and radiance counters
fn resolve_five_star<R: WishRng>(
    state: &mut PityState,
    rules: &BannerRules,
    rng: &mut R,
) -> Result<WishOutcome, RngError> {
    state.current_pity = 0;

    if state.is_guaranteed {
        state.is_guaranteed = false;
        return Ok(WishOutcome::Guaranteed);
    }

    // 1 = heads
    if rng.uniform_inclusive(0, 1)? == 1 {
        return Ok(WishOutcome::WonFiftyFifty);
    }

    if state.cr_score >= RADIANCE_THRESHOLD {
        state.cr_score = 1;
        state.is_guaranteed = rules.radiance_rule == RadianceRule::SetsGuarantee;
        Ok(WishOutcome::CapturingRadiance)
    } else {
        state.cr_score += 1;
        state.is_guaranteed = true;
        Ok(WishOutcome::OffBanner)
    }
}

/// Simulate one wish, mutating `state` in place
pub fn roll_wish<R: WishRng>(
    state: &mut PityState,
    rules: &BannerRules,
    rng: &mut R,
) -> Result<WishOutcome, RngError> {
    if rolls_five_star(state, rules, rng)? {
        resolve_five_star(state, rules, rng)
    } else {
        state.current_pity += 1;
        Ok(WishOutcome::Miss)
    }
}

/// Simulate one wish with the default soft pity window and radiance rule.
/// Returns whether the wish produced the limited 5-star.
pub fn draw_one_wish<R: WishRng>(
    state: &mut PityState,
    banner_pity: u32,
    rng: &mut R,
) -> Result<bool, RngError> {
    roll_wish(state, &BannerRules::new(banner_pity), rng).map(WishOutcome::is_limited)
}
