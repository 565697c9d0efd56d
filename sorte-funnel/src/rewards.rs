//! Reward generators.
//!
//! Each generator is a pure function of its random source (or, for the
//! discount, of the attempt count) and returns the outcome together with the
//! effects to apply. Nothing here touches session state directly.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{BONUS_OPTIONS, INCOME_OPTIONS, IncomeOption};
use crate::constants::{
    BADGE_BONUS, BADGE_INCOME, BADGE_SCRATCH, BADGE_STYLE, BADGE_TREASURE, BONUS_ROULETTE_POINTS,
    DISCOUNT_FIRST_PCT, DISCOUNT_RETRY_PCT, INCOME_ROULETTE_POINTS, STYLE_SELECTION_POINTS,
    TREASURE_CHEST_POINTS,
};
use crate::state::{SessionPatch, SessionState};

/// Points and badge granted by a resolved mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardEffects {
    pub points: u32,
    pub badge: Option<&'static str>,
}

impl RewardEffects {
    pub const INCOME: Self = Self {
        points: INCOME_ROULETTE_POINTS,
        badge: Some(BADGE_INCOME),
    };
    pub const STYLE: Self = Self {
        points: STYLE_SELECTION_POINTS,
        badge: Some(BADGE_STYLE),
    };
    pub const TREASURE: Self = Self {
        points: TREASURE_CHEST_POINTS,
        badge: Some(BADGE_TREASURE),
    };
    pub const BONUS: Self = Self {
        points: BONUS_ROULETTE_POINTS,
        badge: Some(BADGE_BONUS),
    };
    pub const SCRATCH: Self = Self {
        points: 0,
        badge: Some(BADGE_SCRATCH),
    };

    /// Fold the effects into a patch built against the current state.
    #[must_use]
    pub fn apply_to(self, patch: SessionPatch, state: &SessionState) -> SessionPatch {
        let patch = if self.points > 0 {
            patch.points(state.points.saturating_add(self.points))
        } else {
            patch
        };
        match self.badge {
            Some(label) => patch.badges(state.badges_with(label)),
            None => patch,
        }
    }
}

/// Uniformly pick one of the three income outcomes.
pub fn spin_income<R: Rng + ?Sized>(rng: &mut R) -> (IncomeOption, RewardEffects) {
    let option = INCOME_OPTIONS[rng.gen_range(0..INCOME_OPTIONS.len())];
    (option, RewardEffects::INCOME)
}

/// Uniformly pick one of the four bonus labels.
pub fn spin_bonus<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, RewardEffects) {
    let label = BONUS_OPTIONS[rng.gen_range(0..BONUS_OPTIONS.len())];
    (label, RewardEffects::BONUS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountTier {
    /// First reveal; always followed by a retry offer.
    Partial,
    /// Any reveal after the first.
    Full,
}

impl DiscountTier {
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::Partial => DISCOUNT_FIRST_PCT,
            Self::Full => DISCOUNT_RETRY_PCT,
        }
    }

    #[must_use]
    pub const fn offers_retry(self) -> bool {
        matches!(self, Self::Partial)
    }
}

/// Tier depends only on how many boxes were already opened, never on which box.
#[must_use]
pub const fn resolve_discount_tier(discount_attempt: u32) -> DiscountTier {
    if discount_attempt == 0 {
        DiscountTier::Partial
    } else {
        DiscountTier::Full
    }
}

/// Outcome of opening a discount box: the tier and the incremented counter.
#[must_use]
pub const fn open_discount_box(discount_attempt: u32) -> (DiscountTier, u32) {
    (
        resolve_discount_tier(discount_attempt),
        discount_attempt.saturating_add(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha20Rng;
    use smallvec::smallvec;

    #[test]
    fn effects_build_patch_from_current_state() {
        let state = SessionState {
            points: 10,
            badges: smallvec![BADGE_INCOME.to_string()],
            ..SessionState::default()
        };
        let patch = RewardEffects::STYLE.apply_to(SessionPatch::default(), &state);
        assert_eq!(patch.points, Some(15));
        assert_eq!(
            patch.badges.unwrap().as_slice(),
            [BADGE_INCOME.to_string(), BADGE_STYLE.to_string()]
        );
    }

    #[test]
    fn scratch_effects_skip_points() {
        let state = SessionState {
            points: 40,
            ..SessionState::default()
        };
        let patch = RewardEffects::SCRATCH.apply_to(SessionPatch::default(), &state);
        assert!(patch.points.is_none());
        assert_eq!(patch.badges.unwrap().len(), 1);
    }

    #[test]
    fn income_spin_is_seeded() {
        let mut a = ChaCha20Rng::seed_from_u64(99);
        let mut b = ChaCha20Rng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(spin_income(&mut a).0, spin_income(&mut b).0);
        }
    }

    #[test]
    fn fixed_source_pins_outcome() {
        let mut zeros = StepRng::new(0, 0);
        let (option, effects) = spin_income(&mut zeros);
        assert_eq!(option, INCOME_OPTIONS[0]);
        assert_eq!(effects, RewardEffects::INCOME);
        let (bonus, effects) = spin_bonus(&mut zeros);
        assert_eq!(bonus, BONUS_OPTIONS[0]);
        assert_eq!(effects.points, 15);
    }

    #[test]
    fn discount_tier_ignores_everything_but_attempts() {
        for _ in 0..100 {
            assert_eq!(open_discount_box(0), (DiscountTier::Partial, 1));
            assert_eq!(open_discount_box(1), (DiscountTier::Full, 2));
        }
        assert_eq!(resolve_discount_tier(7).percent(), 70);
        assert_eq!(DiscountTier::Partial.percent(), 40);
        assert!(DiscountTier::Partial.offers_retry());
        assert!(!DiscountTier::Full.offers_retry());
    }
}
