//! Linear step sequencer.
//!
//! The funnel is a fixed sequence of twelve screens. The sequencer only knows
//! how to map an ordinal to a screen and how to move forward by one; there is
//! no skip-ahead and no going back.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::LOG_TARGET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Step {
    Entry = 0,
    Welcome = 1,
    IncomeRoulette = 2,
    StyleSelection = 3,
    TreasureChest = 4,
    DiscountBox = 5,
    BonusRoulette = 6,
    ScratchCard = 7,
    BadgeCollection = 8,
    Previews = 9,
    FinalOffer = 10,
    PostPurchase = 11,
}

impl Step {
    pub const ALL: [Self; 12] = [
        Self::Entry,
        Self::Welcome,
        Self::IncomeRoulette,
        Self::StyleSelection,
        Self::TreasureChest,
        Self::DiscountBox,
        Self::BonusRoulette,
        Self::ScratchCard,
        Self::BadgeCollection,
        Self::Previews,
        Self::FinalOffer,
        Self::PostPurchase,
    ];

    pub const TERMINAL: Self = Self::PostPurchase;

    /// Exact lookup; `None` for ordinals outside `0..=11`.
    #[must_use]
    pub fn try_from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Screen to render for an ordinal. Out-of-range values fall back to
    /// [`Step::Entry`] without surfacing anything to the user.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        Self::try_from_index(index).unwrap_or_else(|| {
            log::warn!(target: LOG_TARGET, "step index {index} out of range; rendering entry");
            Self::Entry
        })
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Following step, or `None` at the terminal step.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::try_from_index(self.index() + 1)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PostPurchase)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Welcome => "welcome",
            Self::IncomeRoulette => "income_roulette",
            Self::StyleSelection => "style_selection",
            Self::TreasureChest => "treasure_chest",
            Self::DiscountBox => "discount_box",
            Self::BonusRoulette => "bonus_roulette",
            Self::ScratchCard => "scratch_card",
            Self::BadgeCollection => "badge_collection",
            Self::Previews => "previews",
            Self::FinalOffer => "final_offer",
            Self::PostPurchase => "post_purchase",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw sequencer contract: the next ordinal is always exactly one more.
///
/// Range clamping is the renderer's job (see [`Step::from_index`]).
#[must_use]
pub const fn advance(current: u8) -> u8 {
    current.saturating_add(1)
}

/// Number of steps the progress indicator spans.
pub const PROGRESS_SPAN: u8 = 11;

/// Progress bar percentage, shown only strictly between entry and post purchase.
#[must_use]
pub fn progress_percent(step: Step) -> Option<f32> {
    if step == Step::Entry || step.is_terminal() {
        return None;
    }
    Some(f32::from(step.index()) / f32::from(PROGRESS_SPAN) * 100.0)
}
