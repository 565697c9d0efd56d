//! Per-screen controllers.
//!
//! Each screen owns a small local state machine. Controllers only borrow the
//! session state; they answer with a [`ScreenOutput`] that the session owner
//! merges and, when asked, follows with a single step advance.
use serde::{Deserialize, Serialize};

use crate::config::FunnelConfig;
use crate::error::FunnelError;
use crate::rewards::DiscountTier;
use crate::rng::RngBundle;
use crate::state::{IncomeAmount, SessionPatch, SessionState, SlipperStyle};
use crate::step::Step;

pub mod badge_collection;
pub mod bonus_roulette;
pub mod discount_box;
pub mod entry;
pub mod final_offer;
pub mod income_roulette;
pub mod post_purchase;
pub mod previews;
pub mod roulette;
pub mod scratch_card;
pub mod style_selection;
pub mod treasure_chest;
pub mod welcome;

pub use badge_collection::{BadgeCollectionView, BadgeEntry, collection_view};
pub use bonus_roulette::BonusRouletteScreen;
pub use discount_box::{DiscountBoxPhase, DiscountBoxScreen};
pub use entry::EntryScreen;
pub use final_offer::{FinalOfferScreen, OfferView, bonus_label_or_fallback, offer_view};
pub use income_roulette::IncomeRouletteScreen;
pub use post_purchase::{PostPurchaseScreen, UpsellDecision};
pub use previews::{PreviewsScreen, PreviewsView, effective_style, previews_view};
pub use roulette::{Roulette, SpinPhase};
pub use scratch_card::ScratchCardScreen;
pub use style_selection::StyleSelectionScreen;
pub use treasure_chest::{ChestPhase, TreasureChestScreen};
pub use welcome::{WelcomeScreen, normalize_user_name};

/// User interaction forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FunnelAction {
    Continue,
    EditName { name: String },
    SubmitName,
    Spin { now_ms: u64 },
    ChooseStyle { style: SlipperStyle },
    OpenChest { chest: u8 },
    ChooseBox { index: u8 },
    RetryDiscount,
    PointerDown,
    PointerMove { x: f32, y: f32 },
    PointerUp,
    ClaimScratch,
    Checkout,
    ConfirmPurchase,
    Upsell { decision: UpsellDecision },
}

impl FunnelAction {
    /// Build a style choice from its tag.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::UnknownStyle`] for tags outside the catalog.
    pub fn choose_style_tag(tag: &str) -> Result<Self, FunnelError> {
        tag.parse::<SlipperStyle>()
            .map(|style| Self::ChooseStyle { style })
            .map_err(|()| FunnelError::UnknownStyle(tag.to_string()))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::EditName { .. } => "edit_name",
            Self::SubmitName => "submit_name",
            Self::Spin { .. } => "spin",
            Self::ChooseStyle { .. } => "choose_style",
            Self::OpenChest { .. } => "open_chest",
            Self::ChooseBox { .. } => "choose_box",
            Self::RetryDiscount => "retry_discount",
            Self::PointerDown => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::ClaimScratch => "claim_scratch",
            Self::Checkout => "checkout",
            Self::ConfirmPurchase => "confirm_purchase",
            Self::Upsell { .. } => "upsell",
        }
    }
}

/// Something the presentation may want to celebrate or animate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenEvent {
    SpinStarted { due_at_ms: u64 },
    IncomeResolved { amount: IncomeAmount, reason: String },
    BonusResolved { label: String },
    ChestOpened { chest: u8 },
    DiscountRevealed { tier: DiscountTier, percent: u8 },
    ScratchRevealed,
    UpsellRecorded { decision: UpsellDecision },
}

/// Outbound request that leaves the funnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handoff {
    Navigate { url: String },
}

/// What a controller asks the session owner to do.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenOutput {
    pub patch: SessionPatch,
    pub advance: bool,
    pub event: Option<ScreenEvent>,
    pub handoff: Option<Handoff>,
}

impl ScreenOutput {
    #[must_use]
    pub fn stay() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn advance() -> Self {
        Self {
            advance: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_patch(mut self, patch: SessionPatch) -> Self {
        self.patch = patch;
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: ScreenEvent) -> Self {
        self.event = Some(event);
        self
    }
}

/// Read-only session context plus the mutable pieces a controller may use.
pub struct ScreenCtx<'a> {
    pub state: &'a SessionState,
    pub cfg: &'a FunnelConfig,
    pub rng: &'a mut RngBundle,
}

pub(crate) fn unavailable(step: Step, action: &FunnelAction) -> FunnelError {
    FunnelError::ActionUnavailable {
        step,
        action: action.name(),
    }
}

pub(crate) fn check_choice(index: u8, max: u8) -> Result<(), FunnelError> {
    if (1..=max).contains(&index) {
        Ok(())
    } else {
        Err(FunnelError::ChoiceOutOfRange { index, max })
    }
}

/// Local state of whichever screen is showing.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Entry(EntryScreen),
    Welcome(WelcomeScreen),
    IncomeRoulette(IncomeRouletteScreen),
    StyleSelection(StyleSelectionScreen),
    TreasureChest(TreasureChestScreen),
    DiscountBox(DiscountBoxScreen),
    BonusRoulette(BonusRouletteScreen),
    ScratchCard(ScratchCardScreen),
    BadgeCollection(badge_collection::BadgeCollectionScreen),
    Previews(PreviewsScreen),
    FinalOffer(FinalOfferScreen),
    PostPurchase(PostPurchaseScreen),
}

impl ScreenState {
    /// Fresh local state for a step, as if the screen had just mounted.
    #[must_use]
    pub fn for_step(step: Step, cfg: &FunnelConfig) -> Self {
        match step {
            Step::Entry => Self::Entry(EntryScreen),
            Step::Welcome => Self::Welcome(WelcomeScreen::default()),
            Step::IncomeRoulette => {
                Self::IncomeRoulette(IncomeRouletteScreen::new(cfg.income_spin_ms))
            }
            Step::StyleSelection => Self::StyleSelection(StyleSelectionScreen),
            Step::TreasureChest => Self::TreasureChest(TreasureChestScreen::default()),
            Step::DiscountBox => Self::DiscountBox(DiscountBoxScreen::default()),
            Step::BonusRoulette => Self::BonusRoulette(BonusRouletteScreen::new(cfg.bonus_spin_ms)),
            Step::ScratchCard => Self::ScratchCard(ScratchCardScreen::new(cfg.scratch)),
            Step::BadgeCollection => {
                Self::BadgeCollection(badge_collection::BadgeCollectionScreen)
            }
            Step::Previews => Self::Previews(PreviewsScreen),
            Step::FinalOffer => Self::FinalOffer(FinalOfferScreen),
            Step::PostPurchase => Self::PostPurchase(PostPurchaseScreen::default()),
        }
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::Entry(_) => Step::Entry,
            Self::Welcome(_) => Step::Welcome,
            Self::IncomeRoulette(_) => Step::IncomeRoulette,
            Self::StyleSelection(_) => Step::StyleSelection,
            Self::TreasureChest(_) => Step::TreasureChest,
            Self::DiscountBox(_) => Step::DiscountBox,
            Self::BonusRoulette(_) => Step::BonusRoulette,
            Self::ScratchCard(_) => Step::ScratchCard,
            Self::BadgeCollection(_) => Step::BadgeCollection,
            Self::Previews(_) => Step::Previews,
            Self::FinalOffer(_) => Step::FinalOffer,
            Self::PostPurchase(_) => Step::PostPurchase,
        }
    }

    /// Route a user action to the showing screen.
    ///
    /// # Errors
    ///
    /// Returns an error when the screen does not offer `action` in its current state.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &mut ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match self {
            Self::Entry(screen) => screen.handle(action),
            Self::Welcome(screen) => screen.handle(action, ctx),
            Self::IncomeRoulette(screen) => screen.handle(action, ctx),
            Self::StyleSelection(screen) => screen.handle(action, ctx),
            Self::TreasureChest(screen) => screen.handle(action, ctx),
            Self::DiscountBox(screen) => screen.handle(action, ctx),
            Self::BonusRoulette(screen) => screen.handle(action, ctx),
            Self::ScratchCard(screen) => screen.handle(action, ctx),
            Self::BadgeCollection(screen) => screen.handle(action),
            Self::Previews(screen) => screen.handle(action),
            Self::FinalOffer(screen) => screen.handle(action, ctx),
            Self::PostPurchase(screen) => screen.handle(action),
        }
    }

    /// Let time-driven screens resolve pending work.
    pub fn tick(&mut self, now_ms: u64, ctx: &mut ScreenCtx<'_>) -> Option<ScreenOutput> {
        match self {
            Self::IncomeRoulette(screen) => screen.tick(now_ms, ctx),
            Self::BonusRoulette(screen) => screen.tick(now_ms, ctx),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_screen_matches_step() {
        let cfg = FunnelConfig::default();
        for step in Step::ALL {
            assert_eq!(ScreenState::for_step(step, &cfg).step(), step);
        }
    }

    #[test]
    fn style_tag_parsing() {
        assert_eq!(
            FunnelAction::choose_style_tag("frases"),
            Ok(FunnelAction::ChooseStyle {
                style: SlipperStyle::Frases
            })
        );
        assert_eq!(
            FunnelAction::choose_style_tag("neon"),
            Err(FunnelError::UnknownStyle("neon".into()))
        );
    }

    #[test]
    fn choice_range_is_one_based() {
        assert!(check_choice(1, 3).is_ok());
        assert!(check_choice(3, 3).is_ok());
        assert_eq!(
            check_choice(0, 3),
            Err(FunnelError::ChoiceOutOfRange { index: 0, max: 3 })
        );
        assert!(check_choice(4, 3).is_err());
    }

    #[test]
    fn actions_serialize_with_kind_tag() {
        let json = serde_json::to_string(&FunnelAction::ChooseBox { index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"choose_box","index":2}"#);
        let back: FunnelAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FunnelAction::ChooseBox { index: 2 });
    }
}
