//! Discount boxes.
//!
//! The first reveal is always the partial tier and offers a retry. The retry
//! grid hides the box chosen first; any reveal after the first is the full
//! tier and advances straight to the bonus roulette.
use serde::{Deserialize, Serialize};

use super::{FunnelAction, ScreenCtx, ScreenEvent, ScreenOutput, check_choice, unavailable};
use crate::constants::{CHOICE_SLOTS, LOG_TARGET};
use crate::error::FunnelError;
use crate::rewards::{DiscountTier, open_discount_box};
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountBoxPhase {
    Choosing { removed_box: Option<u8> },
    Revealed { tier: DiscountTier, chosen_box: u8 },
}

impl Default for DiscountBoxPhase {
    fn default() -> Self {
        Self::Choosing { removed_box: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscountBoxScreen {
    phase: DiscountBoxPhase,
}

impl DiscountBoxScreen {
    #[must_use]
    pub const fn phase(&self) -> DiscountBoxPhase {
        self.phase
    }

    /// Boxes the grid should show right now.
    #[must_use]
    pub fn available_boxes(&self) -> Vec<u8> {
        match self.phase {
            DiscountBoxPhase::Choosing { removed_box } => (1..=CHOICE_SLOTS)
                .filter(|index| Some(*index) != removed_box)
                .collect(),
            DiscountBoxPhase::Revealed { .. } => Vec::new(),
        }
    }

    /// # Errors
    ///
    /// `ChooseBox` while choosing, `RetryDiscount` after a partial reveal.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match (action, self.phase) {
            (FunnelAction::ChooseBox { index }, DiscountBoxPhase::Choosing { .. }) => {
                check_choice(*index, CHOICE_SLOTS)?;
                let attempt = ctx.state.discount_attempt;
                let (tier, attempts) = open_discount_box(attempt);
                log::debug!(
                    target: LOG_TARGET,
                    "discount box {index} opened on attempt {attempt}: {}%",
                    tier.percent()
                );
                self.phase = DiscountBoxPhase::Revealed {
                    tier,
                    chosen_box: *index,
                };
                let out = if tier.offers_retry() {
                    ScreenOutput::stay()
                } else {
                    ScreenOutput::advance()
                };
                Ok(out
                    .with_patch(SessionPatch::default().discount_attempt(attempts))
                    .with_event(ScreenEvent::DiscountRevealed {
                        tier,
                        percent: tier.percent(),
                    }))
            }
            (
                FunnelAction::RetryDiscount,
                DiscountBoxPhase::Revealed {
                    tier: DiscountTier::Partial,
                    chosen_box,
                },
            ) => {
                self.phase = DiscountBoxPhase::Choosing {
                    removed_box: Some(chosen_box),
                };
                Ok(ScreenOutput::stay())
            }
            (other, _) => Err(unavailable(Step::DiscountBox, other)),
        }
    }
}
