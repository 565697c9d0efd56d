//! Post-purchase upsell. Terminal: nothing here moves the funnel.
use serde::{Deserialize, Serialize};

use super::{FunnelAction, ScreenEvent, ScreenOutput, unavailable};
use crate::constants::{LOG_TARGET, UPSELL_PRICE_CENTS};
use crate::error::FunnelError;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsellDecision {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostPurchaseScreen {
    decision: Option<UpsellDecision>,
}

impl PostPurchaseScreen {
    #[must_use]
    pub const fn decision(&self) -> Option<UpsellDecision> {
        self.decision
    }

    #[must_use]
    pub const fn upsell_price_cents() -> u32 {
        UPSELL_PRICE_CENTS
    }

    /// # Errors
    ///
    /// Offers only `Upsell`, and only until a decision is recorded.
    pub fn handle(&mut self, action: &FunnelAction) -> Result<ScreenOutput, FunnelError> {
        match (action, self.decision) {
            (FunnelAction::Upsell { decision }, None) => {
                log::info!(target: LOG_TARGET, "upsell decision recorded: {decision:?}");
                self.decision = Some(*decision);
                Ok(ScreenOutput::stay().with_event(ScreenEvent::UpsellRecorded {
                    decision: *decision,
                }))
            }
            (other, _) => Err(unavailable(Step::PostPurchase, other)),
        }
    }
}
