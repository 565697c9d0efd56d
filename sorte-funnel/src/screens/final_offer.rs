//! Final offer and checkout hand-off.
use serde::Serialize;

use super::{FunnelAction, Handoff, ScreenCtx, ScreenOutput, unavailable};
use crate::config::FunnelConfig;
use crate::constants::{OFFER_LIST_PRICE_CENTS, OFFER_PRICE_CENTS};
use crate::error::FunnelError;
use crate::state::SessionState;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalOfferScreen;

impl FinalOfferScreen {
    /// `Checkout` asks the host to open the checkout page and keeps the step.
    /// `ConfirmPurchase` is sent by the host once payment is acknowledged.
    ///
    /// # Errors
    ///
    /// Any other action is unavailable here.
    pub fn handle(
        &self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::Checkout => Ok(ScreenOutput {
                handoff: Some(Handoff::Navigate {
                    url: ctx.cfg.checkout_url.clone(),
                }),
                ..ScreenOutput::stay()
            }),
            FunnelAction::ConfirmPurchase => Ok(ScreenOutput::advance()),
            other => Err(unavailable(Step::FinalOffer, other)),
        }
    }
}

#[must_use]
pub fn bonus_label_or_fallback<'a>(state: &'a SessionState, cfg: &'a FunnelConfig) -> &'a str {
    state
        .unlocked_bonus
        .as_deref()
        .unwrap_or(&cfg.fallback_bonus)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub user_name: String,
    pub bonus_label: String,
    pub list_price_cents: u32,
    pub price_cents: u32,
}

#[must_use]
pub fn offer_view(state: &SessionState, cfg: &FunnelConfig) -> OfferView {
    OfferView {
        user_name: state.user_name.clone(),
        bonus_label: bonus_label_or_fallback(state, cfg).to_string(),
        list_price_cents: OFFER_LIST_PRICE_CENTS,
        price_cents: OFFER_PRICE_CENTS,
    }
}
