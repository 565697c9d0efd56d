//! Slipper style choice.
use super::{FunnelAction, ScreenCtx, ScreenOutput, unavailable};
use crate::error::FunnelError;
use crate::rewards::RewardEffects;
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSelectionScreen;

impl StyleSelectionScreen {
    /// # Errors
    ///
    /// Offers only `ChooseStyle`; picking a card advances immediately.
    pub fn handle(
        &self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::ChooseStyle { style } => {
                let patch =
                    RewardEffects::STYLE.apply_to(SessionPatch::default().style(*style), ctx.state);
                Ok(ScreenOutput::advance().with_patch(patch))
            }
            other => Err(unavailable(Step::StyleSelection, other)),
        }
    }
}
