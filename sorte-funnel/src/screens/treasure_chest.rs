//! Three closed chests; opening any one pays the same reward.
use serde::{Deserialize, Serialize};

use super::{FunnelAction, ScreenCtx, ScreenEvent, ScreenOutput, check_choice, unavailable};
use crate::constants::CHOICE_SLOTS;
use crate::error::FunnelError;
use crate::rewards::RewardEffects;
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChestPhase {
    #[default]
    Closed,
    Opened { chest: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreasureChestScreen {
    phase: ChestPhase,
}

impl TreasureChestScreen {
    #[must_use]
    pub const fn phase(&self) -> ChestPhase {
        self.phase
    }

    /// # Errors
    ///
    /// `OpenChest` once while closed, `Continue` after opening.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match (action, self.phase) {
            (FunnelAction::OpenChest { chest }, ChestPhase::Closed) => {
                check_choice(*chest, CHOICE_SLOTS)?;
                self.phase = ChestPhase::Opened { chest: *chest };
                let patch = RewardEffects::TREASURE.apply_to(SessionPatch::default(), ctx.state);
                Ok(ScreenOutput::stay()
                    .with_patch(patch)
                    .with_event(ScreenEvent::ChestOpened { chest: *chest }))
            }
            (FunnelAction::Continue, ChestPhase::Opened { .. }) => Ok(ScreenOutput::advance()),
            (other, _) => Err(unavailable(Step::TreasureChest, other)),
        }
    }
}
