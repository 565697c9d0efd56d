//! Scratch card: erase enough of the cover to claim the final badge.
use super::{FunnelAction, ScreenCtx, ScreenEvent, ScreenOutput, unavailable};
use crate::constants::LOG_TARGET;
use crate::error::FunnelError;
use crate::rewards::RewardEffects;
use crate::scratch::{ScratchConfig, ScratchPhase, ScratchSurface};
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct ScratchCardScreen {
    surface: ScratchSurface,
}

impl ScratchCardScreen {
    #[must_use]
    pub fn new(cfg: ScratchConfig) -> Self {
        Self {
            surface: ScratchSurface::new(cfg),
        }
    }

    #[must_use]
    pub const fn surface(&self) -> &ScratchSurface {
        &self.surface
    }

    /// # Errors
    ///
    /// Pointer input is always accepted; `ClaimScratch` only after reveal.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::PointerDown => {
                if !self.surface.is_revealed() {
                    self.surface.pointer_down();
                }
                Ok(ScreenOutput::stay())
            }
            FunnelAction::PointerUp => {
                self.surface.pointer_up();
                Ok(ScreenOutput::stay())
            }
            FunnelAction::PointerMove { x, y } => {
                let before = self.surface.phase();
                let after = self.surface.pointer_move(*x, *y);
                if before == ScratchPhase::Unscratched && after == ScratchPhase::Revealed {
                    log::debug!(
                        target: LOG_TARGET,
                        "scratch card revealed at {:.1}% coverage",
                        self.surface.coverage() * 100.0
                    );
                    return Ok(ScreenOutput::stay().with_event(ScreenEvent::ScratchRevealed));
                }
                Ok(ScreenOutput::stay())
            }
            FunnelAction::ClaimScratch if self.surface.is_revealed() => {
                let patch = RewardEffects::SCRATCH.apply_to(SessionPatch::default(), ctx.state);
                Ok(ScreenOutput::advance().with_patch(patch))
            }
            other => Err(unavailable(Step::ScratchCard, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FunnelConfig;
    use crate::constants::BADGE_SCRATCH;
    use crate::rng::RngBundle;
    use crate::state::SessionState;

    fn small_card() -> ScratchCardScreen {
        ScratchCardScreen::new(ScratchConfig {
            width: 4,
            height: 4,
            brush_radius: 10,
            reveal_threshold: 0.5,
        })
    }

    #[test]
    fn reveal_event_fires_once_then_claim_advances() {
        let state = SessionState {
            points: 40,
            ..SessionState::default()
        };
        let cfg = FunnelConfig::default();
        let mut rng = RngBundle::from_user_seed(0);
        let ctx = ScreenCtx {
            state: &state,
            cfg: &cfg,
            rng: &mut rng,
        };
        let mut screen = small_card();

        assert!(screen.handle(&FunnelAction::ClaimScratch, &ctx).is_err());
        screen.handle(&FunnelAction::PointerDown, &ctx).unwrap();
        let out = screen
            .handle(&FunnelAction::PointerMove { x: 2.0, y: 2.0 }, &ctx)
            .unwrap();
        assert_eq!(out.event, Some(ScreenEvent::ScratchRevealed));

        screen.handle(&FunnelAction::PointerDown, &ctx).unwrap();
        let out = screen
            .handle(&FunnelAction::PointerMove { x: 1.0, y: 1.0 }, &ctx)
            .unwrap();
        assert!(out.event.is_none());

        let out = screen.handle(&FunnelAction::ClaimScratch, &ctx).unwrap();
        assert!(out.advance);
        assert!(out.patch.points.is_none());
        assert_eq!(
            out.patch.badges.unwrap().as_slice(),
            [BADGE_SCRATCH.to_string()]
        );
    }

    #[test]
    fn moves_without_press_leave_cover_intact() {
        let state = SessionState::default();
        let cfg = FunnelConfig::default();
        let mut rng = RngBundle::from_user_seed(0);
        let ctx = ScreenCtx {
            state: &state,
            cfg: &cfg,
            rng: &mut rng,
        };
        let mut screen = small_card();
        screen
            .handle(&FunnelAction::PointerMove { x: 2.0, y: 2.0 }, &ctx)
            .unwrap();
        assert_eq!(screen.surface().erased_pixels(), 0);
        assert!(matches!(
            screen.handle(&FunnelAction::Continue, &ctx),
            Err(FunnelError::ActionUnavailable { .. })
        ));
    }
}
