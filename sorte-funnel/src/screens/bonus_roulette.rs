//! Bonus roulette: one spin, uniform over the four bonus labels.
use super::roulette::Roulette;
use super::{FunnelAction, ScreenCtx, ScreenEvent, ScreenOutput, unavailable};
use crate::constants::LOG_TARGET;
use crate::error::FunnelError;
use crate::rewards::spin_bonus;
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct BonusRouletteScreen {
    roulette: Roulette<&'static str>,
}

impl BonusRouletteScreen {
    #[must_use]
    pub const fn new(spin_ms: u64) -> Self {
        Self {
            roulette: Roulette::new(spin_ms),
        }
    }

    #[must_use]
    pub const fn roulette(&self) -> &Roulette<&'static str> {
        &self.roulette
    }

    /// # Errors
    ///
    /// `Spin` while idle, `Continue` once resolved. A session resumed with the
    /// reward already recorded starts out resolved.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        let claimed = ctx.state.unlocked_bonus.is_some();
        match action {
            FunnelAction::Spin { .. } if claimed => Err(unavailable(Step::BonusRoulette, action)),
            FunnelAction::Spin { now_ms } => match self.roulette.start(*now_ms)? {
                Some(due_at_ms) => {
                    Ok(ScreenOutput::stay().with_event(ScreenEvent::SpinStarted { due_at_ms }))
                }
                None => Err(unavailable(Step::BonusRoulette, action)),
            },
            FunnelAction::Continue if claimed || self.roulette.outcome().is_some() => {
                Ok(ScreenOutput::advance())
            }
            other => Err(unavailable(Step::BonusRoulette, other)),
        }
    }

    pub fn tick(&mut self, now_ms: u64, ctx: &mut ScreenCtx<'_>) -> Option<ScreenOutput> {
        let rng = &mut *ctx.rng;
        let (label, effects) = self.roulette.poll(now_ms, || spin_bonus(rng.bonus()))?;
        log::debug!(target: LOG_TARGET, "bonus roulette resolved to {label:?}");
        let patch = effects.apply_to(SessionPatch::default().unlocked_bonus(label), ctx.state);
        Some(
            ScreenOutput::stay()
                .with_patch(patch)
                .with_event(ScreenEvent::BonusResolved {
                    label: label.to_string(),
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BONUS_OPTIONS;
    use crate::config::FunnelConfig;
    use crate::constants::BADGE_BONUS;
    use crate::rng::RngBundle;
    use crate::state::SessionState;

    #[test]
    fn resolution_sets_bonus_points_and_badge() {
        let state = SessionState {
            points: 25,
            ..SessionState::default()
        };
        let cfg = FunnelConfig::default();
        let mut rng = RngBundle::from_user_seed(11);
        let mut ctx = ScreenCtx {
            state: &state,
            cfg: &cfg,
            rng: &mut rng,
        };
        let mut screen = BonusRouletteScreen::new(2_000);
        screen
            .handle(&FunnelAction::Spin { now_ms: 500 }, &ctx)
            .unwrap();
        assert!(matches!(
            screen.handle(&FunnelAction::Spin { now_ms: 600 }, &ctx),
            Err(FunnelError::SpinPending(_))
        ));

        let out = screen.tick(2_500, &mut ctx).unwrap();
        let bonus = out.patch.unlocked_bonus.clone().unwrap();
        assert!(BONUS_OPTIONS.contains(&bonus.as_str()));
        assert_eq!(out.patch.points, Some(40));
        assert_eq!(
            out.patch.badges.unwrap().last().map(String::as_str),
            Some(BADGE_BONUS)
        );
        assert_eq!(screen.roulette().outcome().copied(), Some(bonus.as_str()));
    }

    #[test]
    fn recorded_bonus_blocks_a_second_spin() {
        let state = SessionState {
            unlocked_bonus: Some(BONUS_OPTIONS[0].to_string()),
            points: 40,
            ..SessionState::default()
        };
        let cfg = FunnelConfig::default();
        let mut rng = RngBundle::from_user_seed(11);
        let mut ctx = ScreenCtx {
            state: &state,
            cfg: &cfg,
            rng: &mut rng,
        };
        let mut screen = BonusRouletteScreen::new(2_000);

        assert!(matches!(
            screen.handle(&FunnelAction::Spin { now_ms: 0 }, &ctx),
            Err(FunnelError::ActionUnavailable {
                step: Step::BonusRoulette,
                ..
            })
        ));
        assert!(screen.tick(5_000, &mut ctx).is_none());
        assert!(screen.handle(&FunnelAction::Continue, &ctx).unwrap().advance);
    }
}
