//! Income roulette: one spin, uniform over the three income outcomes.
use super::roulette::Roulette;
use super::{FunnelAction, ScreenCtx, ScreenEvent, ScreenOutput, unavailable};
use crate::catalog::IncomeOption;
use crate::constants::LOG_TARGET;
use crate::error::FunnelError;
use crate::rewards::spin_income;
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct IncomeRouletteScreen {
    roulette: Roulette<IncomeOption>,
}

impl IncomeRouletteScreen {
    #[must_use]
    pub const fn new(spin_ms: u64) -> Self {
        Self {
            roulette: Roulette::new(spin_ms),
        }
    }

    #[must_use]
    pub const fn roulette(&self) -> &Roulette<IncomeOption> {
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
        let claimed = ctx.state.chosen_income.is_some();
        match action {
            FunnelAction::Spin { .. } if claimed => Err(unavailable(Step::IncomeRoulette, action)),
            FunnelAction::Spin { now_ms } => match self.roulette.start(*now_ms)? {
                Some(due_at_ms) => {
                    Ok(ScreenOutput::stay().with_event(ScreenEvent::SpinStarted { due_at_ms }))
                }
                None => Err(unavailable(Step::IncomeRoulette, action)),
            },
            FunnelAction::Continue if claimed || self.roulette.outcome().is_some() => {
                Ok(ScreenOutput::advance())
            }
            other => Err(unavailable(Step::IncomeRoulette, other)),
        }
    }

    pub fn tick(&mut self, now_ms: u64, ctx: &mut ScreenCtx<'_>) -> Option<ScreenOutput> {
        let rng = &mut *ctx.rng;
        let (option, effects) = self.roulette.poll(now_ms, || spin_income(rng.income()))?;
        log::debug!(target: LOG_TARGET, "income roulette resolved to {}", option.amount);
        let patch = effects.apply_to(
            SessionPatch::default().income(option.amount, option.reason),
            ctx.state,
        );
        Some(
            ScreenOutput::stay()
                .with_patch(patch)
                .with_event(ScreenEvent::IncomeResolved {
                    amount: option.amount,
                    reason: option.reason.to_string(),
                }),
        )
    }
}
