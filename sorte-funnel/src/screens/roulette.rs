//! Shared idle → spinning → resolved machine for both roulettes.
use serde::{Deserialize, Serialize};

use crate::error::FunnelError;
use crate::rewards::RewardEffects;
use crate::timer::DeferredTask;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinPhase<T> {
    Idle,
    Spinning { due_at_ms: u64 },
    Resolved(T),
}

#[derive(Debug, Clone)]
pub struct Roulette<T> {
    phase: SpinPhase<T>,
    task: DeferredTask,
    delay_ms: u64,
}

impl<T: Clone> Roulette<T> {
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            phase: SpinPhase::Idle,
            task: DeferredTask::new(),
            delay_ms,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &SpinPhase<T> {
        &self.phase
    }

    /// The trigger is offered only before the first spin.
    #[must_use]
    pub const fn can_spin(&self) -> bool {
        matches!(self.phase, SpinPhase::Idle)
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&T> {
        match &self.phase {
            SpinPhase::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// Start the spin. Returns when it will resolve, or `None` once already resolved.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::SpinPending`] while a spin is in flight.
    pub fn start(&mut self, now_ms: u64) -> Result<Option<u64>, FunnelError> {
        if matches!(self.phase, SpinPhase::Resolved(_)) {
            return Ok(None);
        }
        let due_at_ms = self.task.schedule(now_ms, self.delay_ms)?;
        self.phase = SpinPhase::Spinning { due_at_ms };
        Ok(Some(due_at_ms))
    }

    /// Resolve the spin once its delay has elapsed. `draw` runs at most once.
    pub fn poll(
        &mut self,
        now_ms: u64,
        draw: impl FnOnce() -> (T, RewardEffects),
    ) -> Option<(T, RewardEffects)> {
        if !self.task.poll(now_ms) {
            return None;
        }
        let (value, effects) = draw();
        self.phase = SpinPhase::Resolved(value.clone());
        Some((value, effects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_idle_spinning_resolved() {
        let mut roulette: Roulette<u8> = Roulette::new(100);
        assert!(roulette.can_spin());
        assert_eq!(roulette.start(10), Ok(Some(110)));
        assert_eq!(roulette.phase(), &SpinPhase::Spinning { due_at_ms: 110 });
        assert!(!roulette.can_spin());

        assert!(roulette.poll(50, || (1, RewardEffects::INCOME)).is_none());
        let (value, effects) = roulette.poll(110, || (7, RewardEffects::INCOME)).unwrap();
        assert_eq!(value, 7);
        assert_eq!(effects.points, 10);
        assert_eq!(roulette.outcome(), Some(&7));
    }

    #[test]
    fn double_start_is_rejected_while_spinning() {
        let mut roulette: Roulette<u8> = Roulette::new(100);
        roulette.start(0).unwrap();
        assert!(matches!(
            roulette.start(1),
            Err(FunnelError::SpinPending(_))
        ));
    }

    #[test]
    fn draw_runs_exactly_once() {
        let mut roulette: Roulette<u8> = Roulette::new(5);
        roulette.start(0).unwrap();
        let mut calls = 0;
        for now in 0..20 {
            if roulette
                .poll(now, || {
                    calls += 1;
                    (1, RewardEffects::BONUS)
                })
                .is_some()
            {
                assert_eq!(now, 5);
            }
        }
        assert_eq!(calls, 1);
        assert_eq!(roulette.start(30), Ok(None));
    }
}
