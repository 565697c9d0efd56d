//! Session owner: holds the state, the showing screen, and the random streams.
//!
//! Every mutation of [`SessionState`] goes through [`FunnelSession`]: screen
//! controllers return patches and advance requests, the session merges them
//! and moves the ordinal forward by exactly one.
use serde::Serialize;

use crate::config::FunnelConfig;
use crate::constants::LOG_TARGET;
use crate::error::FunnelError;
use crate::rng::RngBundle;
use crate::screens::{FunnelAction, Handoff, ScreenCtx, ScreenEvent, ScreenOutput, ScreenState};
use crate::state::SessionState;
use crate::step::{self, Step};

/// What happened in response to one action or tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub step_before: Step,
    pub step_after: Step,
    pub advanced: bool,
    pub event: Option<ScreenEvent>,
    pub handoff: Option<Handoff>,
}

#[derive(Debug, Clone)]
pub struct FunnelSession {
    state: SessionState,
    cfg: FunnelConfig,
    rng: RngBundle,
    screen: ScreenState,
    visited: Vec<Step>,
}

impl FunnelSession {
    /// Fresh session at the entry step.
    #[must_use]
    pub fn new(cfg: FunnelConfig, seed: u64) -> Self {
        Self::from_state(SessionState::new(), cfg, seed)
    }

    #[must_use]
    pub fn with_entropy(cfg: FunnelConfig) -> Self {
        let rng = RngBundle::from_entropy();
        Self::assemble(SessionState::new(), cfg, rng)
    }

    /// Resume from a stored state. Out-of-range ordinals show the entry screen.
    #[must_use]
    pub fn from_state(state: SessionState, cfg: FunnelConfig, seed: u64) -> Self {
        Self::assemble(state, cfg, RngBundle::from_user_seed(seed))
    }

    fn assemble(state: SessionState, cfg: FunnelConfig, rng: RngBundle) -> Self {
        let step = state.current_step();
        let screen = ScreenState::for_step(step, &cfg);
        Self {
            state,
            cfg,
            rng,
            screen,
            visited: vec![step],
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &FunnelConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub const fn current_step(&self) -> Step {
        self.screen.step()
    }

    #[must_use]
    pub const fn screen(&self) -> &ScreenState {
        &self.screen
    }

    /// Steps shown so far, in order, starting with the one the session opened on.
    #[must_use]
    pub fn visited(&self) -> &[Step] {
        &self.visited
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Forward a user action to the showing screen.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError`] when the screen does not offer the action; the
    /// session is left untouched in that case.
    pub fn dispatch(&mut self, action: &FunnelAction) -> Result<ActionOutcome, FunnelError> {
        let mut ctx = ScreenCtx {
            state: &self.state,
            cfg: &self.cfg,
            rng: &mut self.rng,
        };
        let output = self.screen.handle(action, &mut ctx)?;
        Ok(self.apply(output))
    }

    /// Advance the caller's clock. Returns an outcome when a pending spin resolved.
    pub fn tick(&mut self, now_ms: u64) -> Option<ActionOutcome> {
        let mut ctx = ScreenCtx {
            state: &self.state,
            cfg: &self.cfg,
            rng: &mut self.rng,
        };
        let output = self.screen.tick(now_ms, &mut ctx)?;
        Some(self.apply(output))
    }

    fn apply(&mut self, output: ScreenOutput) -> ActionOutcome {
        let ScreenOutput {
            patch,
            advance,
            event,
            handoff,
        } = output;
        let step_before = self.current_step();
        if !patch.is_empty() {
            self.state.update(patch);
        }
        let advanced = advance && self.advance();
        ActionOutcome {
            step_before,
            step_after: self.current_step(),
            advanced,
            event,
            handoff,
        }
    }

    /// Move to the next ordinal and mount its screen. Ignored at the terminal step.
    ///
    /// The stored ordinal always grows by one, even when it is out of range and
    /// the entry screen is showing in its place.
    fn advance(&mut self) -> bool {
        let current = self.current_step();
        if current.is_terminal() {
            log::warn!(target: LOG_TARGET, "advance requested at terminal step {current}; ignored");
            return false;
        }
        let from = self.state.step;
        self.state.step = step::advance(from);
        let next = self.state.current_step();
        log::debug!(target: LOG_TARGET, "step {from} -> {} ({next})", self.state.step);
        self.screen = ScreenState::for_step(next, &self.cfg);
        self.visited.push(next);
        true
    }
}
