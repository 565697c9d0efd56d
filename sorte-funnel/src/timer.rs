//! Deferred resolution for the roulette "spin" delay.
//!
//! Time is supplied by the caller as milliseconds on any monotonic clock, so
//! the task never blocks and tests drive it without sleeping.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("a deferred task is already pending (due at {due_at_ms} ms)")]
    AlreadyPending { due_at_ms: u64 },
}

/// Single-shot deferred task guarded by a pending flag.
///
/// `poll` reports completion exactly once, at or after the due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeferredTask {
    due_at_ms: Option<u64>,
}

impl DeferredTask {
    #[must_use]
    pub const fn new() -> Self {
        Self { due_at_ms: None }
    }

    /// Schedule the task `delay_ms` after `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::AlreadyPending`] while a previous schedule has not fired.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> Result<u64, TimerError> {
        if let Some(due_at_ms) = self.due_at_ms {
            return Err(TimerError::AlreadyPending { due_at_ms });
        }
        let due = now_ms.saturating_add(delay_ms);
        self.due_at_ms = Some(due);
        Ok(due)
    }

    /// Returns `true` once when the due time has been reached, clearing the pending flag.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.due_at_ms {
            Some(due) if now_ms >= due => {
                self.due_at_ms = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.due_at_ms.is_some()
    }

    #[must_use]
    pub const fn due_at(&self) -> Option<u64> {
        self.due_at_ms
    }
}
