//! Errors for callers that drive the funnel incorrectly.
//!
//! These are never shown to the person going through the funnel. Missing
//! data is handled with fallbacks; an error here means the presentation layer
//! offered an action the current screen does not have.
use thiserror::Error;

use crate::step::Step;
use crate::timer::TimerError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunnelError {
    #[error("action `{action}` is not available on step {step}")]
    ActionUnavailable { step: Step, action: &'static str },
    #[error("choice {index} is outside 1..={max}")]
    ChoiceOutOfRange { index: u8, max: u8 },
    #[error("unknown slipper style tag {0:?}")]
    UnknownStyle(String),
    #[error("spin already in progress")]
    SpinPending(#[from] TimerError),
}

/// Failure while the engine forwards an action, including the checkout hand-off.
#[derive(Debug, Error)]
pub enum DriveError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Funnel(#[from] FunnelError),
    #[error("checkout hand-off failed")]
    Navigation(#[source] E),
}
