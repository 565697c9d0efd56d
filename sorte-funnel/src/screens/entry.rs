//! Landing screen: a single call to action.
use super::{FunnelAction, ScreenOutput, unavailable};
use crate::error::FunnelError;
use crate::step::Step;

#[derive(Debug, Clone, Copy, Default)]
pub struct EntryScreen;

impl EntryScreen {
    /// # Errors
    ///
    /// Only `Continue` is offered.
    pub fn handle(&self, action: &FunnelAction) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::Continue => Ok(ScreenOutput::advance()),
            other => Err(unavailable(Step::Entry, other)),
        }
    }
}
