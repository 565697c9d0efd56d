//! Name capture.
use super::{FunnelAction, ScreenCtx, ScreenOutput, unavailable};
use crate::error::FunnelError;
use crate::state::SessionPatch;
use crate::step::Step;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WelcomeScreen {
    draft: String,
}

/// Trimmed name, or the placeholder when nothing usable was typed.
#[must_use]
pub fn normalize_user_name(draft: &str, placeholder: &str) -> String {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

impl WelcomeScreen {
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// # Errors
    ///
    /// Offers `EditName` and `SubmitName`.
    pub fn handle(
        &mut self,
        action: &FunnelAction,
        ctx: &ScreenCtx<'_>,
    ) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::EditName { name } => {
                self.draft.clone_from(name);
                Ok(ScreenOutput::stay())
            }
            FunnelAction::SubmitName => {
                let name = normalize_user_name(&self.draft, &ctx.cfg.placeholder_name);
                Ok(ScreenOutput::advance().with_patch(SessionPatch::default().user_name(name)))
            }
            other => Err(unavailable(Step::Welcome, other)),
        }
    }
}
