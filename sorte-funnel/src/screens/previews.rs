//! Preview gallery for the chosen style.
use serde::Serialize;

use super::{FunnelAction, ScreenOutput, unavailable};
use crate::catalog::preview_images;
use crate::config::FunnelConfig;
use crate::error::FunnelError;
use crate::state::{SessionState, SlipperStyle};
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewsScreen;

impl PreviewsScreen {
    /// # Errors
    ///
    /// Offers only `Continue`.
    pub fn handle(&self, action: &FunnelAction) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::Continue => Ok(ScreenOutput::advance()),
            other => Err(unavailable(Step::Previews, other)),
        }
    }
}

/// Chosen style, or the configured default when the choice is missing.
#[must_use]
pub fn effective_style(state: &SessionState, cfg: &FunnelConfig) -> SlipperStyle {
    state.chosen_style.unwrap_or(cfg.default_style)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewsView {
    pub style: SlipperStyle,
    pub images: [&'static str; 4],
}

#[must_use]
pub fn previews_view(state: &SessionState, cfg: &FunnelConfig) -> PreviewsView {
    let style = effective_style(state, cfg);
    PreviewsView {
        style,
        images: *preview_images(style),
    }
}
