//! Badge collection summary.
use serde::Serialize;

use super::{FunnelAction, ScreenOutput, unavailable};
use crate::catalog::BADGE_CATALOG;
use crate::config::{BadgeDisplay, FunnelConfig};
use crate::constants::COLLECTION_MULTIPLIER;
use crate::error::FunnelError;
use crate::state::SessionState;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeCollectionScreen;

impl BadgeCollectionScreen {
    /// # Errors
    ///
    /// Offers only `Continue`.
    pub fn handle(&self, action: &FunnelAction) -> Result<ScreenOutput, FunnelError> {
        match action {
            FunnelAction::Continue => Ok(ScreenOutput::advance()),
            other => Err(unavailable(Step::BadgeCollection, other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeEntry {
    pub label: &'static str,
    pub level: u8,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeCollectionView {
    pub user_name: String,
    pub points: u32,
    pub entries: Vec<BadgeEntry>,
    pub multiplier: f32,
}

#[must_use]
pub fn collection_view(state: &SessionState, cfg: &FunnelConfig) -> BadgeCollectionView {
    let entries = BADGE_CATALOG
        .iter()
        .map(|badge| BadgeEntry {
            label: badge.label,
            level: badge.level,
            earned: state.has_badge(badge.label),
        })
        .filter(|entry| match cfg.badge_display {
            BadgeDisplay::FullCatalog => true,
            BadgeDisplay::EarnedOnly => entry.earned,
        })
        .collect();
    BadgeCollectionView {
        user_name: state.user_name.clone(),
        points: state.points,
        entries,
        multiplier: COLLECTION_MULTIPLIER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BADGE_INCOME, BADGE_SCRATCH, BADGE_TREASURE};
    use smallvec::smallvec;

    fn partial_state() -> SessionState {
        SessionState {
            user_name: "Bia".into(),
            points: 20,
            badges: smallvec![
                BADGE_INCOME.to_string(),
                BADGE_TREASURE.to_string(),
                BADGE_SCRATCH.to_string()
            ],
            ..SessionState::default()
        }
    }

    #[test]
    fn full_catalog_lists_every_badge_with_flags() {
        let view = collection_view(&partial_state(), &FunnelConfig::default());
        assert_eq!(view.entries.len(), 4);
        let earned: Vec<bool> = view.entries.iter().map(|e| e.earned).collect();
        assert_eq!(earned, vec![true, false, true, false]);
        assert!((view.multiplier - 1.5).abs() < f32::EPSILON);
        assert_eq!(view.user_name, "Bia");
    }

    #[test]
    fn earned_only_filters_unearned() {
        let cfg = FunnelConfig {
            badge_display: BadgeDisplay::EarnedOnly,
            ..FunnelConfig::default()
        };
        let view = collection_view(&partial_state(), &cfg);
        let labels: Vec<&str> = view.entries.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![BADGE_INCOME, BADGE_TREASURE]);
    }
}
