//! Session state carried across every funnel screen.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::step::Step;

/// Earned badges stay inline; a full traversal earns five.
pub type BadgeList = SmallVec<[String; 5]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlipperStyle {
    Religioso,
    Flores,
    Frases,
    Festas,
}

impl SlipperStyle {
    pub const ALL: [Self; 4] = [Self::Religioso, Self::Flores, Self::Frases, Self::Festas];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Religioso => "religioso",
            Self::Flores => "flores",
            Self::Frases => "frases",
            Self::Festas => "festas",
        }
    }
}

impl fmt::Display for SlipperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlipperStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "religioso" => Ok(Self::Religioso),
            "flores" => Ok(Self::Flores),
            "frases" => Ok(Self::Frases),
            "festas" => Ok(Self::Festas),
            _ => Err(()),
        }
    }
}

/// Monthly income amounts offered by the income roulette, in reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeAmount {
    #[serde(rename = "500")]
    Reais500,
    #[serde(rename = "1000")]
    Reais1000,
    #[serde(rename = "3000")]
    Reais3000,
}

impl IncomeAmount {
    #[must_use]
    pub const fn reais(self) -> u32 {
        match self {
            Self::Reais500 => 500,
            Self::Reais1000 => 1_000,
            Self::Reais3000 => 3_000,
        }
    }
}

impl fmt::Display for IncomeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R${}", self.reais())
    }
}

/// Accumulated progress for one traversal of the funnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub step: u8,
    pub user_name: String,
    pub chosen_income: Option<IncomeAmount>,
    pub chosen_income_reason: Option<String>,
    pub chosen_style: Option<SlipperStyle>,
    pub discount_attempt: u32,
    pub unlocked_bonus: Option<String>,
    pub points: u32,
    pub badges: BadgeList,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen bound to the current ordinal, with the entry fallback applied.
    #[must_use]
    pub fn current_step(&self) -> Step {
        Step::from_index(self.step)
    }

    /// Shallow merge: only the fields present in `patch` are overwritten.
    pub fn update(&mut self, patch: SessionPatch) {
        let SessionPatch {
            user_name,
            chosen_income,
            chosen_income_reason,
            chosen_style,
            discount_attempt,
            unlocked_bonus,
            points,
            badges,
        } = patch;
        if let Some(value) = user_name {
            self.user_name = value;
        }
        if let Some(value) = chosen_income {
            self.chosen_income = Some(value);
        }
        if let Some(value) = chosen_income_reason {
            self.chosen_income_reason = Some(value);
        }
        if let Some(value) = chosen_style {
            self.chosen_style = Some(value);
        }
        if let Some(value) = discount_attempt {
            self.discount_attempt = value;
        }
        if let Some(value) = unlocked_bonus {
            self.unlocked_bonus = Some(value);
        }
        if let Some(value) = points {
            self.points = value;
        }
        if let Some(value) = badges {
            self.badges = value;
        }
    }

    /// Badge list with one more label appended, for building a replacement patch.
    #[must_use]
    pub fn badges_with(&self, label: &str) -> BadgeList {
        let mut next = self.badges.clone();
        next.push(label.to_string());
        next
    }

    #[must_use]
    pub fn has_badge(&self, label: &str) -> bool {
        self.badges.iter().any(|b| b == label)
    }
}

/// Partial update issued by a screen controller.
///
/// `badges` replaces the whole list; callers pass the old list with the new
/// label appended.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionPatch {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub chosen_income: Option<IncomeAmount>,
    #[serde(default)]
    pub chosen_income_reason: Option<String>,
    #[serde(default)]
    pub chosen_style: Option<SlipperStyle>,
    #[serde(default)]
    pub discount_attempt: Option<u32>,
    #[serde(default)]
    pub unlocked_bonus: Option<String>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub badges: Option<BadgeList>,
}

impl SessionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn user_name(mut self, value: impl Into<String>) -> Self {
        self.user_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn income(mut self, amount: IncomeAmount, reason: impl Into<String>) -> Self {
        self.chosen_income = Some(amount);
        self.chosen_income_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub const fn style(mut self, style: SlipperStyle) -> Self {
        self.chosen_style = Some(style);
        self
    }

    #[must_use]
    pub const fn discount_attempt(mut self, value: u32) -> Self {
        self.discount_attempt = Some(value);
        self
    }

    #[must_use]
    pub fn unlocked_bonus(mut self, value: impl Into<String>) -> Self {
        self.unlocked_bonus = Some(value.into());
        self
    }

    #[must_use]
    pub const fn points(mut self, value: u32) -> Self {
        self.points = Some(value);
        self
    }

    #[must_use]
    pub fn badges(mut self, value: BadgeList) -> Self {
        self.badges = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn default_state_is_blank() {
        let state = SessionState::new();
        assert_eq!(state.step, 0);
        assert_eq!(state.current_step(), Step::Entry);
        assert!(state.user_name.is_empty());
        assert!(state.chosen_income.is_none());
        assert!(state.chosen_style.is_none());
        assert_eq!(state.discount_attempt, 0);
        assert_eq!(state.points, 0);
        assert!(state.badges.is_empty());
    }

    #[test]
    fn points_patch_leaves_badges_alone() {
        let mut state = SessionState {
            badges: smallvec!["A".to_string()],
            ..SessionState::default()
        };
        state.update(SessionPatch::default().points(5));
        assert_eq!(state.points, 5);
        assert_eq!(state.badges.as_slice(), ["A".to_string()]);
    }

    #[test]
    fn badges_are_replaced_wholesale() {
        let mut state = SessionState {
            badges: smallvec!["A".to_string()],
            ..SessionState::default()
        };
        let next = state.badges_with("A");
        state.update(SessionPatch::default().badges(next));
        assert_eq!(state.badges.len(), 2);
        assert!(state.badges.iter().all(|b| b == "A"));
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut state = SessionState {
            user_name: "Ana".into(),
            points: 15,
            ..SessionState::default()
        };
        let before = state.clone();
        let patch = SessionPatch::default();
        assert!(patch.is_empty());
        state.update(patch);
        assert_eq!(state, before);
    }

    #[test]
    fn income_patch_sets_pair() {
        let mut state = SessionState::default();
        state.update(SessionPatch::default().income(IncomeAmount::Reais1000, "reforma"));
        assert_eq!(state.chosen_income, Some(IncomeAmount::Reais1000));
        assert_eq!(state.chosen_income_reason.as_deref(), Some("reforma"));
    }

    #[test]
    fn style_parses_from_tag() {
        assert_eq!("flores".parse::<SlipperStyle>(), Ok(SlipperStyle::Flores));
        assert!("boho".parse::<SlipperStyle>().is_err());
        assert_eq!(SlipperStyle::Festas.to_string(), "festas");
    }

    #[test]
    fn income_serializes_as_amount_string() {
        let json = serde_json::to_string(&IncomeAmount::Reais3000).unwrap();
        assert_eq!(json, "\"3000\"");
        assert_eq!(IncomeAmount::Reais500.to_string(), "R$500");
    }
}
