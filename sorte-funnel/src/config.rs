//! Funnel configuration: fallbacks, spin timings, scratch surface, checkout target.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    DEFAULT_BONUS_SPIN_MS, DEFAULT_BRUSH_RADIUS, DEFAULT_CHECKOUT_URL, DEFAULT_FALLBACK_BONUS,
    DEFAULT_INCOME_SPIN_MS, DEFAULT_PLACEHOLDER_NAME, DEFAULT_REVEAL_THRESHOLD,
    DEFAULT_SCRATCH_HEIGHT, DEFAULT_SCRATCH_WIDTH,
};
use crate::scratch::ScratchConfig;
use crate::state::SlipperStyle;

const DEFAULT_FUNNEL_DATA: &str = include_str!("../assets/funnel.json");

/// Which badges the collection screen lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeDisplay {
    /// Every catalog badge, earned or not.
    #[default]
    FullCatalog,
    EarnedOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelConfig {
    pub placeholder_name: String,
    pub default_style: SlipperStyle,
    pub income_spin_ms: u64,
    pub bonus_spin_ms: u64,
    pub scratch: ScratchConfig,
    pub checkout_url: String,
    pub fallback_bonus: String,
    #[serde(default)]
    pub badge_display: BadgeDisplay,
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("funnel config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("scratch surface must have non-zero size (got {width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("reveal threshold must be strictly between 0 and 1 (got {value:.3})")]
    ThresholdRange { value: f32 },
    #[error("checkout url must be an absolute https url (got {url:?})")]
    CheckoutUrl { url: String },
}

fn checkout_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https://[^\s/]+(/\S*)?$").expect("static pattern"))
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self::from_json(DEFAULT_FUNNEL_DATA).unwrap_or_else(|_| Self::builtin())
    }
}

impl FunnelConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse the configuration bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset fails validation.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_FUNNEL_DATA)
    }

    /// Values compiled into the crate, used when the bundled asset is unusable.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
            default_style: SlipperStyle::Flores,
            income_spin_ms: DEFAULT_INCOME_SPIN_MS,
            bonus_spin_ms: DEFAULT_BONUS_SPIN_MS,
            scratch: ScratchConfig {
                width: DEFAULT_SCRATCH_WIDTH,
                height: DEFAULT_SCRATCH_HEIGHT,
                brush_radius: DEFAULT_BRUSH_RADIUS,
                reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            },
            checkout_url: DEFAULT_CHECKOUT_URL.to_string(),
            fallback_bonus: DEFAULT_FALLBACK_BONUS.to_string(),
            badge_display: BadgeDisplay::FullCatalog,
        }
    }

    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "placeholder_name",
            });
        }
        if self.fallback_bonus.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "fallback_bonus",
            });
        }
        if self.scratch.width == 0 || self.scratch.height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.scratch.width,
                height: self.scratch.height,
            });
        }
        let threshold = self.scratch.reveal_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::ThresholdRange { value: threshold });
        }
        if !checkout_url_pattern().is_match(&self.checkout_url) {
            return Err(ConfigError::CheckoutUrl {
                url: self.checkout_url.clone(),
            });
        }
        Ok(())
    }
}
