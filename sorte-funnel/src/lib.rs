//! Sorte Funnel
//!
//! Platform-agnostic core of the Sorte Chinelista gamified sales funnel: a
//! linear twelve-step sequence of mini-games that accumulates points and
//! badges, then hands off to an external checkout. This crate carries no UI;
//! a presentation layer renders the read models and forwards user actions.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod funnel;
pub mod rewards;
pub mod rng;
pub mod scratch;
pub mod screens;
pub mod state;
pub mod step;
pub mod timer;

// Re-export commonly used types
pub use catalog::{
    BADGE_CATALOG, BONUS_OPTIONS, BadgeSpec, INCOME_OPTIONS, IncomeOption, STYLE_CARDS, StyleCard,
    preview_images, style_card,
};
pub use config::{BadgeDisplay, ConfigError, FunnelConfig};
pub use error::{DriveError, FunnelError};
pub use funnel::{ActionOutcome, FunnelSession};
pub use rewards::{
    DiscountTier, RewardEffects, open_discount_box, resolve_discount_tier, spin_bonus, spin_income,
};
pub use rng::{CountingRng, RngBundle};
pub use scratch::{ScratchConfig, ScratchPhase, ScratchSurface};
pub use screens::{
    BadgeCollectionView, BadgeEntry, FunnelAction, Handoff, OfferView, PreviewsView, ScreenEvent,
    UpsellDecision, bonus_label_or_fallback, collection_view, effective_style, normalize_user_name,
    offer_view, previews_view,
};
pub use state::{BadgeList, IncomeAmount, SessionPatch, SessionState, SlipperStyle};
pub use step::{Step, progress_percent};
pub use timer::{DeferredTask, TimerError};

use constants::LOG_TARGET;

/// Trait for abstracting where funnel configuration comes from
/// Platform-specific implementations should provide this
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the funnel configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or fails validation.
    fn load_funnel_config(&self) -> Result<FunnelConfig, Self::Error>;
}

/// Configuration compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledConfig;

impl ConfigSource for BundledConfig {
    type Error = ConfigError;

    fn load_funnel_config(&self) -> Result<FunnelConfig, Self::Error> {
        FunnelConfig::bundled()
    }
}

/// Configuration supplied as a JSON document by the host.
#[derive(Debug, Clone)]
pub struct JsonConfig(pub String);

impl ConfigSource for JsonConfig {
    type Error = ConfigError;

    fn load_funnel_config(&self) -> Result<FunnelConfig, Self::Error> {
        FunnelConfig::from_json(&self.0)
    }
}

/// Trait for the checkout hand-off
/// The host opens `url` outside the funnel; no session data travels with it.
pub trait Navigator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open an external location
    ///
    /// # Errors
    ///
    /// Returns an error if the host could not navigate.
    fn navigate(&mut self, url: &str) -> Result<(), Self::Error>;
}

/// Main funnel engine for creating and driving sessions
pub struct FunnelEngine<C, N>
where
    C: ConfigSource,
    N: Navigator,
{
    config_source: C,
    navigator: N,
}

impl<C, N> FunnelEngine<C, N>
where
    C: ConfigSource,
    N: Navigator,
{
    /// Create a new engine with the provided configuration source and navigator
    pub const fn new(config_source: C, navigator: N) -> Self {
        Self {
            config_source,
            navigator,
        }
    }

    /// Construct a fresh seeded session at the entry step.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn create_session(&self, seed: u64) -> Result<FunnelSession, C::Error> {
        let cfg = self.config_source.load_funnel_config()?;
        Ok(FunnelSession::new(cfg, seed))
    }

    /// Construct a session seeded from process entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn create_session_with_entropy(&self) -> Result<FunnelSession, C::Error> {
        let cfg = self.config_source.load_funnel_config()?;
        Ok(FunnelSession::with_entropy(cfg))
    }

    /// Dispatch an action and carry out any hand-off it requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not available or the navigator fails.
    pub fn drive(
        &mut self,
        session: &mut FunnelSession,
        action: &FunnelAction,
    ) -> Result<ActionOutcome, DriveError<N::Error>> {
        let outcome = session.dispatch(action)?;
        if let Some(Handoff::Navigate { url }) = &outcome.handoff {
            log::info!(target: LOG_TARGET, "handing off to checkout at {url}");
            self.navigator.navigate(url).map_err(DriveError::Navigation)?;
        }
        Ok(outcome)
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }
}
