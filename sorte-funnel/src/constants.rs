//! Centralized reward and pacing constants for the funnel.
//!
//! Point awards and badge labels are fixed game rules; only presentation
//! fallbacks and timings live in `FunnelConfig`.

// Point awards ---------------------------------------------------------------
pub const INCOME_ROULETTE_POINTS: u32 = 10;
pub const STYLE_SELECTION_POINTS: u32 = 5;
pub const TREASURE_CHEST_POINTS: u32 = 10;
pub const BONUS_ROULETTE_POINTS: u32 = 15;

// Badge labels ---------------------------------------------------------------
pub const BADGE_INCOME: &str = "Sonhadora Financeira";
pub const BADGE_STYLE: &str = "Estilista Personalizada";
pub const BADGE_TREASURE: &str = "Tesoureira da Sorte";
pub const BADGE_BONUS: &str = "Riscadora Mestra";
pub const BADGE_SCRATCH: &str = "Guerreira Sortuda";

// Discount tiers -------------------------------------------------------------
pub const DISCOUNT_FIRST_PCT: u8 = 40;
pub const DISCOUNT_RETRY_PCT: u8 = 70;
/// Surprise boxes and treasure chests are numbered `1..=CHOICE_SLOTS`.
pub const CHOICE_SLOTS: u8 = 3;

// Timings and fallbacks (defaults for `FunnelConfig`) ------------------------
pub const DEFAULT_INCOME_SPIN_MS: u64 = 2_500;
pub const DEFAULT_BONUS_SPIN_MS: u64 = 2_000;
pub const DEFAULT_PLACEHOLDER_NAME: &str = "Guerreira";
pub const DEFAULT_FALLBACK_BONUS: &str = "Acesso VIP";
pub const DEFAULT_CHECKOUT_URL: &str =
    "https://www.ggcheckout.com/checkout/v5/JxOcEhc57Ay25W2RUUuu";
pub const DEFAULT_SCRATCH_WIDTH: u32 = 320;
pub const DEFAULT_SCRATCH_HEIGHT: u32 = 192;
pub const DEFAULT_BRUSH_RADIUS: u32 = 25;
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.5;

// Offer ----------------------------------------------------------------------
pub const OFFER_LIST_PRICE_CENTS: u32 = 9_967;
pub const OFFER_PRICE_CENTS: u32 = 2_990;
pub const UPSELL_PRICE_CENTS: u32 = 1_990;
pub const COLLECTION_MULTIPLIER: f32 = 1.5;

// Logging targets ------------------------------------------------------------
pub(crate) const LOG_TARGET: &str = "sorte_funnel";
