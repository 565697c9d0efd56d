//! Headless walk through the funnel with a simulated clock and a seeded user.
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sorte_funnel::screens::{DiscountBoxPhase, ScreenState};
use sorte_funnel::{
    FunnelAction, FunnelConfig, FunnelError, FunnelSession, Handoff, SessionState, SlipperStyle,
    Step, UpsellDecision,
};
use thiserror::Error;

const USER_STREAM_SALT: u64 = 0x5EED_C0DE;
const NAME_DRAFTS: [&str; 5] = ["Ana", "  Bia ", "Carla", "", "Dona Lourdes"];
const MAX_ACTIONS: usize = 4_096;
const SWEEP_STEP: usize = 16;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{action} rejected on {step}")]
    Rejected {
        step: Step,
        action: &'static str,
        #[source]
        source: FunnelError,
    },
    #[error("spin on {step} did not resolve by {now_ms} ms")]
    SpinStalled { step: Step, now_ms: u64 },
    #[error("scratch card never revealed after a full sweep")]
    ScratchStalled,
    #[error("gave up after {limit} actions on {step}")]
    TooManyActions { step: Step, limit: usize },
}

/// Everything a scenario may want to check after a walk.
#[derive(Debug, Clone)]
pub struct WalkSummary {
    pub seed: u64,
    pub state: SessionState,
    pub visited: Vec<Step>,
    pub actions: usize,
    pub checkout_url: Option<String>,
    pub upsell: Option<UpsellDecision>,
    pub discount_percents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct FunnelWalker {
    cfg: FunnelConfig,
    verbose: bool,
}

struct Walk {
    session: FunnelSession,
    user: ChaCha20Rng,
    now_ms: u64,
    actions: usize,
    checkout_url: Option<String>,
    upsell: Option<UpsellDecision>,
    discount_percents: Vec<u8>,
    verbose: bool,
}

impl FunnelWalker {
    #[must_use]
    pub const fn new(cfg: FunnelConfig, verbose: bool) -> Self {
        Self { cfg, verbose }
    }

    #[must_use]
    pub const fn config(&self) -> &FunnelConfig {
        &self.cfg
    }

    /// Walk from the entry screen until `target` is showing. Reaching the
    /// terminal step also records an up-sell decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the funnel rejects an action the walker believed
    /// was offered, or a timed mechanic never resolves.
    pub fn walk(&self, seed: u64, target: Step) -> Result<WalkSummary, WalkError> {
        let mut walk = Walk {
            session: FunnelSession::new(self.cfg.clone(), seed),
            user: ChaCha20Rng::seed_from_u64(seed ^ USER_STREAM_SALT),
            now_ms: 0,
            actions: 0,
            checkout_url: None,
            upsell: None,
            discount_percents: Vec::new(),
            verbose: self.verbose,
        };
        while walk.session.current_step() < target {
            walk.play_step(&self.cfg)?;
        }
        if target.is_terminal() {
            let decision = if walk.user.gen_bool(0.5) {
                UpsellDecision::Accept
            } else {
                UpsellDecision::Decline
            };
            walk.act(FunnelAction::Upsell { decision })?;
            walk.upsell = Some(decision);
        }
        let Walk {
            session,
            actions,
            checkout_url,
            upsell,
            discount_percents,
            ..
        } = walk;
        Ok(WalkSummary {
            seed,
            visited: session.visited().to_vec(),
            state: session.into_state(),
            actions,
            checkout_url,
            upsell,
            discount_percents,
        })
    }
}

impl Walk {
    fn act(&mut self, action: FunnelAction) -> Result<sorte_funnel::ActionOutcome, WalkError> {
        let step = self.session.current_step();
        self.actions += 1;
        if self.actions > MAX_ACTIONS {
            return Err(WalkError::TooManyActions {
                step,
                limit: MAX_ACTIONS,
            });
        }
        let outcome = self
            .session
            .dispatch(&action)
            .map_err(|source| WalkError::Rejected {
                step,
                action: action.name(),
                source,
            })?;
        if self.verbose && outcome.advanced {
            println!("    {} -> {}", outcome.step_before, outcome.step_after);
        }
        if let Some(Handoff::Navigate { url }) = &outcome.handoff {
            self.checkout_url = Some(url.clone());
        }
        if let Some(sorte_funnel::ScreenEvent::DiscountRevealed { percent, .. }) = &outcome.event {
            self.discount_percents.push(*percent);
        }
        Ok(outcome)
    }

    fn spin(&mut self, delay_ms: u64) -> Result<(), WalkError> {
        let step = self.session.current_step();
        self.act(FunnelAction::Spin {
            now_ms: self.now_ms,
        })?;
        self.now_ms += delay_ms / 2;
        if self.session.tick(self.now_ms).is_some() {
            return Err(WalkError::SpinStalled {
                step,
                now_ms: self.now_ms,
            });
        }
        self.now_ms += delay_ms - delay_ms / 2;
        if self.session.tick(self.now_ms).is_none() {
            return Err(WalkError::SpinStalled {
                step,
                now_ms: self.now_ms,
            });
        }
        self.act(FunnelAction::Continue)?;
        Ok(())
    }

    fn scratch(&mut self, cfg: &FunnelConfig) -> Result<(), WalkError> {
        let mut points: Vec<(u32, u32)> = (0..=cfg.scratch.height)
            .step_by(SWEEP_STEP)
            .flat_map(|y| {
                (0..=cfg.scratch.width)
                    .step_by(SWEEP_STEP)
                    .map(move |x| (x, y))
            })
            .collect();
        points.shuffle(&mut self.user);

        self.act(FunnelAction::PointerDown)?;
        let mut revealed = false;
        for (x, y) in points {
            #[allow(clippy::cast_precision_loss)]
            let outcome = self.act(FunnelAction::PointerMove {
                x: x as f32,
                y: y as f32,
            })?;
            if outcome.event == Some(sorte_funnel::ScreenEvent::ScratchRevealed) {
                revealed = true;
                break;
            }
        }
        self.act(FunnelAction::PointerUp)?;
        if !revealed {
            return Err(WalkError::ScratchStalled);
        }
        self.act(FunnelAction::ClaimScratch)?;
        Ok(())
    }

    fn discount(&mut self) -> Result<(), WalkError> {
        loop {
            let (phase, boxes) = match self.session.screen() {
                ScreenState::DiscountBox(screen) => (screen.phase(), screen.available_boxes()),
                _ => return Ok(()),
            };
            match phase {
                DiscountBoxPhase::Choosing { .. } => {
                    let index = boxes.choose(&mut self.user).copied().unwrap_or(1);
                    self.act(FunnelAction::ChooseBox { index })?;
                }
                DiscountBoxPhase::Revealed { .. } => {
                    self.act(FunnelAction::RetryDiscount)?;
                }
            }
        }
    }

    fn play_step(&mut self, cfg: &FunnelConfig) -> Result<(), WalkError> {
        match self.session.current_step() {
            Step::Entry | Step::BadgeCollection | Step::Previews => {
                self.act(FunnelAction::Continue)?;
            }
            Step::Welcome => {
                let draft = NAME_DRAFTS
                    .choose(&mut self.user)
                    .copied()
                    .unwrap_or_default();
                self.act(FunnelAction::EditName {
                    name: draft.to_string(),
                })?;
                self.act(FunnelAction::SubmitName)?;
            }
            Step::IncomeRoulette => self.spin(cfg.income_spin_ms)?,
            Step::StyleSelection => {
                let style = SlipperStyle::ALL
                    .choose(&mut self.user)
                    .copied()
                    .unwrap_or(cfg.default_style);
                self.act(FunnelAction::ChooseStyle { style })?;
            }
            Step::TreasureChest => {
                let chest = self.user.gen_range(1..=3);
                self.act(FunnelAction::OpenChest { chest })?;
                self.act(FunnelAction::Continue)?;
            }
            Step::DiscountBox => self.discount()?,
            Step::BonusRoulette => self.spin(cfg.bonus_spin_ms)?,
            Step::ScratchCard => self.scratch(cfg)?,
            Step::FinalOffer => {
                self.act(FunnelAction::Checkout)?;
                self.act(FunnelAction::ConfirmPurchase)?;
            }
            Step::PostPurchase => {}
        }
        Ok(())
    }
}
