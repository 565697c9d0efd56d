//! Named QA scenarios. Each check runs once per iteration seed.
use anyhow::{Context, Result, ensure};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use sorte_funnel::constants::{
    BADGE_BONUS, BADGE_INCOME, BADGE_SCRATCH, BADGE_STYLE, BADGE_TREASURE,
};
use sorte_funnel::{
    BONUS_OPTIONS, DiscountTier, FunnelAction, FunnelSession, INCOME_OPTIONS, RngBundle,
    ScratchConfig, ScratchPhase, ScratchSurface, ScreenEvent, SessionState, Step, offer_view,
    previews_view, spin_bonus, spin_income,
};
use std::collections::HashMap;

use super::walker::FunnelWalker;

pub const DISTRIBUTION_DRAWS: usize = 10_000;
pub const DISTRIBUTION_TOLERANCE: f64 = 0.03;
const DISCOUNT_TRIALS: usize = 100;

pub type ScenarioCheck = fn(&FunnelWalker, u64) -> Result<()>;

#[derive(Clone, Copy)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: ScenarioCheck,
}

impl std::fmt::Debug for TestScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestScenario")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const SCENARIOS: [TestScenario; 7] = [
    TestScenario {
        name: "smoke",
        description: "Walk from entry to the final offer",
        check: smoke,
    },
    TestScenario {
        name: "full-funnel",
        description: "Walk to post purchase; 40 points, 5 badges, monotone steps",
        check: full_funnel,
    },
    TestScenario {
        name: "income-distribution",
        description: "Income roulette outcomes are uniform over 3 options",
        check: income_distribution,
    },
    TestScenario {
        name: "bonus-distribution",
        description: "Bonus roulette labels are uniform over 4 options",
        check: bonus_distribution,
    },
    TestScenario {
        name: "discount-determinism",
        description: "Discount tier depends only on the attempt count",
        check: discount_determinism,
    },
    TestScenario {
        name: "scratch-threshold",
        description: "Exactly half erased stays hidden; one more pixel reveals",
        check: scratch_threshold,
    },
    TestScenario {
        name: "fallbacks",
        description: "Placeholder name, default style, and fallback bonus",
        check: fallbacks,
    },
];

pub const SCENARIO_NAMES: [&str; 7] = [
    SCENARIOS[0].name,
    SCENARIOS[1].name,
    SCENARIOS[2].name,
    SCENARIOS[3].name,
    SCENARIOS[4].name,
    SCENARIOS[5].name,
    SCENARIOS[6].name,
];

#[must_use]
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    SCENARIOS.iter().find(|s| s.name == name).copied()
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.name, s.description)).collect()
}

fn smoke(walker: &FunnelWalker, seed: u64) -> Result<()> {
    let summary = walker.walk(seed, Step::FinalOffer)?;
    ensure!(
        summary.state.current_step() == Step::FinalOffer,
        "stopped on {} instead of the final offer",
        summary.state.current_step()
    );
    let view = offer_view(&summary.state, walker.config());
    ensure!(!view.user_name.is_empty(), "offer shows an empty name");
    ensure!(
        BONUS_OPTIONS.contains(&view.bonus_label.as_str()),
        "offer shows unexpected bonus {:?}",
        view.bonus_label
    );
    Ok(())
}

fn full_funnel(walker: &FunnelWalker, seed: u64) -> Result<()> {
    let summary = walker.walk(seed, Step::PostPurchase)?;
    let state = &summary.state;
    ensure!(
        state.points == 40,
        "seed {} after {} actions: expected 40 points, got {}",
        summary.seed,
        summary.actions,
        state.points
    );
    let expected = [
        BADGE_INCOME,
        BADGE_STYLE,
        BADGE_TREASURE,
        BADGE_BONUS,
        BADGE_SCRATCH,
    ];
    ensure!(
        state.badges.iter().map(String::as_str).eq(expected),
        "unexpected badges {:?}",
        state.badges
    );
    ensure!(
        summary
            .visited
            .windows(2)
            .all(|pair| pair[1].index() == pair[0].index() + 1),
        "steps were not visited one at a time: {:?}",
        summary.visited
    );
    ensure!(
        summary.checkout_url.as_deref() == Some(walker.config().checkout_url.as_str()),
        "checkout handed off to {:?}",
        summary.checkout_url
    );
    ensure!(
        summary.discount_percents == [40, 70],
        "discount reveals were {:?}",
        summary.discount_percents
    );
    ensure!(summary.upsell.is_some(), "no up-sell decision recorded");
    let income = state.chosen_income.context("income never chosen")?;
    let reason = state.chosen_income_reason.as_deref().unwrap_or_default();
    ensure!(
        INCOME_OPTIONS
            .iter()
            .any(|option| option.amount == income && option.reason == reason),
        "income {income} paired with reason {reason:?}"
    );
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn check_uniform<K: std::fmt::Debug>(counts: &HashMap<K, usize>, buckets: usize) -> Result<()> {
    ensure!(
        counts.len() == buckets,
        "saw {} distinct outcomes, expected {buckets}",
        counts.len()
    );
    let expected = 1.0 / buckets as f64;
    for (key, count) in counts {
        let observed = *count as f64 / DISTRIBUTION_DRAWS as f64;
        ensure!(
            (observed - expected).abs() < DISTRIBUTION_TOLERANCE,
            "{key:?} drawn {observed:.3} of the time (expected {expected:.3})"
        );
    }
    Ok(())
}

fn income_distribution(_walker: &FunnelWalker, seed: u64) -> Result<()> {
    let mut bundle = RngBundle::from_user_seed(seed);
    let mut counts = HashMap::new();
    for _ in 0..DISTRIBUTION_DRAWS {
        let (option, _) = spin_income(bundle.income());
        *counts.entry(option.amount).or_insert(0) += 1;
    }
    check_uniform(&counts, INCOME_OPTIONS.len())
}

fn bonus_distribution(_walker: &FunnelWalker, seed: u64) -> Result<()> {
    let mut bundle = RngBundle::from_user_seed(seed);
    let mut counts = HashMap::new();
    for _ in 0..DISTRIBUTION_DRAWS {
        let (label, _) = spin_bonus(bundle.bonus());
        *counts.entry(label).or_insert(0) += 1;
    }
    check_uniform(&counts, BONUS_OPTIONS.len())
}

fn discount_determinism(walker: &FunnelWalker, seed: u64) -> Result<()> {
    let mut user = ChaCha20Rng::seed_from_u64(seed);
    for trial in 0..DISCOUNT_TRIALS {
        let mut session = FunnelSession::from_state(
            SessionState {
                step: Step::DiscountBox.index(),
                ..SessionState::default()
            },
            walker.config().clone(),
            seed,
        );
        let mut boxes = vec![1_u8, 2, 3];
        boxes.shuffle(&mut user);

        let first = session.dispatch(&FunnelAction::ChooseBox { index: boxes[0] })?;
        ensure!(
            first.event
                == Some(ScreenEvent::DiscountRevealed {
                    tier: DiscountTier::Partial,
                    percent: 40
                }),
            "trial {trial}: first reveal was {:?}",
            first.event
        );
        session.dispatch(&FunnelAction::RetryDiscount)?;
        let second = session.dispatch(&FunnelAction::ChooseBox { index: boxes[1] })?;
        ensure!(
            second.advanced
                && second.event
                    == Some(ScreenEvent::DiscountRevealed {
                        tier: DiscountTier::Full,
                        percent: 70
                    }),
            "trial {trial}: second reveal was {:?}",
            second.event
        );
        ensure!(
            session.current_step() == Step::BonusRoulette,
            "trial {trial}: landed on {}",
            session.current_step()
        );
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn scratch_threshold(_walker: &FunnelWalker, seed: u64) -> Result<()> {
    const WIDTH: u32 = 20;
    const HEIGHT: u32 = 10;
    let mut surface = ScratchSurface::new(ScratchConfig {
        width: WIDTH,
        height: HEIGHT,
        brush_radius: 0,
        reveal_threshold: 0.5,
    });
    let mut pixels: Vec<(u32, u32)> = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .collect();
    pixels.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));

    let half = pixels.len() / 2;
    surface.pointer_down();
    for &(x, y) in &pixels[..half] {
        surface.pointer_move(x as f32 + 0.5, y as f32 + 0.5);
    }
    ensure!(
        surface.phase() == ScratchPhase::Unscratched,
        "revealed at exactly {:.3} coverage",
        surface.coverage()
    );
    let (x, y) = pixels[half];
    let phase = surface.pointer_move(x as f32 + 0.5, y as f32 + 0.5);
    ensure!(
        phase == ScratchPhase::Revealed,
        "still hidden at {:.3} coverage",
        surface.coverage()
    );
    Ok(())
}

fn fallbacks(walker: &FunnelWalker, seed: u64) -> Result<()> {
    let cfg = walker.config();
    let mut session = FunnelSession::from_state(
        SessionState {
            step: Step::Welcome.index(),
            ..SessionState::default()
        },
        cfg.clone(),
        seed,
    );
    session.dispatch(&FunnelAction::EditName {
        name: " \t ".to_string(),
    })?;
    session.dispatch(&FunnelAction::SubmitName)?;
    ensure!(
        session.state().user_name == cfg.placeholder_name,
        "blank name became {:?}",
        session.state().user_name
    );

    let bare = SessionState::default();
    let previews = previews_view(&bare, cfg);
    ensure!(
        previews.style == cfg.default_style,
        "missing style previewed as {}",
        previews.style
    );
    let offer = offer_view(&bare, cfg);
    ensure!(
        offer.bonus_label == cfg.fallback_bonus,
        "missing bonus shown as {:?}",
        offer.bonus_label
    );
    let out_of_range = SessionState {
        step: 200,
        ..SessionState::default()
    };
    ensure!(
        out_of_range.current_step() == Step::Entry,
        "out-of-range step rendered {}",
        out_of_range.current_step()
    );
    Ok(())
}
