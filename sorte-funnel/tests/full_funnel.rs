use sorte_funnel::constants::{
    BADGE_BONUS, BADGE_INCOME, BADGE_SCRATCH, BADGE_STYLE, BADGE_TREASURE,
};
use sorte_funnel::{
    FunnelAction, FunnelConfig, FunnelSession, ScreenEvent, SessionState, SlipperStyle, Step,
    UpsellDecision, offer_view, previews_view,
};

fn step_through(session: &mut FunnelSession, action: FunnelAction) {
    session
        .dispatch(&action)
        .unwrap_or_else(|err| panic!("{} on {}: {err}", action.name(), session.current_step()));
}

fn to_style_selection(session: &mut FunnelSession, name: &str) {
    step_through(session, FunnelAction::Continue);
    step_through(
        session,
        FunnelAction::EditName {
            name: name.to_string(),
        },
    );
    step_through(session, FunnelAction::SubmitName);
    step_through(session, FunnelAction::Spin { now_ms: 0 });
    let resolved = session.tick(2_500).expect("income spin resolves");
    assert!(matches!(
        resolved.event,
        Some(ScreenEvent::IncomeResolved { .. })
    ));
    step_through(session, FunnelAction::Continue);
}

fn scratch_until_revealed(session: &mut FunnelSession) {
    step_through(session, FunnelAction::PointerDown);
    let mut revealed = false;
    'sweep: for y in (0..=192).step_by(20) {
        for x in (0..=320).step_by(20) {
            let outcome = session
                .dispatch(&FunnelAction::PointerMove {
                    x: x as f32,
                    y: y as f32,
                })
                .unwrap();
            if outcome.event == Some(ScreenEvent::ScratchRevealed) {
                revealed = true;
                break 'sweep;
            }
        }
    }
    assert!(revealed, "sweep should uncover more than half the card");
    step_through(session, FunnelAction::PointerUp);
}

fn to_scratch_card(session: &mut FunnelSession) {
    to_style_selection(session, "Ana");
    step_through(
        session,
        FunnelAction::ChooseStyle {
            style: SlipperStyle::Flores,
        },
    );
    step_through(session, FunnelAction::OpenChest { chest: 3 });
    step_through(session, FunnelAction::Continue);
    step_through(session, FunnelAction::ChooseBox { index: 2 });
    step_through(session, FunnelAction::RetryDiscount);
    step_through(session, FunnelAction::ChooseBox { index: 1 });
    step_through(session, FunnelAction::Spin { now_ms: 10_000 });
    assert!(session.tick(11_999).is_none());
    session.tick(12_000).expect("bonus spin resolves");
    step_through(session, FunnelAction::Continue);
}

fn to_final_offer(session: &mut FunnelSession) {
    to_scratch_card(session);
    scratch_until_revealed(session);
    step_through(session, FunnelAction::ClaimScratch);
    step_through(session, FunnelAction::Continue);
    step_through(session, FunnelAction::Continue);
}

#[test]
fn income_and_style_build_points_and_badges() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 2024);
    to_style_selection(&mut session, "Ana");
    step_through(
        &mut session,
        FunnelAction::ChooseStyle {
            style: SlipperStyle::Flores,
        },
    );

    let state = session.state();
    assert_eq!(state.user_name, "Ana");
    assert_eq!(state.step, 4);
    assert_eq!(state.points, 15);
    assert_eq!(
        state.badges.as_slice(),
        [BADGE_INCOME.to_string(), BADGE_STYLE.to_string()]
    );
    assert_eq!(state.chosen_style, Some(SlipperStyle::Flores));
    assert!(state.chosen_income.is_some());
    assert!(state.chosen_income_reason.is_some());
}

#[test]
fn four_reward_steps_total_forty_points() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 404);
    to_scratch_card(&mut session);
    assert_eq!(session.current_step(), Step::ScratchCard);

    let state = session.state();
    assert_eq!(state.points, 10 + 5 + 10 + 15);
    assert_eq!(
        state.badges.as_slice(),
        [
            BADGE_INCOME.to_string(),
            BADGE_STYLE.to_string(),
            BADGE_TREASURE.to_string(),
            BADGE_BONUS.to_string(),
        ]
    );
}

#[test]
fn full_traversal_collects_everything() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 99);
    to_final_offer(&mut session);
    assert_eq!(session.current_step(), Step::FinalOffer);

    let view = offer_view(session.state(), session.config());
    assert_eq!(view.user_name, "Ana");
    assert_eq!(
        Some(view.bonus_label.as_str()),
        session.state().unlocked_bonus.as_deref()
    );

    let checkout = session.dispatch(&FunnelAction::Checkout).unwrap();
    assert!(!checkout.advanced);
    assert!(checkout.handoff.is_some());
    step_through(&mut session, FunnelAction::ConfirmPurchase);
    step_through(
        &mut session,
        FunnelAction::Upsell {
            decision: UpsellDecision::Accept,
        },
    );

    let state = session.state();
    assert_eq!(state.step, 11);
    assert_eq!(state.points, 40);
    assert_eq!(state.discount_attempt, 2);
    assert_eq!(
        state.badges.as_slice(),
        [
            BADGE_INCOME.to_string(),
            BADGE_STYLE.to_string(),
            BADGE_TREASURE.to_string(),
            BADGE_BONUS.to_string(),
            BADGE_SCRATCH.to_string(),
        ]
    );
    assert_eq!(session.visited(), Step::ALL);
}

#[test]
fn steps_advance_one_at_a_time() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 7);
    to_final_offer(&mut session);
    let visited = session.visited();
    assert!(visited.windows(2).all(|pair| pair[1].index() == pair[0].index() + 1));
}

#[test]
fn terminal_step_ignores_further_input() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 3);
    to_final_offer(&mut session);
    step_through(&mut session, FunnelAction::ConfirmPurchase);
    assert!(session.dispatch(&FunnelAction::Continue).is_err());
    assert!(session.dispatch(&FunnelAction::ConfirmPurchase).is_err());
    assert_eq!(session.current_step(), Step::PostPurchase);
}

#[test]
fn blank_name_and_skipped_style_fall_back() {
    let mut session = FunnelSession::new(FunnelConfig::default(), 1);
    to_style_selection(&mut session, "   ");
    assert_eq!(session.state().user_name, "Guerreira");
    assert_eq!(
        previews_view(session.state(), session.config()).style,
        SlipperStyle::Flores
    );
}

#[test]
fn same_seed_same_rewards() {
    let run = |seed| {
        let mut session = FunnelSession::new(FunnelConfig::default(), seed);
        to_final_offer(&mut session);
        session.into_state()
    };
    assert_eq!(run(555), run(555));
}

#[test]
fn resumed_out_of_range_step_never_decreases() {
    let state = SessionState {
        step: 42,
        ..SessionState::default()
    };
    let mut session = FunnelSession::from_state(state, FunnelConfig::default(), 8);
    assert_eq!(session.current_step(), Step::Entry);
    let outcome = session.dispatch(&FunnelAction::Continue).unwrap();
    assert_eq!(outcome.step_before, Step::Entry);
    assert_eq!(session.state().step, 43);
    assert_eq!(session.current_step(), Step::Entry);
}
