use chrono::{TimeZone, Utc};
use sim_ai::GreedyPolicy;
use sim_core::{Catalog, MetricVector, SimConfig, SimRng};
use sim_runtime::{
    Session, SessionOptions, Simulator, TurnRequest, TurnStatus, COMPLETED_MESSAGE, INCIDENT_SHOCK,
};

fn options(seed: u64) -> SessionOptions {
    let mut opts = SessionOptions::default()
        .role("board-chair")
        .scenario("bank-risk-and-growth-rebalance")
        .seed(seed);
    opts.created_at = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
    opts
}

fn play_greedy(sim: &Simulator<'_>, session: &mut Session) {
    let mut policy = GreedyPolicy;
    while sim.autoplay_turn(session, &mut policy).is_some() {}
}

fn snapshot(session: &Session) -> serde_json::Value {
    serde_json::to_value(session).unwrap()
}

#[test]
fn same_seed_same_trajectory() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut a = sim.create_session(options(42)).unwrap();
    let mut b = sim.create_session(options(42)).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.options, b.options);
    assert_eq!(a.last_board_message, b.last_board_message);

    play_greedy(&sim, &mut a);
    play_greedy(&sim, &mut b);
    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.incidents, b.incidents);
    let trace = |s: &Session| {
        s.history
            .iter()
            .map(|h| (h.decision_ids.clone(), h.score_after, h.incident.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(trace(&a), trace(&b));
    assert_eq!(a.last_board_message, b.last_board_message);
}

#[test]
fn different_seeds_diverge() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut a = sim.create_session(options(1)).unwrap();
    let mut b = sim.create_session(options(2)).unwrap();
    play_greedy(&sim, &mut a);
    play_greedy(&sim, &mut b);
    assert_ne!(a.metrics, b.metrics);
}

#[test]
fn greedy_completion_trace() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(42)).unwrap();
    play_greedy(&sim, &mut session);

    assert!(session.completed);
    assert_eq!(session.turn, 10);
    assert_eq!(session.history.len(), 10);
    assert!(session.options.is_empty());
    for (i, h) in session.history.iter().enumerate() {
        assert_eq!(h.quarter, i as u32 + 1);
        assert_eq!(h.decision_ids.len(), 1);
        assert_eq!(h.board_pulse.len(), 1);
        assert!((0.0..=100.0).contains(&h.score_after));
    }
    assert_eq!(session.history[4].quarter_label, "Y2 Q1");
    assert!(session
        .last_board_message
        .starts_with("Simulation complete after 10 board meetings. Final score: "));
    let last = session.last_turn.as_ref().unwrap();
    assert_eq!(last.record.quarter, 10);
    assert_eq!(last.stage_after, "Govern and Operate");
    // Bank events land in quarters the session played through.
    assert!(!session.scenario_event_history.is_empty());
    assert!(session.metrics.within_bounds());
}

#[test]
fn completed_session_is_idempotent() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(5)).unwrap();
    play_greedy(&sim, &mut session);
    let before = snapshot(&session);

    let first = sim.apply_turn(&mut session, &TurnRequest::text("option 1"));
    assert_eq!(first.status, TurnStatus::AlreadyCompleted);
    assert_eq!(first.narrative, COMPLETED_MESSAGE);
    assert!(first.decisions.is_empty());
    assert!(first.metric_delta.is_none());
    assert_eq!(snapshot(&session), before);

    let id = catalog.decisions[0].id.clone();
    let second = sim.apply_turn(&mut session, &TurnRequest::decisions([id]));
    assert_eq!(second, first);
    assert_eq!(snapshot(&session), before);

    let mut policy = GreedyPolicy;
    assert!(sim.autoplay_turn(&mut session, &mut policy).is_none());
}

#[test]
fn unresolved_text_leaves_state_untouched() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(8)).unwrap();
    let before = snapshot(&session);

    for text in ["what is our current standing?", "what do you recommend?", "option 9"] {
        let outcome = sim.apply_turn(&mut session, &TurnRequest::text(text));
        assert_eq!(outcome.status, TurnStatus::Answered);
        assert!(outcome.metric_delta.is_none());
        assert!(!outcome.narrative.is_empty());
    }
    assert_eq!(snapshot(&session), before);
}

#[test]
fn recommendation_names_leading_menu_slots() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    for scenario in [
        "bank-risk-and-growth-rebalance",
        "energy-grid-optimization-and-compliance",
        "public-sector-service-recovery",
    ] {
        for seed in 0..12 {
            let mut session = sim
                .create_session(SessionOptions::default().scenario(scenario).seed(seed))
                .unwrap();
            let menu = sim.menu(&session);
            let top: Vec<&str> = menu.iter().take(2).map(|d| d.title.as_str()).collect();
            let outcome = sim.apply_turn(&mut session, &TurnRequest::text("what do you recommend?"));
            assert_eq!(outcome.narrative, format!("Recommended package: {}.", top.join(" + ")));
            for title in &top {
                assert!(menu.iter().any(|d| d.title == *title), "{scenario}/{seed}: {title} off menu");
            }
        }
    }
}

#[test]
fn off_menu_ids_do_not_resolve() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(8)).unwrap();
    let off_menu = catalog
        .decisions
        .iter()
        .find(|d| !session.options.contains(&d.id))
        .unwrap()
        .id
        .clone();
    let outcome = sim.apply_turn(&mut session, &TurnRequest::decisions([off_menu, "nope".to_string()]));
    assert_eq!(outcome.status, TurnStatus::Answered);
    assert_eq!(session.turn, 0);
}

#[test]
fn two_decision_package_dampens_secondary() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(13)).unwrap();
    let first = session.options[0].clone();
    let second = session.options[1].clone();
    let third = session.options[2].clone();

    let outcome = sim.apply_turn(
        &mut session,
        &TurnRequest::decisions([first.clone(), second.clone(), third]),
    );
    assert_eq!(outcome.status, TurnStatus::Resolved);
    assert_eq!(outcome.decisions.len(), 2);
    let record = &session.history[0];
    assert_eq!(record.decision_ids, vec![first.clone(), second.clone()]);
    assert_eq!(record.multipliers.len(), 2);
    assert!(record.multipliers[1] <= 1.42 * 0.72 + 1e-3);
    assert!(outcome
        .package_notes
        .iter()
        .any(|n| n.starts_with("Execution bandwidth reduced")));
    assert!(session.capabilities.contains(&first));
    assert!(session.capabilities.contains(&second));
    // Both are excluded from the next menu.
    assert!(!session.options.contains(&first));
    assert!(!session.options.contains(&second));
}

#[test]
fn free_text_option_reference_resolves() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(21)).unwrap();
    let third = session.options[2].clone();
    let outcome = sim.apply_turn(&mut session, &TurnRequest::text("Let's go with option 3"));
    assert_eq!(outcome.status, TurnStatus::Resolved);
    assert_eq!(session.history[0].decision_ids, vec![third]);
    assert_eq!(session.turn, 1);
}

#[test]
fn incident_applies_fixed_shock() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(3)).unwrap();
    session.metrics = MetricVector {
        revenue_growth: 5.0,
        operating_margin: 15.0,
        ai_adoption: 40.0,
        model_risk: 50.0,
        workforce_readiness: 50.0,
        customer_trust: 60.0,
        cash_flow: 90.0,
        execution_confidence: 60.0,
    };
    let before = session.metrics;

    session.rng = SimRng::fixed(0.99);
    assert!(sim.roll_incident(&mut session).is_none());
    assert_eq!(session.metrics, before);
    assert_eq!(session.incidents, 0);

    session.rng = SimRng::fixed(0.0);
    let incident = sim.roll_incident(&mut session).unwrap();
    assert_eq!(incident.title, "AI Control Incident");
    assert_eq!(session.incidents, 1);
    let mut expected = before;
    expected.add_scaled(&INCIDENT_SHOCK, 1.0);
    assert_eq!(session.metrics, expected);
    assert!((session.metrics.model_risk - 58.0).abs() < 1e-9);
    assert!((session.metrics.customer_trust - 54.0).abs() < 1e-9);
    assert!((session.metrics.execution_confidence - 51.0).abs() < 1e-9);
}

#[test]
fn pinned_low_draws_always_raise_an_incident() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(3)).unwrap();
    session.rng = SimRng::fixed(0.0);
    let id = session.options[0].clone();
    let outcome = sim.apply_turn(&mut session, &TurnRequest::decisions([id]));
    assert!(outcome.incident.is_some());
    assert_eq!(session.incidents, 1);
    assert_eq!(session.history[0].incident.as_deref(), Some("AI Control Incident"));
    assert!(session.metrics.within_bounds());
}

#[test]
fn scenario_event_applies_once_in_its_quarter() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut session = sim.create_session(options(17)).unwrap();
    play_greedy(&sim, &mut session);
    let scheduled: Vec<u32> = session.scenario.events.iter().map(|e| e.quarter).collect();
    let applied: Vec<u32> = session.scenario_event_history.iter().map(|e| e.quarter).collect();
    assert_eq!(applied, scheduled);
    for record in &session.history {
        let expected = session
            .scenario
            .event_for_quarter(record.quarter)
            .map(|e| e.title.clone());
        assert_eq!(record.scenario_event, expected);
    }
}

#[test]
fn session_round_trips_through_json_and_resumes() {
    let catalog = Catalog::builtin();
    let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
    let mut original = sim.create_session(options(99)).unwrap();
    let mut policy = GreedyPolicy;
    for _ in 0..3 {
        sim.autoplay_turn(&mut original, &mut policy);
    }
    let mut restored: Session = serde_json::from_value(snapshot(&original)).unwrap();
    play_greedy(&sim, &mut original);
    play_greedy(&sim, &mut restored);
    assert_eq!(original.metrics, restored.metrics);
    assert_eq!(original.incidents, restored.incidents);
}

#[test]
fn short_session_runs_to_completion() {
    let catalog = Catalog::builtin();
    let config = SimConfig {
        max_turns: 6,
        ..SimConfig::default()
    };
    let sim = Simulator::new(&catalog, config).unwrap();
    // PE events land in quarters 3, 6 and 9; the last is never reached.
    let mut session = sim
        .create_session(options(17).scenario("pe-portfolio-value-creation"))
        .unwrap();
    play_greedy(&sim, &mut session);
    assert!(session.completed);
    assert_eq!(session.turn, 6);
    assert_eq!(session.history.len(), 6);
    let quarters: Vec<u32> = session.scenario_event_history.iter().map(|e| e.quarter).collect();
    assert_eq!(quarters, vec![3, 6]);
}
