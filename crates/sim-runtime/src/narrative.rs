//! Templated board narrative and the optional rewrite seam.
//!
//! Narrative text is assembled from fixed templates. Phrase choice draws
//! from the session RNG, so the brief is as reproducible as the metrics.

use crate::engine::Incident;
use crate::session::{EventRecord, Session};
use serde::{Deserialize, Serialize};
use sim_core::{Decision, MetricKind, MetricVector, Principle, ScenarioEvent, DELIVERY_STAGES};
use sim_scoring::Scorecard;
use thiserror::Error;
use tracing::warn;

/// Standing questions the board may raise in any scenario.
pub const BOARD_QUESTIONS: [&str; 6] = [
    "Have we treated this as business redesign, or are we still running a technology project?",
    "Which decisions now become AI-assisted, AI-led, or strictly human-controlled?",
    "What evidence proves this has moved from pilot theater into a production workflow?",
    "What foundation debt in data or operating model could now cap value realization?",
    "What board-level intervention is required if control evidence weakens next quarter?",
    "Are we measuring decision quality and speed to impact, not just model activity?",
];

/// Delivery stage reached after `turn` of `max_turns` meetings.
pub fn stage_for_turn(turn: u32, max_turns: u32) -> &'static str {
    let last = DELIVERY_STAGES.len() - 1;
    let progress = f64::from(turn) / f64::from(max_turns.max(1));
    let index = ((progress * DELIVERY_STAGES.len() as f64).floor() as usize).min(last);
    DELIVERY_STAGES[index]
}

/// `Y1 Q1` for turn 0, `Y1 Q4` for turn 3, `Y2 Q1` for turn 4.
pub fn quarter_label(turn: u32) -> String {
    format!("Y{} Q{}", turn / 4 + 1, turn % 4 + 1)
}

/// Three-line agenda for the upcoming meeting.
pub fn quarter_agenda(session: &Session) -> Vec<String> {
    let scenario = &session.scenario;
    let questions = &scenario.board_questions;
    let ask = if questions.is_empty() {
        "Reinforce measurable business outcomes."
    } else {
        questions[session.turn as usize % questions.len()].as_str()
    };
    let outstanding: Vec<&str> = scenario
        .priority_decision_ids
        .iter()
        .filter(|id| !session.has_taken(id))
        .take(2)
        .map(String::as_str)
        .collect();
    let next_event = scenario.event_for_quarter(session.turn + 2);

    vec![
        format!("Primary board ask: {ask}"),
        if outstanding.is_empty() {
            "Most scenario priority moves covered; focus on execution quality and risk discipline."
                .to_string()
        } else {
            format!("Unaddressed priority moves: {}.", outstanding.join(", "))
        },
        match next_event {
            Some(e) => format!("Foresight: {} expected in next quarter.", e.title),
            None => "Foresight: no scheduled scenario shock next quarter.".to_string(),
        },
    ]
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}")
    } else {
        format!("{value:.1}")
    }
}

fn format_delta(kind: MetricKind, value: f64) -> String {
    if kind.is_percentage_point() {
        format!("{}pp", signed(value))
    } else {
        signed(value)
    }
}

/// The three largest absolute movements, `key: +1.2pp | ...`.
pub fn top_delta_summary(delta: &MetricVector) -> String {
    let mut entries: Vec<(MetricKind, f64)> = delta.iter().collect();
    entries.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    entries
        .iter()
        .take(3)
        .map(|(k, v)| format!("{}: {}", k.key(), format_delta(*k, *v)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn package_headline(decisions: &[&Decision]) -> String {
    match decisions {
        [] => "No formal motion approved.".to_string(),
        [one] => format!("Primary motion approved: {}.", one.title),
        [first, second, ..] => format!("Package approved: {} + {}.", first.title, second.title),
    }
}

fn scenario_question(session: &mut Session, max_turns: u32) -> String {
    let stage = stage_for_turn(session.turn, max_turns);
    let scenario = &session.scenario;
    let prompt = session
        .rng
        .pick(&scenario.board_questions)
        .or_else(|| session.rng.pick(&scenario.chapter_anchors))
        .map(String::as_str)
        .unwrap_or("Reinforce measurable business outcomes.");
    format!("Scenario focus ({}, {}): {}", scenario.name, stage, prompt)
}

/// What happened in the quarter being reported on.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct QuarterReport<'a> {
    pub decisions: &'a [&'a Decision],
    pub multipliers: &'a [f64],
    pub incident: Option<&'a Incident>,
    pub event: Option<&'a ScenarioEvent>,
    pub notes: &'a [String],
    pub delta: Option<&'a MetricVector>,
}

/// Multi-line brief for the next board meeting.
pub(crate) fn meeting_brief(session: &mut Session, max_turns: u32, report: &QuarterReport<'_>) -> String {
    let card = session.scorecard();
    let dims = card.outcome_dimensions;
    let stage = stage_for_turn(session.turn, max_turns);
    let quarter = session.turn + 1;

    let headline = if report.decisions.is_empty() {
        format!("Quarter {quarter} board meeting opened ({stage} stage).")
    } else {
        format!("Quarter {quarter} ({stage}) closed. {}", package_headline(report.decisions))
    };
    let execution = if report.decisions.is_empty() {
        "No decision package executed yet.".to_string()
    } else {
        let parts: Vec<String> = report
            .multipliers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let slot = if i == 0 { "Primary" } else { "Secondary" };
                format!("{slot} {:.0}%", m * 100.0)
            })
            .collect();
        format!("Execution effectiveness: {}.", parts.join(", "))
    };
    let risk = match report.incident {
        Some(i) => format!("Incident reported: {}", i.summary),
        None => "No major AI control incidents this quarter.".to_string(),
    };
    let external = match report.event {
        Some(e) => format!("External development: {}. {}", e.title, e.summary),
        None => "External environment: no major new scenario shock this quarter.".to_string(),
    };
    let dynamics = if report.notes.is_empty() {
        "Package dynamics: portfolio effects remained neutral this quarter.".to_string()
    } else {
        format!("Package dynamics: {}", report.notes.join(" "))
    };
    let delta = report.delta.copied().unwrap_or(MetricVector::ZERO);

    let scenario_ask = scenario_question(session, max_turns);
    let mut questions: Vec<String> = BOARD_QUESTIONS.iter().map(|q| q.to_string()).collect();
    questions.push(scenario_ask);
    let board_ask = session.rng.pick(&questions).cloned().unwrap_or_default();

    let agenda = quarter_agenda(session)
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join(" ");

    let m = &session.metrics;
    let scenario = &session.scenario;
    [
        headline,
        format!(
            "Scenario: {} ({}). Mandate: {}",
            scenario.name, session.sector.name, scenario.board_mandate
        ),
        format!("Board tension: {}", scenario.tension),
        execution,
        format!(
            "Business view: revenue {}%, margin {:.1}%, AI adoption {:.1}%, model risk {:.1}.",
            signed(m.revenue_growth),
            m.operating_margin,
            m.ai_adoption,
            m.model_risk
        ),
        format!("Quarter delta: {}.", top_delta_summary(&delta)),
        format!(
            "Outcome dimensions: value {:.1}, decision quality {:.1}, leadership capability {:.1}, speed {:.1}, risk control {:.1}.",
            dims.business_value,
            dims.decision_quality,
            dims.leadership_capability,
            dims.speed_to_impact,
            dims.risk_control
        ),
        external,
        dynamics,
        risk,
        format!("Outcome score: {:.1} ({}).", card.overall, card.rating),
        format!("Next agenda: {agenda}"),
        format!("Board asks: {board_ask}"),
    ]
    .join("\n")
}

pub(crate) fn completion_message(max_turns: u32, card: &Scorecard) -> String {
    format!(
        "Simulation complete after {max_turns} board meetings. Final score: {:.1}. Review your package sequence for replication.",
        card.overall
    )
}

fn dimension_line(card: &Scorecard) -> String {
    let d = &card.outcome_dimensions;
    format!(
        "Current score is {:.1} ({}). Dimensions: value {:.1}, decision quality {:.1}, leadership {:.1}, speed {:.1}, risk control {:.1}.",
        card.overall,
        card.rating,
        d.business_value,
        d.decision_quality,
        d.leadership_capability,
        d.speed_to_impact,
        d.risk_control
    )
}

/// Answer a board message that did not resolve to any decision. Reads the
/// session only; `recommended` holds the leading menu slots.
pub(crate) fn answer_ad_hoc(
    session: &Session,
    text: &str,
    recommended: &[&Decision],
    max_turns: u32,
) -> String {
    let m = text.to_lowercase();
    if m.contains("principle") {
        let outstanding: Vec<&str> = Principle::ALL
            .into_iter()
            .filter(|p| !session.principles_covered.contains(p))
            .take(3)
            .map(Principle::title)
            .collect();
        if outstanding.is_empty() {
            return "All transformation principles are covered. Keep execution cadence and risk controls stable while scaling value.".to_string();
        }
        return format!(
            "Not yet fully covered: {}. Build the next board package to close these gaps.",
            outstanding.join(", ")
        );
    }
    if m.contains("stage") || m.contains("framework") {
        return format!(
            "Current delivery stage is {} ({}). Next package should reinforce stage progression while preserving risk control and decision quality.",
            stage_for_turn(session.turn, max_turns),
            quarter_label(session.turn)
        );
    }
    if m.contains("scenario") || m.contains("sector") {
        return format!(
            "Scenario is {} in {}. Mandate: {}",
            session.scenario.name, session.sector.name, session.scenario.board_mandate
        );
    }
    if m.contains("risk") {
        return format!(
            "Current model risk is {:.1}. Keep it below 35 while scaling adoption and safeguarding trust.",
            session.metrics.model_risk
        );
    }
    if m.contains("recommend") || m.contains("package") {
        if recommended.is_empty() {
            return "No package recommendation available. The simulation may already be complete."
                .to_string();
        }
        let titles: Vec<&str> = recommended.iter().map(|d| d.title.as_str()).collect();
        return format!("Recommended package: {}.", titles.join(" + "));
    }
    if m.contains("metric") || m.contains("score") {
        return dimension_line(&session.scorecard());
    }
    "Board response: choose a primary motion (and optional secondary motion) from the listed options, then submit the quarter.".to_string()
}

/// Failure modes of an external narrative rewriter.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("rewriter unavailable: {0}")]
    Unavailable(String),
    #[error("rewriter timed out")]
    Timeout,
    #[error("rewriter returned no text")]
    Empty,
}

/// Facts a rewriter may use to polish a draft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteContext {
    pub company_name: String,
    pub role_name: String,
    pub sector_name: String,
    pub scenario_name: String,
    pub scenario_mandate: String,
    pub scenario_tension: String,
    pub primary_anchor: Option<String>,
    pub recent_events: Vec<EventRecord>,
    pub stage: String,
    pub turn: u32,
    pub max_turns: u32,
    pub user_message: Option<String>,
    pub decision_title: Option<String>,
}

impl RewriteContext {
    pub fn from_session(
        session: &Session,
        max_turns: u32,
        user_message: Option<&str>,
        decision: Option<&Decision>,
    ) -> Self {
        Self {
            company_name: session.company_name.clone(),
            role_name: session.role.name.clone(),
            sector_name: session.sector.name.clone(),
            scenario_name: session.scenario.name.clone(),
            scenario_mandate: session.scenario.board_mandate.clone(),
            scenario_tension: session.scenario.tension.clone(),
            primary_anchor: session.scenario.chapter_anchors.first().cloned(),
            recent_events: session.scenario_event_history.clone(),
            stage: stage_for_turn(session.turn, max_turns).to_string(),
            turn: session.turn,
            max_turns,
            user_message: user_message.map(str::to_string),
            decision_title: decision.map(|d| d.title.clone()),
        }
    }
}

/// Optional text-in/text-out enrichment of a board narrative.
pub trait NarrativeRewriter {
    fn rewrite(&self, ctx: &RewriteContext, draft: &str) -> Result<String, RewriteError>;
}

/// Returns the draft unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughRewriter;

impl NarrativeRewriter for PassthroughRewriter {
    fn rewrite(&self, _ctx: &RewriteContext, draft: &str) -> Result<String, RewriteError> {
        Ok(draft.to_string())
    }
}

/// Best-effort rewrite: any failure, or blank output, yields the draft.
/// Never touches session state.
pub fn enrich(rewriter: Option<&dyn NarrativeRewriter>, ctx: &RewriteContext, draft: &str) -> String {
    let Some(rewriter) = rewriter else {
        return draft.to_string();
    };
    match rewriter.rewrite(ctx, draft) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!(error = %RewriteError::Empty, "narrative rewrite discarded");
            draft.to_string()
        }
        Err(error) => {
            warn!(%error, "narrative rewrite failed, keeping draft");
            draft.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_progress_with_turns() {
        assert_eq!(stage_for_turn(0, 10), "Align");
        assert_eq!(stage_for_turn(2, 10), "Diagnose");
        assert_eq!(stage_for_turn(5, 10), "Design");
        assert_eq!(stage_for_turn(9, 10), "Govern and Operate");
        assert_eq!(stage_for_turn(10, 10), "Govern and Operate");
    }

    #[test]
    fn quarter_labels_roll_over_years() {
        assert_eq!(quarter_label(0), "Y1 Q1");
        assert_eq!(quarter_label(3), "Y1 Q4");
        assert_eq!(quarter_label(4), "Y2 Q1");
        assert_eq!(quarter_label(9), "Y3 Q2");
    }

    #[test]
    fn delta_summary_orders_by_magnitude() {
        let delta = MetricVector {
            revenue_growth: 0.4,
            model_risk: -6.3,
            cash_flow: 2.0,
            customer_trust: -0.1,
            ..MetricVector::ZERO
        };
        assert_eq!(
            top_delta_summary(&delta),
            "modelRisk: -6.3 | cashFlow: +2.0 | revenueGrowth: +0.4pp"
        );
    }

    struct Failing;
    impl NarrativeRewriter for Failing {
        fn rewrite(&self, _ctx: &RewriteContext, _draft: &str) -> Result<String, RewriteError> {
            Err(RewriteError::Timeout)
        }
    }

    struct Blank;
    impl NarrativeRewriter for Blank {
        fn rewrite(&self, _ctx: &RewriteContext, _draft: &str) -> Result<String, RewriteError> {
            Ok("  ".into())
        }
    }

    fn ctx() -> RewriteContext {
        RewriteContext {
            company_name: "Northstar Holdings".into(),
            role_name: "Board Chair".into(),
            sector_name: "Energy".into(),
            scenario_name: "Grid".into(),
            scenario_mandate: String::new(),
            scenario_tension: String::new(),
            primary_anchor: None,
            recent_events: vec![],
            stage: "Align".into(),
            turn: 0,
            max_turns: 10,
            user_message: None,
            decision_title: None,
        }
    }

    #[test]
    fn rewrite_failures_fall_back_to_draft() {
        let c = ctx();
        assert_eq!(enrich(None, &c, "draft"), "draft");
        assert_eq!(enrich(Some(&Failing), &c, "draft"), "draft");
        assert_eq!(enrich(Some(&Blank), &c, "draft"), "draft");
        assert_eq!(enrich(Some(&PassthroughRewriter), &c, "draft"), "draft");
    }
}
