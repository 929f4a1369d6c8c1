//! Serializable client-facing snapshot of a session.

use crate::engine::Simulator;
use crate::narrative::{quarter_agenda, quarter_label, stage_for_turn};
use crate::session::{EventRecord, HistoryRecord, Session, TurnSummary};
use serde::{Deserialize, Serialize};
use sim_core::{round_to, DecisionType, MetricVector, Principle, RiskProfile, Role, Sector};
use sim_scoring::{board_pulse, BoardPulse, Scorecard};

const VIEW_EVENT_HISTORY: usize = 5;
const VIEW_HISTORY: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub board_mandate: String,
    pub tension: String,
    pub chapter_anchors: Vec<String>,
    pub events: Vec<EventRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingView {
    pub current_quarter: u32,
    pub current_quarter_label: String,
    pub stage: String,
    pub agenda: Vec<String>,
    pub max_decisions_per_quarter: usize,
}

/// One menu entry as presented to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub id: String,
    /// 1-based, matching `option N` in free text.
    pub index: usize,
    pub title: String,
    pub description: String,
    pub principles: Vec<Principle>,
    pub recommended: bool,
    pub option_type: DecisionType,
    pub risk_profile: RiskProfile,
    pub tradeoff: String,
    pub board_pulse: BoardPulse,
}

/// Owned copy of everything a client needs to render the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub company_name: String,
    pub role: Role,
    pub sector: Sector,
    pub scenario: ScenarioSummary,
    pub meeting: MeetingView,
    pub turn: u32,
    pub max_turns: u32,
    pub completed: bool,
    pub progress_pct: f64,
    pub metrics: MetricVector,
    pub scorecard: Scorecard,
    pub stage: String,
    pub principles_covered: Vec<Principle>,
    pub scenario_event_history: Vec<EventRecord>,
    pub history: Vec<HistoryRecord>,
    pub last_turn: Option<TurnSummary>,
    pub last_board_message: String,
    pub options: Vec<OptionView>,
}

fn tail<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items[items.len().saturating_sub(n)..].to_vec()
}

/// Build the client view. Pure: the session is only read.
pub fn build_view(sim: &Simulator<'_>, session: &Session) -> SessionView {
    let max_turns = sim.config().max_turns;
    let scenario = &session.scenario;

    let options = sim
        .menu(session)
        .into_iter()
        .enumerate()
        .map(|(i, d)| OptionView {
            id: d.id.clone(),
            index: i + 1,
            title: d.title.clone(),
            description: d.description.clone(),
            principles: d.principles.clone(),
            recommended: scenario.is_priority(&d.id),
            option_type: d.decision_type(),
            risk_profile: d.risk_profile(),
            tradeoff: d.tradeoff_summary(),
            board_pulse: board_pulse(sim.catalog(), &session.metrics, d),
        })
        .collect();

    SessionView {
        session_id: session.id.clone(),
        company_name: session.company_name.clone(),
        role: session.role.clone(),
        sector: session.sector.clone(),
        scenario: ScenarioSummary {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            board_mandate: scenario.board_mandate.clone(),
            tension: scenario.tension.clone(),
            chapter_anchors: scenario.chapter_anchors.clone(),
            events: scenario
                .events
                .iter()
                .map(|e| EventRecord {
                    quarter: e.quarter,
                    title: e.title.clone(),
                    summary: e.summary.clone(),
                })
                .collect(),
        },
        meeting: MeetingView {
            current_quarter: session.turn + 1,
            current_quarter_label: quarter_label(session.turn),
            stage: stage_for_turn(session.turn, max_turns).to_string(),
            agenda: quarter_agenda(session),
            max_decisions_per_quarter: sim.config().max_decisions_per_turn,
        },
        turn: session.turn,
        max_turns,
        completed: session.completed,
        progress_pct: round_to(f64::from(session.turn) / f64::from(max_turns) * 100.0, 1),
        metrics: session.metrics,
        scorecard: session.scorecard(),
        stage: stage_for_turn(session.turn, max_turns).to_string(),
        principles_covered: session.principles_covered.iter().copied().collect(),
        scenario_event_history: tail(&session.scenario_event_history, VIEW_EVENT_HISTORY),
        history: tail(&session.history, VIEW_HISTORY),
        last_turn: session.last_turn.clone(),
        last_board_message: session.last_board_message.clone(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;
    use sim_core::{Catalog, SimConfig};

    #[test]
    fn fresh_view_lists_numbered_options() {
        let catalog = Catalog::builtin();
        let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
        let session = sim.create_session(SessionOptions::default().seed(7)).unwrap();
        let view = build_view(&sim, &session);
        assert_eq!(view.options.len(), 5);
        assert_eq!(
            view.options.iter().map(|o| o.index).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(view.meeting.current_quarter_label, "Y1 Q1");
        assert_eq!(view.meeting.max_decisions_per_quarter, 2);
        assert_eq!(view.progress_pct, 0.0);
        assert!(view.history.is_empty());
        assert!(!view.last_board_message.is_empty());
    }

    #[test]
    fn view_serializes_with_camel_case_keys() {
        let catalog = Catalog::builtin();
        let sim = Simulator::new(&catalog, SimConfig::default()).unwrap();
        let session = sim.create_session(SessionOptions::default().seed(7)).unwrap();
        let json = serde_json::to_value(build_view(&sim, &session)).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json["meeting"].get("currentQuarterLabel").is_some());
        assert!(json["options"][0].get("boardPulse").is_some());
    }
}
