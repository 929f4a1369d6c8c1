//! Session state: everything one simulation run owns and mutates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sim_core::{MetricVector, Principle, PrincipleWeights, PromptProfile, Role, Scenario, Sector, SimError, SimRng};
use sim_scoring::{BoardPulse, ScoreInput, Scorecard};
use std::collections::BTreeSet;

/// Caller-supplied parameters for a new session. Every field is optional;
/// unknown ids degrade to catalog defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionOptions {
    pub role_id: Option<String>,
    pub sector_id: Option<String>,
    pub scenario_id: Option<String>,
    pub company_name: Option<String>,
    /// Defaults to the creation time in milliseconds.
    pub seed: Option<u64>,
    pub profile: Option<PrincipleWeights>,
    /// Pinned creation time; defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionOptions {
    pub fn role(mut self, id: impl Into<String>) -> Self {
        self.role_id = Some(id.into());
        self
    }

    pub fn sector(mut self, id: impl Into<String>) -> Self {
        self.sector_id = Some(id.into());
        self
    }

    pub fn scenario(mut self, id: impl Into<String>) -> Self {
        self.scenario_id = Some(id.into());
        self
    }

    pub fn company(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed given as text; malformed input fails here rather than later.
    pub fn seed_text(self, text: &str) -> Result<Self, SimError> {
        Ok(self.seed(sim_core::parse_seed(text)?))
    }

    pub fn profile(mut self, weights: PrincipleWeights) -> Self {
        self.profile = Some(weights);
        self
    }
}

/// Scenario event as recorded once it has been applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub quarter: u32,
    pub title: String,
    pub summary: String,
}

/// Pulse attached to one decision of a resolved package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPulse {
    pub decision_id: String,
    pub decision_title: String,
    pub pulse: BoardPulse,
}

/// Append-only record of one resolved turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub quarter: u32,
    pub quarter_label: String,
    pub decision_ids: Vec<String>,
    pub decision_titles: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Execution multipliers, three decimals, in package order.
    pub multipliers: Vec<f64>,
    pub incident: Option<String>,
    pub scenario_event: Option<String>,
    pub package_notes: Vec<String>,
    pub metric_delta: MetricVector,
    pub board_pulse: Vec<DecisionPulse>,
    pub score_after: f64,
}

/// The latest history record plus where the session stands afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSummary {
    #[serde(flatten)]
    pub record: HistoryRecord,
    pub stage_after: String,
    pub scorecard: Scorecard,
}

/// Mutable state of one simulation run.
///
/// Owned by exactly one caller; the engine mutates it through
/// [`crate::Simulator::apply_turn`]. The RNG travels with the state so a
/// serialized session resumes the same random stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
    pub seed: u64,
    pub role: Role,
    pub sector: Sector,
    pub scenario: Scenario,
    pub profile: PromptProfile,
    pub metrics: MetricVector,
    pub turn: u32,
    pub incidents: u32,
    pub governance_debt: u32,
    /// Decisions already taken.
    pub capabilities: BTreeSet<String>,
    pub principles_covered: BTreeSet<Principle>,
    pub history: Vec<HistoryRecord>,
    /// Anti-repetition window; excluded from the next menus.
    pub recent_decision_ids: BTreeSet<String>,
    pub applied_event_quarters: BTreeSet<u32>,
    pub scenario_event_history: Vec<EventRecord>,
    /// Current menu, as decision ids in display order.
    pub options: Vec<String>,
    pub last_board_message: String,
    pub last_turn: Option<TurnSummary>,
    pub completed: bool,
    pub rng: SimRng,
}

impl Session {
    pub fn score_input(&self) -> ScoreInput<'_> {
        ScoreInput {
            metrics: &self.metrics,
            principles_covered: self.principles_covered.len(),
            incidents: self.incidents,
        }
    }

    pub fn scorecard(&self) -> Scorecard {
        sim_scoring::scorecard(&self.score_input())
    }

    pub fn has_taken(&self, decision_id: &str) -> bool {
        self.capabilities.contains(decision_id)
    }

    pub fn used_before(&self, decision_id: &str) -> bool {
        self.history
            .iter()
            .any(|h| h.decision_ids.iter().any(|id| id == decision_id))
    }

    /// Scenario priority decisions already taken.
    pub fn priorities_done(&self) -> usize {
        self.scenario
            .priority_decision_ids
            .iter()
            .filter(|id| self.has_taken(id))
            .count()
    }
}
