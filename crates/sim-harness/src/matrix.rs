//! Role x scenario review of one profile.

use crate::config::HarnessConfig;
use crate::episode::{EpisodeResult, EpisodeSummary};
use crate::evaluate::evaluate_profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sim_ai::Persona;
use sim_core::{PromptProfile, SimError};
use sim_runtime::Simulator;
use std::collections::BTreeMap;
use tracing::info;

const WEAK_SCORE: f64 = 80.5;
const WEAK_INCIDENTS: f64 = 0.75;
const MAX_WEAK_ROWS: usize = 8;

const GOVERNANCE_FOCUS: &str =
    "Increase governance and cadence weighting; push earlier control actions.";
const SEQUENCING_FOCUS: &str = "Strengthen workflow redesign and data foundation sequencing, with explicit board intervention checkpoints.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleScenarioRow {
    pub role_id: String,
    pub scenario_id: String,
    pub scenario_name: String,
    pub avg_score: f64,
    pub avg_incidents: f64,
    pub decision_quality: f64,
    pub risk_control: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakRow {
    pub role_id: String,
    pub scenario_id: String,
    pub scenario_name: String,
    pub recommendation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixResult {
    pub profile: PromptProfile,
    pub scenario_ids: Vec<String>,
    pub seeds: Vec<u64>,
    pub episodes: Vec<EpisodeResult>,
    pub summary: EpisodeSummary,
    pub role_scenario_rows: Vec<RoleScenarioRow>,
    pub weak_rows: Vec<WeakRow>,
    pub generated_at: DateTime<Utc>,
}

/// Per (role, scenario) averages, ordered by role id then scenario id.
pub fn role_scenario_rows(episodes: &[EpisodeResult]) -> Vec<RoleScenarioRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<&EpisodeResult>> = BTreeMap::new();
    for e in episodes {
        groups
            .entry((e.role_id.as_str(), e.scenario_id.as_str()))
            .or_default()
            .push(e);
    }
    groups
        .into_iter()
        .map(|((role_id, scenario_id), items)| {
            let n = items.len() as f64;
            let mean = |f: fn(&EpisodeResult) -> f64| items.iter().map(|e| f(e)).sum::<f64>() / n;
            RoleScenarioRow {
                role_id: role_id.to_string(),
                scenario_id: scenario_id.to_string(),
                scenario_name: items[0].scenario_name.clone(),
                avg_score: mean(|e| e.final_score),
                avg_incidents: mean(|e| f64::from(e.incidents)),
                decision_quality: mean(|e| e.outcome_dimensions.decision_quality),
                risk_control: mean(|e| e.outcome_dimensions.risk_control),
            }
        })
        .collect()
}

/// Rows under the score bar or over the incident bar, with a remediation
/// hint. At most eight.
pub fn weak_rows(rows: &[RoleScenarioRow]) -> Vec<WeakRow> {
    rows.iter()
        .filter(|r| r.avg_score < WEAK_SCORE || r.avg_incidents > WEAK_INCIDENTS)
        .take(MAX_WEAK_ROWS)
        .map(|r| WeakRow {
            role_id: r.role_id.clone(),
            scenario_id: r.scenario_id.clone(),
            scenario_name: r.scenario_name.clone(),
            recommendation: if r.avg_incidents > WEAK_INCIDENTS {
                GOVERNANCE_FOCUS
            } else {
                SEQUENCING_FOCUS
            }
            .to_string(),
        })
        .collect()
}

pub fn run_scenario_matrix(
    sim: &Simulator<'_>,
    cfg: &HarnessConfig,
    personas: &[Persona],
    profile: &PromptProfile,
) -> Result<MatrixResult, SimError> {
    cfg.validate()?;
    let result = evaluate_profile(sim, cfg, personas, profile, "matrix")?;
    let rows = role_scenario_rows(&result.episodes);
    let weak = weak_rows(&rows);
    info!(
        episodes = result.episodes.len(),
        avg_score = result.summary.avg_score,
        weak = weak.len(),
        "scenario matrix complete"
    );
    Ok(MatrixResult {
        profile: result.profile,
        scenario_ids: cfg.scenario_ids.clone(),
        seeds: cfg.seeds.clone(),
        episodes: result.episodes,
        summary: result.summary,
        role_scenario_rows: rows,
        weak_rows: weak,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str, score: f64, incidents: f64) -> RoleScenarioRow {
        RoleScenarioRow {
            role_id: role.into(),
            scenario_id: "s".into(),
            scenario_name: "S".into(),
            avg_score: score,
            avg_incidents: incidents,
            decision_quality: 0.0,
            risk_control: 0.0,
        }
    }

    #[test]
    fn weak_rows_pick_recommendation_by_incidents() {
        let rows = [row("a", 90.0, 0.2), row("b", 79.0, 0.5), row("c", 88.0, 1.0), row("d", 80.5, 0.75)];
        let weak = weak_rows(&rows);
        assert_eq!(weak.len(), 2);
        assert_eq!(weak[0].role_id, "b");
        assert_eq!(weak[0].recommendation, SEQUENCING_FOCUS);
        assert_eq!(weak[1].role_id, "c");
        assert_eq!(weak[1].recommendation, GOVERNANCE_FOCUS);
    }

    #[test]
    fn weak_rows_are_capped() {
        let rows: Vec<_> = (0..12).map(|i| row(&format!("r{i:02}"), 50.0, 0.0)).collect();
        assert_eq!(weak_rows(&rows).len(), 8);
    }
}
