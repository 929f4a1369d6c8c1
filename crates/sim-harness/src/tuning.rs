//! Hill-climb search over the principle weighting profile.

use crate::config::HarnessConfig;
use crate::episode::EpisodeSummary;
use crate::evaluate::{evaluate_profile, ProfileResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sim_ai::Persona;
use sim_core::{Principle, PromptProfile, SimError};
use sim_runtime::Simulator;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub profile_name: String,
    pub profile: PromptProfile,
    pub summary: EpisodeSummary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub roles: usize,
    pub scenarios: usize,
    pub seeds_per_scenario: usize,
    pub episodes: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningResult {
    pub tuned_profile: PromptProfile,
    pub best_result: ProfileResult,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub coverage: Coverage,
    /// Rounds that produced a new best.
    pub improving_rounds: u32,
    pub generated_at: DateTime<Utc>,
}

/// Hand-built starting points: the default plus three themed variants.
pub fn seed_profiles() -> Vec<(String, PromptProfile)> {
    use Principle::*;
    vec![
        ("default".to_string(), PromptProfile::default()),
        (
            "governance-heavy".to_string(),
            PromptProfile::with_overrides(&[
                (GovernanceControl, 1.33),
                (MeasurementCadence, 1.3),
                (HumanAgency, 1.22),
                (ValuePools, 1.05),
            ]),
        ),
        (
            "value-speed-balanced".to_string(),
            PromptProfile::with_overrides(&[
                (ValuePools, 1.28),
                (PortfolioDiscipline, 1.24),
                (DataPlatform, 1.08),
                (GovernanceControl, 1.12),
            ]),
        ),
        (
            "people-platform".to_string(),
            PromptProfile::with_overrides(&[
                (PeopleChange, 1.26),
                (DataPlatform, 1.2),
                (GovernanceControl, 1.18),
            ]),
        ),
    ]
}

/// Every single-principle neighbour of `profile`, down before up.
pub fn neighbours(profile: &PromptProfile, step: f64, round: u32) -> Vec<(String, PromptProfile)> {
    Principle::ALL
        .into_iter()
        .flat_map(|p| {
            [("down", -step), ("up", step)].map(|(dir, delta)| {
                (
                    format!("mutate-{}-{dir}-r{round}", p.id()),
                    profile.nudged(p, delta),
                )
            })
        })
        .collect()
}

fn by_objective_desc(a: &ProfileResult, b: &ProfileResult) -> std::cmp::Ordering {
    b.summary.objective.total_cmp(&a.summary.objective)
}

/// Evaluate the seed profiles, then climb from the best one until a round
/// fails to beat it by `min_gain` or the round cap is hit.
pub fn run_tuning(
    sim: &Simulator<'_>,
    cfg: &HarnessConfig,
    personas: &[Persona],
) -> Result<TuningResult, SimError> {
    cfg.validate()?;
    let mut explored = seed_profiles()
        .iter()
        .map(|(name, profile)| evaluate_profile(sim, cfg, personas, profile, name))
        .collect::<Result<Vec<_>, _>>()?;
    explored.sort_by(by_objective_desc);
    let mut best = explored
        .first()
        .cloned()
        .ok_or_else(|| SimError::InvalidConfig("no seed profiles".into()))?;
    info!(profile = %best.profile_name, objective = best.summary.objective, "seed profiles evaluated");

    let mut improving_rounds = 0;
    for round in 1..=cfg.rounds {
        let mut evaluated = neighbours(&best.profile, cfg.step, round)
            .iter()
            .map(|(name, profile)| evaluate_profile(sim, cfg, personas, profile, name))
            .collect::<Result<Vec<_>, _>>()?;
        evaluated.sort_by(by_objective_desc);
        let challenger = evaluated.first().cloned();
        explored.extend(evaluated);

        match challenger {
            Some(c) if c.summary.objective > best.summary.objective + cfg.min_gain => {
                info!(
                    round,
                    profile = %c.profile_name,
                    objective = c.summary.objective,
                    gain = c.summary.objective - best.summary.objective,
                    "tuning round improved"
                );
                best = c;
                improving_rounds += 1;
            }
            _ => {
                info!(round, objective = best.summary.objective, "tuning converged");
                break;
            }
        }
    }

    explored.sort_by(by_objective_desc);
    let leaderboard = explored
        .into_iter()
        .take(cfg.leaderboard_size)
        .map(|r| LeaderboardEntry {
            profile_name: r.profile_name,
            profile: r.profile,
            summary: r.summary,
        })
        .collect();

    Ok(TuningResult {
        tuned_profile: best.profile.clone(),
        coverage: Coverage {
            roles: personas.len(),
            scenarios: cfg.scenario_ids.len(),
            seeds_per_scenario: cfg.seeds.len(),
            episodes: best.episodes.len(),
        },
        best_result: best,
        leaderboard,
        improving_rounds,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_profiles_are_in_range() {
        let seeds = seed_profiles();
        assert_eq!(seeds.len(), 4);
        let heavy = &seeds[1].1;
        assert_eq!(heavy.get(Principle::GovernanceControl), 1.33);
        assert_eq!(heavy.get(Principle::DataPlatform), PromptProfile::default().get(Principle::DataPlatform));
    }

    #[test]
    fn neighbours_cover_each_principle_both_ways() {
        let base = PromptProfile::default();
        let n = neighbours(&base, 0.1, 2);
        assert_eq!(n.len(), 14);
        assert_eq!(n[0].0, "mutate-value-pools-down-r2");
        assert_eq!(n[1].0, "mutate-value-pools-up-r2");
        assert_eq!(n[0].1.get(Principle::ValuePools), 1.0);
        assert_eq!(n[1].1.get(Principle::ValuePools), 1.2);
    }

    #[test]
    fn neighbours_respect_profile_bounds() {
        let top = PromptProfile::with_overrides(&[(Principle::PeopleChange, 1.5)]);
        let n = neighbours(&top, 0.1, 1);
        let up = n.iter().find(|(name, _)| name == "mutate-people-change-up-r1").unwrap();
        assert_eq!(up.1.get(Principle::PeopleChange), 1.5);
    }
}
