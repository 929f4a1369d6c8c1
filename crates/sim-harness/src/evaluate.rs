use crate::config::HarnessConfig;
use crate::episode::{run_episode, EpisodeResult, EpisodeSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sim_ai::Persona;
use sim_core::{PromptProfile, SimError};
use sim_runtime::Simulator;
use tracing::debug;

/// A profile evaluated over the full episode grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    pub profile_name: String,
    pub profile: PromptProfile,
    pub summary: EpisodeSummary,
    pub episodes: Vec<EpisodeResult>,
}

/// Persona x scenario x seed, in that nesting order.
fn grid<'a>(personas: &'a [Persona], cfg: &'a HarnessConfig) -> Vec<(&'a Persona, &'a str, u64)> {
    let mut cells = Vec::with_capacity(cfg.episodes_per_profile(personas.len()));
    for persona in personas {
        for scenario_id in &cfg.scenario_ids {
            for &seed in &cfg.seeds {
                cells.push((persona, scenario_id.as_str(), seed));
            }
        }
    }
    cells
}

/// Run every grid episode for `profile`. Episodes own their session and
/// policy RNG, so the parallel path returns exactly what the sequential one
/// does, in grid order.
pub fn evaluate_profile(
    sim: &Simulator<'_>,
    cfg: &HarnessConfig,
    personas: &[Persona],
    profile: &PromptProfile,
    name: &str,
) -> Result<ProfileResult, SimError> {
    let cells = grid(personas, cfg);
    let episodes: Vec<EpisodeResult> = if cfg.parallel {
        cells
            .par_iter()
            .map(|&(persona, scenario, seed)| run_episode(sim, persona, profile, seed, scenario))
            .collect::<Result<_, _>>()?
    } else {
        cells
            .iter()
            .map(|&(persona, scenario, seed)| run_episode(sim, persona, profile, seed, scenario))
            .collect::<Result<_, _>>()?
    };

    let summary = EpisodeSummary::from_episodes(&episodes);
    debug!(
        profile = name,
        episodes = episodes.len(),
        objective = summary.objective,
        "profile evaluated"
    );
    Ok(ProfileResult {
        profile_name: name.to_string(),
        profile: profile.clone(),
        summary,
        episodes,
    })
}
