use serde::{Deserialize, Serialize};
use sim_core::{SimError, CORE_SCENARIO_IDS};

/// Episode grid and search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub scenario_ids: Vec<String>,
    pub seeds: Vec<u64>,
    /// Hill-climb rounds after the seed profiles.
    pub rounds: u32,
    /// Objective gain a neighbour needs to replace the current best.
    pub min_gain: f64,
    /// Per-principle mutation step.
    pub step: f64,
    pub leaderboard_size: usize,
    /// Evaluate the episode grid on the rayon pool.
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            scenario_ids: CORE_SCENARIO_IDS.iter().map(|s| s.to_string()).collect(),
            seeds: vec![11, 29, 47, 67],
            rounds: 3,
            min_gain: 0.08,
            step: 0.1,
            leaderboard_size: 10,
            parallel: true,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.scenario_ids.is_empty() {
            return Err(SimError::InvalidConfig("scenario_ids must not be empty".into()));
        }
        if self.seeds.is_empty() {
            return Err(SimError::InvalidConfig("seeds must not be empty".into()));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SimError::InvalidConfig("step must be finite and > 0".into()));
        }
        if !self.min_gain.is_finite() {
            return Err(SimError::InvalidConfig("min_gain must be finite".into()));
        }
        Ok(())
    }

    /// Episodes run per evaluated profile.
    pub fn episodes_per_profile(&self, personas: usize) -> usize {
        personas * self.scenario_ids.len() * self.seeds.len()
    }
}
