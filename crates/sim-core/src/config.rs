//! Engine configuration.

use crate::SimError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Board meetings per session.
    pub max_turns: u32,
    /// Decisions offered on each menu.
    pub option_count: usize,
    /// Decisions accepted in one package.
    pub max_decisions_per_turn: usize,
    /// Effect scaling applied to the second decision of a package.
    pub secondary_dampening: f64,
    /// Slots in the anti-repetition window.
    pub recent_window: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_turns: 10,
            option_count: 5,
            max_decisions_per_turn: 2,
            secondary_dampening: 0.72,
            recent_window: 4,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_turns == 0 {
            return Err(SimError::InvalidConfig("max_turns must be > 0".into()));
        }
        if self.option_count < 2 {
            return Err(SimError::InvalidConfig("option_count must be >= 2".into()));
        }
        if self.max_decisions_per_turn == 0 {
            return Err(SimError::InvalidConfig(
                "max_decisions_per_turn must be > 0".into(),
            ));
        }
        if !(self.secondary_dampening.is_finite() && self.secondary_dampening > 0.0) {
            return Err(SimError::InvalidConfig(
                "secondary_dampening must be finite and > 0".into(),
            ));
        }
        if self.recent_window == 0 {
            return Err(SimError::InvalidConfig("recent_window must be > 0".into()));
        }
        Ok(())
    }
}

/// Read a YAML or JSON document, chosen by file extension (`.json` is JSON,
/// anything else is treated as YAML).
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, SimError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(serde_yaml::from_str(&text)?)
    }
}
