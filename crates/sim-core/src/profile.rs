//! Prompt profile: the tunable principle weighting that biases menu scoring
//! and execution effectiveness.

use crate::principle::{Principle, PrincipleWeights};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Lowest accepted weight.
pub const PROFILE_MIN: f64 = 0.6;
/// Highest accepted weight.
pub const PROFILE_MAX: f64 = 1.5;

/// Resolved weighting profile: always carries all seven principles, each in
/// `[PROFILE_MIN, PROFILE_MAX]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptProfile(PrincipleWeights);

impl Default for PromptProfile {
    fn default() -> Self {
        Self(PrincipleWeights::from_pairs(&[
            (Principle::ValuePools, 1.1),
            (Principle::GovernanceControl, 1.15),
            (Principle::DataPlatform, 1.05),
            (Principle::PortfolioDiscipline, 1.1),
            (Principle::PeopleChange, 1.0),
            (Principle::HumanAgency, 1.1),
            (Principle::MeasurementCadence, 1.15),
        ]))
    }
}

impl PromptProfile {
    /// Clamp known principles from raw weights, keeping defaults elsewhere.
    /// Non-finite values are ignored.
    pub fn from_weights(weights: &PrincipleWeights) -> Self {
        let mut out = PromptProfile::default();
        for (principle, weight) in weights.iter() {
            if weight.is_finite() {
                out.0.set(principle, weight.clamp(PROFILE_MIN, PROFILE_MAX));
            }
        }
        out
    }

    /// Sanitize an arbitrary JSON document into a profile. Never fails: any
    /// non-object input yields the default, unknown keys are ignored, and
    /// numeric strings are accepted the same way numbers are.
    pub fn sanitize(raw: &serde_json::Value) -> Self {
        let mut out = PromptProfile::default();
        let Some(map) = raw.as_object() else {
            return out;
        };
        for principle in Principle::ALL {
            let incoming = match map.get(principle.id()) {
                Some(serde_json::Value::Number(n)) => n.as_f64(),
                Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            if let Some(v) = incoming.filter(|v| v.is_finite()) {
                out.0.set(principle, v.clamp(PROFILE_MIN, PROFILE_MAX));
            }
        }
        out
    }

    /// `None` resolves to the default profile.
    pub fn resolve(profile: Option<&PrincipleWeights>) -> Self {
        profile.map(Self::from_weights).unwrap_or_default()
    }

    /// Read a tuned profile from disk, falling back to the default on any
    /// read or parse failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no tuned profile on disk, using default");
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                serde_json::from_str::<serde_json::Value>(&text).map_err(|e| e.to_string())
            });
        match parsed {
            Ok(value) => Self::sanitize(&value),
            Err(error) => {
                warn!(path = %path.display(), %error, "unreadable tuned profile, using default");
                Self::default()
            }
        }
    }

    pub fn get(&self, principle: Principle) -> f64 {
        self.0.get(principle)
    }

    pub fn weights(&self) -> &PrincipleWeights {
        &self.0
    }

    /// Neighbor with one weight moved by `delta`, rounded to two decimals and
    /// clamped into range.
    pub fn nudged(&self, principle: Principle, delta: f64) -> Self {
        let raw = crate::metrics::round_to(self.get(principle) + delta, 2);
        let mut out = self.clone();
        out.0.set(principle, raw.clamp(PROFILE_MIN, PROFILE_MAX));
        out
    }

    /// Default profile with some weights overridden.
    pub fn with_overrides(pairs: &[(Principle, f64)]) -> Self {
        let mut weights = PromptProfile::default().0;
        for &(p, w) in pairs {
            weights.set(p, w);
        }
        Self::from_weights(&weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn default_covers_all_principles_in_range() {
        let p = PromptProfile::default();
        for principle in Principle::ALL {
            let w = p.get(principle);
            assert!((PROFILE_MIN..=PROFILE_MAX).contains(&w));
        }
    }

    #[test]
    fn sanitize_clamps_and_ignores_garbage() {
        let p = PromptProfile::sanitize(&json!({
            "governance-control": 9.0,
            "value-pools": -3,
            "data-platform": "1.3",
            "people-change": "lots",
            "human-agency": null,
            "not-a-principle": 1.0
        }));
        assert_eq!(p.get(Principle::GovernanceControl), 1.5);
        assert_eq!(p.get(Principle::ValuePools), 0.6);
        assert_eq!(p.get(Principle::DataPlatform), 1.3);
        assert_eq!(p.get(Principle::PeopleChange), 1.0);
        assert_eq!(p.get(Principle::HumanAgency), 1.1);
    }

    #[test]
    fn sanitize_non_object_is_default() {
        assert_eq!(PromptProfile::sanitize(&json!([1, 2])), PromptProfile::default());
        assert_eq!(PromptProfile::sanitize(&json!("x")), PromptProfile::default());
    }

    #[test]
    fn load_missing_or_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(PromptProfile::load_or_default(&missing), PromptProfile::default());

        let corrupt = dir.path().join("bad.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert_eq!(PromptProfile::load_or_default(&corrupt), PromptProfile::default());

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"people-change": 1.25}"#).unwrap();
        assert_eq!(PromptProfile::load_or_default(&good).get(Principle::PeopleChange), 1.25);
    }

    #[test]
    fn nudge_stays_in_range() {
        let p = PromptProfile::with_overrides(&[(Principle::ValuePools, 1.5)]);
        assert_eq!(p.nudged(Principle::ValuePools, 0.1).get(Principle::ValuePools), 1.5);
        assert_eq!(p.nudged(Principle::ValuePools, -0.1).get(Principle::ValuePools), 1.4);
    }

    proptest! {
        #[test]
        fn from_weights_always_in_range(w in proptest::num::f64::ANY) {
            let raw = PrincipleWeights::from_pairs(&[(Principle::HumanAgency, w)]);
            let p = PromptProfile::from_weights(&raw);
            for principle in Principle::ALL {
                let v = p.get(principle);
                prop_assert!((PROFILE_MIN..=PROFILE_MAX).contains(&v));
            }
        }
    }
}
