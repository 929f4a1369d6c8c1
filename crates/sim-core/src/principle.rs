//! The seven transformation principles and principle-keyed weightings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transformation theme used both as a decision tag and as a weighting key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Principle {
    ValuePools,
    GovernanceControl,
    DataPlatform,
    PortfolioDiscipline,
    PeopleChange,
    HumanAgency,
    MeasurementCadence,
}

impl Principle {
    pub const ALL: [Principle; 7] = [
        Principle::ValuePools,
        Principle::GovernanceControl,
        Principle::DataPlatform,
        Principle::PortfolioDiscipline,
        Principle::PeopleChange,
        Principle::HumanAgency,
        Principle::MeasurementCadence,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Principle::ValuePools => "value-pools",
            Principle::GovernanceControl => "governance-control",
            Principle::DataPlatform => "data-platform",
            Principle::PortfolioDiscipline => "portfolio-discipline",
            Principle::PeopleChange => "people-change",
            Principle::HumanAgency => "human-agency",
            Principle::MeasurementCadence => "measurement-cadence",
        }
    }

    pub fn from_id(id: &str) -> Option<Principle> {
        Principle::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Board-facing title.
    pub fn title(self) -> &'static str {
        match self {
            Principle::ValuePools => "AI Is Business Redesign",
            Principle::HumanAgency => "Redesign Decision Rights",
            Principle::PeopleChange => "Embed AI in Core Workflows",
            Principle::DataPlatform => "Fix Data and Operating Foundations",
            Principle::GovernanceControl => "Govern AI as Material Enterprise Risk",
            Principle::MeasurementCadence => "Measure Outcomes, Not Activity",
            Principle::PortfolioDiscipline => "Scale Through Stage-Gated Execution",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            Principle::ValuePools => {
                "Treat AI as a CEO-owned enterprise redesign tied to P&L value, risk, and accountable ownership."
            }
            Principle::HumanAgency => {
                "Define where AI advises, where it decides, and where humans retain override and accountability."
            }
            Principle::PeopleChange => {
                "Fund AI only when it is embedded into live revenue or cost workflows with named process ownership."
            }
            Principle::DataPlatform => {
                "Treat data ownership, platform reliability, and operating model speed as hard constraints to scale."
            }
            Principle::GovernanceControl => {
                "Set board oversight, risk controls, incident escalation, and regulatory readiness as standing capability."
            }
            Principle::MeasurementCadence => {
                "Track value, decision quality, speed, learning velocity, and risk controls rather than pilot counts."
            }
            Principle::PortfolioDiscipline => {
                "Push from pilot to production using gated milestones, retire weak use cases, and reinvest in winners."
            }
        }
    }
}

impl std::fmt::Display for Principle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Delivery stages a session moves through as quarters pass.
pub const DELIVERY_STAGES: [&str; 6] = [
    "Align",
    "Diagnose",
    "Design",
    "Build",
    "Embed",
    "Govern and Operate",
];

/// Principle-keyed multipliers. Absent principles read as `1.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipleWeights(BTreeMap<Principle, f64>);

impl PrincipleWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from `(principle, weight)` pairs.
    pub fn from_pairs(pairs: &[(Principle, f64)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn get(&self, principle: Principle) -> f64 {
        self.0.get(&principle).copied().unwrap_or(1.0)
    }

    pub fn set(&mut self, principle: Principle, weight: f64) {
        self.0.insert(principle, weight);
    }

    /// Copy with one principle replaced.
    pub fn with(mut self, principle: Principle, weight: f64) -> Self {
        self.set(principle, weight);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Principle, f64)> + '_ {
        self.0.iter().map(|(p, w)| (*p, *w))
    }

    pub fn is_finite(&self) -> bool {
        self.0.values().all(|w| w.is_finite())
    }
}
