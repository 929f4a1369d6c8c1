//! Static reference data: decisions, roles, sectors and scenarios.
//!
//! A [`Catalog`] is built once at start-up and shared by reference across
//! sessions and harness workers. It is never written at runtime.

mod decisions;
mod roles;
mod scenarios;

use crate::metrics::MetricVector;
use crate::principle::{Principle, PrincipleWeights};
use crate::{SimError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A strategic decision the board can approve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered principle tags.
    pub principles: Vec<Principle>,
    /// Ordered free-form category tags.
    pub tags: Vec<String>,
    pub effects: MetricVector,
}

/// Coarse category used for menu diversity and package synergy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionType {
    Control,
    Foundation,
    Capability,
    Growth,
    Portfolio,
}

impl DecisionType {
    pub fn label(self) -> &'static str {
        match self {
            DecisionType::Control => "control",
            DecisionType::Foundation => "foundation",
            DecisionType::Capability => "capability",
            DecisionType::Growth => "growth",
            DecisionType::Portfolio => "portfolio",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskProfile {
    HighRisk,
    Stabilizing,
    Balanced,
}

const CONTROL_TAGS: &[&str] = &[
    "risk",
    "governance",
    "legal",
    "ethics",
    "compliance",
    "board",
    "metrics",
    "reputation",
];
const FOUNDATION_TAGS: &[&str] = &["data", "platform", "technology"];
const CAPABILITY_TAGS: &[&str] = &["people", "talent", "change", "service", "operations"];
const GROWTH_TAGS: &[&str] = &["growth", "customer", "product", "m&a", "ecosystem"];

impl Decision {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.tags.iter().any(|t| tags.contains(&t.as_str()))
    }

    pub fn has_principle(&self, principle: Principle) -> bool {
        self.principles.contains(&principle)
    }

    /// Category by tag precedence: control, foundation, capability, growth,
    /// otherwise portfolio.
    pub fn decision_type(&self) -> DecisionType {
        if self.has_any_tag(CONTROL_TAGS) {
            DecisionType::Control
        } else if self.has_any_tag(FOUNDATION_TAGS) {
            DecisionType::Foundation
        } else if self.has_any_tag(CAPABILITY_TAGS) {
            DecisionType::Capability
        } else if self.has_any_tag(GROWTH_TAGS) {
            DecisionType::Growth
        } else {
            DecisionType::Portfolio
        }
    }

    pub fn risk_profile(&self) -> RiskProfile {
        let risk = self.effects.model_risk;
        let confidence = self.effects.execution_confidence;
        if risk >= 4.0 || confidence <= -4.0 {
            RiskProfile::HighRisk
        } else if risk <= -5.0 && confidence >= 3.0 {
            RiskProfile::Stabilizing
        } else {
            RiskProfile::Balanced
        }
    }

    /// Raises model risk or lowers execution confidence.
    pub fn is_risky(&self) -> bool {
        self.effects.model_risk > 2.0 || self.effects.execution_confidence < 0.0
    }

    /// One-line upside/tradeoff summary shown next to a menu option.
    pub fn tradeoff_summary(&self) -> String {
        let fx = &self.effects;
        let mut gains = Vec::new();
        let mut costs = Vec::new();
        if fx.revenue_growth > 0.9 {
            gains.push("growth");
        }
        if fx.ai_adoption > 4.0 {
            gains.push("adoption");
        }
        if fx.model_risk < -2.0 {
            gains.push("risk control");
        }
        if fx.workforce_readiness > 3.0 {
            gains.push("readiness");
        }
        if fx.cash_flow < -3.5 {
            costs.push("cash draw");
        }
        if fx.model_risk > 2.0 {
            costs.push("risk pressure");
        }
        if fx.execution_confidence < -1.0 {
            costs.push("execution strain");
        }
        let gain_text = if gains.is_empty() {
            "limited near-term upside".to_string()
        } else {
            gains.join(", ")
        };
        let cost_text = if costs.is_empty() {
            "low downside".to_string()
        } else {
            costs.join(", ")
        };
        format!("Upside: {gain_text}. Tradeoff: {cost_text}.")
    }
}

/// Board role with a principle weighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub focus: String,
    pub priorities: PrincipleWeights,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: String,
    pub name: String,
    pub summary: String,
    /// Multiplier on quarter-over-quarter drift.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

fn default_volatility() -> f64 {
    1.0
}

/// Shock scheduled for a specific quarter of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEvent {
    pub quarter: u32,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub effects: MetricVector,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub sector_id: String,
    pub name: String,
    pub board_mandate: String,
    pub tension: String,
    #[serde(default)]
    pub chapter_anchors: Vec<String>,
    #[serde(default)]
    pub board_questions: Vec<String>,
    #[serde(default)]
    pub priority_decision_ids: Vec<String>,
    #[serde(default)]
    pub initial_metric_shift: MetricVector,
    #[serde(default)]
    pub preferred_tags: BTreeMap<String, f64>,
    #[serde(default)]
    pub discouraged_decision_ids: Vec<String>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn preferred_bonus(&self, tag: &str) -> f64 {
        self.preferred_tags.get(tag).copied().unwrap_or(0.0)
    }

    pub fn is_discouraged(&self, decision_id: &str) -> bool {
        self.discouraged_decision_ids.iter().any(|d| d == decision_id)
    }

    pub fn is_priority(&self, decision_id: &str) -> bool {
        self.priority_decision_ids.iter().any(|d| d == decision_id)
    }

    pub fn event_for_quarter(&self, quarter: u32) -> Option<&ScenarioEvent> {
        self.events.iter().find(|e| e.quarter == quarter)
    }
}

/// Immutable reference tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub decisions: Vec<Decision>,
    pub roles: Vec<Role>,
    pub sectors: Vec<Sector>,
    pub scenarios: Vec<Scenario>,
}

/// Scenario ids used by default for tuning and matrix reviews.
pub const CORE_SCENARIO_IDS: [&str; 5] = [
    "bank-risk-and-growth-rebalance",
    "pe-portfolio-value-creation",
    "public-sector-service-recovery",
    "manufacturing-network-resilience",
    "healthcare-clinical-ops-safety",
];

/// Roles that voice a stance in the board pulse.
pub const BOARD_VOICE_ROLE_IDS: [&str; 5] =
    ["board-chair", "ceo", "cfo", "coo", "chief-risk-officer"];

impl Catalog {
    /// The built-in AI transformation catalog.
    pub fn builtin() -> Self {
        Self {
            decisions: decisions::builtin_decisions(),
            roles: roles::builtin_roles(),
            sectors: scenarios::builtin_sectors(),
            scenarios: scenarios::builtin_scenarios(),
        }
    }

    /// Fails when any table the engine falls back on is empty.
    pub fn ensure_populated(&self) -> Result<(), SimError> {
        if self.decisions.is_empty() {
            return Err(SimError::EmptyCatalog("decisions"));
        }
        if self.roles.is_empty() {
            return Err(SimError::EmptyCatalog("roles"));
        }
        if self.sectors.is_empty() {
            return Err(SimError::EmptyCatalog("sectors"));
        }
        if self.scenarios.is_empty() {
            return Err(SimError::EmptyCatalog("scenarios"));
        }
        Ok(())
    }

    pub fn decision(&self, id: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.id == id)
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn sector(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Role by id, falling back to the first role.
    pub fn role_or_default(&self, id: Option<&str>) -> Option<&Role> {
        id.and_then(|id| self.role(id)).or_else(|| self.roles.first())
    }

    /// Sector by id, falling back to the first sector.
    pub fn sector_or_default(&self, id: Option<&str>) -> Option<&Sector> {
        id.and_then(|id| self.sector(id)).or_else(|| self.sectors.first())
    }

    /// Scenario for a sector: the requested scenario when it belongs to the
    /// sector, else the sector's first scenario, else the first scenario.
    pub fn scenario_for_sector(&self, sector_id: &str, scenario_id: Option<&str>) -> Option<&Scenario> {
        let requested = scenario_id
            .and_then(|id| self.scenario(id))
            .or_else(|| self.scenarios.first());
        if let Some(s) = requested.filter(|s| s.sector_id == sector_id) {
            return Some(s);
        }
        self.scenarios
            .iter()
            .find(|s| s.sector_id == sector_id)
            .or_else(|| self.scenarios.first())
    }

    /// Check cross-references and numeric sanity. Events past the last
    /// quarter of a shorter session are never reached, so they are allowed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_unique("decision", self.decisions.iter().map(|d| d.id.as_str()))?;
        check_unique("role", self.roles.iter().map(|r| r.id.as_str()))?;
        check_unique("sector", self.sectors.iter().map(|s| s.id.as_str()))?;
        check_unique("scenario", self.scenarios.iter().map(|s| s.id.as_str()))?;

        for d in &self.decisions {
            validate_decision(d)?;
        }
        for r in &self.roles {
            if !r.priorities.is_finite() {
                return Err(ValidationError::NonFinite(format!("role {}", r.id)));
            }
        }
        for s in &self.sectors {
            if !s.volatility.is_finite() || s.volatility < 0.0 {
                return Err(ValidationError::NonFinite(format!("sector {}", s.id)));
            }
        }
        for s in &self.scenarios {
            self.validate_scenario(s, None)?;
        }
        Ok(())
    }

    /// Validate one scenario against this catalog's sectors and decisions.
    /// With `max_turns` set, every event must also land inside the session.
    pub fn validate_scenario(&self, s: &Scenario, max_turns: Option<u32>) -> Result<(), ValidationError> {
        if s.name.trim().is_empty() {
            return Err(ValidationError::Blank {
                field: "name",
                id: s.id.clone(),
            });
        }
        if self.sector(&s.sector_id).is_none() {
            return Err(ValidationError::UnknownSector {
                scenario: s.id.clone(),
                sector: s.sector_id.clone(),
            });
        }
        for id in s
            .priority_decision_ids
            .iter()
            .chain(s.discouraged_decision_ids.iter())
        {
            if self.decision(id).is_none() {
                return Err(ValidationError::UnknownDecision {
                    scenario: s.id.clone(),
                    decision: id.clone(),
                });
            }
        }
        if !s.initial_metric_shift.is_finite() || s.preferred_tags.values().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite(format!("scenario {}", s.id)));
        }
        for e in &s.events {
            if e.quarter == 0 {
                return Err(ValidationError::EventQuarterZero { scenario: s.id.clone() });
            }
            if let Some(max) = max_turns.filter(|&max| e.quarter > max) {
                return Err(ValidationError::EventQuarterOutOfRange {
                    scenario: s.id.clone(),
                    quarter: e.quarter,
                    max,
                });
            }
            if !e.effects.is_finite() {
                return Err(ValidationError::NonFinite(format!("event {}", e.title)));
            }
        }
        Ok(())
    }
}

/// Validate a single decision.
pub fn validate_decision(d: &Decision) -> Result<(), ValidationError> {
    if d.title.trim().is_empty() {
        return Err(ValidationError::Blank {
            field: "title",
            id: d.id.clone(),
        });
    }
    if d.principles.is_empty() {
        return Err(ValidationError::MissingPrinciples(d.id.clone()));
    }
    if !d.effects.is_finite() {
        return Err(ValidationError::NonFinite(format!("decision {}", d.id)));
    }
    Ok(())
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
