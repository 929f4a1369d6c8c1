//! Synthetic board pulse: how each voice role would react to a decision.

use serde::{Deserialize, Serialize};
use sim_core::{round_to, Catalog, Decision, DecisionType, MetricVector, Role, BOARD_VOICE_ROLE_IDS};

const SUPPORT_THRESHOLD: f64 = 4.8;
const OPPOSE_THRESHOLD: f64 = 2.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Support,
    Caution,
    Oppose,
}

impl Stance {
    fn from_score(score: f64) -> Stance {
        if score >= SUPPORT_THRESHOLD {
            Stance::Support
        } else if score <= OPPOSE_THRESHOLD {
            Stance::Oppose
        } else {
            Stance::Caution
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStance {
    pub role_id: String,
    pub role_name: String,
    pub stance: Stance,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPulse {
    /// Fraction of voices in support, two decimals.
    pub support_share: f64,
    pub support_count: usize,
    pub oppose_count: usize,
    pub voices: Vec<VoiceStance>,
    pub caution_flags: Vec<String>,
}

/// Role-specific appetite for a decision given the current metrics.
///
/// Principle alignment (mean role weight over the decision's principles)
/// dominates; the effect vector adds a pressure-adjusted impact term.
pub fn role_support_score(role: &Role, metrics: &MetricVector, decision: &Decision) -> f64 {
    let alignment = decision
        .principles
        .iter()
        .map(|p| role.priorities.get(*p))
        .sum::<f64>()
        / decision.principles.len().max(1) as f64;

    let growth_pressure = if metrics.revenue_growth < 5.0 { 1.1 } else { 0.85 };
    let risk_pressure = if metrics.model_risk > 45.0 { 1.15 } else { 0.9 };
    let people_pressure = if metrics.workforce_readiness < 50.0 { 1.1 } else { 0.88 };

    let fx = &decision.effects;
    let impact = fx.revenue_growth * 0.35 * growth_pressure
        + fx.operating_margin * 0.2
        + fx.ai_adoption * 0.08
        + fx.workforce_readiness * 0.08 * people_pressure
        + fx.customer_trust * 0.12
        - fx.model_risk * 0.18 * risk_pressure
        + fx.cash_flow * 0.05
        + fx.execution_confidence * 0.11;

    alignment * 1.9 + impact
}

fn voice_reason(decision: &Decision, stance: Stance) -> &'static str {
    match stance {
        Stance::Support => match decision.decision_type() {
            DecisionType::Control => "control posture strengthened",
            DecisionType::Growth => "clear growth upside with manageable constraints",
            DecisionType::Foundation => "improves execution reliability",
            DecisionType::Capability => "raises adoption capacity in core workflows",
            DecisionType::Portfolio => "aligned to board transformation priorities",
        },
        Stance::Oppose => {
            if decision.effects.model_risk > 2.0 {
                "risk increase is above comfort threshold"
            } else if decision.effects.cash_flow < -4.0 {
                "cash and funding burden is high"
            } else {
                "timing and sequencing concerns"
            }
        }
        Stance::Caution => "supports direction with gating and controls",
    }
}

fn caution_flags(decision: &Decision) -> Vec<String> {
    let fx = &decision.effects;
    let mut flags = Vec::new();
    if fx.model_risk > 2.0 {
        flags.push("Model risk uplift".to_string());
    }
    if fx.cash_flow < -4.0 {
        flags.push("High cash draw".to_string());
    }
    if fx.workforce_readiness < 0.0 {
        flags.push("Workforce resistance".to_string());
    }
    flags
}

/// Pulse across the fixed voice roles. Voice roles missing from the catalog
/// are skipped.
pub fn board_pulse(catalog: &Catalog, metrics: &MetricVector, decision: &Decision) -> BoardPulse {
    let voices: Vec<VoiceStance> = BOARD_VOICE_ROLE_IDS
        .iter()
        .filter_map(|id| catalog.role(id))
        .map(|role| {
            let stance = Stance::from_score(role_support_score(role, metrics, decision));
            VoiceStance {
                role_id: role.id.clone(),
                role_name: role.name.clone(),
                stance,
                reason: voice_reason(decision, stance).to_string(),
            }
        })
        .collect();

    let support_count = voices.iter().filter(|v| v.stance == Stance::Support).count();
    let oppose_count = voices.iter().filter(|v| v.stance == Stance::Oppose).count();
    let support_share = if voices.is_empty() {
        0.0
    } else {
        round_to(support_count as f64 / voices.len() as f64, 2)
    };

    BoardPulse {
        support_share,
        support_count,
        oppose_count,
        voices,
        caution_flags: caution_flags(decision),
    }
}
