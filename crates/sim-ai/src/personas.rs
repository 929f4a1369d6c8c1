use serde::{Deserialize, Serialize};
use sim_core::{Decision, MetricVector, Principle, PrincipleWeights, Scenario};

/// Synthetic executive used for automated evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    pub name: String,
    /// Board role the persona plays in its sessions.
    pub role_id: String,
    /// Signed appetite per metric (model risk is negative: less is better).
    pub metric_weights: MetricVector,
    pub principle_bias: PrincipleWeights,
}

/// Per-metric scaling applied on top of the persona's own weights.
const EFFECT_FACTORS: MetricVector = MetricVector {
    revenue_growth: 1.0,
    operating_margin: 1.0,
    ai_adoption: 0.4,
    model_risk: 0.6,
    workforce_readiness: 0.3,
    customer_trust: 0.4,
    cash_flow: 0.25,
    execution_confidence: 0.35,
};

impl Persona {
    /// Linear preference score for one decision in a scenario.
    pub fn score(&self, decision: &Decision, scenario: &Scenario) -> f64 {
        let mut score: f64 = decision
            .effects
            .iter()
            .map(|(kind, v)| v * self.metric_weights.get(kind) * EFFECT_FACTORS.get(kind))
            .sum();
        for p in &decision.principles {
            score += self.principle_bias.get(*p) * 0.8;
        }
        for tag in &decision.tags {
            score += scenario.preferred_bonus(tag) * 0.7;
        }
        if scenario.is_discouraged(&decision.id) {
            score -= 5.5;
        }
        score
    }
}

fn persona_entry(
    id: &str,
    name: &str,
    role_id: &str,
    metric_weights: MetricVector,
    bias: [f64; 7],
) -> Persona {
    let principle_bias = Principle::ALL
        .into_iter()
        .zip(bias)
        .fold(PrincipleWeights::new(), |w, (p, b)| w.with(p, b));
    Persona {
        id: id.to_string(),
        name: name.to_string(),
        role_id: role_id.to_string(),
        metric_weights,
        principle_bias,
    }
}

/// The five built-in personas, one per board voice role. Principle bias is
/// listed in `Principle::ALL` order.
pub fn personas() -> Vec<Persona> {
    vec![
        persona_entry(
            "disciplined-ceo",
            "Disciplined Growth CEO",
            "ceo",
            MetricVector {
                revenue_growth: 1.3,
                operating_margin: 1.0,
                ai_adoption: 1.0,
                model_risk: -1.0,
                workforce_readiness: 0.9,
                customer_trust: 0.8,
                cash_flow: 0.7,
                execution_confidence: 1.0,
            },
            [1.2, 1.0, 1.0, 1.2, 1.0, 0.95, 1.05],
        ),
        persona_entry(
            "risk-tight-cfo",
            "Risk-Tight CFO",
            "cfo",
            MetricVector {
                revenue_growth: 0.9,
                operating_margin: 1.2,
                ai_adoption: 0.7,
                model_risk: -1.45,
                workforce_readiness: 0.7,
                customer_trust: 1.0,
                cash_flow: 1.2,
                execution_confidence: 0.9,
            },
            [1.1, 1.25, 1.0, 1.0, 0.9, 1.1, 1.2],
        ),
        persona_entry(
            "ops-focused-coo",
            "Operations-Focused COO",
            "coo",
            MetricVector {
                revenue_growth: 0.95,
                operating_margin: 1.05,
                ai_adoption: 1.0,
                model_risk: -1.0,
                workforce_readiness: 1.3,
                customer_trust: 0.95,
                cash_flow: 0.8,
                execution_confidence: 1.2,
            },
            [1.0, 1.0, 1.15, 1.1, 1.25, 1.05, 1.0],
        ),
        persona_entry(
            "governance-chair",
            "Governance-Driven Board Chair",
            "board-chair",
            MetricVector {
                revenue_growth: 1.0,
                operating_margin: 1.0,
                ai_adoption: 0.9,
                model_risk: -1.3,
                workforce_readiness: 0.85,
                customer_trust: 1.1,
                cash_flow: 0.85,
                execution_confidence: 1.1,
            },
            [1.05, 1.3, 1.0, 1.0, 0.95, 1.2, 1.2],
        ),
        persona_entry(
            "control-first-cro",
            "Control-First Chief Risk Officer",
            "chief-risk-officer",
            MetricVector {
                revenue_growth: 0.75,
                operating_margin: 0.9,
                ai_adoption: 0.65,
                model_risk: -1.65,
                workforce_readiness: 0.95,
                customer_trust: 1.25,
                cash_flow: 0.8,
                execution_confidence: 1.2,
            },
            [0.95, 1.35, 1.1, 0.95, 1.0, 1.25, 1.3],
        ),
    ]
}

pub fn persona(id: &str) -> Option<Persona> {
    personas().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::Catalog;

    #[test]
    fn personas_map_to_catalog_roles() {
        let catalog = Catalog::builtin();
        let all = personas();
        assert_eq!(all.len(), 5);
        for p in &all {
            assert!(catalog.role(&p.role_id).is_some(), "unknown role {}", p.role_id);
        }
    }

    #[test]
    fn discouraged_decisions_score_lower() {
        let catalog = Catalog::builtin();
        let scenario = catalog.scenario("public-sector-service-recovery").unwrap();
        let ceo = persona("disciplined-ceo").unwrap();
        let cut = catalog.decision("cost-cut-through-automation").unwrap();
        let mut neutral = scenario.clone();
        neutral.discouraged_decision_ids.clear();
        let delta = ceo.score(cut, &neutral) - ceo.score(cut, scenario);
        assert!((delta - 5.5).abs() < 1e-9);
    }

    #[test]
    fn bias_follows_principle_order() {
        let cro = persona("control-first-cro").unwrap();
        assert_eq!(cro.principle_bias.get(Principle::GovernanceControl), 1.35);
        assert_eq!(cro.principle_bias.get(Principle::MeasurementCadence), 1.3);
        assert_eq!(cro.principle_bias.get(Principle::PortfolioDiscipline), 0.95);
    }
}
