use super::Decision;
use crate::metrics::MetricVector;
use crate::principle::Principle::{self, *};

fn decision(
    id: &str,
    title: &str,
    description: &str,
    principles: &[Principle],
    tags: &[&str],
    effects: MetricVector,
) -> Decision {
    Decision {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        principles: principles.to_vec(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        effects,
    }
}

pub(super) fn builtin_decisions() -> Vec<Decision> {
    vec![
        decision(
            "ai-value-pool-map",
            "Map AI Value Pools to the P&L",
            "Rank AI opportunities by P&L impact and assign an accountable executive owner to each value pool.",
            &[ValuePools, PortfolioDiscipline],
            &["strategy", "finance", "portfolio"],
            MetricVector {
                revenue_growth: 0.8,
                operating_margin: 0.4,
                ai_adoption: 2.0,
                workforce_readiness: 1.0,
                cash_flow: -1.5,
                execution_confidence: 3.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "workflow-redesign",
            "Redesign Core Workflows Around AI",
            "Rebuild two end-to-end revenue or cost workflows with AI embedded and named process owners.",
            &[PeopleChange, ValuePools],
            &["operations", "people", "change"],
            MetricVector {
                revenue_growth: 1.0,
                operating_margin: 0.9,
                ai_adoption: 6.0,
                model_risk: 1.0,
                workforce_readiness: 3.0,
                customer_trust: 1.0,
                cash_flow: -3.0,
                execution_confidence: 2.0,
            },
        ),
        decision(
            "data-foundation-program",
            "Launch a Data Foundation Program",
            "Fund data ownership, quality pipelines and a shared platform layer before scaling further use cases.",
            &[DataPlatform],
            &["data", "platform", "technology"],
            MetricVector {
                revenue_growth: 0.2,
                operating_margin: -0.2,
                ai_adoption: 5.0,
                model_risk: -2.0,
                workforce_readiness: 1.0,
                customer_trust: 0.5,
                cash_flow: -5.0,
                execution_confidence: 2.0,
            },
        ),
        decision(
            "risk-and-model-governance",
            "Stand Up Model Risk Governance",
            "Create a model inventory, validation gates and an incident escalation path reporting to the board.",
            &[GovernanceControl, HumanAgency],
            &["risk", "governance", "compliance"],
            MetricVector {
                revenue_growth: -0.1,
                operating_margin: -0.1,
                ai_adoption: 1.0,
                model_risk: -8.0,
                workforce_readiness: 1.0,
                customer_trust: 3.0,
                cash_flow: -2.0,
                execution_confidence: 3.0,
            },
        ),
        decision(
            "responsible-ai-charter",
            "Adopt a Responsible AI Charter",
            "Publish fairness, transparency and accountability commitments with a named executive sponsor.",
            &[GovernanceControl, HumanAgency],
            &["ethics", "governance", "reputation"],
            MetricVector {
                ai_adoption: 1.0,
                model_risk: -5.0,
                workforce_readiness: 1.0,
                customer_trust: 4.0,
                cash_flow: -1.0,
                execution_confidence: 2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "regulatory-prep-sprint",
            "Run a Regulatory Readiness Sprint",
            "Close documentation and control gaps against the expected supervisory review in one quarter.",
            &[GovernanceControl],
            &["legal", "compliance", "risk"],
            MetricVector {
                revenue_growth: -0.2,
                model_risk: -6.0,
                customer_trust: 2.0,
                cash_flow: -2.5,
                execution_confidence: 1.5,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "board-dashboard-cadence",
            "Install a Board AI Value Dashboard",
            "Review value, decision quality, speed and risk indicators at every board meeting.",
            &[MeasurementCadence, PortfolioDiscipline],
            &["board", "metrics", "finance"],
            MetricVector {
                operating_margin: 0.3,
                ai_adoption: 1.0,
                model_risk: -2.0,
                customer_trust: 1.0,
                cash_flow: -0.8,
                execution_confidence: 4.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "vendor-consolidation",
            "Consolidate the AI Vendor Portfolio",
            "Standardise on a small set of platforms and renegotiate overlapping contracts.",
            &[PortfolioDiscipline, DataPlatform],
            &["cost", "platform", "portfolio"],
            MetricVector {
                operating_margin: 1.0,
                ai_adoption: -1.0,
                model_risk: -1.0,
                cash_flow: 3.0,
                execution_confidence: 1.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "scenario-war-gaming",
            "Run AI Failure War-Games",
            "Rehearse model failure, data breach and regulator escalation scenarios with the executive team.",
            &[GovernanceControl, MeasurementCadence],
            &["risk", "board", "strategy"],
            MetricVector {
                model_risk: -4.0,
                workforce_readiness: 1.0,
                customer_trust: 1.0,
                cash_flow: -1.0,
                execution_confidence: 3.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "skill-acceleration",
            "Fund an AI Skills Acceleration Academy",
            "Train frontline managers and process owners to run AI-assisted workflows.",
            &[PeopleChange],
            &["people", "talent", "change"],
            MetricVector {
                operating_margin: -0.2,
                ai_adoption: 3.0,
                workforce_readiness: 8.0,
                cash_flow: -3.0,
                execution_confidence: 2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "legacy-modernization",
            "Modernize Legacy Core Systems",
            "Replace brittle core systems that block production deployment of models.",
            &[DataPlatform, PortfolioDiscipline],
            &["platform", "technology", "operations"],
            MetricVector {
                revenue_growth: 0.3,
                operating_margin: 0.4,
                ai_adoption: 4.0,
                model_risk: -1.0,
                cash_flow: -6.0,
                execution_confidence: -1.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "defer-governance-to-later",
            "Defer Governance Until Scale",
            "Ship use cases now and postpone control investment until volumes justify it.",
            &[ValuePools],
            &["growth", "speed"],
            MetricVector {
                revenue_growth: 1.4,
                operating_margin: 0.3,
                ai_adoption: 5.0,
                model_risk: 7.0,
                customer_trust: -3.0,
                cash_flow: 1.0,
                execution_confidence: -2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "cost-cut-through-automation",
            "Cut Costs Through Aggressive Automation",
            "Automate back-office roles at pace to hit the year-end margin target.",
            &[ValuePools],
            &["cost", "finance", "operations"],
            MetricVector {
                operating_margin: 1.8,
                ai_adoption: 3.0,
                model_risk: 3.0,
                workforce_readiness: -5.0,
                customer_trust: -3.0,
                cash_flow: 4.0,
                execution_confidence: -2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "customer-facing-ai",
            "Launch Customer-Facing AI Assistants",
            "Put generative assistants in front of customers across service and sales channels.",
            &[ValuePools, HumanAgency],
            &["customer", "growth", "product"],
            MetricVector {
                revenue_growth: 1.6,
                ai_adoption: 6.0,
                model_risk: 4.0,
                customer_trust: 1.0,
                cash_flow: -2.0,
                execution_confidence: 0.5,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "ai-product-line",
            "Launch an AI-Native Product Line",
            "Build a new revenue line around proprietary models and data assets.",
            &[ValuePools, PortfolioDiscipline],
            &["growth", "product"],
            MetricVector {
                revenue_growth: 2.0,
                operating_margin: 0.2,
                ai_adoption: 4.0,
                model_risk: 3.0,
                cash_flow: -4.5,
                execution_confidence: -0.5,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "human-override-protocols",
            "Codify Human Override Protocols",
            "Define where AI advises, where it decides, and how staff intervene in high-impact decisions.",
            &[HumanAgency, GovernanceControl],
            &["ethics", "risk", "service"],
            MetricVector {
                ai_adoption: -0.5,
                model_risk: -4.0,
                workforce_readiness: 2.0,
                customer_trust: 3.0,
                cash_flow: -1.0,
                execution_confidence: 1.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "pilot-portfolio-triage",
            "Triage the Pilot Portfolio",
            "Stop pilots that cannot pass production gates and reinvest in the winners.",
            &[PortfolioDiscipline, MeasurementCadence],
            &["portfolio", "strategy", "metrics"],
            MetricVector {
                revenue_growth: 0.2,
                operating_margin: 0.6,
                ai_adoption: -1.0,
                cash_flow: 2.5,
                execution_confidence: 2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "change-champion-network",
            "Build a Change Champion Network",
            "Recruit respected operators in every function to coach teams through new ways of working.",
            &[PeopleChange, HumanAgency],
            &["people", "change", "service"],
            MetricVector {
                ai_adoption: 2.0,
                workforce_readiness: 5.0,
                customer_trust: 1.0,
                cash_flow: -1.5,
                execution_confidence: 1.5,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "ecosystem-partnership",
            "Form an AI Ecosystem Partnership",
            "Co-develop solutions with a platform partner in exchange for shared data access.",
            &[ValuePools, DataPlatform],
            &["ecosystem", "growth", "technology"],
            MetricVector {
                revenue_growth: 1.0,
                ai_adoption: 4.0,
                model_risk: 2.5,
                cash_flow: -2.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "ai-capability-acquisition",
            "Acquire an AI Capability Start-up",
            "Buy a specialist team and its models to leapfrog internal build timelines.",
            &[ValuePools, PeopleChange],
            &["m&a", "growth", "talent"],
            MetricVector {
                revenue_growth: 1.3,
                ai_adoption: 5.0,
                model_risk: 3.0,
                workforce_readiness: 2.0,
                cash_flow: -9.0,
                execution_confidence: -3.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "outcome-kpi-reset",
            "Reset KPIs to Outcomes, Not Activity",
            "Retire pilot counts and model volumes as success measures in favour of value and decision quality.",
            &[MeasurementCadence],
            &["metrics", "finance", "board"],
            MetricVector {
                operating_margin: 0.3,
                model_risk: -1.0,
                customer_trust: 0.5,
                cash_flow: -0.5,
                execution_confidence: 3.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "data-product-ownership",
            "Assign Data Product Owners",
            "Give each critical data domain an accountable business owner with quality targets.",
            &[DataPlatform, PeopleChange],
            &["data", "operations", "people"],
            MetricVector {
                ai_adoption: 3.0,
                model_risk: -1.5,
                workforce_readiness: 3.0,
                cash_flow: -1.5,
                execution_confidence: 1.0,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "enterprise-copilot-rollout",
            "Scale GenAI Copilots Enterprise-Wide",
            "License copilots for every knowledge worker and mandate use within the quarter.",
            &[PeopleChange, ValuePools],
            &["growth", "technology", "people"],
            MetricVector {
                revenue_growth: 0.8,
                ai_adoption: 9.0,
                model_risk: 5.0,
                workforce_readiness: -2.0,
                cash_flow: -3.5,
                execution_confidence: -1.5,
                ..MetricVector::ZERO
            },
        ),
        decision(
            "service-recovery-taskforce",
            "Stand Up a Service Recovery Taskforce",
            "Deploy a cross-functional team to clear backlogs and fix the worst customer journeys first.",
            &[PeopleChange, MeasurementCadence],
            &["service", "operations", "customer"],
            MetricVector {
                revenue_growth: 0.3,
                operating_margin: -0.2,
                workforce_readiness: 2.0,
                customer_trust: 3.0,
                cash_flow: -2.0,
                execution_confidence: 1.0,
                ..MetricVector::ZERO
            },
        ),
    ]
}
