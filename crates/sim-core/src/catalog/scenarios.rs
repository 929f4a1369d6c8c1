use super::{Scenario, ScenarioEvent, Sector};
use crate::metrics::MetricVector;

fn sector(id: &str, name: &str, summary: &str, volatility: f64) -> Sector {
    Sector {
        id: id.to_string(),
        name: name.to_string(),
        summary: summary.to_string(),
        volatility,
    }
}

fn event(quarter: u32, title: &str, summary: &str, effects: MetricVector) -> ScenarioEvent {
    ScenarioEvent {
        quarter,
        title: title.to_string(),
        summary: summary.to_string(),
        effects,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn tags(items: &[(&str, f64)]) -> std::collections::BTreeMap<String, f64> {
    items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub(super) fn builtin_sectors() -> Vec<Sector> {
    vec![
        sector(
            "financial-services",
            "Financial Services",
            "Regulated environment with high conduct, fraud, and model risk sensitivity.",
            1.08,
        ),
        sector(
            "private-equity",
            "Private Equity",
            "Portfolio-level value creation pressure with compressed hold periods and exit scrutiny.",
            1.12,
        ),
        sector(
            "public-sector",
            "Public Sector",
            "Service delivery, trust, and accountability under public and regulatory oversight.",
            1.05,
        ),
        sector(
            "manufacturing",
            "Manufacturing",
            "Margin and resilience pressures across supply chain, planning, and plant operations.",
            1.0,
        ),
        sector(
            "healthcare",
            "Healthcare",
            "Clinical/operational risk, compliance burden, and patient experience constraints.",
            1.08,
        ),
        sector(
            "energy",
            "Energy",
            "Asset-intensive operations balancing resilience, safety, and transition economics.",
            1.0,
        ),
    ]
}

pub(super) fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "bank-risk-and-growth-rebalance".into(),
            sector_id: "financial-services".into(),
            name: "Retail Bank Risk and Growth Rebalance".into(),
            board_mandate: "Increase SME lending growth while reducing model risk and conduct incidents in credit decisioning.".into(),
            tension: "Growth targets are rising while regulators question explainability and fairness of underwriting models.".into(),
            chapter_anchors: strings(&[
                "Declare AI as business redesign tied to P&L and risk.",
                "Redesign decisions and preserve human override.",
                "Govern AI like material enterprise risk.",
            ]),
            board_questions: strings(&[
                "What fair lending control evidence can management show this quarter?",
                "Where is human override explicit in high-impact credit decisions?",
                "What remediation plan exists for regulator findings within one board cycle?",
            ]),
            priority_decision_ids: strings(&[
                "risk-and-model-governance",
                "responsible-ai-charter",
                "regulatory-prep-sprint",
                "board-dashboard-cadence",
                "workflow-redesign",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: -0.6,
                operating_margin: 0.2,
                ai_adoption: 4.0,
                model_risk: 8.0,
                workforce_readiness: -2.0,
                customer_trust: -5.0,
                cash_flow: 1.0,
                execution_confidence: -2.0,
            },
            preferred_tags: tags(&[
                ("risk", 1.4),
                ("governance", 1.3),
                ("legal", 1.2),
                ("product", 1.1),
                ("customer", 1.1),
                ("data", 1.15),
            ]),
            discouraged_decision_ids: strings(&[
                "defer-governance-to-later",
                "cost-cut-through-automation",
            ]),
            events: vec![
                event(
                    2,
                    "Regulatory Thematic Review",
                    "Supervisor requests evidence of model governance and bias controls across lending workflows.",
                    MetricVector {
                        model_risk: 4.5,
                        customer_trust: -2.0,
                        execution_confidence: -2.4,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    5,
                    "Credit Default Spike",
                    "Default rates increase in one segment, raising board scrutiny on underwriting quality.",
                    MetricVector {
                        revenue_growth: -0.8,
                        model_risk: 3.5,
                        operating_margin: -0.4,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    8,
                    "Consumer Press Coverage",
                    "Media reports challenge customer fairness in lending outcomes, stressing trust and response speed.",
                    MetricVector {
                        customer_trust: -4.0,
                        model_risk: 2.0,
                        execution_confidence: -2.0,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
        Scenario {
            id: "pe-portfolio-value-creation".into(),
            sector_id: "private-equity".into(),
            name: "PE Portfolio Value Creation Sprint".into(),
            board_mandate: "Deliver measurable EBITDA improvement across a portfolio company within 12 months ahead of exit.".into(),
            tension: "The investment committee expects hard value realization while technology debt slows deployment.".into(),
            chapter_anchors: strings(&[
                "Embed AI into core workflows or stop funding it.",
                "Fix operating foundations while delivering quick wins.",
                "Measure outcomes and quarterly value realization.",
            ]),
            board_questions: strings(&[
                "Which workflow now has auditable EBITDA impact and named owner?",
                "Which pilots are being defunded for not crossing production gates?",
                "How credible is this value story under buyer diligence conditions?",
            ]),
            priority_decision_ids: strings(&[
                "ai-value-pool-map",
                "workflow-redesign",
                "data-foundation-program",
                "board-dashboard-cadence",
                "vendor-consolidation",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: 0.3,
                operating_margin: -1.2,
                ai_adoption: 2.0,
                model_risk: 3.0,
                workforce_readiness: -5.0,
                customer_trust: -1.0,
                cash_flow: -8.0,
                execution_confidence: -4.0,
            },
            preferred_tags: tags(&[
                ("finance", 1.3),
                ("operations", 1.2),
                ("portfolio", 1.3),
                ("cost", 1.2),
                ("m&a", 1.15),
                ("data", 1.1),
            ]),
            discouraged_decision_ids: strings(&["defer-governance-to-later"]),
            events: vec![
                event(
                    3,
                    "Investment Committee Gate",
                    "Sponsors demand proof of value attribution by workflow before releasing additional funding.",
                    MetricVector {
                        execution_confidence: -2.5,
                        cash_flow: -2.8,
                        revenue_growth: -0.5,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    6,
                    "Vendor Renewal Shock",
                    "Core AI vendor increases contract terms, forcing rapid portfolio standardization decisions.",
                    MetricVector {
                        cash_flow: -3.5,
                        operating_margin: -0.6,
                        model_risk: 1.2,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    9,
                    "Exit Diligence Dry Run",
                    "Buyer advisers request evidence of controlled, transferable AI operating capability.",
                    MetricVector {
                        model_risk: 2.0,
                        execution_confidence: -2.0,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
        Scenario {
            id: "public-sector-service-recovery".into(),
            sector_id: "public-sector".into(),
            name: "Public Service Recovery and Trust".into(),
            board_mandate: "Reduce citizen backlog and improve case handling speed while maintaining accountability and transparency.".into(),
            tension: "Service demand has surged and political stakeholders challenge fairness and explainability of automation.".into(),
            chapter_anchors: strings(&[
                "AI is leadership accountability, not delegated technology activity.",
                "Redesign decision architecture for high-impact public decisions.",
                "Maintain human agency and intervention capability.",
            ]),
            board_questions: strings(&[
                "Can citizens and auditors trace decisions end-to-end?",
                "Where do case workers retain authority to override automation?",
                "What service metric proves outcomes improved without fairness loss?",
            ]),
            priority_decision_ids: strings(&[
                "risk-and-model-governance",
                "scenario-war-gaming",
                "skill-acceleration",
                "workflow-redesign",
                "board-dashboard-cadence",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: -0.9,
                operating_margin: -0.4,
                ai_adoption: 3.0,
                model_risk: 6.0,
                workforce_readiness: -3.0,
                customer_trust: -8.0,
                cash_flow: -4.0,
                execution_confidence: -3.5,
            },
            preferred_tags: tags(&[
                ("governance", 1.3),
                ("board", 1.2),
                ("ethics", 1.25),
                ("people", 1.15),
                ("service", 1.2),
                ("compliance", 1.2),
            ]),
            discouraged_decision_ids: strings(&[
                "defer-governance-to-later",
                "cost-cut-through-automation",
                "customer-facing-ai",
            ]),
            events: vec![
                event(
                    2,
                    "Parliamentary Query",
                    "Oversight committee requests explainability and intervention evidence for case triage decisions.",
                    MetricVector {
                        customer_trust: -2.8,
                        execution_confidence: -2.0,
                        model_risk: 2.2,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    5,
                    "Case Backlog Surge",
                    "Unexpected demand spike strains teams and reveals workflow bottlenecks in assisted decisioning.",
                    MetricVector {
                        operating_margin: -0.6,
                        workforce_readiness: -2.4,
                        revenue_growth: -0.5,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    8,
                    "Audit Finding",
                    "Internal audit identifies weak logging controls in one automated path.",
                    MetricVector {
                        model_risk: 3.6,
                        customer_trust: -2.1,
                        cash_flow: -1.2,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
        Scenario {
            id: "manufacturing-network-resilience".into(),
            sector_id: "manufacturing".into(),
            name: "Manufacturing Network Resilience".into(),
            board_mandate: "Improve forecast accuracy and plant throughput while reducing supply chain volatility.".into(),
            tension: "Operational leaders want speed, but data quality and process fragmentation create hidden failure risk.".into(),
            chapter_anchors: strings(&[
                "Fix data and operating foundations you have been avoiding.",
                "Embed AI into core workflows for measurable cycle-time reduction.",
                "Measure learning velocity and execution quality.",
            ]),
            board_questions: strings(&[
                "Which plant workflow has moved from pilot to controlled production?",
                "How are upstream forecast gains protected from downstream bottlenecks?",
                "Where is data ownership still blocking operational scale?",
            ]),
            priority_decision_ids: strings(&[
                "data-foundation-program",
                "legacy-modernization",
                "workflow-redesign",
                "skill-acceleration",
                "board-dashboard-cadence",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: -0.3,
                operating_margin: -1.0,
                ai_adoption: 5.0,
                model_risk: 2.0,
                workforce_readiness: -4.0,
                customer_trust: -2.0,
                cash_flow: -3.0,
                execution_confidence: -3.0,
            },
            preferred_tags: tags(&[
                ("operations", 1.35),
                ("platform", 1.2),
                ("data", 1.25),
                ("people", 1.1),
                ("strategy", 1.1),
            ]),
            discouraged_decision_ids: strings(&["defer-governance-to-later"]),
            events: vec![
                event(
                    3,
                    "Supplier Disruption",
                    "A key supplier outage breaks demand planning assumptions and pressures AI forecasting models.",
                    MetricVector {
                        revenue_growth: -0.7,
                        operating_margin: -0.6,
                        model_risk: 2.6,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    6,
                    "Plant Quality Escalation",
                    "Defect rates rise after a process change, exposing weak human-in-the-loop controls.",
                    MetricVector {
                        customer_trust: -2.5,
                        model_risk: 2.2,
                        execution_confidence: -2.2,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    9,
                    "Working Capital Constraint",
                    "Inventory imbalance forces near-term cash controls and portfolio reprioritization.",
                    MetricVector {
                        cash_flow: -3.8,
                        operating_margin: -0.5,
                        revenue_growth: -0.4,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
        Scenario {
            id: "healthcare-clinical-ops-safety".into(),
            sector_id: "healthcare".into(),
            name: "Healthcare Clinical Ops and Safety".into(),
            board_mandate: "Improve patient flow and coding accuracy while maintaining strict safety and compliance standards.".into(),
            tension: "Leaders need efficiency gains but cannot tolerate opaque decisions in high-stakes pathways.".into(),
            chapter_anchors: strings(&[
                "Redesign decision rights for critical workflows.",
                "Govern AI as enterprise risk with intervention mechanisms.",
                "Preserve human agency in high-impact decisions.",
            ]),
            board_questions: strings(&[
                "What clinical pathway still lacks explicit override safeguards?",
                "How fast can an unsafe model be suspended in production?",
                "Which patient-flow workflow has shown measurable quality gains?",
            ]),
            priority_decision_ids: strings(&[
                "risk-and-model-governance",
                "responsible-ai-charter",
                "workflow-redesign",
                "skill-acceleration",
                "regulatory-prep-sprint",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: 0.1,
                operating_margin: -0.7,
                ai_adoption: 4.0,
                model_risk: 7.0,
                workforce_readiness: -3.0,
                customer_trust: -4.0,
                cash_flow: -2.0,
                execution_confidence: -2.0,
            },
            preferred_tags: tags(&[
                ("risk", 1.35),
                ("compliance", 1.25),
                ("people", 1.2),
                ("governance", 1.25),
                ("operations", 1.1),
                ("ethics", 1.3),
            ]),
            discouraged_decision_ids: strings(&[
                "defer-governance-to-later",
                "cost-cut-through-automation",
            ]),
            events: vec![
                event(
                    2,
                    "Clinical Safety Alert",
                    "A near-miss in triage prioritization triggers mandatory review of override protocols.",
                    MetricVector {
                        model_risk: 3.8,
                        customer_trust: -2.7,
                        execution_confidence: -2.4,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    5,
                    "Payer Audit Wave",
                    "External audit demands stronger traceability and accuracy evidence for coding support models.",
                    MetricVector {
                        model_risk: 2.6,
                        cash_flow: -1.8,
                        operating_margin: -0.4,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    8,
                    "Staff Attrition Spike",
                    "Critical workforce attrition slows workflow redesign and supervision quality.",
                    MetricVector {
                        workforce_readiness: -3.5,
                        ai_adoption: -1.2,
                        execution_confidence: -2.1,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
        Scenario {
            id: "energy-grid-optimization-and-compliance".into(),
            sector_id: "energy".into(),
            name: "Energy Grid Optimization and Compliance".into(),
            board_mandate: "Increase asset utilization and demand balancing while preserving safety and regulatory compliance.".into(),
            tension: "Operational complexity is rising as market volatility stresses decision speed and governance controls.".into(),
            chapter_anchors: strings(&[
                "Fix operating foundations and data control.",
                "Treat governance and failure readiness as strategic capability.",
                "Measure business impact and operational learning velocity.",
            ]),
            board_questions: strings(&[
                "Which safety-critical decisions require mandatory human hold points?",
                "How resilient is the model operating layer under demand volatility?",
                "Where are risk and value metrics jointly reviewed at board cadence?",
            ]),
            priority_decision_ids: strings(&[
                "data-foundation-program",
                "risk-and-model-governance",
                "scenario-war-gaming",
                "legacy-modernization",
                "board-dashboard-cadence",
            ]),
            initial_metric_shift: MetricVector {
                revenue_growth: -0.2,
                operating_margin: -0.8,
                ai_adoption: 5.0,
                model_risk: 4.0,
                workforce_readiness: -2.0,
                customer_trust: -2.0,
                cash_flow: -2.5,
                execution_confidence: -2.5,
            },
            preferred_tags: tags(&[
                ("platform", 1.2),
                ("governance", 1.2),
                ("risk", 1.25),
                ("operations", 1.25),
                ("ecosystem", 1.1),
            ]),
            discouraged_decision_ids: strings(&["defer-governance-to-later"]),
            events: vec![
                event(
                    3,
                    "Demand Volatility Shock",
                    "Unexpected consumption patterns reduce forecast reliability and increase dispatch pressure.",
                    MetricVector {
                        revenue_growth: -0.5,
                        model_risk: 2.2,
                        execution_confidence: -2.0,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    6,
                    "Safety Incident Investigation",
                    "Regulator opens investigation into one operational optimization workflow.",
                    MetricVector {
                        customer_trust: -2.4,
                        model_risk: 3.2,
                        operating_margin: -0.5,
                        ..MetricVector::ZERO
                    },
                ),
                event(
                    9,
                    "Trading Margin Compression",
                    "Market pricing shifts compress margins and force portfolio reprioritization.",
                    MetricVector {
                        operating_margin: -0.7,
                        cash_flow: -2.6,
                        revenue_growth: -0.4,
                        ..MetricVector::ZERO
                    },
                ),
            ],
        },
    ]
}
