use super::Role;
use crate::principle::Principle::*;
use crate::principle::PrincipleWeights;

fn role(id: &str, name: &str, focus: &str, weights: [f64; 7]) -> Role {
    let [value, governance, data, portfolio, people, agency, cadence] = weights;
    Role {
        id: id.to_string(),
        name: name.to_string(),
        focus: focus.to_string(),
        priorities: PrincipleWeights::from_pairs(&[
            (ValuePools, value),
            (GovernanceControl, governance),
            (DataPlatform, data),
            (PortfolioDiscipline, portfolio),
            (PeopleChange, people),
            (HumanAgency, agency),
            (MeasurementCadence, cadence),
        ]),
    }
}

/// Weights are listed in `Principle::ALL` order.
pub(super) fn builtin_roles() -> Vec<Role> {
    vec![
        role(
            "board-chair",
            "Board Chair",
            "Portfolio balance, governance quality, and long-term value creation.",
            [1.1, 1.2, 1.0, 1.1, 0.95, 1.15, 1.2],
        ),
        role(
            "ceo",
            "CEO",
            "Strategic direction, growth, and execution pace across the enterprise.",
            [1.2, 0.95, 1.0, 1.15, 1.05, 1.05, 1.0],
        ),
        role(
            "cfo",
            "CFO",
            "Capital discipline, margin impact, risk-adjusted return, and control.",
            [1.15, 1.15, 0.95, 1.1, 0.85, 1.0, 1.2],
        ),
        role(
            "coo",
            "COO",
            "Workflow redesign, service quality, and operating resilience.",
            [1.0, 1.0, 1.1, 1.1, 1.15, 1.0, 1.0],
        ),
        role(
            "chief-risk-officer",
            "Chief Risk Officer",
            "AI risk, regulatory readiness, controls, and incident prevention.",
            [0.9, 1.25, 1.05, 0.95, 0.95, 1.15, 1.15],
        ),
    ]
}
