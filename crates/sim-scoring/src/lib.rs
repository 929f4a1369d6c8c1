//! Scoring models: outcome dimensions, the blended outcome score and the
//! synthetic board pulse.
//!
//! Everything here is a pure function of its inputs. Scores are recomputed on
//! demand from session state and never stored as authoritative values.

mod pulse;

pub use pulse::{board_pulse, role_support_score, BoardPulse, Stance, VoiceStance};

use serde::{Deserialize, Serialize};
use sim_core::{clamp, MetricVector};

/// Number of principles a session can cover.
pub const PRINCIPLE_COUNT: usize = 7;

/// `(value - min) / (max - min)` clamped to `[0, 1]`; zero on a degenerate
/// range.
pub fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    clamp((value - min) / (max - min), 0.0, 1.0)
}

/// `1 - normalized`, for metrics where lower is better.
pub fn inverse_normalized(value: f64, min: f64, max: f64) -> f64 {
    1.0 - normalized(value, min, max)
}

/// Inputs the scorer reads from a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreInput<'a> {
    pub metrics: &'a MetricVector,
    pub principles_covered: usize,
    pub incidents: u32,
}

/// Five outcome dimensions, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDimensions {
    pub business_value: f64,
    pub decision_quality: f64,
    pub leadership_capability: f64,
    pub speed_to_impact: f64,
    pub risk_control: f64,
}

impl OutcomeDimensions {
    /// Weighted composite used by the overall blend.
    pub fn composite(&self) -> f64 {
        self.business_value * 0.26
            + self.decision_quality * 0.24
            + self.leadership_capability * 0.16
            + self.speed_to_impact * 0.16
            + self.risk_control * 0.18
    }
}

/// Qualitative band for an overall score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Strong,
    Mixed,
    Watchlist,
}

impl Rating {
    /// Band thresholds: 85, 70 and 55, inclusive lower bounds.
    pub fn from_score(overall: f64) -> Rating {
        if overall >= 85.0 {
            Rating::Excellent
        } else if overall >= 70.0 {
            Rating::Strong
        } else if overall >= 55.0 {
            Rating::Mixed
        } else {
            Rating::Watchlist
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Strong => "Strong",
            Rating::Mixed => "Mixed",
            Rating::Watchlist => "Watchlist",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived scorecard for a session at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub overall: f64,
    pub rating: Rating,
    pub incidents: u32,
    pub principles_covered: usize,
    pub outcome_dimensions: OutcomeDimensions,
}

fn coverage(principles_covered: usize) -> f64 {
    normalized(principles_covered as f64, 0.0, PRINCIPLE_COUNT as f64)
}

fn incident_headroom(incidents: u32) -> f64 {
    inverse_normalized(f64::from(incidents), 0.0, 4.0)
}

pub fn outcome_dimensions(input: &ScoreInput<'_>) -> OutcomeDimensions {
    let m = input.metrics;
    let revenue = normalized(m.revenue_growth, -3.0, 12.0);
    let confidence = normalized(m.execution_confidence, 20.0, 95.0);
    let low_risk = inverse_normalized(m.model_risk, 0.0, 100.0);
    let trust = normalized(m.customer_trust, 25.0, 95.0);

    let business_value = revenue * 0.46
        + normalized(m.operating_margin, 4.0, 28.0) * 0.32
        + normalized(m.cash_flow, 40.0, 140.0) * 0.22;
    let decision_quality = confidence * 0.44 + low_risk * 0.36 + trust * 0.2;
    let leadership_capability = coverage(input.principles_covered) * 0.35
        + normalized(m.workforce_readiness, 0.0, 100.0) * 0.35
        + confidence * 0.3;
    let speed_to_impact =
        normalized(m.ai_adoption, 0.0, 100.0) * 0.4 + revenue * 0.25 + confidence * 0.35;
    let risk_control = low_risk * 0.5 + trust * 0.2 + incident_headroom(input.incidents) * 0.3;

    let scale = |v: f64| clamp(v * 100.0, 0.0, 100.0);
    OutcomeDimensions {
        business_value: scale(business_value),
        decision_quality: scale(decision_quality),
        leadership_capability: scale(leadership_capability),
        speed_to_impact: scale(speed_to_impact),
        risk_control: scale(risk_control),
    }
}

/// Overall score in `[0, 100]`.
///
/// Blend: metric composite 44%, dimension composite 32%, principle coverage
/// 16%, resilience 8%; minus 2.8 per incident and 0.18 per point of
/// execution confidence below 55.
pub fn outcome_score(input: &ScoreInput<'_>) -> f64 {
    let m = input.metrics;
    let metric_score = normalized(m.revenue_growth, -3.0, 12.0) * 18.0
        + normalized(m.operating_margin, 4.0, 28.0) * 16.0
        + normalized(m.ai_adoption, 0.0, 100.0) * 16.0
        + inverse_normalized(m.model_risk, 0.0, 100.0) * 17.0
        + normalized(m.workforce_readiness, 0.0, 100.0) * 13.0
        + normalized(m.customer_trust, 0.0, 100.0) * 10.0
        + normalized(m.cash_flow, 40.0, 140.0) * 10.0;
    let principle_score = coverage(input.principles_covered) * 100.0;
    let dimension_composite = outcome_dimensions(input).composite();
    let resilience = incident_headroom(input.incidents) * 60.0
        + normalized(m.execution_confidence, 20.0, 95.0) * 40.0;

    let incident_penalty = f64::from(input.incidents) * 2.8;
    let execution_penalty = (55.0 - m.execution_confidence).max(0.0) * 0.18;

    let blended = metric_score * 0.44
        + dimension_composite * 0.32
        + principle_score * 0.16
        + resilience * 0.08;
    clamp(blended - incident_penalty - execution_penalty, 0.0, 100.0)
}

pub fn scorecard(input: &ScoreInput<'_>) -> Scorecard {
    let overall = outcome_score(input);
    Scorecard {
        overall,
        rating: Rating::from_score(overall),
        incidents: input.incidents,
        principles_covered: input.principles_covered,
        outcome_dimensions: outcome_dimensions(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::MetricKind;

    fn input(metrics: &MetricVector, covered: usize, incidents: u32) -> ScoreInput<'_> {
        ScoreInput {
            metrics,
            principles_covered: covered,
            incidents,
        }
    }

    #[test]
    fn rating_thresholds_are_inclusive() {
        assert_eq!(Rating::from_score(85.0), Rating::Excellent);
        assert_eq!(Rating::from_score(84.99), Rating::Strong);
        assert_eq!(Rating::from_score(70.0), Rating::Strong);
        assert_eq!(Rating::from_score(69.99), Rating::Mixed);
        assert_eq!(Rating::from_score(55.0), Rating::Mixed);
        assert_eq!(Rating::from_score(54.99), Rating::Watchlist);
    }

    #[test]
    fn degenerate_range_normalizes_to_zero() {
        assert_eq!(normalized(5.0, 3.0, 3.0), 0.0);
        assert_eq!(normalized(50.0, 0.0, 100.0), 0.5);
        assert_eq!(inverse_normalized(150.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn incidents_lower_the_score() {
        let m = MetricVector::baseline();
        let clean = outcome_score(&input(&m, 3, 0));
        let hit = outcome_score(&input(&m, 3, 2));
        assert!(hit < clean);
    }

    #[test]
    fn coverage_raises_leadership() {
        let m = MetricVector::baseline();
        let none = outcome_dimensions(&input(&m, 0, 0));
        let all = outcome_dimensions(&input(&m, 7, 0));
        assert!(all.leadership_capability > none.leadership_capability);
        assert_eq!(all.business_value, none.business_value);
    }

    #[test]
    fn rating_serializes_as_label() {
        let json = serde_json::to_string(&Rating::Watchlist).unwrap();
        assert_eq!(json, "\"Watchlist\"");
    }

    fn metric_strategy() -> impl Strategy<Value = MetricVector> {
        proptest::collection::vec(-500.0f64..500.0, 8).prop_map(|vals| {
            let mut m = MetricVector::ZERO;
            for (kind, v) in MetricKind::ALL.iter().zip(vals) {
                *m.get_mut(*kind) = v;
            }
            m
        })
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(m in metric_strategy(), covered in 0usize..12, incidents in 0u32..20) {
            let card = scorecard(&input(&m, covered, incidents));
            prop_assert!((0.0..=100.0).contains(&card.overall));
            let d = card.outcome_dimensions;
            for v in [d.business_value, d.decision_quality, d.leadership_capability, d.speed_to_impact, d.risk_control] {
                prop_assert!((0.0..=100.0).contains(&v));
            }
            prop_assert_eq!(card.rating, Rating::from_score(card.overall));
        }
    }
}
