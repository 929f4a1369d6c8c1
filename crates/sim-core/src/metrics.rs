//! The eight business metrics tracked by a session.
//!
//! [`MetricVector`] is used for levels (the session's current metrics), for
//! decision and event effects, and for per-turn deltas. Missing fields in
//! serialized effects default to zero.

use serde::{Deserialize, Serialize};

/// Named business metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    RevenueGrowth,
    OperatingMargin,
    AiAdoption,
    ModelRisk,
    WorkforceReadiness,
    CustomerTrust,
    CashFlow,
    ExecutionConfidence,
}

impl MetricKind {
    /// All metrics in canonical order.
    pub const ALL: [MetricKind; 8] = [
        MetricKind::RevenueGrowth,
        MetricKind::OperatingMargin,
        MetricKind::AiAdoption,
        MetricKind::ModelRisk,
        MetricKind::WorkforceReadiness,
        MetricKind::CustomerTrust,
        MetricKind::CashFlow,
        MetricKind::ExecutionConfidence,
    ];

    /// Identifier used in narratives and reports.
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::RevenueGrowth => "revenueGrowth",
            MetricKind::OperatingMargin => "operatingMargin",
            MetricKind::AiAdoption => "aiAdoption",
            MetricKind::ModelRisk => "modelRisk",
            MetricKind::WorkforceReadiness => "workforceReadiness",
            MetricKind::CustomerTrust => "customerTrust",
            MetricKind::CashFlow => "cashFlow",
            MetricKind::ExecutionConfidence => "executionConfidence",
        }
    }

    /// Hard `[min, max]` clamp applied after every mutation.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            MetricKind::RevenueGrowth => (-6.0, 18.0),
            MetricKind::OperatingMargin => (2.0, 32.0),
            MetricKind::AiAdoption
            | MetricKind::ModelRisk
            | MetricKind::WorkforceReadiness
            | MetricKind::CustomerTrust => (0.0, 100.0),
            MetricKind::CashFlow => (20.0, 170.0),
            MetricKind::ExecutionConfidence => (15.0, 100.0),
        }
    }

    /// Percentage-point metrics are rendered with a `pp` suffix in deltas.
    pub fn is_percentage_point(self) -> bool {
        matches!(self, MetricKind::RevenueGrowth | MetricKind::OperatingMargin)
    }
}

/// One value per [`MetricKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricVector {
    pub revenue_growth: f64,
    pub operating_margin: f64,
    pub ai_adoption: f64,
    pub model_risk: f64,
    pub workforce_readiness: f64,
    pub customer_trust: f64,
    pub cash_flow: f64,
    pub execution_confidence: f64,
}

impl MetricVector {
    /// All-zero vector, handy as the base of struct-update syntax.
    pub const ZERO: MetricVector = MetricVector {
        revenue_growth: 0.0,
        operating_margin: 0.0,
        ai_adoption: 0.0,
        model_risk: 0.0,
        workforce_readiness: 0.0,
        customer_trust: 0.0,
        cash_flow: 0.0,
        execution_confidence: 0.0,
    };

    /// Starting position of every session before the scenario shift.
    pub fn baseline() -> Self {
        MetricVector {
            revenue_growth: 2.8,
            operating_margin: 14.2,
            ai_adoption: 16.0,
            model_risk: 46.0,
            workforce_readiness: 34.0,
            customer_trust: 62.0,
            cash_flow: 96.0,
            execution_confidence: 56.0,
        }
    }

    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::RevenueGrowth => self.revenue_growth,
            MetricKind::OperatingMargin => self.operating_margin,
            MetricKind::AiAdoption => self.ai_adoption,
            MetricKind::ModelRisk => self.model_risk,
            MetricKind::WorkforceReadiness => self.workforce_readiness,
            MetricKind::CustomerTrust => self.customer_trust,
            MetricKind::CashFlow => self.cash_flow,
            MetricKind::ExecutionConfidence => self.execution_confidence,
        }
    }

    pub fn get_mut(&mut self, kind: MetricKind) -> &mut f64 {
        match kind {
            MetricKind::RevenueGrowth => &mut self.revenue_growth,
            MetricKind::OperatingMargin => &mut self.operating_margin,
            MetricKind::AiAdoption => &mut self.ai_adoption,
            MetricKind::ModelRisk => &mut self.model_risk,
            MetricKind::WorkforceReadiness => &mut self.workforce_readiness,
            MetricKind::CustomerTrust => &mut self.customer_trust,
            MetricKind::CashFlow => &mut self.cash_flow,
            MetricKind::ExecutionConfidence => &mut self.execution_confidence,
        }
    }

    /// Iterate `(kind, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    /// `self += other * factor`, component-wise.
    pub fn add_scaled(&mut self, other: &MetricVector, factor: f64) {
        for kind in MetricKind::ALL {
            *self.get_mut(kind) += other.get(kind) * factor;
        }
    }

    /// Component-wise `self - before`, rounded to two decimals.
    pub fn delta_from(&self, before: &MetricVector) -> MetricVector {
        let mut out = MetricVector::ZERO;
        for kind in MetricKind::ALL {
            *out.get_mut(kind) = round_to(self.get(kind) - before.get(kind), 2);
        }
        out
    }

    /// Copy with every metric pulled inside its hard bounds.
    pub fn clamped(&self) -> MetricVector {
        let mut out = *self;
        for kind in MetricKind::ALL {
            let (lo, hi) = kind.bounds();
            let v = out.get_mut(kind);
            *v = clamp(*v, lo, hi);
        }
        out
    }

    /// True when every metric sits inside its hard bounds.
    pub fn within_bounds(&self) -> bool {
        self.iter().all(|(k, v)| {
            let (lo, hi) = k.bounds();
            v >= lo && v <= hi
        })
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }
}

/// `min(max, max(min, value))`; NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (value * f).round() / f
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn baseline_is_inside_bounds() {
        assert!(MetricVector::baseline().within_bounds());
    }

    #[test]
    fn effects_deserialize_with_missing_fields() {
        let v: MetricVector = serde_json::from_str(r#"{"modelRisk": 4.5}"#).unwrap();
        assert_eq!(v.model_risk, 4.5);
        assert_eq!(v.cash_flow, 0.0);
    }

    #[test]
    fn delta_rounds_to_cents() {
        let before = MetricVector::ZERO;
        let after = MetricVector {
            cash_flow: 1.23456,
            ..MetricVector::ZERO
        };
        assert_eq!(after.delta_from(&before).cash_flow, 1.23);
    }

    proptest! {
        #[test]
        fn clamped_is_always_within_bounds(
            a in -1e6f64..1e6, b in -1e6f64..1e6, c in -1e6f64..1e6, d in -1e6f64..1e6,
            e in -1e6f64..1e6, f in -1e6f64..1e6, g in -1e6f64..1e6, h in -1e6f64..1e6,
        ) {
            let v = MetricVector {
                revenue_growth: a,
                operating_margin: b,
                ai_adoption: c,
                model_risk: d,
                workforce_readiness: e,
                customer_trust: f,
                cash_flow: g,
                execution_confidence: h,
            };
            prop_assert!(v.clamped().within_bounds());
        }
    }
}
