//! The session state machine.
//!
//! A [`Simulator`] borrows an immutable [`Catalog`] and carries the
//! [`SimConfig`]; it owns no session state. Every stochastic step draws from
//! the session's own RNG in a fixed order, so a session is reproducible
//! from its seed and its inputs.

use crate::interpret::{dedup_capped, interpret_free_text};
use crate::narrative::{self, QuarterReport};
use crate::session::{DecisionPulse, EventRecord, HistoryRecord, Session, SessionOptions, TurnSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sim_ai::{DecisionPolicy, MenuEntry, PolicyContext};
use sim_core::{
    clamp, round_to, Catalog, Decision, DecisionType, MetricVector, Principle, PromptProfile,
    ScenarioEvent, SimConfig, SimError, SimRng,
};
use sim_scoring::{board_pulse, Scorecard};
use std::collections::BTreeSet;
use tracing::{debug, info};

const DEFAULT_COMPANY: &str = "Northstar Holdings";
const DEFERRAL_DECISION_ID: &str = "defer-governance-to-later";

/// Fixed reply to any turn submitted after completion.
pub const COMPLETED_MESSAGE: &str =
    "Simulation already completed. Start a new session to run another transformation cycle.";

/// Menu categories filled first, in priority order.
const DIVERSITY_ORDER: [DecisionType; 4] = [
    DecisionType::Control,
    DecisionType::Foundation,
    DecisionType::Growth,
    DecisionType::Capability,
];

/// Adverse shock applied when an incident fires.
pub const INCIDENT_SHOCK: MetricVector = MetricVector {
    revenue_growth: 0.0,
    operating_margin: -0.9,
    ai_adoption: 0.0,
    model_risk: 8.0,
    workforce_readiness: 0.0,
    customer_trust: -6.0,
    cash_flow: -2.2,
    execution_confidence: -9.0,
};

const INCIDENT_FLOOR: f64 = 0.015;
const INCIDENT_CEILING: f64 = 0.4;

/// Control incident raised by the risk roll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub title: String,
    pub summary: String,
}

impl Incident {
    fn control_breach() -> Self {
        Self {
            title: "AI Control Incident".to_string(),
            summary: "A high-impact AI workflow breached expected control thresholds, triggering remediation costs and board scrutiny.".to_string(),
        }
    }
}

/// A submitted turn: explicit decision ids, free text, or both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnRequest {
    pub decision_ids: Vec<String>,
    pub free_text: Option<String>,
}

impl TurnRequest {
    pub fn decisions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            decision_ids: ids.into_iter().map(Into::into).collect(),
            free_text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            decision_ids: Vec::new(),
            free_text: Some(text.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnStatus {
    /// A decision package was executed and the quarter advanced.
    Resolved,
    /// Nothing resolved; the text was answered without touching state.
    Answered,
    /// The session had already finished.
    AlreadyCompleted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub status: TurnStatus,
    pub decisions: Vec<Decision>,
    pub narrative: String,
    pub incident: Option<Incident>,
    pub scenario_event: Option<ScenarioEvent>,
    pub package_notes: Vec<String>,
    pub metric_delta: Option<MetricVector>,
    pub scorecard: Scorecard,
}

impl TurnOutcome {
    fn unresolved(status: TurnStatus, narrative: String, scorecard: Scorecard) -> Self {
        Self {
            status,
            decisions: Vec::new(),
            narrative,
            incident: None,
            scenario_event: None,
            package_notes: Vec::new(),
            metric_delta: None,
            scorecard,
        }
    }
}

/// Drives sessions against a shared catalog.
#[derive(Clone, Debug)]
pub struct Simulator<'c> {
    catalog: &'c Catalog,
    config: SimConfig,
}

impl<'c> Simulator<'c> {
    /// Fails when the config is degenerate or the catalog is empty or
    /// inconsistent.
    pub fn new(catalog: &'c Catalog, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        catalog.ensure_populated()?;
        catalog.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Start a new session. Unknown ids fall back to catalog defaults; when
    /// only a scenario is named, its own sector is used.
    pub fn create_session(&self, opts: SessionOptions) -> Result<Session, SimError> {
        let catalog = self.catalog;
        let created_at = opts.created_at.unwrap_or_else(Utc::now);
        let seed = opts
            .seed
            .unwrap_or_else(|| u64::try_from(created_at.timestamp_millis()).unwrap_or(0));
        let mut rng = SimRng::new(seed);

        let role = catalog
            .role_or_default(opts.role_id.as_deref())
            .ok_or(SimError::EmptyCatalog("roles"))?;
        let named_scenario = opts.scenario_id.as_deref().and_then(|id| catalog.scenario(id));
        let sector = match (opts.sector_id.as_deref(), named_scenario) {
            (None, Some(s)) => catalog.sector(&s.sector_id),
            (id, _) => catalog.sector_or_default(id),
        }
        .or_else(|| catalog.sectors.first())
        .ok_or(SimError::EmptyCatalog("sectors"))?;
        let scenario = catalog
            .scenario_for_sector(&sector.id, opts.scenario_id.as_deref())
            .ok_or(SimError::EmptyCatalog("scenarios"))?;

        let id = session_id(&mut rng, &created_at);
        let mut metrics = MetricVector::baseline();
        metrics.add_scaled(&scenario.initial_metric_shift, 1.0);

        let mut session = Session {
            id,
            company_name: opts
                .company_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            created_at,
            seed,
            role: role.clone(),
            sector: sector.clone(),
            scenario: scenario.clone(),
            profile: PromptProfile::resolve(opts.profile.as_ref()),
            metrics: metrics.clamped(),
            turn: 0,
            incidents: 0,
            governance_debt: 0,
            capabilities: BTreeSet::new(),
            principles_covered: BTreeSet::new(),
            history: Vec::new(),
            recent_decision_ids: BTreeSet::new(),
            applied_event_quarters: BTreeSet::new(),
            scenario_event_history: Vec::new(),
            options: Vec::new(),
            last_board_message: String::new(),
            last_turn: None,
            completed: false,
            rng,
        };
        session.options = self.choose_options(&mut session);
        session.last_board_message =
            narrative::meeting_brief(&mut session, self.config.max_turns, &QuarterReport::default());

        info!(
            session = %session.id,
            seed,
            role = %session.role.id,
            scenario = %session.scenario.id,
            "session created"
        );
        Ok(session)
    }

    /// Menu utility of `decision` for the session's current position.
    pub fn decision_utility(&self, session: &Session, decision: &Decision) -> f64 {
        let m = &session.metrics;
        let scenario = &session.scenario;

        let principle_score: f64 = decision
            .principles
            .iter()
            .map(|&p| {
                let fresh = if session.principles_covered.contains(&p) { 0.95 } else { 1.08 };
                session.profile.get(p) * session.role.priorities.get(p) * fresh
            })
            .sum();

        let risk_need = if m.model_risk > 45.0 { 1.0 } else { 0.4 };
        let data_need = if m.ai_adoption < 45.0 { 1.0 } else { 0.5 };
        let people_need = if m.workforce_readiness < 55.0 { 1.0 } else { 0.45 };
        let growth_need = if m.revenue_growth < 6.0 { 1.0 } else { 0.55 };
        let trust_need = if m.customer_trust < 70.0 { 1.0 } else { 0.6 };
        let cash_need = if m.cash_flow < 80.0 { 1.1 } else { 0.6 };

        let tagged = |a: &str, b: &str| decision.has_tag(a) || decision.has_tag(b);
        let mut tag_score = 0.0;
        if tagged("risk", "governance") {
            tag_score += 1.6 * risk_need;
        }
        if tagged("data", "platform") {
            tag_score += 1.5 * data_need;
        }
        if tagged("people", "talent") {
            tag_score += 1.4 * people_need;
        }
        if tagged("growth", "product") {
            tag_score += 1.3 * growth_need;
        }
        if decision.has_tag("customer") {
            tag_score += 1.2 * trust_need;
        }
        if tagged("finance", "cost") {
            tag_score += 1.1 * cash_need;
        }
        tag_score += decision
            .tags
            .iter()
            .map(|t| scenario.preferred_bonus(t))
            .sum::<f64>();
        if scenario.is_discouraged(&decision.id) {
            tag_score -= 6.4;
        }
        if scenario.is_priority(&decision.id) && !session.has_taken(&decision.id) {
            tag_score += 2.2;
        }

        let repetition = if session.used_before(&decision.id) { -3.4 } else { 0.0 };
        let strain = if decision.effects.execution_confidence < 0.0 { -1.2 } else { 0.0 };
        principle_score + tag_score + repetition + strain
    }

    /// Eligible decisions (outside the recent window), best utility first.
    /// Equal utilities keep catalog order.
    pub fn ranked_decisions(&self, session: &Session) -> Vec<MenuEntry<'c>> {
        let mut scored: Vec<MenuEntry<'c>> = self
            .catalog
            .decisions
            .iter()
            .map(|d| MenuEntry {
                decision: d,
                utility: self.decision_utility(session, d),
            })
            .collect();
        scored.sort_by(|a, b| b.utility.total_cmp(&a.utility));
        scored.retain(|e| !session.recent_decision_ids.contains(&e.decision.id));
        scored
    }

    /// Build the next menu: one pick per category, padding by utility, then
    /// one risky trap drawn from the low-utility tail.
    pub fn choose_options(&self, session: &mut Session) -> Vec<String> {
        let ranked = self.ranked_decisions(session);
        let slots = self.config.option_count.saturating_sub(1);
        let mut picks: Vec<&Decision> = Vec::with_capacity(self.config.option_count);

        for kind in DIVERSITY_ORDER {
            if picks.len() >= slots {
                break;
            }
            let found = ranked
                .iter()
                .find(|e| e.decision.decision_type() == kind && !picks.iter().any(|p| p.id == e.decision.id));
            if let Some(entry) = found {
                picks.push(entry.decision);
            }
        }
        for entry in &ranked {
            if picks.len() >= slots {
                break;
            }
            if !picks.iter().any(|p| p.id == entry.decision.id) {
                picks.push(entry.decision);
            }
        }

        let unpicked = |e: &&MenuEntry<'c>| !picks.iter().any(|p| p.id == e.decision.id);
        let risky_tail: Vec<&Decision> = ranked[ranked.len().saturating_sub(8)..]
            .iter()
            .filter(|e| e.decision.is_risky())
            .filter(unpicked)
            .map(|e| e.decision)
            .collect();
        let trap_pool = if risky_tail.is_empty() {
            ranked[ranked.len().saturating_sub(5)..]
                .iter()
                .filter(unpicked)
                .map(|e| e.decision)
                .collect()
        } else {
            risky_tail
        };
        if let Some(trap) = session.rng.pick(&trap_pool).copied() {
            picks.push(trap);
        }

        picks.truncate(self.config.option_count);
        picks.into_iter().map(|d| d.id.clone()).collect()
    }

    /// Current menu resolved against the catalog, in display order.
    pub fn menu(&self, session: &Session) -> Vec<&'c Decision> {
        session
            .options
            .iter()
            .filter_map(|id| self.catalog.decision(id))
            .collect()
    }

    /// Current menu annotated with utilities, for autoplay policies.
    pub fn menu_entries(&self, session: &Session) -> Vec<MenuEntry<'c>> {
        self.menu(session)
            .into_iter()
            .map(|d| MenuEntry {
                decision: d,
                utility: self.decision_utility(session, d),
            })
            .collect()
    }

    /// Resolve one turn. Completed sessions and unresolvable input leave
    /// the session untouched.
    pub fn apply_turn(&self, session: &mut Session, request: &TurnRequest) -> TurnOutcome {
        if session.completed {
            return TurnOutcome::unresolved(
                TurnStatus::AlreadyCompleted,
                COMPLETED_MESSAGE.to_string(),
                session.scorecard(),
            );
        }

        let decisions = self.resolve_package(session, request);
        if decisions.is_empty() {
            // Leading menu slots: the best pick of the first two categories.
            let top: Vec<&Decision> = self.menu(session).into_iter().take(2).collect();
            let text = request.free_text.as_deref().unwrap_or_default();
            let answer = narrative::answer_ad_hoc(session, text, &top, self.config.max_turns);
            return TurnOutcome::unresolved(TurnStatus::Answered, answer, session.scorecard());
        }

        let before = session.metrics;
        self.apply_drift(session);
        let event = self.apply_scenario_event(session);

        let mut multipliers = Vec::with_capacity(decisions.len());
        for (index, decision) in decisions.iter().enumerate() {
            let intensity = if index == 0 { 1.0 } else { self.config.secondary_dampening };
            multipliers.push(self.apply_decision(session, decision, intensity));
        }
        let notes = apply_package_synergy(session, &decisions);
        let incident = self.roll_incident(session);
        session.metrics = session.metrics.clamped();

        let delta = session.metrics.delta_from(&before);
        let pulses: Vec<DecisionPulse> = decisions
            .iter()
            .map(|d| DecisionPulse {
                decision_id: d.id.clone(),
                decision_title: d.title.clone(),
                pulse: board_pulse(self.catalog, &session.metrics, d),
            })
            .collect();

        let record = HistoryRecord {
            quarter: session.turn + 1,
            quarter_label: narrative::quarter_label(session.turn),
            decision_ids: decisions.iter().map(|d| d.id.clone()).collect(),
            decision_titles: decisions.iter().map(|d| d.title.clone()).collect(),
            timestamp: Utc::now(),
            multipliers: multipliers.iter().map(|m| round_to(*m, 3)).collect(),
            incident: incident.as_ref().map(|i| i.title.clone()),
            scenario_event: event.as_ref().map(|e| e.title.clone()),
            package_notes: notes.clone(),
            metric_delta: delta,
            board_pulse: pulses,
            score_after: round_to(session.scorecard().overall, 2),
        };
        session.history.push(record.clone());
        self.update_recent(session, &record.decision_ids);

        session.turn += 1;
        session.completed = session.turn >= self.config.max_turns;
        session.options = if session.completed {
            Vec::new()
        } else {
            self.choose_options(session)
        };

        let card = session.scorecard();
        let narrative = if session.completed {
            narrative::completion_message(self.config.max_turns, &card)
        } else {
            let report = QuarterReport {
                decisions: &decisions,
                multipliers: &multipliers,
                incident: incident.as_ref(),
                event: event.as_ref(),
                notes: &notes,
                delta: Some(&delta),
            };
            narrative::meeting_brief(session, self.config.max_turns, &report)
        };
        session.last_board_message = narrative.clone();
        session.last_turn = Some(TurnSummary {
            record,
            stage_after: narrative::stage_for_turn(session.turn, self.config.max_turns).to_string(),
            scorecard: card,
        });

        debug!(
            session = %session.id,
            turn = session.turn,
            score = card.overall,
            incidents = session.incidents,
            "turn resolved"
        );
        if session.completed {
            info!(session = %session.id, score = card.overall, rating = %card.rating, "session completed");
        }

        TurnOutcome {
            status: TurnStatus::Resolved,
            decisions: decisions.into_iter().cloned().collect(),
            narrative,
            incident,
            scenario_event: event,
            package_notes: notes,
            metric_delta: Some(delta),
            scorecard: card,
        }
    }

    /// Let `policy` pick one menu option and submit it alone. `None` when
    /// the session is finished or the policy declines.
    pub fn autoplay_turn(
        &self,
        session: &mut Session,
        policy: &mut dyn DecisionPolicy,
    ) -> Option<TurnOutcome> {
        if session.completed {
            return None;
        }
        let menu = self.menu_entries(session);
        let ctx = PolicyContext {
            menu: &menu,
            scenario: &session.scenario,
        };
        let index = policy.choose(&ctx)?;
        let id = menu.get(index)?.decision.id.clone();
        Some(self.apply_turn(session, &TurnRequest::decisions([id])))
    }

    /// Explicit ids first, then ids read from free text; only current menu
    /// entries survive, capped at the package size.
    fn resolve_package(&self, session: &Session, request: &TurnRequest) -> Vec<&'c Decision> {
        let menu = self.menu(session);
        let mut raw = request.decision_ids.clone();
        if let Some(text) = &request.free_text {
            raw.extend(interpret_free_text(text, &menu, self.config.max_decisions_per_turn));
        }
        let valid: Vec<String> = raw
            .into_iter()
            .filter(|id| menu.iter().any(|d| &d.id == id))
            .collect();
        dedup_capped(valid, self.config.max_decisions_per_turn)
            .iter()
            .filter_map(|id| self.catalog.decision(id))
            .collect()
    }

    /// Quarter-over-quarter noise scaled by sector volatility, with an extra
    /// revenue and cash shock every third quarter.
    fn apply_drift(&self, session: &mut Session) {
        let vol = session.sector.volatility;
        let rng = &mut session.rng;
        let mut drift = MetricVector {
            revenue_growth: rng.range(-0.7, 0.9) * vol,
            operating_margin: rng.range(-0.35, 0.5) * vol,
            ai_adoption: rng.range(0.1, 1.1),
            model_risk: rng.range(-0.8, 1.8) * vol,
            workforce_readiness: rng.range(-0.3, 0.8) * vol,
            customer_trust: rng.range(-1.0, 1.1) * vol,
            cash_flow: rng.range(-1.5, 1.3) * vol,
            execution_confidence: rng.range(-1.1, 1.2) * vol,
        };
        if session.turn % 3 == 2 {
            drift.revenue_growth += rng.range(-0.7, 0.5);
            drift.cash_flow += rng.range(-1.9, 0.6);
        }
        session.metrics.add_scaled(&drift, 1.0);
    }

    /// Event scheduled for the upcoming quarter, applied at most once.
    fn apply_scenario_event(&self, session: &mut Session) -> Option<ScenarioEvent> {
        let quarter = session.turn + 1;
        let event = session.scenario.event_for_quarter(quarter)?.clone();
        if !session.applied_event_quarters.insert(quarter) {
            return None;
        }
        session.metrics.add_scaled(&event.effects, 1.0);
        session.scenario_event_history.push(EventRecord {
            quarter,
            title: event.title.clone(),
            summary: event.summary.clone(),
        });
        info!(session = %session.id, quarter, event = %event.title, "scenario event applied");
        Some(event)
    }

    /// Effectiveness of executing `decision` now, in `[0.68, 1.42]`.
    pub fn execution_multiplier(&self, session: &Session, decision: &Decision) -> f64 {
        let alignment = decision
            .principles
            .iter()
            .map(|&p| session.profile.get(p) * session.role.priorities.get(p))
            .sum::<f64>()
            / decision.principles.len().max(1) as f64;

        let mut boost = 1.0;
        let growth_like = decision.has_tag("growth") || decision.has_tag("product");
        if growth_like
            && session.has_taken("data-foundation-program")
            && session.has_taken("risk-and-model-governance")
        {
            boost += 0.08;
        }
        if decision.has_tag("risk") && session.has_taken("board-dashboard-cadence") {
            boost += 0.05;
        }
        if decision.has_tag("people") && session.has_taken("skill-acceleration") {
            boost += 0.05;
        }

        let confidence = clamp(session.metrics.execution_confidence / 75.0, 0.72, 1.25);
        clamp((alignment / 1.05) * boost * confidence, 0.68, 1.42)
    }

    /// Apply one decision's effects; returns the effective multiplier.
    fn apply_decision(&self, session: &mut Session, decision: &Decision, intensity: f64) -> f64 {
        let multiplier = self.execution_multiplier(session, decision) * intensity;
        session.metrics.add_scaled(&decision.effects, multiplier);
        session.principles_covered.extend(decision.principles.iter().copied());
        session.capabilities.insert(decision.id.clone());

        if decision.id == DEFERRAL_DECISION_ID {
            session.governance_debt += 1;
        } else if decision.has_principle(Principle::GovernanceControl) {
            session.governance_debt = session.governance_debt.saturating_sub(1);
        }
        multiplier
    }

    /// Probability that this quarter raises a control incident.
    pub fn incident_probability(&self, session: &Session) -> f64 {
        let m = &session.metrics;
        let governance_pair = session.principles_covered.contains(&Principle::GovernanceControl)
            && session.principles_covered.contains(&Principle::MeasurementCadence);
        let risk_pressure = (m.model_risk - 48.0).max(0.0) / 100.0;
        let debt_pressure = f64::from(session.governance_debt) * 0.08;
        let adoption_gap = if m.ai_adoption > 62.0 && m.workforce_readiness < 52.0 {
            0.09
        } else {
            0.02
        };
        let coverage = if governance_pair { -0.04 } else { 0.03 };
        let priority = -0.015 * session.priorities_done() as f64;
        clamp(
            0.03 + risk_pressure + debt_pressure + adoption_gap + coverage + priority,
            INCIDENT_FLOOR,
            INCIDENT_CEILING,
        )
    }

    /// Roll for an incident; on a hit apply [`INCIDENT_SHOCK`] and count it.
    pub fn roll_incident(&self, session: &mut Session) -> Option<Incident> {
        let chance = self.incident_probability(session);
        if session.rng.unit() >= chance {
            return None;
        }
        session.incidents += 1;
        session.metrics.add_scaled(&INCIDENT_SHOCK, 1.0);
        let incident = Incident::control_breach();
        info!(session = %session.id, chance, incidents = session.incidents, "control incident raised");
        Some(incident)
    }

    /// Recent window: up to `recent_window - 1` ids from the latest history
    /// records, plus the ids just played.
    fn update_recent(&self, session: &mut Session, played: &[String]) {
        let keep = self.config.recent_window.saturating_sub(1);
        let start = session.history.len().saturating_sub(keep);
        let from_history: Vec<&String> = session.history[start..]
            .iter()
            .flat_map(|h| h.decision_ids.iter())
            .collect();
        let tail = &from_history[from_history.len().saturating_sub(keep)..];
        let mut recent: BTreeSet<String> = tail.iter().map(|id| (*id).clone()).collect();
        recent.extend(played.iter().cloned());
        session.recent_decision_ids = recent;
    }
}

/// Package-level adjustments; returns the notes explaining them.
fn apply_package_synergy(session: &mut Session, decisions: &[&Decision]) -> Vec<String> {
    let types: Vec<DecisionType> = decisions.iter().map(|d| d.decision_type()).collect();
    let has = |t: DecisionType| types.contains(&t);
    let m = &mut session.metrics;
    let mut notes = Vec::new();

    if decisions.len() > 1 {
        m.execution_confidence -= 1.3;
        m.cash_flow -= 1.4;
        notes.push("Execution bandwidth reduced by running two major motions in one quarter.".to_string());
    }
    if has(DecisionType::Growth) && has(DecisionType::Control) {
        m.customer_trust += 1.2;
        m.execution_confidence += 1.4;
        notes.push("Balanced growth and control package improved board confidence.".to_string());
    }
    if has(DecisionType::Foundation) && has(DecisionType::Capability) {
        m.ai_adoption += 1.3;
        m.workforce_readiness += 1.7;
        notes.push("Foundation plus capability sequencing accelerated practical adoption.".to_string());
    }
    if has(DecisionType::Growth) && !has(DecisionType::Control) && m.model_risk > 44.0 {
        m.model_risk += 2.4;
        notes.push(
            "Growth-heavy package without control reinforcement increased model risk pressure."
                .to_string(),
        );
    }
    notes
}

fn session_id(rng: &mut SimRng, created_at: &DateTime<Utc>) -> String {
    let number = rng.range(100_000.0, 999_999.0).floor() as u64;
    let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
    format!("sim-{number}-{}", base36(millis))
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(catalog: &Catalog) -> Simulator<'_> {
        Simulator::new(catalog, SimConfig::default()).unwrap()
    }

    fn bank_session(sim: &Simulator<'_>, seed: u64) -> Session {
        sim.create_session(
            SessionOptions::default()
                .role("board-chair")
                .scenario("bank-risk-and-growth-rebalance")
                .seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn base36_matches_radix_encoding() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }

    #[test]
    fn scenario_only_selects_its_sector() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let s = sim
            .create_session(SessionOptions::default().scenario("energy-grid-optimization-and-compliance").seed(3))
            .unwrap();
        assert_eq!(s.sector.id, "energy");
        assert_eq!(s.scenario.id, "energy-grid-optimization-and-compliance");
    }

    #[test]
    fn unknown_ids_degrade_to_defaults() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let s = sim
            .create_session(SessionOptions::default().role("cto").sector("retail").seed(5))
            .unwrap();
        assert_eq!(s.role.id, "board-chair");
        assert_eq!(s.sector.id, "financial-services");
        assert_eq!(s.scenario.id, "bank-risk-and-growth-rebalance");
        assert_eq!(s.company_name, DEFAULT_COMPANY);
    }

    #[test]
    fn malformed_seed_text_fails_fast() {
        let err = SessionOptions::default().seed_text("forty-two").unwrap_err();
        assert!(matches!(err, SimError::InvalidSeed(_)));
    }

    #[test]
    fn scenario_shift_is_applied_once() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let s = bank_session(&sim, 1);
        assert!((s.metrics.model_risk - 54.0).abs() < 1e-9);
        assert!((s.metrics.customer_trust - 57.0).abs() < 1e-9);
    }

    #[test]
    fn menu_is_full_and_diverse() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let s = bank_session(&sim, 42);
        assert_eq!(s.options.len(), 5);
        let menu = sim.menu(&s);
        assert_eq!(menu[0].decision_type(), DecisionType::Control);
        let unique: BTreeSet<&String> = s.options.iter().collect();
        assert_eq!(unique.len(), s.options.len());
    }

    #[test]
    fn trap_slot_comes_from_risky_tail() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        for seed in 0..24 {
            let s = bank_session(&sim, seed);
            let ranked = sim.ranked_decisions(&s);
            let (trap, picks) = s.options.split_last().unwrap();
            assert!(!picks.contains(trap), "seed {seed}: trap duplicates a pick");

            let unpicked = |e: &&MenuEntry<'_>| !picks.contains(&e.decision.id);
            let tail = &ranked[ranked.len().saturating_sub(8)..];
            let risky: Vec<&str> = tail
                .iter()
                .filter(|e| e.decision.is_risky())
                .filter(unpicked)
                .map(|e| e.decision.id.as_str())
                .collect();
            if risky.is_empty() {
                let low = &ranked[ranked.len().saturating_sub(5)..];
                assert!(low.iter().any(|e| &e.decision.id == trap), "seed {seed}");
            } else {
                assert!(risky.contains(&trap.as_str()), "seed {seed}: {trap} not in {risky:?}");
                assert!(catalog.decision(trap).unwrap().is_risky());
            }
        }
    }

    fn drift_delta(sim: &Simulator<'_>, unit: f64, turn: u32) -> MetricVector {
        let mut s = bank_session(sim, 3);
        s.rng = SimRng::fixed(unit);
        s.turn = turn;
        let before = s.metrics;
        sim.apply_drift(&mut s);
        let mut delta = s.metrics;
        delta.add_scaled(&before, -1.0);
        delta
    }

    #[test]
    fn drift_is_scaled_by_sector_volatility() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let low = drift_delta(&sim, 0.0, 0);
        assert!((low.revenue_growth - -0.7 * 1.08).abs() < 1e-9);
        assert!((low.model_risk - -0.8 * 1.08).abs() < 1e-9);
        assert!((low.cash_flow - -1.5 * 1.08).abs() < 1e-9);
        // Adoption drift ignores volatility.
        assert!((low.ai_adoption - 0.1).abs() < 1e-9);

        let high = drift_delta(&sim, 1.0, 0);
        assert!((high.model_risk - 1.8 * 1.08).abs() < 1e-6);
        assert!((high.customer_trust - 1.1 * 1.08).abs() < 1e-6);
        assert!((high.ai_adoption - 1.1).abs() < 1e-6);
    }

    #[test]
    fn every_third_quarter_adds_a_shock() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let calm = drift_delta(&sim, 0.0, 1);
        let shocked = drift_delta(&sim, 0.0, 2);
        assert!((shocked.revenue_growth - calm.revenue_growth - -0.7).abs() < 1e-9);
        assert!((shocked.cash_flow - calm.cash_flow - -1.9).abs() < 1e-9);
        assert!((shocked.model_risk - calm.model_risk).abs() < 1e-12);
        let later = drift_delta(&sim, 0.0, 5);
        assert_eq!(later, shocked);
    }

    #[test]
    fn seeded_drift_stays_in_band() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        for seed in 0..32 {
            let mut s = bank_session(&sim, seed);
            s.turn = 1;
            let before = s.metrics;
            sim.apply_drift(&mut s);
            let mut d = s.metrics;
            d.add_scaled(&before, -1.0);
            assert!((-0.7 * 1.08..0.9 * 1.08).contains(&d.revenue_growth), "seed {seed}");
            assert!((0.1..1.1).contains(&d.ai_adoption), "seed {seed}");
            assert!((-1.0 * 1.08..1.1 * 1.08).contains(&d.customer_trust), "seed {seed}");
            assert!((-1.5 * 1.08..1.3 * 1.08).contains(&d.cash_flow), "seed {seed}");
        }
    }

    #[test]
    fn multiplier_stays_in_band() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        for confidence in [15.0, 56.0, 100.0] {
            s.metrics.execution_confidence = confidence;
            for d in &catalog.decisions {
                let m = sim.execution_multiplier(&s, d);
                assert!((0.68..=1.42).contains(&m), "{} -> {m}", d.id);
            }
        }
    }

    #[test]
    fn capability_boost_needs_prerequisites() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        s.metrics.execution_confidence = 60.0;
        let product = catalog.decision("ai-product-line").unwrap();
        let plain = sim.execution_multiplier(&s, product);
        s.capabilities.insert("data-foundation-program".into());
        s.capabilities.insert("risk-and-model-governance".into());
        let boosted = sim.execution_multiplier(&s, product);
        assert!(boosted > plain || boosted == 1.42);
    }

    #[test]
    fn deferral_accrues_and_governance_repays_debt() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        let defer = catalog.decision("defer-governance-to-later").unwrap();
        let gov = catalog.decision("risk-and-model-governance").unwrap();
        sim.apply_decision(&mut s, defer, 1.0);
        sim.apply_decision(&mut s, defer, 1.0);
        assert_eq!(s.governance_debt, 2);
        sim.apply_decision(&mut s, gov, 1.0);
        assert_eq!(s.governance_debt, 1);
        sim.apply_decision(&mut s, gov, 1.0);
        sim.apply_decision(&mut s, gov, 1.0);
        assert_eq!(s.governance_debt, 0);
    }

    #[test]
    fn incident_probability_is_clamped() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        s.metrics.model_risk = 100.0;
        s.governance_debt = 10;
        assert_eq!(sim.incident_probability(&s), INCIDENT_CEILING);
        s.metrics.model_risk = 0.0;
        s.governance_debt = 0;
        s.principles_covered.insert(Principle::GovernanceControl);
        s.principles_covered.insert(Principle::MeasurementCadence);
        for id in s.scenario.priority_decision_ids.clone() {
            s.capabilities.insert(id);
        }
        assert_eq!(sim.incident_probability(&s), INCIDENT_FLOOR);
    }

    #[test]
    fn mixed_package_synergy_notes() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        s.metrics.model_risk = 60.0;
        let growth = catalog.decision("ai-product-line").unwrap();
        let control = catalog.decision("risk-and-model-governance").unwrap();
        let before = s.metrics;
        let notes = apply_package_synergy(&mut s, &[growth, control]);
        assert_eq!(notes.len(), 2);
        assert!((s.metrics.customer_trust - (before.customer_trust + 1.2)).abs() < 1e-9);
        assert!((s.metrics.execution_confidence - (before.execution_confidence + 0.1)).abs() < 1e-9);

        let before = s.metrics;
        let notes = apply_package_synergy(&mut s, &[growth]);
        assert_eq!(notes.len(), 1);
        assert!((s.metrics.model_risk - (before.model_risk + 2.4)).abs() < 1e-9);
    }

    #[test]
    fn recent_window_keeps_last_three_plus_current() {
        let catalog = Catalog::builtin();
        let sim = simulator(&catalog);
        let mut s = bank_session(&sim, 9);
        for (q, ids) in [["a", "b"], ["c", "d"], ["e", "f"]].iter().enumerate() {
            s.history.push(HistoryRecord {
                quarter: q as u32 + 1,
                quarter_label: narrative::quarter_label(q as u32),
                decision_ids: ids.iter().map(|s| s.to_string()).collect(),
                decision_titles: vec![],
                timestamp: Utc::now(),
                multipliers: vec![],
                incident: None,
                scenario_event: None,
                package_notes: vec![],
                metric_delta: MetricVector::ZERO,
                board_pulse: vec![],
                score_after: 0.0,
            });
        }
        sim.update_recent(&mut s, &["f".to_string(), "e".to_string()]);
        let expected: BTreeSet<String> = ["d", "e", "f"].iter().map(|s| s.to_string()).collect();
        assert_eq!(s.recent_decision_ids, expected);
    }
}
