//! Markdown renderings of tuning and matrix results.

use crate::matrix::MatrixResult;
use crate::tuning::TuningResult;

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

pub fn tuning_markdown(result: &TuningResult) -> String {
    let best = &result.best_result;
    let s = &best.summary;
    let c = &result.coverage;
    let mut lines = vec![
        "# AI Transformation Simulation Tuning Report".to_string(),
        String::new(),
        format!("Generated: {}", result.generated_at.to_rfc3339()),
        String::new(),
        "Coverage:".to_string(),
        format!(
            "- Roles: {}, scenarios: {}, seeds/scenario: {}, episodes per candidate: {}",
            c.roles, c.scenarios, c.seeds_per_scenario, c.episodes
        ),
        String::new(),
        "## Best Profile".to_string(),
        String::new(),
        format!("Name: {}", best.profile_name),
        format!("Average score: {:.2}", s.avg_score),
        format!("Excellent outcome rate: {}", percent(s.excellent_rate)),
        format!("Strong-or-better rate: {}", percent(s.strong_rate)),
        format!("Average incidents: {:.2}", s.avg_incidents),
        format!("Business value: {:.2}", s.avg_business_value),
        format!("Decision quality: {:.2}", s.avg_decision_quality),
        format!("Leadership capability: {:.2}", s.avg_leadership_capability),
        format!("Speed to impact: {:.2}", s.avg_speed_to_impact),
        format!("Risk control: {:.2}", s.avg_risk_control),
        String::new(),
        "```json".to_string(),
        serde_json::to_string_pretty(&best.profile).unwrap_or_else(|_| "{}".to_string()),
        "```".to_string(),
        String::new(),
        "## Leaderboard".to_string(),
        String::new(),
    ];
    for row in &result.leaderboard {
        lines.push(format!(
            "- {}: score {:.2}, excellent {}, incidents {:.2}, decision quality {:.2}",
            row.profile_name,
            row.summary.avg_score,
            percent(row.summary.excellent_rate),
            row.summary.avg_incidents,
            row.summary.avg_decision_quality
        ));
    }
    lines.join("\n")
}

pub fn matrix_markdown(result: &MatrixResult) -> String {
    let s = &result.summary;
    let roles = result
        .episodes
        .iter()
        .map(|e| e.role_id.as_str())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let mut lines = vec![
        "# Scenario Matrix Review".to_string(),
        String::new(),
        format!("Generated: {}", result.generated_at.to_rfc3339()),
        String::new(),
        "Coverage:".to_string(),
        format!(
            "- Episodes: {} ({} scenarios x {} board roles x {} seeds)",
            result.episodes.len(),
            result.scenario_ids.len(),
            roles,
            result.seeds.len()
        ),
        format!("- Average score: {:.2}", s.avg_score),
        format!("- Excellent rate: {}", percent(s.excellent_rate)),
        format!("- Average incidents: {:.2}", s.avg_incidents),
        String::new(),
        "## Role x Scenario Outcomes".to_string(),
        String::new(),
        "| Role | Scenario | Avg Score | Incidents | Decision Quality | Risk Control |".to_string(),
        "|---|---|---:|---:|---:|---:|".to_string(),
    ];
    for row in &result.role_scenario_rows {
        lines.push(format!(
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} |",
            row.role_id,
            row.scenario_name,
            row.avg_score,
            row.avg_incidents,
            row.decision_quality,
            row.risk_control
        ));
    }
    lines.extend([String::new(), "## Improvement Focus".to_string(), String::new()]);
    if result.weak_rows.is_empty() {
        lines.push(
            "- No role-scenario pair fell below thresholds; keep monitoring incident reduction."
                .to_string(),
        );
    }
    for row in &result.weak_rows {
        lines.push(format!(
            "- {} / {}: {}",
            row.role_id, row.scenario_name, row.recommendation
        ));
    }
    lines.join("\n")
}
