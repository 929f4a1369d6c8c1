//! Headless driver for the board simulation and its tuning harness.

use anyhow::{bail, Context, Result};
use persistence::{persist_best_effort, JsonDirStore};
use serde::{Deserialize, Serialize};
use sim_ai::{DecisionPolicy, GreedyPolicy, PersonaPolicy};
use sim_core::{load_document, Catalog, PromptProfile, SimConfig};
use sim_harness::HarnessConfig;
use sim_runtime::{build_view, Session, SessionOptions, Simulator, TurnRequest, TurnStatus};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PROFILE_PATH: &str = "config/tuned-prompt-profile.json";
const DEFAULT_OUT_DIR: &str = "harness-output";

const USAGE: &str = "usage: board-sim [--config FILE] [--packs DIR] <play|tune|matrix|catalog|version> [options]
  play     --seed N --role ID --sector ID --scenario ID --company NAME
           --policy greedy|persona:<id>|interactive --profile FILE --store DIR --json
  tune     --rounds N --out DIR --profile-out FILE --sequential
  matrix   --profile FILE --out DIR --sequential
  catalog";

/// Config file layout; every section is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    sim: SimConfig,
    harness: HarnessConfig,
}

#[derive(Debug, Default)]
struct Args {
    command: String,
    config: Option<PathBuf>,
    packs: Option<PathBuf>,
    seed: Option<String>,
    role: Option<String>,
    sector: Option<String>,
    scenario: Option<String>,
    company: Option<String>,
    policy: Option<String>,
    profile: Option<PathBuf>,
    profile_out: Option<PathBuf>,
    out: Option<PathBuf>,
    store: Option<PathBuf>,
    rounds: Option<u32>,
    sequential: bool,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().with_context(|| format!("{name} expects a value"));
        match arg.as_str() {
            "--config" => args.config = Some(value("--config")?.into()),
            "--packs" => args.packs = Some(value("--packs")?.into()),
            "--seed" => args.seed = Some(value("--seed")?),
            "--role" => args.role = Some(value("--role")?),
            "--sector" => args.sector = Some(value("--sector")?),
            "--scenario" => args.scenario = Some(value("--scenario")?),
            "--company" => args.company = Some(value("--company")?),
            "--policy" => args.policy = Some(value("--policy")?),
            "--profile" => args.profile = Some(value("--profile")?.into()),
            "--profile-out" => args.profile_out = Some(value("--profile-out")?.into()),
            "--out" => args.out = Some(value("--out")?.into()),
            "--store" => args.store = Some(value("--store")?.into()),
            "--rounds" => {
                let raw = value("--rounds")?;
                args.rounds = Some(raw.parse().with_context(|| format!("bad --rounds {raw:?}"))?);
            }
            "--sequential" => args.sequential = true,
            "--json" => args.json = true,
            "-h" | "--help" => args.command = "help".into(),
            other if other.starts_with("--") => bail!("unknown flag {other}\n{USAGE}"),
            other if args.command.is_empty() => args.command = other.to_string(),
            other => bail!("unexpected argument {other}\n{USAGE}"),
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<FileConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_document::<FileConfig>(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => FileConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        cfg.harness.rounds = rounds;
    }
    if args.sequential {
        cfg.harness.parallel = false;
    }
    Ok(cfg)
}

fn load_catalog(args: &Args, max_turns: u32) -> Result<Catalog> {
    let base = Catalog::builtin();
    let Some(dir) = &args.packs else {
        return Ok(base);
    };
    let packs = modkit::load_packs(dir).with_context(|| format!("loading packs from {}", dir.display()))?;
    let catalog = modkit::apply_packs(&base, &packs, max_turns).context("merging scenario packs")?;
    info!(packs = packs.len(), scenarios = catalog.scenarios.len(), "catalog extended");
    Ok(catalog)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    write_text(path, &text)
}

fn session_options(args: &Args) -> Result<SessionOptions> {
    let mut opts = SessionOptions {
        role_id: args.role.clone(),
        sector_id: args.sector.clone(),
        scenario_id: args.scenario.clone(),
        company_name: args.company.clone(),
        ..SessionOptions::default()
    };
    if let Some(seed) = &args.seed {
        opts = opts.seed_text(seed)?;
    }
    if let Some(path) = &args.profile {
        opts = opts.profile(PromptProfile::load_or_default(path).weights().clone());
    }
    Ok(opts)
}

fn print_quarter(session: &Session) {
    let Some(last) = &session.last_turn else {
        return;
    };
    let r = &last.record;
    println!(
        "{} | {} | score {:.1} ({}) | incidents {}",
        r.quarter_label,
        r.decision_titles.join(" + "),
        last.scorecard.overall,
        last.scorecard.rating,
        session.incidents
    );
    if let Some(event) = &r.scenario_event {
        println!("    event: {event}");
    }
    if let Some(incident) = &r.incident {
        println!("    incident: {incident}");
    }
}

fn print_menu(sim: &Simulator<'_>, session: &Session) {
    for option in build_view(sim, session).options {
        let mark = if option.recommended { "*" } else { " " };
        println!(
            "  {}{} {} [{}] {}",
            mark,
            option.index,
            option.title,
            option.option_type.label(),
            option.tradeoff
        );
    }
}

fn play_interactive(sim: &Simulator<'_>, session: &mut Session) -> Result<()> {
    println!("{}\n", session.last_board_message);
    print_menu(sim, session);
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = sim.apply_turn(session, &TurnRequest::text(line));
        println!("\n{}\n", outcome.narrative);
        match outcome.status {
            TurnStatus::Resolved if !session.completed => print_menu(sim, session),
            TurnStatus::Resolved | TurnStatus::AlreadyCompleted => break,
            TurnStatus::Answered => {}
        }
    }
    Ok(())
}

fn play(args: &Args, cfg: &FileConfig) -> Result<()> {
    let catalog = load_catalog(args, cfg.sim.max_turns)?;
    let sim = Simulator::new(&catalog, cfg.sim.clone()).context("building simulator")?;
    let mut session = sim.create_session(session_options(args)?)?;
    println!(
        "{} | {} | {} | {} | seed {}",
        session.id, session.company_name, session.role.name, session.scenario.name, session.seed
    );

    let policy_name = args.policy.as_deref().unwrap_or("greedy");
    if policy_name == "interactive" {
        play_interactive(&sim, &mut session)?;
    } else {
        let mut policy: Box<dyn DecisionPolicy> = match policy_name.split_once(':') {
            None if policy_name == "greedy" => Box::new(GreedyPolicy),
            Some(("persona", id)) => {
                let persona = sim_ai::persona(id).with_context(|| format!("unknown persona {id:?}"))?;
                Box::new(PersonaPolicy::for_episode(persona, session.seed))
            }
            _ => bail!("unknown policy {policy_name:?}\n{USAGE}"),
        };
        while sim.autoplay_turn(&mut session, policy.as_mut()).is_some() {
            print_quarter(&session);
        }
        println!("\n{}", session.last_board_message);
    }

    let view = build_view(&sim, &session);
    if let Some(dir) = &args.store {
        match JsonDirStore::open(dir) {
            Ok(store) => {
                if persist_best_effort(&store, &view) {
                    info!(session = %view.session_id, dir = %dir.display(), "session stored");
                }
            }
            Err(error) => warn!(%error, dir = %dir.display(), "session store unavailable"),
        }
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}

fn tune(args: &Args, cfg: &FileConfig) -> Result<()> {
    let catalog = load_catalog(args, cfg.sim.max_turns)?;
    let sim = Simulator::new(&catalog, cfg.sim.clone())?;
    let personas = sim_ai::personas();
    let result = sim_harness::run_tuning(&sim, &cfg.harness, &personas).context("tuning run")?;

    let out = args.out.clone().unwrap_or_else(|| DEFAULT_OUT_DIR.into());
    let profile_path = args
        .profile_out
        .clone()
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.into());
    write_json(&profile_path, &result.tuned_profile)?;
    write_json(&out.join("latest-results.json"), &result)?;
    let report = out.join("latest-report.md");
    write_text(&report, &(sim_harness::tuning_markdown(&result) + "\n"))?;

    let best = &result.best_result.summary;
    println!("Tuning complete.");
    println!("Best avg score: {:.2}", best.avg_score);
    println!("Excellent rate: {:.1}%", best.excellent_rate * 100.0);
    println!("Strong rate: {:.1}%", best.strong_rate * 100.0);
    println!("Avg incidents: {:.2}", best.avg_incidents);
    println!("Decision quality: {:.2}", best.avg_decision_quality);
    println!("Risk control: {:.2}", best.avg_risk_control);
    println!(
        "Coverage: {} roles x {} scenarios x {} seeds",
        result.coverage.roles, result.coverage.scenarios, result.coverage.seeds_per_scenario
    );
    println!("Updated config: {}", profile_path.display());
    println!("Report: {}", report.display());
    Ok(())
}

fn matrix(args: &Args, cfg: &FileConfig) -> Result<()> {
    let catalog = load_catalog(args, cfg.sim.max_turns)?;
    let sim = Simulator::new(&catalog, cfg.sim.clone())?;
    let profile_path = args
        .profile
        .clone()
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.into());
    let profile = PromptProfile::load_or_default(&profile_path);
    let result = sim_harness::run_scenario_matrix(&sim, &cfg.harness, &sim_ai::personas(), &profile)
        .context("scenario matrix run")?;

    let out = args.out.clone().unwrap_or_else(|| DEFAULT_OUT_DIR.into());
    write_json(&out.join("scenario-matrix.json"), &result)?;
    let report = out.join("scenario-matrix.md");
    write_text(&report, &(sim_harness::matrix_markdown(&result) + "\n"))?;

    println!("Scenario matrix review complete.");
    println!("Episodes: {}", result.episodes.len());
    println!("Average score: {:.2}", result.summary.avg_score);
    println!("Excellent rate: {:.1}%", result.summary.excellent_rate * 100.0);
    println!("Average incidents: {:.2}", result.summary.avg_incidents);
    println!("Report: {}", report.display());
    Ok(())
}

fn list_catalog(args: &Args, cfg: &FileConfig) -> Result<()> {
    let catalog = load_catalog(args, cfg.sim.max_turns)?;
    catalog.validate().context("catalog validation")?;
    println!("Roles:");
    for r in &catalog.roles {
        println!("  {:<20} {}", r.id, r.name);
    }
    println!("Sectors:");
    for s in &catalog.sectors {
        println!("  {:<20} {} (volatility {:.2})", s.id, s.name, s.volatility);
    }
    println!("Scenarios:");
    for s in &catalog.scenarios {
        println!("  {:<42} {} [{}]", s.id, s.name, s.sector_id);
    }
    println!("Decisions:");
    for d in &catalog.decisions {
        println!("  {:<30} {:<11} {}", d.id, d.decision_type().label(), d.title);
    }
    println!("Personas:");
    for p in sim_ai::personas() {
        println!("  persona:{:<22} {}", p.id, p.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args()?;
    let cfg = load_config(&args)?;
    info!(command = %args.command, "starting board-sim");

    match args.command.as_str() {
        "play" => play(&args, &cfg),
        "tune" => tune(&args, &cfg),
        "matrix" => matrix(&args, &cfg),
        "catalog" => list_catalog(&args, &cfg),
        "version" => {
            println!(
                "board-sim {} ({} built {})",
                env!("CARGO_PKG_VERSION"),
                env!("GIT_SHA"),
                env!("BUILD_DATE")
            );
            Ok(())
        }
        "" | "help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}
