//! Scenario packs: extra sectors and scenarios loaded from YAML and merged
//! into a catalog after validation.
//!
//! A pack is a directory holding `pack.yaml`:
//!
//! ```yaml
//! id: logistics
//! name: Logistics Pack
//! version: 0.1.0
//! engine_schema_version: 1
//! sectors: [...]
//! scenarios: [...]
//! ```

use serde::Deserialize;
use sim_core::{Catalog, Scenario, Sector, ValidationError};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Pack schema this build understands.
pub const ENGINE_SCHEMA_VERSION: u32 = 1;

const PACK_FILE: &str = "pack.yaml";

/// Metadata for a scenario pack.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PackMeta {
    pub id: String,
    pub name: String,
    pub version: String,
    pub engine_schema_version: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackFile {
    #[serde(flatten)]
    meta: PackMeta,
    #[serde(default)]
    sectors: Vec<Sector>,
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid pack at {path}: {reason}")]
    InvalidMeta { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pack {pack} targets schema {found}, this build supports {supported}")]
    UnsupportedSchema {
        pack: String,
        found: u32,
        supported: u32,
    },
    #[error("pack {pack} redefines {kind} {id}")]
    Conflict {
        pack: String,
        kind: &'static str,
        id: String,
    },
    #[error("pack {pack}: {source}")]
    Invalid {
        pack: String,
        #[source]
        source: ValidationError,
    },
}

/// A parsed pack, not yet merged.
#[derive(Debug, Clone)]
pub struct LoadedPack {
    pub meta: PackMeta,
    pub dir: PathBuf,
    pub sectors: Vec<Sector>,
    pub scenarios: Vec<Scenario>,
}

/// Parse one pack directory.
pub fn load_pack(dir: &Path) -> Result<LoadedPack, PackError> {
    let path = dir.join(PACK_FILE);
    let text = fs::read_to_string(&path)?;
    let file: PackFile = serde_yaml::from_str(&text).map_err(|e| PackError::InvalidMeta {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    if file.meta.id.trim().is_empty() {
        return Err(PackError::InvalidMeta {
            path,
            reason: "blank pack id".into(),
        });
    }
    if file.meta.engine_schema_version != ENGINE_SCHEMA_VERSION {
        return Err(PackError::UnsupportedSchema {
            pack: file.meta.id,
            found: file.meta.engine_schema_version,
            supported: ENGINE_SCHEMA_VERSION,
        });
    }
    debug!(pack = %file.meta.id, scenarios = file.scenarios.len(), "pack parsed");
    Ok(LoadedPack {
        meta: file.meta,
        dir: dir.to_path_buf(),
        sectors: file.sectors,
        scenarios: file.scenarios,
    })
}

/// Every subdirectory of `root` that carries a `pack.yaml`, in directory
/// name order. Other entries are skipped.
pub fn load_packs(root: &Path) -> Result<Vec<LoadedPack>, PackError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.path().join(PACK_FILE).exists() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    dirs.iter().map(|d| load_pack(d)).collect()
}

/// Merge packs into a copy of `base`. Ids must not collide with the base
/// catalog or earlier packs; every scenario is checked against the merged
/// sectors and the decision table. On error nothing is merged.
pub fn apply_packs(base: &Catalog, packs: &[LoadedPack], max_turns: u32) -> Result<Catalog, PackError> {
    let mut catalog = base.clone();
    let mut pack_ids = BTreeSet::new();
    for pack in packs {
        let name = &pack.meta.id;
        if !pack_ids.insert(name.as_str()) {
            return Err(PackError::Conflict {
                pack: name.clone(),
                kind: "pack",
                id: name.clone(),
            });
        }
        for sector in &pack.sectors {
            if catalog.sector(&sector.id).is_some() {
                return Err(PackError::Conflict {
                    pack: name.clone(),
                    kind: "sector",
                    id: sector.id.clone(),
                });
            }
            if !(sector.volatility.is_finite() && sector.volatility > 0.0) {
                return Err(PackError::Invalid {
                    pack: name.clone(),
                    source: ValidationError::NonFinite(format!("sector {}", sector.id)),
                });
            }
            catalog.sectors.push(sector.clone());
        }
        for scenario in &pack.scenarios {
            if catalog.scenario(&scenario.id).is_some() {
                return Err(PackError::Conflict {
                    pack: name.clone(),
                    kind: "scenario",
                    id: scenario.id.clone(),
                });
            }
            catalog
                .validate_scenario(scenario, Some(max_turns))
                .map_err(|source| PackError::Invalid {
                    pack: name.clone(),
                    source,
                })?;
            catalog.scenarios.push(scenario.clone());
        }
        info!(
            pack = %name,
            version = %pack.meta.version,
            sectors = pack.sectors.len(),
            scenarios = pack.scenarios.len(),
            "scenario pack merged"
        );
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"
id: test-pack
name: Test Pack
version: 0.1.0
engine_schema_version: 1
sectors:
  - id: retail
    name: Retail
    summary: Thin margins and seasonal demand.
    volatility: 1.04
scenarios:
  - id: retail-demand-sensing
    sectorId: retail
    name: Retail Demand Sensing
    boardMandate: Cut stockouts without inflating inventory.
    tension: Forecast models disagree with store managers.
    priorityDecisionIds: [data-foundation-program]
    initialMetricShift:
      aiAdoption: 3
      modelRisk: 2
    events:
      - quarter: 4
        title: Peak Season Miss
        summary: Forecast error spikes during peak.
        effects:
          cashFlow: -3
"#;

    fn write_pack(root: &Path, dir: &str, body: &str) {
        let d = root.join(dir);
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join(PACK_FILE), body).unwrap();
    }

    #[test]
    fn pack_merges_into_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        write_pack(tmp.path(), "retail", PACK);
        fs::create_dir_all(tmp.path().join("not-a-pack")).unwrap();
        let packs = load_packs(tmp.path()).unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].meta.name, "Test Pack");

        let base = Catalog::builtin();
        let merged = apply_packs(&base, &packs, 10).unwrap();
        assert_eq!(merged.scenarios.len(), base.scenarios.len() + 1);
        let s = merged.scenario("retail-demand-sensing").unwrap();
        assert_eq!(s.initial_metric_shift.ai_adoption, 3.0);
        assert_eq!(s.events[0].effects.cash_flow, -3.0);
        assert_eq!(merged.sector("retail").unwrap().volatility, 1.04);
        merged.validate().unwrap();
    }

    #[test]
    fn late_event_quarter_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_pack(tmp.path(), "retail", &PACK.replace("quarter: 4", "quarter: 14"));
        let packs = load_packs(tmp.path()).unwrap();
        let err = apply_packs(&Catalog::builtin(), &packs, 10).unwrap_err();
        assert!(matches!(
            err,
            PackError::Invalid {
                source: ValidationError::EventQuarterOutOfRange { quarter: 14, .. },
                ..
            }
        ));
    }

    #[test]
    fn unknown_decision_and_clashing_ids_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_pack(
            tmp.path(),
            "retail",
            &PACK.replace("[data-foundation-program]", "[teleport-inventory]"),
        );
        let packs = load_packs(tmp.path()).unwrap();
        assert!(matches!(
            apply_packs(&Catalog::builtin(), &packs, 10),
            Err(PackError::Invalid { .. })
        ));

        let tmp = tempfile::tempdir().unwrap();
        write_pack(tmp.path(), "energy", &PACK.replace("id: retail\n", "id: energy\n"));
        let packs = load_packs(tmp.path()).unwrap();
        assert!(matches!(
            apply_packs(&Catalog::builtin(), &packs, 10),
            Err(PackError::Conflict { kind: "sector", .. })
        ));
    }

    #[test]
    fn newer_schema_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        write_pack(
            tmp.path(),
            "retail",
            &PACK.replace("engine_schema_version: 1", "engine_schema_version: 2"),
        );
        assert!(matches!(
            load_packs(tmp.path()),
            Err(PackError::UnsupportedSchema { found: 2, .. })
        ));
    }

    #[test]
    fn bundled_packs_load() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/packs");
        let packs = load_packs(&root).unwrap();
        assert!(!packs.is_empty(), "no packs loaded from assets/packs");
        let merged = apply_packs(&Catalog::builtin(), &packs, 10).unwrap();
        merged.validate().unwrap();
    }
}
