//! Core domain models and invariants for the board simulation.
//!
//! This crate defines the serializable types shared by the engine, the
//! scoring functions and the tuning harness: metric vectors, principles,
//! the weighting profile, the seeded RNG and the static catalog, with
//! validation helpers that guarantee basic invariants.

mod catalog;
mod config;
mod error;
mod metrics;
mod principle;
mod profile;
mod rng;

pub use catalog::{
    validate_decision, Catalog, Decision, DecisionType, RiskProfile, Role, Scenario,
    ScenarioEvent, Sector, BOARD_VOICE_ROLE_IDS, CORE_SCENARIO_IDS,
};
pub use config::{load_document, SimConfig};
pub use error::{SimError, ValidationError};
pub use metrics::{clamp, round_to, MetricKind, MetricVector};
pub use principle::{Principle, PrincipleWeights, DELIVERY_STAGES};
pub use profile::{PromptProfile, PROFILE_MAX, PROFILE_MIN};
pub use rng::{parse_seed, SimRng};
