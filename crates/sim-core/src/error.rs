use thiserror::Error;

/// Structural failures surfaced by the simulation core.
///
/// Unknown identifiers, ambiguous free text and out-of-range profile weights
/// are not errors: they degrade to defaults. Only malformed structural input
/// ends up here.
#[derive(Debug, Error)]
pub enum SimError {
    /// A catalog table the engine needs is empty.
    #[error("catalog has no {0}")]
    EmptyCatalog(&'static str),
    /// Seed text could not be read as an unsigned integer.
    #[error("seed must be a non-negative integer, got {0:?}")]
    InvalidSeed(String),
    /// Configuration values are structurally unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Catalog failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Validation errors for catalog invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Two entries of the same table share an identifier.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    /// A scenario references a sector that is not in the catalog.
    #[error("scenario {scenario} references unknown sector {sector}")]
    UnknownSector { scenario: String, sector: String },
    /// A scenario references a decision that is not in the catalog.
    #[error("scenario {scenario} references unknown decision {decision}")]
    UnknownDecision { scenario: String, decision: String },
    #[error("scenario {scenario} schedules an event in quarter 0")]
    EventQuarterZero { scenario: String },
    /// A scheduled event falls after the last playable quarter.
    #[error("scenario {scenario} schedules an event in quarter {quarter}, outside 1..={max}")]
    EventQuarterOutOfRange {
        scenario: String,
        quarter: u32,
        max: u32,
    },
    /// Numeric field must be finite.
    #[error("non-finite numeric value in {0}")]
    NonFinite(String),
    /// A decision carries no principle tag.
    #[error("decision {0} has no principles")]
    MissingPrinciples(String),
    /// Free-text fields must not be blank.
    #[error("blank {field} on {id}")]
    Blank { field: &'static str, id: String },
}
