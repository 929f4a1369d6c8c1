//! Automated evaluation of the board simulation: persona episodes, profile
//! scoring, hill-climb tuning and the role x scenario matrix.

mod config;
mod episode;
mod evaluate;
mod matrix;
mod report;
mod tuning;

pub use config::HarnessConfig;
pub use episode::{run_episode, EpisodeResult, EpisodeSummary, TranscriptEntry};
pub use evaluate::{evaluate_profile, ProfileResult};
pub use matrix::{role_scenario_rows, run_scenario_matrix, weak_rows, MatrixResult, RoleScenarioRow, WeakRow};
pub use report::{matrix_markdown, tuning_markdown};
pub use tuning::{neighbours, run_tuning, seed_profiles, Coverage, LeaderboardEntry, TuningResult};
