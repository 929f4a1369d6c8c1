//! Session runtime: the turn-based board simulation over a shared catalog.
//!
//! [`Simulator`] is stateless apart from its catalog reference and config;
//! every run lives in a [`Session`] the caller owns.

mod engine;
mod interpret;
mod narrative;
mod session;
mod view;

pub use engine::{
    Incident, Simulator, TurnOutcome, TurnRequest, TurnStatus, COMPLETED_MESSAGE, INCIDENT_SHOCK,
};
pub use interpret::interpret_free_text;
pub use narrative::{
    enrich, quarter_agenda, quarter_label, stage_for_turn, top_delta_summary, NarrativeRewriter,
    PassthroughRewriter, RewriteContext, RewriteError,
};
pub use session::{DecisionPulse, EventRecord, HistoryRecord, Session, SessionOptions, TurnSummary};
pub use view::{build_view, MeetingView, OptionView, ScenarioSummary, SessionView};
