//! Anker Engine
//!
//! This crate drives a workspace end to end. The [`Orchestrator`] loads the
//! workflow, orchestration settings and agent registry from a workspace, runs
//! the stages one at a time in dependency order and, on request, hands over to
//! the [`Promoter`], which archives a good run as a practice case.
//!
//! Progress is reported twice: as `tracing` events for logs, and as
//! [`ExecutionEvent`]s delivered to an [`ExecutionNotifier`] for callers that
//! want to react to them (the CLI prints review prompts this way).

mod error;
mod events;
mod filter;
mod orchestrator;
mod promoter;
mod workspace;

pub use error::EngineError;
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier, SkipReason};
pub use filter::StageFilter;
pub use orchestrator::{DEFAULT_REVIEW_PROMPT, Orchestrator};
pub use promoter::{MetricsRecord, PracticeCase, Promoter};
pub use workspace::{
  AGENTS_DIR, ORCHESTRATION_FILE, PLAN_DIR, PRACTICE_DIR, WORKFLOW_FILE, WORKSPACE_DIR, discover_workspace,
};
