//! Anker Config
//!
//! This crate contains [`OrchestrationConfig`], the settings that control what
//! happens after a run: whether a successful run is promoted into a practice
//! case, where the run's metrics are read from and which artifacts are archived.
//!
//! Settings live in `plan/orchestration.yaml`. The file is optional and every
//! field has a default, so an absent file and an empty file behave the same.

mod error;
mod orchestration;

pub use error::ConfigError;
pub use orchestration::{
  DEFAULT_CODE_ROOT, DEFAULT_KNOWLEDGE_THRESHOLD, DEFAULT_METRICS_FILE, OrchestrationConfig,
};
