//! Error types for orchestration and promotion.

use std::path::PathBuf;

use anker_agent::{AgentError, RegistryError};
use anker_config::ConfigError;
use anker_document::ParseError;
use anker_workflow::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// Neither the given root nor its `anker/` subdirectory holds a `plan/`.
  #[error("no anker workspace found at {} or {}", .root.display(), .root.join("anker").display())]
  WorkspaceNotFound { root: PathBuf },

  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: anker_artifact::Error,
  },

  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: ParseError,
  },

  #[error(transparent)]
  Workflow(#[from] WorkflowError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Registry(#[from] RegistryError),

  /// A stage names an agent the registry does not know.
  #[error("agent for stage '{stage}' not found: {agent}")]
  AgentNotFound { stage: String, agent: String },

  #[error("stage '{stage}' failed: {source}")]
  StageExecution {
    stage: String,
    #[source]
    source: AgentError,
  },

  /// Writing the practice case failed part way through.
  #[error("practice case archival failed: {0}")]
  Archive(#[from] anker_artifact::Error),
}
