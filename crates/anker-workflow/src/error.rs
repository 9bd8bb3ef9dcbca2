use anker_document::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("workflow stage '{stage}' must be a mapping")]
  NotAMapping { stage: String },

  #[error("workflow stage '{stage}': {source}")]
  Schema {
    stage: String,
    #[source]
    source: FieldError,
  },

  #[error("workflow defines no stages")]
  Empty,

  #[error("workflow stage '{stage}' depends on unknown stage '{dependency}'")]
  UnknownDependency { stage: String, dependency: String },

  #[error("workflow has a dependency cycle among stages: {}", .stages.join(", "))]
  Cycle { stages: Vec<String> },
}
