use std::path::PathBuf;

use anker_document::{FieldError, ParseError};
use thiserror::Error;

/// A metadata record that cannot describe an agent.
#[derive(Debug, Error)]
pub enum MetadataError {
  #[error("missing required field '{0}'")]
  MissingField(&'static str),

  #[error("unknown agent kind '{0}'")]
  UnknownKind(String),

  #[error(transparent)]
  Field(#[from] FieldError),
}

#[derive(Debug, Error)]
pub enum RegistryError {
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

  #[error("invalid agent metadata at {}: {source}", .path.display())]
  Metadata {
    path: PathBuf,
    #[source]
    source: MetadataError,
  },

  #[error("agent id '{id}' is declared twice: {} and {}", .first.display(), .second.display())]
  DuplicateId {
    id: String,
    first: PathBuf,
    second: PathBuf,
  },
}

#[derive(Debug, Error)]
pub enum AgentError {
  #[error("missing required inputs for {agent}: {}", display_paths(.missing))]
  MissingInputs { agent: String, missing: Vec<PathBuf> },

  #[error("failed to serialize {}: {source}", .path.display())]
  Serialize {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error(transparent)]
  Store(#[from] anker_artifact::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
