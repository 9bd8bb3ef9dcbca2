use std::path::PathBuf;

use anker_document::{FieldError, ParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
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

  #[error("invalid orchestration setting: {0}")]
  Field(#[from] FieldError),
}
