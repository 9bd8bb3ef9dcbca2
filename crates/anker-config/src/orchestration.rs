use std::path::{Path, PathBuf};

use anker_artifact::Store;
use anker_document::{Document, Fields};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_METRICS_FILE: &str = "reports/execution-metrics.json";
pub const DEFAULT_KNOWLEDGE_THRESHOLD: i64 = 80;
pub const DEFAULT_CODE_ROOT: &str = "code";

/// Post-run settings.
///
/// Paths are relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationConfig {
  /// Archive successful runs as practice cases.
  pub auto_promote_practice: bool,
  /// JSON metrics written by the quality stage.
  pub metrics_file: PathBuf,
  /// Minimum `overall_score` for promotion.
  pub knowledge_threshold: i64,
  /// Files copied into each practice case.
  pub practice_files: Vec<PathBuf>,
  /// Directory mirrored into the case's `code-samples`.
  pub practice_code_root: PathBuf,
}

impl Default for OrchestrationConfig {
  fn default() -> Self {
    Self {
      auto_promote_practice: true,
      metrics_file: PathBuf::from(DEFAULT_METRICS_FILE),
      knowledge_threshold: DEFAULT_KNOWLEDGE_THRESHOLD,
      practice_files: Vec::new(),
      practice_code_root: PathBuf::from(DEFAULT_CODE_ROOT),
    }
  }
}

impl OrchestrationConfig {
  /// Read settings from a parsed document. Absent fields keep their defaults.
  pub fn from_document(doc: &Document) -> Result<Self, ConfigError> {
    let fields = Fields::new(doc.root());
    let defaults = Self::default();

    Ok(Self {
      auto_promote_practice: fields
        .bool("auto_promote_practice")?
        .unwrap_or(defaults.auto_promote_practice),
      metrics_file: fields
        .text("metrics_file")?
        .map(PathBuf::from)
        .unwrap_or(defaults.metrics_file),
      knowledge_threshold: fields
        .integer("knowledge_threshold")?
        .unwrap_or(defaults.knowledge_threshold),
      practice_files: fields
        .string_list("practice_files")?
        .map(|files| files.into_iter().map(PathBuf::from).collect())
        .unwrap_or(defaults.practice_files),
      practice_code_root: fields
        .text("practice_code_root")?
        .map(PathBuf::from)
        .unwrap_or(defaults.practice_code_root),
    })
  }

  /// Load settings from `path` in `store`. A missing file yields the defaults.
  pub fn load(store: &dyn Store, path: &Path) -> Result<Self, ConfigError> {
    if !store.exists(path) {
      debug!(path = %path.display(), "orchestration_config_absent");
      return Ok(Self::default());
    }

    let text = store.read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let doc = anker_document::parse(&text).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_document(&doc)
  }
}
