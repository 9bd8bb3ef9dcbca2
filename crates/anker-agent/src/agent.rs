use std::path::{Path, PathBuf};
use std::sync::Arc;

use anker_artifact::Store;
use serde::Serialize;
use tracing::debug;

use crate::error::AgentError;
use crate::metadata::AgentMetadata;

/// A stage executor.
///
/// Implementations must be idempotent when `force` is false: files that
/// already exist are kept as they are.
pub trait Agent: Send + Sync {
  fn metadata(&self) -> &AgentMetadata;

  fn execute(&self, force: bool) -> Result<AgentReport, AgentError>;
}

/// What one execution did to the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentReport {
  pub agent_id: String,
  /// Files created or overwritten.
  pub written: Vec<PathBuf>,
  /// Files left untouched because they already existed.
  pub kept: Vec<PathBuf>,
}

impl AgentReport {
  pub fn new(agent_id: impl Into<String>) -> Self {
    Self {
      agent_id: agent_id.into(),
      ..Self::default()
    }
  }

  /// True when nothing was written.
  pub fn is_unchanged(&self) -> bool {
    self.written.is_empty()
  }
}

/// Workspace access shared by the built-in agents.
#[derive(Clone)]
pub struct AgentContext {
  store: Arc<dyn Store>,
  metadata: AgentMetadata,
}

impl AgentContext {
  pub fn new(store: Arc<dyn Store>, metadata: AgentMetadata) -> Self {
    Self { store, metadata }
  }

  pub fn metadata(&self) -> &AgentMetadata {
    &self.metadata
  }

  pub fn store(&self) -> &dyn Store {
    self.store.as_ref()
  }

  pub fn report(&self) -> AgentReport {
    AgentReport::new(&self.metadata.id)
  }

  /// Fail unless every declared input exists.
  pub fn ensure_inputs(&self) -> Result<(), AgentError> {
    let missing: Vec<PathBuf> = self
      .metadata
      .inputs
      .iter()
      .filter(|path| !self.store.exists(path))
      .cloned()
      .collect();

    if missing.is_empty() {
      Ok(())
    } else {
      Err(AgentError::MissingInputs {
        agent: self.metadata.id.clone(),
        missing,
      })
    }
  }

  /// Create the parent directory of every declared output.
  pub fn prepare_output_directories(&self) -> Result<(), AgentError> {
    for output in &self.metadata.outputs {
      if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        self.store.make_directories(parent)?;
      }
    }
    Ok(())
  }

  /// Write `contents` unless the file exists and `force` is unset.
  pub fn write_text(
    &self,
    path: impl AsRef<Path>,
    contents: &str,
    force: bool,
    report: &mut AgentReport,
  ) -> Result<(), AgentError> {
    let path = path.as_ref();
    if self.store.exists(path) && !force {
      debug!(agent = %self.metadata.id, path = %path.display(), "output_kept");
      report.kept.push(path.to_path_buf());
      return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      self.store.make_directories(parent)?;
    }
    self.store.write_file(path, contents)?;
    debug!(agent = %self.metadata.id, path = %path.display(), "output_written");
    report.written.push(path.to_path_buf());
    Ok(())
  }

  /// Like [`AgentContext::write_text`], rendering `value` as pretty JSON.
  pub fn write_json(
    &self,
    path: impl AsRef<Path>,
    value: &serde_json::Value,
    force: bool,
    report: &mut AgentReport,
  ) -> Result<(), AgentError> {
    let path = path.as_ref();
    let mut contents =
      serde_json::to_string_pretty(value).map_err(|source| AgentError::Serialize {
        path: path.to_path_buf(),
        source,
      })?;
    contents.push('\n');
    self.write_text(path, &contents, force, report)
  }
}
