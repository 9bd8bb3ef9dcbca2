//! Workspace layout and discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineError;

pub use anker_agent::AGENTS_DIR;

/// Subdirectory searched when the given root is not a workspace itself.
pub const WORKSPACE_DIR: &str = "anker";
pub const PLAN_DIR: &str = "plan";
pub const WORKFLOW_FILE: &str = "plan/workflow.yaml";
pub const ORCHESTRATION_FILE: &str = "plan/orchestration.yaml";
pub const PRACTICE_DIR: &str = "practice";

/// Locate the workspace for a project root.
///
/// The root itself is used when it contains `plan/`; otherwise `<root>/anker`
/// is tried.
pub fn discover_workspace(root: &Path) -> Result<PathBuf, EngineError> {
  for candidate in [root.to_path_buf(), root.join(WORKSPACE_DIR)] {
    if candidate.join(PLAN_DIR).is_dir() {
      debug!(workspace = %candidate.display(), "workspace_found");
      return Ok(candidate);
    }
  }
  Err(EngineError::WorkspaceNotFound {
    root: root.to_path_buf(),
  })
}
