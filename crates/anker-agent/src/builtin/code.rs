use std::path::Path;

use tracing::info;

use crate::agent::{Agent, AgentContext, AgentReport};
use crate::error::AgentError;
use crate::metadata::AgentMetadata;

pub const CODE_ROOT: &str = "code";

const ROUTES: &str = r#"from fastapi import APIRouter

router = APIRouter()


@router.get("/health", summary="Health check")
async def read_health():
    """Simple health check endpoint."""
    return {"status": "ok"}
"#;

const PLACEHOLDER_TEST: &str = "\
def test_placeholder():
    assert True
";

const GUIDELINES: &str = "\
# Code Guidelines

Add usage examples and design decisions based on the business scenario.
";

/// Skeleton files, relative to [`CODE_ROOT`].
const SKELETON: &[(&str, &str)] = &[
  ("app/__init__.py", "\n"),
  ("app/api/__init__.py", "\n"),
  ("app/api/routes.py", ROUTES),
  ("app/services/__init__.py", "\n"),
  ("app/repositories/__init__.py", "\n"),
  ("app/models/__init__.py", "\n"),
  ("tests/__init__.py", "\n"),
  ("tests/test_placeholder.py", PLACEHOLDER_TEST),
  ("docs/README.md", GUIDELINES),
];

/// Lays out the application skeleton under `code/`.
pub struct CodeGenerator {
  ctx: AgentContext,
}

impl CodeGenerator {
  pub fn new(ctx: AgentContext) -> Self {
    Self { ctx }
  }
}

impl Agent for CodeGenerator {
  fn metadata(&self) -> &AgentMetadata {
    self.ctx.metadata()
  }

  fn execute(&self, force: bool) -> Result<AgentReport, AgentError> {
    self.ctx.ensure_inputs()?;
    self.ctx.prepare_output_directories()?;

    let mut report = self.ctx.report();
    let root = Path::new(CODE_ROOT);
    for &(relative, contents) in SKELETON {
      self
        .ctx
        .write_text(root.join(relative), contents, force, &mut report)?;
    }

    info!(
      agent = %report.agent_id,
      written = report.written.len(),
      kept = report.kept.len(),
      "code_skeleton_ready"
    );
    Ok(report)
  }
}
