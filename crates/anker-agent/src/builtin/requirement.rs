use serde_json::json;
use tracing::info;

use crate::agent::{Agent, AgentContext, AgentReport};
use crate::error::AgentError;
use crate::metadata::AgentMetadata;

pub const REQUIREMENT_SPEC: &str = "requirement/requirement-spec.json";
pub const CLARIFICATION_QUESTIONS: &str = "requirement/clarification-questions.md";

const CLARIFICATION_TEMPLATE: &str = "\
# Clarification Checklist

- [ ] Question 1:
- [ ] Question 2:

> Update with answers once the requirement stage completes.
";

/// Drafts the requirement specification skeleton.
pub struct RequirementAnalyzer {
  ctx: AgentContext,
}

impl RequirementAnalyzer {
  pub fn new(ctx: AgentContext) -> Self {
    Self { ctx }
  }
}

impl Agent for RequirementAnalyzer {
  fn metadata(&self) -> &AgentMetadata {
    self.ctx.metadata()
  }

  fn execute(&self, force: bool) -> Result<AgentReport, AgentError> {
    self.ctx.ensure_inputs()?;
    self.ctx.prepare_output_directories()?;

    let mut report = self.ctx.report();
    let spec = json!({
      "summary": "",
      "functional_requirements": [],
      "non_functional_requirements": [],
      "api_requirements": [],
      "data_requirements": [],
      "assumptions": [],
    });
    self.ctx.write_json(REQUIREMENT_SPEC, &spec, force, &mut report)?;
    self
      .ctx
      .write_text(CLARIFICATION_QUESTIONS, CLARIFICATION_TEMPLATE, force, &mut report)?;

    info!(
      agent = %report.agent_id,
      written = report.written.len(),
      kept = report.kept.len(),
      "requirement_skeleton_ready"
    );
    Ok(report)
  }
}
