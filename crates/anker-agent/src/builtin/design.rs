use serde_json::json;
use tracing::info;

use crate::agent::{Agent, AgentContext, AgentReport};
use crate::error::AgentError;
use crate::metadata::AgentMetadata;

pub const TECHNICAL_DESIGN: &str = "design/technical-design.md";
pub const API_SPEC: &str = "design/api-spec.yaml";
pub const DATA_MODEL: &str = "design/data-model.json";

const DESIGN_TEMPLATE: &str = "\
# Technical Design

## Architecture Overview
Describe the overall architecture, core components, and interactions.

## Module Responsibilities
- Module A:
- Module B:

## Technology Choices
- Backend:
- Database:

## Risks and Mitigations
- Risk:
- Mitigation:
";

const API_TEMPLATE: &str = "\
openapi: 3.0.3
info:
  title: TBD
  version: 0.1.0
servers:
  - url: http://localhost:8000
paths: {}
components:
  schemas: {}
";

/// Drafts the technical design, API description and data model.
pub struct TechnicalDesigner {
  ctx: AgentContext,
}

impl TechnicalDesigner {
  pub fn new(ctx: AgentContext) -> Self {
    Self { ctx }
  }
}

impl Agent for TechnicalDesigner {
  fn metadata(&self) -> &AgentMetadata {
    self.ctx.metadata()
  }

  fn execute(&self, force: bool) -> Result<AgentReport, AgentError> {
    self.ctx.ensure_inputs()?;
    self.ctx.prepare_output_directories()?;

    let mut report = self.ctx.report();
    self
      .ctx
      .write_text(TECHNICAL_DESIGN, DESIGN_TEMPLATE, force, &mut report)?;
    self.ctx.write_text(API_SPEC, API_TEMPLATE, force, &mut report)?;
    let model = json!({
      "entities": [],
      "relationships": [],
      "indexes": [],
    });
    self.ctx.write_json(DATA_MODEL, &model, force, &mut report)?;

    info!(
      agent = %report.agent_id,
      written = report.written.len(),
      kept = report.kept.len(),
      "design_skeleton_ready"
    );
    Ok(report)
  }
}
