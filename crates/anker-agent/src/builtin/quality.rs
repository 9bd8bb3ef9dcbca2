use serde_json::json;
use tracing::info;

use crate::agent::{Agent, AgentContext, AgentReport};
use crate::error::AgentError;
use crate::metadata::AgentMetadata;

pub const QUALITY_REPORT: &str = "reports/quality-report.md";
pub const EXECUTION_METRICS: &str = "reports/execution-metrics.json";

const REPORT_TEMPLATE: &str = "\
# Quality Report

## Overall Assessment
- Score:
- Summary:

## Highlights
- 

## Recommendations
- 

## Risks
- 
";

/// Writes the quality report and the metrics template the promoter reads.
///
/// All scores start at zero, so a run is only promoted after someone fills in
/// the metrics by hand.
pub struct QualityChecker {
  ctx: AgentContext,
}

impl QualityChecker {
  pub fn new(ctx: AgentContext) -> Self {
    Self { ctx }
  }
}

impl Agent for QualityChecker {
  fn metadata(&self) -> &AgentMetadata {
    self.ctx.metadata()
  }

  fn execute(&self, force: bool) -> Result<AgentReport, AgentError> {
    self.ctx.ensure_inputs()?;
    self.ctx.prepare_output_directories()?;

    let mut report = self.ctx.report();
    self
      .ctx
      .write_text(QUALITY_REPORT, REPORT_TEMPLATE, force, &mut report)?;
    let metrics = json!({
      "overall_score": 0,
      "requirement_score": 0,
      "design_score": 0,
      "code_score": 0,
      "quality_score": 0,
      "cycle_time_minutes": 0,
      "notes": "Update after manual review with justification for knowledge retention",
    });
    self
      .ctx
      .write_json(EXECUTION_METRICS, &metrics, force, &mut report)?;

    info!(
      agent = %report.agent_id,
      written = report.written.len(),
      kept = report.kept.len(),
      "quality_templates_ready"
    );
    Ok(report)
  }
}
