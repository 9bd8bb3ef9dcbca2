//! The agent implementations selected by [`AgentKind`].

mod code;
mod design;
mod quality;
mod requirement;

use std::sync::Arc;

pub use code::{CODE_ROOT, CodeGenerator};
pub use design::{API_SPEC, DATA_MODEL, TECHNICAL_DESIGN, TechnicalDesigner};
pub use quality::{EXECUTION_METRICS, QUALITY_REPORT, QualityChecker};
pub use requirement::{CLARIFICATION_QUESTIONS, REQUIREMENT_SPEC, RequirementAnalyzer};

use crate::agent::{Agent, AgentContext};
use crate::metadata::AgentKind;

/// Build the implementation for the context's agent kind.
pub fn instantiate(ctx: AgentContext) -> Arc<dyn Agent> {
  match ctx.metadata().kind {
    AgentKind::Requirement => Arc::new(RequirementAnalyzer::new(ctx)),
    AgentKind::TechnicalDesign => Arc::new(TechnicalDesigner::new(ctx)),
    AgentKind::CodeGeneration => Arc::new(CodeGenerator::new(ctx)),
    AgentKind::Quality => Arc::new(QualityChecker::new(ctx)),
  }
}
