use std::collections::BTreeSet;

use anker_document::{Fields, Node};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// One named unit of work in a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
  /// Unique key, taken from the stage's entry in the workflow document.
  pub key: String,
  /// Human-readable label. Defaults to the key.
  pub label: String,
  /// Id of the agent that executes this stage.
  pub agent: String,
  /// Keys of the stages that must run before this one.
  pub depends_on: BTreeSet<String>,
  /// Paths this stage is expected to produce.
  pub outputs: Vec<String>,
  /// Whether a manual review checkpoint follows this stage.
  pub human_review_enabled: bool,
  /// Message shown at the review checkpoint.
  pub human_review_prompt: String,
  /// Marks the stage that closes the workflow.
  pub final_stage: bool,
}

impl StageDefinition {
  /// Build a stage from its entry in the workflow document.
  pub fn from_node(key: &str, node: &Node) -> Result<Self, WorkflowError> {
    let map = node.as_mapping().ok_or_else(|| WorkflowError::NotAMapping {
      stage: key.to_string(),
    })?;
    let fields = Fields::new(map);
    let schema = |source| WorkflowError::Schema {
      stage: key.to_string(),
      source,
    };

    Ok(Self {
      key: key.to_string(),
      label: fields.text("label").map_err(schema)?.unwrap_or_else(|| key.to_string()),
      agent: fields.text("agent").map_err(schema)?.unwrap_or_default(),
      depends_on: fields
        .string_list("depends_on")
        .map_err(schema)?
        .unwrap_or_default()
        .into_iter()
        .collect(),
      outputs: fields.string_list("outputs").map_err(schema)?.unwrap_or_default(),
      human_review_enabled: fields
        .bool("human_review_enabled")
        .map_err(schema)?
        .unwrap_or(false),
      human_review_prompt: fields
        .text("human_review_prompt")
        .map_err(schema)?
        .unwrap_or_default(),
      final_stage: fields.bool("final_stage").map_err(schema)?.unwrap_or(false),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stage(text: &str) -> Result<StageDefinition, WorkflowError> {
    let doc = anker_document::parse(text).unwrap();
    let (key, node) = doc.root().iter().next().unwrap();
    StageDefinition::from_node(key, node)
  }

  #[test]
  fn test_defaults() {
    let def = stage("design:\n  agent: AA2\n").unwrap();
    assert_eq!(def.key, "design");
    assert_eq!(def.label, "design");
    assert_eq!(def.agent, "AA2");
    assert!(def.depends_on.is_empty());
    assert!(def.outputs.is_empty());
    assert!(!def.human_review_enabled);
    assert_eq!(def.human_review_prompt, "");
    assert!(!def.final_stage);
  }

  #[test]
  fn test_numeric_text_fields_keep_their_form() {
    let def = stage("s:\n  label: 1.0\n  agent: 007\n  human_review_prompt: 1e20\n").unwrap();
    assert_eq!(def.label, "1.0");
    assert_eq!(def.agent, "7.0");
    assert_eq!(def.human_review_prompt, "1e20");
  }

  #[test]
  fn test_all_fields() {
    let text = "\
quality:
  label: Quality check
  agent: AA4
  depends_on: [code, design]
  outputs: [reports/quality-report.md]
  human_review_enabled: true
  human_review_prompt: \"Confirm the score, then promote\"
  final_stage: true
";
    let def = stage(text).unwrap();
    assert_eq!(def.label, "Quality check");
    assert_eq!(
      def.depends_on,
      BTreeSet::from(["code".to_string(), "design".to_string()])
    );
    assert_eq!(def.outputs, vec!["reports/quality-report.md".to_string()]);
    assert!(def.human_review_enabled);
    assert_eq!(def.human_review_prompt, "Confirm the score, then promote");
    assert!(def.final_stage);
  }

  #[test]
  fn test_empty_stage_mapping_uses_defaults() {
    let def = stage("lonely:\n").unwrap();
    assert_eq!(def.label, "lonely");
    assert_eq!(def.agent, "");
  }

  #[test]
  fn test_scalar_stage_is_rejected() {
    let err = stage("broken: 3\n").unwrap_err();
    assert!(matches!(err, WorkflowError::NotAMapping { stage } if stage == "broken"));
  }

  #[test]
  fn test_non_string_dependency_names_stage_and_field() {
    let err = stage("code:\n  depends_on: [design, 2]\n").unwrap_err();
    match err {
      WorkflowError::Schema { stage, source } => {
        assert_eq!(stage, "code");
        assert_eq!(source.field, "depends_on");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_non_boolean_review_flag_is_rejected() {
    let err = stage("code:\n  human_review_enabled: sometimes\n").unwrap_err();
    assert!(matches!(err, WorkflowError::Schema { .. }));
  }
}
