use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anker_document::{Document, Fields};
use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// The built-in agent implementations a metadata record can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
  Requirement,
  TechnicalDesign,
  CodeGeneration,
  Quality,
}

impl AgentKind {
  pub const ALL: [AgentKind; 4] = [
    AgentKind::Requirement,
    AgentKind::TechnicalDesign,
    AgentKind::CodeGeneration,
    AgentKind::Quality,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      AgentKind::Requirement => "requirement",
      AgentKind::TechnicalDesign => "technical-design",
      AgentKind::CodeGeneration => "code-generation",
      AgentKind::Quality => "quality",
    }
  }
}

impl fmt::Display for AgentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AgentKind {
  type Err = MetadataError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    AgentKind::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| MetadataError::UnknownKind(s.to_string()))
  }
}

/// Contents of an agent's `metadata.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
  pub id: String,
  pub name: String,
  pub kind: AgentKind,
  pub version: String,
  pub description: String,
  /// Workspace paths that must exist before the agent runs.
  pub inputs: Vec<PathBuf>,
  /// Workspace paths the agent declares as its products.
  pub outputs: Vec<PathBuf>,
}

impl AgentMetadata {
  pub fn from_document(doc: &Document) -> Result<Self, MetadataError> {
    let fields = Fields::new(doc.root());

    let id = fields.text("id")?.ok_or(MetadataError::MissingField("id"))?;
    let kind = fields
      .text("kind")?
      .ok_or(MetadataError::MissingField("kind"))?
      .parse()?;
    let paths = |field: &str| -> Result<Vec<PathBuf>, MetadataError> {
      Ok(
        fields
          .string_list(field)?
          .unwrap_or_default()
          .into_iter()
          .map(PathBuf::from)
          .collect(),
      )
    };

    Ok(Self {
      name: fields.text("name")?.unwrap_or_else(|| id.clone()),
      kind,
      version: fields.text("version")?.unwrap_or_else(|| "0.0.0".to_string()),
      description: fields.text("description")?.unwrap_or_default(),
      inputs: paths("inputs")?,
      outputs: paths("outputs")?,
      id,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn metadata(text: &str) -> Result<AgentMetadata, MetadataError> {
    AgentMetadata::from_document(&anker_document::parse(text).unwrap())
  }

  #[test]
  fn test_minimal_metadata_uses_defaults() {
    let meta = metadata("id: AA1\nkind: requirement\n").unwrap();
    assert_eq!(meta.id, "AA1");
    assert_eq!(meta.name, "AA1");
    assert_eq!(meta.kind, AgentKind::Requirement);
    assert_eq!(meta.version, "0.0.0");
    assert!(meta.inputs.is_empty());
    assert!(meta.outputs.is_empty());
  }

  #[test]
  fn test_full_metadata() {
    let text = "\
id: AA2
name: Technical Designer
kind: technical-design
version: 1.2.0
description: Drafts the technical design
inputs: [requirement/requirement-spec.json]
outputs: []
  - design/technical-design.md
";
    let meta = metadata(text).unwrap();
    assert_eq!(meta.name, "Technical Designer");
    assert_eq!(meta.kind, AgentKind::TechnicalDesign);
    assert_eq!(meta.version, "1.2.0");
    assert_eq!(meta.inputs, vec![PathBuf::from("requirement/requirement-spec.json")]);
    assert_eq!(meta.outputs, vec![PathBuf::from("design/technical-design.md")]);
  }

  #[test]
  fn test_numeric_id_is_rendered_as_text() {
    let meta = metadata("id: 7\nkind: quality\n").unwrap();
    assert_eq!(meta.id, "7");
  }

  #[test]
  fn test_missing_kind() {
    assert!(matches!(
      metadata("id: AA1\n"),
      Err(MetadataError::MissingField("kind"))
    ));
  }

  #[test]
  fn test_unknown_kind() {
    match metadata("id: AA9\nkind: deployment\n") {
      Err(MetadataError::UnknownKind(kind)) => assert_eq!(kind, "deployment"),
      other => panic!("unexpected result: {other:?}"),
    }
  }

  #[test]
  fn test_inputs_must_be_strings() {
    assert!(matches!(
      metadata("id: AA1\nkind: requirement\ninputs: [brief.md, 3]\n"),
      Err(MetadataError::Field(_))
    ));
  }

  #[test]
  fn test_kind_names_round_trip() {
    for kind in AgentKind::ALL {
      assert_eq!(kind.as_str().parse::<AgentKind>().unwrap(), kind);
    }
  }
}
