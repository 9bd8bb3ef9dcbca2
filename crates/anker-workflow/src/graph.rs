use std::collections::{BTreeMap, BTreeSet};

use anker_document::Document;

use crate::error::WorkflowError;
use crate::stage::StageDefinition;

/// The stages of a workflow, keyed by stage key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowGraph {
  stages: BTreeMap<String, StageDefinition>,
}

impl WorkflowGraph {
  /// Build a graph from a parsed workflow document.
  ///
  /// Every top-level entry is a stage. Dependencies are not resolved here; see
  /// [`WorkflowGraph::ordered_stages`].
  pub fn from_document(doc: &Document) -> Result<Self, WorkflowError> {
    let stages = doc
      .root()
      .iter()
      .map(|(key, node)| StageDefinition::from_node(key, node).map(|def| (key.clone(), def)))
      .collect::<Result<BTreeMap<_, _>, _>>()?;

    if stages.is_empty() {
      return Err(WorkflowError::Empty);
    }

    Ok(Self { stages })
  }

  /// Build a graph from already-constructed stage definitions.
  pub fn from_stages(stages: impl IntoIterator<Item = StageDefinition>) -> Self {
    Self {
      stages: stages
        .into_iter()
        .map(|stage| (stage.key.clone(), stage))
        .collect(),
    }
  }

  pub fn get(&self, key: &str) -> Option<&StageDefinition> {
    self.stages.get(key)
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Stages in key order.
  pub fn stages(&self) -> impl Iterator<Item = &StageDefinition> {
    self.stages.values()
  }

  /// Compute the execution order.
  ///
  /// Kahn's algorithm over the declared dependencies. Whenever several stages
  /// are ready, the lexicographically smallest key goes first, so the result
  /// depends only on the graph and never on declaration order.
  pub fn ordered_stages(&self) -> Result<Vec<&StageDefinition>, WorkflowError> {
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (key, stage) in &self.stages {
      for dependency in &stage.depends_on {
        if !self.stages.contains_key(dependency) {
          return Err(WorkflowError::UnknownDependency {
            stage: key.clone(),
            dependency: dependency.clone(),
          });
        }
        dependents
          .entry(dependency.as_str())
          .or_default()
          .push(key.as_str());
      }
      in_degree.insert(key.as_str(), stage.depends_on.len());
    }

    let mut frontier: BTreeSet<&str> = in_degree
      .iter()
      .filter(|(_, degree)| **degree == 0)
      .map(|(key, _)| *key)
      .collect();

    let mut order = Vec::with_capacity(self.stages.len());
    while let Some(current) = frontier.pop_first() {
      order.push(&self.stages[current]);

      for &dependent in dependents.get(current).into_iter().flatten() {
        if let Some(degree) = in_degree.get_mut(dependent) {
          *degree -= 1;
          if *degree == 0 {
            frontier.insert(dependent);
          }
        }
      }
    }

    if order.len() < self.stages.len() {
      let stages = in_degree
        .into_iter()
        .filter(|(_, degree)| *degree > 0)
        .map(|(key, _)| key.to_string())
        .collect();
      return Err(WorkflowError::Cycle { stages });
    }

    Ok(order)
  }
}
