use std::collections::BTreeSet;

use anker_workflow::StageDefinition;

/// Restricts a run to selected stages.
///
/// An entry matches a stage by its key or by its agent id. An empty filter is
/// the same as no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageFilter {
  selectors: BTreeSet<String>,
}

impl StageFilter {
  pub fn new<I, S>(selectors: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      selectors: selectors.into_iter().map(Into::into).collect(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.selectors.is_empty()
  }

  pub fn matches(&self, stage: &StageDefinition) -> bool {
    self.selectors.contains(&stage.key) || self.selectors.contains(&stage.agent)
  }
}

impl<S: Into<String>> FromIterator<S> for StageFilter {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self::new(iter)
  }
}
