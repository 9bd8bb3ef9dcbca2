use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anker_artifact::Store;
use tracing::{debug, info};

use crate::agent::{Agent, AgentContext};
use crate::builtin;
use crate::error::RegistryError;
use crate::metadata::AgentMetadata;

/// Directory holding one subdirectory per agent.
pub const AGENTS_DIR: &str = "agents";
/// Metadata file inside each agent directory.
pub const METADATA_FILE: &str = "metadata.yaml";

/// Resolves agent ids to agents.
pub trait AgentRegistry: Send + Sync {
  fn lookup(&self, id: &str) -> Option<Arc<dyn Agent>>;
}

/// Registry built from the `agents/` directory of a workspace.
///
/// ```text
/// agents/
/// ├── requirement-analyzer/
/// │   └── metadata.yaml
/// └── quality-checker/
///     └── metadata.yaml
/// ```
///
/// Directories without a metadata file are skipped. Each agent is instantiated
/// once, when the registry is loaded.
#[derive(Default)]
pub struct StoreAgentRegistry {
  agents: BTreeMap<String, Arc<dyn Agent>>,
}

impl StoreAgentRegistry {
  pub fn load(store: Arc<dyn Store>) -> Result<Self, RegistryError> {
    let root = Path::new(AGENTS_DIR);
    if !store.is_dir(root) {
      debug!(dir = AGENTS_DIR, "agents_dir_absent");
      return Ok(Self::default());
    }

    let entries = store.list_directory(root).map_err(|source| RegistryError::Read {
      path: root.to_path_buf(),
      source,
    })?;

    let mut agents: BTreeMap<String, Arc<dyn Agent>> = BTreeMap::new();
    let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();

    for dir in entries {
      let path = dir.join(METADATA_FILE);
      if !store.is_dir(&dir) || !store.is_file(&path) {
        continue;
      }

      let metadata = read_metadata(store.as_ref(), &path)?;
      if let Some(first) = sources.get(&metadata.id) {
        return Err(RegistryError::DuplicateId {
          id: metadata.id,
          first: first.clone(),
          second: path,
        });
      }

      debug!(agent = %metadata.id, kind = %metadata.kind, path = %path.display(), "agent_loaded");
      sources.insert(metadata.id.clone(), path);
      agents.insert(
        metadata.id.clone(),
        builtin::instantiate(AgentContext::new(store.clone(), metadata)),
      );
    }

    info!(agent_count = agents.len(), "agent_registry_loaded");
    Ok(Self { agents })
  }

  pub fn len(&self) -> usize {
    self.agents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.agents.is_empty()
  }

  /// Registered ids in sorted order.
  pub fn ids(&self) -> impl Iterator<Item = &str> {
    self.agents.keys().map(String::as_str)
  }
}

impl AgentRegistry for StoreAgentRegistry {
  fn lookup(&self, id: &str) -> Option<Arc<dyn Agent>> {
    self.agents.get(id).cloned()
  }
}

fn read_metadata(store: &dyn Store, path: &Path) -> Result<AgentMetadata, RegistryError> {
  let text = store.read_to_string(path).map_err(|source| RegistryError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let doc = anker_document::parse(&text).map_err(|source| RegistryError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  AgentMetadata::from_document(&doc).map_err(|source| RegistryError::Metadata {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::metadata::AgentKind;
  use anker_artifact::MemoryStore;

  fn store_with(agents: &[(&str, &str)]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for (dir, metadata) in agents {
      store
        .insert_file(format!("agents/{dir}/metadata.yaml"), *metadata)
        .unwrap();
    }
    store
  }

  #[test]
  fn test_missing_agents_dir_is_empty_registry() {
    let registry = StoreAgentRegistry::load(Arc::new(MemoryStore::new())).unwrap();
    assert!(registry.is_empty());
    assert!(registry.lookup("AA1").is_none());
  }

  #[test]
  fn test_loads_every_agent_by_id() {
    let store = store_with(&[
      ("requirement", "id: AA1\nkind: requirement\n"),
      ("quality", "id: AA4\nname: Quality Checker\nkind: quality\n"),
    ]);
    let registry = StoreAgentRegistry::load(store).unwrap();

    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["AA1", "AA4"]);
    let agent = registry.lookup("AA4").unwrap();
    assert_eq!(agent.metadata().name, "Quality Checker");
    assert_eq!(agent.metadata().kind, AgentKind::Quality);
  }

  #[test]
  fn test_directories_without_metadata_are_skipped() {
    let store = store_with(&[("design", "id: AA2\nkind: technical-design\n")]);
    store.insert_file("agents/drafts/notes.md", "wip").unwrap();
    store.insert_file("agents/README.md", "docs").unwrap();

    let registry = StoreAgentRegistry::load(store).unwrap();
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn test_invalid_metadata_names_the_file() {
    let store = store_with(&[("broken", "id: AA9\nkind: deployment\n")]);
    match StoreAgentRegistry::load(store) {
      Err(RegistryError::Metadata { path, .. }) => {
        assert_eq!(path, Path::new("agents/broken/metadata.yaml"));
      }
      Err(other) => panic!("unexpected error: {other}"),
      Ok(_) => panic!("expected an error"),
    }
  }

  #[test]
  fn test_duplicate_ids_are_rejected() {
    let store = store_with(&[
      ("a", "id: AA1\nkind: requirement\n"),
      ("b", "id: AA1\nkind: quality\n"),
    ]);
    assert!(matches!(
      StoreAgentRegistry::load(store),
      Err(RegistryError::DuplicateId { id, .. }) if id == "AA1"
    ));
  }
}
