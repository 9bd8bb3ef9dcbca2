use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anker_agent::builtin::{CODE_ROOT, EXECUTION_METRICS, REQUIREMENT_SPEC, TECHNICAL_DESIGN};
use anker_agent::{AgentError, AgentRegistry, StoreAgentRegistry};
use anker_artifact::FsStore;
use tempfile::TempDir;

fn workspace() -> TempDir {
  let dir = TempDir::new().unwrap();
  let agents = [
    ("requirement-analyzer", "id: AA1\nkind: requirement\ninputs: [brief.md]\n"),
    (
      "technical-designer",
      "id: AA2\nkind: technical-design\ninputs: [requirement/requirement-spec.json]\n",
    ),
    ("code-generator", "id: AA3\nkind: code-generation\n"),
    (
      "quality-checker",
      "id: AA4\nkind: quality\noutputs: [reports/quality-report.md, reports/execution-metrics.json]\n",
    ),
  ];
  for (name, metadata) in agents {
    let agent_dir = dir.path().join("agents").join(name);
    fs::create_dir_all(&agent_dir).unwrap();
    fs::write(agent_dir.join("metadata.yaml"), metadata).unwrap();
  }
  dir
}

fn registry(dir: &TempDir) -> StoreAgentRegistry {
  StoreAgentRegistry::load(Arc::new(FsStore::new(dir.path()))).unwrap()
}

#[test]
fn test_missing_inputs_stop_the_agent() {
  let dir = workspace();
  let agent = registry(&dir).lookup("AA1").unwrap();

  match agent.execute(false) {
    Err(AgentError::MissingInputs { agent, missing }) => {
      assert_eq!(agent, "AA1");
      assert_eq!(missing, vec![PathBuf::from("brief.md")]);
    }
    other => panic!("unexpected result: {other:?}"),
  }
  assert!(!dir.path().join(REQUIREMENT_SPEC).exists());
}

#[test]
fn test_agents_chain_through_their_outputs() {
  let dir = workspace();
  fs::write(dir.path().join("brief.md"), "Build a todo service").unwrap();
  let registry = registry(&dir);

  for id in ["AA1", "AA2", "AA3", "AA4"] {
    let report = registry.lookup(id).unwrap().execute(false).unwrap();
    assert!(!report.written.is_empty(), "{id} wrote nothing");
    assert!(report.kept.is_empty());
  }

  assert!(dir.path().join(REQUIREMENT_SPEC).is_file());
  assert!(dir.path().join(TECHNICAL_DESIGN).is_file());
  assert!(dir.path().join(CODE_ROOT).join("app/api/routes.py").is_file());

  let metrics: serde_json::Value =
    serde_json::from_str(&fs::read_to_string(dir.path().join(EXECUTION_METRICS)).unwrap()).unwrap();
  assert_eq!(metrics["overall_score"], 0);
  assert!(metrics["notes"].is_string());
}

#[test]
fn test_rerun_keeps_edits_unless_forced() {
  let dir = workspace();
  let registry = registry(&dir);
  let quality = registry.lookup("AA4").unwrap();

  quality.execute(false).unwrap();
  let metrics_path = dir.path().join(EXECUTION_METRICS);
  fs::write(&metrics_path, "{\"overall_score\": 92}\n").unwrap();

  let report = quality.execute(false).unwrap();
  assert!(report.is_unchanged());
  assert_eq!(report.kept.len(), 2);
  assert!(report.kept.contains(&Path::new(EXECUTION_METRICS).to_path_buf()));
  assert_eq!(
    fs::read_to_string(&metrics_path).unwrap(),
    "{\"overall_score\": 92}\n"
  );

  let report = quality.execute(true).unwrap();
  assert_eq!(report.written.len(), 2);
  assert!(fs::read_to_string(&metrics_path).unwrap().contains("\"overall_score\": 0"));
}

#[test]
fn test_code_generator_is_idempotent() {
  let dir = workspace();
  let code = registry(&dir).lookup("AA3").unwrap();

  let first = code.execute(false).unwrap();
  let second = code.execute(false).unwrap();

  assert_eq!(first.written, second.kept);
  assert!(second.written.is_empty());
}
