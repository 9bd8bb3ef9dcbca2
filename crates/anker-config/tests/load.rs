use std::fs;
use std::path::{Path, PathBuf};

use anker_artifact::FsStore;
use anker_config::{ConfigError, OrchestrationConfig};
use tempfile::TempDir;

#[test]
fn test_load_from_filesystem() {
  let dir = TempDir::new().unwrap();
  fs::create_dir(dir.path().join("plan")).unwrap();
  fs::write(
    dir.path().join("plan/orchestration.yaml"),
    "# promotion settings\nknowledge_threshold: 75\npractice_files: [reports/quality-report.md]\n",
  )
  .unwrap();

  let store = FsStore::new(dir.path());
  let cfg = OrchestrationConfig::load(&store, Path::new("plan/orchestration.yaml")).unwrap();

  assert_eq!(cfg.knowledge_threshold, 75);
  assert_eq!(cfg.practice_files, vec![PathBuf::from("reports/quality-report.md")]);
  assert!(cfg.auto_promote_practice);
}

#[test]
fn test_load_rejects_wrong_shape() {
  let dir = TempDir::new().unwrap();
  fs::create_dir(dir.path().join("plan")).unwrap();
  fs::write(
    dir.path().join("plan/orchestration.yaml"),
    "auto_promote_practice: maybe\n",
  )
  .unwrap();

  let store = FsStore::new(dir.path());
  let err = OrchestrationConfig::load(&store, Path::new("plan/orchestration.yaml")).unwrap_err();
  assert!(matches!(err, ConfigError::Field(_)));
}
