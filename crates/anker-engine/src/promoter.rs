//! Practice-case promotion.
//!
//! A run whose metrics reach the knowledge threshold is archived under
//! `practice/case-<timestamp>` together with the configured practice files, a
//! mirror of the generated code and a README summarising the scores.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anker_artifact::Store;
use anker_config::OrchestrationConfig;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::EngineError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier, SkipReason};
use crate::workspace::PRACTICE_DIR;

const CODE_SAMPLES_DIR: &str = "code-samples";
const README_FILE: &str = "README.md";

/// Scores recorded for a run, as written by the quality stage and edited by
/// reviewers. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
  pub overall_score: Option<f64>,
  pub requirement_score: Option<f64>,
  pub design_score: Option<f64>,
  pub code_score: Option<f64>,
  pub quality_score: Option<f64>,
  pub cycle_time_minutes: Option<f64>,
  pub notes: Option<String>,
}

impl MetricsRecord {
  /// The overall score used for gating. A missing score counts as zero.
  pub fn gating_score(&self) -> f64 {
    self.overall_score.unwrap_or(0.0)
  }

  /// Summary written into each practice case.
  pub fn render_readme(&self, case_name: &str) -> String {
    fn or_placeholder<T: Display>(value: Option<T>, placeholder: &str) -> String {
      value.map_or_else(|| placeholder.to_string(), |v| v.to_string())
    }

    let lines = [
      format!("# {case_name}"),
      String::new(),
      "## Overall Scores".to_string(),
      format!("- Total Score: {}", or_placeholder(self.overall_score, "n/a")),
      format!("- Requirement: {}", or_placeholder(self.requirement_score, "n/a")),
      format!("- Design: {}", or_placeholder(self.design_score, "n/a")),
      format!("- Code: {}", or_placeholder(self.code_score, "n/a")),
      format!("- Quality: {}", or_placeholder(self.quality_score, "n/a")),
      String::new(),
      "## Execution Metrics".to_string(),
      format!(
        "- Cycle Time (minutes): {}",
        or_placeholder(self.cycle_time_minutes, "unknown")
      ),
      String::new(),
      "## Notes".to_string(),
      or_placeholder(self.notes.as_deref(), "None provided"),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
  }
}

/// A freshly created practice case directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeCase {
  /// Directory name, e.g. `case-20250101-093000`.
  pub name: String,
  /// Path relative to the workspace root.
  pub path: PathBuf,
  pub created_at: NaiveDateTime,
}

/// Archives a finished run as a practice case when its score is high enough.
pub struct Promoter<'a> {
  store: &'a dyn Store,
  config: &'a OrchestrationConfig,
  notifier: &'a dyn ExecutionNotifier,
}

impl<'a> Promoter<'a> {
  pub fn new(store: &'a dyn Store, config: &'a OrchestrationConfig) -> Self {
    Self {
      store,
      config,
      notifier: &NoopNotifier,
    }
  }

  pub fn with_notifier(mut self, notifier: &'a dyn ExecutionNotifier) -> Self {
    self.notifier = notifier;
    self
  }

  /// Promote using the current local time for the case name.
  pub fn promote(&self) -> Result<Option<PracticeCase>, EngineError> {
    self.promote_at(Local::now().naive_local())
  }

  /// Promote, naming the case after `now`.
  ///
  /// Returns `Ok(None)` when promotion is disabled, the metrics file is missing
  /// or unreadable, or the score is below the threshold. Storage failures while
  /// writing the case are returned as errors.
  #[instrument(name = "promote", skip(self))]
  pub fn promote_at(&self, now: NaiveDateTime) -> Result<Option<PracticeCase>, EngineError> {
    if !self.config.auto_promote_practice {
      info!("promotion_disabled");
      self.notifier.notify(ExecutionEvent::PromotionSkipped {
        reason: SkipReason::Disabled,
      });
      return Ok(None);
    }

    let Some(metrics) = self.read_metrics()? else {
      return Ok(None);
    };

    let score = metrics.gating_score();
    let threshold = self.config.knowledge_threshold;
    if score < threshold as f64 {
      info!(score, threshold, "promotion_below_threshold");
      self.notifier.notify(ExecutionEvent::PromotionSkipped {
        reason: SkipReason::BelowThreshold { score, threshold },
      });
      return Ok(None);
    }

    let case = self.allocate_case(now)?;
    self.copy_practice_files(&case.path)?;
    self.mirror_code(&case.path)?;
    self.store.write_file(
      &case.path.join(README_FILE),
      &metrics.render_readme(&case.name),
    )?;

    info!(case = %case.name, path = %case.path.display(), score, "practice_case_created");
    self.notifier.notify(ExecutionEvent::PracticeCaseCreated {
      name: case.name.clone(),
      path: case.path.clone(),
    });
    Ok(Some(case))
  }

  /// A missing file is `None`; so is one that is not valid metrics JSON, after
  /// reporting it. Failing to read an existing file is an error.
  fn read_metrics(&self) -> Result<Option<MetricsRecord>, EngineError> {
    let path = self.config.metrics_file.as_path();
    if !self.store.is_file(path) {
      debug!(path = %path.display(), "metrics_missing");
      return Ok(None);
    }

    let text = self
      .store
      .read_to_string(path)
      .map_err(|source| EngineError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    match serde_json::from_str::<MetricsRecord>(&text) {
      Ok(metrics) => Ok(Some(metrics)),
      Err(e) => {
        warn!(path = %path.display(), error = %e, "metrics_unreadable");
        self.notifier.notify(ExecutionEvent::MetricsUnreadable {
          path: path.to_path_buf(),
          error: e.to_string(),
        });
        Ok(None)
      }
    }
  }

  /// Create `practice/case-<ts>`, or the first free `case-<ts>-NN`.
  fn allocate_case(&self, now: NaiveDateTime) -> Result<PracticeCase, EngineError> {
    let practice = Path::new(PRACTICE_DIR);
    self.store.make_directories(practice)?;

    let base = format!("case-{}", now.format("%Y%m%d-%H%M%S"));
    let mut suffix: Option<u32> = None;
    loop {
      let name = match suffix {
        None => base.clone(),
        Some(n) => format!("{base}-{n:02}"),
      };
      let path = practice.join(&name);

      match self.store.create_directory(&path) {
        Ok(()) => {
          return Ok(PracticeCase {
            name,
            path,
            created_at: now,
          });
        }
        Err(anker_artifact::Error::AlreadyExists(_)) => {
          debug!(case = %name, "case_name_taken");
          suffix = Some(suffix.map_or(0, |n| n + 1));
        }
        Err(e) => return Err(e.into()),
      }
    }
  }

  fn copy_practice_files(&self, case_dir: &Path) -> Result<(), EngineError> {
    for source in &self.config.practice_files {
      let Some(file_name) = source.file_name() else {
        continue;
      };
      if !self.store.is_file(source) {
        debug!(path = %source.display(), "practice_file_skipped");
        continue;
      }
      self.store.copy_file(source, &case_dir.join(file_name))?;
    }
    Ok(())
  }

  fn mirror_code(&self, case_dir: &Path) -> Result<(), EngineError> {
    let code_root = self.config.practice_code_root.as_path();
    if !self.store.is_dir(code_root) {
      return Ok(());
    }

    let dest = case_dir.join(CODE_SAMPLES_DIR);
    if self.store.is_dir(&dest) {
      self.store.remove_tree(&dest)?;
    } else if self.store.exists(&dest) {
      self.store.remove_file(&dest)?;
    }
    self.store.copy_tree(code_root, &dest)?;
    Ok(())
  }
}
