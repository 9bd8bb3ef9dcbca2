//! Sequential stage execution.

use std::path::Path;
use std::sync::Arc;

use anker_agent::{AgentRegistry, StoreAgentRegistry};
use anker_artifact::Store;
use anker_config::OrchestrationConfig;
use anker_workflow::{StageDefinition, WorkflowGraph};
use tracing::{Span, error, info, instrument};
use uuid::Uuid;

use crate::error::EngineError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::filter::StageFilter;
use crate::promoter::{PracticeCase, Promoter};
use crate::workspace::{ORCHESTRATION_FILE, WORKFLOW_FILE};

/// Shown at a review checkpoint when the stage gives no prompt of its own.
pub const DEFAULT_REVIEW_PROMPT: &str = "Manual review required";

/// Runs a workspace's stages one at a time in dependency order.
///
/// Any failure stops the run; stages after the failing one are not attempted.
/// Review checkpoints are reported through the notifier and never block.
pub struct Orchestrator {
  store: Arc<dyn Store>,
  workflow: WorkflowGraph,
  config: OrchestrationConfig,
  registry: Arc<dyn AgentRegistry>,
  notifier: Arc<dyn ExecutionNotifier>,
}

impl Orchestrator {
  pub fn new(
    store: Arc<dyn Store>,
    workflow: WorkflowGraph,
    config: OrchestrationConfig,
    registry: Arc<dyn AgentRegistry>,
  ) -> Self {
    Self {
      store,
      workflow,
      config,
      registry,
      notifier: Arc::new(NoopNotifier),
    }
  }

  /// Load the workflow, orchestration settings and agents of the workspace
  /// rooted at `store`.
  pub fn load(store: Arc<dyn Store>) -> Result<Self, EngineError> {
    let workflow = load_workflow(store.as_ref(), Path::new(WORKFLOW_FILE))?;
    let config = OrchestrationConfig::load(store.as_ref(), Path::new(ORCHESTRATION_FILE))?;
    let registry = StoreAgentRegistry::load(store.clone())?;

    info!(
      stage_count = workflow.len(),
      agent_count = registry.len(),
      "workspace_loaded"
    );
    Ok(Self::new(store, workflow, config, Arc::new(registry)))
  }

  pub fn with_notifier(mut self, notifier: Arc<dyn ExecutionNotifier>) -> Self {
    self.notifier = notifier;
    self
  }

  pub fn config(&self) -> &OrchestrationConfig {
    &self.config
  }

  /// All stages in execution order.
  pub fn list_stages(&self) -> Result<Vec<&StageDefinition>, EngineError> {
    Ok(self.workflow.ordered_stages()?)
  }

  /// Execute the workflow and return the keys of the executed stages in order.
  ///
  /// With a non-empty `filter`, only the matching stages run, still in
  /// dependency order. Unless `force` is set, agents keep outputs that already
  /// exist.
  #[instrument(name = "orchestrator_run", skip(self, filter), fields(run_id = tracing::field::Empty))]
  pub fn run(&self, force: bool, filter: Option<&StageFilter>) -> Result<Vec<String>, EngineError> {
    let run_id = Uuid::new_v4().to_string();
    Span::current().record("run_id", run_id.as_str());

    let result = self.run_stages(&run_id, force, filter);

    match &result {
      Ok(executed) => {
        info!(run_id = %run_id, executed = executed.len(), "run_completed");
        self.notifier.notify(ExecutionEvent::RunCompleted {
          run_id: run_id.clone(),
          executed: executed.clone(),
        });
      }
      Err(e) => {
        error!(run_id = %run_id, error = %e, "run_failed");
        self.notifier.notify(ExecutionEvent::RunFailed {
          run_id: run_id.clone(),
          error: e.to_string(),
        });
      }
    }

    result
  }

  fn run_stages(
    &self,
    run_id: &str,
    force: bool,
    filter: Option<&StageFilter>,
  ) -> Result<Vec<String>, EngineError> {
    let mut queue = self.workflow.ordered_stages()?;
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
      queue.retain(|stage| filter.matches(stage));
    }

    let keys: Vec<String> = queue.iter().map(|stage| stage.key.clone()).collect();
    info!(run_id = %run_id, stages = ?keys, force, "run_started");
    self.notifier.notify(ExecutionEvent::RunStarted {
      run_id: run_id.to_string(),
      stages: keys,
    });

    let mut executed = Vec::with_capacity(queue.len());
    for stage in queue {
      self.run_stage(run_id, stage, force)?;
      executed.push(stage.key.clone());

      if stage.human_review_enabled {
        let prompt = if stage.human_review_prompt.is_empty() {
          DEFAULT_REVIEW_PROMPT
        } else {
          stage.human_review_prompt.as_str()
        };
        info!(run_id = %run_id, stage = %stage.key, prompt = %prompt, "review_requested");
        self.notifier.notify(ExecutionEvent::ReviewRequested {
          run_id: run_id.to_string(),
          stage: stage.key.clone(),
          prompt: prompt.to_string(),
        });
      }
    }

    Ok(executed)
  }

  fn run_stage(&self, run_id: &str, stage: &StageDefinition, force: bool) -> Result<(), EngineError> {
    let agent = self
      .registry
      .lookup(&stage.agent)
      .ok_or_else(|| EngineError::AgentNotFound {
        stage: stage.key.clone(),
        agent: stage.agent.clone(),
      })?;

    info!(
      run_id = %run_id,
      stage = %stage.key,
      label = %stage.label,
      agent = %agent.metadata().name,
      "stage_started"
    );
    self.notifier.notify(ExecutionEvent::StageStarted {
      run_id: run_id.to_string(),
      stage: stage.key.clone(),
      label: stage.label.clone(),
      agent: agent.metadata().name.clone(),
    });

    match agent.execute(force) {
      Ok(report) => {
        info!(
          run_id = %run_id,
          stage = %stage.key,
          written = report.written.len(),
          kept = report.kept.len(),
          "stage_completed"
        );
        self.notifier.notify(ExecutionEvent::StageCompleted {
          run_id: run_id.to_string(),
          stage: stage.key.clone(),
          written: report.written,
          kept: report.kept,
        });
        Ok(())
      }
      Err(source) => {
        error!(run_id = %run_id, stage = %stage.key, error = %source, "stage_failed");
        self.notifier.notify(ExecutionEvent::StageFailed {
          run_id: run_id.to_string(),
          stage: stage.key.clone(),
          error: source.to_string(),
        });
        Err(EngineError::StageExecution {
          stage: stage.key.clone(),
          source,
        })
      }
    }
  }

  /// Archive the current run as a practice case if the settings and metrics
  /// allow it.
  pub fn promote_practice(&self) -> Result<Option<PracticeCase>, EngineError> {
    Promoter::new(self.store.as_ref(), &self.config)
      .with_notifier(self.notifier.as_ref())
      .promote()
  }
}

fn load_workflow(store: &dyn Store, path: &Path) -> Result<WorkflowGraph, EngineError> {
  let text = store.read_to_string(path).map_err(|source| EngineError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let doc = anker_document::parse(&text).map_err(|source| EngineError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(WorkflowGraph::from_document(&doc)?)
}
