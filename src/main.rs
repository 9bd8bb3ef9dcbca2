use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use anker_artifact::FsStore;
use anker_engine::{
  ExecutionEvent, ExecutionNotifier, Orchestrator, SkipReason, StageFilter, discover_workspace,
};

/// Anker - runs agent workflows stage by stage and archives good runs
#[derive(Parser)]
#[command(name = "anker")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Project root; the workspace is this directory or its `anker/` subdirectory
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the workflow stages in execution order
  Stages {
    /// Print the stages as JSON
    #[arg(long)]
    json: bool,
  },

  /// Run the workflow
  Run {
    /// Overwrite outputs that already exist
    #[arg(long)]
    force: bool,

    /// Only run these stages, by stage key or agent id (repeatable)
    #[arg(long = "stage", value_name = "KEY_OR_AGENT")]
    stages: Vec<String>,

    /// Promote the run to a practice case afterwards
    #[arg(long)]
    promote: bool,
  },

  /// Promote the last run to a practice case
  Promote,
}

/// Prints progress and review checkpoints to stderr.
struct ConsoleNotifier;

impl ExecutionNotifier for ConsoleNotifier {
  fn notify(&self, event: ExecutionEvent) {
    match event {
      ExecutionEvent::StageStarted {
        stage,
        label,
        agent,
        ..
      } => eprintln!("Stage {stage} -> {label} ({agent})"),
      ExecutionEvent::StageCompleted { written, kept, .. } if written.is_empty() && !kept.is_empty() => {
        eprintln!("  outputs already exist; rerun with --force to regenerate")
      }
      ExecutionEvent::ReviewRequested { prompt, .. } => eprintln!("Manual review: {prompt}"),
      ExecutionEvent::PracticeCaseCreated { path, .. } => {
        eprintln!("Practice case created: {}", path.display())
      }
      ExecutionEvent::PromotionSkipped {
        reason: SkipReason::Disabled,
      } => eprintln!("Auto practice promotion disabled; skipping."),
      ExecutionEvent::PromotionSkipped {
        reason: SkipReason::BelowThreshold { score, threshold },
      } => eprintln!("Overall score {score} below threshold {threshold}; skipping promotion."),
      ExecutionEvent::MetricsUnreadable { path, error } => {
        eprintln!("Failed to parse metrics file {}: {error}", path.display())
      }
      _ => {}
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let orchestrator = load(&cli.root)?;

  match cli.command {
    Commands::Stages { json } => list_stages(&orchestrator, json)?,
    Commands::Run {
      force,
      stages,
      promote,
    } => {
      let filter = StageFilter::new(stages);
      let executed = orchestrator
        .run(force, Some(&filter))
        .context("workflow run failed")?;
      for key in &executed {
        println!("{key}");
      }
      if promote {
        promote_practice(&orchestrator)?;
      }
    }
    Commands::Promote => promote_practice(&orchestrator)?,
  }

  Ok(())
}

fn load(root: &Path) -> Result<Orchestrator> {
  let workspace = discover_workspace(root)?;
  let store = Arc::new(FsStore::new(&workspace));
  let orchestrator = Orchestrator::load(store)
    .with_context(|| format!("failed to load workspace: {}", workspace.display()))?;
  Ok(orchestrator.with_notifier(Arc::new(ConsoleNotifier)))
}

fn list_stages(orchestrator: &Orchestrator, json: bool) -> Result<()> {
  let stages = orchestrator.list_stages()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&stages)?);
    return Ok(());
  }

  for stage in stages {
    let depends_on = stage
      .depends_on
      .iter()
      .map(String::as_str)
      .collect::<Vec<_>>()
      .join(", ");
    let review = if stage.human_review_enabled { " [review]" } else { "" };
    println!(
      "{}\t{}\t{}\t[{}]{}",
      stage.key, stage.label, stage.agent, depends_on, review
    );
  }
  Ok(())
}

fn promote_practice(orchestrator: &Orchestrator) -> Result<()> {
  if let Some(case) = orchestrator
    .promote_practice()
    .context("practice promotion failed")?
  {
    println!("{}", case.path.display());
  }
  Ok(())
}
