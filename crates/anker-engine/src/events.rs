//! Execution events and notifiers.
//!
//! Events are emitted while a run progresses and when a practice case is
//! promoted, so consumers can observe the engine without parsing logs.

use std::path::PathBuf;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

/// Why a promotion produced no practice case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
  /// `auto_promote_practice` is off.
  Disabled,
  /// The run scored below `knowledge_threshold`.
  BelowThreshold { score: f64, threshold: i64 },
}

/// Events emitted by the orchestrator and the promoter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// A run has started; `stages` is the execution order.
  RunStarted { run_id: String, stages: Vec<String> },

  StageStarted {
    run_id: String,
    stage: String,
    label: String,
    agent: String,
  },

  StageCompleted {
    run_id: String,
    stage: String,
    written: Vec<PathBuf>,
    kept: Vec<PathBuf>,
  },

  StageFailed {
    run_id: String,
    stage: String,
    error: String,
  },

  /// A stage finished and asks for a manual review before work continues.
  ReviewRequested {
    run_id: String,
    stage: String,
    prompt: String,
  },

  RunCompleted { run_id: String, executed: Vec<String> },

  RunFailed { run_id: String, error: String },

  PracticeCaseCreated { name: String, path: PathBuf },

  PromotionSkipped { reason: SkipReason },

  /// The metrics file exists but could not be parsed.
  MetricsUnreadable { path: PathBuf, error: String },
}

/// Trait for receiving execution events.
///
/// The engine calls `notify` for each event and never waits on the outcome.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that forwards events to a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::Sender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::Sender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_channel_notifier_delivers_in_order() {
    let (tx, rx) = mpsc::channel();
    let notifier = ChannelNotifier::new(tx);
    notifier.notify(ExecutionEvent::PromotionSkipped {
      reason: SkipReason::Disabled,
    });
    notifier.notify(ExecutionEvent::RunFailed {
      run_id: "r1".to_string(),
      error: "boom".to_string(),
    });

    assert_eq!(
      rx.try_recv().unwrap(),
      ExecutionEvent::PromotionSkipped {
        reason: SkipReason::Disabled
      }
    );
    assert!(matches!(rx.try_recv().unwrap(), ExecutionEvent::RunFailed { .. }));
  }

  #[test]
  fn test_channel_notifier_survives_dropped_receiver() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    ChannelNotifier::new(tx).notify(ExecutionEvent::PromotionSkipped {
      reason: SkipReason::Disabled,
    });
  }

  #[test]
  fn test_events_serialize_with_variant_tag() {
    let event = ExecutionEvent::ReviewRequested {
      run_id: "r1".to_string(),
      stage: "design".to_string(),
      prompt: "Check the API".to_string(),
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["ReviewRequested"]["stage"], "design");
  }
}
