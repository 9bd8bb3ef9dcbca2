//! Anker Workflow
//!
//! This crate turns a parsed workflow document into a [`WorkflowGraph`] of
//! [`StageDefinition`]s and computes a deterministic execution order for it.
//!
//! Stage definitions are validated when the graph is built; dependency
//! references and acyclicity are checked when the order is computed, so a graph
//! can be inspected before it is known to be schedulable.

mod error;
mod graph;
mod stage;

pub use error::WorkflowError;
pub use graph::WorkflowGraph;
pub use stage::StageDefinition;
