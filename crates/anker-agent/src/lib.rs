//! Anker Agent
//!
//! Agents do the work of a workflow stage. Each agent is described by a
//! `metadata.yaml` file under the workspace's `agents/` directory:
//!
//! ```text
//! agents/
//! └── requirement-analyzer/
//!     └── metadata.yaml    # id, kind, inputs, outputs, ...
//! ```
//!
//! The `kind` field selects one of the built-in implementations. Every built-in
//! agent writes skeleton artifacts into the workspace through an
//! [`anker_artifact::Store`] and leaves existing files alone unless asked to
//! overwrite them.

mod agent;
pub mod builtin;
mod error;
mod metadata;
mod registry;

pub use agent::{Agent, AgentContext, AgentReport};
pub use error::{AgentError, MetadataError, RegistryError};
pub use metadata::{AgentKind, AgentMetadata};
pub use registry::{AGENTS_DIR, AgentRegistry, METADATA_FILE, StoreAgentRegistry};
