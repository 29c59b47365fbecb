//! Boundary to the external Nucleus execution engine.
//!
//! The front-end only ever asks the engine for two things: run a resolved
//! source file, or evaluate a source string. Everything the engine does while
//! handling either call is opaque here; the adapter's job is to marshal the
//! call and hand back its failure, if any, unchanged.
//!
//! `Engine` is the injection seam. The binary wires in [`ProcessEngine`],
//! which drives the VM as a child process; tests substitute recording stubs.

mod disruption;
mod process;

use crate::error::EngineError;
use async_trait::async_trait;
use std::path::Path;

pub use disruption::Disruption;
pub use process::ProcessEngine;

/// The two operations the front-end needs from an execution engine.
///
/// Calls are issued strictly one at a time; implementations never see
/// overlapping requests from the coordinator.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run the source file at an absolute, canonical path.
    async fn execute(&self, path: &Path) -> Result<(), EngineError>;

    /// Evaluate a raw source string.
    async fn evaluate(&self, source: &str) -> Result<(), EngineError>;
}
