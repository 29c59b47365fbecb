//! Rendering contract consumed by the app layer.
//!
//! `RenderSink` lets orchestration code report outcomes without being tied to
//! stderr/stdout; tests substitute a recording sink.

use crate::error::EngineError;

pub use crate::ui::renderer::Renderer;

/// Injectable rendering interface used by orchestration code.
pub trait RenderSink: Send + Sync {
    /// Render an error line.
    fn error(&self, msg: &str);
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render a failure reported by the engine.
    fn engine_failure(&self, err: &EngineError);
    /// Render the interactive startup banner.
    fn banner(&self, text: &str);
    /// Render informational output the user asked for (help, version).
    fn output(&self, text: &str);
}

impl RenderSink for Renderer {
    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn engine_failure(&self, err: &EngineError) {
        self.engine_failure(err);
    }

    fn banner(&self, text: &str) {
        self.banner(text);
    }

    fn output(&self, text: &str) {
        self.output(text);
    }
}
