//! One-shot run and eval orchestration.

use super::{EXIT_FAILURE, EXIT_INVALID_PATH, EXIT_SUCCESS};
use crate::engine::Engine;
use crate::error::PathError;
use crate::paths::{self, ResolvedPath};
use crate::ui::render::RenderSink;
use std::path::Path;

/// Validate `path` against the working directory and hand it to the engine.
///
/// A rejected path never reaches the engine.
pub async fn run_file(
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    path: &str,
    extension: &str,
) -> i32 {
    execute_validated(engine, renderer, paths::validate(path, extension)).await
}

/// Like [`run_file`], resolving relative input against `base`.
pub async fn run_file_from(
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    base: &Path,
    path: &str,
    extension: &str,
) -> i32 {
    execute_validated(engine, renderer, paths::validate_from(base, path, extension)).await
}

async fn execute_validated(
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    validated: Result<ResolvedPath, PathError>,
) -> i32 {
    let resolved = match validated {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::debug!(error = %err, "source path rejected");
            renderer.error(&err.to_string());
            return EXIT_INVALID_PATH;
        }
    };

    tracing::debug!(path = %resolved.as_path().display(), "executing file");
    match engine.execute(resolved.as_path()).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            renderer.engine_failure(&err);
            EXIT_FAILURE
        }
    }
}

/// Evaluate inline source once.
pub async fn eval_inline(engine: &dyn Engine, renderer: &dyn RenderSink, source: &str) -> i32 {
    tracing::debug!(bytes = source.len(), "evaluating inline source");
    match engine.evaluate(source).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            renderer.engine_failure(&err);
            EXIT_FAILURE
        }
    }
}
