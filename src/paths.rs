//! Source path validation ahead of any engine call.
//!
//! Checks run in a fixed order: the path must exist, then it must carry the
//! engine's source extension. Only filesystem metadata is consulted; file
//! contents are never read here.

use crate::error::PathError;
use std::path::{Path, PathBuf};

/// An absolute, canonical path to an existing source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Validate `path` relative to the process working directory.
pub fn validate(path: &str, extension: &str) -> Result<ResolvedPath, PathError> {
    let base = std::env::current_dir().map_err(|source| PathError::Unresolvable {
        path: PathBuf::from(path),
        source,
    })?;
    validate_from(&base, path, extension)
}

/// Validate `path`, resolving relative input against `base`.
///
/// `extension` is compared without its leading dot and case-sensitively.
pub fn validate_from(base: &Path, path: &str, extension: &str) -> Result<ResolvedPath, PathError> {
    let requested = PathBuf::from(path);
    if path.is_empty() {
        return Err(PathError::FileNotFound(requested));
    }

    let candidate = base.join(&requested);
    if !candidate.exists() {
        tracing::debug!(path = %candidate.display(), "source path does not exist");
        return Err(PathError::FileNotFound(requested));
    }

    let expected = extension.trim_start_matches('.');
    if requested.extension().and_then(|ext| ext.to_str()) != Some(expected) {
        return Err(PathError::WrongExtension {
            path: requested,
            expected: expected.to_string(),
        });
    }

    let resolved = std::fs::canonicalize(&candidate).map_err(|source| PathError::Unresolvable {
        path: requested,
        source,
    })?;
    tracing::debug!(path = %resolved.display(), "source path resolved");
    Ok(ResolvedPath(resolved))
}
