//! Error types for rendering, declaration generation, discovery and startup.

use std::path::PathBuf;
use thiserror::Error;

use crate::watcher::WatchError;

/// Failures from the stylesheet preprocessor.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render error: {details}")]
    Compile { path: PathBuf, details: String },

    #[error("render task for {path} did not complete: {reason}")]
    Task { path: PathBuf, reason: String },
}

/// Failures inside one typing pipeline invocation.
///
/// The pipeline reports all of these the same way; the variants only
/// exist so the detail line is precise.
#[derive(Error, Debug)]
pub enum TypingError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to generate declarations for {path}: {reason}")]
    Generate { path: PathBuf, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures while expanding the glob pattern into a file list.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("failed to walk {root}: {reason}")]
    Walk { root: PathBuf, reason: String },
}

/// Conditions that stop a run before any pipeline is started.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("search directory {0} does not exist")]
    MissingSearchDir(PathBuf),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

pub type TypingResult<T> = Result<T, TypingError>;
