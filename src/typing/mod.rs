//! Declaration generation.
//!
//! A [`DeclarationEngine`] turns rendered CSS into a [`Declaration`] draft
//! and persists it, returning the [`GeneratedArtifact`] the pipeline reports.

mod engine;
pub mod tokens;

pub use engine::{DtsEngine, DtsOptions};

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::TypingResult;

/// Typed representation of one stylesheet, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub source: PathBuf,
    pub output_path: PathBuf,
    pub tokens: Vec<String>,
    /// In detection order.
    pub warnings: Vec<String>,
}

/// A written declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub output_path: PathBuf,
    pub warnings: Vec<String>,
}

#[async_trait]
pub trait DeclarationEngine: Send + Sync {
    /// Build the declaration for `path` from its rendered CSS.
    ///
    /// `use_cache` allows the engine to reuse state from earlier calls for
    /// the same path.
    async fn create(&self, path: &Path, css: &str, use_cache: bool) -> TypingResult<Declaration>;

    /// Persist the declaration.
    async fn write(&self, declaration: Declaration) -> TypingResult<GeneratedArtifact>;
}
