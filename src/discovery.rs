//! Stylesheet discovery.
//!
//! Patterns are matched against paths relative to the search root, with `*`
//! never crossing a `/`, so `**/[^_]*.scss` selects every stylesheet whose
//! file name does not start with an underscore.

use globset::{Glob, GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::DiscoveryError;

/// Include pattern plus optional ignore pattern.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: GlobMatcher,
    ignore: Option<GlobMatcher>,
}

impl FileMatcher {
    pub fn new(pattern: &str, ignore: Option<&str>) -> Result<Self, DiscoveryError> {
        Ok(Self {
            include: compile(pattern)?.compile_matcher(),
            ignore: ignore.map(compile).transpose()?.map(|g| g.compile_matcher()),
        })
    }

    /// Match a path already relative to the search root.
    pub fn is_match(&self, relative: &Path) -> bool {
        self.include.is_match(relative)
            && !self
                .ignore
                .as_ref()
                .is_some_and(|ignore| ignore.is_match(relative))
    }

    /// Match `path` relative to `root`; paths outside `root` never match.
    pub fn matches_under(&self, root: &Path, path: &Path) -> bool {
        path.strip_prefix(root)
            .map(|relative| self.is_match(relative))
            .unwrap_or(false)
    }
}

fn compile(pattern: &str) -> Result<Glob, DiscoveryError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Walk `root` and return every matching file, sorted.
pub fn discover(root: &Path, matcher: &FileMatcher) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself failing is fatal; unreadable children are skipped
            Err(e) if e.depth() == 0 => {
                return Err(DiscoveryError::Walk {
                    root: root.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!("[discovery] skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.matches_under(root, entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    crate::debug_event!("discovery", "matched", "{} files under {}", files.len(), root.display());
    Ok(files)
}
