//! grass-backed SCSS renderer with `~package` import resolution.

use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::StyleRenderer;
use crate::config::Settings;
use crate::error::RenderError;

/// Filesystem shim handed to grass.
///
/// Any path containing a `~name` component is rewritten to
/// `node_modules/name/...` in the nearest ancestor that has one, so
/// `@import "~bootstrap/scss/variables"` resolves like webpack does.
#[derive(Debug, Default)]
pub struct TildeFs;

impl TildeFs {
    /// Rewrite a `~package/...` path; other paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let components: Vec<Component<'_>> = path.components().collect();
        let Some(tilde) = components.iter().position(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('~'),
            _ => false,
        }) else {
            return path.to_path_buf();
        };

        let base: PathBuf = components[..tilde].iter().collect();
        let mut rest = PathBuf::new();
        if let Component::Normal(name) = components[tilde] {
            let name = name.to_string_lossy();
            let package = name.trim_start_matches('~');
            if !package.is_empty() {
                rest.push(package);
            }
        }
        rest.extend(&components[tilde + 1..]);

        for dir in base.ancestors() {
            let modules = dir.join("node_modules");
            if modules.is_dir() {
                return modules.join(&rest);
            }
        }
        base.join("node_modules").join(rest)
    }
}

impl grass::Fs for TildeFs {
    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// Renders stylesheets with grass on the blocking pool.
#[derive(Debug, Clone)]
pub struct SassRenderer {
    load_paths: Vec<PathBuf>,
}

impl SassRenderer {
    pub fn new(load_paths: Vec<PathBuf>) -> Self {
        Self { load_paths }
    }

    /// Load paths are the configured include paths followed by the search
    /// directory.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut load_paths = settings.sass.include_paths.clone();
        load_paths.push(settings.search_dir.clone());
        Self::new(load_paths)
    }

    fn compile(path: &Path, load_paths: &[PathBuf]) -> Result<String, RenderError> {
        let fs = TildeFs;
        let options = grass::Options::default()
            .fs(&fs)
            .load_paths(load_paths)
            .style(grass::OutputStyle::Expanded)
            .quiet(true);

        grass::from_path(path, &options).map_err(|e| RenderError::Compile {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }
}

#[async_trait]
impl StyleRenderer for SassRenderer {
    async fn render(&self, path: &Path) -> Result<String, RenderError> {
        let owned = path.to_path_buf();
        let load_paths = self.load_paths.clone();

        tokio::task::spawn_blocking(move || Self::compile(&owned, &load_paths))
            .await
            .map_err(|e| RenderError::Task {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
    }
}
