//! Stylesheet rendering.
//!
//! [`StyleRenderer`] is the seam to the preprocessor; [`render_stylesheet`]
//! is the adapter the typing pipeline calls. It decides whether a render
//! failure is fatal for the invocation or treated as empty content.

mod sass;

pub use sass::{SassRenderer, TildeFs};

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Compiles one stylesheet to CSS.
#[async_trait]
pub trait StyleRenderer: Send + Sync {
    async fn render(&self, path: &Path) -> Result<String, RenderError>;
}

/// How a render failure is treated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderScope {
    /// The file is rendered as an entry point; failures propagate.
    #[default]
    Root,
    /// The file is rendered on behalf of another file (a partial or nested
    /// import); failures are expected and become empty content.
    RelativeTo(PathBuf),
}

/// Result of a successful adapter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Css(String),
    /// The render failed under [`RenderScope::RelativeTo`] and was suppressed.
    Empty,
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Css(css) => css,
            Rendered::Empty => "",
        }
    }
}

/// Render `path`, propagating failures only in [`RenderScope::Root`].
pub async fn render_stylesheet(
    renderer: &dyn StyleRenderer,
    path: &Path,
    scope: &RenderScope,
) -> Result<Rendered, RenderError> {
    match renderer.render(path).await {
        Ok(css) => Ok(Rendered::Css(css)),
        Err(e) => match scope {
            RenderScope::Root => Err(e),
            RenderScope::RelativeTo(parent) => {
                crate::debug_event!(
                    "render",
                    "suppressed",
                    "{} (relative to {}): {e}",
                    path.display(),
                    parent.display()
                );
                Ok(Rendered::Empty)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl StyleRenderer for Failing {
        async fn render(&self, path: &Path) -> Result<String, RenderError> {
            Err(RenderError::Compile {
                path: path.to_path_buf(),
                details: "undefined variable".to_string(),
            })
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl StyleRenderer for Fixed {
        async fn render(&self, _path: &Path) -> Result<String, RenderError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_root_scope_propagates_failure() {
        let result = render_stylesheet(&Failing, Path::new("a.scss"), &RenderScope::Root).await;
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("render error"));
        assert!(err.to_string().contains("undefined variable"));
    }

    #[tokio::test]
    async fn test_relative_scope_suppresses_failure() {
        let scope = RenderScope::RelativeTo(PathBuf::from("main.scss"));
        let result = render_stylesheet(&Failing, Path::new("_vars.scss"), &scope)
            .await
            .unwrap();
        assert_eq!(result, Rendered::Empty);
        assert_eq!(result.as_str(), "");
    }

    #[tokio::test]
    async fn test_success_passes_css_through() {
        for scope in [RenderScope::Root, RenderScope::RelativeTo("x.scss".into())] {
            let result = render_stylesheet(&Fixed(".a{}"), Path::new("a.scss"), &scope)
                .await
                .unwrap();
            assert_eq!(result, Rendered::Css(".a{}".to_string()));
        }
    }
}
