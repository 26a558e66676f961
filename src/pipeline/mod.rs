//! Typing pipeline and its accounting modes.
//!
//! ```text
//! path ─▶ render ─▶ create ─▶ write ─▶ report warnings
//!            │         │         │
//!            └─────────┴─────────┴──▶ on_error (absorbed)
//! ```
//!
//! One [`Pipeline::run`] handles one file and never fails; outcomes are
//! reported through an [`OutcomeSink`]. [`run_batch`] fans a file list out
//! concurrently, [`WatchAccounting`] handles one change event at a time.

mod batch;
mod tally;
mod watch;

pub use batch::run_batch;
pub use tally::{OutcomeSink, Summary, Tally};
pub use watch::WatchAccounting;

use std::path::Path;
use std::sync::Arc;

use crate::display;
use crate::error::TypingResult;
use crate::render::{RenderScope, StyleRenderer, render_stylesheet};
use crate::typing::{DeclarationEngine, GeneratedArtifact};

/// Everything a single typing run needs besides the path.
pub struct Pipeline {
    renderer: Arc<dyn StyleRenderer>,
    engine: Arc<dyn DeclarationEngine>,
    use_cache: bool,
    verbose: bool,
}

impl Pipeline {
    pub fn new(
        renderer: Arc<dyn StyleRenderer>,
        engine: Arc<dyn DeclarationEngine>,
        use_cache: bool,
        verbose: bool,
    ) -> Self {
        Self {
            renderer,
            engine,
            use_cache,
            verbose,
        }
    }

    /// Type one stylesheet.
    ///
    /// Failures are reported once through `sink.on_error` and resolve to
    /// `None`; every artifact warning is reported through `sink.on_warning`.
    pub async fn run(&self, path: &Path, sink: &dyn OutcomeSink) -> Option<GeneratedArtifact> {
        match self.generate(path).await {
            Ok(artifact) => {
                if self.verbose {
                    display::wrote(&artifact.output_path);
                }
                crate::debug_event!("pipeline", "wrote", "{}", artifact.output_path.display());
                for warning in &artifact.warnings {
                    sink.on_warning(display::warning_message(path, warning));
                }
                Some(artifact)
            }
            Err(e) => {
                crate::debug_event!("pipeline", "failed", "{}: {e}", path.display());
                sink.on_error(display::error_message(path, &e.to_string()));
                None
            }
        }
    }

    async fn generate(&self, path: &Path) -> TypingResult<GeneratedArtifact> {
        let rendered = render_stylesheet(self.renderer.as_ref(), path, &RenderScope::Root).await?;
        let declaration = self
            .engine
            .create(path, rendered.as_str(), self.use_cache)
            .await?;
        self.engine.write(declaration).await
    }
}
