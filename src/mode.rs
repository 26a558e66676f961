//! Mode selection: one-shot batch over discovered files, or watch.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::discovery::{FileMatcher, discover};
use crate::display;
use crate::error::StartupError;
use crate::pipeline::{Pipeline, Summary, WatchAccounting, run_batch};
use crate::render::{SassRenderer, StyleRenderer};
use crate::typing::{DeclarationEngine, DtsEngine, DtsOptions};
use crate::watcher::StyleWatcher;

/// What a run ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Discovery matched nothing; no pipeline ran.
    NoFiles,
    Batch(Summary),
    /// The watch loop ran until cancelled.
    Watched,
}

/// Collaborators for a run, built once from settings.
pub struct Collaborators {
    pub renderer: Arc<dyn StyleRenderer>,
    pub engine: Arc<dyn DeclarationEngine>,
}

impl Collaborators {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            renderer: Arc::new(SassRenderer::from_settings(settings)),
            engine: Arc::new(DtsEngine::new(DtsOptions::from_settings(settings))),
        }
    }
}

/// Run with the default grass renderer and `.d.ts` engine.
pub async fn run(
    settings: &Settings,
    cancel: CancellationToken,
) -> Result<RunOutcome, StartupError> {
    run_with(settings, Collaborators::from_settings(settings), cancel).await
}

/// Run with explicit collaborators.
///
/// Batch mode disables the engine cache since every file is processed once;
/// watch mode enables it because files are reprocessed on every edit.
pub async fn run_with(
    settings: &Settings,
    collaborators: Collaborators,
    cancel: CancellationToken,
) -> Result<RunOutcome, StartupError> {
    if !settings.search_dir.is_dir() {
        return Err(StartupError::MissingSearchDir(settings.search_dir.clone()));
    }

    let matcher = FileMatcher::new(&settings.pattern, settings.ignore.as_deref())?;
    let use_cache = settings.watch;
    let pipeline = Pipeline::new(
        collaborators.renderer,
        collaborators.engine,
        use_cache,
        settings.verbose,
    );

    if settings.watch {
        let watcher = StyleWatcher::new(&settings.search_dir, matcher)?;
        display::watching();
        watcher
            .run(WatchAccounting::new(Arc::new(pipeline)), cancel)
            .await;
        return Ok(RunOutcome::Watched);
    }

    let files = discover(&settings.search_dir, &matcher)?;
    if files.is_empty() {
        display::no_files();
        return Ok(RunOutcome::NoFiles);
    }

    display::found_files(files.len());
    Ok(RunOutcome::Batch(run_batch(&pipeline, &files).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::Scripted;
    use std::fs;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    fn scripted_collaborators(scripted: &Arc<Scripted>) -> Collaborators {
        Collaborators {
            renderer: scripted.clone(),
            engine: scripted.clone(),
        }
    }

    fn settings_for(dir: &std::path::Path) -> Settings {
        Settings {
            search_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_missing_search_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let scripted = Arc::new(Scripted::new(&[]));
        let settings = settings_for(&temp_dir.path().join("nope"));

        let result = run_with(
            &settings,
            scripted_collaborators(&scripted),
            CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(StartupError::MissingSearchDir(_))));
        assert!(scripted.cache_flags.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_files_skips_batch() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("_only_partial.scss"), "").unwrap();
        let scripted = Arc::new(Scripted::new(&[]));

        let outcome = run_with(
            &settings_for(temp_dir.path()),
            scripted_collaborators(&scripted),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, RunOutcome::NoFiles);
        assert!(scripted.cache_flags.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_runs_without_cache() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.scss"), "").unwrap();
        fs::write(temp_dir.path().join("b.scss"), "").unwrap();
        let scripted = Arc::new(Scripted::new(&[]));

        let outcome = run_with(
            &settings_for(temp_dir.path()),
            scripted_collaborators(&scripted),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let RunOutcome::Batch(summary) = outcome else {
            panic!("expected a batch run");
        };
        assert_eq!(summary.artifacts.len(), 2);
        assert_eq!(scripted.writes.load(Ordering::SeqCst), 2);
        assert_eq!(*scripted.cache_flags.lock().unwrap(), vec![false, false]);
    }

    #[tokio::test]
    async fn test_invalid_pattern_stops_before_any_run() {
        let temp_dir = TempDir::new().unwrap();
        let scripted = Arc::new(Scripted::new(&[]));
        let settings = Settings {
            pattern: "[".to_string(),
            ..settings_for(temp_dir.path())
        };

        let result = run_with(
            &settings,
            scripted_collaborators(&scripted),
            CancellationToken::new(),
        )
        .await;
        assert!(matches!(result, Err(StartupError::Discovery(_))));
    }

    #[tokio::test]
    async fn test_watch_returns_after_cancel() {
        let temp_dir = TempDir::new().unwrap();
        let scripted = Arc::new(Scripted::new(&[]));
        let settings = Settings {
            watch: true,
            ..settings_for(temp_dir.path())
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = run_with(&settings, scripted_collaborators(&scripted), cancel)
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Watched);
    }
}
