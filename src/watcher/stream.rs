//! Recursive change stream over the search root.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::error::WatchError;
use crate::discovery::{FileMatcher, discover};
use crate::pipeline::WatchAccounting;

/// Event kinds that trigger a typing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Change,
}

impl ChangeKind {
    /// Map a notify event kind. Removals and metadata-only changes are not
    /// handled; stale declaration files stay on disk.
    pub fn classify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(ChangeKind::Add),
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(ChangeKind::Change),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Add => "add",
            ChangeKind::Change => "change",
        }
    }
}

/// Watches the search root and runs [`WatchAccounting`] per matching event.
///
/// Events are neither debounced nor serialized per path: every add/change
/// spawns its own run.
pub struct StyleWatcher {
    /// Canonical search root.
    root: PathBuf,
    matcher: FileMatcher,
    /// Channel for receiving file events.
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    /// The underlying file watcher (kept alive by storing it).
    _watcher: notify::RecommendedWatcher,
}

impl StyleWatcher {
    /// Start watching `root` recursively.
    pub fn new(root: &Path, matcher: FileMatcher) -> Result<Self, WatchError> {
        let root = root
            .canonicalize()
            .map_err(|e| WatchError::PathWatchFailed {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;

        let (tx, rx) = mpsc::channel(100);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: root.clone(),
                reason: e.to_string(),
            })?;
        crate::debug_event!("watcher", "watching", "{}", root.display());

        Ok(Self {
            root,
            matcher,
            event_rx: rx,
            _watcher: watcher,
        })
    }

    /// Process events until `cancel` fires or the stream closes.
    ///
    /// Files already under the root are typed first, as adds. Runs already
    /// in flight are awaited before returning.
    pub async fn run(mut self, handler: WatchAccounting, cancel: CancellationToken) {
        let mut in_flight = JoinSet::new();
        crate::log_event!("watcher", "started", "{}", self.root.display());
        self.add_existing(&handler, &mut in_flight);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    crate::log_event!("watcher", "shutdown requested");
                    break;
                }

                received = self.event_rx.recv() => {
                    match received {
                        Some(Ok(event)) => self.dispatch(event, &handler, &mut in_flight),
                        Some(Err(e)) => tracing::error!("[watcher] file watch error: {e}"),
                        None => {
                            tracing::warn!("[watcher] event stream closed");
                            break;
                        }
                    }
                }

                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!("[watcher] typing task failed: {e}");
                    }
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                tracing::error!("[watcher] typing task failed: {e}");
            }
        }
    }

    /// Register every matching file present at startup.
    fn add_existing(&self, handler: &WatchAccounting, in_flight: &mut JoinSet<()>) {
        match discover(&self.root, &self.matcher) {
            Ok(files) => {
                for path in files {
                    Self::spawn(ChangeKind::Add, path, handler, in_flight);
                }
            }
            Err(e) => tracing::error!("[watcher] initial scan failed: {e}"),
        }
    }

    fn dispatch(&self, event: Event, handler: &WatchAccounting, in_flight: &mut JoinSet<()>) {
        let Some(kind) = ChangeKind::classify(&event.kind) else {
            crate::debug_event!("watcher", "ignored", "{:?} {:?}", event.kind, event.paths);
            return;
        };

        for path in event.paths {
            if !self.matcher.matches_under(&self.root, &path) || !path.is_file() {
                continue;
            }
            Self::spawn(kind, path, handler, in_flight);
        }
    }

    fn spawn(
        kind: ChangeKind,
        path: PathBuf,
        handler: &WatchAccounting,
        in_flight: &mut JoinSet<()>,
    ) {
        crate::debug_event!("watcher", kind.as_str(), "{}", path.display());
        let handler = handler.clone();
        in_flight.spawn(async move {
            handler.handle(&path).await;
        });
    }
}
