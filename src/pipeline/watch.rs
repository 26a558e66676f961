//! Per-event accounting for watch mode.

use std::path::Path;
use std::sync::Arc;

use super::{Pipeline, Summary, Tally};
use crate::display;

/// Handles one change event at a time.
///
/// Every call to [`handle`](Self::handle) is its own accounting cycle with
/// fresh counters, so reports never accumulate across events.
#[derive(Clone)]
pub struct WatchAccounting {
    pipeline: Arc<Pipeline>,
}

impl WatchAccounting {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn handle(&self, path: &Path) -> Summary {
        let tally = Tally::new();
        let artifact = self.pipeline.run(path, &tally).await;

        let summary = tally.finish(artifact.into_iter().collect());
        if let Some(line) = summary.watch_line(path) {
            display::summary(&line);
        }
        summary
    }
}
