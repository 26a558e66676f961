//! One-shot accounting over a fixed file list.

use futures::future::join_all;
use std::path::PathBuf;

use super::{Pipeline, Summary, Tally};
use crate::display;

/// Type every path concurrently and print one closing summary.
///
/// All invocations are polled on the current task, so they interleave
/// without any ordering between files. The summary line is printed only
/// when warnings or errors were reported.
pub async fn run_batch(pipeline: &Pipeline, paths: &[PathBuf]) -> Summary {
    let tally = Tally::new();

    let outcomes = join_all(paths.iter().map(|path| pipeline.run(path, &tally))).await;
    let artifacts = outcomes.into_iter().flatten().collect();

    let summary = tally.finish(artifacts);
    crate::log_event!(
        "batch",
        "complete",
        "{} written, {} warnings, {} errors",
        summary.artifacts.len(),
        summary.warnings,
        summary.errors
    );
    if let Some(line) = summary.batch_line() {
        display::summary(&line);
    }
    summary
}
