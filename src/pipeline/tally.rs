//! Warning/error accounting for one batch run or one watch event.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::display;
use crate::typing::GeneratedArtifact;

/// Receives the side-channel reports of a pipeline invocation.
pub trait OutcomeSink: Send + Sync {
    fn on_error(&self, message: String);
    fn on_warning(&self, message: String);
}

/// Counters for one accounting cycle.
///
/// A fresh `Tally` is created per cycle and shared by reference with every
/// pipeline invocation of that cycle.
#[derive(Debug, Default)]
pub struct Tally {
    warnings: AtomicUsize,
    errors: AtomicUsize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Close the cycle. Call only after every invocation has settled.
    pub fn finish(self, artifacts: Vec<GeneratedArtifact>) -> Summary {
        Summary {
            warnings: self.warnings.into_inner(),
            errors: self.errors.into_inner(),
            artifacts,
        }
    }
}

impl OutcomeSink for Tally {
    fn on_error(&self, message: String) {
        display::report(&message);
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn on_warning(&self, message: String) {
        display::report(&message);
        self.warnings.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of one accounting cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub warnings: usize,
    pub errors: usize,
    /// Written artifacts, in completion order.
    pub artifacts: Vec<GeneratedArtifact>,
}

impl Summary {
    pub fn is_clean(&self) -> bool {
        self.warnings + self.errors == 0
    }

    /// Closing line of a batch run, or `None` when nothing was reported.
    pub fn batch_line(&self) -> Option<String> {
        (!self.is_clean()).then(|| {
            format!(
                "Completed with {} warnings and {} errors.",
                self.warnings, self.errors
            )
        })
    }

    /// Closing line of a watch event, or `None` when nothing was reported.
    pub fn watch_line(&self, path: &Path) -> Option<String> {
        (!self.is_clean()).then(|| {
            format!(
                "{}: {} warnings, {} errors",
                path.display(),
                self.warnings,
                self.errors
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_each_report() {
        let tally = Tally::new();
        tally.on_warning("w1".to_string());
        tally.on_warning("w2".to_string());
        tally.on_error("e1".to_string());
        assert_eq!((tally.warnings(), tally.errors()), (2, 1));

        let summary = tally.finish(Vec::new());
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_summary_lines() {
        let clean = Summary::default();
        assert_eq!(clean.batch_line(), None);
        assert_eq!(clean.watch_line(Path::new("a.scss")), None);

        let dirty = Summary {
            warnings: 3,
            errors: 1,
            artifacts: Vec::new(),
        };
        assert_eq!(
            dirty.batch_line().unwrap(),
            "Completed with 3 warnings and 1 errors."
        );
        assert_eq!(
            dirty.watch_line(Path::new("a.scss")).unwrap(),
            "a.scss: 3 warnings, 1 errors"
        );
    }
}
