//! Filesystem change stream for watch mode.
//!
//! # Architecture
//!
//! ```text
//! StyleWatcher
//!   - notify::RecommendedWatcher (recursive on the search root)
//!   - FileMatcher filter (same pattern as discovery)
//!   - one WatchAccounting run per add/change event
//! ```

mod error;
mod stream;

pub use error::WatchError;
pub use stream::{ChangeKind, StyleWatcher};
