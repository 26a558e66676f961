//! Generate TypeScript declaration stubs for SCSS modules.
//!
//! Each stylesheet is rendered, its exported class names are extracted and
//! a companion `.d.ts` file is written. Runs once over a discovered file
//! list or keeps watching the search directory.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod display;
pub mod error;
pub mod logging;
pub mod mode;
pub mod pipeline;
pub mod render;
pub mod typing;
pub mod watcher;

pub use config::Settings;
pub use error::{DiscoveryError, RenderError, StartupError, TypingError};
pub use mode::{RunOutcome, run};
pub use pipeline::{Pipeline, Summary};
