//! Diagnostic logging on stderr.
//!
//! Levels come from the `[logging]` table of the settings; `RUST_LOG`, when
//! set, replaces them entirely. `--verbose` lifts this crate to `info` unless
//! the table already names it. User-facing lines are printed by
//! [`crate::display`], never through here.

use std::sync::Once;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LoggingConfig, Settings};

const CRATE_TARGET: &str = "typed_scss";

static INIT: Once = Once::new();

/// `HH:MM:SS.mmm` in local time.
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// `default[,target=level...]`, with this crate raised to `info` when verbose.
fn filter_directives(config: &LoggingConfig, verbose: bool) -> String {
    let mut directives = vec![config.default.clone()];
    directives.extend(
        config
            .modules
            .iter()
            .map(|(target, level)| format!("{target}={level}")),
    );
    if verbose && !config.modules.contains_key(CRATE_TARGET) {
        directives.push(format!("{CRATE_TARGET}=info"));
    }
    directives.join(",")
}

/// Install the subscriber. Later calls are no-ops.
pub fn init(settings: &Settings) {
    INIT.call_once(|| {
        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(filter_directives(&settings.logging, settings.verbose)),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(CompactTime)
            .with_target(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(layer).init();
    });
}

#[doc(hidden)]
#[macro_export]
macro_rules! __component_event {
    ($level:ident, $component:expr, $event:expr) => {
        tracing::$level!("[{}] {}", $component, $event)
    };
    ($level:ident, $component:expr, $event:expr, $($arg:tt)*) => {
        tracing::$level!("[{}] {}: {}", $component, $event, format!($($arg)*))
    };
}

/// `info` event tagged with a component, e.g.
/// `log_event!("batch", "complete", "{n} written")`.
#[macro_export]
macro_rules! log_event {
    ($($args:tt)*) => { $crate::__component_event!(info, $($args)*) };
}

/// `debug` counterpart of [`log_event!`].
#[macro_export]
macro_rules! debug_event {
    ($($args:tt)*) => { $crate::__component_event!(debug, $($args)*) };
}
