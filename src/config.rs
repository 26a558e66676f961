//! Configuration for the typings generator.
//!
//! Settings are layered, later sources winning:
//! - Default values
//! - TOML configuration file (`.typed-scss.toml`, discovered upward from the
//!   current directory, or given with `--config`)
//! - Environment variable overrides
//! - CLI flags (applied by the binary after loading)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `TYPED_SCSS_` and use double
//! underscores to separate nested levels:
//! - `TYPED_SCSS_CAMEL_CASE=true` sets `camel_case`
//! - `TYPED_SCSS_SASS__INCLUDE_PATHS=["vendor"]` sets `sass.include_paths`
//! - `TYPED_SCSS_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment, Source,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up from the current directory.
pub const CONFIG_FILE_NAME: &str = ".typed-scss.toml";

const ENV_PREFIX: &str = "TYPED_SCSS_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Directory searched for stylesheets
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,

    /// Glob selecting stylesheets, relative to `search_dir`
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Glob of paths to skip, relative to `search_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,

    /// Directory receiving declaration files (defaults to next to the source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Convert class names to camelCase
    #[serde(default)]
    pub camel_case: bool,

    /// Write `name.d.ts` instead of `name.scss.d.ts`
    #[serde(default)]
    pub drop_extension: bool,

    /// Keep running and regenerate on change
    #[serde(default)]
    pub watch: bool,

    /// Report every written file
    #[serde(default)]
    pub verbose: bool,

    /// Line written at the top of every declaration file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    /// Preprocessor options
    #[serde(default)]
    pub sass: SassConfig,

    /// Diagnostic logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SassConfig {
    /// Extra directories searched when resolving `@use` and `@import`
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for every target
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `typed_scss::watcher = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_search_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_pattern() -> String {
    "**/[^_]*.scss".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir(),
            pattern: default_pattern(),
            ignore: None,
            out_dir: None,
            camel_case: false,
            drop_extension: false,
            watch: false,
            verbose: false,
            banner: None,
            sass: SassConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from the discovered config file and environment.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(path),
            None => Self::figment(None).extract().map_err(Box::new),
        }
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides.
    ///
    /// Relative paths set in the file are resolved against the file's
    /// directory, so a config discovered from a subdirectory still points at
    /// its own tree.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        let figment = Self::figment(Some(path.as_ref()));
        let mut settings: Self = figment.extract().map_err(Box::new)?;

        let base = |key: &str| match figment.find_metadata(key).and_then(|m| m.source.as_ref()) {
            Some(Source::File(file)) => file.parent().map(Path::to_path_buf),
            _ => None,
        };
        if let Some(dir) = base("search_dir") {
            settings.search_dir = dir.join(&settings.search_dir);
        }
        if let (Some(dir), Some(out_dir)) = (base("out_dir"), settings.out_dir.as_mut()) {
            *out_dir = dir.join(&*out_dir);
        }
        if let Some(dir) = base("sass.include_paths") {
            for include in &mut settings.sass.include_paths {
                *include = dir.join(&*include);
            }
        }
        Ok(settings)
    }

    fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| {
            // Double underscore becomes a dot, single underscores stay
            key.as_str().to_lowercase().replace("__", ".").into()
        }))
    }

    /// Find `.typed-scss.toml` from the current directory up to the root.
    pub fn find_config_file() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_config_file_from(&current)
    }

    fn find_config_file_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Render the settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
