//! CLI argument parsing using clap.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::config::Settings;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Generate TypeScript declarations for SCSS modules
#[derive(Parser, Debug)]
#[command(
    name = "typed-scss",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate TypeScript declarations for SCSS modules",
    long_about = "Render every matching stylesheet, extract its class names and write a \
                  companion .d.ts file. With --watch, keep regenerating on change.",
    styles = clap_cargo_style(),
    after_help = "Examples:\n  typed-scss src\n  typed-scss src --camel-case --out-dir types\n  typed-scss . --pattern \"**/*.module.scss\" --watch"
)]
pub struct Cli {
    /// Directory to search for stylesheets
    #[arg(value_name = "DIR")]
    pub search_dir: Option<PathBuf>,

    /// Glob selecting stylesheets, relative to DIR [default: **/[^_]*.scss]
    #[arg(short, long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Glob of files to skip, relative to DIR
    #[arg(short, long, value_name = "GLOB")]
    pub ignore: Option<String>,

    /// Write declarations under this directory instead of next to the source
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Convert class names to camelCase
    #[arg(short, long)]
    pub camel_case: bool,

    /// Write name.d.ts instead of name.scss.d.ts
    #[arg(short, long)]
    pub drop_extension: bool,

    /// Keep running and regenerate on change
    #[arg(short, long)]
    pub watch: bool,

    /// Print every written file
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra directory for resolving imports (repeatable)
    #[arg(short = 'I', long = "include-path", value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Line written at the top of every declaration file
    #[arg(long, value_name = "TEXT")]
    pub banner: Option<String>,

    /// Path to a settings file (default: nearest .typed-scss.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the merged settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply flags on top of loaded settings. Flags only ever enable or
    /// replace; an absent flag keeps the configured value.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.search_dir {
            settings.search_dir = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            settings.pattern = pattern.clone();
        }
        if let Some(ignore) = &self.ignore {
            settings.ignore = Some(ignore.clone());
        }
        if let Some(out_dir) = &self.out_dir {
            settings.out_dir = Some(out_dir.clone());
        }
        if let Some(banner) = &self.banner {
            settings.banner = Some(banner.clone());
        }
        settings.camel_case |= self.camel_case;
        settings.drop_extension |= self.drop_extension;
        settings.watch |= self.watch;
        settings.verbose |= self.verbose;
        settings
            .sass
            .include_paths
            .extend(self.include_paths.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "typed-scss",
            "styles",
            "-c",
            "--drop-extension",
            "-o",
            "types",
            "-I",
            "vendor",
            "-I",
            "shared",
        ]);
        let mut settings = Settings {
            pattern: "**/*.module.scss".to_string(),
            ..Settings::default()
        };
        cli.apply(&mut settings);

        assert_eq!(settings.search_dir, PathBuf::from("styles"));
        assert!(settings.camel_case);
        assert!(settings.drop_extension);
        assert!(!settings.watch);
        assert_eq!(settings.out_dir, Some(PathBuf::from("types")));
        assert_eq!(settings.pattern, "**/*.module.scss");
        assert_eq!(
            settings.sass.include_paths,
            vec![PathBuf::from("vendor"), PathBuf::from("shared")]
        );
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let cli = Cli::parse_from(["typed-scss"]);
        let mut settings = Settings {
            watch: true,
            verbose: true,
            ..Settings::default()
        };
        cli.apply(&mut settings);

        assert!(settings.watch);
        assert!(settings.verbose);
        assert_eq!(settings.search_dir, PathBuf::from("."));
    }
}
