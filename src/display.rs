//! User-facing console lines.
//!
//! Titles are styled with `console`, which drops colors automatically when
//! the stream is not a terminal.

use console::style;
use std::path::Path;

/// Two-line error message: a title naming the source, then the detail.
pub fn error_message(path: &Path, detail: &str) -> String {
    format!("{}  {}\n{detail}", style("error").red().bold(), path.display())
}

/// Two-line warning message: a title naming the source, then the warning text.
pub fn warning_message(path: &Path, detail: &str) -> String {
    format!(
        "{}  {}\n{detail}",
        style("warning").yellow().bold(),
        path.display()
    )
}

pub fn no_files() {
    println!("No files found.");
}

pub fn found_files(count: usize) {
    println!("Found {count} files. Generating type definitions...");
}

pub fn watching() {
    println!("Watching files...");
}

pub fn wrote(output: &Path) {
    println!("{} {}", style("[typed-scss] wrote").dim(), output.display());
}

pub fn summary(line: &str) {
    println!("{line}");
}

pub fn report(message: &str) {
    eprintln!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_two_lines_and_name_the_source() {
        let path = Path::new("styles/app.scss");
        let error = error_message(path, "render error: expected \";\"");
        let warning = warning_message(path, "duplicate class");

        for message in [&error, &warning] {
            let lines: Vec<_> = message.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].contains("styles/app.scss"));
        }
        assert!(error.ends_with("render error: expected \";\""));
        assert!(warning.ends_with("duplicate class"));
    }
}
