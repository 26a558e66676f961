use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn typed_scss(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_typed-scss"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run typed-scss")
}

#[test]
fn test_help_does_no_work() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.scss"), ".a { color: red; }").unwrap();

    let output = typed_scss(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--watch"));
    assert!(!temp_dir.path().join("a.scss.d.ts").exists());
}

#[test]
fn test_missing_search_dir_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = typed_scss(temp_dir.path(), &["does-not-exist"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does-not-exist"));
}

#[test]
fn test_zero_files_notice() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("_partial.scss"), "$x: 1;").unwrap();

    let output = typed_scss(temp_dir.path(), &["."]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("No files found.").count(), 1);
    assert!(!stdout.contains("Completed with"));
}

#[test]
fn test_partials_skipped_and_clean_run_prints_no_summary() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("_partial.scss"), "$brand: #333;\n").unwrap();
    fs::write(
        root.join("a.scss"),
        "@import \"partial\";\n.header { color: $brand; .title-text { margin: 0; } }\n",
    )
    .unwrap();

    let output = typed_scss(root, &["."]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Found 1 files."));
    assert!(!stdout.contains("Completed with"));

    assert!(!root.join("_partial.scss.d.ts").exists());
    let declaration = fs::read_to_string(root.join("a.scss.d.ts")).unwrap();
    assert!(declaration.contains("readonly \"header\": string;"));
    assert!(declaration.contains("readonly \"title-text\": string;"));
    assert!(declaration.ends_with("export = styles;\n"));
}

#[test]
fn test_render_error_is_counted_and_other_files_still_written() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("good.scss"), ".ok { color: red; }\n").unwrap();
    fs::write(root.join("broken.scss"), ".bad { color: $undefined; }\n").unwrap();

    let output = typed_scss(root, &["."]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.contains("Completed with 0 warnings and 1 errors."));
    assert!(stderr.contains("broken.scss"));
    assert!(root.join("good.scss.d.ts").exists());
    assert!(!root.join("broken.scss.d.ts").exists());
}

#[test]
fn test_camel_case_out_dir_and_drop_extension() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("styles/nested")).unwrap();
    fs::write(
        root.join("styles/nested/card.scss"),
        ".card-body { padding: 0; }\n",
    )
    .unwrap();

    let output = typed_scss(
        root,
        &["styles", "--camel-case", "--drop-extension", "--out-dir", "types"],
    );

    assert!(output.status.success());
    let declaration = fs::read_to_string(root.join("types/nested/card.d.ts")).unwrap();
    assert!(declaration.contains("readonly \"cardBody\": string;"));
}

#[test]
fn test_show_config_merges_file_and_flags() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".typed-scss.toml"),
        "pattern = \"**/*.module.scss\"\nbanner = \"// generated\"\n",
    )
    .unwrap();

    let output = typed_scss(temp_dir.path(), &["--show-config", "--camel-case"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("pattern = \"**/*.module.scss\""));
    assert!(stdout.contains("camel_case = true"));
    assert!(stdout.contains("banner = \"// generated\""));
}
