use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;

use common::{create_fixture, write_sized};

fn scantree() -> Command {
    let mut cmd = Command::cargo_bin("scantree").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("SCANTREE_CONFIG", "/dev/null")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_flag() {
    scantree()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory tree visualizer"))
        .stdout(predicate::str::contains("--level"))
        .stdout(predicate::str::contains("--ignore"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--export"))
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--no-metrics"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    scantree()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scantree"));
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    scantree()
        .arg("/this/path/does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file"));
}

#[test]
fn test_file_path_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("afile.txt");
    std::fs::write(&file, "hello").unwrap();

    scantree()
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_prints_tree_and_metrics() {
    let tmp = TempDir::new().unwrap();
    write_sized(tmp.path(), "a.txt", 10);
    write_sized(tmp.path(), "b/c.txt", 20);

    scantree()
        .args(["--no-progress", "--ascii"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt (10 B)"))
        .stdout(predicate::str::contains("c.txt (20 B)"))
        .stdout(predicate::str::contains("Scan Metrics"))
        .stdout(predicate::str::contains("Files:       2"))
        .stdout(predicate::str::contains("Directories: 1"))
        .stdout(predicate::str::contains("Total Size:  30 B"));
}

#[test]
fn test_no_metrics_flag_hides_report() {
    let tmp = create_fixture(&["one.txt"]);
    scantree()
        .args(["--no-progress", "--no-metrics"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("one.txt"))
        .stdout(predicate::str::contains("Scan Metrics").not());
}

#[test]
fn test_hidden_files_need_all_flag() {
    let tmp = create_fixture(&[".secret", "visible.txt"]);
    scantree()
        .args(["--no-progress", "--no-metrics"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".secret").not());

    scantree()
        .args(["--no-progress", "--no-metrics", "-a"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".secret"));
}

#[test]
fn test_ignore_flag_prunes_subtree() {
    let tmp = create_fixture(&["target/debug/binary_artifact", "src/main.rs"]);
    scantree()
        .args(["--no-progress", "--no-metrics", "-I", "target"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("main.rs"))
        .stdout(predicate::str::contains("debug").not())
        .stdout(predicate::str::contains("binary_artifact").not());
}

#[test]
fn test_export_txt_json_svg() {
    let tmp = create_fixture(&["a.txt", "b/c.txt"]);
    let out = TempDir::new().unwrap();

    let txt = out.path().join("tree.txt");
    scantree()
        .args(["--no-progress", "--no-metrics", "--ascii", "-e"])
        .arg(&txt)
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 entries"));
    let text = std::fs::read_to_string(&txt).unwrap();
    assert!(text.contains("`-- a.txt"), "got {text}");
    assert!(text.contains("|-- b/"), "got {text}");

    let json = out.path().join("tree.json");
    scantree()
        .args(["--no-progress", "--no-metrics", "-e"])
        .arg(&json)
        .arg(tmp.path())
        .assert()
        .success();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(doc["entries"].as_array().unwrap().len(), 4);
    assert_eq!(doc["entries"][3]["path"], "b/c.txt");

    let svg = out.path().join("tree.svg");
    scantree()
        .args(["--no-progress", "--no-metrics", "-e"])
        .arg(&svg)
        .arg(tmp.path())
        .assert()
        .success();
    let drawing = std::fs::read_to_string(&svg).unwrap();
    assert!(drawing.starts_with("<?xml"));
    assert!(drawing.contains("c.txt"));
    assert!(drawing.trim_end().ends_with("</svg>"));
}

#[test]
fn test_png_export_fails_without_writing() {
    let tmp = create_fixture(&["a.txt"]);
    let out = TempDir::new().unwrap();
    let png = out.path().join("tree.png");

    scantree()
        .args(["--no-progress", "-e"])
        .arg(&png)
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported export format: png"))
        .stdout(predicate::str::contains("Exported").not());
    assert!(!png.exists());
}

#[test]
fn test_piped_stdout_has_no_color_codes() {
    let tmp = create_fixture(&["sub/inner.txt", "top.txt"]);
    scantree()
        .env_remove("NO_COLOR")
        .arg("--no-progress")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("inner.txt"))
        .stdout(predicate::str::contains("\u{1b}").not());
}

#[test]
fn test_config_file_is_applied() {
    let tmp = create_fixture(&["keep.rs", "drop.log"]);
    let cfg_dir = TempDir::new().unwrap();
    let cfg = cfg_dir.path().join("config.yaml");
    std::fs::write(&cfg, "ignore_patterns:\n  - '*.log'\n").unwrap();

    scantree()
        .args(["--no-progress", "--no-metrics", "--config"])
        .arg(&cfg)
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.rs"))
        .stdout(predicate::str::contains("drop.log").not());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    scantree()
        .args(["--config", "/no/such/config.yaml"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn test_level_flag_parses_negative() {
    use clap::Parser;
    use scantree::cli::Args;
    let args = Args::parse_from(["scantree", "-L", "-1", "."]);
    assert_eq!(args.max_depth, Some(-1));
}

#[test]
fn test_quiet_resets_verbose() {
    use clap::Parser;
    use scantree::cli::Args;
    let args = Args::parse_from(["scantree", "-vv", "-q", "."]).validated();
    assert_eq!(args.verbose, 0);
    assert!(args.quiet);
}
