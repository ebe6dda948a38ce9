// Command-line behaviour: output formats, exit codes, --fix and --stats-out

mod integration;

use git2::{Repository, RepositoryInitOptions, Signature};
use serde_json::Value;
use std::process::Command;

use integration::fixtures::*;
use integration::TestFixture;

#[test]
fn test_lint_reports_and_exits_nonzero() {
    let fixture = TestFixture::new();
    fixture.create_file("README.md", MD_SOURCE);

    let output = fixture.run_cli(&["lint-md"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("README.md:3:1: Use inclusive term 'Add hosts to our allowlist.' instead of 'Add hosts to our whitelist.'"));
    assert!(stdout.contains("1 diagnostics in 1 of 1 files, 0 fixed, 0 failed"));
    assert_eq!(fixture.read_file("README.md"), MD_SOURCE);
}

#[test]
fn test_fix_rewrites_and_exits_zero() {
    let fixture = TestFixture::new();
    fixture.create_file("site/index.html", HTML_SOURCE);

    let output = fixture.run_cli(&["lint-html", "--fix"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("(fixed)"));
    assert_eq!(fixture.read_file("site/index.html"), HTML_FIXED);
}

#[test]
fn test_fixed_marker_is_per_diagnostic() {
    let fixture = TestFixture::new();
    fixture.create_file("page.html", "<p>whitelist &amp; more</p>\n<p>master</p>\n");

    let output = fixture.run_cli(&["lint-html", "--fix"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    // the entity-encoded text has no fix, so the run still has findings
    assert_eq!(output.status.code(), Some(1), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let entity_line = stdout.lines().find(|l| l.contains("'whitelist & more'")).unwrap();
    let master_line = stdout.lines().find(|l| l.contains("'master'")).unwrap();
    assert!(!entity_line.ends_with("(fixed)"), "{entity_line}");
    assert!(master_line.ends_with("(fixed)"), "{master_line}");
    assert!(stdout.contains("2 diagnostics in 1 of 1 files, 1 fixed, 0 failed"));
}

#[test]
fn test_hidden_flag_walks_hidden_directories() {
    let fixture = TestFixture::new();
    fixture.create_file(".docs/notes.md", MD_SOURCE);

    let output = fixture.run_cli(&["lint-md"]);
    assert!(output.status.success());

    let output = fixture.run_cli(&["lint-md", "--hidden"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("notes.md:3:1"));
}

#[test]
fn test_clean_tree_exits_zero() {
    let fixture = TestFixture::new();
    fixture.create_file("notes.md", CLEAN_MD);
    fixture.create_file("app.js", JS_SOURCE);

    let output = fixture.run_cli(&["lint-md"]);
    assert!(output.status.success());
}

#[test]
fn test_json_output() {
    let fixture = TestFixture::new();
    fixture.create_file("db.js", JS_SOURCE);

    let output = fixture.run_cli(&["lint-js", "--format", "json"]);
    let files: Value = serde_json::from_slice(&output.stdout).expect("stdout must be JSON");

    let files = files.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["error"].is_null());
    let diagnostics = files[0]["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["kind"], "prose");
    assert_eq!(diagnostics[1]["rewritten"], "secondary-01");
    assert_eq!(diagnostics[1]["location"]["line"], 2);
    assert_eq!(diagnostics[1]["fix"]["replacement"], "secondary-01");
}

#[test]
fn test_stats_output_json_structure() {
    let fixture = TestFixture::new();
    fixture.create_file("a.css", CSS_SOURCE);
    fixture.create_file("b.less", "/* unterminated");
    let stats_dir = tempfile::TempDir::new().unwrap();
    let stats_file = stats_dir.path().join("stats.json");

    let output = fixture.run_cli(&["lint-css", "--stats-out", stats_file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stats: Value = serde_json::from_str(&std::fs::read_to_string(&stats_file).unwrap()).unwrap();
    let obj = stats.as_object().unwrap();
    for key in [
        "adapter",
        "run_start",
        "total_processing_time_ms",
        "total_diagnostics",
        "files_processed",
        "files_failed",
        "file_stats",
    ] {
        assert!(obj.contains_key(key), "Missing {key} field");
    }
    assert_eq!(obj["adapter"], "css");
    assert_eq!(obj["files_processed"], 1);
    assert_eq!(obj["files_failed"], 1);
    assert_eq!(obj["total_diagnostics"], 1);

    let file_stats = obj["file_stats"].as_array().unwrap();
    assert_eq!(file_stats.len(), 2);
    assert_eq!(file_stats[0]["status"], "flagged");
    assert!(file_stats[0]["error"].is_null());
    assert_eq!(file_stats[1]["status"], "failed");
}

#[test]
fn test_fail_fast_stops_on_parse_error() {
    let fixture = TestFixture::new();
    fixture.create_file("broken.js", "/* never closed");

    let output = fixture.run_cli(&["lint-js", "--fail-fast"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unterminated block comment"));
}

#[test]
fn test_missing_root_is_an_error() {
    let fixture = TestFixture::new();
    let output = Command::new(env!("CARGO_BIN_EXE_inclusify"))
        .args(["lint-md", "--no-progress"])
        .arg(fixture.root_path.join("does-not-exist"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Root directory does not exist"));
}

#[test]
fn test_fix_git_branches() {
    let fixture = TestFixture::new();
    let mut options = RepositoryInitOptions::new();
    options.initial_head("master");
    let repo = Repository::init_opts(&fixture.root_path, &options).unwrap();
    let signature = Signature::now("Test", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let commit_id = repo
        .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
        .unwrap();
    let commit = repo.find_commit(commit_id).unwrap();
    repo.branch("develop", &commit, false).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_inclusify"))
        .arg("fix-git-branches")
        .arg(&fixture.root_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Renamed branch 'master' to 'main'"));
    assert!(repo.find_branch("main", git2::BranchType::Local).is_ok());
    assert!(repo.find_branch("master", git2::BranchType::Local).is_err());
}
