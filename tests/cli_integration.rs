//! Integration tests for the `kario` CLI.
//!
//! Each test works in a temp directory, runs `kario` as a subprocess
//! against a task file there, and verifies stdout and/or file contents.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `kario` binary.
fn kario_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("kario");
    path
}

fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(kario_bin())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run kario");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}

/// Run `add` and return the new task's id from the JSON output.
fn add_task(dir: &Path, title: &str) -> String {
    let (stdout, _, ok) = run(dir, &["add", title, "--json"]);
    assert!(ok);
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    task["id"].as_str().unwrap().to_string()
}

#[test]
fn init_creates_empty_collection() {
    let tmp = TempDir::new().unwrap();
    let (stdout, _, ok) = run(tmp.path(), &["init"]);
    assert!(ok);
    assert!(stdout.contains("created"));

    let content = std::fs::read_to_string(tmp.path().join("kario-tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value, serde_json::json!([]));

    // Second init is a no-op.
    let (stdout, _, ok) = run(tmp.path(), &["init"]);
    assert!(ok);
    assert!(stdout.contains("already initialized"));
}

#[test]
fn add_and_list_tasks() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    add_task(tmp.path(), "Groceries");
    add_task(tmp.path(), "Taxes");

    let (stdout, _, ok) = run(tmp.path(), &["list"]);
    assert!(ok);
    assert!(stdout.contains("Groceries"));
    assert!(stdout.contains("Taxes"));
}

#[test]
fn subtask_lifecycle_through_cli() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    let task_id = add_task(tmp.path(), "Plan trip");

    // Add a subtask and pull its id out of the updated task JSON.
    let (stdout, _, ok) = run(
        tmp.path(),
        &[
            "sub", "add", &task_id, "Book flights", "--priority", "1", "--labels",
            "travel, urgent", "--json",
        ],
    );
    assert!(ok);
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let subtasks = task["subtasks"].as_array().unwrap();
    assert_eq!(subtasks.len(), 1);
    assert_eq!(subtasks[0]["title"], "Book flights");
    assert_eq!(subtasks[0]["priority"], "Priority 1");
    assert_eq!(subtasks[0]["completed"], false);
    assert_eq!(subtasks[0]["labels"], serde_json::json!(["travel", "urgent"]));
    let sub_id = subtasks[0]["id"].as_str().unwrap().to_string();

    // Toggle it and check the collection on disk.
    let (_, _, ok) = run(tmp.path(), &["sub", "toggle", &task_id, &sub_id]);
    assert!(ok);
    let content = std::fs::read_to_string(tmp.path().join("kario-tasks.json")).unwrap();
    let collection: serde_json::Value = serde_json::from_str(&content).unwrap();
    let persisted = collection
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == task_id.as_str())
        .unwrap();
    assert_eq!(persisted["subtasks"][0]["completed"], true);

    // Update a field.
    let (_, _, ok) = run(
        tmp.path(),
        &["sub", "set", &task_id, &sub_id, "--desc", "aisle seat"],
    );
    assert!(ok);
    let (stdout, _, _) = run(tmp.path(), &["show", &task_id, "--json"]);
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(task["subtasks"][0]["description"], "aisle seat");

    // Delete it.
    let (_, _, ok) = run(tmp.path(), &["sub", "rm", &task_id, &sub_id]);
    assert!(ok);
    let (stdout, _, _) = run(tmp.path(), &["show", &task_id, "--json"]);
    let task: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(task.get("subtasks").is_none() || task["subtasks"].as_array().unwrap().is_empty());
}

#[test]
fn add_without_init_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, ok) = run(tmp.path(), &["add", "Too early"]);
    assert!(!ok);
    assert!(stderr.contains("no task collection yet"));
    assert!(!tmp.path().join("kario-tasks.json").exists());
}

#[test]
fn missing_subtask_target_is_not_an_error() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    let task_id = add_task(tmp.path(), "Plan trip");

    let (stdout, _, ok) = run(tmp.path(), &["sub", "toggle", &task_id, "999"]);
    assert!(ok);
    assert!(stdout.contains("no matching subtask"));
}

#[test]
fn unknown_task_is_an_error() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    let (_, stderr, ok) = run(tmp.path(), &["show", "does-not-exist"]);
    assert!(!ok);
    assert!(stderr.contains("task not found"));
}

#[test]
fn presets_lists_vocabulary_in_fixed_order() {
    let tmp = TempDir::new().unwrap();
    let (stdout, _, ok) = run(tmp.path(), &["presets"]);
    assert!(ok);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["Today", "Tomorrow", "1 day", "2 days", "3 days", "1 week", "2 weeks", "1 month"]
    );

    let (stdout, _, _) = run(tmp.path(), &["presets", "week"]);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["1 week", "2 weeks"]);

    let (stdout, _, _) = run(tmp.path(), &["presets", "week", "--json"]);
    assert_eq!(stdout.trim(), r#"["1 week","2 weeks"]"#);
}

#[test]
fn list_due_filter_uses_preset_window() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let today = chrono::Local::now().date_naive();
    let soon = (today + chrono::Days::new(2)).format("%Y-%m-%d").to_string();
    let far = (today + chrono::Days::new(40)).format("%Y-%m-%d").to_string();

    run(tmp.path(), &["add", "Soon task", "--date", &soon]);
    run(tmp.path(), &["add", "Far task", "--date", &far]);
    run(tmp.path(), &["add", "Dateless task"]);

    let (stdout, _, ok) = run(tmp.path(), &["list", "--due", "1 week"]);
    assert!(ok);
    assert!(stdout.contains("Soon task"));
    assert!(!stdout.contains("Far task"));
    assert!(!stdout.contains("Dateless task"));

    let (_, stderr, ok) = run(tmp.path(), &["list", "--due", "someday"]);
    assert!(!ok);
    assert!(stderr.contains("unknown date preset"));
}

#[test]
fn config_file_sets_store_path() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("kario.toml"),
        "[store]\nfile = \"elsewhere.json\"\n",
    )
    .unwrap();

    run(tmp.path(), &["init"]);
    assert!(tmp.path().join("elsewhere.json").exists());
    assert!(!tmp.path().join("kario-tasks.json").exists());
}
