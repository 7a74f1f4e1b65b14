use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command isolated from the user's key file,
/// with --no-color and a database inside `temp_dir`
fn planout_cmd(temp_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("planout").expect("Failed to find planout binary");
    cmd.env("XDG_CONFIG_HOME", temp_dir.join("config"))
        .env("XDG_DATA_HOME", temp_dir.join("data"))
        .env_remove("GEMINI_API_KEY")
        .arg("--no-color")
        .args([
            "--database-file",
            temp_dir.join("cli_test.db").to_str().unwrap(),
        ]);
    cmd
}

fn create_plan(temp_dir: &Path, title: &str, description: &str) {
    planout_cmd(temp_dir)
        .args(["plan", "create", title, "--description", description])
        .assert()
        .success();
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .args([
            "plan",
            "create",
            "Learn guitar",
            "--description",
            "Chords and scales",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("# 1. Learn guitar"))
        .stdout(predicate::str::contains("Chords and scales"))
        .stdout(predicate::str::contains("- Color: #3b82f6"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    // No subcommand lists plans too
    planout_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_list_plans_shows_progress() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "Scales\nChords");

    planout_cmd(temp_dir.path())
        .args(["plan", "breakdown", "1"])
        .assert()
        .success();

    planout_cmd(temp_dir.path())
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plans"))
        .stdout(predicate::str::contains("## Guitar (ID: 1) (0/2)"));
}

#[test]
fn test_cli_show_plan() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Show me", "Details here");

    planout_cmd(temp_dir.path())
        .args(["plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Show me"))
        .stdout(predicate::str::contains("- Deadline: none"))
        .stdout(predicate::str::contains("No chunks in this plan."));
}

#[test]
fn test_cli_show_missing_plan_fails() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .args(["plan", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 42 not found"));
}

#[test]
fn test_cli_breakdown_schedules_chunks() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "Step 1: Tune. Step 2: Strum. Step 3: Sing.");

    planout_cmd(temp_dir.path())
        .args(["plan", "breakdown", "1", "--per-day", "2", "--start", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan now has 3 scheduled chunks"))
        .stdout(predicate::str::contains("### 1. Step 1: Tune."))
        .stdout(predicate::str::contains("### 3. Step 3: Sing."))
        .stdout(predicate::str::contains("- Scheduled: 2024-01-02"));
}

#[test]
fn test_cli_breakdown_rejects_bad_start() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "Tune");

    planout_cmd(temp_dir.path())
        .args(["plan", "breakdown", "1", "--start", "someday"])
        .assert()
        .failure();
}

#[test]
fn test_cli_update_plan() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Old", "");

    planout_cmd(temp_dir.path())
        .args(["plan", "update", "1", "--title", "New", "--color", "#ff0000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated plan with ID: 1"))
        .stdout(predicate::str::contains("Title changed to 'New'"))
        .stdout(predicate::str::contains("- Color: #ff0000"));
}

#[test]
fn test_cli_add_and_update_chunk() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "");

    planout_cmd(temp_dir.path())
        .args([
            "chunk",
            "add",
            "1",
            "Practice scales",
            "--hours",
            "2",
            "--minutes",
            "45",
            "--frequency",
            "Weekly",
            "--deadline",
            "2024-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added chunk 'Practice scales'"))
        .stdout(predicate::str::contains("- Effort: 2h in 45 min sessions, Weekly"))
        .stdout(predicate::str::contains("- Deadline: 2024-06-01"));

    planout_cmd(temp_dir.path())
        .args([
            "chunk",
            "update",
            "1",
            "1",
            "--status",
            "done",
            "--history",
            r#"{"skipped": ["2024-05-01"]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated chunk with ID: 1"))
        .stdout(predicate::str::contains("✓ Done"));
}

#[test]
fn test_cli_update_chunk_rejects_unknown_status() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "");

    planout_cmd(temp_dir.path())
        .args(["chunk", "add", "1", "Scales"])
        .assert()
        .success();

    planout_cmd(temp_dir.path())
        .args(["chunk", "update", "1", "1", "--status", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_chunk_of_other_plan_not_found() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "One", "");
    create_plan(temp_dir.path(), "Two", "");

    planout_cmd(temp_dir.path())
        .args(["chunk", "add", "1", "Scales"])
        .assert()
        .success();

    planout_cmd(temp_dir.path())
        .args(["chunk", "delete", "2", "1"])
        .assert()
        .failure();

    planout_cmd(temp_dir.path())
        .args(["chunk", "delete", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted chunk 'Scales' (ID: 1)"));
}

#[test]
fn test_cli_delete_plan_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Doomed", "a\nb");

    planout_cmd(temp_dir.path())
        .args(["plan", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    planout_cmd(temp_dir.path())
        .args(["plan", "breakdown", "1"])
        .assert()
        .success();

    planout_cmd(temp_dir.path())
        .args(["plan", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted plan 'Doomed' (ID: 1) and its 2 chunks",
        ));

    planout_cmd(temp_dir.path())
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_backfill() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "");

    planout_cmd(temp_dir.path())
        .args(["chunk", "add", "1", "Scales"])
        .assert()
        .success();

    planout_cmd(temp_dir.path())
        .arg("backfill")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Filled 1 chunk deadlines and recalculated 1 plans",
        ));

    planout_cmd(temp_dir.path())
        .args(["plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Deadline: none").not());
}

#[test]
fn test_cli_suggest_without_key_is_empty() {
    let temp_dir = create_cli_test_environment();
    create_plan(temp_dir.path(), "Guitar", "");

    planout_cmd(temp_dir.path())
        .args(["plan", "suggest", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions available."));

    planout_cmd(temp_dir.path())
        .args(["chunk", "details", "Restring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Restring"))
        .stdout(predicate::str::contains("Could not generate details."));
}

#[test]
fn test_cli_config_status_and_set_api_key() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .args(["config", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Generation API key is not configured.",
        ));

    planout_cmd(temp_dir.path())
        .args(["config", "set-api-key", "secret-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Saved API key"));

    let env_file = temp_dir.path().join("config/planout/planout.env");
    let contents = std::fs::read_to_string(env_file).unwrap();
    assert_eq!(contents, "GEMINI_API_KEY=secret-key\n");

    planout_cmd(temp_dir.path())
        .args(["config", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Generation API key is configured.",
        ));
}

#[test]
fn test_cli_set_api_key_rejects_blank() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .args(["config", "set-api-key", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_cli_help_output() {
    let temp_dir = create_cli_test_environment();

    planout_cmd(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("chunk"))
        .stdout(predicate::str::contains("serve"));
}
