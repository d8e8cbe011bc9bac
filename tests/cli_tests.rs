#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::io::Write;
use tempfile::Builder;

const SNAPSHOT: &str = r#"[
  {"id": "1", "projectId": "B", "projectName": "Beta", "plannedStart": "2026-01-02", "plannedEnd": "2026-01-08"},
  {"id": "2", "projectId": "A", "projectName": "Alpha", "plannedStart": "2026-01-05", "plannedEnd": "2026-01-06", "status": "completed"},
  {"id": "3", "projectId": "A", "plannedStart": "2026-01-09", "plannedEnd": "2026-01-02"}
]"#;

#[allow(deprecated)]
fn run_cli(args: &[&str], script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("timeline").expect("timeline binary");
    cmd.args(args).write_stdin(script.to_string()).assert()
}

fn snapshot_file() -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".json").tempfile().expect("create temp file");
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn cli_renders_month_grid_for_today() {
    run_cli(&["--today", "2026-01-15"], "quit\n")
        .success()
        .stdout(str_contains(
            "Calendar month view anchored at 2026-01-15 (2025-12-28..2026-02-07, 42 cells)",
        ));
}

#[test]
fn cli_gantt_view_lists_groups_in_first_seen_order() {
    let file = snapshot_file();
    let path = file.path().to_string_lossy().to_string();
    let assert = run_cli(&["--today", "2026-01-05", "--tasks", &path], "gantt\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert!(output.contains("Gantt 2025-12-30..=2026-01-15 zoom=day width=40 columns=17 today=6"));
    assert!(output.contains("  1 offset=3 duration=7 bar=120+280 Pending Medium"));
    let beta = output.find("[B] Beta").expect("beta group");
    let alpha = output.find("[A] Alpha").expect("alpha group");
    assert!(beta < alpha);
}

#[test]
fn cli_zoom_is_bounded() {
    run_cli(&["--today", "2026-01-05"], "zoom in\nzoom out\nzoom out\nzoom out\nquit\n")
        .success()
        .stdout(str_contains("Zoom level unchanged (day)."))
        .stdout(str_contains("Zoom level is now week."))
        .stdout(str_contains("Zoom level unchanged (month)."));
}

#[test]
fn cli_reports_diagnostics_for_rejected_tasks() {
    let file = snapshot_file();
    let script = format!("load json {}\ndiagnostics\nquit\n", file.path().display());
    run_cli(&["--today", "2026-01-05"], &script)
        .success()
        .stdout(str_contains("Loaded 3 tasks from"))
        .stdout(str_contains(
            "3: planned start 2026-01-09 is after planned end 2026-01-02",
        ));
}

#[test]
fn cli_month_navigation_and_json_output() {
    run_cli(&["--today", "2026-01-15"], "next\nselect 7\njson\nquit\n")
        .success()
        .stdout(str_contains("Calendar month view anchored at 2026-02-01"))
        .stdout(str_contains("Selected task 7."))
        .stdout(str_contains("\"selectedTaskId\": \"7\""));
}
