//! CLI tests for the `framegen` binary.
//!
//! Spawns the binary in a scratch project and verifies exit codes, stderr
//! reporting, and the files left on disk.

use std::process::{Command, Output};

use framegen::exit_codes;
use framegen::test_support::TestProject;

fn run_framegen(project: &TestProject, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_framegen"))
        .current_dir(project.root())
        .args(args)
        .output()
        .expect("run framegen")
}

#[test]
fn zero_args_writes_all_documents() {
    let project = TestProject::with_sample_config().expect("project");

    let out = run_framegen(&project, &[]);

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    for name in ["PRD.md", "CLAUDE.md", "PLANNING.md", "TASKS.md"] {
        assert!(project.exists(name), "{name} missing");
    }
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("created   PRD.md"), "stdout: {stdout}");
}

#[test]
fn disallowed_path_exits_with_path_code_and_writes_nothing() {
    let project = TestProject::new().expect("project");
    project
        .write_config(
            "[guardrails]\nallowlist = ops, PRD.md\n\n\
             [outputs]\nclaude = ops/CLAUDE.md\nplanning = ops/PLANNING.md\n\
             tasks = apps/web/evil.txt\n",
        )
        .expect("config");

    let out = run_framegen(&project, &[]);

    assert_eq!(out.status.code(), Some(exit_codes::PATH_NOT_ALLOWED));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("PathNotAllowed"), "stderr: {stderr}");
    assert!(stderr.contains("apps/web/evil.txt"), "stderr: {stderr}");
    assert!(!project.exists("PRD.md"));
    assert!(!project.exists("apps"));
}

#[test]
fn unknown_template_variable_exits_invalid() {
    let project = TestProject::new().expect("project");
    project
        .write_config("[generator]\ntemplates_dir = ops/templates\n")
        .expect("config");
    project
        .write_file("ops/templates/TASKS.md", "# Tasks for {{ team_name }}\n")
        .expect("template");

    let out = run_framegen(&project, &[]);

    assert_eq!(out.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("MissingVariable"), "stderr: {stderr}");
    assert!(stderr.contains("team_name"), "stderr: {stderr}");
    assert!(!project.exists("PRD.md"));
}

#[test]
fn write_failure_exits_with_write_code() {
    let project = TestProject::new().expect("project");
    project
        .write_config("[outputs]\nplanning = ops/PLANNING.md\n")
        .expect("config");
    // A plain file where the `ops` directory needs to be.
    project.write_file("ops", "blocker").expect("blocker");

    let out = run_framegen(&project, &[]);

    assert_eq!(out.status.code(), Some(exit_codes::WRITE_FAILED));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("WriteFailed"), "stderr: {stderr}");
    // Documents before the failing one stay written.
    assert!(project.exists("PRD.md"));
    assert!(project.exists("CLAUDE.md"));
    assert!(!project.exists("TASKS.md"));
}

#[test]
fn json_report_lists_every_document() {
    let project = TestProject::with_sample_config().expect("project");

    let out = run_framegen(&project, &["--dry-run", "--json"]);

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["dry_run"], serde_json::Value::Bool(true));
    let results = report["results"].as_array().expect("results array");
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["document"], "prd");
    assert_eq!(results[0]["status"], "skipped");
    assert!(!project.exists("PRD.md"));
}

#[test]
fn root_and_config_flags_are_honored() {
    let project = TestProject::new().expect("project");
    project
        .write_file("ops/custom.ini", "[db]\nengine = sqlite\n")
        .expect("config");

    let out = Command::new(env!("CARGO_BIN_EXE_framegen"))
        .arg("--root")
        .arg(project.root())
        .args(["--config", "ops/custom.ini"])
        .output()
        .expect("run framegen");

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let planning = project.read("PLANNING.md").expect("planning");
    assert!(planning.contains("- Engine: sqlite"));
}
