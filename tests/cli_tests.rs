use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::TempDir;

#[allow(deprecated)]
fn run_cli(dir: &TempDir, script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("ROSTER_DB", dir.path().join("roster.db"))
        .current_dir(dir.path())
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_adds_and_lists_employees() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, "add Ana\nadd Bruno Silva\nemployees\nquit\n")
        .success()
        .stdout(str_contains("Added employee 'Ana'"))
        .stdout(str_contains("Bruno Silva"));
}

#[test]
fn cli_rejects_blank_employee_name() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, "add\nquit\n")
        .success()
        .stdout(str_contains("Usage: add <name...>"));
}

#[test]
fn cli_reports_inverted_range_errors() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, "range 2024-01-10 2024-01-05\nquit\n")
        .success()
        .stdout(str_contains("must be on or before"));
}

#[test]
fn cli_state_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, "add Ana\nquit\n").success();
    run_cli(&dir, "employees\nquit\n")
        .success()
        .stdout(str_contains("Ana"));
}

#[test]
fn cli_export_writes_csv_file() {
    let dir = TempDir::new().unwrap();
    run_cli(
        &dir,
        "range 2024-01-01 2024-01-03\nadd Ana\nexport out.csv\nquit\n",
    )
    .success()
    .stdout(str_contains("Schedule exported to out.csv."));

    let text = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(text.starts_with("Employee,01/01,02/01,03/01"));
    assert!(text.contains("Ana"));
}

#[test]
fn cli_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let assert = run_cli(
        &dir,
        "add Ana\nsave roster.json\nadd Temp\nload roster.json\nemployees\nquit\n",
    )
    .success()
    .stdout(str_contains("Roster saved to roster.json."))
    .stdout(str_contains("Roster loaded from roster.json."));

    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let after_reload = output
        .split("Roster loaded from")
        .last()
        .unwrap_or_default()
        .to_string();
    assert!(
        after_reload.contains("Ana"),
        "saved employee should survive the reload:\n{after_reload}"
    );
    assert!(
        !after_reload.contains("Temp"),
        "employee added after the save should not appear after reload:\n{after_reload}"
    );
}

#[test]
fn cli_load_reports_invalid_documents() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"employees": [], "endDate": "2024-01-03"}"#,
    )
    .unwrap();

    run_cli(&dir, "load bad.json\nquit\n")
        .success()
        .stdout(str_contains("Invalid file:"))
        .stdout(str_contains("startDate"));
}
