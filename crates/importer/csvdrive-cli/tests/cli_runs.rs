use std::process::Command;

use csvdrive_test_fixtures as fixtures;

fn csvdrive() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csvdrive"))
}

#[test]
fn lamp_run_prints_success_and_keyframes() {
    let root = fixtures::root();
    let output = csvdrive()
        .arg("--scene")
        .arg(fixtures::scenes::path("lamp").unwrap())
        .arg("--config")
        .arg(root.join("runs/lamp_pulse.json"))
        .arg("--project-dir")
        .arg(&root)
        .args(["--keyframes-out", "-"])
        .output()
        .expect("run csvdrive");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"path\": \"data.energy\""));
    assert!(stdout
        .lines()
        .any(|l| l == "Generated 3 keyframes (frame offset -3)"));
}

#[test]
fn flags_override_config_fields() {
    let root = fixtures::root();
    let output = csvdrive()
        .arg("--scene")
        .arg(fixtures::scenes::path("lamp").unwrap())
        .arg("--config")
        .arg(root.join("runs/lamp_pulse.json"))
        .arg("--project-dir")
        .arg(&root)
        .args(["--offset", "12"])
        .output()
        .expect("run csvdrive");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "Generated 3 keyframes (frame offset 12)");
}

#[test]
fn missing_selection_exits_with_failure() {
    let output = csvdrive()
        .arg("--scene")
        .arg(fixtures::scenes::path("empty-stage").unwrap())
        .arg(fixtures::tables::path("light-pulse").unwrap())
        .output()
        .expect("run csvdrive");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Select an object first"));
}

#[test]
fn column_out_of_range_is_reported() {
    let output = csvdrive()
        .arg("--scene")
        .arg(fixtures::scenes::path("lamp").unwrap())
        .args(["--column", "4"])
        .arg(fixtures::tables::path("light-pulse").unwrap())
        .output()
        .expect("run csvdrive");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("column 4 is out of range"));
}
