use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const VALID_YAML: &str = r#"
run_id: "cli_check"
games:
  seed: 1
  count: 2
agents:
  - name: "risk"
    kind: "risk"
  - name: "greedy"
    kind: "greedy"
outputs:
  jsonl: "out/{run_id}/games.jsonl"
  summary_md: "out/{run_id}/summary.md"
"#;

#[test]
fn validate_only_accepts_a_good_config() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bench.yaml");
    fs::write(&path, VALID_YAML).expect("write config");

    Command::cargo_bin("shedder-bench")
        .expect("binary")
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded configuration 'cli_check'"))
        .stdout(predicate::str::contains("Validation-only mode"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn invalid_config_names_the_field() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bench.yaml");
    fs::write(&path, VALID_YAML.replace("count: 2", "count: 0")).expect("write config");

    Command::cargo_bin("shedder-bench")
        .expect("binary")
        .arg("--config")
        .arg(&path)
        .arg("--validate-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("games.count"));
}

#[test]
fn games_override_is_validated_too() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bench.yaml");
    fs::write(&path, VALID_YAML).expect("write config");

    Command::cargo_bin("shedder-bench")
        .expect("binary")
        .arg("--config")
        .arg(&path)
        .arg("--games")
        .arg("0")
        .arg("--validate-only")
        .assert()
        .failure();
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().expect("temp dir");
    Command::cargo_bin("shedder-bench")
        .expect("binary")
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
