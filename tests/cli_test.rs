use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dltime(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dltime").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_calc_text_output() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "1", "gb", "10", "mbps"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Download Time: 0 Hours 13 Minutes 39 Seconds",
        ))
        .stdout(predicate::str::contains(
            "Based on a 1 Gb file and an internet speed of 10 Mbps, the download will be finished at approximately",
        ));
}

#[test]
fn test_calc_json_contract() {
    let home = tempfile::tempdir().unwrap();

    let assert = dltime(home.path())
        .args(["calc", "1", "GB", "10", "MBPS", "--format", "json"])
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["bytes"], 1_073_741_824.0);
    assert_eq!(report["bytes_per_second"], 1_310_720.0);
    assert_eq!(report["duration"]["hours"], 0);
    assert_eq!(report["duration"]["minutes"], 13);
    assert_eq!(report["duration"]["seconds"], 39);
    assert_eq!(report["total_seconds"], 819);
    assert_eq!(report["download_time"], "0 Hours 13 Minutes 39 Seconds");
    assert!(report["finish_time"].is_string());
}

#[test]
fn test_calc_speed_unit_defaults_to_bytes_per_second() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "7200", "b", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Hour 0 Minutes 0 Seconds"));
}

#[test]
fn test_calc_zero_speed_fails() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "1", "gb", "0", "mbps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_calc_negative_speed_fails() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "1", "gb", "-5", "mbps"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_calc_negative_size_fails() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "-1", "gb", "5", "mbps"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("zero or a positive"));
}

#[test]
fn test_calc_unknown_unit_warns_and_counts_bytes() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "90", "stones", "1", "bps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 Hours 1 Minute 30 Seconds"))
        .stderr(predicate::str::contains("Unrecognized size unit 'stones'"));
}

#[test]
fn test_calc_strict_units_from_env() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .env("DLTIME_UNITS__STRICT", "true")
        .args(["calc", "90", "stones", "1", "bps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized size unit 'stones'"));
}

#[test]
fn test_calc_without_speed_needs_previous_test() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["calc", "1", "gb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dltime speedtest"));
}

#[test]
fn test_calc_uses_last_speed_test() {
    let home = tempfile::tempdir().unwrap();
    let state_dir = home.path().join(".dltime");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(
        state_dir.join("state.json"),
        r#"{
            "version": "1.0.0",
            "theme": "dark",
            "last_speed_test": { "mbps": 10.0, "measured_at": "2026-10-18T08:00:00Z" }
        }"#,
    )
    .unwrap();

    dltime(home.path())
        .args(["calc", "1", "gb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 Hours 13 Minutes 39 Seconds"))
        .stdout(predicate::str::contains("internet speed of 10 Mbps"));
}

#[test]
fn test_units_json_lists_both_tables() {
    let home = tempfile::tempdir().unwrap();

    let assert = dltime(home.path())
        .args(["units", "--format", "json"])
        .assert()
        .success();
    let tables: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(tables["size"].as_array().unwrap().len(), 5);
    assert_eq!(tables["speed"].as_array().unwrap().len(), 7);
    assert_eq!(tables["speed"][3]["token"], "mbps");
    assert_eq!(tables["speed"][3]["label"], "Mbps");
    assert_eq!(tables["speed"][3]["multiplier"], 131_072.0);
}

#[test]
fn test_speedtest_rejects_zero_bytes() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["speedtest", "--bytes", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value '0'"));
}

#[test]
fn test_theme_set_and_get() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout("light\n");

    dltime(home.path())
        .args(["theme", "set", "valentine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to Valentine"));

    dltime(home.path())
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout("valentine\n");

    dltime(home.path())
        .args(["theme", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* Valentine"))
        .stdout(predicate::str::contains("  Light"));
}

#[test]
fn test_theme_set_rejects_unknown() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["theme", "set", "vaporwave"])
        .assert()
        .failure();
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["config", "set", "speedtest.samples", "4"])
        .assert()
        .success();

    dltime(home.path())
        .args(["config", "get", "speedtest.samples"])
        .assert()
        .success()
        .stdout("4\n");

    let written = fs::read_to_string(home.path().join(".dltime").join("config.toml")).unwrap();
    assert!(written.contains("samples = 4"));
}

#[test]
fn test_config_path() {
    let home = tempfile::tempdir().unwrap();

    dltime(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".dltime"))
        .stdout(predicate::str::contains("config.toml"));
}

#[tokio::test]
async fn test_speedtest_then_calc() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/__down"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 1000]))
        .mount(&mock_server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".dltime");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            r#"
[speedtest]
url = "{}"
bytes = 1000
retries = 0
"#,
            mock_server.uri()
        ),
    )
    .unwrap();

    let assert = dltime(home.path())
        .args(["speedtest", "--format", "json"])
        .assert()
        .success();
    let sample: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert!(sample["mbps"].as_f64().unwrap() > 0.0);
    assert!(sample["measured_at"].is_string());

    let state: Value =
        serde_json::from_str(&fs::read_to_string(config_dir.join("state.json")).unwrap()).unwrap();
    assert_eq!(state["last_speed_test"]["mbps"], sample["mbps"]);

    dltime(home.path())
        .args(["calc", "5", "mb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Download Time:"))
        .stdout(predicate::str::contains("Mbps"));
}
