//! Command-line behavior: envelopes, exit codes and configuration.

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const WEATHER_NODE: &str = indoc! {"
    class Config:
        city = 'Oslo'
        # city to query
        units = ['metric', 'imperial']
"};

fn nodeconf(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nodeconf").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("NODECONF_CONFIG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn extract_file_prints_node_envelope() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("fetch_weather.py"), WEATHER_NODE).unwrap();

    let output = nodeconf(&temp)
        .args(["extract", "fetch_weather.py"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({
            "node_name": "fetch_weather",
            "configurations": {
                "city": {"value": "Oslo", "description": "city to query"},
                "units": {"value": ["metric", "imperial"], "description": "No description available"}
            },
            "full_code": WEATHER_NODE.trim()
        })
    );
}

#[test]
fn extract_reads_stdin_with_name() {
    let temp = TempDir::new().unwrap();
    let output = nodeconf(&temp)
        .args(["extract", "--name", "Weather Node", "--compact"])
        .write_stdin(WEATHER_NODE)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["node_name"], "Weather Node");
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 1);
}

#[test]
fn rejected_fragment_exits_with_client_error_status() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.py"), "class Config:\n    x = some_call()\n").unwrap();

    let output = nodeconf(&temp).args(["extract", "bad.py"]).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output);
    assert_eq!(value["code"], "E031");
    assert_eq!(value["node_name"], "bad");
    assert!(value["error"].as_str().unwrap().contains("'x'"));
}

#[test]
fn multiple_files_produce_array_in_input_order() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("b.py"), WEATHER_NODE).unwrap();
    fs::write(temp.path().join("a.py"), "print('no config')\n").unwrap();

    let output = nodeconf(&temp)
        .args(["extract", "b.py", "a.py"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output);
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["node_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(value[1]["code"], "E030");
}

#[test]
fn missing_file_is_an_io_failure() {
    let temp = TempDir::new().unwrap();
    let output = nodeconf(&temp)
        .args(["extract", "missing.py"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.py"), "{stderr}");
}

#[test]
fn config_file_sets_block_name() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".nodeconf.toml"),
        "[extractor]\nblock_name = \"Settings\"\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("node.py"),
        "class Config:\n    a = 1\nclass Settings:\n    b = 2\n",
    )
    .unwrap();

    let output = nodeconf(&temp).args(["extract", "node.py"]).output().unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["configurations"], json!({"b": {"value": 2, "description": "No description available"}}));
}

#[test]
fn max_bytes_flag_rejects_large_fragment() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("node.py"), WEATHER_NODE).unwrap();

    let output = nodeconf(&temp)
        .args(["extract", "node.py", "--max-bytes", "8"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["code"], "E011");
}

#[test]
fn terminal_format_lists_settings() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("weather.py"), WEATHER_NODE).unwrap();

    let output = nodeconf(&temp)
        .env("NO_COLOR", "1")
        .args(["extract", "weather.py", "--format", "terminal"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[weather.py]"), "{stdout}");
    assert!(stdout.contains("city"), "{stdout}");
    assert!(stdout.contains("'Oslo'"), "{stdout}");
    assert!(stdout.contains("city to query"), "{stdout}");
}

#[test]
fn init_writes_config_once() {
    let temp = TempDir::new().unwrap();

    let first = nodeconf(&temp).arg("init").output().unwrap();
    assert!(first.status.success());
    assert!(temp.path().join(".nodeconf.toml").exists());

    let second = nodeconf(&temp).arg("init").output().unwrap();
    assert_eq!(second.status.code(), Some(1));

    let forced = nodeconf(&temp).args(["init", "--force"]).output().unwrap();
    assert!(forced.status.success());
}
