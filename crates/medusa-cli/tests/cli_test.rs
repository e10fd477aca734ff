use assert_cmd::Command;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("outline")
        .join(name)
}

fn cli() -> Command {
    Command::cargo_bin("medusa-cli").expect("binary")
}

#[test]
fn validate_prints_the_normalized_outline() {
    let assert = cli()
        .arg("validate")
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(value["name"], "Test Topic");
    assert_eq!(value["children"].as_array().unwrap().len(), 2);
}

#[test]
fn validate_rejects_a_malformed_outline() {
    cli()
        .arg("validate")
        .arg(fixture_path("bad_missing_name.json"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid outline data"));
}

#[test]
fn validate_reads_stdin_with_a_dash() {
    cli()
        .args(["validate", "-"])
        .write_stdin(r#"{ "name": "piped" }"#)
        .assert()
        .success()
        .stdout(predicates::str::contains("piped"));
}

#[test]
fn layout_emits_one_record_per_visible_node() {
    let assert = cli()
        .arg("layout")
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(records.as_array().unwrap().len(), 7);
    assert_eq!(records[0]["depth"], 0);
    assert_eq!(records[0]["x"], 0.0);
}

#[test]
fn layout_honors_collapse_by_name() {
    let assert = cli()
        .args(["layout", "--collapse", "Subtopic 1,Subtopic 2"])
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(records.as_array().unwrap().len(), 3);
}

#[test]
fn render_writes_svg_with_markers_and_links() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("map.svg");
    cli()
        .args(["render", "--out"])
        .arg(&out)
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();

    let svg = std::fs::read_to_string(&out).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle class=\"marker\"").count(), 7);
    assert_eq!(svg.matches("<path class=\"link\"").count(), 6);
    assert!(svg.contains("Detail 2.2"));
}

#[test]
fn render_collapse_drops_the_hidden_subtree() {
    let assert = cli()
        .args(["render", "--collapse", "Subtopic 1"])
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();
    let svg = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(svg.matches("<circle class=\"marker\"").count(), 5);
    assert!(!svg.contains("Detail 1.1"));
    assert!(svg.contains("Subtopic 1"));
}

#[test]
fn render_applies_the_root_color() {
    let assert = cli()
        .args(["render", "--root-color", "#e11d48"])
        .arg(fixture_path("test_topic.json"))
        .assert()
        .success();
    let svg = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(svg.contains("fill=\"#e11d48\""));
}

#[test]
fn unknown_collapse_target_fails_cleanly() {
    cli()
        .args(["render", "--collapse", "No Such Node"])
        .arg(fixture_path("test_topic.json"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("No node matches"));
}

#[test]
fn unknown_flag_prints_usage() {
    cli()
        .args(["render", "--frobnicate"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("USAGE"));
}

#[test]
fn generate_without_a_key_fails_before_any_request() {
    cli()
        .args(["generate", "a topic"])
        .env_remove("GEMINI_API_KEY")
        .current_dir(std::env::temp_dir())
        .assert()
        .failure()
        .stderr(predicates::str::contains("GEMINI_API_KEY"));
}
