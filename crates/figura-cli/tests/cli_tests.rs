//! Integration tests for the `figura` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand through
//! the actual binary, including stdin/stdout piping, file I/O, error handling, and
//! JSON → XML → JSON roundtrips.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Helper: path to the scene.json fixture.
fn scene_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scene.json")
}

/// Helper: path to the scene.xml fixture.
fn scene_xml_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scene.xml")
}

/// Helper: read the scene.json fixture without its trailing newline.
fn scene_json() -> String {
    std::fs::read_to_string(scene_json_path())
        .expect("scene.json fixture must exist")
        .trim()
        .to_string()
}

/// Helper: a scratch file path unique to this test.
fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("figura-cli-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}

fn figura() -> Command {
    Command::cargo_bin("figura").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// to-xml
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn to_xml_stdin_to_stdout() {
    figura()
        .arg("to-xml")
        .write_stdin(r#"{"x": 1, "child": [1, 2]}"#)
        .assert()
        .success()
        .stdout(format!(
            "{DECL}\n<Dict x=\"$1\"><child>\n\t<List $1='' $2=''/></child>\n</Dict>"
        ));
}

#[test]
fn to_xml_file_to_file() {
    let output_path = scratch("to-xml.xml");

    figura()
        .args(["to-xml", "-i", scene_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.starts_with(DECL));
    assert!(content.contains(r#"origin="$p$10,-4""#));
    assert!(content.contains(r#"note="costs {$5""#));
    assert!(content.contains("<style>\n\t<Dict width=\"$2.5\"/></style>"));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn to_xml_warns_about_keys_that_are_not_names() {
    figura()
        .arg("to-xml")
        .write_stdin(r#"{"ok": 1, "two words": 2}"#)
        .assert()
        .success()
        .stdout(format!("{DECL}\n<Dict ok=\"$1\"/>"))
        .stderr(predicate::str::contains(
            "warning: skipped entry \"two words\": key is not a valid XML name",
        ));
}

#[test]
fn to_json_rejects_runaway_nesting() {
    let deep = format!("{}{}", "<List>".repeat(10_000), "</List>".repeat(10_000));
    figura()
        .arg("to-json")
        .write_stdin(deep)
        .assert()
        .failure()
        .stderr(predicate::str::contains("well-formed"));
}

#[test]
fn to_xml_scalar_top_level_fails() {
    figura()
        .arg("to-xml")
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("object or array"));
}

#[test]
fn to_xml_invalid_json_fails() {
    figura()
        .arg("to-xml")
        .write_stdin("{ this is not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// to-json
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn to_json_from_file() {
    figura()
        .args(["to-json", "-i", scene_xml_path()])
        .assert()
        .success()
        .stdout(
            r#"{"name": "triangle", "visible": true, "layer": 3, "origin": "$p$10,-4", "tags": ["shape", "closed"]}"#,
        );
}

#[test]
fn to_json_malformed_xml_fails() {
    figura()
        .arg("to-json")
        .write_stdin("<Dict><List></Dict>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("well-formed"));
}

#[test]
fn to_json_warns_about_unknown_elements() {
    figura()
        .arg("to-json")
        .write_stdin("<List $1=''><Widget/></List>")
        .assert()
        .success()
        .stdout("[1]")
        .stderr(predicate::str::contains("warning: skipped unknown element <Widget>"));
}

#[test]
fn json_xml_json_roundtrip_through_binary() {
    let xml = figura()
        .arg("to-xml")
        .write_stdin(scene_json())
        .output()
        .expect("to-xml should run");
    assert!(xml.status.success());

    // Scalars already precede composites in the fixture, so the text is unchanged.
    figura()
        .arg("to-json")
        .write_stdin(xml.stdout)
        .assert()
        .success()
        .stdout(scene_json());
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_fixture_is_stable() {
    figura()
        .args(["normalize", "-i", scene_json_path()])
        .assert()
        .success()
        .stdout(scene_json());
}

#[test]
fn normalize_canonicalizes_spacing_and_colors() {
    figura()
        .arg("normalize")
        .write_stdin(r#"{"fill":"$C$red","n":[1,2.50]}"#)
        .assert()
        .success()
        .stdout(r##"{"fill": "$C$#ffff0000", "n": [1, 2.5]}"##);
}

#[test]
fn normalize_rejects_bad_payload() {
    figura()
        .arg("normalize")
        .write_stdin(r#"["$T$1,2,3"]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed number literal"));
}

#[test]
fn normalize_rejects_scalar_top_level() {
    figura()
        .arg("normalize")
        .write_stdin("\"just a string\"")
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// inspect
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inspect_json_shows_types() {
    let output = figura()
        .args(["inspect", "-i", scene_json_path()])
        .output()
        .expect("inspect should run");
    assert!(output.status.success());

    let tree: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("inspect output must be JSON");
    assert_eq!(tree["type"], "Map");
    let entries = tree["value"].as_array().expect("map entries");
    let layer = entries.iter().find(|e| e[0] == "layer").expect("layer entry");
    assert_eq!(layer[1], serde_json::json!({"type": "Int16", "value": 3}));
    let origin = entries.iter().find(|e| e[0] == "origin").expect("origin entry");
    assert_eq!(
        origin[1],
        serde_json::json!({"type": "Point", "value": {"x": 10, "y": -4}})
    );
}

#[test]
fn inspect_detects_xml() {
    figura()
        .args(["inspect", "-i", scene_xml_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Point\""))
        .stdout(predicate::str::contains("\"type\": \"List\""));
}

#[test]
fn inspect_rejects_garbage() {
    figura()
        .arg("inspect")
        .write_stdin("hello")
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// stats and argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_from_file() {
    figura()
        .args(["stats", "-i", scene_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON size:"))
        .stdout(predicate::str::contains("XML size:"))
        .stdout(predicate::str::contains("XML/JSON:"));
}

#[test]
fn missing_input_file_fails() {
    figura()
        .args(["to-xml", "-i", "/nonexistent/figura/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn no_subcommand_prints_usage() {
    figura()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
