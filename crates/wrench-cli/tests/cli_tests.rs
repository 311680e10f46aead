//! Tests running the `wrench` binary end to end.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../wrench-core/tests/fixtures/objects.json")
}

/// Run `wrench` inside `dir` so no stray wrench.toml is picked up
fn wrench(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wrench"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn generate___writes_files_and_previews_declarations() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let output = wrench(dir.path(), &["generate", fixture.to_str().unwrap(), "-o", "out"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("class HeapNumber extends HeapObject {\n  value: float64;\n"));
    assert!(!stdout.contains("automatically generated"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Generated 3 file(s)"));
    assert!(dir.path().join("out/heap_object.tq").exists());
    assert!(dir.path().join("out/heap_number.tq").exists());
    assert!(dir.path().join("out/map.tq").exists());
}

#[test]
fn generate___default_level___traces_annotations_base_and_fields() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let output = wrench(
        dir.path(),
        &["generate", fixture.to_str().unwrap(), "-o", "out", "--no-preview"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Annotations:"));
    assert!(stderr.contains(" - tq::instance_size<3, 7>"));
    assert!(stderr.contains("Base class: HeapObject"));
    assert!(stderr.contains(" - 'value': float64"));
    assert!(stderr.contains(" - 'map': Map"));
}

#[test]
fn generate___no_preview___keeps_stdout_empty() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let output = wrench(
        dir.path(),
        &["generate", fixture.to_str().unwrap(), "-o", "out", "--no-preview"],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn generate___config_file_in_working_dir___is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("wrench.toml"),
        "output_dir = \"gen\"\nextension = \"schema\"\npreview = false\n",
    )
    .unwrap();
    let fixture = fixture();

    let output = wrench(dir.path(), &["generate", fixture.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(dir.path().join("gen/map.schema").exists());
}

#[test]
fn generate___failed_translation_unit___exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let dump = dir.path().join("broken.json");
    fs::write(
        &dump,
        r#"{ "units": [{ "path": "src/objects/map.cc", "error": "parse error" }], "decls": [] }"#,
    )
    .unwrap();

    let output = wrench(dir.path(), &["generate", dump.to_str().unwrap(), "-o", "out"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn generate___invalid_extension___exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let output = wrench(dir.path(), &["generate", fixture.to_str().unwrap(), "-e", ".tq"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid configuration"));
}

#[test]
fn check___prints_records_without_writing() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();

    let output = wrench(dir.path(), &["check", fixture.to_str().unwrap()]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = value["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["HeapObject", "HeapNumber", "Map"]);
    assert_eq!(value["classes"][1]["base_class"], "HeapObject");
    assert_eq!(value["diagnostics"].as_array().unwrap().len(), 2);
    assert!(!dir.path().join("src").exists());
}
