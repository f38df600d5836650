use std::path::PathBuf;

use snipr_generate::GenerationError;
use snipr_generate::output::{WriteMode, write_json, write_text};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn temp_file(label: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("snipr_output_{label}_{}.{ext}", uuid::Uuid::new_v4()))
}

#[test]
fn text_output_overwrites_then_appends() {
    let path = temp_file("text", "txt");

    let bytes = write_text(&path, &owned(&["alpha", "beta"]), WriteMode::Overwrite).expect("write");
    assert_eq!(bytes, 11);
    write_text(&path, &owned(&["gamma"]), WriteMode::Append).expect("append");
    assert_eq!(
        std::fs::read_to_string(&path).expect("read"),
        "alpha\nbeta\ngamma\n"
    );

    write_text(&path, &owned(&["delta"]), WriteMode::Overwrite).expect("overwrite");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "delta\n");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_append_extends_the_existing_array() {
    let path = temp_file("json", "json");

    write_json(&path, &owned(&["alpha"]), WriteMode::Overwrite).expect("write");
    write_json(&path, &owned(&["beta"]), WriteMode::Append).expect("append");

    let parsed: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(parsed, owned(&["alpha", "beta"]));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_append_rejects_non_array_files() {
    let path = temp_file("json_bad", "json");
    std::fs::write(&path, "{\"not\": \"an array\"}").expect("seed file");

    let result = write_json(&path, &owned(&["alpha"]), WriteMode::Append);
    assert!(matches!(result, Err(GenerationError::Json(_))));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_list_writes_empty_outputs() {
    let text = temp_file("empty", "txt");
    let json = temp_file("empty", "json");

    assert_eq!(write_text(&text, &[], WriteMode::Overwrite).expect("text"), 0);
    write_json(&json, &[], WriteMode::Overwrite).expect("json");
    assert_eq!(std::fs::read_to_string(&json).expect("read"), "[]\n");

    let _ = std::fs::remove_file(&text);
    let _ = std::fs::remove_file(&json);
}
