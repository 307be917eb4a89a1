//! Integration tests for the `pagecraft` command surface.
//!
//! Scripts are written to a temp dir and replayed with a fixed id clock so
//! later actions can address earlier elements.

use std::fs;
use std::path::Path;

use clap::Parser;
use pagecraft_cli::{run, Cli};
use tempfile::TempDir;

const SCRIPT: &str = r##"{
  "actions": [
    {"action": "drop", "payload": {"text": "heading"}, "target": {"kind": "placeholder"}},
    {"action": "apply", "values": {"text": "Welcome", "size": "h1", "color": "#112233", "align": "center"}},
    {"action": "drop", "payload": {"text": "widget"}},
    {"action": "drop", "payload": {"text": "button"}},
    {"action": "drop", "payload": {"text": "paragraph"}, "target": {"kind": "element", "id": "element-5-1"}},
    {"action": "drop", "payload": {"uri_list": "https://x.com/photo.png?size=large"}},
    {"action": "delete", "id": "element-5-2"},
    {"action": "click", "target": {"kind": "background"}},
    {"action": "save"}
  ]
}"##;

fn write_script(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("session.json");
    fs::write(&path, SCRIPT).expect("write script");
    path
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 temp path")
}

#[test]
fn test_build_writes_standalone_document() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(&dir);
    let output = dir.path().join("site.html");
    let snapshot = dir.path().join("canvas.json");

    let printed = run_args(&[
        "pagecraft",
        "build",
        path_str(&script),
        "--epoch-ms",
        "5",
        "--output",
        path_str(&output),
        "--title",
        "Launch",
        "--snapshot",
        path_str(&snapshot),
    ])
    .expect("build succeeds");
    assert_eq!(printed.trim(), path_str(&output));

    let doc = fs::read_to_string(&output).expect("output written");
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<title>Launch</title>"));

    let heading = doc
        .find("<h1 style=\"color:#112233;text-align:center;\">Welcome</h1>")
        .expect("heading");
    let paragraph = doc.find("<p>This is a paragraph").expect("paragraph");
    let image = doc
        .find("<img src=\"https://x.com/photo.png?size=large\"")
        .expect("image");
    assert!(heading < paragraph && paragraph < image);
    assert!(!doc.contains("<button"), "deleted button must not be exported");
    assert!(!doc.contains("data-id"));

    let snapshot = fs::read_to_string(&snapshot).expect("snapshot written");
    assert!(snapshot.contains("element-5-1"));
    assert!(!snapshot.contains("element-5-2"));
}

#[test]
fn test_preview_prints_clean_fragment() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(&dir);
    let printed = run_args(&["pagecraft", "preview", path_str(&script), "--epoch-ms", "5"])
        .expect("preview succeeds");
    assert!(printed.starts_with("<div><h1"));
    assert!(!printed.contains("<!DOCTYPE"));
}

#[test]
fn test_replay_prints_one_outcome_per_action() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(&dir);
    let printed = run_args(&["pagecraft", "replay", path_str(&script), "--epoch-ms", "5"])
        .expect("replay succeeds");
    let lines: Vec<serde_json::Value> = printed
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0]["outcome"], "created");
    assert_eq!(lines[0]["id"], "element-5-1");
    assert_eq!(lines[2]["outcome"], "nothing");
    assert_eq!(lines[6]["outcome"], "deleted");
    assert_eq!(lines[8]["outcome"], "saved");
    assert_eq!(lines[8]["download"]["file_name"], "my-website.html");
}

#[test]
fn test_form_and_blocks_commands() {
    let json = run_args(&["pagecraft", "form", "spacer"]).expect("form");
    let form: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(form["title"], "Spacer Properties");
    assert_eq!(form["fields"][0]["name"], "heightPx");
    assert_eq!(form["fields"][0]["value"], "50");

    let html = run_args(&["pagecraft", "form", "button", "--html"]).expect("form html");
    assert!(html.contains("<h4>Button Properties</h4>"));

    assert!(run_args(&["pagecraft", "form", "widget"]).is_err());

    let blocks = run_args(&["pagecraft", "blocks"]).expect("blocks");
    assert_eq!(blocks.lines().count(), 6);
    assert!(blocks.starts_with("heading\t<h2>Heading Text</h2>"));
}

#[test]
fn test_missing_script_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.json");
    let err = run_args(&["pagecraft", "preview", path_str(&missing)]).expect_err("missing file");
    assert!(format!("{err:#}").contains("failed to read script"));
}
