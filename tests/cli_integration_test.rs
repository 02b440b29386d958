//! Integration tests driving the doctrine-erd binary.

use jsonschema::Validator;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn doctrine_erd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_doctrine-erd"))
}

fn blog_pattern() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/blog/*.orm.yml")
        .to_string_lossy()
        .into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Command failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn schema_validator() -> Validator {
    let output = doctrine_erd_bin().arg("schema").output().unwrap();
    assert_success(&output);
    let schema: Value = serde_json::from_slice(&output.stdout).expect("Invalid schema JSON");
    jsonschema::validator_for(&schema).expect("Failed to compile schema")
}

#[test]
fn test_render_dot_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("blog.dot");

    let output = doctrine_erd_bin()
        .args(["render", "-i", &blog_pattern(), "-o", out.to_str().unwrap()])
        .output()
        .unwrap();
    assert_success(&output);

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("digraph entities {"));
    assert!(content.contains("label=\"Entities\";"));
    assert!(content.contains(
        r#""posts" [label="{<f0> posts| <f1> author  (User)\l| <f2> body  (text)\l| <f3> id  (integer)\l| <f4> title  (string)\l}"];"#
    ));
    assert!(content.contains(
        r#""users":f4 -> "posts":f1 [color="fuchsia", arrowhead=normal, dir=forward];"#
    ));
    assert!(content.contains(r#""posts":f3 -> "post_tag":f1"#));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Diagram written to:"));
    assert!(stderr.contains("ERD: 5 entities, 16 fields, 4 relationships"));
}

#[test]
fn test_render_to_stdout_with_title_and_layout() {
    let output = doctrine_erd_bin()
        .args([
            "render",
            "-i",
            &blog_pattern(),
            "-o",
            "-",
            "--title",
            "Blog",
            "--layout",
            "tb",
        ])
        .output()
        .unwrap();
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("label=\"Blog\";"));
    assert!(stdout.contains("rankdir=TB;"));
}

#[test]
fn test_render_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("erd.yml");
    fs::write(&config, "title: Styled\nnode_fill: lightyellow\npalette: [red, blue]\n").unwrap();

    let output = doctrine_erd_bin()
        .args(["render", "-i", &blog_pattern(), "-o", "-", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("label=\"Styled\";"));
    assert!(stdout.contains("fillcolor=\"lightyellow\""));
    // Post=red, Profile=blue, Tag=red, User=blue
    assert!(stdout.contains(r#""users":f4 -> "posts":f1 [color="blue""#));
}

#[test]
fn test_render_json_matches_schema() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("blog.json");

    let output = doctrine_erd_bin()
        .args(["render", "-i", &blog_pattern(), "-o", out.to_str().unwrap()])
        .output()
        .unwrap();
    assert_success(&output);

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let validator = schema_validator();
    let errors: Vec<String> = validator.iter_errors(&json).map(|e| e.to_string()).collect();
    assert!(errors.is_empty(), "JSON output doesn't match schema: {errors:?}");

    assert_eq!(json["stats"]["entity_count"], 5);
    assert_eq!(json["stats"]["edge_count"], 4);
}

#[test]
fn test_inspect_prints_model() {
    let output = doctrine_erd_bin()
        .args(["inspect", "-i", &blog_pattern()])
        .output()
        .unwrap();
    assert_success(&output);

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema_validator().is_valid(&json));

    let user = json["entities"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "App\\Entity\\User")
        .unwrap();
    assert_eq!(user["table"], "users");
    assert_eq!(user["color"], "fuchsia");
    assert_eq!(user["fields"][0]["name"], "posts");
    assert_eq!(user["fields"][0]["relation"], true);
    assert_eq!(user["fields"][0]["related_entity"], "App\\Entity\\Post");
}

#[test]
fn test_render_fails_on_unknown_target() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Post.orm.yml"),
        "App\\Entity\\Post:\n  type: entity\n  table: posts\n  manyToOne:\n    author: {targetEntity: App\\Entity\\Ghost, inversedBy: posts}\n",
    )
    .unwrap();
    let pattern = dir.path().join("*.yml");

    let output = doctrine_erd_bin()
        .args(["render", "-i", pattern.to_str().unwrap(), "-o", "-"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown entity 'App\\Entity\\Ghost'"));
}

#[test]
fn test_render_fails_when_nothing_matches() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.yml");

    let output = doctrine_erd_bin()
        .args(["render", "-i", pattern.to_str().unwrap(), "-o", "-"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no files match pattern"));
}

#[test]
fn test_completions() {
    let output = doctrine_erd_bin().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("doctrine-erd"));
}
