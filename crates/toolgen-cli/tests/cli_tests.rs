use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TWO_SERVERS: &str = r#"openapi: 3.0.3
info:
  title: Two Servers
  version: "1.0"
servers:
  - url: https://primary.example.com
  - url: https://secondary.example.com
paths:
  /items:
    get:
      summary: List items
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
"#;

fn toolgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toolgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run toolgen")
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("api.yaml"), TWO_SERVERS).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_arguments_exit_1() {
    let dir = workspace();
    let none = toolgen(dir.path(), &[]);
    assert_eq!(none.status.code(), Some(1));

    let spec_only = toolgen(dir.path(), &["api.yaml"]);
    assert_eq!(spec_only.status.code(), Some(1));
    assert!(stderr(&spec_only).contains("<OUTPUT_IDENTIFIER>"));
}

#[test]
fn help_and_version_exit_0() {
    let dir = workspace();
    assert_eq!(toolgen(dir.path(), &["--help"]).status.code(), Some(0));
    assert_eq!(toolgen(dir.path(), &["--version"]).status.code(), Some(0));
}

#[test]
fn unparseable_server_index_exits_1() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "Api", "--server-index", "abc"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("Api.java").exists());
}

#[test]
fn generate_writes_java_file() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "ItemsServer"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("MCP server generated successfully:"));
    assert!(stdout(&output).contains("ItemsServer.java"));

    let java = fs::read_to_string(dir.path().join("ItemsServer.java")).unwrap();
    assert!(java.contains("public class ItemsServer {"));
    assert_eq!(java.matches("@Tool(").count(), 2);
    assert!(java.contains("DEFAULT_BASE_URL = \"https://primary.example.com\";"));

    // Two candidates and no explicit choice: the operator is told about both.
    let err = stderr(&output);
    assert!(err.contains("warning: multiple servers found"));
    assert!(err.contains("[1] https://secondary.example.com"));
}

#[test]
fn header_records_spec_file_name_only() {
    let dir = workspace();
    fs::create_dir(dir.path().join("specs")).unwrap();
    fs::write(dir.path().join("specs").join("items.yaml"), TWO_SERVERS).unwrap();
    let output = toolgen(dir.path(), &["specs/items.yaml", "ItemsServer"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let java = fs::read_to_string(dir.path().join("ItemsServer.java")).unwrap();
    assert!(java.contains(" from: items.yaml\n"));
    assert!(!java.contains("specs/"));
}

#[test]
fn out_of_range_server_index_warns_and_succeeds() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "Api", "--server-index", "5"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output)
        .contains("warning: server index 5 is out of range (2 server(s) found), using index 0"));

    let java = fs::read_to_string(dir.path().join("Api.java")).unwrap();
    assert!(java.contains("DEFAULT_BASE_URL = \"https://primary.example.com\";"));
}

#[test]
fn server_url_wins_over_index() {
    let dir = workspace();
    let output = toolgen(
        dir.path(),
        &[
            "api.yaml",
            "Api",
            "--server-index",
            "1",
            "--server-url",
            "http://localhost:9000",
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    let java = fs::read_to_string(dir.path().join("Api.java")).unwrap();
    assert!(java.contains("DEFAULT_BASE_URL = \"http://localhost:9000\";"));
    assert!(!stderr(&output).contains("warning:"));
}

#[test]
fn output_dir_flag() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "Api", "-o", "out/java"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("out/java/Api.java").exists());
}

#[test]
fn invalid_output_identifier_fails_without_output() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "my-server"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error generating MCP server:"));
    assert!(stderr(&output).contains("not a valid Java class name"));
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "only api.yaml should remain");
}

#[test]
fn missing_spec_file_exits_1() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["nope.yaml", "Api"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read nope.yaml"));
}

#[test]
fn config_file_supplies_server_choice() {
    let dir = workspace();
    fs::write(
        dir.path().join(".toolgen.yaml"),
        "output_dir: generated\nservers:\n  index: 1\n",
    )
    .unwrap();
    let output = toolgen(dir.path(), &["api.yaml", "Api"]);
    assert_eq!(output.status.code(), Some(0));
    let java = fs::read_to_string(dir.path().join("generated/Api.java")).unwrap();
    assert!(java.contains("DEFAULT_BASE_URL = \"https://secondary.example.com\";"));

    // Command-line flags take precedence over the file.
    let output = toolgen(dir.path(), &["api.yaml", "Api", "--server-index", "0"]);
    assert_eq!(output.status.code(), Some(0));
    let java = fs::read_to_string(dir.path().join("generated/Api.java")).unwrap();
    assert!(java.contains("DEFAULT_BASE_URL = \"https://primary.example.com\";"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["api.yaml", "Api", "--config", "missing.yaml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("config file missing.yaml not found"));
}

#[test]
fn validate_reports_counts() {
    let dir = workspace();
    let output = toolgen(dir.path(), &["validate", "api.yaml"]);
    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains("Valid OpenAPI 3.0.3 document: Two Servers"));
    assert!(err.contains("  Tools: 2"));
    assert!(err.contains("  Servers: 2"));
}

#[test]
fn inspect_json_lists_tools() {
    let dir = workspace();
    let output = toolgen(
        dir.path(),
        &["inspect", "api.yaml", "--format", "json", "--server-index", "1"],
    );
    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["servers"]["base_url"], "https://secondary.example.com");
    assert_eq!(summary["tools"][0]["name"], "get_items");
    assert_eq!(summary["tools"][1]["name"], "post_items");
    assert_eq!(summary["tools"][1]["parameters"][0]["location"], "body");
    assert_eq!(summary["tools"][1]["content_type"], "application/json");
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = workspace();
    assert_eq!(toolgen(dir.path(), &["init"]).status.code(), Some(0));
    assert!(dir.path().join(".toolgen.yaml").exists());

    let again = toolgen(dir.path(), &["init"]);
    assert_eq!(again.status.code(), Some(1));
    assert!(stderr(&again).contains("already exists"));

    assert_eq!(toolgen(dir.path(), &["init", "--force"]).status.code(), Some(0));
}
