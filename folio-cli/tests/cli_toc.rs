use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT_YAML: &str = "\
id: 0
name: shapes
kind: project
children:
  - id: 1
    name: A
    kind: namespace
    children:
      - id: 2
        name: A1
        kind: function
  - id: 3
    name: B
    kind: variable
";

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").expect("folio binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("project.yaml"), PROJECT_YAML).expect("write project");
    dir
}

#[test]
fn prints_indented_tree() {
    let dir = workspace();
    folio()
        .current_dir(dir.path())
        .args(["toc", "project.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  A [namespace] index.html#A"))
        .stdout(predicate::str::contains("    A1 [function] index.html#A.A1"))
        .stdout(predicate::str::contains("  B [variable] index.html#B"));
}

#[test]
fn json_output_mirrors_the_model() {
    let dir = workspace();
    let output = folio()
        .current_dir(dir.path())
        .args(["toc", "project.yaml", "--json"])
        .output()
        .expect("run folio toc --json");
    assert!(output.status.success());

    let toc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(toc["title"], "shapes");
    assert_eq!(toc["children"][0]["title"], "A");
    assert_eq!(toc["children"][0]["is_expanded"], true);
    assert_eq!(toc["children"][0]["children"][0]["title"], "A1");
    assert_eq!(toc["children"][1]["title"], "B");
    assert_eq!(toc["children"][1]["children"].as_array().map(Vec::len), Some(0));
}
