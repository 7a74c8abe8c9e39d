use crate::{project, project_copy};
use assert_cmd::Command;
use predicates::prelude::*;

fn read_graph(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn map_writes_graph_document() {
    let tmp = project_copy("python/simple_project");
    let out = tmp.path().join("graph.json");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["map", "--quiet", "--root"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency graph written to"))
        .stdout(predicate::str::contains("Skipped:    0 files"));

    let graph = read_graph(&out);
    let deps = &graph["dependencies"];
    assert_eq!(
        deps["lib/a.py"],
        serde_json::json!(["lib.b", "lib/b.py"])
    );
    assert_eq!(
        deps["pkg/sub/leaf.py"],
        serde_json::json!(["..core", "..util", "pkg/core.py", "pkg/util.py"])
    );
    assert_eq!(
        graph["reverse_dependencies"]["lib/b.py"],
        serde_json::json!(["lib/a.py"])
    );
    // Cache directories are never scanned
    assert!(deps.get("__pycache__/stale.py").is_none());
}

#[test]
fn map_defaults_to_dependency_graph_json_in_working_dir() {
    let tmp = project(&[("a.py", "import b\n"), ("b.py", "")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .current_dir(tmp.path())
        .args(["map", "--quiet"])
        .assert()
        .success();

    let graph = read_graph(&tmp.path().join("dependency_graph.json"));
    assert_eq!(graph["dependencies"]["a.py"], serde_json::json!(["b", "b.py"]));
    assert_eq!(graph["dependencies"]["b.py"], serde_json::json!([]));
}

#[test]
fn map_survives_undecodable_file() {
    let tmp = project(&[("a.py", "import b\n"), ("b.py", "")]);
    std::fs::write(tmp.path().join("broken.py"), [0xffu8, 0xfe, 0x00]).unwrap();
    let out = tmp.path().join("graph.json");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["map", "--quiet", "--root"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:    1 files"));

    let graph = read_graph(&out);
    assert_eq!(graph["dependencies"]["a.py"], serde_json::json!(["b", "b.py"]));
    assert_eq!(graph["dependencies"]["broken.py"], serde_json::json!([]));
}

#[test]
fn map_respects_exclude_flags() {
    let tmp = project(&[
        ("a.py", "import b\n"),
        ("b.py", ""),
        ("generated/c.py", "import a\n"),
        ("third_party/d.py", "import a\n"),
    ]);
    let out = tmp.path().join("graph.json");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["map", "--quiet", "--exclude", "generated/**", "--exclude-dir", "third_party", "--root"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let graph = read_graph(&out);
    let files: Vec<&String> = graph["dependencies"].as_object().unwrap().keys().collect();
    assert_eq!(files, vec!["a.py", "b.py"]);
}

#[test]
fn map_uses_custom_extension() {
    let tmp = project(&[("lib/a.src", "from lib.b import x\n"), ("lib/b.src", "")]);
    let out = tmp.path().join("graph.json");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["map", "--quiet", "--ext", "src", "--root"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let graph = read_graph(&out);
    assert_eq!(
        graph["reverse_dependencies"]["lib/b.src"],
        serde_json::json!(["lib/a.src"])
    );
}
