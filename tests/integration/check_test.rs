use crate::{project, project_copy, snapshot};
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn check_file_lists_both_directions() {
    let tmp = project_copy("python/simple_project");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-file", "pkg/util.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Depends on (0):"))
        .stdout(predicate::str::contains(
            "Depended on by (2):\n  pkg/core.py\n  pkg/sub/leaf.py\n",
        ));
}

#[test]
fn check_file_accepts_absolute_path_inside_root() {
    let tmp = project_copy("python/simple_project");
    let root = tmp.path().canonicalize().unwrap();

    Command::cargo_bin("modshift")
        .unwrap()
        .arg("check-file")
        .arg(root.join("lib/a.py"))
        .args(["--quiet", "--root"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("lib/a.py\n"))
        .stdout(predicate::str::contains("  lib.b\n  lib/b.py\n"));
}

#[test]
fn check_file_unknown_file_is_empty_not_an_error() {
    let tmp = project(&[("a.py", "import os\n")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-file", "missing.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Depends on (0):"))
        .stdout(predicate::str::contains("Depended on by (0):"));
}

#[test]
fn check_file_reads_saved_graph() {
    let tmp = project(&[("a.py", "import b\n"), ("b.py", "")]);
    let out = tmp.path().join("graph.json");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["map", "--quiet", "--root"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    // The saved graph is the source of truth, not the tree.
    std::fs::remove_file(tmp.path().join("a.py")).unwrap();

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-file", "b.py", "--quiet", "--graph"])
        .arg(&out)
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Depended on by (1):\n  a.py\n"));
}

#[test]
fn check_rename_reports_impacted_files() {
    // Scenario A
    let tmp = project(&[("lib/a.src", "from lib.b import x\n"), ("lib/b.src", "x = 1\n")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.src", "lib/c.src", "--ext", "src", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Impacted files (1):\n  lib/a.src\n"))
        .stdout(predicate::str::contains("lib.b -> lib.c"));
}

#[test]
fn check_rename_flags_submodule_imports_for_review() {
    let tmp = project_copy("python/simple_project");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.py", "lib/c.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Impacted files (2):"))
        .stdout(predicate::str::contains("  lib/a.py\n"))
        .stdout(predicate::str::contains("[submodule] needs manual review"));
}

#[test]
fn check_rename_never_mutates() {
    let tmp = project_copy("python/simple_project");
    let before = snapshot(tmp.path());

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.py", "lib/c.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success();

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn check_rename_with_nothing_impacted_succeeds() {
    let tmp = project(&[("a.py", "import os\n"), ("b.py", "")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "b.py", "c.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No files reference b."));
}
