use crate::{project, project_copy, snapshot};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn rename_without_execute_is_a_dry_run() {
    let tmp = project_copy("python/simple_project");
    let before = snapshot(tmp.path());

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "lib/b.py", "lib/c.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: no files were changed"))
        .stdout(predicate::str::contains("Status: reported"));

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn rename_execute_moves_and_rewrites() {
    // Scenario B
    let tmp = project(&[("lib/a.src", "from lib.b import x\n"), ("lib/b.src", "x = 1\n")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "lib/b.src", "lib/c.src", "--execute", "--ext", "src", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved lib/b.src -> lib/c.src"))
        .stdout(predicate::str::contains("Rewrote 1 reference(s) in 1 file(s)"))
        .stdout(predicate::str::contains("Failures: 0"))
        .stdout(predicate::str::contains("Status: done"));

    assert!(!tmp.path().join("lib/b.src").exists());
    assert_eq!(fs::read_to_string(tmp.path().join("lib/c.src")).unwrap(), "x = 1\n");
    assert_eq!(
        fs::read_to_string(tmp.path().join("lib/a.src")).unwrap(),
        "from lib.c import x\n"
    );

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.src", "lib/c.src", "--ext", "src", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No files reference lib.b."));
}

#[test]
fn rename_execute_rewrites_relative_imports_per_importer() {
    let tmp = project_copy("python/simple_project");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "pkg/util.py", "pkg/sub/tools.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: done"));

    assert!(tmp.path().join("pkg/sub/tools.py").is_file());
    assert_eq!(
        fs::read_to_string(tmp.path().join("pkg/core.py")).unwrap(),
        "from .sub.tools import helper\n"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("pkg/sub/leaf.py")).unwrap(),
        "from .tools import helper\nfrom ..core import *  # noqa\n"
    );
}

#[test]
fn rename_execute_preserves_comments_and_aliases() {
    let tmp = project_copy("python/simple_project");

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "lib/b.py", "lib/core/b2.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Needs manual review (1):\n  main.py"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("lib/a.py")).unwrap(),
        "from lib.core.b2 import x\nimport lib.core.b2 as bee  # alias for lib.b\n\n\ndef use():\n    return x + bee.x\n"
    );
    // Submodule imports are reported, not rewritten
    assert!(fs::read_to_string(tmp.path().join("main.py"))
        .unwrap()
        .contains("from lib import b\n"));
}

#[test]
fn rename_onto_existing_destination_is_refused() {
    // Scenario D
    let tmp = project(&[
        ("lib/a.py", "from lib.b import x\n"),
        ("lib/b.py", "x = 1\n"),
        ("lib/c.py", "y = 2\n"),
    ]);
    let before = snapshot(tmp.path());

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "lib/b.py", "lib/c.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("destination already exists"));

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn rename_of_missing_source_fails_without_changes() {
    let tmp = project(&[("a.py", "import b\n")]);
    let before = snapshot(tmp.path());

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "b.py", "c.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("source does not exist"));

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn rename_outside_root_is_refused() {
    let tmp = project(&[("a.py", "")]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "a.py", "../escaped.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the scanned root"));

    assert!(tmp.path().join("a.py").is_file());
}

#[test]
fn dry_run_flags_relative_imports_of_the_moved_file() {
    let tmp = project_copy("python/simple_project");
    let before = snapshot(tmp.path());

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "pkg/core.py", "pkg/sub/core2.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "line 1: .util [moved file] needs manual review",
        ))
        .stdout(predicate::str::contains("pkg/sub/leaf.py"))
        .stdout(predicate::str::contains("Needs manual review (1):\n  pkg/core.py\n"));

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn semicolon_joined_import_is_rewritten() {
    let tmp = project(&[
        ("lib/a.py", "import lib.b; lib.b.run()\n"),
        ("lib/b.py", "def run():\n    pass\n"),
    ]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["rename", "lib/b.py", "lib/c.py", "--execute", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrote 1 reference(s) in 1 file(s)"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("lib/a.py")).unwrap(),
        "import lib.c; lib.b.run()\n"
    );
}
