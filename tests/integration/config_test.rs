use crate::project;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    // No config file present; shows all defaults
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("modshift").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings (all defaults):"))
        .stdout(predicate::str::contains("defaults.extension: py <- default"))
        .stdout(predicate::str::contains("defaults.quiet: false <- default"))
        .stdout(predicate::str::contains(
            "defaults.output: dependency_graph.json <- default",
        ))
        .stdout(predicate::str::contains(
            "targeting.respect_gitignore: false <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".modshift.toml"),
        r#"
[defaults]
extension = ".src"
quiet = true

[targeting]
exclude = ["vendor/**"]
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("modshift").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files:"))
        .stdout(predicate::str::contains(".modshift.toml"))
        .stdout(predicate::str::contains(
            "defaults.extension: src <- project config",
        ))
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- project config",
        ))
        .stdout(predicate::str::contains(
            "targeting.exclude: vendor/** <- project config",
        ));
}

#[test]
fn config_show_env_var_overrides_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".modshift.toml"),
        "[defaults]\nextension = \"src\"\n",
    )
    .unwrap();

    Command::cargo_bin("modshift")
        .unwrap()
        .env("MODSHIFT_EXT", "pyi")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.extension: pyi <- env var (MODSHIFT_EXT)",
        ));
}

#[test]
fn config_invalid_toml_error() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".modshift.toml"), "this is not valid toml [[[").unwrap();

    let mut cmd = Command::cargo_bin("modshift").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}

#[test]
fn project_config_extension_drives_graph_commands() {
    let tmp = project(&[
        (".modshift.toml", "[defaults]\nextension = \"src\"\n"),
        ("lib/a.src", "from lib.b import x\n"),
        ("lib/b.src", ""),
        ("lib/ignored.py", "from lib.b import x\n"),
    ]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.src", "lib/c.src", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Impacted files (1):\n  lib/a.src\n"));
}

#[test]
fn modshiftignore_excludes_files() {
    let tmp = project(&[
        (".modshiftignore", "# generated code\ngenerated/**\n"),
        ("lib/a.py", "from lib.b import x\n"),
        ("lib/b.py", ""),
        ("generated/stub.py", "from lib.b import x\n"),
    ]);

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["check-rename", "lib/b.py", "lib/c.py", "--quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Impacted files (1):\n  lib/a.py\n"));
}

#[test]
fn config_show_reports_cli_flags() {
    let tmp = tempfile::tempdir().unwrap();

    Command::cargo_bin("modshift")
        .unwrap()
        .args(["config", "show", "--ext", ".src", "--exclude-dir", "fixtures", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.extension: src <- CLI flag (--ext)",
        ))
        .stdout(predicate::str::contains("fixtures <- CLI flag (--exclude-dir)"));
}
