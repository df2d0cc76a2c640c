//! Integration tests for the `buildstrap` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the buildstrap binary running inside `dir`, isolated from any user
/// template directory.
fn buildstrap_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("buildstrap").expect("binary is built");
    cmd.current_dir(dir.path())
        .env("BUILDSTRAP_CONFIG", dir.path().join("templates"))
        .env_remove("BUILDSTRAP_BUILDOUT")
        .env_remove("BUILDSTRAP_LOG");
    cmd
}

fn temp() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

const SHOW_MIN: &str = "\
[buildout]
newest = false
parts = buildstrap
package = buildstrap
extensions = gp.vcsdevelop
develop = .
eggs-directory = ${buildout:directory}/var/eggs
develop-eggs-directory = ${buildout:directory}/var/develop-eggs
parts-directory = ${buildout:directory}/var/parts
develop-dir = ${buildout:directory}/var/develop
bin-directory = ${buildout:directory}/bin
requirements = ${buildout:develop}/requirements.txt

[buildstrap]
recipe = zc.recipe.egg
eggs = ${buildstrap-pip:eggs}
\tbuildstrap

[buildstrap-pip]
recipe = collective.recipe.pip
configs = ${buildout:develop}/requirements.txt

";

// === show ===

#[test]
fn test_show_min() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["show", "buildstrap", "requirements.txt"])
        .assert()
        .success()
        .stdout(SHOW_MIN);

    assert!(!dir.path().join("buildout.cfg").exists());
}

#[test]
fn test_show_min_path() {
    let dir = temp();

    buildstrap_in(&dir)
        .args([
            "show", "-r", "/root", "-s", "/src", "-e", "/env", "-b", "/bin", "buildstrap",
            "requirements.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "\
[buildout]
newest = false
parts = buildstrap
package = buildstrap
extensions = gp.vcsdevelop
directory = /root
develop = /src
eggs-directory = /env/eggs
develop-eggs-directory = /env/develop-eggs
parts-directory = /env/parts
develop-dir = /env/develop
bin-directory = /bin
requirements = ${buildout:develop}/requirements.txt

",
        ));
}

#[test]
fn test_show_targets_parts_and_interpreter() {
    let dir = temp();

    buildstrap_in(&dir)
        .args([
            "show",
            "-i",
            "python3",
            "-p",
            "sphinx",
            "buildstrap",
            "requirements.txt,requirements-dev.txt",
            "test=requirements-test.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "parts = buildstrap\n\ttest\n\tsphinx\n",
        ))
        .stdout(predicate::str::contains(
            "requirements = ${buildout:develop}/requirements.txt\n\t${buildout:develop}/requirements-dev.txt\n",
        ))
        .stdout(predicate::str::contains(
            "[test]\nrecipe = zc.recipe.egg\neggs = ${test-pip:eggs}\ninterpreter = python3\n\n",
        ))
        .stdout(predicate::str::contains(
            "[sphinx]\nrecipe = collective.recipe.sphinxbuilder\neggs = ${buildstrap-pip:eggs}\n\tbuildstrap\ninterpreter = python3\nsource = ${buildout:directory}/doc\nbuild = ${buildout:directory}/doc/_build\n\n",
        ));
}

#[test]
fn test_show_with_user_template() {
    let dir = temp();
    fs::create_dir(dir.path().join("templates")).expect("create template dir");
    fs::write(
        dir.path().join("templates/lint.cfg"),
        "[lint]\nrecipe = zc.recipe.egg\nscripts = flake8\n",
    )
    .expect("write template");

    buildstrap_in(&dir)
        .args(["show", "-p", "lint", "app", "requirements.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[lint]\nrecipe = zc.recipe.egg\neggs = ${app-pip:eggs}\n\tapp\nscripts = flake8\n\n",
        ));
}

// === generate ===

#[test]
fn test_generate_writes_default_output() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["buildstrap", "requirements.txt"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(dir.path().join("buildout.cfg")).expect("output written");
    assert_eq!(written, SHOW_MIN);
}

#[test]
fn test_generate_subcommand_custom_output() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["generate", "-o", "custom.cfg", "buildstrap", "requirements.txt"])
        .assert()
        .success();

    assert!(dir.path().join("custom.cfg").exists());
    assert!(!dir.path().join("buildout.cfg").exists());
}

#[test]
fn test_generate_refuses_existing_file() {
    let dir = temp();
    let output = dir.path().join("buildout.cfg");
    fs::write(&output, "keep").expect("seed output");

    buildstrap_in(&dir)
        .args(["buildstrap", "requirements.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file already exists"));

    assert_eq!(fs::read_to_string(&output).expect("readable"), "keep");
}

#[test]
fn test_generate_force_overwrites() {
    let dir = temp();
    let output = dir.path().join("buildout.cfg");
    fs::write(&output, "old").expect("seed output");

    buildstrap_in(&dir)
        .args(["-f", "buildstrap", "requirements.txt"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("readable"), SHOW_MIN);
}

#[test]
fn test_generate_to_stdout() {
    let dir = temp();
    fs::write(dir.path().join("buildout.cfg"), "keep").expect("seed output");

    buildstrap_in(&dir)
        .args(["-o", "-", "buildstrap", "requirements.txt"])
        .assert()
        .success()
        .stdout(SHOW_MIN);
}

// === errors ===

#[test]
fn test_empty_requirements_fails() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["app", ","])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Fatal error: no requirements file given for target `app`",
        ));

    assert!(!dir.path().join("buildout.cfg").exists());
}

#[test]
fn test_unknown_template_fails() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["-p", "nope", "app", "requirements.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template part `nope` not found"));
}

#[test]
fn test_verbose_failure_prints_details() {
    let dir = temp();
    fs::create_dir(dir.path().join("templates")).expect("create template dir");
    fs::write(dir.path().join("templates/bad.cfg"), "[bad]\nno delimiter\n")
        .expect("write template");

    buildstrap_in(&dir)
        .args(["-v", "-p", "bad", "app", "requirements.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fatal error: failed to parse"))
        .stderr(predicate::str::contains(
            "caused by: line 2: expected `key = value`",
        ));
}

// === debug ===

#[test]
fn test_debug_prints_model() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["debug", "buildstrap", "requirements.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Buildout {"))
        .stdout(predicate::str::contains("\"buildstrap-pip\""));
}

// === run ===

#[cfg(unix)]
#[test]
fn test_run_invokes_buildout() {
    let dir = temp();

    buildstrap_in(&dir)
        .env("BUILDSTRAP_BUILDOUT", "true")
        .args(["run", "buildstrap", "requirements.txt"])
        .assert()
        .success();

    assert!(dir.path().join("buildout.cfg").exists());
}

#[cfg(unix)]
#[test]
fn test_run_propagates_buildout_failure() {
    let dir = temp();

    buildstrap_in(&dir)
        .args(["run", "--buildout", "false", "buildstrap", "requirements.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`false` exited with"));
}

// === templates ===

#[test]
fn test_templates_lists_builtin() {
    let dir = temp();

    buildstrap_in(&dir)
        .arg("templates")
        .assert()
        .success()
        .stdout("pytest\nsphinx\n");
}
