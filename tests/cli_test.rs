//! Integration tests for the graft binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Work dir with `features/` holding base, docker and ci; docker and ci both
/// provide `x.txt`.
fn setup_catalog() -> TempDir {
    let temp = TempDir::new().unwrap();
    let features = temp.path().join("features");
    for (path, content) in [
        ("base/README.md", "# New project\n"),
        ("base/.gitignore", "target/\n"),
        ("docker/Dockerfile", "FROM rust:1\n"),
        ("docker/x.txt", "docker\n"),
        ("ci/.github/workflows/ci.yml", "on: push\n"),
        ("ci/x.txt", "ci\n"),
    ] {
        write(&features.join(path), content);
    }
    temp
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn graft(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("graft"));
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".xdg"))
        .env_remove("GRAFT_PROMPT_FEATURES")
        .env_remove("GRAFT_PROMPT_TARGET")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("graft"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compose a project"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("graft"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_shows_features() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("docker"))
        .stdout(predicate::str::contains("ci"))
        .stdout(predicate::str::contains("base is always applied"));
    Ok(())
}

#[test]
fn cli_list_json_with_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    let output = graft(&temp).args(["list", "--json", "--files"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["features"][0]["name"], "ci");
    assert_eq!(value["features"][1]["name"], "docker");
    assert_eq!(value["base"]["files"][0], ".gitignore");
    Ok(())
}

#[test]
fn cli_apply_selected_features() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--features", "docker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 file(s) written"));

    let out = temp.path().join("out");
    assert!(out.join("README.md").is_file());
    assert!(out.join(".gitignore").is_file());
    assert!(out.join("Dockerfile").is_file());
    assert!(!out.join(".github").exists());
    Ok(())
}

#[test]
fn cli_apply_all_later_feature_wins() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--all"])
        .assert()
        .success()
        .stderr(predicate::str::contains("x.txt"));

    let x = fs::read_to_string(temp.path().join("out").join("x.txt"))?;
    assert_eq!(x, "docker\n");
    Ok(())
}

#[test]
fn cli_apply_none_copies_base_only() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 file(s) written"));

    assert!(!temp.path().join("out").join("x.txt").exists());
    Ok(())
}

#[test]
fn cli_apply_rerun_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp).args(["apply", "out", "--all"]).assert().success();
    graft(&temp)
        .args(["apply", "out", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 file(s) written"))
        .stdout(predicate::str::contains("5 unchanged"));
    Ok(())
}

#[test]
fn cli_apply_keeps_unrelated_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    write(&temp.path().join("out").join("notes.txt"), "mine");

    graft(&temp).args(["apply", "out", "--all"]).assert().success();

    assert_eq!(fs::read_to_string(temp.path().join("out").join("notes.txt"))?, "mine");
    Ok(())
}

#[test]
fn cli_apply_without_selection_fails_non_interactive() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--non-interactive"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("features"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn cli_prompt_answer_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "--non-interactive"])
        .env("GRAFT_PROMPT_FEATURES", "2")
        .env("GRAFT_PROMPT_TARGET", "from-env")
        .assert()
        .success();

    assert!(temp.path().join("from-env").join("Dockerfile").is_file());
    Ok(())
}

#[test]
fn cli_no_subcommand_runs_apply() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .env("GRAFT_PROMPT_FEATURES", "none")
        .assert()
        .success();

    // The target defaults to the working directory.
    assert!(temp.path().join("README.md").is_file());
    Ok(())
}

#[test]
fn cli_apply_unknown_feature_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--features", "docker,kubernetes"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("unknown feature 'kubernetes'"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn cli_missing_catalog_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    graft(&temp)
        .args(["apply", "out", "--none"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Feature catalog not found"));
    Ok(())
}

#[test]
fn cli_collision_fail_policy() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--all", "--on-collision", "fail"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "File 'x.txt' is provided by both 'ci' and 'docker'",
        ));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn cli_collision_policy_from_settings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    fs::write(temp.path().join(".graft.yml"), "on_collision: fail\n")?;

    graft(&temp)
        .args(["apply", "out", "--all"])
        .assert()
        .code(3);

    graft(&temp)
        .args(["apply", "out", "--all", "--on-collision", "overwrite"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn cli_file_against_directory_is_a_collision() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    write(&temp.path().join("features/ci/docs"), "one page\n");
    write(&temp.path().join("features/docker/docs/index.md"), "# Docs\n");

    graft(&temp)
        .args(["apply", "out", "--all", "--on-collision", "fail"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File 'docs' is provided by both 'ci' and 'docker'"));
    assert!(!temp.path().join("out").exists());

    graft(&temp).args(["apply", "out", "--all"]).assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out").join("docs").join("index.md"))?,
        "# Docs\n"
    );
    Ok(())
}

#[test]
fn cli_list_skips_unselectable_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    write(&temp.path().join("features/2024/notes.md"), "old\n");

    graft(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("docker"))
        .stdout(predicate::str::contains("2024").not());
    Ok(())
}

#[test]
fn cli_catalog_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    fs::rename(temp.path().join("features"), temp.path().join("templates"))?;

    graft(&temp)
        .args(["--catalog", "templates", "apply", "out", "--none"])
        .assert()
        .success();

    assert!(temp.path().join("out").join("README.md").is_file());
    Ok(())
}

#[test]
fn cli_dry_run_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["apply", "out", "--all", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile (docker)"))
        .stdout(predicate::str::contains("5 file(s) would be written"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn cli_quiet_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["-q", "apply", "out", "--features", "ci"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_verbose_lists_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_catalog();
    graft(&temp)
        .args(["-v", "apply", "out", "--features", "ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ .github/workflows/ci.yml (ci)"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("graft"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("graft"));
    Ok(())
}
