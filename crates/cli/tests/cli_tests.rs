//! Tests for the `groupthink` binary.
//!
//! Every test points the binary at temporary storage and bin roots and an
//! empty settings file, so nothing outside the temporary directory is read
//! or written.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn storage(&self) -> PathBuf {
        self.path("storage")
    }

    fn bin(&self) -> PathBuf {
        self.path("bin")
    }

    /// Lays out an installed bundle without cloning anything.
    fn fake_install(&self, alias: &str) {
        fs::create_dir_all(self.storage().join(format!("{alias}-cli"))).unwrap();
        fs::create_dir_all(self.bin()).unwrap();
        fs::write(self.bin().join(alias), "#!/bin/sh\n").unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("groupthink").unwrap();
        cmd.arg("--storage")
            .arg(self.storage())
            .arg("--dest")
            .arg(self.bin())
            .arg("--config")
            .arg(self.path("config.yml"))
            .env_remove("RUST_LOG");
        cmd
    }
}

fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("groupthink").unwrap();
    cmd.arg("--help");
    cmd.assert().success().stdout(
        predicate::str::contains("install")
            .and(predicate::str::contains("uninstall"))
            .and(predicate::str::contains("upgrade")),
    );
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("groupthink").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("You haven't installed any scripts."));
}

#[test]
fn test_list_sorted() {
    let sandbox = Sandbox::new();
    sandbox.fake_install("zeta");
    sandbox.fake_install("alpha");
    fs::create_dir_all(sandbox.storage().join("notes")).unwrap();

    sandbox
        .command()
        .arg("installed")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("  - alpha\n  - zeta\n")
                .and(predicate::str::contains("notes").not()),
        );
}

#[test]
fn test_uninstall() {
    let sandbox = Sandbox::new();
    sandbox.fake_install("dcgov");

    sandbox
        .command()
        .args(["uninstall", "dcgov"])
        .assert()
        .success()
        .stdout("Removed dcgov command.\n");

    assert!(!exists(&sandbox.storage().join("dcgov-cli")));
    assert!(!exists(&sandbox.bin().join("dcgov")));

    sandbox
        .command()
        .args(["uninstall", "dcgov"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("`dcgov` command not installed.")
                .and(predicate::str::contains("groupthink install dcgov")),
        );
}

#[test]
fn test_uninstall_suggests_close_name() {
    let sandbox = Sandbox::new();
    sandbox.fake_install("dcgov");

    sandbox
        .command()
        .args(["uninstall", "dcg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Did you mean `dcgov`?"));

    assert!(exists(&sandbox.storage().join("dcgov-cli")));
}

#[test]
fn test_install_already_installed() {
    let sandbox = Sandbox::new();
    sandbox.fake_install("dcgov");

    sandbox
        .command()
        .args(["install", "dcgov", "--no-probe"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("already installed")
                .and(predicate::str::contains("groupthink update dcgov")),
        );
}

#[test]
fn test_install_name_collision() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.bin()).unwrap();
    fs::write(sandbox.bin().join("ls"), "unrelated").unwrap();

    sandbox
        .command()
        .args(["install", "ls", "--no-probe"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("groupthink install ls --alias <alias>"));

    assert_eq!(fs::read_to_string(sandbox.bin().join("ls")).unwrap(), "unrelated");
}

#[test]
fn test_install_invalid_alias() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .args(["install", "dcgov", "--alias", "../escape"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path separator"));

    assert!(!exists(&sandbox.storage()));
}

#[test]
fn test_install_missing_remote_fails() {
    let sandbox = Sandbox::new();
    let host = format!("file://{}", sandbox.path("remotes").display());

    sandbox
        .command()
        .args(["install", "ghost", "--host", &host])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));

    assert!(!exists(&sandbox.bin().join("ghost")));
    assert!(!exists(&sandbox.storage().join("ghost-cli")));
}

#[test]
fn test_update_and_upgrade_with_nothing_installed() {
    let sandbox = Sandbox::new();

    for subcommand in ["update", "upgrade"] {
        sandbox
            .command()
            .arg(subcommand)
            .assert()
            .success()
            .stdout(predicate::str::contains("You haven't installed any scripts."));
    }
}

#[test]
fn test_update_not_installed() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .args(["update", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("`ghost` command not installed."));
}

#[test]
fn test_missing_explicit_settings_file() {
    let sandbox = Sandbox::new();

    let mut cmd = Command::cargo_bin("groupthink").unwrap();
    cmd.arg("--config")
        .arg(sandbox.path("missing.yml"))
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.yml"));
}

#[test]
fn test_settings_file_sets_storage() {
    let sandbox = Sandbox::new();
    sandbox.fake_install("from-settings");
    fs::write(
        sandbox.path("settings.yml"),
        format!("storage: {}\n", sandbox.storage().display()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("groupthink").unwrap();
    cmd.arg("--config")
        .arg(sandbox.path("settings.yml"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - from-settings"));
}

#[test]
fn test_update_all_names_each_failing_bundle() {
    let sandbox = Sandbox::new();
    // Plain directories, not working copies, so every fetch fails
    sandbox.fake_install("alpha");
    sandbox.fake_install("zeta");

    sandbox
        .command()
        .arg("update")
        .env("GIT_CEILING_DIRECTORIES", sandbox.dir.path())
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("alpha: Error:")
                .and(predicate::str::contains("zeta: Error:")),
        );
}
