//! Integration tests for the KeyStash CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password comes from `KEYSTASH_PASSWORD` and the store
//! root from `--root`, so nothing prompts.  `get` always uses `--show`
//! to stay away from the system clipboard.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "correct-horse";

/// Helper: get a Command pointing at the keystash binary.
fn keystash() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("keystash").expect("binary should exist")
}

/// Helper: a store root using the fast legacy KDF.
fn store_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("keystash.toml")
        .write_str("kdf = \"legacy-digest\"\n")
        .unwrap();
    tmp
}

/// Helper: a command bound to `root` with a fixed account and password.
fn run(root: &TempDir, password: &str) -> Command {
    let mut cmd = keystash();
    cmd.arg("--root")
        .arg(root.path())
        .env("USER", "tester")
        .env("KEYSTASH_PASSWORD", password)
        .env_remove("KEYSTASH_ROOT");
    cmd
}

fn init(root: &TempDir) {
    run(root, PASSWORD).arg("init").assert().success();
}

#[test]
fn help_flag_shows_usage() {
    keystash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("master password"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn no_args_shows_usage_error() {
    keystash()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_then_get_prints_value() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .args(["add", "github", "ghp_secret_token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry 'github' added"));

    run(&root, PASSWORD)
        .args(["get", "github", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghp_secret_token"));
}

#[test]
fn add_reads_piped_stdin() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .args(["add", "note"])
        .write_stdin("piped secret\n")
        .assert()
        .success();

    run(&root, PASSWORD)
        .args(["get", "note", "--show"])
        .assert()
        .success()
        .stdout("piped secret\n");
}

#[test]
fn add_rejects_empty_piped_value() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .args(["add", "note"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    run(&root, PASSWORD)
        .args(["get", "note", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn credential_prints_login_and_password() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .args(["add", "email", "hunter2", "--login", "user@example.com"])
        .assert()
        .success();

    run(&root, PASSWORD)
        .args(["get", "email", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user@example.com:hunter2"));
}

#[test]
fn wrong_password_is_rejected() {
    let root = store_root();
    init(&root);
    run(&root, PASSWORD)
        .args(["add", "github", "token"])
        .assert()
        .success();

    run(&root, "not-the-password")
        .args(["get", "github", "--show"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("token").not())
        .stderr(predicate::str::contains("Wrong master password"));
}

#[test]
fn commands_before_init_fail() {
    let root = store_root();
    run(&root, PASSWORD)
        .args(["get", "github", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn init_twice_requires_force() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    run(&root, PASSWORD)
        .args(["add", "github", "old-token"])
        .assert()
        .success();

    run(&root, "another-horse")
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 entry"));

    run(&root, "another-horse")
        .args(["add", "gitlab", "new-token"])
        .assert()
        .success();

    run(&root, "another-horse")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab"))
        .stdout(predicate::str::contains("github").not());

    run(&root, "another-horse")
        .args(["get", "github", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn init_rejects_short_password() {
    let root = store_root();
    run(&root, "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));
}

#[test]
fn edit_requires_existing_entry() {
    let root = store_root();
    init(&root);

    run(&root, PASSWORD)
        .args(["edit", "github", "new"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    run(&root, PASSWORD)
        .args(["add", "github", "old"])
        .assert()
        .success();
    run(&root, PASSWORD)
        .args(["edit", "github", "new"])
        .assert()
        .success();
    run(&root, PASSWORD)
        .args(["get", "github", "--show"])
        .assert()
        .success()
        .stdout("new\n");
}

#[test]
fn list_and_delete() {
    let root = store_root();
    init(&root);
    run(&root, PASSWORD)
        .args(["add", "github", "a"])
        .assert()
        .success();
    run(&root, PASSWORD)
        .args(["add", "email", "b"])
        .assert()
        .success();

    run(&root, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains("email"));

    run(&root, PASSWORD)
        .args(["delete", "github", "--force"])
        .assert()
        .success();

    run(&root, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github").not())
        .stdout(predicate::str::contains("email"));

    run(&root, PASSWORD)
        .args(["get", "github", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn accounts_get_separate_store_directories() {
    let root = store_root();
    init(&root);
    run(&root, PASSWORD)
        .args(["add", "github", "mine"])
        .assert()
        .success();

    run(&root, PASSWORD)
        .env("USER", "someone-else")
        .args(["get", "github", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn completions_for_bash() {
    keystash()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keystash"));
}

#[test]
fn completions_rejects_unknown_shell() {
    keystash()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
