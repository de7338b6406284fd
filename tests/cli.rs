//! End-to-end tests for the `mybudget` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mybudget(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mybudget").unwrap();
    cmd.env("MYBUDGET_DATA_DIR", data_dir.path())
        .env_remove("MYBUDGET_HOST")
        .env_remove("MYBUDGET_PORT")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_init_registers_admin() {
    let data_dir = TempDir::new().unwrap();

    mybudget(&data_dir)
        .args(["init", "--admin", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered admin user: root"))
        .stdout(predicate::str::contains("Token:"));

    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("users.json").exists());

    mybudget(&data_dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    mybudget(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:3000"))
        .stdout(predicate::str::contains("Initialized:    no"));

    mybudget(&data_dir).arg("init").assert().success();

    mybudget(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:    yes"));
}

#[test]
fn test_budget_lifecycle() {
    let data_dir = TempDir::new().unwrap();

    mybudget(&data_dir).arg("init").assert().success();
    mybudget(&data_dir)
        .args(["user", "add", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token:"));

    mybudget(&data_dir)
        .args([
            "budget",
            "create",
            "alice",
            "Groceries",
            "--init-amount",
            "100.00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created budget #1 for alice"));

    mybudget(&data_dir)
        .args(["budget", "list", "--owner", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("$100.00"));

    mybudget(&data_dir)
        .args(["budget", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,ownerId,name,"));

    mybudget(&data_dir)
        .args(["budget", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget #1: Groceries"))
        .stdout(predicate::str::contains("Owner:          alice"));

    mybudget(&data_dir)
        .args(["budget", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted budget #1"));

    mybudget(&data_dir)
        .args(["budget", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget not found: 1"));

    mybudget(&data_dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Budget 1"))
        .stdout(predicate::str::contains("DELETE Budget 1"));
}

#[test]
fn test_create_for_unknown_user_fails() {
    let data_dir = TempDir::new().unwrap();
    mybudget(&data_dir).arg("init").assert().success();

    mybudget(&data_dir)
        .args(["budget", "create", "nobody", "Rent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: nobody"));
}

#[test]
fn test_negative_amount_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    mybudget(&data_dir).arg("init").assert().success();
    mybudget(&data_dir).args(["user", "add", "alice"]).assert().success();

    mybudget(&data_dir)
        .args(["budget", "create", "alice", "Rent", "--balance=-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("balance: must not be negative"));
}

#[test]
fn test_duplicate_user_fails() {
    let data_dir = TempDir::new().unwrap();
    mybudget(&data_dir).args(["user", "add", "alice"]).assert().success();

    mybudget(&data_dir)
        .args(["user", "add", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
