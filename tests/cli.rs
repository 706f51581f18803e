use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budget(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget").unwrap();
    cmd.env("BUDGET_ENGINE_DATA_DIR", dir.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_category_list_seeds_defaults() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Dining Out"));

    assert!(dir.path().join("data").join("budget.json").exists());
}

#[test]
fn test_allocate_then_overview() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["allocate", "Groceries", "500", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Allocated $500.00 to Groceries for January 2025",
        ));

    budget(&dir)
        .args(["overview", "--period", "January 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Overview: January 2025"))
        .stdout(predicate::str::contains("$500.00"));
}

#[test]
fn test_next_copies_allocations_forward() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["allocate", "groceries", "500", "-p", "2025-01"])
        .assert()
        .success();
    budget(&dir)
        .args(["spend", "groceries", "120", "-p", "2025-01"])
        .assert()
        .success();

    budget(&dir)
        .args(["next", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Overview: February 2025"))
        .stdout(predicate::str::contains("$500.00"))
        .stdout(predicate::str::contains("$120.00").not());
}

#[test]
fn test_negative_spend_counts_as_spending() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["allocate", "Groceries", "100", "-p", "2025-03"])
        .assert()
        .success();

    budget(&dir)
        .args(["spend", "Groceries", "-45", "-d", "store", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded $45.00 spent on Groceries"))
        .stdout(predicate::str::contains("Remaining $55.00"));
}

#[test]
fn test_invalid_inputs_fail() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["allocate", "Groceries", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid"));

    budget(&dir)
        .args(["overview", "--period", "Smarch 2025"])
        .assert()
        .failure();

    budget(&dir)
        .args(["allocate", "Yachts", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found"));
}

#[test]
fn test_category_lifecycle() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .args(["category", "add", "Pets", "--icon", "heart", "--color", "#f97316"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Pets"));

    budget(&dir)
        .args(["category", "add", "pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    budget(&dir)
        .args(["category", "edit", "Pets", "--name", "Pet Care"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Pet Care"));

    budget(&dir)
        .args(["category", "delete", "Pet Care"])
        .assert()
        .success();

    budget(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pet Care").not());
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    budget(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("budget.json"))
        .stdout(predicate::str::contains("Copy-forward lookback: 12 months"));
}
