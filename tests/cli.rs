use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path());
    cmd
}

fn transactions_file(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("transactions.csv")
}

fn add_expense(dir: &TempDir, description: &str, sum: &str, category: &str, date: &str) {
    fintrack(dir)
        .args([
            "add",
            "--description",
            description,
            "--sum",
            sum,
            "--date",
            date,
            "--expense",
            "--category",
            category,
        ])
        .assert()
        .success();
}

fn add_income(dir: &TempDir, description: &str, sum: &str, source: &str, date: &str) {
    fintrack(dir)
        .args([
            "add",
            "--description",
            description,
            "--sum",
            sum,
            "--date",
            date,
            "--income",
            "--source",
            source,
        ])
        .assert()
        .success();
}

fn seed(dir: &TempDir) {
    add_expense(dir, "groceries", "100", "food", "2024-01-05");
    add_income(dir, "salary", "500", "job", "2024-01-10");
    add_expense(dir, "bus pass", "50", "transport", "2024-02-01");
}

#[test]
fn add_then_view_lists_the_transaction() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "Lunch", "12.50", "food", "2024-03-01");

    fintrack(&dir)
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("$12.50"));

    let content = fs::read_to_string(transactions_file(&dir)).unwrap();
    assert_eq!(
        content,
        "id;type;description;amount;category;source;date\n\
         1;expense;Lunch;12.50;food;;2024-03-01 00:00:00\n"
    );
}

#[test]
fn add_prints_canonical_record() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "add",
            "--description",
            "salary",
            "--sum",
            "500",
            "--date",
            "2024-01-10",
            "--income",
            "--source",
            "job",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added #1 <Income: salary, 500.00, Source: job, Date: 2024-01-10>",
        ));
}

#[test]
fn add_rejects_extra_decimals() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "add",
            "--description",
            "Lunch",
            "--sum",
            "10.999",
            "--expense",
            "--category",
            "food",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    assert!(!transactions_file(&dir).exists());
}

#[test]
fn add_without_category_fails() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["add", "--description", "Lunch", "--sum", "12", "--expense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert!(!transactions_file(&dir).exists());
}

#[test]
fn add_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "add",
            "--description",
            "Refund",
            "--sum",
            "-5",
            "--income",
            "--source",
            "shop",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn add_requires_exactly_one_kind() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "add",
            "--description",
            "x",
            "--sum",
            "1",
            "--expense",
            "--income",
            "--category",
            "c",
        ])
        .assert()
        .failure();

    fintrack(&dir)
        .args(["add", "--description", "x", "--sum", "1"])
        .assert()
        .failure();
}

#[test]
fn view_filters_by_date_range() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    fintrack(&dir)
        .args(["view", "--from", "2024-01-01", "--to", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("groceries"))
        .stdout(predicate::str::contains("salary"))
        .stdout(predicate::str::contains("bus pass").not());

    fintrack(&dir)
        .args(["view", "--since", "2024-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bus pass"))
        .stdout(predicate::str::contains("groceries").not());
}

#[test]
fn view_rejects_malformed_date() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    fintrack(&dir)
        .args(["view", "--since", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn view_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["view", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("after end date"));
}

#[test]
fn view_empty_store() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn category_report_writes_output_file() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("report.csv");

    fintrack(&dir)
        .args(["report", "category", "--from", "2024-01-01", "--to", "2024-01-31", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("transport").not());

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "category;total_amount\nfood;100.00\n");
}

#[test]
fn source_report_without_data() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "groceries", "100", "food", "2024-01-05");

    fintrack(&dir)
        .args(["report", "source"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data"));
}

#[test]
fn summary_report_over_everything() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    fintrack(&dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$500.00"))
        .stdout(predicate::str::contains("$150.00"))
        .stdout(predicate::str::contains("$350.00"));
}

#[test]
fn report_export_failure_still_shows_report() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("missing").join("report.csv");

    fintrack(&dir)
        .args(["report", "summary", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("$350.00"))
        .stderr(predicate::str::contains("Export error"));
}

#[test]
fn delete_by_id_and_position() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    fintrack(&dir)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction #2"));

    fintrack(&dir)
        .args(["delete", "--position", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction #1"));

    let content = fs::read_to_string(transactions_file(&dir)).unwrap();
    assert!(content.contains("bus pass"));
    assert!(!content.contains("groceries"));
    assert!(!content.contains("salary"));
}

#[test]
fn delete_unknown_id_fails_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let before = fs::read_to_string(transactions_file(&dir)).unwrap();

    fintrack(&dir)
        .args(["delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    fintrack(&dir)
        .args(["delete", "--position", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    let after = fs::read_to_string(transactions_file(&dir)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    fintrack(&dir).args(["delete", "3"]).assert().success();
    add_expense(&dir, "coffee", "3", "food", "2024-02-02");

    let content = fs::read_to_string(transactions_file(&dir)).unwrap();
    assert!(content.contains("4;expense;coffee;3.00;food;;2024-02-02 00:00:00"));
}

#[test]
fn corrupt_store_degrades_reads_and_blocks_writes() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    let corrupt = "id;type;description;amount;category;source;date\nnot;a;valid;row\n";
    fs::write(transactions_file(&dir), corrupt).unwrap();

    fintrack(&dir)
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    fintrack(&dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00"));

    fintrack(&dir)
        .args([
            "add",
            "--description",
            "x",
            "--sum",
            "1",
            "--expense",
            "--category",
            "c",
        ])
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(transactions_file(&dir)).unwrap(), corrupt);
}

#[test]
fn history_lists_changes() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    fintrack(&dir).args(["delete", "1"]).assert().success();

    fintrack(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE #3"))
        .stdout(predicate::str::contains("DELETE #1"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("transactions.csv"));
}

#[test]
fn config_init_writes_settings_once() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("config.json");

    fintrack(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    let content = fs::read_to_string(&settings).unwrap();
    assert!(content.contains("\"delimiter\": \";\""));

    fintrack(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn unusable_delimiter_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"delimiter": "\""}"#).unwrap();

    fintrack(&dir)
        .arg("view")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
