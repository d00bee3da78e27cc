use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budgetview(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetview").unwrap();
    cmd.env("BUDGETVIEW_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn seed(dir: &TempDir) {
    budgetview(dir).arg("init").assert().success();
    budgetview(dir)
        .args(["balance", "set", "100"])
        .assert()
        .success();
    budgetview(dir)
        .args(["txn", "add", "Salary", "2000", "--income", "--date", "2025-03-01"])
        .assert()
        .success();
    budgetview(dir)
        .args(["txn", "add", "Groceries", "150.25", "-c", "food", "-d", "2025-03-05"])
        .assert()
        .success();
    budgetview(dir)
        .args(["txn", "add", "Bus pass", "60", "-c", "Transportation", "-d", "2025-03-07"])
        .assert()
        .success();
}

#[test]
fn test_init_creates_settings() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized BudgetView"));
    assert!(dir.path().join("config.json").exists());

    budgetview(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_add_and_summarize() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    budgetview(&dir)
        .args(["summary", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard - 2025-03"))
        .stdout(predicate::str::contains("$2000.00"))
        .stdout(predicate::str::contains("$210.25"))
        .stdout(predicate::str::contains("$1789.75"))
        .stdout(predicate::str::contains("$1889.75"));

    budgetview(&dir)
        .args(["summary", "--period", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1889.75"))
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_list_and_delete_transaction() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let output = budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus pass"))
        .stdout(predicate::str::contains("Net (3 entries):"))
        .get_output()
        .stdout
        .clone();
    let listing = String::from_utf8(output).unwrap();

    // Newest first, so the first row is the bus pass
    let short_id = listing
        .lines()
        .find(|l| l.contains("Bus pass"))
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap()
        .to_string();
    assert!(short_id.starts_with("txn-"));

    budgetview(&dir)
        .args(["txn", "delete", &short_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus pass").not());

    budgetview(&dir)
        .args(["txn", "delete", &short_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn test_add_rejects_invalid_input() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .args(["txn", "add", "Lunch", "0", "-c", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    budgetview(&dir)
        .args(["txn", "add", "Lunch", "12", "-c", "gadgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: gadgets"));

    budgetview(&dir)
        .args(["txn", "add", "Lunch", "12"])
        .assert()
        .failure();
}

#[test]
fn test_goals_and_progress() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    budgetview(&dir)
        .args(["goal", "set", "food", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining goal: $0.00 -> $200.00"));
    budgetview(&dir)
        .args(["goal", "set", "transport", "50"])
        .assert()
        .success();

    budgetview(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$250.00"));

    budgetview(&dir)
        .args(["progress", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$49.75 left"))
        .stdout(predicate::str::contains("over $10.00"))
        .stdout(predicate::str::contains("1 category is over budget."));

    budgetview(&dir)
        .args(["categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$200.00"))
        .stdout(predicate::str::contains("Health & Wellness"));
}

#[test]
fn test_breakdown_csv_export() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("breakdown.csv");

    budgetview(&dir)
        .args(["breakdown", "-p", "2025-03", "-o"])
        .arg(&output)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Period,Category,Amount,Transaction Count,Percentage\n"));
    assert!(csv.contains("2025-03,Food & Dining,150.25,1,71.46\n"));
}

#[test]
fn test_tips_without_data() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .arg("tips")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not enough data provided."));
}

#[test]
fn test_tips_with_saved_response() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    budgetview(&dir)
        .args(["tips", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Total Income:** $2000.00"));

    let reply = dir.path().join("reply.json");
    std::fs::write(&reply, r#"{"savings_suggestions": ["Cook at home"]}"#).unwrap();
    budgetview(&dir)
        .args(["tips", "-p", "2025-03", "--response"])
        .arg(&reply)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Cook at home"))
        .stdout(predicate::str::contains("No specific advice generated"));
}

#[test]
fn test_export_and_verify() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("ledger.json");

    budgetview(&dir)
        .args(["export", "all", "--pretty"])
        .arg(&output)
        .assert()
        .success();

    budgetview(&dir)
        .args(["export", "verify"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:   3"));

    std::fs::write(&output, "{}").unwrap();
    budgetview(&dir)
        .args(["export", "verify"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));
}

#[test]
fn test_mutations_are_audited() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let log = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("\"starting_balance\""));
    assert!(lines[3].contains("Bus pass"));
}

#[test]
fn test_cloud_backend_requires_user() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .args(["config", "--backend", "cloud"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend:       cloud"));

    budgetview(&dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cloud-user"));

    budgetview(&dir)
        .args(["config", "--cloud-user", "alice"])
        .assert()
        .success();
    budgetview(&dir)
        .args(["txn", "add", "Coffee", "4.50", "-c", "food", "-d", "2025-03-02"])
        .assert()
        .success();
    budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));

    assert!(dir.path().join("cloud/users/alice/transactions").is_dir());
    assert!(!dir.path().join("data/transactions.json").exists());
}

#[test]
fn test_invalid_date_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    budgetview(&dir)
        .args(["config", "--date-format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format '%Q'"));

    budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-07"));

    // A hand-edited settings file falls back to the default format
    std::fs::write(dir.path().join("config.json"), r#"{"date_format": "%Q"}"#).unwrap();
    budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-07"));
}

#[test]
fn test_show_uses_configured_date_format() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    budgetview(&dir)
        .args(["config", "--date-format", "%d/%m/%Y"])
        .assert()
        .success();

    let output = budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("07/03/2025"))
        .get_output()
        .stdout
        .clone();
    let listing = String::from_utf8(output).unwrap();
    let short_id = listing
        .lines()
        .find(|l| l.contains("Bus pass"))
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap()
        .to_string();

    budgetview(&dir)
        .args(["txn", "show", &short_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:        07/03/2025"));
}

#[test]
fn test_cloud_user_must_be_path_safe() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .args(["config", "--cloud-user", "Jo Smith"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid user id 'Jo Smith'"));

    budgetview(&dir)
        .args(["config", "--cloud-user", "jo.smith@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jo.smith@example.com"));
}

#[test]
fn test_tips_json_without_data() {
    let dir = TempDir::new().unwrap();

    let output = budgetview(&dir)
        .args(["tips", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let snapshot: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(snapshot["total_income"], 0);
    assert!(snapshot["expenses_by_category"].as_array().unwrap().is_empty());
}

#[test]
fn test_audit_command_shows_recent_entries() {
    let dir = TempDir::new().unwrap();

    budgetview(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries yet."));

    seed(&dir);
    budgetview(&dir)
        .args(["audit", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing the last 2 entries"))
        .stdout(predicate::str::contains("CREATE Transaction txn-"))
        .stdout(predicate::str::contains("(Bus pass)"))
        .stdout(predicate::str::contains("(Groceries)"))
        .stdout(predicate::str::contains("StartingBalance").not());
}

#[test]
fn test_export_restore() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("ledger.yaml");

    budgetview(&dir)
        .args(["export", "all", "--format", "yaml"])
        .arg(&output)
        .assert()
        .success();

    budgetview(&dir)
        .args(["txn", "add", "Cinema", "25", "-c", "other", "-d", "2025-03-09"])
        .assert()
        .success();
    budgetview(&dir)
        .args(["balance", "set", "500"])
        .assert()
        .success();

    budgetview(&dir)
        .args(["export", "restore"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added:           0"))
        .stdout(predicate::str::contains("Removed:         1"))
        .stdout(predicate::str::contains("Current balance: $1889.75"));

    budgetview(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cinema").not())
        .stdout(predicate::str::contains("Net (3 entries):"));

    budgetview(&dir)
        .args(["export", "restore"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
