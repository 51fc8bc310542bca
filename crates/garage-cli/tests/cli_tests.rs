use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with plain output, a throwaway
/// database and no user configuration
fn garage_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("garage").expect("Failed to find garage binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("cli_test.db"))
        .arg("--config-file")
        .arg(temp_dir.path().join("config.json"));
    cmd
}

fn seeded_environment() -> TempDir {
    let temp_dir = create_cli_test_environment();
    garage_cmd(&temp_dir)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 6 demo orders"));
    temp_dir
}

#[test]
fn test_cli_empty_board() {
    let temp_dir = create_cli_test_environment();

    garage_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No orders found."));
}

#[test]
fn test_cli_create_order_success() {
    let temp_dir = create_cli_test_environment();

    garage_cmd(&temp_dir)
        .args([
            "order",
            "create",
            "Oil Change",
            "--customer",
            "John Smith",
            "--make",
            "Toyota",
            "--model",
            "Camry",
            "--year",
            "2019",
            "--assign",
            "Mike Johnson",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: New order created"))
        .stdout(predicate::str::contains("Created order with ID: order-1"))
        .stdout(predicate::str::contains("- Assigned: Mike Johnson (MJ)"));
}

#[test]
fn test_cli_create_order_validation_failure() {
    let temp_dir = create_cli_test_environment();

    garage_cmd(&temp_dir)
        .args([
            "order", "create", "Oi", "--customer", "John Smith", "--make", "Toyota", "--model",
            "Camry", "--year", "1700",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "- title: Title must be at least 3 characters",
        ))
        .stdout(predicate::str::contains(
            "- vehicle.year: Year must be between 1886 and 2100",
        ));

    garage_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No orders found."));
}

#[test]
fn test_cli_board_lists_columns() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Pending (2)"))
        .stdout(predicate::str::contains("## In Progress (2)"))
        .stdout(predicate::str::contains("## Completed (2)"));
}

#[test]
fn test_cli_board_search() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["board", "--search", "HONDA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brake Replacement"))
        .stdout(predicate::str::contains("Oil Change").not());
}

#[test]
fn test_cli_board_my_orders() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["board", "--filter", "my", "--me", "Mike Johnson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oil Change"))
        .stdout(predicate::str::contains("Brake Replacement"))
        .stdout(predicate::str::contains("Tire Rotation").not());
}

#[test]
fn test_cli_move_order() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["order", "move", "order-3", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Order status updated to Completed",
        ))
        .stdout(predicate::str::contains(
            "Pending: 1 | In Progress: 2 | Completed: 3",
        ));

    garage_cmd(&temp_dir)
        .args(["order", "show", "order-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "### order-3. Tire Rotation (✓ Completed)",
        ));
}

#[test]
fn test_cli_move_to_same_column_is_noop() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["order", "move", "order-1", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("order-1 is already Pending"))
        .stdout(predicate::str::contains("Success:").not());
}

#[test]
fn test_cli_move_unknown_order() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["order", "move", "order-99", "completed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Order with ID order-99 not found"));
}

#[test]
fn test_cli_update_order() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .args(["order", "update", "order-3", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated order with ID: order-3"))
        .stdout(predicate::str::contains("Changes made:"))
        .stdout(predicate::str::contains("- priority"));
}

#[test]
fn test_cli_shell_session() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .arg("shell")
        .write_stdin("move order-1 in-progress\nfilter due-today\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Order status updated to In Progress",
        ))
        .stdout(predicate::str::contains("No orders found."));
}

#[test]
fn test_cli_shell_drop_reorders_within_column() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .arg("shell")
        .write_stdin("drop order-3 pending before order-1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reordered order-3 within Pending"))
        .stdout(
            predicate::str::is_match(
                r"Reordered order-3 within Pending[\s\S]*Tire Rotation[\s\S]*Oil Change",
            )
            .unwrap(),
        )
        .stdout(predicate::str::contains("Success:").not());
}

#[test]
fn test_cli_shell_drop_on_other_column_moves() {
    let temp_dir = seeded_environment();

    garage_cmd(&temp_dir)
        .arg("shell")
        .write_stdin("drop order-1 completed\ndrop order-1 completed before order-1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Order status updated to Completed",
        ))
        .stdout(predicate::str::contains(
            "Pending: 1 | In Progress: 2 | Completed: 3",
        ))
        .stdout(predicate::str::contains("order-1 is already Completed"));
}
