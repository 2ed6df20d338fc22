use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rattendance::db::pool::DbPool;
use rattendance::db::queries::count_attendance;
use std::fs;
use std::path::Path;

mod common;
use common::{init_cli_db, picture_count, rti, setup_test_db, sheet_rows, temp_out, write_png};

#[test]
fn test_init_twice_keeps_single_defaults() {
    let db_path = setup_test_db("cli_init_twice");

    init_cli_db(&db_path);
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "supervisor", "list"])
        .assert()
        .success()
        .stdout(contains("Default Supervisor").count(1))
        .stdout(contains("supervisor@example.com"));

    rti()
        .args(["--db", &db_path, "shift", "list"])
        .assert()
        .success()
        .stdout(contains("Morning Shift").count(1))
        .stdout(contains("09:00").and(contains("17:00")));
}

#[test]
fn test_supervisor_commands() {
    let db_path = setup_test_db("cli_supervisors");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "supervisor", "add", "Ravi", "ravi@example.com"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "supervisor", "add", "Ravi", "again@example.com"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rti()
        .args([
            "--db",
            &db_path,
            "supervisor",
            "update",
            "Ravi",
            "Ravi Kumar",
            "rk@example.com",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "supervisor", "delete", "Nobody"])
        .assert()
        .success()
        .stdout(contains("No supervisor named 'Nobody'"));

    rti()
        .args(["--db", &db_path, "supervisor", "list"])
        .assert()
        .success()
        .stdout(contains("Ravi Kumar").and(contains("rk@example.com")));
}

#[test]
fn test_shift_commands() {
    let db_path = setup_test_db("cli_shifts");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "shift", "add", "Night", "21:00", "05:00"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "shift", "add", "Late", "9pm", "05:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    rti()
        .args(["--db", &db_path, "shift", "update", "Night", "22:00", "06:00"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "shift", "list"])
        .assert()
        .success()
        .stdout(contains("Night").and(contains("22:00")).and(contains("21:00").not()));

    rti()
        .args(["--db", &db_path, "shift", "delete", "Night"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "shift", "list"])
        .assert()
        .success()
        .stdout(contains("Night").not());
}

#[test]
fn test_capture_without_model_records_nothing() {
    let db_path = setup_test_db("cli_capture_no_model");
    init_cli_db(&db_path);
    let photo = write_png("cli_capture_no_model", 64, 64);

    rti()
        .args([
            "--db",
            &db_path,
            "capture",
            "--name",
            "Arjun",
            "--shift",
            "Morning Shift",
            "--supervisor",
            "Default Supervisor",
            "--photo",
            &photo,
        ])
        .assert()
        .failure()
        .stderr(contains("model file not found"));

    let pool = DbPool::new(&db_path).unwrap();
    assert_eq!(count_attendance(&pool.conn).unwrap(), 0);
}

#[test]
fn test_laborer_register_and_list() {
    let db_path = setup_test_db("cli_laborer");
    init_cli_db(&db_path);
    let proof = write_png("cli_laborer_proof", 80, 50);

    rti()
        .args([
            "--db",
            &db_path,
            "laborer",
            "add",
            "--name",
            "Meena Devi",
            "--contact",
            "9876543210",
            "--id-type",
            "voter-id",
            "--id-number",
            "VOT-42",
            "--emergency",
            "9000000000",
            "--supervisor",
            "Default Supervisor",
            "--proof",
            &proof,
        ])
        .assert()
        .success()
        .stdout(contains("registered"));

    rti()
        .args(["--db", &db_path, "laborer", "list", "--name", "Meena Devi"])
        .assert()
        .success()
        .stdout(contains("Meena Devi").and(contains("Voter ID")).and(contains("VOT-42")));

    // proof file that is not an image
    let bogus = temp_out("cli_laborer_bogus", "png");
    fs::write(&bogus, b"nope").unwrap();
    rti()
        .args([
            "--db", &db_path, "laborer", "add", "--name", "Ravi", "--id-type", "other", "--proof",
            &bogus,
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid image"));
}

#[test]
fn test_report_to_file() {
    let db_path = setup_test_db("cli_report");
    init_cli_db(&db_path);
    let proof = write_png("cli_report_proof", 30, 30);
    let out = temp_out("cli_report", "xlsx");

    rti()
        .args([
            "--db", &db_path, "laborer", "add", "--name", "Arjun", "--id-type",
            "national-id-card", "--proof", &proof,
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "report", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let path = Path::new(&out);
    assert!(path.exists());
    assert_eq!(sheet_rows(path, 1), 1);
    assert_eq!(sheet_rows(path, 2), 2);
    assert_eq!(picture_count(path), 1);
}

#[test]
fn test_report_send_requires_mail_settings() {
    let db_path = setup_test_db("cli_report_send");
    init_cli_db(&db_path);
    let out = temp_out("cli_report_send", "xlsx");

    rti()
        .args(["--db", &db_path, "report", "--file", &out, "--send"])
        .assert()
        .failure()
        .stderr(contains("smtp.sender"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_schedule_requires_mail_settings() {
    let db_path = setup_test_db("cli_schedule");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "schedule", "--interval-hours", "0"])
        .assert()
        .failure()
        .stderr(contains("interval"));

    rti()
        .args(["--db", &db_path, "schedule"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("missing mail settings"));
}

#[test]
fn test_views_on_empty_day() {
    let db_path = setup_test_db("cli_views");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "today"])
        .assert()
        .success()
        .stdout(contains("No attendance recorded"));

    rti()
        .args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Total attendance"));

    rti()
        .args(["--db", &db_path, "roster"])
        .assert()
        .success()
        .stdout(contains("No frequent laborers"));
}

#[test]
fn test_log_and_db_info() {
    let db_path = setup_test_db("cli_log");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "supervisor", "add", "Ravi", "r@example.com"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("supervisor_add")).and(contains("migration_applied")));

    rti()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Supervisors").and(contains("Integrity check passed")));
}

#[test]
fn test_config_print() {
    rti()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("report_interval_hours").and(contains("smtp")));
}
