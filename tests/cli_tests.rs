mod common;

use common::{init_store_with_data, setup_store, staffroll, temp_out};
use predicates::str::{contains, is_match};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[test]
fn init_creates_the_snapshot() {
    let store = setup_store("cli_init");

    staffroll()
        .args(["--store", &store, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(Path::new(&store).join("sqlite_db_backup.json").exists());
}

#[test]
fn added_employees_are_listed_in_a_later_run() {
    let store = setup_store("cli_list");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("Mario Rossi"))
        .stdout(contains("Anna Bianchi"))
        .stdout(contains("Full day"))
        .stdout(contains("Total: 2"));
}

#[test]
fn list_search_filters_rows() {
    let store = setup_store("cli_search");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "list", "--search", "doctor"])
        .assert()
        .success()
        .stdout(contains("Anna Bianchi"))
        .stdout(contains("Total: 1"));
}

#[test]
fn duplicate_registration_fails_with_a_clear_message() {
    let store = setup_store("cli_duplicate");
    init_store_with_data(&store);

    staffroll()
        .args([
            "--store",
            &store,
            "add",
            "--name",
            "Someone Else",
            "--registration",
            "M001",
            "--role",
            "Porter",
        ])
        .assert()
        .failure()
        .stderr(contains("Registration 'M001' is already in use."));
}

#[test]
fn edit_changes_only_given_fields() {
    let store = setup_store("cli_edit");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "edit", "1", "--role", "Head nurse"])
        .assert()
        .success();

    staffroll()
        .args(["--store", &store, "list", "--search", "M001"])
        .assert()
        .success()
        .stdout(contains("Head nurse"))
        .stdout(contains("Mario Rossi"));
}

#[test]
fn edit_unknown_id_fails() {
    let store = setup_store("cli_edit_unknown");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "edit", "99", "--name", "Nobody"])
        .assert()
        .failure()
        .stderr(contains("Employee #99 not found"));
}

#[test]
fn forced_delete_removes_the_employee() {
    let store = setup_store("cli_del");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "del", "1", "--force"])
        .assert()
        .success();

    staffroll()
        .args(["--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("Total: 1"));
}

#[test]
fn delete_without_confirmation_keeps_the_employee() {
    let store = setup_store("cli_del_cancel");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    staffroll()
        .args(["--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("Total: 2"));
}

#[test]
fn json_export_contains_every_employee() {
    let store = setup_store("cli_export_json");
    init_store_with_data(&store);
    let out = temp_out("cli_export_json", "json");

    staffroll()
        .args([
            "--store", &store, "export", "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let data: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Anna Bianchi");
    assert_eq!(rows[0]["shift"], "FullDay");
    assert_eq!(rows[1]["registration"], "M001");
}

#[test]
fn csv_export_has_a_header_row() {
    let store = setup_store("cli_export_csv");
    init_store_with_data(&store);
    let out = temp_out("cli_export_csv", "csv");

    staffroll()
        .args([
            "--store", &store, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,name,registration,role,shift"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn xlsx_and_pdf_exports_write_files() {
    let store = setup_store("cli_export_binary");
    init_store_with_data(&store);

    for format in ["xlsx", "pdf"] {
        let out = temp_out("cli_export_binary", format);
        staffroll()
            .args([
                "--store", &store, "export", "--format", format, "--file", &out, "--force",
            ])
            .assert()
            .success();
        assert!(fs::metadata(&out).unwrap().len() > 0);
    }
}

#[test]
fn backup_and_import_move_data_between_stores() {
    let source = setup_store("cli_backup_src");
    init_store_with_data(&source);
    let file = temp_out("cli_backup", "sqlite");

    staffroll()
        .args(["--store", &source, "backup", "--file", &file, "--force"])
        .assert()
        .success()
        .stdout(contains("Database exported"));

    let target = setup_store("cli_backup_dst");
    staffroll()
        .args(["--store", &target, "--test", "init"])
        .assert()
        .success();

    staffroll()
        .args(["--store", &target, "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("2 employee(s) loaded"));

    staffroll()
        .args(["--store", &target, "list"])
        .assert()
        .success()
        .stdout(contains("Mario Rossi"));
}

#[test]
fn importing_garbage_is_reported_and_harmless() {
    let store = setup_store("cli_import_bad");
    init_store_with_data(&store);
    let bad = temp_out("cli_import_bad", "sqlite");
    fs::write(&bad, b"this is not sqlite").unwrap();

    staffroll()
        .args(["--store", &store, "import", "--file", &bad])
        .assert()
        .failure()
        .stderr(contains("Import failed"))
        .stdout(contains("valid .sqlite"));

    staffroll()
        .args(["--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("Total: 2"));
}

#[test]
fn header_is_stored_and_printed_as_text() {
    let store = setup_store("cli_header");
    init_store_with_data(&store);

    staffroll()
        .args([
            "--store",
            &store,
            "header",
            "--set",
            "<p><b>General Hospital</b></p><p>Ward 3 &amp; 4</p>",
        ])
        .assert()
        .success();

    staffroll()
        .args(["--store", &store, "header", "--print"])
        .assert()
        .success()
        .stdout(contains("General Hospital\nWard 3 & 4"));
}

#[test]
fn timesheet_pdf_is_generated() {
    let store = setup_store("cli_timesheet");
    init_store_with_data(&store);
    let out = temp_out("cli_timesheet", "pdf");

    staffroll()
        .args([
            "--store", &store, "timesheet", "--id", "1", "--month", "2", "--year", "2024",
            "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("21 working days"));

    assert!(fs::read(&out).unwrap().starts_with(b"%PDF"));
}

#[test]
fn timesheet_rejects_invalid_month() {
    let store = setup_store("cli_timesheet_bad");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "timesheet", "--id", "1", "--month", "13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn log_lists_recorded_operations() {
    let store = setup_store("cli_log");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"));
}

#[test]
fn db_info_reports_counts() {
    let store = setup_store("cli_db_info");
    init_store_with_data(&store);

    staffroll()
        .args(["--store", &store, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total employees:"))
        .stdout(is_match(r"Snapshot size:\S* \d").unwrap())
        .stdout(contains("Integrity check passed"));
}
