//! Schema creation and upgrades.
//!
//! The installed schema is detected from the table layout, not from a stored
//! version alone: snapshots written by older builds carry no version stamp.

use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Value written to `PRAGMA user_version` once all steps have run.
pub const SCHEMA_VERSION: i32 = 2;

const LEGACY_SHIFT_MIGRATION: &str = "20240605_0002_work_hours_to_shift";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// No `employees` table yet.
    Empty,
    /// `employees` carries the numeric `workHours` column instead of `shift`.
    LegacyWorkHours,
    Current,
}

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT NOT NULL,
        registration  TEXT UNIQUE NOT NULL,
        role          TEXT NOT NULL,
        shift         TEXT NOT NULL DEFAULT 'FullDay'
                      CHECK(shift IN ('Morning','Afternoon','Night','FullDay')),
        work_hours    INTEGER
    );
"#;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_config_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Inspect the `employees` table layout.
pub fn detect_schema(conn: &Connection) -> Result<SchemaKind> {
    if !table_exists(conn, "employees")? {
        return Ok(SchemaKind::Empty);
    }

    let cols = table_columns(conn, "employees")?;
    let has_shift = cols.iter().any(|c| c == "shift");
    let has_work_hours = cols.iter().any(|c| c == "workHours");

    if has_work_hours && !has_shift {
        Ok(SchemaKind::LegacyWorkHours)
    } else {
        Ok(SchemaKind::Current)
    }
}

/// Columns the record layer reads and writes, per table.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("employees", &["id", "name", "registration", "role", "shift"]),
    ("config", &["key", "value"]),
];

/// List the required `table.column` pairs missing from `conn`.
///
/// Meant to run after [`run_pending_migrations`]: an image can be a valid
/// SQLite file and still carry tables that share a name but not a layout.
pub fn missing_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut missing = Vec::new();
    for (table, required) in REQUIRED_COLUMNS {
        let cols = table_columns(conn, table)?;
        for col in *required {
            if !cols.iter().any(|c| c == col) {
                missing.push(format!("{table}.{col}"));
            }
        }
    }
    Ok(missing)
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn migration_applied(conn: &Connection, name: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([name], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, name: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [name, message],
    )?;
    Ok(())
}

/// Rebuild a legacy `employees` table: `workHours` moves to the nullable
/// `work_hours` column and every existing row gets the `FullDay` shift.
fn migrate_work_hours_to_shift(conn: &Connection) -> Result<()> {
    warning("Legacy employees table detected (workHours), migrating to shifts...");

    conn.execute_batch(&format!(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE employees RENAME TO employees_old;

        {CREATE_EMPLOYEES}

        INSERT INTO employees (id, name, registration, role, shift, work_hours)
        SELECT id, name, registration, role, 'FullDay', workHours
        FROM employees_old;

        DROP TABLE employees_old;

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#
    ))?;

    // sqlite_sequence keeps the old row; make sure new ids continue after the copied ones
    conn.execute(
        "UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM employees)
         WHERE name = 'employees'",
        [],
    )?;

    if !migration_applied(conn, LEGACY_SHIFT_MIGRATION)? {
        mark_migration(
            conn,
            LEGACY_SHIFT_MIGRATION,
            "Replaced workHours with shift (existing rows set to FullDay)",
        )?;
    }

    success(format!(
        "Migration applied: {} → employees now use shifts",
        LEGACY_SHIFT_MIGRATION
    ));
    Ok(())
}

/// Public entry point: run all pending migrations and return how many steps
/// changed the schema.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    let mut applied = 0;

    // 1) internal log
    if !table_exists(conn, "log")? {
        ensure_log_table(conn)?;
        applied += 1;
    }

    // 2) employees
    match detect_schema(conn)? {
        SchemaKind::Empty => {
            conn.execute_batch(CREATE_EMPLOYEES)?;
            applied += 1;
        }
        SchemaKind::LegacyWorkHours => {
            migrate_work_hours_to_shift(conn)?;
            applied += 1;
        }
        SchemaKind::Current => {}
    }

    // 3) config + indexes
    if !table_exists(conn, "config")? {
        ensure_config_table(conn)?;
        applied += 1;
    }
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_employees_name ON employees(name);")?;

    // 4) version stamp
    if schema_version(conn)? != SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }

    Ok(applied)
}
