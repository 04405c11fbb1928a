use crate::db::migrate::table_exists;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::shift::Shift;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const EMPLOYEE_COLUMNS: &str = "id, name, registration, role, shift";

/// Decode one `employees` row. Bad values fail the query instead of producing
/// a half-filled record.
pub fn map_employee(row: &Row) -> Result<Employee> {
    let name: String = row.get("name")?;
    let registration: String = row.get("registration")?;
    let role: String = row.get("role")?;

    let shift_str: String = row.get("shift")?;
    let shift = Shift::from_db_str(&shift_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidShift(shift_str.clone())),
        )
    })?;

    if registration.trim().is_empty() {
        return Err(rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidEmployee(
                "stored row has an empty registration".into(),
            )),
        ));
    }

    Ok(Employee {
        id: Some(row.get("id")?),
        name,
        registration,
        role,
        shift,
    })
}

/// Turn a UNIQUE violation on `registration` into `DuplicateKey`.
fn map_write_error(err: rusqlite::Error, registration: &str) -> AppError {
    match err {
        rusqlite::Error::SqliteFailure(ref f, _)
            if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AppError::DuplicateKey(registration.to_string())
        }
        other => AppError::Db(other),
    }
}

/// Employees ordered by name (case-insensitive), ties by id.
/// A missing table yields an empty list.
pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    if !table_exists(conn, "employees")? {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees
         ORDER BY name COLLATE NOCASE ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
            [id],
            map_employee,
        )
        .optional()?;
    Ok(emp)
}

pub fn count_employees(conn: &Connection) -> AppResult<i64> {
    if !table_exists(conn, "employees")? {
        return Ok(0);
    }
    let n = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    Ok(n)
}

/// Insert and return the id assigned by the engine.
pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, registration, role, shift)
         VALUES (?1, ?2, ?3, ?4)",
        params![emp.name, emp.registration, emp.role, emp.shift.to_db_str()],
    )
    .map_err(|e| map_write_error(e, &emp.registration))?;

    Ok(conn.last_insert_rowid())
}

/// Overwrite all mutable fields. Returns the number of rows touched.
pub fn update_employee(conn: &Connection, id: i64, emp: &Employee) -> AppResult<usize> {
    let n = conn
        .execute(
            "UPDATE employees
             SET name = ?1, registration = ?2, role = ?3, shift = ?4
             WHERE id = ?5",
            params![
                emp.name,
                emp.registration,
                emp.role,
                emp.shift.to_db_str(),
                id
            ],
        )
        .map_err(|e| map_write_error(e, &emp.registration))?;
    Ok(n)
}

pub fn delete_employee(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM employees WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn get_config(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    if !table_exists(conn, "config")? {
        return Ok(None);
    }
    let value = conn
        .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn set_config(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO config (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_config(conn: &Connection, key: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
    Ok(n)
}
