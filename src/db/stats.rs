use crate::db::migrate::{SCHEMA_VERSION, schema_version};
use crate::db::queries::count_employees;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInfo {
    pub employees: i64,
    pub roles: i64,
    pub log_rows: i64,
    pub schema_version: i32,
    pub page_count: i64,
    pub page_size: i64,
}

impl DbInfo {
    /// In-memory image size as reported by the engine.
    pub fn image_bytes(&self) -> i64 {
        self.page_count * self.page_size
    }
}

pub fn collect_db_info(conn: &Connection) -> AppResult<DbInfo> {
    let roles: i64 = conn.query_row("SELECT COUNT(DISTINCT role) FROM employees", [], |row| {
        row.get(0)
    })?;
    let log_rows: i64 = conn.query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    Ok(DbInfo {
        employees: count_employees(conn)?,
        roles,
        log_rows,
        schema_version: schema_version(conn)?,
        page_count,
        page_size,
    })
}

/// `snapshot` is the stored snapshot size, `None` when nothing is stored yet.
pub fn print_db_info(info: &DbInfo, store_dir: &str, key: &str, snapshot: Option<usize>) {
    println!();

    println!("{}• Store:{} {}{}{}", CYAN, RESET, YELLOW, store_dir, RESET);
    println!("{}• Snapshot key:{} {}", CYAN, RESET, key);

    match snapshot {
        Some(bytes) => println!(
            "{}• Snapshot size:{} {:.2} KiB",
            CYAN,
            RESET,
            bytes as f64 / 1024.0
        ),
        None => println!("{}• Snapshot size:{} {GREY}--{RESET}", CYAN, RESET),
    }

    println!(
        "{}• Image size:{} {:.2} KiB",
        CYAN,
        RESET,
        info.image_bytes() as f64 / 1024.0
    );
    println!(
        "{}• Schema version:{} {} (current {})",
        CYAN, RESET, info.schema_version, SCHEMA_VERSION
    );
    println!(
        "{}• Total employees:{} {}{}{}",
        CYAN, RESET, GREEN, info.employees, RESET
    );
    println!("{}• Distinct roles:{} {}", CYAN, RESET, info.roles);
    println!("{}• Log rows:{} {}", CYAN, RESET, info.log_rows);

    println!();
}
