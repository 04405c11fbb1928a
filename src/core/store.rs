//! Typed CRUD over the `employees` and `config` tables.

use crate::config::WritePolicy;
use crate::db::connection::ConnectionManager;
use crate::db::log::ttlog;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::sync::Arc;

/// Config key of the rich-text header printed on reports.
pub const REPORT_HEADER_KEY: &str = "report_header";

pub struct RecordStore {
    manager: Arc<ConnectionManager>,
    policy: WritePolicy,
}

/// Append to the internal log; a failure here never fails the write itself.
fn audit(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warning(format!("Failed to write internal log: {e}"));
    }
}

impl RecordStore {
    pub fn new(manager: Arc<ConnectionManager>, policy: WritePolicy) -> Self {
        Self { manager, policy }
    }

    pub fn manager(&self) -> &Arc<ConnectionManager> {
        &self.manager
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Snapshot after a successful write, as dictated by the policy.
    ///
    /// Persistence is best effort: the in-memory write already happened and is
    /// kept even if the snapshot cannot be stored.
    fn after_write(&self) {
        if self.policy == WritePolicy::WriteThrough {
            self.persist();
        }
    }

    fn persist(&self) {
        match self.manager.save_snapshot() {
            Ok(_) => {}
            Err(e) if e.is_recoverable_persistence() => {
                warning(format!("Changes kept in memory but not saved locally: {e}"));
            }
            Err(e) => warning(format!("Snapshot save failed: {e}")),
        }
    }

    /// Save the snapshot now, whatever the policy. Same best-effort semantics.
    pub fn flush(&self) {
        self.persist();
    }

    /// All employees, ordered by name (case-insensitive) then id.
    pub fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.manager.with_conn(|conn| queries::load_employees(conn))
    }

    /// Employees whose name, registration or role contains `term`.
    pub fn search_employees(&self, term: &str) -> AppResult<Vec<Employee>> {
        Ok(self
            .list_employees()?
            .into_iter()
            .filter(|e| e.matches(term))
            .collect())
    }

    pub fn find_employee(&self, id: i64) -> AppResult<Option<Employee>> {
        self.manager.with_conn(|conn| queries::load_employee(conn, id))
    }

    pub fn count_employees(&self) -> AppResult<i64> {
        self.manager.with_conn(|conn| queries::count_employees(conn))
    }

    /// Insert a new employee and return the id the engine assigned.
    /// Any id already on `emp` is ignored.
    pub fn add_employee(&self, emp: &Employee) -> AppResult<i64> {
        let emp = emp.validated()?;

        let id = self.manager.with_conn(|conn| {
            let id = queries::insert_employee(conn, &emp)?;
            audit(
                conn,
                "add",
                &emp.registration,
                &format!("Added employee #{id} {}", emp.name),
            );
            Ok(id)
        })?;

        self.after_write();
        Ok(id)
    }

    /// Overwrite every field of the employee with `emp.id`.
    pub fn update_employee(&self, emp: &Employee) -> AppResult<()> {
        let id = emp.id.ok_or(AppError::MissingIdentifier)?;
        let emp = emp.validated()?;

        self.manager.with_conn(|conn| {
            if queries::update_employee(conn, id, &emp)? == 0 {
                return Err(AppError::EmployeeNotFound(id));
            }
            audit(
                conn,
                "edit",
                &emp.registration,
                &format!("Updated employee #{id} {}", emp.name),
            );
            Ok(())
        })?;

        self.after_write();
        Ok(())
    }

    /// Remove the employee. Deleting an unknown id is a no-op; the return
    /// value tells whether a row was removed.
    pub fn delete_employee(&self, id: i64) -> AppResult<bool> {
        let removed = self.manager.with_conn(|conn| {
            let n = queries::delete_employee(conn, id)?;
            if n > 0 {
                audit(conn, "del", &id.to_string(), &format!("Deleted employee #{id}"));
            }
            Ok(n > 0)
        })?;

        self.after_write();
        Ok(removed)
    }

    /// `None` when the key was never set.
    pub fn get_config(&self, key: &str) -> AppResult<Option<String>> {
        self.manager.with_conn(|conn| queries::get_config(conn, key))
    }

    pub fn set_config(&self, key: &str, value: &str) -> AppResult<()> {
        self.manager.with_conn(|conn| {
            queries::set_config(conn, key, value)?;
            audit(conn, "config", key, &format!("Set '{key}' ({} bytes)", value.len()));
            Ok(())
        })?;

        self.after_write();
        Ok(())
    }

    pub fn delete_config(&self, key: &str) -> AppResult<bool> {
        let removed = self.manager.with_conn(|conn| {
            let n = queries::delete_config(conn, key)?;
            if n > 0 {
                audit(conn, "config", key, &format!("Removed '{key}'"));
            }
            Ok(n > 0)
        })?;

        self.after_write();
        Ok(removed)
    }
}
