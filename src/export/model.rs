// src/export/model.rs

use crate::models::employee::Employee;
use serde::Serialize;

/// Flat employee row shared by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EmployeeExport {
    pub id: i64,
    pub name: String,
    pub registration: String,
    pub role: String,
    pub shift: String,
}

impl From<&Employee> for EmployeeExport {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.unwrap_or_default(),
            name: e.name.clone(),
            registration: e.registration.clone(),
            role: e.role.clone(),
            shift: e.shift.to_db_str().to_string(),
        }
    }
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["id", "name", "registration", "role", "shift"]
}

pub(crate) fn employee_to_row(e: &EmployeeExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.name.clone(),
        e.registration.clone(),
        e.role.clone(),
        e.shift.clone(),
    ]
}

pub(crate) fn employees_to_table(rows: &[EmployeeExport]) -> Vec<Vec<String>> {
    rows.iter().map(employee_to_row).collect()
}
