use super::shift::Shift;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A registered employee.
///
/// `id` stays `None` until the record store has persisted the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub registration: String,
    pub role: String,
    pub shift: Shift,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        registration: impl Into<String>,
        role: impl Into<String>,
        shift: Shift,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            registration: registration.into(),
            role: role.into(),
            shift,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Required text fields must be non-blank. Values are stored trimmed.
    pub fn validated(&self) -> AppResult<Employee> {
        let name = self.name.trim();
        let registration = self.registration.trim();
        let role = self.role.trim();

        if name.is_empty() {
            return Err(AppError::InvalidEmployee("name must not be empty".into()));
        }
        if registration.is_empty() {
            return Err(AppError::InvalidEmployee(
                "registration must not be empty".into(),
            ));
        }
        if role.is_empty() {
            return Err(AppError::InvalidEmployee("role must not be empty".into()));
        }

        Ok(Employee {
            id: self.id,
            name: name.to_string(),
            registration: registration.to_string(),
            role: role.to_string(),
            shift: self.shift,
        })
    }

    /// Case-insensitive substring match over name, registration and role.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.registration, &self.role]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
