//! Monthly attendance sheet: one row per day, blank time cells to be filled
//! in by hand, weekends pre-marked.

use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::utils::date::{all_days_of_month, is_weekend, month_name, weekday_short};
use chrono::NaiveDate;

pub const COLUMNS: [&str; 6] = ["DAY", "IN", "LUNCH OUT", "RETURN", "OUT", "SIGNATURE"];

const WEEKEND_CELL: &str = "---";
const WEEKEND_MARK: &str = "SAT/SUN";

#[derive(Debug, Clone)]
pub struct TimesheetRow {
    pub date: NaiveDate,
    pub weekend: bool,
}

impl TimesheetRow {
    /// "07 (Tue)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.date.format("%d"), weekday_short(&self.date))
    }

    pub fn cells(&self) -> Vec<String> {
        let fill = if self.weekend { WEEKEND_CELL } else { "" };
        vec![
            self.label(),
            fill.to_string(),
            fill.to_string(),
            fill.to_string(),
            fill.to_string(),
            if self.weekend { WEEKEND_MARK } else { "" }.to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Timesheet {
    pub employee: Employee,
    pub year: i32,
    pub month: u32,
    pub rows: Vec<TimesheetRow>,
    /// Plain-text lines printed above the title.
    pub header_lines: Vec<String>,
}

impl Timesheet {
    pub fn build(employee: &Employee, year: i32, month: u32) -> AppResult<Self> {
        let days = all_days_of_month(year, month)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{year}-{month:02}")))?;

        let rows = days
            .into_iter()
            .map(|date| TimesheetRow {
                weekend: is_weekend(&date),
                date,
            })
            .collect();

        Ok(Self {
            employee: employee.clone(),
            year,
            month,
            rows,
            header_lines: Vec::new(),
        })
    }

    pub fn with_header(mut self, lines: Vec<String>) -> Self {
        self.header_lines = lines;
        self
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }

    /// `timesheet_<registration>_<Month>.pdf`
    pub fn file_name(&self) -> String {
        let reg: String = self
            .employee
            .registration
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("timesheet_{}_{}.pdf", reg, self.month_name())
    }

    pub fn table(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(TimesheetRow::cells).collect()
    }

    pub fn working_days(&self) -> usize {
        self.rows.iter().filter(|r| !r.weekend).count()
    }
}
