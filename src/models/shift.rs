use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Work shift of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
    #[default]
    #[value(name = "full-day", alias = "fullday", alias = "full")]
    FullDay,
}

impl Shift {
    pub const ALL: [Shift; 4] = [Shift::Morning, Shift::Afternoon, Shift::Night, Shift::FullDay];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
            Shift::FullDay => "FullDay",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Morning" => Some(Shift::Morning),
            "Afternoon" => Some(Shift::Afternoon),
            "Night" => Some(Shift::Night),
            "FullDay" => Some(Shift::FullDay),
            _ => None,
        }
    }

    /// Lenient parsing for user input (case-insensitive, a few aliases).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "morning" => Some(Shift::Morning),
            "afternoon" => Some(Shift::Afternoon),
            "night" => Some(Shift::Night),
            "fullday" | "full" => Some(Shift::FullDay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
            Shift::FullDay => "Full day",
        }
    }
}
