use chrono::{Datelike, NaiveDate, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// English month name for 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Every day of the month, or `None` for an invalid year/month.
pub fn all_days_of_month(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1)?;

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    Some(out)
}

pub fn is_weekend(d: &NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// "Mon", "Tue", ...
pub fn weekday_short(d: &NaiveDate) -> String {
    d.format("%a").to_string()
}
