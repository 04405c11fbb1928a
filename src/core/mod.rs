pub mod backup;
pub mod log;
pub mod snapshot;
pub mod store;
pub mod timesheet;
