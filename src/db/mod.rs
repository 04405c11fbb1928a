pub mod connection;
pub mod log;
pub mod migrate;
pub mod queries;
pub mod stats;
