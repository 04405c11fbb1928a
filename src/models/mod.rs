pub mod employee;
pub mod shift;
