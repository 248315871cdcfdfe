pub mod appointment;
pub mod prescription;
pub mod user;
