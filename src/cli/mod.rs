//! Terminal rendering of the reports

pub mod balance;
pub mod cashflow;
pub mod details;
pub mod expenses;
pub mod setup;
pub mod summary;
pub mod ui;
