//! Loading, filtering and aggregation of cash-flow transactions

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod loader;
pub mod log;
pub mod period;
pub mod summary;
pub mod transaction;

// Re-export main types for cleaner imports
pub use dashboard::Dashboard;
pub use filter::DateFilter;
pub use period::YearMonth;
pub use transaction::{Transaction, TransactionType};
