// Bank Ledger - Core Library
// Exposes all modules for use in the demo CLI and tests

pub mod account;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod report;

// Re-export commonly used types
pub use account::{Account, AccountType, TransactionRecord};
pub use config::Config;
pub use db::Database;
pub use error::LedgerError;
pub use ledger::{
    AccountActivity, AccountSummary, ActivityLeader, BalanceLeader, DailyReport, Ledger,
};
pub use report::{format_activity, format_daily, format_summary, history_line};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
