// 🚨 Error taxonomy - one closed enum for every ledger failure
// Validation, missing accounts, insufficient funds, and store failures

use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure a ledger operation can surface.
///
/// Callers match on the kind; each variant carries the structured context
/// needed for diagnostics (no store exception text leaks into messages
/// except through the `Persistence` source chain).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Deposit/withdraw/transfer called with a non-positive amount.
    #[error("{operation} amount must be positive (got {amount})")]
    InvalidAmount {
        /// Operation that rejected the amount
        operation: &'static str,
        /// The offending amount
        amount: Decimal,
    },

    /// Referenced account id has no matching row.
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: String },

    /// Withdrawal or transfer exceeds the current balance.
    ///
    /// Carries both sides of the comparison so callers can report
    /// exactly how short the account is.
    #[error("Insufficient funds for {account_id}: balance {current}, requested {requested}")]
    InsufficientFunds {
        account_id: String,
        current: Decimal,
        requested: Decimal,
    },

    /// Any underlying store failure (connectivity, constraint violation,
    /// schema mismatch), wrapping the original cause.
    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: &str) -> Self {
        LedgerError::AccountNotFound {
            account_id: account_id.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account_id: &str, current: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account_id: account_id.to_string(),
            current,
            requested,
        }
    }
}
