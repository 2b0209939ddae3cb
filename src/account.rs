// 💳 Account and Transaction domain types
//
// Account ids are the stable identity; balances are values that only the
// ledger engine mutates. Transaction records are append-only: once written
// they never change, they are only removed by an administrative clear or
// when their account is deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Savings account (interest-bearing in a real bank; not here)
    Savings,

    /// Checking account (daily transactions)
    Checking,
}

impl AccountType {
    /// Stored representation, matching the `accounts.account_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
        }
    }
}

// ============================================================================
// ACCOUNT
// ============================================================================

/// A bank account as constructed by `create_account`.
///
/// Invariant: `balance >= 0` at every point observable by another
/// operation. The id and type are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id (e.g. "SAV001")
    pub id: String,

    /// Type of account
    pub account_type: AccountType,

    /// Balance at construction time; the persisted row is authoritative
    /// afterwards
    pub balance: Decimal,
}

// ============================================================================
// TRANSACTION RECORD
// ============================================================================

/// One entry in the append-only transaction log.
///
/// Positive amounts are credits, negative amounts are debits. The
/// timestamp is assigned by the store at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Account the entry belongs to
    pub account_id: String,

    /// Signed amount (+credit / -debit)
    pub amount: Decimal,

    /// Store-assigned insertion time (UTC)
    pub timestamp: DateTime<Utc>,
}
