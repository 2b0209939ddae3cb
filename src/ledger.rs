// 🏦 Ledger Engine - account creation, balance mutation, reporting queries
//
// Every balance mutation and its log entry happen inside one atomic unit
// from the persistence gateway; IMMEDIATE transactions hold the write
// lock for the whole read-check-write sequence, so a sufficiency check
// cannot be overtaken by another writer. All money arithmetic is done in
// Rust on `Decimal` values; the store only ever sees canonical decimal
// strings.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::account::{Account, AccountType, TransactionRecord};
use crate::db::Database;
use crate::error::LedgerError;

// ============================================================================
// LEDGER
// ============================================================================

/// The account/ledger consistency engine.
///
/// Owns the persistence handle it was constructed with; callers inject
/// the `Database` rather than reaching for a global.
pub struct Ledger {
    db: Database,
}

impl Ledger {
    pub fn new(db: Database) -> Self {
        Ledger { db }
    }

    /// Create an account and record its opening credit.
    ///
    /// The initial balance is permissive: anything the store accepts is
    /// stored as-is. A duplicate id fails the insert and surfaces as a
    /// persistence error.
    pub fn create_account(
        &self,
        account_type: AccountType,
        account_id: &str,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        self.db.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO accounts (account_id, account_type, balance) VALUES (?1, ?2, ?3)",
                params![account_id, account_type.as_str(), initial_balance.to_string()],
            )?;

            // Opening credit equal to the initial balance
            append_entry(tx, account_id, initial_balance)?;

            Ok(Account {
                id: account_id.to_string(),
                account_type,
                balance: initial_balance,
            })
        })
    }

    /// Credit `amount` to the account, atomically with its log entry.
    pub fn deposit(&self, account_id: &str, amount: Decimal) -> Result<(), LedgerError> {
        check_positive("deposit", amount)?;

        self.db.with_transaction(|tx| {
            let current = read_balance(tx, account_id)?;
            write_balance(tx, account_id, current + amount)?;
            append_entry(tx, account_id, amount)
        })
    }

    /// Debit `amount` from the account if funds suffice.
    ///
    /// The balance check and the update share one atomic unit; on
    /// insufficient funds nothing is mutated and the error carries the
    /// current balance alongside the requested amount.
    pub fn withdraw(&self, account_id: &str, amount: Decimal) -> Result<(), LedgerError> {
        check_positive("withdraw", amount)?;

        self.db.with_transaction(|tx| {
            let current = read_balance(tx, account_id)?;
            if current < amount {
                return Err(LedgerError::insufficient_funds(account_id, current, amount));
            }

            write_balance(tx, account_id, current - amount)?;
            append_entry(tx, account_id, -amount)
        })
    }

    /// Move `amount` between two accounts as one atomic unit.
    ///
    /// Four effects - both balance updates and both log entries - commit
    /// together or not at all. A missing account or insufficient funds on
    /// the source leaves both accounts untouched.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        check_positive("transfer", amount)?;

        self.db.with_transaction(|tx| {
            let from_balance = read_balance(tx, from_id)?;
            if from_balance < amount {
                return Err(LedgerError::insufficient_funds(from_id, from_balance, amount));
            }

            write_balance(tx, from_id, from_balance - amount)?;

            // Credit side is read after the debit is written, so a
            // self-transfer sees the decremented balance and nets to zero
            let to_balance = read_balance(tx, to_id)?;
            write_balance(tx, to_id, to_balance + amount)?;

            append_entry(tx, from_id, -amount)?;
            append_entry(tx, to_id, amount)
        })
    }

    /// Current persisted balance (a stored NULL normalizes to zero).
    pub fn balance(&self, account_id: &str) -> Result<Decimal, LedgerError> {
        let conn = self.db.connection()?;
        read_balance(&conn, account_id)
    }

    /// Delete the account and all of its transaction records.
    ///
    /// The cascade and the account delete share one atomic unit: deleting
    /// an unknown account rolls back the already-issued record deletions.
    pub fn delete_account(&self, account_id: &str) -> Result<(), LedgerError> {
        self.db.with_transaction(|tx| {
            // Records first (foreign key ordering)
            tx.execute(
                "DELETE FROM transactions WHERE account_id = ?1",
                [account_id],
            )?;

            let deleted = tx.execute("DELETE FROM accounts WHERE account_id = ?1", [account_id])?;
            if deleted == 0 {
                return Err(LedgerError::account_not_found(account_id));
            }

            Ok(())
        })
    }

    /// Log entries for one account, newest first.
    ///
    /// History is best-effort reporting: a store failure degrades to an
    /// empty result with a diagnostic on stderr instead of propagating.
    pub fn transaction_history(&self, account_id: &str) -> Vec<TransactionRecord> {
        self.fetch_history(Some(account_id)).unwrap_or_else(|err| {
            eprintln!("Failed to read transaction history: {err}");
            Vec::new()
        })
    }

    /// Log entries across all accounts, newest first. Best-effort like
    /// `transaction_history`.
    pub fn all_transactions(&self) -> Vec<TransactionRecord> {
        self.fetch_history(None).unwrap_or_else(|err| {
            eprintln!("Failed to read transaction history: {err}");
            Vec::new()
        })
    }

    /// Administrative bulk clear of the transaction log.
    pub fn clear_transactions(&self) -> Result<(), LedgerError> {
        let conn = self.db.connection()?;
        conn.execute("DELETE FROM transactions", [])?;
        Ok(())
    }

    fn fetch_history(
        &self,
        account_id: Option<&str>,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        let conn = self.db.connection()?;
        let mut records = Vec::new();

        match account_id {
            Some(id) => {
                let mut stmt = conn.prepare(
                    "SELECT transaction_date, account_id, amount FROM transactions
                     WHERE account_id = ?1
                     ORDER BY transaction_date DESC, id DESC",
                )?;
                let rows = stmt.query_map([id], row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT transaction_date, account_id, amount FROM transactions
                     ORDER BY transaction_date DESC, id DESC",
                )?;
                let rows = stmt.query_map([], row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
        }

        Ok(records)
    }

    // ========================================================================
    // REPORT QUERIES (single consistent reads, no atomic unit needed)
    // ========================================================================

    /// Account count and summed balance across the bank.
    pub fn account_summary(&self) -> Result<AccountSummary, LedgerError> {
        let conn = self.db.connection()?;

        let total_accounts: i64 =
            conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;

        let mut stmt = conn.prepare("SELECT balance FROM accounts")?;
        let balances = stmt.query_map([], |row| decimal_column(row, 0))?;

        let mut total_balance = Decimal::ZERO;
        for balance in balances {
            total_balance += balance?;
        }

        Ok(AccountSummary {
            total_accounts,
            total_balance,
        })
    }

    /// Today's credits and debits (UTC day, matching the stored
    /// timestamps). Withdrawals keep their negative sign.
    pub fn daily_report(&self) -> Result<DailyReport, LedgerError> {
        let conn = self.db.connection()?;

        let mut stmt = conn.prepare(
            "SELECT amount FROM transactions WHERE DATE(transaction_date) = DATE('now')",
        )?;
        let amounts = stmt.query_map([], |row| decimal_column(row, 0))?;

        let mut total_deposits = Decimal::ZERO;
        let mut total_withdrawals = Decimal::ZERO;
        for amount in amounts {
            let amount = amount?;
            if amount > Decimal::ZERO {
                total_deposits += amount;
            } else {
                total_withdrawals += amount;
            }
        }

        Ok(DailyReport {
            total_deposits,
            total_withdrawals,
        })
    }

    /// Most-frequent account by record count and highest balance holder.
    /// Both are `None` while the bank is empty.
    pub fn account_activity(&self) -> Result<AccountActivity, LedgerError> {
        let conn = self.db.connection()?;

        let most_active = conn
            .query_row(
                "SELECT account_id, COUNT(*) AS tx_count FROM transactions
                 GROUP BY account_id ORDER BY tx_count DESC LIMIT 1",
                [],
                |row| {
                    Ok(ActivityLeader {
                        account_id: row.get(0)?,
                        transaction_count: row.get(1)?,
                    })
                },
            )
            .optional()?;

        // Ranked in Rust so the comparison stays exact decimal
        let mut stmt = conn.prepare("SELECT account_id, balance FROM accounts")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, decimal_column(row, 1)?))
        })?;

        let mut highest_balance: Option<BalanceLeader> = None;
        for row in rows {
            let (account_id, balance) = row?;
            let is_higher = match &highest_balance {
                Some(leader) => balance > leader.balance,
                None => true,
            };
            if is_higher {
                highest_balance = Some(BalanceLeader {
                    account_id,
                    balance,
                });
            }
        }

        Ok(AccountActivity {
            most_active,
            highest_balance,
        })
    }
}

// ============================================================================
// REPORT DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub total_accounts: i64,
    pub total_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Sum of today's positive amounts
    pub total_deposits: Decimal,

    /// Sum of today's negative amounts (stays negative)
    pub total_withdrawals: Decimal,
}

impl DailyReport {
    pub fn net_change(&self) -> Decimal {
        self.total_deposits + self.total_withdrawals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLeader {
    pub account_id: String,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceLeader {
    pub account_id: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountActivity {
    pub most_active: Option<ActivityLeader>,
    pub highest_balance: Option<BalanceLeader>,
}

// ============================================================================
// STATEMENT HELPERS
// ============================================================================

fn check_positive(operation: &'static str, amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount { operation, amount });
    }
    Ok(())
}

fn read_balance(conn: &Connection, account_id: &str) -> Result<Decimal, LedgerError> {
    conn.query_row(
        "SELECT balance FROM accounts WHERE account_id = ?1",
        [account_id],
        |row| decimal_column(row, 0),
    )
    .optional()?
    .ok_or_else(|| LedgerError::account_not_found(account_id))
}

fn write_balance(conn: &Connection, account_id: &str, balance: Decimal) -> Result<(), LedgerError> {
    let updated = conn.execute(
        "UPDATE accounts SET balance = ?1 WHERE account_id = ?2",
        params![balance.to_string(), account_id],
    )?;
    if updated == 0 {
        return Err(LedgerError::account_not_found(account_id));
    }
    Ok(())
}

fn append_entry(conn: &Connection, account_id: &str, amount: Decimal) -> Result<(), LedgerError> {
    conn.execute(
        "INSERT INTO transactions (account_id, amount) VALUES (?1, ?2)",
        params![account_id, amount.to_string()],
    )?;
    Ok(())
}

fn row_to_record(row: &Row) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        timestamp: timestamp_column(row, 0)?,
        account_id: row.get(1)?,
        amount: decimal_column(row, 2)?,
    })
}

/// Read a TEXT column as an exact decimal; NULL normalizes to zero.
fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: Option<String> = row.get(idx)?;
    match text {
        None => Ok(Decimal::ZERO),
        Some(text) => Decimal::from_str(&text).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
        }),
    }
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}
