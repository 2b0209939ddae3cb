// 🗄️ Persistence Gateway - scoped connections, atomic units, schema bootstrap
//
// Each request opens a fresh connection from the driver (no pooling, no
// retry); the connection is released when it goes out of scope. Mutating
// operations run through `with_transaction`, which groups statements into
// one atomic unit: everything commits or everything rolls back, and
// auto-commit is restored either way.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

// ============================================================================
// SCHEMA
// ============================================================================

// Executed statement by statement on startup; blank entries between the
// semicolons are skipped. Amounts are stored as canonical decimal strings,
// all money arithmetic stays in Rust.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    account_id TEXT PRIMARY KEY,
    account_type TEXT NOT NULL,
    balance TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id TEXT NOT NULL REFERENCES accounts(account_id),
    amount TEXT NOT NULL,
    transaction_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
";

// ============================================================================
// DATABASE
// ============================================================================

/// Handle to the SQLite store backing the ledger.
///
/// Constructed once by the process entry point and passed to the engine
/// explicitly. Opening guarantees the tables exist.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open the store at `path`, creating the schema if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Database, LedgerError> {
        let db = Database {
            path: path.as_ref().to_path_buf(),
        };

        let conn = db.connection()?;
        init_schema(&conn)?;

        Ok(db)
    }

    /// Acquire a fresh connection. Released when the value is dropped.
    pub fn connection(&self) -> Result<Connection, LedgerError> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    /// Run `f` as one atomic unit.
    ///
    /// The transaction starts IMMEDIATE, taking SQLite's write lock up
    /// front so a read-check-write sequence inside the closure cannot
    /// interleave with another writer. On `Ok` the unit commits; on `Err`
    /// the guard rolls back when dropped. Auto-commit is back in force
    /// once this returns, success or not.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&Transaction) -> Result<T, LedgerError>,
    {
        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let value = f(&tx)?;

        tx.commit()?;
        Ok(value)
    }
}

/// Create tables and indexes if they do not exist yet.
fn init_schema(conn: &Connection) -> Result<(), LedgerError> {
    // WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    for statement in SCHEMA.split(';') {
        if statement.trim().is_empty() {
            continue;
        }
        conn.execute(statement, [])?;
    }

    Ok(())
}
