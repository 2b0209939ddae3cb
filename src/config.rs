// ⚙️ Store configuration
// Resolved from a JSON config file or environment, owned by the process
// entry point and passed into `Database::open` (no global singleton).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "BANK_LEDGER_CONFIG";

/// Environment variable naming the database path directly.
const DB_PATH_ENV: &str = "BANK_LEDGER_DB";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("bank.db")
}

impl Config {
    /// Resolve configuration for the current process.
    ///
    /// Precedence: `BANK_LEDGER_CONFIG` (JSON file) over `BANK_LEDGER_DB`
    /// (bare path) over the default `bank.db`.
    pub fn load() -> Result<Config> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            return Config::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path));
        }

        if let Ok(db_path) = env::var(DB_PATH_ENV) {
            return Ok(Config {
                db_path: PathBuf::from(db_path),
            });
        }

        Ok(Config::default())
    }

    /// Parse a JSON config document, e.g. `{"db_path": "bank.db"}`.
    pub fn from_json(raw: &str) -> Result<Config> {
        serde_json::from_str(raw).context("Failed to parse config JSON")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: default_db_path(),
        }
    }
}
