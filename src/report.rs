// 🧾 Report presentation - engine output → user-visible text blocks
//
// The engine hands back structured values; everything string-shaped lives
// here. Formats mirror the classic bank statement labels: a summary
// block, a daily activity block, and a top-accounts block, plus the
// one-line "timestamp,accountId,amount" history rendering.

use chrono::Utc;

use crate::account::TransactionRecord;
use crate::ledger::{AccountActivity, AccountSummary, DailyReport};

/// Render one log entry as `timestamp,accountId,amount`, amounts with
/// two decimal places.
pub fn history_line(record: &TransactionRecord) -> String {
    format!(
        "{},{},{:.2}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.account_id,
        record.amount
    )
}

/// `ACCOUNT SUMMARY REPORT` text block.
pub fn format_summary(summary: &AccountSummary) -> String {
    format!(
        "ACCOUNT SUMMARY REPORT\n\
         Generated: {}\n\
         -------------------------\n\
         Total Accounts: {}\n\
         Total Balance: ${:.2}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        summary.total_accounts,
        summary.total_balance
    )
}

/// `TODAY'S TRANSACTIONS` text block.
pub fn format_daily(report: &DailyReport) -> String {
    format!(
        "TODAY'S TRANSACTIONS\n\
         Date: {}\n\
         -------------------------\n\
         Money Deposited: ${:.2}\n\
         Money Withdrawn: ${:.2}\n\
         Total Change: ${:.2}\n",
        Utc::now().format("%Y-%m-%d"),
        report.total_deposits,
        report.total_withdrawals,
        report.net_change()
    )
}

/// `TOP ACCOUNTS REPORT` text block. An empty bank renders "none yet"
/// placeholders instead of leaders.
pub fn format_activity(activity: &AccountActivity) -> String {
    let most_active = match &activity.most_active {
        Some(leader) => format!(
            "Most Active Account: {}\n→ Number of Transactions: {}",
            leader.account_id, leader.transaction_count
        ),
        None => "Most Active Account: none yet".to_string(),
    };

    let highest_balance = match &activity.highest_balance {
        Some(leader) => format!(
            "Highest Balance Account: {}\n→ Current Balance: ${:.2}",
            leader.account_id, leader.balance
        ),
        None => "Highest Balance Account: none yet".to_string(),
    };

    format!(
        "TOP ACCOUNTS REPORT\n\
         Generated: {}\n\
         -------------------------\n\
         {}\n\n\
         {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        most_active,
        highest_balance
    )
}
