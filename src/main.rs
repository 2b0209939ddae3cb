use anyhow::Result;
use rust_decimal::Decimal;
use std::error::Error as _;

use bank_ledger::{
    format_activity, format_daily, format_summary, history_line, AccountType, Config, Database,
    Ledger, LedgerError,
};

fn main() -> Result<()> {
    let config = Config::load()?;

    println!("🏦 Bank Ledger (db: {})", config.db_path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db = Database::open(&config.db_path)?;
    let bank = Ledger::new(db);

    if let Err(err) = run_demo(&bank) {
        eprintln!("❌ Error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("   caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_demo(bank: &Ledger) -> Result<(), LedgerError> {
    // Create accounts
    println!("\n📂 Creating accounts...");

    let savings = bank.create_account(AccountType::Savings, "SAV001", dollars(5000_00))?;
    println!("✓ Created savings account: {} (${:.2})", savings.id, savings.balance);

    let checking = bank.create_account(AccountType::Checking, "CHK001", dollars(1000_00))?;
    println!("✓ Created checking account: {} (${:.2})", checking.id, checking.balance);

    let small_savings = bank.create_account(AccountType::Savings, "SAV002", dollars(500_00))?;
    println!(
        "✓ Created small savings account: {} (${:.2})",
        small_savings.id, small_savings.balance
    );

    // Perform transactions
    println!("\n💾 Performing transactions...");

    bank.deposit("CHK001", dollars(2000_00))?;
    println!("✓ Deposited $2000 to checking");
    println!("  Checking balance: ${:.2}", bank.balance("CHK001")?);

    bank.withdraw("SAV002", dollars(100_00))?;
    println!("✓ Withdrew $100 from small savings");
    println!("  Small savings balance: ${:.2}", bank.balance("SAV002")?);

    bank.deposit("SAV001", dollars(500_00))?;
    println!("✓ Deposited $500 to savings");
    println!("  Savings balance: ${:.2}", bank.balance("SAV001")?);

    bank.transfer("SAV001", "CHK001", dollars(1000_00))?;
    println!("✓ Transferred $1000 from savings to checking");
    println!("  Savings balance: ${:.2}", bank.balance("SAV001")?);
    println!("  Checking balance: ${:.2}", bank.balance("CHK001")?);

    // View transaction history
    println!("\nTransaction History for SAV001:");
    for record in bank.transaction_history("SAV001") {
        println!("{}", history_line(&record));
    }

    println!("\nTransaction History for CHK001:");
    for record in bank.transaction_history("CHK001") {
        println!("{}", history_line(&record));
    }

    println!("\nAll Transactions:");
    for record in bank.all_transactions() {
        println!("{}", history_line(&record));
    }

    // Display reports
    println!("\n📊 === Account Summary ===");
    println!("{}", format_summary(&bank.account_summary()?));

    println!("📊 === Daily Transactions ===");
    println!("{}", format_daily(&bank.daily_report()?));

    println!("📊 === Account Activity ===");
    println!("{}", format_activity(&bank.account_activity()?));

    Ok(())
}

/// Whole cents → two-decimal amount, e.g. `dollars(5000_00)` = 5000.00.
fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
