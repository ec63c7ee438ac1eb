//! Basic example of using the `TransactionEngine`.
//!
//! Run with: `cargo run --example basic`

use bank_ledger::{AccountFile, Decimal, TransactionEngine};

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = TransactionEngine::new();
    engine
        .create_account(100, "Savings", Decimal::new(50_000, 2))
        .expect("Failed to create account 100");
    engine
        .create_account(200, "Checking", Decimal::new(10_000, 2))
        .expect("Failed to create account 200");

    engine
        .deposit(100, Decimal::new(25_000, 2))
        .expect("Failed to deposit");
    engine
        .transfer(100, 200, Decimal::new(4_000, 2))
        .expect("Failed to transfer");

    // Rejected: more than the balance
    if let Err(e) = engine.withdraw(200, Decimal::new(1_000_000, 2)) {
        println!("Withdrawal rejected: {e}");
    }

    // Persist and reload through a scratch file
    let path = std::env::temp_dir().join("bank-ledger-demo.txt");
    let file = AccountFile::new(&path);
    file.save(engine.accounts()).expect("Failed to save accounts");
    let reloaded = TransactionEngine::with_accounts(file.load().expect("Failed to load accounts"));

    println!("\n=== Accounts after reload ===");
    for account in reloaded.accounts() {
        println!("{} ({}): P{:.2}", account.number(), account.account_type(), account.balance());
        for entry in account.history() {
            println!("  {entry}");
        }
    }

    println!("\n=== CSV export ===");
    reloaded
        .export_accounts(std::io::stdout())
        .expect("Failed to export accounts");
}
