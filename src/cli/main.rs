mod commands;
mod session;

use anyhow::{Context, Result};
use bank_ledger::{AccountFile, TransactionEngine};
use clap::Parser;
use commands::Args;
use session::Session;

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of warn (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let file = AccountFile::new(&args.file);

    // 1. Export mode: load, print CSV, exit
    if args.export {
        let accounts = file
            .load()
            .with_context(|| format!("Failed to load accounts from {}", args.file.display()))?;
        TransactionEngine::with_accounts(accounts)
            .export_accounts(std::io::stdout())
            .context("Failed to export accounts to stdout")?;
        return Ok(());
    }

    // 2. Load whatever was saved last time; a failed read starts empty
    let accounts = if file.path().exists() {
        match file.load() {
            Ok(accounts) => {
                println!("Loaded {} accounts from {}.", accounts.len(), args.file.display());
                accounts
            }
            Err(e) => {
                log::error!("Reading {} failed: {e}", args.file.display());
                println!("Error reading accounts: {e}. Starting with no accounts.");
                Vec::new()
            }
        }
    } else {
        println!("No existing account file found.");
        Vec::new()
    };

    // 3. Run the menu until Exit or end of input
    let engine = TransactionEngine::with_accounts(accounts);
    let stdin = std::io::stdin();
    Session::new(engine, file, stdin.lock(), std::io::stdout())
        .run()
        .context("Failed to talk to the terminal")?;

    Ok(())
}
