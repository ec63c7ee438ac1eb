pub(crate) use clap::Parser;
use std::path::PathBuf;

use bank_ledger::engine::DEFAULT_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "bank-ledger",
    author,
    version,
    about = "An interactive single-user bank ledger",
    long_about = None,
    after_help = "Accounts are loaded from FILE at startup and written back on \"Save Accounts\".\nUse --export to print a CSV snapshot instead of starting the menu:\n\n    bank-ledger --file accounts.txt --export > accounts.csv"
)]
pub struct Args {
    /// Path to the account file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_FILE,
        help = "Account file to load at startup and save to"
    )]
    pub file: PathBuf,

    /// Print accounts as CSV (account, type, balance) to stdout and exit
    #[arg(long)]
    pub export: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["bank-ledger"]);
        assert_eq!(args.file, PathBuf::from("accounts.txt"));
        assert!(!args.export);
    }

    #[test]
    fn test_file_and_export() {
        let args = Args::parse_from(["bank-ledger", "-f", "/tmp/ledger.txt", "--export"]);
        assert_eq!(args.file, PathBuf::from("/tmp/ledger.txt"));
        assert!(args.export);
    }
}
