use std::io::{self, BufRead, Write};
use std::str::FromStr;

use bank_ledger::{AccountFile, AccountNumber, Decimal, LedgerError, TransactionEngine};

const MENU: &str = "----- Bank Transactions -----
1. Create Account
2. Display Accounts
3. Deposit
4. Withdraw
5. Transfer
6. Display Transaction History
7. Save Accounts
8. Exit
";

/// The interactive menu loop over any line-based input and output.
///
/// Rejected requests are reported and the menu is shown again; only end of
/// input or the Exit choice ends the session.
pub struct Session<R, W> {
    engine: TransactionEngine,
    file: AccountFile,
    input: R,
    output: W,
    finished: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: TransactionEngine, file: AccountFile, input: R, output: W) -> Self {
        Self {
            engine,
            file,
            input,
            output,
            finished: false,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        while !self.finished {
            write!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.create_account()?,
                "2" => self.display_accounts()?,
                "3" => self.deposit()?,
                "4" => self.withdraw()?,
                "5" => self.transfer()?,
                "6" => self.display_history()?,
                "7" => self.save()?,
                "8" => {
                    writeln!(self.output, "Exiting the program. Goodbye!")?;
                    self.finished = true;
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
            writeln!(self.output)?;
        }
        self.output.flush()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &TransactionEngine {
        &self.engine
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("End of input, leaving the menu");
            self.finished = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a value of type `T`; unparsable input is reported and yields `None`.
    fn prompt_parse<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        let Some(line) = self.prompt(label)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid input {line:?}. Please try again.")?;
                Ok(None)
            }
        }
    }

    fn prompt_amount(&mut self, label: &str) -> io::Result<Option<Decimal>> {
        self.prompt_parse::<Decimal>(label)
    }

    /// Ask for an account number that must already exist.
    fn prompt_existing(&mut self, label: &str) -> io::Result<Option<AccountNumber>> {
        let Some(number) = self.prompt_parse::<AccountNumber>(label)? else {
            return Ok(None);
        };
        if self.engine.account(number).is_none() {
            writeln!(self.output, "Account number not found. Please try again.")?;
            return Ok(None);
        }
        Ok(Some(number))
    }

    /// Print a rejection; `what` names the value that was entered.
    fn report(&mut self, what: &str, error: &LedgerError) -> io::Result<()> {
        match error {
            LedgerError::InvalidAmount { reason, .. } => {
                writeln!(self.output, "Invalid {what}: {reason}. Please try again.")
            }
            other => writeln!(self.output, "{other}. Please try again."),
        }
    }

    fn create_account(&mut self) -> io::Result<()> {
        let Some(number) = self.prompt_parse::<AccountNumber>("Enter account number: ")? else {
            return Ok(());
        };
        if self.engine.account(number).is_some() {
            return writeln!(
                self.output,
                "Account number already exists. Please try again."
            );
        }

        let Some(account_type) = self.prompt("Enter account type: ")? else {
            return Ok(());
        };
        let Some(balance) = self.prompt_amount("Enter initial balance: ")? else {
            return Ok(());
        };

        match self.engine.create_account(number, &account_type, balance) {
            Ok(_) => writeln!(self.output, "Account created successfully."),
            Err(e) => self.report("initial balance", &e),
        }
    }

    fn display_accounts(&mut self) -> io::Result<()> {
        if self.engine.account_count() == 0 {
            return writeln!(
                self.output,
                "No accounts to display. Create an account first."
            );
        }

        writeln!(self.output, "----- Account Details -----")?;
        for account in self.engine.accounts() {
            writeln!(self.output, "Account Number: {}", account.number())?;
            writeln!(self.output, "Account Type: {}", account.account_type())?;
            writeln!(self.output, "Balance: P{:.2}", account.balance())?;
            writeln!(self.output, "Transaction History:")?;
            for entry in account.history() {
                writeln!(self.output, "{entry}")?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn deposit(&mut self) -> io::Result<()> {
        if self.engine.account_count() == 0 {
            return writeln!(
                self.output,
                "No accounts to deposit into. Create an account first."
            );
        }
        let Some(number) = self.prompt_existing("Enter account number: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Enter deposit amount: ")? else {
            return Ok(());
        };

        match self.engine.deposit(number, amount) {
            Ok(()) => writeln!(self.output, "Deposit successful."),
            Err(e) => self.report("deposit amount", &e),
        }
    }

    fn withdraw(&mut self) -> io::Result<()> {
        if self.engine.account_count() == 0 {
            return writeln!(
                self.output,
                "No accounts to withdraw from. Create an account first."
            );
        }
        let Some(number) = self.prompt_existing("Enter account number: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Enter withdrawal amount: ")? else {
            return Ok(());
        };

        match self.engine.withdraw(number, amount) {
            Ok(()) => writeln!(self.output, "Withdrawal successful."),
            Err(e) => self.report("withdrawal amount", &e),
        }
    }

    fn transfer(&mut self) -> io::Result<()> {
        if self.engine.account_count() < 2 {
            return writeln!(
                self.output,
                "Insufficient number of accounts to perform a transfer. Create at least two accounts first."
            );
        }
        let Some(from) = self.prompt_existing("Enter account number to transfer from: ")? else {
            return Ok(());
        };
        let Some(to) = self.prompt_existing("Enter account number to transfer to: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Enter transfer amount: ")? else {
            return Ok(());
        };

        match self.engine.transfer(from, to, amount) {
            Ok(()) => writeln!(self.output, "Transfer successful."),
            Err(e) => self.report("transfer amount", &e),
        }
    }

    fn display_history(&mut self) -> io::Result<()> {
        if self.engine.account_count() == 0 {
            return writeln!(
                self.output,
                "No accounts to display transaction history. Create an account first."
            );
        }
        let Some(number) = self.prompt_existing("Enter account number: ")? else {
            return Ok(());
        };

        writeln!(self.output, "----- Transaction History -----")?;
        let history = self.engine.history_of(number).unwrap_or_default();
        for entry in history {
            writeln!(self.output, "{entry}")?;
        }
        Ok(())
    }

    fn save(&mut self) -> io::Result<()> {
        match self.file.save(self.engine.accounts()) {
            Ok(()) => writeln!(self.output, "Accounts saved to file."),
            Err(e) => {
                log::error!("Saving to {} failed: {e}", self.file.path().display());
                writeln!(self.output, "Error saving accounts: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    /// Run a session over `input` and return the final engine state and transcript.
    fn run_session(
        engine: TransactionEngine,
        file: AccountFile,
        input: &str,
    ) -> (String, Vec<(AccountNumber, Decimal)>) {
        let mut output = Vec::new();
        let mut session = Session::new(engine, file, Cursor::new(input), &mut output);
        session.run().unwrap();
        let balances = session
            .engine()
            .accounts()
            .iter()
            .map(|a| (a.number(), a.balance()))
            .collect();
        drop(session);
        (String::from_utf8(output).unwrap(), balances)
    }

    fn scratch_file() -> (tempfile::TempDir, AccountFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = AccountFile::new(dir.path().join("accounts.txt"));
        (dir, file)
    }

    #[test]
    fn test_create_and_deposit() {
        let (_dir, file) = scratch_file();
        let input = "1\n100\nSavings\n500.00\n3\n100\n250.00\n8\n";

        let (transcript, balances) = run_session(TransactionEngine::new(), file, input);

        assert!(transcript.contains("Account created successfully."));
        assert!(transcript.contains("Deposit successful."));
        assert!(transcript.contains("Exiting the program. Goodbye!"));
        assert_eq!(balances, [(100, dec!(750.00))]);
    }

    #[test]
    fn test_duplicate_account_is_refused_before_asking_type() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", dec!(10)).unwrap();

        let (transcript, balances) = run_session(engine, file, "1\n1\n8\n");

        assert!(transcript.contains("Account number already exists. Please try again."));
        assert!(!transcript.contains("Enter account type: "));
        assert_eq!(balances, [(1, dec!(10))]);
    }

    #[test]
    fn test_overdraft_is_rejected() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", dec!(50.00)).unwrap();

        let (transcript, balances) = run_session(engine, file, "4\n1\n75.00\n8\n");

        assert!(transcript.contains("Invalid withdrawal amount: insufficient funds"));
        assert_eq!(balances, [(1, dec!(50.00))]);
    }

    #[test]
    fn test_deposit_past_maximum_balance_keeps_running() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", Decimal::MAX).unwrap();

        let (transcript, balances) = run_session(engine, file, "3\n1\n1\n2\n8\n");

        assert!(transcript.contains("Invalid deposit amount: balance"));
        assert!(transcript.contains("Exiting the program. Goodbye!"));
        assert_eq!(balances, [(1, Decimal::MAX)]);
    }

    #[test]
    fn test_negative_initial_balance_is_reported() {
        let (_dir, file) = scratch_file();

        let (transcript, balances) =
            run_session(TransactionEngine::new(), file, "1\n4\nSavings\n-5\n8\n");

        assert!(transcript.contains(
            "Invalid initial balance: initial balance must not be negative. Please try again."
        ));
        assert!(balances.is_empty());
    }

    #[test]
    fn test_transfer_needs_two_accounts() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", dec!(50.00)).unwrap();

        let (transcript, _) = run_session(engine, file, "5\n8\n");

        assert!(transcript.contains("Create at least two accounts first."));
    }

    #[test]
    fn test_transfer_and_history() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", dec!(100)).unwrap();
        engine.create_account(2, "Checking", dec!(100)).unwrap();

        let (transcript, balances) = run_session(engine, file, "5\n1\n2\n40\n6\n2\n8\n");

        assert!(transcript.contains("Transfer successful."));
        assert!(transcript.contains("----- Transaction History -----\nTransfer from 1: P40.00\n"));
        assert_eq!(balances, [(1, dec!(60)), (2, dec!(140))]);
    }

    #[test]
    fn test_unknown_account_and_bad_input_reprompt() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(1, "Savings", dec!(1)).unwrap();

        let (transcript, balances) = run_session(engine, file, "3\n7\n3\nabc\n9\n8\n");

        assert!(transcript.contains("Account number not found. Please try again."));
        assert!(transcript.contains("Invalid input \"abc\". Please try again."));
        assert!(transcript.contains("Invalid choice. Please try again."));
        assert_eq!(balances, [(1, dec!(1))]);
    }

    #[test]
    fn test_display_accounts() {
        let (_dir, file) = scratch_file();
        let mut engine = TransactionEngine::new();
        engine.create_account(7, "Savings", dec!(5)).unwrap();
        engine.deposit(7, dec!(0.5)).unwrap();

        let (transcript, _) = run_session(engine, file, "2\n8\n");

        assert!(transcript.contains(
            "Account Number: 7\nAccount Type: Savings\nBalance: P5.50\nTransaction History:\nDeposit: P0.50\n"
        ));
    }

    #[test]
    fn test_save_writes_file() {
        let (_dir, file) = scratch_file();
        let path = file.path().to_path_buf();

        let (transcript, _) = run_session(
            TransactionEngine::new(),
            file,
            "1\n3\nChecking\n20\n7\n8\n",
        );

        assert!(transcript.contains("Accounts saved to file."));
        let loaded = AccountFile::new(path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].account_type(), "Checking");
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (_dir, file) = scratch_file();
        let (transcript, _) = run_session(TransactionEngine::new(), file, "1\n5\n");

        assert!(transcript.ends_with("Enter account type: \n"));
    }
}
