//! Flat-file persistence for the whole account set.
//!
//! Each account is written as one record:
//!
//! ```text
//! <account number>
//! <account type>
//! <balance, 2 decimals>
//! <number of history entries>
//! <history entry>...
//! <blank line>
//! ```
//!
//! History entries use their display form (`Deposit: P250.00`), one per line,
//! so the count prefix is enough to keep records aligned on reload.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::account::{Account, AccountNumber};
use super::error::{Error, RecordError};
use super::history::HistoryEntry;
use super::Decimal;

/// Default location of the account file
pub const DEFAULT_FILE: &str = "accounts.txt";

/// Reads and writes the account set at a fixed location.
#[derive(Debug, Clone)]
pub struct AccountFile {
    path: PathBuf,
}

impl AccountFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with every account.
    pub fn save(&self, accounts: &[Account]) -> Result<(), Error> {
        log::info!(
            "Saving {} accounts to {}",
            accounts.len(),
            self.path.display()
        );
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_accounts(&mut writer, accounts)?;
        writer.flush()?;
        Ok(())
    }

    /// Load every account from the file.
    ///
    /// A file that cannot be opened means there is nothing saved yet and yields
    /// an empty set. Parsing stops at the first malformed record.
    pub fn load(&self) -> Result<Vec<Account>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                log::info!(
                    "No account file at {} ({e}), starting empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
        };

        let accounts = read_accounts(BufReader::new(file))?;
        log::info!(
            "Loaded {} accounts from {}",
            accounts.len(),
            self.path.display()
        );
        Ok(accounts)
    }
}

impl Default for AccountFile {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

/// Serialize accounts to any sink (File, `Vec<u8>`, etc.)
pub fn write_accounts<W: Write>(mut writer: W, accounts: &[Account]) -> std::io::Result<()> {
    for account in accounts {
        writeln!(writer, "{}", account.number())?;
        writeln!(writer, "{}", account.account_type())?;
        writeln!(writer, "{:.2}", account.balance())?;
        writeln!(writer, "{}", account.history().len())?;
        for entry in account.history() {
            writeln!(writer, "{entry}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Parse accounts from any buffered source.
///
/// Returns the records read before the first malformed one; only failures of
/// the source itself are errors.
pub fn read_accounts<R: BufRead>(reader: R) -> std::io::Result<Vec<Account>> {
    let mut records = RecordReader {
        lines: reader.lines(),
        line_no: 0,
    };
    let mut accounts = Vec::new();

    loop {
        match records.next_record() {
            Ok(Some(account)) => accounts.push(account),
            Ok(None) => break,
            Err(ReadError::Io(e)) => return Err(e),
            Err(ReadError::Record(e)) => {
                log::warn!(
                    "Stopped reading accounts at line {}: {e} ({} accounts read)",
                    records.line_no,
                    accounts.len()
                );
                break;
            }
        }
    }

    Ok(accounts)
}

#[derive(Debug, thiserror::Error)]
enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Record(#[from] RecordError),
}

struct RecordReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> RecordReader<R> {
    fn next_line(&mut self) -> Result<Option<String>, ReadError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                match line {
                    Ok(line) => Ok(Some(line)),
                    // Undecodable bytes are bad data, not a failing source.
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        Err(RecordError::Encoding.into())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            None => Ok(None),
        }
    }

    fn field(&mut self, field: &'static str) -> Result<String, ReadError> {
        self.next_line()?
            .ok_or_else(|| RecordError::Truncated { field }.into())
    }

    /// Read one record, skipping blank lines before it.
    /// `None` means the input ended cleanly between records.
    fn next_record(&mut self) -> Result<Option<Account>, ReadError> {
        let number = loop {
            match self.next_line()? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let number = number
            .trim()
            .parse::<AccountNumber>()
            .map_err(|_| RecordError::AccountNumber(number.clone()))?;

        let account_type = self.field("account type")?.trim().to_string();
        if account_type.is_empty() {
            return Err(RecordError::AccountType.into());
        }

        let balance = self.field("balance")?;
        let balance = Decimal::from_str(balance.trim())
            .map_err(|_| RecordError::Balance(balance.clone()))?;

        let count = self.field("history length")?;
        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|_| RecordError::HistoryLength(count.clone()))?;

        let mut history = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            history.push(self.field("history entry")?.trim().parse::<HistoryEntry>()?);
        }

        match self.next_line()? {
            Some(line) if !line.trim().is_empty() => {
                return Err(RecordError::Separator(line).into());
            }
            _ => {}
        }

        log::trace!("Read account {number} with {count} history entries");
        Ok(Some(Account::restore(number, account_type, balance, history)))
    }
}
