//! Ledger engine module.
//!
//! This module contains the core ledger logic including:
//! - `AccountStore` - In-memory account collection
//! - `TransactionEngine` - Validated deposit, withdrawal and transfer processing
//! - `AccountFile` - Flat-file persistence of the account set
//! - `Transaction` types - Deposit, Withdrawal, Transfer
//! - `Error` types - Rejections, I/O and malformed-record errors

mod account;
mod account_store;
mod error;
mod history;
mod persistence;
mod transaction;
mod transaction_engine;

pub(crate) use rust_decimal::Decimal;

pub use account::{Account, AccountNumber};
pub use account_store::AccountStore;
pub use error::{AmountRejection, Error, LedgerError, RecordError};
pub use history::{EntryKind, HistoryEntry};
pub use persistence::{read_accounts, write_accounts, AccountFile, DEFAULT_FILE};
pub use transaction::{Deposit, Transaction, Transfer, Withdrawal, MAX_SCALE};
pub use transaction_engine::TransactionEngine;
