//! A single-user bank ledger.
//!
//! Accounts live in memory inside a [`TransactionEngine`]; the whole set is
//! written to and reloaded from a flat text file through [`AccountFile`].

pub mod engine;

pub use engine::{
    Account, AccountFile, AccountNumber, AccountStore, AmountRejection, EntryKind, Error,
    HistoryEntry, LedgerError, TransactionEngine,
};
pub use rust_decimal::Decimal;
