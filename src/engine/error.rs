use crate::engine::account::AccountNumber;
use crate::engine::Decimal;

/// Top-level error type for the ledger.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Rejections of account and transaction requests.
/// None of these mutate the ledger; the caller reports them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Account {account} already exists")]
    DuplicateAccount { account: AccountNumber },

    #[error("Account {account} not found")]
    AccountNotFound { account: AccountNumber },

    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount {
        amount: Decimal,
        reason: AmountRejection,
    },

    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer { account: AccountNumber },

    #[error("Invalid account type {account_type:?}: must be a non-empty single line")]
    InvalidAccountType { account_type: String },
}

/// Why an amount was refused. Insufficient funds is reported as an
/// invalid amount, with its own reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountRejection {
    #[error("amount must be positive")]
    NotPositive,

    #[error("initial balance must not be negative")]
    Negative,

    #[error("at most 2 decimal places are allowed")]
    TooPrecise,

    #[error("insufficient funds, available {available}")]
    InsufficientFunds { available: Decimal },

    #[error("balance {balance} cannot hold this amount")]
    Overflow { balance: Decimal },
}

/// A persisted account record that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("line is not valid UTF-8")]
    Encoding,

    #[error("unexpected end of input while reading {field}")]
    Truncated { field: &'static str },

    #[error("invalid account number {0:?}")]
    AccountNumber(String),

    #[error("empty account type")]
    AccountType,

    #[error("invalid balance {0:?}")]
    Balance(String),

    #[error("invalid history length {0:?}")]
    HistoryLength(String),

    #[error("invalid history entry {0:?}")]
    HistoryEntry(String),

    #[error("expected blank line after record, found {0:?}")]
    Separator(String),
}
