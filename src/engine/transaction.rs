mod deposit;
mod transfer;
mod withdrawal;

pub use deposit::Deposit;
pub use transfer::Transfer;
pub use withdrawal::Withdrawal;

use super::error::{AmountRejection, LedgerError};
use super::Decimal;

/// Largest number of fractional digits an amount may carry.
pub const MAX_SCALE: u32 = 2;

/// Check that an amount is positive and representable in currency units.
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: AmountRejection::NotPositive,
        });
    }
    check_scale(amount)
}

pub(crate) fn check_scale(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.normalize().scale() > MAX_SCALE {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: AmountRejection::TooPrecise,
        });
    }
    Ok(amount)
}

/// A validated balance-changing request, ready for the engine.
#[derive(Debug, Clone)]
pub enum Transaction {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    Transfer(Transfer),
}

impl From<Deposit> for Transaction {
    fn from(deposit: Deposit) -> Self {
        Transaction::Deposit(deposit)
    }
}

impl From<Withdrawal> for Transaction {
    fn from(withdrawal: Withdrawal) -> Self {
        Transaction::Withdrawal(withdrawal)
    }
}

impl From<Transfer> for Transaction {
    fn from(transfer: Transfer) -> Self {
        Transaction::Transfer(transfer)
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transaction::Deposit(d) => {
                write!(f, "[deposit] account={} amount={}", d.account(), d.amount())
            }
            Transaction::Withdrawal(w) => {
                write!(
                    f,
                    "[withdrawal] account={} amount={}",
                    w.account(),
                    w.amount()
                )
            }
            Transaction::Transfer(t) => {
                write!(
                    f,
                    "[transfer] from={} to={} amount={}",
                    t.from(),
                    t.to(),
                    t.amount()
                )
            }
        }
    }
}
