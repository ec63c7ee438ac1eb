use crate::engine::{
    account::AccountNumber, error::LedgerError, transaction::validate_amount, Decimal,
};

/// A validated transfer between two distinct accounts.
///
/// Applied as a debit leg on `from` and a credit leg on `to`.
#[derive(Debug, Clone)]
pub struct Transfer {
    from: AccountNumber,
    to: AccountNumber,
    amount: Decimal,
}

impl Transfer {
    pub fn new(from: AccountNumber, to: AccountNumber, amount: Decimal) -> Result<Self, LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer { account: from });
        }
        Ok(Transfer {
            from,
            to,
            amount: validate_amount(amount)?,
        })
    }

    pub fn from(&self) -> AccountNumber {
        self.from
    }

    pub fn to(&self) -> AccountNumber {
        self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
