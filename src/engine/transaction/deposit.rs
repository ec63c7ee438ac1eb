use crate::engine::{
    account::AccountNumber, error::LedgerError, transaction::validate_amount, Decimal,
};

/// A validated deposit: credits one account.
#[derive(Debug, Clone)]
pub struct Deposit {
    account: AccountNumber,
    amount: Decimal,
}

impl Deposit {
    pub fn new(account: AccountNumber, amount: Decimal) -> Result<Self, LedgerError> {
        Ok(Deposit {
            account,
            amount: validate_amount(amount)?,
        })
    }

    pub fn account(&self) -> AccountNumber {
        self.account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
