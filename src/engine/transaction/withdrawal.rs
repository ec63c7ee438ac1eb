use crate::engine::{
    account::AccountNumber, error::LedgerError, transaction::validate_amount, Decimal,
};

/// A validated withdrawal: debits one account.
///
/// Funds are checked by the engine against the live balance, not here.
#[derive(Debug, Clone)]
pub struct Withdrawal {
    account: AccountNumber,
    amount: Decimal,
}

impl Withdrawal {
    pub fn new(account: AccountNumber, amount: Decimal) -> Result<Self, LedgerError> {
        Ok(Withdrawal {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_withdrawal() {
        let withdrawal = Withdrawal::new(1, dec!(50.25)).unwrap();

        assert_eq!(withdrawal.account(), 1);
        assert_eq!(withdrawal.amount(), dec!(50.25));
    }

    #[test]
    fn test_rejects_more_than_2_decimals() {
        assert!(Withdrawal::new(1, dec!(0.001)).is_err());
    }

    #[test]
    fn test_rejects_negative_amount() {
        assert!(Withdrawal::new(1, dec!(-100)).is_err());
    }

    #[test]
    fn test_rejects_zero_amount() {
        assert!(Withdrawal::new(1, Decimal::ZERO).is_err());
    }
}
