use super::history::{EntryKind, HistoryEntry};
use super::Decimal;
use serde::{Serialize, Serializer};

pub type AccountNumber = i32;

/// Serialize Decimal with exactly 2 decimal places
fn serialize_decimal_2dp<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// A numbered bank account with its balance and append-only activity log.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    #[serde(rename = "account")]
    number: AccountNumber,
    #[serde(rename = "type")]
    account_type: String,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    balance: Decimal,
    #[serde(skip)]
    history: Vec<HistoryEntry>,
}

impl Account {
    pub(super) fn new(number: AccountNumber, account_type: String, balance: Decimal) -> Self {
        Self {
            number,
            account_type,
            balance,
            history: Vec::new(),
        }
    }

    /// Rebuild an account from persisted fields.
    pub(super) fn restore(
        number: AccountNumber,
        account_type: String,
        balance: Decimal,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            number,
            account_type,
            balance,
            history,
        }
    }

    /// Returns the account number
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Returns the free-form account type label
    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    /// Returns the current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Returns the activity log, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Credit the account and log the entry.
    /// Caller must ensure the new balance is representable.
    pub(super) fn credit(&mut self, kind: EntryKind, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO, "credit of non-positive amount");
        self.balance += amount;
        self.history.push(HistoryEntry::new(kind, amount));
    }

    /// Debit the account and log the entry.
    /// Caller must ensure sufficient funds.
    ///
    /// # Panics (debug only)
    /// Panics if the debit would drive the balance negative.
    pub(super) fn debit(&mut self, kind: EntryKind, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO, "debit of non-positive amount");
        debug_assert!(
            self.balance >= amount,
            "debit of {amount} exceeds balance {} on account {}",
            self.balance,
            self.number
        );
        self.balance -= amount;
        self.history.push(HistoryEntry::new(kind, amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_account_has_empty_history() {
        let account = Account::new(100, "Savings".to_string(), dec!(500));
        assert_eq!(account.number(), 100);
        assert_eq!(account.account_type(), "Savings");
        assert_eq!(account.balance(), dec!(500));
        assert!(account.history().is_empty());
    }

    #[test]
    fn test_credit_increases_balance_and_logs() {
        let mut account = Account::new(1, "Checking".to_string(), dec!(10));
        account.credit(EntryKind::Deposit, dec!(2.5));

        assert_eq!(account.balance(), dec!(12.5));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history()[0].to_string(), "Deposit: P2.50");
    }

    #[test]
    fn test_debit_decreases_balance_and_logs() {
        let mut account = Account::new(1, "Checking".to_string(), dec!(100));
        account.debit(EntryKind::TransferTo(2), dec!(40));

        assert_eq!(account.balance(), dec!(60));
        assert_eq!(account.history()[0].kind(), EntryKind::TransferTo(2));
    }

    #[test]
    fn test_debit_down_to_zero_is_allowed() {
        let mut account = Account::new(1, "Checking".to_string(), dec!(25));
        account.debit(EntryKind::Withdrawal, dec!(25));
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    #[should_panic(expected = "exceeds balance")]
    #[cfg(debug_assertions)]
    fn test_debit_past_zero_panics_in_debug() {
        let mut account = Account::new(1, "Checking".to_string(), dec!(25));
        account.debit(EntryKind::Withdrawal, dec!(26));
    }

    #[test]
    fn test_history_keeps_insertion_order() {
        let mut account = Account::new(1, "Checking".to_string(), Decimal::ZERO);
        account.credit(EntryKind::Deposit, dec!(5));
        account.debit(EntryKind::Withdrawal, dec!(3));
        account.credit(EntryKind::TransferFrom(9), dec!(1));

        let lines: Vec<String> = account.history().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            ["Deposit: P5.00", "Withdrawal: P3.00", "Transfer from 9: P1.00"]
        );
    }
}
