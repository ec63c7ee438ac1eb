use std::fmt;
use std::str::FromStr;

use super::account::AccountNumber;
use super::error::RecordError;
use super::Decimal;

/// What a history entry records, with the counterparty for transfer legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    /// Debit leg of a transfer to the given account
    TransferTo(AccountNumber),
    /// Credit leg of a transfer from the given account
    TransferFrom(AccountNumber),
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Deposit => write!(f, "Deposit"),
            EntryKind::Withdrawal => write!(f, "Withdrawal"),
            EntryKind::TransferTo(account) => write!(f, "Transfer to {account}"),
            EntryKind::TransferFrom(account) => write!(f, "Transfer from {account}"),
        }
    }
}

impl EntryKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Deposit" => Some(EntryKind::Deposit),
            "Withdrawal" => Some(EntryKind::Withdrawal),
            _ => {
                if let Some(account) = s.strip_prefix("Transfer to ") {
                    account.parse().ok().map(EntryKind::TransferTo)
                } else if let Some(account) = s.strip_prefix("Transfer from ") {
                    account.parse().ok().map(EntryKind::TransferFrom)
                } else {
                    None
                }
            }
        }
    }
}

/// One line of an account's activity log, e.g. `Transfer to 2: P40.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    kind: EntryKind,
    amount: Decimal,
}

impl HistoryEntry {
    pub(crate) fn new(kind: EntryKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: P{:.2}", self.kind, self.amount)
    }
}

impl FromStr for HistoryEntry {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecordError::HistoryEntry(s.to_string());

        let (kind, amount) = s.rsplit_once(": P").ok_or_else(invalid)?;
        let kind = EntryKind::parse(kind).ok_or_else(invalid)?;
        let amount = Decimal::from_str(amount).map_err(|_| invalid())?;
        if amount <= Decimal::ZERO {
            return Err(invalid());
        }

        Ok(HistoryEntry { kind, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_uses_two_decimals() {
        let entry = HistoryEntry::new(EntryKind::Deposit, dec!(250));
        assert_eq!(entry.to_string(), "Deposit: P250.00");

        let entry = HistoryEntry::new(EntryKind::Withdrawal, dec!(0.5));
        assert_eq!(entry.to_string(), "Withdrawal: P0.50");
    }

    #[test]
    fn test_display_transfer_legs_name_counterparty() {
        let debit = HistoryEntry::new(EntryKind::TransferTo(2), dec!(40));
        let credit = HistoryEntry::new(EntryKind::TransferFrom(1), dec!(40));

        assert_eq!(debit.to_string(), "Transfer to 2: P40.00");
        assert_eq!(credit.to_string(), "Transfer from 1: P40.00");
    }

    #[test]
    fn test_parse_each_kind() {
        let entry: HistoryEntry = "Deposit: P250.00".parse().unwrap();
        assert_eq!(entry.kind(), EntryKind::Deposit);
        assert_eq!(entry.amount(), dec!(250));

        let entry: HistoryEntry = "Withdrawal: P12.34".parse().unwrap();
        assert_eq!(entry.kind(), EntryKind::Withdrawal);

        let entry: HistoryEntry = "Transfer to 17: P1.00".parse().unwrap();
        assert_eq!(entry.kind(), EntryKind::TransferTo(17));

        let entry: HistoryEntry = "Transfer from 3: P9.99".parse().unwrap();
        assert_eq!(entry.kind(), EntryKind::TransferFrom(3));
        assert_eq!(entry.amount(), dec!(9.99));
    }

    #[test]
    fn test_parse_negative_counterparty() {
        let entry: HistoryEntry = "Transfer to -4: P2.00".parse().unwrap();
        assert_eq!(entry.kind(), EntryKind::TransferTo(-4));
        assert_eq!(entry.to_string(), "Transfer to -4: P2.00");
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert_eq!(
            "Interest: P1.00".parse::<HistoryEntry>(),
            Err(RecordError::HistoryEntry("Interest: P1.00".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_bad_counterparty() {
        assert!("Transfer to x: P1.00".parse::<HistoryEntry>().is_err());
        assert!("Transfer from 1.5: P1.00".parse::<HistoryEntry>().is_err());
        assert!("Transfer from : P1.00".parse::<HistoryEntry>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        assert!("Deposit: Pabc".parse::<HistoryEntry>().is_err());
        assert!("Deposit: P0.00".parse::<HistoryEntry>().is_err());
        assert!("Deposit 10".parse::<HistoryEntry>().is_err());
    }
}
