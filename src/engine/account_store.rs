use super::account::{Account, AccountNumber};
use super::error::LedgerError;
use super::Decimal;

/// In-memory collection of accounts, kept in insertion order.
///
/// Lookups are linear scans; the ledger is small and interactive.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Append a new account with an empty history.
    /// Fails if the number is already taken, leaving the store unchanged.
    pub fn create(
        &mut self,
        number: AccountNumber,
        account_type: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<&Account, LedgerError> {
        if self.position(number).is_some() {
            return Err(LedgerError::DuplicateAccount { account: number });
        }

        self.accounts
            .push(Account::new(number, account_type.into(), initial_balance));
        log::debug!("Created account {number} with balance {initial_balance}");

        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn find_by_number(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub(super) fn find_by_number_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    /// Borrow two distinct accounts mutably at once.
    /// Returns `None` if either is missing or both numbers are the same.
    pub(super) fn pair_mut(
        &mut self,
        first: AccountNumber,
        second: AccountNumber,
    ) -> Option<(&mut Account, &mut Account)> {
        let i = self.position(first)?;
        let j = self.position(second)?;

        match i.cmp(&j) {
            std::cmp::Ordering::Less => {
                let (head, tail) = self.accounts.split_at_mut(j);
                Some((&mut head[i], &mut tail[0]))
            }
            std::cmp::Ordering::Greater => {
                let (head, tail) = self.accounts.split_at_mut(i);
                Some((&mut tail[0], &mut head[j]))
            }
            std::cmp::Ordering::Equal => None,
        }
    }

    /// All accounts in insertion order.
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    /// Swap in a whole new account set, dropping the current one.
    pub fn replace_all(&mut self, accounts: Vec<Account>) {
        log::debug!(
            "Replacing {} accounts with {}",
            self.accounts.len(),
            accounts.len()
        );
        self.accounts = accounts;
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn position(&self, number: AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|a| a.number() == number)
    }
}
