use std::io::Write;

use super::account::{Account, AccountNumber};
use super::account_store::AccountStore;
use super::error::{AmountRejection, Error, LedgerError};
use super::history::{EntryKind, HistoryEntry};
use super::transaction::{check_scale, Deposit, Transaction, Transfer, Withdrawal};
use super::Decimal;

/// The core ledger: account creation and balance-changing transactions.
///
/// Every operation validates fully before it mutates anything, so a
/// rejected request leaves balances and histories untouched.
#[derive(Debug, Default)]
pub struct TransactionEngine {
    store: AccountStore,
}

impl TransactionEngine {
    /// Create a new `TransactionEngine` with no accounts
    pub fn new() -> Self {
        log::trace!("TransactionEngine initialized");
        Self {
            store: AccountStore::new(),
        }
    }

    /// Create an engine over a previously loaded account set
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let mut engine = Self::new();
        engine.replace_accounts(accounts);
        engine
    }

    /// Open a new account.
    ///
    /// The initial balance must be non-negative with at most 2 decimal places,
    /// and the type a non-empty single line so it persists on one line.
    pub fn create_account(
        &mut self,
        number: AccountNumber,
        account_type: &str,
        initial_balance: Decimal,
    ) -> Result<&Account, LedgerError> {
        if self.store.find_by_number(number).is_some() {
            return Err(LedgerError::DuplicateAccount { account: number });
        }

        let account_type = account_type.trim();
        if account_type.is_empty() || account_type.contains(['\n', '\r']) {
            return Err(LedgerError::InvalidAccountType {
                account_type: account_type.to_string(),
            });
        }

        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                amount: initial_balance,
                reason: AmountRejection::Negative,
            });
        }
        check_scale(initial_balance)?;

        log::info!("Opening account {number} ({account_type})");
        self.store.create(number, account_type, initial_balance)
    }

    pub fn deposit(&mut self, account: AccountNumber, amount: Decimal) -> Result<(), LedgerError> {
        self.require(account)?;
        self.process(Deposit::new(account, amount)?.into())
    }

    pub fn withdraw(&mut self, account: AccountNumber, amount: Decimal) -> Result<(), LedgerError> {
        self.require(account)?;
        self.process(Withdrawal::new(account, amount)?.into())
    }

    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.require(from)?;
        self.require(to)?;
        self.process(Transfer::new(from, to, amount)?.into())
    }

    /// Apply a validated transaction.
    pub fn process(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        log::trace!("Processing transaction: {transaction}");
        let result = match transaction {
            Transaction::Deposit(deposit) => self.handle_deposit(&deposit),
            Transaction::Withdrawal(withdrawal) => self.handle_withdrawal(&withdrawal),
            Transaction::Transfer(transfer) => self.handle_transfer(&transfer),
        };
        if let Err(e) = &result {
            log::warn!("Rejected: {e}");
        }
        result
    }

    /// All accounts in creation order
    pub fn accounts(&self) -> &[Account] {
        self.store.all()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.store.find_by_number(number)
    }

    /// Activity log of one account, oldest first
    pub fn history_of(&self, number: AccountNumber) -> Result<&[HistoryEntry], LedgerError> {
        self.require(number).map(Account::history)
    }

    /// Returns the number of accounts in the engine
    pub fn account_count(&self) -> usize {
        self.store.len()
    }

    /// Replace every account, e.g. after loading from disk
    pub fn replace_accounts(&mut self, accounts: Vec<Account>) {
        self.store.replace_all(accounts);
    }

    /// Write an `account,type,balance` CSV snapshot to any sink (Stdout, File, etc.)
    /// The CSV writer is buffered, so there is no need to wrap `writer` in a `BufWriter`.
    pub fn export_accounts<W: Write>(&self, writer: W) -> Result<(), Error> {
        log::info!("Exporting {} accounts", self.store.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for account in self.store.all() {
            csv_writer.serialize(account)?;
        }
        csv_writer.flush()?;

        log::trace!("Export complete");
        Ok(())
    }

    fn require(&self, number: AccountNumber) -> Result<&Account, LedgerError> {
        self.store
            .find_by_number(number)
            .ok_or(LedgerError::AccountNotFound { account: number })
    }
}

// =============================================================================
// Transaction Handlers
// =============================================================================

fn insufficient_funds(amount: Decimal, available: Decimal) -> LedgerError {
    LedgerError::InvalidAmount {
        amount,
        reason: AmountRejection::InsufficientFunds { available },
    }
}

/// Refuse a credit the balance cannot represent.
fn check_credit(balance: Decimal, amount: Decimal) -> Result<(), LedgerError> {
    match balance.checked_add(amount) {
        Some(_) => Ok(()),
        None => Err(LedgerError::InvalidAmount {
            amount,
            reason: AmountRejection::Overflow { balance },
        }),
    }
}

impl TransactionEngine {
    fn handle_deposit(&mut self, deposit: &Deposit) -> Result<(), LedgerError> {
        let number = deposit.account();
        let amount = deposit.amount();

        let account = self
            .store
            .find_by_number_mut(number)
            .ok_or(LedgerError::AccountNotFound { account: number })?;

        check_credit(account.balance(), amount)?;
        account.credit(EntryKind::Deposit, amount);

        log::trace!(
            "[deposit] account={} amount={} -> new_balance={}",
            number,
            amount,
            account.balance()
        );
        Ok(())
    }

    fn handle_withdrawal(&mut self, withdrawal: &Withdrawal) -> Result<(), LedgerError> {
        let number = withdrawal.account();
        let amount = withdrawal.amount();

        let account = self
            .store
            .find_by_number_mut(number)
            .ok_or(LedgerError::AccountNotFound { account: number })?;

        if account.balance() < amount {
            return Err(insufficient_funds(amount, account.balance()));
        }

        account.debit(EntryKind::Withdrawal, amount);

        log::trace!(
            "[withdrawal] account={} amount={} -> new_balance={}",
            number,
            amount,
            account.balance()
        );
        Ok(())
    }

    fn handle_transfer(&mut self, transfer: &Transfer) -> Result<(), LedgerError> {
        let from_number = transfer.from();
        let to_number = transfer.to();
        let amount = transfer.amount();

        if from_number == to_number {
            return Err(LedgerError::SelfTransfer {
                account: from_number,
            });
        }
        self.require(from_number)?;
        self.require(to_number)?;

        // Both legs are resolved before either is applied.
        let (from, to) = self
            .store
            .pair_mut(from_number, to_number)
            .ok_or(LedgerError::AccountNotFound {
                account: from_number,
            })?;

        if from.balance() < amount {
            return Err(insufficient_funds(amount, from.balance()));
        }
        check_credit(to.balance(), amount)?;

        from.debit(EntryKind::TransferTo(to_number), amount);
        to.credit(EntryKind::TransferFrom(from_number), amount);

        log::trace!(
            "[transfer] from={} to={} amount={} -> balances {} / {}",
            from_number,
            to_number,
            amount,
            from.balance(),
            to.balance()
        );
        Ok(())
    }
}
