use crate::domain::account::{Account, AccountId, Amount, Balance};
use crate::domain::history::TransactionLog;
use crate::domain::ports::AccountStore;
use crate::error::{Rejection, Result};
use crate::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal::Decimal;

/// Accounts plus the history of what happened to them.
///
/// Operations here trust their input: rule checks belong to
/// `domain::rules::validate`, which the engine runs first.
#[derive(Debug, Default, Clone)]
pub struct Bank<S: AccountStore = InMemoryAccountStore> {
    store: S,
    history: TransactionLog,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: AccountStore> Bank<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            history: TransactionLog::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.store.get(id)
    }

    pub fn accounts(&self) -> Vec<&Account> {
        self.store.accounts()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn open_account(&mut self, account: Account) -> Result<()> {
        self.store.insert(account)
    }

    fn account_mut(&mut self, id: &AccountId) -> Result<&mut Account> {
        self.store
            .get_mut(id)
            .ok_or_else(|| Rejection::UnknownAccount(id.clone()).into())
    }

    pub fn deposit(&mut self, id: &AccountId, amount: Decimal) -> Result<()> {
        self.account_mut(id)?.deposit(amount);
        Ok(())
    }

    pub fn withdraw(&mut self, id: &AccountId, amount: Amount) -> Result<Balance> {
        Ok(self.account_mut(id)?.withdraw(amount))
    }

    /// Moves what the source can cover, up to `amount`.
    ///
    /// Returns the amount that actually changed hands.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Balance> {
        if self.store.get(to).is_none() {
            return Err(Rejection::UnknownAccount(to.clone()).into());
        }
        let moved = self.account_mut(from)?.withdraw(amount);
        self.account_mut(to)?.deposit(moved.value());
        Ok(moved)
    }

    /// Closes an account and forgets its history.
    pub fn close_account(&mut self, id: &AccountId) -> Option<Account> {
        self.history.forget(id);
        self.store.remove(id)
    }

    fn close_zero_balance_accounts(&mut self) -> Vec<AccountId> {
        let empty: Vec<AccountId> = self
            .store
            .accounts()
            .into_iter()
            .filter(|account| account.is_zero_balance())
            .map(|account| account.id.clone())
            .collect();
        for id in &empty {
            self.close_account(id);
        }
        empty
    }

    /// Lets `months` months go by.
    ///
    /// Each month starts by closing empty accounts, then charges fees and
    /// pays interest on the rest. Accounts emptied by the final month are
    /// closed as well. Returns the ids of every account closed.
    pub fn pass_time(&mut self, months: u32) -> Vec<AccountId> {
        let mut closed = Vec::new();
        for _ in 0..months {
            closed.extend(self.close_zero_balance_accounts());
            for account in self.store.accounts_mut() {
                account.advance_month();
            }
        }
        closed.extend(self.close_zero_balance_accounts());
        closed
    }

    pub fn record(&mut self, id: &AccountId, raw: &str) {
        self.history.record(id, raw);
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Apr;
    use crate::error::BankError;
    use rust_decimal_macros::dec;

    fn id(s: &str) -> AccountId {
        s.parse().unwrap()
    }

    fn apr(value: Decimal) -> Apr {
        Apr::new(value).unwrap()
    }

    #[test]
    fn test_open_account_rejects_duplicates() {
        let mut bank = Bank::new();
        bank.open_account(Account::checking(id("12345678"), apr(dec!(1))))
            .unwrap();
        let result = bank.open_account(Account::savings(id("12345678"), apr(dec!(2))));
        assert!(matches!(result, Err(BankError::Rejected(_))));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_transfer_moves_only_what_is_available() {
        let mut bank = Bank::new();
        bank.open_account(Account::checking(id("11111111"), apr(dec!(1))))
            .unwrap();
        bank.open_account(Account::savings(id("22222222"), apr(dec!(1))))
            .unwrap();
        bank.deposit(&id("11111111"), dec!(150)).unwrap();

        let moved = bank
            .transfer(&id("11111111"), &id("22222222"), Amount::new(dec!(200)).unwrap())
            .unwrap();

        assert_eq!(moved, Balance::new(dec!(150)));
        assert!(bank.account(&id("11111111")).unwrap().is_zero_balance());
        assert_eq!(
            bank.account(&id("22222222")).unwrap().balance,
            Balance::new(dec!(150))
        );
    }

    #[test]
    fn test_transfer_to_missing_account_changes_nothing() {
        let mut bank = Bank::new();
        bank.open_account(Account::checking(id("11111111"), apr(dec!(1))))
            .unwrap();
        bank.deposit(&id("11111111"), dec!(150)).unwrap();

        let amount = Amount::new(dec!(50)).unwrap();
        let result = bank.transfer(&id("11111111"), &id("99999999"), amount);
        assert!(result.is_err());
        assert_eq!(
            bank.account(&id("11111111")).unwrap().balance,
            Balance::new(dec!(150))
        );
    }

    #[test]
    fn test_pass_time_closes_empty_accounts() {
        let mut bank = Bank::new();
        bank.open_account(Account::checking(id("11111111"), apr(dec!(1))))
            .unwrap();
        bank.open_account(Account::checking(id("22222222"), apr(dec!(1))))
            .unwrap();
        bank.deposit(&id("11111111"), dec!(100)).unwrap();
        bank.record(&id("22222222"), "deposit 22222222 0");

        let closed = bank.pass_time(1);

        assert_eq!(closed, vec![id("22222222")]);
        assert_eq!(bank.len(), 1);
        assert!(bank.history().entries(&id("22222222")).is_empty());
    }

    #[test]
    fn test_pass_time_closes_accounts_drained_by_fees() {
        let mut bank = Bank::new();
        bank.open_account(Account::checking(id("44444444"), apr(dec!(1))))
            .unwrap();
        bank.deposit(&id("44444444"), dec!(20)).unwrap();

        let closed = bank.pass_time(1);

        assert_eq!(closed, vec![id("44444444")]);
        assert!(bank.is_empty());
    }

    #[test]
    fn test_pass_time_ages_cds() {
        let mut bank = Bank::new();
        bank.open_account(Account::certificate_of_deposit(
            id("33333333"),
            apr(dec!(4.5)),
            dec!(5000),
        ))
        .unwrap();

        bank.pass_time(12);

        let cd = bank.account(&id("33333333")).unwrap();
        assert_eq!(cd.months_open, 12);
        assert!(cd.can_withdraw());
        assert!(cd.balance > Balance::new(dec!(5000)));
    }

    #[test]
    fn test_twelve_months_of_savings_interest() {
        let mut bank = Bank::new();
        bank.open_account(Account::savings(id("12345678"), apr(dec!(6.0))))
            .unwrap();
        bank.deposit(&id("12345678"), dec!(1000)).unwrap();

        bank.pass_time(12);

        // 1000 * 1.005^12
        assert_eq!(
            bank.account(&id("12345678")).unwrap().balance.cents(),
            dec!(1061.68)
        );
    }
}
