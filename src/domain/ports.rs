use super::account::{Account, AccountId};
use crate::error::Result;

/// Storage for the accounts of one bank.
///
/// Implementations must hand accounts back in the order they were opened;
/// the rendered output follows that order.
pub trait AccountStore {
    /// Fails when an account with the same id is already stored.
    fn insert(&mut self, account: Account) -> Result<()>;
    fn get(&self, id: &AccountId) -> Option<&Account>;
    fn get_mut(&mut self, id: &AccountId) -> Option<&mut Account>;
    fn remove(&mut self, id: &AccountId) -> Option<Account>;
    fn accounts(&self) -> Vec<&Account>;
    fn accounts_mut(&mut self) -> Vec<&mut Account>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
