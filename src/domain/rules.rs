//! Business rules that depend on the state of the bank.
//!
//! Stateless checks (number formats, APR range, arity) happen while parsing;
//! everything here needs to look at the accounts that already exist.

use super::account::{Account, AccountId, AccountKind};
use super::command::Command;
use super::ports::AccountStore;
use crate::error::Rejection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// The per-kind rule table. `None` means "no cap".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLimits {
    pub accepts_deposits: bool,
    pub max_deposit: Option<Decimal>,
    pub max_withdrawal: Option<Decimal>,
    pub transfers_allowed: bool,
    pub max_transfer_in: Option<Decimal>,
    pub max_transfer_out: Option<Decimal>,
    pub withdrawal_lock_months: u32,
    pub min_opening_balance: Decimal,
    pub max_opening_balance: Decimal,
}

impl AccountKind {
    pub const fn limits(self) -> AccountLimits {
        match self {
            AccountKind::Checking => AccountLimits {
                accepts_deposits: true,
                max_deposit: Some(dec!(1000)),
                max_withdrawal: None,
                transfers_allowed: true,
                max_transfer_in: Some(dec!(400)),
                max_transfer_out: None,
                withdrawal_lock_months: 0,
                min_opening_balance: Decimal::ZERO,
                max_opening_balance: Decimal::ZERO,
            },
            AccountKind::Savings => AccountLimits {
                accepts_deposits: true,
                max_deposit: Some(dec!(2500)),
                max_withdrawal: Some(dec!(1000)),
                transfers_allowed: true,
                max_transfer_in: Some(dec!(2500)),
                max_transfer_out: Some(dec!(1000)),
                withdrawal_lock_months: 0,
                min_opening_balance: Decimal::ZERO,
                max_opening_balance: Decimal::ZERO,
            },
            AccountKind::Cd => AccountLimits {
                accepts_deposits: false,
                max_deposit: None,
                max_withdrawal: None,
                transfers_allowed: false,
                max_transfer_in: None,
                max_transfer_out: None,
                withdrawal_lock_months: 12,
                min_opening_balance: dec!(1000),
                max_opening_balance: dec!(10000),
            },
        }
    }
}

fn exceeds(amount: Decimal, cap: Option<Decimal>) -> Option<Decimal> {
    cap.filter(|limit| amount > *limit)
}

fn existing<'a, S: AccountStore>(store: &'a S, id: &AccountId) -> Result<&'a Account, Rejection> {
    store
        .get(id)
        .ok_or_else(|| Rejection::UnknownAccount(id.clone()))
}

/// Checks a parsed command against the current accounts.
pub fn validate<S: AccountStore>(command: &Command, store: &S) -> Result<(), Rejection> {
    match command {
        Command::Create { id, .. } => {
            if store.get(id).is_some() {
                return Err(Rejection::DuplicateAccount(id.clone()));
            }
        }
        Command::Deposit { id, amount } => {
            let account = existing(store, id)?;
            let limits = account.kind.limits();
            if !limits.accepts_deposits {
                return Err(Rejection::DepositsNotAllowed(account.kind));
            }
            if let Some(limit) = exceeds(*amount, limits.max_deposit) {
                return Err(Rejection::DepositLimit {
                    kind: account.kind,
                    limit,
                });
            }
        }
        Command::Withdraw { id, amount } => {
            let account = existing(store, id)?;
            if let Some(limit) = exceeds(amount.value(), account.kind.limits().max_withdrawal) {
                return Err(Rejection::WithdrawalLimit {
                    kind: account.kind,
                    limit,
                });
            }
            if !account.can_withdraw() {
                return Err(Rejection::WithdrawalLocked {
                    id: id.clone(),
                    remaining: account.lock_remaining(),
                });
            }
        }
        Command::Transfer { from, to, amount } => {
            if from == to {
                return Err(Rejection::SelfTransfer);
            }
            let source = existing(store, from)?;
            let target = existing(store, to)?;
            for account in [source, target] {
                if !account.kind.limits().transfers_allowed {
                    return Err(Rejection::TransfersNotAllowed(account.kind));
                }
            }
            if let Some(limit) = exceeds(amount.value(), source.kind.limits().max_transfer_out) {
                return Err(Rejection::TransferOutLimit {
                    kind: source.kind,
                    limit,
                });
            }
            if let Some(limit) = exceeds(amount.value(), target.kind.limits().max_transfer_in) {
                return Err(Rejection::TransferInLimit {
                    kind: target.kind,
                    limit,
                });
            }
        }
        Command::Pass { .. } => {}
    }
    Ok(())
}
