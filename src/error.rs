use crate::domain::account::{AccountId, AccountKind};
use thiserror::Error;
use uuid::Uuid;

/// Why a banking command was turned away.
///
/// Malformed input and broken business rules share one type: both end up as
/// the same "invalid command" echo in the output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected} arguments, got {actual}")]
    Arity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unknown account type `{0}`")]
    UnknownAccountType(String),
    #[error("account id must be exactly 8 digits, got `{0}`")]
    AccountIdFormat(String),
    #[error("`{0}` is not a decimal number")]
    NotANumber(String),
    #[error("APR must be between 0 and 10 with at most two decimal places")]
    AprOutOfRange,
    #[error("CD opening balance must be between 1000 and 10000")]
    CdOpeningBalance,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("months must be a whole number between 1 and 60")]
    MonthsOutOfRange,
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),
    #[error("account {0} does not exist")]
    UnknownAccount(AccountId),
    #[error("{0} accounts do not accept deposits")]
    DepositsNotAllowed(AccountKind),
    #[error("{kind} deposit limit is {limit}")]
    DepositLimit {
        kind: AccountKind,
        limit: rust_decimal::Decimal,
    },
    #[error("{kind} withdrawal limit is {limit}")]
    WithdrawalLimit {
        kind: AccountKind,
        limit: rust_decimal::Decimal,
    },
    #[error("account {id} is locked for {remaining} more month(s)")]
    WithdrawalLocked { id: AccountId, remaining: u32 },
    #[error("cannot transfer to the same account")]
    SelfTransfer,
    #[error("{0} accounts cannot take part in transfers")]
    TransfersNotAllowed(AccountKind),
    #[error("{kind} can send at most {limit} per transfer")]
    TransferOutLimit {
        kind: AccountKind,
        limit: rust_decimal::Decimal,
    },
    #[error("{kind} can receive at most {limit} per transfer")]
    TransferInLimit {
        kind: AccountKind,
        limit: rust_decimal::Decimal,
    },
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Command rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Session {0} not found")]
    UnknownSession(Uuid),
    #[error("Session limit of {0} reached")]
    SessionLimit(usize),
}

pub type Result<T> = std::result::Result<T, BankError>;
