use crate::error::{BankError, Rejection};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Balances under this amount pay the monthly fee.
pub const MINIMUM_BALANCE: Decimal = dec!(100);
pub const MINIMUM_BALANCE_FEE: Decimal = dec!(25);
/// CDs compound this many times within each month.
pub const CD_COMPOUNDING_STEPS: u32 = 4;

/// An eight digit account number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(Rejection::AccountIdFormat(s.to_string()))
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = Rejection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Checking,
    Savings,
    Cd,
}

impl AccountKind {
    pub const ALL: [AccountKind; 3] = [
        AccountKind::Checking,
        AccountKind::Savings,
        AccountKind::Cd,
    ];
}

impl FromStr for AccountKind {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "cd" => Ok(Self::Cd),
            _ => Err(Rejection::UnknownAccountType(s.to_string())),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::Cd => "Cd",
        };
        f.write_str(name)
    }
}

/// A non-negative monetary value.
///
/// Subtraction saturates at zero: an account never goes below an empty
/// balance, whether from a withdrawal or a fee.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(Decimal);

/// A strictly positive monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, BankError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BankError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = BankError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds a balance, clamping negative input to zero.
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Value rounded to whole cents, half away from zero.
    pub fn cents(&self) -> Decimal {
        round_cents(self.0)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Annual percentage rate, 0 to 10 with at most two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Apr(Decimal);

impl Apr {
    pub const MAX: Decimal = dec!(10);

    pub fn new(value: Decimal) -> Result<Self, Rejection> {
        let in_range = value >= Decimal::ZERO && value <= Self::MAX;
        if in_range && value.normalize().scale() <= 2 {
            Ok(Self(value))
        } else {
            Err(Rejection::AprOutOfRange)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The fraction of the balance earned in one month.
    pub fn monthly_rate(&self) -> Decimal {
        self.0 / dec!(100) / dec!(12)
    }
}

pub(crate) fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
    pub balance: Balance,
    pub apr: Apr,
    /// Months passed since the account was opened.
    pub months_open: u32,
}

impl Account {
    pub fn new(id: AccountId, kind: AccountKind, apr: Apr) -> Self {
        Self {
            id,
            kind,
            balance: Balance::ZERO,
            apr,
            months_open: 0,
        }
    }

    pub fn checking(id: AccountId, apr: Apr) -> Self {
        Self::new(id, AccountKind::Checking, apr)
    }

    pub fn savings(id: AccountId, apr: Apr) -> Self {
        Self::new(id, AccountKind::Savings, apr)
    }

    pub fn certificate_of_deposit(id: AccountId, apr: Apr, opening_balance: Decimal) -> Self {
        Self {
            balance: Balance::new(opening_balance),
            ..Self::new(id, AccountKind::Cd, apr)
        }
    }

    /// Adds a positive amount. Returns false and leaves the balance alone otherwise.
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        if amount > Decimal::ZERO {
            self.balance += Balance::new(amount);
            true
        } else {
            false
        }
    }

    /// Withdraws up to `amount`, never more than the current balance.
    ///
    /// Returns the amount actually taken out.
    pub fn withdraw(&mut self, amount: Amount) -> Balance {
        let requested = Balance::from(amount);
        let taken = if requested <= self.balance {
            requested
        } else {
            self.balance
        };
        self.balance -= taken;
        taken
    }

    pub fn is_zero_balance(&self) -> bool {
        self.balance.is_zero()
    }

    pub fn deduct_minimum_balance_fee(&mut self) {
        if self.balance.value() < MINIMUM_BALANCE {
            self.balance -= Balance::new(MINIMUM_BALANCE_FEE);
        }
    }

    pub fn accrue_monthly_apr(&mut self) {
        if self.balance.is_zero() {
            return;
        }
        let rate = self.apr.monthly_rate();
        match self.kind {
            AccountKind::Cd => {
                let step = rate / Decimal::from(CD_COMPOUNDING_STEPS);
                for _ in 0..CD_COMPOUNDING_STEPS {
                    let interest = self.balance.value() * step;
                    self.balance += Balance::new(interest);
                }
            }
            AccountKind::Checking | AccountKind::Savings => {
                let interest = self.balance.value() * rate;
                self.balance += Balance::new(interest);
            }
        }
    }

    /// One month of bookkeeping: fee, then interest, then age.
    pub fn advance_month(&mut self) {
        self.deduct_minimum_balance_fee();
        self.accrue_monthly_apr();
        self.months_open += 1;
    }

    /// Months still to wait before the account may be withdrawn from.
    pub fn lock_remaining(&self) -> u32 {
        self.kind
            .limits()
            .withdrawal_lock_months
            .saturating_sub(self.months_open)
    }

    pub fn can_withdraw(&self) -> bool {
        self.lock_remaining() == 0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} {:.2}",
            self.kind,
            self.id,
            self.balance.cents(),
            round_cents(self.apr.value())
        )
    }
}
