use super::account::{AccountId, AccountKind, Amount, Apr};
use crate::error::Rejection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const MIN_PASS_MONTHS: u32 = 1;
pub const MAX_PASS_MONTHS: u32 = 60;

/// A syntactically valid banking command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create {
        kind: AccountKind,
        id: AccountId,
        apr: Apr,
        /// Only CDs are opened with money in them.
        opening_balance: Option<Decimal>,
    },
    Deposit {
        id: AccountId,
        amount: Decimal,
    },
    Withdraw {
        id: AccountId,
        amount: Amount,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    Pass {
        months: u32,
    },
}

/// Plain decimal notation only: an optional `-`, digits and at most one `.`.
fn decimal(token: &str) -> Result<Decimal, Rejection> {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let plain = unsigned.bytes().any(|b| b.is_ascii_digit())
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().filter(|&b| b == b'.').count() <= 1;
    if !plain {
        return Err(Rejection::NotANumber(token.to_string()));
    }
    Decimal::from_str(token).map_err(|_| Rejection::NotANumber(token.to_string()))
}

fn positive(token: &str) -> Result<Amount, Rejection> {
    Amount::new(decimal(token)?).map_err(|_| Rejection::NonPositiveAmount)
}

fn arity(command: &'static str, parts: &[&str], expected: usize) -> Result<(), Rejection> {
    if parts.len() == expected {
        Ok(())
    } else {
        Err(Rejection::Arity {
            command,
            expected,
            actual: parts.len(),
        })
    }
}

impl Command {
    /// Splits a raw line on whitespace and checks everything that does not
    /// need to know which accounts exist.
    pub fn parse(raw: &str) -> Result<Self, Rejection> {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            return Err(Rejection::Empty);
        };
        if parts.len() < 2 {
            return Err(Rejection::UnknownCommand(raw.trim().to_string()));
        }

        match keyword.to_ascii_lowercase().as_str() {
            "create" => Self::parse_create(&parts),
            "deposit" => {
                arity("deposit", &parts, 3)?;
                let id = parts[1].parse()?;
                let amount = decimal(parts[2])?;
                if amount < Decimal::ZERO {
                    return Err(Rejection::NegativeAmount);
                }
                Ok(Command::Deposit { id, amount })
            }
            "withdraw" => {
                arity("withdraw", &parts, 3)?;
                Ok(Command::Withdraw {
                    id: parts[1].parse()?,
                    amount: positive(parts[2])?,
                })
            }
            "transfer" => {
                arity("transfer", &parts, 4)?;
                Ok(Command::Transfer {
                    from: parts[1].parse()?,
                    to: parts[2].parse()?,
                    amount: positive(parts[3])?,
                })
            }
            "pass" => {
                arity("pass", &parts, 2)?;
                let token = parts[1];
                if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Rejection::MonthsOutOfRange);
                }
                let months: u32 = token.parse().map_err(|_| Rejection::MonthsOutOfRange)?;
                if !(MIN_PASS_MONTHS..=MAX_PASS_MONTHS).contains(&months) {
                    return Err(Rejection::MonthsOutOfRange);
                }
                Ok(Command::Pass { months })
            }
            other => Err(Rejection::UnknownCommand(other.to_string())),
        }
    }

    fn parse_create(parts: &[&str]) -> Result<Self, Rejection> {
        if parts.len() < 4 {
            return Err(Rejection::Arity {
                command: "create",
                expected: 4,
                actual: parts.len(),
            });
        }
        let kind: AccountKind = parts[1].parse()?;
        let id: AccountId = parts[2].parse()?;
        let apr = Apr::new(decimal(parts[3])?)?;

        match kind {
            AccountKind::Checking | AccountKind::Savings => {
                arity("create", parts, 4)?;
                Ok(Command::Create {
                    kind,
                    id,
                    apr,
                    opening_balance: None,
                })
            }
            AccountKind::Cd => {
                arity("create", parts, 5)?;
                let opening = decimal(parts[4])?;
                let limits = kind.limits();
                if opening < limits.min_opening_balance || opening > limits.max_opening_balance {
                    return Err(Rejection::CdOpeningBalance);
                }
                Ok(Command::Create {
                    kind,
                    id,
                    apr,
                    opening_balance: Some(opening),
                })
            }
        }
    }

    /// Accounts whose transaction history records this command, in order.
    pub fn logged_accounts(&self) -> Vec<&AccountId> {
        match self {
            Command::Deposit { id, .. } | Command::Withdraw { id, .. } => vec![id],
            Command::Transfer { from, to, .. } => vec![from, to],
            Command::Create { .. } | Command::Pass { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_create_checking() {
        let command = Command::parse("create checking 12345678 1.0").unwrap();
        assert_eq!(
            command,
            Command::Create {
                kind: AccountKind::Checking,
                id: "12345678".parse().unwrap(),
                apr: Apr::new(dec!(1.0)).unwrap(),
                opening_balance: None,
            }
        );
    }

    #[test]
    fn test_keywords_and_types_ignore_case() {
        assert!(Command::parse("CREATE Savings 12345678 2.5").is_ok());
        assert!(Command::parse("Deposit 12345678 10").is_ok());
        assert!(Command::parse("  pass   3 ").is_ok());
    }

    #[test]
    fn test_parse_create_cd_requires_opening_balance() {
        assert!(Command::parse("create cd 12345678 4.5 5000").is_ok());
        assert!(matches!(
            Command::parse("create cd 12345678 4.5"),
            Err(Rejection::Arity { .. })
        ));
        assert_eq!(
            Command::parse("create cd 12345678 4.5 999.99"),
            Err(Rejection::CdOpeningBalance)
        );
        assert_eq!(
            Command::parse("create cd 12345678 4.5 10000.01"),
            Err(Rejection::CdOpeningBalance)
        );
        assert!(Command::parse("create cd 12345678 4.5 10000").is_ok());
    }

    #[test]
    fn test_parse_create_rejects_extra_arguments() {
        assert!(matches!(
            Command::parse("create checking 12345678 1.0 500"),
            Err(Rejection::Arity { .. })
        ));
    }

    #[test]
    fn test_parse_create_rejects_bad_fields() {
        assert!(matches!(
            Command::parse("create investment 12345678 1.0"),
            Err(Rejection::UnknownAccountType(_))
        ));
        assert!(matches!(
            Command::parse("create checking 1234 1.0"),
            Err(Rejection::AccountIdFormat(_))
        ));
        assert_eq!(
            Command::parse("create checking 12345678 10.5"),
            Err(Rejection::AprOutOfRange)
        );
        assert_eq!(
            Command::parse("create checking 12345678 1.234"),
            Err(Rejection::AprOutOfRange)
        );
        assert!(matches!(
            Command::parse("create checking 12345678 abc"),
            Err(Rejection::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_amounts() {
        assert!(Command::parse("deposit 12345678 0").is_ok());
        assert_eq!(
            Command::parse("deposit 12345678 -5"),
            Err(Rejection::NegativeAmount)
        );
        assert_eq!(
            Command::parse("withdraw 12345678 0"),
            Err(Rejection::NonPositiveAmount)
        );
        assert_eq!(
            Command::parse("transfer 12345678 87654321 -1"),
            Err(Rejection::NonPositiveAmount)
        );
        assert!(matches!(
            Command::parse("withdraw 12345678 ten"),
            Err(Rejection::NotANumber(_))
        ));
        assert_eq!(
            Command::parse("deposit 12345678 12.50").unwrap(),
            Command::Deposit {
                id: "12345678".parse().unwrap(),
                amount: dec!(12.5),
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_plain_numbers() {
        for line in [
            "deposit 12345678 1_000",
            "deposit 12345678 +5",
            "withdraw 12345678 1e3",
            "withdraw 12345678 1.2.3",
            "transfer 12345678 87654321 .",
            "create savings 12345678 0_5",
            "create checking 12345678 +1",
            "create cd 12345678 2.5 5_000",
            "create cd 12345678 2.5 -",
        ] {
            assert!(
                matches!(Command::parse(line), Err(Rejection::NotANumber(_))),
                "{line}"
            );
        }
    }

    #[test]
    fn test_parse_pass_months() {
        assert_eq!(
            Command::parse("pass 1").unwrap(),
            Command::Pass { months: 1 }
        );
        assert_eq!(
            Command::parse("pass 60").unwrap(),
            Command::Pass { months: 60 }
        );
        assert_eq!(Command::parse("pass 0"), Err(Rejection::MonthsOutOfRange));
        assert_eq!(Command::parse("pass 61"), Err(Rejection::MonthsOutOfRange));
        assert_eq!(Command::parse("pass 1.5"), Err(Rejection::MonthsOutOfRange));
        assert_eq!(Command::parse("pass -1"), Err(Rejection::MonthsOutOfRange));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Command::parse(""), Err(Rejection::Empty));
        assert_eq!(Command::parse("   "), Err(Rejection::Empty));
        assert!(matches!(
            Command::parse("deposit"),
            Err(Rejection::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("creat checking 12345678 1.0"),
            Err(Rejection::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("deposit 12345678"),
            Err(Rejection::Arity { .. })
        ));
    }

    #[test]
    fn test_transfer_is_logged_on_both_accounts() {
        let command = Command::parse("transfer 11111111 22222222 5").unwrap();
        let logged: Vec<&str> = command
            .logged_accounts()
            .into_iter()
            .map(AccountId::as_str)
            .collect();
        assert_eq!(logged, vec!["11111111", "22222222"]);
        assert!(Command::parse("pass 2").unwrap().logged_accounts().is_empty());
    }
}
