use super::bank::Bank;
use crate::domain::account::{Account, AccountKind, Balance};
use crate::domain::command::Command;
use crate::domain::ports::AccountStore;
use crate::domain::rules;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Drives raw command strings through the banking pipeline:
/// parse, validate, execute, log, and finally render a [`Report`].
///
/// Account state and the command history survive between calls to
/// [`BankingEngine::run`]; the list of rejected commands only covers the most
/// recent run.
#[derive(Debug, Default, Clone)]
pub struct BankingEngine<S: AccountStore = InMemoryAccountStore> {
    bank: Bank<S>,
    invalid_commands: Vec<String>,
    command_history: Vec<String>,
}

impl BankingEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One account in a rendered report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    /// `"<Kind> <id> <balance> <apr>"`, as printed.
    pub state: String,
    pub id: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub apr: Decimal,
    pub months_open: u32,
    pub transactions: Vec<String>,
}

impl AccountReport {
    fn new(account: &Account, transactions: &[String]) -> Self {
        let mut balance = account.balance.cents();
        balance.rescale(2);
        let mut apr = account.apr.value();
        apr.rescale(2);
        Self {
            state: account.to_string(),
            id: account.id.to_string(),
            kind: account.kind,
            balance,
            apr,
            months_open: account.months_open,
            transactions: transactions.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub accounts: Vec<AccountReport>,
    pub invalid_commands: Vec<String>,
    /// Every command run since the last reset, accepted or not.
    pub command_history: Vec<String>,
}

impl Report {
    /// The flat output: each account's state followed by its transactions,
    /// then every rejected command.
    pub fn lines(&self) -> Vec<String> {
        self.accounts
            .iter()
            .flat_map(|account| {
                std::iter::once(account.state.clone()).chain(account.transactions.iter().cloned())
            })
            .chain(self.invalid_commands.iter().cloned())
            .collect()
    }
}

impl<S: AccountStore> BankingEngine<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            bank: Bank::with_store(store),
            invalid_commands: Vec::new(),
            command_history: Vec::new(),
        }
    }

    pub fn bank(&self) -> &Bank<S> {
        &self.bank
    }

    pub fn invalid_commands(&self) -> &[String] {
        &self.invalid_commands
    }

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    /// Runs a single command. An `Err` means the command was rejected and
    /// nothing changed.
    pub fn process_command(&mut self, raw: &str) -> Result<()> {
        let command = Command::parse(raw)?;
        rules::validate(&command, self.bank.store())?;
        self.execute(&command)?;
        for id in command.logged_accounts() {
            self.bank.record(id, raw);
        }
        Ok(())
    }

    fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Create {
                kind,
                id,
                apr,
                opening_balance,
            } => {
                let account = match kind {
                    AccountKind::Checking => Account::checking(id.clone(), *apr),
                    AccountKind::Savings => Account::savings(id.clone(), *apr),
                    AccountKind::Cd => Account::certificate_of_deposit(
                        id.clone(),
                        *apr,
                        opening_balance.unwrap_or_default(),
                    ),
                };
                self.bank.open_account(account)?;
            }
            Command::Deposit { id, amount } => self.bank.deposit(id, *amount)?,
            Command::Withdraw { id, amount } => {
                let taken = self.bank.withdraw(id, *amount)?;
                if taken < Balance::from(*amount) {
                    tracing::debug!(
                        account = %id,
                        withdrawn = %taken.value(),
                        "withdrawal capped at balance"
                    );
                }
            }
            Command::Transfer { from, to, amount } => {
                self.bank.transfer(from, to, *amount)?;
            }
            Command::Pass { months } => {
                let closed = self.bank.pass_time(*months);
                if !closed.is_empty() {
                    tracing::info!(months, closed = closed.len(), "closed zero balance accounts");
                }
            }
        }
        Ok(())
    }

    /// Processes a batch in order and renders the resulting state.
    pub fn run<I, T>(&mut self, commands: I) -> Report
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.invalid_commands.clear();
        for raw in commands {
            let raw = raw.as_ref();
            self.command_history.push(raw.to_string());
            if let Err(e) = self.process_command(raw) {
                tracing::debug!(command = raw, reason = %e, "command rejected");
                self.invalid_commands.push(raw.to_string());
            }
        }
        self.report()
    }

    pub fn report(&self) -> Report {
        let history = self.bank.history();
        Report {
            accounts: self
                .bank
                .accounts()
                .into_iter()
                .map(|account| AccountReport::new(account, history.entries(&account.id)))
                .collect(),
            invalid_commands: self.invalid_commands.clone(),
            command_history: self.command_history.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.bank.clear();
        self.invalid_commands.clear();
        self.command_history.clear();
    }
}
