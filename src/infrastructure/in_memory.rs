use crate::application::engine::{BankingEngine, Report};
use crate::application::sessions::{SessionId, SessionStore};
use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::{BankError, Rejection, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Accounts kept in opening order with a hash index on top.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.index = self
            .accounts
            .iter()
            .enumerate()
            .map(|(position, account)| (account.id.clone(), position))
            .collect();
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert(&mut self, account: Account) -> Result<()> {
        if self.index.contains_key(&account.id) {
            return Err(Rejection::DuplicateAccount(account.id).into());
        }
        self.index.insert(account.id.clone(), self.accounts.len());
        self.accounts.push(account);
        Ok(())
    }

    fn get(&self, id: &AccountId) -> Option<&Account> {
        self.index.get(id).map(|&position| &self.accounts[position])
    }

    fn get_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        let position = *self.index.get(id)?;
        self.accounts.get_mut(position)
    }

    fn remove(&mut self, id: &AccountId) -> Option<Account> {
        let position = self.index.remove(id)?;
        let account = self.accounts.remove(position);
        self.reindex();
        Some(account)
    }

    fn accounts(&self) -> Vec<&Account> {
        self.accounts.iter().collect()
    }

    fn accounts_mut(&mut self) -> Vec<&mut Account> {
        self.accounts.iter_mut().collect()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn clear(&mut self) {
        self.accounts.clear();
        self.index.clear();
    }
}

/// Banking sessions held in process memory.
///
/// Uses `Arc<RwLock<HashMap<SessionId, Session>>>` so the store can be
/// cloned into every request handler.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

#[derive(Debug)]
struct Session {
    engine: BankingEngine,
    last_used: Instant,
}

impl Session {
    fn engine(&mut self) -> &mut BankingEngine {
        self.last_used = Instant::now();
        &mut self.engine
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        self.last_used.elapsed() >= ttl
    }
}

impl InMemorySessionStore {
    /// Sessions untouched for `idle_ttl` are dropped the next time one is created.
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            max_sessions,
            idle_ttl,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<SessionId> {
        let mut sessions = self.sessions.write().await;
        let open = sessions.len();
        sessions.retain(|_, session| !session.is_idle(self.idle_ttl));
        if sessions.len() < open {
            tracing::info!(evicted = open - sessions.len(), "idle sessions dropped");
        }
        if sessions.len() >= self.max_sessions {
            return Err(BankError::SessionLimit(self.max_sessions));
        }
        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Session {
                engine: BankingEngine::new(),
                last_used: Instant::now(),
            },
        );
        tracing::debug!(session = %id, open = sessions.len(), "session created");
        Ok(id)
    }

    async fn execute(&self, id: SessionId, commands: Vec<String>) -> Result<Report> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BankError::UnknownSession(id))?;
        Ok(session.engine().run(&commands))
    }

    async fn snapshot(&self, id: SessionId) -> Result<Report> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BankError::UnknownSession(id))?;
        Ok(session.engine().report())
    }

    async fn reset(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BankError::UnknownSession(id))?;
        session.engine().reset();
        Ok(())
    }

    async fn remove(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(BankError::UnknownSession(id))
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
