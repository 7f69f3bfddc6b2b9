//! Banking sessions for the HTTP surface.
//!
//! Each session owns one [`BankingEngine`](super::engine::BankingEngine),
//! the same way a browser tab owned one bank in the portfolio demo.

use super::engine::Report;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type SessionId = Uuid;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self) -> Result<SessionId>;
    async fn execute(&self, id: SessionId, commands: Vec<String>) -> Result<Report>;
    async fn snapshot(&self, id: SessionId) -> Result<Report>;
    async fn reset(&self, id: SessionId) -> Result<()>;
    async fn remove(&self, id: SessionId) -> Result<()>;
    async fn len(&self) -> usize;
}

pub type SharedSessionStore = Arc<dyn SessionStore>;
