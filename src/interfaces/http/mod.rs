//! HTTP surface.
//!
//! - banking: scenario catalogue, account rules and per-session banks
//! - bot: the mock chat-bot endpoint
//! - health: liveness

pub mod banking;
pub mod bot;
pub mod error;
pub mod health;

use crate::application::sessions::SharedSessionStore;
use crate::bot::BotSimulator;
use crate::config::Config;
use crate::infrastructure::in_memory::InMemorySessionStore;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SharedSessionStore,
    pub bot: Arc<BotSimulator>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_sessions(
            config,
            Arc::new(InMemorySessionStore::new(
                config.max_sessions,
                Duration::from_secs(config.session_idle_secs),
            )),
        )
    }

    pub fn with_sessions(config: &Config, sessions: SharedSessionStore) -> Self {
        Self {
            sessions,
            bot: Arc::new(BotSimulator::from_config(config)),
            start_time: std::time::Instant::now(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(banking::routes())
        .merge(bot::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
