//! Service configuration.
//!
//! Values come from `BANKSIM_`-prefixed environment variables, optionally
//! seeded from a `.env` file. Every field has a default, so an empty
//! environment yields a working setup.

use serde::Deserialize;

/// # Environment Variables
///
/// - `BANKSIM_SERVER_PORT`: HTTP port, defaults to 3000
/// - `BANKSIM_AUTHORIZED_USER_ID`: user allowed to run bot admin commands
/// - `BANKSIM_MAX_SESSIONS`: cap on concurrent banking sessions
/// - `BANKSIM_SESSION_IDLE_SECS`: idle time after which a session may be dropped
/// - `BANKSIM_BULK_EMAILS_MAX`: lines accepted per bulk email import
/// - `BANKSIM_BULK_REMOVE_MAX`: lines accepted per bulk removal
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_authorized_user_id")]
    pub authorized_user_id: String,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    #[serde(default = "default_bulk_emails_max")]
    pub bulk_emails_max: usize,

    #[serde(default = "default_bulk_remove_max")]
    pub bulk_remove_max: usize,
}

fn default_port() -> u16 {
    3000
}

fn default_authorized_user_id() -> String {
    "745694160002089130".to_string()
}

fn default_max_sessions() -> usize {
    1024
}

fn default_session_idle_secs() -> u64 {
    1800
}

fn default_bulk_emails_max() -> usize {
    100
}

fn default_bulk_remove_max() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: default_port(),
            authorized_user_id: default_authorized_user_id(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
            bulk_emails_max: default_bulk_emails_max(),
            bulk_remove_max: default_bulk_remove_max(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("BANKSIM_").from_env::<Config>()
    }

    /// Same as [`Config::from_env`] but over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("BANKSIM_").from_iter::<_, Config>(vars)
    }
}
