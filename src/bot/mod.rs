//! Mock chat-bot endpoint.
//!
//! Pattern-matches a command string, edits the email pools the client sent
//! along, and answers with text plus an optional embed.

pub mod email;
pub mod pools;
pub mod simulator;

pub use pools::{EmailPool, EmailPools, Pools};
pub use simulator::{BotRequest, BotResponse, BotSimulator, Embed};
