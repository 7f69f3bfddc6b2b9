//! Application layer: the banking pipeline and what is built on top of it.
//!
//! `BankingEngine` is the entry point. It owns a `Bank`, runs every command
//! through parse, validate, execute and log, and renders a `Report`.

pub mod bank;
pub mod engine;
pub mod scenarios;
pub mod sessions;
