//! Accounts, commands and the rules that govern them.
//!
//! Nothing in here performs I/O; storage sits behind the `AccountStore` port.

pub mod account;
pub mod command;
pub mod history;
pub mod ports;
pub mod rules;
