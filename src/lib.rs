//! In-memory bank accounts: customers, checking accounts with a withdrawal
//! policy, per-account history, and the interactive console around them.

pub mod audit;
pub mod cli;
pub mod config;
pub mod csv;
pub mod domain;
pub mod error;
pub mod logging;
