//! Spendlens Core - in-memory analytics over personal finance histories.
//!
//! This crate turns already-loaded transactions, accounts and exchange rates
//! into interval summaries, tag summaries, net-worth series, running
//! balances and ranked tag hierarchies. It performs no I/O; storage and
//! presentation layers live elsewhere.

pub mod accounts;
pub mod balances;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod hierarchy;
pub mod intervals;
pub mod money;
pub mod settings;
pub mod summaries;
pub mod tags;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
