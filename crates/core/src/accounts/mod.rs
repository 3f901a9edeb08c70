//! Accounts module - account models and balance snapshots.

mod accounts_model;

#[cfg(test)]
mod accounts_model_tests;

pub use accounts_model::{Account, AccountBalance, AccountType};
