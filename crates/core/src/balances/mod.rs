//! Balances module - point-in-time portfolio balances reconstructed from
//! account snapshots and transaction history.

mod balance_reconstructor;


pub use balance_reconstructor::BalanceReconstructor;
