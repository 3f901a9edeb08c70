//! Transactions module - transaction models, split filtering and list
//! building.

mod transaction_list;
mod transactions_model;


pub use transaction_list::{TransactionList, TransactionListBuilder, TransactionListItem};
pub use transactions_model::{TaggedAmount, Transaction, TransactionStatus};
