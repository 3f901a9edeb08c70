//! Money module - currency identities and currency-typed decimal arithmetic.

pub mod currency;
mod money_model;
mod sum_of_money;

#[cfg(test)]
mod money_tests;

pub use currency::Currency;
pub use money_model::Money;
pub use sum_of_money::SumOfMoney;
