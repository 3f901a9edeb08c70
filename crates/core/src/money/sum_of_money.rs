use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::Result;
use crate::money::{Currency, Money};

/// A running total of money together with how many values went into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SumOfMoney {
    pub amount: Money,
    pub count: usize,
}

impl SumOfMoney {
    pub fn new(amount: Money, count: usize) -> Self {
        Self { amount, count }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Money::zero(currency), 0)
    }

    /// Adds one value to the total.
    pub fn add(&self, value: &Money) -> Result<SumOfMoney> {
        Ok(Self::new(self.amount.checked_add(value)?, self.count + 1))
    }

    /// Combines two totals of the same currency.
    pub fn merge(&self, other: &SumOfMoney) -> Result<SumOfMoney> {
        Ok(Self::new(
            self.amount.checked_add(&other.amount)?,
            self.count + other.count,
        ))
    }
}

impl fmt::Display for SumOfMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (n={})", self.amount, self.count)
    }
}
