use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::fx::FxConverterTrait;
use crate::money::Currency;

/// A decimal amount in a specific currency.
///
/// Arithmetic keeps full precision. Combining two values of different
/// currencies fails with [`Error::CurrencyMismatch`]; use [`Money::convert`]
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parses the currency code first, so persisted rows with a bad code
    /// surface as [`Error::UnknownCurrencyCode`].
    pub fn from_code(amount: Decimal, currency_code: &str) -> Result<Self> {
        Ok(Self::new(amount, Currency::parse(currency_code)?))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency))
    }

    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn multiply(&self, scalar: Decimal) -> Money {
        Money::new(self.amount * scalar, self.currency)
    }

    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency)
    }

    pub fn negate(&self) -> Money {
        Money::new(-self.amount, self.currency)
    }

    /// -1, 0 or 1 depending on the sign of the amount.
    pub fn signum(&self) -> i32 {
        match self.amount.cmp(&Decimal::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Converts into `target` using the rates in effect at `as_of`.
    pub fn convert(
        &self,
        fx: &dyn FxConverterTrait,
        target: Currency,
        as_of: NaiveDateTime,
    ) -> Result<Money> {
        fx.convert(self, target, as_of)
    }

    /// Rounds half-even to the currency's minor unit for external consumption.
    pub fn rounded(&self) -> Money {
        Money::new(
            self.amount.round_dp_with_strategy(
                self.currency.minor_units(),
                RoundingStrategy::MidpointNearestEven,
            ),
            self.currency,
        )
    }

    /// Sums `values` into `currency`. An empty input yields zero.
    pub fn sum<'a, I>(currency: Currency, values: I) -> Result<Money>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        values
            .into_iter()
            .try_fold(Money::zero(currency), |total, value| total.checked_add(value))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(Error::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                actual: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rounded().amount, self.currency)
    }
}
