use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use crate::errors::Result;
use crate::money::{Currency, Money};

/// Read-only access to historical exchange rates quoted against one pivot
/// currency.
///
/// Implementors only answer rate lookups; [`FxConverterTrait::convert`]
/// does the pivot arithmetic.
pub trait FxConverterTrait: Send + Sync {
    /// The currency every rate is quoted against.
    fn pivot_currency(&self) -> Currency;

    /// Units of `currency` per one unit of the pivot, as of `as_of`.
    fn rate_to_pivot(&self, currency: Currency, as_of: NaiveDateTime) -> Result<Decimal>;

    /// Converts `money` into `target` through the pivot currency.
    ///
    /// Same-currency conversion is the identity and zero converts to zero
    /// without consulting any rate.
    fn convert(&self, money: &Money, target: Currency, as_of: NaiveDateTime) -> Result<Money> {
        if money.currency() == target {
            return Ok(*money);
        }
        if money.is_zero() {
            return Ok(Money::zero(target));
        }

        let source_rate = self.rate_to_pivot(money.currency(), as_of)?;
        let target_rate = self.rate_to_pivot(target, as_of)?;

        let converted = money
            .amount()
            .checked_div(source_rate)
            .and_then(|pivot_value| pivot_value.checked_mul(target_rate))
            .ok_or_else(|| FxError::Overflow {
                from: money.currency().to_string(),
                to: target.to_string(),
            })?;

        Ok(Money::new(converted, target))
    }
}
