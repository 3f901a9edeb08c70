use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::FxConverterTrait;
use crate::errors::Result;
use crate::money::Currency;
use crate::settings::AnalyticsSettings;

/// Historical exchange rates, each quoted as units of a currency per one
/// unit of a fixed pivot currency.
///
/// Lookups pick the most recent observation effective at or before the
/// requested instant, falling back to the earliest known observation when
/// the instant predates all of them.
#[derive(Debug, Clone)]
pub struct ExchangeRateTable {
    pivot: Currency,
    /// Key: currency. Value: effective instant -> units per pivot.
    rates: HashMap<Currency, BTreeMap<NaiveDateTime, Decimal>>,
}

impl ExchangeRateTable {
    pub fn new(pivot: Currency) -> Self {
        Self {
            pivot,
            rates: HashMap::new(),
        }
    }

    /// An empty table pivoting on the configured currency.
    pub fn from_settings(settings: &AnalyticsSettings) -> Result<Self> {
        Ok(Self::new(settings.pivot_currency()?))
    }

    /// Builds a table and loads `rates` into it.
    pub fn with_rates(pivot: Currency, rates: Vec<ExchangeRate>) -> Result<Self> {
        let mut table = Self::new(pivot);
        table.add_rates(rates)?;
        Ok(table)
    }

    /// Records that one `pivot` buys `rate` units of `currency` from
    /// `effective_at` onward. A later call for the same instant replaces
    /// the earlier observation.
    pub fn add_rate(
        &mut self,
        currency: Currency,
        pivot: Currency,
        effective_at: NaiveDateTime,
        rate: Decimal,
    ) -> std::result::Result<(), FxError> {
        if pivot != self.pivot {
            return Err(FxError::PivotMismatch {
                currency: currency.to_string(),
                quoted: pivot.to_string(),
                pivot: self.pivot.to_string(),
            });
        }
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate {
                currency: currency.to_string(),
                rate,
            });
        }
        if currency == self.pivot {
            debug!("Ignoring {} rate quoted against itself", currency);
            return Ok(());
        }

        self.rates
            .entry(currency)
            .or_default()
            .insert(effective_at, rate);
        Ok(())
    }

    pub fn add_rates<I>(&mut self, rates: I) -> std::result::Result<(), FxError>
    where
        I: IntoIterator<Item = ExchangeRate>,
    {
        for rate in rates {
            self.add_rate(rate.currency, rate.pivot, rate.effective_at, rate.rate)?;
        }
        Ok(())
    }

    /// Whether a conversion involving `currency` can be resolved.
    pub fn supports(&self, currency: Currency) -> bool {
        currency == self.pivot || self.rates.contains_key(&currency)
    }

    /// Currencies with at least one observation, excluding the pivot.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.rates.keys().copied()
    }

    fn lookup(&self, currency: Currency, as_of: NaiveDateTime) -> Option<Decimal> {
        let history = self.rates.get(&currency)?;
        history
            .range(..=as_of)
            .next_back()
            .or_else(|| history.iter().next())
            .map(|(_, rate)| *rate)
    }
}

impl FxConverterTrait for ExchangeRateTable {
    fn pivot_currency(&self) -> Currency {
        self.pivot
    }

    fn rate_to_pivot(&self, currency: Currency, as_of: NaiveDateTime) -> Result<Decimal> {
        if currency == self.pivot {
            return Ok(Decimal::ONE);
        }
        self.lookup(currency, as_of).ok_or_else(|| {
            FxError::ConversionUnavailable {
                currency: currency.to_string(),
                as_of,
            }
            .into()
        })
    }
}
