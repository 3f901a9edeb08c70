use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// One historical rate observation: how many units of `currency` buy one
/// unit of `pivot`, effective from `effective_at` onward.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency: Currency,
    pub pivot: Currency,
    pub effective_at: NaiveDateTime,
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(
        currency: Currency,
        pivot: Currency,
        effective_at: NaiveDateTime,
        rate: Decimal,
    ) -> Self {
        Self {
            currency,
            pivot,
            effective_at,
            rate,
        }
    }
}
