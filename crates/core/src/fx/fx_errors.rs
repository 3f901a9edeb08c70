use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by exchange-rate lookups and conversions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("No exchange rate available for {currency} as of {as_of}")]
    ConversionUnavailable {
        currency: String,
        as_of: NaiveDateTime,
    },

    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: Decimal },

    #[error("Rate for {currency} is quoted against {quoted}, but the table pivots on {pivot}")]
    PivotMismatch {
        currency: String,
        quoted: String,
        pivot: String,
    },

    #[error("Conversion from {from} to {to} overflowed")]
    Overflow { from: String, to: String },
}
