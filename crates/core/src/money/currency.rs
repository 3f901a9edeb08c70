//! ISO 4217 currency identities.
//!
//! Persisted data carries free-form currency codes, some of them long retired.
//! [`Currency::parse`] maps retired codes onto their successors before looking
//! the code up, and fails with [`Error::UnknownCurrencyCode`] otherwise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{Error, Result};

/// A known currency and the number of digits in its minor unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Currency {
    code: &'static str,
    minor_units: u32,
}

pub const USD: Currency = Currency {
    code: "USD",
    minor_units: 2,
};
pub const EUR: Currency = Currency {
    code: "EUR",
    minor_units: 2,
};
pub const GBP: Currency = Currency {
    code: "GBP",
    minor_units: 2,
};
pub const CAD: Currency = Currency {
    code: "CAD",
    minor_units: 2,
};
pub const JPY: Currency = Currency {
    code: "JPY",
    minor_units: 0,
};

/// Retired or erroneous codes and the code that replaced them.
const OUTDATED_CODES: &[(&str, &str)] = &[
    ("", "USD"),
    ("ADF", "EUR"),
    ("MCF", "EUR"),
    ("VAL", "EUR"),
    ("XEU", "EUR"),
    ("ALK", "AFN"),
    ("AON", "AOA"),
    ("AOR", "AOA"),
    ("ARM", "ARS"),
    ("ARL", "ARS"),
    ("ARP", "ARS"),
    ("ARA", "ARS"),
    ("BGJ", "BGN"),
    ("BGK", "BGN"),
    ("BOP", "BOB"),
    ("BRB", "BRL"),
    ("BRC", "BRL"),
    ("BRE", "BRL"),
    ("BRN", "BRL"),
    ("BRR", "BRL"),
    ("BRZ", "BRL"),
    ("CLE", "CLP"),
    ("CNX", "CNY"),
    ("CSJ", "CZK"),
    ("CSK", "CZK"),
    ("DDM", "DEM"),
    ("ECS", "USD"),
    ("EQE", "XAF"),
    ("ESA", "ESP"),
    ("ESB", "ESP"),
    ("GNE", "XOF"),
    ("ILP", "ILS"),
    ("ILR", "ILS"),
    ("ISJ", "ISK"),
    ("LAJ", "LAK"),
    ("MKN", "MKD"),
    ("MLF", "XOF"),
    ("MVQ", "MVR"),
    ("MXP", "MXN"),
    ("NFD", "CAD"),
    ("PEH", "PEN"),
    ("PEI", "PEN"),
    ("PLZ", "PLN"),
    ("SUR", "RUR"),
    ("TJR", "TJS"),
    ("UAK", "UAH"),
    ("UGS", "UGX"),
    ("UYN", "UYU"),
    ("VEB", "VEF"),
    ("YDD", "YER"),
    ("YUD", "CSD"),
    ("ZRN", "CDF"),
    ("ZRZ", "CDF"),
    ("ZWC", "ZWD"),
    ("YTL", "TRY"),
];

/// ISO 4217 codes, current and historic, with their minor-unit digits.
const ISO_CURRENCIES: &[(&str, u32)] = &[
    ("AED", 2),
    ("AFN", 2),
    ("ALL", 2),
    ("AMD", 2),
    ("ANG", 2),
    ("AOA", 2),
    ("ARS", 2),
    ("ATS", 2),
    ("AUD", 2),
    ("AWG", 2),
    ("AZN", 2),
    ("BAM", 2),
    ("BBD", 2),
    ("BDT", 2),
    ("BEF", 0),
    ("BGN", 2),
    ("BHD", 3),
    ("BIF", 0),
    ("BMD", 2),
    ("BND", 2),
    ("BOB", 2),
    ("BRL", 2),
    ("BSD", 2),
    ("BTN", 2),
    ("BWP", 2),
    ("BYN", 2),
    ("BZD", 2),
    ("CAD", 2),
    ("CDF", 2),
    ("CHF", 2),
    ("CLP", 0),
    ("CNY", 2),
    ("COP", 2),
    ("CRC", 2),
    ("CSD", 2),
    ("CUP", 2),
    ("CVE", 2),
    ("CYP", 2),
    ("CZK", 2),
    ("DEM", 2),
    ("DJF", 0),
    ("DKK", 2),
    ("DOP", 2),
    ("DZD", 2),
    ("EEK", 2),
    ("EGP", 2),
    ("ERN", 2),
    ("ESP", 0),
    ("ETB", 2),
    ("EUR", 2),
    ("FIM", 2),
    ("FJD", 2),
    ("FKP", 2),
    ("FRF", 2),
    ("GBP", 2),
    ("GEL", 2),
    ("GHS", 2),
    ("GIP", 2),
    ("GMD", 2),
    ("GNF", 0),
    ("GRD", 0),
    ("GTQ", 2),
    ("GYD", 2),
    ("HKD", 2),
    ("HNL", 2),
    ("HRK", 2),
    ("HTG", 2),
    ("HUF", 2),
    ("IDR", 2),
    ("IEP", 2),
    ("ILS", 2),
    ("INR", 2),
    ("IQD", 3),
    ("IRR", 2),
    ("ISK", 0),
    ("ITL", 0),
    ("JMD", 2),
    ("JOD", 3),
    ("JPY", 0),
    ("KES", 2),
    ("KGS", 2),
    ("KHR", 2),
    ("KMF", 0),
    ("KPW", 2),
    ("KRW", 0),
    ("KWD", 3),
    ("KYD", 2),
    ("KZT", 2),
    ("LAK", 2),
    ("LBP", 2),
    ("LKR", 2),
    ("LRD", 2),
    ("LSL", 2),
    ("LTL", 2),
    ("LUF", 0),
    ("LVL", 2),
    ("LYD", 3),
    ("MAD", 2),
    ("MDL", 2),
    ("MGA", 2),
    ("MKD", 2),
    ("MMK", 2),
    ("MNT", 2),
    ("MOP", 2),
    ("MRU", 2),
    ("MTL", 2),
    ("MUR", 2),
    ("MVR", 2),
    ("MWK", 2),
    ("MXN", 2),
    ("MYR", 2),
    ("MZN", 2),
    ("NAD", 2),
    ("NGN", 2),
    ("NIO", 2),
    ("NLG", 2),
    ("NOK", 2),
    ("NPR", 2),
    ("NZD", 2),
    ("OMR", 3),
    ("PAB", 2),
    ("PEN", 2),
    ("PGK", 2),
    ("PHP", 2),
    ("PKR", 2),
    ("PLN", 2),
    ("PTE", 0),
    ("PYG", 0),
    ("QAR", 2),
    ("RON", 2),
    ("RSD", 2),
    ("RUB", 2),
    ("RUR", 2),
    ("RWF", 0),
    ("SAR", 2),
    ("SBD", 2),
    ("SCR", 2),
    ("SDG", 2),
    ("SEK", 2),
    ("SGD", 2),
    ("SHP", 2),
    ("SIT", 2),
    ("SKK", 2),
    ("SLE", 2),
    ("SOS", 2),
    ("SRD", 2),
    ("SSP", 2),
    ("STN", 2),
    ("SVC", 2),
    ("SYP", 2),
    ("SZL", 2),
    ("THB", 2),
    ("TJS", 2),
    ("TMT", 2),
    ("TND", 3),
    ("TOP", 2),
    ("TRY", 2),
    ("TTD", 2),
    ("TWD", 2),
    ("TZS", 2),
    ("UAH", 2),
    ("UGX", 0),
    ("USD", 2),
    ("UYU", 2),
    ("UZS", 2),
    ("VEF", 2),
    ("VES", 2),
    ("VND", 0),
    ("VUV", 0),
    ("WST", 2),
    ("XAF", 0),
    ("XCD", 2),
    ("XOF", 0),
    ("XPF", 0),
    ("YER", 2),
    ("ZAR", 2),
    ("ZMW", 2),
    ("ZWD", 2),
    ("ZWL", 2),
];

impl Currency {
    /// Parses a persisted currency code, mapping retired codes to their
    /// modern equivalents first.
    pub fn parse(code: &str) -> Result<Currency> {
        let modern = OUTDATED_CODES
            .iter()
            .find(|(outdated, _)| *outdated == code)
            .map_or(code, |(_, replacement)| *replacement);

        ISO_CURRENCIES
            .iter()
            .find(|(iso, _)| *iso == modern)
            .map(|&(code, minor_units)| Currency { code, minor_units })
            .ok_or_else(|| Error::UnknownCurrencyCode(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Number of decimal digits in the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        self.minor_units
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Currency::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Currency::parse(&value)
    }
}

// Equivalent to `#[serde(try_from = "String")]`; written by hand because the
// derive would require `'de: 'static` due to the `&'static str` field.
impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::try_from(code).map_err(serde::de::Error::custom)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code.to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_current_codes() {
        assert_eq!(Currency::parse("USD").unwrap(), USD);
        assert_eq!(Currency::parse("JPY").unwrap().minor_units(), 0);
        assert_eq!(Currency::parse("KWD").unwrap().minor_units(), 3);
    }

    #[test]
    fn test_maps_outdated_codes() {
        assert_eq!(Currency::parse("").unwrap(), USD);
        assert_eq!(Currency::parse("ADF").unwrap(), EUR);
        assert_eq!(Currency::parse("XEU").unwrap(), EUR);
        assert_eq!(Currency::parse("NFD").unwrap(), CAD);
        assert_eq!(Currency::parse("YTL").unwrap().code(), "TRY");
        assert_eq!(Currency::parse("DDM").unwrap().code(), "DEM");
        assert_eq!(Currency::parse("SUR").unwrap().code(), "RUR");
    }

    #[test]
    fn test_unknown_code_names_the_offender() {
        let err = Currency::parse("BLAH").unwrap_err();
        assert_eq!(err, Error::UnknownCurrencyCode("BLAH".to_string()));
        assert!(err.to_string().contains("BLAH"));
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!(Currency::parse("usd").is_err());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&EUR).unwrap();
        assert_eq!(json, "\"EUR\"");

        let parsed: Currency = serde_json::from_str("\"XEU\"").unwrap();
        assert_eq!(parsed, EUR);

        assert!(serde_json::from_str::<Currency>("\"ZZZ\"").is_err());
    }
}
