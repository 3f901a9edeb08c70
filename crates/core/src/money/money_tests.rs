use super::currency::{EUR, JPY, USD};
use super::*;
use crate::errors::Error;
use crate::fx::ExchangeRateTable;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use std::cmp::Ordering;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, USD)
}

// ==================== Arithmetic ====================

#[test]
fn test_add_and_subtract_same_currency() {
    let a = usd(dec!(10.25));
    let b = usd(dec!(2.50));

    assert_eq!(a.checked_add(&b).unwrap(), usd(dec!(12.75)));
    assert_eq!(a.checked_sub(&b).unwrap(), usd(dec!(7.75)));
    assert_eq!(a.checked_cmp(&b).unwrap(), Ordering::Greater);
}

#[test]
fn test_mixed_currency_arithmetic_is_rejected() {
    let dollars = usd(dec!(1));
    let euros = Money::new(dec!(1), EUR);

    let expected = Error::CurrencyMismatch {
        expected: "USD".to_string(),
        actual: "EUR".to_string(),
    };
    assert_eq!(dollars.checked_add(&euros).unwrap_err(), expected);
    assert_eq!(dollars.checked_sub(&euros).unwrap_err(), expected);
    assert_eq!(dollars.checked_cmp(&euros).unwrap_err(), expected);
}

#[test]
fn test_sign_helpers() {
    assert_eq!(usd(dec!(-3)).signum(), -1);
    assert_eq!(usd(dec!(0)).signum(), 0);
    assert_eq!(usd(dec!(0.01)).signum(), 1);
    assert_eq!(usd(dec!(-3)).abs(), usd(dec!(3)));
    assert_eq!(usd(dec!(-3)).negate(), usd(dec!(3)));
    assert_eq!(usd(dec!(4)).multiply(dec!(-0.5)), usd(dec!(-2)));
    assert!(Money::zero(USD).is_zero());
}

#[test]
fn test_sum_of_empty_is_zero() {
    let values: Vec<Money> = Vec::new();
    assert_eq!(Money::sum(USD, &values).unwrap(), Money::zero(USD));

    let values = vec![usd(dec!(1.10)), usd(dec!(2.20))];
    assert_eq!(Money::sum(USD, &values).unwrap(), usd(dec!(3.30)));
}

#[test]
fn test_from_code_surfaces_unknown_codes() {
    assert_eq!(
        Money::from_code(dec!(5), "QQQ").unwrap_err(),
        Error::UnknownCurrencyCode("QQQ".to_string())
    );
    assert_eq!(Money::from_code(dec!(5), "XEU").unwrap().currency(), EUR);
}

// ==================== Rounding ====================

#[test]
fn test_rounded_uses_minor_units_and_bankers_rounding() {
    assert_eq!(usd(dec!(1.005)).rounded().amount(), dec!(1.00));
    assert_eq!(usd(dec!(1.015)).rounded().amount(), dec!(1.02));
    assert_eq!(Money::new(dec!(152.5), JPY).rounded().amount(), dec!(152));
}

#[test]
fn test_display_renders_rounded_amount_and_code() {
    assert_eq!(usd(dec!(1487.6649)).to_string(), "1487.66 USD");
}

// ==================== Conversion ====================

#[test]
fn test_convert_through_pivot() {
    let mut table = ExchangeRateTable::new(USD);
    table
        .add_rate(EUR, USD, at(2009, 1, 1), dec!(0.79))
        .unwrap();

    let converted = usd(dec!(100))
        .convert(&table, EUR, at(2009, 2, 1))
        .unwrap();
    assert_eq!(converted, Money::new(dec!(79), EUR));

    let back = converted.convert(&table, USD, at(2009, 2, 1)).unwrap();
    assert_eq!(back.rounded(), usd(dec!(100.00)));
}

#[test]
fn test_convert_same_currency_is_identity() {
    let table = ExchangeRateTable::new(USD);
    let money = Money::new(dec!(12.3456), EUR);
    assert_eq!(money.convert(&table, EUR, at(2009, 1, 1)).unwrap(), money);
}

#[test]
fn test_convert_zero_needs_no_rate() {
    let table = ExchangeRateTable::new(USD);
    let converted = Money::zero(EUR).convert(&table, JPY, at(2009, 1, 1)).unwrap();
    assert_eq!(converted, Money::zero(JPY));
}

// ==================== SumOfMoney ====================

#[test]
fn test_sum_of_money_counts_each_value() {
    let total = SumOfMoney::zero(USD)
        .add(&usd(dec!(10.50)))
        .unwrap()
        .add(&usd(dec!(-0.50)))
        .unwrap();

    assert_eq!(total, SumOfMoney::new(usd(dec!(10.00)), 2));
}

#[test]
fn test_sum_of_money_merge_and_mismatch() {
    let a = SumOfMoney::new(usd(dec!(5)), 1);
    let b = SumOfMoney::new(usd(dec!(7)), 3);
    assert_eq!(a.merge(&b).unwrap(), SumOfMoney::new(usd(dec!(12)), 4));

    let euros = SumOfMoney::new(Money::new(dec!(1), EUR), 1);
    assert!(matches!(
        a.merge(&euros),
        Err(Error::CurrencyMismatch { .. })
    ));
}

#[test]
fn test_sum_of_money_serializes_camel_case() {
    let json = serde_json::to_value(SumOfMoney::new(usd(dec!(3)), 1)).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["amount"]["currency"], "USD");
}
