//! Tests for account domain models and current-balance derivation.

#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountType};
    use crate::money::currency::{EUR, USD};
    use crate::money::Money;
    use crate::transactions::{Transaction, TransactionStatus};
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2009, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn checking() -> Account {
        Account::new("checking", "Checking", AccountType::Checking, "USD")
    }

    // ==================== AccountType Tests ====================

    #[test]
    fn test_only_cash_accounts_lack_a_balance() {
        assert!(!AccountType::Cash.has_balance());
        assert!(AccountType::Checking.has_balance());
        assert!(AccountType::CreditCard.has_balance());
        assert!(AccountType::Unknown.has_balance());
    }

    #[test]
    fn test_account_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountType::CreditCard).unwrap(),
            "\"CREDIT_CARD\""
        );
        assert_eq!(
            serde_json::from_str::<AccountType>("\"MONEY_MARKET\"").unwrap(),
            AccountType::MoneyMarket
        );
    }

    // ==================== Snapshot Tests ====================

    #[test]
    fn test_latest_balance_picks_most_recent_snapshot() {
        let account = checking()
            .with_snapshot(dec!(10), date(1, 5))
            .with_snapshot(dec!(30), date(3, 5))
            .with_snapshot(dec!(20), date(2, 5));

        let latest = account.latest_balance().unwrap();
        assert_eq!(latest.balance, dec!(30));
        assert_eq!(account.balance_date(), Some(date(3, 5)));
    }

    #[test]
    fn test_latest_balance_tie_keeps_first_listed() {
        let account = checking()
            .with_snapshot(dec!(10), date(1, 5))
            .with_snapshot(dec!(99), date(1, 5));

        assert_eq!(account.latest_balance().unwrap().balance, dec!(10));
    }

    #[test]
    fn test_no_snapshots_means_no_balance_date() {
        assert!(checking().latest_balance().is_none());
        assert!(checking().balance_date().is_none());
    }

    // ==================== Current Balance Tests ====================

    #[test]
    fn test_current_balance_prefers_cached_value() {
        let account = checking()
            .with_cached_balance(dec!(42.10))
            .with_snapshot(dec!(1), date(1, 1));
        let transactions = vec![Transaction::new("t1", "checking", dec!(-5), "USD", date(2, 1))];

        let balance = account.current_balance(&transactions).unwrap();
        assert_eq!(balance, Some(Money::new(dec!(42.10), USD)));
    }

    #[test]
    fn test_current_balance_rolls_snapshot_forward() {
        let account = checking().with_snapshot(dec!(100), date(1, 10));
        let transactions = vec![
            // before and at the snapshot: already reflected
            Transaction::new("old", "checking", dec!(-7), "USD", date(1, 1)),
            Transaction::new("same-day", "checking", dec!(-9), "USD", date(1, 10)),
            Transaction::new("later", "checking", dec!(-25), "USD", date(1, 12)),
            Transaction::new("paycheck", "checking", dec!(40), "USD", date(1, 15)),
            Transaction::new("other-account", "savings", dec!(1000), "USD", date(1, 15)),
            Transaction::new("gone", "checking", dec!(-500), "USD", date(1, 15))
                .with_status(TransactionStatus::Deleted),
        ];

        let balance = account.current_balance(&transactions).unwrap();
        assert_eq!(balance, Some(Money::new(dec!(115), USD)));
    }

    #[test]
    fn test_current_balance_in_account_currency() {
        let account = Account::new("euro", "Euro", AccountType::Savings, "EUR")
            .with_snapshot(dec!(5), date(1, 1));

        let balance = account.current_balance(std::iter::empty()).unwrap();
        assert_eq!(balance, Some(Money::new(dec!(5), EUR)));
    }

    #[test]
    fn test_cash_account_has_no_current_balance() {
        let wallet = Account::new("wallet", "Wallet", AccountType::Cash, "USD")
            .with_cached_balance(dec!(20))
            .with_snapshot(dec!(20), date(1, 1));

        assert_eq!(wallet.current_balance(std::iter::empty()).unwrap(), None);
    }

    #[test]
    fn test_account_without_history_has_no_current_balance() {
        assert_eq!(checking().current_balance(std::iter::empty()).unwrap(), None);
    }

    #[test]
    fn test_unknown_account_currency_is_an_error() {
        let account = Account::new("odd", "Odd", AccountType::Checking, "ZZZ")
            .with_cached_balance(dec!(1));

        assert!(account.current_balance(std::iter::empty()).is_err());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_account_deserializes_from_camel_case() {
        let json = r#"{
            "id": "acc-1",
            "name": "Visa",
            "accountType": "CREDIT_CARD",
            "currency": "USD",
            "balance": null,
            "balances": [
                { "balance": -250.5, "date": "2009-02-01T00:00:00", "createdAt": null }
            ]
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::CreditCard);
        assert_eq!(account.latest_balance().unwrap().balance, dec!(-250.5));
        assert_eq!(account.currency().unwrap(), USD);
    }

    #[test]
    fn test_account_type_defaults_to_unknown() {
        let json = r#"{ "id": "a", "name": "A", "currency": "USD", "balance": 3 }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Unknown);
        assert!(account.balances.is_empty());
        assert_eq!(account.balance, Some(dec!(3)));
    }
}
