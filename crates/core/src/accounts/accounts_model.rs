//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};
use crate::transactions::Transaction;
use crate::Result;

/// Kind of financial account, as reported by the institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Unknown,
    Checking,
    MoneyMarket,
    CreditCard,
    Savings,
    CreditLine,
    Brokerage,
    /// Wallet cash: tracked for spending but never carries a balance
    Cash,
    Manual,
    Investment,
    Certificate,
    Loan,
    Mortgage,
}

impl AccountType {
    /// Whether accounts of this type can hold a balance.
    pub fn has_balance(&self) -> bool {
        !matches!(self, AccountType::Cash)
    }
}

/// A balance reading for an account at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub balance: Decimal,
    pub date: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
}

/// Domain model representing a financial account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
    /// ISO 4217 code as persisted; parse with [`Account::currency`]
    pub currency: String,
    /// Cached current balance, when the storage layer already knows it
    pub balance: Option<Decimal>,
    /// Balance snapshots; only the most recent one matters
    #[serde(default)]
    pub balances: Vec<AccountBalance>,
}

impl Account {
    pub fn new(id: &str, name: &str, account_type: AccountType, currency: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            account_type,
            currency: currency.to_string(),
            balance: None,
            balances: Vec::new(),
        }
    }

    pub fn with_snapshot(mut self, balance: Decimal, date: NaiveDateTime) -> Self {
        self.balances.push(AccountBalance {
            balance,
            date,
            created_at: None,
        });
        self
    }

    pub fn with_cached_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::parse(&self.currency)
    }

    pub fn can_have_balance(&self) -> bool {
        self.account_type.has_balance()
    }

    /// The snapshot with the latest date. Ties keep the first one listed.
    pub fn latest_balance(&self) -> Option<&AccountBalance> {
        self.balances.iter().fold(None, |latest, candidate| match latest {
            Some(current) if current.date >= candidate.date => Some(current),
            _ => Some(candidate),
        })
    }

    pub fn balance_date(&self) -> Option<NaiveDateTime> {
        self.latest_balance().map(|snapshot| snapshot.date)
    }

    /// Current balance of a balance-capable account.
    ///
    /// Uses the cached balance when present; otherwise rolls the most recent
    /// snapshot forward with this account's reportable transactions posted
    /// after it. Returns `None` when the account cannot hold a balance or has
    /// nothing to derive one from.
    pub fn current_balance<'t, I>(&self, transactions: I) -> Result<Option<Money>>
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        if !self.can_have_balance() {
            return Ok(None);
        }

        let currency = self.currency()?;
        if let Some(cached) = self.balance {
            return Ok(Some(Money::new(cached, currency)));
        }

        let Some(snapshot) = self.latest_balance() else {
            return Ok(None);
        };

        let mut balance = Money::new(snapshot.balance, currency);
        for transaction in transactions.into_iter().filter(|t| {
            t.account_id == self.id
                && t.is_reportable()
                && t.posted_at.is_some_and(|posted| posted > snapshot.date)
        }) {
            balance = balance.checked_add(&transaction.money()?)?;
        }
        Ok(Some(balance))
    }
}
