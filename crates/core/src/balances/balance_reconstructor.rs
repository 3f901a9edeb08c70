use chrono::NaiveDateTime;
use log::debug;
use std::collections::BTreeMap;

use crate::accounts::Account;
use crate::errors::Result;
use crate::fx::FxConverterTrait;
use crate::money::{Currency, Money};
use crate::transactions::Transaction;
use crate::utils::time_utils;

/// An account's balance as of `date`, walked backward through history.
#[derive(Debug, Clone)]
struct RunningBalance {
    balance: Money,
    date: NaiveDateTime,
}

/// Derives, for each transaction, the combined balance of a set of accounts
/// immediately after that transaction posted.
///
/// Each balance-capable account is seeded from its current balance as of its
/// most recent snapshot (or "now"), then transactions are undone newest to
/// oldest. Every reading sums all accounts' running balances, each converted
/// into the target currency at that account's own running date.
pub struct BalanceReconstructor<'a> {
    accounts: &'a [Account],
    currency: Currency,
    fx: &'a dyn FxConverterTrait,
    now: NaiveDateTime,
}

impl<'a> BalanceReconstructor<'a> {
    pub fn new(accounts: &'a [Account], currency: Currency, fx: &'a dyn FxConverterTrait) -> Self {
        Self {
            accounts,
            currency,
            fx,
            now: time_utils::now(),
        }
    }

    /// Overrides the instant used as the balance date of accounts without
    /// a snapshot.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Returns one reading per input transaction, in input order.
    /// Transactions without a posting date get `None`.
    pub fn reconstruct(&self, transactions: &[&Transaction]) -> Result<Vec<Option<Money>>> {
        debug!(
            "Reconstructing {} balances over {} accounts in {}",
            transactions.len(),
            self.accounts.len(),
            self.currency
        );

        let mut running = self.seed(transactions)?;

        let mut dated: Vec<(usize, NaiveDateTime)> = transactions
            .iter()
            .enumerate()
            .filter_map(|(index, t)| t.posted_at.map(|posted| (index, posted)))
            .collect();
        dated.sort_by(|a, b| b.1.cmp(&a.1));

        let mut balances = vec![None; transactions.len()];
        for (index, posted_at) in dated {
            balances[index] = Some(self.total(&running)?);

            let transaction = transactions[index];
            if let Some(account_balance) = running.get_mut(transaction.account_id.as_str()) {
                account_balance.balance =
                    account_balance.balance.checked_sub(&transaction.money()?)?;
                account_balance.date = posted_at;
            }
        }

        Ok(balances)
    }

    fn seed(&self, transactions: &[&Transaction]) -> Result<BTreeMap<&'a str, RunningBalance>> {
        let mut running = BTreeMap::new();
        for account in self.accounts {
            if let Some(balance) = account.current_balance(transactions.iter().copied())? {
                let date = account.balance_date().unwrap_or(self.now);
                running.insert(account.id.as_str(), RunningBalance { balance, date });
            }
        }
        Ok(running)
    }

    fn total(&self, running: &BTreeMap<&'a str, RunningBalance>) -> Result<Money> {
        running
            .values()
            .try_fold(Money::zero(self.currency), |total, account_balance| {
                let converted =
                    account_balance
                        .balance
                        .convert(self.fx, self.currency, account_balance.date)?;
                total.checked_add(&converted)
            })
    }
}
