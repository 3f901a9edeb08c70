use chrono::NaiveDateTime;
use log::debug;
use std::collections::BTreeMap;

use crate::accounts::Account;
use crate::errors::Result;
use crate::fx::FxConverterTrait;
use crate::intervals::{Interval, IntervalKind};
use crate::money::{Currency, Money};
use crate::transactions::{Transaction, TransactionListBuilder};

/// Reports the combined balance of a set of accounts at the end of each
/// calendar interval.
pub struct NetWorthSummarizer<'a> {
    fx: &'a dyn FxConverterTrait,
    now: Option<NaiveDateTime>,
}

impl<'a> NetWorthSummarizer<'a> {
    pub fn new(fx: &'a dyn FxConverterTrait) -> Self {
        Self { fx, now: None }
    }

    /// Overrides the balance date used for accounts without a snapshot.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// For each interval covering `range`, the running balance after the
    /// latest transaction posted at or before the interval's end, or zero
    /// when nothing precedes it.
    pub fn summarize(
        &self,
        accounts: &[Account],
        transactions: &[Transaction],
        range: &Interval,
        kind: IntervalKind,
        currency: Currency,
    ) -> Result<BTreeMap<Interval, Money>> {
        debug!(
            "Summarizing net worth of {} accounts {} over {}",
            accounts.len(),
            kind,
            range
        );

        let mut builder = TransactionListBuilder::new(currency, self.fx)
            .accounts(accounts)
            .calculate_balances(true);
        if let Some(now) = self.now {
            builder = builder.now(now);
        }
        let list = builder.build(transactions)?;

        // Items are newest first, so the first balance seen for an instant
        // is the one after every transaction posted at it.
        let mut balances_by_date: BTreeMap<NaiveDateTime, Money> = BTreeMap::new();
        for item in &list.items {
            if let (Some(posted_at), Some(balance)) = (item.transaction.posted_at, item.balance) {
                balances_by_date.entry(posted_at).or_insert(balance);
            }
        }

        Ok(kind
            .intervals_covering(range)
            .map(|interval| {
                let balance = balances_by_date
                    .range(..=interval.end)
                    .next_back()
                    .map(|(_, balance)| *balance)
                    .unwrap_or_else(|| Money::zero(currency));
                (interval, balance)
            })
            .collect())
    }
}
