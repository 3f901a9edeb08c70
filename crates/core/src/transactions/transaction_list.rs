use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

use super::transactions_model::Transaction;
use crate::accounts::Account;
use crate::balances::BalanceReconstructor;
use crate::errors::Result;
use crate::fx::FxConverterTrait;
use crate::money::{Currency, Money};
use crate::tags::Tag;

/// One row of a transaction list, with its running balance when computed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListItem<'t> {
    pub transaction: &'t Transaction,
    pub balance: Option<Money>,
}

/// A filtered, ordered and paginated page of transactions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionList<'t> {
    pub items: Vec<TransactionListItem<'t>>,
    /// Size of the filtered set before pagination
    pub total_count: usize,
}

/// Builds a reportable transaction list: visibility and content filters,
/// newest-first ordering, limit-then-offset pagination and optional running
/// balances.
pub struct TransactionListBuilder<'a> {
    currency: Currency,
    fx: &'a dyn FxConverterTrait,
    accounts: &'a [Account],
    tags: HashSet<Tag>,
    merchants: HashSet<String>,
    amount: Option<Decimal>,
    query: Option<String>,
    unedited: bool,
    offset: usize,
    limit: Option<usize>,
    calculate_balances: bool,
    now: Option<NaiveDateTime>,
}

impl<'a> TransactionListBuilder<'a> {
    pub fn new(currency: Currency, fx: &'a dyn FxConverterTrait) -> Self {
        Self {
            currency,
            fx,
            accounts: &[],
            tags: HashSet::new(),
            merchants: HashSet::new(),
            amount: None,
            query: None,
            unedited: false,
            offset: 0,
            limit: None,
            calculate_balances: true,
            now: None,
        }
    }

    /// Restricts the list to these accounts, whose balances also seed the
    /// running balance column.
    pub fn accounts(mut self, accounts: &'a [Account]) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn tags<I: IntoIterator<Item = Tag>>(mut self, tags: I) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn merchants<I, S>(mut self, merchants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merchants = merchants.into_iter().map(Into::into).collect();
        self
    }

    /// Keeps only transactions whose signed amount equals `amount`.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Case-insensitive substring match over description, merchant, note
    /// and tag names.
    pub fn query(mut self, query: &str) -> Self {
        self.query = Some(query.to_lowercase());
        self
    }

    /// Keeps only transactions the user has not categorized yet.
    pub fn unedited(mut self, unedited: bool) -> Self {
        self.unedited = unedited;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn calculate_balances(mut self, calculate_balances: bool) -> Self {
        self.calculate_balances = calculate_balances;
        self
    }

    pub fn now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build<'t>(&self, transactions: &'t [Transaction]) -> Result<TransactionList<'t>> {
        let account_ids: HashSet<&str> = self.accounts.iter().map(|a| a.id.as_str()).collect();

        let filtered: Vec<&'t Transaction> = transactions
            .iter()
            .filter(|t| t.is_reportable())
            .filter(|t| account_ids.is_empty() || account_ids.contains(t.account_id.as_str()))
            .filter(|t| self.matches_content_filters(t))
            .collect();
        let total_count = filtered.len();

        debug!(
            "Listing {} of {} transactions (offset {}, limit {:?})",
            total_count,
            transactions.len(),
            self.offset,
            self.limit
        );

        let filtered = stable_sort_by(&filtered, &|a, b| newest_first(a, b));

        let balances = if self.should_calculate_balances() {
            let mut reconstructor = BalanceReconstructor::new(self.accounts, self.currency, self.fx);
            if let Some(now) = self.now {
                reconstructor = reconstructor.with_now(now);
            }
            reconstructor.reconstruct(&filtered)?
        } else {
            vec![None; filtered.len()]
        };

        let mut items: Vec<TransactionListItem<'t>> = filtered
            .into_iter()
            .zip(balances)
            .map(|(transaction, balance)| TransactionListItem {
                transaction,
                balance,
            })
            .collect();

        // Limit applies before offset
        if let Some(limit) = self.limit {
            items.truncate(self.offset.saturating_add(limit));
        }
        items.drain(..self.offset.min(items.len()));

        Ok(TransactionList { items, total_count })
    }

    /// A running balance over a partial category is meaningless, so any
    /// content filter turns balances off.
    fn should_calculate_balances(&self) -> bool {
        self.calculate_balances
            && self.tags.is_empty()
            && self.merchants.is_empty()
            && self.amount.is_none()
            && self.query.is_none()
            && !self.unedited
    }

    fn matches_content_filters(&self, transaction: &Transaction) -> bool {
        if !self.tags.is_empty() && !transaction.has_any_tag(&self.tags) {
            return false;
        }

        if !self.merchants.is_empty()
            && !transaction
                .merchant
                .as_ref()
                .is_some_and(|merchant| self.merchants.contains(merchant))
        {
            return false;
        }

        if self.amount.is_some_and(|amount| amount != transaction.amount) {
            return false;
        }

        if let Some(query) = &self.query {
            if !matches_query(transaction, query) {
                return false;
            }
        }

        if self.unedited && !is_unedited(transaction) {
            return false;
        }

        true
    }
}

/// Newest posting date first (undated last), then higher sequence, then
/// later creation. Sequence and creation only decide between two
/// transactions that both carry them; otherwise the pair is untied on that
/// key and falls through to the next one.
fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.posted_at
        .cmp(&a.posted_at)
        .then_with(|| descending_if_both(a.sequence, b.sequence))
        .then_with(|| descending_if_both(a.created_at, b.created_at))
}

fn descending_if_both<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        _ => Ordering::Equal,
    }
}

/// Stable merge sort. `newest_first` is not transitive once keys go
/// missing, and `slice::sort_by` may panic on such an order.
fn stable_sort_by<T: Copy>(items: &[T], compare: &dyn Fn(&T, &T) -> Ordering) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }

    let (left, right) = items.split_at(items.len() / 2);
    let (left, right) = (stable_sort_by(left, compare), stable_sort_by(right, compare));

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if compare(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

fn matches_query(transaction: &Transaction, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    transaction.description.as_deref().is_some_and(contains)
        || transaction.merchant.as_deref().is_some_and(contains)
        || transaction.note.as_deref().is_some_and(contains)
        || transaction
            .tagged_amounts
            .iter()
            .any(|ta| contains(ta.tag.name()))
}

fn is_unedited(transaction: &Transaction) -> bool {
    transaction.merchant.is_none() || (!transaction.is_tagged() && !transaction.is_transfer())
}
