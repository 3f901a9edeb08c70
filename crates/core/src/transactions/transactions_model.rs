//! Transaction domain models and split-filtering arithmetic.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{Result, ValidationError};
use crate::fx::FxConverterTrait;
use crate::money::{Currency, Money};
use crate::tags::Tag;

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Active,
    Deleted,
    Archived,
    Disabled,
}

/// A tag attached to a transaction, optionally claiming only part of its
/// amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedAmount {
    pub tag: Tag,
    /// Explicit split amount; `None` claims the whole transaction
    pub amount: Option<Decimal>,
}

impl TaggedAmount {
    pub fn whole(tag: &str) -> Self {
        Self {
            tag: Tag::new(tag),
            amount: None,
        }
    }

    pub fn split(tag: &str, amount: Decimal) -> Self {
        Self {
            tag: Tag::new(tag),
            amount: Some(amount),
        }
    }
}

/// Domain model representing a posted (or pending) account transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    /// Signed amount: negative for spending, positive for earnings
    pub amount: Decimal,
    /// ISO 4217 code of the owning account, as persisted
    pub currency: String,
    pub posted_at: Option<NaiveDateTime>,
    pub sequence: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: TransactionStatus,
    /// Identifier of the mirrored transaction when this is a transfer
    pub transfer_id: Option<String>,
    /// Statement description as imported from the institution
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub tagged_amounts: Vec<TaggedAmount>,
}

impl Transaction {
    pub fn new(
        id: &str,
        account_id: &str,
        amount: Decimal,
        currency: &str,
        posted_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.to_string(),
            account_id: account_id.to_string(),
            amount,
            currency: currency.to_string(),
            posted_at: Some(posted_at),
            sequence: None,
            created_at: None,
            status: TransactionStatus::Active,
            transfer_id: None,
            description: None,
            merchant: None,
            note: None,
            tagged_amounts: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tagged_amounts.push(TaggedAmount::whole(tag));
        self
    }

    pub fn with_split(mut self, tag: &str, amount: Decimal) -> Self {
        self.tagged_amounts.push(TaggedAmount::split(tag, amount));
        self
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_transfer(mut self, transfer_id: &str) -> Self {
        self.transfer_id = Some(transfer_id.to_string());
        self
    }

    pub fn with_merchant(mut self, merchant: &str) -> Self {
        self.merchant = Some(merchant.to_string());
        self
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::parse(&self.currency)
    }

    /// The signed amount as money in the transaction's currency.
    pub fn money(&self) -> Result<Money> {
        Ok(Money::new(self.amount, self.currency()?))
    }

    pub fn is_deleted(&self) -> bool {
        self.status == TransactionStatus::Deleted
    }

    pub fn is_disabled(&self) -> bool {
        self.status == TransactionStatus::Disabled
    }

    pub fn is_transfer(&self) -> bool {
        self.transfer_id.is_some()
    }

    /// Visible in transaction lists.
    pub fn is_reportable(&self) -> bool {
        !self.is_deleted() && !self.is_disabled()
    }

    /// Counted by summaries and hierarchies.
    pub fn is_analyzable(&self) -> bool {
        self.is_reportable() && !self.is_transfer()
    }

    pub fn is_tagged(&self) -> bool {
        !self.tagged_amounts.is_empty()
    }

    pub fn has_any_tag(&self, tags: &HashSet<Tag>) -> bool {
        self.tagged_amounts.iter().any(|ta| tags.contains(&ta.tag))
    }

    /// A tagged amount is a split when it claims something other than the
    /// whole transaction amount.
    pub fn is_split(&self, tagged: &TaggedAmount) -> bool {
        tagged.amount.is_some_and(|amount| amount != self.amount)
    }

    /// The portion of this transaction claimed by `tagged`.
    pub fn tagged_money(&self, tagged: &TaggedAmount) -> Result<Money> {
        Ok(Money::new(
            tagged.amount.unwrap_or(self.amount),
            self.currency()?,
        ))
    }

    pub fn require_posted_at(&self) -> Result<NaiveDateTime> {
        self.posted_at
            .ok_or_else(|| ValidationError::MissingPostingDate(self.id.clone()).into())
    }

    /// The portion of this transaction not claimed by any of `filtered`.
    ///
    /// Claims are summed by absolute value and subtracted from the absolute
    /// amount; the remainder is floored at zero and takes the transaction's
    /// sign. A tag without a split claims the whole amount.
    pub fn amount_excluding_tags(&self, filtered: &HashSet<Tag>) -> Result<Money> {
        let money = self.money()?;
        if filtered.is_empty() {
            return Ok(money);
        }

        let claimed: Decimal = self
            .tagged_amounts
            .iter()
            .filter(|ta| filtered.contains(&ta.tag))
            .map(|ta| ta.amount.unwrap_or(self.amount).abs())
            .sum();

        let remainder = self.amount.abs() - claimed;
        if remainder <= Decimal::ZERO {
            return Ok(Money::zero(money.currency()));
        }
        Ok(Money::new(remainder, money.currency()).multiply(Decimal::from(money.signum())))
    }

    /// The whole amount converted into `target` at the posting date.
    pub fn converted_money(&self, fx: &dyn FxConverterTrait, target: Currency) -> Result<Money> {
        self.money()?.convert(fx, target, self.require_posted_at()?)
    }

    /// A tagged amount converted into `target` at the posting date.
    pub fn converted_tagged_money(
        &self,
        tagged: &TaggedAmount,
        fx: &dyn FxConverterTrait,
        target: Currency,
    ) -> Result<Money> {
        self.tagged_money(tagged)?
            .convert(fx, target, self.require_posted_at()?)
    }

    /// The unfiltered remainder converted into `target` at the posting date.
    pub fn converted_amount_excluding_tags(
        &self,
        filtered: &HashSet<Tag>,
        fx: &dyn FxConverterTrait,
        target: Currency,
    ) -> Result<Money> {
        self.amount_excluding_tags(filtered)?
            .convert(fx, target, self.require_posted_at()?)
    }
}
