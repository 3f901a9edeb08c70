use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::Result;
use crate::money::{Currency, Money, SumOfMoney};
use crate::tags::Tag;

/// Spending, earnings and their difference over a set of amounts.
///
/// Spending holds absolute values of negative amounts, earnings the
/// positive ones. `net` is always `earnings - spending`, with the counts
/// added together. Zero amounts are counted nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetarySummary {
    pub spending: SumOfMoney,
    pub earnings: SumOfMoney,
    pub net: SumOfMoney,
}

impl MonetarySummary {
    pub fn new(spending: SumOfMoney, earnings: SumOfMoney) -> Result<Self> {
        let net = SumOfMoney::new(
            earnings.amount.checked_sub(&spending.amount)?,
            earnings.count + spending.count,
        );
        Ok(Self {
            spending,
            earnings,
            net,
        })
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            spending: SumOfMoney::zero(currency),
            earnings: SumOfMoney::zero(currency),
            net: SumOfMoney::zero(currency),
        }
    }

    /// Splits `amounts`, all in `currency`, into spending and earnings.
    pub fn summarize<'a, I>(currency: Currency, amounts: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        let mut spending = SumOfMoney::zero(currency);
        let mut earnings = SumOfMoney::zero(currency);

        for amount in amounts {
            if amount.is_positive() {
                earnings = earnings.add(amount)?;
            } else if amount.is_negative() {
                spending = spending.add(&amount.abs())?;
            }
        }

        Self::new(spending, earnings)
    }
}

/// A [`MonetarySummary`] plus one summary per tag seen in the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetarySummaryWithSplits {
    #[serde(flatten)]
    pub summary: MonetarySummary,
    pub splits: BTreeMap<Tag, MonetarySummary>,
}

impl MonetarySummaryWithSplits {
    pub fn summarize<'a, I>(
        currency: Currency,
        amounts: I,
        splits: &BTreeMap<Tag, Vec<Money>>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        let summary = MonetarySummary::summarize(currency, amounts)?;
        let splits = splits
            .iter()
            .map(|(tag, values)| {
                MonetarySummary::summarize(currency, values).map(|s| (tag.clone(), s))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { summary, splits })
    }

    pub fn spending(&self) -> &SumOfMoney {
        &self.summary.spending
    }

    pub fn earnings(&self) -> &SumOfMoney {
        &self.summary.earnings
    }

    pub fn net(&self) -> &SumOfMoney {
        &self.summary.net
    }

    pub fn split(&self, tag: &str) -> Option<&MonetarySummary> {
        self.splits.get(&Tag::new(tag))
    }
}
