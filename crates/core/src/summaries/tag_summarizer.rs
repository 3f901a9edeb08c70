use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};

use super::summary_model::MonetarySummary;
use crate::errors::Result;
use crate::fx::FxConverterTrait;
use crate::money::{Currency, Money};
use crate::tags::Tag;
use crate::transactions::Transaction;

/// Summarizes analyzable transactions per tag, with no time bucketing.
pub struct TagSummarizer<'a> {
    fx: &'a dyn FxConverterTrait,
}

impl<'a> TagSummarizer<'a> {
    pub fn new(fx: &'a dyn FxConverterTrait) -> Self {
        Self { fx }
    }

    /// Each distinct tag on a transaction contributes that tag's own amount
    /// once; a repeated tag keeps its first tagged amount.
    pub fn summarize<'t, I>(
        &self,
        transactions: I,
        currency: Currency,
    ) -> Result<BTreeMap<Tag, MonetarySummary>>
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        let mut grouped: BTreeMap<Tag, Vec<Money>> = BTreeMap::new();
        let mut seen = 0usize;

        for transaction in transactions.into_iter().filter(|t| t.is_analyzable()) {
            seen += 1;
            if transaction.posted_at.is_none() {
                warn!("Skipping transaction {} without a posting date", transaction.id);
                continue;
            }

            let mut counted: HashSet<&Tag> = HashSet::new();
            for tagged in &transaction.tagged_amounts {
                if !counted.insert(&tagged.tag) {
                    continue;
                }
                grouped
                    .entry(tagged.tag.clone())
                    .or_default()
                    .push(transaction.converted_tagged_money(tagged, self.fx, currency)?);
            }
        }

        debug!(
            "Summarized {} analyzable transactions into {} tags",
            seen,
            grouped.len()
        );

        grouped
            .into_iter()
            .map(|(tag, amounts)| {
                MonetarySummary::summarize(currency, &amounts).map(|summary| (tag, summary))
            })
            .collect()
    }
}
