use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::summary_model::MonetarySummaryWithSplits;
use crate::errors::Result;
use crate::fx::FxConverterTrait;
use crate::intervals::{Interval, IntervalKind};
use crate::money::{Currency, Money};
use crate::tags::Tag;
use crate::transactions::Transaction;

/// Buckets transactions by calendar interval and summarizes each bucket.
pub struct IntervalSummarizer<'a> {
    fx: &'a dyn FxConverterTrait,
}

impl<'a> IntervalSummarizer<'a> {
    pub fn new(fx: &'a dyn FxConverterTrait) -> Self {
        Self { fx }
    }

    /// Returns one summary per interval of `kind` covering `range`, empty
    /// buckets included.
    ///
    /// Each transaction contributes its amount net of `filtered_tags`
    /// claims. Per-tag splits use each tagged amount's own converted value.
    pub fn summarize(
        &self,
        transactions: &[Transaction],
        range: &Interval,
        kind: IntervalKind,
        currency: Currency,
        filtered_tags: &HashSet<Tag>,
    ) -> Result<BTreeMap<Interval, MonetarySummaryWithSplits>> {
        debug!(
            "Summarizing {} transactions {} over {} in {}",
            transactions.len(),
            kind,
            range,
            currency
        );

        let mut amounts: HashMap<Interval, Vec<Money>> = HashMap::new();
        let mut splits: HashMap<Interval, BTreeMap<Tag, Vec<Money>>> = HashMap::new();

        for transaction in transactions.iter().filter(|t| t.is_analyzable()) {
            let Some(posted_at) = transaction.posted_at else {
                warn!("Skipping transaction {} without a posting date", transaction.id);
                continue;
            };
            let interval = kind.current_interval(posted_at);

            amounts.entry(interval).or_default().push(
                transaction.converted_amount_excluding_tags(filtered_tags, self.fx, currency)?,
            );

            let tag_splits = splits.entry(interval).or_default();
            for tagged in &transaction.tagged_amounts {
                tag_splits
                    .entry(tagged.tag.clone())
                    .or_default()
                    .push(transaction.converted_tagged_money(tagged, self.fx, currency)?);
            }
        }

        let no_splits = BTreeMap::new();
        kind.intervals_covering(range)
            .map(|interval| -> Result<(Interval, MonetarySummaryWithSplits)> {
                let summary = MonetarySummaryWithSplits::summarize(
                    currency,
                    amounts.get(&interval).into_iter().flatten(),
                    splits.get(&interval).unwrap_or(&no_splits),
                )?;
                Ok((interval, summary))
            })
            .collect()
    }
}
