use log::{debug, warn};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use super::hierarchy_model::{
    HierarchyBucket, HierarchyType, TagHierarchy, TagHierarchyNode, TagImportanceScheme,
};
use crate::constants::DEFAULT_MAX_TAGS;
use crate::errors::{Result, ValidationError};
use crate::fx::FxConverterTrait;
use crate::money::{Currency, Money, SumOfMoney};
use crate::settings::AnalyticsSettings;
use crate::summaries::TagSummarizer;
use crate::tags::Tag;
use crate::transactions::Transaction;

/// Candidate tags still available at a level, with their importance.
type TagPool = BTreeMap<Tag, Decimal>;

/// Builds a [`TagHierarchy`] from a transaction set.
///
/// Every level keeps at most `max_tags` ranked buckets plus an "other"
/// bucket for the rest. A tag used at one level is unavailable below it.
pub struct TagHierarchyBuilder<'a> {
    currency: Currency,
    fx: &'a dyn FxConverterTrait,
    scheme: TagImportanceScheme,
    hierarchy_type: HierarchyType,
    filtered_tags: HashSet<Tag>,
    max_tags: usize,
}

impl<'a> TagHierarchyBuilder<'a> {
    pub fn new(currency: Currency, fx: &'a dyn FxConverterTrait) -> Self {
        Self {
            currency,
            fx,
            scheme: TagImportanceScheme::default(),
            hierarchy_type: HierarchyType::default(),
            filtered_tags: HashSet::new(),
            max_tags: DEFAULT_MAX_TAGS,
        }
    }

    pub fn from_settings(
        settings: &AnalyticsSettings,
        currency: Currency,
        fx: &'a dyn FxConverterTrait,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(currency, fx)
            .scheme(settings.importance_scheme)
            .hierarchy_type(settings.hierarchy_type)
            .max_tags(settings.max_tags))
    }

    pub fn scheme(mut self, scheme: TagImportanceScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn hierarchy_type(mut self, hierarchy_type: HierarchyType) -> Self {
        self.hierarchy_type = hierarchy_type;
        self
    }

    /// Transactions carrying any of these tags are left out entirely.
    pub fn filtered_tags<I: IntoIterator<Item = Tag>>(mut self, tags: I) -> Self {
        self.filtered_tags = tags.into_iter().collect();
        self
    }

    pub fn max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn build(&self, transactions: &[Transaction]) -> Result<TagHierarchy> {
        if self.max_tags == 0 {
            return Err(
                ValidationError::InvalidInput("maxTags must be at least 1".to_string()).into(),
            );
        }
        debug!(
            "Building {:?} tag hierarchy over {} transactions (max {} tags)",
            self.hierarchy_type,
            transactions.len(),
            self.max_tags
        );

        let pool: TagPool = TagSummarizer::new(self.fx)
            .summarize(transactions, self.currency)?
            .into_iter()
            .map(|(tag, summary)| {
                let importance = self.scheme.importance(self.hierarchy_type.select(&summary));
                (tag, importance)
            })
            .collect();

        let mut total = SumOfMoney::zero(self.currency);
        let mut tagged: Vec<&Transaction> = Vec::new();
        let mut untagged: Vec<&Transaction> = Vec::new();
        for transaction in transactions.iter().filter(|t| {
            t.is_analyzable()
                && self.hierarchy_type.includes(t)
                && !t.has_any_tag(&self.filtered_tags)
        }) {
            if transaction.posted_at.is_none() {
                warn!("Skipping transaction {} without a posting date", transaction.id);
                continue;
            }
            let amount = transaction.converted_amount_excluding_tags(
                &self.filtered_tags,
                self.fx,
                self.currency,
            )?;
            total = total.add(&amount.abs())?;

            if transaction.is_tagged() {
                tagged.push(transaction);
            } else {
                untagged.push(transaction);
            }
        }

        let mut children = self.build_level(&pool, &tagged)?;
        if !untagged.is_empty() {
            children.push(TagHierarchyNode::new(
                HierarchyBucket::Untagged,
                self.sum_whole(&untagged)?,
                Vec::new(),
            ));
        }

        Ok(TagHierarchy {
            sum: total,
            children,
        })
    }

    fn build_level(
        &self,
        pool: &TagPool,
        transactions: &[&Transaction],
    ) -> Result<Vec<TagHierarchyNode>> {
        if transactions.is_empty() || pool.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked = Vec::new();
        for (tag, members) in group_by_most_important_tag(pool, transactions) {
            let sum = self.sum_for_tag(pool, &tag, &members)?;
            ranked.push((tag, members, sum));
        }
        ranked.sort_by(|(a, _, a_sum), (b, _, b_sum)| {
            self.scheme
                .importance(b_sum)
                .cmp(&self.scheme.importance(a_sum))
                .then_with(|| compare_rank(pool, a, b))
        });
        let others = ranked.split_off(self.max_tags.min(ranked.len()));

        let child_pool: TagPool = pool
            .iter()
            .filter(|(tag, _)| !ranked.iter().any(|(kept, _, _)| kept == *tag))
            .map(|(tag, importance)| (tag.clone(), *importance))
            .collect();

        let mut nodes = Vec::with_capacity(ranked.len() + 1);
        for (tag, members, sum) in ranked {
            let children = self.build_level(&child_pool, &members)?;
            nodes.push(TagHierarchyNode::new(HierarchyBucket::Tag(tag), sum, children));
        }

        if !others.is_empty() {
            let mut merged: Vec<&Transaction> = Vec::new();
            for member in others.into_iter().flat_map(|(_, members, _)| members) {
                if !merged.iter().any(|seen| std::ptr::eq(*seen, member)) {
                    merged.push(member);
                }
            }
            let sum = self.sum_whole(&merged)?;
            let children = self.build_level(&child_pool, &merged)?;
            nodes.push(TagHierarchyNode::new(HierarchyBucket::Other, sum, children));
        }

        Ok(nodes)
    }

    /// Absolute converted amount `tag` claims on each transaction: the whole
    /// amount where it is the transaction's best ordinary tag, otherwise the
    /// first split filed under it.
    fn sum_for_tag(
        &self,
        pool: &TagPool,
        tag: &Tag,
        transactions: &[&Transaction],
    ) -> Result<SumOfMoney> {
        let mut amount = Money::zero(self.currency);
        for &transaction in transactions {
            let claimed = if best_whole_tag(pool, transaction) == Some(tag) {
                transaction.converted_money(self.fx, self.currency)?
            } else if let Some(split) = transaction
                .tagged_amounts
                .iter()
                .find(|ta| ta.tag == *tag && transaction.is_split(ta))
            {
                transaction.converted_tagged_money(split, self.fx, self.currency)?
            } else {
                continue;
            };
            amount = amount.checked_add(&claimed.abs())?;
        }
        Ok(SumOfMoney::new(amount, transactions.len()))
    }

    fn sum_whole(&self, transactions: &[&Transaction]) -> Result<SumOfMoney> {
        transactions
            .iter()
            .try_fold(SumOfMoney::zero(self.currency), |sum, transaction| {
                sum.add(&transaction.converted_money(self.fx, self.currency)?.abs())
            })
    }
}

/// Files each transaction under its best-ranked whole tag in the pool, and
/// additionally under every pooled tag it splits into.
fn group_by_most_important_tag<'t>(
    pool: &TagPool,
    transactions: &[&'t Transaction],
) -> BTreeMap<Tag, Vec<&'t Transaction>> {
    let mut buckets: BTreeMap<Tag, Vec<&'t Transaction>> = BTreeMap::new();

    for &transaction in transactions {
        let mut filed: Vec<&Tag> = best_whole_tag(pool, transaction).into_iter().collect();
        for tagged in transaction
            .tagged_amounts
            .iter()
            .filter(|ta| transaction.is_split(ta) && pool.contains_key(&ta.tag))
        {
            if !filed.contains(&&tagged.tag) {
                filed.push(&tagged.tag);
            }
        }

        for tag in filed {
            buckets.entry(tag.clone()).or_default().push(transaction);
        }
    }

    buckets
}

/// The highest-ranked pooled tag that claims the whole transaction.
fn best_whole_tag<'t>(pool: &TagPool, transaction: &'t Transaction) -> Option<&'t Tag> {
    transaction
        .tagged_amounts
        .iter()
        .filter(|ta| !transaction.is_split(ta) && pool.contains_key(&ta.tag))
        .map(|ta| &ta.tag)
        .min_by(|a, b| compare_rank(pool, a, b))
}

/// `Less` when `a` ranks ahead of `b`: more important first, then by
/// canonical tag.
fn compare_rank(pool: &TagPool, a: &Tag, b: &Tag) -> Ordering {
    pool.get(b).cmp(&pool.get(a)).then_with(|| a.cmp(b))
}
