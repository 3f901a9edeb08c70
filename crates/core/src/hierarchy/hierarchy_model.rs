//! Tag hierarchy domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{OTHER_TAGS_LABEL, UNTAGGED_LABEL};
use crate::money::SumOfMoney;
use crate::summaries::MonetarySummary;
use crate::tags::Tag;
use crate::transactions::Transaction;

/// Which side of the ledger a hierarchy describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyType {
    Earnings,
    #[default]
    Spending,
    Net,
}

impl HierarchyType {
    /// The part of a tag's summary that feeds its importance.
    pub fn select<'s>(&self, summary: &'s MonetarySummary) -> &'s SumOfMoney {
        match self {
            HierarchyType::Earnings => &summary.earnings,
            HierarchyType::Spending => &summary.spending,
            HierarchyType::Net => &summary.net,
        }
    }

    /// Whether `transaction` belongs in a hierarchy of this type.
    pub fn includes(&self, transaction: &Transaction) -> bool {
        match self {
            HierarchyType::Earnings => transaction.amount > Decimal::ZERO,
            HierarchyType::Spending => transaction.amount < Decimal::ZERO,
            HierarchyType::Net => true,
        }
    }
}

/// How tags and buckets are ranked against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagImportanceScheme {
    #[default]
    RankByAmount,
    RankByCount,
}

impl TagImportanceScheme {
    /// Larger is more important.
    pub fn importance(&self, sum: &SumOfMoney) -> Decimal {
        match self {
            TagImportanceScheme::RankByAmount => sum.amount.amount().abs(),
            TagImportanceScheme::RankByCount => Decimal::from(sum.count),
        }
    }
}

/// The key of one hierarchy node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum HierarchyBucket {
    Tag(Tag),
    /// Tags that fell outside the top N at their level
    Other,
    /// Root-level bucket for transactions without any tag
    Untagged,
}

impl HierarchyBucket {
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            HierarchyBucket::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            HierarchyBucket::Tag(tag) => tag.name(),
            HierarchyBucket::Other => OTHER_TAGS_LABEL,
            HierarchyBucket::Untagged => UNTAGGED_LABEL,
        }
    }

    /// Tag buckets match any spelling with the same canonical identity;
    /// synthetic buckets match their label.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            HierarchyBucket::Tag(tag) => *tag == Tag::new(name),
            HierarchyBucket::Other => name == OTHER_TAGS_LABEL,
            HierarchyBucket::Untagged => name == UNTAGGED_LABEL,
        }
    }
}

impl fmt::Display for HierarchyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<HierarchyBucket> for String {
    fn from(bucket: HierarchyBucket) -> Self {
        bucket.label().to_string()
    }
}

/// One bucket of the tree with its total and its own ranked children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHierarchyNode {
    #[serde(rename = "tag")]
    pub bucket: HierarchyBucket,
    pub sum: SumOfMoney,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TagHierarchyNode>,
}

impl TagHierarchyNode {
    pub fn new(bucket: HierarchyBucket, sum: SumOfMoney, children: Vec<TagHierarchyNode>) -> Self {
        Self {
            bucket,
            sum,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&TagHierarchyNode> {
        self.children.iter().find(|node| node.bucket.matches(name))
    }
}

/// A ranked tag tree. `sum` covers every transaction considered, tagged or
/// not, regardless of how children were truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHierarchy {
    pub sum: SumOfMoney,
    pub children: Vec<TagHierarchyNode>,
}

impl TagHierarchy {
    pub fn child(&self, name: &str) -> Option<&TagHierarchyNode> {
        self.children.iter().find(|node| node.bucket.matches(name))
    }

    /// Follows `path` from the root, one bucket name per level.
    pub fn find(&self, path: &[&str]) -> Option<&TagHierarchyNode> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.child(first)?, |node, name| node.child(name))
    }

    /// Bucket labels of the root's children, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.children.iter().map(|node| node.bucket.label()).collect()
    }
}
