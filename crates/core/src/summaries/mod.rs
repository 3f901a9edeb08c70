//! Summaries module - spending, earnings and net aggregates over time,
//! per tag, and of reconstructed account balances.

mod interval_summarizer;
mod net_worth_summarizer;
mod summary_model;
mod tag_summarizer;


pub use interval_summarizer::IntervalSummarizer;
pub use net_worth_summarizer::NetWorthSummarizer;
pub use summary_model::{MonetarySummary, MonetarySummaryWithSplits};
pub use tag_summarizer::TagSummarizer;
