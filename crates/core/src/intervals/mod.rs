//! Calendar interval generator - maps instants and ranges onto daily,
//! weekly, monthly, quarterly and yearly buckets.

mod interval_iter;
mod interval_model;


pub use interval_iter::IntervalIter;
pub use interval_model::{Interval, IntervalKind, Period};
