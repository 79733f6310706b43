//! Range-bounded daily aggregation.

mod daily;
mod range;

pub use daily::{AggregateSummary, DailyAggregate, DailyCount, aggregate_daily};
pub use range::DateRange;
