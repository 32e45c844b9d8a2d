//! Stats module - Statistics summary and report text

mod calculator;
mod report;

pub use calculator::{
    EngagementSummary, GrantSummary, StatisticsSummary, StatsCalculator, StatsError,
};
pub use report::{format_prediction, format_statistics};
