//! Statistics Calculator Module
//! Grant participation counts and engagement descriptive statistics.

use crate::data::{has_column, ColumnRoles, DataProcessor, ProcessorError, GRANT_FLAG_COLUMN};
use polars::prelude::*;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Grant competition answers within the filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantSummary {
    /// Rows flagged +1
    pub planning: usize,
    /// Rows flagged -1
    pub declining: usize,
    /// Mean engagement of planning rows, when engagement is known
    pub engagement_planning: Option<f64>,
    pub engagement_declining: Option<f64>,
}

impl GrantSummary {
    /// Rows that answered either way.
    pub fn responses(&self) -> usize {
        self.planning + self.declining
    }

    /// Share of planning rows among `rows`, `None` for an empty frame.
    pub fn participation_ratio(&self, rows: usize) -> Option<f64> {
        (rows > 0).then(|| self.planning as f64 / rows as f64)
    }
}

/// Descriptive statistics of the engagement column.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementSummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Rows holding a numeric engagement value
    pub values: usize,
}

impl EngagementSummary {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: Statistics::mean(values.iter()),
            max: Statistics::max(values.iter()),
            min: Statistics::min(values.iter()),
            values: values.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    pub rows: usize,
    pub grant: Option<GrantSummary>,
    pub engagement: Option<EngagementSummary>,
}

/// Computes the statistics shown next to the chart.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn summarize(df: &DataFrame, roles: &ColumnRoles) -> Result<StatisticsSummary, StatsError> {
        let engagement_values = match roles.engagement.as_deref() {
            Some(col) if has_column(df, col) => Some(DataProcessor::numeric_values(df, col)?),
            _ => None,
        };

        let grant = match roles.grant.as_deref() {
            Some(col) if has_column(df, col) && has_column(df, GRANT_FLAG_COLUMN) => {
                let flags = DataProcessor::grant_flags(df)?;
                Some(Self::grant_summary(&flags, engagement_values.as_deref()))
            }
            _ => None,
        };

        let engagement = engagement_values.map(|values| {
            let present: Vec<f64> = values.into_iter().flatten().collect();
            EngagementSummary::from_values(&present)
        });

        Ok(StatisticsSummary {
            rows: df.height(),
            grant,
            engagement,
        })
    }

    fn grant_summary(flags: &[i32], engagement: Option<&[Option<f64>]>) -> GrantSummary {
        let planning = flags.iter().filter(|f| **f == 1).count();
        let declining = flags.iter().filter(|f| **f == -1).count();

        let mean_for = |flag: i32| -> Option<f64> {
            let values: Vec<f64> = flags
                .iter()
                .zip(engagement?)
                .filter(|(f, _)| **f == flag)
                .filter_map(|(_, v)| *v)
                .collect();
            (!values.is_empty()).then(|| Statistics::mean(values.iter()))
        };

        GrantSummary {
            planning,
            declining,
            engagement_planning: mean_for(1),
            engagement_declining: mean_for(-1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> ColumnRoles {
        ColumnRoles {
            grant: Some("grant".to_string()),
            engagement: Some("engagement".to_string()),
            ..Default::default()
        }
    }

    fn frame(grant: &[&str], engagement: &[f64]) -> DataFrame {
        let df = df!("grant" => grant, "engagement" => engagement).unwrap();
        DataProcessor::derive_columns(df, &roles()).unwrap()
    }

    #[test]
    fn grant_counts_and_engagement_gap() {
        let df = frame(&["Да", "Нет", "да, планирую", "нет"], &[0.9, 0.3, 0.7, 0.1]);
        let summary = StatsCalculator::summarize(&df, &roles()).unwrap();

        let grant = summary.grant.unwrap();
        assert_eq!(grant.planning, 2);
        assert_eq!(grant.declining, 2);
        assert!((grant.engagement_planning.unwrap() - 0.8).abs() < 1e-9);
        assert!((grant.engagement_declining.unwrap() - 0.2).abs() < 1e-9);
        assert_eq!(grant.participation_ratio(summary.rows), Some(0.5));
    }

    #[test]
    fn undecided_answers_count_as_rows_only() {
        let df = frame(&["да", "может быть", "не знаю"], &[0.5, 0.5, 0.5]);
        let summary = StatsCalculator::summarize(&df, &roles()).unwrap();
        let grant = summary.grant.unwrap();
        assert_eq!(grant.responses(), 1);
        assert_eq!(grant.engagement_declining, None);
        let ratio = grant.participation_ratio(summary.rows).unwrap();
        assert!((ratio - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn engagement_descriptives() {
        let df = frame(&["да", "нет", "да", "нет"], &[0.8, 0.6, 0.2, 0.4]);
        let eng = StatsCalculator::summarize(&df, &roles()).unwrap().engagement.unwrap();
        assert!((eng.mean - 0.5).abs() < 1e-9);
        assert_eq!(eng.max, 0.8);
        assert_eq!(eng.min, 0.2);
        assert_eq!(eng.values, 4);
    }

    #[test]
    fn unresolved_roles_leave_sections_empty() {
        let df = df!("name" => ["x", "y"]).unwrap();
        let summary = StatsCalculator::summarize(&df, &ColumnRoles::default()).unwrap();
        assert_eq!(summary.rows, 2);
        assert!(summary.grant.is_none());
        assert!(summary.engagement.is_none());
    }

    #[test]
    fn empty_frame_has_no_ratio() {
        let df = frame(&[], &[]);
        let summary = StatsCalculator::summarize(&df, &roles()).unwrap();
        assert_eq!(summary.grant.unwrap().participation_ratio(0), None);
        assert!(summary.engagement.unwrap().mean.is_nan());
    }
}
