//! Data Processor Module
//! Derived columns computed at load time, the shift filter and column readers.

use crate::data::ColumnRoles;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error;

/// Calendar date of the submission timestamp.
pub const DATE_COLUMN: &str = "submission_date";
/// Hour of day of the submission timestamp.
pub const HOUR_COLUMN: &str = "submission_hour";
/// +1 / -1 / 0 encoding of the grant answer.
pub const GRANT_FLAG_COLUMN: &str = "grant_flag";

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

// chrono counts days from 0001-01-01, polars from 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Which shift rows an analysis looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShiftFilter {
    #[default]
    All,
    Only(String),
}

impl ShiftFilter {
    pub fn label(&self) -> &str {
        self.label_or("All")
    }

    /// Shift name, or `all` for the unfiltered choice.
    pub fn label_or<'a>(&'a self, all: &'a str) -> &'a str {
        match self {
            ShiftFilter::All => all,
            ShiftFilter::Only(value) => value,
        }
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Append the submission date/hour and the grant flag columns.
    ///
    /// Columns are only added for roles that resolved to a header present in `df`.
    pub fn derive_columns(
        mut df: DataFrame,
        roles: &ColumnRoles,
    ) -> Result<DataFrame, ProcessorError> {
        if let Some(ts_col) = roles.timestamp.as_deref().filter(|c| has_column(&df, c)) {
            let stamps: Vec<Option<NaiveDateTime>> = Self::text_values(&df, ts_col)?
                .iter()
                .map(|v| v.as_deref().and_then(parse_timestamp))
                .collect();

            let days: Vec<Option<i32>> = stamps
                .iter()
                .map(|ts| ts.map(|t| date_to_days(t.date())))
                .collect();
            let hours: Vec<Option<i32>> = stamps
                .iter()
                .map(|ts| ts.map(|t| t.hour() as i32))
                .collect();

            let parsed = stamps.iter().filter(|ts| ts.is_some()).count();
            tracing::debug!(
                column = ts_col,
                parsed,
                malformed = stamps.len() - parsed,
                "timestamps parsed"
            );

            let dates = Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?;
            df.with_column(dates)?;
            df.with_column(Series::new(HOUR_COLUMN.into(), hours))?;
        }

        if let Some(grant_col) = roles.grant.as_deref().filter(|c| has_column(&df, c)) {
            let column = df.column(grant_col)?;
            let flags: Vec<i32> = if column.dtype() == &DataType::String {
                column
                    .str()?
                    .into_iter()
                    .map(|v| v.map(grant_flag).unwrap_or(0))
                    .collect()
            } else {
                vec![0; df.height()]
            };
            df.with_column(Series::new(GRANT_FLAG_COLUMN.into(), flags))?;
        }

        Ok(df)
    }

    /// Keep only the rows of the selected shift.
    ///
    /// Returns the frame unchanged for `All` or when there is no shift column.
    pub fn filter_by_shift(
        df: &DataFrame,
        roles: &ColumnRoles,
        filter: &ShiftFilter,
    ) -> Result<DataFrame, ProcessorError> {
        let ShiftFilter::Only(value) = filter else {
            return Ok(df.clone());
        };
        let Some(shift_col) = roles.shift.as_deref().filter(|c| has_column(df, c)) else {
            return Ok(df.clone());
        };

        let filtered = df
            .clone()
            .lazy()
            .filter(col(shift_col).cast(DataType::String).eq(lit(value.as_str())))
            .collect()?;
        Ok(filtered)
    }

    /// Distinct non-null shift values, sorted.
    pub fn shift_values(df: &DataFrame, roles: &ColumnRoles) -> Vec<String> {
        let Some(shift_col) = roles.shift.as_deref() else {
            return Vec::new();
        };

        Self::text_values(df, shift_col)
            .map(|values| {
                values
                    .into_iter()
                    .flatten()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Column values rendered as text; nulls stay `None`.
    pub fn text_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let as_text = df.column(column)?.cast(&DataType::String)?;
        Ok(as_text
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Column values as f64; text that does not parse becomes `None`.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let as_f64 = df.column(column)?.cast(&DataType::Float64)?;
        Ok(as_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Calendar dates of a `Date` column.
    pub fn date_values(df: &DataFrame, column: &str) -> Result<Vec<Option<NaiveDate>>, ProcessorError> {
        let as_days = df.column(column)?.cast(&DataType::Int32)?;
        Ok(as_days
            .i32()?
            .into_iter()
            .map(|v| v.and_then(days_to_date))
            .collect())
    }

    /// Integer grant flags; missing column or nulls read as 0.
    pub fn grant_flags(df: &DataFrame) -> Result<Vec<i32>, ProcessorError> {
        let flags = df.column(GRANT_FLAG_COLUMN)?.cast(&DataType::Int32)?;
        Ok(flags.i32()?.into_iter().map(|v| v.unwrap_or(0)).collect())
    }
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

pub fn is_date_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .map(|c| c.dtype() == &DataType::Date)
        .unwrap_or(false)
}

/// +1 when the answer mentions "да", -1 when it mentions "нет", otherwise 0.
pub fn grant_flag(value: &str) -> i32 {
    let lowered = value.to_lowercase();
    if lowered.contains("да") {
        1
    } else if lowered.contains("нет") {
        -1
    } else {
        0
    }
}

/// Parse a submission timestamp in any of the accepted layouts.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}
