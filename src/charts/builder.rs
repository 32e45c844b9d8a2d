//! Chart Builder Module
//! Groups the filtered dataset by the chosen X category and aggregates Y.

use crate::data::{
    date_to_days, has_column, is_date_column, ColumnRoles, DataProcessor, ProcessorError,
    DATE_COLUMN,
};
use crate::locale::Language;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Column '{0}' has no numeric values")]
    NonNumeric(String),
}

/// X-axis choices offered in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XCategory {
    #[default]
    SubmissionTime,
    EventName,
    ShiftName,
    GrantParticipation,
}

impl XCategory {
    pub const ALL: [XCategory; 4] = [
        XCategory::SubmissionTime,
        XCategory::EventName,
        XCategory::ShiftName,
        XCategory::GrantParticipation,
    ];

    /// Column the category groups by, if it can be resolved.
    pub fn column<'a>(&self, df: &DataFrame, roles: &'a ColumnRoles) -> Option<&'a str> {
        match self {
            XCategory::SubmissionTime if has_column(df, DATE_COLUMN) => Some(DATE_COLUMN),
            XCategory::SubmissionTime => roles.timestamp.as_deref(),
            XCategory::EventName => roles.event.as_deref(),
            XCategory::ShiftName => roles.shift.as_deref(),
            XCategory::GrantParticipation => roles.grant.as_deref(),
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        language.texts().x_categories[self as usize]
    }

    pub fn help(self, language: Language) -> &'static str {
        language.texts().x_help[self as usize]
    }
}

impl fmt::Display for XCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

/// Y-axis choices offered in the UI. Only engagement maps to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YCategory {
    #[default]
    Engagement,
    ParticipantCount,
    Activity,
    Rating,
}

impl YCategory {
    pub const ALL: [YCategory; 4] = [
        YCategory::Engagement,
        YCategory::ParticipantCount,
        YCategory::Activity,
        YCategory::Rating,
    ];

    pub fn column<'a>(&self, roles: &'a ColumnRoles) -> Option<&'a str> {
        match self {
            YCategory::Engagement => roles.engagement.as_deref(),
            YCategory::ParticipantCount | YCategory::Activity | YCategory::Rating => None,
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        language.texts().y_categories[self as usize]
    }
}

impl fmt::Display for YCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Connected line with point markers
    Line,
    Bar,
}

/// One aggregated point. `x` is the day number for date lines and the bar index otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub label: String,
    pub value: f64,
}

/// Chart ready for drawing, independent of the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    /// Label of the point closest to `x`, for axis ticks.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        self.points
            .iter()
            .find(|p| (p.x - x).abs() < 0.5)
            .map(|p| p.label.as_str())
    }
}

#[cfg(test)]
impl ChartData {
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.points.iter().find(|p| p.label == label).map(|p| p.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Chart(ChartData),
    /// Not enough data to build a chart
    Insufficient,
}

/// Builds chart data from a filtered dataset, labelled in `language`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartBuilder {
    language: Language,
}

impl ChartBuilder {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn build(
        &self,
        df: &DataFrame,
        roles: &ColumnRoles,
        x: XCategory,
        y: YCategory,
    ) -> Result<ChartOutcome, ChartError> {
        let (Some(x_col), Some(y_col)) = (x.column(df, roles), y.column(roles)) else {
            tracing::debug!(%x, %y, "chart columns unresolved");
            return Ok(ChartOutcome::Insufficient);
        };
        if !has_column(df, x_col) || !has_column(df, y_col) {
            tracing::debug!(x_col, y_col, "chart columns absent from frame");
            return Ok(ChartOutcome::Insufficient);
        }

        let texts = self.language.texts();
        let y_name = y.label(self.language).to_string();
        let (kind, x_label, y_label, points) = match x {
            XCategory::SubmissionTime if is_date_column(df, x_col) => {
                let values = Self::numeric_y(df, y_col)?;
                let dates = DataProcessor::date_values(df, x_col)?;
                let points = mean_by_date(&dates, &values);
                (ChartKind::Line, texts.submission_date_axis.to_string(), y_name, points)
            }
            XCategory::GrantParticipation => {
                let keys = DataProcessor::text_values(df, x_col)?;
                (
                    ChartKind::Bar,
                    texts.grant_axis.to_string(),
                    texts.responses.to_string(),
                    count_by_key(&keys),
                )
            }
            _ => {
                let values = Self::numeric_y(df, y_col)?;
                let keys = DataProcessor::text_values(df, x_col)?;
                let x_name = x.label(self.language).to_string();
                (ChartKind::Bar, x_name, y_name, mean_by_key(&keys, &values))
            }
        };

        if points.is_empty() {
            return Ok(ChartOutcome::Insufficient);
        }

        let title = format!("{} {} {}", y_label, texts.title_by, x.label(self.language));
        Ok(ChartOutcome::Chart(ChartData {
            kind,
            title,
            x_label,
            y_label,
            points,
        }))
    }

    /// Y values as numbers; a column of pure text is an error, not an empty chart.
    fn numeric_y(df: &DataFrame, y_col: &str) -> Result<Vec<Option<f64>>, ChartError> {
        let values = DataProcessor::numeric_values(df, y_col)?;
        let column = df.column(y_col).map_err(ProcessorError::from)?;
        let non_null = column.len() - column.null_count();
        if non_null > 0 && values.iter().all(Option::is_none) {
            return Err(ChartError::NonNumeric(y_col.to_string()));
        }
        Ok(values)
    }
}

#[derive(Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn mean_by_date(dates: &[Option<chrono::NaiveDate>], values: &[Option<f64>]) -> Vec<ChartPoint> {
    let mut groups: BTreeMap<chrono::NaiveDate, MeanAcc> = BTreeMap::new();
    for (date, value) in dates.iter().zip(values) {
        if let (Some(date), Some(value)) = (date, value) {
            groups.entry(*date).or_default().push(*value);
        }
    }

    groups
        .into_iter()
        .filter_map(|(date, acc)| {
            acc.mean().map(|value| ChartPoint {
                x: date_to_days(date) as f64,
                label: date.format("%Y-%m-%d").to_string(),
                value,
            })
        })
        .collect()
}

fn mean_by_key(keys: &[Option<String>], values: &[Option<f64>]) -> Vec<ChartPoint> {
    let mut groups: HashMap<&str, MeanAcc> = HashMap::new();
    for (key, value) in keys.iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            groups.entry(key.as_str()).or_default().push(*value);
        }
    }

    let means = groups
        .into_iter()
        .filter_map(|(key, acc)| acc.mean().map(|m| (key.to_string(), m)));
    indexed_points(means)
}

fn count_by_key(keys: &[Option<String>]) -> Vec<ChartPoint> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *counts.entry(key.as_str()).or_default() += 1;
    }
    indexed_points(counts.into_iter().map(|(k, n)| (k.to_string(), n as f64)))
}

/// Sort groups by key and lay them out at x = 0, 1, 2, ...
fn indexed_points(groups: impl Iterator<Item = (String, f64)>) -> Vec<ChartPoint> {
    let mut groups: Vec<(String, f64)> = groups.collect();
    sort_by_key_order(&mut groups);
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| ChartPoint {
            x: i as f64,
            label,
            value,
        })
        .collect()
}

/// Numeric order when every key is a number, text order otherwise.
fn sort_by_key_order(groups: &mut [(String, f64)]) {
    let numeric: Option<Vec<f64>> = groups.iter().map(|(k, _)| k.trim().parse().ok()).collect();
    match numeric {
        Some(numbers) => {
            let mut keyed: Vec<(f64, (String, f64))> =
                numbers.into_iter().zip(groups.iter().cloned()).collect();
            keyed.sort_by(|(x, a), (y, b)| x.total_cmp(y).then_with(|| a.0.cmp(&b.0)));
            for (slot, (_, group)) in groups.iter_mut().zip(keyed) {
                *slot = group;
            }
        }
        None => groups.sort_by(|a, b| a.0.cmp(&b.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;

    fn roles() -> ColumnRoles {
        ColumnRoles {
            timestamp: Some("ts".to_string()),
            event: Some("event".to_string()),
            shift: Some("shift".to_string()),
            grant: Some("grant".to_string()),
            engagement: Some("engagement".to_string()),
        }
    }

    fn frame() -> DataFrame {
        let df = df!(
            "ts" => ["2024-06-02 10:00:00", "2024-06-01 09:00:00", "2024-06-02 15:00:00", "bad"],
            "event" => ["Forum", "Forum", "Camp", "Camp"],
            "shift" => ["A", "A", "B", "B"],
            "grant" => ["Да", "Нет", "да, планирую", "нет"],
            "engagement" => [0.8, 0.6, 0.2, 0.4]
        )
        .unwrap();
        DataProcessor::derive_columns(df, &roles()).unwrap()
    }

    fn build(
        df: &DataFrame,
        roles: &ColumnRoles,
        x: XCategory,
        y: YCategory,
    ) -> Result<ChartOutcome, ChartError> {
        ChartBuilder::default().build(df, roles, x, y)
    }

    fn chart(outcome: ChartOutcome) -> ChartData {
        match outcome {
            ChartOutcome::Chart(data) => data,
            ChartOutcome::Insufficient => panic!("expected a chart"),
        }
    }

    #[test]
    fn shift_means_per_group() {
        let data = chart(
            build(&frame(), &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap(),
        );
        assert_eq!(data.kind, ChartKind::Bar);
        assert_eq!(data.title, "Engagement by Shift name");
        assert_eq!(data.points.len(), 2);
        assert!((data.value_of("A").unwrap() - 0.70).abs() < 1e-9);
        assert!((data.value_of("B").unwrap() - 0.30).abs() < 1e-9);
        assert_eq!(data.points[0].label, "A");
        assert_eq!(data.points[1].x, 1.0);
    }

    #[test]
    fn event_bars_are_sorted_by_key() {
        let data = chart(
            build(&frame(), &roles(), XCategory::EventName, YCategory::Engagement)
                .unwrap(),
        );
        let labels: Vec<&str> = data.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Camp", "Forum"]);
        assert_eq!(data.label_at(0.0), Some("Camp"));
    }

    #[test]
    fn submission_time_is_a_dated_line() {
        let data = chart(
            build(
                &frame(),
                &roles(),
                XCategory::SubmissionTime,
                YCategory::Engagement,
            )
            .unwrap(),
        );
        assert_eq!(data.kind, ChartKind::Line);
        let labels: Vec<&str> = data.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-06-01", "2024-06-02"]);
        assert!((data.points[0].value - 0.6).abs() < 1e-9);
        assert!((data.points[1].value - 0.5).abs() < 1e-9);
        assert!(data.points[0].x < data.points[1].x);
    }

    #[test]
    fn grant_chart_counts_rows() {
        let data = chart(
            build(
                &frame(),
                &roles(),
                XCategory::GrantParticipation,
                YCategory::Engagement,
            )
            .unwrap(),
        );
        assert_eq!(data.y_label, "Responses");
        assert_eq!(data.title, "Responses by Grant competition");
        assert!(data.points.iter().all(|p| p.value == 1.0));
        assert_eq!(data.points.len(), 4);
    }

    #[test]
    fn unwired_y_category_is_insufficient() {
        for y in [YCategory::ParticipantCount, YCategory::Activity, YCategory::Rating] {
            let outcome = build(&frame(), &roles(), XCategory::ShiftName, y).unwrap();
            assert_eq!(outcome, ChartOutcome::Insufficient);
        }
    }

    #[test]
    fn unresolved_x_role_is_insufficient() {
        let roles = ColumnRoles {
            event: None,
            ..roles()
        };
        let outcome =
            build(&frame(), &roles, XCategory::EventName, YCategory::Engagement)
                .unwrap();
        assert_eq!(outcome, ChartOutcome::Insufficient);
    }

    #[test]
    fn column_missing_from_frame_is_insufficient() {
        let df = frame().drop("event").unwrap();
        let outcome =
            build(&df, &roles(), XCategory::EventName, YCategory::Engagement)
                .unwrap();
        assert_eq!(outcome, ChartOutcome::Insufficient);
    }

    #[test]
    fn text_engagement_is_an_error() {
        let df = df!("shift" => ["A", "B"], "engagement" => ["high", "low"]).unwrap();
        let err = build(&df, &roles(), XCategory::ShiftName, YCategory::Engagement)
            .unwrap_err();
        assert!(matches!(err, ChartError::NonNumeric(_)));
    }

    #[test]
    fn means_do_not_depend_on_row_order() {
        let forward = df!(
            "shift" => ["A", "B", "A", "B", "C"],
            "engagement" => [0.1, 0.9, 0.35, 0.45, 0.7]
        )
        .unwrap();
        let reversed = forward.reverse();

        let a = build(&forward, &roles(), XCategory::ShiftName, YCategory::Engagement)
            .unwrap();
        let b =
            build(&reversed, &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap();
        let (a, b) = (chart(a), chart(b));
        for (p, q) in a.points.iter().zip(&b.points) {
            assert_eq!(p.label, q.label);
            assert!((p.value - q.value).abs() < 1e-12);
        }
    }

    fn key_order(keys: &[&str]) -> Vec<String> {
        let mut groups: Vec<(String, f64)> = keys.iter().map(|k| (k.to_string(), 1.0)).collect();
        sort_by_key_order(&mut groups);
        groups.into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn numeric_keys_sort_numerically() {
        assert_eq!(key_order(&["10", "2", "1.5"]), vec!["1.5", "2", "10"]);
        assert_eq!(key_order(&["b", "a"]), vec!["a", "b"]);
    }

    #[test]
    fn mixed_keys_sort_as_text() {
        let expected = vec!["10", "1a", "2", "9", "Camp"];
        assert_eq!(key_order(&["10", "9", "1a", "Camp", "2"]), expected);
        assert_eq!(key_order(&["Camp", "2", "1a", "9", "10"]), expected);
        assert_eq!(key_order(&["1a", "Camp", "10", "2", "9"]), expected);
    }

    #[test]
    fn many_mixed_keys_sort_stably() {
        let keys: Vec<String> = (0..200)
            .map(|i| if i % 3 == 0 { format!("{}k", i) } else { i.to_string() })
            .collect();
        let forward: Vec<&str> = keys.iter().map(String::as_str).collect();
        let backward: Vec<&str> = forward.iter().rev().copied().collect();

        let sorted = key_order(&forward);
        assert_eq!(sorted, key_order(&backward));
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn many_mixed_shift_bars_have_fixed_order() {
        let shifts: Vec<String> = (0..30)
            .map(|i| if i % 2 == 0 { i.to_string() } else { format!("{}a", i) })
            .collect();
        let engagement: Vec<f64> = (0..30).map(|i| i as f64 / 30.0).collect();
        let df = df!("shift" => shifts.clone(), "engagement" => engagement).unwrap();

        let data = chart(
            build(&df, &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap(),
        );
        let mut expected = shifts;
        expected.sort();
        let labels: Vec<String> = data.points.iter().map(|p| p.label.clone()).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn null_keys_and_empty_groups_are_dropped() {
        let df = df!(
            "shift" => [Some("A"), None, Some("B"), Some("C"), Some("C")],
            "engagement" => [Some(0.5), Some(0.9), Some(0.3), None, None]
        )
        .unwrap();

        let data = chart(
            build(&df, &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap(),
        );
        let labels: Vec<&str> = data.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert!((data.value_of("A").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn grant_counts_skip_null_answers() {
        let df = df!(
            "grant" => [Some("Да"), None, Some("Да"), Some("Нет")],
            "engagement" => [0.1, 0.2, 0.3, 0.4]
        )
        .unwrap();

        let data = chart(
            build(
                &df,
                &roles(),
                XCategory::GrantParticipation,
                YCategory::Engagement,
            )
            .unwrap(),
        );
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.value_of("Да"), Some(2.0));
        assert_eq!(data.value_of("Нет"), Some(1.0));
    }

    #[test]
    fn all_null_engagement_is_insufficient() {
        let df = df!(
            "shift" => ["A", "B"],
            "engagement" => [None::<f64>, None]
        )
        .unwrap();
        let outcome =
            build(&df, &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap();
        assert_eq!(outcome, ChartOutcome::Insufficient);
    }

    #[test]
    fn russian_labels_follow_language() {
        let data = chart(
            ChartBuilder::new(Language::Russian)
                .build(&frame(), &roles(), XCategory::ShiftName, YCategory::Engagement)
                .unwrap(),
        );
        assert_eq!(data.title, "Вовлеченность по Наименование смены");
        assert_eq!(data.x_label, "Наименование смены");

        let grant = chart(
            ChartBuilder::new(Language::Russian)
                .build(
                    &frame(),
                    &roles(),
                    XCategory::GrantParticipation,
                    YCategory::Engagement,
                )
                .unwrap(),
        );
        assert_eq!(grant.x_label, "Участие в грантовом конкурсе");
        assert_eq!(grant.y_label, "Ответы");
    }
}
