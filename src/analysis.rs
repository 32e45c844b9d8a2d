//! Analysis Context
//! The immutable (dataset, column roles) pair produced by a load, and the
//! per-click analysis that runs on it.

use crate::charts::{ChartBuilder, ChartError, ChartOutcome, XCategory, YCategory};
use crate::data::{
    ColumnRoles, DataLoader, DataProcessor, LoaderError, ProcessorError, Role, ShiftFilter,
};
use crate::locale::Language;
use crate::stats::{format_prediction, format_statistics, StatsCalculator, StatsError};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Filter failed: {0}")]
    Filter(#[from] ProcessorError),
    #[error("Chart failed: {0}")]
    Chart(#[from] ChartError),
    #[error("Statistics failed: {0}")]
    Stats(#[from] StatsError),
}

/// What the user currently has selected in the control panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSelection {
    pub x: XCategory,
    pub y: YCategory,
    pub shift: ShiftFilter,
}

/// Everything one click on "Analyze" produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub chart: ChartOutcome,
    pub statistics: String,
    pub prediction: String,
    pub rows: usize,
}

/// Loaded dataset with its resolved roles and derived columns.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    frame: DataFrame,
    roles: ColumnRoles,
    source: Option<PathBuf>,
}

impl AnalysisContext {
    /// Load a spreadsheet from disk and prepare it for analysis.
    pub fn load(loader: &DataLoader, path: &Path) -> Result<Self, LoadError> {
        let df = loader.load(path)?;
        let mut context = Self::from_frame(df)?;
        context.source = Some(path.to_path_buf());
        Ok(context)
    }

    /// Resolve roles and append derived columns.
    pub fn from_frame(df: DataFrame) -> Result<Self, ProcessorError> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let roles = ColumnRoles::resolve(&headers);

        for role in Role::ALL {
            match roles.get(role) {
                Some(column) => tracing::info!(%role, column, "column role resolved"),
                None => tracing::warn!(%role, "column role unresolved"),
            }
        }

        let frame = DataProcessor::derive_columns(df, &roles)?;
        Ok(Self {
            frame,
            roles,
            source: None,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Distinct shift names for the filter picker.
    pub fn shift_values(&self) -> Vec<String> {
        DataProcessor::shift_values(&self.frame, &self.roles)
    }

    /// Filter, chart and describe the data for one selection.
    pub fn analyze(
        &self,
        selection: &ViewSelection,
        language: Language,
    ) -> Result<AnalysisReport, AnalysisError> {
        let filtered = DataProcessor::filter_by_shift(&self.frame, &self.roles, &selection.shift)?;
        tracing::info!(
            x = %selection.x,
            y = %selection.y,
            shift = selection.shift.label(),
            rows = filtered.height(),
            "running analysis"
        );

        let chart =
            ChartBuilder::new(language).build(&filtered, &self.roles, selection.x, selection.y)?;
        let summary = StatsCalculator::summarize(&filtered, &self.roles)?;

        Ok(AnalysisReport {
            chart,
            statistics: format_statistics(&summary, language),
            prediction: format_prediction(&summary, language),
            rows: filtered.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AnalysisContext {
        let df = df!(
            "Момент подачи заявления" => ["01.06.2024 10:00", "01.06.2024 11:00", "02.06.2024 12:00", "03.06.2024 09:00"],
            "Наименование мероприятия" => ["Форум", "Форум", "Слёт", "Слёт"],
            "Наименование смены" => ["A", "A", "B", "B"],
            "Грантовый конкурс" => ["Да", "Нет", "да, планирую", "нет"],
            "Вовлеченность" => [0.8, 0.6, 0.2, 0.4]
        )
        .unwrap();
        AnalysisContext::from_frame(df).unwrap()
    }

    #[test]
    fn load_resolves_roles_and_derives_columns() {
        let ctx = context();
        assert!(ctx.roles().unresolved().is_empty());
        assert_eq!(ctx.row_count(), 4);
        assert!(crate::data::has_column(ctx.frame(), crate::data::GRANT_FLAG_COLUMN));
        assert!(crate::data::is_date_column(ctx.frame(), crate::data::DATE_COLUMN));
        assert_eq!(ctx.shift_values(), vec!["A", "B"]);
    }

    #[test]
    fn shift_chart_end_to_end() {
        let report = context()
            .analyze(
                &ViewSelection {
                    x: XCategory::ShiftName,
                    ..Default::default()
                },
                Language::English,
            )
            .unwrap();

        let ChartOutcome::Chart(chart) = report.chart else {
            panic!("expected chart");
        };
        assert!((chart.value_of("A").unwrap() - 0.7).abs() < 1e-9);
        assert!((chart.value_of("B").unwrap() - 0.3).abs() < 1e-9);
        assert!(report.prediction.contains("Participant share: 50.0%"));
        assert!(report.prediction.contains("High interest in grant support"));
        assert!(report.statistics.contains("Total records: 4"));
    }

    #[test]
    fn shift_filter_narrows_statistics() {
        let report = context()
            .analyze(
                &ViewSelection {
                    x: XCategory::EventName,
                    shift: ShiftFilter::Only("B".to_string()),
                    ..Default::default()
                },
                Language::English,
            )
            .unwrap();
        assert_eq!(report.rows, 2);
        assert!(report.statistics.contains("Mean engagement: 0.30"));
        assert!(report.prediction.contains("Low participant engagement"));
    }

    #[test]
    fn unknown_shift_yields_placeholder_chart() {
        let report = context()
            .analyze(
                &ViewSelection {
                    shift: ShiftFilter::Only("Z".to_string()),
                    ..Default::default()
                },
                Language::English,
            )
            .unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(report.chart, ChartOutcome::Insufficient);
        assert!(report.prediction.contains("No records to assess"));
    }

    #[test]
    fn frame_without_known_headers_degrades() {
        let df = df!("name" => ["a", "b"], "score" => [1.0, 2.0]).unwrap();
        let ctx = AnalysisContext::from_frame(df).unwrap();
        let report = ctx.analyze(&ViewSelection::default(), Language::English).unwrap();
        assert_eq!(report.chart, ChartOutcome::Insufficient);
        assert_eq!(report.statistics, "Not enough data for statistics\n");
        assert!(ctx.shift_values().is_empty());
    }

    #[test]
    fn russian_report_end_to_end() {
        let report = context()
            .analyze(
                &ViewSelection {
                    x: XCategory::ShiftName,
                    ..Default::default()
                },
                Language::Russian,
            )
            .unwrap();

        let ChartOutcome::Chart(chart) = report.chart else {
            panic!("expected chart");
        };
        assert_eq!(chart.title, "Вовлеченность по Наименование смены");
        assert!(report.prediction.contains("Доля участников: 50.0%"));
        assert!(report.statistics.contains("Всего записей: 4"));
    }
}
