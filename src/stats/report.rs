//! Report Text Module
//! Renders the statistics block and the templated prediction/recommendations.

use super::{EngagementSummary, GrantSummary, StatisticsSummary};
use crate::locale::{Language, Texts};
use std::fmt::Write;

/// Share of planning rows above which grant interest counts as high
pub const GRANT_INTEREST_THRESHOLD: f64 = 0.3;
/// Mean engagement above which engagement counts as high
pub const HIGH_ENGAGEMENT_THRESHOLD: f64 = 0.7;
/// Mean engagement above which engagement counts as medium
pub const MEDIUM_ENGAGEMENT_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantInterest {
    High,
    Low,
}

impl GrantInterest {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > GRANT_INTEREST_THRESHOLD {
            GrantInterest::High
        } else {
            GrantInterest::Low
        }
    }

    fn describe(self, texts: &Texts) -> &'static str {
        match self {
            GrantInterest::High => texts.high_interest,
            GrantInterest::Low => texts.low_interest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    pub fn from_mean(mean: f64) -> Self {
        if mean > HIGH_ENGAGEMENT_THRESHOLD {
            EngagementLevel::High
        } else if mean > MEDIUM_ENGAGEMENT_THRESHOLD {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        }
    }

    fn describe(self, texts: &Texts) -> &'static str {
        match self {
            EngagementLevel::High => texts.high_engagement,
            EngagementLevel::Medium => texts.medium_engagement,
            EngagementLevel::Low => texts.low_engagement,
        }
    }
}

fn number(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(number).unwrap_or_else(|| "n/a".to_string())
}

/// Statistics pane text.
pub fn format_statistics(summary: &StatisticsSummary, language: Language) -> String {
    let texts = language.texts();
    let mut text = String::new();

    if let Some(grant) = &summary.grant {
        write_grant_section(&mut text, grant, texts);
        if summary.engagement.is_some() {
            let gap = grant
                .engagement_planning
                .zip(grant.engagement_declining)
                .map(|(yes, no)| yes - no);
            let _ = writeln!(text, "{}", texts.engagement_header);
            let _ = writeln!(
                text,
                "{}: {}",
                texts.grant_participants,
                optional(grant.engagement_planning)
            );
            let _ = writeln!(text, "{}: {}", texts.others, optional(grant.engagement_declining));
            let _ = writeln!(text, "{}: {}\n", texts.difference, optional(gap));
        }
    }

    if let Some(engagement) = &summary.engagement {
        write_overall_section(&mut text, engagement, summary.rows, texts);
    }

    if text.is_empty() {
        let _ = writeln!(text, "{}", texts.not_enough_statistics);
    }
    text
}

fn write_grant_section(text: &mut String, grant: &GrantSummary, texts: &Texts) {
    let _ = writeln!(text, "{}", texts.grant_header);
    let total = grant.responses();
    if total == 0 {
        let _ = writeln!(text, "{}\n", texts.no_grant_responses);
        return;
    }

    let pct = |n: usize| n as f64 / total as f64 * 100.0;
    let _ = writeln!(
        text,
        "{}: {} ({:.1}%)",
        texts.planning,
        grant.planning,
        pct(grant.planning)
    );
    let _ = writeln!(
        text,
        "{}: {} ({:.1}%)\n",
        texts.not_planning,
        grant.declining,
        pct(grant.declining)
    );
}

fn write_overall_section(
    text: &mut String,
    engagement: &EngagementSummary,
    rows: usize,
    texts: &Texts,
) {
    let _ = writeln!(text, "{}", texts.overall_header);
    let _ = writeln!(text, "{}: {}", texts.mean_engagement, number(engagement.mean));
    let _ = writeln!(text, "{}: {}", texts.maximum, number(engagement.max));
    let _ = writeln!(text, "{}: {}", texts.minimum, number(engagement.min));
    let _ = writeln!(text, "{}: {}", texts.total_records, rows);
}

/// Prediction pane text.
pub fn format_prediction(summary: &StatisticsSummary, language: Language) -> String {
    let texts = language.texts();
    let mut text = format!("{}\n\n", texts.forecast_header);

    if let Some(grant) = &summary.grant {
        let _ = writeln!(text, "{}", texts.grant_section);
        match grant.participation_ratio(summary.rows) {
            Some(ratio) => {
                let _ = writeln!(text, "- {}: {:.1}%", texts.participant_share, ratio * 100.0);
                let _ = writeln!(text, "- {}", GrantInterest::from_ratio(ratio).describe(texts));
            }
            None => {
                let _ = writeln!(text, "- {}", texts.no_records);
            }
        }
    }

    if let Some(engagement) = &summary.engagement {
        let _ = writeln!(text, "\n{}", texts.engagement_section);
        if engagement.values == 0 {
            let _ = writeln!(text, "- {}", texts.no_engagement_values);
        } else {
            let _ = writeln!(text, "- {}: {:.2}", texts.average_score, engagement.mean);
            let _ = writeln!(
                text,
                "- {}",
                EngagementLevel::from_mean(engagement.mean).describe(texts)
            );
        }
    }

    let _ = writeln!(text, "\n{}", texts.recommendations_header);
    let lines: Vec<String> = texts
        .recommendations
        .iter()
        .map(|r| format!("- {}", r))
        .collect();
    text.push_str(&lines.join("\n"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rows: usize, planning: usize, declining: usize, mean: f64) -> StatisticsSummary {
        StatisticsSummary {
            rows,
            grant: Some(GrantSummary {
                planning,
                declining,
                engagement_planning: Some(0.9),
                engagement_declining: Some(0.4),
            }),
            engagement: Some(EngagementSummary {
                mean,
                max: 1.0,
                min: 0.0,
                values: rows,
            }),
        }
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(GrantInterest::from_ratio(0.3), GrantInterest::Low);
        assert_eq!(GrantInterest::from_ratio(0.3001), GrantInterest::High);
        assert_eq!(EngagementLevel::from_mean(0.7), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_mean(0.71), EngagementLevel::High);
        assert_eq!(EngagementLevel::from_mean(0.4), EngagementLevel::Low);
        assert_eq!(EngagementLevel::from_mean(0.41), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_mean(f64::NAN), EngagementLevel::Low);
    }

    #[test]
    fn half_participation_reads_as_high_interest() {
        let text = format_prediction(&summary(4, 2, 2, 0.5), Language::English);
        assert!(text.contains("Participant share: 50.0%"));
        assert!(text.contains("High interest in grant support"));
        assert!(text.contains("Medium participant engagement"));
        assert!(text.ends_with("- Track participant engagement regularly"));
    }

    #[test]
    fn prediction_without_rows_does_not_divide() {
        let mut s = summary(0, 0, 0, f64::NAN);
        if let Some(e) = s.engagement.as_mut() {
            e.values = 0;
        }
        let text = format_prediction(&s, Language::English);
        assert!(text.contains("No records to assess"));
        assert!(text.contains("No engagement values to assess"));
    }

    #[test]
    fn statistics_text_sections() {
        let text = format_statistics(&summary(10, 3, 1, 0.55), Language::English);
        assert!(text.contains("=== GRANT COMPETITION ==="));
        assert!(text.contains("Planning to participate: 3 (75.0%)"));
        assert!(text.contains("Not planning to participate: 1 (25.0%)"));
        assert!(text.contains("Difference: 0.50"));
        assert!(text.contains("Mean engagement: 0.55"));
        assert!(text.contains("Total records: 10"));
    }

    #[test]
    fn zero_grant_responses_are_reported() {
        let text = format_statistics(&summary(3, 0, 0, 0.5), Language::English);
        assert!(text.contains("No grant responses recorded"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn missing_sections_fall_back_to_message() {
        let s = StatisticsSummary {
            rows: 5,
            grant: None,
            engagement: None,
        };
        assert_eq!(
            format_statistics(&s, Language::English),
            "Not enough data for statistics\n"
        );
        let prediction = format_prediction(&s, Language::English);
        assert!(prediction.starts_with("ANALYSIS AND FORECAST"));
        assert!(prediction.contains("RECOMMENDATIONS:"));
    }

    #[test]
    fn russian_report_uses_original_wording() {
        let prediction = format_prediction(&summary(4, 2, 2, 0.5), Language::Russian);
        assert!(prediction.starts_with("АНАЛИЗ И ПРОГНОЗ"));
        assert!(prediction.contains("- Доля участников: 50.0%"));
        assert!(prediction.contains("Высокий интерес к грантовой поддержке"));
        assert!(prediction.ends_with("- Регулярно отслеживать вовлеченность участников"));

        let statistics = format_statistics(&summary(10, 3, 1, 0.55), Language::Russian);
        assert!(statistics.contains("=== СТАТИСТИКА ГРАНТОВОГО КОНКУРСА ==="));
        assert!(statistics.contains("Планируют участвовать: 3 (75.0%)"));
        assert!(statistics.contains("Всего записей: 10"));
    }
}
