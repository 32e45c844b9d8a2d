//! Interface and report wording.
//! English and Russian texts, picked through the `language` config key.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

impl Language {
    pub fn texts(self) -> &'static Texts {
        match self {
            Language::English => &ENGLISH,
            Language::Russian => &RUSSIAN,
        }
    }
}

/// Every user-facing string. Category arrays follow `XCategory::ALL` / `YCategory::ALL`.
#[derive(Debug)]
pub struct Texts {
    pub x_categories: [&'static str; 4],
    pub x_help: [&'static str; 4],
    pub y_categories: [&'static str; 4],

    pub submission_date_axis: &'static str,
    pub grant_axis: &'static str,
    pub responses: &'static str,
    /// Joins Y and X in a chart title
    pub title_by: &'static str,

    pub grant_header: &'static str,
    pub planning: &'static str,
    pub not_planning: &'static str,
    pub no_grant_responses: &'static str,
    pub engagement_header: &'static str,
    pub grant_participants: &'static str,
    pub others: &'static str,
    pub difference: &'static str,
    pub overall_header: &'static str,
    pub mean_engagement: &'static str,
    pub maximum: &'static str,
    pub minimum: &'static str,
    pub total_records: &'static str,
    pub not_enough_statistics: &'static str,

    pub forecast_header: &'static str,
    pub grant_section: &'static str,
    pub participant_share: &'static str,
    pub high_interest: &'static str,
    pub low_interest: &'static str,
    pub no_records: &'static str,
    pub engagement_section: &'static str,
    pub average_score: &'static str,
    pub high_engagement: &'static str,
    pub medium_engagement: &'static str,
    pub low_engagement: &'static str,
    pub no_engagement_values: &'static str,
    pub recommendations_header: &'static str,
    pub recommendations: [&'static str; 4],

    pub subtitle: &'static str,
    pub data_file: &'static str,
    pub no_file: &'static str,
    pub load: &'static str,
    pub parameters: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub shift: &'static str,
    pub all_shifts: &'static str,
    pub analyze: &'static str,
    pub export: &'static str,
    pub help: &'static str,
    pub forecast: &'static str,
    pub statistics: &'static str,
    pub no_data: &'static str,
    pub no_chart: &'static str,

    pub ready: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub loaded: &'static str,
    pub records: &'static str,
    pub load_failed: &'static str,
    pub load_first: &'static str,
    pub analysis_failed: &'static str,
    pub export_failed: &'static str,
    pub rows: &'static str,
    pub columns: &'static str,
    pub not_found: &'static str,
    pub analyzed_rows: &'static str,
    pub exported_to: &'static str,
    pub nothing_to_export: &'static str,
}

pub static ENGLISH: Texts = Texts {
    x_categories: [
        "Submission time",
        "Event name",
        "Shift name",
        "Grant competition",
    ],
    x_help: [
        "Analysis by application submission date",
        "Comparison of different events",
        "Analysis by forum shift",
        "Comparison of grant competition participants",
    ],
    y_categories: ["Engagement", "Participant count", "Activity", "Rating"],

    submission_date_axis: "Submission date",
    grant_axis: "Grant competition participation",
    responses: "Responses",
    title_by: "by",

    grant_header: "=== GRANT COMPETITION ===",
    planning: "Planning to participate",
    not_planning: "Not planning to participate",
    no_grant_responses: "No grant responses recorded",
    engagement_header: "=== ENGAGEMENT ===",
    grant_participants: "Grant participants",
    others: "Others",
    difference: "Difference",
    overall_header: "=== OVERALL ===",
    mean_engagement: "Mean engagement",
    maximum: "Maximum",
    minimum: "Minimum",
    total_records: "Total records",
    not_enough_statistics: "Not enough data for statistics",

    forecast_header: "ANALYSIS AND FORECAST",
    grant_section: "GRANT COMPETITION:",
    participant_share: "Participant share",
    high_interest: "High interest in grant support ✓",
    low_interest: "Low interest in grant support ⚠",
    no_records: "No records to assess",
    engagement_section: "ENGAGEMENT:",
    average_score: "Average score",
    high_engagement: "High participant engagement ✓",
    medium_engagement: "Medium participant engagement ∼",
    low_engagement: "Low participant engagement ⚠",
    no_engagement_values: "No engagement values to assess",
    recommendations_header: "RECOMMENDATIONS:",
    recommendations: [
        "Run additional motivational activities",
        "Improve communication about grant opportunities",
        "Set up a support system for grant participants",
        "Track participant engagement regularly",
    ],

    subtitle: "Registration data analysis",
    data_file: "📁 Data File",
    no_file: "No file selected",
    load: "📂 Load",
    parameters: "🔧 Analysis Parameters",
    x_axis: "X axis:",
    y_axis: "Y axis:",
    shift: "Shift:",
    all_shifts: "All",
    analyze: "▶ Analyze Data",
    export: "🖼 Export Chart",
    help: "❓ Help",
    forecast: "🔮 Forecast",
    statistics: "📈 Statistics",
    no_data: "No Data",
    no_chart: "Not enough data to build a chart",

    ready: "Ready",
    success: "Success",
    warning: "Warning",
    error: "Error",
    loaded: "File loaded successfully!",
    records: "Records",
    load_failed: "Failed to load file",
    load_first: "Load a data file first!",
    analysis_failed: "Analysis failed",
    export_failed: "Chart export failed",
    rows: "Rows",
    columns: "columns",
    not_found: "not found",
    analyzed_rows: "Rows analyzed",
    exported_to: "Chart exported to",
    nothing_to_export: "No chart to export",
};

pub static RUSSIAN: Texts = Texts {
    x_categories: [
        "Момент подачи заявления",
        "Наименование мероприятия",
        "Наименование смены",
        "Грантовый конкурс",
    ],
    x_help: [
        "Анализ по дате подачи заявлений",
        "Сравнение различных мероприятий",
        "Анализ по сменам форума",
        "Сравнение участников грантового конкурса",
    ],
    y_categories: ["Вовлеченность", "Количество участников", "Активность", "Рейтинг"],

    submission_date_axis: "Дата подачи заявления",
    grant_axis: "Участие в грантовом конкурсе",
    responses: "Ответы",
    title_by: "по",

    grant_header: "=== СТАТИСТИКА ГРАНТОВОГО КОНКУРСА ===",
    planning: "Планируют участвовать",
    not_planning: "Не планируют участвовать",
    no_grant_responses: "Нет ответов о грантовом конкурсе",
    engagement_header: "=== ВОВЛЕЧЕННОСТЬ ===",
    grant_participants: "Участники гранта",
    others: "Остальные",
    difference: "Разница",
    overall_header: "=== ОБЩАЯ СТАТИСТИКА ===",
    mean_engagement: "Средняя вовлеченность",
    maximum: "Максимальная",
    minimum: "Минимальная",
    total_records: "Всего записей",
    not_enough_statistics: "Недостаточно данных для статистики",

    forecast_header: "АНАЛИЗ И ПРОГНОЗ",
    grant_section: "ГРАНТОВЫЙ КОНКУРС:",
    participant_share: "Доля участников",
    high_interest: "Высокий интерес к грантовой поддержке ✓",
    low_interest: "Низкий интерес к грантовой поддержке ⚠",
    no_records: "Нет записей для оценки",
    engagement_section: "ВОВЛЕЧЕННОСТЬ:",
    average_score: "Средний показатель",
    high_engagement: "Высокая вовлеченность участников ✓",
    medium_engagement: "Средняя вовлеченность участников ∼",
    low_engagement: "Низкая вовлеченность участников ⚠",
    no_engagement_values: "Нет значений вовлеченности для оценки",
    recommendations_header: "РЕКОМЕНДАЦИИ:",
    recommendations: [
        "Провести дополнительные мотивационные мероприятия",
        "Улучшить информирование о грантовых возможностях",
        "Создать систему поддержки для участников грантов",
        "Регулярно отслеживать вовлеченность участников",
    ],

    subtitle: "Анализ данных мероприятий",
    data_file: "📁 Выбор файла данных",
    no_file: "Файл не выбран",
    load: "📂 Загрузить",
    parameters: "🔧 Параметры анализа",
    x_axis: "Ось X:",
    y_axis: "Ось Y:",
    shift: "Смена:",
    all_shifts: "все",
    analyze: "▶ Анализировать данные",
    export: "🖼 Сохранить график",
    help: "❓ Помощь",
    forecast: "🔮 Прогноз",
    statistics: "📈 Статистика",
    no_data: "Нет данных",
    no_chart: "Недостаточно данных для построения графика",

    ready: "Готово",
    success: "Успех",
    warning: "Предупреждение",
    error: "Ошибка",
    loaded: "Файл загружен успешно!",
    records: "Записей",
    load_failed: "Ошибка загрузки файла",
    load_first: "Сначала загрузите файл данных!",
    analysis_failed: "Ошибка анализа",
    export_failed: "Ошибка сохранения графика",
    rows: "Записей",
    columns: "колонок",
    not_found: "не найдены",
    analyzed_rows: "Проанализировано записей",
    exported_to: "График сохранён в",
    nothing_to_export: "Нет графика для сохранения",
};
