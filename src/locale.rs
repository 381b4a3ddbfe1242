//! Locale resolution: label catalogs, font profiles and number formats.
//!
//! A catalog is resolved once per render call and is immutable afterwards.
//! Unknown locales fall back to the English base catalog as a whole; there is
//! no per-label fallback, every registered catalog is complete by
//! construction (`Labels` has no optional fields).

use serde::{Deserialize, Serialize};

use crate::model::{Cadence, DataSource, Trend};

/// Requested locale, either a bare code (`"ja-JP"`) or an object carrying a
/// single `languageCode` field. The object form is tried first.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocaleSpec {
    Object {
        #[serde(rename = "languageCode")]
        language_code: String,
    },
    Code(String),
}

impl LocaleSpec {
    pub fn code(&self) -> &str {
        match self {
            LocaleSpec::Object { language_code } => language_code,
            LocaleSpec::Code(code) => code,
        }
    }
}

impl From<&str> for LocaleSpec {
    fn from(code: &str) -> Self {
        LocaleSpec::Code(code.to_string())
    }
}

impl From<String> for LocaleSpec {
    fn from(code: String) -> Self {
        LocaleSpec::Code(code)
    }
}

/// Script family used to pick fonts for the PDF renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontProfile {
    Latin,
    Japanese,
    SimplifiedChinese,
    Korean,
}

impl FontProfile {
    /// `;`-separated family candidates, first match wins. `None` means the
    /// built-in Helvetica is used.
    pub fn families(self) -> Option<&'static str> {
        match self {
            FontProfile::Latin => None,
            FontProfile::Japanese => Some(
                "Noto Sans CJK JP;Noto Sans JP;Hiragino Sans;Hiragino Kaku Gothic ProN;Yu Gothic;MS Gothic",
            ),
            FontProfile::SimplifiedChinese => Some(
                "Noto Sans CJK SC;Noto Sans SC;PingFang SC;Microsoft YaHei;SimHei;WenQuanYi Micro Hei",
            ),
            FontProfile::Korean => Some(
                "Noto Sans CJK KR;Noto Sans KR;Apple SD Gothic Neo;Malgun Gothic;NanumGothic",
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands: char,
    pub decimal: char,
}

#[derive(Clone, Copy, Debug)]
pub struct LocaleCatalog {
    pub code: &'static str,
    pub labels: &'static Labels,
    pub font: FontProfile,
    pub numbers: NumberFormat,
    /// chrono format string for report dates.
    pub date_format: &'static str,
}

impl LocaleCatalog {
    pub fn base() -> Self {
        EN_CATALOG
    }

    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}

/// Resolve a requested locale to its catalog; `None` and unknown codes give
/// the base catalog.
pub fn resolve(spec: Option<&LocaleSpec>) -> LocaleCatalog {
    let Some(spec) = spec else {
        return LocaleCatalog::base();
    };
    let normalized = spec.code().trim().to_ascii_lowercase().replace('_', "-");
    let mut subtags = normalized.split('-').filter(|s| !s.is_empty());
    let primary = subtags.next().unwrap_or("");
    let catalog = match primary {
        "en" => Some(EN_CATALOG),
        "es" => Some(ES_CATALOG),
        "de" => Some(DE_CATALOG),
        "ja" => Some(JA_CATALOG),
        "ko" => Some(KO_CATALOG),
        "zh" => match subtags.next() {
            None | Some("cn" | "hans" | "sg") => Some(ZH_CATALOG),
            Some(_) => None,
        },
        _ => None,
    };
    catalog.unwrap_or_else(|| {
        log::debug!("locale {:?} not registered, using base catalog", spec.code());
        LocaleCatalog::base()
    })
}

#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    pub report_title: &'static str,
    pub cadence_daily: &'static str,
    pub cadence_weekly: &'static str,
    pub cadence_monthly: &'static str,
    pub period: &'static str,
    pub generated_on: &'static str,
    pub data_sources: &'static str,
    pub source_app_store: &'static str,
    pub source_google_play: &'static str,
    pub source_analytics: &'static str,
    pub source_ai_analysis: &'static str,
    pub source_code_repository: &'static str,

    pub executive_summary: &'static str,
    pub key_metrics: &'static str,
    pub metric: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
    pub trend_up: &'static str,
    pub trend_down: &'static str,
    pub trend_stable: &'static str,

    pub highlights_concerns: &'static str,
    pub highlights: &'static str,
    pub concerns: &'static str,
    pub more_highlights: &'static str,
    pub more_concerns: &'static str,
    pub more_strengths: &'static str,
    pub more_weaknesses: &'static str,

    pub user_analytics: &'static str,
    pub daily_active_users: &'static str,
    pub monthly_active_users: &'static str,
    pub new_users: &'static str,
    pub sessions: &'static str,
    pub retention: &'static str,
    pub avg_session_duration: &'static str,
    pub minutes_short: &'static str,
    pub seconds_short: &'static str,
    pub demographics: &'static str,
    pub age_group: &'static str,
    pub share: &'static str,
    pub top_countries: &'static str,
    pub country: &'static str,
    pub users: &'static str,
    pub engagement: &'static str,

    pub ratings_reviews: &'static str,
    pub average_rating: &'static str,
    pub total_ratings: &'static str,
    pub rating_distribution: &'static str,
    pub stars: &'static str,
    pub review_sentiment: &'static str,
    pub positive: &'static str,
    pub neutral: &'static str,
    pub negative: &'static str,
    pub common_themes: &'static str,

    pub competitive_positioning: &'static str,
    pub strengths: &'static str,
    pub weaknesses: &'static str,
    pub competitors: &'static str,
    pub advantage: &'static str,

    pub market_opportunities: &'static str,
    pub fit: &'static str,
    pub effort: &'static str,
    pub potential_impact: &'static str,
    pub priority: &'static str,

    pub trend_analysis: &'static str,
    pub timeframe: &'static str,
    pub confidence: &'static str,

    pub improvements: &'static str,
    pub category: &'static str,
    pub expected_impact: &'static str,

    pub code_improvements: &'static str,
    pub references: &'static str,
    pub file: &'static str,
    pub line: &'static str,
    pub note: &'static str,

    pub level_high: &'static str,
    pub level_medium: &'static str,
    pub level_low: &'static str,

    pub continued: &'static str,
    pub page: &'static str,
    pub page_of: &'static str,
    pub footer_note: &'static str,
}

impl Labels {
    pub fn cadence(&self, cadence: Cadence) -> &'static str {
        match cadence {
            Cadence::Daily => self.cadence_daily,
            Cadence::Weekly => self.cadence_weekly,
            Cadence::Monthly => self.cadence_monthly,
        }
    }

    pub fn source(&self, source: DataSource) -> &'static str {
        match source {
            DataSource::AppStore => self.source_app_store,
            DataSource::GooglePlay => self.source_google_play,
            DataSource::Analytics => self.source_analytics,
            DataSource::AiAnalysis => self.source_ai_analysis,
            DataSource::CodeRepository => self.source_code_repository,
        }
    }

    pub fn trend(&self, trend: Trend) -> &'static str {
        match trend {
            Trend::Up => self.trend_up,
            Trend::Down => self.trend_down,
            Trend::Stable => self.trend_stable,
        }
    }

    /// Localized high/medium/low, or `None` for free-form values that are
    /// shown verbatim.
    pub fn level(&self, raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(self.level_high),
            "medium" => Some(self.level_medium),
            "low" => Some(self.level_low),
            _ => None,
        }
    }

    /// Every label value, used to seed font subsetting.
    pub fn all_text(&self) -> String {
        [
            self.report_title,
            self.cadence_daily,
            self.cadence_weekly,
            self.cadence_monthly,
            self.period,
            self.generated_on,
            self.data_sources,
            self.source_app_store,
            self.source_google_play,
            self.source_analytics,
            self.source_ai_analysis,
            self.source_code_repository,
            self.executive_summary,
            self.key_metrics,
            self.metric,
            self.value,
            self.trend,
            self.trend_up,
            self.trend_down,
            self.trend_stable,
            self.highlights_concerns,
            self.highlights,
            self.concerns,
            self.more_highlights,
            self.more_concerns,
            self.more_strengths,
            self.more_weaknesses,
            self.user_analytics,
            self.daily_active_users,
            self.monthly_active_users,
            self.new_users,
            self.sessions,
            self.retention,
            self.avg_session_duration,
            self.minutes_short,
            self.seconds_short,
            self.demographics,
            self.age_group,
            self.share,
            self.top_countries,
            self.country,
            self.users,
            self.engagement,
            self.ratings_reviews,
            self.average_rating,
            self.total_ratings,
            self.rating_distribution,
            self.stars,
            self.review_sentiment,
            self.positive,
            self.neutral,
            self.negative,
            self.common_themes,
            self.competitive_positioning,
            self.strengths,
            self.weaknesses,
            self.competitors,
            self.advantage,
            self.market_opportunities,
            self.fit,
            self.effort,
            self.potential_impact,
            self.priority,
            self.trend_analysis,
            self.timeframe,
            self.confidence,
            self.improvements,
            self.category,
            self.expected_impact,
            self.code_improvements,
            self.references,
            self.file,
            self.line,
            self.note,
            self.level_high,
            self.level_medium,
            self.level_low,
            self.continued,
            self.page,
            self.page_of,
            self.footer_note,
        ]
        .concat()
    }
}

const LATIN_NUMBERS: NumberFormat = NumberFormat {
    thousands: ',',
    decimal: '.',
};

const CONTINENTAL_NUMBERS: NumberFormat = NumberFormat {
    thousands: '.',
    decimal: ',',
};

const EN_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "en",
    labels: &EN,
    font: FontProfile::Latin,
    numbers: LATIN_NUMBERS,
    date_format: "%B %-d, %Y",
};

const ES_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "es",
    labels: &ES,
    font: FontProfile::Latin,
    numbers: CONTINENTAL_NUMBERS,
    date_format: "%d/%m/%Y",
};

const DE_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "de",
    labels: &DE,
    font: FontProfile::Latin,
    numbers: CONTINENTAL_NUMBERS,
    date_format: "%d.%m.%Y",
};

const JA_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "ja",
    labels: &JA,
    font: FontProfile::Japanese,
    numbers: LATIN_NUMBERS,
    date_format: "%Y年%m月%d日",
};

const ZH_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "zh",
    labels: &ZH,
    font: FontProfile::SimplifiedChinese,
    numbers: LATIN_NUMBERS,
    date_format: "%Y年%m月%d日",
};

const KO_CATALOG: LocaleCatalog = LocaleCatalog {
    code: "ko",
    labels: &KO,
    font: FontProfile::Korean,
    numbers: LATIN_NUMBERS,
    date_format: "%Y년 %m월 %d일",
};

const EN: Labels = Labels {
    report_title: "App Marketing Report",
    cadence_daily: "Daily Report",
    cadence_weekly: "Weekly Report",
    cadence_monthly: "Monthly Report",
    period: "Period",
    generated_on: "Generated on",
    data_sources: "Data sources",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "Analytics",
    source_ai_analysis: "AI Analysis",
    source_code_repository: "Code Repository",

    executive_summary: "Executive Summary",
    key_metrics: "Key Metrics",
    metric: "Metric",
    value: "Value",
    trend: "Trend",
    trend_up: "Up",
    trend_down: "Down",
    trend_stable: "Stable",

    highlights_concerns: "Highlights & Concerns",
    highlights: "Highlights",
    concerns: "Concerns",
    more_highlights: "more highlights",
    more_concerns: "more concerns",
    more_strengths: "more strengths",
    more_weaknesses: "more weaknesses",

    user_analytics: "User Analytics",
    daily_active_users: "Daily Active Users",
    monthly_active_users: "Monthly Active Users",
    new_users: "New Users",
    sessions: "Sessions",
    retention: "DAU/MAU Ratio",
    avg_session_duration: "Avg. Session Duration",
    minutes_short: "m",
    seconds_short: "s",
    demographics: "Demographics",
    age_group: "Age Group",
    share: "Share",
    top_countries: "Top Countries",
    country: "Country",
    users: "Users",
    engagement: "Engagement",

    ratings_reviews: "Ratings & Reviews",
    average_rating: "Average Rating",
    total_ratings: "Total Ratings",
    rating_distribution: "Rating Distribution",
    stars: "Stars",
    review_sentiment: "Review Sentiment",
    positive: "Positive",
    neutral: "Neutral",
    negative: "Negative",
    common_themes: "Common Themes",

    competitive_positioning: "Competitive Positioning",
    strengths: "Strengths",
    weaknesses: "Weaknesses",
    competitors: "Competitors",
    advantage: "Our Advantage",

    market_opportunities: "Market Opportunities",
    fit: "Fit",
    effort: "Effort",
    potential_impact: "Potential Impact",
    priority: "Priority",

    trend_analysis: "Trend Analysis",
    timeframe: "Timeframe",
    confidence: "Confidence",

    improvements: "Improvement Suggestions",
    category: "Category",
    expected_impact: "Expected Impact",

    code_improvements: "Code Improvements",
    references: "References",
    file: "File",
    line: "Line",
    note: "Note",

    level_high: "High",
    level_medium: "Medium",
    level_low: "Low",

    continued: "continued",
    page: "Page",
    page_of: "of",
    footer_note: "This report was generated automatically from store, analytics and AI analysis data.",
};

const ES: Labels = Labels {
    report_title: "Informe de Marketing de la App",
    cadence_daily: "Informe diario",
    cadence_weekly: "Informe semanal",
    cadence_monthly: "Informe mensual",
    period: "Periodo",
    generated_on: "Generado el",
    data_sources: "Fuentes de datos",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "Analítica",
    source_ai_analysis: "Análisis de IA",
    source_code_repository: "Repositorio de código",

    executive_summary: "Resumen ejecutivo",
    key_metrics: "Métricas clave",
    metric: "Métrica",
    value: "Valor",
    trend: "Tendencia",
    trend_up: "Sube",
    trend_down: "Baja",
    trend_stable: "Estable",

    highlights_concerns: "Aspectos destacados y preocupaciones",
    highlights: "Aspectos destacados",
    concerns: "Preocupaciones",
    more_highlights: "aspectos destacados más",
    more_concerns: "preocupaciones más",
    more_strengths: "fortalezas más",
    more_weaknesses: "debilidades más",

    user_analytics: "Analítica de usuarios",
    daily_active_users: "Usuarios activos diarios",
    monthly_active_users: "Usuarios activos mensuales",
    new_users: "Usuarios nuevos",
    sessions: "Sesiones",
    retention: "Ratio DAU/MAU",
    avg_session_duration: "Duración media de sesión",
    minutes_short: "min",
    seconds_short: "s",
    demographics: "Demografía",
    age_group: "Grupo de edad",
    share: "Proporción",
    top_countries: "Países principales",
    country: "País",
    users: "Usuarios",
    engagement: "Interacción",

    ratings_reviews: "Valoraciones y reseñas",
    average_rating: "Valoración media",
    total_ratings: "Total de valoraciones",
    rating_distribution: "Distribución de valoraciones",
    stars: "Estrellas",
    review_sentiment: "Sentimiento de las reseñas",
    positive: "Positivo",
    neutral: "Neutral",
    negative: "Negativo",
    common_themes: "Temas frecuentes",

    competitive_positioning: "Posicionamiento competitivo",
    strengths: "Fortalezas",
    weaknesses: "Debilidades",
    competitors: "Competidores",
    advantage: "Nuestra ventaja",

    market_opportunities: "Oportunidades de mercado",
    fit: "Encaje",
    effort: "Esfuerzo",
    potential_impact: "Impacto potencial",
    priority: "Prioridad",

    trend_analysis: "Análisis de tendencias",
    timeframe: "Plazo",
    confidence: "Confianza",

    improvements: "Sugerencias de mejora",
    category: "Categoría",
    expected_impact: "Impacto esperado",

    code_improvements: "Mejoras de código",
    references: "Referencias",
    file: "Archivo",
    line: "Línea",
    note: "Nota",

    level_high: "Alta",
    level_medium: "Media",
    level_low: "Baja",

    continued: "continuación",
    page: "Página",
    page_of: "de",
    footer_note: "Este informe se generó automáticamente a partir de datos de tiendas, analítica y análisis de IA.",
};

const DE: Labels = Labels {
    report_title: "App-Marketingbericht",
    cadence_daily: "Tagesbericht",
    cadence_weekly: "Wochenbericht",
    cadence_monthly: "Monatsbericht",
    period: "Zeitraum",
    generated_on: "Erstellt am",
    data_sources: "Datenquellen",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "Analytics",
    source_ai_analysis: "KI-Analyse",
    source_code_repository: "Code-Repository",

    executive_summary: "Zusammenfassung",
    key_metrics: "Kennzahlen",
    metric: "Kennzahl",
    value: "Wert",
    trend: "Trend",
    trend_up: "Steigend",
    trend_down: "Fallend",
    trend_stable: "Stabil",

    highlights_concerns: "Highlights & Bedenken",
    highlights: "Highlights",
    concerns: "Bedenken",
    more_highlights: "weitere Highlights",
    more_concerns: "weitere Bedenken",
    more_strengths: "weitere Stärken",
    more_weaknesses: "weitere Schwächen",

    user_analytics: "Nutzeranalyse",
    daily_active_users: "Täglich aktive Nutzer",
    monthly_active_users: "Monatlich aktive Nutzer",
    new_users: "Neue Nutzer",
    sessions: "Sitzungen",
    retention: "DAU/MAU-Verhältnis",
    avg_session_duration: "Ø Sitzungsdauer",
    minutes_short: "min",
    seconds_short: "s",
    demographics: "Demografie",
    age_group: "Altersgruppe",
    share: "Anteil",
    top_countries: "Top-Länder",
    country: "Land",
    users: "Nutzer",
    engagement: "Engagement",

    ratings_reviews: "Bewertungen & Rezensionen",
    average_rating: "Durchschnittsbewertung",
    total_ratings: "Bewertungen gesamt",
    rating_distribution: "Bewertungsverteilung",
    stars: "Sterne",
    review_sentiment: "Stimmung der Rezensionen",
    positive: "Positiv",
    neutral: "Neutral",
    negative: "Negativ",
    common_themes: "Häufige Themen",

    competitive_positioning: "Wettbewerbsposition",
    strengths: "Stärken",
    weaknesses: "Schwächen",
    competitors: "Wettbewerber",
    advantage: "Unser Vorteil",

    market_opportunities: "Marktchancen",
    fit: "Passung",
    effort: "Aufwand",
    potential_impact: "Mögliche Wirkung",
    priority: "Priorität",

    trend_analysis: "Trendanalyse",
    timeframe: "Zeitrahmen",
    confidence: "Konfidenz",

    improvements: "Verbesserungsvorschläge",
    category: "Kategorie",
    expected_impact: "Erwartete Wirkung",

    code_improvements: "Code-Verbesserungen",
    references: "Referenzen",
    file: "Datei",
    line: "Zeile",
    note: "Hinweis",

    level_high: "Hoch",
    level_medium: "Mittel",
    level_low: "Niedrig",

    continued: "Fortsetzung",
    page: "Seite",
    page_of: "von",
    footer_note: "Dieser Bericht wurde automatisch aus Store-, Analytics- und KI-Analysedaten erstellt.",
};

const JA: Labels = Labels {
    report_title: "アプリマーケティングレポート",
    cadence_daily: "日次レポート",
    cadence_weekly: "週次レポート",
    cadence_monthly: "月次レポート",
    period: "対象期間",
    generated_on: "作成日",
    data_sources: "データソース",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "アナリティクス",
    source_ai_analysis: "AI分析",
    source_code_repository: "コードリポジトリ",

    executive_summary: "エグゼクティブサマリー",
    key_metrics: "主要指標",
    metric: "指標",
    value: "値",
    trend: "傾向",
    trend_up: "上昇",
    trend_down: "下降",
    trend_stable: "横ばい",

    highlights_concerns: "ハイライトと懸念事項",
    highlights: "ハイライト",
    concerns: "懸念事項",
    more_highlights: "件のハイライト",
    more_concerns: "件の懸念事項",
    more_strengths: "件の強み",
    more_weaknesses: "件の弱み",

    user_analytics: "ユーザー分析",
    daily_active_users: "デイリーアクティブユーザー",
    monthly_active_users: "マンスリーアクティブユーザー",
    new_users: "新規ユーザー",
    sessions: "セッション数",
    retention: "DAU/MAU比率",
    avg_session_duration: "平均セッション時間",
    minutes_short: "分",
    seconds_short: "秒",
    demographics: "ユーザー属性",
    age_group: "年齢層",
    share: "割合",
    top_countries: "上位の国",
    country: "国",
    users: "ユーザー数",
    engagement: "エンゲージメント",

    ratings_reviews: "評価とレビュー",
    average_rating: "平均評価",
    total_ratings: "評価数",
    rating_distribution: "評価分布",
    stars: "星",
    review_sentiment: "レビューの感情",
    positive: "ポジティブ",
    neutral: "ニュートラル",
    negative: "ネガティブ",
    common_themes: "よくあるテーマ",

    competitive_positioning: "競合ポジショニング",
    strengths: "強み",
    weaknesses: "弱み",
    competitors: "競合",
    advantage: "当社の優位性",

    market_opportunities: "市場機会",
    fit: "適合度",
    effort: "工数",
    potential_impact: "想定インパクト",
    priority: "優先度",

    trend_analysis: "トレンド分析",
    timeframe: "期間",
    confidence: "確度",

    improvements: "改善提案",
    category: "カテゴリ",
    expected_impact: "期待される効果",

    code_improvements: "コード改善",
    references: "参照",
    file: "ファイル",
    line: "行",
    note: "メモ",

    level_high: "高",
    level_medium: "中",
    level_low: "低",

    continued: "続き",
    page: "ページ",
    page_of: "/",
    footer_note: "このレポートはストア、アナリティクス、AI分析のデータから自動生成されました。",
};

const ZH: Labels = Labels {
    report_title: "应用营销报告",
    cadence_daily: "日报",
    cadence_weekly: "周报",
    cadence_monthly: "月报",
    period: "统计周期",
    generated_on: "生成日期",
    data_sources: "数据来源",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "数据分析",
    source_ai_analysis: "AI 分析",
    source_code_repository: "代码仓库",

    executive_summary: "执行摘要",
    key_metrics: "关键指标",
    metric: "指标",
    value: "数值",
    trend: "趋势",
    trend_up: "上升",
    trend_down: "下降",
    trend_stable: "持平",

    highlights_concerns: "亮点与问题",
    highlights: "亮点",
    concerns: "问题",
    more_highlights: "条亮点",
    more_concerns: "条问题",
    more_strengths: "条优势",
    more_weaknesses: "条劣势",

    user_analytics: "用户分析",
    daily_active_users: "日活跃用户",
    monthly_active_users: "月活跃用户",
    new_users: "新增用户",
    sessions: "会话数",
    retention: "DAU/MAU 比率",
    avg_session_duration: "平均会话时长",
    minutes_short: "分",
    seconds_short: "秒",
    demographics: "用户画像",
    age_group: "年龄段",
    share: "占比",
    top_countries: "主要国家",
    country: "国家",
    users: "用户数",
    engagement: "参与度",

    ratings_reviews: "评分与评论",
    average_rating: "平均评分",
    total_ratings: "评分总数",
    rating_distribution: "评分分布",
    stars: "星级",
    review_sentiment: "评论情感",
    positive: "正面",
    neutral: "中性",
    negative: "负面",
    common_themes: "常见主题",

    competitive_positioning: "竞争定位",
    strengths: "优势",
    weaknesses: "劣势",
    competitors: "竞争对手",
    advantage: "我们的优势",

    market_opportunities: "市场机会",
    fit: "契合度",
    effort: "投入",
    potential_impact: "潜在影响",
    priority: "优先级",

    trend_analysis: "趋势分析",
    timeframe: "时间范围",
    confidence: "置信度",

    improvements: "改进建议",
    category: "类别",
    expected_impact: "预期影响",

    code_improvements: "代码改进",
    references: "参考",
    file: "文件",
    line: "行",
    note: "备注",

    level_high: "高",
    level_medium: "中",
    level_low: "低",

    continued: "续",
    page: "第",
    page_of: "/",
    footer_note: "本报告根据应用商店、数据分析和 AI 分析数据自动生成。",
};

const KO: Labels = Labels {
    report_title: "앱 마케팅 보고서",
    cadence_daily: "일간 보고서",
    cadence_weekly: "주간 보고서",
    cadence_monthly: "월간 보고서",
    period: "기간",
    generated_on: "생성일",
    data_sources: "데이터 소스",
    source_app_store: "App Store",
    source_google_play: "Google Play",
    source_analytics: "애널리틱스",
    source_ai_analysis: "AI 분석",
    source_code_repository: "코드 저장소",

    executive_summary: "요약",
    key_metrics: "핵심 지표",
    metric: "지표",
    value: "값",
    trend: "추세",
    trend_up: "상승",
    trend_down: "하락",
    trend_stable: "보합",

    highlights_concerns: "주요 성과 및 우려 사항",
    highlights: "주요 성과",
    concerns: "우려 사항",
    more_highlights: "개의 주요 성과 더 있음",
    more_concerns: "개의 우려 사항 더 있음",
    more_strengths: "개의 강점 더 있음",
    more_weaknesses: "개의 약점 더 있음",

    user_analytics: "사용자 분석",
    daily_active_users: "일간 활성 사용자",
    monthly_active_users: "월간 활성 사용자",
    new_users: "신규 사용자",
    sessions: "세션 수",
    retention: "DAU/MAU 비율",
    avg_session_duration: "평균 세션 시간",
    minutes_short: "분",
    seconds_short: "초",
    demographics: "사용자 구성",
    age_group: "연령대",
    share: "비율",
    top_countries: "상위 국가",
    country: "국가",
    users: "사용자 수",
    engagement: "참여도",

    ratings_reviews: "평점 및 리뷰",
    average_rating: "평균 평점",
    total_ratings: "전체 평점 수",
    rating_distribution: "평점 분포",
    stars: "별점",
    review_sentiment: "리뷰 감성",
    positive: "긍정",
    neutral: "중립",
    negative: "부정",
    common_themes: "주요 주제",

    competitive_positioning: "경쟁 포지셔닝",
    strengths: "강점",
    weaknesses: "약점",
    competitors: "경쟁사",
    advantage: "우리의 강점",

    market_opportunities: "시장 기회",
    fit: "적합도",
    effort: "노력",
    potential_impact: "잠재 효과",
    priority: "우선순위",

    trend_analysis: "추세 분석",
    timeframe: "기간",
    confidence: "신뢰도",

    improvements: "개선 제안",
    category: "카테고리",
    expected_impact: "기대 효과",

    code_improvements: "코드 개선",
    references: "참조",
    file: "파일",
    line: "줄",
    note: "메모",

    level_high: "높음",
    level_medium: "보통",
    level_low: "낮음",

    continued: "계속",
    page: "페이지",
    page_of: "/",
    footer_note: "이 보고서는 스토어, 애널리틱스, AI 분석 데이터로 자동 생성되었습니다.",
};
