//! Normalizes an [`AnalyticsBundle`] into the ordered section list both
//! renderers consume.

use chrono::NaiveDate;

use crate::input::{AnalyticsBundle, NarrativeAnalysis, StoreRatings, UsageAnalytics};
use crate::locale::LocaleSpec;
use crate::model::{
    Cadence, CompetitiveSection, DataSource, DistributionTable, ExecutiveSummary, FooterSection,
    HeaderSection, MetricRow, RatingsSection, Section, SentimentSummary, StarRating,
    StoreSummary, Trend, UserAnalyticsSection,
};

pub const MAX_COUNTRIES: usize = 10;

/// What the caller asks for, independent of the data itself.
#[derive(Clone, Debug)]
pub struct ReportRequest {
    pub app_name: String,
    pub period: Option<String>,
    pub cadence: Cadence,
    pub locale: Option<LocaleSpec>,
    /// Date printed on the report. `None` means today (local time).
    pub generated_on: Option<NaiveDate>,
}

impl ReportRequest {
    pub fn new(app_name: impl Into<String>, cadence: Cadence) -> Self {
        Self {
            app_name: app_name.into(),
            period: None,
            cadence,
            locale: None,
            generated_on: None,
        }
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<LocaleSpec>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn report_date(&self) -> NaiveDate {
        self.generated_on
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Build the section list in canonical order. Header and Footer are always
/// present; every other section only when its data is.
pub fn build_sections(bundle: &AnalyticsBundle, request: &ReportRequest) -> Vec<Section> {
    let generated_on = request.report_date();
    let narrative = bundle.narrative.as_ref();
    let mut sections = Vec::with_capacity(11);

    sections.push(Section::Header(HeaderSection {
        app_name: request.app_name.clone(),
        cadence: request.cadence,
        period: request.period.clone().filter(|p| !p.trim().is_empty()),
        generated_on,
        sources: present_sources(bundle),
    }));

    if let Some(overall) = narrative.and_then(|n| n.overall_analysis.as_ref()) {
        sections.push(Section::ExecutiveSummary(ExecutiveSummary {
            summary: overall.summary.clone(),
            metrics: overall
                .key_metrics
                .iter()
                .map(|m| MetricRow {
                    name: m.name.clone(),
                    value: m.value.clone(),
                    trend: Trend::parse(&m.trend),
                })
                .collect(),
        }));
    }

    if let Some(n) = narrative
        && (!n.highlights.is_empty() || !n.concerns.is_empty())
    {
        sections.push(Section::HighlightsConcerns {
            highlights: n.highlights.clone(),
            concerns: n.concerns.clone(),
        });
    }

    if let Some(analytics) = &bundle.analytics {
        sections.push(Section::UserAnalytics(user_analytics(analytics)));
    }

    if let Some(ratings) = ratings_section(bundle, narrative) {
        sections.push(Section::RatingsReviews(ratings));
    }

    if let Some(cp) = narrative.and_then(|n| n.competitive_positioning.as_ref())
        && !cp.is_empty()
    {
        sections.push(Section::CompetitivePositioning(CompetitiveSection {
            summary: cp.summary.clone().filter(|s| !s.trim().is_empty()),
            strengths: cp.strengths.clone(),
            weaknesses: cp.weaknesses.clone(),
            competitors: cp.competitors.clone(),
        }));
    }

    if let Some(n) = narrative {
        if !n.market_opportunities.is_empty() {
            sections.push(Section::MarketOpportunity(n.market_opportunities.clone()));
        }
        if !n.trend_predictions.is_empty() {
            sections.push(Section::TrendAnalysis(n.trend_predictions.clone()));
        }
        if !n.improvement_suggestions.is_empty() {
            sections.push(Section::Improvements(n.improvement_suggestions.clone()));
        }
    }

    if let Some(code) = &bundle.code_improvements
        && !code.is_empty()
    {
        sections.push(Section::CodeImprovements(code.clone()));
    }

    sections.push(Section::Footer(FooterSection {
        app_name: request.app_name.clone(),
        generated_on,
    }));

    log::debug!(
        "built {} sections: {:?}",
        sections.len(),
        sections.iter().map(Section::kind).collect::<Vec<_>>()
    );
    sections
}

fn present_sources(bundle: &AnalyticsBundle) -> Vec<DataSource> {
    let mut sources = Vec::new();
    if bundle.app_store.is_some() {
        sources.push(DataSource::AppStore);
    }
    if bundle.google_play.is_some() {
        sources.push(DataSource::GooglePlay);
    }
    if bundle.analytics.is_some() {
        sources.push(DataSource::Analytics);
    }
    if bundle.narrative.is_some() {
        sources.push(DataSource::AiAnalysis);
    }
    if bundle.code_improvements.as_ref().is_some_and(|c| !c.is_empty()) {
        sources.push(DataSource::CodeRepository);
    }
    sources
}

/// DAU/MAU in percent rounded to one decimal; `None` when MAU is zero.
pub fn retention_percent(dau: u64, mau: u64) -> Option<f64> {
    (mau > 0).then(|| crate::format::round1(dau as f64 / mau as f64 * 100.0))
}

pub(crate) fn user_analytics(a: &UsageAnalytics) -> UserAnalyticsSection {
    let mut demographics: Vec<(String, f64)> = a
        .demographics
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    // BTreeMap order breaks ties by label; the sort is stable.
    demographics.sort_by(|x, y| y.1.total_cmp(&x.1));

    let mut countries: Vec<(String, u64)> =
        a.countries.iter().map(|(k, v)| (k.clone(), *v)).collect();
    countries.sort_by(|x, y| y.1.cmp(&x.1));
    countries.truncate(MAX_COUNTRIES);

    UserAnalyticsSection {
        daily_active_users: a.daily_active_users,
        monthly_active_users: a.monthly_active_users,
        new_users: a.new_users,
        sessions: a.sessions,
        retention_percent: retention_percent(a.daily_active_users, a.monthly_active_users),
        session_minutes: a.avg_session_duration_secs / 60,
        session_seconds: a.avg_session_duration_secs % 60,
        demographics,
        countries,
    }
}

fn store_summary(source: DataSource, store: &StoreRatings) -> StoreSummary {
    StoreSummary {
        source,
        average_rating: store.average_rating,
        total_ratings: store.total_ratings,
        stars: StarRating::from_rating(store.average_rating),
    }
}

fn ratings_section(
    bundle: &AnalyticsBundle,
    narrative: Option<&NarrativeAnalysis>,
) -> Option<RatingsSection> {
    let stores: Vec<(DataSource, &StoreRatings)> = [
        (DataSource::AppStore, bundle.app_store.as_ref()),
        (DataSource::GooglePlay, bundle.google_play.as_ref()),
    ]
    .into_iter()
    .filter_map(|(source, store)| store.map(|s| (source, s)))
    .collect();

    let sentiment = narrative
        .and_then(|n| n.review_analysis.as_ref())
        .map(|r| SentimentSummary {
            positive_percent: r.positive_percent,
            neutral_percent: r.neutral_percent,
            negative_percent: r.negative_percent,
            common_themes: r.common_themes.clone(),
            summary: r.summary.clone().filter(|s| !s.trim().is_empty()),
        });

    if stores.is_empty() && sentiment.is_none() {
        return None;
    }

    let distribution = (!stores.is_empty()).then(|| DistributionTable {
        columns: stores.iter().map(|(source, _)| *source).collect(),
        rows: (1..=5u8)
            .rev()
            .map(|star| {
                let counts = stores
                    .iter()
                    .map(|(_, s)| s.distribution.stars(star as usize))
                    .collect();
                (star, counts)
            })
            .collect(),
    });

    Some(RatingsSection {
        stores: stores
            .iter()
            .map(|(source, store)| store_summary(*source, store))
            .collect(),
        distribution,
        sentiment,
    })
}
