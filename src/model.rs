use chrono::NaiveDate;

use crate::input::{
    CodeImprovement, Competitor, ImprovementSuggestion, MarketOpportunity, TrendPrediction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Cadence::Daily),
            "weekly" => Some(Cadence::Weekly),
            "monthly" => Some(Cadence::Monthly),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    AppStore,
    GooglePlay,
    Analytics,
    AiAnalysis,
    CodeRepository,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Anything unrecognized is treated as stable.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Trend::Up,
            "down" => Trend::Down,
            _ => Trend::Stable,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let r = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        let full = r.floor() as u8;
        let half = u8::from(full < 5 && r - r.floor() >= 0.5);
        StarRating {
            full,
            half,
            empty: 5 - full - half,
        }
    }

    pub fn glyphs(self) -> String {
        let mut s = "★".repeat(self.full as usize);
        s.push_str(&"⯨".repeat(self.half as usize));
        s.push_str(&"☆".repeat(self.empty as usize));
        s
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKind {
    Header,
    ExecutiveSummary,
    HighlightsConcerns,
    UserAnalytics,
    RatingsReviews,
    CompetitivePositioning,
    MarketOpportunity,
    TrendAnalysis,
    Improvements,
    CodeImprovements,
    Footer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderSection {
    pub app_name: String,
    pub cadence: Cadence,
    pub period: Option<String>,
    pub generated_on: NaiveDate,
    pub sources: Vec<DataSource>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    pub name: String,
    pub value: String,
    pub trend: Trend,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExecutiveSummary {
    pub summary: String,
    pub metrics: Vec<MetricRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserAnalyticsSection {
    pub daily_active_users: u64,
    pub monthly_active_users: u64,
    pub new_users: u64,
    pub sessions: u64,
    /// DAU/MAU in percent, one decimal; absent when MAU is zero.
    pub retention_percent: Option<f64>,
    pub session_minutes: u64,
    pub session_seconds: u64,
    /// Sorted descending by share.
    pub demographics: Vec<(String, f64)>,
    /// Sorted descending by users, at most ten entries.
    pub countries: Vec<(String, u64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoreSummary {
    pub source: DataSource,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub stars: StarRating,
}

/// Rating counts per star, one column per store that supplied data.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionTable {
    pub columns: Vec<DataSource>,
    /// Rows ordered 5 stars down to 1 star: (star, count per column).
    pub rows: Vec<(u8, Vec<u64>)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SentimentSummary {
    pub positive_percent: f64,
    pub neutral_percent: f64,
    pub negative_percent: f64,
    pub common_themes: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingsSection {
    pub stores: Vec<StoreSummary>,
    pub distribution: Option<DistributionTable>,
    pub sentiment: Option<SentimentSummary>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompetitiveSection {
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub competitors: Vec<Competitor>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FooterSection {
    pub app_name: String,
    pub generated_on: NaiveDate,
}

/// One semantic block of the report. Both renderers consume the same list.
#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    Header(HeaderSection),
    ExecutiveSummary(ExecutiveSummary),
    HighlightsConcerns {
        highlights: Vec<String>,
        concerns: Vec<String>,
    },
    UserAnalytics(UserAnalyticsSection),
    RatingsReviews(RatingsSection),
    CompetitivePositioning(CompetitiveSection),
    MarketOpportunity(Vec<MarketOpportunity>),
    TrendAnalysis(Vec<TrendPrediction>),
    Improvements(Vec<ImprovementSuggestion>),
    CodeImprovements(Vec<CodeImprovement>),
    Footer(FooterSection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Header(_) => SectionKind::Header,
            Section::ExecutiveSummary(_) => SectionKind::ExecutiveSummary,
            Section::HighlightsConcerns { .. } => SectionKind::HighlightsConcerns,
            Section::UserAnalytics(_) => SectionKind::UserAnalytics,
            Section::RatingsReviews(_) => SectionKind::RatingsReviews,
            Section::CompetitivePositioning(_) => SectionKind::CompetitivePositioning,
            Section::MarketOpportunity(_) => SectionKind::MarketOpportunity,
            Section::TrendAnalysis(_) => SectionKind::TrendAnalysis,
            Section::Improvements(_) => SectionKind::Improvements,
            Section::CodeImprovements(_) => SectionKind::CodeImprovements,
            Section::Footer(_) => SectionKind::Footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_counts_are_clamped() {
        let cases = [
            (0.0, (0, 0, 5)),
            (1.0, (1, 0, 4)),
            (2.4, (2, 0, 3)),
            (2.5, (2, 1, 2)),
            (3.0, (3, 0, 2)),
            (4.9, (4, 1, 0)),
            (5.0, (5, 0, 0)),
            (6.0, (5, 0, 0)),
            (-1.0, (0, 0, 5)),
        ];
        for (rating, (full, half, empty)) in cases {
            let s = StarRating::from_rating(rating);
            assert_eq!((s.full, s.half, s.empty), (full, half, empty), "rating {rating}");
        }
    }

    #[test]
    fn star_glyphs_have_five_positions() {
        assert_eq!(StarRating::from_rating(3.5).glyphs(), "★★★⯨☆");
        assert_eq!(StarRating::from_rating(f64::NAN).glyphs().chars().count(), 5);
    }

    #[test]
    fn unrecognized_trend_is_stable() {
        assert_eq!(Trend::parse("UP"), Trend::Up);
        assert_eq!(Trend::parse(" down "), Trend::Down);
        assert_eq!(Trend::parse("sideways"), Trend::Stable);
        assert_eq!(Trend::parse(""), Trend::Stable);
        assert_eq!(Trend::Stable.arrow(), "→");
    }

    #[test]
    fn cadence_parses_case_insensitively() {
        assert_eq!(Cadence::parse("Weekly"), Some(Cadence::Weekly));
        assert_eq!(Cadence::parse("yearly"), None);
    }
}
