//! Raw report input as delivered by the upstream collection and analysis steps.
//!
//! Every source is independently optional. The only normalization done here is
//! on rating buckets: stores deliver them keyed either numerically (`"5"`) or
//! by name (`"star5"`), and both shapes are folded into a fixed five-slot
//! array at deserialization so nothing downstream ever sees key ambiguity.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsBundle {
    pub app_store: Option<StoreRatings>,
    pub google_play: Option<StoreRatings>,
    pub analytics: Option<UsageAnalytics>,
    pub narrative: Option<NarrativeAnalysis>,
    pub code_improvements: Option<Vec<CodeImprovement>>,
}

impl AnalyticsBundle {
    pub fn from_json(data: &[u8]) -> Result<Self, crate::Error> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// True when at least one of store ratings, usage analytics or narrative
    /// analysis is present. Anything else alone does not make a report.
    pub fn has_report_data(&self) -> bool {
        self.app_store.is_some()
            || self.google_play.is_some()
            || self.analytics.is_some()
            || self.narrative.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreRatings {
    pub average_rating: f64,
    pub total_ratings: u64,
    pub distribution: RatingBuckets,
}

/// Rating counts by star, index 0 = 1 star, index 4 = 5 stars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatingBuckets(pub [u64; 5]);

impl RatingBuckets {
    pub fn stars(&self, star: usize) -> u64 {
        match star {
            1..=5 => self.0[star - 1],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

fn bucket_index(key: &str) -> Option<usize> {
    let digits = key
        .trim()
        .strip_prefix("star")
        .or_else(|| key.trim().strip_prefix("Star"))
        .unwrap_or(key.trim());
    match digits.parse::<usize>() {
        Ok(n @ 1..=5) => Some(n - 1),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for RatingBuckets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let mut buckets = [0u64; 5];
        for (key, value) in &raw {
            let Some(idx) = bucket_index(key) else {
                log::debug!("ignoring unknown rating bucket key {key:?}");
                continue;
            };
            let count = value
                .as_u64()
                .or_else(|| value.as_f64().map(|f| f.max(0.0).round() as u64))
                .unwrap_or(0);
            buckets[idx] = count;
        }
        Ok(RatingBuckets(buckets))
    }
}

impl Serialize for RatingBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (idx, count) in self.0.iter().enumerate() {
            map.serialize_entry(&(idx + 1).to_string(), count)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageAnalytics {
    pub daily_active_users: u64,
    pub monthly_active_users: u64,
    pub new_users: u64,
    pub sessions: u64,
    pub avg_session_duration_secs: u64,
    /// Share of users per age group, in percent.
    pub demographics: BTreeMap<String, f64>,
    /// Users per country.
    pub countries: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NarrativeAnalysis {
    pub overall_analysis: Option<OverallAnalysis>,
    pub highlights: Vec<String>,
    pub concerns: Vec<String>,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    pub trend_predictions: Vec<TrendPrediction>,
    pub review_analysis: Option<ReviewAnalysis>,
    pub competitive_positioning: Option<CompetitivePositioning>,
    pub market_opportunities: Vec<MarketOpportunity>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverallAnalysis {
    pub summary: String,
    pub key_metrics: Vec<KeyMetric>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyMetric {
    pub name: String,
    pub value: String,
    pub trend: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementSuggestion {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: Option<String>,
    pub expected_impact: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendPrediction {
    pub title: String,
    pub prediction: String,
    pub timeframe: Option<String>,
    pub confidence: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewAnalysis {
    pub positive_percent: f64,
    pub neutral_percent: f64,
    pub negative_percent: f64,
    pub common_themes: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitivePositioning {
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub competitors: Vec<Competitor>,
}

impl CompetitivePositioning {
    pub fn is_empty(&self) -> bool {
        self.summary.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.competitors.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    pub name: String,
    pub rating: Option<f64>,
    pub comparison: String,
    pub advantage: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketOpportunity {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub fit: Option<String>,
    pub effort: Option<String>,
    pub potential_impact: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeImprovement {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub effort: Option<String>,
    pub category: Option<String>,
    pub references: Vec<CodeReference>,
    pub expected_impact: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeReference {
    pub file: String,
    pub line: Option<u32>,
    pub note: Option<String>,
}
