#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use appreport::{
    AnalyticsBundle, Cadence, ChartBackend, ChartError, ChartKind, ChartRequest, ImageOptions,
    ReportRequest,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

pub fn request() -> ReportRequest {
    ReportRequest::new("Lumen", Cadence::Weekly)
        .period("Apr 24 - Apr 30")
        .generated_on(report_date())
}

/// Bundle JSON with every source present. Eight highlights against two
/// concerns exercises the column overflow line.
pub fn full_bundle_json() -> serde_json::Value {
    let highlights: Vec<String> = (1..=8).map(|i| format!("Highlight number {i}")).collect();
    json!({
        "appStore": {
            "averageRating": 4.6,
            "totalRatings": 1830,
            "distribution": {"5": 1200, "4": 400, "3": 130, "2": 50, "1": 50}
        },
        "googlePlay": {
            "averageRating": 4.1,
            "totalRatings": 920,
            "distribution": {"star5": 500, "star4": 250, "star3": 90, "star2": 40, "star1": 40}
        },
        "analytics": {
            "dailyActiveUsers": 20,
            "monthlyActiveUsers": 100,
            "newUsers": 1500,
            "sessions": 12345,
            "avgSessionDurationSecs": 205,
            "demographics": {"18-24": 35.0, "25-34": 40.0, "35-44": 25.0},
            "countries": {"US": 900, "DE": 300, "JP": 120}
        },
        "narrative": {
            "overallAnalysis": {
                "summary": "Installs grew while ratings held steady.",
                "keyMetrics": [
                    {"name": "Installs", "value": "1.2k", "trend": "up"},
                    {"name": "Crash rate", "value": "0.4%", "trend": "down"}
                ]
            },
            "highlights": highlights,
            "concerns": ["Onboarding drop-off", "Slow cold start"],
            "improvementSuggestions": [
                {"title": "Shorter signup", "description": "Cut the form to two fields.",
                 "priority": "high", "category": "UX", "expectedImpact": "More signups"}
            ],
            "trendPredictions": [
                {"title": "Summer peak", "prediction": "Usage rises in June.",
                 "timeframe": "6 weeks", "confidence": "medium"}
            ],
            "reviewAnalysis": {
                "positivePercent": 72.0,
                "neutralPercent": 18.0,
                "negativePercent": 10.0,
                "commonThemes": ["Clean design", "Sync issues"],
                "summary": "Reviewers like the design."
            },
            "competitivePositioning": {
                "summary": "Ahead on design, behind on integrations.",
                "strengths": ["Design", "Speed"],
                "weaknesses": ["Integrations"],
                "competitors": [
                    {"name": "Dawn", "rating": 4.3, "comparison": "Bigger catalog",
                     "advantage": "Cheaper"}
                ]
            },
            "marketOpportunities": [
                {"title": "Teams plan", "description": "Sell seats to small teams.",
                 "priority": "medium", "fit": "high", "effort": "high",
                 "potentialImpact": "New revenue line"}
            ]
        },
        "codeImprovements": [
            {"title": "Cache the feed", "description": "Memoize the feed query.",
             "priority": "high", "effort": "low", "category": "Performance",
             "references": [{"file": "src/feed.rs", "line": 42, "note": "hot path"}],
             "expectedImpact": "Faster feed"}
        ]
    })
}

pub fn full_bundle() -> AnalyticsBundle {
    AnalyticsBundle::from_json(full_bundle_json().to_string().as_bytes()).unwrap()
}

pub fn bundle_from(value: serde_json::Value) -> AnalyticsBundle {
    AnalyticsBundle::from_json(value.to_string().as_bytes()).unwrap()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 200, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// In-memory chart service. Kinds listed in `failing` answer 503 forever,
/// kinds in `garbage` answer with bytes that are not an image.
#[derive(Default)]
pub struct ScriptedBackend {
    pub failing: HashSet<ChartKind>,
    pub garbage: HashSet<ChartKind>,
    calls: Mutex<HashMap<ChartKind, u32>>,
}

impl ScriptedBackend {
    pub fn failing(kinds: &[ChartKind]) -> Self {
        Self {
            failing: kinds.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn garbage(kinds: &[ChartKind]) -> Self {
        Self {
            garbage: kinds.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self, kind: ChartKind) -> u32 {
        self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ChartBackend for ScriptedBackend {
    async fn render(
        &self,
        request: &ChartRequest,
        options: &ImageOptions,
    ) -> Result<Vec<u8>, ChartError> {
        *self.calls.lock().unwrap().entry(request.kind).or_default() += 1;
        if self.failing.contains(&request.kind) {
            return Err(ChartError::Status { status: 503 });
        }
        if self.garbage.contains(&request.kind) {
            return Ok(b"<html>rate limited</html>".to_vec());
        }
        Ok(png_bytes(options.width / 10, options.height / 10))
    }
}

/// Every stream of the document inflated and concatenated, so drawn text
/// can be searched for. Streams that are not zlib data are skipped.
pub fn pdf_text(pdf: &[u8]) -> String {
    let mut out = String::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + b"stream\n".len()..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            out.push_str(&String::from_utf8_lossy(&raw));
            out.push('\n');
        }
        rest = &body[end..];
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Number of `/Type /Page` objects, not counting the `/Pages` tree node.
pub fn count_pages(pdf: &[u8]) -> usize {
    let text = String::from_utf8_lossy(pdf);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}
