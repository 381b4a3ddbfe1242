mod common;

use std::time::Duration;

use appreport::{
    ChartBackend, ChartError, ChartKind, ChartRequest, ImageOptions, LocaleCatalog, ReportConfig,
    chart_requests, render_charts, render_pdf_document,
};
use async_trait::async_trait;
use serde_json::json;
use tokio::time::{Instant, sleep};

use common::{ScriptedBackend, bundle_from, full_bundle, request};

/// Answers every call after a fixed delay.
struct Slow(Duration);

#[async_trait]
impl ChartBackend for Slow {
    async fn render(
        &self,
        _request: &ChartRequest,
        options: &ImageOptions,
    ) -> Result<Vec<u8>, ChartError> {
        sleep(self.0).await;
        Ok(common::png_bytes(options.width / 10, options.height / 10))
    }
}

#[tokio::test(start_paused = true)]
async fn charts_render_concurrently() {
    let requests = chart_requests(&full_bundle(), &LocaleCatalog::base());
    assert_eq!(requests.len(), 6);

    let start = Instant::now();
    let set = render_charts(&Slow(Duration::from_secs(2)), requests, &ReportConfig::default()).await;
    assert_eq!(set.images().count(), 6);
    // Six calls of two seconds each, all in flight at once.
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn batch_deadline_fails_the_stragglers() {
    let config = ReportConfig::builder()
        .chart_timeout_secs(60)
        .batch_timeout_secs(10)
        .build()
        .unwrap();
    let requests = chart_requests(&full_bundle(), &LocaleCatalog::base());

    let start = Instant::now();
    let set = render_charts(&Slow(Duration::from_secs(30)), requests, &config).await;
    assert_eq!(start.elapsed(), Duration::from_secs(10));
    assert!(set.is_empty());
    assert_eq!(set.failed().len(), 6);
    assert!(
        set.failed()
            .iter()
            .all(|(_, e)| *e == ChartError::Timeout { secs: 10 })
    );
}

#[tokio::test(start_paused = true)]
async fn every_chart_failing_still_yields_a_document() {
    common::init_logging();
    let all = [
        ChartKind::RatingDistribution,
        ChartKind::Demographics,
        ChartKind::Countries,
        ChartKind::Engagement,
        ChartKind::Sentiment,
        ChartKind::Retention,
    ];
    let backend = ScriptedBackend::failing(&all);
    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();
    assert!(doc.placed_charts.is_empty());
    assert_eq!(doc.skipped_elements, 0);
    assert!(doc.bytes.starts_with(b"%PDF-"));
    for kind in all {
        assert_eq!(backend.calls(kind), 3, "{kind}");
    }
}

#[test]
fn requests_follow_the_available_data() {
    let bundle = bundle_from(json!({
        "appStore": {"averageRating": 4.0, "totalRatings": 3, "distribution": {"5": 3}},
        "analytics": {"dailyActiveUsers": 5, "monthlyActiveUsers": 0}
    }));
    let kinds: Vec<ChartKind> = chart_requests(&bundle, &LocaleCatalog::base())
        .iter()
        .map(|r| r.kind)
        .collect();
    assert!(kinds.contains(&ChartKind::RatingDistribution));
    assert!(kinds.contains(&ChartKind::Engagement));
    assert!(!kinds.contains(&ChartKind::Retention));
    assert!(!kinds.contains(&ChartKind::Sentiment));
    assert!(!kinds.contains(&ChartKind::Demographics));
}
