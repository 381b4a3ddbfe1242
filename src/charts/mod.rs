//! Chart images from an external rendering service.
//!
//! Requests are independent: the batch fans out every request at once and
//! fans in when all of them have settled. A chart that still fails after its
//! retries is recorded as failed and logged; it never aborts the batch, the
//! PDF renderer just leaves its panel empty.

mod http;
mod spec;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::time::{Instant, sleep, timeout, timeout_at};

use crate::config::{ImageOptions, ReportConfig};
use crate::error::ChartError;

pub use http::HttpChartBackend;
pub use spec::{chart_requests, retention_color};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKind {
    RatingDistribution,
    Demographics,
    Countries,
    Engagement,
    Sentiment,
    Retention,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::RatingDistribution => "rating-distribution",
            ChartKind::Demographics => "demographics",
            ChartKind::Countries => "countries",
            ChartKind::Engagement => "engagement",
            ChartKind::Sentiment => "sentiment",
            ChartKind::Retention => "retention",
        }
    }
}

/// One chart to render: its kind and a Chart.js configuration document.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub config: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartImage {
    pub kind: ChartKind,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartResult {
    pub kind: ChartKind,
    pub outcome: Result<ChartImage, ChartError>,
    pub attempts: u32,
}

/// Rendering capability, injected so tests (and other services) can stand in
/// for the HTTP backend.
#[async_trait]
pub trait ChartBackend: Send + Sync {
    async fn render(
        &self,
        request: &ChartRequest,
        options: &ImageOptions,
    ) -> Result<Vec<u8>, ChartError>;
}

/// Settled results of one batch.
#[derive(Clone, Debug, Default)]
pub struct ChartSet {
    images: BTreeMap<ChartKind, ChartImage>,
    failed: Vec<(ChartKind, ChartError)>,
}

impl ChartSet {
    pub fn from_results(results: impl IntoIterator<Item = ChartResult>) -> Self {
        let mut set = ChartSet::default();
        for result in results {
            match result.outcome {
                Ok(image) => {
                    set.images.insert(result.kind, image);
                }
                Err(e) => set.failed.push((result.kind, e)),
            }
        }
        set
    }

    pub fn get(&self, kind: ChartKind) -> Option<&ChartImage> {
        self.images.get(&kind)
    }

    pub fn images(&self) -> impl Iterator<Item = &ChartImage> {
        self.images.values()
    }

    pub fn failed(&self) -> &[(ChartKind, ChartError)] {
        &self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Render every request concurrently; resolves once all have settled.
pub async fn render_charts(
    backend: &dyn ChartBackend,
    requests: Vec<ChartRequest>,
    config: &ReportConfig,
) -> ChartSet {
    if requests.is_empty() {
        return ChartSet::default();
    }
    let started = std::time::Instant::now();
    let deadline = Instant::now() + Duration::from_secs(config.batch_timeout_secs);
    let count = requests.len();

    let results = join_all(requests.into_iter().map(|request| async move {
        let kind = request.kind;
        match timeout_at(deadline, render_with_retry(backend, request, config)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "chart {kind}: batch deadline of {}s reached",
                    config.batch_timeout_secs
                );
                ChartResult {
                    kind,
                    outcome: Err(ChartError::Timeout {
                        secs: config.batch_timeout_secs,
                    }),
                    attempts: 0,
                }
            }
        }
    }))
    .await;

    let set = ChartSet::from_results(results);
    log::info!(
        "charts: {}/{} rendered in {:.1}ms",
        set.images.len(),
        count,
        started.elapsed().as_secs_f64() * 1000.0,
    );
    set
}

/// Up to `max_attempts` tries with linear backoff (`backoff × attempt`)
/// between them.
async fn render_with_retry(
    backend: &dyn ChartBackend,
    request: ChartRequest,
    config: &ReportConfig,
) -> ChartResult {
    let kind = request.kind;
    let per_call = Duration::from_secs(config.chart_timeout_secs);
    let attempts = config.max_attempts.max(1);
    let mut last_err = ChartError::Transport("no attempt made".into());

    for attempt in 1..=attempts {
        let outcome = match timeout(per_call, backend.render(&request, &config.image)).await {
            Ok(Ok(bytes)) if !bytes.is_empty() => {
                log::debug!("chart {kind}: {} bytes on attempt {attempt}", bytes.len());
                return ChartResult {
                    kind,
                    outcome: Ok(ChartImage { kind, bytes }),
                    attempts: attempt,
                };
            }
            Ok(Ok(_)) => ChartError::EmptyBody,
            Ok(Err(e)) => e,
            Err(_) => ChartError::Timeout {
                secs: config.chart_timeout_secs,
            },
        };
        log::warn!("chart {kind}: attempt {attempt}/{attempts} failed: {outcome}");
        last_err = outcome;

        if attempt < attempts {
            sleep(Duration::from_millis(config.retry_backoff_ms * u64::from(attempt))).await;
        }
    }

    log::warn!("chart {kind}: giving up, panel will be omitted");
    ChartResult {
        kind,
        outcome: Err(last_err),
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Fails each kind a scripted number of times before succeeding;
    /// `u32::MAX` means always fail.
    struct Scripted {
        failures: HashMap<ChartKind, u32>,
        calls: Mutex<HashMap<ChartKind, u32>>,
    }

    impl Scripted {
        fn new(failures: &[(ChartKind, u32)]) -> Self {
            Self {
                failures: failures.iter().copied().collect(),
                calls: Mutex::new(HashMap::new()),
            }
        }

        fn calls(&self, kind: ChartKind) -> u32 {
            self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl ChartBackend for Scripted {
        async fn render(
            &self,
            request: &ChartRequest,
            _options: &ImageOptions,
        ) -> Result<Vec<u8>, ChartError> {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                let n = calls.entry(request.kind).or_default();
                *n += 1;
                *n
            };
            let fail_times = self.failures.get(&request.kind).copied().unwrap_or(0);
            if n <= fail_times {
                Err(ChartError::Status { status: 503 })
            } else {
                Ok(vec![0x89, b'P', b'N', b'G'])
            }
        }
    }

    fn request(kind: ChartKind) -> ChartRequest {
        ChartRequest {
            kind,
            config: json!({"type": "bar"}),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_recovers_within_attempts() {
        let backend = Scripted::new(&[(ChartKind::Sentiment, 2)]);
        let config = ReportConfig::default();
        let set = render_charts(&backend, vec![request(ChartKind::Sentiment)], &config).await;
        assert!(set.get(ChartKind::Sentiment).is_some());
        assert!(set.failed().is_empty());
        assert_eq!(backend.calls(ChartKind::Sentiment), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_chart_fails_alone_with_linear_backoff() {
        let backend = Scripted::new(&[(ChartKind::Countries, u32::MAX)]);
        let config = ReportConfig::default();
        let start = Instant::now();
        let set = render_charts(
            &backend,
            vec![
                request(ChartKind::Countries),
                request(ChartKind::Engagement),
                request(ChartKind::Demographics),
            ],
            &config,
        )
        .await;

        assert_eq!(backend.calls(ChartKind::Countries), 3);
        assert_eq!(set.failed().len(), 1);
        assert_eq!(set.failed()[0].0, ChartKind::Countries);
        assert!(set.get(ChartKind::Engagement).is_some());
        assert!(set.get(ChartKind::Demographics).is_some());
        // 1s after the first failure, 2s after the second, none after the last.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_batch_settles_immediately() {
        let backend = Scripted::new(&[]);
        let set = render_charts(&backend, vec![], &ReportConfig::default()).await;
        assert!(set.is_empty());
        assert!(set.failed().is_empty());
    }

    struct Hanging;

    #[async_trait]
    impl ChartBackend for Hanging {
        async fn render(
            &self,
            _request: &ChartRequest,
            _options: &ImageOptions,
        ) -> Result<Vec<u8>, ChartError> {
            futures::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hung_calls_time_out_per_attempt() {
        let config = ReportConfig::builder()
            .chart_timeout_secs(5)
            .batch_timeout_secs(600)
            .build()
            .unwrap();
        let set = render_charts(&Hanging, vec![request(ChartKind::Retention)], &config).await;
        assert_eq!(
            set.failed(),
            &[(ChartKind::Retention, ChartError::Timeout { secs: 5 })]
        );
    }
}
