//! Marketing report composition for mobile apps.
//!
//! An [`AnalyticsBundle`] (store ratings, usage analytics, AI narrative and
//! code suggestions) is normalized into an ordered list of [`Section`]s, which
//! is rendered either to Markdown or to a paginated PDF with chart panels
//! fetched from an external chart service.

mod builder;
mod charts;
mod config;
mod error;
mod fonts;
mod format;
mod input;
mod locale;
mod markdown;
mod model;
mod pdf;

pub use builder::{MAX_COUNTRIES, ReportRequest, build_sections, retention_percent};
pub use charts::{
    ChartBackend, ChartImage, ChartKind, ChartRequest, ChartResult, ChartSet, HttpChartBackend,
    chart_requests, render_charts, retention_color,
};
pub use config::{DEFAULT_CHART_ENDPOINT, ImageOptions, PageGeometry, ReportConfig, ReportConfigBuilder};
pub use error::{ChartError, Error};
pub use fonts::FONT_DIRS_ENV;
pub use format::{bar_filled, bar_glyph};
pub use input::{
    AnalyticsBundle, CodeImprovement, CodeReference, CompetitivePositioning, Competitor,
    ImprovementSuggestion, KeyMetric, MarketOpportunity, NarrativeAnalysis, OverallAnalysis,
    RatingBuckets, ReviewAnalysis, StoreRatings, TrendPrediction, UsageAnalytics,
};
pub use locale::{LocaleCatalog, LocaleSpec, resolve};
pub use markdown::render_markdown;
pub use model::{Cadence, Section, SectionKind, StarRating, Trend};
pub use pdf::{PageCursor, PdfDocument, render_pdf};

use std::time::Instant;

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Result of a public render call. Failures never surface as `Err`: they
/// leave `output` empty and describe the problem in `error`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome<T> {
    pub output: T,
    pub error: Option<String>,
    /// True when nothing was rendered, whether for lack of data or failure.
    pub empty: bool,
    pub content_type: &'static str,
}

impl<T: Default> RenderOutcome<T> {
    fn rendered(output: T, content_type: &'static str) -> Self {
        Self {
            output,
            error: None,
            empty: false,
            content_type,
        }
    }

    fn no_data(content_type: &'static str) -> Self {
        Self {
            output: T::default(),
            error: None,
            empty: true,
            content_type,
        }
    }

    fn failed(error: &Error, content_type: &'static str) -> Self {
        Self {
            output: T::default(),
            error: Some(error.to_string()),
            empty: true,
            content_type,
        }
    }
}

/// Render the report as Markdown. A bundle without ratings, usage analytics
/// or narrative yields an empty outcome.
pub fn render_markdown_report(
    bundle: &AnalyticsBundle,
    request: &ReportRequest,
) -> RenderOutcome<String> {
    if !bundle.has_report_data() {
        log::info!("No report data for {:?}, markdown left empty", request.app_name);
        return RenderOutcome::no_data(MARKDOWN_CONTENT_TYPE);
    }
    let t0 = Instant::now();
    let catalog = resolve(request.locale.as_ref());
    let sections = build_sections(bundle, request);
    let text = render_markdown(&sections, &catalog);
    log::info!(
        "Markdown: {} sections, {} bytes in {:.1}ms",
        sections.len(),
        text.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    RenderOutcome::rendered(text, MARKDOWN_CONTENT_TYPE)
}

/// Render the report as PDF bytes. Chart failures only remove their panels;
/// any other failure is reported in the outcome.
pub async fn render_pdf_report(
    bundle: &AnalyticsBundle,
    request: &ReportRequest,
    backend: &dyn ChartBackend,
    config: &ReportConfig,
) -> RenderOutcome<Vec<u8>> {
    if !bundle.has_report_data() {
        log::info!("No report data for {:?}, PDF left empty", request.app_name);
        return RenderOutcome::no_data(PDF_CONTENT_TYPE);
    }
    match render_pdf_document(bundle, request, backend, config).await {
        Ok(doc) => RenderOutcome::rendered(doc.bytes, PDF_CONTENT_TYPE),
        Err(e) => {
            log::error!("PDF report for {:?} failed: {e}", request.app_name);
            RenderOutcome::failed(&e, PDF_CONTENT_TYPE)
        }
    }
}

/// The full PDF pipeline, keeping the document statistics. Charts are
/// fetched while sections are built; layout runs on the blocking pool.
pub async fn render_pdf_document(
    bundle: &AnalyticsBundle,
    request: &ReportRequest,
    backend: &dyn ChartBackend,
    config: &ReportConfig,
) -> Result<PdfDocument, Error> {
    let t0 = Instant::now();
    let catalog = resolve(request.locale.as_ref());
    let requests = chart_requests(bundle, &catalog);

    let (charts, sections) = tokio::join!(render_charts(backend, requests, config), async {
        build_sections(bundle, request)
    });
    let t_fetch = t0.elapsed();

    let geometry = config.page;
    let doc = tokio::task::spawn_blocking(move || render_pdf(&sections, &catalog, &charts, &geometry))
        .await??;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: charts+sections={:.1}ms, pdf={:.1}ms, total={:.1}ms ({} pages, {} bytes, {} skipped)",
        t_fetch.as_secs_f64() * 1000.0,
        (t_total - t_fetch).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.page_count,
        doc.bytes.len(),
        doc.skipped_elements,
    );
    Ok(doc)
}
