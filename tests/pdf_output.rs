mod common;

use appreport::{
    ChartKind, ChartSet, Error, LocaleCatalog, PageGeometry, ReportConfig, build_sections,
    render_pdf, render_pdf_document, render_pdf_report,
};
use serde_json::json;

use common::{
    ScriptedBackend, bundle_from, count_pages, full_bundle, full_bundle_json, pdf_text, request,
};

#[tokio::test(start_paused = true)]
async fn full_report_places_every_chart() {
    common::init_logging();
    let backend = ScriptedBackend::default();
    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();

    assert!(doc.bytes.starts_with(b"%PDF-"));
    assert_eq!(doc.skipped_elements, 0);
    assert_eq!(
        doc.placed_charts,
        vec![
            ChartKind::Engagement,
            ChartKind::Retention,
            ChartKind::Demographics,
            ChartKind::Countries,
            ChartKind::RatingDistribution,
            ChartKind::Sentiment,
        ]
    );
    assert!(doc.page_count >= 3, "cover plus content, got {}", doc.page_count);
    assert_eq!(count_pages(&doc.bytes), doc.page_count);
}

#[tokio::test(start_paused = true)]
async fn every_page_carries_its_number() {
    let backend = ScriptedBackend::default();
    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();
    let text = pdf_text(&doc.bytes);
    let n = doc.page_count;
    for page in 1..=n {
        let footer = format!("(Page {page} of {n})");
        assert!(text.contains(&footer), "missing {footer}");
    }
    assert!(text.contains("(Weekly Report)"));
    assert!(String::from_utf8_lossy(&doc.bytes).contains("App Marketing Report: Lumen"));
}

#[tokio::test(start_paused = true)]
async fn failed_chart_is_omitted_without_error() {
    common::init_logging();
    let backend = ScriptedBackend::failing(&[ChartKind::Countries]);
    let config = ReportConfig::default();

    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &config)
        .await
        .unwrap();
    assert_eq!(backend.calls(ChartKind::Countries), config.max_attempts);
    assert_eq!(backend.calls(ChartKind::Engagement), 1);
    assert!(!doc.placed_charts.contains(&ChartKind::Countries));
    assert_eq!(doc.placed_charts.len(), 5);
    assert_eq!(doc.skipped_elements, 0);

    let outcome = render_pdf_report(&full_bundle(), &request(), &backend, &config).await;
    assert!(outcome.error.is_none());
    assert!(!outcome.empty);
    assert!(outcome.output.starts_with(b"%PDF-"));
}

#[tokio::test(start_paused = true)]
async fn undecodable_chart_counts_as_skipped() {
    let backend = ScriptedBackend::garbage(&[ChartKind::Sentiment]);
    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();
    assert_eq!(doc.skipped_elements, 1);
    assert!(!doc.placed_charts.contains(&ChartKind::Sentiment));
    assert!(doc.placed_charts.contains(&ChartKind::RatingDistribution));
}

#[tokio::test(start_paused = true)]
async fn long_highlight_list_ends_with_overflow_line() {
    let backend = ScriptedBackend::default();
    let doc = render_pdf_document(&full_bundle(), &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();
    let text = pdf_text(&doc.bytes);
    assert!(text.contains("(+3 more highlights)"));
    assert!(text.contains("(Highlight number 5)"));
    assert!(!text.contains("(Highlight number 6)"));
    assert!(!text.contains("more concerns"));
}

#[tokio::test(start_paused = true)]
async fn sections_spanning_pages_repeat_their_title() {
    let mut value = full_bundle_json();
    let description = "Split the monolithic settings screen into smaller views. ".repeat(12);
    value["codeImprovements"] = (0..24)
        .map(|i| {
            json!({
                "title": format!("Refactor module {i}"),
                "description": description,
                "priority": "low",
                "references": [{"file": format!("src/module_{i}.rs"), "line": i + 1}]
            })
        })
        .collect();
    let bundle = bundle_from(value);

    let backend = ScriptedBackend::default();
    let doc = render_pdf_document(&bundle, &request(), &backend, &ReportConfig::default())
        .await
        .unwrap();
    let text = pdf_text(&doc.bytes);
    assert!(doc.page_count > 5);
    // Literal strings escape their parentheses.
    assert!(text.contains("(Code Improvements \\(continued\\))"));
    assert!(text.contains("(24. Refactor module 23)"));
    assert_eq!(doc.skipped_elements, 0);
}

#[tokio::test(start_paused = true)]
async fn cjk_locale_renders_with_or_without_installed_fonts() {
    let backend = ScriptedBackend::default();
    let outcome = render_pdf_report(
        &full_bundle(),
        &request().locale("ja-JP"),
        &backend,
        &ReportConfig::default(),
    )
    .await;
    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert!(outcome.output.starts_with(b"%PDF-"));
}

#[test]
fn page_without_content_area_is_a_layout_error() {
    let sections = build_sections(&full_bundle(), &request());
    let geometry = PageGeometry::A4.with_margins(400.0);
    let err = render_pdf(&sections, &LocaleCatalog::base(), &ChartSet::default(), &geometry)
        .unwrap_err();
    assert!(matches!(err, Error::Layout(_)), "got {err}");
}

#[test]
fn report_without_charts_still_renders() {
    let sections = build_sections(&full_bundle(), &request());
    let doc = render_pdf(
        &sections,
        &LocaleCatalog::base(),
        &ChartSet::default(),
        &PageGeometry::default(),
    )
    .unwrap();
    assert!(doc.placed_charts.is_empty());
    assert_eq!(doc.skipped_elements, 0);
    assert!(doc.page_count >= 2);
}
