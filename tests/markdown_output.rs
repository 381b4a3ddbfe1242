mod common;

use appreport::render_markdown_report;

use common::{full_bundle, request};

#[test]
fn same_input_renders_byte_identical_markdown() {
    let a = render_markdown_report(&full_bundle(), &request());
    let b = render_markdown_report(&full_bundle(), &request());
    assert!(!a.empty);
    assert!(a.error.is_none());
    assert_eq!(a.output, b.output);
    assert_eq!(a.content_type, "text/markdown; charset=utf-8");
}

#[test]
fn full_report_lists_every_section() {
    let md = render_markdown_report(&full_bundle(), &request()).output;
    for heading in [
        "# App Marketing Report: Lumen",
        "## Executive Summary",
        "## User Analytics",
        "## Competitive Positioning",
        "## Code Improvements",
    ] {
        assert!(md.contains(heading), "missing {heading:?}");
    }
    assert!(md.contains("| DAU/MAU Ratio | 20.0% |"));
    assert!(md.contains("| 5★ | 1,200 | 500 |"));
    assert!(md.contains("| 1★ | 50 | 40 |"));
    assert!(md.contains("★★★★⯨ 4.6"));
    assert!(md.contains("**Priority:** Medium · **Fit:** High · **Effort:** High"));
    assert!(md.ends_with("*\n"));
}

#[test]
fn markdown_keeps_every_highlight() {
    let md = render_markdown_report(&full_bundle(), &request()).output;
    assert!(md.contains("- Highlight number 8"));
    assert!(!md.contains("more highlights"));
}

#[test]
fn spanish_locale_translates_headings() {
    let md = render_markdown_report(&full_bundle(), &request().locale("es-MX")).output;
    assert!(md.starts_with("# Informe de Marketing de la App: Lumen"));
    assert!(md.contains("Ratio DAU/MAU"));
    assert!(!md.contains("## User Analytics"));
}

#[test]
fn blocks_are_separated_by_rules() {
    let md = render_markdown_report(&full_bundle(), &request()).output;
    // Eleven sections, ten separators.
    assert_eq!(md.matches("\n\n---\n\n").count(), 10);
}
