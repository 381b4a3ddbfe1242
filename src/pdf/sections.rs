//! Page layout of each report section.
//!
//! Every repeating block is measured before it is drawn so the cursor can
//! decide whether it fits on the current page. Blocks taller than an empty
//! page fall back to line-by-line flow.

use crate::charts::{ChartKind, retention_color};
use crate::error::Error;
use crate::fonts::FontPair;
use crate::format::{format_count, format_decimal, format_percent, single_line};
use crate::input::{CodeImprovement, Competitor, ImprovementSuggestion, MarketOpportunity, TrendPrediction};
use crate::locale::Labels;
use crate::model::{
    CompetitiveSection, DistributionTable, ExecutiveSummary, FooterSection, HeaderSection,
    RatingsSection, Section, SentimentSummary, StarRating, StoreSummary, Trend,
    UserAnalyticsSection,
};

use super::Canvas;
use super::images::draw_contained;
use super::layout::{
    ACCENT, AMBER, Align, GRAY, GREEN, MUTED, PANEL_BG, Paragraph, RED, RULE, Rgb, TEXT,
    TextLine, TextStyle, WHITE, draw_line, draw_stars, draw_trend_arrow, fill_rect, fit_line,
    hline, tint,
};
use super::table::{Column, TableSpec, draw_table, table_height};

const SECTION_GAP: f32 = 20.0;
const HEADING_RULE_GAP: f32 = 10.0;
/// Room a heading needs below it so it does not end a page on its own.
const KEEP_WITH_HEADING: f32 = 60.0;
const GUTTER: f32 = 14.0;
const BLOCK_GAP: f32 = 8.0;
const BULLET_INDENT: f32 = 12.0;
const ITEM_GAP: f32 = 4.0;

const METRIC_COLUMNS: usize = 3;
const METRIC_BOX_H: f32 = 62.0;
const PANEL_H: f32 = 200.0;
const PANEL_TITLE_H: f32 = 22.0;
const STORE_BOX_H: f32 = 68.0;
const SENTIMENT_ROW_H: f32 = 18.0;

const ENTRY_PAD: f32 = 10.0;
const ENTRY_GAP: f32 = 10.0;
const ACCENT_BAR: f32 = 3.0;
const CALLOUT_PAD: f32 = 6.0;

const BADGE_H: f32 = 16.0;
const BADGE_MIN_W: f32 = 72.0;
const BADGE_MAX_W: f32 = 160.0;
const BADGE_GAP: f32 = 6.0;
const BADGE_STYLE: TextStyle = TextStyle::new(true, 7.5, WHITE);

pub(super) const MAX_COLUMN_ITEMS: usize = 5;

pub(super) fn draw_section(canvas: &mut Canvas, section: &Section) -> Result<(), Error> {
    let l = canvas.catalog.labels;
    match section {
        Section::Header(h) => draw_cover(canvas, h),
        Section::ExecutiveSummary(s) => {
            begin_section(canvas, l.executive_summary);
            executive_summary(canvas, s);
            end_section(canvas);
        }
        Section::HighlightsConcerns {
            highlights,
            concerns,
        } => {
            begin_section(canvas, l.highlights_concerns);
            draw_two_columns(
                canvas,
                ColumnList::new(l.highlights, GREEN, highlights, l.more_highlights),
                ColumnList::new(l.concerns, RED, concerns, l.more_concerns),
            );
            end_section(canvas);
        }
        Section::UserAnalytics(a) => {
            begin_section(canvas, l.user_analytics);
            user_analytics(canvas, a);
            end_section(canvas);
        }
        Section::RatingsReviews(r) => {
            begin_section(canvas, l.ratings_reviews);
            let result = ratings(canvas, r);
            end_section(canvas);
            result?;
        }
        Section::CompetitivePositioning(c) => {
            begin_section(canvas, l.competitive_positioning);
            competitive(canvas, c);
            end_section(canvas);
        }
        Section::MarketOpportunity(items) => {
            begin_section(canvas, l.market_opportunities);
            for (i, o) in items.iter().enumerate() {
                let card = opportunity_card(canvas.fonts, l, i, o, canvas.width());
                draw_card(canvas, &card);
            }
            end_section(canvas);
        }
        Section::TrendAnalysis(items) => {
            begin_section(canvas, l.trend_analysis);
            for t in items {
                let card = trend_card(canvas.fonts, l, t, canvas.width());
                draw_card(canvas, &card);
            }
            end_section(canvas);
        }
        Section::Improvements(items) => {
            begin_section(canvas, l.improvements);
            for (i, s) in items.iter().enumerate() {
                let card = improvement_card(canvas.fonts, l, i, s, canvas.width());
                draw_card(canvas, &card);
            }
            end_section(canvas);
        }
        Section::CodeImprovements(items) => {
            begin_section(canvas, l.code_improvements);
            let result = items
                .iter()
                .enumerate()
                .try_for_each(|(i, c)| code_improvement(canvas, i, c));
            end_section(canvas);
            result?;
        }
        Section::Footer(f) => draw_footer(canvas, f),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Headings and text

fn begin_section(canvas: &mut Canvas, title: &str) {
    canvas.set_continued(None);
    let (x, width) = (canvas.left(), canvas.width());
    let heading = Paragraph::new(canvas.fonts, title, TextStyle::HEADING, width);
    canvas.ensure(heading.height() + HEADING_RULE_GAP + KEEP_WITH_HEADING);
    canvas.place(&heading, x, width, Align::Left);
    let y = canvas.top() - 3.0;
    hline(canvas.content(), x, x + width, y, 1.0, ACCENT);
    canvas.advance(HEADING_RULE_GAP);
    canvas.set_continued(Some(title.to_string()));
}

fn end_section(canvas: &mut Canvas) {
    canvas.set_continued(None);
    canvas.gap(SECTION_GAP);
}

fn subheading(canvas: &mut Canvas, text: &str, color: Rgb) {
    let (x, width) = (canvas.left(), canvas.width());
    let p = Paragraph::new(canvas.fonts, text, TextStyle::SUBHEADING.with_color(color), width);
    canvas.ensure(p.height() + KEEP_WITH_HEADING / 2.0);
    canvas.place(&p, x, width, Align::Left);
    canvas.advance(ITEM_GAP);
}

/// Break before a block of `height` if it fits on an empty page; otherwise
/// just make room for its first line.
fn keep_together(canvas: &mut Canvas, height: f32, first_line: f32) {
    if height <= canvas.cursor.capacity() {
        canvas.ensure(height);
    } else {
        canvas.ensure(first_line);
    }
}

fn text_block(canvas: &mut Canvas, text: &str, style: TextStyle) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let (x, width) = (canvas.left(), canvas.width());
    let p = Paragraph::new(canvas.fonts, text, style, width);
    keep_together(canvas, p.height(), p.line_h);
    canvas.flow(&p, x, width, Align::Left);
    canvas.gap(BLOCK_GAP);
}

fn bullet_mark(canvas: &mut Canvas, x: f32, top: f32, line_h: f32, color: Rgb) {
    fill_rect(canvas.content(), x, top - line_h / 2.0 - 1.5, 3.0, 3.0, color);
}

fn bullet_list(canvas: &mut Canvas, items: &[String], color: Rgb) {
    let (x, width) = (canvas.left(), canvas.width());
    for item in items {
        let p = Paragraph::new(canvas.fonts, &single_line(item), TextStyle::BODY, width - BULLET_INDENT);
        if p.is_empty() {
            continue;
        }
        keep_together(canvas, p.height(), p.line_h);
        let top = canvas.top();
        bullet_mark(canvas, x + 2.0, top, p.line_h, color);
        canvas.flow(&p, x + BULLET_INDENT, width - BULLET_INDENT, Align::Left);
        canvas.gap(ITEM_GAP);
    }
    canvas.gap(BLOCK_GAP - ITEM_GAP);
}

/// Parse `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let v = u32::from_str_radix(digits, 16).ok()?;
    let channel = |shift: u32| ((v >> shift) & 0xff) as f32 / 255.0;
    Some([channel(16), channel(8), channel(0)])
}

// ---------------------------------------------------------------------------
// Cover and footer

/// Centered paragraph with its top at `*y`; moves `*y` below it.
#[allow(clippy::too_many_arguments)]
fn centered(
    content: &mut pdf_writer::Content,
    fonts: &FontPair,
    text: &str,
    style: TextStyle,
    x: f32,
    width: f32,
    y: &mut f32,
    after: f32,
) {
    let p = Paragraph::new(fonts, text, style, width);
    p.draw(content, fonts, x, *y, width, Align::Center);
    *y -= p.height() + after;
}

/// Cover page at fixed offsets; content starts on the next page.
fn draw_cover(canvas: &mut Canvas, h: &HeaderSection) {
    let fonts = canvas.fonts;
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let g = canvas.geometry;
    let (x, w) = (canvas.left(), canvas.width());
    let content = canvas.content();

    fill_rect(content, 0.0, g.height - 12.0, g.width, 12.0, ACCENT);

    let mut y = g.height - g.margin_top - 180.0;
    let caption = TextStyle::SUBTITLE.with_color(ACCENT);
    centered(content, fonts, l.report_title, caption, x, w, &mut y, 10.0);
    let title = TextStyle::TITLE.with_size(30.0);
    centered(content, fonts, &h.app_name, title, x, w, &mut y, 8.0);
    centered(content, fonts, l.cadence(h.cadence), TextStyle::SUBTITLE, x, w, &mut y, 6.0);
    if let Some(period) = &h.period {
        let text = format!("{}: {period}", l.period);
        centered(content, fonts, &text, TextStyle::BODY, x, w, &mut y, 0.0);
    }
    y -= 18.0;
    let generated = format!("{} {}", l.generated_on, catalog.format_date(h.generated_on));
    centered(content, fonts, &generated, TextStyle::BODY.with_color(MUTED), x, w, &mut y, 0.0);

    if !h.sources.is_empty() {
        let names: Vec<&str> = h.sources.iter().map(|s| l.source(*s)).collect();
        let text = format!("{}: {}", l.data_sources, names.join(" · "));
        let mut bottom = g.margin_bottom + 70.0;
        hline(content, x + w * 0.3, x + w * 0.7, bottom + 10.0, 0.75, RULE);
        centered(content, fonts, &text, TextStyle::SMALL, x, w, &mut bottom, 0.0);
    }

    canvas.new_page();
}

fn draw_footer(canvas: &mut Canvas, f: &FooterSection) {
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let (x, width) = (canvas.left(), canvas.width());
    let note = Paragraph::new(canvas.fonts, l.footer_note, TextStyle::SMALL, width);
    let meta = Paragraph::new(
        canvas.fonts,
        &format!(
            "{} · {} {}",
            f.app_name,
            l.generated_on,
            catalog.format_date(f.generated_on)
        ),
        TextStyle::SMALL,
        width,
    );
    canvas.gap(BLOCK_GAP);
    canvas.ensure(note.height() + meta.height() + BLOCK_GAP);
    let y = canvas.top();
    hline(canvas.content(), x, x + width, y, 0.5, RULE);
    canvas.advance(BLOCK_GAP);
    canvas.place(&note, x, width, Align::Center);
    canvas.place(&meta, x, width, Align::Center);
}

// ---------------------------------------------------------------------------
// Metric grid

struct MetricBox {
    label: String,
    value: String,
    trend: Option<(Trend, &'static str)>,
    color: Rgb,
}

fn trend_color(trend: Trend) -> Rgb {
    match trend {
        Trend::Up => GREEN,
        Trend::Down => RED,
        Trend::Stable => GRAY,
    }
}

/// Fixed-size boxes, three per row; each row moves to the next page whole.
fn metric_grid(canvas: &mut Canvas, boxes: &[MetricBox]) {
    let cols = METRIC_COLUMNS as f32;
    let box_w = (canvas.width() - (cols - 1.0) * GUTTER) / cols;
    for row in boxes.chunks(METRIC_COLUMNS) {
        canvas.ensure(METRIC_BOX_H);
        let top = canvas.top();
        for (i, b) in row.iter().enumerate() {
            let x = canvas.left() + i as f32 * (box_w + GUTTER);
            draw_metric_box(canvas, b, x, top, box_w);
        }
        canvas.advance(METRIC_BOX_H);
        canvas.gap(GUTTER);
    }
}

fn draw_metric_box(canvas: &mut Canvas, b: &MetricBox, x: f32, top: f32, w: f32) {
    let fonts = canvas.fonts;
    let content = canvas.content();
    fill_rect(content, x, top - METRIC_BOX_H, w, METRIC_BOX_H, tint(b.color, 0.9));
    fill_rect(content, x, top - 3.0, w, 3.0, b.color);

    let inner = w - 16.0;
    let label_style = TextStyle::SMALL;
    let label = fit_line(fonts, &b.label, label_style, inner);
    draw_line(content, fonts, label_style, x + 8.0, top - 9.0, inner, &label, Align::Left);

    let value_style = TextStyle::new(true, 16.0, TEXT);
    let value = fit_line(fonts, &b.value, value_style, inner);
    draw_line(content, fonts, value_style, x + 8.0, top - 23.0, inner, &value, Align::Left);

    if let Some((trend, text)) = b.trend {
        let cy = top - METRIC_BOX_H + 12.0;
        draw_trend_arrow(content, trend, x + 8.0, cy, 7.0, b.color);
        let style = TextStyle::SMALL_BOLD.with_color(b.color);
        let line = fit_line(fonts, text, style, inner - 12.0);
        let line_h = fonts.get(style.bold).line_height(style.size);
        draw_line(content, fonts, style, x + 20.0, cy + line_h / 2.0, inner - 12.0, &line, Align::Left);
    }
}

fn executive_summary(canvas: &mut Canvas, s: &ExecutiveSummary) {
    let l = canvas.catalog.labels;
    text_block(canvas, &s.summary, TextStyle::BODY);
    if s.metrics.is_empty() {
        return;
    }
    subheading(canvas, l.key_metrics, TEXT);
    let boxes: Vec<MetricBox> = s
        .metrics
        .iter()
        .map(|m| MetricBox {
            label: m.name.clone(),
            value: m.value.clone(),
            trend: Some((m.trend, l.trend(m.trend))),
            color: trend_color(m.trend),
        })
        .collect();
    metric_grid(canvas, &boxes);
}

// ---------------------------------------------------------------------------
// Two-column lists

struct ColumnList<'s> {
    title: &'s str,
    color: Rgb,
    items: &'s [String],
    more: &'s str,
}

impl<'s> ColumnList<'s> {
    fn new(title: &'s str, color: Rgb, items: &'s [String], more: &'s str) -> Self {
        Self {
            title,
            color,
            items,
            more,
        }
    }
}

/// The items shown in one column and the overflow line, if any.
pub(super) fn plan_column(items: &[String], more_label: &str) -> (Vec<String>, Option<String>) {
    let shown = items
        .iter()
        .take(MAX_COLUMN_ITEMS)
        .map(|s| single_line(s))
        .collect();
    let overflow = (items.len() > MAX_COLUMN_ITEMS)
        .then(|| format!("+{} {more_label}", items.len() - MAX_COLUMN_ITEMS));
    (shown, overflow)
}

/// Measured cell of a two-column row; `bullet` is false for overflow lines.
struct ColumnCell {
    para: Paragraph,
    bullet: bool,
}

fn column_cells(fonts: &FontPair, list: &ColumnList, text_w: f32) -> Vec<ColumnCell> {
    let (shown, overflow) = plan_column(list.items, list.more);
    let mut cells: Vec<ColumnCell> = shown
        .iter()
        .map(|item| ColumnCell {
            para: Paragraph::new(fonts, item, TextStyle::BODY, text_w),
            bullet: true,
        })
        .collect();
    if let Some(more) = overflow {
        cells.push(ColumnCell {
            para: Paragraph::new(fonts, &more, TextStyle::SMALL_BOLD.with_color(MUTED), text_w),
            bullet: false,
        });
    }
    cells
}

fn draw_two_columns(canvas: &mut Canvas, left: ColumnList, right: ColumnList) {
    let fonts = canvas.fonts;
    let col_w = (canvas.width() - GUTTER) / 2.0;
    let text_w = col_w - BULLET_INDENT;
    let xs = [canvas.left(), canvas.left() + col_w + GUTTER];
    let lists = [&left, &right];

    let titles: Vec<Option<Paragraph>> = lists
        .iter()
        .map(|list| {
            (!list.items.is_empty()).then(|| {
                Paragraph::new(fonts, list.title, TextStyle::SUBHEADING.with_color(list.color), col_w)
            })
        })
        .collect();
    let cells = [
        column_cells(fonts, &left, text_w),
        column_cells(fonts, &right, text_w),
    ];

    let title_h = titles.iter().flatten().map(Paragraph::height).fold(0.0f32, f32::max);
    if title_h > 0.0 {
        // Titles stay with the first line of the first row.
        let first_line = cells
            .iter()
            .filter_map(|c| c.first())
            .map(|c| c.para.line_h)
            .fold(0.0f32, f32::max);
        canvas.ensure(title_h + ITEM_GAP + first_line);
        let top = canvas.top();
        for (i, title) in titles.iter().enumerate() {
            if let Some(title) = title {
                title.draw(canvas.content(), fonts, xs[i], top, col_w, Align::Left);
            }
        }
        canvas.advance(title_h + ITEM_GAP);
    }

    let mut fresh_page = canvas.cursor.at_top();
    let rows = cells.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        let mut parts = [0, 1].map(|col| cells[col].get(row).map(|c| c.para.clone()));
        let mut bullets = [0, 1].map(|col| {
            cells[col]
                .get(row)
                .and_then(|c| c.bullet.then_some(lists[col].color))
        });
        loop {
            let h = parts.iter().flatten().map(Paragraph::height).fold(0.0f32, f32::max);
            if h <= canvas.cursor.remaining() {
                draw_column_parts(canvas, &parts, &mut bullets, xs, text_w);
                canvas.advance(h);
                break;
            }
            if !fresh_page && h <= canvas.cursor.capacity() {
                canvas.new_page();
                fresh_page = true;
                continue;
            }
            // Taller than a page: place the lines that fit, carry the rest.
            let avail = canvas.cursor.remaining();
            let mut head = [None, None];
            for (col, part) in parts.iter_mut().enumerate() {
                if let Some(p) = part.take() {
                    let (fit, rest) = p.split_lines(avail);
                    head[col] = Some(fit);
                    *part = Some(rest);
                }
            }
            if head.iter().flatten().all(Paragraph::is_empty) {
                if fresh_page {
                    log::debug!("column row of {h:.0}pt cannot be placed, dropped");
                    break;
                }
                canvas.new_page();
                fresh_page = true;
                continue;
            }
            draw_column_parts(canvas, &head, &mut bullets, xs, text_w);
            canvas.new_page();
            fresh_page = true;
        }
        fresh_page = false;
        canvas.gap(ITEM_GAP);
    }
    canvas.gap(BLOCK_GAP);
}

/// One slice of a two-column row at the cursor. Bullets mark only the first
/// slice of an item.
fn draw_column_parts(
    canvas: &mut Canvas,
    parts: &[Option<Paragraph>; 2],
    bullets: &mut [Option<Rgb>; 2],
    xs: [f32; 2],
    text_w: f32,
) {
    let fonts = canvas.fonts;
    let top = canvas.top();
    for (col, part) in parts.iter().enumerate() {
        let Some(p) = part.as_ref().filter(|p| !p.is_empty()) else {
            continue;
        };
        if let Some(color) = bullets[col].take() {
            bullet_mark(canvas, xs[col] + 2.0, top, p.line_h, color);
        }
        p.draw(canvas.content(), fonts, xs[col] + BULLET_INDENT, top, text_w, Align::Left);
    }
}

// ---------------------------------------------------------------------------
// Chart panels

/// Two fixed panels per row. A missing chart leaves its slot blank; a row
/// with no chart at all is skipped.
fn panel_row(canvas: &mut Canvas, panels: [(ChartKind, &str); 2]) {
    if panels.iter().all(|(kind, _)| canvas.chart(*kind).is_none()) {
        log::debug!("No chart for panel row {:?}, skipped", panels.map(|p| p.0));
        return;
    }
    let fonts = canvas.fonts;
    let w = (canvas.width() - GUTTER) / 2.0;
    canvas.ensure(PANEL_H);
    let top = canvas.top();
    for (i, (kind, title)) in panels.into_iter().enumerate() {
        let Some(img) = canvas.chart(kind) else {
            continue;
        };
        let x = canvas.left() + i as f32 * (w + GUTTER);
        let content = canvas.content();
        fill_rect(content, x, top - PANEL_H, w, PANEL_H, PANEL_BG);
        let line = fit_line(fonts, title, TextStyle::SMALL_BOLD, w - 16.0);
        draw_line(content, fonts, TextStyle::SMALL_BOLD, x + 8.0, top - 6.0, w - 16.0, &line, Align::Left);
        draw_contained(content, img, x + 6.0, top - PANEL_H + 6.0, w - 12.0, PANEL_H - PANEL_TITLE_H - 6.0);
        canvas.mark_placed(kind);
    }
    canvas.advance(PANEL_H);
    canvas.gap(GUTTER);
}

fn user_analytics(canvas: &mut Canvas, a: &UserAnalyticsSection) {
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let nf = catalog.numbers;
    let count = |label: &str, n: u64| MetricBox {
        label: label.to_string(),
        value: format_count(n, nf),
        trend: None,
        color: ACCENT,
    };
    let mut boxes = vec![
        count(l.daily_active_users, a.daily_active_users),
        count(l.monthly_active_users, a.monthly_active_users),
        count(l.new_users, a.new_users),
        count(l.sessions, a.sessions),
    ];
    if let Some(retention) = a.retention_percent {
        boxes.push(MetricBox {
            label: l.retention.to_string(),
            value: format_percent(retention, nf),
            trend: None,
            color: hex_rgb(retention_color(retention)).unwrap_or(GRAY),
        });
    }
    boxes.push(MetricBox {
        label: l.avg_session_duration.to_string(),
        value: format!(
            "{}{} {}{}",
            a.session_minutes, l.minutes_short, a.session_seconds, l.seconds_short
        ),
        trend: None,
        color: ACCENT,
    });
    metric_grid(canvas, &boxes);

    panel_row(
        canvas,
        [(ChartKind::Engagement, l.engagement), (ChartKind::Retention, l.retention)],
    );
    panel_row(
        canvas,
        [(ChartKind::Demographics, l.demographics), (ChartKind::Countries, l.top_countries)],
    );
}

// ---------------------------------------------------------------------------
// Ratings

fn store_boxes(canvas: &mut Canvas, stores: &[StoreSummary]) {
    let fonts = canvas.fonts;
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let w = (canvas.width() - GUTTER) / 2.0;
    for pair in stores.chunks(2) {
        canvas.ensure(STORE_BOX_H);
        let top = canvas.top();
        for (i, store) in pair.iter().enumerate() {
            let x = canvas.left() + i as f32 * (w + GUTTER);
            let content = canvas.content();
            fill_rect(content, x, top - STORE_BOX_H, w, STORE_BOX_H, PANEL_BG);

            let name_style = TextStyle::SUBHEADING;
            let name = fit_line(fonts, l.source(store.source), name_style, w - 20.0);
            draw_line(content, fonts, name_style, x + 10.0, top - 8.0, w - 20.0, &name, Align::Left);

            let cy = top - 36.0;
            let stars_w = draw_stars(content, store.stars, x + 10.0, cy, 14.0);
            let rating_style = TextStyle::new(true, 14.0, TEXT);
            let rating = fit_line(
                fonts,
                &format_decimal(store.average_rating, catalog.numbers),
                rating_style,
                60.0,
            );
            let line_h = fonts.get(true).line_height(rating_style.size);
            draw_line(
                content,
                fonts,
                rating_style,
                x + 16.0 + stars_w,
                cy + line_h / 2.0,
                60.0,
                &rating,
                Align::Left,
            );

            let total = fit_line(
                fonts,
                &format!("{}: {}", l.total_ratings, format_count(store.total_ratings, catalog.numbers)),
                TextStyle::SMALL,
                w - 20.0,
            );
            draw_line(content, fonts, TextStyle::SMALL, x + 10.0, top - STORE_BOX_H + 18.0, w - 20.0, &total, Align::Left);
        }
        canvas.advance(STORE_BOX_H);
        canvas.gap(GUTTER);
    }
}

fn distribution_table(canvas: &mut Canvas, dist: &DistributionTable) -> Result<(), Error> {
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let mut columns = vec![Column::new(l.stars, 1.0)];
    columns.extend(dist.columns.iter().map(|c| Column::new(l.source(*c), 2.0).right()));
    let rows = dist
        .rows
        .iter()
        .map(|(star, counts)| {
            let mut row = vec![star.to_string()];
            row.extend(counts.iter().map(|c| format_count(*c, catalog.numbers)));
            row
        })
        .collect();
    subheading(canvas, l.rating_distribution, TEXT);
    draw_table(canvas, &TableSpec { columns, rows })?;
    canvas.gap(BLOCK_GAP);
    Ok(())
}

fn sentiment(canvas: &mut Canvas, s: &SentimentSummary) -> Result<(), Error> {
    let fonts = canvas.fonts;
    let catalog = canvas.catalog;
    let l = catalog.labels;
    let rows = [
        (l.positive, s.positive_percent, GREEN),
        (l.neutral, s.neutral_percent, GRAY),
        (l.negative, s.negative_percent, RED),
    ];
    if let Some((name, value, _)) = rows.iter().find(|(_, v, _)| !v.is_finite()) {
        return Err(Error::Layout(format!("{name} share is {value}")));
    }

    subheading(canvas, l.review_sentiment, TEXT);
    canvas.ensure(rows.len() as f32 * SENTIMENT_ROW_H);
    let label_w = 90.0;
    let value_w = 50.0;
    let x = canvas.left();
    let track_x = x + label_w + 8.0;
    let track_w = canvas.width() - label_w - value_w - 16.0;
    for (name, value, color) in rows {
        let top = canvas.top();
        let cy = top - SENTIMENT_ROW_H / 2.0;
        let content = canvas.content();
        let label = fit_line(fonts, name, TextStyle::BODY, label_w);
        draw_line(content, fonts, TextStyle::BODY, x, top - 2.0, label_w, &label, Align::Left);
        fill_rect(content, track_x, cy - 4.0, track_w, 8.0, RULE);
        let filled = track_w * (value.clamp(0.0, 100.0) / 100.0) as f32;
        if filled > 0.0 {
            fill_rect(content, track_x, cy - 4.0, filled, 8.0, color);
        }
        let pct = fit_line(fonts, &format_percent(value, catalog.numbers), TextStyle::BODY_BOLD, value_w);
        draw_line(
            content,
            fonts,
            TextStyle::BODY_BOLD,
            track_x + track_w + 8.0,
            top - 2.0,
            value_w,
            &pct,
            Align::Right,
        );
        canvas.advance(SENTIMENT_ROW_H);
    }
    canvas.gap(BLOCK_GAP);

    if !s.common_themes.is_empty() {
        text_block(canvas, &format!("{}:", l.common_themes), TextStyle::SMALL_BOLD);
        bullet_list(canvas, &s.common_themes, ACCENT);
    }
    if let Some(summary) = &s.summary {
        text_block(canvas, summary, TextStyle::BODY.with_color(MUTED));
    }
    Ok(())
}

fn ratings(canvas: &mut Canvas, r: &RatingsSection) -> Result<(), Error> {
    let l = canvas.catalog.labels;
    store_boxes(canvas, &r.stores);
    panel_row(
        canvas,
        [
            (ChartKind::RatingDistribution, l.rating_distribution),
            (ChartKind::Sentiment, l.review_sentiment),
        ],
    );
    if let Some(dist) = &r.distribution {
        distribution_table(canvas, dist)?;
    }
    if let Some(s) = &r.sentiment {
        sentiment(canvas, s)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Badges

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum BadgeKind {
    Priority,
    Fit,
    Effort,
    Confidence,
    /// Free-form values such as a category; always gray.
    Neutral,
}

pub(super) fn badge_color(kind: BadgeKind, raw: &str) -> Rgb {
    let level = raw.trim().to_ascii_lowercase();
    match (kind, level.as_str()) {
        (BadgeKind::Priority, "high") => RED,
        (BadgeKind::Priority, "medium") => AMBER,
        (BadgeKind::Priority, "low") => GREEN,
        (BadgeKind::Fit | BadgeKind::Confidence, "high") => GREEN,
        (BadgeKind::Fit | BadgeKind::Confidence, "medium") => AMBER,
        (BadgeKind::Fit | BadgeKind::Confidence, "low") => RED,
        (BadgeKind::Effort, "low") => GREEN,
        (BadgeKind::Effort, "medium") => AMBER,
        (BadgeKind::Effort, "high") => RED,
        _ => GRAY,
    }
}

struct Badge {
    line: TextLine,
    width: f32,
    fill: Rgb,
}

impl Badge {
    fn new(fonts: &FontPair, labels: &Labels, kind: BadgeKind, name: &str, raw: &str) -> Self {
        let text = match (kind, labels.level(raw)) {
            (BadgeKind::Neutral, _) => raw.trim().to_string(),
            (_, Some(level)) => format!("{name}: {level}"),
            (_, None) => format!("{name}: {}", raw.trim()),
        };
        let line = fit_line(fonts, &text, BADGE_STYLE, BADGE_MAX_W - 12.0);
        Self {
            width: (line.width + 12.0).clamp(BADGE_MIN_W, BADGE_MAX_W),
            line,
            fill: badge_color(kind, raw),
        }
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32) {
        let fonts = canvas.fonts;
        let content = canvas.content();
        fill_rect(content, x, top - BADGE_H, self.width, BADGE_H, self.fill);
        let line_h = fonts.get(BADGE_STYLE.bold).line_height(BADGE_STYLE.size);
        draw_line(
            content,
            fonts,
            BADGE_STYLE,
            x,
            top - (BADGE_H - line_h) / 2.0,
            self.width,
            &self.line,
            Align::Center,
        );
    }
}

/// Badges from (kind, label, value) triples; unset or blank values are skipped.
fn badges(fonts: &FontPair, labels: &Labels, specs: &[(BadgeKind, &str, Option<&str>)]) -> Vec<Badge> {
    specs
        .iter()
        .filter_map(|(kind, name, value)| {
            let value = value.filter(|v| !v.trim().is_empty())?;
            Some(Badge::new(fonts, labels, *kind, name, value))
        })
        .collect()
}

/// Left offsets and row index of each badge, wrapping at `width`.
fn badge_positions(badges: &[Badge], width: f32) -> Vec<(f32, usize)> {
    let mut out = Vec::with_capacity(badges.len());
    let (mut x, mut row) = (0.0f32, 0usize);
    for b in badges {
        if x > 0.0 && x + b.width > width {
            x = 0.0;
            row += 1;
        }
        out.push((x, row));
        x += b.width + BADGE_GAP;
    }
    out
}

// ---------------------------------------------------------------------------
// Entry cards

struct Callout {
    label: Paragraph,
    text: Paragraph,
}

impl Callout {
    fn new(fonts: &FontPair, label: &str, text: Option<&str>, width: f32) -> Option<Self> {
        let text = text.map(str::trim).filter(|t| !t.is_empty())?;
        let inner = width - ACCENT_BAR - 2.0 * CALLOUT_PAD;
        Some(Self {
            label: Paragraph::new(fonts, label, TextStyle::SMALL_BOLD.with_color(ACCENT), inner),
            text: Paragraph::new(fonts, text, TextStyle::BODY, inner),
        })
    }

    fn height(&self) -> f32 {
        self.label.height() + self.text.height() + 2.0 * CALLOUT_PAD
    }
}

/// Callout box at the cursor; flows without its box when taller than a page.
fn draw_callout(canvas: &mut Canvas, callout: &Callout, x: f32, width: f32) {
    let h = callout.height();
    let inner_x = x + ACCENT_BAR + CALLOUT_PAD;
    let inner_w = width - ACCENT_BAR - 2.0 * CALLOUT_PAD;
    if h <= canvas.cursor.capacity() {
        canvas.ensure(h);
        let top = canvas.top();
        let content = canvas.content();
        fill_rect(content, x, top - h, width, h, tint(ACCENT, 0.9));
        fill_rect(content, x, top - h, ACCENT_BAR, h, ACCENT);
        canvas.advance(CALLOUT_PAD);
        canvas.place(&callout.label, inner_x, inner_w, Align::Left);
        canvas.place(&callout.text, inner_x, inner_w, Align::Left);
        canvas.advance(CALLOUT_PAD);
    } else {
        canvas.flow(&callout.label, inner_x, inner_w, Align::Left);
        canvas.flow(&callout.text, inner_x, inner_w, Align::Left);
    }
}

/// One repeating entry: badges, title, optional star rating, description
/// and impact callout, measured at construction.
struct Card {
    badges: Vec<Badge>,
    badge_pos: Vec<(f32, usize)>,
    title: Paragraph,
    rating: Option<f64>,
    body: Option<Paragraph>,
    callout: Option<Callout>,
    width: f32,
}

const RATING_ROW_H: f32 = 18.0;

impl Card {
    fn inner_width(width: f32) -> f32 {
        width - ACCENT_BAR - 2.0 * ENTRY_PAD
    }

    fn new(
        fonts: &FontPair,
        badges: Vec<Badge>,
        title: &str,
        rating: Option<f64>,
        body: &str,
        callout: Option<Callout>,
        width: f32,
    ) -> Self {
        let inner = Self::inner_width(width);
        let body = body.trim();
        Self {
            badge_pos: badge_positions(&badges, inner),
            badges,
            title: Paragraph::new(fonts, title.trim(), TextStyle::SUBHEADING, inner),
            rating,
            body: (!body.is_empty()).then(|| Paragraph::new(fonts, body, TextStyle::BODY, inner)),
            callout,
            width,
        }
    }

    fn badges_height(&self) -> f32 {
        match self.badge_pos.last() {
            Some((_, row)) => (*row as f32 + 1.0) * (BADGE_H + ITEM_GAP) + 2.0,
            None => 0.0,
        }
    }

    /// Room the card needs before it starts: all of it when it fits on a
    /// page, otherwise its badges and the start of its title.
    fn lead_height(&self, capacity: f32) -> f32 {
        let h = self.height();
        if h <= capacity {
            h
        } else {
            self.badges_height() + self.title.line_h * 3.0
        }
    }

    fn height(&self) -> f32 {
        let mut h = 2.0 * ENTRY_PAD + self.badges_height() + self.title.height();
        if self.rating.is_some() {
            h += RATING_ROW_H;
        }
        if let Some(body) = &self.body {
            h += ITEM_GAP + body.height();
        }
        if let Some(callout) = &self.callout {
            h += BLOCK_GAP + callout.height();
        }
        h
    }
}

fn draw_card(canvas: &mut Canvas, card: &Card) {
    let h = card.height();
    let fits = h <= canvas.cursor.capacity();
    let x = canvas.left();
    let inner_x = x + ACCENT_BAR + ENTRY_PAD;
    let inner_w = Card::inner_width(card.width);
    let step = |canvas: &mut Canvas, dy: f32| {
        if fits {
            canvas.advance(dy);
        } else {
            canvas.gap(dy);
        }
    };

    if fits {
        canvas.ensure(h);
        let top = canvas.top();
        fill_rect(canvas.content(), x, top - h, card.width, h, PANEL_BG);
        fill_rect(canvas.content(), x, top - h, ACCENT_BAR, h, ACCENT);
    } else {
        let lead = card.lead_height(canvas.cursor.capacity());
        canvas.ensure(lead);
    }
    step(canvas, ENTRY_PAD);

    if !card.badges.is_empty() {
        let top = canvas.top();
        for (badge, (dx, row)) in card.badges.iter().zip(&card.badge_pos) {
            badge.draw(canvas, inner_x + dx, top - *row as f32 * (BADGE_H + ITEM_GAP));
        }
        canvas.advance(card.badges_height());
    }

    canvas.flow(&card.title, inner_x, inner_w, Align::Left);

    if let Some(rating) = card.rating {
        canvas.ensure(RATING_ROW_H);
        let top = canvas.top();
        let fonts = canvas.fonts;
        let cy = top - RATING_ROW_H / 2.0;
        let stars_w = draw_stars(canvas.content(), StarRating::from_rating(rating), inner_x, cy, 11.0);
        let text = fit_line(
            fonts,
            &format_decimal(rating, canvas.catalog.numbers),
            TextStyle::BODY_BOLD,
            60.0,
        );
        let line_h = fonts.get(true).line_height(TextStyle::BODY_BOLD.size);
        draw_line(
            canvas.content(),
            fonts,
            TextStyle::BODY_BOLD,
            inner_x + stars_w + 6.0,
            cy + line_h / 2.0,
            60.0,
            &text,
            Align::Left,
        );
        canvas.advance(RATING_ROW_H);
    }

    if let Some(body) = &card.body {
        step(canvas, ITEM_GAP);
        canvas.flow(body, inner_x, inner_w, Align::Left);
    }

    if let Some(callout) = &card.callout {
        step(canvas, BLOCK_GAP);
        draw_callout(canvas, callout, inner_x, inner_w);
    }

    step(canvas, ENTRY_PAD);
    canvas.gap(ENTRY_GAP);
}

fn opportunity_card(fonts: &FontPair, l: &Labels, i: usize, o: &MarketOpportunity, width: f32) -> Card {
    let inner = Card::inner_width(width);
    Card::new(
        fonts,
        badges(
            fonts,
            l,
            &[
                (BadgeKind::Priority, l.priority, Some(o.priority.as_str())),
                (BadgeKind::Fit, l.fit, o.fit.as_deref()),
                (BadgeKind::Effort, l.effort, o.effort.as_deref()),
            ],
        ),
        &format!("{}. {}", i + 1, o.title.trim()),
        None,
        &o.description,
        Callout::new(fonts, l.potential_impact, o.potential_impact.as_deref(), inner),
        width,
    )
}

fn trend_card(fonts: &FontPair, l: &Labels, t: &TrendPrediction, width: f32) -> Card {
    Card::new(
        fonts,
        badges(
            fonts,
            l,
            &[
                (BadgeKind::Neutral, l.timeframe, t.timeframe.as_deref()),
                (BadgeKind::Confidence, l.confidence, t.confidence.as_deref()),
            ],
        ),
        &t.title,
        None,
        &t.prediction,
        None,
        width,
    )
}

fn improvement_card(fonts: &FontPair, l: &Labels, i: usize, s: &ImprovementSuggestion, width: f32) -> Card {
    let inner = Card::inner_width(width);
    Card::new(
        fonts,
        badges(
            fonts,
            l,
            &[
                (BadgeKind::Priority, l.priority, Some(s.priority.as_str())),
                (BadgeKind::Neutral, l.category, s.category.as_deref()),
            ],
        ),
        &format!("{}. {}", i + 1, s.title.trim()),
        None,
        &s.description,
        Callout::new(fonts, l.expected_impact, s.expected_impact.as_deref(), inner),
        width,
    )
}

fn competitor_card(fonts: &FontPair, l: &Labels, c: &Competitor, width: f32) -> Card {
    let inner = Card::inner_width(width);
    Card::new(
        fonts,
        Vec::new(),
        &c.name,
        c.rating,
        &c.comparison,
        Callout::new(fonts, l.advantage, c.advantage.as_deref(), inner),
        width,
    )
}

/// Card, then its reference table, then the impact callout, kept on one
/// page when together they fit.
fn code_improvement(canvas: &mut Canvas, i: usize, c: &CodeImprovement) -> Result<(), Error> {
    let fonts = canvas.fonts;
    let l = canvas.catalog.labels;
    let width = canvas.width();
    let card = Card::new(
        fonts,
        badges(
            fonts,
            l,
            &[
                (BadgeKind::Priority, l.priority, Some(c.priority.as_str())),
                (BadgeKind::Effort, l.effort, c.effort.as_deref()),
                (BadgeKind::Neutral, l.category, c.category.as_deref()),
            ],
        ),
        &format!("{}. {}", i + 1, c.title.trim()),
        None,
        &c.description,
        None,
        width,
    );
    let references = (!c.references.is_empty()).then(|| {
        let label = format!("{}:", l.references);
        let table = TableSpec {
            columns: vec![
                Column::new(l.file, 3.0),
                Column::new(l.line, 0.8).right(),
                Column::new(l.note, 3.0),
            ],
            rows: c
                .references
                .iter()
                .map(|r| {
                    vec![
                        r.file.clone(),
                        r.line.map(|n| n.to_string()).unwrap_or_default(),
                        r.note.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        };
        (label, table)
    });
    let callout = Callout::new(fonts, l.expected_impact, c.expected_impact.as_deref(), width);

    let mut total = card.height() + ENTRY_GAP;
    if let Some((label, table)) = &references {
        let label_h = Paragraph::new(fonts, label, TextStyle::SMALL_BOLD, width).height();
        total += label_h + table_height(fonts, table, width) + 2.0 * BLOCK_GAP;
    }
    if let Some(callout) = &callout {
        total += callout.height() + ENTRY_GAP;
    }
    let lead = card.lead_height(canvas.cursor.capacity());
    keep_together(canvas, total, lead);
    draw_card(canvas, &card);

    if let Some((label, table)) = &references {
        text_block(canvas, label, TextStyle::SMALL_BOLD);
        draw_table(canvas, table)?;
        canvas.gap(BLOCK_GAP);
    }

    if let Some(callout) = &callout {
        let x = canvas.left();
        draw_callout(canvas, callout, x, width);
        canvas.gap(ENTRY_GAP);
    }
    Ok(())
}

fn competitive(canvas: &mut Canvas, c: &CompetitiveSection) {
    let l = canvas.catalog.labels;
    if let Some(summary) = &c.summary {
        text_block(canvas, summary, TextStyle::BODY);
    }
    if !c.strengths.is_empty() || !c.weaknesses.is_empty() {
        draw_two_columns(
            canvas,
            ColumnList::new(l.strengths, GREEN, &c.strengths, l.more_strengths),
            ColumnList::new(l.weaknesses, RED, &c.weaknesses, l.more_weaknesses),
        );
    }
    if !c.competitors.is_empty() {
        subheading(canvas, l.competitors, TEXT);
        for comp in &c.competitors {
            let card = competitor_card(canvas.fonts, l, comp, canvas.width());
            draw_card(canvas, &card);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::PageGeometry;
    use crate::fonts::helvetica_pair;
    use crate::input::CodeReference;
    use crate::locale::{LocaleCatalog, resolve};

    fn page_texts(pages: Vec<pdf_writer::Content>) -> Vec<String> {
        pages
            .into_iter()
            .map(|c| String::from_utf8_lossy(c.finish().as_slice()).into_owned())
            .collect()
    }

    #[test]
    fn oversized_highlight_breaks_line_by_line() {
        let fonts = helvetica_pair();
        let catalog = LocaleCatalog::base();
        let images = BTreeMap::new();
        let mut canvas = Canvas::new(&fonts, &catalog, PageGeometry::A4, &images);
        let section = Section::HighlightsConcerns {
            highlights: vec!["Retention dips after onboarding. ".repeat(160)],
            concerns: vec!["Crash rate on older devices".to_string()],
        };
        draw_section(&mut canvas, &section).unwrap();

        assert!(canvas.cursor.overrun() < 0.01, "overrun {}", canvas.cursor.overrun());
        assert!(canvas.cursor.page_count() >= 2);
        let text = page_texts(canvas.finish().0);
        // Titles share the first page with the start of the item.
        assert!(text[0].contains("(Highlights)"));
        assert!(text[0].contains("Retention"));
        assert!(text[1].contains("\\(continued\\)"));
        let shown: usize = text.iter().map(|t| t.matches("Retention").count()).sum();
        assert_eq!(shown, 160);
    }

    #[test]
    fn code_improvement_moves_to_the_next_page_whole() {
        let fonts = helvetica_pair();
        let catalog = LocaleCatalog::base();
        let l = catalog.labels;
        let images = BTreeMap::new();
        let mut canvas = Canvas::new(&fonts, &catalog, PageGeometry::A4, &images);
        let item = CodeImprovement {
            title: "Cache decoded thumbnails".into(),
            description: "Thumbnails are decoded again on every scroll.".into(),
            priority: "high".into(),
            references: (1..=3)
                .map(|n| CodeReference {
                    file: format!("src/gallery_{n}.rs"),
                    line: Some(n * 10),
                    note: None,
                })
                .collect(),
            expected_impact: Some("Smoother scrolling".into()),
            ..Default::default()
        };
        let card = Card::new(
            &fonts,
            badges(&fonts, l, &[(BadgeKind::Priority, l.priority, Some("high"))]),
            "1. Cache decoded thumbnails",
            None,
            &item.description,
            None,
            canvas.width(),
        );
        // Room for the card, not for its references.
        let skip = canvas.cursor.remaining() - card.height() - 20.0;
        canvas.advance(skip);

        code_improvement(&mut canvas, 0, &item).unwrap();
        assert_eq!(canvas.cursor.page_count(), 2);
        let text = page_texts(canvas.finish().0);
        assert!(!text[0].contains("Cache decoded thumbnails"));
        assert!(text[1].contains("(1. Cache decoded thumbnails)"));
        assert!(text[1].contains("(References:)"));
        assert!(text[1].contains("(Smoother scrolling)"));
    }

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("item {i}")).collect()
    }

    #[test]
    fn columns_cap_at_five_with_overflow_line() {
        let (shown, more) = plan_column(&items(8), "more highlights");
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[4], "item 5");
        assert_eq!(more.as_deref(), Some("+3 more highlights"));

        let (shown, more) = plan_column(&items(5), "more concerns");
        assert_eq!(shown.len(), 5);
        assert_eq!(more, None);

        let (shown, _) = plan_column(&["Featured in\nApp Store Today".to_string()], "more highlights");
        assert_eq!(shown, vec!["Featured in App Store Today"]);
    }

    #[test]
    fn badge_colors_follow_level_semantics() {
        assert_eq!(badge_color(BadgeKind::Priority, "High"), RED);
        assert_eq!(badge_color(BadgeKind::Priority, "low"), GREEN);
        assert_eq!(badge_color(BadgeKind::Fit, "high"), GREEN);
        assert_eq!(badge_color(BadgeKind::Effort, "low"), GREEN);
        assert_eq!(badge_color(BadgeKind::Effort, "HIGH"), RED);
        assert_eq!(badge_color(BadgeKind::Confidence, "medium"), AMBER);
        assert_eq!(badge_color(BadgeKind::Priority, "urgent"), GRAY);
        assert_eq!(badge_color(BadgeKind::Neutral, "high"), GRAY);
    }

    #[test]
    fn unknown_badge_values_keep_their_text() {
        let fonts = helvetica_pair();
        let l = LocaleCatalog::base().labels;
        let known = Badge::new(&fonts, l, BadgeKind::Priority, l.priority, "high");
        assert_eq!(known.line.text, "Priority: High");
        let unknown = Badge::new(&fonts, l, BadgeKind::Effort, l.effort, "tiny");
        assert_eq!(unknown.line.text, "Effort: tiny");
        assert_eq!(unknown.fill, GRAY);
        assert_eq!(unknown.width, BADGE_MIN_W);
    }

    #[test]
    fn badge_text_is_localized() {
        let fonts = helvetica_pair();
        let l = resolve(Some(&"es".into())).labels;
        let b = Badge::new(&fonts, l, BadgeKind::Priority, l.priority, "Medium");
        assert_eq!(b.line.text, format!("{}: {}", l.priority, l.level_medium));
        assert_eq!(b.fill, AMBER);
    }

    #[test]
    fn badges_wrap_to_a_second_row() {
        let fonts = helvetica_pair();
        let l = LocaleCatalog::base().labels;
        let list = badges(
            &fonts,
            l,
            &[
                (BadgeKind::Priority, l.priority, Some("high")),
                (BadgeKind::Fit, l.fit, Some("low")),
                (BadgeKind::Effort, l.effort, None),
            ],
        );
        assert_eq!(list.len(), 2);
        let pos = badge_positions(&list, list[0].width + 10.0);
        assert_eq!(pos[0], (0.0, 0));
        assert_eq!(pos[1], (0.0, 1));
    }

    #[test]
    fn card_height_adds_up_its_parts() {
        let fonts = helvetica_pair();
        let l = LocaleCatalog::base().labels;
        let plain = Card::new(&fonts, Vec::new(), "Title", None, "", None, 400.0);
        assert_eq!(plain.height(), 2.0 * ENTRY_PAD + plain.title.height());

        let callout = Callout::new(&fonts, l.expected_impact, Some("More installs"), 400.0);
        let full = Card::new(
            &fonts,
            badges(&fonts, l, &[(BadgeKind::Priority, l.priority, Some("low"))]),
            "Title",
            Some(4.5),
            "Body text",
            callout,
            400.0,
        );
        assert!(full.height() > plain.height() + RATING_ROW_H + BADGE_H);
    }

    #[test]
    fn blank_callouts_are_dropped() {
        let fonts = helvetica_pair();
        assert!(Callout::new(&fonts, "Impact", Some("   "), 300.0).is_none());
        assert!(Callout::new(&fonts, "Impact", None, 300.0).is_none());
    }

    #[test]
    fn retention_band_colors_parse() {
        assert_eq!(hex_rgb("#ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(hex_rgb("#000000"), Some([0.0, 0.0, 0.0]));
        assert!(hex_rgb(retention_color(25.0)).is_some());
        assert_eq!(hex_rgb("red"), None);
    }
}
