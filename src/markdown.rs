//! Linear Markdown rendering of the section list.
//!
//! Each section renders to one block; blocks are joined by a horizontal rule.
//! Output depends only on the sections and the catalog, so two renders of the
//! same input with a fixed report date are byte-identical.

use crate::format::{
    bar_glyph, format_count, format_decimal, format_percent, single_line, table_cell,
};
use crate::input::{CodeImprovement, ImprovementSuggestion, MarketOpportunity, TrendPrediction};
use crate::locale::{Labels, LocaleCatalog};
use crate::model::{
    CompetitiveSection, ExecutiveSummary, FooterSection, HeaderSection, RatingsSection, Section,
    StarRating, UserAnalyticsSection,
};

pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

pub fn render_markdown(sections: &[Section], catalog: &LocaleCatalog) -> String {
    let blocks: Vec<String> = sections
        .iter()
        .map(|section| render_section(section, catalog))
        .filter(|block| !block.is_empty())
        .collect();
    let mut out = blocks.join(BLOCK_SEPARATOR);
    out.push('\n');
    out
}

fn render_section(section: &Section, catalog: &LocaleCatalog) -> String {
    let mut b = Block::default();
    match section {
        Section::Header(h) => header(&mut b, h, catalog),
        Section::ExecutiveSummary(s) => executive_summary(&mut b, s, catalog.labels),
        Section::HighlightsConcerns {
            highlights,
            concerns,
        } => {
            let l = catalog.labels;
            b.heading(2, l.highlights_concerns);
            if !highlights.is_empty() {
                b.heading(3, l.highlights);
                b.bullets(highlights);
            }
            if !concerns.is_empty() {
                b.heading(3, l.concerns);
                b.bullets(concerns);
            }
        }
        Section::UserAnalytics(a) => user_analytics(&mut b, a, catalog),
        Section::RatingsReviews(r) => ratings(&mut b, r, catalog),
        Section::CompetitivePositioning(c) => competitive(&mut b, c, catalog),
        Section::MarketOpportunity(items) => opportunities(&mut b, items, catalog.labels),
        Section::TrendAnalysis(items) => trends(&mut b, items, catalog.labels),
        Section::Improvements(items) => improvements(&mut b, items, catalog.labels),
        Section::CodeImprovements(items) => code_improvements(&mut b, items, catalog.labels),
        Section::Footer(f) => footer(&mut b, f, catalog),
    }
    b.finish()
}

/// Paragraph-oriented builder: every `para` is separated from the previous
/// one by a blank line, table rows and bullets are kept together.
#[derive(Default)]
struct Block {
    paras: Vec<String>,
}

impl Block {
    fn para(&mut self, text: impl Into<String>) {
        self.paras.push(text.into());
    }

    fn heading(&mut self, level: usize, text: &str) {
        self.para(format!("{} {}", "#".repeat(level), single_line(text)));
    }

    fn bullets(&mut self, items: &[String]) {
        let lines: Vec<String> = items.iter().map(|i| format!("- {}", single_line(i))).collect();
        self.para(lines.join("\n"));
    }

    fn table(&mut self, header: &[&str], rows: Vec<Vec<String>>) {
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format!("| {} |", header.join(" | ")));
        lines.push(format!("|{}", "---|".repeat(header.len())));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| table_cell(c)).collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }
        self.para(lines.join("\n"));
    }

    fn finish(self) -> String {
        self.paras.join("\n\n")
    }
}

fn level_text(labels: &Labels, raw: &str) -> String {
    labels
        .level(raw)
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_string())
}

/// `**Priority:** High · **Effort:** Low` for the badge values that are set.
fn badge_line(pairs: &[(&str, Option<&str>)], labels: &Labels) -> Option<String> {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(name, value)| {
            let value = value.filter(|v| !v.trim().is_empty())?;
            Some(format!("**{name}:** {}", level_text(labels, value)))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn header(b: &mut Block, h: &HeaderSection, catalog: &LocaleCatalog) {
    let l = catalog.labels;
    b.para(format!("# {}: {}", l.report_title, h.app_name));
    b.para(format!("**{}**", l.cadence(h.cadence)));

    let mut facts = Vec::new();
    if let Some(period) = &h.period {
        facts.push(format!("- **{}:** {}", l.period, period));
    }
    facts.push(format!(
        "- **{}:** {}",
        l.generated_on,
        catalog.format_date(h.generated_on)
    ));
    if !h.sources.is_empty() {
        let names: Vec<&str> = h.sources.iter().map(|s| l.source(*s)).collect();
        facts.push(format!("- **{}:** {}", l.data_sources, names.join(", ")));
    }
    b.para(facts.join("\n"));
}

fn executive_summary(b: &mut Block, s: &ExecutiveSummary, l: &Labels) {
    b.heading(2, l.executive_summary);
    if !s.summary.trim().is_empty() {
        b.para(s.summary.trim());
    }
    if !s.metrics.is_empty() {
        b.heading(3, l.key_metrics);
        b.table(
            &[l.metric, l.value, l.trend],
            s.metrics
                .iter()
                .map(|m| {
                    vec![
                        m.name.clone(),
                        m.value.clone(),
                        format!("{} {}", m.trend.arrow(), l.trend(m.trend)),
                    ]
                })
                .collect(),
        );
    }
}

fn user_analytics(b: &mut Block, a: &UserAnalyticsSection, catalog: &LocaleCatalog) {
    let l = catalog.labels;
    let nf = catalog.numbers;
    b.heading(2, l.user_analytics);

    let mut rows = vec![
        vec![l.daily_active_users.to_string(), format_count(a.daily_active_users, nf)],
        vec![l.monthly_active_users.to_string(), format_count(a.monthly_active_users, nf)],
        vec![l.new_users.to_string(), format_count(a.new_users, nf)],
        vec![l.sessions.to_string(), format_count(a.sessions, nf)],
    ];
    if let Some(retention) = a.retention_percent {
        rows.push(vec![l.retention.to_string(), format_percent(retention, nf)]);
    }
    rows.push(vec![
        l.avg_session_duration.to_string(),
        format!(
            "{}{} {}{}",
            a.session_minutes, l.minutes_short, a.session_seconds, l.seconds_short
        ),
    ]);
    b.table(&[l.metric, l.value], rows);

    if !a.demographics.is_empty() {
        b.heading(3, l.demographics);
        b.table(
            &[l.age_group, l.share, ""],
            a.demographics
                .iter()
                .map(|(group, share)| {
                    vec![group.clone(), format_percent(*share, nf), bar_glyph(*share)]
                })
                .collect(),
        );
    }

    if !a.countries.is_empty() {
        b.heading(3, l.top_countries);
        b.table(
            &[l.country, l.users],
            a.countries
                .iter()
                .map(|(country, users)| vec![country.clone(), format_count(*users, nf)])
                .collect(),
        );
    }
}

fn ratings(b: &mut Block, r: &RatingsSection, catalog: &LocaleCatalog) {
    let l = catalog.labels;
    let nf = catalog.numbers;
    b.heading(2, l.ratings_reviews);

    for store in &r.stores {
        b.heading(3, l.source(store.source));
        b.para(format!(
            "**{}:** {} {}  \n**{}:** {}",
            l.average_rating,
            store.stars.glyphs(),
            format_decimal(store.average_rating, nf),
            l.total_ratings,
            format_count(store.total_ratings, nf),
        ));
    }

    if let Some(dist) = &r.distribution {
        b.heading(3, l.rating_distribution);
        let mut header = vec![l.stars];
        header.extend(dist.columns.iter().map(|c| l.source(*c)));
        b.table(
            &header,
            dist.rows
                .iter()
                .map(|(star, counts)| {
                    let mut row = vec![format!("{star}★")];
                    row.extend(counts.iter().map(|c| format_count(*c, nf)));
                    row
                })
                .collect(),
        );
    }

    if let Some(s) = &r.sentiment {
        b.heading(3, l.review_sentiment);
        b.table(
            &[l.review_sentiment, l.share, ""],
            [
                (l.positive, s.positive_percent),
                (l.neutral, s.neutral_percent),
                (l.negative, s.negative_percent),
            ]
            .iter()
            .map(|(name, pct)| vec![name.to_string(), format_percent(*pct, nf), bar_glyph(*pct)])
            .collect(),
        );
        if !s.common_themes.is_empty() {
            b.para(format!("**{}:**", l.common_themes));
            b.bullets(&s.common_themes);
        }
        if let Some(summary) = &s.summary {
            b.para(format!("*{}*", summary.trim()));
        }
    }
}

fn competitive(b: &mut Block, c: &CompetitiveSection, catalog: &LocaleCatalog) {
    let l = catalog.labels;
    b.heading(2, l.competitive_positioning);
    if let Some(summary) = &c.summary {
        b.para(summary.trim());
    }
    if !c.strengths.is_empty() {
        b.heading(3, l.strengths);
        b.bullets(&c.strengths);
    }
    if !c.weaknesses.is_empty() {
        b.heading(3, l.weaknesses);
        b.bullets(&c.weaknesses);
    }
    if !c.competitors.is_empty() {
        b.heading(3, l.competitors);
        b.table(
            &[l.competitors, l.average_rating, "", l.advantage],
            c.competitors
                .iter()
                .map(|comp| {
                    vec![
                        comp.name.clone(),
                        comp.rating
                            .map(|r| {
                                format!(
                                    "{} {}",
                                    StarRating::from_rating(r).glyphs(),
                                    format_decimal(r, catalog.numbers)
                                )
                            })
                            .unwrap_or_default(),
                        comp.comparison.clone(),
                        comp.advantage.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        );
    }
}

fn opportunities(b: &mut Block, items: &[MarketOpportunity], l: &Labels) {
    b.heading(2, l.market_opportunities);
    for (i, o) in items.iter().enumerate() {
        b.heading(3, &format!("{}. {}", i + 1, o.title.trim()));
        if let Some(line) = badge_line(
            &[
                (l.priority, Some(o.priority.as_str())),
                (l.fit, o.fit.as_deref()),
                (l.effort, o.effort.as_deref()),
            ],
            l,
        ) {
            b.para(line);
        }
        if !o.description.trim().is_empty() {
            b.para(o.description.trim());
        }
        if let Some(impact) = non_empty(&o.potential_impact) {
            b.para(format!("> **{}:** {}", l.potential_impact, impact));
        }
    }
}

fn trends(b: &mut Block, items: &[TrendPrediction], l: &Labels) {
    b.heading(2, l.trend_analysis);
    for t in items {
        b.heading(3, t.title.trim());
        let meta: Vec<String> = [
            (l.timeframe, non_empty(&t.timeframe)),
            (l.confidence, non_empty(&t.confidence)),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| format!("{name}: {}", level_text(l, v))))
        .collect();
        if !meta.is_empty() {
            b.para(format!("*{}*", meta.join(" · ")));
        }
        if !t.prediction.trim().is_empty() {
            b.para(t.prediction.trim());
        }
    }
}

fn improvements(b: &mut Block, items: &[ImprovementSuggestion], l: &Labels) {
    b.heading(2, l.improvements);
    for (i, s) in items.iter().enumerate() {
        b.heading(3, &format!("{}. {}", i + 1, s.title.trim()));
        if let Some(line) = badge_line(
            &[
                (l.priority, Some(s.priority.as_str())),
                (l.category, s.category.as_deref()),
            ],
            l,
        ) {
            b.para(line);
        }
        if !s.description.trim().is_empty() {
            b.para(s.description.trim());
        }
        if let Some(impact) = non_empty(&s.expected_impact) {
            b.para(format!("> **{}:** {}", l.expected_impact, impact));
        }
    }
}

fn code_improvements(b: &mut Block, items: &[CodeImprovement], l: &Labels) {
    b.heading(2, l.code_improvements);
    for (i, c) in items.iter().enumerate() {
        b.heading(3, &format!("{}. {}", i + 1, c.title.trim()));
        if let Some(line) = badge_line(
            &[
                (l.priority, Some(c.priority.as_str())),
                (l.effort, c.effort.as_deref()),
                (l.category, c.category.as_deref()),
            ],
            l,
        ) {
            b.para(line);
        }
        if !c.description.trim().is_empty() {
            b.para(c.description.trim());
        }
        if !c.references.is_empty() {
            b.para(format!("**{}:**", l.references));
            b.table(
                &[l.file, l.line, l.note],
                c.references
                    .iter()
                    .map(|r| {
                        vec![
                            format!("`{}`", r.file),
                            r.line.map(|n| n.to_string()).unwrap_or_default(),
                            r.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect(),
            );
        }
        if let Some(impact) = non_empty(&c.expected_impact) {
            b.para(format!("> **{}:** {}", l.expected_impact, impact));
        }
    }
}

fn footer(b: &mut Block, f: &FooterSection, catalog: &LocaleCatalog) {
    let l = catalog.labels;
    b.para(format!("*{}*", l.footer_note));
    b.para(format!(
        "*{} · {} {}*",
        f.app_name,
        l.generated_on,
        catalog.format_date(f.generated_on)
    ));
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::input::CodeReference;
    use crate::model::{Cadence, DataSource, MetricRow, Trend};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn frame(middle: Vec<Section>) -> Vec<Section> {
        let mut sections = vec![Section::Header(HeaderSection {
            app_name: "Lumen".into(),
            cadence: Cadence::Weekly,
            period: Some("Apr 24 - Apr 30".into()),
            generated_on: date(),
            sources: vec![DataSource::AppStore, DataSource::AiAnalysis],
        })];
        sections.extend(middle);
        sections.push(Section::Footer(FooterSection {
            app_name: "Lumen".into(),
            generated_on: date(),
        }));
        sections
    }

    #[test]
    fn header_and_footer_blocks_are_separated_by_rules() {
        let md = render_markdown(&frame(vec![]), &LocaleCatalog::base());
        assert!(md.starts_with("# App Marketing Report: Lumen\n\n**Weekly Report**"));
        assert!(md.contains("- **Period:** Apr 24 - Apr 30"));
        assert!(md.contains("- **Generated on:** May 1, 2024"));
        assert!(md.contains("- **Data sources:** App Store, AI Analysis"));
        assert_eq!(md.matches(BLOCK_SEPARATOR).count(), 1);
    }

    #[test]
    fn metric_trends_render_arrows() {
        let md = render_markdown(
            &frame(vec![Section::ExecutiveSummary(ExecutiveSummary {
                summary: "Solid week.".into(),
                metrics: vec![
                    MetricRow {
                        name: "Installs".into(),
                        value: "1.2k".into(),
                        trend: Trend::Up,
                    },
                    MetricRow {
                        name: "Churn".into(),
                        value: "3%".into(),
                        trend: Trend::Stable,
                    },
                ],
            })]),
            &LocaleCatalog::base(),
        );
        assert!(md.contains("| Metric | Value | Trend |\n|---|---|---|"));
        assert!(md.contains("| Installs | 1.2k | ↑ Up |"));
        assert!(md.contains("| Churn | 3% | → Stable |"));
    }

    #[test]
    fn retention_row_present_only_with_value() {
        let mut a = UserAnalyticsSection {
            daily_active_users: 20,
            monthly_active_users: 100,
            new_users: 1500,
            sessions: 12345,
            retention_percent: Some(20.0),
            session_minutes: 3,
            session_seconds: 25,
            demographics: vec![("18-24".into(), 50.0)],
            countries: vec![],
        };
        let md = render_markdown(&[Section::UserAnalytics(a.clone())], &LocaleCatalog::base());
        assert!(md.contains("| DAU/MAU Ratio | 20.0% |"));
        assert!(md.contains("| Sessions | 12,345 |"));
        assert!(md.contains("| Avg. Session Duration | 3m 25s |"));
        assert!(md.contains("| 18-24 | 50.0% | █████░░░░░ |"));
        assert!(!md.contains(&format!("### {}", LocaleCatalog::base().labels.top_countries)));

        a.retention_percent = None;
        let md = render_markdown(&[Section::UserAnalytics(a)], &LocaleCatalog::base());
        assert!(!md.contains("DAU/MAU"));
    }

    #[test]
    fn unknown_levels_pass_through_verbatim() {
        let md = render_markdown(
            &[Section::CodeImprovements(vec![CodeImprovement {
                title: "Cache | results".into(),
                description: "Memoize the feed query.".into(),
                priority: "HIGH".into(),
                effort: Some("tiny".into()),
                category: None,
                references: vec![CodeReference {
                    file: "src/feed.rs".into(),
                    line: Some(42),
                    note: Some("hot | path".into()),
                }],
                expected_impact: Some("Faster feed".into()),
            }])],
            &LocaleCatalog::base(),
        );
        assert!(md.contains("**Priority:** High · **Effort:** tiny"));
        assert!(md.contains("| `src/feed.rs` | 42 | hot \\| path |"));
        assert!(md.contains("> **Expected Impact:** Faster feed"));
    }

    #[test]
    fn multiline_items_stay_inside_their_bullet() {
        let md = render_markdown(
            &frame(vec![
                Section::HighlightsConcerns {
                    highlights: vec!["Featured in\nApp Store Today".into(), "Top 10".into()],
                    concerns: vec![],
                },
                Section::CodeImprovements(vec![CodeImprovement {
                    title: "Lazy\r\nimages".into(),
                    priority: "low".into(),
                    ..Default::default()
                }]),
            ]),
            &LocaleCatalog::base(),
        );
        assert!(md.contains("### Highlights\n\n- Featured in App Store Today\n- Top 10\n"));
        assert!(md.contains("### 1. Lazy images\n"));
    }

    #[test]
    fn identical_input_is_byte_identical() {
        let sections = frame(vec![Section::HighlightsConcerns {
            highlights: vec!["Top 10 in Health".into()],
            concerns: vec![],
        }]);
        let catalog = LocaleCatalog::base();
        assert_eq!(
            render_markdown(&sections, &catalog),
            render_markdown(&sections, &catalog)
        );
    }
}
