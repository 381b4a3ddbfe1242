//! Chart.js configurations for the report panels.

use serde_json::{Value, json};

use super::{ChartKind, ChartRequest};
use crate::builder::user_analytics;
use crate::format::round1;
use crate::input::{AnalyticsBundle, StoreRatings};
use crate::locale::LocaleCatalog;
use crate::model::DataSource;

const BLUE: &str = "#3b82f6";
const INDIGO: &str = "#6366f1";
const GREEN: &str = "#22c55e";
const AMBER: &str = "#f59e0b";
const RED: &str = "#ef4444";
const GRAY: &str = "#9ca3af";
const PALETTE: [&str; 8] = [
    BLUE, GREEN, AMBER, RED, INDIGO, "#14b8a6", "#ec4899", "#8b5cf6",
];

/// Gauge colour for a DAU/MAU percentage.
pub fn retention_color(percent: f64) -> &'static str {
    if percent >= 20.0 {
        GREEN
    } else if percent >= 10.0 {
        AMBER
    } else {
        RED
    }
}

/// Every chart the bundle has data for, in panel order.
pub fn chart_requests(bundle: &AnalyticsBundle, catalog: &LocaleCatalog) -> Vec<ChartRequest> {
    let labels = catalog.labels;
    let mut requests = Vec::new();

    let stores: Vec<(DataSource, &StoreRatings)> = [
        (DataSource::AppStore, bundle.app_store.as_ref()),
        (DataSource::GooglePlay, bundle.google_play.as_ref()),
    ]
    .into_iter()
    .filter_map(|(source, store)| store.map(|s| (source, s)))
    .collect();

    if !stores.is_empty() {
        let star_labels: Vec<String> = (1..=5u8).rev().map(|s| format!("{s}★")).collect();
        let datasets: Vec<Value> = stores
            .iter()
            .enumerate()
            .map(|(i, (source, store))| {
                let data: Vec<u64> = (1..=5usize)
                    .rev()
                    .map(|star| store.distribution.stars(star))
                    .collect();
                json!({
                    "label": labels.source(*source),
                    "data": data,
                    "backgroundColor": if i == 0 { BLUE } else { GREEN },
                })
            })
            .collect();
        requests.push(ChartRequest {
            kind: ChartKind::RatingDistribution,
            config: json!({
                "type": "bar",
                "data": { "labels": star_labels, "datasets": datasets },
                "options": {
                    "plugins": { "title": { "display": true, "text": labels.rating_distribution } },
                    "scales": { "y": { "beginAtZero": true } },
                },
            }),
        });
    }

    if let Some(analytics) = &bundle.analytics {
        let section = user_analytics(analytics);

        requests.push(ChartRequest {
            kind: ChartKind::Engagement,
            config: json!({
                "type": "bar",
                "data": {
                    "labels": [
                        labels.daily_active_users,
                        labels.monthly_active_users,
                        labels.new_users,
                        labels.sessions,
                    ],
                    "datasets": [{
                        "label": labels.engagement,
                        "data": [
                            section.daily_active_users,
                            section.monthly_active_users,
                            section.new_users,
                            section.sessions,
                        ],
                        "backgroundColor": [BLUE, INDIGO, GREEN, AMBER],
                    }],
                },
                "options": {
                    "plugins": {
                        "legend": { "display": false },
                        "title": { "display": true, "text": labels.engagement },
                    },
                },
            }),
        });

        if let Some(percent) = section.retention_percent {
            requests.push(ChartRequest {
                kind: ChartKind::Retention,
                config: json!({
                    "type": "radialGauge",
                    "data": {
                        "datasets": [{
                            "data": [percent.min(100.0)],
                            "backgroundColor": retention_color(percent),
                        }],
                    },
                    "options": {
                        "domain": [0, 100],
                        "trackColor": "#e5e7eb",
                        "centerPercentage": 80,
                        "centerArea": { "text": format!("{percent:.1}%") },
                        "title": { "display": true, "text": labels.retention },
                    },
                }),
            });
        }

        if !section.demographics.is_empty() {
            let (names, shares): (Vec<&str>, Vec<f64>) = section
                .demographics
                .iter()
                .map(|(name, share)| (name.as_str(), round1(*share)))
                .unzip();
            requests.push(ChartRequest {
                kind: ChartKind::Demographics,
                config: json!({
                    "type": "doughnut",
                    "data": {
                        "labels": names,
                        "datasets": [{ "data": shares, "backgroundColor": palette(names.len()) }],
                    },
                    "options": {
                        "plugins": { "title": { "display": true, "text": labels.demographics } },
                    },
                }),
            });
        }

        if !section.countries.is_empty() {
            let (names, users): (Vec<&str>, Vec<u64>) = section
                .countries
                .iter()
                .map(|(name, users)| (name.as_str(), *users))
                .unzip();
            requests.push(ChartRequest {
                kind: ChartKind::Countries,
                config: json!({
                    "type": "bar",
                    "data": {
                        "labels": names,
                        "datasets": [{ "label": labels.users, "data": users, "backgroundColor": INDIGO }],
                    },
                    "options": {
                        "indexAxis": "y",
                        "plugins": {
                            "legend": { "display": false },
                            "title": { "display": true, "text": labels.top_countries },
                        },
                    },
                }),
            });
        }
    }

    if let Some(review) = bundle
        .narrative
        .as_ref()
        .and_then(|n| n.review_analysis.as_ref())
    {
        requests.push(ChartRequest {
            kind: ChartKind::Sentiment,
            config: json!({
                "type": "pie",
                "data": {
                    "labels": [labels.positive, labels.neutral, labels.negative],
                    "datasets": [{
                        "data": [
                            round1(review.positive_percent),
                            round1(review.neutral_percent),
                            round1(review.negative_percent),
                        ],
                        "backgroundColor": [GREEN, GRAY, RED],
                    }],
                },
                "options": {
                    "plugins": { "title": { "display": true, "text": labels.review_sentiment } },
                },
            }),
        });
    }

    log::debug!(
        "chart requests: {:?}",
        requests.iter().map(|r| r.kind).collect::<Vec<_>>()
    );
    requests
}

fn palette(n: usize) -> Vec<&'static str> {
    PALETTE.iter().copied().cycle().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{NarrativeAnalysis, RatingBuckets, ReviewAnalysis, UsageAnalytics};

    fn kinds(requests: &[ChartRequest]) -> Vec<ChartKind> {
        requests.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn retention_bands() {
        assert_eq!(retention_color(35.0), GREEN);
        assert_eq!(retention_color(20.0), GREEN);
        assert_eq!(retention_color(19.9), AMBER);
        assert_eq!(retention_color(10.0), AMBER);
        assert_eq!(retention_color(9.99), RED);
    }

    #[test]
    fn empty_bundle_requests_nothing() {
        let requests = chart_requests(&AnalyticsBundle::default(), &LocaleCatalog::base());
        assert!(requests.is_empty());
    }

    #[test]
    fn analytics_without_mau_skips_gauge() {
        let bundle = AnalyticsBundle {
            analytics: Some(UsageAnalytics {
                daily_active_users: 50,
                ..Default::default()
            }),
            ..Default::default()
        };
        let requests = chart_requests(&bundle, &LocaleCatalog::base());
        assert_eq!(kinds(&requests), vec![ChartKind::Engagement]);
    }

    #[test]
    fn full_bundle_requests_each_chart_once() {
        let mut analytics = UsageAnalytics {
            daily_active_users: 20,
            monthly_active_users: 100,
            ..Default::default()
        };
        analytics.demographics.insert("18-24".into(), 40.0);
        for i in 0..14u64 {
            analytics.countries.insert(format!("C{i:02}"), i * 10);
        }
        let bundle = AnalyticsBundle {
            app_store: Some(StoreRatings {
                average_rating: 4.5,
                total_ratings: 10,
                distribution: RatingBuckets([1, 1, 1, 2, 5]),
            }),
            google_play: Some(StoreRatings::default()),
            analytics: Some(analytics),
            narrative: Some(NarrativeAnalysis {
                review_analysis: Some(ReviewAnalysis::default()),
                ..Default::default()
            }),
            code_improvements: None,
        };
        let requests = chart_requests(&bundle, &LocaleCatalog::base());
        assert_eq!(
            kinds(&requests),
            vec![
                ChartKind::RatingDistribution,
                ChartKind::Engagement,
                ChartKind::Retention,
                ChartKind::Demographics,
                ChartKind::Countries,
                ChartKind::Sentiment,
            ]
        );

        let dist = &requests[0].config;
        assert_eq!(dist["data"]["datasets"].as_array().unwrap().len(), 2);
        assert_eq!(dist["data"]["datasets"][0]["data"], json!([5, 2, 1, 1, 1]));

        let gauge = &requests[2].config;
        assert_eq!(gauge["data"]["datasets"][0]["backgroundColor"], GREEN);
        assert_eq!(gauge["options"]["centerArea"]["text"], "20.0%");

        let countries = &requests[4].config;
        assert_eq!(countries["data"]["labels"].as_array().unwrap().len(), 10);
        assert_eq!(countries["data"]["labels"][0], "C13");
    }
}
