use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{ChartBackend, ChartRequest};
use crate::config::{ImageOptions, ReportConfig};
use crate::error::{ChartError, Error};

/// QuickChart-compatible rendering service reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpChartBackend {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl HttpChartBackend {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &ReportConfig) -> Result<Self, Error> {
        Self::new(config.chart_endpoint.clone(), config.chart_timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChartBackend for HttpChartBackend {
    async fn render(
        &self,
        request: &ChartRequest,
        options: &ImageOptions,
    ) -> Result<Vec<u8>, ChartError> {
        let body = json!({
            "chart": request.config,
            "width": options.width,
            "height": options.height,
            "backgroundColor": options.background,
            "format": options.format,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(ChartError::Status {
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        if bytes.is_empty() {
            return Err(ChartError::EmptyBody);
        }
        Ok(bytes.to_vec())
    }
}

impl HttpChartBackend {
    fn classify(&self, e: reqwest::Error) -> ChartError {
        if e.is_timeout() {
            ChartError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            e.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn backend_takes_endpoint_from_config() {
        let config = ReportConfig::builder()
            .chart_endpoint("http://charts.internal/render")
            .build()
            .unwrap();
        let backend = HttpChartBackend::from_config(&config).unwrap();
        assert_eq!(backend.endpoint(), "http://charts.internal/render");
        assert_eq!(backend.timeout_secs, config.chart_timeout_secs);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_chart_failure() {
        // Nothing listens on the discard port.
        let backend = HttpChartBackend::new("http://127.0.0.1:9/chart", 2).unwrap();
        let request = ChartRequest {
            kind: ChartKind::Engagement,
            config: json!({"type": "bar"}),
        };
        let err = backend
            .render(&request, &ImageOptions::default())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ChartError::Transport(_) | ChartError::Timeout { secs: 2 }),
            "got: {err}"
        );
    }
}
