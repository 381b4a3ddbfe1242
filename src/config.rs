//! Rendering configuration.
//!
//! Everything the PDF path needs beyond the report data itself lives in
//! [`ReportConfig`], built via [`ReportConfig::builder()`] or taken as
//! [`ReportConfig::default()`]. The Markdown path needs none of it.
//!
//! ```rust
//! use appreport::ReportConfig;
//!
//! let config = ReportConfig::builder()
//!     .chart_endpoint("http://localhost:3400/chart")
//!     .max_attempts(2)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.image.width, 500);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_CHART_ENDPOINT: &str = "https://quickchart.io/chart";

/// Image parameters sent with every chart request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub format: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            background: "white".into(),
            format: "png".into(),
        }
    }
}

/// Page size and margins in PDF points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin_top: 50.0,
        margin_bottom: 50.0,
        margin_left: 50.0,
        margin_right: 50.0,
    };

    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self.margin_right = margin;
        self
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// QuickChart-compatible endpoint. Default: `https://quickchart.io/chart`.
    pub chart_endpoint: String,

    /// Default: 500×300 PNG on white.
    pub image: ImageOptions,

    /// Timeout of a single chart HTTP call. Default: 30.
    pub chart_timeout_secs: u64,

    /// Deadline for the whole chart batch, retries included. Default: 120.
    pub batch_timeout_secs: u64,

    /// Total attempts per chart, first try included. Default: 3.
    pub max_attempts: u32,

    /// Backoff step; attempt `n` is followed by a pause of `n × step`. Default: 1000.
    pub retry_backoff_ms: u64,

    /// Default: A4 with 50 pt margins.
    pub page: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_endpoint: DEFAULT_CHART_ENDPOINT.into(),
            image: ImageOptions::default(),
            chart_timeout_secs: 30,
            batch_timeout_secs: 120,
            max_attempts: 3,
            retry_backoff_ms: 1000,
            page: PageGeometry::A4,
        }
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }
}

#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn chart_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.chart_endpoint = url.into();
        self
    }

    pub fn image_size(mut self, width: u32, height: u32) -> Self {
        self.config.image.width = width;
        self.config.image.height = height;
        self
    }

    pub fn chart_timeout_secs(mut self, secs: u64) -> Self {
        self.config.chart_timeout_secs = secs;
        self
    }

    pub fn batch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.batch_timeout_secs = secs;
        self
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn page(mut self, page: PageGeometry) -> Self {
        self.config.page = page;
        self
    }

    pub fn build(self) -> Result<ReportConfig, Error> {
        let c = &self.config;
        if c.chart_endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("chart endpoint must not be empty".into()));
        }
        if c.image.width == 0 || c.image.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "chart image size must be non-zero, got {}x{}",
                c.image.width, c.image.height
            )));
        }
        if c.max_attempts == 0 {
            return Err(Error::InvalidConfig("max attempts must be ≥ 1".into()));
        }
        if c.chart_timeout_secs == 0 || c.batch_timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeouts must be ≥ 1s".into()));
        }
        let p = &c.page;
        if p.content_width() < 200.0 || p.content_height() < 200.0 {
            return Err(Error::InvalidConfig(format!(
                "page content area too small: {:.0}x{:.0}pt",
                p.content_width(),
                p.content_height()
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ReportConfig::default();
        assert_eq!(c.max_attempts, 3);
        assert_eq!(c.retry_backoff_ms, 1000);
        assert_eq!((c.image.width, c.image.height), (500, 300));
        assert_eq!(c.image.background, "white");
        assert_eq!(c.page.content_width(), 595.28 - 100.0);
    }

    #[test]
    fn zero_attempts_rejected() {
        let err = ReportConfig::builder().max_attempts(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn oversized_margins_rejected() {
        let err = ReportConfig::builder()
            .page(PageGeometry::A4.with_margins(250.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("too small"), "got: {err}");
    }
}
