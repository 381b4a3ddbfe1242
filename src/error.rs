use std::fmt;

use crate::charts::ChartKind;

/// Fatal errors inside one render call. The public entry points never return
/// these directly; they are folded into [`crate::RenderOutcome::error`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid analytics input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error("chart image {kind} could not be decoded: {detail}")]
    ImageDecode { kind: ChartKind, detail: String },

    #[error("chart client setup failed: {0}")]
    HttpClient(String),

    #[error("rendering task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single chart request. Absorbed by the chart batch; the
/// corresponding panel is simply omitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("chart service returned HTTP {status}")]
    Status { status: u16 },

    #[error("chart request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("empty image body")]
    EmptyBody,
}

impl From<reqwest::Error> for ChartError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ChartError::Status {
                status: status.as_u16(),
            },
            None => ChartError::Transport(e.to_string()),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_names_code() {
        let e = ChartError::Status { status: 503 };
        assert!(e.to_string().contains("503"), "got: {e}");
    }

    #[test]
    fn image_decode_display_names_chart() {
        let e = Error::ImageDecode {
            kind: ChartKind::Sentiment,
            detail: "bad header".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("sentiment"), "got: {msg}");
        assert!(msg.contains("bad header"), "got: {msg}");
    }
}
