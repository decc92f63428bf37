//! Web page text extraction for link summaries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::BotError;

/// Extracted page text is cut to this many characters.
pub const MAX_EXTRACTED_CHARS: usize = 8000;

const FETCH_TIMEOUT_SECS: u64 = 10;
const RENDER_WIDTH: usize = 10_000;

#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch `url` and return its readable text, or `None` if nothing usable
    /// could be extracted.
    async fn extract(&self, url: &str) -> Option<String>;
}

pub struct HttpExtractor {
    http: Client,
}

impl HttpExtractor {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (compatible; Summabot/0.1)")
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build extractor HTTP client: {e}")))?;
        Ok(Self { http })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, BotError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::ExtractionError(format!("{url} returned {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();
        let body = response.text().await?;

        if content_type.contains("html") {
            html_to_text(&body)
        } else if content_type.starts_with("text/") {
            Ok(body)
        } else {
            Err(BotError::ExtractionError(format!(
                "unsupported content type {content_type}"
            )))
        }
    }
}

#[async_trait]
impl PageExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Option<String> {
        match self.fetch_text(url).await {
            Ok(raw) => {
                let text = normalize_extracted(&raw);
                info!(url, chars = text.chars().count(), "Extracted page text");
                (!text.is_empty()).then_some(text)
            }
            Err(e) => {
                warn!(url, "Page extraction failed: {}", e);
                None
            }
        }
    }
}

/// Render HTML as plain text.
///
/// # Errors
///
/// Returns `BotError::ExtractionError` if the document cannot be rendered.
pub fn html_to_text(html: &str) -> Result<String, BotError> {
    html2text::from_read(html.as_bytes(), RENDER_WIDTH)
        .map_err(|e| BotError::ExtractionError(format!("HTML render failed: {e}")))
}

/// Collapse whitespace and truncate to [`MAX_EXTRACTED_CHARS`].
#[must_use]
pub fn normalize_extracted(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_EXTRACTED_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_extracted("  a \n\n b\tc  "), "a b c");
    }

    #[test]
    fn normalize_truncates() {
        let long = "word ".repeat(5000);
        assert_eq!(normalize_extracted(&long).chars().count(), MAX_EXTRACTED_CHARS);
    }

    #[test]
    fn html_to_text_keeps_body_text() {
        let text = html_to_text("<html><body><h1>Title</h1><p>Hello world.</p></body></html>")
            .unwrap();
        assert!(text.contains("Title"));
        assert!(text.contains("Hello world."));
    }
}
