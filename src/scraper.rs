use std::future::Future;
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::pipeline::Document;

const USER_AGENT: &str = "Mozilla/5.0";
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg"];

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

pub trait PageLoader {
    /// Fetches `url` and returns its textual content.
    fn load(&self, url: &str) -> impl Future<Output = Result<Vec<Document>>> + Send;
}

/// Loads pages over HTTP without verifying TLS certificates.
#[derive(Clone)]
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<(String, String)> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FetchError(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_lowercase();

        let body = response
            .text()
            .await
            .map_err(|e| AppError::FetchError(format!("Failed to read response body: {}", e)))?;

        Ok((content_type, body))
    }
}

impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Result<Vec<Document>> {
        let (content_type, body) = self.fetch(url).await?;
        tracing::debug!(%url, %content_type, bytes = body.len(), "Fetched page");

        let text = page_text(&content_type, &body)?;
        Ok(vec![Document::with_source(text, url)])
    }
}

/// Turns a fetched body into plain text according to its content type.
pub fn page_text(content_type: &str, body: &str) -> Result<String> {
    if content_type.contains("html") {
        extract_text(body)
            .ok_or_else(|| AppError::ParseError("No <body> tag found in the HTML".to_string()))
    } else if content_type.starts_with("text/") {
        Ok(format_html(body))
    } else {
        Err(AppError::ParseError(format!(
            "Unsupported content type: {}",
            content_type
        )))
    }
}

/// Collects the visible text nodes under `<body>`, one per line.
pub fn extract_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body = document.select(&BODY_SELECTOR).next()?;

    let mut lines = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    Some(lines.join("\n"))
}

pub fn format_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut last_was_whitespace = true;

    for line in html.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !last_was_whitespace {
                result.push('\n');
            }
            result.push_str(trimmed);
            last_was_whitespace = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Ignored title</title><style>body { color: red; }</style></head>
  <body>
    <h1>Release   notes</h1>
    <script>var tracking = true;</script>
    <p>First paragraph
       spans lines.</p>
    <noscript>Enable JavaScript</noscript>
    <ul><li>one</li><li>two</li></ul>
  </body>
</html>"#;

    #[test]
    fn extracts_visible_body_text() {
        let text = extract_text(PAGE).unwrap();
        assert_eq!(text, "Release notes\nFirst paragraph spans lines.\none\ntwo");
    }

    #[test]
    fn skips_script_and_style() {
        let text = extract_text(PAGE).unwrap();
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Enable JavaScript"));
        assert!(!text.contains("Ignored title"));
    }

    #[test]
    fn plain_text_is_trimmed_per_line() {
        let text = page_text("text/plain; charset=utf-8", "  hello \n\n\n world  \n").unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn binary_content_is_rejected() {
        let err = page_text("application/pdf", "%PDF-1.7").unwrap_err();
        assert!(matches!(err, AppError::ParseError(msg) if msg.contains("application/pdf")));
    }

    #[test]
    fn format_html_drops_blank_lines() {
        assert_eq!(format_html("\n  a  \n\n b\n"), "a\nb");
    }
}
