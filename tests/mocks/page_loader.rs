use std::sync::{Arc, Mutex};
use rust_url_summarizer::error::{AppError, Result};
use rust_url_summarizer::pipeline::Document;
use rust_url_summarizer::scraper::PageLoader;

#[derive(Clone, Default)]
pub struct MockPageLoader {
    pub pages: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageLoader {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl PageLoader for MockPageLoader {
    async fn load(&self, url: &str) -> Result<Vec<Document>> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::FetchError(msg.clone()));
        }
        Ok(self
            .pages
            .iter()
            .map(|text| Document::with_source(text.as_str(), url))
            .collect())
    }
}
