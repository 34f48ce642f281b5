pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod scraper;
pub mod youtube;

use std::sync::Arc;

use config::Config;
use error::Result;
use llm::OpenAiProvider;
use pipeline::Pipeline;
use scraper::HttpPageLoader;
use youtube::YouTubeTranscripts;

/// Application state that will be shared across handlers
pub struct AppState<T, L, P> {
    pub pipeline: Arc<Pipeline<T, L, P>>,
}

impl<T, L, P> AppState<T, L, P> {
    pub fn new(pipeline: Pipeline<T, L, P>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<T, L, P> Clone for AppState<T, L, P> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

pub type LiveAppState = AppState<YouTubeTranscripts, HttpPageLoader, OpenAiProvider>;

impl LiveAppState {
    /// Wires the real transcript, page and OpenAI collaborators.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transcripts = YouTubeTranscripts::new(config.http_timeout)?;
        let pages = HttpPageLoader::new(config.http_timeout)?;
        let completions =
            OpenAiProvider::new(config.openai_base_url.as_str(), config.http_timeout)?;

        Ok(AppState::new(Pipeline::new(transcripts, pages, completions)))
    }
}
