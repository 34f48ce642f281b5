use std::sync::{Arc, Mutex};
use rust_url_summarizer::youtube::{TranscriptError, TranscriptFragment, TranscriptSource};

#[derive(Clone, Copy)]
pub enum Failure {
    Disabled,
    NotFound,
    Other(&'static str),
}

#[derive(Clone, Default)]
pub struct MockTranscripts {
    pub fragments: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<Failure>,
}

impl MockTranscripts {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            fail_with: Some(failure),
            ..Default::default()
        }
    }
}

impl TranscriptSource for MockTranscripts {
    async fn fetch_fragments(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptFragment>, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        match self.fail_with {
            Some(Failure::Disabled) => Err(TranscriptError::Disabled),
            Some(Failure::NotFound) => Err(TranscriptError::NotFound),
            Some(Failure::Other(msg)) => Err(TranscriptError::Other(msg.to_string())),
            None => Ok(self
                .fragments
                .iter()
                .map(|text| TranscriptFragment::new(text.as_str()))
                .collect()),
        }
    }
}
