use std::future::Future;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use crate::error::{AppError, Result};

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be"];

// An 11 character id right after `v=` or any `/`. First match wins.
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Failed to compile video id regex")
});

/// One timed text unit of a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcripts are disabled")]
    Disabled,
    #[error("no transcript found")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

impl From<TranscriptError> for AppError {
    fn from(err: TranscriptError) -> Self {
        match err {
            TranscriptError::Disabled => AppError::TranscriptsDisabled,
            TranscriptError::NotFound => AppError::NoTranscriptFound,
            TranscriptError::Other(cause) => AppError::Transcript(cause),
        }
    }
}

impl From<CouldNotRetrieveTranscript> for TranscriptError {
    fn from(err: CouldNotRetrieveTranscript) -> Self {
        match &err.reason {
            Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => {
                TranscriptError::Disabled
            }
            Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
                TranscriptError::NotFound
            }
            _ => TranscriptError::Other(err.to_string()),
        }
    }
}

pub trait TranscriptSource {
    /// Returns the transcript of `video_id` as ordered fragments.
    fn fetch_fragments(
        &self,
        video_id: &str,
    ) -> impl Future<Output = std::result::Result<Vec<TranscriptFragment>, TranscriptError>> + Send;
}

/// Transcript source backed by YouTube's caption tracks.
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
    timeout: Duration,
}

impl YouTubeTranscripts {
    const LANGUAGES: &[&str] = &["en"];

    /// `timeout` bounds every transcript lookup.
    pub fn new(timeout: Duration) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            AppError::ConfigError(format!("Failed to build transcript client: {}", e))
        })?;
        Ok(Self { api, timeout })
    }
}

impl TranscriptSource for YouTubeTranscripts {
    async fn fetch_fragments(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptFragment>, TranscriptError> {
        let transcript = with_deadline(
            self.timeout,
            self.api.fetch_transcript(video_id, Self::LANGUAGES, false),
        )
        .await?
        .inspect_err(|e| tracing::warn!(%video_id, error = %e, "Transcript retrieval failed"))?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| TranscriptFragment {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}

async fn with_deadline<F: Future>(
    timeout: Duration,
    lookup: F,
) -> std::result::Result<F::Output, TranscriptError> {
    tokio::time::timeout(timeout, lookup).await.map_err(|_| {
        tracing::warn!(timeout_secs = timeout.as_secs(), "Transcript request timed out");
        TranscriptError::Other(format!(
            "transcript request timed out after {}s",
            timeout.as_secs()
        ))
    })
}

pub fn is_video_url(url: &str) -> bool {
    VIDEO_HOSTS.iter().any(|host| url.contains(host))
}

pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
