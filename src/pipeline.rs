use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::llm::{CompletionClient, CompletionProvider, ModelParams, build_prompt};
use crate::scraper::PageLoader;
use crate::youtube::{self, TranscriptSource};

pub const MISSING_INPUT_MESSAGE: &str = "Please provide both the OpenAI API key and a valid URL.";
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid URL (e.g., a YouTube video or a website).";

// Separator placed between documents when they are stuffed into one prompt
const DOCUMENT_SEPARATOR: &str = "\n\n";

/// An API key supplied for a single run. Never printed.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        self.0.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct SessionInput {
    pub api_key: Credential,
    pub url: String,
}

impl SessionInput {
    pub fn new(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            api_key: Credential::new(api_key),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: String,
    pub source: Option<String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: None,
        }
    }

    pub fn with_source(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: Some(source.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Video,
    Website,
}

impl SourceKind {
    pub fn classify(url: &str) -> Self {
        if youtube::is_video_url(url) {
            SourceKind::Video
        } else {
            SourceKind::Website
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub text: String,
    pub source: SourceKind,
    pub word_count: usize,
}

/// Checks the session input and returns the trimmed URL.
pub fn validate_input(input: &SessionInput) -> Result<&str> {
    let url = input.url.trim();
    if input.api_key.is_blank() || url.is_empty() {
        return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    }
    if !is_valid_url(url) {
        return Err(AppError::Validation(INVALID_URL_MESSAGE.to_string()));
    }
    Ok(url)
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        })
        .unwrap_or(false)
}

pub fn stuff_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

/// Input → extraction → prompt → completion, one pass per call.
pub struct Pipeline<T, L, P> {
    transcripts: T,
    pages: L,
    completions: P,
    params: ModelParams,
}

impl<T, L, P> Pipeline<T, L, P>
where
    T: TranscriptSource + Sync,
    L: PageLoader + Sync,
    P: CompletionProvider + Sync,
{
    pub fn new(transcripts: T, pages: L, completions: P) -> Self {
        Self {
            transcripts,
            pages,
            completions,
            params: ModelParams::default(),
        }
    }

    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    #[tracing::instrument(skip_all, fields(url = %input.url.trim()))]
    pub async fn run(&self, input: &SessionInput) -> Result<Summary> {
        let url = validate_input(input)?;
        let client = self.completions.client(&input.api_key)?;

        let source = SourceKind::classify(url);
        let extract_start = Instant::now();
        let documents = match source {
            SourceKind::Video => vec![self.video_document(url).await?],
            SourceKind::Website => self.pages.load(url).await?,
        };
        let content = stuff_documents(&documents);
        tracing::info!(
            ?source,
            documents = documents.len(),
            chars = content.len(),
            elapsed_ms = extract_start.elapsed().as_millis() as u64,
            "Extracted content"
        );

        if content.trim().is_empty() {
            return Err(AppError::ParseError(
                "No textual content could be extracted from the URL".to_string(),
            ));
        }
        let word_count = content.split_whitespace().count();

        let prompt = build_prompt(&content);
        let llm_start = Instant::now();
        let text = client.complete(&prompt, &self.params).await?;
        tracing::info!(
            model = %self.params.model,
            elapsed_ms = llm_start.elapsed().as_millis() as u64,
            "Summary generated"
        );

        Ok(Summary {
            text,
            source,
            word_count,
        })
    }

    async fn video_document(&self, url: &str) -> Result<Document> {
        let video_id = youtube::extract_video_id(url).ok_or(AppError::InvalidVideoUrl)?;
        tracing::debug!(%video_id, "Fetching transcript");

        let fragments = self.transcripts.fetch_fragments(video_id).await?;
        Ok(Document::with_source(youtube::join_fragments(&fragments), url))
    }
}
