use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::pipeline::{Credential, SessionInput, SourceKind};

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub api_key: Credential,
    #[serde(default)]
    pub url: String,
}

impl From<SummarizeRequest> for SessionInput {
    fn from(req: SummarizeRequest) -> Self {
        SessionInput {
            api_key: req.api_key,
            url: req.url,
        }
    }
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub source: SourceKind,
    pub summary: String,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
}
