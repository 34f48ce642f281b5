use std::sync::{Arc, Mutex};
use rust_url_summarizer::error::{AppError, Result};
use rust_url_summarizer::llm::{CompletionClient, CompletionProvider, ModelParams};
use rust_url_summarizer::pipeline::Credential;

#[derive(Clone, Default)]
pub struct MockCompletions {
    pub completion: String,
    /// Keys handed to `client`
    pub credentials: Arc<Mutex<Vec<String>>>,
    /// Prompts passed to `complete`
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub params: Arc<Mutex<Vec<ModelParams>>>,
    pub fail_init: bool,
    pub fail_with: Option<String>,
}

impl MockCompletions {
    pub fn new(completion: &str) -> Self {
        Self {
            completion: completion.to_string(),
            ..Default::default()
        }
    }

    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
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

impl CompletionProvider for MockCompletions {
    type Client = MockCompletions;

    fn client(&self, credential: &Credential) -> Result<Self::Client> {
        self.credentials
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
        if self.fail_init {
            return Err(AppError::Initialization("malformed key".into()));
        }
        Ok(self.clone())
    }
}

impl CompletionClient for MockCompletions {
    async fn complete(&self, prompt: &str, params: &ModelParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push(params.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::LlmError(msg.clone()));
        }
        Ok(self.completion.clone())
    }
}
