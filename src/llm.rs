use std::future::Future;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, header};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::pipeline::Credential;

const PROMPT_TEMPLATE: &str = include_str!("./prompts/summary.txt");
const CONTENT_PLACEHOLDER: &str = "{text}";

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.0,
            max_tokens: 1000,
        }
    }
}

/// Builds completion clients from a per-session credential.
pub trait CompletionProvider {
    type Client: CompletionClient + Send + Sync;

    fn client(&self, credential: &Credential) -> Result<Self::Client>;
}

pub trait CompletionClient {
    fn complete(
        &self,
        prompt: &str,
        params: &ModelParams,
    ) -> impl Future<Output = Result<String>> + Send;
}

pub fn build_prompt(content: &str) -> String {
    PROMPT_TEMPLATE.replace(CONTENT_PLACEHOLDER, content)
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Hands out OpenAI chat-completion clients sharing one connection pool.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.into()),
        })
    }
}

impl CompletionProvider for OpenAiProvider {
    type Client = OpenAiClient;

    fn client(&self, credential: &Credential) -> Result<OpenAiClient> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| {
                AppError::Initialization("API key contains invalid characters".to_string())
            })?;
        auth.set_sensitive(true);

        Ok(OpenAiClient {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            auth,
        })
    }
}

#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    auth: header::HeaderValue,
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str, params: &ModelParams) -> Result<String> {
        let body = ChatRequest {
            model: &params.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, self.auth.clone())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::LlmError(api_error_message(status.as_u16(), &text)));
        }

        parse_completion(&text)
    }
}

fn api_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("API error {}: {}", status, parsed.error.message),
        Err(_) => format!("API error {}: {}", status, body.trim()),
    }
}

fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AppError::LlmError(format!("Invalid response format from LLM: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))
}
