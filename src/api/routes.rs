use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State, rejection::JsonRejection},
    response::{Html, IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;
use serde_json::json;

use crate::AppState;
use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::api::response;
use crate::error::AppError;
use crate::llm::CompletionProvider;
use crate::pipeline::SessionInput;
use crate::scraper::PageLoader;
use crate::youtube::TranscriptSource;

const INDEX_HTML: &str = include_str!("./index.html");

pub fn create_router<T, L, P>(app_state: AppState<T, L, P>) -> Router
where
    T: TranscriptSource + Send + Sync + 'static,
    L: PageLoader + Send + Sync + 'static,
    P: CompletionProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/summarize", post(summarize_handler::<T, L, P>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn summarize_handler<T, L, P>(
    State(state): State<AppState<T, L, P>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response
where
    T: TranscriptSource + Send + Sync + 'static,
    L: PageLoader + Send + Sync + 'static,
    P: CompletionProvider + Send + Sync + 'static,
{
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed request body");
            return AppError::Validation(rejection.body_text()).into_response();
        }
    };

    let input = SessionInput::from(req);
    let url = input.url.trim().to_string();
    tracing::info!(%url, "Processing summarize request");
    let start_time = std::time::Instant::now();

    let result = state.pipeline.run(&input).await;
    let elapsed_ms = start_time.elapsed().as_millis() as u64;

    match result {
        Ok(summary) => {
            tracing::info!(%url, elapsed_ms, "Successfully summarized URL");
            response::success(SummarizeResponse {
                url,
                source: summary.source,
                summary: summary.text,
                word_count: summary.word_count,
                summarized_at: Utc::now(),
            })
            .into_response()
        }
        Err(err) => {
            tracing::warn!(
                %url,
                elapsed_ms,
                kind = err.kind(),
                error = %err,
                "Summarization failed"
            );
            err.into_response()
        }
    }
}
