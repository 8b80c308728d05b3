//! Stateless HTTP surface over the engine. Nothing is stored between
//! requests; callers send the content they want processed or paginated.

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::models::{PageSlice, ProcessedContent};
use crate::services::paginator::{self, ParagraphMode};
use crate::services::{chapterizer, markup};
use axum::{
    Router,
    extract::{Multipart, State},
    response::{Html, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Clone)]
struct AppState {
    config: Arc<ServiceConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub content: ProcessedContent,
    pub page: usize,
    #[serde(default)]
    pub words_per_page: Option<usize>,
    #[serde(default)]
    pub paragraph_mode: ParagraphMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(flatten)]
    pub slice: PageSlice,
    pub total_pages: usize,
}

pub fn router(config: ServiceConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/process", post(process_text))
        .route("/upload", post(upload_file))
        .route("/page", post(page))
        .route("/markup", post(render_markup))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(tower_http::cors::Any)
                        .allow_methods(tower_http::cors::AllowMethods::any())
                        .allow_headers(tower_http::cors::AllowHeaders::any()),
                ),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

/// Run the pipeline on a blocking worker, bounded by input size and
/// wall-clock time. A timed-out worker is left to finish and its result
/// discarded.
async fn process_bounded(config: &ServiceConfig, raw: String) -> Result<ProcessedContent, ApiError> {
    let chars = raw.chars().count();
    if chars > config.max_input_chars {
        return Err(ApiError::InputTooLarge {
            chars,
            limit: config.max_input_chars,
        });
    }
    debug!(chars, "processing submission");

    let worker = tokio::task::spawn_blocking(move || chapterizer::process(&raw));
    match tokio::time::timeout(config.process_timeout, worker).await {
        Ok(Ok(content)) => Ok(content),
        // A panic in the engine is a bug, not a request failure.
        Ok(Err(err)) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Ok(Err(_)) => Err(ApiError::Cancelled),
        Err(_) => Err(ApiError::Timeout(config.process_timeout)),
    }
}

async fn process_text(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessedContent>, ApiError> {
    process_bounded(&state.config, request.content)
        .await
        .map(Json)
}

async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessedContent>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Upload(err.to_string()))?
    {
        if field.name() != Some("text_file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::Upload(err.to_string()))?;
        let text = decode_upload(&data)?;
        return process_bounded(&state.config, text).await.map(Json);
    }

    Err(ApiError::Upload("missing `text_file` field".to_string()))
}

/// UTF-8 text with an optional byte order mark.
fn decode_upload(bytes: &[u8]) -> Result<String, ApiError> {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|_| ApiError::InvalidUtf8)
}

async fn page(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    let words_per_page = request
        .words_per_page
        .unwrap_or(state.config.default_words_per_page);
    if request.page == 0 {
        return Err(ApiError::InvalidPage("page numbers start at 1"));
    }
    if words_per_page == 0 {
        return Err(ApiError::InvalidPage("wordsPerPage must be greater than zero"));
    }

    let slice = paginator::get_page_with(
        &request.content,
        request.page,
        words_per_page,
        request.paragraph_mode,
    );
    Ok(Json(PageResponse {
        slice,
        total_pages: paginator::page_count(&request.content, words_per_page),
    }))
}

async fn render_markup(Json(content): Json<ProcessedContent>) -> Html<String> {
    Html(markup::to_markup(&content))
}
