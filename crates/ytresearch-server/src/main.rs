//! HTTP JSON API for the research pipeline
//!
//! Exposes the two core operations to HTTP clients:
//!
//! - `POST /api/analyze`    — `{ apiKey, channels }` to channel + video CSV
//! - `POST /api/run-filter` — `{ apiKey, keywords, ... }` to a capped channel CSV
//!
//! Input and no-result errors map to 400, everything else to 500, both as
//! `{ "error": message }`. Transport only; all behavior lives in the core.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use log::info;
use serde::Serialize;

use ytresearch_core::{
    AnalyzeRequest, AnalyzeResponse, FilterRequest, FilterResponse, ResearchError,
    YoutubeResearch,
};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn into_api_error(error: ResearchError) -> ApiError {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

async fn analyze(
    State(research): State<Arc<YoutubeResearch>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    research
        .analyze(&request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

async fn run_filter(
    State(research): State<Arc<YoutubeResearch>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, ApiError> {
    research
        .filter(&request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

fn app(research: Arc<YoutubeResearch>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/run-filter", post(run_filter))
        .with_state(research)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let research = Arc::new(YoutubeResearch::new()?);
    let addr = std::env::var("YTRESEARCH_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app(research)).await?;

    Ok(())
}
