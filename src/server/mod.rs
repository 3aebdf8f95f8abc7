//! `POST /api/analyze` endpoint.

use crate::analysis::KeywordTagger;
use crate::client::ANALYZE_PATH;
use crate::models::{AnalysisResult, ErrorBody, SearchParams};
use crate::scrapers::ListingSource;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct AppState {
    source: Arc<dyn ListingSource>,
    tagger: KeywordTagger,
}

impl AppState {
    pub fn new(source: Arc<dyn ListingSource>) -> Result<Self> {
        Ok(Self {
            source,
            tagger: KeywordTagger::new()?,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(ANALYZE_PATH, post(analyze))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .context("Server error")
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(params): Json<SearchParams>,
) -> Response {
    info!("Received analysis request: {:?}", params);

    let mut properties = match state.source.search(&params).await {
        Ok(properties) => properties,
        Err(e) => {
            error!("{} search failed: {:#}", state.source.source_name(), e);
            let body = ErrorBody {
                message: Some(format!("Analysis failed: {}", e)),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    // Sources that know more about a listing tag it themselves.
    for property in properties.iter_mut().filter(|p| p.analysis_tags.is_empty()) {
        state.tagger.tag(property);
    }

    let mut message = format!(
        "Analysis complete! Found {} properties from {}.",
        properties.len(),
        state.source.source_name()
    );
    if let Some(email) = SearchParams::non_empty(&params.email) {
        message.push_str(&format!(" Email notification would be sent to {}.", email));
        info!("Email sending to {} would happen here", email);
    }

    Json(AnalysisResult::new(message, properties)).into_response()
}
