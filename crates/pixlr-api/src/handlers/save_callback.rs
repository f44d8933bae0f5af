use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, OriginalUri, Query, State},
    http::{HeaderMap, StatusCode},
};

use crate::error::HttpAppError;
use crate::services::PostOutcome;
use crate::state::AppState;

/// Save callback sent as a GET request
///
/// The image is referenced by URL in the `image` query parameter.
#[tracing::instrument(skip_all, fields(uri = %uri))]
pub async fn save_callback_get(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, HttpAppError> {
    tracing::info!("New GET request received");

    state
        .parser
        .handle_get(params)
        .await
        .map_err(|e| state.http_error(e))?;
    Ok(StatusCode::OK)
}

/// Save callback sent as a multipart POST request
///
/// A non-multipart body is acknowledged with 200 without calling the handler.
#[tracing::instrument(skip_all, fields(uri = %uri))]
pub async fn save_callback_post(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, HttpAppError> {
    tracing::info!("New POST request received");

    let outcome = state
        .parser
        .handle_post(&headers, multipart)
        .await
        .map_err(|e| state.http_error(e))?;
    if outcome == PostOutcome::NotMultipart {
        tracing::debug!("POST callback skipped");
    }
    Ok(StatusCode::OK)
}
