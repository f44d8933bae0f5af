//! Route configuration and setup

mod health;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use pixlr_infra::request_id_middleware;
use tower_http::trace::TraceLayer;

use crate::constants::{HEALTH_PATH, SAVE_PATH, STYLE_PATH};
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    // The configured maximum request size bounds multipart parsing; unset means unbounded.
    let body_limit = match state.parser.max_request_size() {
        Some(limit) => DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX)),
        None => DefaultBodyLimit::disable(),
    };

    let callback_routes = Router::new()
        .route(
            SAVE_PATH,
            get(handlers::save_callback::save_callback_get)
                .post(handlers::save_callback::save_callback_post),
        )
        .route(STYLE_PATH, get(handlers::style::style_sheet))
        .layer(body_limit)
        .with_state(state);

    Router::new()
        .route(HEALTH_PATH, get(health::liveness_check))
        .merge(callback_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
}
