use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};
use pixlr_core::BaseStyle;

use crate::state::AppState;

pub async fn style_sheet(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, BaseStyle::CONTENT_TYPE)], state.style.css())
}
