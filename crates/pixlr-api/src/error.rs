//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`, wrapping any
//! `AppError` through `AppState::http_error` so it renders with a consistent
//! status, body and log line for the running environment.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixlr_core::{AppError, Config, ErrorMetadata, LogLevel};
pub use pixlr_infra::ErrorResponse;

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: axum's trait, pixlr-core's type)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    production: bool,
}

impl HttpAppError {
    /// Wrap `error` for a service running with `config`
    pub fn new(error: AppError, config: &Config) -> Self {
        Self {
            error,
            production: config.is_production(),
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn error_body(app_error: &AppError, hide_details: bool) -> ErrorResponse {
    ErrorResponse {
        error: app_error.client_message(),
        details: (!hide_details).then(|| app_error.detailed_message()),
        error_type: (!hide_details).then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details are hidden in production and for sensitive errors.
        let hide_details = self.production || app_error.is_sensitive();

        (status, Json(error_body(app_error, hide_details))).into_response()
    }
}
