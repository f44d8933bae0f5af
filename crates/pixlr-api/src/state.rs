//! Application state shared by all handlers

use pixlr_core::{AppError, BaseStyle, Config};

use crate::error::HttpAppError;
use crate::services::SaveCallbackParser;

pub struct AppState {
    pub config: Config,
    pub parser: SaveCallbackParser,
    pub style: BaseStyle,
}

impl AppState {
    /// Wrap an error for rendering under the loaded configuration
    pub fn http_error(&self, error: AppError) -> HttpAppError {
        HttpAppError::new(error, &self.config)
    }
}
