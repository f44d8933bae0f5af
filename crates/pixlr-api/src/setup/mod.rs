//! Application initialization

pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::Router;
use pixlr_core::{BaseStyle, Config, LoggingSaveHandler, SaveResultHandler};

use crate::services::{DirectorySaveHandler, ImageFetcher, SaveCallbackParser};
use crate::state::AppState;

/// Build the state and router for the configured save handler
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let handler: Arc<dyn SaveResultHandler> = match &config.save_directory {
        Some(directory) => {
            tracing::info!(directory = %directory.display(), "Saving images to directory");
            Arc::new(DirectorySaveHandler::new(directory.clone()).await?)
        }
        None => {
            tracing::warn!("SAVE_DIRECTORY not set, saved images are logged and discarded");
            Arc::new(LoggingSaveHandler)
        }
    };

    let state = build_state(config, handler)?;
    let router = routes::setup_routes(state.clone());
    Ok((state, router))
}

/// Build the application state around an arbitrary save handler
pub fn build_state(
    config: Config,
    handler: Arc<dyn SaveResultHandler>,
) -> Result<Arc<AppState>, anyhow::Error> {
    let fetcher = ImageFetcher::from_config(&config)?;
    let parser = SaveCallbackParser::new(handler, fetcher, config.max_request_size());

    Ok(Arc::new(AppState {
        config,
        parser,
        style: BaseStyle::default(),
    }))
}
