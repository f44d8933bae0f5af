//! Extension point for embedding applications
//!
//! The service parses the callback and hands the `SaveResult` to a
//! `SaveResultHandler`. What happens next (persisting to storage, queueing
//! for processing, ...) is up to the implementation.

use std::future::Future;

use async_trait::async_trait;

use crate::models::SaveResult;

/// Receives each fully parsed save callback
///
/// The handler owns the result, including its image stream, and must consume
/// the stream before returning. The stream is released when the result is
/// dropped, whether or not the handler succeeds.
#[async_trait]
pub trait SaveResultHandler: Send + Sync {
    async fn handle_save_result(&self, result: SaveResult) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> SaveResultHandler for F
where
    F: Fn(SaveResult) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn handle_save_result(&self, result: SaveResult) -> anyhow::Result<()> {
        (self)(result).await
    }
}

/// Handler that drains the image and logs what was received
pub struct LoggingSaveHandler;

#[async_trait]
impl SaveResultHandler for LoggingSaveHandler {
    async fn handle_save_result(&self, mut result: SaveResult) -> anyhow::Result<()> {
        let image_bytes = match result.take_image() {
            Some(image) => Some(image.read_to_end().await?.len()),
            None => None,
        };

        tracing::info!(
            title = ?result.title(),
            image_type = %result.image_type(),
            state = %result.state(),
            image_bytes = ?image_bytes,
            additional_parameters = ?result.additional_parameters(),
            "Received saved image"
        );
        Ok(())
    }
}
