//! Parsing of the save callback Pixlr sends once the user saves an image
//!
//! GET callbacks carry the image as a URL in the query string; POST callbacks
//! carry it as a multipart file part. Both paths share field classification
//! through `SaveResult::apply_text_field` and end by handing the result to
//! the configured `SaveResultHandler`, exactly once and fully populated.

use std::collections::HashSet;
use std::io::SeekFrom;
use std::sync::Arc;

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::{header, HeaderMap, StatusCode};
use pixlr_core::{
    AppError, FieldKind, ImageOrigin, ImageStream, SaveResult, SaveResultHandler,
};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::services::ImageFetcher;

/// What happened to a POST callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// The result was parsed and handed to the handler
    Handled,
    /// The body was not multipart; nothing was parsed and the handler was not called
    NotMultipart,
}

pub struct SaveCallbackParser {
    handler: Arc<dyn SaveResultHandler>,
    fetcher: ImageFetcher,
    max_request_size: Option<u64>,
}

impl SaveCallbackParser {
    pub fn new(
        handler: Arc<dyn SaveResultHandler>,
        fetcher: ImageFetcher,
        max_request_size: Option<u64>,
    ) -> Self {
        Self {
            handler,
            fetcher,
            max_request_size,
        }
    }

    /// Maximum total size of a POST body, `None` when unbounded
    pub fn max_request_size(&self) -> Option<u64> {
        self.max_request_size
    }

    /// Handle a GET callback from its query parameters.
    ///
    /// Only the first value of a repeated parameter is used. The `image`
    /// parameter is a URL which is opened and attached as the image stream.
    #[tracing::instrument(skip(self, params), fields(operation = "save_callback_get"))]
    pub async fn handle_get(&self, params: Vec<(String, String)>) -> Result<(), AppError> {
        let mut result = SaveResult::new();
        let mut seen = HashSet::new();

        for (name, value) in params {
            if !seen.insert(name.clone()) {
                continue;
            }

            if result.apply_text_field(&name, value.as_str()) == FieldKind::Image {
                let image = self.fetcher.open(&value).await?;
                if result.set_image(image).is_err() {
                    tracing::warn!("Image already attached, ignoring image URL");
                }
            }
        }

        log_parsed_result(&result);
        self.dispatch(result).await
    }

    /// Handle a POST callback carrying a multipart body.
    ///
    /// A body that is not multipart is logged and skipped without calling the
    /// handler. Size-limit breaches and malformed multipart data, including a
    /// multipart content type the extractor rejects, are errors.
    #[tracing::instrument(skip_all, fields(operation = "save_callback_post"))]
    pub async fn handle_post(
        &self,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<PostOutcome, AppError> {
        if !is_multipart_content(headers) {
            tracing::error!("Cannot process request. No file to upload.");
            return Ok(PostOutcome::NotMultipart);
        }

        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                return Err(AppError::InvalidMultipart(rejection.body_text()));
            }
        };

        if let (Some(limit), Some(length)) = (self.max_request_size, content_length(headers)) {
            if length > limit {
                return Err(AppError::PayloadTooLarge(format!(
                    "Request size {} bytes exceeds the maximum of {} bytes",
                    length, limit
                )));
            }
        }

        let mut result = SaveResult::new();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                None => {
                    let value = field.text().await.map_err(multipart_error)?;
                    if FieldKind::of(&name) == FieldKind::Image {
                        // Only a file part can carry the image in a POST.
                        result.put_additional_parameter(name, value);
                    } else {
                        result.apply_text_field(&name, value);
                    }
                }
                Some(file_name) if FieldKind::of(&name) == FieldKind::Image => {
                    if result.has_image() {
                        tracing::warn!(file_name = %file_name, "Ignoring additional image part");
                        continue;
                    }
                    let image = spool_image_part(field, file_name).await?;
                    if result.set_image(image).is_err() {
                        tracing::warn!("Image already attached, ignoring image part");
                    }
                }
                Some(file_name) => {
                    tracing::debug!(field = %name, file_name = %file_name, "Ignoring file part");
                }
            }
        }

        log_parsed_result(&result);
        self.dispatch(result).await?;
        Ok(PostOutcome::Handled)
    }

    async fn dispatch(&self, result: SaveResult) -> Result<(), AppError> {
        self.handler
            .handle_save_result(result)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Save handler failed");
                AppError::handler(e)
            })
    }
}

fn log_parsed_result(result: &SaveResult) {
    tracing::debug!(
        title = ?result.title(),
        state = %result.state(),
        image_type = %result.image_type(),
        has_image = result.has_image(),
        additional_parameters = ?result.additional_parameters(),
        "Parsed result from Pixlr"
    );
}

/// Stream an uploaded part into an anonymous spool file and expose it as the
/// image stream. The file never holds more than the part itself and is
/// removed by the OS once the stream is dropped.
async fn spool_image_part(mut field: Field<'_>, file_name: String) -> Result<ImageStream, AppError> {
    let content_type = field.content_type().map(str::to_string);

    let spool = tokio::task::spawn_blocking(tempfile::tempfile)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create spool file: {}", e)))??;
    let mut file = tokio::fs::File::from_std(spool);

    let mut size: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    file.seek(SeekFrom::Start(0)).await?;

    tracing::debug!(file_name = %file_name, bytes = size, "Received image part");

    let image = ImageStream::from_reader(
        file,
        ImageOrigin::Upload {
            file_name: Some(file_name),
        },
    );
    Ok(match content_type {
        Some(content_type) => image.with_content_type(content_type),
        None => image,
    })
}

fn is_multipart_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/"))
        .unwrap_or(false)
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidMultipart(err.body_text())
    }
}
