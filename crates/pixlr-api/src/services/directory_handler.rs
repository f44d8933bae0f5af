//! Save handler writing images to a local directory
//!
//! Each saved image becomes `<id>.<ext>` plus a `<id>.json` record with the
//! callback metadata. The user-supplied title never reaches the file system
//! as a path component.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pixlr_core::{AppError, ImageState, ImageType, SaveResult, SaveResultHandler};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Metadata stored next to each saved image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedImageRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub image_type: ImageType,
    pub state: ImageState,
    pub image_file: Option<String>,
    pub image_bytes: Option<u64>,
    pub content_type: Option<String>,
    pub additional_parameters: HashMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct DirectorySaveHandler {
    directory: PathBuf,
}

impl DirectorySaveHandler {
    /// Create the handler, creating `directory` if needed
    pub async fn new(directory: impl Into<PathBuf>) -> Result<Self, AppError> {
        let directory = directory.into();

        fs::create_dir_all(&directory).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create save directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }
}

#[async_trait]
impl SaveResultHandler for DirectorySaveHandler {
    async fn handle_save_result(&self, mut result: SaveResult) -> anyhow::Result<()> {
        let id = Uuid::new_v4();

        let (image_file, image_bytes, content_type) = match result.take_image() {
            Some(image) => {
                let file_name = format!("{}.{}", id, result.image_type().extension());
                let path = self.directory.join(&file_name);
                let content_type = image.content_type().map(str::to_string);

                let mut reader = image.into_async_read();
                let mut file = fs::File::create(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path.display()))?;

                let bytes = match tokio::io::copy(&mut reader, &mut file).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        drop(file);
                        if let Err(cleanup_err) = fs::remove_file(&path).await {
                            tracing::warn!(
                                error = %cleanup_err,
                                path = %path.display(),
                                "Failed to remove partial image"
                            );
                        }
                        return Err(anyhow::Error::new(e).context("Failed to read image stream"));
                    }
                };
                file.flush().await?;

                (Some(file_name), Some(bytes), content_type)
            }
            None => (None, None, None),
        };

        let record = SavedImageRecord {
            id,
            title: result.title().map(str::to_string),
            image_type: result.image_type(),
            state: result.state(),
            image_file,
            image_bytes,
            content_type,
            additional_parameters: result.additional_parameters().clone(),
            saved_at: Utc::now(),
        };

        let record_path = self.record_path(id);
        fs::write(&record_path, serde_json::to_vec_pretty(&record)?)
            .await
            .with_context(|| format!("Failed to write {}", record_path.display()))?;

        tracing::info!(
            id = %id,
            image_file = ?record.image_file,
            image_bytes = ?record.image_bytes,
            "Saved image to directory"
        );
        Ok(())
    }
}
