//! Pixlr Callback Core Library
//!
//! This crate provides the domain types of the Pixlr save callback: the parsed
//! save result, field classification, error types, configuration and the
//! handler hook implemented by embedding applications.

pub mod classify;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod style;

// Re-export commonly used types
pub use classify::FieldKind;
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hooks::{LoggingSaveHandler, SaveResultHandler};
pub use models::{ImageOrigin, ImageState, ImageStream, ImageType, SaveResult};
pub use style::BaseStyle;
