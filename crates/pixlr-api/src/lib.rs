//! Pixlr Callback API Library
//!
//! This crate provides the HTTP endpoint receiving Pixlr save callbacks, the
//! parser turning them into `SaveResult`s, and application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use services::{DirectorySaveHandler, ImageFetcher, PostOutcome, SaveCallbackParser};
pub use state::AppState;
