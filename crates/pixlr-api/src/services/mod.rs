pub mod directory_handler;
pub mod image_fetch;
pub mod save_callback;

pub use directory_handler::DirectorySaveHandler;
pub use image_fetch::ImageFetcher;
pub use save_callback::{PostOutcome, SaveCallbackParser};
