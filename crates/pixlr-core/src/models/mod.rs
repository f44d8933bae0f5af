pub mod image_state;
pub mod image_stream;
pub mod image_type;
pub mod save_result;

pub use image_state::ImageState;
pub use image_stream::{ImageOrigin, ImageStream};
pub use image_type::ImageType;
pub use save_result::SaveResult;
