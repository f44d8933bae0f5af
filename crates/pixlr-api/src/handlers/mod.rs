pub mod save_callback;
pub mod style;
