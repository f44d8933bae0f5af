//! Route paths and service identity

/// Service name reported in logs
pub const SERVICE_NAME: &str = "pixlr-api";

/// Callback URL handed to Pixlr as the save target (GET and POST)
pub const SAVE_PATH: &str = "/pixlr/save";

/// Default style sheet for pages embedding the editor
pub const STYLE_PATH: &str = "/pixlr/style.css";

pub const HEALTH_PATH: &str = "/health";
