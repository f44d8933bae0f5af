use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the user saved the image in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ImageState {
    /// The image was opened or created inside the editor
    New,
    /// The image came from the API and "Save as copy" was checked
    Copy,
    /// The image came from the API and replaces the original
    Replace,
    #[default]
    Unknown,
}

impl ImageState {
    /// Parse a wire literal, ignoring ASCII case and surrounding whitespace
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => ImageState::New,
            "copy" => ImageState::Copy,
            "replace" => ImageState::Replace,
            _ => ImageState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageState::New => "new",
            ImageState::Copy => "copy",
            ImageState::Replace => "replace",
            ImageState::Unknown => "unknown",
        }
    }
}

impl FromStr for ImageState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ImageState::parse(s))
    }
}

impl From<String> for ImageState {
    fn from(value: String) -> Self {
        ImageState::parse(&value)
    }
}

impl Display for ImageState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
