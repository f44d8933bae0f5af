use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Format of the image saved by the editor
///
/// Parsing is total: any literal outside the editor's vocabulary becomes
/// `Unknown` instead of failing the whole callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ImageType {
    Jpg,
    Png,
    Bmp,
    /// Layered Pixlr document
    Pxd,
    #[default]
    Unknown,
}

impl ImageType {
    /// Parse a wire literal, ignoring ASCII case and surrounding whitespace
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpg" => ImageType::Jpg,
            "png" => ImageType::Png,
            "bmp" => ImageType::Bmp,
            "pxd" => ImageType::Pxd,
            _ => ImageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Jpg => "jpg",
            ImageType::Png => "png",
            ImageType::Bmp => "bmp",
            ImageType::Pxd => "pxd",
            ImageType::Unknown => "unknown",
        }
    }

    /// File extension used when persisting an image of this type
    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Unknown => "bin",
            other => other.as_str(),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageType::Jpg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Bmp => "image/bmp",
            ImageType::Pxd | ImageType::Unknown => "application/octet-stream",
        }
    }
}

impl FromStr for ImageType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ImageType::parse(s))
    }
}

impl From<String> for ImageType {
    fn from(value: String) -> Self {
        ImageType::parse(&value)
    }
}

impl Display for ImageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
