use std::collections::HashMap;

use crate::classify::FieldKind;
use crate::models::{ImageState, ImageStream, ImageType};

/// Everything the editor sent back when the user saved an image
///
/// Built fresh for each callback, filled while the request fields are
/// scanned, then moved into the `SaveResultHandler`. Every field lands in
/// exactly one slot: `title`, `image_type`, `state`, `image`, or the
/// additional parameters.
#[derive(Debug, Default)]
pub struct SaveResult {
    title: Option<String>,
    image_type: ImageType,
    state: ImageState,
    image: Option<ImageStream>,
    image_assigned: bool,
    additional_parameters: HashMap<String, String>,
}

impl SaveResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn state(&self) -> ImageState {
        self.state
    }

    pub fn image(&self) -> Option<&ImageStream> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Take ownership of the image stream. The caller becomes responsible for it.
    pub fn take_image(&mut self) -> Option<ImageStream> {
        self.image.take()
    }

    /// Attach the image stream. The image can only be assigned once per
    /// request; a later stream is handed back to the caller.
    pub fn set_image(&mut self, image: ImageStream) -> Result<(), ImageStream> {
        if self.image_assigned {
            return Err(image);
        }
        self.image = Some(image);
        self.image_assigned = true;
        Ok(())
    }

    pub fn additional_parameters(&self) -> &HashMap<String, String> {
        &self.additional_parameters
    }

    pub fn additional_parameter(&self, name: &str) -> Option<&str> {
        self.additional_parameters.get(name).map(String::as_str)
    }

    /// Store a field verbatim, bypassing classification
    pub fn put_additional_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.additional_parameters.insert(name.into(), value.into());
    }

    /// Apply a text-valued field by name.
    ///
    /// `title`, `type` and `state` populate their slots, unrecognised names go
    /// to the additional parameters. `image` is left untouched and reported as
    /// `FieldKind::Image` so the caller can resolve it.
    pub fn apply_text_field(&mut self, name: &str, value: impl Into<String>) -> FieldKind {
        let kind = FieldKind::of(name);
        match kind {
            FieldKind::Image => {}
            FieldKind::Title => self.title = Some(value.into()),
            FieldKind::Type => self.image_type = ImageType::parse(&value.into()),
            FieldKind::State => self.state = ImageState::parse(&value.into()),
            FieldKind::Additional => self.put_additional_parameter(name, value),
        }
        kind
    }
}
