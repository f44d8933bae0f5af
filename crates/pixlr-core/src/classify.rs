//! Field classification shared by the GET and POST callbacks

/// URL of the image for GET callbacks, the image file itself for POST callbacks
pub const IMAGE_FIELD: &str = "image";
/// Title the user typed in when saving
pub const TITLE_FIELD: &str = "title";
/// Image format: jpg, png, bmp or pxd
pub const TYPE_FIELD: &str = "type";
/// Save provenance: new, copy or replace
pub const STATE_FIELD: &str = "state";

/// Slot a request field is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Image,
    Title,
    Type,
    State,
    Additional,
}

impl FieldKind {
    /// Classify a field by its exact name
    pub fn of(name: &str) -> Self {
        match name {
            IMAGE_FIELD => FieldKind::Image,
            TITLE_FIELD => FieldKind::Title,
            TYPE_FIELD => FieldKind::Type,
            STATE_FIELD => FieldKind::State,
            _ => FieldKind::Additional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_recognised_names() {
        assert_eq!(FieldKind::of("image"), FieldKind::Image);
        assert_eq!(FieldKind::of("title"), FieldKind::Title);
        assert_eq!(FieldKind::of("type"), FieldKind::Type);
        assert_eq!(FieldKind::of("state"), FieldKind::State);
    }

    #[test]
    fn anything_else_is_additional() {
        for name in ["IMAGE", "titles", "", "referrer", "method"] {
            assert_eq!(FieldKind::of(name), FieldKind::Additional, "{name}");
        }
    }
}
