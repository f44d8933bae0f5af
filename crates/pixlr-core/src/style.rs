//! Default style resource for pages embedding the editor

/// CSS class names used around the embedded editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStyle {
    /// Clears both left and right floats
    pub clear: String,
    /// Floats content to the left
    pub left: String,
    /// Floats content to the right
    pub right: String,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            clear: "clear".to_string(),
            left: "left".to_string(),
            right: "right".to_string(),
        }
    }
}

impl BaseStyle {
    pub const CONTENT_TYPE: &'static str = "text/css; charset=utf-8";

    /// Render the style sheet for these class names
    pub fn css(&self) -> String {
        format!(
            ".{} {{\n  clear: both;\n}}\n\n.{} {{\n  float: left;\n}}\n\n.{} {{\n  float: right;\n}}\n",
            self.clear, self.left, self.right
        )
    }
}
