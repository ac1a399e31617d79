//! Options passed down while building MathML
//!
//! Options objects are immutable; the `with_*` methods return a modified
//! copy for the subtree being built.

/// The font and color in effect for a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Math font command without the backslash, e.g. `mathrm`. Empty means
    /// the default font.
    pub font: String,
    pub color: Option<String>,
}

impl Options {
    /// Creates a new options object with the given math font.
    #[must_use]
    pub fn with_font(&self, font: String) -> Self {
        let mut new_options = self.clone();
        new_options.font = font;
        new_options
    }

    /// Create a new options object with the given color.
    #[must_use]
    pub fn with_color(&self, color: String) -> Self {
        let mut new_options = self.clone();
        new_options.color = Some(color);
        new_options
    }
}
