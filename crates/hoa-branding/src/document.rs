//! The document handle branding draws on.
//!
//! [`PdfDocument`] is the subset of a paginated PDF writer the decorator
//! needs. Coordinates and sizes are in the document's user unit; the page
//! origin is the top-left corner.

use serde::{Deserialize, Serialize};

/// Font family and style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family, e.g. `helvetica`
    pub name: String,
    /// Font style, e.g. `normal` or `bold`
    pub style: String,
}

impl FontSpec {
    /// Creates a font spec.
    pub fn new(name: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: style.into(),
        }
    }

    /// Bold variant of `name`.
    pub fn bold(name: impl Into<String>) -> Self {
        Self::new(name, "bold")
    }
}

/// An in-progress paginated document.
pub trait PdfDocument: Send {
    /// Width of the current page.
    fn page_width(&self) -> f64;

    /// Height of the current page.
    fn page_height(&self) -> f64;

    /// Points per user unit. Font sizes are in points.
    fn scale_factor(&self) -> f64 {
        1.0
    }

    /// The current font, if the document tracks one.
    fn font(&self) -> Option<FontSpec>;

    /// Select a font.
    fn set_font(&mut self, font: &FontSpec);

    /// The current font size in points, if the document tracks one.
    fn font_size(&self) -> Option<f64>;

    /// Set the font size in points.
    fn set_font_size(&mut self, size: f64);

    /// Width of `text` in the current font, in user units.
    fn text_width(&self, text: &str) -> f64;

    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn text(&mut self, text: &str, x: f64, y: f64);

    /// Embed an image given as a data URL.
    fn add_image(&mut self, data_url: &str, x: f64, y: f64, width: f64, height: f64);

    /// Set fill opacity. Returns `false` if unsupported.
    fn set_opacity(&mut self, _opacity: f64) -> bool {
        false
    }

    /// Start a new page and make it current.
    fn add_page(&mut self);

    /// Whether new pages already receive brand decoration.
    fn is_branded(&self) -> bool {
        false
    }
}
