//! A document that records drawing calls instead of rendering them.
//!
//! Used to test branding and to print a drawing plan from the CLI. Text is
//! measured with a fixed average glyph width, which is close enough to
//! Helvetica for layout checks.

use serde::{Deserialize, Serialize};

use crate::document::{FontSpec, PdfDocument};

/// Average glyph advance as a fraction of the font size.
const AVERAGE_GLYPH_EM: f64 = 0.5;

/// Points per millimetre.
pub const MM_SCALE_FACTOR: f64 = 72.0 / 25.4;

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Font selected
    SetFont {
        /// The font
        font: FontSpec,
    },
    /// Font size changed
    SetFontSize {
        /// Size in points
        size: f64,
    },
    /// Text drawn
    Text {
        /// 1-based page number
        page: usize,
        /// The text
        text: String,
        /// Left edge
        x: f64,
        /// Baseline
        y: f64,
    },
    /// Image embedded
    Image {
        /// 1-based page number
        page: usize,
        /// Image data URL
        data_url: String,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Drawn width
        width: f64,
        /// Drawn height
        height: f64,
    },
    /// Fill opacity changed
    SetOpacity {
        /// New opacity in `0.0..=1.0`
        opacity: f64,
    },
    /// Page added
    AddPage {
        /// Number of the new page
        page: usize,
    },
}

/// In-memory [`PdfDocument`].
#[derive(Debug, Clone)]
pub struct RecordingDocument {
    width: f64,
    height: f64,
    scale_factor: f64,
    font: FontSpec,
    font_size: f64,
    opacity_supported: bool,
    page: usize,
    ops: Vec<DrawOp>,
}

impl RecordingDocument {
    /// A one-page document of the given size in millimetres.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale_factor: MM_SCALE_FACTOR,
            font: FontSpec::new("helvetica", "normal"),
            font_size: 16.0,
            opacity_supported: true,
            page: 1,
            ops: Vec::new(),
        }
    }

    /// A one-page A4 portrait document.
    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }

    /// Override the points-per-unit scale.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Make [`PdfDocument::set_opacity`] unsupported.
    pub fn without_opacity(mut self) -> Self {
        self.opacity_supported = false;
        self
    }

    /// Recorded calls, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Consume the document, returning the recorded calls.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Every text drawn, in order.
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page
    }

    /// Width of `text` at `size` points, in user units.
    pub fn text_width_at(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * AVERAGE_GLYPH_EM / self.scale_factor
    }
}

impl Default for RecordingDocument {
    fn default() -> Self {
        Self::a4()
    }
}

impl PdfDocument for RecordingDocument {
    fn page_width(&self) -> f64 {
        self.width
    }

    fn page_height(&self) -> f64 {
        self.height
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn font(&self) -> Option<FontSpec> {
        Some(self.font.clone())
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
        self.ops.push(DrawOp::SetFont { font: font.clone() });
    }

    fn font_size(&self) -> Option<f64> {
        Some(self.font_size)
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.ops.push(DrawOp::SetFontSize { size });
    }

    fn text_width(&self, text: &str) -> f64 {
        self.text_width_at(text, self.font_size)
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            text: text.to_string(),
            x,
            y,
        });
    }

    fn add_image(&mut self, data_url: &str, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Image {
            page: self.page,
            data_url: data_url.to_string(),
            x,
            y,
            width,
            height,
        });
    }

    fn set_opacity(&mut self, opacity: f64) -> bool {
        if self.opacity_supported {
            self.ops.push(DrawOp::SetOpacity { opacity });
        }
        self.opacity_supported
    }

    fn add_page(&mut self) {
        self.page += 1;
        self.ops.push(DrawOp::AddPage { page: self.page });
    }
}
