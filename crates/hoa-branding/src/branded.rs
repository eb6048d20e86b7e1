//! Documents that brand their new pages.

use hoa_core::config::HeaderLayout;

use crate::assets::BrandAssets;
use crate::document::{FontSpec, PdfDocument};
use crate::layout::decorate_page;

/// Wraps a document so that every added page gets the brand header and
/// watermark.
///
/// Wrapping an already-branded document only forwards calls, so new pages
/// are never decorated twice.
#[derive(Debug, Clone)]
pub struct BrandedDocument<D> {
    inner: D,
    assets: BrandAssets,
    layout: HeaderLayout,
}

impl<D: PdfDocument> BrandedDocument<D> {
    pub(crate) fn new(inner: D, assets: BrandAssets, layout: HeaderLayout) -> Self {
        Self {
            inner,
            assets,
            layout,
        }
    }

    /// The wrapped document.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// The wrapped document, mutably. Pages added through it are not branded.
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    /// Unwrap the document.
    pub fn into_inner(self) -> D {
        self.inner
    }

    /// Assets drawn on each page.
    pub fn assets(&self) -> &BrandAssets {
        &self.assets
    }
}

impl<D: PdfDocument> PdfDocument for BrandedDocument<D> {
    fn page_width(&self) -> f64 {
        self.inner.page_width()
    }

    fn page_height(&self) -> f64 {
        self.inner.page_height()
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn font(&self) -> Option<FontSpec> {
        self.inner.font()
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.inner.set_font(font);
    }

    fn font_size(&self) -> Option<f64> {
        self.inner.font_size()
    }

    fn set_font_size(&mut self, size: f64) {
        self.inner.set_font_size(size);
    }

    fn text_width(&self, text: &str) -> f64 {
        self.inner.text_width(text)
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        self.inner.text(text, x, y);
    }

    fn add_image(&mut self, data_url: &str, x: f64, y: f64, width: f64, height: f64) {
        self.inner.add_image(data_url, x, y, width, height);
    }

    fn set_opacity(&mut self, opacity: f64) -> bool {
        self.inner.set_opacity(opacity)
    }

    fn add_page(&mut self) {
        self.inner.add_page();
        if self.inner.is_branded() {
            return;
        }
        decorate_page(&mut self.inner, &self.assets, &self.layout);
    }

    fn is_branded(&self) -> bool {
        true
    }
}
