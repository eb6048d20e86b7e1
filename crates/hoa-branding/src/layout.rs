//! Header and watermark drawing.
//!
//! The header stacks the logo (centered at `logo_width`) above the bold
//! brand title. The two mascots sit at `mascot_height` on either side of
//! the title, vertically centered on it, clamped to stay `mascot_margin`
//! inside the page edges. The watermark is the cactus mascot in the
//! bottom-right corner at reduced opacity.

use hoa_core::config::HeaderLayout;

use crate::assets::{BrandAsset, BrandAssets};
use crate::document::{FontSpec, PdfDocument};

/// Draw the brand header on the current page.
///
/// Returns the y-coordinate just below the header. The caller's font and
/// font size are restored before returning.
pub fn draw_header<D>(doc: &mut D, assets: &BrandAssets, layout: &HeaderLayout) -> f64
where
    D: PdfDocument + ?Sized,
{
    let saved_font = doc.font();
    let saved_size = doc.font_size();
    let page_width = doc.page_width();
    let mut cursor_y = layout.start_y;

    if let Some(logo) = &assets.logo {
        let width = layout.logo_width;
        let height = logo.height_for_width(width);
        doc.add_image(&logo.data_url, (page_width - width) / 2.0, cursor_y, width, height);
        cursor_y += height + layout.logo_spacing;
    }

    doc.set_font(&FontSpec::bold(layout.brand_font.as_str()));
    doc.set_font_size(layout.brand_font_size);
    let text_width = doc.text_width(&layout.brand_title);
    let text_x = if text_width > 0.0 {
        (page_width - text_width) / 2.0
    } else {
        page_width / 2.0
    };
    let scale = match doc.scale_factor() {
        s if s > 0.0 => s,
        _ => 1.0,
    };
    let font_height = layout.brand_font_size / scale;
    let baseline = cursor_y + font_height;
    doc.text(&layout.brand_title, text_x, baseline);

    let mascot_y = baseline - font_height / 2.0 - layout.mascot_height / 2.0;
    if let Some(nepenthes) = &assets.nepenthes {
        let width = nepenthes.width_for_height(layout.mascot_height);
        let x = layout
            .mascot_margin
            .max(text_x - width - layout.mascot_spacing);
        doc.add_image(&nepenthes.data_url, x, mascot_y, width, layout.mascot_height);
    }
    if let Some(cactus) = &assets.cactus {
        let width = cactus.width_for_height(layout.mascot_height);
        let x = (page_width - width - layout.mascot_margin)
            .min(text_x + text_width + layout.mascot_spacing);
        doc.add_image(&cactus.data_url, x, mascot_y, width, layout.mascot_height);
    }

    if let Some(font) = saved_font {
        doc.set_font(&font);
    }
    if let Some(size) = saved_size {
        doc.set_font_size(size);
    }

    baseline + layout.header_padding
}

/// Stamp `mascot` as a watermark in the bottom-right corner.
///
/// Documents without opacity support get the image at full opacity.
pub fn draw_watermark<D>(doc: &mut D, mascot: &BrandAsset, layout: &HeaderLayout)
where
    D: PdfDocument + ?Sized,
{
    let width = layout.watermark_width;
    let height = mascot.height_for_width(width);
    let x = doc.page_width() - width - layout.watermark_margin;
    let y = doc.page_height() - height - layout.watermark_margin;

    let translucent = doc.set_opacity(layout.watermark_opacity);
    doc.add_image(&mascot.data_url, x, y, width, height);
    if translucent {
        doc.set_opacity(1.0);
    }
}

/// Decorate the current page: header when any asset loaded, then the
/// watermark when the cactus loaded.
pub(crate) fn decorate_page<D>(doc: &mut D, assets: &BrandAssets, layout: &HeaderLayout)
where
    D: PdfDocument + ?Sized,
{
    if assets.any() {
        draw_header(doc, assets, layout);
    }
    if let Some(cactus) = &assets.cactus {
        draw_watermark(doc, cactus, layout);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assets::tests::png;
    use crate::recording::{DrawOp, RecordingDocument};

    fn asset(width: u32, height: u32) -> BrandAsset {
        BrandAsset::from_bytes(Some("image/png"), &png(width, height))
    }

    fn unit_doc() -> RecordingDocument {
        // Unit scale and a fixed glyph width keep the arithmetic readable.
        RecordingDocument::new(200.0, 300.0).with_scale_factor(1.0)
    }

    fn images(doc: &RecordingDocument) -> Vec<(f64, f64, f64, f64)> {
        doc.ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image {
                    x, y, width, height, ..
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_header_geometry() {
        let mut doc = unit_doc();
        let assets = BrandAssets {
            logo: Some(asset(44, 11)),
            nepenthes: Some(asset(9, 18)),
            cactus: Some(asset(18, 18)),
        };
        let layout = HeaderLayout::default();

        let bottom = draw_header(&mut doc, &assets, &layout);

        let title_width = doc.text_width_at("Hydro Oasis", 22.0);
        let text_x = (200.0 - title_width) / 2.0;
        // Logo 44x11 at y 12, then 4 spacing, then 22 of font height.
        let baseline = 12.0 + 11.0 + 4.0 + 22.0;
        assert_eq!(bottom, baseline + 6.0);

        let drawn = images(&doc);
        assert_eq!(drawn[0], (78.0, 12.0, 44.0, 11.0));
        let mascot_y = baseline - 11.0 - 9.0;
        assert_eq!(drawn[1], (text_x - 9.0 - 6.0, mascot_y, 9.0, 18.0));
        assert_eq!(drawn[2], (text_x + title_width + 6.0, mascot_y, 18.0, 18.0));
    }

    #[test]
    fn test_mascots_clamped_to_margins() {
        let mut doc = RecordingDocument::new(60.0, 100.0).with_scale_factor(1.0);
        let assets = BrandAssets {
            nepenthes: Some(asset(18, 18)),
            cactus: Some(asset(18, 18)),
            ..Default::default()
        };

        draw_header(&mut doc, &assets, &HeaderLayout::default());

        let drawn = images(&doc);
        assert_eq!(drawn[0].0, 8.0);
        assert_eq!(drawn[1].0, 60.0 - 18.0 - 8.0);
    }

    #[test]
    fn test_title_only_without_assets() {
        let mut doc = unit_doc();
        let bottom = draw_header(&mut doc, &BrandAssets::default(), &HeaderLayout::default());
        assert_eq!(bottom, 12.0 + 22.0 + 6.0);
        assert!(images(&doc).is_empty());
        assert_eq!(doc.texts(), vec!["Hydro Oasis".to_string()]);
    }

    #[test]
    fn test_font_restored_after_header() {
        let mut doc = unit_doc();
        doc.set_font(&FontSpec::new("times", "italic"));
        doc.set_font_size(11.0);

        draw_header(&mut doc, &BrandAssets::default(), &HeaderLayout::default());

        assert_eq!(doc.font(), Some(FontSpec::new("times", "italic")));
        assert_eq!(doc.font_size(), Some(11.0));
        assert!(doc.ops().contains(&DrawOp::SetFont {
            font: FontSpec::bold("helvetica")
        }));
    }

    #[test]
    fn test_watermark_opacity_reset() {
        let mut doc = unit_doc();
        draw_watermark(&mut doc, &asset(36, 72), &HeaderLayout::default());

        assert_eq!(
            doc.ops()[0],
            DrawOp::SetOpacity { opacity: 0.12 }
        );
        assert_eq!(images(&doc), vec![(200.0 - 36.0 - 14.0, 300.0 - 72.0 - 14.0, 36.0, 72.0)]);
        assert_eq!(doc.ops()[2], DrawOp::SetOpacity { opacity: 1.0 });
    }

    #[test]
    fn test_watermark_without_opacity_support() {
        let mut doc = unit_doc().without_opacity();
        draw_watermark(&mut doc, &asset(10, 10), &HeaderLayout::default());
        assert_eq!(doc.ops().len(), 1);
        assert!(matches!(doc.ops()[0], DrawOp::Image { .. }));
    }
}
