//! Report decoration entry point.

use std::sync::Arc;

use hoa_core::Outcome;
use hoa_core::config::{BrandAssetUrls, BrandingConfig, HeaderLayout};
use serde::Serialize;

use crate::assets::{AssetLoader, BrandAssets};
use crate::branded::BrandedDocument;
use crate::document::PdfDocument;
use crate::layout::{draw_header, draw_watermark};

/// Where the header ended and report content may begin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorationReport {
    /// Assets that were drawn
    pub assets: BrandAssets,
    /// y-coordinate just below the header
    pub header_bottom: f64,
    /// `header_bottom` plus the configured content gap
    pub content_start: f64,
}

/// A decorated document and its layout report.
#[derive(Debug)]
pub struct Decorated<D> {
    /// The document, branding every page it adds from now on
    pub document: BrandedDocument<D>,
    /// Header position on the first page
    pub report: DecorationReport,
}

/// Brands PDF reports.
#[derive(Debug, Clone)]
pub struct Branding {
    loader: Arc<AssetLoader>,
    urls: BrandAssetUrls,
    layout: HeaderLayout,
}

impl Branding {
    /// Creates a decorator loading assets through `loader`.
    pub fn new(loader: Arc<AssetLoader>, config: &BrandingConfig) -> Self {
        Self {
            loader,
            urls: config.assets.clone(),
            layout: config.layout.clone(),
        }
    }

    /// Replace the header layout.
    pub fn with_layout(mut self, layout: HeaderLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The header layout in use.
    pub fn layout(&self) -> &HeaderLayout {
        &self.layout
    }

    /// Load the three brand assets concurrently.
    pub async fn load_assets(&self) -> BrandAssets {
        let (logo, nepenthes, cactus) = futures::join!(
            self.loader.load(&self.urls.logo),
            self.loader.load(&self.urls.nepenthes),
            self.loader.load(&self.urls.cactus)
        );
        BrandAssets {
            logo,
            nepenthes,
            cactus,
        }
    }

    /// Draw the header and watermark on the current page of `doc` and
    /// return it wrapped so that later pages are branded too.
    ///
    /// Missing assets are skipped and reported as degraded.
    pub async fn decorate<D: PdfDocument>(&self, mut doc: D) -> Outcome<Decorated<D>> {
        let assets = self.load_assets().await;

        let header_bottom = draw_header(&mut doc, &assets, &self.layout);
        if let Some(cactus) = &assets.cactus {
            draw_watermark(&mut doc, cactus, &self.layout);
        }

        let missing = assets.missing();
        let report = DecorationReport {
            assets: assets.clone(),
            header_bottom,
            content_start: header_bottom + self.layout.content_gap,
        };
        tracing::info!(
            header_bottom,
            content_start = report.content_start,
            missing = missing.len(),
            "Decorated document"
        );

        let decorated = Decorated {
            document: BrandedDocument::new(doc, assets, self.layout.clone()),
            report,
        };
        if missing.is_empty() {
            Outcome::Complete(decorated)
        } else {
            Outcome::degraded(
                decorated,
                format!("brand assets unavailable: {}", missing.join(", ")),
            )
        }
    }
}
