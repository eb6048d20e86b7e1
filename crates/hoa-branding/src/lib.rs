//! Hydro Oasis branding for generated PDF reports.
//!
//! [`Branding::decorate`] fetches the logo and two mascot images, draws a
//! centered header and a corner watermark on the current page, and wraps
//! the document so every page added afterwards is decorated the same way.
//!
//! # Modules
//!
//! - [`document`]: The [`PdfDocument`] contract
//! - [`assets`]: Memoized brand image loading
//! - [`layout`]: Header and watermark drawing
//! - [`branded`]: [`BrandedDocument`], the page-branding wrapper
//! - [`decorator`]: [`Branding`], the entry point
//! - [`recording`]: [`RecordingDocument`], an in-memory document
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hoa_branding::{AssetLoader, Branding, PdfDocument, RecordingDocument};
//! use hoa_core::HoaConfig;
//! use hoa_fetch::ReqwestTransport;
//!
//! # async fn run() -> hoa_core::Result<()> {
//! let config = HoaConfig::default();
//! let loader = Arc::new(AssetLoader::new(Arc::new(ReqwestTransport::new()?)));
//! let branding = Branding::new(loader, &config.branding);
//!
//! let decorated = branding.decorate(RecordingDocument::a4()).await.into_value();
//! let mut doc = decorated.document;
//! doc.text("Nutrient plan", 14.0, decorated.report.content_start);
//! doc.add_page();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assets;
pub mod branded;
pub mod decorator;
pub mod document;
pub mod layout;
pub mod recording;

pub use assets::{AssetLoader, BrandAsset, BrandAssets};
pub use branded::BrandedDocument;
pub use decorator::{Branding, Decorated, DecorationReport};
pub use document::{FontSpec, PdfDocument};
pub use recording::{DrawOp, RecordingDocument};
