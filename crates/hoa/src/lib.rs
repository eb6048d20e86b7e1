//! Hydro Oasis calculator helpers.
//!
//! This crate re-exports the `hoa-*` components and adds [`HoaPage`], the
//! per-page session that wires them together.
//!
//! # Example
//!
//! ```rust,no_run
//! use hoa::{DataAsset, HoaConfig, HoaPage, PageLocation};
//!
//! # async fn run() -> hoa::core::Result<()> {
//! let location = PageLocation::parse("https://calculators.hydro-oasis.com.au/calculators/ventilation/")?;
//! let page = HoaPage::open(HoaConfig::load(None)?, Some(location))?;
//!
//! let html = page.load_recommendation(DataAsset::VentilationRecommendations).await?;
//! page.push_harvest(&serde_json::json!({"calc": "ventilation", "html_len": html.len()}));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod page;

pub use hoa_branding as branding;
pub use hoa_content as content;
pub use hoa_core as core;
pub use hoa_fetch as fetch;
pub use hoa_harvest as harvest;

pub use hoa_core::{DataAsset, Error, HoaConfig, Outcome, PageContext, PageLocation, Result};
pub use page::HoaPage;
