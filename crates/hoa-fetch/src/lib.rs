//! Data fetching for Hydro Oasis calculator pages.
//!
//! Pages load tariffs, presets, and recommendation text by relative path.
//! When a page is opened from a repository preview those paths often do not
//! resolve, so this crate retries them against public mirrors of the same
//! repository content.
//!
//! # Modules
//!
//! - [`transport`]: The [`Transport`] trait and its `reqwest` implementation
//! - [`mirrors`]: Mirror base expansion and candidate URL lists
//! - [`fetcher`]: [`MirroredFetcher`], the ordered fallback loop
//! - [`mock`]: Scripted transport for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hoa_core::{HoaConfig, PageLocation, PageSession};
//! use hoa_fetch::{MirroredFetcher, ReqwestTransport};
//!
//! # async fn run() -> hoa_core::Result<()> {
//! let config = HoaConfig::default();
//! let location = PageLocation::parse("https://github.com/acme/hoa/blob/main/calculators/ec/index.html")?;
//! let transport = ReqwestTransport::new()?.with_base(&location);
//! let session = Arc::new(PageSession::from_config(Some(location), &config));
//!
//! let fetcher = MirroredFetcher::new(session, Arc::new(transport), &config.mirrors);
//! let tariffs: serde_json::Value = fetcher.fetch_json("../../data/electricity_tariffs.json").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fetcher;
pub mod mirrors;
pub mod mock;
pub mod transport;

pub use fetcher::{AssetPayload, MirroredFetcher};
pub use mock::MockTransport;
pub use transport::{ReqwestTransport, Transport, TransportResponse};
