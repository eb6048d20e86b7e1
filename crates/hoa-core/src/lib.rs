//! Hydro Oasis core: shared types, errors, configuration, and page context.
//!
//! This crate provides the foundational types used across all `hoa-*`
//! crates. It has no internal dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`outcome`]: Explicit result type for best-effort operations
//! - [`config`]: Compiled-in defaults and TOML overrides
//! - [`catalog`]: The fixed data resources calculator pages load
//! - [`preview`]: Preview-host detection and repository context parsing
//! - [`session`]: Per-page session holding memoized page context

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod outcome;
pub mod preview;
pub mod session;

// Re-export key types at crate root for convenience
pub use catalog::{DataAsset, PayloadKind};
pub use config::HoaConfig;
pub use error::{Error, Result};
pub use outcome::Outcome;
pub use preview::{PageContext, PageLocation, PreviewContext, PreviewDetector};
pub use session::PageSession;
