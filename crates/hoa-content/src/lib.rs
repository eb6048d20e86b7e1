//! Content rendering for Hydro Oasis calculator pages.
//!
//! Recommendation documents are stored as markdown in the repository and
//! rendered into the page as HTML. This crate holds that converter.
//!
//! # Modules
//!
//! - [`markdown`]: The fixed markdown-subset to HTML pipeline

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod markdown;

pub use markdown::{escape_html, md_to_html};
