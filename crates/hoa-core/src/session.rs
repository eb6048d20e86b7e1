//! Per-page session state.
//!
//! A [`PageSession`] is created once when a page loads and dropped on
//! navigation. It owns the page location and memoizes the detected
//! [`PageContext`], so detection (and its warning on a malformed preview
//! URL) happens at most once per page.

use std::sync::OnceLock;

use crate::config::HoaConfig;
use crate::outcome::Outcome;
use crate::preview::{PageContext, PageLocation, PreviewDetector};

/// Page-lifetime context shared by the fetcher and other helpers.
#[derive(Debug)]
pub struct PageSession {
    location: Option<PageLocation>,
    detector: PreviewDetector,
    detected: OnceLock<Outcome<PageContext>>,
}

impl PageSession {
    /// Creates a session for a page served from `location`.
    pub fn new(location: PageLocation, detector: PreviewDetector) -> Self {
        Self {
            location: Some(location),
            detector,
            detected: OnceLock::new(),
        }
    }

    /// Creates a session with no page location; it is always canonical.
    pub fn detached(detector: PreviewDetector) -> Self {
        Self {
            location: None,
            detector,
            detected: OnceLock::new(),
        }
    }

    /// Creates a session using the configured preview detection.
    pub fn from_config(location: Option<PageLocation>, config: &HoaConfig) -> Self {
        let detector = PreviewDetector::from_config(&config.preview);
        match location {
            Some(location) => Self::new(location, detector),
            None => Self::detached(detector),
        }
    }

    /// The page location, if known.
    pub fn location(&self) -> Option<&PageLocation> {
        self.location.as_ref()
    }

    /// The detection outcome, computed on first access.
    pub fn detection(&self) -> &Outcome<PageContext> {
        self.detected.get_or_init(|| match &self.location {
            Some(location) => self.detector.detect(location),
            None => Outcome::Complete(PageContext::Canonical(self.detector.canonical().clone())),
        })
    }

    /// The page context in effect, whether or not detection degraded.
    pub fn page_context(&self) -> &PageContext {
        self.detection().value()
    }

    /// Whether the page runs from a preview host.
    pub fn is_preview(&self) -> bool {
        self.page_context().is_preview()
    }
}
