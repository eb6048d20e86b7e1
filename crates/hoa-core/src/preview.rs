//! Preview-host detection and repository context parsing.
//!
//! Calculator pages are normally served from the project's own domain, where
//! relative data paths resolve directly. When a page is opened from a
//! repository preview (a GitHub blob view, a raw-content host, a githack
//! proxy) relative paths no longer point at the data files, so the fetcher
//! needs to know which repository and branch the page came from.
//!
//! # Example
//!
//! ```
//! use hoa_core::preview::{PageLocation, PreviewContext, PreviewDetector};
//!
//! let detector = PreviewDetector::new(PreviewContext::canonical())
//!     .with_host_patterns(&["raw.githubusercontent.com"])
//!     .with_content_markers(&["calculators"]);
//!
//! let location = PageLocation::parse(
//!     "https://raw.githubusercontent.com/acme/hoa/refs/heads/feature/ph/calculators/ec/index.html",
//! )
//! .unwrap();
//!
//! let page = detector.detect(&location).into_value();
//! assert!(page.is_preview());
//! assert_eq!(page.context().branch, "feature/ph");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::PreviewConfig;
use crate::error::{Error, Result};
use crate::outcome::Outcome;

/// Leading path segments inserted by repository viewers before the branch.
const VIEWER_SEGMENTS: [&str; 3] = ["blob", "raw", "tree"];

/// Repository coordinates a page was served from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewContext {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch name, possibly containing `/`
    pub branch: String,
}

impl PreviewContext {
    /// Creates a context from its three parts.
    pub fn new<O, R, B>(owner: O, repo: R, branch: B) -> Self
    where
        O: Into<String>,
        R: Into<String>,
        B: Into<String>,
    {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// The production repository.
    pub fn canonical() -> Self {
        Self::new("hydro-oasis", "hoa-calculators", "main")
    }

    /// Whether the branch name spans several path segments.
    pub fn has_nested_branch(&self) -> bool {
        self.branch.contains('/')
    }
}

impl Default for PreviewContext {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for PreviewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Where the current page was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parse an absolute page URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::InvalidLocation {
            message: format!("{raw}: {e}"),
        })?;
        Ok(Self { url })
    }

    /// The underlying URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host name, lowercased by the URL parser.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Non-empty path segments, in order.
    pub fn path_segments(&self) -> Vec<&str> {
        self.url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Resolve a page-relative reference against this location.
    pub fn join(&self, reference: &str) -> Result<Url> {
        self.url.join(reference).map_err(|e| Error::InvalidLocation {
            message: format!("{reference}: {e}"),
        })
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Whether a page runs from the canonical site or from a preview host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "context", rename_all = "lowercase")]
pub enum PageContext {
    /// Served from the project's own domain
    Canonical(PreviewContext),
    /// Served from a preview host
    Preview(PreviewContext),
}

impl PageContext {
    /// The repository coordinates in effect.
    pub fn context(&self) -> &PreviewContext {
        match self {
            PageContext::Canonical(ctx) | PageContext::Preview(ctx) => ctx,
        }
    }

    /// Whether mirror fallback applies.
    pub fn is_preview(&self) -> bool {
        matches!(self, PageContext::Preview(_))
    }
}

/// Recognizes preview hosts and extracts repository coordinates.
#[derive(Debug, Clone)]
pub struct PreviewDetector {
    canonical: PreviewContext,
    host_patterns: Vec<String>,
    content_markers: Vec<String>,
}

impl PreviewDetector {
    /// Creates a detector with no host patterns, so every page is canonical.
    pub fn new(canonical: PreviewContext) -> Self {
        Self {
            canonical,
            host_patterns: vec![],
            content_markers: vec![],
        }
    }

    /// Builds a detector from configuration.
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            canonical: config.canonical.clone(),
            host_patterns: config
                .host_patterns
                .iter()
                .map(|p| p.to_ascii_lowercase())
                .collect(),
            content_markers: config.content_markers.clone(),
        }
    }

    /// Set the host names (or parent domains) that serve previews.
    pub fn with_host_patterns(mut self, patterns: &[&str]) -> Self {
        self.host_patterns = patterns.iter().map(|p| p.to_ascii_lowercase()).collect();
        self
    }

    /// Set the top-level directory names that end the branch segment run.
    pub fn with_content_markers(mut self, markers: &[&str]) -> Self {
        self.content_markers = markers.iter().map(|m| (*m).to_string()).collect();
        self
    }

    /// The fallback context.
    pub fn canonical(&self) -> &PreviewContext {
        &self.canonical
    }

    /// Whether `host` matches a preview pattern exactly or as a subdomain.
    pub fn is_preview_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.host_patterns.iter().any(|pattern| {
            host == *pattern
                || host
                    .strip_suffix(pattern.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Classify a page location.
    ///
    /// A preview URL that does not have the expected shape still counts as
    /// preview mode, but with the canonical coordinates; the outcome is then
    /// degraded and a warning is logged.
    pub fn detect(&self, location: &PageLocation) -> Outcome<PageContext> {
        let Some(host) = location.host() else {
            return Outcome::Complete(PageContext::Canonical(self.canonical.clone()));
        };
        if !self.is_preview_host(host) {
            return Outcome::Complete(PageContext::Canonical(self.canonical.clone()));
        }

        match self.parse_segments(&location.path_segments()) {
            Some(context) => {
                tracing::debug!(%context, "Detected preview context");
                Outcome::Complete(PageContext::Preview(context))
            }
            None => {
                tracing::warn!(
                    location = %location,
                    "Unable to infer repository context from preview URL, using canonical"
                );
                Outcome::degraded(
                    PageContext::Preview(self.canonical.clone()),
                    format!("unrecognized preview URL shape: {location}"),
                )
            }
        }
    }

    /// Extract owner, repo and branch from preview path segments.
    ///
    /// Expected shape: `owner/repo[/blob|raw|tree][/refs/heads]/<branch...>/<marker>/...`
    pub fn parse_segments(&self, segments: &[&str]) -> Option<PreviewContext> {
        let [owner, repo, rest @ ..] = segments else {
            return None;
        };
        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        let mut rest = rest;
        if let Some((first, tail)) = rest.split_first()
            && VIEWER_SEGMENTS.contains(first)
        {
            rest = tail;
        }
        if let [first, second, tail @ ..] = rest
            && *first == "refs"
            && *second == "heads"
        {
            rest = tail;
        }

        let marker = rest
            .iter()
            .position(|segment| self.content_markers.iter().any(|m| m == segment))?;
        if marker == 0 {
            return None;
        }

        Some(PreviewContext::new(*owner, *repo, rest[..marker].join("/")))
    }
}
