//! Mirrored fetch resolution.
//!
//! [`MirroredFetcher`] turns a page-relative resource path into fetched JSON
//! or text. On the canonical site it issues exactly one request for the
//! path. On a preview host it walks the candidate list from
//! [`mirrors`](crate::mirrors) strictly in order, one request at a time,
//! and returns the first candidate that answers 2xx with a decodable body.
//!
//! When every candidate fails, the error from the last attempt is returned.

use std::sync::{Arc, OnceLock};

use hoa_core::config::{MirrorConfig, MirrorTemplate};
use hoa_core::{DataAsset, Error, PageSession, PayloadKind, Result};
use serde::de::DeserializeOwned;

use crate::mirrors::{candidate_urls, mirror_bases};
use crate::transport::Transport;

/// Decoded payload of a catalog resource.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetPayload {
    /// A JSON resource
    Json(serde_json::Value),
    /// A markdown resource, undecoded
    Markdown(String),
}

/// Page-scoped fetcher with mirror fallback.
pub struct MirroredFetcher {
    session: Arc<PageSession>,
    transport: Arc<dyn Transport>,
    templates: Vec<MirrorTemplate>,
    bases: OnceLock<Vec<String>>,
}

impl MirroredFetcher {
    /// Creates a fetcher for the page described by `session`.
    pub fn new(
        session: Arc<PageSession>,
        transport: Arc<dyn Transport>,
        mirrors: &MirrorConfig,
    ) -> Self {
        Self {
            session,
            transport,
            templates: mirrors.templates.clone(),
            bases: OnceLock::new(),
        }
    }

    /// The page session this fetcher resolves against.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Mirror bases for the page's context, computed once.
    ///
    /// Empty outside preview mode.
    pub fn mirror_bases(&self) -> &[String] {
        self.bases.get_or_init(|| {
            let page = self.session.page_context();
            if !page.is_preview() {
                return Vec::new();
            }
            let bases = mirror_bases(page.context(), &self.templates);
            tracing::debug!(context = %page.context(), count = bases.len(), "Computed mirror bases");
            bases
        })
    }

    /// The ordered URLs that would be tried for `path`.
    pub fn candidates(&self, path: &str) -> Vec<String> {
        if self.session.is_preview() {
            candidate_urls(path, self.mirror_bases())
        } else {
            vec![path.to_string()]
        }
    }

    /// Fetch `path` and deserialize it as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch_with(path, |target, body| {
            serde_json::from_slice(&body).map_err(|e| Error::decode(target, e.to_string()))
        })
        .await
    }

    /// Fetch `path` as UTF-8 text.
    pub async fn fetch_text(&self, path: &str) -> Result<String> {
        self.fetch_with(path, |target, body| {
            String::from_utf8(body).map_err(|e| Error::decode(target, e.to_string()))
        })
        .await
    }

    /// Fetch a catalog resource, decoding it according to its kind.
    pub async fn fetch_asset(&self, asset: DataAsset) -> Result<AssetPayload> {
        match asset.kind() {
            PayloadKind::Json => self.fetch_json(asset.path()).await.map(AssetPayload::Json),
            PayloadKind::Markdown => self.fetch_text(asset.path()).await.map(AssetPayload::Markdown),
        }
    }

    async fn fetch_with<T, F>(&self, path: &str, decode: F) -> Result<T>
    where
        F: Fn(&str, Vec<u8>) -> Result<T>,
    {
        let candidates = self.candidates(path);
        let mut last_error = None;

        for (index, target) in candidates.iter().enumerate() {
            tracing::debug!(url = %target, attempt = index + 1, of = candidates.len(), "Fetching");
            match self.attempt(target, &decode).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(url = %target, error = %e, "Candidate failed");
                    last_error = Some(e);
                }
            }
        }

        if candidates.len() > 1 {
            tracing::warn!(path, attempts = candidates.len(), "All fetch mirrors failed");
        }
        Err(last_error.unwrap_or_else(|| Error::unavailable(path)))
    }

    async fn attempt<T, F>(&self, target: &str, decode: &F) -> Result<T>
    where
        F: Fn(&str, Vec<u8>) -> Result<T>,
    {
        let response = self.transport.get(target).await?;
        if !response.is_success() {
            return Err(Error::fetch_status(target, response.status));
        }
        decode(target, response.body)
    }
}

impl std::fmt::Debug for MirroredFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirroredFetcher")
            .field("page", self.session.page_context())
            .field("templates", &self.templates.len())
            .finish()
    }
}
