//! HTTP transport abstraction.
//!
//! The fetcher only needs "GET this URL and tell me the status and body".
//! [`Transport`] captures that, [`ReqwestTransport`] implements it over
//! `reqwest`, and [`MockTransport`](crate::mock::MockTransport) scripts it
//! for tests.

use async_trait::async_trait;
use hoa_core::{Error, PageLocation, Result};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use url::Url;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("hoa/", env!("CARGO_PKG_VERSION"));

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: None,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
///
/// Implementations return `Err` only when no response was received; a
/// response with an error status is still `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `target`, an absolute URL or a page-relative path.
    async fn get(&self, target: &str) -> Result<TransportResponse>;
}

/// `reqwest`-backed transport with caching disabled.
///
/// Relative targets are resolved against the page location given to
/// [`ReqwestTransport::with_base`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Option<Url>,
}

impl ReqwestTransport {
    /// Creates a transport that only accepts absolute URLs.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base: None })
    }

    /// Resolve relative targets against `location`.
    pub fn with_base(mut self, location: &PageLocation) -> Self {
        self.base = Some(location.url().clone());
        self
    }

    fn resolve(&self, target: &str) -> Result<Url> {
        match Url::parse(target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base
                    .join(target)
                    .map_err(|e| Error::fetch_network(target, e.to_string())),
                None => Err(Error::fetch_network(
                    target,
                    "relative path requires a page location",
                )),
            },
            Err(e) => Err(Error::fetch_network(target, e.to_string())),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, target: &str) -> Result<TransportResponse> {
        let url = self.resolve(target)?;

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| Error::fetch_network(target, e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::fetch_network(target, format!("body read failed: {e}")))?
            .to_vec();

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
