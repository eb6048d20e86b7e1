//! Scripted in-memory transport.
//!
//! Used by this crate's tests and by downstream crates that need a
//! deterministic network. Unknown targets answer 404.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hoa_core::{Error, Result};

use crate::transport::{Transport, TransportResponse};

#[derive(Debug, Clone)]
enum MockReply {
    Response(TransportResponse),
    NetworkError(String),
}

/// Transport returning canned responses and recording every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    latency: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Creates a transport where every target answers 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `target` with `status` and `body`.
    pub fn with_response(mut self, target: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.replies.insert(
            target.to_string(),
            MockReply::Response(TransportResponse {
                status,
                content_type: None,
                body: body.into(),
            }),
        );
        self
    }

    /// Answer `target` with 200 and a JSON body.
    pub fn with_json(self, target: &str, value: &serde_json::Value) -> Self {
        self.with_response(target, 200, value.to_string())
    }

    /// Answer `target` with 200, a body, and a content type.
    pub fn with_typed_body(
        mut self,
        target: &str,
        content_type: &str,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.replies.insert(
            target.to_string(),
            MockReply::Response(TransportResponse {
                status: 200,
                content_type: Some(content_type.to_string()),
                body: body.into(),
            }),
        );
        self
    }

    /// Fail `target` without a response.
    pub fn with_network_error(mut self, target: &str, message: &str) -> Self {
        self.replies.insert(
            target.to_string(),
            MockReply::NetworkError(message.to_string()),
        );
        self
    }

    /// Delay every reply, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every requested target, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// How many times `target` was requested.
    pub fn request_count(&self, target: &str) -> usize {
        self.requests().iter().filter(|t| *t == target).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, target: &str) -> Result<TransportResponse> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(target.to_string());
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.replies.get(target) {
            Some(MockReply::Response(response)) => Ok(response.clone()),
            Some(MockReply::NetworkError(message)) => Err(Error::fetch_network(target, message)),
            None => Ok(TransportResponse {
                status: 404,
                content_type: None,
                body: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_target_is_404() {
        let transport = MockTransport::new();
        let response = transport.get("nope").await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(transport.requests(), vec!["nope".to_string()]);
    }

    #[tokio::test]
    async fn test_scripted_replies() {
        let transport = MockTransport::new()
            .with_json("a", &serde_json::json!({"k": 1}))
            .with_network_error("b", "reset");

        assert_eq!(transport.get("a").await.unwrap().body, br#"{"k":1}"#);
        assert!(matches!(
            transport.get("b").await,
            Err(Error::Network { .. })
        ));
        assert_eq!(transport.request_count("a"), 1);
    }
}
