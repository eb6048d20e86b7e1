//! Error types shared by the Hydro Oasis helper crates.

/// Errors that can occur while fetching, storing, or configuring helpers.
///
/// Only fetch exhaustion is expected to reach page-level callers. The other
/// variants are produced inside best-effort operations and are normally
/// folded into an [`Outcome::Degraded`](crate::Outcome::Degraded) before
/// they leave the crate that raised them.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A fetch completed but the server answered with a non-success status.
    #[error("Fetch failed: {target} (HTTP {status})")]
    HttpStatus {
        /// The URL or path that was requested
        target: String,
        /// HTTP status code returned
        status: u16,
    },

    /// A fetch could not complete (DNS, connection, TLS, body read).
    #[error("Fetch failed: {target} ({message})")]
    Network {
        /// The URL or path that was requested
        target: String,
        /// Transport-level description of the failure
        message: String,
    },

    /// No candidate produced a response and no error was recorded.
    #[error("Unable to fetch {path}")]
    Unavailable {
        /// The resource path the caller asked for
        path: String,
    },

    /// A success response whose body could not be decoded.
    #[error("Failed to decode {target}: {message}")]
    Decode {
        /// The URL or path whose body was rejected
        target: String,
        /// Decoder message
        message: String,
    },

    /// Backing storage rejected a read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The page location could not be parsed as a URL.
    #[error("Invalid page location: {message}")]
    InvalidLocation {
        /// Parser message
        message: String,
    },
}

/// Convenience `Result` type alias for helper operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a non-success status error for `target`.
    pub fn fetch_status<S: Into<String>>(target: S, status: u16) -> Self {
        Error::HttpStatus {
            target: target.into(),
            status,
        }
    }

    /// Creates a transport failure error for `target`.
    pub fn fetch_network<S, M>(target: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Error::Network {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates the generic "unable to fetch" error.
    pub fn unavailable<S: Into<String>>(path: S) -> Self {
        Error::Unavailable { path: path.into() }
    }

    /// Creates a body decoding error for `target`.
    pub fn decode<S, M>(target: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Error::Decode {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether another source may still succeed after this error.
    ///
    /// Fetch and decode failures are tied to a single candidate URL, so the
    /// mirrored fetcher moves on to the next one. Everything else describes
    /// local state that a different mirror cannot fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::HttpStatus { .. } => true,
            Error::Network { .. } => true,
            Error::Decode { .. } => true,
            Error::Unavailable { .. } => false,
            Error::Storage { .. } => false,
            Error::Serialization(_) => false,
            Error::Io(_) => false,
            Error::Config { .. } => false,
            Error::InvalidLocation { .. } => false,
        }
    }

    /// The URL or path this error names, if it is tied to one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { target, .. }
            | Error::Network { target, .. }
            | Error::Decode { target, .. } => Some(target),
            Error::Unavailable { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_display_names_target() {
        let err = Error::fetch_status("../../data/water_providers.json", 404);
        assert_eq!(
            err.to_string(),
            "Fetch failed: ../../data/water_providers.json (HTTP 404)"
        );
    }

    #[test]
    fn test_unavailable_display() {
        let err = Error::unavailable("data/x.json");
        assert_eq!(err.to_string(), "Unable to fetch data/x.json");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::fetch_status("a", 500).is_recoverable());
        assert!(Error::fetch_network("a", "connection refused").is_recoverable());
        assert!(Error::decode("a", "expected value").is_recoverable());
        assert!(!Error::storage("quota exceeded").is_recoverable());
        assert!(!Error::config("bad template").is_recoverable());
    }

    #[test]
    fn test_target_accessor() {
        assert_eq!(Error::fetch_status("x", 500).target(), Some("x"));
        assert_eq!(Error::unavailable("y").target(), Some("y"));
        assert_eq!(Error::storage("z").target(), None);
    }

    #[test]
    fn test_serde_error_converts() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
