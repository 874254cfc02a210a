//! Error types for bizobj-client.

/// Result type alias for bizobj-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bizobj-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error came from the server's error envelope or a
    /// synthesized HTTP-status envelope.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns true if this is a transport-level failure (network or timeout).
    pub fn is_transport_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout | ErrorKind::Connection(_))
    }

    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-supplied (or synthesized) error message, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { message, .. } => Some(message),
            ErrorKind::Http { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Application-level error: the server's `{type: "error"}` envelope, or a
    /// non-200 status synthesized into `HTTP status: <n>`, or a body that
    /// failed to parse as JSON.
    #[error("{message}")]
    Api { message: String, status: u16 },

    /// HTTP request failed below the envelope level.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let err = Error::new(ErrorKind::Api {
            message: "HTTP status: 500".to_string(),
            status: 500,
        });
        assert!(err.is_api_error());
        assert!(!err.is_transport_error());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), Some("HTTP status: 500"));
        assert_eq!(err.to_string(), "HTTP status: 500");
    }

    #[test]
    fn test_transport_error_predicates() {
        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_transport_error());
        assert_eq!(err.status(), None);

        let err = Error::new(ErrorKind::Connection("refused".to_string()));
        assert!(err.is_transport_error());
        assert!(!err.is_api_error());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::Api {
                    message: "No permission".into(),
                    status: 200,
                },
                "No permission",
            ),
            (
                ErrorKind::Http {
                    status: 502,
                    message: "Bad Gateway".into(),
                },
                "HTTP error: 502 Bad Gateway",
            ),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Json("unexpected EOF".into()),
                "JSON error: unexpected EOF",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("bad scheme".into()),
                "Configuration error: bad scheme",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("disk full");
        let err = Error::with_source(ErrorKind::Other("write failed".into()), source_err);

        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "write failed");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
