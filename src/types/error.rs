use thiserror::Error;

/// dishhub-admin error types
#[derive(Error, Debug)]
pub enum DishhubError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Server answered with a non-success status
    #[error("http error: {status} from {url}")]
    Http { status: u16, url: String },

    /// Response body was not the JSON we expected
    #[error("decode error: {0}")]
    Decode(String),

    /// A record's `created_at` could not be parsed
    #[error("unparsable timestamp: {0:?}")]
    Timestamp(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Form validation failed
    #[error("validation error: {0}")]
    Validation(String),

    /// Session file could not be read or written
    #[error("session error: {0}")]
    Session(String),
}

impl DishhubError {
    /// True for the errors that come out of an API call
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Http { .. } | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for DishhubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            Self::Fetch(err.to_string())
        }
    }
}

/// Result type alias for dishhub-admin
pub type Result<T> = std::result::Result<T, DishhubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DishhubError::Decode("expected array".into());
        assert_eq!(err.to_string(), "decode error: expected array");

        let err = DishhubError::Http {
            status: 502,
            url: "https://example.test/api/overview".into(),
        };
        assert_eq!(
            err.to_string(),
            "http error: 502 from https://example.test/api/overview"
        );
    }

    #[test]
    fn test_timestamp_error_quotes_input() {
        let err = DishhubError::Timestamp("not-a-date".into());
        assert_eq!(err.to_string(), "unparsable timestamp: \"not-a-date\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DishhubError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(DishhubError::Fetch("timeout".into()).is_fetch_failure());
        assert!(DishhubError::Decode("bad json".into()).is_fetch_failure());
        assert!(DishhubError::Http {
            status: 500,
            url: String::new()
        }
        .is_fetch_failure());
        assert!(!DishhubError::Timestamp("x".into()).is_fetch_failure());
        assert!(!DishhubError::Config("x".into()).is_fetch_failure());
    }
}
