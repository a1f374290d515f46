//! Error types for header store and response operations.

use herald_http::HeaderError;
use std::io;
use thiserror::Error;

/// Result type for header store and response operations.
pub type Result<T> = std::result::Result<T, MessageError>;

/// Errors that can occur while reading typed headers or writing a response.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MessageError {
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),

    #[error("Too many values for header '{name}': {values}")]
    TooManyValues { name: String, values: String },

    #[error("Unable to parse header '{name}' value '{value}': {reason}")]
    UnableToParse {
        name: String,
        value: String,
        reason: String,
    },

    #[error("No message body worker for entity of type {type_name} and media type {media_type}")]
    NoWorker {
        type_name: String,
        media_type: String,
    },

    #[error("Entity is not a {0}")]
    EntityType(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),
}

impl MessageError {
    /// Wrap a failed conversion of a single header value.
    #[must_use]
    pub fn unable_to_parse(name: &str, value: &str, reason: impl ToString) -> Self {
        MessageError::UnableToParse {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error came from a malformed header value.
    #[inline]
    #[must_use]
    pub fn is_header_value_error(&self) -> bool {
        matches!(
            self,
            MessageError::Header(_)
                | MessageError::TooManyValues { .. }
                | MessageError::UnableToParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unable_to_parse_display() {
        let err = MessageError::unable_to_parse("ETag", "nope", "bad tag");
        assert_eq!(
            err.to_string(),
            "Unable to parse header 'ETag' value 'nope': bad tag"
        );
        assert!(err.is_header_value_error());
    }

    #[test]
    fn test_invalid_header_value_conversion() {
        let err: MessageError = http::HeaderValue::from_str("a\nb").unwrap_err().into();
        assert!(matches!(err, MessageError::InvalidHeaderValue(_)));
        assert!(!err.is_header_value_error());
    }

    #[test]
    fn test_io_conversion() {
        let err: MessageError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, MessageError::Io(_)));
    }
}
