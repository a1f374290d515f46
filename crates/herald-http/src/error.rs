//! Error types for header parsing and formatting.

use std::borrow::Cow;
use std::num::ParseIntError;
use thiserror::Error;

/// Result type for header codec operations.
pub type Result<T> = std::result::Result<T, HeaderError>;

/// A grammar violation found while scanning a header value.
///
/// Carries the byte index at which the reader gave up, so callers can point
/// at the offending character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at index {index})")]
pub struct ParseError {
    message: Cow<'static, str>,
    index: usize,
}

impl ParseError {
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>, index: usize) -> Self {
        ParseError {
            message: message.into(),
            index,
        }
    }

    /// The "End of header" failure raised when the input is exhausted.
    #[inline]
    #[must_use]
    pub fn end_of_header(index: usize) -> Self {
        Self::new("End of header", index)
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Errors that can occur while reading or writing typed header values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeaderError {
    #[error("Header parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid {kind} header value '{value}': {source}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl HeaderError {
    /// Wrap a grammar failure as an illegal value for the given header kind.
    #[must_use]
    pub fn invalid(kind: &'static str, value: &str, source: ParseError) -> Self {
        HeaderError::InvalidValue {
            kind,
            value: value.to_string(),
            source,
        }
    }

    /// Attach the header kind and full value to a bare grammar failure.
    #[must_use]
    pub fn in_value(self, kind: &'static str, value: &str) -> Self {
        match self {
            HeaderError::Parse(source) => HeaderError::invalid(kind, value, source),
            other => other,
        }
    }

    /// Index of the offending character, when the failure came from the grammar.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            HeaderError::Parse(e) | HeaderError::InvalidValue { source: e, .. } => Some(e.index()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::end_of_header(7);
        assert_eq!(err.to_string(), "End of header (at index 7)");
        assert_eq!(err.index(), 7);
    }

    #[test]
    fn test_invalid_value_keeps_index() {
        let err = HeaderError::invalid("media type", "text/", ParseError::end_of_header(5));
        assert_eq!(err.index(), Some(5));
        assert!(err.to_string().contains("media type"));
    }

    #[test]
    fn test_in_value_wraps_only_grammar_failures() {
        let err = HeaderError::from(ParseError::new("boom", 2)).in_value("link", "<x");
        assert!(matches!(err, HeaderError::InvalidValue { kind: "link", .. }));

        let err = HeaderError::InvalidDate("x".into()).in_value("link", "<x");
        assert!(matches!(err, HeaderError::InvalidDate(_)));
    }

    #[test]
    fn test_number_error_has_no_index() {
        let err: HeaderError = "x".parse::<i32>().unwrap_err().into();
        assert_eq!(err.index(), None);
    }
}
