//! Header store configuration.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `value_separator` | `,` | Joins multiple values in `header_string` |
//! | `parser` | `ParserConfig::default()` | Reader settings for typed getters |
//!
//! ```
//! use herald_core::HeadersConfig;
//!
//! let config = HeadersConfig {
//!     value_separator: ';',
//!     ..Default::default()
//! };
//! assert!(config.parser.process_comments);
//! ```

use herald_http::ParserConfig;

/// Configuration for [`MutableHeaders`](crate::headers::MutableHeaders).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadersConfig {
    /// Character placed between values when a multi-valued header is read
    /// back as a single string.
    pub value_separator: char,

    /// Reader configuration used when typed getters parse raw values.
    pub parser: ParserConfig,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        HeadersConfig {
            value_separator: ',',
            parser: ParserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeadersConfig::default();
        assert_eq!(config.value_separator, ',');
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = HeadersConfig {
            value_separator: ';',
            ..Default::default()
        };
        assert_eq!(config.value_separator, ';');
        assert!(!config.parser.strip_filename_path);
    }
}
