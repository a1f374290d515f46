//! Configuration for the header reader.

/// Configuration for [`HttpHeaderReader`](crate::protocol::HttpHeaderReader)
/// and the parameter reader built on top of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Treat `(` as the start of a (possibly nested) comment.
    ///
    /// When disabled, a `(` in the input is a parse failure.
    pub process_comments: bool,
    /// Keep only the part after the last `\` of a `filename` parameter.
    ///
    /// Some user agents send the full client-side path in
    /// `Content-Disposition`; backslashes are preserved while reading the
    /// value so the path can be cut at the last separator.
    pub strip_filename_path: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            process_comments: true,
            strip_filename_path: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert!(config.process_comments);
        assert!(!config.strip_filename_path);
    }

    #[test]
    fn test_partial_override() {
        let config = ParserConfig {
            strip_filename_path: true,
            ..Default::default()
        };
        assert!(config.process_comments);
        assert!(config.strip_filename_path);
    }
}
