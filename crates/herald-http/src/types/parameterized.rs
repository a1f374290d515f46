//! Generic `value; name=value` headers such as `Content-Disposition`.

use crate::config::ParserConfig;
use crate::error::{HeaderError, Result};
use crate::protocol::formatter::append_parameters;
use crate::protocol::parameters::read_parameters;
use crate::protocol::reader::{HeaderReader, HttpHeaderReader};
use crate::types::Parameters;
use std::fmt;
use std::str::FromStr;

/// A header value followed by parameters.
///
/// The value is the concatenation of every lexical unit before the first
/// `;`, so whitespace is dropped and quoted strings lose their quotes.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterizedHeader {
    value: String,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    parameters: Parameters,
}

impl ParameterizedHeader {
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>, parameters: Parameters) -> Self {
        ParameterizedHeader {
            value: value.into(),
            parameters,
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut value = String::new();
        while reader.has_next() && !reader.has_next_separator(';', false) {
            reader.next()?;
            value.push_str(reader.event_value());
        }
        let parameters = read_parameters(reader)?;
        Ok(ParameterizedHeader { value, parameters })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::from_header_value_with_config(value, &ParserConfig::default())
    }

    /// Parse with a custom reader configuration, e.g. to strip client paths
    /// from `filename`.
    pub fn from_header_value_with_config(value: &str, config: &ParserConfig) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::with_config(value, config))
            .map_err(|e| e.in_value("parameterized header", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut buffer = self.value.clone();
        append_parameters(&mut buffer, &self.parameters);
        buffer
    }
}

impl fmt::Display for ParameterizedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for ParameterizedHeader {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition() {
        let header: ParameterizedHeader = "attachment; filename=\"annual report.pdf\"; size=42"
            .parse()
            .unwrap();
        assert_eq!(header.value(), "attachment");
        assert_eq!(header.parameters().get("filename"), Some("annual report.pdf"));
        assert_eq!(
            header.to_header_value(),
            "attachment;filename=\"annual report.pdf\";size=42"
        );
    }

    #[test]
    fn test_value_concatenates_events() {
        let header = ParameterizedHeader::from_header_value("a / \"b c\" ;x=1").unwrap();
        assert_eq!(header.value(), "a/b c");
        assert_eq!(header.parameters().get("x"), Some("1"));

        let bare = ParameterizedHeader::from_header_value("  inline  ").unwrap();
        assert_eq!(bare.value(), "inline");
        assert!(bare.parameters().is_empty());
    }

    #[test]
    fn test_strip_filename_path() {
        let config = ParserConfig {
            strip_filename_path: true,
            ..Default::default()
        };
        let header = ParameterizedHeader::from_header_value_with_config(
            r#"form-data; name="upload"; filename="C:\tmp\a.txt""#,
            &config,
        )
        .unwrap();
        assert_eq!(header.parameters().get("filename"), Some("a.txt"));
        assert_eq!(header.parameters().get("name"), Some("upload"));
    }

    #[test]
    fn test_errors() {
        assert!(ParameterizedHeader::from_header_value("a; b").is_err());
        assert!(ParameterizedHeader::from_header_value("\"open").is_err());
    }
}
