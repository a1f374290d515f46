//! Web links (`Link` header, RFC 8288).

use crate::error::{HeaderError, ParseError, Result};
use crate::protocol::constants::params;
use crate::protocol::formatter::append_quoted;
use crate::protocol::parameters::read_parameters;
use crate::protocol::reader::{HeaderReader, HttpHeaderReader};
use crate::types::Parameters;
use std::fmt;
use std::str::FromStr;

/// A link: target URI plus parameters such as `rel` and `title`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    uri: String,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    params: Parameters,
}

impl Link {
    #[inline]
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Link {
            uri: uri.into(),
            params: Parameters::new(),
        }
    }

    #[must_use]
    pub fn builder(uri: impl Into<String>) -> LinkBuilder {
        LinkBuilder::new(uri)
    }

    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn rel(&self) -> Option<&str> {
        self.params.get(params::REL)
    }

    /// The whitespace separated relation types of `rel`.
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.rel().into_iter().flat_map(str::split_whitespace)
    }

    /// Whether `rel` lists the given relation type (case-insensitive).
    #[must_use]
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels().any(|r| r.eq_ignore_ascii_case(rel))
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.params.get(params::TITLE)
    }

    #[inline]
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.params.get(params::TYPE)
    }

    /// Read `<uri>` followed by `;name=value` parameters.
    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let uri = reader.next_separated_string('<', '>')?;
        let params = read_parameters(reader)?;
        Ok(Link { uri, params })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        let mut reader = HttpHeaderReader::new(value);
        let link = Self::read(&mut reader).map_err(|e| e.in_value("link", value))?;
        if reader.has_next() {
            return Err(HeaderError::invalid(
                "link",
                value,
                ParseError::new("Unexpected content after link", reader.index()),
            ));
        }
        Ok(link)
    }

    /// `<uri>; name="value"...`, every value quoted.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut buffer = format!("<{}>", self.uri);
        for (name, value) in self.params.iter() {
            buffer.push_str("; ");
            buffer.push_str(name);
            buffer.push('=');
            append_quoted(&mut buffer, value);
        }
        buffer
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for Link {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// Incremental construction of a [`Link`].
#[derive(Clone, Debug)]
pub struct LinkBuilder {
    link: Link,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        LinkBuilder {
            link: Link::new(uri),
        }
    }

    /// Add a relation type; repeated calls accumulate space separated.
    #[must_use]
    pub fn rel(mut self, rel: &str) -> Self {
        let rels = match self.link.params.get(params::REL) {
            Some(existing) => format!("{existing} {rel}"),
            None => rel.to_string(),
        };
        self.link.params.insert(params::REL, rels);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.link.params.insert(params::TITLE, title);
        self
    }

    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.link.params.insert(params::TYPE, media_type);
        self
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.link.params.insert(name, value);
        self
    }

    #[must_use]
    pub fn build(self) -> Link {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link() {
        let link: Link = "<http://example.com/TheBook/chapter2>; rel=\"previous\"; title=\"previous chapter\""
            .parse()
            .unwrap();
        assert_eq!(link.uri(), "http://example.com/TheBook/chapter2");
        assert_eq!(link.rel(), Some("previous"));
        assert_eq!(link.title(), Some("previous chapter"));
        assert_eq!(
            link.to_header_value(),
            "<http://example.com/TheBook/chapter2>; rel=\"previous\"; title=\"previous chapter\""
        );
    }

    #[test]
    fn test_token_values_and_whitespace() {
        let err = Link::from_header_value("  <a?b=1,2>;rel=next ;  type=text/html").unwrap_err();
        assert!(matches!(err, HeaderError::InvalidValue { kind: "link", .. }));

        let link = Link::from_header_value("<a?b=1,2>;rel=next ;  type=\"text/html\"").unwrap();
        assert_eq!(link.uri(), "a?b=1,2");
        assert_eq!(link.media_type(), Some("text/html"));
    }

    #[test]
    fn test_invalid_links() {
        for bad in ["", "http://x", "<>", "<http://x", "<x> junk", "<x>; rel"] {
            assert!(Link::from_header_value(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_rels() {
        let link = Link::builder("/next").rel("next").rel("Prefetch").build();
        assert_eq!(link.rel(), Some("next Prefetch"));
        assert_eq!(link.rels().collect::<Vec<_>>(), vec!["next", "Prefetch"]);
        assert!(link.has_rel("prefetch"));
        assert!(!link.has_rel("prev"));
    }

    #[test]
    fn test_backslash_in_title() {
        let link = Link::builder("/x").title(r"C:\dir").build();
        let text = link.to_header_value();
        assert_eq!(text, r#"</x>; title="C:\\dir""#);
        assert_eq!(Link::from_header_value(&text).unwrap().title(), Some(r"C:\dir"));
    }

    #[test]
    fn test_builder_round_trip() {
        let link = Link::builder("http://example.com/a")
            .rel("self")
            .title("The \"A\" page")
            .media_type("text/html")
            .param("hreflang", "en")
            .build();
        let text = link.to_string();
        assert_eq!(
            text,
            "<http://example.com/a>; rel=\"self\"; title=\"The \\\"A\\\" page\"; type=\"text/html\"; hreflang=\"en\""
        );
        assert_eq!(Link::from_header_value(&text).unwrap(), link);
    }
}
