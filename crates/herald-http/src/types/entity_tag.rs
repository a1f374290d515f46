//! Entity tags (`ETag`, `If-Match`, `If-None-Match`).

use crate::config::ParserConfig;
use crate::error::{HeaderError, ParseError, Result};
use crate::protocol::formatter::append_quoted;
use crate::protocol::list::read_list;
use crate::protocol::reader::{EventKind, HeaderReader, HttpHeaderReader};
use std::fmt;
use std::str::FromStr;

const WEAK_PREFIX: &str = "W";

/// An opaque validator, optionally weak.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntityTag {
    value: String,
    #[serde(default)]
    weak: bool,
}

impl EntityTag {
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        EntityTag {
            value: value.into(),
            weak: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn weak(value: impl Into<String>) -> Self {
        EntityTag {
            value: value.into(),
            weak: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Read `"value"` or `W/"value"`.
    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        match reader.next_event(false, false)? {
            EventKind::QuotedString => Ok(EntityTag::new(reader.event_value())),
            EventKind::Token if reader.event_value() == WEAK_PREFIX => {
                reader.next_separator('/')?;
                Ok(EntityTag::weak(reader.next_quoted_string()?))
            }
            _ => Err(ParseError::new(
                format!("Unexpected entity tag start '{}'", reader.event_value()),
                reader.index(),
            )
            .into()),
        }
    }

    /// Parse a single tag. `*` is not an entity tag and is rejected.
    pub fn from_header_value(value: &str) -> Result<Self> {
        let mut reader = HttpHeaderReader::new(value);
        let tag = Self::read(&mut reader).map_err(|e| e.in_value("entity tag", value))?;
        if reader.has_next() {
            return Err(HeaderError::invalid(
                "entity tag",
                value,
                ParseError::new("Unexpected content after entity tag", reader.index()),
            ));
        }
        Ok(tag)
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut buffer = String::with_capacity(self.value.len() + 4);
        if self.weak {
            buffer.push_str(WEAK_PREFIX);
            buffer.push('/');
        }
        append_quoted(&mut buffer, &self.value);
        buffer
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for EntityTag {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// The value of `If-Match` / `If-None-Match`: `*` or a list of tags.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatchingEntityTags {
    Any,
    Tags(Vec<EntityTag>),
}

impl MatchingEntityTags {
    #[inline]
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, MatchingEntityTags::Any)
    }

    /// The listed tags; empty for `*`.
    #[must_use]
    pub fn tags(&self) -> &[EntityTag] {
        match self {
            MatchingEntityTags::Any => &[],
            MatchingEntityTags::Tags(tags) => tags,
        }
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        if value.trim() == "*" {
            return Ok(MatchingEntityTags::Any);
        }
        read_list(value, &ParserConfig::default(), |reader| EntityTag::read(reader))
            .map(MatchingEntityTags::Tags)
            .map_err(|e| e.in_value("entity tag list", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        match self {
            MatchingEntityTags::Any => "*".to_string(),
            MatchingEntityTags::Tags(tags) => tags
                .iter()
                .map(EntityTag::to_header_value)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for MatchingEntityTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for MatchingEntityTags {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}
