//! Media types (`Content-Type`, `Accept`).

use crate::config::ParserConfig;
use crate::error::{HeaderError, Result};
use crate::protocol::constants::{params, WILDCARD};
use crate::protocol::formatter::append_parameters;
use crate::protocol::parameters::read_parameters;
use crate::protocol::quality::{
    enhance_with_quality_parameter, read_quality_factor, Qualified, DEFAULT_QUALITY,
};
use crate::protocol::reader::{HeaderReader, HttpHeaderReader};
use crate::types::Parameters;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A media type: `type/subtype` plus parameters.
///
/// Type and subtype compare case-insensitively but keep their spelling.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MediaType {
    #[serde(rename = "type")]
    type_: String,
    subtype: String,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    parameters: Parameters,
}

impl MediaType {
    #[inline]
    #[must_use]
    pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        MediaType {
            type_: type_.into(),
            subtype: subtype.into(),
            parameters: Parameters::new(),
        }
    }

    /// `*/*`
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    #[must_use]
    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    #[must_use]
    pub fn application_octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    #[inline]
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name, value);
        self
    }

    /// Copy of this media type with the `charset` parameter set.
    #[must_use]
    pub fn with_charset(&self, charset: &str) -> Self {
        self.clone().with_parameter(params::CHARSET, charset)
    }

    #[inline]
    #[must_use]
    pub fn type_(&self) -> &str {
        &self.type_
    }

    #[inline]
    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameters.get(params::CHARSET)
    }

    #[inline]
    #[must_use]
    pub fn is_wildcard_type(&self) -> bool {
        self.type_ == WILDCARD
    }

    #[inline]
    #[must_use]
    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype == WILDCARD
    }

    /// Whether either media type matches the other, honoring wildcards.
    /// Parameters are ignored.
    #[must_use]
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        if self.is_wildcard_type() || other.is_wildcard_type() {
            return true;
        }
        self.type_.eq_ignore_ascii_case(&other.type_)
            && (self.is_wildcard_subtype()
                || other.is_wildcard_subtype()
                || self.subtype.eq_ignore_ascii_case(&other.subtype))
    }

    /// Read a media type from the reader's current position.
    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let type_ = reader.next_token()?;
        reader.next_separator('/')?;
        let subtype = reader.next_token()?;
        let parameters = read_parameters(reader)?;
        Ok(MediaType {
            type_,
            subtype,
            parameters,
        })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::from_header_value_with_config(value, &ParserConfig::default())
    }

    pub fn from_header_value_with_config(value: &str, config: &ParserConfig) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::with_config(value, config))
            .map_err(|e| e.in_value("media type", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.format_with(&self.parameters)
    }

    fn format_with(&self, parameters: &Parameters) -> String {
        let mut buffer = format!("{}/{}", self.type_, self.subtype);
        append_parameters(&mut buffer, parameters);
        buffer
    }
}

impl Default for MediaType {
    fn default() -> Self {
        Self::wildcard()
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        type_equal(self, other) && self.parameters == other.parameters
    }
}

impl Eq for MediaType {}

impl Hash for MediaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_.to_ascii_lowercase().hash(state);
        self.subtype.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for MediaType {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

// =============================================================================
// Media type utilities
// =============================================================================

/// Same type and subtype (case-insensitive), parameters ignored.
#[must_use]
pub fn type_equal(a: &MediaType, b: &MediaType) -> bool {
    a.type_.eq_ignore_ascii_case(&b.type_) && a.subtype.eq_ignore_ascii_case(&b.subtype)
}

/// Whether the lists share a [`type_equal`] pair.
#[must_use]
pub fn intersect<A: AsRef<MediaType>, B: AsRef<MediaType>>(a: &[A], b: &[B]) -> bool {
    a.iter()
        .any(|x| b.iter().any(|y| type_equal(x.as_ref(), y.as_ref())))
}

/// The media type with fewer wildcards, `a` on a tie.
#[must_use]
pub fn most_specific<'m>(a: &'m MediaType, b: &'m MediaType) -> &'m MediaType {
    if a.is_wildcard_subtype() && !b.is_wildcard_subtype() {
        return b;
    }
    if a.is_wildcard_type() && !b.is_wildcard_type() {
        return b;
    }
    a
}

/// Orders by specificity only: `m/n < m/* < */*`.
#[must_use]
pub fn specificity_comparator(a: &MediaType, b: &MediaType) -> Ordering {
    a.is_wildcard_type()
        .cmp(&b.is_wildcard_type())
        .then(a.is_wildcard_subtype().cmp(&b.is_wildcard_subtype()))
}

/// Copy without the `q` and `qs` parameters.
#[must_use]
pub fn strip_quality_params(media_type: &MediaType) -> MediaType {
    let mut stripped = media_type.clone();
    stripped.parameters.retain(|name, _| {
        !name.eq_ignore_ascii_case(params::QUALITY)
            && !name.eq_ignore_ascii_case(params::QUALITY_SOURCE)
    });
    stripped
}

/// `type/*` for the given media type.
#[must_use]
pub fn type_wildcard(media_type: &MediaType) -> MediaType {
    MediaType::new(media_type.type_.clone(), WILDCARD)
}

/// The `q` parameter of a media type, [`DEFAULT_QUALITY`] when absent.
pub fn quality_of(media_type: &MediaType) -> Result<u16> {
    match media_type.parameters.get(params::QUALITY) {
        Some(q) => read_quality_factor(q).map_err(|e| {
            HeaderError::IllegalArgument(format!("invalid quality of {media_type}: {e}"))
        }),
        None => Ok(DEFAULT_QUALITY),
    }
}

impl AsRef<MediaType> for MediaType {
    fn as_ref(&self) -> &MediaType {
        self
    }
}

// =============================================================================
// AcceptableMediaType
// =============================================================================

/// An `Accept` header element: a media type with a client quality.
///
/// A bare `*` (as sent by some clients) is read as `*/*`; a type without a
/// subtype gets the `*` subtype.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptableMediaType {
    media_type: MediaType,
    quality: u16,
}

impl AcceptableMediaType {
    #[must_use]
    pub fn new(media_type: MediaType) -> Self {
        AcceptableMediaType {
            media_type,
            quality: DEFAULT_QUALITY,
        }
    }

    /// `*/*` with the default quality.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new(MediaType::wildcard())
    }

    #[inline]
    #[must_use]
    pub fn with_quality(mut self, quality: u16) -> Self {
        self.quality = quality.min(DEFAULT_QUALITY);
        self
    }

    #[inline]
    #[must_use]
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    #[inline]
    #[must_use]
    pub fn into_media_type(self) -> MediaType {
        self.media_type
    }

    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let type_ = reader.next_token()?;
        let subtype = if reader.has_next_separator('/', false) {
            reader.next_event(false, false)?;
            reader.next_token()?
        } else {
            WILDCARD.to_string()
        };
        let parameters = read_parameters(reader)?;
        let quality = match parameters.get(params::QUALITY) {
            Some(q) => read_quality_factor(q)?,
            None => DEFAULT_QUALITY,
        };
        Ok(AcceptableMediaType {
            media_type: MediaType::new(type_, subtype).with_parameters(parameters),
            quality,
        })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::new(value)).map_err(|e| e.in_value("accept", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        let parameters =
            enhance_with_quality_parameter(&self.media_type.parameters, params::QUALITY, self.quality);
        self.media_type.format_with(&parameters)
    }
}

impl Qualified for AcceptableMediaType {
    fn quality(&self) -> u16 {
        self.quality
    }
}

impl AsRef<MediaType> for AcceptableMediaType {
    fn as_ref(&self) -> &MediaType {
        &self.media_type
    }
}

impl From<MediaType> for AcceptableMediaType {
    fn from(media_type: MediaType) -> Self {
        Self::new(media_type)
    }
}

impl fmt::Display for AcceptableMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for AcceptableMediaType {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// Higher quality first, then more specific first.
#[must_use]
pub fn acceptable_media_type_comparator(a: &AcceptableMediaType, b: &AcceptableMediaType) -> Ordering {
    b.quality
        .cmp(&a.quality)
        .then_with(|| specificity_comparator(&a.media_type, &b.media_type))
}

// =============================================================================
// QualitySourceMediaType
// =============================================================================

/// A server-side media type carrying a quality source (`qs` parameter).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QualitySourceMediaType {
    media_type: MediaType,
    quality_source: u16,
}

impl QualitySourceMediaType {
    #[must_use]
    pub fn new(media_type: MediaType) -> Self {
        QualitySourceMediaType {
            media_type,
            quality_source: DEFAULT_QUALITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_quality_source(mut self, quality_source: u16) -> Self {
        self.quality_source = quality_source.min(DEFAULT_QUALITY);
        self
    }

    #[inline]
    #[must_use]
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    #[inline]
    #[must_use]
    pub fn quality_source(&self) -> u16 {
        self.quality_source
    }

    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let media_type = MediaType::read(reader)?;
        let quality_source = match media_type.parameters.get(params::QUALITY_SOURCE) {
            Some(qs) => read_quality_factor(qs)?,
            None => DEFAULT_QUALITY,
        };
        Ok(QualitySourceMediaType {
            media_type,
            quality_source,
        })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::new(value)).map_err(|e| e.in_value("media type", value))
    }

    /// Formats `qs` only when it is not the default or was given explicitly.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let parameters = enhance_with_quality_parameter(
            &self.media_type.parameters,
            params::QUALITY_SOURCE,
            self.quality_source,
        );
        self.media_type.format_with(&parameters)
    }
}

impl Qualified for QualitySourceMediaType {
    fn quality(&self) -> u16 {
        self.quality_source
    }
}

impl AsRef<MediaType> for QualitySourceMediaType {
    fn as_ref(&self) -> &MediaType {
        &self.media_type
    }
}

impl fmt::Display for QualitySourceMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for QualitySourceMediaType {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// Higher quality source first, then more specific first.
#[must_use]
pub fn quality_source_comparator(a: &QualitySourceMediaType, b: &QualitySourceMediaType) -> Ordering {
    b.quality_source
        .cmp(&a.quality_source)
        .then_with(|| specificity_comparator(&a.media_type, &b.media_type))
}
