//! Language tags (`Content-Language`, `Accept-Language`).

use crate::error::{HeaderError, ParseError, Result};
use crate::protocol::constants::{params, WILDCARD};
use crate::protocol::parameters::read_quality_factor_parameter;
use crate::protocol::quality::{quality_value_to_string, Qualified, DEFAULT_QUALITY};
use crate::protocol::reader::{HeaderReader, HttpHeaderReader};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

static LANGUAGE_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").unwrap());

/// Whether `tag` is a syntactically valid language tag.
#[must_use]
pub fn is_valid_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG_REGEX.is_match(tag)
}

/// A language and optional country, the unit language tags are matched
/// against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Locale {
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

impl Locale {
    #[inline]
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Locale {
            language: language.into(),
            country: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// `language[-country]`
    #[must_use]
    pub fn to_language_tag(&self) -> String {
        if self.country.is_empty() {
            self.language.clone()
        } else {
            format!("{}-{}", self.language, self.country)
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_language_tag())
    }
}

/// Accepts `en`, `en-US` and `en_US`.
impl FromStr for Locale {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        let (language, country) = s.split_once(['-', '_']).unwrap_or((s, ""));
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HeaderError::IllegalArgument(format!("invalid locale '{s}'")));
        }
        Ok(Locale::new(language).with_country(country))
    }
}

/// A language tag: primary subtag plus the remaining subtags.
///
/// Compares case-insensitively.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag {
    tag: String,
    primary: String,
    sub_tags: Option<String>,
}

impl LanguageTag {
    /// Build a tag from its parts, validating the result.
    pub fn new(primary: &str, sub_tags: Option<&str>) -> Result<Self> {
        let tag = match sub_tags {
            Some(sub) => format!("{primary}-{sub}"),
            None => primary.to_string(),
        };
        Self::from_tag(&tag).map_err(|e| HeaderError::from(e).in_value("language tag", &tag))
    }

    fn from_tag(tag: &str) -> std::result::Result<Self, ParseError> {
        if !is_valid_language_tag(tag) {
            return Err(ParseError::new(
                format!("String, {tag}, is not a valid language tag"),
                0,
            ));
        }
        let (primary, sub_tags) = match tag.split_once('-') {
            Some((primary, sub)) => (primary.to_string(), Some(sub.to_string())),
            None => (tag.to_string(), None),
        };
        Ok(LanguageTag {
            tag: tag.to_string(),
            primary,
            sub_tags,
        })
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    #[must_use]
    pub fn primary_tag(&self) -> &str {
        &self.primary
    }

    #[inline]
    #[must_use]
    pub fn sub_tags(&self) -> Option<&str> {
        self.sub_tags.as_deref()
    }

    /// Whether this tag covers `locale`: the primary subtag matches the
    /// language and, if present, the remaining subtags match the country.
    #[must_use]
    pub fn is_compatible(&self, locale: &Locale) -> bool {
        if self.tag == WILDCARD {
            return true;
        }
        if !self.primary.eq_ignore_ascii_case(&locale.language) {
            return false;
        }
        match &self.sub_tags {
            Some(sub) => sub.eq_ignore_ascii_case(&locale.country),
            None => true,
        }
    }

    #[must_use]
    pub fn to_locale(&self) -> Locale {
        Locale::new(self.primary.clone()).with_country(self.sub_tags.clone().unwrap_or_default())
    }

    /// Read a single tag; nothing may follow it.
    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let tag = reader.next_token()?;
        if reader.has_next() {
            return Err(ParseError::new("Invalid Language tag", reader.index()).into());
        }
        Ok(Self::from_tag(&tag)?)
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::new(value)).map_err(|e| e.in_value("language tag", value))
    }

    #[inline]
    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.tag.clone()
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.tag.eq_ignore_ascii_case(&other.tag)
    }
}

impl Eq for LanguageTag {}

impl Hash for LanguageTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for LanguageTag {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = HeaderError;
    fn try_from(value: String) -> Result<Self> {
        Self::from_header_value(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.tag
    }
}

impl From<&Locale> for LanguageTag {
    fn from(locale: &Locale) -> Self {
        let tag = locale.to_language_tag();
        LanguageTag {
            primary: locale.language.clone(),
            sub_tags: (!locale.country.is_empty()).then(|| locale.country.clone()),
            tag,
        }
    }
}

/// An `Accept-Language` element: a language tag (or `*`) with a quality.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptableLanguageTag {
    tag: LanguageTag,
    quality: u16,
}

impl AcceptableLanguageTag {
    #[must_use]
    pub fn new(tag: LanguageTag) -> Self {
        AcceptableLanguageTag {
            tag,
            quality: DEFAULT_QUALITY,
        }
    }

    /// `*` with the default quality.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new(LanguageTag {
            tag: WILDCARD.to_string(),
            primary: WILDCARD.to_string(),
            sub_tags: None,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_quality(mut self, quality: u16) -> Self {
        self.quality = quality.min(DEFAULT_QUALITY);
        self
    }

    #[inline]
    #[must_use]
    pub fn language_tag(&self) -> &LanguageTag {
        &self.tag
    }

    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.tag.tag == WILDCARD
    }

    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let tag = reader.next_token()?;
        let tag = if tag == WILDCARD {
            Self::wildcard().tag
        } else {
            LanguageTag::from_tag(&tag)?
        };
        let quality = read_quality_factor_parameter(reader)?;
        Ok(AcceptableLanguageTag { tag, quality })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::new(value))
            .map_err(|e| e.in_value("accept language", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        if self.quality == DEFAULT_QUALITY {
            return self.tag.tag.clone();
        }
        format!(
            "{};{}={}",
            self.tag.tag,
            params::QUALITY,
            quality_value_to_string(self.quality)
        )
    }
}

impl Qualified for AcceptableLanguageTag {
    fn quality(&self) -> u16 {
        self.quality
    }
}

impl fmt::Display for AcceptableLanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for AcceptableLanguageTag {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}
