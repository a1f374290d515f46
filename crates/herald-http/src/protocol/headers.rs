//! One entry point per header shape.
//!
//! Single-valued headers go through the type's `from_header_value`; the
//! functions here cover the comma separated and cookie headers, returning
//! quality-bearing lists sorted best first.

use crate::config::ParserConfig;
use crate::error::{HeaderError, Result};
use crate::protocol::list::{read_list, read_sorted_list};
use crate::protocol::quality::quality_comparator;
use crate::protocol::reader::HeaderReader;
use crate::types::{
    acceptable_media_type_comparator, cookie, quality_source_comparator, AcceptableLanguageTag,
    AcceptableMediaType, AcceptableToken, Cookie, CookieMap, LanguageTag, Link,
    MatchingEntityTags, MediaType, NewCookie, QualitySourceMediaType,
};
use std::fmt::Display;

pub use crate::protocol::date::{format_date, read_date};

fn list<T>(
    kind: &'static str,
    header: &str,
    create: impl FnMut(&mut dyn HeaderReader) -> Result<T>,
) -> Result<Vec<T>> {
    read_list(header, &ParserConfig::default(), create).map_err(|e: HeaderError| e.in_value(kind, header))
}

/// `Cookie`
pub fn read_cookies(header: &str) -> Result<CookieMap> {
    cookie::parse_cookies(header)
}

/// First cookie of a `Cookie` header.
pub fn read_cookie(header: &str) -> Result<Cookie> {
    cookie::parse_cookie(header)
}

/// `Set-Cookie`
pub fn read_new_cookie(header: &str) -> Result<NewCookie> {
    cookie::parse_new_cookie(header)
}

/// A comma separated list of media types, in header order.
pub fn read_media_types(header: &str) -> Result<Vec<MediaType>> {
    list("media type list", header, |r| MediaType::read(r))
}

/// `Accept`, best first: quality descending, then most specific.
pub fn read_accept_media_type(header: &str) -> Result<Vec<AcceptableMediaType>> {
    read_sorted_list(
        header,
        &ParserConfig::default(),
        |r| AcceptableMediaType::read(r),
        acceptable_media_type_comparator,
    )
    .map_err(|e: HeaderError| e.in_value("accept", header))
}

/// Server media types with `qs`, best first.
pub fn read_quality_source_media_type(header: &str) -> Result<Vec<QualitySourceMediaType>> {
    read_sorted_list(
        header,
        &ParserConfig::default(),
        |r| QualitySourceMediaType::read(r),
        quality_source_comparator,
    )
    .map_err(|e: HeaderError| e.in_value("media type list", header))
}

/// Several `qs` media type lists merged and sorted, best first.
pub fn read_quality_source_media_types<S: AsRef<str>>(
    headers: &[S],
) -> Result<Vec<QualitySourceMediaType>> {
    let mut all = Vec::new();
    for header in headers {
        all.extend(read_quality_source_media_type(header.as_ref())?);
    }
    all.sort_by(quality_source_comparator);
    Ok(all)
}

/// `Accept-Language`, highest quality first.
pub fn read_accept_language(header: &str) -> Result<Vec<AcceptableLanguageTag>> {
    let mut tags = list("accept language", header, |r| AcceptableLanguageTag::read(r))?;
    tags.sort_by(quality_comparator);
    Ok(tags)
}

/// `Content-Language` style list of plain language tags.
pub fn read_language_tags(header: &str) -> Result<Vec<LanguageTag>> {
    list("language tag list", header, |r| LanguageTag::read(r))
}

/// `Accept-Charset` / `Accept-Encoding`, highest quality first.
pub fn read_accept_token(header: &str) -> Result<Vec<AcceptableToken>> {
    let mut tokens = list("token list", header, |r| AcceptableToken::read(r))?;
    tokens.sort_by(quality_comparator);
    Ok(tokens)
}

/// A comma separated list of tokens, e.g. `Allow` or `Vary`.
pub fn read_string_list(header: &str) -> Result<Vec<String>> {
    list("token list", header, |r| {
        r.has_next();
        Ok(r.next_token()?)
    })
}

/// `If-Match` / `If-None-Match`.
pub fn read_matching_entity_tags(header: &str) -> Result<MatchingEntityTags> {
    MatchingEntityTags::from_header_value(header)
}

/// Every link of a `Link` header.
pub fn read_links(header: &str) -> Result<Vec<Link>> {
    list("link", header, |r| Link::read(r))
}

/// Join values with `", "`.
#[must_use]
pub fn format_list<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
