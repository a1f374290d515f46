//! Typed getters for well-known headers.
//!
//! A stored typed value of the requested type is returned as is; anything
//! else is converted to text and parsed. None of these getters materialize.

use super::{HeaderValue, MutableHeaders};
use crate::error::{MessageError, Result};
use chrono::{DateTime, Utc};
use herald_http::protocol::constants::headers as names;
use herald_http::protocol::{
    quality_comparator, read_accept_language, read_accept_media_type, read_accept_token,
    read_cookies, read_date, read_links, read_matching_entity_tags, read_new_cookie,
    read_string_list,
};
use herald_http::protocol::constants::WILDCARD;
use herald_http::types::{
    acceptable_media_type_comparator, AcceptableLanguageTag, AcceptableMediaType, AcceptableToken,
    Cookie, CookieMap, EntityTag, LanguageTag, Link, Locale, MatchingEntityTags, MediaType,
    NewCookie,
};
use std::fmt::Display;

impl MutableHeaders {
    /// The single value of `name`, converted with `parse` unless it already
    /// holds a `T`.
    fn single<T, E>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> std::result::Result<T, E>,
    ) -> Result<Option<T>>
    where
        T: Clone + 'static,
        E: Display,
    {
        match self.get(name) {
            None | Some([]) => Ok(None),
            Some([value]) => {
                if let Some(typed) = value.downcast_ref::<T>() {
                    return Ok(Some(typed.clone()));
                }
                let text = value.to_header_string();
                parse(&text)
                    .map(Some)
                    .map_err(|e| MessageError::unable_to_parse(name, &text, e))
            }
            Some(values) => Err(MessageError::TooManyValues {
                name: name.to_string(),
                values: values
                    .iter()
                    .map(HeaderValue::to_header_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Every value of `name`, each either taken as a `T` or expanded by
    /// `parse` (a raw value may carry a comma separated list).
    fn each<T, E>(
        &self,
        name: &str,
        mut parse: impl FnMut(&str) -> std::result::Result<Vec<T>, E>,
    ) -> Result<Vec<T>>
    where
        T: Clone + 'static,
        E: Display,
    {
        let mut result = Vec::new();
        for value in self.get(name).unwrap_or_default() {
            if let Some(typed) = value.downcast_ref::<T>() {
                result.push(typed.clone());
                continue;
            }
            let text = value.to_header_string();
            result.extend(parse(&text).map_err(|e| MessageError::unable_to_parse(name, &text, e))?);
        }
        Ok(result)
    }

    /// `Content-Type`
    pub fn media_type(&self) -> Result<Option<MediaType>> {
        let config = self.config.parser.clone();
        self.single(names::CONTENT_TYPE.as_str(), |text| {
            MediaType::from_header_value_with_config(text, &config)
        })
    }

    /// `Content-Length`, `-1` when absent or empty.
    pub fn content_length(&self) -> Result<i64> {
        let length = self.single(names::CONTENT_LENGTH.as_str(), |text| {
            let text = text.trim();
            if text.is_empty() {
                Ok(-1)
            } else {
                text.parse::<i64>()
            }
        })?;
        Ok(length.unwrap_or(-1))
    }

    /// `Date`
    pub fn date(&self) -> Result<Option<DateTime<Utc>>> {
        self.single(names::DATE.as_str(), read_date)
    }

    /// `Last-Modified`
    pub fn last_modified(&self) -> Result<Option<DateTime<Utc>>> {
        self.single(names::LAST_MODIFIED.as_str(), read_date)
    }

    /// `Content-Language` as a locale.
    pub fn language(&self) -> Result<Option<Locale>> {
        self.single(names::CONTENT_LANGUAGE.as_str(), |text| {
            LanguageTag::from_header_value(text).map(|tag| tag.to_locale())
        })
    }

    /// `ETag`
    pub fn entity_tag(&self) -> Result<Option<EntityTag>> {
        self.single(names::ETAG.as_str(), EntityTag::from_header_value)
    }

    /// `Location`
    pub fn location(&self) -> Result<Option<http::Uri>> {
        self.single(names::LOCATION.as_str(), |text| text.parse::<http::Uri>())
    }

    /// Every `Link`, in header order.
    pub fn links(&self) -> Result<Vec<Link>> {
        self.each(names::LINK.as_str(), read_links)
    }

    /// The first link whose `rel` contains `relation`.
    pub fn link(&self, relation: &str) -> Result<Option<Link>> {
        Ok(self.links()?.into_iter().find(|link| link.has_rel(relation)))
    }

    pub fn has_link(&self, relation: &str) -> Result<bool> {
        Ok(self.link(relation)?.is_some())
    }

    /// Every cookie of every `Cookie` header; a later cookie of the same
    /// name wins.
    pub fn request_cookies(&self) -> Result<CookieMap> {
        let cookies = self.each(names::COOKIE.as_str(), |text| {
            read_cookies(text).map(|map| map.into_iter().collect::<Vec<Cookie>>())
        })?;
        Ok(cookies.into_iter().collect())
    }

    /// One cookie per `Set-Cookie` header; a later cookie of the same name
    /// replaces an earlier one in place.
    pub fn response_cookies(&self) -> Result<Vec<NewCookie>> {
        let parsed = self.each(names::SET_COOKIE.as_str(), |text| {
            read_new_cookie(text).map(|cookie| vec![cookie])
        })?;
        let mut cookies: Vec<NewCookie> = Vec::with_capacity(parsed.len());
        for cookie in parsed {
            match cookies.iter_mut().find(|c| c.name() == cookie.name()) {
                Some(existing) => *existing = cookie,
                None => cookies.push(cookie),
            }
        }
        Ok(cookies)
    }

    /// `Allow`, upper-cased and without duplicates.
    pub fn allowed_methods(&self) -> Result<Vec<String>> {
        let header = names::ALLOW;
        let name = header.as_str();
        let Some(allowed) = self.joined(name).filter(|text| !text.is_empty()) else {
            return Ok(Vec::new());
        };
        let methods = read_string_list(&allowed)
            .map_err(|e| MessageError::unable_to_parse(name, &allowed, e))?;
        let mut result: Vec<String> = Vec::with_capacity(methods.len());
        for method in methods {
            let method = method.to_ascii_uppercase();
            if !result.contains(&method) {
                result.push(method);
            }
        }
        Ok(result)
    }

    /// `Accept`, best first; `*/*` when absent.
    pub fn acceptable_media_types(&self) -> Result<Vec<AcceptableMediaType>> {
        let header = names::ACCEPT;
        let name = header.as_str();
        let mut result = Vec::new();
        for value in self.get(name).unwrap_or_default() {
            if let Some(media_type) = value.downcast_ref::<MediaType>() {
                result.push(AcceptableMediaType::from(media_type.clone()));
            } else if let Some(acceptable) = value.downcast_ref::<AcceptableMediaType>() {
                result.push(acceptable.clone());
            } else {
                let text = value.to_header_string();
                result.extend(
                    read_accept_media_type(&text)
                        .map_err(|e| MessageError::unable_to_parse(name, &text, e))?,
                );
            }
        }
        if result.is_empty() {
            return Ok(vec![AcceptableMediaType::wildcard()]);
        }
        result.sort_by(acceptable_media_type_comparator);
        Ok(result)
    }

    /// `Accept-Language`, highest quality first; `*` when absent.
    pub fn acceptable_languages(&self) -> Result<Vec<AcceptableLanguageTag>> {
        let header = names::ACCEPT_LANGUAGE;
        let name = header.as_str();
        let mut result = Vec::new();
        for value in self.get(name).unwrap_or_default() {
            if let Some(locale) = value.downcast_ref::<Locale>() {
                result.push(AcceptableLanguageTag::new(LanguageTag::from(locale)));
            } else if let Some(tag) = value.downcast_ref::<AcceptableLanguageTag>() {
                result.push(tag.clone());
            } else {
                let text = value.to_header_string();
                result.extend(
                    read_accept_language(&text)
                        .map_err(|e| MessageError::unable_to_parse(name, &text, e))?,
                );
            }
        }
        if result.is_empty() {
            return Ok(vec![AcceptableLanguageTag::wildcard()]);
        }
        result.sort_by(quality_comparator);
        Ok(result)
    }

    /// `If-Match`; `None` when absent or empty.
    pub fn if_match(&self) -> Result<Option<MatchingEntityTags>> {
        self.matching_tags(names::IF_MATCH.as_str())
    }

    /// `If-None-Match`; `None` when absent or empty.
    pub fn if_none_match(&self) -> Result<Option<MatchingEntityTags>> {
        self.matching_tags(names::IF_NONE_MATCH.as_str())
    }

    /// `Accept-Charset`, highest quality first; `*` when absent.
    pub fn accept_charset(&self) -> Result<Vec<AcceptableToken>> {
        self.acceptable_tokens(names::ACCEPT_CHARSET.as_str())
    }

    /// `Accept-Encoding`, highest quality first; `*` when absent.
    pub fn accept_encoding(&self) -> Result<Vec<AcceptableToken>> {
        self.acceptable_tokens(names::ACCEPT_ENCODING.as_str())
    }

    fn matching_tags(&self, name: &str) -> Result<Option<MatchingEntityTags>> {
        if let Some([value]) = self.get(name) {
            if let Some(tags) = value.downcast_ref::<MatchingEntityTags>() {
                return Ok(Some(tags.clone()));
            }
        }
        let Some(text) = self.joined(name).filter(|text| !text.trim().is_empty()) else {
            return Ok(None);
        };
        read_matching_entity_tags(&text)
            .map(Some)
            .map_err(|e| MessageError::unable_to_parse(name, &text, e))
    }

    fn acceptable_tokens(&self, name: &str) -> Result<Vec<AcceptableToken>> {
        let mut result = self.each(name, |text| {
            if text.trim().is_empty() {
                Ok(Vec::new())
            } else {
                read_accept_token(text)
            }
        })?;
        if result.is_empty() {
            return Ok(vec![AcceptableToken::new(WILDCARD)]);
        }
        result.sort_by(quality_comparator);
        Ok(result)
    }
}
