//! Request cookies (`Cookie`) and response cookies (`Set-Cookie`).
//!
//! Both headers are split on `;` and `,` into "bites" of `name=value`.
//! This is deliberately looser than the tokenizer-based codecs: browsers send
//! unquoted values containing separators, and `Set-Cookie` dates contain a
//! comma that is glued back together after splitting.

use crate::error::{HeaderError, ParseError, Result};
use crate::protocol::constants::cookie_attrs;
use crate::protocol::date::{format_date, read_date};
use crate::protocol::formatter::append_quoted_if_whitespace;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Version assigned to cookies created in code.
pub const DEFAULT_VERSION: i32 = 1;

/// `max_age` value meaning "not set".
pub const DEFAULT_MAX_AGE: i32 = -1;

/// A cookie sent by the client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub version: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Cookie {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Cookie {
            name: name.into(),
            value: value.into(),
            version: DEFAULT_VERSION,
            path: None,
            domain: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// The first cookie of a `Cookie` header.
    pub fn from_header_value(value: &str) -> Result<Self> {
        parse_cookie(value)
    }

    /// `$Version=N;name=value[;$Domain=d][;$Path=p]`
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut buffer = format!("${}={};{}=", cookie_attrs::VERSION, self.version, self.name);
        append_quoted_if_whitespace(&mut buffer, &self.value);
        if let Some(domain) = &self.domain {
            buffer.push_str(";$");
            buffer.push_str(cookie_attrs::DOMAIN);
            buffer.push('=');
            append_quoted_if_whitespace(&mut buffer, domain);
        }
        if let Some(path) = &self.path {
            buffer.push_str(";$");
            buffer.push_str(cookie_attrs::PATH);
            buffer.push('=');
            append_quoted_if_whitespace(&mut buffer, path);
        }
        buffer
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for Cookie {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// A cookie set by the server.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewCookie {
    #[serde(flatten)]
    pub cookie: Cookie,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub max_age: i32,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl NewCookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_cookie(Cookie::new(name, value))
    }

    #[must_use]
    pub fn from_cookie(cookie: Cookie) -> Self {
        NewCookie {
            cookie,
            comment: None,
            max_age: DEFAULT_MAX_AGE,
            secure: false,
            http_only: false,
            expiry: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.cookie.name
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.cookie.value
    }

    #[inline]
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_age(mut self, max_age: i32) -> Self {
        self.max_age = max_age;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// The plain cookie, as the client will send it back.
    #[must_use]
    pub fn to_cookie(&self) -> Cookie {
        self.cookie.clone()
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        parse_new_cookie(value)
    }

    /// `name=value;Version=N[;Comment=c][;Domain=d][;Path=p][;Max-Age=n]
    /// [;Secure][;HttpOnly][;Expires=date]`
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let mut buffer = format!("{}=", self.cookie.name);
        append_quoted_if_whitespace(&mut buffer, &self.cookie.value);
        push_attribute(&mut buffer, cookie_attrs::VERSION, Some(&self.cookie.version.to_string()));
        push_attribute(&mut buffer, cookie_attrs::COMMENT, self.comment.as_deref());
        push_attribute(&mut buffer, cookie_attrs::DOMAIN, self.cookie.domain.as_deref());
        push_attribute(&mut buffer, cookie_attrs::PATH, self.cookie.path.as_deref());
        if self.max_age != DEFAULT_MAX_AGE {
            push_attribute(&mut buffer, cookie_attrs::MAX_AGE, Some(&self.max_age.to_string()));
        }
        if self.secure {
            buffer.push(';');
            buffer.push_str(cookie_attrs::SECURE);
        }
        if self.http_only {
            buffer.push(';');
            buffer.push_str(cookie_attrs::HTTP_ONLY);
        }
        if let Some(expiry) = &self.expiry {
            buffer.push(';');
            buffer.push_str(cookie_attrs::EXPIRES);
            buffer.push('=');
            buffer.push_str(&format_date(expiry));
        }
        buffer
    }
}

fn push_attribute(buffer: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        buffer.push(';');
        buffer.push_str(name);
        buffer.push('=');
        append_quoted_if_whitespace(buffer, value);
    }
}

impl fmt::Display for NewCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for NewCookie {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

/// Cookies by name, in the order they first appeared.
///
/// Inserting a name that is already present replaces the cookie in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CookieMap {
    cookies: Vec<Cookie>,
}

impl CookieMap {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn insert(&mut self, cookie: Cookie) -> Option<Cookie> {
        match self.cookies.iter_mut().find(|c| c.name == cookie.name) {
            Some(existing) => Some(std::mem::replace(existing, cookie)),
            None => {
                self.cookies.push(cookie);
                None
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cookie> {
        self.cookies.iter()
    }
}

impl IntoIterator for CookieMap {
    type Item = Cookie;
    type IntoIter = std::vec::IntoIter<Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.into_iter()
    }
}

impl<'a> IntoIterator for &'a CookieMap {
    type Item = &'a Cookie;
    type IntoIter = std::slice::Iter<'a, Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.iter()
    }
}

impl FromIterator<Cookie> for CookieMap {
    fn from_iter<I: IntoIterator<Item = Cookie>>(iter: I) -> Self {
        let mut map = CookieMap::new();
        for cookie in iter {
            map.insert(cookie);
        }
        map
    }
}

/// Split a cookie header into trimmed, dequoted `(name, value)` bites.
fn bites(header: &str) -> Vec<(&str, &str)> {
    header
        .split([';', ','])
        .map(|bite| {
            let (name, value) = bite.split_once('=').unwrap_or((bite, ""));
            (name.trim(), dequote(value.trim()))
        })
        .collect()
}

fn dequote(value: &str) -> &str {
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn has_prefix_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Parse a `Cookie` header.
///
/// `$Version` sets the version of the cookies that follow it (0 until one is
/// seen); `$Path` and `$Domain` apply to the cookie before them.
pub fn parse_cookies(header: &str) -> Result<CookieMap> {
    let mut cookies = CookieMap::new();
    let mut version = 0;
    let mut current: Option<Cookie> = None;

    for (name, value) in bites(header) {
        if name.is_empty() {
            continue;
        }
        if let Some(attribute) = name.strip_prefix('$') {
            if has_prefix_ignore_case(attribute, cookie_attrs::VERSION) {
                version = value.parse()?;
            } else if let Some(cookie) = current.as_mut() {
                if has_prefix_ignore_case(attribute, cookie_attrs::PATH) {
                    cookie.path = Some(value.to_string());
                } else if has_prefix_ignore_case(attribute, cookie_attrs::DOMAIN) {
                    cookie.domain = Some(value.to_string());
                }
            }
        } else {
            if let Some(done) = current.take() {
                cookies.insert(done);
            }
            current = Some(Cookie::new(name, value).with_version(version));
        }
    }
    if let Some(done) = current {
        cookies.insert(done);
    }
    Ok(cookies)
}

/// The first cookie of a `Cookie` header.
pub fn parse_cookie(header: &str) -> Result<Cookie> {
    parse_cookies(header)?
        .into_iter()
        .next()
        .ok_or_else(|| HeaderError::IllegalArgument(format!("no cookie in '{header}'")))
}

/// Parse a `Set-Cookie` header.
///
/// The first bite is the cookie itself; attribute names are matched by
/// prefix, ignoring case, and unknown attributes are skipped. An `Expires`
/// date that cannot be read leaves the expiry unset.
pub fn parse_new_cookie(header: &str) -> Result<NewCookie> {
    let bites = bites(header);
    let mut iter = bites.iter().copied();

    let (name, value) = iter
        .next()
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| HeaderError::IllegalArgument(format!("no cookie in '{header}'")))?;
    let mut cookie = NewCookie::new(name, value);

    while let Some((name, value)) = iter.next() {
        let is = |attribute: &str| has_prefix_ignore_case(name, attribute);
        if is(cookie_attrs::COMMENT) {
            cookie.comment = Some(value.to_string());
        } else if is(cookie_attrs::DOMAIN) {
            cookie.cookie.domain = Some(value.to_string());
        } else if is(cookie_attrs::MAX_AGE) {
            cookie.max_age = value.parse()?;
        } else if is(cookie_attrs::PATH) {
            cookie.cookie.path = Some(value.to_string());
        } else if is(cookie_attrs::SECURE) {
            cookie.secure = true;
        } else if is(cookie_attrs::VERSION) {
            cookie.cookie.version = value.parse()?;
        } else if is(cookie_attrs::HTTP_ONLY) {
            cookie.http_only = true;
        } else if is(cookie_attrs::EXPIRES) {
            let (rest, _) = iter.next().ok_or_else(|| {
                ParseError::new("Missing date after Expires", header.len())
            })?;
            let date = format!("{value}, {rest}");
            match read_date(&date) {
                Ok(expiry) => cookie.expiry = Some(expiry),
                Err(e) => tracing::debug!(date = %date, error = %e, "ignoring unreadable cookie expiry"),
            }
        }
    }
    Ok(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_cookies_versions_and_paths() {
        let cookies = parse_cookies("$Version=1;a=1;$Path=/x,$Version=1;b=2").unwrap();
        assert_eq!(cookies.names().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = cookies.get("a").unwrap();
        assert_eq!((a.value.as_str(), a.version, a.path.as_deref()), ("1", 1, Some("/x")));
        let b = cookies.get("b").unwrap();
        assert_eq!((b.value.as_str(), b.version, b.path.as_deref()), ("2", 1, None));
    }

    #[test]
    fn test_parse_cookies_defaults() {
        let cookies = parse_cookies(" session = \"abc def\" ; theme=dark;").unwrap();
        let session = cookies.get("session").unwrap();
        assert_eq!(session.value, "abc def");
        assert_eq!(session.version, 0);
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_attributes_before_any_cookie_are_ignored() {
        let cookies = parse_cookies("$Path=/ignored;$Domain=x;a=1;$Domain=example.com").unwrap();
        let a = cookies.get("a").unwrap();
        assert_eq!(a.path, None);
        assert_eq!(a.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_duplicate_cookie_last_wins_in_first_position() {
        let cookies = parse_cookies("a=1; b=2; a=3").unwrap();
        assert_eq!(cookies.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(cookies.get("a").unwrap().value, "3");
    }

    #[test]
    fn test_bad_version_is_an_error() {
        assert!(matches!(
            parse_cookies("$Version=x;a=1"),
            Err(HeaderError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_parse_cookie() {
        assert_eq!(parse_cookie("a=1;b=2").unwrap().name, "a");
        assert!(parse_cookie("").is_err());
        assert!(parse_cookie("$Version=1").is_err());
    }

    #[test]
    fn test_cookie_format() {
        let cookie = Cookie::new("id", "a b").with_path("/").with_domain("example.com");
        assert_eq!(
            cookie.to_header_value(),
            "$Version=1;id=\"a b\";$Domain=example.com;$Path=/"
        );
        assert_eq!(Cookie::from_header_value(&cookie.to_string()).unwrap(), cookie);
    }

    #[test]
    fn test_parse_new_cookie() {
        let cookie = parse_new_cookie(
            "id=a3fWa; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Secure; HttpOnly; Max-Age=3600; path=/docs; Domain=example.com; Comment=\"hi there\"",
        )
        .unwrap();
        assert_eq!(cookie.name(), "id");
        assert_eq!(cookie.value(), "a3fWa");
        assert_eq!(cookie.expiry, Some(Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap()));
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age, 3600);
        assert_eq!(cookie.cookie.path.as_deref(), Some("/docs"));
        assert_eq!(cookie.cookie.domain.as_deref(), Some("example.com"));
        assert_eq!(cookie.comment.as_deref(), Some("hi there"));
        assert_eq!(cookie.cookie.version, DEFAULT_VERSION);
    }

    #[test]
    fn test_unreadable_expiry_is_tolerated() {
        let cookie = parse_new_cookie("id=1; Expires=Someday, never").unwrap();
        assert_eq!(cookie.expiry, None);
        assert!(parse_new_cookie("id=1; Expires=Wed").is_err());
    }

    #[test]
    fn test_new_cookie_errors() {
        assert!(parse_new_cookie("").is_err());
        assert!(matches!(
            parse_new_cookie("id=1; Max-Age=soon"),
            Err(HeaderError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_new_cookie_format() {
        let expiry = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        let cookie = NewCookie::new("id", "1")
            .with_comment("a comment")
            .with_max_age(60)
            .with_secure(true)
            .with_http_only(true)
            .with_expiry(expiry);
        let text = cookie.to_header_value();
        assert_eq!(
            text,
            "id=1;Version=1;Comment=\"a comment\";Max-Age=60;Secure;HttpOnly;Expires=Sun, 06 Nov 1994 08:49:37 GMT"
        );
        assert_eq!(parse_new_cookie(&text).unwrap(), cookie);
    }
}
