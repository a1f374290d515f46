//! Header values: raw wire text or a typed object awaiting conversion.

use chrono::{DateTime, Utc};
use herald_http::protocol::format_date;
use herald_http::types::{
    AcceptableLanguageTag, AcceptableMediaType, AcceptableToken, Cookie, EntityTag, LanguageTag,
    Link, Locale, MatchingEntityTags, MediaType, NewCookie, ParameterizedHeader,
    QualitySourceMediaType,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Converts a typed header object to its wire form.
///
/// Implemented for every typed header in `herald_http::types`, for
/// `DateTime<Utc>` (RFC 1123), URIs, methods and integers. Implement it for
/// your own types to store them in
/// [`MutableHeaders`](crate::headers::MutableHeaders) without stringifying
/// up front.
pub trait HeaderDelegate: fmt::Debug + Send + Sync + 'static {
    fn to_header_string(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

macro_rules! display_delegate {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HeaderDelegate for $ty {
                fn to_header_string(&self) -> String {
                    self.to_string()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

display_delegate!(
    MediaType,
    AcceptableMediaType,
    QualitySourceMediaType,
    EntityTag,
    MatchingEntityTags,
    Cookie,
    NewCookie,
    Link,
    LanguageTag,
    AcceptableLanguageTag,
    Locale,
    ParameterizedHeader,
    AcceptableToken,
    http::Uri,
    http::Method,
    i32,
    i64,
    u32,
    u64,
    usize,
);

impl HeaderDelegate for DateTime<Utc> {
    fn to_header_string(&self) -> String {
        format_date(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One value stored under a header name.
#[derive(Clone, Debug)]
pub enum HeaderValue {
    /// Wire text, either written as a string or already materialized.
    Raw(String),
    /// A typed object not yet converted to text.
    Typed(Arc<dyn HeaderDelegate>),
}

impl HeaderValue {
    #[inline]
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        HeaderValue::Raw(value.into())
    }

    #[inline]
    #[must_use]
    pub fn typed<T: HeaderDelegate>(value: T) -> Self {
        HeaderValue::Typed(Arc::new(value))
    }

    #[inline]
    #[must_use]
    pub fn is_typed(&self) -> bool {
        matches!(self, HeaderValue::Typed(_))
    }

    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            HeaderValue::Raw(text) => Some(text),
            HeaderValue::Typed(_) => None,
        }
    }

    /// The typed object, if this value holds a `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            HeaderValue::Typed(value) => value.as_any().downcast_ref::<T>(),
            HeaderValue::Raw(_) => None,
        }
    }

    /// Wire text for this value; typed values are converted on every call.
    #[must_use]
    pub fn to_header_string(&self) -> String {
        match self {
            HeaderValue::Raw(text) => text.clone(),
            HeaderValue::Typed(value) => value.to_header_string(),
        }
    }

    /// Replace a typed value with its wire text in place.
    ///
    /// Returns `true` when a conversion happened.
    pub(crate) fn materialize(&mut self) -> bool {
        match self {
            HeaderValue::Typed(value) => {
                *self = HeaderValue::Raw(value.to_header_string());
                true
            }
            HeaderValue::Raw(_) => false,
        }
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Raw(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Raw(value.to_string())
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_string())
    }
}
