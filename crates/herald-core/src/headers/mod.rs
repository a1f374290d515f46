//! Mutable, multi-valued header store.
//!
//! Values are written either as wire text or as typed objects
//! ([`HeaderValue::Typed`]). Typed values stay unconverted until a string view
//! of their header is requested; [`MutableHeaders::materialize`] then replaces
//! each of them with its wire text, once. Typed getters (see `typed.rs`) read
//! typed values directly and parse raw ones.
//!
//! ```
//! use herald_core::headers::MutableHeaders;
//! use herald_http::types::MediaType;
//!
//! let mut headers = MutableHeaders::new();
//! headers.header("Content-Type", MediaType::application_json());
//! assert_eq!(headers.pending_typed("content-type"), 1);
//!
//! assert_eq!(headers.header_string("Content-Type").as_deref(), Some("application/json"));
//! assert_eq!(headers.pending_typed("content-type"), 0);
//! ```

mod typed;
pub mod value;

pub use value::{HeaderDelegate, HeaderValue};

use crate::config::HeadersConfig;
use crate::error::Result;
use http::header::{HeaderMap, HeaderName};

#[derive(Clone, Debug)]
struct HeaderEntry {
    name: String,
    values: Vec<HeaderValue>,
}

/// Ordered, case-insensitive header multimap.
///
/// Names keep the spelling they were first written with. Cloning copies the
/// entries; typed objects are shared, not deep-copied.
#[derive(Clone, Debug, Default)]
pub struct MutableHeaders {
    entries: Vec<HeaderEntry>,
    config: HeadersConfig,
}

impl MutableHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: HeadersConfig) -> Self {
        MutableHeaders {
            entries: Vec::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &HeadersConfig {
        &self.config
    }

    /// Number of distinct header names.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Values stored under `name`, typed ones left as they are.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[HeaderValue]> {
        self.position(name).map(|i| self.entries[i].values.as_slice())
    }

    /// Number of typed values under `name` still waiting for conversion.
    #[must_use]
    pub fn pending_typed(&self, name: &str) -> usize {
        self.get(name)
            .map_or(0, |values| values.iter().filter(|v| v.is_typed()).count())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
    }

    fn entry_mut(&mut self, name: String) -> &mut Vec<HeaderValue> {
        let index = match self.position(&name) {
            Some(index) => index,
            None => {
                self.entries.push(HeaderEntry {
                    name,
                    values: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].values
    }

    /// Append a typed value.
    pub fn header<T: HeaderDelegate>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.entry_mut(name.into()).push(HeaderValue::typed(value));
        self
    }

    /// Append a raw value.
    pub fn header_str(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entry_mut(name.into()).push(HeaderValue::Raw(value.into()));
        self
    }

    /// Append several values.
    pub fn headers<I>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<HeaderValue>,
    {
        self.entry_mut(name.into())
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Replace every value of `name`; an empty `values` removes the header.
    pub fn replace<I>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<HeaderValue>,
    {
        let name = name.into();
        let values: Vec<HeaderValue> = values.into_iter().map(Into::into).collect();
        self.remove(&name);
        if !values.is_empty() {
            self.entry_mut(name).extend(values);
        }
        self
    }

    /// Drop every header, then write the given ones.
    pub fn replace_all<I, N, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: IntoIterator,
        V::Item: Into<HeaderValue>,
    {
        self.entries.clear();
        for (name, values) in headers {
            self.headers(name, values);
        }
        self
    }

    /// Remove `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<HeaderValue>> {
        self.position(name).map(|i| self.entries.remove(i).values)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Convert every typed value of `name` to wire text.
    ///
    /// Returns how many values were converted; a second call returns 0.
    pub fn materialize(&mut self, name: &str) -> usize {
        let Some(index) = self.position(name) else {
            return 0;
        };
        let entry = &mut self.entries[index];
        let converted = entry
            .values
            .iter_mut()
            .map(HeaderValue::materialize)
            .filter(|converted| *converted)
            .count();
        if converted > 0 {
            tracing::trace!(header = %entry.name, converted, "Materialized typed header values");
        }
        converted
    }

    /// Materialize every header.
    pub fn materialize_all(&mut self) -> usize {
        let names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        names.iter().map(|name| self.materialize(name)).sum()
    }

    /// Wire text of every value of `name`.
    pub fn header_values(&mut self, name: &str) -> Option<Vec<&str>> {
        self.materialize(name);
        self.get(name)
            .map(|values| values.iter().filter_map(HeaderValue::as_raw).collect())
    }

    /// All values of `name` joined with the configured separator.
    ///
    /// `None` when the header is absent, `""` when it has no values.
    pub fn header_string(&mut self, name: &str) -> Option<String> {
        let separator = self.config.value_separator.to_string();
        self.header_values(name).map(|values| values.join(&separator))
    }

    pub fn first_value(&mut self, name: &str) -> Option<&str> {
        self.header_values(name)
            .and_then(|values| values.into_iter().next())
    }

    /// Every header as wire text, in insertion order.
    pub fn string_headers(&mut self) -> Vec<(String, Vec<String>)> {
        self.materialize_all();
        self.entries
            .iter()
            .map(|e| {
                let values = e
                    .values
                    .iter()
                    .filter_map(|v| v.as_raw().map(str::to_string))
                    .collect();
                (e.name.clone(), values)
            })
            .collect()
    }

    /// Materialize everything into an [`http::HeaderMap`].
    pub fn to_header_map(&mut self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, values) in self.string_headers() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            for value in values {
                map.append(name.clone(), http::HeaderValue::from_str(&value)?);
            }
        }
        Ok(map)
    }

    /// Join the values of `name` without materializing them.
    fn joined(&self, name: &str) -> Option<String> {
        let separator = self.config.value_separator.to_string();
        self.get(name).map(|values| {
            values
                .iter()
                .map(HeaderValue::to_header_string)
                .collect::<Vec<_>>()
                .join(&separator)
        })
    }
}

impl From<&HeaderMap> for MutableHeaders {
    fn from(map: &HeaderMap) -> Self {
        let mut headers = MutableHeaders::new();
        for (name, value) in map {
            headers.header_str(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_http::types::{EntityTag, MediaType};

    #[test]
    fn test_names_are_case_insensitive() {
        let mut headers = MutableHeaders::new();
        headers.header_str("X-Custom", "a").header_str("x-custom", "b");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.names().collect::<Vec<_>>(), vec!["X-Custom"]);
        assert_eq!(headers.header_values("X-CUSTOM"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_materialize_happens_once() {
        let mut headers = MutableHeaders::new();
        headers.header("ETag", EntityTag::new("abc"));
        assert_eq!(headers.pending_typed("etag"), 1);

        assert_eq!(headers.materialize("etag"), 1);
        assert_eq!(headers.materialize("etag"), 0);
        assert_eq!(headers.pending_typed("etag"), 0);
        assert_eq!(headers.header_values("ETag"), Some(vec!["\"abc\""]));
        assert_eq!(headers.header_values("ETag"), Some(vec!["\"abc\""]));
    }

    #[test]
    fn test_mixed_values_keep_order() {
        let mut headers = MutableHeaders::new();
        headers
            .header_str("Accept", "text/html")
            .header("Accept", MediaType::application_json())
            .header_str("Accept", "*/*");
        assert_eq!(headers.pending_typed("Accept"), 1);
        assert_eq!(
            headers.header_string("Accept").as_deref(),
            Some("text/html,application/json,*/*")
        );
    }

    #[test]
    fn test_header_string_edge_cases() {
        let mut headers = MutableHeaders::with_config(HeadersConfig {
            value_separator: ';',
            ..Default::default()
        });
        assert_eq!(headers.header_string("Missing"), None);

        headers.headers("Empty", Vec::<HeaderValue>::new());
        assert_eq!(headers.header_string("Empty").as_deref(), Some(""));

        headers.headers("Pair", ["a", "b"]);
        assert_eq!(headers.header_string("Pair").as_deref(), Some("a;b"));
        assert_eq!(headers.first_value("pair"), Some("a"));
    }

    #[test]
    fn test_replace_and_remove() {
        let mut headers = MutableHeaders::new();
        headers
            .header("Content-Length", 10_i64)
            .header_str("Vary", "Accept");

        headers.replace("content-length", ["20"]);
        assert_eq!(headers.pending_typed("Content-Length"), 0);
        assert_eq!(headers.header_values("Content-Length"), Some(vec!["20"]));

        headers.replace("Vary", Vec::<HeaderValue>::new());
        assert!(!headers.contains("Vary"));

        let removed = headers.remove("CONTENT-LENGTH").unwrap();
        assert_eq!(removed.len(), 1);
        assert!(headers.is_empty());
        assert!(headers.remove("Content-Length").is_none());
    }

    #[test]
    fn test_replace_all() {
        let mut headers = MutableHeaders::new();
        headers.header_str("Old", "1");
        headers.replace_all([
            ("Allow", vec![HeaderValue::from("GET")]),
            ("ETag", vec![HeaderValue::typed(EntityTag::weak("x"))]),
        ]);
        assert!(!headers.contains("Old"));
        assert_eq!(headers.names().collect::<Vec<_>>(), vec!["Allow", "ETag"]);
        assert_eq!(headers.pending_typed("ETag"), 1);
    }

    #[test]
    fn test_clone_is_structural() {
        let mut original = MutableHeaders::new();
        original.header("ETag", EntityTag::new("v"));
        let mut copy = original.clone();
        copy.header_str("Vary", "Accept");
        copy.materialize("ETag");

        assert!(!original.contains("Vary"));
        assert_eq!(original.pending_typed("ETag"), 1);
        assert_eq!(copy.pending_typed("ETag"), 0);
    }

    #[test]
    fn test_string_headers_and_header_map() {
        let mut headers = MutableHeaders::new();
        headers
            .header("Content-Type", MediaType::text_plain())
            .header_str("Set-Cookie", "a=1")
            .header_str("Set-Cookie", "b=2");
        assert_eq!(
            headers.string_headers(),
            vec![
                ("Content-Type".to_string(), vec!["text/plain".to_string()]),
                (
                    "Set-Cookie".to_string(),
                    vec!["a=1".to_string(), "b=2".to_string()]
                ),
            ]
        );

        let map = headers.to_header_map().unwrap();
        assert_eq!(map.get_all("set-cookie").iter().count(), 2);
        assert_eq!(map["content-type"], "text/plain");

        headers.header_str("Bad", "line\nbreak");
        assert!(headers.to_header_map().is_err());
    }

    #[test]
    fn test_from_header_map() {
        let mut map = HeaderMap::new();
        map.append("accept", http::HeaderValue::from_static("text/html"));
        map.append("accept", http::HeaderValue::from_static("*/*"));
        let mut headers = MutableHeaders::from(&map);
        assert_eq!(headers.header_values("Accept"), Some(vec!["text/html", "*/*"]));
    }
}
