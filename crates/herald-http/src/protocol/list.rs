//! Comma separated list support.
//!
//! A header such as `Accept: text/html, application/json;q=0.5` is a list of
//! elements, each of which is parsed by the same codec that parses a single
//! value. [`HttpHeaderListAdapter`] makes one element look like a complete
//! header by treating the next top-level `,` as the end of input.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::protocol::reader::{EventKind, HeaderReader, HttpHeaderReader};
use crate::protocol::quality::{quality_comparator, Qualified};
use std::cmp::Ordering;

const LIST_SEPARATOR: char = ',';

/// View of one list element over an underlying reader.
///
/// Once the underlying reader reaches a `,` the adapter is terminated:
/// `has_next` reports `false` and every advance fails with "End of header"
/// until [`reset`](Self::reset) is called. The `,` itself is left for the
/// caller to consume.
#[derive(Debug)]
pub struct HttpHeaderListAdapter<'r, R: HeaderReader + ?Sized> {
    reader: &'r mut R,
    terminated: bool,
}

impl<'r, R: HeaderReader + ?Sized> HttpHeaderListAdapter<'r, R> {
    #[must_use]
    pub fn new(reader: &'r mut R) -> Self {
        HttpHeaderListAdapter {
            reader,
            terminated: false,
        }
    }

    /// Clear the terminated state so the next element can be read.
    pub fn reset(&mut self) {
        self.terminated = false;
    }

    #[inline]
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Access the underlying reader, e.g. to consume the `,` between elements.
    pub fn inner_mut(&mut self) -> &mut R {
        self.reader
    }

    fn at_list_separator(&mut self, skip_whitespace: bool) -> bool {
        if self.terminated {
            return true;
        }
        if self.reader.has_next_separator(LIST_SEPARATOR, skip_whitespace) {
            self.terminated = true;
        }
        self.terminated
    }
}

impl<R: HeaderReader + ?Sized> HeaderReader for HttpHeaderListAdapter<'_, R> {
    fn has_next(&mut self) -> bool {
        if self.terminated || !self.reader.has_next() {
            return false;
        }
        !self.at_list_separator(true)
    }

    fn has_next_separator(&mut self, separator: char, skip_whitespace: bool) -> bool {
        if self.at_list_separator(skip_whitespace) {
            return false;
        }
        self.reader.has_next_separator(separator, skip_whitespace)
    }

    fn next_event(
        &mut self,
        skip_whitespace: bool,
        preserve_backslash: bool,
    ) -> Result<EventKind, ParseError> {
        if self.at_list_separator(skip_whitespace) {
            return Err(ParseError::end_of_header(self.reader.index()));
        }
        self.reader.next_event(skip_whitespace, preserve_backslash)
    }

    fn next_separated_string(&mut self, start: char, end: char) -> Result<String, ParseError> {
        if self.at_list_separator(false) {
            return Err(ParseError::end_of_header(self.reader.index()));
        }
        self.reader.next_separated_string(start, end)
    }

    fn peek_kind(&mut self, skip_whitespace: bool) -> EventKind {
        if self.at_list_separator(skip_whitespace) {
            return EventKind::End;
        }
        self.reader.peek_kind(skip_whitespace)
    }

    fn event_kind(&self) -> EventKind {
        self.reader.event_kind()
    }

    fn event_value(&self) -> &str {
        self.reader.event_value()
    }

    fn remainder(&self) -> &str {
        self.reader.remainder()
    }

    fn index(&self) -> usize {
        self.reader.index()
    }

    fn config(&self) -> &ParserConfig {
        self.reader.config()
    }
}

/// Parse a comma separated header into its elements.
///
/// `create` is handed a reader that ends at the next top-level `,`. An empty
/// header yields an empty list; elements must be separated by `,`.
pub fn read_list<T, E, F>(header: &str, config: &ParserConfig, mut create: F) -> Result<Vec<T>, E>
where
    F: FnMut(&mut dyn HeaderReader) -> Result<T, E>,
    E: From<ParseError>,
{
    let mut reader = HttpHeaderReader::with_config(header, config);
    let mut adapter = HttpHeaderListAdapter::new(&mut reader);
    let mut items = Vec::new();
    while adapter.inner_mut().has_next() {
        items.push(create(&mut adapter)?);
        adapter.reset();
        if adapter.inner_mut().has_next() {
            adapter.inner_mut().next_separator(LIST_SEPARATOR)?;
        }
    }
    Ok(items)
}

/// [`read_list`] followed by a stable sort with `compare`.
pub fn read_sorted_list<T, E, F, C>(
    header: &str,
    config: &ParserConfig,
    create: F,
    compare: C,
) -> Result<Vec<T>, E>
where
    F: FnMut(&mut dyn HeaderReader) -> Result<T, E>,
    E: From<ParseError>,
    C: FnMut(&T, &T) -> Ordering,
{
    let mut items = read_list(header, config, create)?;
    items.sort_by(compare);
    Ok(items)
}

/// Parse a list of quality-bearing elements, highest quality first.
///
/// Elements of equal quality keep their header order.
pub fn read_qualified_list<T, E, F>(
    header: &str,
    config: &ParserConfig,
    create: F,
) -> Result<Vec<T>, E>
where
    T: Qualified,
    F: FnMut(&mut dyn HeaderReader) -> Result<T, E>,
    E: From<ParseError>,
{
    read_sorted_list(header, config, create, quality_comparator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(header: &str) -> Result<Vec<String>, ParseError> {
        read_list(header, &ParserConfig::default(), |r| r.next_token())
    }

    #[test]
    fn test_adapter_terminates_at_comma() {
        let mut reader = HttpHeaderReader::new("a, b, c");
        let mut adapter = HttpHeaderListAdapter::new(&mut reader);
        let mut seen = Vec::new();
        loop {
            seen.push(adapter.next_token().unwrap());
            assert!(!adapter.has_next());
            assert!(adapter.next().is_err());
            adapter.reset();
            if !adapter.inner_mut().has_next() {
                break;
            }
            adapter.inner_mut().next_separator(',').unwrap();
        }
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert!(!adapter.has_next());
    }

    #[test]
    fn test_read_list() {
        assert_eq!(tokens("a, b, c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(tokens("  single ").unwrap(), vec!["single"]);
        assert!(tokens("").unwrap().is_empty());
    }

    #[test]
    fn test_comma_inside_quotes_is_not_a_separator() {
        let values = read_list("\"a,b\", c", &ParserConfig::default(), |r| {
            r.next_token_or_quoted_string(false)
        })
        .unwrap();
        assert_eq!(values, vec!["a,b", "c"]);
    }

    #[test]
    fn test_unconsumed_element_is_an_error() {
        assert!(tokens("a b, c").is_err());
        assert!(tokens("a,,b").is_err());
    }

    #[test]
    fn test_separator_lookahead_inside_element() {
        let mut reader = HttpHeaderReader::new("x;y, z");
        let mut adapter = HttpHeaderListAdapter::new(&mut reader);
        adapter.next_token().unwrap();
        assert!(adapter.has_next_separator(';', true));
        adapter.next().unwrap();
        adapter.next_token().unwrap();
        assert!(!adapter.has_next_separator(';', true));
        assert_eq!(adapter.peek_kind(true), EventKind::End);
        assert!(adapter.is_terminated());
    }

    #[test]
    fn test_sorted_list_is_stable() {
        let sorted = read_sorted_list(
            "bb, a, cc, d",
            &ParserConfig::default(),
            |r| r.next_token(),
            |x: &String, y: &String| x.len().cmp(&y.len()),
        )
        .unwrap();
        assert_eq!(sorted, vec!["a", "d", "bb", "cc"]);
    }
}
