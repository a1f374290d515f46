//! Cursor-based lexer over a single header value.
//!
//! [`HttpHeaderReader`] walks the header left to right and classifies one
//! lexical unit per call to [`HeaderReader::next_event`]: tokens, quoted
//! strings, comments, separators and control characters. Typed codecs drive
//! a reader through the [`HeaderReader`] trait so the same parsing code works
//! on a whole header and on one element of a comma separated list (see
//! [`HttpHeaderListAdapter`](crate::protocol::HttpHeaderListAdapter)).
//!
//! ```
//! use herald_http::protocol::{EventKind, HeaderReader, HttpHeaderReader};
//!
//! let mut reader = HttpHeaderReader::new("text/html; q=0.5");
//! assert_eq!(reader.next_token().unwrap(), "text");
//! reader.next_separator('/').unwrap();
//! assert_eq!(reader.next_token().unwrap(), "html");
//! assert_eq!(reader.next().unwrap(), EventKind::Separator);
//! ```

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::protocol::grammar::{
    char_class, filter_token, is_separator, is_token_char, is_whitespace, CharClass,
};
use std::borrow::Cow;

/// Kind of the lexical unit produced by the last advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Token,
    QuotedString,
    Comment,
    Separator,
    Control,
    /// Nothing consumable remains. Reported by `peek_kind` and by a fresh
    /// reader; `next_event` fails with "End of header" instead.
    End,
}

/// The last event produced by a reader, overwritten on every advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEvent<'a> {
    pub kind: EventKind,
    /// Index at which the unit started.
    pub index: usize,
    /// Token text, unescaped quoted-string or comment content, or the
    /// separator/control character itself.
    pub value: Cow<'a, str>,
}

impl HeaderEvent<'_> {
    fn end(index: usize) -> Self {
        HeaderEvent {
            kind: EventKind::End,
            index,
            value: Cow::Borrowed(""),
        }
    }
}

/// Pull-style access to the lexical units of a header value.
///
/// Implementors provide the primitive operations; the typed helpers
/// (`next_token`, `next_separator`, ...) are shared.
pub trait HeaderReader {
    /// Skip whitespace and report whether anything remains.
    fn has_next(&mut self) -> bool;

    /// Report whether the next character is `separator`, optionally skipping
    /// whitespace first. Never consumes the separator.
    fn has_next_separator(&mut self, separator: char, skip_whitespace: bool) -> bool;

    /// Consume and classify the next lexical unit.
    fn next_event(
        &mut self,
        skip_whitespace: bool,
        preserve_backslash: bool,
    ) -> Result<EventKind, ParseError>;

    /// Consume `start`, then everything up to (and including) `end`, and
    /// return the text in between.
    fn next_separated_string(&mut self, start: char, end: char) -> Result<String, ParseError>;

    /// Classify the next unit without consuming it.
    fn peek_kind(&mut self, skip_whitespace: bool) -> EventKind;

    fn event_kind(&self) -> EventKind;

    fn event_value(&self) -> &str;

    /// The unread part of the header.
    fn remainder(&self) -> &str;

    /// Current cursor position (byte offset).
    fn index(&self) -> usize;

    fn config(&self) -> &ParserConfig;

    /// Consume the next unit, skipping leading whitespace.
    fn next(&mut self) -> Result<EventKind, ParseError> {
        self.next_event(true, false)
    }

    fn next_token(&mut self) -> Result<String, ParseError> {
        match self.next_event(false, false)? {
            EventKind::Token => Ok(self.event_value().to_string()),
            _ => Err(ParseError::new("Next event is not a Token", self.index())),
        }
    }

    /// Consume a separator and check that it is `expected`.
    fn next_separator(&mut self, expected: char) -> Result<(), ParseError> {
        if self.next_event(false, false)? != EventKind::Separator {
            return Err(ParseError::new("Next event is not a Separator", self.index()));
        }
        let found = self.event_value().chars().next().unwrap_or_default();
        if found != expected {
            return Err(ParseError::new(
                format!("Expected separator '{expected}' instead of '{found}'"),
                self.index(),
            ));
        }
        Ok(())
    }

    fn next_quoted_string(&mut self) -> Result<String, ParseError> {
        match self.next_event(false, false)? {
            EventKind::QuotedString => Ok(self.event_value().to_string()),
            _ => Err(ParseError::new("Next event is not a Quoted String", self.index())),
        }
    }

    fn next_token_or_quoted_string(&mut self, preserve_backslash: bool) -> Result<String, ParseError> {
        match self.next_event(false, preserve_backslash)? {
            EventKind::Token | EventKind::QuotedString => Ok(self.event_value().to_string()),
            _ => Err(ParseError::new(
                format!("Next event is not a Token or a Quoted String, {}", self.event_value()),
                self.index(),
            )),
        }
    }
}

/// The concrete tokenizer over one header value.
#[derive(Debug, Clone)]
pub struct HttpHeaderReader<'a> {
    header: &'a str,
    index: usize,
    config: ParserConfig,
    event: HeaderEvent<'a>,
}

impl<'a> HttpHeaderReader<'a> {
    #[must_use]
    pub fn new(header: &'a str) -> Self {
        Self::with_config(header, &ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(header: &'a str, config: &ParserConfig) -> Self {
        HttpHeaderReader {
            header,
            index: 0,
            config: config.clone(),
            event: HeaderEvent::end(0),
        }
    }

    /// The last event produced.
    #[inline]
    #[must_use]
    pub fn event(&self) -> &HeaderEvent<'a> {
        &self.event
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.header[self.index..].chars().next()
    }

    /// Whitespace characters are single bytes, so the cursor stays on a
    /// character boundary.
    fn skip_whitespace(&mut self) -> bool {
        while let Some(c) = self.peek_char() {
            if !is_whitespace(c) {
                return true;
            }
            self.index += 1;
        }
        false
    }

    fn next_char(&mut self, skip_whitespace: bool) -> Result<char, ParseError> {
        if skip_whitespace {
            self.skip_whitespace();
        }
        self.peek_char()
            .ok_or_else(|| ParseError::end_of_header(self.index))
    }

    fn emit(&mut self, kind: EventKind, start: usize, value: Cow<'a, str>) -> EventKind {
        self.event = HeaderEvent {
            kind,
            index: start,
            value,
        };
        kind
    }

    fn process(&mut self, c: char, preserve_backslash: bool) -> Result<EventKind, ParseError> {
        let start = self.index;
        match char_class(c) {
            CharClass::Token => {
                let end = self.header[start..]
                    .find(|c: char| !is_token_char(c))
                    .map_or(self.header.len(), |offset| start + offset);
                self.index = end;
                Ok(self.emit(EventKind::Token, start, Cow::Borrowed(&self.header[start..end])))
            }
            CharClass::QuotedString => self.process_quoted_string(preserve_backslash),
            CharClass::Comment => {
                if !self.config.process_comments {
                    return Err(ParseError::new("Comments are not allowed", start));
                }
                self.process_comment()
            }
            CharClass::Separator => {
                self.index += 1;
                Ok(self.emit(
                    EventKind::Separator,
                    start,
                    Cow::Borrowed(&self.header[start..self.index]),
                ))
            }
            CharClass::Control => {
                self.index += c.len_utf8();
                Ok(self.emit(
                    EventKind::Control,
                    start,
                    Cow::Borrowed(&self.header[start..self.index]),
                ))
            }
            CharClass::WhiteSpace => Err(ParseError::new("White space not allowed", start)),
        }
    }

    fn process_quoted_string(&mut self, preserve_backslash: bool) -> Result<EventKind, ParseError> {
        let open = self.index;
        let bytes = self.header.as_bytes();
        let mut filter = false;
        let mut i = open + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if !preserve_backslash => {
                    filter = true;
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => filter = true,
                b'"' => {
                    let raw = &self.header[open + 1..i];
                    let value = if filter {
                        Cow::Owned(filter_token(raw, preserve_backslash))
                    } else {
                        Cow::Borrowed(raw)
                    };
                    self.index = i + 1;
                    return Ok(self.emit(EventKind::QuotedString, open, value));
                }
                _ => {}
            }
            i += 1;
        }
        self.index = self.header.len();
        Err(ParseError::new("Unbalanced quoted string", self.index))
    }

    fn process_comment(&mut self) -> Result<EventKind, ParseError> {
        let open = self.index;
        let bytes = self.header.as_bytes();
        let mut filter = false;
        let mut nesting = 1usize;
        let mut i = open + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    filter = true;
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => filter = true,
                b'(' => nesting += 1,
                b')' => {
                    nesting -= 1;
                    if nesting == 0 {
                        let raw = &self.header[open + 1..i];
                        let value = if filter {
                            Cow::Owned(filter_token(raw, false))
                        } else {
                            Cow::Borrowed(raw)
                        };
                        self.index = i + 1;
                        return Ok(self.emit(EventKind::Comment, open, value));
                    }
                }
                _ => {}
            }
            i += 1;
        }
        self.index = self.header.len();
        Err(ParseError::new("Unbalanced comments", self.index))
    }
}

impl HeaderReader for HttpHeaderReader<'_> {
    fn has_next(&mut self) -> bool {
        self.skip_whitespace()
    }

    fn has_next_separator(&mut self, separator: char, skip_whitespace: bool) -> bool {
        if skip_whitespace {
            self.skip_whitespace();
        }
        match self.peek_char() {
            Some(c) => c == separator && is_separator(c),
            None => false,
        }
    }

    fn next_event(
        &mut self,
        skip_whitespace: bool,
        preserve_backslash: bool,
    ) -> Result<EventKind, ParseError> {
        let c = self.next_char(skip_whitespace)?;
        self.process(c, preserve_backslash)
    }

    fn next_separated_string(&mut self, start: char, end: char) -> Result<String, ParseError> {
        self.next_separator(start)?;
        let from = self.index;
        match self.header[from..].find(end) {
            Some(0) => Err(ParseError::new("No characters between separators", from)),
            Some(offset) => {
                let value = &self.header[from..from + offset];
                self.index = from + offset + end.len_utf8();
                self.emit(EventKind::Token, from, Cow::Borrowed(value));
                Ok(value.to_string())
            }
            None => {
                self.index = self.header.len();
                Err(ParseError::new(
                    format!("No end separator '{end}'"),
                    self.index,
                ))
            }
        }
    }

    fn peek_kind(&mut self, skip_whitespace: bool) -> EventKind {
        if skip_whitespace {
            self.skip_whitespace();
        }
        match self.peek_char().map(char_class) {
            None => EventKind::End,
            Some(CharClass::Token) => EventKind::Token,
            Some(CharClass::QuotedString) => EventKind::QuotedString,
            Some(CharClass::Comment) => EventKind::Comment,
            Some(CharClass::Separator | CharClass::WhiteSpace) => EventKind::Separator,
            Some(CharClass::Control) => EventKind::Control,
        }
    }

    fn event_kind(&self) -> EventKind {
        self.event.kind
    }

    fn event_value(&self) -> &str {
        &self.event.value
    }

    fn remainder(&self) -> &str {
        &self.header[self.index..]
    }

    fn index(&self) -> usize {
        self.index
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }
}
