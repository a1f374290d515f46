//! Character classes of the RFC 2616 / RFC 7230 header grammar.

/// Lexical class of a single header character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Token,
    /// `"`, opens a quoted string.
    QuotedString,
    /// `(`, opens a comment.
    Comment,
    Separator,
    Control,
    WhiteSpace,
}

/// The separator characters, excluding the whitespace pair.
pub const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={}";

const fn build_table() -> [CharClass; 128] {
    let mut table = [CharClass::Token; 128];
    let mut i = 0;
    while i < 32 {
        table[i] = CharClass::Control;
        i += 1;
    }
    table[127] = CharClass::Control;

    let mut s = 0;
    while s < SEPARATORS.len() {
        table[SEPARATORS[s] as usize] = CharClass::Separator;
        s += 1;
    }
    table[b'"' as usize] = CharClass::QuotedString;
    table[b'(' as usize] = CharClass::Comment;
    table[b' ' as usize] = CharClass::WhiteSpace;
    table[b'\t' as usize] = CharClass::WhiteSpace;
    table
}

static CLASSES: [CharClass; 128] = build_table();

/// Classify a character. Anything outside ASCII is a control character.
#[inline]
#[must_use]
pub fn char_class(c: char) -> CharClass {
    if c.is_ascii() {
        CLASSES[c as usize]
    } else {
        CharClass::Control
    }
}

#[inline]
#[must_use]
pub fn is_token_char(c: char) -> bool {
    char_class(c) == CharClass::Token
}

#[inline]
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// `true` for every separator, including `"`, `(`, space and tab.
#[inline]
#[must_use]
pub fn is_separator(c: char) -> bool {
    matches!(
        char_class(c),
        CharClass::Separator | CharClass::QuotedString | CharClass::Comment | CharClass::WhiteSpace
    )
}

/// `true` if `s` is a non-empty run of token characters.
#[must_use]
pub fn is_token_string(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

#[must_use]
pub fn contains_whitespace(s: &str) -> bool {
    s.chars().any(is_whitespace)
}

/// Copy `s`, dropping CR/LF and resolving backslash escapes.
///
/// With `preserve_backslash` the escaping backslash is kept and only line
/// breaks are removed.
#[must_use]
pub fn filter_token(s: &str, preserve_backslash: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if !preserve_backslash => {
                if let Some(escaped) = chars.next() {
                    if escaped != '\r' && escaped != '\n' {
                        out.push(escaped);
                    }
                }
            }
            '\r' | '\n' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(char_class('a'), CharClass::Token);
        assert_eq!(char_class('*'), CharClass::Token);
        assert_eq!(char_class(';'), CharClass::Separator);
        assert_eq!(char_class('"'), CharClass::QuotedString);
        assert_eq!(char_class('('), CharClass::Comment);
        assert_eq!(char_class(')'), CharClass::Separator);
        assert_eq!(char_class(' '), CharClass::WhiteSpace);
        assert_eq!(char_class('\u{7f}'), CharClass::Control);
        assert_eq!(char_class('é'), CharClass::Control);
    }

    #[test]
    fn test_token_string() {
        assert!(is_token_string("UTF-8"));
        assert!(!is_token_string("a b"));
        assert!(!is_token_string(""));
        assert!(!is_token_string("a/b"));
    }

    #[test]
    fn test_separators() {
        for c in "()<>@,;:\\\"/[]?={} \t".chars() {
            assert!(is_separator(c), "{c:?}");
        }
        assert!(!is_separator('-'));
    }

    #[test]
    fn test_filter_token() {
        assert_eq!(filter_token(r#"a\"b"#, false), "a\"b");
        assert_eq!(filter_token(r#"a\"b"#, true), r#"a\"b"#);
        assert_eq!(filter_token("a\r\nb", false), "ab");
    }
}
