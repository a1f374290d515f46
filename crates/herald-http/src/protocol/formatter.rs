//! Helpers for writing header values.
//!
//! All helpers append to a `String` buffer so typed values can be formatted
//! without intermediate allocations.

use crate::protocol::grammar::{contains_whitespace, is_token_string};
use crate::types::Parameters;

/// Append `value`, escaping every `"` and `\` with a backslash.
pub fn append_escaping_quotes(buffer: &mut String, value: &str) {
    for c in value.chars() {
        if c == '"' || c == '\\' {
            buffer.push('\\');
        }
        buffer.push(c);
    }
}

/// Append `value` as a quoted string.
pub fn append_quoted(buffer: &mut String, value: &str) {
    buffer.push('"');
    append_escaping_quotes(buffer, value);
    buffer.push('"');
}

/// Append `value` bare when it is a token, quoted otherwise.
pub fn append_quoted_if_non_token(buffer: &mut String, value: &str) {
    if is_token_string(value) {
        buffer.push_str(value);
    } else {
        append_quoted(buffer, value);
    }
}

/// Append `value` quoted only when it contains whitespace.
pub fn append_quoted_if_whitespace(buffer: &mut String, value: &str) {
    if contains_whitespace(value) {
        append_quoted(buffer, value);
    } else {
        buffer.push_str(value);
    }
}

/// Append `;name=value` for every parameter, quoting non-token values.
pub fn append_parameters(buffer: &mut String, parameters: &Parameters) {
    for (name, value) in parameters.iter() {
        buffer.push(';');
        buffer.push_str(name);
        buffer.push('=');
        append_quoted_if_non_token(buffer, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl Fn(&mut String, &str), value: &str) -> String {
        let mut buffer = String::new();
        f(&mut buffer, value);
        buffer
    }

    #[test]
    fn test_append_quoted() {
        assert_eq!(with(append_quoted, r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(with(append_quoted, ""), r#""""#);
        assert_eq!(with(append_quoted, r"C:\dir"), r#""C:\\dir""#);
    }

    #[test]
    fn test_backslash_survives_reader() {
        use crate::protocol::reader::{HeaderReader, HttpHeaderReader};

        let value = r#"a\b "c" \"#;
        let quoted = with(append_quoted, value);
        let mut reader = HttpHeaderReader::new(&quoted);
        assert_eq!(reader.next_quoted_string().unwrap(), value);
    }

    #[test]
    fn test_append_quoted_if_non_token() {
        assert_eq!(with(append_quoted_if_non_token, "UTF-8"), "UTF-8");
        assert_eq!(with(append_quoted_if_non_token, "a b"), "\"a b\"");
        assert_eq!(with(append_quoted_if_non_token, "a/b"), "\"a/b\"");
        assert_eq!(with(append_quoted_if_non_token, ""), "\"\"");
    }

    #[test]
    fn test_append_quoted_if_whitespace() {
        assert_eq!(with(append_quoted_if_whitespace, "/a/b"), "/a/b");
        assert_eq!(with(append_quoted_if_whitespace, "a b"), "\"a b\"");
    }

    #[test]
    fn test_append_parameters() {
        let params: Parameters = [("charset", "UTF-8"), ("title", "x y")].into_iter().collect();
        let mut buffer = String::from("text/plain");
        append_parameters(&mut buffer, &params);
        assert_eq!(buffer, "text/plain;charset=UTF-8;title=\"x y\"");
    }
}
