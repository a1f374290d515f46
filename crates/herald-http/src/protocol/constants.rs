//! Header names, media types and well-known parameter names.
//!
//! ```text
//! constants/
//! ├── headers      - Header names handled by the typed codecs (typed)
//! ├── media_types  - Well-known media type strings
//! ├── params       - Parameter names shared by several codecs
//! └── cookie_attrs - Set-Cookie / Cookie attribute names
//! ```
//!
//! # Examples
//!
//! ```
//! use herald_http::protocol::constants::{headers, media_types};
//!
//! assert_eq!(headers::CONTENT_TYPE.as_str(), "content-type");
//! assert_eq!(media_types::WILDCARD, "*/*");
//! ```

/// Wildcard used for "any type" / "any subtype" / "any language".
pub const WILDCARD: &str = "*";

// =============================================================================
// Header Names Module
// =============================================================================

/// Names of the headers with a typed representation.
///
/// These are `http::HeaderName` constants, compared case-insensitively by
/// the header store.
pub mod headers {
    use http::HeaderName;

    pub const ACCEPT: HeaderName = http::header::ACCEPT;
    pub const ACCEPT_CHARSET: HeaderName = http::header::ACCEPT_CHARSET;
    pub const ACCEPT_ENCODING: HeaderName = http::header::ACCEPT_ENCODING;
    pub const ACCEPT_LANGUAGE: HeaderName = http::header::ACCEPT_LANGUAGE;
    pub const ALLOW: HeaderName = http::header::ALLOW;
    pub const CONTENT_DISPOSITION: HeaderName = http::header::CONTENT_DISPOSITION;
    pub const CONTENT_LANGUAGE: HeaderName = http::header::CONTENT_LANGUAGE;
    pub const CONTENT_LENGTH: HeaderName = http::header::CONTENT_LENGTH;
    pub const CONTENT_TYPE: HeaderName = http::header::CONTENT_TYPE;
    pub const COOKIE: HeaderName = http::header::COOKIE;
    pub const DATE: HeaderName = http::header::DATE;
    pub const ETAG: HeaderName = http::header::ETAG;
    pub const IF_MATCH: HeaderName = http::header::IF_MATCH;
    pub const IF_NONE_MATCH: HeaderName = http::header::IF_NONE_MATCH;
    pub const LAST_MODIFIED: HeaderName = http::header::LAST_MODIFIED;
    pub const LINK: HeaderName = http::header::LINK;
    pub const LOCATION: HeaderName = http::header::LOCATION;
    pub const SET_COOKIE: HeaderName = http::header::SET_COOKIE;
    pub const VARY: HeaderName = http::header::VARY;
}

// =============================================================================
// Media Types Module
// =============================================================================

/// Well-known media type strings.
pub mod media_types {
    pub const WILDCARD: &str = "*/*";
    pub const TEXT_PLAIN: &str = "text/plain";
    pub const TEXT_HTML: &str = "text/html";
    pub const TEXT_XML: &str = "text/xml";
    pub const APPLICATION_JSON: &str = "application/json";
    pub const APPLICATION_XML: &str = "application/xml";
    pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
    pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
}

// =============================================================================
// Parameter Names Module
// =============================================================================

pub mod params {
    pub const CHARSET: &str = "charset";
    pub const QUALITY: &str = crate::protocol::quality::QUALITY_PARAMETER_NAME;
    pub const QUALITY_SOURCE: &str = crate::protocol::quality::QUALITY_SOURCE_PARAMETER_NAME;
    pub const REL: &str = "rel";
    pub const TITLE: &str = "title";
    pub const TYPE: &str = "type";
}

// =============================================================================
// Cookie Attribute Names Module
// =============================================================================

/// Cookie attribute names, matched case-insensitively.
pub mod cookie_attrs {
    pub const VERSION: &str = "Version";
    pub const COMMENT: &str = "Comment";
    pub const DOMAIN: &str = "Domain";
    pub const PATH: &str = "Path";
    pub const MAX_AGE: &str = "Max-Age";
    pub const SECURE: &str = "Secure";
    pub const HTTP_ONLY: &str = "HttpOnly";
    pub const EXPIRES: &str = "Expires";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names() {
        assert_eq!(headers::ACCEPT.as_str(), "accept");
        assert_eq!(headers::SET_COOKIE.as_str(), "set-cookie");
        assert_eq!(headers::LAST_MODIFIED.as_str(), "last-modified");
    }

    #[test]
    fn test_param_names() {
        assert_eq!(params::QUALITY, "q");
        assert_eq!(params::QUALITY_SOURCE, "qs");
    }
}
