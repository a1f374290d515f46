//! HTTP header grammar and typed header codecs.
//!
//! The [`protocol`] module holds the tokenizer ([`HttpHeaderReader`]), the
//! comma separated list adapter, parameter and quality readers, HTTP date
//! handling and one reader function per header shape. The [`types`] module
//! holds the typed values those readers produce: cookies, media types,
//! entity tags, links, language tags and parameterized headers.
//!
//! ```
//! use herald_http::protocol::read_accept_media_type;
//! use herald_http::types::MediaType;
//!
//! let accept = read_accept_media_type("text/*;q=0.5, application/json").unwrap();
//! assert_eq!(accept[0].media_type(), &MediaType::application_json());
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod types;

pub use config::ParserConfig;
pub use error::{HeaderError, ParseError, Result};
pub use protocol::{HeaderReader, HttpHeaderReader};
