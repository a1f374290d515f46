//! herald-core: mutable HTTP messages built on the `herald-http` codecs.
//!
//! - **headers**: an ordered, case-insensitive header store whose values are
//!   either wire text or typed objects converted on first string read, plus
//!   typed getters for the well-known headers.
//! - **response**: a mutable outbound response with a builder, pluggable
//!   entity workers and a conversion to [`http::Response`].

pub mod config;
pub mod error;
pub mod headers;
pub mod response;

// Top-level re-exports for common usage
pub use crate::config::HeadersConfig;
pub use crate::error::{MessageError, Result};
pub use crate::headers::{HeaderDelegate, HeaderValue, MutableHeaders};
pub use crate::response::{MutableResponse, ResponseBuilder};
pub use herald_http::types;
