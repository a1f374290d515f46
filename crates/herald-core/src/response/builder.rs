//! Builder for [`MutableResponse`].

use super::entity::Entity;
use super::workers::{DefaultWorkers, MessageBodyWorkers};
use super::MutableResponse;
use crate::headers::{HeaderDelegate, HeaderValue, MutableHeaders};
use herald_http::protocol::constants::headers as names;
use herald_http::types::{EntityTag, Link, MediaType, NewCookie};
use http::StatusCode;
use std::any::Any;
use std::sync::Arc;

/// Accumulates status, headers and entity, then builds a response.
///
/// Each `build` produces an independent response; the builder can keep
/// being used afterwards.
///
/// ```
/// use herald_core::response::ResponseBuilder;
/// use herald_http::types::MediaType;
/// use http::StatusCode;
///
/// let mut response = ResponseBuilder::ok()
///     .media_type(MediaType::text_plain())
///     .entity(String::from("hello"))
///     .build();
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.headers_mut().header_string("content-type").as_deref(), Some("text/plain"));
/// ```
#[derive(Clone, Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: MutableHeaders,
    entity: Option<Entity>,
    workers: Arc<dyn MessageBodyWorkers>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        ResponseBuilder {
            status: StatusCode::NO_CONTENT,
            headers: MutableHeaders::new(),
            entity: None,
            workers: Arc::new(DefaultWorkers),
        }
    }
}

impl ResponseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ok() -> Self {
        Self::new().status(StatusCode::OK)
    }

    pub(crate) fn from_parts(
        status: StatusCode,
        headers: MutableHeaders,
        entity: Option<Entity>,
        workers: Arc<dyn MessageBodyWorkers>,
    ) -> Self {
        ResponseBuilder {
            status,
            headers,
            entity,
            workers,
        }
    }

    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a typed header value.
    #[must_use]
    pub fn header<T: HeaderDelegate>(mut self, name: impl Into<String>, value: T) -> Self {
        self.headers.header(name, value);
        self
    }

    /// Append a raw header value.
    #[must_use]
    pub fn header_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.header_str(name, value);
        self
    }

    #[must_use]
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.headers
            .replace(names::CONTENT_TYPE.as_str(), [HeaderValue::typed(media_type)]);
        self
    }

    #[must_use]
    pub fn entity_tag(mut self, tag: EntityTag) -> Self {
        self.headers
            .replace(names::ETAG.as_str(), [HeaderValue::typed(tag)]);
        self
    }

    #[must_use]
    pub fn cookie(mut self, cookie: NewCookie) -> Self {
        self.headers.header(names::SET_COOKIE.as_str(), cookie);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.headers.header(names::LINK.as_str(), link);
        self
    }

    #[must_use]
    pub fn entity<T: Any + Send + Sync>(mut self, entity: T) -> Self {
        self.entity = Some(Entity::new(entity));
        self
    }

    #[must_use]
    pub fn workers(mut self, workers: Arc<dyn MessageBodyWorkers>) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn build(&self) -> MutableResponse {
        MutableResponse::from_parts(
            self.status,
            self.headers.clone(),
            self.entity.clone(),
            Arc::clone(&self.workers),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let response = ResponseBuilder::new().build();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!response.has_entity());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_builds_are_independent() {
        let builder = ResponseBuilder::ok().header_str("Vary", "Accept");
        let mut first = builder.build();
        first.headers_mut().header_str("Vary", "Cookie");
        let mut second = builder.clone().entity_tag(EntityTag::new("1")).build();

        assert_eq!(second.headers_mut().header_values("vary"), Some(vec!["Accept"]));
        assert_eq!(first.headers_mut().header_values("vary"), Some(vec!["Accept", "Cookie"]));
        assert!(!first.headers().contains("ETag"));
    }

    #[test]
    fn test_typed_headers() {
        let mut response = ResponseBuilder::ok()
            .cookie(NewCookie::new("a", "1"))
            .link(Link::builder("/next").rel("next").build())
            .media_type(MediaType::text_plain())
            .media_type(MediaType::application_json())
            .build();
        let headers = response.headers_mut();
        assert_eq!(headers.pending_typed("Set-Cookie"), 1);
        assert!(headers.has_link("next").unwrap());
        assert_eq!(headers.media_type().unwrap(), Some(MediaType::application_json()));
    }
}
