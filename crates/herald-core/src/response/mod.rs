//! Mutable outbound response.
//!
//! [`MutableResponse`] holds a status, a [`MutableHeaders`] store, an optional
//! entity and the [`MessageBodyWorkers`] used to serialize it. Conversions to
//! other representations are explicit functions: [`MutableResponse::to_http_response`],
//! [`MutableResponse::string_headers`] and [`MutableResponse::to_builder`].

mod builder;
mod entity;
mod sink;
mod workers;

pub use builder::ResponseBuilder;
pub use entity::Entity;
pub use sink::NullSink;
pub use workers::{DefaultWorkers, MessageBodyWorkers};

use crate::error::{MessageError, Result};
use crate::headers::{HeaderValue, MutableHeaders};
use bytes::Bytes;
use herald_http::protocol::constants::headers as names;
use herald_http::types::MediaType;
use http::{HeaderName, StatusCode};
use serde::Serialize;
use std::any::Any;
use std::io::Write;
use std::sync::Arc;

/// An outbound response under construction.
///
/// `clone()` copies the status and the header entries; the entity object is
/// shared with the original.
#[derive(Clone, Debug)]
pub struct MutableResponse {
    status: StatusCode,
    headers: MutableHeaders,
    entity: Option<Entity>,
    workers: Arc<dyn MessageBodyWorkers>,
}

impl Default for MutableResponse {
    fn default() -> Self {
        ResponseBuilder::new().build()
    }
}

impl MutableResponse {
    /// An empty `204 No Content` response with the default workers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    pub(crate) fn from_parts(
        status: StatusCode,
        headers: MutableHeaders,
        entity: Option<Entity>,
        workers: Arc<dyn MessageBodyWorkers>,
    ) -> Self {
        MutableResponse {
            status,
            headers,
            entity,
            workers,
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &MutableHeaders {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut MutableHeaders {
        &mut self.headers
    }

    #[inline]
    #[must_use]
    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }

    #[inline]
    #[must_use]
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// The entity as a `T`.
    pub fn entity_as<T: Any>(&self) -> Result<&T> {
        self.entity
            .as_ref()
            .and_then(Entity::downcast_ref::<T>)
            .ok_or(MessageError::EntityType(std::any::type_name::<T>()))
    }

    pub fn set_entity<T: Any + Send + Sync>(&mut self, entity: T) {
        self.entity = Some(Entity::new(entity));
    }

    /// Store `value` as a JSON entity, defaulting the media type to
    /// `application/json`.
    pub fn set_json_entity<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.entity = Some(Entity::new(json));
        if !self.headers.contains(names::CONTENT_TYPE.as_str()) {
            self.set_media_type(MediaType::application_json());
        }
        Ok(())
    }

    pub fn take_entity(&mut self) -> Option<Entity> {
        self.entity.take()
    }

    /// Replace `Content-Type`.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.headers
            .replace(names::CONTENT_TYPE.as_str(), [HeaderValue::typed(media_type)]);
    }

    #[inline]
    #[must_use]
    pub fn workers(&self) -> &Arc<dyn MessageBodyWorkers> {
        &self.workers
    }

    pub fn set_workers(&mut self, workers: Arc<dyn MessageBodyWorkers>) {
        self.workers = workers;
    }

    /// Every header as wire text, materializing typed values.
    pub fn string_headers(&mut self) -> Vec<(String, Vec<String>)> {
        self.headers.string_headers()
    }

    /// A builder seeded with a copy of this response.
    #[must_use]
    pub fn to_builder(&self) -> ResponseBuilder {
        ResponseBuilder::from_parts(
            self.status,
            self.headers.clone(),
            self.entity.clone(),
            Arc::clone(&self.workers),
        )
    }

    /// Serialize the entity with the workers.
    ///
    /// Sets `Content-Type` from the workers when the headers name none.
    pub fn entity_bytes(&mut self) -> Result<Bytes> {
        let Some(entity) = self.entity.clone() else {
            return Ok(Bytes::new());
        };
        let media_type = match self.headers.media_type()? {
            Some(media_type) => media_type,
            None => {
                let media_type = self
                    .workers
                    .default_media_type(&entity)
                    .ok_or_else(|| no_worker(&entity, &MediaType::wildcard()))?;
                self.set_media_type(media_type.clone());
                media_type
            }
        };
        if !self.workers.is_writeable(&entity, &media_type) {
            return Err(no_worker(&entity, &media_type));
        }
        let mut body = Vec::new();
        self.workers.write_to(&entity, &media_type, &mut body)?;
        Ok(Bytes::from(body))
    }

    /// Materialize the headers and serialize the entity into an
    /// [`http::Response`].
    ///
    /// `Content-Length` is added for a non-empty body unless already set.
    pub fn to_http_response(&mut self) -> Result<http::Response<Bytes>> {
        let body = self.entity_bytes()?;
        if !body.is_empty() && !self.headers.contains(names::CONTENT_LENGTH.as_str()) {
            self.headers
                .header(names::CONTENT_LENGTH.as_str(), body.len());
        }
        let header_map = self.headers.to_header_map()?;
        let mut response = http::Response::builder().status(self.status).body(body)?;
        *response.headers_mut() = header_map;
        Ok(response)
    }

    /// Write the status line and headers in HTTP/1.1 form.
    ///
    /// Every name and value is checked before anything is written; a value
    /// carrying CR or LF fails with [`MessageError::InvalidHeaderValue`].
    pub fn write_head<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        let headers = self.headers.string_headers();
        for (name, values) in &headers {
            HeaderName::from_bytes(name.as_bytes())?;
            for value in values {
                http::HeaderValue::from_str(value)?;
            }
        }

        write!(
            out,
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )?;
        for (name, values) in headers {
            for value in values {
                write!(out, "{name}: {value}\r\n")?;
            }
        }
        out.write_all(b"\r\n")?;
        Ok(())
    }
}

fn no_worker(entity: &Entity, media_type: &MediaType) -> MessageError {
    tracing::warn!(
        entity = entity.type_name(),
        media_type = %media_type,
        "No message body worker found"
    );
    MessageError::NoWorker {
        type_name: entity.type_name().to_string(),
        media_type: media_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_http::types::EntityTag;

    #[test]
    fn test_default_response() {
        let response = MutableResponse::new();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.entity().is_none());
        assert!(response.entity_as::<String>().is_err());
    }

    #[test]
    fn test_clone_shares_entity_but_not_headers() {
        let mut original = MutableResponse::new();
        original.set_entity(String::from("body"));
        original.headers_mut().header("ETag", EntityTag::new("1"));

        let mut copy = original.clone();
        copy.set_status(StatusCode::OK);
        copy.headers_mut().header_str("Vary", "Accept");

        assert_eq!(original.status(), StatusCode::NO_CONTENT);
        assert!(!original.headers().contains("Vary"));
        assert!(copy.entity().unwrap().ptr_eq(original.entity().unwrap()));
        assert_eq!(copy.entity_as::<String>().unwrap(), "body");
    }

    #[test]
    fn test_to_http_response() {
        let mut response = MutableResponse::builder()
            .status(StatusCode::OK)
            .header("ETag", EntityTag::weak("v2"))
            .entity(String::from("hello"))
            .build();
        let http_response = response.to_http_response().unwrap();

        assert_eq!(http_response.status(), StatusCode::OK);
        assert_eq!(http_response.body().as_ref(), b"hello");
        let headers = http_response.headers();
        assert_eq!(headers["etag"], "W/\"v2\"");
        assert_eq!(headers["content-type"], "text/plain;charset=UTF-8");
        assert_eq!(headers["content-length"], "5");
        assert_eq!(response.headers().pending_typed("ETag"), 0);
    }

    #[test]
    fn test_json_entity() {
        #[derive(Serialize)]
        struct Greeting<'a> {
            message: &'a str,
        }

        let mut response = MutableResponse::new();
        response.set_json_entity(&Greeting { message: "hi" }).unwrap();
        let http_response = response.to_http_response().unwrap();
        assert_eq!(http_response.body().as_ref(), br#"{"message":"hi"}"#);
        assert_eq!(http_response.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_missing_worker() {
        let mut response = MutableResponse::new();
        response.set_entity(3.5_f64);
        assert!(matches!(
            response.to_http_response(),
            Err(MessageError::NoWorker { .. })
        ));

        response.set_entity(serde_json::json!([1]));
        response.set_media_type(MediaType::text_plain());
        assert!(matches!(
            response.entity_bytes(),
            Err(MessageError::NoWorker { ref media_type, .. }) if media_type == "text/plain"
        ));
    }

    #[test]
    fn test_to_builder_round_trip() {
        let mut response = MutableResponse::new();
        response.headers_mut().header_str("Allow", "GET");
        let rebuilt = response.to_builder().status(StatusCode::ACCEPTED).build();
        assert_eq!(rebuilt.status(), StatusCode::ACCEPTED);
        assert!(rebuilt.headers().contains("allow"));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_write_head() {
        let mut response = MutableResponse::builder()
            .status(StatusCode::NOT_FOUND)
            .header_str("Content-Length", "0")
            .build();
        let mut head = Vec::new();
        response.write_head(&mut head).unwrap();
        assert_eq!(
            String::from_utf8(head).unwrap(),
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n"
        );

        let mut sink = NullSink::new();
        response.write_head(&mut sink).unwrap();
        assert_eq!(sink.bytes_written(), 45);
        sink.close();
        assert!(matches!(
            response.write_head(&mut sink),
            Err(MessageError::Io(_))
        ));
    }

    #[test]
    fn test_write_head_rejects_line_breaks() {
        let mut response = MutableResponse::new();
        response
            .headers_mut()
            .header_str("X-Note", "a\r\nSet-Cookie: evil=1");
        let mut head = Vec::new();
        assert!(matches!(
            response.write_head(&mut head),
            Err(MessageError::InvalidHeaderValue(_))
        ));
        assert!(head.is_empty());

        let mut response = MutableResponse::new();
        response.headers_mut().header_str("Bad Name", "x");
        assert!(matches!(
            response.write_head(&mut head),
            Err(MessageError::InvalidHeaderName(_))
        ));
        assert!(head.is_empty());
    }
}
