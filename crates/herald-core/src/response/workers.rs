//! Entity serialization registry.

use super::entity::Entity;
use crate::error::Result;
use bytes::Bytes;
use herald_http::types::MediaType;
use std::fmt;
use std::io::Write;

/// Writes response entities for a media type.
pub trait MessageBodyWorkers: fmt::Debug + Send + Sync {
    /// Whether `entity` can be written as `media_type`.
    fn is_writeable(&self, entity: &Entity, media_type: &MediaType) -> bool;

    /// Media type to use when the response does not name one.
    fn default_media_type(&self, entity: &Entity) -> Option<MediaType>;

    fn write_to(&self, entity: &Entity, media_type: &MediaType, out: &mut dyn Write)
        -> Result<()>;
}

/// Workers for text (`String`, `&'static str`), raw bytes (`Bytes`,
/// `Vec<u8>`) and JSON (`serde_json::Value`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultWorkers;

enum Body<'e> {
    Text(&'e str),
    Octets(&'e [u8]),
    Json(&'e serde_json::Value),
}

impl DefaultWorkers {
    fn body(entity: &Entity) -> Option<Body<'_>> {
        if let Some(text) = entity.downcast_ref::<String>() {
            Some(Body::Text(text))
        } else if let Some(text) = entity.downcast_ref::<&'static str>() {
            Some(Body::Text(text))
        } else if let Some(bytes) = entity.downcast_ref::<Bytes>() {
            Some(Body::Octets(bytes))
        } else if let Some(bytes) = entity.downcast_ref::<Vec<u8>>() {
            Some(Body::Octets(bytes))
        } else {
            entity.downcast_ref::<serde_json::Value>().map(Body::Json)
        }
    }
}

fn is_json(media_type: &MediaType) -> bool {
    media_type.is_wildcard_type()
        || media_type.subtype().eq_ignore_ascii_case("json")
        || media_type.subtype().to_ascii_lowercase().ends_with("+json")
}

impl MessageBodyWorkers for DefaultWorkers {
    fn is_writeable(&self, entity: &Entity, media_type: &MediaType) -> bool {
        match Self::body(entity) {
            Some(Body::Text(_) | Body::Octets(_)) => true,
            Some(Body::Json(_)) => is_json(media_type),
            None => false,
        }
    }

    fn default_media_type(&self, entity: &Entity) -> Option<MediaType> {
        match Self::body(entity)? {
            Body::Text(_) => Some(MediaType::text_plain().with_charset("UTF-8")),
            Body::Octets(_) => Some(MediaType::application_octet_stream()),
            Body::Json(_) => Some(MediaType::application_json()),
        }
    }

    fn write_to(
        &self,
        entity: &Entity,
        _media_type: &MediaType,
        out: &mut dyn Write,
    ) -> Result<()> {
        match Self::body(entity) {
            Some(Body::Text(text)) => out.write_all(text.as_bytes())?,
            Some(Body::Octets(bytes)) => out.write_all(bytes)?,
            Some(Body::Json(value)) => serde_json::to_writer(out, value)?,
            None => {}
        }
        Ok(())
    }
}
