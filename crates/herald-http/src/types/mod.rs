//! Typed header values.

pub mod cookie;
pub mod entity_tag;
pub mod language_tag;
pub mod link;
pub mod media_type;
pub mod parameterized;
pub mod parameters;
pub mod token;

pub use cookie::{Cookie, CookieMap, NewCookie};
pub use entity_tag::{EntityTag, MatchingEntityTags};
pub use language_tag::{AcceptableLanguageTag, LanguageTag, Locale};
pub use link::{Link, LinkBuilder};
pub use media_type::{
    acceptable_media_type_comparator, quality_source_comparator, specificity_comparator,
    AcceptableMediaType, MediaType, QualitySourceMediaType,
};
pub use parameterized::ParameterizedHeader;
pub use parameters::Parameters;
pub use token::AcceptableToken;
