//! Quality-bearing tokens (`Accept-Charset`, `Accept-Encoding`).

use crate::error::{HeaderError, Result};
use crate::protocol::constants::{params, WILDCARD};
use crate::protocol::parameters::read_quality_factor_parameter;
use crate::protocol::quality::{quality_value_to_string, Qualified, DEFAULT_QUALITY};
use crate::protocol::reader::{HeaderReader, HttpHeaderReader};
use std::fmt;
use std::str::FromStr;

/// A token with an optional `q` quality, e.g. `gzip;q=0.8`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AcceptableToken {
    token: String,
    quality: u16,
}

impl AcceptableToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        AcceptableToken {
            token: token.into(),
            quality: DEFAULT_QUALITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_quality(mut self, quality: u16) -> Self {
        self.quality = quality.min(DEFAULT_QUALITY);
        self
    }

    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.token == WILDCARD
    }

    pub fn read<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.has_next();
        let token = reader.next_token()?;
        let quality = read_quality_factor_parameter(reader)?;
        Ok(AcceptableToken { token, quality })
    }

    pub fn from_header_value(value: &str) -> Result<Self> {
        Self::read(&mut HttpHeaderReader::new(value)).map_err(|e| e.in_value("token", value))
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        if self.quality == DEFAULT_QUALITY {
            return self.token.clone();
        }
        format!(
            "{};{}={}",
            self.token,
            params::QUALITY,
            quality_value_to_string(self.quality)
        )
    }
}

impl Qualified for AcceptableToken {
    fn quality(&self) -> u16 {
        self.quality
    }
}

impl fmt::Display for AcceptableToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for AcceptableToken {
    type Err = HeaderError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_header_value(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_token() {
        let gzip: AcceptableToken = "gzip;q=0.8".parse().unwrap();
        assert_eq!(gzip.token(), "gzip");
        assert_eq!(gzip.quality(), 800);
        assert_eq!(gzip.to_string(), "gzip;q=0.8");

        let any = AcceptableToken::from_header_value(" * ").unwrap();
        assert!(any.is_wildcard());
        assert_eq!(any.quality(), DEFAULT_QUALITY);
        assert_eq!(any.to_string(), "*");
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(AcceptableToken::from_header_value("").is_err());
        assert!(AcceptableToken::from_header_value("gzip;q=x").is_err());
        assert!(AcceptableToken::from_header_value("\"quoted\"").is_err());
    }
}
