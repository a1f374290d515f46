//! Reading `;name=value` parameter lists.

use crate::error::ParseError;
use crate::protocol::quality::{read_quality_factor, DEFAULT_QUALITY, QUALITY_PARAMETER_NAME};
use crate::protocol::reader::HeaderReader;
use crate::types::Parameters;

const FILENAME_PARAMETER: &str = "filename";

/// Read the parameters that follow a header value, up to the end of input.
///
/// Every parameter starts with `;`; empty parameters (`;;`) are skipped.
/// Values are tokens or quoted strings and no whitespace is allowed around
/// `=`. A repeated name overwrites the earlier value.
///
/// When the reader is configured with `strip_filename_path`, a `filename`
/// value is read with backslashes intact and cut after its last `\`.
pub fn read_parameters<R: HeaderReader + ?Sized>(reader: &mut R) -> Result<Parameters, ParseError> {
    let mut parameters = Parameters::new();
    while let Some((name, value)) = next_parameter(reader)? {
        parameters.insert(name, value);
    }
    Ok(parameters)
}

/// Read the parameters that follow a header value and return the `q`
/// quality, or [`DEFAULT_QUALITY`] when there is none.
///
/// Every parameter is read and validated; a repeated `q` takes the last value.
pub fn read_quality_factor_parameter<R: HeaderReader + ?Sized>(
    reader: &mut R,
) -> Result<u16, ParseError> {
    let mut quality = DEFAULT_QUALITY;
    while let Some((name, value)) = next_parameter(reader)? {
        if name.eq_ignore_ascii_case(QUALITY_PARAMETER_NAME) {
            quality = read_quality_factor(&value)?;
        }
    }
    Ok(quality)
}

fn next_parameter<R: HeaderReader + ?Sized>(
    reader: &mut R,
) -> Result<Option<(String, String)>, ParseError> {
    if !reader.has_next() {
        return Ok(None);
    }
    reader.next_separator(';')?;
    while reader.has_next_separator(';', true) {
        reader.next()?;
    }
    if !reader.has_next() {
        return Ok(None);
    }

    let name = reader.next_token()?;
    reader.next_separator('=')?;

    let strip_path =
        reader.config().strip_filename_path && name.eq_ignore_ascii_case(FILENAME_PARAMETER);
    let value = if strip_path {
        let value = reader.next_token_or_quoted_string(true)?;
        match value.rfind('\\') {
            Some(i) => value[i + 1..].to_string(),
            None => value,
        }
    } else {
        reader.next_token_or_quoted_string(false)?
    };
    Ok(Some((name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::protocol::reader::HttpHeaderReader;

    fn params(header: &str) -> Result<Parameters, ParseError> {
        read_parameters(&mut HttpHeaderReader::new(header))
    }

    #[test]
    fn test_read_parameters() {
        let p = params("; charset=UTF-8 ;level=\"1 2\"").unwrap();
        assert_eq!(p.get("charset"), Some("UTF-8"));
        assert_eq!(p.get("LEVEL"), Some("1 2"));
        assert_eq!(p.names().collect::<Vec<_>>(), vec!["charset", "level"]);
    }

    #[test]
    fn test_empty_parameters_are_skipped() {
        let p = params(";; a=1;;;b=2;").unwrap();
        assert_eq!(p.len(), 2);
        assert!(params("").unwrap().is_empty());
        assert!(params(";").unwrap().is_empty());
    }

    #[test]
    fn test_parameter_errors() {
        assert!(params("a=1").is_err());
        assert!(params("; a").is_err());
        assert!(params("; a = 1").is_err());
        assert!(params("; a=").is_err());
        assert!(params("; a=\"open").is_err());
    }

    #[test]
    fn test_filename_path_stripping() {
        let header = r#"; filename="C:\Users\me\report.pdf""#;
        let plain = params(header).unwrap();
        assert_eq!(plain.get("filename"), Some("C:Usersmereport.pdf"));

        let config = ParserConfig {
            strip_filename_path: true,
            ..Default::default()
        };
        let stripped = read_parameters(&mut HttpHeaderReader::with_config(header, &config)).unwrap();
        assert_eq!(stripped.get("filename"), Some("report.pdf"));
    }

    #[test]
    fn test_read_quality_factor_parameter() {
        let q = |h: &str| read_quality_factor_parameter(&mut HttpHeaderReader::new(h));
        assert_eq!(q("").unwrap(), 1000);
        assert_eq!(q(";level=1; q=0.4").unwrap(), 400);
        assert_eq!(q("; Q=0").unwrap(), 0);
        assert!(q("; q=2").is_err());
    }

    #[test]
    fn test_quality_parameter_reads_to_the_end() {
        let q = |h: &str| read_quality_factor_parameter(&mut HttpHeaderReader::new(h));
        assert_eq!(q(";q=0.2;q=0.7").unwrap(), 700);
        assert!(q(";q=0.5; level").is_err());
        assert!(q(";q=0.5;q=x").is_err());
    }
}
