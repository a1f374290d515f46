//! Quality values (`q` and `qs` parameters).
//!
//! Qualities are kept as integers in `[0, 1000]`, i.e. thousandths, so that
//! `q=0.5` is `500` and the implicit default is [`DEFAULT_QUALITY`].

use crate::error::ParseError;
use crate::types::Parameters;
use std::cmp::Ordering;

/// Quality of an element that carries no quality parameter.
pub const DEFAULT_QUALITY: u16 = 1000;

/// Lowest possible quality; an element with it is "not acceptable".
pub const MINIMUM_QUALITY: u16 = 0;

/// Name of the client quality parameter.
pub const QUALITY_PARAMETER_NAME: &str = "q";

/// Name of the server quality-source parameter.
pub const QUALITY_SOURCE_PARAMETER_NAME: &str = "qs";

const MAX_QUALITY_LENGTH: usize = 5;

/// Parse a quality value such as `0.8`, `1`, `.25` or `1.000`.
///
/// The value has at most three fractional digits and lies in `[0, 1]`.
pub fn read_quality_factor(value: &str) -> Result<u16, ParseError> {
    let invalid = |index: usize| ParseError::new(format!("Invalid quality value '{value}'"), index);

    if value.is_empty() || value.len() > MAX_QUALITY_LENGTH {
        return Err(invalid(0));
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    let whole = match whole {
        "" if fraction.is_some_and(|f| !f.is_empty()) => 0,
        "0" => 0,
        "1" => 1,
        _ => return Err(invalid(0)),
    };

    let mut thousandths: u16 = 0;
    if let Some(fraction) = fraction {
        if fraction.len() > 3 {
            return Err(invalid(value.len() - fraction.len()));
        }
        let mut scale = 100;
        for (i, c) in fraction.char_indices() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| invalid(value.len() - fraction.len() + i))?;
            thousandths += digit as u16 * scale;
            scale /= 10;
        }
    }

    if whole == 1 {
        if thousandths != 0 {
            return Err(invalid(0));
        }
        return Ok(DEFAULT_QUALITY);
    }
    Ok(thousandths)
}

/// Render a quality as a decimal with up to three fractional digits and
/// trailing zeros removed, keeping at least one: `1000` is `"1.0"`, `500` is
/// `"0.5"`, `1` is `"0.001"`.
#[must_use]
pub fn quality_value_to_string(quality: u16) -> String {
    let mut s = format!("{:.3}", f64::from(quality) / 1000.0);
    let dot = s.find('.').unwrap_or(s.len());
    while s.len() > dot + 2 && s.ends_with('0') {
        s.pop();
    }
    s
}

/// Return `parameters` with `name` set to `quality`.
///
/// The parameter is only added when the quality is not the default or when
/// it is already present, so default-quality values format without it.
#[must_use]
pub fn enhance_with_quality_parameter(parameters: &Parameters, name: &str, quality: u16) -> Parameters {
    let mut enhanced = parameters.clone();
    if quality != DEFAULT_QUALITY || enhanced.contains_key(name) {
        enhanced.insert(name, quality_value_to_string(quality));
    }
    enhanced
}

/// A header element that carries a quality.
pub trait Qualified {
    fn quality(&self) -> u16;
}

/// Orders higher quality first.
#[must_use]
pub fn quality_comparator<T: Qualified + ?Sized>(a: &T, b: &T) -> Ordering {
    b.quality().cmp(&a.quality())
}

/// Stable sort, highest quality first.
pub fn sort_by_quality<T: Qualified>(items: &mut [T]) {
    items.sort_by(quality_comparator);
}
