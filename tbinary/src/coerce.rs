//! Coercion of loose input into the native type a wire type demands. Every function takes `None` for an absent value,
//! which yields the documented default, and fails with a type error (not coercible) or a range error (coercible but
//! too wide) otherwise.
//!
//! Numbers are read the way a dynamically typed caller would expect: booleans count as 0 and 1, text is parsed as a
//! numeric literal, arrays and objects are read through their text form and only succeed in degenerate cases like
//! `[]` or `["5"]`.

use crate::decimal::Decimal;
use crate::error::EncodeError;
use crate::literal::Literal;
use crate::raw::{number_to_string, Raw};
use crate::wide::Wide;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
}

pub fn boolean(raw: Option<&Raw>) -> Result<bool, EncodeError> {
    match raw {
        None                  => Ok(false),
        Some(Raw::Bool(b))    => Ok(*b),
        Some(Raw::Number(n))  => Ok(*n != 0.0 && !n.is_nan()),
        Some(Raw::Integer(i)) => Ok(*i != 0),
        Some(other)           => match other.to_string().as_str() {
            "true"  => Ok(true),
            "false" => Ok(false),
            text    => Err(EncodeError::Bool(text.to_string())),
        },
    }
}

/// Never NaN
fn number(raw: &Raw, target: &'static str) -> Result<f64, EncodeError> {
    let n = match raw {
        Raw::Null       => f64::NAN,
        Raw::Bool(b)    => *b as u8 as f64,
        Raw::Number(n)  => *n,
        Raw::Integer(i) => *i as f64,
        other           => Literal::parse(&other.to_string()).map_or(f64::NAN, |l| l.to_f64()),
    };
    if n.is_nan() {
        Err(EncodeError::Type(target, raw.to_string()))
    } else {
        Ok(n)
    }
}

/// Range checked, then truncated towards zero
fn fixed(raw: Option<&Raw>, target: &'static str, min: f64, max: f64) -> Result<f64, EncodeError> {
    let n = match raw {
        None    => 0.0,
        Some(r) => number(r, target)?,
    };
    if n < min || n > max {
        Err(EncodeError::Range(target, number_to_string(n)))
    } else {
        Ok(n.trunc())
    }
}

pub fn int8(raw: Option<&Raw>) -> Result<i8, EncodeError> {
    fixed(raw, "int8", i8::MIN as f64, i8::MAX as f64).map(|n| n as i8)
}

pub fn int16(raw: Option<&Raw>) -> Result<i16, EncodeError> {
    fixed(raw, "int16", i16::MIN as f64, i16::MAX as f64).map(|n| n as i16)
}

pub fn int32(raw: Option<&Raw>) -> Result<i32, EncodeError> {
    fixed(raw, "int32", i32::MIN as f64, i32::MAX as f64).map(|n| n as i32)
}

pub fn double(raw: Option<&Raw>) -> Result<f64, EncodeError> {
    match raw {
        None    => Ok(0.0),
        Some(r) => number(r, "double"),
    }
}

/// Goes through an arbitrary precision integer and its base-16 form, see `crate::wide`
pub fn wide(raw: Option<&Raw>) -> Result<Wide, EncodeError> {
    let raw = match raw {
        None    => return Ok(Wide::default()),
        Some(r) => r,
    };
    let decimal = match raw {
        Raw::Null       => return Err(EncodeError::Type("i64", raw.to_string())),
        Raw::Bool(b)    => Some(Decimal::from_i128(*b as i128)),
        Raw::Integer(i) => Some(Decimal::from_i128(*i)),
        Raw::Number(n) if n.is_nan() => return Err(EncodeError::Type("i64", raw.to_string())),
        Raw::Number(n)  => Decimal::from_f64(*n),
        other           => {
            let text = other.to_string();
            match Literal::parse(&text) {
                Some(literal) => Decimal::from_literal(&literal),
                None          => return Err(EncodeError::Type("i64", text)),
            }
        },
    };
    decimal
        .map(|d| Wide::from_decimal(&d))
        .ok_or_else(|| EncodeError::Range("i64", raw.to_string()))
}

/// Text in the requested encoding. Anything that isn't text already is rendered through its text form. Byte input is
/// re-stringified instead of being copied, see `restringify`.
pub fn text<'r>(raw: Option<&'r Raw<'_>>, encoding: Encoding) -> Cow<'r, [u8]> {
    match (raw, encoding) {
        (None, _)                          => Cow::Borrowed(&[]),
        (Some(Raw::Bytes(b)), _)           => restringify(b),
        (Some(Raw::Str(s)), Encoding::Utf8) => Cow::Borrowed(s.as_bytes()),
        (Some(Raw::Str(s)), Encoding::Utf16Le) => Cow::Owned(utf16le(s)),
        (Some(other), Encoding::Utf8)      => Cow::Owned(other.to_string().into_bytes()),
        (Some(other), Encoding::Utf16Le)   => Cow::Owned(utf16le(&other.to_string())),
    }
}

pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

/// Bytes keep their length but are decoded as UTF-8 and encoded again. For valid UTF-8 this is the identity. Invalid
/// sequences turn into replacement characters, the result is cut at the last whole character that still fits and
/// the remainder gets zero padded.
pub fn restringify(bytes: &[u8]) -> Cow<'_, [u8]> {
    if std::str::from_utf8(bytes).is_ok() {
        return Cow::Borrowed(bytes);
    }
    let text = String::from_utf8_lossy(bytes);
    let mut out = Vec::with_capacity(bytes.len());
    let mut tmp = [0u8; 4];
    for c in text.chars() {
        let encoded = c.encode_utf8(&mut tmp);
        if out.len() + encoded.len() > bytes.len() {
            break;
        }
        out.extend_from_slice(encoded.as_bytes());
    }
    out.resize(bytes.len(), 0);
    Cow::Owned(out)
}
