//! Loosely typed caller data. A `Raw` tree is what a schema layer or a JSON document hands to the encoder before any
//! type tag has been applied to it. The encoder coerces it into a typed `Value` tree, see `crate::coerce`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Raw<'a> {
    Null,
    Bool(bool),
    Number(f64),
    /// An exact integer, as produced by big number types or integer literals in JSON
    Integer(i128),
    Str(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Array(Vec<Raw<'a>>),
    Object(BTreeMap<Cow<'a, str>, Raw<'a>>),
}

impl<'a> Raw<'a> {

    /// Build an object from key-value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<Cow<'a, str>>,
        I: IntoIterator<Item = (K, Raw<'a>)>,
    {
        Raw::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key of an object. Any other variant has no keys.
    pub fn get(&self, key: &str) -> Option<&Raw<'a>> {
        match self {
            Raw::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Whether the value counts as true in a condition. This is used for flags like `strict`.
    pub fn truthy(&self) -> bool {
        match self {
            Raw::Null       => false,
            Raw::Bool(b)    => *b,
            Raw::Number(n)  => *n != 0.0 && !n.is_nan(),
            Raw::Integer(i) => *i != 0,
            Raw::Str(s)     => !s.is_empty(),
            Raw::Bytes(_)
                | Raw::Array(_)
                | Raw::Object(_) => true,
        }
    }

    pub fn typename(&self) -> &'static str {
        match *self {
            Raw::Null       => "null",
            Raw::Bool(_)    => "boolean",
            Raw::Number(_)  => "number",
            Raw::Integer(_) => "integer",
            Raw::Str(_)     => "string",
            Raw::Bytes(_)   => "bytes",
            Raw::Array(_)   => "array",
            Raw::Object(_)  => "object",
        }
    }

    /// Detach the tree from any borrowed input
    pub fn into_owned(self) -> Raw<'static> {
        match self {
            Raw::Null       => Raw::Null,
            Raw::Bool(b)    => Raw::Bool(b),
            Raw::Number(n)  => Raw::Number(n),
            Raw::Integer(i) => Raw::Integer(i),
            Raw::Str(s)     => Raw::Str(Cow::Owned(s.into_owned())),
            Raw::Bytes(b)   => Raw::Bytes(Cow::Owned(b.into_owned())),
            Raw::Array(a)   => Raw::Array(a.into_iter().map(Raw::into_owned).collect()),
            Raw::Object(o)  => Raw::Object(o.into_iter().map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned())).collect()),
        }
    }

}

/// Renders a float the way `Number.prototype.toString` does: shortest round-trip digits, exponent notation below
/// 1e-6 and from 1e21 upwards.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let s = format!("{:e}", n);
        match s.find("e-") {
            Some(_) => s,
            None    => s.replacen('e', "e+", 1),
        }
    } else {
        format!("{}", n)
    }
}

/// The text form used by string coercion and quoted in error messages
impl<'a> fmt::Display for Raw<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Null       => f.write_str("null"),
            Raw::Bool(true) => f.write_str("true"),
            Raw::Bool(false) => f.write_str("false"),
            Raw::Number(n)  => f.write_str(&number_to_string(*n)),
            Raw::Integer(i) => write!(f, "{}", i),
            Raw::Str(s)     => f.write_str(s),
            Raw::Bytes(b)   => f.write_str(&String::from_utf8_lossy(b)),
            Raw::Array(a)   => {
                for (i, item) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    match item {
                        Raw::Null => (),
                        other => write!(f, "{}", other)?,
                    }
                }
                Ok(())
            },
            Raw::Object(_)  => f.write_str("[object Object]"),
        }
    }
}

impl<'a> From<bool> for Raw<'a> {
    fn from(v: bool) -> Self {
        Raw::Bool(v)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl<'a> From<$t> for Raw<'a> {
            fn from(v: $t) -> Self {
                Raw::Integer(i128::from(v))
            }
        })*
    }
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, i128);

impl<'a> From<f64> for Raw<'a> {
    fn from(v: f64) -> Self {
        Raw::Number(v)
    }
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(v: &'a str) -> Self {
        Raw::Str(Cow::Borrowed(v))
    }
}

impl<'a> From<String> for Raw<'a> {
    fn from(v: String) -> Self {
        Raw::Str(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for Raw<'a> {
    fn from(v: &'a [u8]) -> Self {
        Raw::Bytes(Cow::Borrowed(v))
    }
}

impl<'a> From<Vec<u8>> for Raw<'a> {
    fn from(v: Vec<u8>) -> Self {
        Raw::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<Vec<Raw<'a>>> for Raw<'a> {
    fn from(v: Vec<Raw<'a>>) -> Self {
        Raw::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::{number_to_string, Raw};

    #[test]
    fn numbers_render_like_the_reference_runtime() {
        assert_eq!("10", number_to_string(10.0));
        assert_eq!("-1.5", number_to_string(-1.5));
        assert_eq!("0", number_to_string(-0.0));
        assert_eq!("1e+21", number_to_string(1e21));
        assert_eq!("1.5e-7", number_to_string(1.5e-7));
        assert_eq!("0.000001", number_to_string(1e-6));
        assert_eq!("123456789012345680000", number_to_string(123456789012345680000.0));
        assert_eq!("Infinity", number_to_string(f64::INFINITY));
        assert_eq!("NaN", number_to_string(f64::NAN));
    }

    #[test]
    fn display() {
        assert_eq!("null", Raw::Null.to_string());
        assert_eq!("abc", Raw::from("abc").to_string());
        assert_eq!("abc", Raw::from(&b"abc"[..]).to_string());
        assert_eq!("1,,x", Raw::Array(vec![Raw::from(1), Raw::Null, Raw::from("x")]).to_string());
        assert_eq!("[object Object]", Raw::object(vec![("a", Raw::Null)]).to_string());
    }

    #[test]
    fn truthiness() {
        assert!(!Raw::Null.truthy());
        assert!(!Raw::from(0).truthy());
        assert!(!Raw::from(f64::NAN).truthy());
        assert!(!Raw::from("").truthy());
        assert!(Raw::from("false").truthy());
        assert!(Raw::Array(vec![]).truthy());
    }

}
