use std::fmt::{Display, Formatter, self};

/// Broad classification of an `EncodeError`. Every kind is terminal for the encode call that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value could not be coerced to the type its tag demands
    Type,
    /// A value coerced fine but does not fit the wire width
    Range,
    /// A type tag or method type name is not part of the protocol
    Protocol,
    /// The output sink refused the bytes
    Sink,
}

#[derive(Debug)]
pub struct EncoderError {
    inner: EncodeError,
    at: String,
}

impl EncoderError {
    pub fn into_inner(self) -> EncodeError {
        self.inner
    }

    pub fn inner(&self) -> &EncodeError {
        &self.inner
    }

    /// Location inside the input, for example `fields[0].value.data[3]`. Empty for the root.
    pub fn path(&self) -> &str {
        &self.at
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind()
    }
}

impl std::error::Error for EncoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
       Some(&self.inner)
    }
}

impl Display for EncoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        if self.at.is_empty() {
            write!(f, "{}", self.inner)
        } else {
            write!(f, "{} at {}", self.inner, self.at)
        }
    }
}

#[derive(Debug)]
pub enum EncodeError {
    /// The value (rendered as text) cannot be converted to the named wire type
    Type(&'static str, String),
    /// The value is no recognized boolean token
    Bool(String),
    /// A required composite value or key is absent
    Missing(&'static str),
    /// A composite value has the wrong shape, e.g. a string where a struct was expected
    Shape(&'static str, &'static str),
    /// The value is outside of the range of the named wire type
    Range(&'static str, String),
    /// A string or container is longer than a 32 bit length prefix allows
    Length(usize),
    UnknownType(String),
    UnknownMethod(String),
    /// A presized buffer was too small for the bytes put into it
    Capacity(usize, usize),
    Io(std::io::Error),
}

impl EncodeError {
    pub fn at<P: Into<String>>(self, at: P) -> EncoderError {
        EncoderError { inner: self, at: at.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Type(_, _)
                | EncodeError::Bool(_)
                | EncodeError::Missing(_)
                | EncodeError::Shape(_, _)      => ErrorKind::Type,
            EncodeError::Range(_, _)
                | EncodeError::Length(_)        => ErrorKind::Range,
            EncodeError::UnknownType(_)
                | EncodeError::UnknownMethod(_) => ErrorKind::Protocol,
            EncodeError::Capacity(_, _)
                | EncodeError::Io(_)            => ErrorKind::Sink,
        }
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> EncodeError {
        EncodeError::Io(e)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            EncodeError::Type(target, value)   => write!(f, "cannot convert \"{}\" to {}", value, target),
            EncodeError::Bool(value)           => write!(f, "cannot convert \"{}\" to boolean, require \"true\" or \"false\"", value),
            EncodeError::Missing(what)         => write!(f, "missing {}", what),
            EncodeError::Shape(expected, found) => write!(f, "expected {} but found {}", expected, found),
            EncodeError::Range(target, value)  => write!(f, "{} is out of {} bounds", value, target),
            EncodeError::Length(value)         => write!(f, "Length {} exceeds maximum {}", value, i32::MAX),
            EncodeError::UnknownType(name)     => write!(f, "Unknown type {}", name),
            EncodeError::UnknownMethod(name)   => write!(f, "Unknown method type {}", name),
            EncodeError::Capacity(needed, len) => write!(f, "Buffer of {} bytes cannot take {} more bytes", len, needed),
            EncodeError::Io(e)                 => write!(f, "IO error {}", e),
        }
    }
}
