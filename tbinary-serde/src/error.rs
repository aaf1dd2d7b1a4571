use std;
use std::fmt::{self, Display};
use serde::ser;
use tbinary::EncoderError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The serialized description could not be coerced or encoded
    Encode(EncoderError),
    /// A map key serialized to something without a text form
    KeyType(&'static str),
    Message(String),
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(msg) => fmt.write_str(msg),
            Error::Encode(e) => write!(fmt, "Encoding error: {}", e),
            Error::KeyType(found) => write!(fmt, "Map key must be convertible to a string, found {}. Maybe use crate `serde_with` to transform the map into a vec of tuples", found),
        }
    }
}

impl From<EncoderError> for Error {
    fn from(e: EncoderError) -> Error {
        Error::Encode(e)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Encode(e) => Some(e),
            _ => None,
        }
    }
}
