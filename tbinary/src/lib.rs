//! An encoder for the thrift binary protocol (`TBinaryProtocol`): big endian, type tagged and length prefixed.
//!
//! Input comes in one of two flavours. Loosely typed `Raw` trees, as produced from JSON or by a schema layer, are
//! coerced into a typed `Value` tree under the type tags they carry; this is where conversions like `"12"` to an I32
//! or `"true"` to a BOOL happen and where range checks apply. Rust callers can also build `Value`s and `Message`s
//! directly. Either way, encoding the typed tree only fails if a length does not fit its 32 bit prefix or if the
//! sink refuses the bytes.
//!
//! All encoding functions take `&self` and a sink and return the amount of written bytes.
//!
//! # A note on 64 bit integers
//!
//! I64 values pass through an arbitrary precision integer and its base-16 representation, from which the low sixteen
//! digits are split into two 32 bit words. Magnitudes wider than 64 bits are therefore not rejected but wrap silently
//! to their low 64 bits. Fractional input is truncated towards zero.
//!
//! # A note on strategies
//!
//! `Encode::to_bytes_with` either appends to a growing vector or computes the exact size up front, allocates once and
//! writes at a running offset. Both produce the same bytes; which one is faster depends on the shape of the message.
//!
//! # Examples
//!
//! ```
//! use tbinary::*;
//!
//! let raw = Raw::object(vec![
//!     ("id", Raw::from(10)),
//!     ("name", Raw::from("ping")),
//!     ("type", Raw::from("REPLY")),
//!     ("fields", Raw::Array(vec![Raw::object(vec![
//!         ("id", Raw::from(0)),
//!         ("type", Raw::from("BOOL")),
//!         ("value", Raw::from("true")),
//!     ])])),
//! ]);
//! let buf = encode(&raw).unwrap();
//! assert_eq!(buf, [
//!     0x80, 0x01, 0x00, 0x02, // strict version word, REPLY
//!     0x00, 0x00, 0x00, 0x04, // name of length 4
//!     0x70, // 'p'
//!     0x69, // 'i'
//!     0x6e, // 'n'
//!     0x67, // 'g'
//!     0x00, 0x00, 0x00, 0x0a, // sequence id 10
//!     0x02, // BOOL
//!     0x00, 0x00, // field id 0
//!     0x01, // true
//!     0x00, // STOP
//! ]);
//!
//! let message = Message::new("ping", MethodType::Reply, 10).with_field(Field::new(0, Value::Bool(true)));
//! assert_eq!(buf, message.to_bytes_with(Strategy::Presized).unwrap());
//! ```

pub mod coerce;
mod decimal;
mod dispatch;
mod encoder;
mod error;
mod literal;
mod message;
mod raw;
mod sink;
mod types;
mod value;
mod wide;

pub use decimal::{Decimal, MAX_EXPONENT};
pub use encoder::Encoder;
pub use error::*;
pub use literal::Literal;
pub use message::*;
pub use raw::Raw;
pub use sink::*;
pub use types::*;
pub use value::*;
pub use wide::Wide;

/// Encode a loose message description of the shape `{id, name, type, fields, header, strict}`
pub fn encode(raw: &Raw) -> Result<Vec<u8>, EncoderError> {
    encode_with(raw, Strategy::default())
}

pub fn encode_with(raw: &Raw, strategy: Strategy) -> Result<Vec<u8>, EncoderError> {
    Message::from_raw(raw)?.to_bytes_with(strategy).map_err(|e| e.at(""))
}
