//! The typed value tree. Every node knows its wire type, so headers of struct fields need no separate tag. Text
//! variants hold their payload already encoded; the encoder writes it behind a length prefix and nothing else.

use crate::coerce;
use crate::dispatch::Builder;
use crate::encoder::Encoder;
use crate::error::{EncodeError, EncoderError};
use crate::raw::Raw;
use crate::sink::{Presized, Sink, Strategy};
use crate::types::TypeTag;
use crate::wide::Wide;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Void,
    Bool(bool),
    Byte(i8),
    Double(f64),
    I16(i16),
    I32(i32),
    I64(Wide),
    /// STRING, BINARY or UTF7
    Str(Cow<'a, [u8]>),
    Utf8(Cow<'a, [u8]>),
    /// Payload is UTF-16LE
    Utf16(Cow<'a, [u8]>),
    Struct(Struct<'a>),
    Map(Map<'a>),
    Set(List<'a>),
    List(List<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    pub id: i16,
    pub value: Value<'a>,
}

/// Fields are written in the given order, without reordering or deduplication by id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Struct<'a> {
    pub fields: Vec<Field<'a>>,
}

/// Entries are written in the given order. Keys are neither deduplicated nor sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Map<'a> {
    pub key_type: TypeTag,
    pub value_type: TypeTag,
    pub entries: Vec<(Value<'a>, Value<'a>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List<'a> {
    pub elem_type: TypeTag,
    pub elements: Vec<Value<'a>>,
}

/// Anything that can be put on wire
pub trait Encode {

    /// The exact number of bytes `encode` is going to produce
    fn encoded_len(&self) -> usize;

    /// Returns the number of written bytes
    fn encode<S: Sink>(&self, sink: &mut S) -> Result<usize, EncodeError>;

    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_bytes_with(Strategy::default())
    }

    fn to_bytes_with(&self, strategy: Strategy) -> Result<Vec<u8>, EncodeError> {
        match strategy {
            Strategy::Growable => {
                let mut buf = Vec::new();
                self.encode(&mut buf)?;
                Ok(buf)
            },
            Strategy::Presized => {
                let mut sink = Presized::new(self.encoded_len());
                self.encode(&mut sink)?;
                sink.finish()
            },
        }
    }

}

pub(crate) fn text_bytes(text: Cow<'_, str>) -> Cow<'_, [u8]> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s)    => Cow::Owned(s.into_bytes()),
    }
}

impl<'a> Value<'a> {

    /// Coerce loose input under the given type tag
    pub fn from_raw(tag: TypeTag, raw: &'a Raw<'_>) -> Result<Self, EncoderError> {
        let mut builder = Builder::new();
        builder.value(tag, Some(raw)).map_err(|e| e.at(builder.path()))
    }

    pub fn string<S: Into<Cow<'a, str>>>(text: S) -> Self {
        Value::Str(text_bytes(text.into()))
    }

    pub fn binary<B: Into<Cow<'a, [u8]>>>(bytes: B) -> Self {
        Value::Str(bytes.into())
    }

    pub fn utf16(text: &str) -> Self {
        Value::Utf16(Cow::Owned(coerce::utf16le(text)))
    }

    pub fn i64(value: i64) -> Self {
        Value::I64(Wide::from(value))
    }

    pub fn tag(&self) -> TypeTag {
        match *self {
            Value::Void      => TypeTag::Void,
            Value::Bool(_)   => TypeTag::Bool,
            Value::Byte(_)   => TypeTag::Byte,
            Value::Double(_) => TypeTag::Double,
            Value::I16(_)    => TypeTag::I16,
            Value::I32(_)    => TypeTag::I32,
            Value::I64(_)    => TypeTag::I64,
            Value::Str(_)    => TypeTag::String,
            Value::Utf8(_)   => TypeTag::Utf8,
            Value::Utf16(_)  => TypeTag::Utf16,
            Value::Struct(_) => TypeTag::Struct,
            Value::Map(_)    => TypeTag::Map,
            Value::Set(_)    => TypeTag::Set,
            Value::List(_)   => TypeTag::List,
        }
    }

}

impl<'a> Encode for Value<'a> {

    fn encoded_len(&self) -> usize {
        match self {
            Value::Void       => 0,
            Value::Bool(_)
                | Value::Byte(_) => 1,
            Value::I16(_)     => 2,
            Value::I32(_)     => 4,
            Value::Double(_)
                | Value::I64(_) => 8,
            Value::Str(v)
                | Value::Utf8(v)
                | Value::Utf16(v) => 4 + v.len(),
            Value::Struct(v)  => v.encoded_len(),
            Value::Map(v)     => 1 + 1 + 4 + v.entries.iter().map(|(k, v)| k.encoded_len() + v.encoded_len()).sum::<usize>(),
            Value::Set(v)
                | Value::List(v) => 1 + 4 + v.elements.iter().map(Value::encoded_len).sum::<usize>(),
        }
    }

    fn encode<S: Sink>(&self, sink: &mut S) -> Result<usize, EncodeError> {
        Encoder::new(sink).value(self)
    }

}

impl<'a> Field<'a> {
    pub fn new(id: i16, value: Value<'a>) -> Self {
        Field { id, value }
    }
}

impl<'a> Struct<'a> {

    pub fn new(fields: Vec<Field<'a>>) -> Self {
        Struct { fields }
    }

    pub fn from_raw(raw: &'a Raw<'_>) -> Result<Self, EncoderError> {
        let mut builder = Builder::new();
        builder.structure(Some(raw)).map_err(|e| e.at(builder.path()))
    }

}

impl<'a> Encode for Struct<'a> {

    fn encoded_len(&self) -> usize {
        // type, id and value per field, then the stop marker
        self.fields.iter().map(|f| 1 + 2 + f.value.encoded_len()).sum::<usize>() + 1
    }

    fn encode<S: Sink>(&self, sink: &mut S) -> Result<usize, EncodeError> {
        Encoder::new(sink).structure(self)
    }

}

impl<'a> Map<'a> {
    pub fn new(key_type: TypeTag, value_type: TypeTag, entries: Vec<(Value<'a>, Value<'a>)>) -> Self {
        Map { key_type, value_type, entries }
    }
}

impl<'a> List<'a> {
    pub fn new(elem_type: TypeTag, elements: Vec<Value<'a>>) -> Self {
        List { elem_type, elements }
    }
}

#[cfg(test)]
mod tests {
    use super::{Encode, Field, List, Map, Struct, Value};
    use crate::sink::Strategy;
    use crate::types::TypeTag;
    use crate::wide::Wide;

    fn sample() -> Value<'static> {
        Value::Struct(Struct::new(vec![
            Field::new(1, Value::Bool(true)),
            Field::new(2, Value::Byte(-1)),
            Field::new(3, Value::I16(300)),
            Field::new(4, Value::I32(-7000)),
            Field::new(5, Value::i64(1 << 40)),
            Field::new(6, Value::Double(std::f64::consts::PI)),
            Field::new(7, Value::string("Üben von Xylophon und Querflöte ist ja zweckmäßig.")),
            Field::new(8, Value::utf16("abc")),
            Field::new(9, Value::Void),
            Field::new(10, Value::Map(Map::new(TypeTag::String, TypeTag::I32, vec![
                (Value::string("first"), Value::I32(1)),
                (Value::string("second"), Value::I32(2)),
            ]))),
            Field::new(11, Value::List(List::new(TypeTag::Struct, vec![
                Value::Struct(Struct::default()),
                Value::Struct(Struct::new(vec![Field::new(0, Value::Set(List::new(TypeTag::Byte, vec![Value::Byte(1)])))])),
            ]))),
        ]))
    }

    #[test]
    fn tags() {
        assert_eq!(TypeTag::Utf16, Value::utf16("x").tag());
        assert_eq!(TypeTag::String, Value::binary(&[1u8, 2][..]).tag());
        assert_eq!(TypeTag::I64, Value::I64(Wide::default()).tag());
        assert_eq!(TypeTag::Set, Value::Set(List::new(TypeTag::Bool, vec![])).tag());
    }

    #[test]
    fn encoded_len_is_exact() {
        let value = sample();
        assert_eq!(value.encoded_len(), value.to_bytes().unwrap().len());
    }

    #[test]
    fn strategies_agree() {
        let value = sample();
        assert_eq!(value.to_bytes_with(Strategy::Growable).unwrap(), value.to_bytes_with(Strategy::Presized).unwrap());
    }

    #[test]
    fn idempotent() {
        let value = sample();
        assert_eq!(value.to_bytes().unwrap(), value.to_bytes().unwrap());
    }

    #[test]
    fn empty_struct_is_stop() {
        assert_eq!(vec![0], Struct::default().to_bytes().unwrap());
        assert_eq!(1, Struct::default().encoded_len());
    }

}
