use serde::{ser, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;
use tbinary::{Encode, IoSink, Message, Raw, Strategy};

use crate::error::{Error, Result};

/// Serializes into a loose `Raw` tree. Structs and maps become objects, sequences and tuples become arrays and unit
/// variants become their name. Other enum variants are externally tagged: `{"Variant": ...}`.
pub struct Serializer;

pub fn to_raw<T: ?Sized + Serialize>(value: &T) -> Result<Raw<'static>> {
    value.serialize(Serializer)
}

/// Serialize a message description of the shape `{id, name, type, fields, header, strict}` and encode it
pub fn to_bytes<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    to_bytes_with(value, Strategy::default())
}

pub fn to_bytes_with<T: ?Sized + Serialize>(value: &T, strategy: Strategy) -> Result<Vec<u8>> {
    let raw = to_raw(value)?;
    let message = Message::from_raw(&raw)?;
    message.to_bytes_with(strategy).map_err(|e| Error::Encode(e.at("")))
}

/// Like `to_bytes` but streams into a writer. Returns the number of written bytes.
pub fn to_writer<T: ?Sized + Serialize, W: Write>(writer: W, value: &T) -> Result<usize> {
    let raw = to_raw(value)?;
    let message = Message::from_raw(&raw)?;
    message.encode(&mut IoSink(writer)).map_err(|e| Error::Encode(e.at("")))
}

pub struct SerializeVec {
    items: Vec<Raw<'static>>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Raw<'static>>,
}

pub struct SerializeMap {
    map: BTreeMap<Cow<'static, str>, Raw<'static>>,
    key: Option<Cow<'static, str>>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: BTreeMap<Cow<'static, str>, Raw<'static>>,
}

fn tagged(variant: &'static str, value: Raw<'static>) -> Raw<'static> {
    Raw::object(vec![(variant, value)])
}

impl ser::Serializer for Serializer {

    type Ok = Raw<'static>;
    type Error = Error;
    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Raw<'static>> {
        Ok(Raw::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Raw<'static>> {
        Ok(Raw::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Raw<'static>> {
        self.serialize_i128(i128::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Raw<'static>> {
        match i128::try_from(v) {
            Ok(i)  => self.serialize_i128(i),
            Err(_) => Ok(Raw::Number(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Raw<'static>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Raw<'static>> {
        Ok(Raw::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Raw<'static>> {
        Ok(Raw::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Raw<'static>> {
        Ok(Raw::from(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Raw<'static>> {
        Ok(Raw::from(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Raw<'static>> {
        Ok(Raw::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Raw<'static>> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Raw<'static>> {
        Ok(Raw::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Raw<'static>> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, variant: &'static str) -> Result<Raw<'static>> {
        Ok(Raw::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<Raw<'static>> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _index: u32, variant: &'static str, value: &T) -> Result<Raw<'static>> {
        Ok(tagged(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec { items: Vec::with_capacity(len.unwrap_or(0)) })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(self, _name: &'static str, _index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant { variant, items: Vec::with_capacity(len) })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap { map: BTreeMap::new(), key: None })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(self, _name: &'static str, _index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant { variant, map: BTreeMap::new() })
    }

}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Raw<'static>> {
        Ok(Raw::Array(self.items))
    }

}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Raw<'static>> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Raw<'static>> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Raw<'static>> {
        Ok(tagged(self.variant, Raw::Array(self.items)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Raw<'static>;
    type Error = Error;

    /// Keys end up as object keys and must therefore be textual. Integers and booleans get rendered.
    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        let key = match key.serialize(Serializer)? {
            Raw::Str(s)         => s,
            r @ Raw::Integer(_)
                | r @ Raw::Bool(_) => Cow::Owned(r.to_string()),
            other               => return Err(Error::KeyType(other.typename())),
        };
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        match self.key.take() {
            Some(key) => {
                self.map.insert(key, value.serialize(Serializer)?);
                Ok(())
            },
            None => Err(Error::Message("map value without a key".to_string())),
        }
    }

    fn end(self) -> Result<Raw<'static>> {
        Ok(Raw::Object(self.map))
    }

}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.map.insert(Cow::Borrowed(key), value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Raw<'static>> {
        Ok(Raw::Object(self.map))
    }

}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Raw<'static>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.map.insert(Cow::Borrowed(key), value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Raw<'static>> {
        Ok(tagged(self.variant, Raw::Object(self.map)))
    }

}
