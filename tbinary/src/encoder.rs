//! Writes typed values to a sink. All integers go big endian. Every method returns the number of bytes it wrote.

use crate::error::EncodeError;
use crate::message::Message;
use crate::sink::Sink;
use crate::types::TypeTag;
use crate::value::{Field, List, Map, Struct, Value};
use crate::wide::Wide;
use std::convert::TryFrom;

pub struct Encoder<'s, S: Sink> {
    sink: &'s mut S,
}

impl<'s, S: Sink> Encoder<'s, S> {

    pub fn new(sink: &'s mut S) -> Self {
        Encoder { sink }
    }

    /// Header struct if present, then the message header in strict or legacy form, then the argument struct
    pub fn message(&mut self, message: &Message) -> Result<usize, EncodeError> {
        let mut c = 0;
        if let Some(header) = &message.header {
            c += self.structure(header)?;
        }
        if message.strict {
            c += self.put(&message.method.version_word().to_be_bytes())?;
            c += self.binary(&message.name)?;
        } else {
            c += self.binary(&message.name)?;
            c += self.put(&[message.method.code()])?;
        }
        c += self.i32(message.id)?;
        c += self.fields(&message.fields)?;
        Ok(c)
    }

    pub fn value(&mut self, value: &Value) -> Result<usize, EncodeError> {
        match value {
            Value::Void       => Ok(0),
            Value::Bool(v)    => self.bool(*v),
            Value::Byte(v)    => self.i8(*v),
            Value::Double(v)  => self.double(*v),
            Value::I16(v)     => self.i16(*v),
            Value::I32(v)     => self.i32(*v),
            Value::I64(v)     => self.wide(v),
            Value::Str(v)
                | Value::Utf8(v)
                | Value::Utf16(v) => self.binary(v),
            Value::Struct(v)  => self.structure(v),
            Value::Map(v)     => self.map(v),
            Value::Set(v)
                | Value::List(v) => self.list(v),
        }
    }

    pub fn bool(&mut self, v: bool) -> Result<usize, EncodeError> {
        self.put(&[v as u8])
    }

    pub fn i8(&mut self, v: i8) -> Result<usize, EncodeError> {
        self.put(&v.to_be_bytes())
    }

    pub fn i16(&mut self, v: i16) -> Result<usize, EncodeError> {
        self.put(&v.to_be_bytes())
    }

    pub fn i32(&mut self, v: i32) -> Result<usize, EncodeError> {
        self.put(&v.to_be_bytes())
    }

    pub fn double(&mut self, v: f64) -> Result<usize, EncodeError> {
        self.put(&v.to_be_bytes())
    }

    pub fn wide(&mut self, v: &Wide) -> Result<usize, EncodeError> {
        self.put(&v.to_be_bytes())
    }

    /// Length prefixed bytes
    pub fn binary(&mut self, v: &[u8]) -> Result<usize, EncodeError> {
        let c = self.len(v.len())?;
        Ok(c + self.put(v)?)
    }

    pub fn structure(&mut self, v: &Struct) -> Result<usize, EncodeError> {
        self.fields(&v.fields)
    }

    pub fn map(&mut self, v: &Map) -> Result<usize, EncodeError> {
        let mut c = self.put(&[v.key_type.code(), v.value_type.code()])?;
        c += self.len(v.entries.len())?;
        for (key, val) in v.entries.iter() {
            c += self.value(key)?;
            c += self.value(val)?;
        }
        Ok(c)
    }

    pub fn list(&mut self, v: &List) -> Result<usize, EncodeError> {
        let mut c = self.put(&[v.elem_type.code()])?;
        c += self.len(v.elements.len())?;
        for element in v.elements.iter() {
            c += self.value(element)?;
        }
        Ok(c)
    }

    fn fields(&mut self, fields: &[Field]) -> Result<usize, EncodeError> {
        let mut c = 0;
        for field in fields {
            c += self.put(&[field.value.tag().code()])?;
            c += self.i16(field.id)?;
            c += self.value(&field.value)?;
        }
        Ok(c + self.put(&[TypeTag::Stop.code()])?)
    }

    fn len(&mut self, len: usize) -> Result<usize, EncodeError> {
        match i32::try_from(len) {
            Ok(l)  => self.i32(l),
            Err(_) => Err(EncodeError::Length(len)),
        }
    }

    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<usize, EncodeError> {
        self.sink.put(bytes)?;
        Ok(bytes.len())
    }

}
