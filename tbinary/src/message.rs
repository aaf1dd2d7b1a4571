//! The message envelope. A strict message starts with the version word carrying the method type, followed by the
//! method name. A legacy message starts with the name and puts the method type into a single byte after it. Both
//! continue with the sequence id and the arguments as a struct. An optional header struct goes in front of it all.

use crate::dispatch::Builder;
use crate::encoder::Encoder;
use crate::error::{EncodeError, EncoderError};
use crate::raw::Raw;
use crate::sink::Sink;
use crate::types::MethodType;
use crate::value::{text_bytes, Encode, Field, Struct};
use std::borrow::Cow;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Message<'a> {
    /// Sequence id
    pub id: i32,
    /// UTF-8 encoded method name
    pub name: Cow<'a, [u8]>,
    pub method: MethodType,
    /// The arguments
    pub fields: Vec<Field<'a>>,
    pub header: Option<Struct<'a>>,
    pub strict: bool,
}

impl<'a> Message<'a> {

    /// A strict message without header or arguments
    pub fn new<N: Into<Cow<'a, str>>>(name: N, method: MethodType, id: i32) -> Self {
        Message { id, name: text_bytes(name.into()), method, fields: Vec::new(), header: None, strict: true }
    }

    pub fn with_field(mut self, field: Field<'a>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_header(mut self, header: Struct<'a>) -> Self {
        self.header = Some(header);
        self
    }

    /// Switch to the non-strict envelope
    pub fn legacy(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Coerce a loose message description of the shape `{id, name, type, fields, header, strict}`
    pub fn from_raw(raw: &'a Raw<'_>) -> Result<Self, EncoderError> {
        let mut builder = Builder::new();
        builder.message(raw).map_err(|e| e.at(builder.path()))
    }

}

impl<'a> Encode for Message<'a> {

    fn encoded_len(&self) -> usize {
        let header = self.header.as_ref().map_or(0, Encode::encoded_len);
        let envelope = if self.strict {
            4 + 4 + self.name.len()
        } else {
            4 + self.name.len() + 1
        };
        let arguments = self.fields.iter().map(|f| 1 + 2 + f.value.encoded_len()).sum::<usize>() + 1;
        header + envelope + 4 + arguments
    }

    fn encode<S: Sink>(&self, sink: &mut S) -> Result<usize, EncodeError> {
        let c = Encoder::new(sink).message(self)?;
        debug!(
            method = self.method.name(),
            name_len = self.name.len(),
            strict = self.strict,
            header = self.header.is_some(),
            bytes = c,
            "encoded message"
        );
        Ok(c)
    }

}
