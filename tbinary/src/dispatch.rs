//! Turns loose input into the typed tree. `Builder::value` is the one place that decides what a type tag means; the
//! composite builders call back into it for every nested value. The builder keeps track of where in the input it is
//! so errors can name the offending location.

use crate::coerce::{self, Encoding};
use crate::error::EncodeError;
use crate::message::Message;
use crate::raw::Raw;
use crate::types::{MethodType, TypeTag};
use crate::value::{Field, List, Map, Struct, Value};
use std::fmt::Write;
use tracing::trace;

enum Segment {
    Key(&'static str),
    Index(usize),
}

pub(crate) struct Builder {
    path: Vec<Segment>,
}

impl Builder {

    pub fn new() -> Self {
        Builder { path: Vec::new() }
    }

    /// Where the builder currently is, e.g. `fields[0].value.data[3]`. After a failed build this is the location of
    /// the failure.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in self.path.iter() {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                },
                Segment::Index(i) => {
                    let _ = write!(out, "[{}]", i);
                },
            }
        }
        out
    }

    /// Runs `f` one segment deeper. The segment stays on the path if `f` fails.
    fn within<T, F>(&mut self, segment: Segment, f: F) -> Result<T, EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<T, EncodeError>,
    {
        self.path.push(segment);
        let result = f(self)?;
        self.path.pop();
        Ok(result)
    }

    pub fn value<'r>(&mut self, tag: TypeTag, raw: Option<&'r Raw<'_>>) -> Result<Value<'r>, EncodeError> {
        Ok(match tag {
            TypeTag::Stop   => return Err(EncodeError::UnknownType(tag.name().to_string())),
            TypeTag::Void   => Value::Void,
            TypeTag::Bool   => Value::Bool(coerce::boolean(raw)?),
            TypeTag::Byte   => Value::Byte(coerce::int8(raw)?),
            TypeTag::Double => Value::Double(coerce::double(raw)?),
            TypeTag::I16    => Value::I16(coerce::int16(raw)?),
            TypeTag::I32    => Value::I32(coerce::int32(raw)?),
            TypeTag::I64    => Value::I64(coerce::wide(raw)?),
            TypeTag::String => Value::Str(coerce::text(raw, Encoding::Utf8)),
            TypeTag::Utf8   => Value::Utf8(coerce::text(raw, Encoding::Utf8)),
            TypeTag::Utf16  => Value::Utf16(coerce::text(raw, Encoding::Utf16Le)),
            TypeTag::Struct => Value::Struct(self.structure(raw)?),
            TypeTag::Map    => Value::Map(self.map(raw)?),
            TypeTag::Set    => Value::Set(self.list(raw, "set")?),
            TypeTag::List   => Value::List(self.list(raw, "list")?),
        })
    }

    /// `{fields: [{id, type, value}]}`
    pub fn structure<'r>(&mut self, raw: Option<&'r Raw<'_>>) -> Result<Struct<'r>, EncodeError> {
        let raw = object(raw, "struct")?;
        let fields = self.fields(raw.get("fields"))?;
        trace!(fields = fields.len(), "struct");
        Ok(Struct::new(fields))
    }

    /// `{keyType, valueType, data: [{key, value}]}`
    fn map<'r>(&mut self, raw: Option<&'r Raw<'_>>) -> Result<Map<'r>, EncodeError> {
        let raw = object(raw, "map")?;
        let key_type = self.within(Segment::Key("keyType"), |_| type_tag(raw.get("keyType")))?;
        let value_type = self.within(Segment::Key("valueType"), |_| type_tag(raw.get("valueType")))?;
        let entries = self.within(Segment::Key("data"), |b| {
            let items = array(raw.get("data"), "data")?;
            let mut entries = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                entries.push(b.within(Segment::Index(i), |b| {
                    let entry = object(Some(item), "map entry")?;
                    let key = b.within(Segment::Key("key"), |b| b.value(key_type, entry.get("key")))?;
                    let value = b.within(Segment::Key("value"), |b| b.value(value_type, entry.get("value")))?;
                    Ok((key, value))
                })?);
            }
            Ok(entries)
        })?;
        trace!(key_type = key_type.name(), value_type = value_type.name(), len = entries.len(), "map");
        Ok(Map::new(key_type, value_type, entries))
    }

    /// `{valueType, data: [...]}`, for sets as well as lists
    fn list<'r>(&mut self, raw: Option<&'r Raw<'_>>, what: &'static str) -> Result<List<'r>, EncodeError> {
        let raw = object(raw, what)?;
        let elem_type = self.within(Segment::Key("valueType"), |_| type_tag(raw.get("valueType")))?;
        let elements = self.within(Segment::Key("data"), |b| {
            let items = array(raw.get("data"), "data")?;
            let mut elements = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                elements.push(b.within(Segment::Index(i), |b| b.value(elem_type, Some(item)))?);
            }
            Ok(elements)
        })?;
        trace!(elem_type = elem_type.name(), len = elements.len(), "{}", what);
        Ok(List::new(elem_type, elements))
    }

    /// An absent field list is empty
    fn fields<'r>(&mut self, raw: Option<&'r Raw<'_>>) -> Result<Vec<Field<'r>>, EncodeError> {
        self.within(Segment::Key("fields"), |b| {
            let items = match raw {
                None => return Ok(Vec::new()),
                Some(_) => array(raw, "fields")?,
            };
            let mut fields = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                fields.push(b.within(Segment::Index(i), |b| b.field(item))?);
            }
            Ok(fields)
        })
    }

    fn field<'r>(&mut self, raw: &'r Raw<'_>) -> Result<Field<'r>, EncodeError> {
        let raw = object(Some(raw), "field")?;
        let id = self.within(Segment::Key("id"), |_| coerce::int16(raw.get("id")))?;
        let tag = self.within(Segment::Key("type"), |_| type_tag(raw.get("type")))?;
        let value = self.within(Segment::Key("value"), |b| b.value(tag, raw.get("value")))?;
        Ok(Field::new(id, value))
    }

    /// `{id, name, type, fields, header, strict}`
    pub fn message<'r>(&mut self, raw: &'r Raw<'_>) -> Result<Message<'r>, EncodeError> {
        let raw = object(Some(raw), "message")?;
        let header = self.within(Segment::Key("header"), |b| match raw.get("header") {
            None | Some(Raw::Null) => Ok(None),
            header => b.structure(header).map(Some),
        })?;
        let method = self.within(Segment::Key("type"), |_| method_type(raw.get("type")))?;
        let strict = raw.get("strict").map_or(true, Raw::truthy);
        let name = coerce::text(raw.get("name"), Encoding::Utf8);
        let id = self.within(Segment::Key("id"), |_| coerce::int32(raw.get("id")))?;
        let fields = self.fields(raw.get("fields"))?;
        Ok(Message { id, name, method, fields, header, strict })
    }

}

fn object<'r, 'x>(raw: Option<&'r Raw<'x>>, what: &'static str) -> Result<&'r Raw<'x>, EncodeError> {
    match raw {
        None                       => Err(EncodeError::Missing(what)),
        Some(r @ Raw::Object(_))   => Ok(r),
        Some(other)                => Err(EncodeError::Shape(what, other.typename())),
    }
}

fn array<'r, 'x>(raw: Option<&'r Raw<'x>>, what: &'static str) -> Result<&'r [Raw<'x>], EncodeError> {
    match raw {
        None                    => Err(EncodeError::Missing(what)),
        Some(Raw::Array(items)) => Ok(items),
        Some(other)             => Err(EncodeError::Shape("array", other.typename())),
    }
}

/// STOP only terminates structs and is no valid value type
fn type_tag(raw: Option<&Raw>) -> Result<TypeTag, EncodeError> {
    match raw {
        None                  => Err(EncodeError::UnknownType("undefined".to_string())),
        Some(Raw::Str(name))  => match name.parse()? {
            TypeTag::Stop => Err(EncodeError::UnknownType(TypeTag::Stop.name().to_string())),
            tag           => Ok(tag),
        },
        Some(other)           => Err(EncodeError::UnknownType(other.to_string())),
    }
}

fn method_type(raw: Option<&Raw>) -> Result<MethodType, EncodeError> {
    match raw {
        None                 => Err(EncodeError::UnknownMethod("undefined".to_string())),
        Some(Raw::Str(name)) => name.parse(),
        Some(other)          => Err(EncodeError::UnknownMethod(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::Builder;
    use crate::error::{EncodeError, ErrorKind};
    use crate::raw::Raw;
    use crate::types::TypeTag;
    use crate::value::{Field, List, Map, Struct, Value};

    fn field(id: i64, tag: &'static str, value: Raw<'static>) -> Raw<'static> {
        Raw::object(vec![("id", Raw::from(id)), ("type", Raw::from(tag)), ("value", value)])
    }

    fn build<'r>(tag: TypeTag, raw: &'r Raw) -> Result<Value<'r>, (EncodeError, String)> {
        let mut builder = Builder::new();
        builder.value(tag, Some(raw)).map_err(|e| (e, builder.path()))
    }

    #[test]
    fn scalars() {
        assert_eq!(Value::Void, build(TypeTag::Void, &Raw::from("ignored")).unwrap());
        assert_eq!(Value::Bool(true), build(TypeTag::Bool, &Raw::from("true")).unwrap());
        assert_eq!(Value::Byte(-5), build(TypeTag::Byte, &Raw::from("-5")).unwrap());
        assert_eq!(Value::I16(300), build(TypeTag::I16, &Raw::from(300)).unwrap());
        assert_eq!(Value::I32(7), build(TypeTag::I32, &Raw::from(7.9)).unwrap());
        assert_eq!(Value::i64(-1), build(TypeTag::I64, &Raw::from("-1")).unwrap());
        assert_eq!(Value::Double(0.5), build(TypeTag::Double, &Raw::from(0.5)).unwrap());
        assert_eq!(Value::string("12"), build(TypeTag::String, &Raw::from(12)).unwrap());
        assert_eq!(Value::Utf8(b"x"[..].into()), build(TypeTag::Utf8, &Raw::from("x")).unwrap());
        assert_eq!(Value::utf16("x"), build(TypeTag::Utf16, &Raw::from("x")).unwrap());
    }

    #[test]
    fn stop_is_no_value_type() {
        assert_eq!(ErrorKind::Protocol, build(TypeTag::Stop, &Raw::Null).unwrap_err().0.kind());
        let raw = Raw::object(vec![("valueType", Raw::from("STOP")), ("data", Raw::Array(vec![]))]);
        assert_eq!(ErrorKind::Protocol, build(TypeTag::List, &raw).unwrap_err().0.kind());
    }

    #[test]
    fn nested_struct() {
        let raw = Raw::object(vec![("fields", Raw::Array(vec![
            field(1, "I32", Raw::from(5)),
            field(2, "STRUCT", Raw::object(vec![("fields", Raw::Array(vec![field(1, "BOOL", Raw::Bool(false))]))])),
        ]))]);
        let expected = Value::Struct(Struct::new(vec![
            Field::new(1, Value::I32(5)),
            Field::new(2, Value::Struct(Struct::new(vec![Field::new(1, Value::Bool(false))]))),
        ]));
        assert_eq!(expected, build(TypeTag::Struct, &raw).unwrap());
    }

    #[test]
    fn absent_fields_and_defaults() {
        let raw = Raw::object(Vec::<(&str, Raw)>::new());
        assert_eq!(Value::Struct(Struct::default()), build(TypeTag::Struct, &raw).unwrap());
        let raw = Raw::object(vec![("fields", Raw::Array(vec![Raw::object(vec![("type", Raw::from("I32"))])]))]);
        assert_eq!(Value::Struct(Struct::new(vec![Field::new(0, Value::I32(0))])), build(TypeTag::Struct, &raw).unwrap());
    }

    #[test]
    fn maps_and_sets() {
        let raw = Raw::object(vec![
            ("keyType", Raw::from("STRING")),
            ("valueType", Raw::from("I16")),
            ("data", Raw::Array(vec![
                Raw::object(vec![("key", Raw::from("a")), ("value", Raw::from(1))]),
                Raw::object(vec![("key", Raw::from("a")), ("value", Raw::from(2))]),
            ])),
        ]);
        let expected = Value::Map(Map::new(TypeTag::String, TypeTag::I16, vec![
            (Value::string("a"), Value::I16(1)),
            (Value::string("a"), Value::I16(2)),
        ]));
        assert_eq!(expected, build(TypeTag::Map, &raw).unwrap());
        let raw = Raw::object(vec![("valueType", Raw::from("BYTE")), ("data", Raw::Array(vec![Raw::from(1), Raw::from("2")]))]);
        let expected = Value::Set(List::new(TypeTag::Byte, vec![Value::Byte(1), Value::Byte(2)]));
        assert_eq!(expected, build(TypeTag::Set, &raw).unwrap());
    }

    #[test]
    fn error_paths() {
        let raw = Raw::object(vec![("fields", Raw::Array(vec![
            field(1, "BOOL", Raw::Bool(true)),
            field(2, "LIST", Raw::object(vec![("valueType", Raw::from("BYTE")), ("data", Raw::Array(vec![Raw::from(1), Raw::from(300)]))])),
        ]))]);
        let (e, path) = build(TypeTag::Struct, &raw).unwrap_err();
        assert_eq!(ErrorKind::Range, e.kind());
        assert_eq!("fields[1].value.data[1]", path);
        let raw = Raw::object(vec![("fields", Raw::Array(vec![field(1, "NOPE", Raw::Null)]))]);
        let (e, path) = build(TypeTag::Struct, &raw).unwrap_err();
        assert_eq!("Unknown type NOPE", e.to_string());
        assert_eq!("fields[0].type", path);
    }

    #[test]
    fn composites_have_no_default() {
        let mut builder = Builder::new();
        assert!(matches!(builder.value(TypeTag::Struct, None), Err(EncodeError::Missing("struct"))));
        assert!(matches!(build(TypeTag::Map, &Raw::from("x")), Err((EncodeError::Shape("map", "string"), _))));
        let raw = Raw::object(vec![("valueType", Raw::from("I32"))]);
        assert!(matches!(build(TypeTag::List, &raw), Err((EncodeError::Missing("data"), _))));
    }

}
