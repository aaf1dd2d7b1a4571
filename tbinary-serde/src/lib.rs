//! Describe thrift messages with your own Rust data structures, or read them from any self-describing format, and
//! encode them with `tbinary`.
//!
//! # Two directions
//!
//! Serializing goes through a loose `tbinary::Raw` tree: structs and maps turn into objects, sequences into arrays and
//! unit variants into their names. The tree then gets coerced under the type tags it carries, exactly as if it had
//! been handed to `tbinary::encode` directly. For the other direction `Loose` implements `Deserialize`, so a message
//! description can be read from JSON with `serde_json` and friends while borrowing its strings from the input.
//!
//! Map keys must have a text form since they end up as object keys. Note that thrift maps themselves are described
//! as `{keyType, valueType, data: [{key, value}]}` and therefore never need that.
//!
//! # Examples
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "UPPERCASE")]
//! enum Method {
//!     Call,
//!     Reply,
//! }
//!
//! #[derive(Serialize)]
//! struct Field<T> {
//!     id: i16,
//!     #[serde(rename = "type")]
//!     tag: &'static str,
//!     value: T,
//! }
//!
//! #[derive(Serialize)]
//! struct Ping {
//!     id: i32,
//!     name: &'static str,
//!     #[serde(rename = "type")]
//!     method: Method,
//!     fields: Vec<Field<bool>>,
//! }
//!
//! let ping = Ping {
//!     id: 10,
//!     name: "ping",
//!     method: Method::Reply,
//!     fields: vec![Field { id: 0, tag: "BOOL", value: true }],
//! };
//!
//! let bytes = tbinary_serde::to_bytes(&ping).unwrap();
//! assert_eq!(bytes, [
//!     0x80, 0x01, 0x00, 0x02,             // strict version word, REPLY
//!     0x00, 0x00, 0x00, 0x04,             // name of length 4
//!     0x70, 0x69, 0x6e, 0x67,             // 'ping'
//!     0x00, 0x00, 0x00, 0x0a,             // sequence id 10
//!     0x02, 0x00, 0x00,                   // BOOL field with id 0
//!     0x01,                               // true
//!     0x00,                               // STOP
//! ]);
//! ```

mod de;
mod error;
mod ser;

pub use de::Loose;
pub use error::{Error, Result};
pub use ser::{to_bytes, to_bytes_with, to_raw, to_writer, Serializer};

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;
    use super::{to_bytes, to_bytes_with, to_raw, to_writer, Error, Loose};
    use tbinary::{ErrorKind, Raw, Strategy};

    #[derive(Serialize)]
    #[serde(rename_all = "UPPERCASE")]
    enum Tag {
        I32,
        String,
        Map,
        List,
        Struct,
    }

    #[derive(Serialize)]
    struct Field<T> {
        id: i16,
        #[serde(rename = "type")]
        tag: Tag,
        value: T,
    }

    #[derive(Serialize)]
    struct Entry<K, V> {
        key: K,
        value: V,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Dict<K, V> {
        key_type: Tag,
        value_type: Tag,
        data: Vec<Entry<K, V>>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Seq<T> {
        value_type: Tag,
        data: Vec<T>,
    }

    #[derive(Serialize)]
    struct Args<T> {
        fields: Vec<T>,
    }

    #[derive(Serialize)]
    struct Call<F> {
        id: i32,
        name: String,
        #[serde(rename = "type")]
        method: &'static str,
        fields: F,
        header: Option<Args<Field<String>>>,
        strict: bool,
    }

    #[test]
    fn derived_description() {
        let call = Call {
            id: 1,
            name: "get".to_string(),
            method: "CALL",
            fields: (
                Field { id: 1, tag: Tag::Map, value: Dict {
                    key_type: Tag::String,
                    value_type: Tag::I32,
                    data: vec![Entry { key: "a", value: 1 }],
                } },
                Field { id: 2, tag: Tag::List, value: Seq { value_type: Tag::Struct, data: vec![
                    Args { fields: vec![Field { id: 1, tag: Tag::String, value: "x" }] },
                ] } },
            ),
            header: None,
            strict: true,
        };
        assert_eq!(vec![
            0x80, 0x01, 0x00, 0x01,
            0, 0, 0, 3, b'g', b'e', b't',
            0, 0, 0, 1,
            13, 0, 1, 11, 8, 0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 1,
            15, 0, 2, 12, 0, 0, 0, 1, 11, 0, 1, 0, 0, 0, 1, b'x', 0,
            0,
        ], to_bytes(&call).unwrap());
    }

    #[test]
    fn header_and_legacy() {
        let call = Call {
            id: -1,
            name: "x".to_string(),
            method: "ONEWAY",
            fields: Vec::<Field<i32>>::new(),
            header: Some(Args { fields: vec![Field { id: 7, tag: Tag::String, value: "h".to_string() }] }),
            strict: false,
        };
        assert_eq!(vec![
            11, 0, 7, 0, 0, 0, 1, b'h', 0,
            0, 0, 0, 1, b'x', 4,
            0xff, 0xff, 0xff, 0xff,
            0,
        ], to_bytes(&call).unwrap());
    }

    #[test]
    fn json_description() {
        let description = json!({
            "id": "7",
            "name": "sum",
            "type": "REPLY",
            "fields": [
                {"id": 0, "type": "I64", "value": "-4294967296"},
                {"id": 1, "type": "DOUBLE", "value": 0.5},
            ],
        });
        let bytes = to_bytes(&description).unwrap();
        assert_eq!(bytes, to_bytes_with(&description, Strategy::Presized).unwrap());
        let mut out = Vec::new();
        assert_eq!(bytes.len(), to_writer(&mut out, &description).unwrap());
        assert_eq!(bytes, out);
        assert_eq!(&[0, 0, 0, 7], &bytes[11..15]);
        assert_eq!(&[10, 0, 0, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0], &bytes[15..26]);
    }

    #[test]
    fn json_roundtrip_through_loose() {
        let text = r#"{"id": 3, "name": "n", "type": "CALL", "fields": [{"id": 1, "type": "BOOL", "value": "false"}]}"#;
        let loose: Loose = serde_json::from_str(text).unwrap();
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(tbinary::encode(&loose.0).unwrap(), to_bytes(&value).unwrap());
    }

    #[test]
    fn raw_shapes() {
        #[derive(Serialize)]
        enum Shape {
            Unit,
            Newtype(u8),
            Tuple(u8, bool),
            Struct { a: u8 },
        }
        assert_eq!(Raw::from("Unit"), to_raw(&Shape::Unit).unwrap());
        assert_eq!(Raw::object(vec![("Newtype", Raw::from(1u8))]), to_raw(&Shape::Newtype(1)).unwrap());
        assert_eq!(Raw::object(vec![("Tuple", Raw::Array(vec![Raw::from(1u8), Raw::Bool(true)]))]), to_raw(&Shape::Tuple(1, true)).unwrap());
        assert_eq!(Raw::object(vec![("Struct", Raw::object(vec![("a", Raw::from(2u8))]))]), to_raw(&Shape::Struct { a: 2 }).unwrap());
        assert_eq!(Raw::Null, to_raw(&Option::<u8>::None).unwrap());
        assert_eq!(Raw::from(&b"ab"[..]).into_owned(), to_raw(&serde_bytes::Bytes::new(b"ab")).unwrap());
    }

    #[test]
    fn map_keys() {
        let map: BTreeMap<u16, &str> = [(1, "a"), (2, "b")].into_iter().collect();
        assert_eq!(Raw::object(vec![("1", Raw::from("a")), ("2", Raw::from("b"))]), to_raw(&map).unwrap());
        let map: BTreeMap<(u8, u8), u8> = [((1, 2), 3)].into_iter().collect();
        assert!(matches!(to_raw(&map), Err(Error::KeyType("array"))));
    }

    #[test]
    fn encode_errors() {
        let description = json!({"type": "CALL", "fields": [{"id": 1, "type": "I8", "value": 1}]});
        match to_bytes(&description) {
            Err(Error::Encode(e)) => {
                assert_eq!(ErrorKind::Protocol, e.kind());
                assert_eq!("fields[0].type", e.path());
            },
            other => panic!("{:?}", other),
        }
        let description = json!({"type": "CALL", "fields": [{"id": 40000, "type": "I32", "value": 1}]});
        match to_bytes(&description) {
            Err(Error::Encode(e)) => assert_eq!(ErrorKind::Range, e.kind()),
            other => panic!("{:?}", other),
        }
    }

}
