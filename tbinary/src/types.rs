//! Type tags and method types of the thrift binary protocol. Both are written to the wire as a single byte (or, for
//! the method type of a strict message, or'd into the version word) and their codes are fixed by the protocol.

use crate::error::EncodeError;
use std::convert::TryFrom;
use std::str::FromStr;

/// Version word of strict messages. The method type gets or'd into the lowest byte.
pub const VERSION_1: u32 = 0x8001_0000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Terminates the field list of a struct, never a value type
    Stop = 0,
    Void = 1,
    Bool = 2,
    /// Also known as `I08`
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    /// Also known as `BINARY` and `UTF7`
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
    Utf8 = 16,
    Utf16 = 17,
}

impl TypeTag {

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The canonical name, aliases resolve to the first name of their group
    pub fn name(&self) -> &'static str {
        match *self {
            TypeTag::Stop   => "STOP",
            TypeTag::Void   => "VOID",
            TypeTag::Bool   => "BOOL",
            TypeTag::Byte   => "BYTE",
            TypeTag::Double => "DOUBLE",
            TypeTag::I16    => "I16",
            TypeTag::I32    => "I32",
            TypeTag::I64    => "I64",
            TypeTag::String => "STRING",
            TypeTag::Struct => "STRUCT",
            TypeTag::Map    => "MAP",
            TypeTag::Set    => "SET",
            TypeTag::List   => "LIST",
            TypeTag::Utf8   => "UTF8",
            TypeTag::Utf16  => "UTF16",
        }
    }

}

impl FromStr for TypeTag {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STOP"                       => Ok(TypeTag::Stop),
            "VOID"                       => Ok(TypeTag::Void),
            "BOOL"                       => Ok(TypeTag::Bool),
            "BYTE" | "I08"               => Ok(TypeTag::Byte),
            "DOUBLE"                     => Ok(TypeTag::Double),
            "I16"                        => Ok(TypeTag::I16),
            "I32"                        => Ok(TypeTag::I32),
            "I64"                        => Ok(TypeTag::I64),
            "UTF7" | "BINARY" | "STRING" => Ok(TypeTag::String),
            "STRUCT"                     => Ok(TypeTag::Struct),
            "MAP"                        => Ok(TypeTag::Map),
            "SET"                        => Ok(TypeTag::Set),
            "LIST"                       => Ok(TypeTag::List),
            "UTF8"                       => Ok(TypeTag::Utf8),
            "UTF16"                      => Ok(TypeTag::Utf16),
            other                        => Err(EncodeError::UnknownType(other.to_string())),
        }
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = EncodeError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            x if x == TypeTag::Stop as u8   => Ok(TypeTag::Stop),
            x if x == TypeTag::Void as u8   => Ok(TypeTag::Void),
            x if x == TypeTag::Bool as u8   => Ok(TypeTag::Bool),
            x if x == TypeTag::Byte as u8   => Ok(TypeTag::Byte),
            x if x == TypeTag::Double as u8 => Ok(TypeTag::Double),
            x if x == TypeTag::I16 as u8    => Ok(TypeTag::I16),
            x if x == TypeTag::I32 as u8    => Ok(TypeTag::I32),
            x if x == TypeTag::I64 as u8    => Ok(TypeTag::I64),
            x if x == TypeTag::String as u8 => Ok(TypeTag::String),
            x if x == TypeTag::Struct as u8 => Ok(TypeTag::Struct),
            x if x == TypeTag::Map as u8    => Ok(TypeTag::Map),
            x if x == TypeTag::Set as u8    => Ok(TypeTag::Set),
            x if x == TypeTag::List as u8   => Ok(TypeTag::List),
            x if x == TypeTag::Utf8 as u8   => Ok(TypeTag::Utf8),
            x if x == TypeTag::Utf16 as u8  => Ok(TypeTag::Utf16),
            other                           => Err(EncodeError::UnknownType(other.to_string())),
        }
    }
}

/// The kind of an rpc message
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodType {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl MethodType {

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match *self {
            MethodType::Call      => "CALL",
            MethodType::Reply     => "REPLY",
            MethodType::Exception => "EXCEPTION",
            MethodType::Oneway    => "ONEWAY",
        }
    }

    /// The first word of a strict message
    #[inline]
    pub fn version_word(&self) -> u32 {
        VERSION_1 | self.code() as u32
    }

}

impl FromStr for MethodType {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALL"      => Ok(MethodType::Call),
            "REPLY"     => Ok(MethodType::Reply),
            "EXCEPTION" => Ok(MethodType::Exception),
            "ONEWAY"    => Ok(MethodType::Oneway),
            other       => Err(EncodeError::UnknownMethod(other.to_string())),
        }
    }
}
