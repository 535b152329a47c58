//! The universal primitive types.
//!
//! This module translates between the content octets of primitively
//! encoded values and the primitive variants of [`Value`]. The functions
//! [`decode_primitive`] and [`encode_primitive`] work on complete encoded
//! values using the natural tag of the type, while the schema decoder and
//! encoder use the content level functions so they can apply implicit tags.

use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind, Pos, Source};
use crate::encode::{EncodeError, write_tlv};
use crate::ident::Tag;
use crate::int::Integer;
use crate::oid::Oid;
use crate::string::{BitString, CharSet, RestrictedString};
use crate::time::{Time, TimeKind};
use crate::value::Value;


//------------ PrimitiveType -------------------------------------------------

/// A universal type that is always primitively encoded in DER.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveType {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    Oid,
    String(CharSet),
    Time(TimeKind),
}

impl PrimitiveType {
    /// Returns the natural tag of the type.
    pub const fn tag(self) -> Tag {
        match self {
            PrimitiveType::Boolean => Tag::BOOLEAN,
            PrimitiveType::Integer => Tag::INTEGER,
            PrimitiveType::BitString => Tag::BIT_STRING,
            PrimitiveType::OctetString => Tag::OCTET_STRING,
            PrimitiveType::Null => Tag::NULL,
            PrimitiveType::Oid => Tag::OID,
            PrimitiveType::String(charset) => charset.tag(),
            PrimitiveType::Time(kind) => kind.tag(),
        }
    }

    /// Returns the ASN.1 name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "BOOLEAN",
            PrimitiveType::Integer => "INTEGER",
            PrimitiveType::BitString => "BIT STRING",
            PrimitiveType::OctetString => "OCTET STRING",
            PrimitiveType::Null => "NULL",
            PrimitiveType::Oid => "OBJECT IDENTIFIER",
            PrimitiveType::String(charset) => charset.name(),
            PrimitiveType::Time(TimeKind::Utc) => "UTCTime",
            PrimitiveType::Time(TimeKind::Generalized) => "GeneralizedTime",
        }
    }

    /// Decodes the content octets of a value of this type.
    ///
    /// The position is that of the start of the value and is used for
    /// error reporting.
    pub fn decode_content(
        self, content: Bytes, pos: Pos
    ) -> Result<Value, DecodeError> {
        match self {
            PrimitiveType::Boolean => {
                match content.as_ref() {
                    [0x00] => Ok(Value::Boolean(false)),
                    [0xFF] => Ok(Value::Boolean(true)),
                    _ => Err(DecodeError::new(
                        ErrorKind::NonCanonicalEncoding,
                        "invalid boolean", pos
                    ))
                }
            }
            PrimitiveType::Integer => {
                Integer::from_content(content, pos).map(Value::Integer)
            }
            PrimitiveType::BitString => {
                BitString::from_content(content, pos).map(Value::BitString)
            }
            PrimitiveType::OctetString => Ok(Value::OctetString(content)),
            PrimitiveType::Null => {
                if content.is_empty() {
                    Ok(Value::Null)
                }
                else {
                    Err(DecodeError::new(
                        ErrorKind::NonCanonicalEncoding,
                        "non-empty null", pos
                    ))
                }
            }
            PrimitiveType::Oid => {
                Oid::from_content(content, pos).map(Value::Oid)
            }
            PrimitiveType::String(charset) => {
                RestrictedString::from_content(
                    charset, content, pos
                ).map(Value::String)
            }
            PrimitiveType::Time(kind) => {
                Time::from_content(kind, content, pos).map(Value::Time)
            }
        }
    }

    /// Returns the content octets of a value of this type.
    ///
    /// Returns an error if the value is not of this type.
    pub fn encode_content(self, value: &Value) -> Result<Bytes, EncodeError> {
        let res = match (self, value) {
            (PrimitiveType::Boolean, Value::Boolean(true)) => {
                Bytes::from_static(b"\xff")
            }
            (PrimitiveType::Boolean, Value::Boolean(false)) => {
                Bytes::from_static(b"\x00")
            }
            (PrimitiveType::Integer, Value::Integer(int)) => {
                Bytes::copy_from_slice(int.as_slice())
            }
            (PrimitiveType::BitString, Value::BitString(bits)) => {
                bits.to_content()
            }
            (PrimitiveType::OctetString, Value::OctetString(octets)) => {
                octets.clone()
            }
            (PrimitiveType::Null, Value::Null) => Bytes::new(),
            (PrimitiveType::Oid, Value::Oid(oid)) => oid.0.clone(),
            (PrimitiveType::String(charset), Value::String(s))
                if s.charset() == charset =>
            {
                Bytes::copy_from_slice(s.as_slice())
            }
            (PrimitiveType::Time(kind), Value::Time(time))
                if time.kind() == kind =>
            {
                Bytes::copy_from_slice(time.as_slice())
            }
            _ => return Err(EncodeError::Mismatch { schema: self.name() })
        };
        Ok(res)
    }

    /// Returns the primitive type of a value if it has one.
    pub fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(_) => Some(PrimitiveType::Boolean),
            Value::Integer(_) => Some(PrimitiveType::Integer),
            Value::BitString(_) => Some(PrimitiveType::BitString),
            Value::OctetString(_) => Some(PrimitiveType::OctetString),
            Value::Null => Some(PrimitiveType::Null),
            Value::Oid(_) => Some(PrimitiveType::Oid),
            Value::String(s) => Some(PrimitiveType::String(s.charset())),
            Value::Time(t) => Some(PrimitiveType::Time(t.kind())),
            _ => None
        }
    }
}


//------------ decode_primitive and encode_primitive -------------------------

/// Decodes a complete primitive value of the given type.
///
/// The data must contain exactly one value with the natural tag of the
/// type.
pub fn decode_primitive(
    ty: PrimitiveType, data: Bytes
) -> Result<Value, DecodeError> {
    let mut source = Source::new(data);
    let tlv = source.take_tlv()?;
    if tlv.tag() != ty.tag() {
        return Err(DecodeError::new(
            ErrorKind::SchemaMismatch,
            format!("expected {}, found {}", ty.name(), tlv.tag()),
            tlv.start()
        ))
    }
    tlv.check_primitive()?;
    let value = ty.decode_content(tlv.content(), tlv.start())?;
    source.check_exhausted()?;
    Ok(value)
}

/// Encodes a primitive value using its natural tag.
///
/// Returns an error if the value is not a primitive value.
pub fn encode_primitive(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let ty = PrimitiveType::of_value(value).ok_or(
        EncodeError::Mismatch { schema: "primitive type" }
    )?;
    let content = ty.encode_content(value)?;
    let mut res = Vec::new();
    crate::encode::infallible(
        write_tlv(&mut res, ty.tag(), false, &content)
    );
    Ok(res)
}


//============ Tests =========================================================
