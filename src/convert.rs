//! Conversion of decoded values into typed structures.
//!
//! The typed CMS and ESS structures are created from values decoded with
//! the matching schema, so the shape of the value is known. The functions
//! here still check it and return an error if it doesn’t match.

use bytes::Bytes;
use crate::captured::Captured;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::int::Integer;
use crate::oid::Oid;
use crate::string::RestrictedString;
use crate::value::{Choice, OpenValue, Value};


/// Creates the error for a value of the wrong shape.
pub(crate) fn mismatch(expected: &'static str) -> DecodeError {
    DecodeError::new(
        ErrorKind::SchemaMismatch,
        format!("value is not a {}", expected), Pos::default()
    )
}

/// Returns a component that has to be present.
pub(crate) fn required<'a>(
    value: &'a Value, name: &'static str
) -> Result<&'a Value, DecodeError> {
    value.get(name).ok_or_else(|| {
        DecodeError::new(
            ErrorKind::SchemaMismatch,
            format!("missing component {}", name), Pos::default()
        )
    })
}

pub(crate) fn oid(value: &Value) -> Result<Oid, DecodeError> {
    value.as_oid().cloned().ok_or_else(|| mismatch("OBJECT IDENTIFIER"))
}

pub(crate) fn integer(value: &Value) -> Result<Integer, DecodeError> {
    value.as_integer().cloned().ok_or_else(|| mismatch("INTEGER"))
}

pub(crate) fn octets(value: &Value) -> Result<Bytes, DecodeError> {
    value.as_octet_string().cloned().ok_or_else(|| mismatch("OCTET STRING"))
}

pub(crate) fn string(value: &Value) -> Result<RestrictedString, DecodeError> {
    value.as_string().cloned().ok_or_else(|| mismatch("string"))
}

pub(crate) fn captured(value: &Value) -> Result<Captured, DecodeError> {
    value.as_captured().cloned().ok_or_else(|| mismatch("ANY"))
}

pub(crate) fn open(value: &Value) -> Result<OpenValue, DecodeError> {
    value.as_open().cloned().ok_or_else(|| mismatch("ANY DEFINED BY"))
}

pub(crate) fn list(value: &Value) -> Result<&[Value], DecodeError> {
    value.as_list().ok_or_else(|| mismatch("SEQUENCE OF or SET OF"))
}

pub(crate) fn choice(value: &Value) -> Result<&Choice, DecodeError> {
    value.as_choice().ok_or_else(|| mismatch("CHOICE"))
}

/// Converts all elements of a list.
pub(crate) fn list_of<T>(
    value: &Value, op: impl Fn(&Value) -> Result<T, DecodeError>
) -> Result<Vec<T>, DecodeError> {
    list(value)?.iter().map(op).collect()
}

/// Converts an optional component.
pub(crate) fn optional<T>(
    value: &Value,
    name: &'static str,
    op: impl FnOnce(&Value) -> Result<T, DecodeError>
) -> Result<Option<T>, DecodeError> {
    value.get(name).map(op).transpose()
}
