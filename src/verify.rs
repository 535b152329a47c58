//! Support for verifying signed messages.
//!
//! This module contains the read-only accessors a verifier needs to get at
//! the bytes it digests and compares, the checks that a decoded tree
//! reproduces the bytes it was decoded from, and the structural binding of
//! a signed receipt to the message it acknowledges.
//!
//! The actual digest and signature verification happens elsewhere.

use std::slice;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;
use crate::cms::schema::SIGNED_ATTRIBUTES;
use crate::cms::{Attribute, ContentInfo, SignedData, SignerInfo};
use crate::decode::{DecodeError, DecodeOptions, ErrorKind, Pos};
use crate::encode::EncodeError;
use crate::ess::{Receipt, ReceiptRequest};
use crate::oid::Oid;
use crate::registry::Registry;
use crate::schema::{self, Schema};
use crate::value::Value;


//------------ Accessors -----------------------------------------------------

/// Returns the content type declared by a content info.
pub fn declared_content_type(content_info: &ContentInfo) -> &Oid {
    content_info.content_type()
}

/// Returns the octets of the encapsulated content if present.
///
/// The octets need to be decoded by the caller according to the
/// encapsulated content type.
pub fn encapsulated_bytes(signed_data: &SignedData) -> Option<&Bytes> {
    signed_data.encap_content_info().content()
}

/// Returns an iterator over the signed attributes of a signer.
///
/// The attributes appear in the order of their encoding. If the signer
/// has no signed attributes, the iterator is empty.
pub fn each_signed_attribute(signer: &SignerInfo) -> slice::Iter<Attribute> {
    signer.signed_attrs().unwrap_or_default().iter()
}

/// Returns the DER encoding of the signed attributes of a signer.
///
/// The attributes are encoded with the universal SET OF tag instead of
/// the implicit tag used within the signer info. These are the octets the
/// signature is calculated over. Returns `None` if the signer has no
/// signed attributes.
pub fn signed_attrs_der(
    signer: &SignerInfo
) -> Result<Option<Vec<u8>>, EncodeError> {
    signer.value().get("signedAttrs").map(|attrs| {
        schema::encode(&SIGNED_ATTRIBUTES, attrs)
    }).transpose()
}


//------------ Round Trips ---------------------------------------------------

/// Decodes data and checks that encoding the result reproduces it.
///
/// Returns the decoded value on success. If the encoding differs, a
/// [`RoundTripViolation`][ErrorKind::RoundTripViolation] error is returned
/// whose position is the first differing octet.
pub fn check_round_trip(
    schema: &'static Schema,
    data: Bytes,
    registry: &Registry,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let value = schema::decode(schema, data.clone(), registry, options)?;
    let encoded = schema::encode(schema, &value).map_err(|err| {
        DecodeError::new(
            ErrorKind::RoundTripViolation,
            format!("decoded {} fails to encode: {}", schema.name(), err),
            Pos::default()
        )
    })?;
    compare(schema, &data, &encoded)?;
    Ok(value)
}

/// Checks that all resolved open types in a value reproduce their octets.
///
/// Each resolved value is encoded with the schema it was resolved with and
/// compared to the captured encoding. Open types nested in resolved values
/// are checked, too.
pub fn check_resolved_round_trip(value: &Value) -> Result<(), DecodeError> {
    match *value {
        Value::Constructed(ref components) => {
            for (_, value) in components.iter() {
                check_resolved_round_trip(value)?;
            }
        }
        Value::List(ref values) => {
            for value in values {
                check_resolved_round_trip(value)?;
            }
        }
        Value::Choice(ref choice) => {
            check_resolved_round_trip(&choice.value)?;
        }
        Value::Open(ref open) => {
            if let Some(res) = open.resolution() {
                let encoded = schema::encode(
                    res.schema, &res.value
                ).map_err(|err| {
                    DecodeError::new(
                        ErrorKind::RoundTripViolation,
                        format!(
                            "resolved {} fails to encode: {}",
                            res.schema.name(), err
                        ),
                        Pos::default()
                    )
                })?;
                compare(res.schema, open.raw().as_slice(), &encoded)?;
                check_resolved_round_trip(&res.value)?;
            }
        }
        _ => { }
    }
    Ok(())
}

fn compare(
    schema: &Schema, original: &[u8], encoded: &[u8]
) -> Result<(), DecodeError> {
    let first = original.iter().zip(encoded).position(|(left, right)| {
        left != right
    });
    let pos = match first {
        Some(pos) => pos,
        None if original.len() == encoded.len() => return Ok(()),
        None => original.len().min(encoded.len()),
    };
    debug!(
        "round trip of {} differs at octet {} ({} vs {} octets)",
        schema.name(), pos, original.len(), encoded.len()
    );
    Err(DecodeError::new(
        ErrorKind::RoundTripViolation,
        format!("re-encoded {} differs", schema.name()),
        Pos::from(pos)
    ))
}


//------------ receipt_binding -----------------------------------------------

/// Checks that a receipt structurally belongs to a signed message.
///
/// The receipt is bound to a signer of the original message if the
/// signer requested a receipt and
///
/// * the receipt’s content type is the original encapsulated content
///   type,
/// * the receipt’s signed content identifier is the one of the receipt
///   request, and
/// * the receipt’s originator signature value is the signer’s signature.
///
/// The check succeeds if any signer is bound. Otherwise the mismatches of
/// the first signer with a receipt request are returned.
///
/// The msgSigDigest attribute of the receipt’s signer has to be compared
/// with the digest of the original signed attributes by the caller.
pub fn receipt_binding(
    original: &SignedData, receipt: &Receipt
) -> Result<(), BindingError> {
    let mut first = None;
    for signer in original.signer_infos() {
        let request = match ReceiptRequest::from_signer(signer)? {
            Some(request) => request,
            None => continue
        };
        let mut mismatches = Vec::new();
        if receipt.content_type()
            != original.encap_content_info().content_type()
        {
            mismatches.push(BindingMismatch::ContentType);
        }
        if receipt.signed_content_identifier()
            != request.signed_content_identifier()
        {
            mismatches.push(BindingMismatch::SignedContentIdentifier);
        }
        if receipt.originator_signature_value() != signer.signature() {
            mismatches.push(BindingMismatch::OriginatorSignature);
        }
        if mismatches.is_empty() {
            return Ok(())
        }
        if first.is_none() {
            first = Some(mismatches);
        }
    }
    match first {
        Some(mismatches) => Err(BindingError::Mismatch(mismatches)),
        None => Err(BindingError::NoReceiptRequest),
    }
}


//------------ BindingError --------------------------------------------------

/// A receipt is not bound to a message.
#[derive(Clone, Debug, Error)]
pub enum BindingError {
    /// None of the message’s signers requested a receipt.
    #[error("no signer requested a receipt")]
    NoReceiptRequest,

    /// The receipt differs from the message.
    #[error("receipt does not match message: {0:?}")]
    Mismatch(Vec<BindingMismatch>),

    /// A receipt request could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}


//------------ BindingMismatch -----------------------------------------------

/// A field of a receipt that doesn’t match the original message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingMismatch {
    ContentType,
    SignedContentIdentifier,
    OriginatorSignature,
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::cms::parse_content_info;
    use crate::cms::schema::CONTENT_INFO;
    use crate::schema::universal::OCTET_STRING;

    const DATA: &[u8] = b"\x30\x11\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x07\x01\
                          \xa0\x04\x04\x02\xab\xcd";

    #[test]
    fn accessors() {
        let info = parse_content_info(Bytes::from_static(DATA)).unwrap();
        assert_eq!(declared_content_type(&info), &crate::cms::oid::DATA);
    }

    #[test]
    fn round_trips() {
        let value = check_round_trip(
            &CONTENT_INFO, Bytes::from_static(DATA), Registry::standard(),
            &DecodeOptions::default()
        ).unwrap();
        check_resolved_round_trip(&value).unwrap();
    }

    #[test]
    fn resolved_mismatch() {
        use crate::captured::Captured;
        use crate::value::OpenValue;

        // A resolution that doesn’t belong to the captured octets.
        let open = OpenValue::resolved(
            Captured::from_bytes(
                Bytes::from_static(b"\x04\x02\xab\xcd")
            ).unwrap(),
            &OCTET_STRING,
            Value::OctetString(Bytes::from_static(b"\xab\xce"))
        );
        let err = check_resolved_round_trip(
            &Value::List(vec![Value::Open(open)])
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RoundTripViolation);
        assert_eq!(err.pos(), Pos::from(3));
    }

    #[test]
    fn compare_lengths() {
        assert!(compare(&OCTET_STRING, b"\x01\x02", b"\x01\x02").is_ok());
        assert_eq!(
            compare(&OCTET_STRING, b"\x01\x02", b"\x01").unwrap_err().pos(),
            Pos::from(1)
        );
    }
}
