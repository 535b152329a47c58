//! Enhanced Security Services.
//!
//! This module contains the schemas and typed structures of the content
//! types and attributes defined in
//! [RFC 2634](https://tools.ietf.org/html/rfc2634) and updated by
//! [RFC 5035](https://tools.ietf.org/html/rfc5035): signed receipts,
//! receipt requests, security labels, mail list expansion history,
//! content hints and references, and the signing certificate attributes.
//!
//! None of them introduce anything new to the codec. They are bound into
//! the registry returned by [`overlay`] which, layered over the CMS
//! registry, forms the [standard registry][Registry::standard].

pub use self::general_name::GeneralName;
pub use self::receipt::{
    AllOrFirstTier, ContentHints, Receipt, ReceiptRequest, ReceiptsFrom,
    msg_sig_digest, parse_receipt, parse_receipt_content,
};
pub use self::signing_cert::{
    EssCertId, EssCertIdV2, IssuerSerial, PolicyInformation,
    PolicyQualifierInfo, SigningCertificate, SigningCertificateV1,
    SigningCertificateV2, parse_signing_certificate,
};

use std::ptr;
use crate::cms::{SignerInfo, find_attribute};
use crate::decode::{DecodeError, DecodeOptions, ErrorKind, Pos};
use crate::registry::Registry;
use crate::schema::{Domain, Schema};
use crate::schema::universal::IA5_STRING;
use crate::value::Value;

pub mod oid;
pub mod schema;

mod general_name;
mod receipt;
mod signing_cert;


//------------ overlay -------------------------------------------------------

/// Returns a registry with the bindings defined by ESS.
///
/// This binds the receipt content type, all ESS attributes, and the
/// policy qualifiers used by the signing certificate attributes.
pub fn overlay() -> Registry {
    use self::schema as ess;

    Registry::new()
        .with(Domain::ContentType, oid::CT_RECEIPT, &ess::RECEIPT)
        .with(
            Domain::Attribute, oid::AA_RECEIPT_REQUEST, &ess::RECEIPT_REQUEST
        )
        .with(
            Domain::Attribute, oid::AA_SECURITY_LABEL,
            &ess::ESS_SECURITY_LABEL
        )
        .with(
            Domain::Attribute, oid::AA_ML_EXPAND_HISTORY,
            &ess::ML_EXPANSION_HISTORY
        )
        .with(Domain::Attribute, oid::AA_CONTENT_HINT, &ess::CONTENT_HINTS)
        .with(
            Domain::Attribute, oid::AA_MSG_SIG_DIGEST, &ess::MSG_SIG_DIGEST
        )
        .with(
            Domain::Attribute, oid::AA_CONTENT_IDENTIFIER,
            &ess::CONTENT_IDENTIFIER
        )
        .with(
            Domain::Attribute, oid::AA_EQUIVALENT_LABELS,
            &ess::EQUIVALENT_LABELS
        )
        .with(
            Domain::Attribute, oid::AA_CONTENT_REFERENCE,
            &ess::CONTENT_REFERENCE
        )
        .with(
            Domain::Attribute, oid::AA_SIGNING_CERTIFICATE,
            &ess::SIGNING_CERTIFICATE
        )
        .with(
            Domain::Attribute, oid::AA_SIGNING_CERTIFICATE_V2,
            &ess::SIGNING_CERTIFICATE_V2
        )
        .with(Domain::PolicyQualifier, oid::QT_CPS, &IA5_STRING)
        .with(Domain::PolicyQualifier, oid::QT_UNOTICE, &ess::USER_NOTICE)
}


//------------ Helpers -------------------------------------------------------

/// Returns the first value of a signed attribute decoded with `schema`.
///
/// If the value was already resolved with that schema, the resolved value
/// is used. Otherwise the captured encoding is decoded.
fn signed_attribute_value(
    signer: &SignerInfo,
    attr_type: &impl AsRef<[u8]>,
    schema: &'static Schema,
) -> Result<Option<Value>, DecodeError> {
    let value = match signer.signed_attrs().and_then(|attrs| {
        find_attribute(attrs, attr_type)
    }).and_then(|attr| attr.first_value()) {
        Some(value) => value,
        None => return Ok(None)
    };
    if let Some(res) = value.resolution() {
        if ptr::eq(res.schema, schema) {
            return Ok(Some(res.value.as_ref().clone()))
        }
    }
    crate::schema::decode(
        schema, value.raw().as_bytes().clone(), Registry::standard(),
        &DecodeOptions::default()
    ).map(Some).map_err(|err| {
        DecodeError::with_source(
            ErrorKind::OpenTypeDecodeFailure,
            format!("malformed {} attribute", schema.name()),
            Pos::default(), err
        )
    })
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn overlay_bindings() {
        let overlay = overlay();
        assert_eq!(overlay.iter(Domain::ContentType).count(), 1);
        assert_eq!(overlay.iter(Domain::Attribute).count(), 10);
        assert_eq!(overlay.iter(Domain::PolicyQualifier).count(), 2);
        assert!(ptr::eq(
            overlay.get(Domain::Attribute, &oid::AA_MSG_SIG_DIGEST).unwrap(),
            &schema::MSG_SIG_DIGEST
        ));
    }

    #[test]
    fn security_label() {
        use crate::decode::SetOrder;
        use crate::schema::{decode, encode};

        // policy 1.2, classification 1, privacy mark "TOP"
        const CANONICAL: &[u8] =
            b"\x31\x0c\x02\x01\x01\x06\x02\x2a\x03\x13\x03TOP";
        const MISORDERED: &[u8] =
            b"\x31\x0c\x06\x02\x2a\x03\x02\x01\x01\x13\x03TOP";

        let value = decode(
            &schema::ESS_SECURITY_LABEL, Bytes::from_static(CANONICAL),
            Registry::standard(), &DecodeOptions::default()
        ).unwrap();
        assert_eq!(
            value.get("security-classification")
                .and_then(Value::as_integer)
                .and_then(|int| int.to_i64()),
            Some(1)
        );
        assert_eq!(
            encode(&schema::ESS_SECURITY_LABEL, &value).unwrap(), CANONICAL
        );

        assert_eq!(
            decode(
                &schema::ESS_SECURITY_LABEL, Bytes::from_static(MISORDERED),
                Registry::standard(), &DecodeOptions::default()
            ).unwrap_err().kind(),
            ErrorKind::NonCanonicalEncoding
        );
        let value = decode(
            &schema::ESS_SECURITY_LABEL, Bytes::from_static(MISORDERED),
            Registry::standard(),
            &DecodeOptions::default().with_set_order(SetOrder::Relaxed)
        ).unwrap();
        assert_eq!(
            encode(&schema::ESS_SECURITY_LABEL, &value).unwrap(), CANONICAL
        );
    }
}
