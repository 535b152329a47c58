//! Signed data.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::captured::Captured;
use crate::convert;
use crate::decode::{DecodeError, DecodeOptions, ErrorKind, Pos};
use crate::encode::{EncodeError, header_len, total_len};
use crate::ident::Tag;
use crate::int::Integer;
use crate::oid::Oid;
use crate::primitive::{PrimitiveType, decode_primitive};
use crate::registry::Registry;
use crate::schema;
use crate::value::Value;
use super::attribute::{Attribute, find_attribute};
use super::common::{AlgorithmIdentifier, IssuerAndSerialNumber};
use super::content_info::ContentInfo;
use super::oid;
use super::schema::SIGNED_DATA;


//------------ SignedData ----------------------------------------------------

/// The content of a content info of type signed data.
#[derive(Clone, Debug)]
pub struct SignedData {
    version: Integer,
    digest_algorithms: Vec<AlgorithmIdentifier>,
    encap_content_info: EncapsulatedContentInfo,
    certificates: Option<Vec<Captured>>,
    crls: Option<Vec<Captured>>,
    signer_infos: Vec<SignerInfo>,

    /// The complete decoded value.
    value: Value,
}

impl SignedData {
    /// Creates signed data from a value of `SignedData`.
    ///
    /// This only converts the value. The signed attributes are checked by
    /// [`check_signed_attributes`][Self::check_signed_attributes].
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        Ok(SignedData {
            version: convert::integer(convert::required(&value, "version")?)?,
            digest_algorithms: convert::list_of(
                convert::required(&value, "digestAlgorithms")?,
                AlgorithmIdentifier::from_value
            )?,
            encap_content_info: EncapsulatedContentInfo::from_value(
                convert::required(&value, "encapContentInfo")?
            )?,
            certificates: convert::optional(&value, "certificates", |v| {
                convert::list_of(v, convert::captured)
            })?,
            crls: convert::optional(&value, "crls", |v| {
                convert::list_of(v, convert::captured)
            })?,
            signer_infos: convert::list_of(
                convert::required(&value, "signerInfos")?,
                |v| SignerInfo::from_value(v.clone())
            )?,
            value
        })
    }

    pub fn version(&self) -> &Integer {
        &self.version
    }

    pub fn digest_algorithms(&self) -> &[AlgorithmIdentifier] {
        &self.digest_algorithms
    }

    pub fn encap_content_info(&self) -> &EncapsulatedContentInfo {
        &self.encap_content_info
    }

    /// Returns the captured certificates if present.
    pub fn certificates(&self) -> Option<&[Captured]> {
        self.certificates.as_deref()
    }

    /// Returns the captured revocation information if present.
    pub fn crls(&self) -> Option<&[Captured]> {
        self.crls.as_deref()
    }

    pub fn signer_infos(&self) -> &[SignerInfo] {
        &self.signer_infos
    }

    /// Returns the decoded value the signed data was created from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the DER encoding of the signed data.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        schema::encode(&SIGNED_DATA, &self.value)
    }

    /// Checks the signed attributes of all signers.
    ///
    /// If a signer has signed attributes, they must contain the message
    /// digest attribute. They must contain the content type attribute
    /// unless the encapsulated content is of type id-data. If the content
    /// type attribute is present, it must be equal to the type of the
    /// encapsulated content. Violations result in a
    /// [`MissingAttribute`][ErrorKind::MissingAttribute] error.
    pub fn check_signed_attributes(&self) -> Result<(), DecodeError> {
        let content_type = &self.encap_content_info.content_type;
        for signer in &self.signer_infos {
            signer.check_signed_attributes(content_type)?
        }
        Ok(())
    }
}


//------------ parse_signed_data ---------------------------------------------

/// Returns the signed data of a content info.
///
/// Fails with [`UnexpectedContentType`][ErrorKind::UnexpectedContentType]
/// if the content info is of a different type. If the content has already
/// been resolved as signed data, it is used as is. Otherwise the captured
/// content is decoded using the standard registry.
///
/// The signed attributes of all signers are checked as described for
/// [`SignedData::check_signed_attributes`].
pub fn parse_signed_data(
    content_info: &ContentInfo
) -> Result<SignedData, DecodeError> {
    parse_signed_data_with(
        content_info, Registry::standard(), &DecodeOptions::default()
    )
}

/// Returns the signed data of a content info using the given registry.
///
/// The registry and options are only used if the content has not been
/// resolved yet.
pub fn parse_signed_data_with(
    content_info: &ContentInfo,
    registry: &Registry,
    options: &DecodeOptions,
) -> Result<SignedData, DecodeError> {
    if content_info.content_type() != &oid::SIGNED_DATA {
        return Err(DecodeError::new(
            ErrorKind::UnexpectedContentType,
            format!(
                "expected signed data, found {}", content_info.content_type()
            ),
            content_info.value().pos("contentType").unwrap_or_default()
        ))
    }
    let value = match content_info.content().resolution() {
        Some(res) if std::ptr::eq(res.schema, &SIGNED_DATA) => {
            res.value.as_ref().clone()
        }
        _ => {
            let raw = content_info.content().raw().as_bytes().clone();
            let pos = content_info.value().pos("content").map(|pos| {
                pos + Pos::from(header_len(Tag::CTX_0, raw.len()))
            }).unwrap_or_default();
            schema::decode_at(&SIGNED_DATA, raw, pos, registry, options)?
        }
    };
    let res = SignedData::from_value(value)?;
    res.check_signed_attributes()?;
    Ok(res)
}


//------------ EncapsulatedContentInfo ---------------------------------------

/// The signed content and its type.
#[derive(Clone, Debug)]
pub struct EncapsulatedContentInfo {
    content_type: Oid,
    content: Option<Bytes>,

    /// Where the content type and the content octets start if decoded.
    content_type_pos: Option<Pos>,
    content_pos: Option<Pos>,
}

impl EncapsulatedContentInfo {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let content = convert::optional(value, "eContent", convert::octets)?;
        let content_pos = match (value.pos("eContent"), content.as_ref()) {
            (Some(pos), Some(content)) => {
                // Skip the explicit tag and the octet string header.
                let len = content.len();
                Some(pos + Pos::from(
                    header_len(Tag::CTX_0, total_len(Tag::OCTET_STRING, len))
                    + header_len(Tag::OCTET_STRING, len)
                ))
            }
            _ => None
        };
        Ok(EncapsulatedContentInfo {
            content_type: convert::oid(
                convert::required(value, "eContentType")?
            )?,
            content,
            content_type_pos: value.pos("eContentType"),
            content_pos,
        })
    }

    /// Returns the type of the encapsulated content.
    pub fn content_type(&self) -> &Oid {
        &self.content_type
    }

    /// Returns the content octets if the content is present.
    ///
    /// The content is not decoded. Its type is given by
    /// [`content_type`][Self::content_type].
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    /// Returns where the content type was decoded from.
    pub fn content_type_pos(&self) -> Option<Pos> {
        self.content_type_pos
    }

    /// Returns where the content octets start in the decoded data.
    ///
    /// Decoding the content at this position keeps error positions
    /// relative to the data the signed data was decoded from.
    pub fn content_pos(&self) -> Option<Pos> {
        self.content_pos
    }
}


//------------ SignerInfo ----------------------------------------------------

/// The information about a single signer.
#[derive(Clone, Debug)]
pub struct SignerInfo {
    version: Integer,
    sid: SignerIdentifier,
    digest_algorithm: AlgorithmIdentifier,
    signed_attrs: Option<Vec<Attribute>>,
    signature_algorithm: AlgorithmIdentifier,
    signature: Bytes,
    unsigned_attrs: Option<Vec<Attribute>>,

    /// The complete decoded value.
    value: Value,
}

impl SignerInfo {
    /// Creates the signer info from a value of `SignerInfo`.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        Ok(SignerInfo {
            version: convert::integer(convert::required(&value, "version")?)?,
            sid: SignerIdentifier::from_value(
                convert::required(&value, "sid")?
            )?,
            digest_algorithm: AlgorithmIdentifier::from_value(
                convert::required(&value, "digestAlgorithm")?
            )?,
            signed_attrs: convert::optional(&value, "signedAttrs", |v| {
                convert::list_of(v, Attribute::from_value)
            })?,
            signature_algorithm: AlgorithmIdentifier::from_value(
                convert::required(&value, "signatureAlgorithm")?
            )?,
            signature: convert::octets(
                convert::required(&value, "signature")?
            )?,
            unsigned_attrs: convert::optional(&value, "unsignedAttrs", |v| {
                convert::list_of(v, Attribute::from_value)
            })?,
            value
        })
    }

    pub fn version(&self) -> &Integer {
        &self.version
    }

    pub fn sid(&self) -> &SignerIdentifier {
        &self.sid
    }

    pub fn digest_algorithm(&self) -> &AlgorithmIdentifier {
        &self.digest_algorithm
    }

    /// Returns the signed attributes if present.
    pub fn signed_attrs(&self) -> Option<&[Attribute]> {
        self.signed_attrs.as_deref()
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    /// Returns the signature value.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Returns the unsigned attributes if present.
    pub fn unsigned_attrs(&self) -> Option<&[Attribute]> {
        self.unsigned_attrs.as_deref()
    }

    /// Returns the decoded value the signer info was created from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Checks the signed attributes for the given content type.
    pub fn check_signed_attributes(
        &self, content_type: &Oid
    ) -> Result<(), DecodeError> {
        let attrs = match self.signed_attrs.as_deref() {
            Some(attrs) => attrs,
            None => return Ok(())
        };
        let pos = self.value.pos("signedAttrs").unwrap_or_default();
        if find_attribute(attrs, &oid::MESSAGE_DIGEST).is_none() {
            return Err(missing(
                "signed attributes lack the message digest", pos
            ))
        }
        match find_attribute(attrs, &oid::CONTENT_TYPE) {
            Some(attr) => {
                if attribute_oid(attr, pos)? != *content_type {
                    return Err(missing(
                        "content type attribute differs from content type",
                        pos
                    ))
                }
            }
            None => {
                if *content_type != oid::DATA {
                    return Err(missing(
                        "signed attributes lack the content type", pos
                    ))
                }
            }
        }
        Ok(())
    }
}

/// Creates the error for signed attributes starting at `pos`.
fn missing(msg: &'static str, pos: Pos) -> DecodeError {
    DecodeError::new(ErrorKind::MissingAttribute, msg, pos)
}

/// Returns the object identifier value of an attribute.
fn attribute_oid(attr: &Attribute, pos: Pos) -> Result<Oid, DecodeError> {
    let value = attr.first_value().ok_or_else(|| {
        missing("attribute without value", pos)
    })?;
    match value.resolved_value() {
        Some(value) => convert::oid(value),
        None => {
            let value = decode_primitive(
                PrimitiveType::Oid, value.raw().as_bytes().clone()
            )?;
            convert::oid(&value)
        }
    }
}


//------------ SignerIdentifier ----------------------------------------------

/// The identification of the signer’s certificate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignerIdentifier {
    IssuerAndSerialNumber(IssuerAndSerialNumber),
    SubjectKeyIdentifier(Bytes),
}

impl SignerIdentifier {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let choice = convert::choice(value)?;
        match choice.alternative {
            "issuerAndSerialNumber" => {
                IssuerAndSerialNumber::from_value(&choice.value).map(
                    SignerIdentifier::IssuerAndSerialNumber
                )
            }
            "subjectKeyIdentifier" => {
                convert::octets(&choice.value).map(
                    SignerIdentifier::SubjectKeyIdentifier
                )
            }
            _ => Err(convert::mismatch("SignerIdentifier"))
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::cms::parse_content_info;
    use crate::cms::schema::SIGNER_INFO;
    use crate::decode::DecodeOptions;

    // A signer info with a subject key identifier, sha256 and the given
    // signed attributes.
    fn signer_info(attrs: &[u8]) -> SignerInfo {
        SignerInfo::from_value(schema::decode(
            &SIGNER_INFO, signer_info_der(attrs).into(),
            Registry::standard(), &DecodeOptions::default()
        ).unwrap()).unwrap()
    }

    fn signer_info_der(attrs: &[u8]) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(b"\x02\x01\x03");
        content.extend_from_slice(b"\x80\x02\x01\x02");
        content.extend_from_slice(
            b"\x30\x0b\x06\x09\x60\x86\x48\x01\x65\x03\x04\x02\x01"
        );
        if !attrs.is_empty() {
            content.push(0xa0);
            content.push(attrs.len() as u8);
            content.extend_from_slice(attrs);
        }
        content.extend_from_slice(
            b"\x30\x0a\x06\x08\x2a\x86\x48\xce\x3d\x04\x03\x02"
        );
        content.extend_from_slice(b"\x04\x02\xab\xcd");
        let mut data = vec![0x30, content.len() as u8];
        data.extend_from_slice(&content);
        data
    }

    const CONTENT_TYPE_DATA: &[u8] =
        b"\x30\x18\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x09\x03\
          \x31\x0b\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x07\x01";
    const DIGEST: &[u8] =
        b"\x30\x11\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x09\x04\
          \x31\x04\x04\x02\xab\xcd";

    #[test]
    fn signer_identifier() {
        let signer = signer_info(b"");
        assert_eq!(
            signer.sid(),
            &SignerIdentifier::SubjectKeyIdentifier(
                Bytes::from_static(b"\x01\x02")
            )
        );
        assert_eq!(signer.signature().as_ref(), b"\xab\xcd");
        assert!(signer.signed_attrs().is_none());
        assert!(signer.check_signed_attributes(&oid::DATA.into()).is_ok());
    }

    #[test]
    fn signed_attribute_invariants() {
        let both = [DIGEST, CONTENT_TYPE_DATA].concat();
        let signer = signer_info(&both);
        assert_eq!(signer.signed_attrs().map(<[_]>::len), Some(2));
        assert!(signer.check_signed_attributes(&oid::DATA.into()).is_ok());
        assert_eq!(
            signer.check_signed_attributes(
                &crate::ess::oid::CT_RECEIPT.into()
            ).unwrap_err().kind(),
            ErrorKind::MissingAttribute
        );

        let signer = signer_info(DIGEST);
        assert!(signer.check_signed_attributes(&oid::DATA.into()).is_ok());
        assert_eq!(
            signer.check_signed_attributes(
                &crate::ess::oid::CT_RECEIPT.into()
            ).unwrap_err().kind(),
            ErrorKind::MissingAttribute
        );

        let signer = signer_info(CONTENT_TYPE_DATA);
        assert_eq!(
            signer.check_signed_attributes(&oid::DATA.into())
                .unwrap_err().kind(),
            ErrorKind::MissingAttribute
        );
    }

    #[test]
    fn missing_attribute_position() {
        static SIGNER_INFOS: schema::Schema = schema::Schema::set_of(
            "SignerInfos", &SIGNER_INFO
        );

        // The signer info starts at 2, its signed attributes at 24.
        let signer = signer_info_der(CONTENT_TYPE_DATA);
        let mut data = vec![0x31, signer.len() as u8];
        data.extend_from_slice(&signer);
        let signers = convert::list_of(
            &schema::decode(
                &SIGNER_INFOS, data.into(), Registry::standard(),
                &DecodeOptions::default()
            ).unwrap(),
            |value| SignerInfo::from_value(value.clone())
        ).unwrap();
        let err = signers[0].check_signed_attributes(
            &oid::DATA.into()
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingAttribute);
        assert_eq!(err.pos(), Pos::from(24));
    }

    #[test]
    fn unexpected_content_type() {
        let info = parse_content_info(Bytes::from_static(
            b"\x30\x11\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x07\x01\
              \xa0\x04\x04\x02\xab\xcd"
        )).unwrap();
        let err = parse_signed_data(&info).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedContentType);
        assert_eq!(err.pos(), Pos::from(2));
    }
}
