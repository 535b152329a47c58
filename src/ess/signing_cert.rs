//! The signing certificate attributes.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::cms::{AlgorithmIdentifier, SignerInfo};
use crate::convert;
use crate::decode::{DecodeError, DecodeOptions, ErrorKind, Pos};
use crate::int::Integer;
use crate::oid::Oid;
use crate::registry::Registry;
use crate::schema;
use crate::value::{OpenValue, Value};
use super::general_name::GeneralName;
use super::oid;
use super::schema::{SIGNING_CERTIFICATE, SIGNING_CERTIFICATE_V2};
use super::signed_attribute_value;


//------------ SigningCertificate --------------------------------------------

/// The value of a signingCertificate or signingCertificateV2 attribute.
///
/// Which of the two it is depends on the attribute type it was bound to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SigningCertificate {
    V1(SigningCertificateV1),
    V2(SigningCertificateV2),
}

impl SigningCertificate {
    /// Returns the certificate hashes in order.
    ///
    /// The first hash identifies the signing certificate.
    pub fn cert_hashes(&self) -> impl Iterator<Item = &Bytes> + '_ {
        let (v1, v2) = match *self {
            SigningCertificate::V1(ref cert) => (cert.certs(), &[][..]),
            SigningCertificate::V2(ref cert) => (&[][..], cert.certs()),
        };
        v1.iter().map(EssCertId::cert_hash).chain(
            v2.iter().map(EssCertIdV2::cert_hash)
        )
    }

    /// Returns the policies if present.
    pub fn policies(&self) -> Option<&[PolicyInformation]> {
        match *self {
            SigningCertificate::V1(ref cert) => cert.policies(),
            SigningCertificate::V2(ref cert) => cert.policies(),
        }
    }

    /// Returns the signing certificate attribute of a signer.
    ///
    /// If both versions are present, version 2 is returned.
    pub fn from_signer(
        signer: &SignerInfo
    ) -> Result<Option<Self>, DecodeError> {
        if let Some(value) = signed_attribute_value(
            signer, &oid::AA_SIGNING_CERTIFICATE_V2, &SIGNING_CERTIFICATE_V2
        )? {
            return SigningCertificateV2::from_value(&value).map(|cert| {
                Some(SigningCertificate::V2(cert))
            })
        }
        signed_attribute_value(
            signer, &oid::AA_SIGNING_CERTIFICATE, &SIGNING_CERTIFICATE
        )?.map(|value| {
            SigningCertificateV1::from_value(&value)
                .map(SigningCertificate::V1)
        }).transpose()
    }
}


//------------ parse_signing_certificate -------------------------------------

/// Parses the encoded value of a signing certificate attribute.
///
/// The attribute type decides whether the value is parsed as a
/// SigningCertificate or a SigningCertificateV2. Any other attribute type
/// results in a [`SchemaMismatch`][ErrorKind::SchemaMismatch] error.
pub fn parse_signing_certificate(
    attr_type: &impl AsRef<[u8]>, data: Bytes
) -> Result<SigningCertificate, DecodeError> {
    let registry = Registry::standard();
    let options = DecodeOptions::default();
    if attr_type.as_ref() == oid::AA_SIGNING_CERTIFICATE_V2.as_ref() {
        SigningCertificateV2::from_value(&schema::decode(
            &SIGNING_CERTIFICATE_V2, data, registry, &options
        )?).map(SigningCertificate::V2)
    }
    else if attr_type.as_ref() == oid::AA_SIGNING_CERTIFICATE.as_ref() {
        SigningCertificateV1::from_value(&schema::decode(
            &SIGNING_CERTIFICATE, data, registry, &options
        )?).map(SigningCertificate::V1)
    }
    else {
        Err(DecodeError::new(
            ErrorKind::SchemaMismatch,
            "not a signing certificate attribute", Pos::default()
        ))
    }
}


//------------ SigningCertificateV1 ------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningCertificateV1 {
    certs: Vec<EssCertId>,
    policies: Option<Vec<PolicyInformation>>,
}

impl SigningCertificateV1 {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(SigningCertificateV1 {
            certs: convert::list_of(
                convert::required(value, "certs")?, EssCertId::from_value
            )?,
            policies: convert::optional(value, "policies", |v| {
                convert::list_of(v, PolicyInformation::from_value)
            })?,
        })
    }

    pub fn certs(&self) -> &[EssCertId] {
        &self.certs
    }

    pub fn policies(&self) -> Option<&[PolicyInformation]> {
        self.policies.as_deref()
    }
}


//------------ SigningCertificateV2 ------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningCertificateV2 {
    certs: Vec<EssCertIdV2>,
    policies: Option<Vec<PolicyInformation>>,
}

impl SigningCertificateV2 {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(SigningCertificateV2 {
            certs: convert::list_of(
                convert::required(value, "certs")?, EssCertIdV2::from_value
            )?,
            policies: convert::optional(value, "policies", |v| {
                convert::list_of(v, PolicyInformation::from_value)
            })?,
        })
    }

    pub fn certs(&self) -> &[EssCertIdV2] {
        &self.certs
    }

    pub fn policies(&self) -> Option<&[PolicyInformation]> {
        self.policies.as_deref()
    }
}


//------------ EssCertId -----------------------------------------------------

/// A certificate identified by its SHA-1 hash.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EssCertId {
    cert_hash: Bytes,
    issuer_serial: Option<IssuerSerial>,
}

impl EssCertId {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(EssCertId {
            cert_hash: convert::octets(convert::required(value, "certHash")?)?,
            issuer_serial: convert::optional(
                value, "issuerSerial", IssuerSerial::from_value
            )?,
        })
    }

    pub fn cert_hash(&self) -> &Bytes {
        &self.cert_hash
    }

    pub fn issuer_serial(&self) -> Option<&IssuerSerial> {
        self.issuer_serial.as_ref()
    }
}


//------------ EssCertIdV2 ---------------------------------------------------

/// A certificate identified by a hash with an explicit algorithm.
///
/// If the encoding omits the hash algorithm, it is SHA-256.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EssCertIdV2 {
    hash_algorithm: AlgorithmIdentifier,
    cert_hash: Bytes,
    issuer_serial: Option<IssuerSerial>,
}

impl EssCertIdV2 {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(EssCertIdV2 {
            hash_algorithm: AlgorithmIdentifier::from_value(
                convert::required(value, "hashAlgorithm")?
            )?,
            cert_hash: convert::octets(convert::required(value, "certHash")?)?,
            issuer_serial: convert::optional(
                value, "issuerSerial", IssuerSerial::from_value
            )?,
        })
    }

    pub fn hash_algorithm(&self) -> &AlgorithmIdentifier {
        &self.hash_algorithm
    }

    pub fn cert_hash(&self) -> &Bytes {
        &self.cert_hash
    }

    pub fn issuer_serial(&self) -> Option<&IssuerSerial> {
        self.issuer_serial.as_ref()
    }
}


//------------ IssuerSerial --------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuerSerial {
    issuer: Vec<GeneralName>,
    serial_number: Integer,
}

impl IssuerSerial {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(IssuerSerial {
            issuer: GeneralName::list_from_value(
                convert::required(value, "issuer")?
            )?,
            serial_number: convert::integer(
                convert::required(value, "serialNumber")?
            )?,
        })
    }

    pub fn issuer(&self) -> &[GeneralName] {
        &self.issuer
    }

    pub fn serial_number(&self) -> &Integer {
        &self.serial_number
    }
}


//------------ PolicyInformation ---------------------------------------------

/// A certificate policy with optional qualifiers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyInformation {
    policy_identifier: Oid,
    policy_qualifiers: Option<Vec<PolicyQualifierInfo>>,
}

impl PolicyInformation {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(PolicyInformation {
            policy_identifier: convert::oid(
                convert::required(value, "policyIdentifier")?
            )?,
            policy_qualifiers: convert::optional(
                value, "policyQualifiers", |v| {
                    convert::list_of(v, PolicyQualifierInfo::from_value)
                }
            )?,
        })
    }

    pub fn policy_identifier(&self) -> &Oid {
        &self.policy_identifier
    }

    pub fn policy_qualifiers(&self) -> Option<&[PolicyQualifierInfo]> {
        self.policy_qualifiers.as_deref()
    }
}


//------------ PolicyQualifierInfo -------------------------------------------

/// A policy qualifier.
///
/// The qualifier is an open type discriminated by the qualifier ID.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyQualifierInfo {
    policy_qualifier_id: Oid,
    qualifier: OpenValue,
}

impl PolicyQualifierInfo {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(PolicyQualifierInfo {
            policy_qualifier_id: convert::oid(
                convert::required(value, "policyQualifierId")?
            )?,
            qualifier: convert::open(convert::required(value, "qualifier")?)?,
        })
    }

    pub fn policy_qualifier_id(&self) -> &Oid {
        &self.policy_qualifier_id
    }

    pub fn qualifier(&self) -> &OpenValue {
        &self.qualifier
    }
}


//============ Tests =========================================================
