//! The schemas of the CMS types.
//!
//! The definitions follow the ASN.1 module of RFC 5652. Certificates and
//! revocation information are not looked into and are kept as captured
//! values.

use crate::ident::Tag;
use crate::schema::{Alternative, Domain, Field, Schema};
use crate::schema::universal::{
    ANY, GENERALIZED_TIME, INTEGER, OCTET_STRING, OID, UTC_TIME,
};


//------------ ContentInfo ---------------------------------------------------

pub static CONTENT_INFO: Schema = Schema::sequence("ContentInfo", &[
    Field::required("contentType", &OID),
    Field::required("content", &CONTENT),
]);

static CONTENT: Schema = Schema::explicit(Tag::CTX_0, &CONTENT_VALUE);
static CONTENT_VALUE: Schema = Schema::open(Domain::ContentType, "contentType");


//------------ SignedData ----------------------------------------------------

pub static SIGNED_DATA: Schema = Schema::sequence("SignedData", &[
    Field::required("version", &INTEGER),
    Field::required("digestAlgorithms", &DIGEST_ALGORITHMS),
    Field::required("encapContentInfo", &ENCAPSULATED_CONTENT_INFO),
    Field::optional("certificates", &CERTIFICATES),
    Field::optional("crls", &CRLS),
    Field::required("signerInfos", &SIGNER_INFOS),
]);

static DIGEST_ALGORITHMS: Schema = Schema::set_of(
    "DigestAlgorithmIdentifiers", &ALGORITHM_IDENTIFIER
);

static CERTIFICATES: Schema = Schema::implicit(Tag::CTX_0, &CERTIFICATE_SET);
static CERTIFICATE_SET: Schema = Schema::set_of("CertificateSet", &ANY);

static CRLS: Schema = Schema::implicit(Tag::CTX_1, &REVOCATION_INFO);
static REVOCATION_INFO: Schema = Schema::set_of(
    "RevocationInfoChoices", &ANY
);

static SIGNER_INFOS: Schema = Schema::set_of("SignerInfos", &SIGNER_INFO);


//------------ EncapsulatedContentInfo ---------------------------------------

pub static ENCAPSULATED_CONTENT_INFO: Schema = Schema::sequence(
    "EncapsulatedContentInfo", &[
        Field::required("eContentType", &OID),
        Field::optional("eContent", &E_CONTENT),
    ]
);

static E_CONTENT: Schema = Schema::explicit(Tag::CTX_0, &OCTET_STRING);


//------------ SignerInfo ----------------------------------------------------

pub static SIGNER_INFO: Schema = Schema::sequence("SignerInfo", &[
    Field::required("version", &INTEGER),
    Field::required("sid", &SIGNER_IDENTIFIER),
    Field::required("digestAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::optional("signedAttrs", &SIGNED_ATTRS),
    Field::required("signatureAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::required("signature", &OCTET_STRING),
    Field::optional("unsignedAttrs", &UNSIGNED_ATTRS),
]);

pub static SIGNER_IDENTIFIER: Schema = Schema::choice("SignerIdentifier", &[
    Alternative::new("issuerAndSerialNumber", &ISSUER_AND_SERIAL_NUMBER),
    Alternative::new("subjectKeyIdentifier", &SUBJECT_KEY_IDENTIFIER),
]);

static SUBJECT_KEY_IDENTIFIER: Schema = Schema::implicit(
    Tag::CTX_0, &OCTET_STRING
);

static SIGNED_ATTRS: Schema = Schema::implicit(Tag::CTX_0, &SIGNED_ATTRIBUTES);
static UNSIGNED_ATTRS: Schema = Schema::implicit(
    Tag::CTX_1, &UNSIGNED_ATTRIBUTES
);

/// The signed attributes with their universal SET OF tag.
///
/// This is the form the signed attributes are digested in.
pub static SIGNED_ATTRIBUTES: Schema = Schema::set_of_non_empty(
    "SignedAttributes", &ATTRIBUTE
);

pub static UNSIGNED_ATTRIBUTES: Schema = Schema::set_of_non_empty(
    "UnsignedAttributes", &ATTRIBUTE
);


//------------ Attribute -----------------------------------------------------

pub static ATTRIBUTE: Schema = Schema::sequence("Attribute", &[
    Field::required("attrType", &OID),
    Field::required("attrValues", &ATTRIBUTE_VALUES),
]);

static ATTRIBUTE_VALUES: Schema = Schema::set_of_non_empty(
    "AttributeValues", &ATTRIBUTE_VALUE
);

static ATTRIBUTE_VALUE: Schema = Schema::open(Domain::Attribute, "attrType");


//------------ Common Types --------------------------------------------------

pub static ALGORITHM_IDENTIFIER: Schema = Schema::sequence(
    "AlgorithmIdentifier", &[
        Field::required("algorithm", &OID),
        Field::optional("parameters", &ANY),
    ]
);

pub static ISSUER_AND_SERIAL_NUMBER: Schema = Schema::sequence(
    "IssuerAndSerialNumber", &[
        Field::required("issuer", &NAME),
        Field::required("serialNumber", &INTEGER),
    ]
);

/// An X.501 name.
///
/// Attribute values are kept as captured values.
pub static NAME: Schema = Schema::choice("Name", &[
    Alternative::new("rdnSequence", &RDN_SEQUENCE),
]);

static RDN_SEQUENCE: Schema = Schema::sequence_of(
    "RDNSequence", &RELATIVE_DISTINGUISHED_NAME
);

static RELATIVE_DISTINGUISHED_NAME: Schema = Schema::set_of_non_empty(
    "RelativeDistinguishedName", &ATTRIBUTE_TYPE_AND_VALUE
);

static ATTRIBUTE_TYPE_AND_VALUE: Schema = Schema::sequence(
    "AttributeTypeAndValue", &[
        Field::required("type", &OID),
        Field::required("value", &ANY),
    ]
);

/// The type of the signing time attribute.
pub static TIME: Schema = Schema::choice("Time", &[
    Alternative::new("utcTime", &UTC_TIME),
    Alternative::new("generalTime", &GENERALIZED_TIME),
]);
