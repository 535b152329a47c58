//! The schemas of the ESS types.
//!
//! The definitions follow the ASN.1 modules of RFC 2634 and RFC 5035,
//! which use implicit tagging, and the parts of RFC 5280 they refer to.

use crate::cms::oid::SHA256;
use crate::cms::schema::{
    ALGORITHM_IDENTIFIER, ISSUER_AND_SERIAL_NUMBER, NAME
};
use crate::ident::Tag;
use crate::primitive::PrimitiveType;
use crate::schema::{Alternative, Domain, Field, Schema};
use crate::schema::universal::{
    ANY, BMP_STRING, GENERALIZED_TIME, IA5_STRING, INTEGER, NULL, OCTET_STRING, OID,
    PRINTABLE_STRING, UTF8_STRING, VISIBLE_STRING,
};
use crate::value::{Components, Value};


//------------ Signed Receipts -----------------------------------------------

pub static RECEIPT: Schema = Schema::sequence("Receipt", &[
    Field::required("version", &INTEGER),
    Field::required("contentType", &OID),
    Field::required("signedContentIdentifier", &OCTET_STRING),
    Field::required("originatorSignatureValue", &OCTET_STRING),
]);

pub static RECEIPT_REQUEST: Schema = Schema::sequence("ReceiptRequest", &[
    Field::required("signedContentIdentifier", &OCTET_STRING),
    Field::required("receiptsFrom", &RECEIPTS_FROM),
    Field::required("receiptsTo", &RECEIPTS_TO),
]);

pub static RECEIPTS_FROM: Schema = Schema::choice("ReceiptsFrom", &[
    Alternative::new("allOrFirstTier", &ALL_OR_FIRST_TIER),
    Alternative::new("receiptList", &RECEIPT_LIST),
]);

static ALL_OR_FIRST_TIER: Schema = Schema::implicit(Tag::CTX_0, &INTEGER);
static RECEIPT_LIST: Schema = Schema::implicit(
    Tag::CTX_1, &GENERAL_NAMES_LIST
);
static GENERAL_NAMES_LIST: Schema = Schema::sequence_of(
    "ReceiptList", &GENERAL_NAMES
);
static RECEIPTS_TO: Schema = Schema::sequence_of_non_empty(
    "ReceiptsTo", &GENERAL_NAMES
);

/// The msgSigDigest attribute.
pub static MSG_SIG_DIGEST: Schema = Schema::primitive(
    PrimitiveType::OctetString
);

pub static CONTENT_HINTS: Schema = Schema::sequence("ContentHints", &[
    Field::optional("contentDescription", &UTF8_STRING),
    Field::required("contentType", &OID),
]);

/// The contentIdentifier attribute.
pub static CONTENT_IDENTIFIER: Schema = Schema::primitive(
    PrimitiveType::OctetString
);

pub static CONTENT_REFERENCE: Schema = Schema::sequence(
    "ContentReference", &[
        Field::required("contentType", &OID),
        Field::required("signedContentIdentifier", &OCTET_STRING),
        Field::required("originatorSignatureValue", &OCTET_STRING),
    ]
);


//------------ Security Labels -----------------------------------------------

pub static ESS_SECURITY_LABEL: Schema = Schema::set("ESSSecurityLabel", &[
    Field::required("security-policy-identifier", &OID),
    Field::optional("security-classification", &INTEGER),
    Field::optional("privacy-mark", &ESS_PRIVACY_MARK),
    Field::optional("security-categories", &SECURITY_CATEGORIES),
]);

pub static ESS_PRIVACY_MARK: Schema = Schema::choice("ESSPrivacyMark", &[
    Alternative::new("pString", &PRINTABLE_STRING),
    Alternative::new("utf8String", &UTF8_STRING),
]);

static SECURITY_CATEGORIES: Schema = Schema::set_of_non_empty(
    "SecurityCategories", &SECURITY_CATEGORY
);

pub static SECURITY_CATEGORY: Schema = Schema::sequence(
    "SecurityCategory", &[
        Field::required("type", &SECURITY_CATEGORY_TYPE),
        Field::required("value", &SECURITY_CATEGORY_VALUE),
    ]
);

static SECURITY_CATEGORY_TYPE: Schema = Schema::implicit(Tag::CTX_0, &OID);
static SECURITY_CATEGORY_VALUE: Schema = Schema::explicit(
    Tag::CTX_1, &SECURITY_CATEGORY_OPEN
);
static SECURITY_CATEGORY_OPEN: Schema = Schema::open(
    Domain::SecurityCategory, "type"
);

pub static EQUIVALENT_LABELS: Schema = Schema::sequence_of(
    "EquivalentLabels", &ESS_SECURITY_LABEL
);


//------------ Mail List Expansion -------------------------------------------

pub static ML_EXPANSION_HISTORY: Schema = Schema::sequence_of_non_empty(
    "MLExpansionHistory", &ML_DATA
);

static ML_DATA: Schema = Schema::sequence("MLData", &[
    Field::required("mailListIdentifier", &ENTITY_IDENTIFIER),
    Field::required("expansionTime", &GENERALIZED_TIME),
    Field::optional("mlReceiptPolicy", &ML_RECEIPT_POLICY),
]);

static ENTITY_IDENTIFIER: Schema = Schema::choice("EntityIdentifier", &[
    Alternative::new("issuerAndSerialNumber", &ISSUER_AND_SERIAL_NUMBER),
    Alternative::new("subjectKeyIdentifier", &OCTET_STRING),
]);

static ML_RECEIPT_POLICY: Schema = Schema::choice("MLReceiptPolicy", &[
    Alternative::new("none", &ML_NONE),
    Alternative::new("insteadOf", &ML_INSTEAD_OF),
    Alternative::new("inAdditionTo", &ML_IN_ADDITION_TO),
]);

static ML_NONE: Schema = Schema::implicit(Tag::CTX_0, &NULL);
static ML_INSTEAD_OF: Schema = Schema::implicit(Tag::CTX_1, &ML_NAMES);
static ML_IN_ADDITION_TO: Schema = Schema::implicit(Tag::CTX_2, &ML_NAMES);
static ML_NAMES: Schema = Schema::sequence_of_non_empty(
    "GeneralNamesList", &GENERAL_NAMES
);


//------------ Signing Certificates ------------------------------------------

pub static SIGNING_CERTIFICATE: Schema = Schema::sequence(
    "SigningCertificate", &[
        Field::required("certs", &ESS_CERT_IDS),
        Field::optional("policies", &POLICIES),
    ]
);

static ESS_CERT_IDS: Schema = Schema::sequence_of(
    "ESSCertIDs", &ESS_CERT_ID
);

pub static ESS_CERT_ID: Schema = Schema::sequence("ESSCertID", &[
    Field::required("certHash", &OCTET_STRING),
    Field::optional("issuerSerial", &ISSUER_SERIAL),
]);

pub static SIGNING_CERTIFICATE_V2: Schema = Schema::sequence(
    "SigningCertificateV2", &[
        Field::required("certs", &ESS_CERT_IDS_V2),
        Field::optional("policies", &POLICIES),
    ]
);

static ESS_CERT_IDS_V2: Schema = Schema::sequence_of(
    "ESSCertIDv2s", &ESS_CERT_ID_V2
);

pub static ESS_CERT_ID_V2: Schema = Schema::sequence("ESSCertIDv2", &[
    Field::with_default(
        "hashAlgorithm", &ALGORITHM_IDENTIFIER, default_hash_algorithm
    ),
    Field::required("certHash", &OCTET_STRING),
    Field::optional("issuerSerial", &ISSUER_SERIAL),
]);

/// Returns the default hash algorithm of an ESSCertIDv2, SHA-256.
pub fn default_hash_algorithm() -> Value {
    Value::Constructed(
        Components::new().with("algorithm", Value::Oid(SHA256.to_bytes()))
    )
}

pub static ISSUER_SERIAL: Schema = Schema::sequence("IssuerSerial", &[
    Field::required("issuer", &GENERAL_NAMES),
    Field::required("serialNumber", &INTEGER),
]);


//------------ Certificate Policies ------------------------------------------

static POLICIES: Schema = Schema::sequence_of(
    "PolicyInformations", &POLICY_INFORMATION
);

pub static POLICY_INFORMATION: Schema = Schema::sequence(
    "PolicyInformation", &[
        Field::required("policyIdentifier", &OID),
        Field::optional("policyQualifiers", &POLICY_QUALIFIERS),
    ]
);

static POLICY_QUALIFIERS: Schema = Schema::sequence_of_non_empty(
    "PolicyQualifiers", &POLICY_QUALIFIER_INFO
);

static POLICY_QUALIFIER_INFO: Schema = Schema::sequence(
    "PolicyQualifierInfo", &[
        Field::required("policyQualifierId", &OID),
        Field::required("qualifier", &QUALIFIER),
    ]
);

static QUALIFIER: Schema = Schema::open(
    Domain::PolicyQualifier, "policyQualifierId"
);

pub static USER_NOTICE: Schema = Schema::sequence("UserNotice", &[
    Field::optional("noticeRef", &NOTICE_REFERENCE),
    Field::optional("explicitText", &DISPLAY_TEXT),
]);

static NOTICE_REFERENCE: Schema = Schema::sequence("NoticeReference", &[
    Field::required("organization", &DISPLAY_TEXT),
    Field::required("noticeNumbers", &NOTICE_NUMBERS),
]);

static NOTICE_NUMBERS: Schema = Schema::sequence_of(
    "NoticeNumbers", &INTEGER
);

static DISPLAY_TEXT: Schema = Schema::choice("DisplayText", &[
    Alternative::new("ia5String", &IA5_STRING),
    Alternative::new("visibleString", &VISIBLE_STRING),
    Alternative::new("bmpString", &BMP_STRING),
    Alternative::new("utf8String", &UTF8_STRING),
]);


//------------ General Names -------------------------------------------------

pub static GENERAL_NAMES: Schema = Schema::sequence_of_non_empty(
    "GeneralNames", &GENERAL_NAME
);

pub static GENERAL_NAME: Schema = Schema::choice("GeneralName", &[
    Alternative::new("otherName", &OTHER_NAME),
    Alternative::new("rfc822Name", &RFC822_NAME),
    Alternative::new("dNSName", &DNS_NAME),
    Alternative::new("x400Address", &X400_ADDRESS),
    Alternative::new("directoryName", &DIRECTORY_NAME),
    Alternative::new("ediPartyName", &EDI_PARTY_NAME),
    Alternative::new("uniformResourceIdentifier", &URI),
    Alternative::new("iPAddress", &IP_ADDRESS),
    Alternative::new("registeredID", &REGISTERED_ID),
]);

static OTHER_NAME: Schema = Schema::implicit(Tag::CTX_0, &ANY);
static RFC822_NAME: Schema = Schema::implicit(Tag::CTX_1, &IA5_STRING);
static DNS_NAME: Schema = Schema::implicit(Tag::CTX_2, &IA5_STRING);
static X400_ADDRESS: Schema = Schema::implicit(Tag::CTX_3, &ANY);
static DIRECTORY_NAME: Schema = Schema::explicit(Tag::CTX_4, &NAME);
static EDI_PARTY_NAME: Schema = Schema::implicit(Tag::CTX_5, &ANY);
static URI: Schema = Schema::implicit(Tag::CTX_6, &IA5_STRING);
static IP_ADDRESS: Schema = Schema::implicit(Tag::CTX_7, &OCTET_STRING);
static REGISTERED_ID: Schema = Schema::implicit(Tag::CTX_8, &OID);


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use crate::decode::DecodeOptions;
    use crate::registry::Registry;
    use crate::schema::{decode, encode};

    #[test]
    fn bmp_notice_text() {
        const NOTICE: &[u8] = b"\x30\x06\x1e\x04\x00\x41\x00\x42";

        let value = decode(
            &USER_NOTICE, Bytes::from_static(NOTICE), Registry::standard(),
            &DecodeOptions::default()
        ).unwrap();
        let text = value.get("explicitText")
            .and_then(Value::as_choice).unwrap();
        assert_eq!(text.alternative, "bmpString");
        assert_eq!(
            text.value.as_string().map(|text| text.as_str()), Some("AB")
        );
        assert_eq!(encode(&USER_NOTICE, &value).unwrap(), NOTICE);
    }
}
