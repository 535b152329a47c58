//! Signed receipts and the attributes requesting them.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::cms::{SignedData, SignerInfo};
use crate::convert;
use crate::decode::{DecodeError, DecodeOptions, ErrorKind, Pos};
use crate::encode::EncodeError;
use crate::int::Integer;
use crate::oid::Oid;
use crate::registry::Registry;
use crate::schema;
use crate::string::RestrictedString;
use crate::value::Value;
use super::general_name::GeneralName;
use super::oid;
use super::schema::{
    CONTENT_HINTS, MSG_SIG_DIGEST, RECEIPT, RECEIPT_REQUEST,
};
use super::signed_attribute_value;


//------------ Receipt -------------------------------------------------------

/// A signed receipt.
///
/// The receipt is the encapsulated content of signed data of content type
/// id-ct-receipt. It identifies the message it acknowledges by content
/// type, content identifier and signature value.
#[derive(Clone, Debug)]
pub struct Receipt {
    version: Integer,
    content_type: Oid,
    signed_content_identifier: Bytes,
    originator_signature_value: Bytes,

    /// The complete decoded value.
    value: Value,
}

impl Receipt {
    /// The only version of receipts defined.
    pub const VERSION: i64 = 1;

    /// Creates a receipt from a value of `Receipt`.
    ///
    /// Fails if the version is not [`VERSION`][Self::VERSION].
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let version = convert::integer(convert::required(&value, "version")?)?;
        if version.to_i64() != Some(Self::VERSION) {
            return Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                "unsupported receipt version",
                value.pos("version").unwrap_or_default()
            ))
        }
        Ok(Receipt {
            version,
            content_type: convert::oid(
                convert::required(&value, "contentType")?
            )?,
            signed_content_identifier: convert::octets(
                convert::required(&value, "signedContentIdentifier")?
            )?,
            originator_signature_value: convert::octets(
                convert::required(&value, "originatorSignatureValue")?
            )?,
            value,
        })
    }

    pub fn version(&self) -> &Integer {
        &self.version
    }

    /// Returns the content type of the acknowledged message.
    pub fn content_type(&self) -> &Oid {
        &self.content_type
    }

    pub fn signed_content_identifier(&self) -> &Bytes {
        &self.signed_content_identifier
    }

    /// Returns the signature value of the acknowledged message.
    pub fn originator_signature_value(&self) -> &Bytes {
        &self.originator_signature_value
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the DER encoding of the receipt.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        schema::encode(&RECEIPT, &self.value)
    }
}


//------------ parse_receipt -------------------------------------------------

/// Parses a DER encoded receipt.
pub fn parse_receipt(data: Bytes) -> Result<Receipt, DecodeError> {
    parse_receipt_at(data, Pos::default())
}

fn parse_receipt_at(data: Bytes, pos: Pos) -> Result<Receipt, DecodeError> {
    Receipt::from_value(schema::decode_at(
        &RECEIPT, data, pos, Registry::standard(), &DecodeOptions::default()
    )?)
}

/// Parses the receipt encapsulated in signed data.
///
/// Fails with [`UnexpectedContentType`][ErrorKind::UnexpectedContentType]
/// if the encapsulated content is not a receipt.
pub fn parse_receipt_content(
    signed_data: &SignedData
) -> Result<Receipt, DecodeError> {
    let encap = signed_data.encap_content_info();
    let type_pos = encap.content_type_pos().unwrap_or_default();
    if encap.content_type() != &oid::CT_RECEIPT {
        return Err(DecodeError::new(
            ErrorKind::UnexpectedContentType,
            format!("expected receipt, found {}", encap.content_type()),
            type_pos
        ))
    }
    match encap.content() {
        Some(content) => {
            parse_receipt_at(
                content.clone(), encap.content_pos().unwrap_or_default()
            )
        }
        None => {
            Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                "receipt content missing", type_pos
            ))
        }
    }
}


//------------ ReceiptRequest ------------------------------------------------

/// The receiptRequest attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptRequest {
    signed_content_identifier: Bytes,
    receipts_from: ReceiptsFrom,
    receipts_to: Vec<Vec<GeneralName>>,
}

impl ReceiptRequest {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(ReceiptRequest {
            signed_content_identifier: convert::octets(
                convert::required(value, "signedContentIdentifier")?
            )?,
            receipts_from: ReceiptsFrom::from_value(
                convert::required(value, "receiptsFrom")?
            )?,
            receipts_to: convert::list_of(
                convert::required(value, "receiptsTo")?,
                GeneralName::list_from_value
            )?,
        })
    }

    /// Returns the receipt request in the signed attributes of a signer.
    pub fn from_signer(
        signer: &SignerInfo
    ) -> Result<Option<Self>, DecodeError> {
        signed_attribute_value(
            signer, &oid::AA_RECEIPT_REQUEST, &RECEIPT_REQUEST
        )?.map(|value| Self::from_value(&value)).transpose()
    }

    pub fn signed_content_identifier(&self) -> &Bytes {
        &self.signed_content_identifier
    }

    pub fn receipts_from(&self) -> &ReceiptsFrom {
        &self.receipts_from
    }

    /// Returns where receipts should be sent to.
    pub fn receipts_to(&self) -> &[Vec<GeneralName>] {
        &self.receipts_to
    }
}


//------------ ReceiptsFrom --------------------------------------------------

/// Who should return receipts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReceiptsFrom {
    AllOrFirstTier(AllOrFirstTier),
    ReceiptList(Vec<Vec<GeneralName>>),
}

impl ReceiptsFrom {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let choice = convert::choice(value)?;
        match choice.alternative {
            "allOrFirstTier" => {
                let tier = convert::integer(&choice.value)?;
                match tier.to_i64() {
                    Some(0) => {
                        Ok(ReceiptsFrom::AllOrFirstTier(
                            AllOrFirstTier::AllReceipts
                        ))
                    }
                    Some(1) => {
                        Ok(ReceiptsFrom::AllOrFirstTier(
                            AllOrFirstTier::FirstTierRecipients
                        ))
                    }
                    _ => Err(convert::mismatch("AllOrFirstTier"))
                }
            }
            "receiptList" => {
                convert::list_of(
                    &choice.value, GeneralName::list_from_value
                ).map(ReceiptsFrom::ReceiptList)
            }
            _ => Err(convert::mismatch("ReceiptsFrom"))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AllOrFirstTier {
    AllReceipts,
    FirstTierRecipients,
}


//------------ ContentHints --------------------------------------------------

/// The contentHint attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentHints {
    content_description: Option<RestrictedString>,
    content_type: Oid,
}

impl ContentHints {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(ContentHints {
            content_description: convert::optional(
                value, "contentDescription", convert::string
            )?,
            content_type: convert::oid(
                convert::required(value, "contentType")?
            )?,
        })
    }

    /// Returns the content hints in the signed attributes of a signer.
    pub fn from_signer(
        signer: &SignerInfo
    ) -> Result<Option<Self>, DecodeError> {
        signed_attribute_value(
            signer, &oid::AA_CONTENT_HINT, &CONTENT_HINTS
        )?.map(|value| Self::from_value(&value)).transpose()
    }

    pub fn content_description(&self) -> Option<&str> {
        self.content_description.as_ref().map(RestrictedString::as_str)
    }

    /// Returns the type of the innermost content.
    pub fn content_type(&self) -> &Oid {
        &self.content_type
    }
}


//------------ msg_sig_digest ------------------------------------------------

/// Returns the value of the msgSigDigest attribute of a signer.
///
/// The attribute is present in the signer infos of signed receipts. It
/// holds the digest of the signed attributes of the original message.
pub fn msg_sig_digest(
    signer: &SignerInfo
) -> Result<Option<Bytes>, DecodeError> {
    signed_attribute_value(
        signer, &oid::AA_MSG_SIG_DIGEST, &MSG_SIG_DIGEST
    )?.map(|value| convert::octets(&value)).transpose()
}


//============ Tests =========================================================
