//! The Cryptographic Message Syntax.
//!
//! This module contains the schemas of the CMS types defined in
//! [RFC 5652](https://tools.ietf.org/html/rfc5652) that are needed for
//! signed data, typed structures created from decoded values, and the
//! registry with the content types and attributes defined by CMS itself.
//!
//! A message is parsed with [`parse_content_info`]. If it is signed data,
//! [`parse_signed_data`] provides access to the signers and their
//! attributes:
//!
//! ```no_run
//! use bytes::Bytes;
//! use cmsder::cms::{
//!     oid, find_attribute, parse_content_info, parse_signed_data
//! };
//!
//! # fn example(data: Bytes) -> Result<(), cmsder::decode::DecodeError> {
//! let info = parse_content_info(data)?;
//! let signed = parse_signed_data(&info)?;
//! for signer in signed.signer_infos() {
//!     let attrs = signer.signed_attrs().unwrap_or_default();
//!     if let Some(digest) = find_attribute(attrs, &oid::MESSAGE_DIGEST) {
//!         println!("{:?}", digest.first_value());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use self::attribute::{
    Attribute, find_attribute, resolved_attribute_value
};
pub use self::common::{
    AlgorithmIdentifier, AttributeTypeAndValue, IssuerAndSerialNumber, Name
};
pub use self::content_info::{
    ContentInfo, parse_content_info, parse_content_info_with
};
pub use self::signed_data::{
    EncapsulatedContentInfo, SignedData, SignerIdentifier, SignerInfo,
    parse_signed_data, parse_signed_data_with,
};

use crate::registry::Registry;
use crate::schema::Domain;
use crate::schema::universal::{OCTET_STRING, OID};

pub mod oid;
pub mod schema;

mod attribute;
mod common;
mod content_info;
mod signed_data;


//------------ registry ------------------------------------------------------

/// Returns a registry with the bindings defined by CMS.
///
/// The registry binds the content types id-data and id-signedData and the
/// attributes content type, message digest, signing time, and
/// countersignature.
pub fn registry() -> Registry {
    Registry::new()
        .with(Domain::ContentType, oid::DATA, &OCTET_STRING)
        .with(Domain::ContentType, oid::SIGNED_DATA, &schema::SIGNED_DATA)
        .with(Domain::Attribute, oid::CONTENT_TYPE, &OID)
        .with(Domain::Attribute, oid::MESSAGE_DIGEST, &OCTET_STRING)
        .with(Domain::Attribute, oid::SIGNING_TIME, &schema::TIME)
        .with(Domain::Attribute, oid::COUNTERSIGNATURE, &schema::SIGNER_INFO)
}
