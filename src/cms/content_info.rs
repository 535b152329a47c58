//! The outermost CMS structure.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::convert;
use crate::decode::{DecodeError, DecodeOptions};
use crate::encode::EncodeError;
use crate::oid::Oid;
use crate::registry::Registry;
use crate::schema;
use crate::value::{OpenValue, Value};
use super::schema::CONTENT_INFO;


//------------ ContentInfo ---------------------------------------------------

/// A content info.
///
/// This is the top-level structure of every CMS message. It consists of the
/// content type and the content which is an open type discriminated by the
/// content type.
#[derive(Clone, Debug)]
pub struct ContentInfo {
    content_type: Oid,
    content: OpenValue,

    /// The complete decoded value.
    value: Value,
}

impl ContentInfo {
    /// Creates a content info from a value of `ContentInfo`.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        Ok(ContentInfo {
            content_type: convert::oid(
                convert::required(&value, "contentType")?
            )?,
            content: convert::open(convert::required(&value, "content")?)?,
            value,
        })
    }

    /// Returns the content type.
    pub fn content_type(&self) -> &Oid {
        &self.content_type
    }

    /// Returns the content.
    pub fn content(&self) -> &OpenValue {
        &self.content
    }

    /// Returns the decoded value the content info was created from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the DER encoding of the content info.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        schema::encode(&CONTENT_INFO, &self.value)
    }
}


//------------ parse_content_info --------------------------------------------

/// Parses a DER encoded content info.
///
/// The content and everything nested in it is resolved using the
/// [standard registry][Registry::standard] and default options.
pub fn parse_content_info(data: Bytes) -> Result<ContentInfo, DecodeError> {
    parse_content_info_with(
        data, Registry::standard(), &DecodeOptions::default()
    )
}

/// Parses a DER encoded content info with the given registry and options.
pub fn parse_content_info_with(
    data: Bytes, registry: &Registry, options: &DecodeOptions
) -> Result<ContentInfo, DecodeError> {
    ContentInfo::from_value(
        schema::decode(&CONTENT_INFO, data, registry, options)?
    )
}


//============ Tests =========================================================
