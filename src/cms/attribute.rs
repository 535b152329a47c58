//! Signed and unsigned attributes.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::convert;
use crate::decode::{DecodeError, DecodeOptions};
use crate::oid::Oid;
use crate::registry::{Registry, resolve};
use crate::schema::Domain;
use crate::value::{OpenValue, Value};


//------------ Attribute -----------------------------------------------------

/// An attribute of a signer.
///
/// The values of an attribute are open types discriminated by the attribute
/// type. They are resolved if the attribute type was known to the registry
/// used when decoding and kept opaque otherwise.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    attr_type: Oid,
    attr_values: Vec<OpenValue>,
}

impl Attribute {
    pub fn new(attr_type: Oid, attr_values: Vec<OpenValue>) -> Self {
        Attribute { attr_type, attr_values }
    }

    /// Creates an attribute from a value of `Attribute`.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(Attribute {
            attr_type: convert::oid(convert::required(value, "attrType")?)?,
            attr_values: convert::list_of(
                convert::required(value, "attrValues")?, convert::open
            )?,
        })
    }

    pub fn attr_type(&self) -> &Oid {
        &self.attr_type
    }

    pub fn values(&self) -> &[OpenValue] {
        &self.attr_values
    }

    /// Returns the first value of the attribute.
    ///
    /// Most attributes are defined to have exactly one value.
    pub fn first_value(&self) -> Option<&OpenValue> {
        self.attr_values.first()
    }
}


//------------ find_attribute and resolved_attribute_value -------------------

/// Returns the first attribute of the given type.
pub fn find_attribute<'a>(
    attrs: &'a [Attribute], attr_type: &impl AsRef<[u8]>
) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.attr_type.as_ref() == attr_type.as_ref())
}

/// Returns the resolved first value of the attribute of the given type.
///
/// The value is decoded from its captured encoding using the schema bound
/// to the attribute type in `registry`, independently of how it was
/// decoded originally.
///
/// Returns `Ok(None)` if there is no such attribute or its type is not
/// bound in the registry. Returns an
/// [`OpenTypeDecodeFailure`][crate::decode::ErrorKind::OpenTypeDecodeFailure]
/// error if the value doesn’t match the bound schema.
pub fn resolved_attribute_value(
    attrs: &[Attribute],
    attr_type: &impl AsRef<[u8]>,
    registry: &Registry,
) -> Result<Option<Value>, DecodeError> {
    let attr = match find_attribute(attrs, attr_type) {
        Some(attr) => attr,
        None => return Ok(None)
    };
    let value = match attr.first_value() {
        Some(value) => value,
        None => return Ok(None)
    };
    resolve(
        registry, Domain::Attribute, &attr.attr_type, value.raw(),
        &DecodeOptions::default()
    )
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use crate::captured::Captured;
    use crate::cms::oid;
    use crate::decode::ErrorKind;

    fn attr(
        attr_type: crate::oid::ConstOid, value: &'static [u8]
    ) -> Attribute {
        Attribute::new(
            attr_type.into(),
            vec![OpenValue::opaque(
                Captured::from_bytes(Bytes::from_static(value)).unwrap()
            )]
        )
    }

    #[test]
    fn find_and_resolve() {
        let attrs = [
            attr(
                oid::CONTENT_TYPE,
                b"\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x07\x01"
            ),
            attr(oid::MESSAGE_DIGEST, b"\x04\x02\xab\xcd"),
            attr(oid::SIGNING_TIME, b"\x04\x02\xab\xcd"),
        ];
        let registry = crate::cms::registry();

        assert!(find_attribute(&attrs, &oid::MESSAGE_DIGEST).is_some());
        assert!(find_attribute(&attrs, &oid::COUNTERSIGNATURE).is_none());

        assert_eq!(
            resolved_attribute_value(&attrs, &oid::CONTENT_TYPE, &registry)
                .unwrap(),
            Some(Value::Oid(oid::DATA.into()))
        );
        assert_eq!(
            resolved_attribute_value(&attrs, &oid::MESSAGE_DIGEST, &registry)
                .unwrap(),
            Some(Value::OctetString(Bytes::from_static(b"\xab\xcd")))
        );

        // Absent or unregistered attributes are not an error.
        assert_eq!(
            resolved_attribute_value(
                &attrs, &oid::COUNTERSIGNATURE, &registry
            ).unwrap(),
            None
        );
        assert_eq!(
            resolved_attribute_value(
                &attrs, &oid::MESSAGE_DIGEST, &Registry::new()
            ).unwrap(),
            None
        );

        // A signing time that is an OCTET STRING is malformed.
        assert_eq!(
            resolved_attribute_value(&attrs, &oid::SIGNING_TIME, &registry)
                .unwrap_err().kind(),
            ErrorKind::OpenTypeDecodeFailure
        );
    }
}
