//! Types shared by the CMS structures.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::captured::Captured;
use crate::convert;
use crate::decode::DecodeError;
use crate::int::Integer;
use crate::oid::Oid;
use crate::value::Value;


//------------ AlgorithmIdentifier -------------------------------------------

/// An algorithm identifier with optional parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlgorithmIdentifier {
    algorithm: Oid,
    parameters: Option<Captured>,
}

impl AlgorithmIdentifier {
    pub fn new(algorithm: Oid, parameters: Option<Captured>) -> Self {
        AlgorithmIdentifier { algorithm, parameters }
    }

    /// Creates the identifier from a value of `AlgorithmIdentifier`.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(AlgorithmIdentifier {
            algorithm: convert::oid(convert::required(value, "algorithm")?)?,
            parameters: convert::optional(
                value, "parameters", convert::captured
            )?,
        })
    }

    pub fn algorithm(&self) -> &Oid {
        &self.algorithm
    }

    pub fn parameters(&self) -> Option<&Captured> {
        self.parameters.as_ref()
    }
}


//------------ IssuerAndSerialNumber -----------------------------------------

/// A certificate identified by its issuer and serial number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuerAndSerialNumber {
    issuer: Name,
    serial_number: Integer,
}

impl IssuerAndSerialNumber {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(IssuerAndSerialNumber {
            issuer: Name::from_value(convert::required(value, "issuer")?)?,
            serial_number: convert::integer(
                convert::required(value, "serialNumber")?
            )?,
        })
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    pub fn serial_number(&self) -> &Integer {
        &self.serial_number
    }
}


//------------ Name ----------------------------------------------------------

/// An X.501 distinguished name.
///
/// The name is a sequence of relative distinguished names, each of which
/// is a non-empty set of attribute type and value pairs. Values are kept
/// in their encoded form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Name {
    rdns: Vec<Vec<AttributeTypeAndValue>>,
}

impl Name {
    /// Creates the name from a value of `Name`.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let choice = convert::choice(value)?;
        if choice.alternative != "rdnSequence" {
            return Err(convert::mismatch("Name"))
        }
        let rdns = convert::list_of(&choice.value, |rdn| {
            convert::list_of(rdn, AttributeTypeAndValue::from_value)
        })?;
        Ok(Name { rdns })
    }

    /// Returns the relative distinguished names.
    pub fn rdns(&self) -> &[Vec<AttributeTypeAndValue>] {
        &self.rdns
    }

    /// Returns the value of the first attribute of the given type.
    pub fn attribute(
        &self, attr_type: &impl AsRef<[u8]>
    ) -> Option<&Captured> {
        self.rdns.iter().flatten().find(|item| {
            item.attr_type.as_ref() == attr_type.as_ref()
        }).map(|item| &item.value)
    }
}


//------------ AttributeTypeAndValue -----------------------------------------

/// A single attribute of a name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeTypeAndValue {
    pub attr_type: Oid,
    pub value: Captured,
}

impl AttributeTypeAndValue {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Ok(AttributeTypeAndValue {
            attr_type: convert::oid(convert::required(value, "type")?)?,
            value: convert::captured(convert::required(value, "value")?)?,
        })
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use crate::cms::schema::{ALGORITHM_IDENTIFIER, ISSUER_AND_SERIAL_NUMBER};
    use crate::decode::DecodeOptions;
    use crate::registry::Registry;
    use crate::schema::decode;

    fn parse(
        schema: &'static crate::schema::Schema, data: &'static [u8]
    ) -> Value {
        decode(
            schema, Bytes::from_static(data), &Registry::new(),
            &DecodeOptions::default()
        ).unwrap()
    }

    #[test]
    fn algorithm_identifier() {
        // sha384 without parameters
        let alg = AlgorithmIdentifier::from_value(&parse(
            &ALGORITHM_IDENTIFIER,
            b"\x30\x0b\x06\x09\x60\x86\x48\x01\x65\x03\x04\x02\x02"
        )).unwrap();
        assert_eq!(alg.algorithm().to_string(), "2.16.840.1.101.3.4.2.2");
        assert!(alg.parameters().is_none());

        let alg = AlgorithmIdentifier::from_value(&parse(
            &ALGORITHM_IDENTIFIER,
            b"\x30\x0d\x06\x09\x60\x86\x48\x01\x65\x03\x04\x02\x01\x05\x00"
        )).unwrap();
        assert_eq!(
            alg.parameters().map(Captured::as_slice),
            Some(b"\x05\x00".as_ref())
        );
    }

    #[test]
    fn issuer_and_serial() {
        // C=US, serial 5
        let sid = IssuerAndSerialNumber::from_value(&parse(
            &ISSUER_AND_SERIAL_NUMBER,
            b"\x30\x12\x30\x0d\x31\x0b\x30\x09\x06\x03\x55\x04\x06\x13\x02US\
              \x02\x01\x05"
        )).unwrap();
        assert_eq!(sid.serial_number().to_i64(), Some(5));
        assert_eq!(sid.issuer().rdns().len(), 1);
        assert_eq!(
            sid.issuer().attribute(&"2.5.4.6".parse::<Oid>().unwrap())
                .map(Captured::as_slice),
            Some(b"\x13\x02US".as_ref())
        );
    }
}
