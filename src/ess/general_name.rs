//! General names.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::captured::Captured;
use crate::cms::Name;
use crate::convert;
use crate::decode::DecodeError;
use crate::oid::Oid;
use crate::string::RestrictedString;
use crate::value::Value;


//------------ GeneralName ---------------------------------------------------

/// A general name as defined in RFC 5280.
///
/// The alternatives ESS doesn’t look into are kept as their complete
/// encoding including the context-specific tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeneralName {
    OtherName(Captured),
    Rfc822Name(RestrictedString),
    DnsName(RestrictedString),
    X400Address(Captured),
    DirectoryName(Name),
    EdiPartyName(Captured),
    Uri(RestrictedString),
    IpAddress(Bytes),
    RegisteredId(Oid),
}

impl GeneralName {
    /// Creates a general name from a value of `GeneralName`.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let choice = convert::choice(value)?;
        let value = choice.value.as_ref();
        match choice.alternative {
            "otherName" => {
                convert::captured(value).map(GeneralName::OtherName)
            }
            "rfc822Name" => {
                convert::string(value).map(GeneralName::Rfc822Name)
            }
            "dNSName" => convert::string(value).map(GeneralName::DnsName),
            "x400Address" => {
                convert::captured(value).map(GeneralName::X400Address)
            }
            "directoryName" => {
                Name::from_value(value).map(GeneralName::DirectoryName)
            }
            "ediPartyName" => {
                convert::captured(value).map(GeneralName::EdiPartyName)
            }
            "uniformResourceIdentifier" => {
                convert::string(value).map(GeneralName::Uri)
            }
            "iPAddress" => {
                convert::octets(value).map(GeneralName::IpAddress)
            }
            "registeredID" => {
                convert::oid(value).map(GeneralName::RegisteredId)
            }
            _ => Err(convert::mismatch("GeneralName"))
        }
    }

    /// Converts a value of `GeneralNames`.
    pub fn list_from_value(value: &Value) -> Result<Vec<Self>, DecodeError> {
        convert::list_of(value, Self::from_value)
    }

    /// Returns the email address if this is an RFC 822 name.
    pub fn as_rfc822_name(&self) -> Option<&str> {
        match *self {
            GeneralName::Rfc822Name(ref name) => Some(name.as_str()),
            _ => None
        }
    }

    /// Returns the name if this is a directory name.
    pub fn as_directory_name(&self) -> Option<&Name> {
        match *self {
            GeneralName::DirectoryName(ref name) => Some(name),
            _ => None
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::{DecodeOptions, ErrorKind};
    use crate::ess::schema::{GENERAL_NAME, GENERAL_NAMES};
    use crate::registry::Registry;
    use crate::schema::decode;

    fn general_names(data: &'static [u8]) -> Result<Value, DecodeError> {
        decode(
            &GENERAL_NAMES, Bytes::from_static(data), &Registry::new(),
            &DecodeOptions::default()
        )
    }

    #[test]
    fn alternatives() {
        let names = GeneralName::list_from_value(&general_names(
            b"\x30\x19\x81\x0dalice@example\
              \x87\x04\xc0\x00\x02\x01\
              \x88\x02\x2a\x03"
        ).unwrap()).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0].as_rfc822_name(), Some("alice@example"));
        assert_eq!(
            names[1],
            GeneralName::IpAddress(Bytes::from_static(b"\xc0\x00\x02\x01"))
        );
        assert_eq!(
            names[2],
            GeneralName::RegisteredId(Oid(Bytes::from_static(b"\x2a\x03")))
        );
    }

    #[test]
    fn directory_name() {
        // [4] { C=US }
        let value = decode(
            &GENERAL_NAME,
            Bytes::from_static(
                b"\xa4\x0f\x30\x0d\x31\x0b\x30\x09\x06\x03\x55\x04\x06\
                  \x13\x02US"
            ),
            &Registry::new(), &DecodeOptions::default()
        ).unwrap();
        let name = GeneralName::from_value(&value).unwrap();
        assert_eq!(
            name.as_directory_name().map(|name| name.rdns().len()),
            Some(1)
        );
    }

    #[test]
    fn empty_names() {
        assert_eq!(
            general_names(b"\x30\x00").unwrap_err().kind(),
            ErrorKind::SchemaMismatch
        );
    }
}
