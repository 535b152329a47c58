//! Captured encoded data.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::{DecodeError, Pos, Source, Tlv};
use crate::encode::Target;
use crate::ident::Tag;


//------------ Captured ------------------------------------------------------

/// The complete encoding of a single value kept as is.
///
/// Captured values are used for everything that is not interpreted further:
/// ANY fields, open types that have not been resolved, and values such as
/// certificates that are carried along but not looked into. The data is a
/// view into the input buffer and is written back unchanged when encoding.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Captured(Bytes);

impl Captured {
    /// Captures the encoding of a value taken from a source.
    pub fn from_tlv(tlv: Tlv) -> Self {
        Captured(tlv.into_raw())
    }

    /// Creates a captured value from data containing exactly one value.
    pub fn from_bytes(data: Bytes) -> Result<Self, DecodeError> {
        let mut source = Source::new(data);
        let tlv = source.take_tlv()?;
        source.check_exhausted()?;
        Ok(Self::from_tlv(tlv))
    }

    /// Returns the tag of the captured value.
    pub fn tag(&self) -> Option<Tag> {
        Source::new(self.0.clone()).peek_tag().ok().flatten()
    }

    /// Returns a source for the captured value.
    ///
    /// The positions reported by the source start at `pos`.
    pub fn source(&self, pos: Pos) -> Source {
        Source::with_pos(self.0.clone(), pos)
    }

    /// Returns a slice of the encoded data.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the encoded data.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Converts the value into the underlying bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Writes the captured data to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(self.0.as_ref())
    }
}


//--- AsRef

impl AsRef<[u8]> for Captured {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//--- Debug

impl fmt::Debug for Captured {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Captured(")?;
        for octet in self.0.iter().take(16) {
            write!(f, "{:02x}", octet)?;
        }
        if self.0.len() > 16 {
            write!(f, "..; {} octets", self.0.len())?;
        }
        write!(f, ")")
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::ErrorKind;

    #[test]
    fn from_bytes() {
        let captured = Captured::from_bytes(
            Bytes::from_static(b"\x30\x03\x02\x01\x05")
        ).unwrap();
        assert_eq!(captured.tag(), Some(Tag::SEQUENCE));
        assert_eq!(captured.as_slice(), b"\x30\x03\x02\x01\x05");
        assert_eq!(
            Captured::from_bytes(
                Bytes::from_static(b"\x05\x00\x05\x00")
            ).unwrap_err().kind(),
            ErrorKind::TrailingData
        );
        assert_eq!(
            Captured::from_bytes(
                Bytes::from_static(b"\x05\x80")
            ).unwrap_err().kind(),
            ErrorKind::MalformedLength
        );
    }
}
