//! DER encoded bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::{BufMut, Bytes, BytesMut};
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::{EncodeError, Target, write_header};
use crate::ident::Tag;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// Bit strings are a sequence of bits. Unlike octet strings, they do not
/// need to contain a multiple of eight bits.
///
/// There are two types of methods for accessing the data in a bit string.
/// Methods starting with `bit` operate on the individual bits while those
/// prefixed with `octet` access entire octets and ignore the fact that there
/// may be unused bits in the final octet.
///
/// # DER Encoding
///
/// A bit string is encoded as a primitive value. The first octet of the
/// content contains the number of unused bits in the last octet and the
/// following octets contain the bits with the first bit in the most
/// significant bit of the octet.
///
/// DER additionally requires the number of unused bits to be zero for an
/// empty bit string and the unused bits themselves to be zero.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitString {
    /// The number of unused bits in the last byte.
    unused: u8,

    /// The bytes of the bit string.
    bits: Bytes,
}

impl BitString {
    /// Creates a new bit string.
    ///
    /// Returns an error if `unused` is out of range for `bits` or if any of
    /// the unused bits are set.
    pub fn new(unused: u8, bits: Bytes) -> Result<Self, EncodeError> {
        Self::check(unused, &bits).map_err(|msg| {
            EncodeError::InvalidValue { msg }
        })?;
        Ok(Self { unused, bits })
    }

    /// Creates a bit string from the content octets of an encoded value.
    pub fn from_content(
        mut content: Bytes, pos: Pos
    ) -> Result<Self, DecodeError> {
        if content.is_empty() {
            return Err(DecodeError::new(
                ErrorKind::NonCanonicalEncoding, "empty bit string", pos
            ))
        }
        let unused = content[0];
        let bits = content.split_off(1);
        Self::check(unused, &bits).map_err(|msg| {
            DecodeError::new(ErrorKind::NonCanonicalEncoding, msg, pos)
        })?;
        Ok(Self { unused, bits })
    }

    fn check(unused: u8, bits: &[u8]) -> Result<(), &'static str> {
        if unused > 7 {
            return Err("too many unused bits in bit string")
        }
        match bits.last() {
            None if unused != 0 => {
                Err("unused bits in empty bit string")
            }
            Some(last) if last & ((1u8 << unused) - 1) != 0 => {
                Err("unused bits in bit string not zero")
            }
            _ => Ok(())
        }
    }

    /// Returns the value of the given bit.
    pub fn bit(&self, bit: usize) -> bool {
        if bit >= self.bit_len() {
            return false
        }
        let idx = bit >> 3;
        let bit = 7 - (bit as u8 & 7);
        self.bits[idx] & (1 << bit) != 0
    }

    /// Returns the number of bits in the bit string.
    pub fn bit_len(&self) -> usize {
        (self.bits.len() << 3) - (self.unused as usize)
    }

    /// Returns the number of unused bits in the last octet.
    pub fn unused(&self) -> u8 {
        self.unused
    }

    /// Returns the number of octets in the bit string.
    pub fn octet_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns a slice of the octets in the bit string.
    pub fn octet_slice(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Returns the content octets of the encoded bit string.
    pub fn to_content(&self) -> Bytes {
        let mut res = BytesMut::with_capacity(self.bits.len() + 1);
        res.put_u8(self.unused);
        res.extend_from_slice(&self.bits);
        res.freeze()
    }

    /// Writes the complete encoding to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, Tag::BIT_STRING, false, self.bits.len() + 1)?;
        target.write_all(&[self.unused])?;
        target.write_all(self.bits.as_ref())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn bits(data: &'static [u8]) -> Result<BitString, ErrorKind> {
        BitString::from_content(Bytes::from_static(data), Pos::default())
            .map_err(|err| err.kind())
    }

    #[test]
    fn decode() {
        let s = bits(b"\x06\x6e\x5d\xc0").unwrap();
        assert_eq!(s.unused(), 6);
        assert_eq!(s.bit_len(), 18);
        assert!(!s.bit(0));
        assert!(s.bit(1));
        assert!(s.bit(17));
        assert!(!s.bit(18));
        assert_eq!(s.to_content().as_ref(), b"\x06\x6e\x5d\xc0");

        let s = bits(b"\x00").unwrap();
        assert_eq!(s.bit_len(), 0);
    }

    #[test]
    fn reject_non_canonical() {
        assert_eq!(bits(b""), Err(ErrorKind::NonCanonicalEncoding));
        assert_eq!(bits(b"\x01"), Err(ErrorKind::NonCanonicalEncoding));
        assert_eq!(bits(b"\x08\x00"), Err(ErrorKind::NonCanonicalEncoding));
        assert_eq!(bits(b"\x06\x6e\x5d\xe0"),
            Err(ErrorKind::NonCanonicalEncoding)
        );
        assert!(BitString::new(1, Bytes::from_static(b"\x01")).is_err());
        assert!(BitString::new(1, Bytes::from_static(b"\x02")).is_ok());
    }

    #[test]
    fn encode() {
        let s = BitString::new(4, Bytes::from_static(b"\xa0")).unwrap();
        let mut target = Vec::new();
        crate::encode::infallible(s.write_encoded(&mut target));
        assert_eq!(target, b"\x03\x02\x04\xa0");
    }
}
