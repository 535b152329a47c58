//! DER encoded integers.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::{Target, write_tlv};
use crate::ident::Tag;


//------------ Integer -------------------------------------------------------

/// A DER encoded integer.
///
/// As integers are variable length, this type is just a simple wrapper
/// atop the underlying `Bytes` value containing the raw content. Serial
/// numbers in certificates, for instance, easily exceed the range of any
/// native type, so the value is converted into one only on request.
///
/// # DER Encoding
///
/// An INTEGER is encoded as a primitive value with the content octets
/// providing a variable-length, big-endian, two‘s complement byte sequence
/// of that integer. Thus, the most-significant bit of the first octet
/// serves as the sign bit. The encoding must be minimal: the first nine
/// bits may not all be zero or all be one.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Creates an integer from the content octets of an encoded value.
    pub fn from_content(content: Bytes, pos: Pos) -> Result<Self, DecodeError> {
        Self::check_head(&content, pos)?;
        Ok(Integer(content))
    }

    /// Creates an integer from a native signed integer.
    pub fn from_i64(value: i64) -> Self {
        let octets = value.to_be_bytes();
        let mut start = 0;
        while start < 7 {
            let redundant = match octets[start] {
                0x00 => octets[start + 1] & 0x80 == 0,
                0xFF => octets[start + 1] & 0x80 != 0,
                _ => false
            };
            if !redundant {
                break
            }
            start += 1;
        }
        Integer(Bytes::copy_from_slice(&octets[start..]))
    }

    /// Creates an integer from a native unsigned integer.
    pub fn from_u64(value: u64) -> Self {
        let octets = value.to_be_bytes();
        let skip = octets.iter().take_while(|&&x| x == 0).count();
        let mut res = Vec::with_capacity(9);
        match octets.get(skip) {
            None => res.push(0),
            Some(first) if first & 0x80 != 0 => res.push(0),
            _ => { }
        }
        res.extend_from_slice(&octets[skip..]);
        Integer(res.into())
    }

    /// Returns the content octets of the integer.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns whether the integer is negative.
    pub fn is_negative(&self) -> bool {
        self.0.first().map(|x| x & 0x80 != 0).unwrap_or(false)
    }

    /// Converts the integer into an `i64` if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        if self.0.len() > 8 {
            return None
        }
        let init: i64 = if self.is_negative() { -1 } else { 0 };
        Some(self.0.iter().fold(init, |res, &octet| {
            (res << 8) | i64::from(octet)
        }))
    }

    /// Converts the integer into a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None
        }
        let slice = match self.0.split_first() {
            Some((0, tail)) => tail,
            _ => self.0.as_ref(),
        };
        if slice.len() > 8 {
            return None
        }
        Some(slice.iter().fold(0, |res, &octet| (res << 8) | u64::from(octet)))
    }

    /// Returns the length of the complete encoding.
    pub fn encoded_len(&self) -> usize {
        crate::encode::total_len(Tag::INTEGER, self.0.len())
    }

    /// Writes the complete encoding to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_tlv(target, Tag::INTEGER, false, self.0.as_ref())
    }

    /// Checks that the content is a minimally encoded integer.
    fn check_head(content: &[u8], pos: Pos) -> Result<(), DecodeError> {
        match (content.first(), content.get(1).map(|x| x & 0x80 != 0)) {
            (Some(0), Some(false)) | (Some(0xFF), Some(true)) => {
                Err(DecodeError::new(
                    ErrorKind::NonCanonicalEncoding,
                    "redundant leading octet in integer", pos
                ))
            }
            (None, _) => {
                Err(DecodeError::new(
                    ErrorKind::NonCanonicalEncoding, "empty integer", pos
                ))
            }
            _ => Ok(())
        }
    }
}


//--- From

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}


//--- Debug and Display

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_i64() {
            Some(value) => write!(f, "{}", value),
            None => {
                f.write_str("0x")?;
                for octet in self.0.iter() {
                    write!(f, "{:02x}", octet)?;
                }
                Ok(())
            }
        }
    }
}


//============ Tests =========================================================
