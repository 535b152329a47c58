//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is re-exported
//! by the parent.

use std::fmt;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::Target;


//------------ Length -------------------------------------------------------

/// The length octets of a DER encoded value.
///
/// # Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the length. Thus, if the first octet is less than
/// 128, it provides the length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length as a big-endian integer.
///
/// DER only permits definite lengths encoded in the minimum number of
/// octets. The indefinite form, signalled by a first octet of 0x80, and
/// the reserved value 0xFF are rejected as malformed. So is a long form
/// that could have been shorter.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Length(usize);

impl Length {
    /// Creates a length value from a `usize`.
    pub const fn from_usize(len: usize) -> Self {
        Self(len)
    }

    /// Returns the length as a `usize`.
    pub const fn to_usize(self) -> usize {
        self.0
    }

    /// Parses the length octets at the start of `data`.
    ///
    /// Returns the length and the number of octets it occupied. The `pos`
    /// argument is the position of `data` in the overall input and is used
    /// for error reporting only.
    pub fn parse(data: &[u8], pos: Pos) -> Result<(Self, usize), DecodeError> {
        let first = *data.first().ok_or_else(|| {
            DecodeError::new(
                ErrorKind::TruncatedInput, "unexpected end of data", pos
            )
        })?;
        if first < 0x80 {
            return Ok((Length(first.into()), 1))
        }
        match first {
            0x80 => {
                return Err(DecodeError::new(
                    ErrorKind::MalformedLength,
                    "indefinite length not allowed", pos
                ))
            }
            0xFF => {
                return Err(DecodeError::new(
                    ErrorKind::MalformedLength,
                    "reserved length octet", pos
                ))
            }
            _ => { }
        }
        let count = usize::from(first & 0x7F);
        if count > std::mem::size_of::<usize>() {
            return Err(DecodeError::new(
                ErrorKind::ResourceLimitExceeded,
                "length too large", pos
            ))
        }
        let octets = data.get(1..count + 1).ok_or_else(|| {
            DecodeError::new(
                ErrorKind::TruncatedInput, "unexpected end of data", pos
            )
        })?;
        if octets[0] == 0 {
            return Err(DecodeError::new(
                ErrorKind::MalformedLength,
                "leading zero in length octets", pos
            ))
        }
        let len = octets.iter().fold(0usize, |len, &octet| {
            (len << 8) | usize::from(octet)
        });
        if len < 0x80 {
            return Err(DecodeError::new(
                ErrorKind::MalformedLength,
                "long form used for short length", pos
            ))
        }
        Ok((Length(len), count + 1))
    }

    /// Returns the number of octets the encoded form of the length will
    /// occupy.
    pub const fn encoded_len(self) -> usize {
        if self.0 < 0x80 {
            1
        }
        else {
            let mut len = self.0;
            let mut count = 1;
            while len > 0 {
                len >>= 8;
                count += 1;
            }
            count
        }
    }

    /// Writes the encoded length to a target.
    pub fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        if self.0 < 0x80 {
            return target.write_all(&[self.0 as u8])
        }
        let octets = self.0.to_be_bytes();
        let skip = octets.iter().take_while(|&&x| x == 0).count();
        let octets = &octets[skip..];
        target.write_all(&[0x80 | octets.len() as u8])?;
        target.write_all(octets)
    }
}

impl From<usize> for Length {
    fn from(len: usize) -> Self {
        Self(len)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn parse(data: &[u8]) -> Result<(usize, usize), ErrorKind> {
        Length::parse(data, Pos::default())
            .map(|(len, used)| (len.to_usize(), used))
            .map_err(|err| err.kind())
    }

    fn encode(len: usize) -> Vec<u8> {
        let mut res = Vec::new();
        crate::encode::infallible(
            Length::from_usize(len).write_encoded(&mut res)
        );
        assert_eq!(res.len(), Length::from_usize(len).encoded_len());
        res
    }

    #[test]
    fn short_and_long_form() {
        assert_eq!(parse(b"\x00"), Ok((0, 1)));
        assert_eq!(parse(b"\x7f"), Ok((0x7f, 1)));
        assert_eq!(parse(b"\x81\x80"), Ok((0x80, 2)));
        assert_eq!(parse(b"\x82\x05\xd0"), Ok((1488, 3)));
        assert_eq!(parse(b"\x83\x01\x00\x00"), Ok((0x10000, 4)));
    }

    #[test]
    fn reject_non_der() {
        assert_eq!(parse(b"\x80"), Err(ErrorKind::MalformedLength));
        assert_eq!(parse(b"\xff"), Err(ErrorKind::MalformedLength));
        assert_eq!(parse(b"\x81\x10"), Err(ErrorKind::MalformedLength));
        assert_eq!(parse(b"\x82\x00\x90"), Err(ErrorKind::MalformedLength));
        assert_eq!(parse(b"\x82\x01"), Err(ErrorKind::TruncatedInput));
        assert_eq!(parse(b""), Err(ErrorKind::TruncatedInput));
    }

    #[test]
    fn encoding() {
        assert_eq!(encode(0), b"\x00");
        assert_eq!(encode(0x7f), b"\x7f");
        assert_eq!(encode(0x80), b"\x81\x80");
        assert_eq!(encode(0xff), b"\x81\xff");
        assert_eq!(encode(0x100), b"\x82\x01\x00");
        assert_eq!(encode(1250), b"\x82\x04\xe2");
    }
}
