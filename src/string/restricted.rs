//! Restricted character strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{fmt, str};
use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::{EncodeError, Target, write_tlv};
use crate::ident::Tag;


//------------ CharSet -------------------------------------------------------

/// The character set of a restricted character string type.
///
/// All character sets but BMPString are subsets of UTF-8, so a string’s
/// content octets are valid UTF-8 once checked. BMPString content is a
/// sequence of big-endian UCS-2 code units.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CharSet {
    /// UTF8String: any Unicode code point encoded as UTF-8.
    Utf8,

    /// PrintableString: letters, digits, space and `'()+,-./:=?`.
    Printable,

    /// IA5String: the ASCII character set.
    Ia5,

    /// NumericString: digits and space.
    Numeric,

    /// VisibleString: printing ASCII characters and space.
    Visible,

    /// BMPString: the Basic Multilingual Plane in UCS-2.
    Bmp,
}

impl CharSet {
    /// Returns the natural tag of strings of this character set.
    pub const fn tag(self) -> Tag {
        match self {
            CharSet::Utf8 => Tag::UTF8_STRING,
            CharSet::Printable => Tag::PRINTABLE_STRING,
            CharSet::Ia5 => Tag::IA5_STRING,
            CharSet::Numeric => Tag::NUMERIC_STRING,
            CharSet::Visible => Tag::VISIBLE_STRING,
            CharSet::Bmp => Tag::BMP_STRING,
        }
    }

    /// Returns the ASN.1 name of strings of this character set.
    pub const fn name(self) -> &'static str {
        match self {
            CharSet::Utf8 => "UTF8String",
            CharSet::Printable => "PrintableString",
            CharSet::Ia5 => "IA5String",
            CharSet::Numeric => "NumericString",
            CharSet::Visible => "VisibleString",
            CharSet::Bmp => "BMPString",
        }
    }

    /// Checks whether all of `slice` is valid in the character set.
    pub fn check(self, slice: &[u8]) -> bool {
        match self {
            CharSet::Utf8 => str::from_utf8(slice).is_ok(),
            CharSet::Printable => {
                slice.iter().copied().all(|x| {
                    x.is_ascii_alphanumeric() || // A-Z a-z 0-9
                    x == b' ' || x == b'\'' || x == b'(' || x == b')' ||
                    x == b'+' || x == b',' || x == b'-' || x == b'.' ||
                    x == b'/' || x == b':' || x == b'=' || x == b'?'
                })
            }
            CharSet::Ia5 => slice.is_ascii(),
            CharSet::Numeric => {
                slice.iter().all(|&x| x == b' ' || x.is_ascii_digit())
            }
            CharSet::Visible => {
                slice.iter().all(|&x| (0x20..0x7F).contains(&x))
            }
            CharSet::Bmp => {
                slice.len() % 2 == 0 && bmp_units(slice).all(|unit| {
                    !(0xD800..0xE000).contains(&unit)
                })
            }
        }
    }
}


//------------ RestrictedString ----------------------------------------------

/// A restricted character string.
///
/// The string keeps its content octets which are guaranteed to be valid
/// for its character set.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct RestrictedString {
    charset: CharSet,
    content: Bytes,

    /// The characters of a BMPString.
    decoded: Option<Box<str>>,
}

impl RestrictedString {
    /// Creates a string from a str.
    pub fn new(charset: CharSet, s: &str) -> Result<Self, EncodeError> {
        let invalid = EncodeError::InvalidValue {
            msg: "invalid characters in restricted string"
        };
        let content = if charset == CharSet::Bmp {
            let mut content = Vec::with_capacity(s.len() * 2);
            for ch in s.chars() {
                let unit = u16::try_from(u32::from(ch)).map_err(|_| {
                    invalid.clone()
                })?;
                content.extend_from_slice(&unit.to_be_bytes());
            }
            Bytes::from(content)
        }
        else if charset.check(s.as_bytes()) {
            Bytes::copy_from_slice(s.as_bytes())
        }
        else {
            return Err(invalid)
        };
        Ok(Self::from_checked(charset, content))
    }

    /// Creates a string from the content octets of an encoded value.
    pub fn from_content(
        charset: CharSet, content: Bytes, pos: Pos
    ) -> Result<Self, DecodeError> {
        if !charset.check(&content) {
            return Err(DecodeError::new(
                ErrorKind::NonCanonicalEncoding,
                format!("invalid characters in {}", charset.name()), pos
            ))
        }
        Ok(Self::from_checked(charset, content))
    }

    fn from_checked(charset: CharSet, content: Bytes) -> Self {
        let decoded = (charset == CharSet::Bmp).then(|| {
            char::decode_utf16(bmp_units(&content)).map(|ch| {
                ch.unwrap_or(char::REPLACEMENT_CHARACTER)
            }).collect::<String>().into_boxed_str()
        });
        RestrictedString { charset, content, decoded }
    }

    /// Returns the character set of the string.
    pub fn charset(&self) -> CharSet {
        self.charset
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.content.as_ref()
    }

    /// Returns the string as a str.
    pub fn as_str(&self) -> &str {
        match self.decoded {
            Some(ref decoded) => decoded,
            // The content has been checked to be UTF-8.
            None => str::from_utf8(&self.content).unwrap_or_default()
        }
    }

    /// Writes the complete encoding to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_tlv(target, self.charset.tag(), false, &self.content)
    }
}


/// Returns the big-endian code units of BMPString content.
fn bmp_units(slice: &[u8]) -> impl Iterator<Item = u16> + '_ {
    slice.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
}


//--- Display and Debug

impl fmt::Display for RestrictedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RestrictedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", self.charset.name(), self.as_str())
    }
}


//============ Tests =========================================================
