//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ANS.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{borrow, fmt, hash, str};
use bytes::Bytes;
use thiserror::Error;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::{Target, write_tlv};
use crate::ident::Tag;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.2.840.113549.1.7.2’.
///
/// Values of this type keep a single object identifer in its DER encoding,
/// i.e., the content octets of the encoded value. Because different
/// representations may be useful, the type is generic over something that
/// can become a reference to a bytes slice. Checked construction from
/// encoded data is only defined for `Bytes` values, though.
///
/// Equality and hashing are done on the encoded octets. Since DER permits
/// only one encoding per identifier, this is the same as comparing the
/// components.
///
/// Known object identifiers are typically defined in an `oid` submodule
/// as constants of `Oid<&'static [u8]>` – or its type alias [`ConstOid`].
#[derive(Clone, Copy)]
pub struct Oid<T: AsRef<[u8]>=Bytes>(pub T);

/// A type alias for `Oid<&'static [u8]>.
///
/// This is useful when defining object identifier constants.
pub type ConstOid = Oid<&'static [u8]>;


/// # Decoding and Encoding
///
impl Oid<Bytes> {
    /// Creates an object identifier from the content octets of a value.
    ///
    /// The content is checked for being a canonically encoded object
    /// identifier: it must not be empty, no subidentifier may start with
    /// a padding octet of 0x80, and the last octet must terminate the last
    /// subidentifier. Components that do not fit into a `u64` are rejected
    /// as exceeding a resource limit.
    pub fn from_content(content: Bytes, pos: Pos) -> Result<Self, DecodeError> {
        check_content(&content, pos)?;
        Ok(Oid(content))
    }

    /// Creates an object identifier from its components.
    pub fn from_arcs(arcs: &[u64]) -> Result<Self, ParseOidError> {
        let (first, second, rest) = match arcs {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => return Err(ParseOidError::TooShort),
        };
        if first > 2 || (first < 2 && second >= 40) {
            return Err(ParseOidError::InvalidRoot)
        }
        let head = (first * 40).checked_add(second).ok_or(
            ParseOidError::Overflow
        )?;
        let mut res = Vec::with_capacity(arcs.len() + 4);
        push_subidentifier(&mut res, head);
        for &arc in rest {
            push_subidentifier(&mut res, arc);
        }
        Ok(Oid(res.into()))
    }
}

impl<T: AsRef<[u8]>> Oid<T> {
    /// Returns an iterator over the components of the object identifier.
    ///
    /// If the identifier is not correctly encoded, which can only happen
    /// for values not created through [`Oid::from_content`], the iterator
    /// ends at the first malformed subidentifier.
    pub fn components(&self) -> Components {
        Components::new(self.0.as_ref())
    }

    /// Returns the length of the complete encoding of the identifier.
    pub fn encoded_len(&self) -> usize {
        crate::encode::total_len(Tag::OID, self.0.as_ref().len())
    }

    /// Writes the complete encoding of the identifier to a target.
    pub fn write_encoded<W: Target>(
        &self, target: &mut W
    ) -> Result<(), W::Error> {
        write_tlv(target, Tag::OID, false, self.0.as_ref())
    }
}

impl ConstOid {
    /// Converts a constant into an owned identifier without copying.
    pub fn to_bytes(self) -> Oid {
        Oid(Bytes::from_static(self.0))
    }
}


//--- AsRef and Borrow

impl<T: AsRef<[u8]>> AsRef<[u8]> for Oid<T> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl borrow::Borrow<[u8]> for Oid<Bytes> {
    fn borrow(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- From

impl From<ConstOid> for Oid {
    fn from(src: ConstOid) -> Self {
        src.to_bytes()
    }
}


//--- PartialEq and Eq

impl<T: AsRef<[u8]>, U: AsRef<[u8]>> PartialEq<Oid<U>> for Oid<T> {
    fn eq(&self, other: &Oid<U>) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl<T: AsRef<[u8]>> Eq for Oid<T> { }


//--- Hash

impl<T: AsRef<[u8]>> hash::Hash for Oid<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}


//--- FromStr

impl str::FromStr for Oid {
    type Err = ParseOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s.split('.').map(|arc| {
            if arc.is_empty() || !arc.bytes().all(|ch| ch.is_ascii_digit()) {
                return Err(ParseOidError::InvalidComponent)
            }
            arc.parse::<u64>().map_err(|_| ParseOidError::Overflow)
        }).collect::<Result<Vec<_>, _>>()?;
        Self::from_arcs(&arcs)
    }
}


//--- Display and Debug

impl<T: AsRef<[u8]>> fmt::Display for Oid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut components = self.components();
        if let Some(first) = components.next() {
            write!(f, "{}", first)?;
        }
        for component in components {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

impl<T: AsRef<[u8]>> fmt::Debug for Oid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}


//------------ Components ----------------------------------------------------

/// An iterator over the components of an object identifier.
///
/// The first subidentifier of the encoding carries the first two
/// components, so the iterator yields one more item than there are
/// subidentifiers.
#[derive(Clone, Debug)]
pub struct Components<'a> {
    /// The remainder of the object identifier’s encoded octets.
    slice: &'a [u8],

    /// Whether the first subidentifier has been processed.
    started: bool,

    /// The second component if it has been split off but not yet returned.
    second: Option<u64>,
}

impl<'a> Components<'a> {
    fn new(slice: &'a [u8]) -> Self {
        Components { slice, started: false, second: None }
    }
}

impl Iterator for Components<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(second) = self.second.take() {
            return Some(second)
        }
        let (value, len) = take_subidentifier(self.slice)?;
        self.slice = &self.slice[len..];
        if self.started {
            Some(value)
        }
        else {
            self.started = true;
            let (first, second) = split_first(value);
            self.second = Some(second);
            Some(first)
        }
    }
}


//------------ ParseOidError -------------------------------------------------

/// An error happened while creating an object identifier from components.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseOidError {
    #[error("object identifier needs at least two components")]
    TooShort,

    #[error("invalid first or second component")]
    InvalidRoot,

    #[error("invalid component")]
    InvalidComponent,

    #[error("component too large")]
    Overflow,
}


//------------ Helper Functions ----------------------------------------------

/// Checks that `content` contains a canonically encoded object identifier.
fn check_content(content: &[u8], pos: Pos) -> Result<(), DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::new(
            ErrorKind::NonCanonicalEncoding, "empty object identifier", pos
        ))
    }
    let mut rest = content;
    while !rest.is_empty() {
        if rest[0] == 0x80 {
            return Err(DecodeError::new(
                ErrorKind::NonCanonicalEncoding,
                "padded subidentifier in object identifier", pos
            ))
        }
        let end = rest.iter().position(|&octet| octet & 0x80 == 0)
            .ok_or_else(|| {
                DecodeError::new(
                    ErrorKind::NonCanonicalEncoding,
                    "unterminated subidentifier in object identifier", pos
                )
            })?;
        if take_subidentifier(rest).is_none() {
            return Err(DecodeError::new(
                ErrorKind::ResourceLimitExceeded,
                "object identifier component too large", pos
            ))
        }
        rest = &rest[end + 1..];
    }
    Ok(())
}

/// Takes a single subidentifier from the start of `slice`.
///
/// Returns the value and the number of octets used or `None` if the slice
/// doesn’t start with a valid subidentifier fitting into a `u64`.
fn take_subidentifier(slice: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (idx, &octet) in slice.iter().enumerate() {
        if value > (u64::MAX >> 7) {
            return None
        }
        value = (value << 7) | u64::from(octet & 0x7F);
        if octet & 0x80 == 0 {
            return Some((value, idx + 1))
        }
    }
    None
}

/// Splits the first subidentifier into the first two components.
fn split_first(value: u64) -> (u64, u64) {
    if value < 40 {
        (0, value)
    }
    else if value < 80 {
        (1, value - 40)
    }
    else {
        (2, value - 80)
    }
}

/// Appends the encoding of a subidentifier.
fn push_subidentifier(target: &mut Vec<u8>, value: u64) {
    let mut groups = 1;
    let mut rest = value >> 7;
    while rest > 0 {
        groups += 1;
        rest >>= 7;
    }
    for idx in (1..groups).rev() {
        target.push(((value >> (7 * idx)) & 0x7F) as u8 | 0x80);
    }
    target.push((value & 0x7F) as u8);
}


//============ Tests =========================================================
