//! Sources of encoded data.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{fmt, ops};
use bytes::Bytes;
use crate::ident::{Ident, Tag};
use crate::length::Length;
use super::error::{DecodeError, ErrorKind};


//------------ Source --------------------------------------------------------

/// A source of DER encoded data.
///
/// The source wraps a [`Bytes`] value and hands out values as cheap slices
/// of it, so decoded primitives share the memory of the input. It keeps
/// track of the position of its first octet within the overall input for
/// error reporting.
#[derive(Clone, Debug)]
pub struct Source {
    /// The remaining data.
    data: Bytes,

    /// The position of the first octet of `data` in the overall input.
    pos: usize,
}

impl Source {
    /// Creates a new source for the given data.
    pub fn new(data: Bytes) -> Self {
        Self::with_pos(data, Pos(0))
    }

    /// Creates a new source for data starting at the given position.
    pub fn with_pos(data: Bytes, pos: Pos) -> Self {
        Source { data, pos: pos.0 }
    }

    /// Returns the current position of the source.
    pub fn pos(&self) -> Pos {
        Pos(self.pos)
    }

    /// Returns the remaining data.
    pub fn remaining(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Returns the remaining data as a bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Returns whether all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an error if there is data left in the source.
    pub fn check_exhausted(&self) -> Result<(), DecodeError> {
        if self.data.is_empty() {
            Ok(())
        }
        else {
            Err(DecodeError::new(
                ErrorKind::TrailingData, "trailing data", self.pos()
            ))
        }
    }

    /// Takes a single octet from the source.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        let res = *self.data.first().ok_or_else(|| self.truncated())?;
        self.advance(1);
        Ok(res)
    }

    /// Takes the next `len` octets from the source.
    pub fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.data.len() < len {
            return Err(self.truncated())
        }
        let res = self.data.split_to(len);
        self.pos += len;
        Ok(res)
    }

    /// Returns the identifier octets of the next value without consuming.
    ///
    /// Returns `Ok(None)` if the source is empty.
    pub fn peek_ident(&self) -> Result<Option<Ident>, DecodeError> {
        if self.data.is_empty() {
            return Ok(None)
        }
        Ident::parse(&self.data, self.pos()).map(|(ident, _)| Some(ident))
    }

    /// Returns the tag of the next value without consuming.
    pub fn peek_tag(&self) -> Result<Option<Tag>, DecodeError> {
        self.peek_ident().map(|ident| ident.map(Ident::tag))
    }

    /// Takes a complete value from the source.
    pub fn take_tlv(&mut self) -> Result<Tlv, DecodeError> {
        let start = self.pos();
        let (ident, ident_len) = Ident::parse(&self.data, start)?;
        let (len, len_len) = Length::parse(
            &self.data[ident_len..], Pos(self.pos + ident_len)
        )?;
        let header_len = ident_len + len_len;
        let total = header_len.checked_add(len.to_usize()).ok_or_else(|| {
            DecodeError::new(
                ErrorKind::ResourceLimitExceeded, "length overflow", start
            )
        })?;
        if self.data.len() < total {
            return Err(DecodeError::new(
                ErrorKind::TruncatedInput,
                "value extends beyond end of data", start
            ))
        }
        let raw = self.take_bytes(total)?;
        Ok(Tlv { ident, start, raw, header_len })
    }

    fn advance(&mut self, len: usize) {
        bytes::Buf::advance(&mut self.data, len);
        self.pos += len;
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::new(
            ErrorKind::TruncatedInput, "unexpected end of data", self.pos()
        )
    }
}


//------------ Tlv -----------------------------------------------------------

/// A single encoded value taken from a source.
///
/// The value keeps its complete encoding including the header.
#[derive(Clone, Debug)]
pub struct Tlv {
    ident: Ident,
    start: Pos,
    raw: Bytes,
    header_len: usize,
}

impl Tlv {
    /// Returns the identifier octets of the value.
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        self.ident.tag()
    }

    /// Returns whether the value is constructed.
    pub fn is_constructed(&self) -> bool {
        self.ident.is_constructed()
    }

    /// Returns the position of the first octet of the value.
    pub fn start(&self) -> Pos {
        self.start
    }

    /// Returns the content octets.
    pub fn content(&self) -> Bytes {
        self.raw.slice(self.header_len..)
    }

    /// Returns a source for the content octets.
    pub fn content_source(&self) -> Source {
        Source::with_pos(
            self.content(), Pos(self.start.0 + self.header_len)
        )
    }

    /// Returns the complete encoding of the value.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Converts the value into its complete encoding.
    pub fn into_raw(self) -> Bytes {
        self.raw
    }

    /// Returns an error if the value is not primitive.
    pub fn check_primitive(&self) -> Result<(), DecodeError> {
        if self.is_constructed() {
            Err(DecodeError::new(
                ErrorKind::NonCanonicalEncoding,
                "constructed encoding of a primitive type", self.start
            ))
        }
        else {
            Ok(())
        }
    }

    /// Returns an error if the value is not constructed.
    pub fn check_constructed(&self) -> Result<(), DecodeError> {
        if self.is_constructed() {
            Ok(())
        }
        else {
            Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                "expected constructed value", self.start
            ))
        }
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type can only be used for diagnostics. They can not be used
/// to determine how far a source has been advanced since it was created. This
/// is why we used a newtype.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl ops::Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Pos(self.0 + rhs.0)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================
