//! UTCTime and GeneralizedTime.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind, Pos};
use crate::encode::{EncodeError, Target, write_tlv};
use crate::ident::Tag;


//------------ TimeKind ------------------------------------------------------

/// The ASN.1 type a time value is encoded as.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeKind {
    /// UTCTime with a two digit year.
    Utc,

    /// GeneralizedTime with a four digit year.
    Generalized,
}

impl TimeKind {
    /// Returns the tag of the time type.
    pub const fn tag(self) -> Tag {
        match self {
            TimeKind::Utc => Tag::UTC_TIME,
            TimeKind::Generalized => Tag::GENERALIZED_TIME,
        }
    }
}


//------------ Time ----------------------------------------------------------

/// A point in time as encoded in DER.
///
/// This type covers both UTCTime and GeneralizedTime. It keeps the content
/// octets which are guaranteed to be in the restricted form DER requires:
///
/// * UTCTime is `YYMMDDHHMMSSZ`,
/// * GeneralizedTime is `YYYYMMDDHHMMSS[.f+]Z` where the fraction, if
///   present, does not end in a zero.
///
/// Years of UTCTime values from 50 to 99 are in the twentieth century, the
/// others in the twenty-first.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Time {
    kind: TimeKind,
    content: Bytes,
}

impl Time {
    /// Creates a time value from the content of an encoded value.
    pub fn from_content(
        kind: TimeKind, content: Bytes, pos: Pos
    ) -> Result<Self, DecodeError> {
        check(kind, &content).map_err(|msg| {
            DecodeError::new(ErrorKind::NonCanonicalEncoding, msg, pos)
        })?;
        Ok(Time { kind, content })
    }

    /// Creates a time value from its textual representation.
    pub fn new(kind: TimeKind, s: &str) -> Result<Self, EncodeError> {
        check(kind, s.as_bytes()).map_err(|msg| {
            EncodeError::InvalidValue { msg }
        })?;
        Ok(Time { kind, content: Bytes::copy_from_slice(s.as_bytes()) })
    }

    /// Returns the type the time is encoded as.
    pub fn kind(&self) -> TimeKind {
        self.kind
    }

    /// Returns the textual representation of the time.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.content).unwrap_or_default()
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.content.as_ref()
    }

    /// Returns the full year.
    pub fn year(&self) -> u16 {
        match self.kind {
            TimeKind::Utc => {
                let year = digits(&self.content[0..2]);
                if year >= 50 { 1900 + year } else { 2000 + year }
            }
            TimeKind::Generalized => digits(&self.content[0..4]),
        }
    }

    /// Returns month, day, hour, minute, and second.
    pub fn month_to_second(&self) -> [u8; 5] {
        let start = self.year_len();
        let mut res = [0; 5];
        for (idx, item) in res.iter_mut().enumerate() {
            let at = start + idx * 2;
            *item = digits(&self.content[at..at + 2]) as u8;
        }
        res
    }

    /// Writes the complete encoding to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_tlv(target, self.kind.tag(), false, &self.content)
    }

    fn year_len(&self) -> usize {
        match self.kind {
            TimeKind::Utc => 2,
            TimeKind::Generalized => 4,
        }
    }
}


//--- Display and Debug

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [month, day, hour, minute, second] = self.month_to_second();
        write!(f, "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year(), month, day, hour, minute, second
        )?;
        if let Some(dot) = self.content.iter().position(|&ch| ch == b'.') {
            // Everything between the dot and the trailing Z.
            let fraction = &self.content[dot..self.content.len() - 1];
            f.write_str(std::str::from_utf8(fraction).unwrap_or_default())?;
        }
        f.write_str("Z")
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TimeKind::Utc => write!(f, "UTCTime({})", self.as_str()),
            TimeKind::Generalized => {
                write!(f, "GeneralizedTime({})", self.as_str())
            }
        }
    }
}


//------------ Helper Functions ----------------------------------------------

/// Checks the DER form of time content.
fn check(kind: TimeKind, content: &[u8]) -> Result<(), &'static str> {
    let year_len = match kind {
        TimeKind::Utc => 2,
        TimeKind::Generalized => 4,
    };
    let fixed = year_len + 10;
    if content.len() < fixed + 1
        || !content[..fixed].iter().all(u8::is_ascii_digit)
    {
        return Err("malformed time")
    }
    if content.last() != Some(&b'Z') {
        return Err("time not in UTC")
    }
    let rest = &content[fixed..content.len() - 1];
    match kind {
        TimeKind::Utc => {
            if !rest.is_empty() {
                return Err("malformed UTCTime")
            }
        }
        TimeKind::Generalized => {
            if let Some((&b'.', fraction)) = rest.split_first() {
                if fraction.is_empty()
                    || !fraction.iter().all(u8::is_ascii_digit)
                    || fraction.last() == Some(&b'0')
                {
                    return Err("malformed fraction in GeneralizedTime")
                }
            }
            else if !rest.is_empty() {
                return Err("malformed GeneralizedTime")
            }
        }
    }

    let year = match kind {
        TimeKind::Utc => {
            let year = digits(&content[..2]);
            if year >= 50 { 1900 + year } else { 2000 + year }
        }
        TimeKind::Generalized => digits(&content[..4]),
    };
    let field = |idx: usize| {
        let at = year_len + idx * 2;
        digits(&content[at..at + 2])
    };
    let (month, day) = (field(0), field(1));
    if !(1..=12).contains(&month) {
        return Err("invalid month in time")
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err("invalid day in time")
    }
    if field(2) > 23 || field(3) > 59 || field(4) > 59 {
        return Err("invalid time of day")
    }
    Ok(())
}

/// Converts a slice of ASCII digits into a number.
fn digits(slice: &[u8]) -> u16 {
    slice.iter().fold(0, |res, &ch| res * 10 + u16::from(ch - b'0'))
}

fn days_in_month(year: u16, month: u16) -> u16 {
    match month {
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            }
            else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}


//============ Tests =========================================================
