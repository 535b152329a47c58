//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;
use super::source::Pos;


//------------ ErrorKind -----------------------------------------------------

/// The category of a decoding error.
///
/// Every error produced while decoding data carries exactly one of these
/// kinds so callers can react to classes of failures without having to
/// look at the message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The length octets are not valid DER.
    ///
    /// This covers the indefinite form, the reserved value 0xFF and long
    /// forms that are not minimal.
    MalformedLength,

    /// The input ended before a value was complete.
    TruncatedInput,

    /// There is data left after the outermost value.
    TrailingData,

    /// The data is valid BER but not canonical DER.
    NonCanonicalEncoding,

    /// A value has a tag or structure the schema doesn’t allow.
    SchemaMismatch,

    /// A CHOICE value has a tag that matches none of its alternatives.
    UnknownChoiceVariant,

    /// The content type of a content info is not the one expected.
    UnexpectedContentType,

    /// An open type value failed to decode under the schema registered for
    /// its discriminator.
    OpenTypeDecodeFailure,

    /// A configured limit was exceeded.
    ResourceLimitExceeded,

    /// Re-encoding a decoded value did not result in the original octets.
    RoundTripViolation,

    /// The discriminator of an open type has no registered schema while
    /// resolution of all open types was required.
    UnknownOpenType,

    /// A mandatory attribute is missing from a set of signed attributes.
    MissingAttribute,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            ErrorKind::MalformedLength => "malformed length",
            ErrorKind::TruncatedInput => "truncated input",
            ErrorKind::TrailingData => "trailing data",
            ErrorKind::NonCanonicalEncoding => "non-canonical encoding",
            ErrorKind::SchemaMismatch => "schema mismatch",
            ErrorKind::UnknownChoiceVariant => "unknown choice variant",
            ErrorKind::UnexpectedContentType => "unexpected content type",
            ErrorKind::OpenTypeDecodeFailure => "open type decode failure",
            ErrorKind::ResourceLimitExceeded => "resource limit exceeded",
            ErrorKind::RoundTripViolation => "round trip violation",
            ErrorKind::UnknownOpenType => "unknown open type",
            ErrorKind::MissingAttribute => "missing attribute",
        })
    }
}


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// The error carries its [`ErrorKind`], the position in the input where
/// the offending value starts, and a short message. Errors produced while
/// decoding the content of an open type keep the inner error as their
/// source.
#[derive(Clone, Debug, Error)]
#[error("{kind} at {pos}: {msg}")]
pub struct DecodeError {
    kind: ErrorKind,
    pos: Pos,
    msg: Cow<'static, str>,
    #[source]
    source: Option<Box<DecodeError>>,
}

impl DecodeError {
    /// Creates a new error.
    pub fn new(
        kind: ErrorKind, msg: impl Into<Cow<'static, str>>, pos: Pos
    ) -> Self {
        DecodeError { kind, pos, msg: msg.into(), source: None }
    }

    /// Creates a new error wrapping another error.
    pub fn with_source(
        kind: ErrorKind,
        msg: impl Into<Cow<'static, str>>,
        pos: Pos,
        source: DecodeError,
    ) -> Self {
        DecodeError {
            kind, pos, msg: msg.into(), source: Some(Box::new(source))
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the position of the value that caused the error.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Returns the message of the error.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Returns the error this error was caused by, if any.
    pub fn inner(&self) -> Option<&DecodeError> {
        self.source.as_deref()
    }
}


//============ Tests =========================================================
