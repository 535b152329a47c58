//! Decoding data in Distinguished Encoding Rules.
//!
//! This module provides the low-level machinery for taking DER encoded
//! data apart: a [`Source`] handing out complete values as [`Tlv`]s, the
//! error type [`DecodeError`] shared by all decoding operations, and the
//! [`DecodeOptions`] that control how strict and how deep decoding goes.
//!
//! Interpreting values according to a schema happens in the
//! [`schema`][crate::schema] module.

pub use self::error::{DecodeError, ErrorKind};
pub use self::options::{DecodeOptions, OpenTypes, SetOrder};
pub use self::source::{Pos, Source, Tlv};

mod error;
mod options;
mod source;
