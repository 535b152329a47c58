//! Encoding data in Distinguished Encoding Rules.
//!
//! Values are written to a [`Target`], a simplified version of
//! `io::Write` whose error type can be set to `Infallible` for in-memory
//! targets. The helpers in this module write the identifier and length
//! octets. The actual encoding of values according to a schema happens in
//! the [`schema`][crate::schema] module.

pub use self::error::EncodeError;
pub use self::header::{header_len, total_len, write_header, write_tlv};
pub use self::target::{IoTarget, Target, infallible};

mod error;
mod header;
mod target;
