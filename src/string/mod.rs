//! DER encoding for various strings types.
//!
//! This module provides types that match the string encodings used in CMS
//! and its extensions.
//!
//! Octet strings are represented directly by `Bytes` values. [`BitString`]s
//! contain a sequence of bits that does not need to be of a length
//! divisible by eight.
//!
//! In addition, there are a number of so-called restricted character strings
//! that each contain a sequence of characters according to a pre-defined
//! character set. These are represented by the [`RestrictedString`] type
//! which is parameterised over the [`CharSet`] at runtime, so schemas can
//! pick the character set of a field.

pub use self::bit::BitString;
pub use self::restricted::{CharSet, RestrictedString};

mod bit;
mod restricted;
