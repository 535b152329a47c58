//! Handling of CMS signed data encoded in Distinguished Encoding Rules.
//!
//! This crate decodes and encodes DER data according to schemas, resolves
//! open types through a registry of bindings, and provides typed access to
//! the structures of the Cryptographic Message Syntax and its Enhanced
//! Security Services.
//!
//! The layers are, from the bottom:
//!
//! * the primitive codec in [`ident`], [`length`], [`int`], [`oid`],
//!   [`string`], [`time`], and [`primitive`],
//! * the [`schema`] graph describing constructed types together with the
//!   generic decoder and encoder producing and consuming [`Value`]s,
//! * the [`registry`] binding object identifiers to schemas for open
//!   types,
//! * the typed structures in [`cms`] and [`ess`], and
//! * the [`verify`] module with what a verifier needs from a message.
//!
//! Decoding is strict DER. Everything that decodes successfully encodes
//! back into the exact same octets.

pub use self::captured::Captured;
pub use self::decode::{DecodeError, DecodeOptions, ErrorKind};
pub use self::encode::EncodeError;
pub use self::ident::{Class, Tag};
pub use self::int::Integer;
pub use self::oid::{ConstOid, Oid};
pub use self::registry::{Registry, extend};
pub use self::schema::Schema;
pub use self::value::{OpenValue, Value};

pub mod captured;
pub mod cms;
pub mod decode;
pub mod encode;
pub mod ess;
pub mod ident;
pub mod int;
pub mod length;
pub mod oid;
pub mod primitive;
pub mod registry;
pub mod schema;
pub mod string;
pub mod time;
pub mod value;
pub mod verify;

mod convert;
