//! Errors while encoding.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use thiserror::Error;


//------------ EncodeError ---------------------------------------------------

/// A value could not be encoded according to a schema.
///
/// Encoding of a value produced by decoding never fails. These errors only
/// occur for values that were assembled by hand and don’t fit the schema
/// they are encoded with.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EncodeError {
    /// The value has a different shape than the schema requires.
    #[error("value does not match schema {schema}")]
    Mismatch {
        schema: &'static str,
    },

    /// A required component of a SEQUENCE or SET is missing.
    #[error("missing component {name}")]
    MissingComponent {
        name: &'static str,
    },

    /// A CHOICE value names an alternative the schema doesn’t have.
    #[error("unknown alternative {name}")]
    UnknownAlternative {
        name: String,
    },

    /// A SEQUENCE OF or SET OF with a size constraint has no elements.
    #[error("empty {schema}")]
    Empty {
        schema: &'static str,
    },

    /// A primitive value can’t be encoded canonically.
    #[error("invalid value: {msg}")]
    InvalidValue {
        msg: &'static str,
    },
}
