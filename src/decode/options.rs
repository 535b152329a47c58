//! Configuration of the decoder.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.


//------------ DecodeOptions -------------------------------------------------

/// Options controlling how strictly and how deeply data is decoded.
///
/// The default options decode open types opportunistically, enforce the
/// canonical order of SET members, and apply generous limits on nesting
/// depth and input size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    /// How values of open types are treated.
    pub open_types: OpenTypes,

    /// Whether SET and SET OF members must appear in canonical order.
    pub set_order: SetOrder,

    /// The maximum nesting depth of constructed values.
    pub max_depth: usize,

    /// The maximum size of the input in octets.
    ///
    /// If this is `None`, input of any size is accepted.
    pub max_len: Option<usize>,
}

impl DecodeOptions {
    /// The default maximum nesting depth.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// The default maximum input size of 16 MiB.
    pub const DEFAULT_MAX_LEN: usize = 16 * 1024 * 1024;

    /// Returns options that leave all open types undecoded.
    pub fn opaque() -> Self {
        Self::default().with_open_types(OpenTypes::Opaque)
    }

    /// Returns options that require every open type to be resolved.
    pub fn require_all() -> Self {
        Self::default().with_open_types(OpenTypes::Require)
    }

    pub fn with_open_types(mut self, open_types: OpenTypes) -> Self {
        self.open_types = open_types;
        self
    }

    pub fn with_set_order(mut self, set_order: SetOrder) -> Self {
        self.set_order = set_order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            open_types: OpenTypes::Resolve,
            set_order: SetOrder::Strict,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_len: Some(Self::DEFAULT_MAX_LEN),
        }
    }
}


//------------ OpenTypes -----------------------------------------------------

/// How the decoder treats values of open types.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OpenTypes {
    /// Keep all open type values as opaque captured encodings.
    Opaque,

    /// Decode open type values whose discriminator is registered.
    ///
    /// Values with an unknown discriminator are kept opaque.
    #[default]
    Resolve,

    /// Decode all open type values.
    ///
    /// A value with an unknown discriminator results in an error.
    Require,
}


//------------ SetOrder ------------------------------------------------------

/// Whether the order of SET and SET OF members is checked.
///
/// DER requires the members of a SET to appear in ascending tag order and
/// those of a SET OF in ascending order of their encodings. Some producers
/// get this wrong, so the check can be relaxed. Encoding always produces
/// the canonical order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SetOrder {
    /// Reject values whose members are not in canonical order.
    #[default]
    Strict,

    /// Accept SET members in any order.
    Relaxed,
}
