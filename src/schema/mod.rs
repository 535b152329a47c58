//! Schemas describing how to interpret encoded data.
//!
//! A [`Schema`] is a declarative description of an ASN.1 type. Schemas for
//! constructed types refer to the schemas of their components, so a set of
//! `static` schemas forms a graph describing a complete module. The
//! [`decode`] function walks this graph alongside the encoded data and
//! produces a [`Value`], the [`encode`] function does the opposite.
//!
//! Open types, i.e., fields of type ANY DEFINED BY, are described by
//! [`Schema::Open`]. They name the domain of the discriminator and the
//! component of an enclosing SEQUENCE that holds it. During decoding, the
//! discriminator is looked up in a [`Registry`][crate::registry::Registry]
//! to find the schema for the value.
//!
//! Schemas are typically defined as statics using the const constructors:
//!
//! ```
//! use cmsder::schema::{Field, Schema};
//! use cmsder::schema::universal::{OID, OCTET_STRING};
//!
//! static CONTENT_REFERENCE: Schema = Schema::sequence("ContentReference", &[
//!     Field::required("contentType", &OID),
//!     Field::required("signedContentIdentifier", &OCTET_STRING),
//!     Field::required("originatorSignatureValue", &OCTET_STRING),
//! ]);
//! ```

pub use self::decode::{decode, decode_at, decode_prefix};
pub(crate) use self::decode::Decoder;
pub use self::encode::{encode, encode_to};

use std::cmp::Ordering;
use crate::ident::Tag;
use crate::primitive::PrimitiveType;
use crate::value::Value;

pub mod universal;

mod decode;
mod encode;


//------------ Schema --------------------------------------------------------

/// The longest chain of directly nested tags followed through schemas.
pub const MAX_TAG_CHAIN: usize = 16;

/// The description of an ASN.1 type.
#[derive(Debug)]
pub enum Schema {
    /// A universal primitive type.
    Primitive(PrimitiveType),

    /// A SEQUENCE with named components.
    Sequence(Structure),

    /// A SET with named components.
    ///
    /// The components must have distinct tags.
    Set(Structure),

    /// A SEQUENCE OF a single element type.
    SequenceOf(Collection),

    /// A SET OF a single element type.
    SetOf(Collection),

    /// A CHOICE between alternatives distinguished by their tags.
    Choice(ChoiceType),

    /// An explicitly tagged type.
    Explicit(Tag, &'static Schema),

    /// An implicitly tagged type.
    ///
    /// Implicit tagging of [`Schema::Any`] results in a value with a fixed
    /// tag but arbitrary content that is captured as is.
    Implicit(Tag, &'static Schema),

    /// The type ANY.
    ///
    /// Values are kept as their complete encoding.
    Any,

    /// An open type whose schema is determined by a discriminator.
    Open(OpenType),
}

/// # Constructors
///
impl Schema {
    pub const fn primitive(ty: PrimitiveType) -> Self {
        Schema::Primitive(ty)
    }

    pub const fn sequence(
        name: &'static str, fields: &'static [Field]
    ) -> Self {
        Schema::Sequence(Structure { name, fields })
    }

    pub const fn set(name: &'static str, fields: &'static [Field]) -> Self {
        Schema::Set(Structure { name, fields })
    }

    pub const fn sequence_of(
        name: &'static str, element: &'static Schema
    ) -> Self {
        Schema::SequenceOf(Collection { name, element, size: Size::Any })
    }

    /// Creates a SEQUENCE SIZE (1..MAX) OF.
    pub const fn sequence_of_non_empty(
        name: &'static str, element: &'static Schema
    ) -> Self {
        Schema::SequenceOf(Collection { name, element, size: Size::NonEmpty })
    }

    pub const fn set_of(
        name: &'static str, element: &'static Schema
    ) -> Self {
        Schema::SetOf(Collection { name, element, size: Size::Any })
    }

    /// Creates a SET SIZE (1..MAX) OF.
    pub const fn set_of_non_empty(
        name: &'static str, element: &'static Schema
    ) -> Self {
        Schema::SetOf(Collection { name, element, size: Size::NonEmpty })
    }

    pub const fn choice(
        name: &'static str, alternatives: &'static [Alternative]
    ) -> Self {
        Schema::Choice(ChoiceType { name, alternatives })
    }

    pub const fn explicit(tag: Tag, inner: &'static Schema) -> Self {
        Schema::Explicit(tag, inner)
    }

    pub const fn implicit(tag: Tag, inner: &'static Schema) -> Self {
        Schema::Implicit(tag, inner)
    }

    /// Creates an open type.
    ///
    /// The discriminator is the component named `key` of the nearest
    /// enclosing SEQUENCE or SET that has such a component.
    pub const fn open(domain: Domain, key: &'static str) -> Self {
        Schema::Open(OpenType { domain, key })
    }
}

/// # Properties
///
impl Schema {
    /// Returns the tag of values of this schema if it is fixed.
    ///
    /// Returns `None` for CHOICE, ANY, and open types.
    pub fn tag(&self) -> Option<Tag> {
        match *self {
            Schema::Primitive(ty) => Some(ty.tag()),
            Schema::Sequence(_) | Schema::SequenceOf(_) => {
                Some(Tag::SEQUENCE)
            }
            Schema::Set(_) | Schema::SetOf(_) => Some(Tag::SET),
            Schema::Explicit(tag, _) | Schema::Implicit(tag, _) => Some(tag),
            Schema::Choice(_) | Schema::Any | Schema::Open(_) => None,
        }
    }

    /// Returns whether a value with the given tag can be of this schema.
    pub fn matches(&self, tag: Tag) -> bool {
        match *self {
            Schema::Choice(ref choice) => {
                choice.alternatives.iter().any(|alt| alt.schema.matches(tag))
            }
            Schema::Any | Schema::Open(_) => true,
            _ => self.tag() == Some(tag),
        }
    }

    /// Returns whether values of this schema use the constructed encoding.
    ///
    /// Returns `None` if this depends on the value.
    pub fn is_constructed(&self) -> Option<bool> {
        match *self {
            Schema::Primitive(_) => Some(false),
            Schema::Sequence(_) | Schema::Set(_)
            | Schema::SequenceOf(_) | Schema::SetOf(_)
            | Schema::Explicit(..) => Some(true),
            Schema::Implicit(_, inner) => {
                inner.follow_tags(false).and_then(Schema::is_constructed)
            }
            Schema::Choice(_) | Schema::Any | Schema::Open(_) => None,
        }
    }

    /// Returns the schema with all tagging removed.
    ///
    /// A chain of tags longer than [`MAX_TAG_CHAIN`] is returned as is.
    pub fn untagged(&self) -> &Schema {
        self.follow_tags(true).unwrap_or(self)
    }

    /// Follows tagged schemas to the type underneath.
    ///
    /// If `explicit` is `false`, stops at the first explicitly tagged
    /// schema. Returns `None` if the chain doesn’t end within
    /// [`MAX_TAG_CHAIN`] steps, which happens for a schema that tags
    /// itself.
    pub(crate) fn follow_tags(&self, explicit: bool) -> Option<&Schema> {
        let mut schema = self;
        for _ in 0..MAX_TAG_CHAIN {
            schema = match *schema {
                Schema::Implicit(_, inner) => inner,
                Schema::Explicit(_, inner) if explicit => inner,
                _ => return Some(schema)
            }
        }
        None
    }

    /// Returns the name of the type.
    pub fn name(&self) -> &'static str {
        match *self {
            Schema::Primitive(ty) => ty.name(),
            Schema::Sequence(ref s) | Schema::Set(ref s) => s.name,
            Schema::SequenceOf(ref c) | Schema::SetOf(ref c) => c.name,
            Schema::Choice(ref c) => c.name,
            Schema::Explicit(..) | Schema::Implicit(..) => {
                match self.follow_tags(true) {
                    Some(base) => base.name(),
                    None => "tagged type",
                }
            }
            Schema::Any => "ANY",
            Schema::Open(_) => "ANY DEFINED BY",
        }
    }
}


//------------ Structure -----------------------------------------------------

/// The components of a SEQUENCE or SET.
#[derive(Debug)]
pub struct Structure {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Structure {
    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}


//------------ Field ---------------------------------------------------------

/// A named component of a SEQUENCE or SET.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub schema: &'static Schema,
    pub presence: Presence,
}

impl Field {
    pub const fn required(name: &'static str, schema: &'static Schema) -> Self {
        Field { name, schema, presence: Presence::Required }
    }

    pub const fn optional(name: &'static str, schema: &'static Schema) -> Self {
        Field { name, schema, presence: Presence::Optional }
    }

    pub const fn with_default(
        name: &'static str, schema: &'static Schema, default: fn() -> Value
    ) -> Self {
        Field { name, schema, presence: Presence::Default(default) }
    }
}


//------------ Presence ------------------------------------------------------

/// Whether a component has to be present.
#[derive(Clone, Copy, Debug)]
pub enum Presence {
    /// The component must be present.
    Required,

    /// The component may be absent.
    Optional,

    /// The component may be absent in which case it has the given value.
    ///
    /// DER requires the component to be absent if its value equals the
    /// default.
    Default(fn() -> Value),
}


//------------ Collection ----------------------------------------------------

/// The element type of a SEQUENCE OF or SET OF.
#[derive(Debug)]
pub struct Collection {
    pub name: &'static str,
    pub element: &'static Schema,
    pub size: Size,
}


//------------ Size ----------------------------------------------------------

/// A size constraint for a SEQUENCE OF or SET OF.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Size {
    /// Any number of elements, including none.
    Any,

    /// At least one element, i.e., `SIZE (1..MAX)`.
    NonEmpty,
}


//------------ ChoiceType ----------------------------------------------------

/// The alternatives of a CHOICE.
#[derive(Debug)]
pub struct ChoiceType {
    pub name: &'static str,
    pub alternatives: &'static [Alternative],
}

impl ChoiceType {
    /// Returns the alternative with the given name.
    pub fn alternative(&self, name: &str) -> Option<&Alternative> {
        self.alternatives.iter().find(|alt| alt.name == name)
    }

    /// Returns the alternative a value with the given tag belongs to.
    pub fn alternative_for_tag(&self, tag: Tag) -> Option<&Alternative> {
        self.alternatives.iter().find(|alt| alt.schema.matches(tag))
    }
}


//------------ Alternative ---------------------------------------------------

/// A named alternative of a CHOICE.
#[derive(Debug)]
pub struct Alternative {
    pub name: &'static str,
    pub schema: &'static Schema,
}

impl Alternative {
    pub const fn new(name: &'static str, schema: &'static Schema) -> Self {
        Alternative { name, schema }
    }
}


//------------ OpenType ------------------------------------------------------

/// An open type.
#[derive(Clone, Copy, Debug)]
pub struct OpenType {
    /// The domain the discriminator belongs to.
    pub domain: Domain,

    /// The name of the component holding the discriminator.
    pub key: &'static str,
}


//------------ Domain --------------------------------------------------------

/// The domain of discriminators for open types.
///
/// Each domain has its own set of bindings in a registry, so the same
/// object identifier can be bound to different schemas in different
/// domains.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Domain {
    /// Content types of content infos.
    ContentType,

    /// Types of signed and unsigned attributes.
    Attribute,

    /// Types of security categories in ESS security labels.
    SecurityCategory,

    /// Identifiers of certificate policy qualifiers.
    PolicyQualifier,
}


//------------ Helper Functions ----------------------------------------------

/// Compares the encodings of two SET OF members.
///
/// The encodings are compared as octet strings with the shorter one padded
/// with trailing zero octets.
pub(crate) fn set_of_cmp(left: &[u8], right: &[u8]) -> Ordering {
    let len = left.len().max(right.len());
    for i in 0..len {
        let left = left.get(i).copied().unwrap_or(0);
        let right = right.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => { }
            other => return other
        }
    }
    Ordering::Equal
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use super::universal::{INTEGER, OCTET_STRING, UTF8_STRING};
    use crate::string::CharSet;

    static PRINTABLE: Schema = Schema::primitive(
        PrimitiveType::String(CharSet::Printable)
    );

    static MARK: Schema = Schema::choice("ESSPrivacyMark", &[
        Alternative::new("pString", &PRINTABLE),
        Alternative::new("utf8String", &UTF8_STRING),
    ]);

    static TAGGED: Schema = Schema::implicit(Tag::CTX_1, &OCTET_STRING);
    static WRAPPED: Schema = Schema::explicit(Tag::CTX_0, &INTEGER);

    #[test]
    fn tags() {
        assert_eq!(INTEGER.tag(), Some(Tag::INTEGER));
        assert_eq!(MARK.tag(), None);
        assert!(MARK.matches(Tag::PRINTABLE_STRING));
        assert!(MARK.matches(Tag::UTF8_STRING));
        assert!(!MARK.matches(Tag::IA5_STRING));
        assert!(TAGGED.matches(Tag::CTX_1));
        assert!(!TAGGED.matches(Tag::OCTET_STRING));
        assert_eq!(TAGGED.is_constructed(), Some(false));
        assert_eq!(WRAPPED.is_constructed(), Some(true));
        assert_eq!(WRAPPED.name(), "INTEGER");
        assert!(matches!(WRAPPED.untagged(), Schema::Primitive(_)));
        assert!(Schema::Any.matches(Tag::ctx(17)));
    }

    #[test]
    fn self_tagged() {
        static EXPLICIT_LOOP: Schema = Schema::explicit(
            Tag::CTX_0, &EXPLICIT_LOOP
        );
        static IMPLICIT_LOOP: Schema = Schema::implicit(
            Tag::CTX_1, &IMPLICIT_LOOP
        );
        static DEEP: Schema = Schema::implicit(Tag::CTX_2, &TAGGED);

        assert_eq!(EXPLICIT_LOOP.name(), "tagged type");
        assert!(matches!(EXPLICIT_LOOP.untagged(), Schema::Explicit(..)));
        assert_eq!(EXPLICIT_LOOP.is_constructed(), Some(true));
        assert_eq!(IMPLICIT_LOOP.name(), "tagged type");
        assert_eq!(IMPLICIT_LOOP.is_constructed(), None);
        assert_eq!(DEEP.name(), "OCTET STRING");
        assert_eq!(DEEP.is_constructed(), Some(false));
    }

    #[test]
    fn alternatives() {
        let Schema::Choice(ref choice) = MARK else { unreachable!() };
        assert_eq!(
            choice.alternative_for_tag(Tag::UTF8_STRING).map(|alt| alt.name),
            Some("utf8String")
        );
        assert!(choice.alternative("pString").is_some());
        assert!(choice.alternative("bmpString").is_none());
    }

    #[test]
    fn padded_compare() {
        assert_eq!(set_of_cmp(b"\x02\x01\x01", b"\x02\x01\x02"), Ordering::Less);
        assert_eq!(set_of_cmp(b"\x04\x01", b"\x04\x01\x00"), Ordering::Equal);
        assert_eq!(set_of_cmp(b"\x04\x02", b"\x04\x01\xff"), Ordering::Greater);
    }
}
