//! Decoded values.
//!
//! A [`Value`] is the result of decoding data according to a
//! [`Schema`][crate::schema::Schema]. Its shape mirrors the schema: every
//! SEQUENCE or SET becomes a list of named [`Components`], every SEQUENCE OF
//! or SET OF a list of values, every CHOICE a [`Choice`] naming the
//! alternative. Tags are not kept in the value. They are implied by the
//! schema the value is encoded with.

use std::fmt;
use bytes::Bytes;
use crate::captured::Captured;
use crate::decode::Pos;
use crate::int::Integer;
use crate::oid::Oid;
use crate::schema::Schema;
use crate::string::{BitString, RestrictedString};
use crate::time::Time;


//------------ Value ---------------------------------------------------------

/// A decoded value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// A BOOLEAN.
    Boolean(bool),

    /// An INTEGER.
    Integer(Integer),

    /// A BIT STRING.
    BitString(BitString),

    /// The content of an OCTET STRING.
    OctetString(Bytes),

    /// A NULL.
    Null,

    /// An OBJECT IDENTIFIER.
    Oid(Oid),

    /// One of the restricted character strings.
    String(RestrictedString),

    /// A UTCTime or GeneralizedTime.
    Time(Time),

    /// The components of a SEQUENCE or SET.
    Constructed(Components),

    /// The elements of a SEQUENCE OF or SET OF.
    List(Vec<Value>),

    /// The chosen alternative of a CHOICE.
    Choice(Choice),

    /// A value of type ANY, kept as its complete encoding.
    Any(Captured),

    /// A value of an open type.
    Open(OpenValue),
}

/// # Access to the Content
///
impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(value) => Some(value),
            _ => None
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(value) => Some(value),
            _ => None
        }
    }

    pub fn as_bit_string(&self) -> Option<&BitString> {
        match self {
            Value::BitString(value) => Some(value),
            _ => None
        }
    }

    pub fn as_octet_string(&self) -> Option<&Bytes> {
        match self {
            Value::OctetString(value) => Some(value),
            _ => None
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::Oid(value) => Some(value),
            _ => None
        }
    }

    pub fn as_string(&self) -> Option<&RestrictedString> {
        match self {
            Value::String(value) => Some(value),
            _ => None
        }
    }

    pub fn as_time(&self) -> Option<&Time> {
        match self {
            Value::Time(value) => Some(value),
            _ => None
        }
    }

    pub fn as_components(&self) -> Option<&Components> {
        match self {
            Value::Constructed(value) => Some(value),
            _ => None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(value) => Some(value),
            _ => None
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Value::Choice(value) => Some(value),
            _ => None
        }
    }

    pub fn as_captured(&self) -> Option<&Captured> {
        match self {
            Value::Any(value) => Some(value),
            _ => None
        }
    }

    pub fn as_open(&self) -> Option<&OpenValue> {
        match self {
            Value::Open(value) => Some(value),
            _ => None
        }
    }

    /// Returns the component with the given name.
    ///
    /// This is a shortcut for getting the components and then looking up
    /// the name. Returns `None` if the value doesn’t have components or the
    /// component is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_components().and_then(|components| components.get(name))
    }

    /// Returns the position the component with the given name started at.
    ///
    /// See [`Components::pos`] for when this is `None`.
    pub fn pos(&self, name: &str) -> Option<Pos> {
        self.as_components().and_then(|components| components.pos(name))
    }

    /// Returns a value for displaying the value as a tree.
    ///
    /// The schema must be the one the value was decoded with. It provides
    /// the type names.
    pub fn display<'a>(&'a self, schema: &'a Schema) -> DisplayValue<'a> {
        DisplayValue { value: self, schema }
    }
}


//------------ Components ----------------------------------------------------

/// The components of a SEQUENCE or SET value.
///
/// Components are kept in the order the schema declares them. Absent
/// optional components are missing, absent components with a default value
/// are present with that value.
///
/// Components produced by decoding remember where in the data they
/// started. Positions are ignored when comparing components.
#[derive(Clone, Debug, Default)]
pub struct Components(Vec<(&'static str, Value, Option<Pos>)>);

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component.
    pub fn push(&mut self, name: &'static str, value: Value) {
        self.0.push((name, value, None))
    }

    /// Adds a component that was decoded at the given position.
    pub fn push_at(&mut self, name: &'static str, value: Value, pos: Pos) {
        self.0.push((name, value, Some(pos)))
    }

    /// Adds a component and returns the components.
    pub fn with(mut self, name: &'static str, value: Value) -> Self {
        self.push(name, value);
        self
    }

    /// Returns the component with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|item| item.0 == name).map(|item| &item.1)
    }

    /// Returns where the component with the given name was decoded from.
    ///
    /// Returns `None` if the component is missing, was synthesized from
    /// its default, or was added by hand.
    pub fn pos(&self, name: &str) -> Option<Pos> {
        self.0.iter().find(|item| item.0 == name).and_then(|item| item.2)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over names and values of the components.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.0.iter().map(|(name, value, _)| (*name, value))
    }
}

impl PartialEq for Components {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Components { }

impl FromIterator<(&'static str, Value)> for Components {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (&'static str, Value)> {
        Components(
            iter.into_iter().map(|(name, value)| (name, value, None)).collect()
        )
    }
}


//------------ Choice --------------------------------------------------------

/// The chosen alternative of a CHOICE value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    /// The name of the alternative.
    pub alternative: &'static str,

    /// The value of the alternative.
    pub value: Box<Value>,
}

impl Choice {
    pub fn new(alternative: &'static str, value: Value) -> Self {
        Choice { alternative, value: Box::new(value) }
    }
}


//------------ OpenValue -----------------------------------------------------

/// A value of an open type.
///
/// The value always keeps the complete encoding it was decoded from. If
/// the discriminator was found in the registry in effect during decoding,
/// it also carries the value decoded according to the registered schema.
#[derive(Clone, Debug)]
pub struct OpenValue {
    raw: Captured,
    resolved: Option<Resolved>,
}

/// An open type value decoded according to the schema bound to its
/// discriminator.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub schema: &'static Schema,
    pub value: Box<Value>,
}

impl OpenValue {
    /// Creates an unresolved open value.
    pub fn opaque(raw: Captured) -> Self {
        OpenValue { raw, resolved: None }
    }

    /// Creates a resolved open value.
    ///
    /// The caller is responsible for `raw` being the encoding of `value`
    /// under `schema`.
    pub fn resolved(
        raw: Captured, schema: &'static Schema, value: Value
    ) -> Self {
        OpenValue {
            raw,
            resolved: Some(Resolved { schema, value: Box::new(value) })
        }
    }

    /// Creates a resolved open value by encoding a value.
    pub fn encode(
        schema: &'static Schema, value: Value
    ) -> Result<Self, crate::encode::EncodeError> {
        let raw = crate::schema::encode(schema, &value)?;
        let raw = Captured::from_bytes(raw.into()).map_err(|_| {
            crate::encode::EncodeError::Mismatch { schema: schema.name() }
        })?;
        Ok(Self::resolved(raw, schema, value))
    }

    /// Returns the complete encoding of the value.
    pub fn raw(&self) -> &Captured {
        &self.raw
    }

    /// Returns the resolved value if there is one.
    pub fn resolved_value(&self) -> Option<&Value> {
        self.resolved.as_ref().map(|res| res.value.as_ref())
    }

    /// Returns schema and value if the open value was resolved.
    pub fn resolution(&self) -> Option<&Resolved> {
        self.resolved.as_ref()
    }

    /// Converts the open value into its resolved value if there is one.
    pub fn into_resolved_value(self) -> Option<Value> {
        self.resolved.map(|res| *res.value)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

impl PartialEq for OpenValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
            && self.resolved_value() == other.resolved_value()
    }
}

impl Eq for OpenValue { }


//------------ DisplayValue --------------------------------------------------

/// A helper type for displaying a value as an indented tree.
pub struct DisplayValue<'a> {
    value: &'a Value,
    schema: &'a Schema,
}

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:", self.schema.name())?;
        write_tree(f, self.value, self.schema, 1)
    }
}

fn write_tree(
    f: &mut fmt::Formatter, value: &Value, schema: &Schema, indent: usize
) -> fmt::Result {
    let schema = schema.untagged();
    match (value, schema) {
        (Value::Constructed(components), Schema::Sequence(structure))
        | (Value::Constructed(components), Schema::Set(structure)) => {
            for (name, item) in components.iter() {
                let field = structure.fields.iter().find(|field| {
                    field.name == name
                });
                match field {
                    Some(field) => {
                        write_item(f, name, item, field.schema, indent)?
                    }
                    None => {
                        writeln!(f, "{:indent$}{}=<unknown>", "", name)?
                    }
                }
            }
            Ok(())
        }
        (Value::List(items), Schema::SequenceOf(collection))
        | (Value::List(items), Schema::SetOf(collection)) => {
            for item in items {
                write_item(f, "-", item, collection.element, indent)?;
            }
            Ok(())
        }
        (Value::Choice(choice), Schema::Choice(choice_type)) => {
            match choice_type.alternative(choice.alternative) {
                Some(alt) => {
                    write_item(
                        f, choice.alternative, &choice.value, alt.schema,
                        indent
                    )
                }
                None => writeln!(f, "{:indent$}<unknown>", ""),
            }
        }
        (Value::Open(open), _) => {
            match open.resolution() {
                Some(res) => write_tree(f, &res.value, res.schema, indent),
                None => writeln!(f, "{:indent$}{}", "", Leaf(value)),
            }
        }
        _ => writeln!(f, "{:indent$}{}", "", Leaf(value)),
    }
}

fn write_item(
    f: &mut fmt::Formatter, name: &str, value: &Value, schema: &Schema,
    indent: usize,
) -> fmt::Result {
    if is_leaf(value) {
        writeln!(f, "{:indent$}{}={}", "", name, Leaf(value))
    }
    else {
        let type_name = match value {
            Value::Open(open) => {
                match open.resolution() {
                    Some(res) => res.schema.name(),
                    None => "ANY",
                }
            }
            _ => schema.name()
        };
        writeln!(f, "{:indent$}{}={}:", "", name, type_name)?;
        write_tree(f, value, schema, indent + 1)
    }
}

fn is_leaf(value: &Value) -> bool {
    match value {
        Value::Constructed(_) | Value::List(_) | Value::Choice(_) => false,
        Value::Open(open) => {
            open.resolved_value().map(is_leaf).unwrap_or(true)
        }
        _ => true
    }
}

/// Displays a primitive value on a single line.
struct Leaf<'a>(&'a Value);

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Value::Boolean(value) => {
                f.write_str(if *value { "TRUE" } else { "FALSE" })
            }
            Value::Integer(value) => write!(f, "{}", value),
            Value::BitString(value) => {
                write!(f, "'")?;
                for bit in 0..value.bit_len() {
                    f.write_str(if value.bit(bit) { "1" } else { "0" })?;
                }
                write!(f, "'B")
            }
            Value::OctetString(value) => write_hex(f, value),
            Value::Null => f.write_str("NULL"),
            Value::Oid(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{:?}", value.as_str()),
            Value::Time(value) => write!(f, "{}", value),
            Value::Any(value) => write_hex(f, value.as_slice()),
            Value::Open(open) => {
                match open.resolved_value() {
                    Some(value) => Leaf(value).fmt(f),
                    None => write_hex(f, open.raw().as_slice()),
                }
            }
            Value::Constructed(_) | Value::List(_) | Value::Choice(_) => {
                f.write_str("...")
            }
        }
    }
}

fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    f.write_str("0x")?;
    for octet in data {
        write!(f, "{:02x}", octet)?;
    }
    Ok(())
}


//============ Tests =========================================================
