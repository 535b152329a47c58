//! Encoding values according to a schema.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::captured::Captured;
use crate::decode::Pos;
use crate::encode::{EncodeError, infallible, write_tlv};
use crate::ident::{Ident, Tag};
use crate::value::{Components, Value};
use super::{Collection, Field, Presence, Schema, Size, Structure, set_of_cmp};


//------------ encode and encode_to ------------------------------------------

/// Encodes a value according to a schema in DER.
///
/// Components with a default value are omitted if they are equal to the
/// default, members of SETs and SET OFs are sorted into canonical order.
/// Open values that have been resolved are encoded from their resolved
/// value, all others are written as captured.
pub fn encode(schema: &Schema, value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut target = Vec::new();
    encode_to(schema, value, &mut target)?;
    Ok(target)
}

/// Appends the encoding of a value to a vec.
///
/// If encoding fails, the content of the target is undefined.
pub fn encode_to(
    schema: &Schema, value: &Value, target: &mut Vec<u8>
) -> Result<(), EncodeError> {
    encode_value(schema, value, None, target)
}


//------------ Helper Functions ----------------------------------------------

/// Encodes a value.
///
/// If `tag` is given, it replaces the outermost tag of the schema.
fn encode_value(
    schema: &Schema, value: &Value, tag: Option<Tag>, target: &mut Vec<u8>
) -> Result<(), EncodeError> {
    match *schema {
        Schema::Primitive(ty) => {
            let content = ty.encode_content(value)?;
            write(target, tag.unwrap_or(ty.tag()), false, &content);
        }
        Schema::Sequence(ref structure) => {
            let components = components(structure, value)?;
            let mut content = Vec::new();
            for field in structure.fields {
                if let Some(item) = member(field, components)? {
                    encode_value(field.schema, item, None, &mut content)?;
                }
            }
            write(target, tag.unwrap_or(Tag::SEQUENCE), true, &content);
        }
        Schema::Set(ref structure) => {
            let components = components(structure, value)?;
            let mut members = Vec::new();
            for field in structure.fields {
                if let Some(item) = member(field, components)? {
                    let mut encoded = Vec::new();
                    encode_value(field.schema, item, None, &mut encoded)?;
                    members.push((leading_tag(&encoded)?, encoded));
                }
            }
            members.sort_by(|left, right| left.0.canonical_cmp(right.0));
            let content = members.into_iter().flat_map(|(_, encoded)| {
                encoded
            }).collect::<Vec<_>>();
            write(target, tag.unwrap_or(Tag::SET), true, &content);
        }
        Schema::SequenceOf(ref collection) => {
            let mut content = Vec::new();
            for item in elements(collection, value)? {
                encode_value(collection.element, item, None, &mut content)?;
            }
            write(target, tag.unwrap_or(Tag::SEQUENCE), true, &content);
        }
        Schema::SetOf(ref collection) => {
            let mut members = elements(collection, value)?.iter().map(|item| {
                let mut encoded = Vec::new();
                encode_value(collection.element, item, None, &mut encoded)?;
                Ok(encoded)
            }).collect::<Result<Vec<_>, EncodeError>>()?;
            members.sort_by(|left, right| set_of_cmp(left, right));
            write(target, tag.unwrap_or(Tag::SET), true, &members.concat());
        }
        Schema::Choice(ref choice_type) => {
            let choice = value.as_choice().ok_or(
                EncodeError::Mismatch { schema: choice_type.name }
            )?;
            let alt = choice_type.alternative(choice.alternative).ok_or_else(
                || EncodeError::UnknownAlternative {
                    name: choice.alternative.into()
                }
            )?;
            encode_value(alt.schema, &choice.value, tag, target)?;
        }
        Schema::Explicit(explicit, inner) => {
            check_tag_chain(schema)?;
            let mut content = Vec::new();
            encode_value(inner, value, None, &mut content)?;
            write(target, tag.unwrap_or(explicit), true, &content);
        }
        Schema::Implicit(implicit, inner) => {
            check_tag_chain(schema)?;
            encode_value(inner, value, Some(tag.unwrap_or(implicit)), target)?;
        }
        Schema::Any => {
            let captured = value.as_captured().ok_or(
                EncodeError::Mismatch { schema: "ANY" }
            )?;
            write_captured(captured, tag, target)?;
        }
        Schema::Open(_) => {
            let open = value.as_open().ok_or(
                EncodeError::Mismatch { schema: "ANY DEFINED BY" }
            )?;
            match open.resolution() {
                Some(res) => encode_value(res.schema, &res.value, tag, target)?,
                None => write_captured(open.raw(), tag, target)?,
            }
        }
    }
    Ok(())
}

fn write(target: &mut Vec<u8>, tag: Tag, constructed: bool, content: &[u8]) {
    infallible(write_tlv(target, tag, constructed, content))
}

/// Writes a captured value.
///
/// If there is an implicit tag, the captured value must already have it.
fn write_captured(
    captured: &Captured, tag: Option<Tag>, target: &mut Vec<u8>
) -> Result<(), EncodeError> {
    if let Some(tag) = tag {
        if captured.tag() != Some(tag) {
            return Err(EncodeError::Mismatch { schema: "ANY" })
        }
    }
    target.extend_from_slice(captured.as_slice());
    Ok(())
}

/// Returns the components of a value for a structure.
///
/// Fails if the value has components the structure doesn’t know.
fn components<'a>(
    structure: &Structure, value: &'a Value
) -> Result<&'a Components, EncodeError> {
    let components = value.as_components().ok_or(
        EncodeError::Mismatch { schema: structure.name }
    )?;
    for (name, _) in components.iter() {
        if structure.field(name).is_none() {
            return Err(EncodeError::Mismatch { schema: structure.name })
        }
    }
    Ok(components)
}

/// Returns the value of a component if it needs to be encoded.
fn member<'a>(
    field: &Field, components: &'a Components
) -> Result<Option<&'a Value>, EncodeError> {
    match (components.get(field.name), field.presence) {
        (None, Presence::Required) => {
            Err(EncodeError::MissingComponent { name: field.name })
        }
        (None, _) => Ok(None),
        (Some(value), Presence::Default(default)) if *value == default() => {
            Ok(None)
        }
        (Some(value), _) => Ok(Some(value)),
    }
}

fn elements<'a>(
    collection: &Collection, value: &'a Value
) -> Result<&'a [Value], EncodeError> {
    let items = value.as_list().ok_or(
        EncodeError::Mismatch { schema: collection.name }
    )?;
    if collection.size == Size::NonEmpty && items.is_empty() {
        return Err(EncodeError::Empty { schema: collection.name })
    }
    Ok(items)
}

/// Returns the tag of a member encoded by [`encode_value`].
///
/// The member was written by us or copied from a captured value whose
/// header has been checked, so the identifier octets are always valid.
fn leading_tag(encoded: &[u8]) -> Result<Tag, EncodeError> {
    Ident::parse(encoded, Pos::default()).map(|(ident, _)| {
        ident.tag()
    }).map_err(|_| EncodeError::InvalidValue {
        msg: "SET member with invalid identifier"
    })
}

/// Rejects a tagged schema that tags itself.
fn check_tag_chain(schema: &Schema) -> Result<(), EncodeError> {
    match schema.follow_tags(true) {
        Some(_) => Ok(()),
        None => Err(EncodeError::Mismatch { schema: schema.name() })
    }
}


//============ Tests =========================================================
