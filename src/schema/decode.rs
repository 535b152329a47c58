//! Decoding data according to a schema.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::cmp::Ordering;
use bytes::Bytes;
use smallvec::SmallVec;
use tracing::{debug, trace};
use crate::captured::Captured;
use crate::decode::{
    DecodeError, DecodeOptions, ErrorKind, OpenTypes, Pos, SetOrder, Source,
    Tlv,
};
use crate::oid::Oid;
use crate::registry::Registry;
use crate::value::{Choice, Components, OpenValue, Value};
use super::{
    ChoiceType, Collection, Domain, Field, OpenType, Presence, Schema, Size,
    Structure, set_of_cmp,
};


//------------ decode and decode_prefix --------------------------------------

/// Decodes data containing exactly one value of the given schema.
///
/// Open types are resolved through `registry` as directed by `options`.
/// If there is data left after the value, a
/// [`TrailingData`][ErrorKind::TrailingData] error is returned.
pub fn decode(
    schema: &'static Schema,
    data: Bytes,
    registry: &Registry,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    decode_at(schema, data, Pos::default(), registry, options)
}

/// Decodes data that was taken from a larger buffer at position `pos`.
///
/// This is [`decode`] with error positions and the positions kept in the
/// value relative to the larger buffer.
pub fn decode_at(
    schema: &'static Schema,
    data: Bytes,
    pos: Pos,
    registry: &Registry,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let mut source = Source::with_pos(data, pos);
    let value = decode_prefix(schema, &mut source, registry, options)?;
    source.check_exhausted()?;
    Ok(value)
}

/// Decodes a value of the given schema from the beginning of a source.
///
/// Any data following the value is left in the source.
pub fn decode_prefix(
    schema: &'static Schema,
    source: &mut Source,
    registry: &Registry,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    if let Some(max_len) = options.max_len {
        if source.remaining().len() > max_len {
            return Err(DecodeError::new(
                ErrorKind::ResourceLimitExceeded,
                format!("input exceeds {} octets", max_len), source.pos()
            ))
        }
    }
    Decoder::new(registry, options).decode_value(schema, source)
}


//------------ Decoder -------------------------------------------------------

/// The state of a single decoding run.
pub(crate) struct Decoder<'a> {
    registry: &'a Registry,
    options: &'a DecodeOptions,

    /// The object identifier components of the enclosing SEQUENCEs and SETs.
    ///
    /// Open types find their discriminator here. Each constructed value
    /// truncates the stack back to where it started when it is done.
    scope: SmallVec<[(&'static str, Oid); 8]>,

    /// The current nesting depth.
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(
        registry: &'a Registry, options: &'a DecodeOptions
    ) -> Self {
        Decoder { registry, options, scope: SmallVec::new(), depth: 0 }
    }

    /// Decodes the next value from the source.
    fn decode_value(
        &mut self, schema: &'static Schema, source: &mut Source
    ) -> Result<Value, DecodeError> {
        if let Schema::Choice(ref choice) = *schema {
            return self.decode_choice(choice, source)
        }
        let tlv = source.take_tlv()?;
        if !schema.matches(tlv.tag()) {
            return Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                format!("expected {}, found {}", schema.name(), tlv.tag()),
                tlv.start()
            ))
        }
        self.decode_tlv(schema, tlv)
    }

    fn decode_choice(
        &mut self, choice: &'static ChoiceType, source: &mut Source
    ) -> Result<Value, DecodeError> {
        let pos = source.pos();
        let tag = source.peek_tag()?.ok_or_else(|| {
            DecodeError::new(
                ErrorKind::TruncatedInput,
                format!("missing value of {}", choice.name), pos
            )
        })?;
        let alt = choice.alternative_for_tag(tag).ok_or_else(|| {
            DecodeError::new(
                ErrorKind::UnknownChoiceVariant,
                format!("{} has no alternative for {}", choice.name, tag), pos
            )
        })?;
        let value = self.decode_value(alt.schema, source)?;
        Ok(Value::Choice(Choice::new(alt.name, value)))
    }

    /// Decodes a value whose tag has already been checked.
    fn decode_tlv(
        &mut self, schema: &'static Schema, tlv: Tlv
    ) -> Result<Value, DecodeError> {
        match *schema {
            Schema::Primitive(ty) => {
                tlv.check_primitive()?;
                ty.decode_content(tlv.content(), tlv.start())
            }
            Schema::Sequence(ref structure) => {
                self.nested(&tlv, structure.name, |this, source| {
                    this.decode_sequence(structure, source)
                })
            }
            Schema::Set(ref structure) => {
                self.nested(&tlv, structure.name, |this, source| {
                    this.decode_set(structure, source)
                })
            }
            Schema::SequenceOf(ref collection) => {
                self.nested(&tlv, collection.name, |this, source| {
                    this.decode_list(collection, source, false)
                })
            }
            Schema::SetOf(ref collection) => {
                self.nested(&tlv, collection.name, |this, source| {
                    this.decode_list(collection, source, true)
                })
            }
            Schema::Explicit(_, inner) => {
                self.nested(&tlv, inner.name(), |this, source| {
                    this.decode_value(inner, source)
                })
            }
            Schema::Implicit(_, inner) => {
                let inner = inner.follow_tags(false).ok_or_else(|| {
                    DecodeError::new(
                        ErrorKind::SchemaMismatch,
                        "implicit tags don’t end in a type", tlv.start()
                    )
                })?;
                match *inner {
                    Schema::Choice(_) | Schema::Open(_) => {
                        Err(DecodeError::new(
                            ErrorKind::SchemaMismatch,
                            format!(
                                "{} can’t be tagged implicitly", inner.name()
                            ),
                            tlv.start()
                        ))
                    }
                    _ => self.decode_tlv(inner, tlv)
                }
            }
            Schema::Any => Ok(Value::Any(Captured::from_tlv(tlv))),
            Schema::Open(ref open) => self.decode_open(open, tlv),
            Schema::Choice(ref choice) => {
                // Only reachable through implicit tagging which is
                // rejected above.
                Err(DecodeError::new(
                    ErrorKind::SchemaMismatch,
                    format!("unexpected tag for {}", choice.name),
                    tlv.start()
                ))
            }
        }
    }

    /// Decodes the content of a constructed value.
    fn nested<F>(
        &mut self, tlv: &Tlv, name: &'static str, op: F
    ) -> Result<Value, DecodeError>
    where F: FnOnce(&mut Self, &mut Source) -> Result<Value, DecodeError> {
        tlv.check_constructed()?;
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::new(
                ErrorKind::ResourceLimitExceeded,
                format!("nesting deeper than {}", self.options.max_depth),
                tlv.start()
            ))
        }
        self.depth += 1;
        let mut source = tlv.content_source();
        let res = op(self, &mut source);
        self.depth -= 1;
        let value = res?;
        if !source.is_empty() {
            return Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                format!("unexpected trailing component in {}", name),
                source.pos()
            ))
        }
        Ok(value)
    }

    fn decode_sequence(
        &mut self, structure: &'static Structure, source: &mut Source
    ) -> Result<Value, DecodeError> {
        let scope_len = self.scope.len();
        let res = self.decode_sequence_fields(structure, source);
        self.scope.truncate(scope_len);
        res
    }

    fn decode_sequence_fields(
        &mut self, structure: &'static Structure, source: &mut Source
    ) -> Result<Value, DecodeError> {
        let mut components = Components::new();
        for field in structure.fields {
            let tag = source.peek_tag()?;
            let present = tag.map(|tag| field.schema.matches(tag));
            if present != Some(true) {
                match field.presence {
                    Presence::Required => {
                        if tag.is_none() {
                            return Err(missing(structure, field, source))
                        }
                        // Fall through to let decoding report the
                        // mismatch.
                    }
                    Presence::Optional => continue,
                    Presence::Default(default) => {
                        components.push(field.name, default());
                        continue
                    }
                }
            }
            let pos = source.pos();
            let value = self.decode_value(field.schema, source)?;
            check_default(field, &value, pos)?;
            self.enter_scope(field.name, &value);
            components.push_at(field.name, value, pos);
        }
        Ok(Value::Constructed(components))
    }

    fn decode_set(
        &mut self, structure: &'static Structure, source: &mut Source
    ) -> Result<Value, DecodeError> {
        let scope_len = self.scope.len();
        let res = self.decode_set_fields(structure, source);
        self.scope.truncate(scope_len);
        res
    }

    fn decode_set_fields(
        &mut self, structure: &'static Structure, source: &mut Source
    ) -> Result<Value, DecodeError> {
        let mut found: Vec<Option<(Value, Pos)>> = vec![
            None; structure.fields.len()
        ];
        let mut last_tag = None;
        while let Some(tag) = source.peek_tag()? {
            let pos = source.pos();
            let idx = structure.fields.iter().position(|field| {
                field.schema.matches(tag)
            }).ok_or_else(|| {
                DecodeError::new(
                    ErrorKind::SchemaMismatch,
                    format!("unexpected {} in {}", tag, structure.name), pos
                )
            })?;
            if found[idx].is_some() {
                return Err(DecodeError::new(
                    ErrorKind::SchemaMismatch,
                    format!(
                        "duplicate {} in {}",
                        structure.fields[idx].name, structure.name
                    ),
                    pos
                ))
            }
            if let Some(last) = last_tag {
                if tag.canonical_cmp(last) != Ordering::Greater {
                    self.misordered(structure.name, pos)?;
                }
            }
            last_tag = Some(tag);
            let field = &structure.fields[idx];
            let value = self.decode_value(field.schema, source)?;
            check_default(field, &value, pos)?;
            self.enter_scope(field.name, &value);
            found[idx] = Some((value, pos));
        }

        let mut components = Components::new();
        for (field, value) in structure.fields.iter().zip(found) {
            match (value, field.presence) {
                (Some((value, pos)), _) => {
                    components.push_at(field.name, value, pos)
                }
                (None, Presence::Required) => {
                    return Err(missing(structure, field, source))
                }
                (None, Presence::Optional) => { }
                (None, Presence::Default(default)) => {
                    components.push(field.name, default())
                }
            }
        }
        Ok(Value::Constructed(components))
    }

    fn decode_list(
        &mut self,
        collection: &'static Collection,
        source: &mut Source,
        is_set: bool,
    ) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        let mut last: Option<Bytes> = None;
        while !source.is_empty() {
            let pos = source.pos();
            let before = source.as_bytes().clone();
            items.push(self.decode_value(collection.element, source)?);
            if is_set {
                let encoded = before.slice(
                    ..before.len() - source.remaining().len()
                );
                if let Some(last) = last.as_ref() {
                    if set_of_cmp(last, &encoded) == Ordering::Greater {
                        self.misordered(collection.name, pos)?;
                    }
                }
                last = Some(encoded);
            }
        }
        if collection.size == Size::NonEmpty && items.is_empty() {
            return Err(DecodeError::new(
                ErrorKind::SchemaMismatch,
                format!("empty {}", collection.name), source.pos()
            ))
        }
        Ok(Value::List(items))
    }

    fn decode_open(
        &mut self, open: &OpenType, tlv: Tlv
    ) -> Result<Value, DecodeError> {
        let pos = tlv.start();
        let raw = Captured::from_tlv(tlv);
        if self.options.open_types == OpenTypes::Opaque {
            return Ok(Value::Open(OpenValue::opaque(raw)))
        }
        let key = self.discriminator(open.key).ok_or_else(|| {
            DecodeError::new(
                ErrorKind::SchemaMismatch,
                format!("missing discriminator {} of open type", open.key),
                pos
            )
        })?;
        self.resolve(open.domain, &key, raw, pos).map(Value::Open)
    }

    /// Resolves the value of an open type.
    ///
    /// If the discriminator isn’t registered for the domain, the value is
    /// kept opaque unless the options require resolution.
    pub(crate) fn resolve(
        &mut self, domain: Domain, key: &Oid, raw: Captured, pos: Pos
    ) -> Result<OpenValue, DecodeError> {
        let schema = match self.registry.get(domain, key) {
            Some(schema) => schema,
            None => {
                if self.options.open_types == OpenTypes::Require {
                    return Err(DecodeError::new(
                        ErrorKind::UnknownOpenType,
                        format!("no {:?} binding for {}", domain, key), pos
                    ))
                }
                debug!(?domain, %key, "unregistered open type kept opaque");
                return Ok(OpenValue::opaque(raw))
            }
        };
        trace!(?domain, %key, schema = schema.name(), "resolving open type");
        let mut source = raw.source(pos);
        let res = self.decode_value(schema, &mut source).and_then(|value| {
            source.check_exhausted()?;
            Ok(value)
        });
        match res {
            Ok(value) => Ok(OpenValue::resolved(raw, schema, value)),
            Err(err) if passes_through(&err) => Err(err),
            Err(err) => {
                Err(DecodeError::with_source(
                    ErrorKind::OpenTypeDecodeFailure,
                    format!("value for {} is not a valid {}", key, schema.name()),
                    pos, err
                ))
            }
        }
    }

    fn enter_scope(&mut self, name: &'static str, value: &Value) {
        if let Value::Oid(oid) = value {
            self.scope.push((name, oid.clone()))
        }
    }

    fn discriminator(&self, key: &str) -> Option<Oid> {
        self.scope.iter().rev().find(|item| item.0 == key).map(|item| {
            item.1.clone()
        })
    }

    fn misordered(
        &self, name: &'static str, pos: Pos
    ) -> Result<(), DecodeError> {
        match self.options.set_order {
            SetOrder::Strict => {
                Err(DecodeError::new(
                    ErrorKind::NonCanonicalEncoding,
                    format!("members of {} not in canonical order", name),
                    pos
                ))
            }
            SetOrder::Relaxed => {
                debug!(%pos, name, "accepted non-canonical member order");
                Ok(())
            }
        }
    }
}


//------------ Helper Functions ----------------------------------------------

fn missing(
    structure: &Structure, field: &Field, source: &Source
) -> DecodeError {
    DecodeError::new(
        ErrorKind::SchemaMismatch,
        format!("missing {} in {}", field.name, structure.name),
        source.pos()
    )
}

/// Checks that a value is not the default of its field.
fn check_default(
    field: &Field, value: &Value, pos: Pos
) -> Result<(), DecodeError> {
    if let Presence::Default(default) = field.presence {
        if *value == default() {
            return Err(DecodeError::new(
                ErrorKind::NonCanonicalEncoding,
                format!("default value of {} encoded", field.name), pos
            ))
        }
    }
    Ok(())
}

/// Returns whether an error is propagated unchanged out of an open type.
fn passes_through(err: &DecodeError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::ResourceLimitExceeded | ErrorKind::UnknownOpenType
    )
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::SetOrder;
    use crate::ident::Tag;
    use crate::int::Integer;
    use crate::schema::{Alternative, Field};
    use crate::schema::universal::{
        ANY, INTEGER, OCTET_STRING, OID, PRINTABLE_STRING, UTF8_STRING,
    };

    static VERSION: Schema = Schema::sequence("Versioned", &[
        Field::with_default("version", &INTEGER, default_version),
        Field::required("data", &OCTET_STRING),
    ]);

    fn default_version() -> Value {
        Value::Integer(Integer::from_i64(0))
    }

    static INTS: Schema = Schema::sequence_of_non_empty("Ints", &INTEGER);
    static INT_SET: Schema = Schema::set_of("IntSet", &INTEGER);

    static MARK: Schema = Schema::choice("Mark", &[
        Alternative::new("pString", &PRINTABLE_STRING),
        Alternative::new("utf8String", &UTF8_STRING),
    ]);

    static LABEL: Schema = Schema::set("Label", &[
        Field::required("policy", &OID),
        Field::optional("classification", &INTEGER),
        Field::optional("mark", &MARK),
    ]);

    static TAGGED_INT: Schema = Schema::implicit(Tag::CTX_1, &INTEGER);
    static OPT_TAGGED: Schema = Schema::sequence("OptTagged", &[
        Field::optional("a", &TAGGED_INT),
        Field::required("b", &INTEGER),
    ]);

    static OPEN_VALUE: Schema = Schema::open(Domain::Attribute, "type");
    static TYPED: Schema = Schema::sequence("Typed", &[
        Field::required("type", &OID),
        Field::required("value", &OPEN_VALUE),
    ]);

    static ANY_WRAPPED: Schema = Schema::explicit(Tag::CTX_0, &ANY);

    fn run(
        schema: &'static Schema, data: &'static [u8], options: DecodeOptions
    ) -> Result<Value, DecodeError> {
        decode(schema, Bytes::from_static(data), &Registry::new(), &options)
    }

    fn kind(
        schema: &'static Schema, data: &'static [u8]
    ) -> ErrorKind {
        run(schema, data, DecodeOptions::default()).unwrap_err().kind()
    }

    #[test]
    fn default_components() {
        let value = run(
            &VERSION, b"\x30\x03\x04\x01\xaa", DecodeOptions::default()
        ).unwrap();
        assert_eq!(value.get("version"), Some(&default_version()));
        let value = run(
            &VERSION, b"\x30\x06\x02\x01\x01\x04\x01\xaa",
            DecodeOptions::default()
        ).unwrap();
        assert_eq!(
            value.get("version"),
            Some(&Value::Integer(Integer::from_i64(1)))
        );
        assert_eq!(
            kind(&VERSION, b"\x30\x06\x02\x01\x00\x04\x01\xaa"),
            ErrorKind::NonCanonicalEncoding
        );
    }

    #[test]
    fn sequence_mismatch() {
        assert_eq!(
            kind(&VERSION, b"\x30\x02\x05\x00"),
            ErrorKind::SchemaMismatch
        );
        assert_eq!(kind(&VERSION, b"\x30\x00"), ErrorKind::SchemaMismatch);
        assert_eq!(
            kind(&VERSION, b"\x30\x05\x04\x01\xaa\x05\x00"),
            ErrorKind::SchemaMismatch
        );
        assert_eq!(
            kind(&VERSION, b"\x31\x03\x04\x01\xaa"),
            ErrorKind::SchemaMismatch
        );
        assert_eq!(
            kind(&VERSION, b"\x30\x03\x04\x01\xaa\x00"),
            ErrorKind::TrailingData
        );
    }

    #[test]
    fn optional_implicit() {
        let value = run(
            &OPT_TAGGED, b"\x30\x06\x81\x01\x05\x02\x01\x06",
            DecodeOptions::default()
        ).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Integer(Integer::from_i64(5))));
        let value = run(
            &OPT_TAGGED, b"\x30\x03\x02\x01\x06", DecodeOptions::default()
        ).unwrap();
        assert_eq!(value.get("a"), None);
    }

    #[test]
    fn non_empty_sequence_of() {
        assert_eq!(kind(&INTS, b"\x30\x00"), ErrorKind::SchemaMismatch);
        let value = run(
            &INTS, b"\x30\x03\x02\x01\x01", DecodeOptions::default()
        ).unwrap();
        assert_eq!(value.as_list().map(|list| list.len()), Some(1));
    }

    #[test]
    fn set_of_order() {
        let sorted = b"\x31\x06\x02\x01\x01\x02\x01\x02";
        let unsorted = b"\x31\x06\x02\x01\x02\x02\x01\x01";
        assert!(run(&INT_SET, sorted, DecodeOptions::default()).is_ok());
        assert_eq!(kind(&INT_SET, unsorted), ErrorKind::NonCanonicalEncoding);
        let relaxed = DecodeOptions::default()
            .with_set_order(SetOrder::Relaxed);
        assert_eq!(
            run(&INT_SET, unsorted, relaxed).unwrap().as_list()
                .map(|list| list.len()),
            Some(2)
        );
        // Shorter encodings are padded with zeros for comparison.
        assert!(run(
            &INT_SET, b"\x31\x07\x02\x01\x01\x02\x02\x01\x00",
            DecodeOptions::default()
        ).is_ok());
    }

    #[test]
    fn set_components() {
        // INTEGER, OID, PrintableString is canonical order.
        let data = b"\x31\x0b\x02\x01\x01\x06\x03\x2b\x06\x01\x13\x01\x41";
        let value = run(&LABEL, data, DecodeOptions::default()).unwrap();
        let components = value.as_components().unwrap();
        assert_eq!(
            components.iter().map(|item| item.0).collect::<Vec<_>>(),
            ["policy", "classification", "mark"]
        );
        assert_eq!(
            value.get("mark").and_then(Value::as_choice)
                .map(|choice| choice.alternative),
            Some("pString")
        );

        let swapped = b"\x31\x0b\x06\x03\x2b\x06\x01\x02\x01\x01\x13\x01\x41";
        assert_eq!(kind(&LABEL, swapped), ErrorKind::NonCanonicalEncoding);
        let value = run(
            &LABEL, swapped,
            DecodeOptions::default().with_set_order(SetOrder::Relaxed)
        ).unwrap();
        assert_eq!(
            value.as_components().unwrap().iter().map(|item| item.0)
                .collect::<Vec<_>>(),
            ["policy", "classification", "mark"]
        );

        assert_eq!(
            kind(&LABEL, b"\x31\x03\x02\x01\x01"), ErrorKind::SchemaMismatch
        );
        assert_eq!(
            kind(&LABEL, b"\x31\x08\x06\x03\x2b\x06\x01\x16\x01\x41"),
            ErrorKind::SchemaMismatch
        );
    }

    #[test]
    fn choice() {
        let value = run(&MARK, b"\x0c\x01\x41", DecodeOptions::default())
            .unwrap();
        assert_eq!(
            value.as_choice().map(|choice| choice.alternative),
            Some("utf8String")
        );
        assert_eq!(
            kind(&MARK, b"\x16\x01\x41"), ErrorKind::UnknownChoiceVariant
        );
    }

    #[test]
    fn explicit_any() {
        let value = run(
            &ANY_WRAPPED, b"\xa0\x04\x30\x02\x05\x00",
            DecodeOptions::default()
        ).unwrap();
        assert_eq!(
            value.as_captured().map(Captured::as_slice),
            Some(b"\x30\x02\x05\x00".as_ref())
        );
        assert_eq!(
            kind(&ANY_WRAPPED, b"\x80\x02\x05\x00"), ErrorKind::SchemaMismatch
        );
    }

    #[test]
    fn depth_limit() {
        static NESTED: Schema = Schema::explicit(Tag::CTX_0, &NESTED);
        let data = b"\xa0\x06\xa0\x04\xa0\x02\x05\x00";
        let options = DecodeOptions::default().with_max_depth(2);
        assert_eq!(
            run(&NESTED, data, options).unwrap_err().kind(),
            ErrorKind::ResourceLimitExceeded
        );

        // The same through SEQUENCE.
        static LINKED: Schema = Schema::sequence("Linked", &[
            Field::optional("next", &LINKED),
        ]);
        let data = b"\x30\x08\x30\x06\x30\x04\x30\x02\x30\x00";
        assert!(run(&LINKED, data, DecodeOptions::default()).is_ok());
        let options = DecodeOptions::default().with_max_depth(4);
        let err = run(&LINKED, data, options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLimitExceeded);
        assert_eq!(err.pos(), Pos::from(8));

        static IMPLICIT_LOOP: Schema = Schema::implicit(
            Tag::CTX_1, &IMPLICIT_LOOP
        );
        assert_eq!(
            run(&IMPLICIT_LOOP, b"\x81\x00", DecodeOptions::default())
                .unwrap_err().kind(),
            ErrorKind::SchemaMismatch
        );
        let options = DecodeOptions::default().with_max_len(Some(4));
        assert_eq!(
            run(&INTS, b"\x30\x03\x02\x01\x01", options).unwrap_err().kind(),
            ErrorKind::ResourceLimitExceeded
        );
    }

    #[test]
    fn open_types() {
        static RESOLVED: Schema = Schema::primitive(
            crate::primitive::PrimitiveType::Integer
        );
        let data = b"\x30\x08\x06\x03\x2b\x06\x01\x02\x01\x05";
        let mut registry = Registry::new();
        registry.insert(
            Domain::Attribute, "1.3.6.1".parse::<Oid>().unwrap(), &RESOLVED
        );
        let value = decode(
            &TYPED, Bytes::from_static(data), &registry,
            &DecodeOptions::default()
        ).unwrap();
        let open = value.get("value").and_then(Value::as_open).unwrap();
        assert_eq!(
            open.resolved_value(),
            Some(&Value::Integer(Integer::from_i64(5)))
        );
        assert_eq!(open.raw().as_slice(), b"\x02\x01\x05");

        // Opaque options never resolve.
        let value = decode(
            &TYPED, Bytes::from_static(data), &registry,
            &DecodeOptions::opaque()
        ).unwrap();
        assert!(!value.get("value").and_then(Value::as_open).unwrap()
            .is_resolved()
        );

        // Unknown discriminator.
        let value = run(&TYPED, data, DecodeOptions::default()).unwrap();
        assert!(!value.get("value").and_then(Value::as_open).unwrap()
            .is_resolved()
        );
        assert_eq!(
            run(&TYPED, data, DecodeOptions::require_all()).unwrap_err()
                .kind(),
            ErrorKind::UnknownOpenType
        );

        // Registered but malformed.
        let err = decode(
            &TYPED, Bytes::from_static(b"\x30\x07\x06\x03\x2b\x06\x01\x05\x00"),
            &registry, &DecodeOptions::default()
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenTypeDecodeFailure);
        assert_eq!(err.pos(), Pos::from(7));
        assert_eq!(err.inner().map(|err| err.kind()),
            Some(ErrorKind::SchemaMismatch)
        );
    }
}
