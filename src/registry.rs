//! Bindings of open type discriminators to schemas.
//!
//! A [`Registry`] maps object identifiers to the [`Schema`] that values of
//! open types discriminated by them are to be decoded with. Bindings are
//! kept separately per [`Domain`].
//!
//! Registries are built once and then only read. The registry used by
//! default, [`Registry::standard`], contains the bindings of CMS itself
//! overlaid with those of the Enhanced Security Services. Applications with
//! their own content types or attributes create a registry with their
//! bindings and [`extend`] the standard registry with it.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;
use crate::captured::Captured;
use crate::decode::{DecodeError, DecodeOptions, Pos};
use crate::oid::Oid;
use crate::schema::{Decoder, Domain, Schema};
use crate::value::Value;


//------------ Registry ------------------------------------------------------

/// A set of open type bindings.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    bindings: HashMap<Domain, HashMap<Oid, &'static Schema>>,
}

impl Registry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the standard registry.
    ///
    /// This registry contains the CMS bindings of [`cms::registry`]
    /// overlaid with the ESS bindings of [`ess::overlay`]. It is created
    /// when first used.
    ///
    /// [`cms::registry`]: crate::cms::registry
    /// [`ess::overlay`]: crate::ess::overlay
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            extend(&crate::cms::registry(), &crate::ess::overlay())
        })
    }

    /// Binds an object identifier to a schema.
    ///
    /// Returns the schema previously bound to the identifier, if any.
    pub fn insert(
        &mut self,
        domain: Domain,
        oid: impl Into<Oid>,
        schema: &'static Schema,
    ) -> Option<&'static Schema> {
        self.bindings.entry(domain).or_default().insert(oid.into(), schema)
    }

    /// Adds a binding and returns the registry.
    pub fn with(
        mut self,
        domain: Domain,
        oid: impl Into<Oid>,
        schema: &'static Schema,
    ) -> Self {
        self.insert(domain, oid, schema);
        self
    }

    /// Returns the schema bound to an object identifier.
    pub fn get(
        &self, domain: Domain, oid: &impl AsRef<[u8]>
    ) -> Option<&'static Schema> {
        self.bindings.get(&domain)?.get(oid.as_ref()).copied()
    }

    /// Returns whether the object identifier is bound in the domain.
    pub fn contains(&self, domain: Domain, oid: &impl AsRef<[u8]>) -> bool {
        self.get(domain, oid).is_some()
    }

    /// Returns the number of bindings across all domains.
    pub fn len(&self) -> usize {
        self.bindings.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all bindings of a domain.
    pub fn iter(
        &self, domain: Domain
    ) -> impl Iterator<Item = (&Oid, &'static Schema)> + '_ {
        self.bindings.get(&domain).into_iter().flat_map(|map| {
            map.iter().map(|(oid, schema)| (oid, *schema))
        })
    }
}


//------------ extend --------------------------------------------------------

/// Creates a registry from a base registry and an overlay.
///
/// The new registry contains all bindings of both registries. If both bind
/// the same object identifier in the same domain, the binding of the
/// overlay is used.
pub fn extend(base: &Registry, overlay: &Registry) -> Registry {
    let mut res = base.clone();
    for (domain, bindings) in &overlay.bindings {
        for (oid, &schema) in bindings {
            if let Some(old) = res.insert(*domain, oid.clone(), schema) {
                debug!(
                    ?domain, %oid, old = old.name(), new = schema.name(),
                    "overlay replaces binding"
                );
            }
        }
    }
    res
}


//------------ resolve -------------------------------------------------------

/// Resolves the value of an open type.
///
/// Looks up `discriminator` in `domain` of the registry and, if found,
/// decodes `opaque` with the bound schema. Open types nested in the value
/// are resolved, too.
///
/// If the discriminator is not bound, returns `Ok(None)` unless the options
/// require all open types to be resolved, in which case an
/// [`UnknownOpenType`] error is returned. If the value cannot be decoded
/// with the bound schema, an [`OpenTypeDecodeFailure`] error is returned
/// with the decoding error as its source. Positions in errors are relative
/// to the start of `opaque`.
///
/// [`UnknownOpenType`]: crate::decode::ErrorKind::UnknownOpenType
/// [`OpenTypeDecodeFailure`]: crate::decode::ErrorKind::OpenTypeDecodeFailure
pub fn resolve(
    registry: &Registry,
    domain: Domain,
    discriminator: &Oid,
    opaque: &Captured,
    options: &DecodeOptions,
) -> Result<Option<Value>, DecodeError> {
    Decoder::new(registry, options).resolve(
        domain, discriminator, opaque.clone(), Pos::default()
    ).map(|open| open.into_resolved_value())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use crate::decode::ErrorKind;
    use crate::schema::universal::{INTEGER, OCTET_STRING, OID};

    fn oid(s: &str) -> Oid {
        s.parse().unwrap()
    }

    fn captured(data: &'static [u8]) -> Captured {
        Captured::from_bytes(Bytes::from_static(data)).unwrap()
    }

    #[test]
    fn overlay_wins() {
        let base = Registry::new()
            .with(Domain::Attribute, oid("1.2.3"), &INTEGER)
            .with(Domain::Attribute, oid("1.2.4"), &OID);
        let overlay = Registry::new()
            .with(Domain::Attribute, oid("1.2.3"), &OCTET_STRING)
            .with(Domain::ContentType, oid("1.2.3"), &INTEGER);
        let merged = extend(&base, &overlay);
        assert_eq!(merged.len(), 3);
        assert!(std::ptr::eq(
            merged.get(Domain::Attribute, &oid("1.2.3")).unwrap(),
            &OCTET_STRING
        ));
        assert!(std::ptr::eq(
            merged.get(Domain::Attribute, &oid("1.2.4")).unwrap(), &OID
        ));
        assert!(merged.contains(Domain::ContentType, &oid("1.2.3")));
        assert!(!merged.contains(Domain::ContentType, &oid("1.2.4")));

        // The base is left alone.
        assert!(std::ptr::eq(
            base.get(Domain::Attribute, &oid("1.2.3")).unwrap(), &INTEGER
        ));
    }

    #[test]
    fn resolve_values() {
        let registry = Registry::new()
            .with(Domain::Attribute, oid("1.2.3"), &INTEGER);
        let options = DecodeOptions::default();
        assert_eq!(
            resolve(
                &registry, Domain::Attribute, &oid("1.2.3"),
                &captured(b"\x02\x01\x07"), &options
            ).unwrap(),
            Some(Value::Integer(crate::int::Integer::from_i64(7)))
        );
        assert_eq!(
            resolve(
                &registry, Domain::Attribute, &oid("1.2.5"),
                &captured(b"\x02\x01\x07"), &options
            ).unwrap(),
            None
        );
        assert_eq!(
            resolve(
                &registry, Domain::ContentType, &oid("1.2.3"),
                &captured(b"\x02\x01\x07"), &DecodeOptions::require_all()
            ).unwrap_err().kind(),
            ErrorKind::UnknownOpenType
        );
        let err = resolve(
            &registry, Domain::Attribute, &oid("1.2.3"),
            &captured(b"\x04\x01\x07"), &options
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenTypeDecodeFailure);
        assert_eq!(
            err.inner().map(DecodeError::kind),
            Some(ErrorKind::SchemaMismatch)
        );
    }

    #[test]
    fn standard_registry() {
        let registry = Registry::standard();
        assert!(registry.contains(
            Domain::ContentType, &crate::cms::oid::SIGNED_DATA
        ));
        assert!(registry.contains(
            Domain::ContentType, &crate::ess::oid::CT_RECEIPT
        ));
        assert!(registry.contains(
            Domain::Attribute, &crate::cms::oid::MESSAGE_DIGEST
        ));
        assert!(registry.contains(
            Domain::Attribute, &crate::ess::oid::AA_SIGNING_CERTIFICATE_V2
        ));
        assert_eq!(registry.iter(Domain::ContentType).count(), 3);
    }
}
