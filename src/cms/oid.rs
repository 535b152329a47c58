//! Object identifiers used by CMS.

use crate::oid::{ConstOid, Oid};


/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-data`.
pub const DATA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 7, 1]);

/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-signedData`.
pub const SIGNED_DATA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 7, 2]);

/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-contentType`.
pub const CONTENT_TYPE: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 3]);

/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-messageDigest`.
pub const MESSAGE_DIGEST: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 4]
);

/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-signingTime`.
pub const SIGNING_TIME: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 5]);

/// [RFC 5652](https://tools.ietf.org/html/rfc5652) `id-countersignature`.
pub const COUNTERSIGNATURE: ConstOid = Oid(
    &[42, 134, 72, 134, 247, 13, 1, 9, 6]
);

/// [RFC 5754](https://tools.ietf.org/html/rfc5754) `id-sha256`.
pub const SHA256: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 1]);


//============ Tests =========================================================
