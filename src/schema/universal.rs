//! Schemas for the universal types.
//!
//! These are the building blocks for schemas of constructed types.

use crate::primitive::PrimitiveType;
use crate::string::CharSet;
use crate::time::TimeKind;
use super::Schema;


pub static BOOLEAN: Schema = Schema::primitive(PrimitiveType::Boolean);
pub static INTEGER: Schema = Schema::primitive(PrimitiveType::Integer);
pub static BIT_STRING: Schema = Schema::primitive(PrimitiveType::BitString);
pub static OCTET_STRING: Schema = Schema::primitive(
    PrimitiveType::OctetString
);
pub static NULL: Schema = Schema::primitive(PrimitiveType::Null);
pub static OID: Schema = Schema::primitive(PrimitiveType::Oid);

pub static UTF8_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Utf8)
);
pub static PRINTABLE_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Printable)
);
pub static IA5_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Ia5)
);
pub static NUMERIC_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Numeric)
);
pub static VISIBLE_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Visible)
);
pub static BMP_STRING: Schema = Schema::primitive(
    PrimitiveType::String(CharSet::Bmp)
);

pub static UTC_TIME: Schema = Schema::primitive(
    PrimitiveType::Time(TimeKind::Utc)
);
pub static GENERALIZED_TIME: Schema = Schema::primitive(
    PrimitiveType::Time(TimeKind::Generalized)
);

pub static ANY: Schema = Schema::Any;
