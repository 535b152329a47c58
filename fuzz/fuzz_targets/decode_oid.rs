#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use cmsder::{ConstOid, Oid, Value};
use cmsder::primitive::{PrimitiveType, decode_primitive, encode_primitive};

pub const SHA256: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 1]);

fuzz_target!(|data: &[u8]| {
    let value = match decode_primitive(
        PrimitiveType::Oid, Bytes::copy_from_slice(data)
    ) {
        Ok(value) => value,
        Err(_) => return
    };
    assert_eq!(encode_primitive(&value).unwrap(), data);

    if let Value::Oid(ref oid) = value {
        let dotted = oid.to_string();
        assert_eq!(dotted.parse::<Oid>().unwrap(), *oid);
        assert_eq!(oid.components().count(), dotted.split('.').count());
        if *oid == SHA256 {
            assert_eq!(dotted, "2.16.840.1.101.3.4.2.1");
        }
    }
});
