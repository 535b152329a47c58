#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use cmsder::{Integer, Value};
use cmsder::primitive::{PrimitiveType, decode_primitive, encode_primitive};

fuzz_target!(|data: &[u8]| {
    let value = match decode_primitive(
        PrimitiveType::Integer, Bytes::copy_from_slice(data)
    ) {
        Ok(value) => value,
        Err(_) => return
    };
    assert_eq!(encode_primitive(&value).unwrap(), data);

    if let Value::Integer(ref int) = value {
        if let Some(res) = int.to_i64() {
            assert_eq!(Integer::from_i64(res), *int);
        }
        if let Some(res) = int.to_u64() {
            assert_eq!(Integer::from_u64(res), *int);
        }
    }
});
