#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use cmsder::{DecodeOptions, Registry};
use cmsder::cms::{parse_content_info_with, parse_signed_data};
use cmsder::verify::check_resolved_round_trip;

fuzz_target!(|data: &[u8]| {
    let data = Bytes::copy_from_slice(data);
    let options = DecodeOptions::default().with_max_depth(16);

    if let Ok(info) = parse_content_info_with(
        data.clone(), Registry::standard(), &options
    ) {
        assert_eq!(info.encode().unwrap(), data);
        check_resolved_round_trip(info.value()).unwrap();
        let _ = parse_signed_data(&info);
    }

    if let Ok(info) = parse_content_info_with(
        data.clone(), Registry::standard(), &DecodeOptions::opaque()
    ) {
        assert_eq!(info.encode().unwrap(), data);
    }
});
