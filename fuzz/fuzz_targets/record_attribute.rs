#![no_main]

use libfuzzer_sys::fuzz_target;
use recparams::metadata::record::{RecordAttribute, SchemaVersion};

fuzz_target!(|data: &[u8]| {
    for schema in [SchemaVersion::V1, SchemaVersion::V2, SchemaVersion::V3] {
        if let Ok(attribute) = RecordAttribute::parse(data, schema) {
            let encoded = attribute.to_bytes().unwrap();
            assert_eq!(encoded, data);
        }
    }
});
