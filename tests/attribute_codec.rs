//! Integration tests for the `Record` attribute codec.
//!
//! Builds a class's symbol pool and record table, encodes the attribute, and decodes it
//! again with validation, the way a class-file reader and writer pair would.

use std::sync::Arc;

use recparams::prelude::*;

struct Fixture {
    pool: ConstantPool,
    accessors: Vec<u16>,
    names: Vec<u16>,
    descriptors: Vec<u16>,
}

/// `record Range(int low, int high)` with both described and accessor handles
fn range_record() -> Fixture {
    let mut pool = ConstantPoolBuilder::new();
    let class_name = pool.utf8("Range").unwrap();
    let class = pool.class(class_name).unwrap();
    let int = pool.utf8("I").unwrap();
    let getter = pool.utf8("()I").unwrap();

    let mut accessors = Vec::new();
    let mut names = Vec::new();
    for field in ["low", "high"] {
        let name = pool.utf8(field).unwrap();
        let name_and_type = pool.name_and_type(name, getter).unwrap();
        accessors.push(pool.method_ref(class, name_and_type).unwrap());
        names.push(name);
    }

    Fixture {
        pool: pool.build(),
        accessors,
        descriptors: vec![int; names.len()],
        names,
    }
}

#[test]
fn accessor_attribute_through_pool() {
    let fixture = range_record();
    let mut builder = RecordTableBuilder::new(SchemaVersion::V3, fixture.accessors.len());
    for (index, &accessor) in fixture.accessors.iter().enumerate() {
        builder.initialize(index, accessor).unwrap();
    }
    let table = builder.freeze().unwrap();

    let bytes = RecordAttribute::encode(&table, &[]).unwrap();
    assert_eq!(bytes.len(), 2 + 2 * 2 + 2);

    let decoded = RecordAttribute::parse_validated(
        &bytes,
        SchemaVersion::V3,
        &fixture.pool,
        &ValidationConfig::comprehensive(),
    )
    .unwrap();
    assert_eq!(decoded.table(), &table);

    let metadata = RecordMetadata::new(Arc::new(fixture.pool), decoded.into_table());
    assert_eq!(metadata.param_names().unwrap(), ["low", "high"]);
    assert_eq!(metadata.position_of("high").unwrap(), Some(1));
}

#[test]
fn described_attribute_keeps_disk_order() {
    let fixture = range_record();
    let mut builder = RecordTableBuilder::new(SchemaVersion::V2, 2);
    for index in 0..2 {
        builder
            .set_access_flags(index, RecordAccessFlags::FINAL.bits())
            .unwrap();
        builder.set_name_index(index, fixture.names[index]).unwrap();
        builder
            .set_descriptor_index(index, fixture.descriptors[index])
            .unwrap();
    }
    let table = builder.freeze().unwrap();

    let info = [0xDE, 0xAD];
    let nested = [NestedAttribute {
        name_index: fixture.names[0],
        info: &info,
    }];
    let bytes = RecordAttribute::encode(&table, &nested).unwrap();

    // first param on disk: name_index, then access_flags
    assert_eq!(&bytes[2..4], &fixture.names[0].to_be_bytes());
    assert_eq!(&bytes[4..6], &RecordAccessFlags::FINAL.bits().to_be_bytes());

    let decoded = RecordAttribute::parse(&bytes, SchemaVersion::V2).unwrap();
    assert_eq!(decoded.table(), &table);
    assert_eq!(decoded.attributes(), &nested);

    let mut stream = RecordStream::new(decoded.table(), &fixture.pool);
    assert_eq!(stream.name().unwrap(), "low");
    assert_eq!(stream.descriptor().unwrap(), "I");
    stream.advance();
    assert_eq!(stream.name().unwrap(), "high");
}

#[test]
fn described_bytes_misread_as_accessors_fail_validation() {
    let fixture = range_record();
    let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 1);
    builder.set_name_index(0, fixture.names[0]).unwrap();
    builder.set_descriptor_index(0, fixture.descriptors[0]).unwrap();
    let bytes = RecordAttribute::encode(&builder.freeze().unwrap(), &[]).unwrap();

    // one V1 param is four words, but the count says one record
    assert!(matches!(
        RecordAttribute::parse(&bytes, SchemaVersion::V3),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn truncated_attribute() {
    let fixture = range_record();
    let table = RecordTable::from_words(SchemaVersion::V3, fixture.accessors.clone()).unwrap();
    let bytes = RecordAttribute::encode(&table, &[]).unwrap();

    assert!(matches!(
        RecordAttribute::parse(&bytes[..bytes.len() - 1], SchemaVersion::V3),
        Err(Error::OutOfBounds)
    ));
}
