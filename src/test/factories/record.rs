use std::sync::Arc;

use crate::metadata::{
    pool::{ConstantPool, ConstantPoolBuilder},
    record::{RecordAccessFlags, RecordTable, RecordTableBuilder, SchemaVersion},
    RecordMetadata,
};

use super::add_accessor;

// Every slot of record `i` holds `i`
pub fn numbered_table(schema: SchemaVersion, count: usize) -> RecordTable {
    let words = (0..count)
        .flat_map(|i| std::iter::repeat(i as u16).take(schema.slot_width()))
        .collect();
    RecordTable::from_words(schema, words).unwrap()
}

// V1 table of `(int first, List<String> items)`
pub fn described_table() -> (ConstantPool, RecordTable) {
    let mut pool = ConstantPoolBuilder::new();
    let first = pool.utf8("first").unwrap();
    let int = pool.utf8("I").unwrap();
    let items = pool.utf8("items").unwrap();
    let list = pool.utf8("Ljava/util/List;").unwrap();
    let generic = pool.utf8("Ljava/util/List<Ljava/lang/String;>;").unwrap();

    let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 2);
    builder
        .set_access_flags(0, RecordAccessFlags::FINAL.bits())
        .unwrap();
    builder.set_name_index(0, first).unwrap();
    builder.set_descriptor_index(0, int).unwrap();
    builder
        .set_access_flags(
            1,
            (RecordAccessFlags::FINAL | RecordAccessFlags::MANDATED).bits(),
        )
        .unwrap();
    builder.set_name_index(1, items).unwrap();
    builder.set_descriptor_index(1, list).unwrap();
    builder.set_signature_index(1, generic).unwrap();

    (pool.build(), builder.freeze().unwrap())
}

// V3 record class `Point` with one int accessor per name
pub fn point_record(names: &[&str]) -> RecordMetadata<ConstantPool> {
    let mut pool = ConstantPoolBuilder::new();
    let class_name = pool.utf8("Point").unwrap();
    let class = pool.class(class_name).unwrap();

    let mut builder = RecordTableBuilder::new(SchemaVersion::V3, names.len());
    for (index, name) in names.iter().enumerate() {
        let accessor = add_accessor(&mut pool, class, name);
        builder.initialize(index, accessor).unwrap();
    }

    RecordMetadata::new(Arc::new(pool.build()), builder.freeze().unwrap())
}
