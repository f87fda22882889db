//! Benchmarks for record table reads.
//!
//! Measures the read paths a class loader hits repeatedly:
//! - Walking a stream over described (V1) records
//! - Resolving names through the V3 decode chain
//! - Parallel name resolution with rayon
//! - Decoding a `Record` attribute

extern crate recparams;

use criterion::{criterion_group, criterion_main, Criterion};
use rayon::prelude::*;
use recparams::prelude::*;
use std::hint::black_box;

const PARAMS: usize = 255;

fn accessor_fixture() -> (ConstantPool, RecordTable) {
    let mut pool = ConstantPoolBuilder::new();
    let class_name = pool.utf8("Bench").unwrap();
    let class = pool.class(class_name).unwrap();
    let descriptor = pool.utf8("()I").unwrap();

    let mut builder = RecordTableBuilder::new(SchemaVersion::V3, PARAMS);
    for index in 0..PARAMS {
        let name = pool.utf8(&format!("field{index}")).unwrap();
        let name_and_type = pool.name_and_type(name, descriptor).unwrap();
        let accessor = pool.method_ref(class, name_and_type).unwrap();
        builder.initialize(index, accessor).unwrap();
    }

    (pool.build(), builder.freeze().unwrap())
}

fn described_fixture() -> (ConstantPool, RecordTable) {
    let mut pool = ConstantPoolBuilder::new();
    let descriptor = pool.utf8("I").unwrap();

    let mut builder = RecordTableBuilder::new(SchemaVersion::V1, PARAMS);
    for index in 0..PARAMS {
        let name = pool.utf8(&format!("field{index}")).unwrap();
        builder.set_name_index(index, name).unwrap();
        builder.set_descriptor_index(index, descriptor).unwrap();
    }

    (pool.build(), builder.freeze().unwrap())
}

/// Benchmark resolving every name of a V1 table through a stream.
fn bench_stream_described_names(c: &mut Criterion) {
    let (pool, table) = described_fixture();

    c.bench_function("stream_v1_names", |b| {
        b.iter(|| {
            let mut stream = RecordStream::new(black_box(&table), &pool);
            while !stream.done() {
                black_box(stream.name().unwrap());
                stream.advance();
            }
        });
    });
}

/// Benchmark resolving every name of a V3 table through the decode chain.
fn bench_stream_accessor_names(c: &mut Criterion) {
    let (pool, table) = accessor_fixture();

    c.bench_function("stream_v3_names", |b| {
        b.iter(|| {
            let mut stream = RecordStream::new(black_box(&table), &pool);
            while !stream.done() {
                black_box(stream.name().unwrap());
                stream.advance();
            }
        });
    });
}

/// Benchmark parallel V3 name resolution.
fn bench_par_iter_accessor_names(c: &mut Criterion) {
    let (pool, table) = accessor_fixture();

    c.bench_function("par_iter_v3_names", |b| {
        b.iter(|| {
            let names: Vec<&str> = black_box(&table)
                .par_iter()
                .map(|record| record.name(&pool).unwrap())
                .collect();
            black_box(names)
        });
    });
}

/// Benchmark decoding a described `Record` attribute.
fn bench_parse_attribute(c: &mut Criterion) {
    let (_, table) = described_fixture();
    let bytes = RecordAttribute::encode(&table, &[]).unwrap();

    c.bench_function("parse_record_attribute_v1", |b| {
        b.iter(|| {
            let attribute = RecordAttribute::parse(black_box(&bytes), SchemaVersion::V1).unwrap();
            black_box(attribute)
        });
    });
}

criterion_group!(
    benches,
    bench_stream_described_names,
    bench_stream_accessor_names,
    bench_par_iter_accessor_names,
    bench_parse_attribute
);
criterion_main!(benches);
