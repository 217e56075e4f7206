//! Benchmarks for the freezing pipeline.
//!
//! Measures end-to-end image production for value graphs of increasing fan-out:
//! - A flat record with small scalar arrays
//! - A mesh-like graph mixing inline value types, boxed references and strings

extern crate permafrost;

use criterion::{criterion_group, criterion_main, Criterion};
use permafrost::prelude::*;
use std::hint::black_box;
use std::io::Write;

struct Sample {
    id: u32,
    weights: Vec<f32>,
    label: String,
}

impl Freeze for Sample {
    const FROZEN_SIZE: usize = 4 + ARRAY_FIELD_SIZE + STRING_FIELD_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write(offset, self.id)?;
        page.write_scalars(offset + 4, &self.weights)?;
        page.write_str(offset + 4 + ARRAY_FIELD_SIZE, &self.label)
    }
}

struct Bundle {
    samples: Vec<Sample>,
}

impl Freeze for Bundle {
    const FROZEN_SIZE: usize = ARRAY_FIELD_SIZE;
    const IS_REFERENCE: bool = false;

    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
        page.write_values(offset, &self.samples)
    }
}

fn make_bundle(count: usize) -> Bundle {
    Bundle {
        samples: (0..count)
            .map(|i| Sample {
                id: i as u32,
                weights: vec![0.25; 16],
                label: format!("sample-{i}"),
            })
            .collect(),
    }
}

/// Benchmark freezing a single flat record.
fn bench_freeze_flat_record(c: &mut Criterion) {
    let sample = Sample {
        id: 7,
        weights: vec![1.0; 64],
        label: "solo".to_string(),
    };

    c.bench_function("freeze_flat_record", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            let mut writer = ImageWriter::new(&mut buffer, 1);
            writer.write_root(black_box(&sample)).unwrap();
            writer.finish().unwrap();
            black_box(buffer)
        });
    });
}

/// Benchmark freezing a bundle of 256 records, one array page per string and
/// weight vector.
fn bench_freeze_bundle(c: &mut Criterion) {
    let bundle = make_bundle(256);

    c.bench_function("freeze_bundle_256", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            let mut writer = ImageWriter::new(&mut buffer, 1);
            writer.write_root(black_box(&bundle)).unwrap();
            writer.finish().unwrap();
            black_box(buffer)
        });
    });
}

criterion_group!(benches, bench_freeze_flat_record, bench_freeze_bundle);
criterion_main!(benches);
