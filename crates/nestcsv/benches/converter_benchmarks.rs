//! Converter performance benchmarks.
//!
//! Measures end-to-end conversion and the tokenizer alone across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nestcsv::{Converter, ConverterConfig, Tokenizer};

/// Generate synthetic dot-notation CSV with the given number of data rows.
fn generate_csv_data(rows: usize) -> String {
    let mut data = String::from(
        "name.firstName,name.lastName,age,address.line1,address.city,address.geo.lat,active,notes\n",
    );

    for row in 0..rows {
        data.push_str(&format!(
            "First{},Last{},{},{} Main St,City_{},{:.4},{},\"note {}, with comma\"\n",
            row,
            row,
            row % 90,
            row,
            row % 50,
            row as f64 * 0.001,
            if row % 2 == 0 { "true" } else { "false" },
            row
        ));
    }

    data
}

/// Benchmark full conversion at several sizes.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let converter = Converter::with_config(ConverterConfig {
        progress_interval: 0,
        ..ConverterConfig::default()
    });

    for rows in [1_000, 10_000, 50_000].iter() {
        let data = generate_csv_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                let conversion = converter.convert(black_box(data)).unwrap();
                black_box(conversion.records.len())
            });
        });
    }

    group.finish();
}

/// Benchmark line splitting and field tokenizing without record building.
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let tokenizer = Tokenizer::new();

    for rows in [1_000, 10_000].iter() {
        let data = generate_csv_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                let fields: usize = tokenizer
                    .lines(black_box(data))
                    .map(|line| tokenizer.row(line).len())
                    .sum();
                black_box(fields)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_tokenize);
criterion_main!(benches);
