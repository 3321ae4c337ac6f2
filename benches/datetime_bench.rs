//! ISO-8601 parse and print benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `parse` | `parse_datetime` on zoned, naive, non-matching and impossible input |
//! | `print` | `print_datetime` for UTC and offset datetimes |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench datetime_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gelfmt_core::{parse_datetime, print_datetime};

const INPUTS: &[(&str, &str)] = &[
    ("utc", "2019-01-01T00:00:00Z"),
    ("offset_micros", "2019-12-31T23:59:59.999999-01:00"),
    ("naive_minutes", "2019-06-15 12:30"),
    ("non_matching", "not-a-date"),
    ("impossible", "2019-02-30T00:00:00Z"),
];

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, input) in INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| parse_datetime(black_box(input)))
        });
    }
    group.finish();
}

fn print_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");
    for (name, input) in &INPUTS[..3] {
        let ts = parse_datetime(input).unwrap().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &ts, |b, ts| {
            b.iter(|| print_datetime(black_box(*ts)))
        });
    }
    group.finish();
}

criterion_group!(benches, parse_bench, print_bench);
criterion_main!(benches);
