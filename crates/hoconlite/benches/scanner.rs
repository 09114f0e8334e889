//! Benchmark – `hoconlite::Scanner`
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hoconlite::{ParserOptions, Scanner, TreeBuilder};

/// A deterministic document with `sections` brace-nested sections, each mixing
/// dotted keys, arrays, quoted and bare strings, numbers and comments.
fn make_payload(sections: usize) -> String {
    let mut s = String::new();
    for i in 0..sections {
        writeln!(s, "# section {i}").unwrap();
        writeln!(s, "service{i} {{").unwrap();
        writeln!(s, "    name: \"service-{i}\\u0021\"").unwrap();
        writeln!(s, "    host = host{i}.internal").unwrap();
        writeln!(s, "    port: {}", 8000 + i).unwrap();
        writeln!(s, "    ratio: {}.25e-1", i % 10).unwrap();
        writeln!(s, "    tls.enabled: {}", i % 2 == 0).unwrap();
        writeln!(s, "    peers: [{i}, {}, {{ id: {i}, tags: [a, b] }}]", i + 1).unwrap();
        writeln!(s, "}}").unwrap();
    }
    s
}

/// Scans `payload` in `parts` chunks and builds the tree. Returns the number
/// of top-level keys so Criterion cannot optimise the work away.
fn run_scanner(payload: &str, parts: usize) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);

    let mut scanner = Scanner::new(ParserOptions::default());
    for chunk in payload.as_bytes().chunks(chunk_size) {
        scanner.feed(chunk).expect("valid document");
    }
    let pairs = scanner.finish().expect("valid document");
    TreeBuilder::build(pairs).expect("no merge conflicts").len()
}

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_split");

    for &sections in &[10usize, 1_000] {
        let payload = make_payload(sections);
        for &parts in &[1usize, 100, 5_000] {
            group.bench_with_input(
                BenchmarkId::new(sections.to_string(), parts),
                &parts,
                |b, &p| {
                    b.iter(|| {
                        let count = run_scanner(black_box(&payload), p);
                        black_box(count);
                    });
                },
            );
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_scanner }
criterion_main!(benches);
