//! Benchmark: parse + generate for a configuration with many `set` lines, and generate alone
//! from an already parsed program.

use confcomp::{compile_source, generate, parse, CompilerConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_config(repeats: usize) -> String {
    let mut src = String::from("snappysense-compiled-config 1.0.0\nclear\n");
    for i in 0..repeats {
        src.push_str(&format!("set observation-interval {}\n", 60 + i % 1000));
        src.push_str(&format!("set device-id \"snappy-{:05}\"\n", i));
        src.push_str("set mqtt-endpoint-host broker.example.net\n");
        src.push_str("# comment line\n\n");
    }
    src.push_str("save\n");
    src
}

fn bench_compile(c: &mut Criterion) {
    let config = CompilerConfig::default();
    let src = synthetic_config(2_000);

    c.bench_function("compile_source", |b| {
        b.iter(|| compile_source(black_box(&src), &config).expect("compile"))
    });

    let program = parse(&src, &config).expect("parse");
    c.bench_function("generate", |b| {
        b.iter(|| generate(black_box(&program)).expect("generate"))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
