//! Tokenizer and dispatch benchmarks.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flagline::{ParserConfig, parse_line, tokenize};
use std::hint::black_box;

const LINES: &[(&str, &str)] = &[
    ("plain", "$chat -l gemini -m gemini-1.5-pro -s hello there how are you"),
    ("quoted", r#"$chat --send "Hello world" --prompt set 'You are a "pirate"'"#),
    ("escaped", r#"$google -s "say \"hi\" to \\ everyone" --query 'it\'s'"#),
    (
        "clip",
        r#"$clip -u "https://x/a" -s 5 -e 15 -u "https://x/b" -s 1:20 -e 1:30 --format gif"#,
    ),
];

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (name, line) in LINES {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| tokenize(black_box(line)));
        });
    }
    group.finish();
}

fn bench_parse_line(c: &mut Criterion) {
    let config = ParserConfig::default();
    let mut group = c.benchmark_group("parse_line");
    for (name, line) in LINES {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| parse_line(black_box(line), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse_line);
criterion_main!(benches);
