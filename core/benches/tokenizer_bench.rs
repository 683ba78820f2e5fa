use criterion::{criterion_group, criterion_main, Criterion};
use docdex_core::sentence::split_into_sentences;
use docdex_core::tokenizer::tokenize;

const SAMPLE: &str = include_str!("../../README.md");

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_readme", |b| b.iter(|| tokenize(SAMPLE)));
}

fn bench_sentences(c: &mut Criterion) {
    c.bench_function("split_sentences_readme", |b| {
        b.iter(|| split_into_sentences(SAMPLE))
    });
}

criterion_group!(benches, bench_tokenize, bench_sentences);
criterion_main!(benches);
