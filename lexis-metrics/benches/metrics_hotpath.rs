use criterion::{criterion_group, criterion_main, Criterion};
use lexis_core::Metric;
use lexis_metrics::{character_count, compute, longest_words, paragraph_count, sentence_count, word_count};
use std::hint::black_box;

fn bench_metrics(c: &mut Criterion) {
    let text = include_str!("../src/lib.rs");

    c.bench_function("metrics/word_count", |b| {
        b.iter(|| black_box(word_count(black_box(text))));
    });

    c.bench_function("metrics/character_count_full", |b| {
        b.iter(|| black_box(character_count(black_box(text), false)));
    });

    c.bench_function("metrics/character_count_no_punctuation", |b| {
        b.iter(|| black_box(character_count(black_box(text), true)));
    });

    c.bench_function("metrics/sentence_count", |b| {
        b.iter(|| black_box(sentence_count(black_box(text))));
    });

    c.bench_function("metrics/paragraph_count", |b| {
        b.iter(|| black_box(paragraph_count(black_box(text))));
    });

    c.bench_function("metrics/longest_words", |b| {
        b.iter(|| black_box(longest_words(black_box(text))));
    });

    c.bench_function("metrics/compute_all", |b| {
        b.iter(|| {
            for metric in Metric::ALL {
                black_box(compute(metric, black_box(text)));
            }
        });
    });
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
