use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rexplain_core::{Block, Quantifier, explain, explain_pattern, format_blocks};

fn bench_literal(c: &mut Criterion) {
    let pattern = "hello world this is a plain literal pattern";

    c.bench_function("explain_literal", |b| {
        b.iter(|| black_box(explain_pattern(black_box(pattern))))
    });
}

fn bench_nested_groups(c: &mut Criterion) {
    let pattern = r"((a(?:b(?=c(?<!d)))+)|(?<name>e{2,5}?))*";

    c.bench_function("explain_nested_groups", |b| {
        b.iter(|| black_box(explain_pattern(black_box(pattern))))
    });
}

fn bench_email(c: &mut Criterion) {
    let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

    c.bench_function("explain_email_validated", |b| {
        b.iter(|| black_box(explain(black_box(pattern), black_box("gi"))))
    });
}

fn bench_format_blocks(c: &mut Criterion) {
    let blocks = vec![
        Block::StartOfLine,
        Block::quantified(
            Quantifier::OneOrMore,
            Block::or(vec![Block::literal("cat"), Block::literal("dog")]),
        ),
        Block::group(vec![Block::character_class("0-9"), Block::WordBoundary]),
        Block::quantified(Quantifier::Between(2, 4), Block::Digit),
        Block::EndOfLine,
    ];

    c.bench_function("format_blocks", |b| {
        b.iter(|| black_box(format_blocks(black_box(&blocks))))
    });
}

criterion_group!(
    benches,
    bench_literal,
    bench_nested_groups,
    bench_email,
    bench_format_blocks,
);

criterion_main!(benches);
