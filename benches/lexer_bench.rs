use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jxc::lexer::Lexer;
use jxc::token::TokenKind;

struct Corpus {
    name: &'static str,
    source: String,
}

fn build_array_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..4_000usize {
        let _ = write!(src, "{i}, {}, true, null, ", i as f64 * 1.5);
    }
    src.push(']');
    src
}

fn build_object_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    src.push('{');
    for i in 0..3_000usize {
        let _ = writeln!(src, "key_{i}: {{ nested_{i}: [{i}, {}], flag_{i}: false }},", i + 1);
    }
    src.push('}');
    src
}

fn build_annotation_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..3_000usize {
        let _ = writeln!(src, "vec3<f32>[{i}, {}, {}],", i + 1, i + 2);
        let _ = writeln!(src, "!my.ns.Widget<T, U> {{ id: {i} }},");
    }
    src.push(']');
    src
}

fn build_string_and_bytes_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..2_000usize {
        let _ = writeln!(src, "\"line {i} with \\\"quotes\\\" and \\n escapes\",");
        let _ = writeln!(src, "r\"TAG(raw body number {i} with # and \\ untouched)TAG\",");
        let _ = writeln!(src, "b64\"SGVsbG8gV29ybGQh\",");
    }
    src.push(']');
    src
}

fn build_number_suffix_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..4_000usize {
        let _ = writeln!(src, "{i}px, 0x{i:x}, 0b101{}, {}.{}e{}suffix,", i % 2, i, i + 1, i % 9);
    }
    src.push(']');
    src
}

fn build_corpora() -> Vec<Corpus> {
    vec![
        Corpus { name: "array_heavy", source: build_array_heavy_corpus() },
        Corpus { name: "object_heavy", source: build_object_heavy_corpus() },
        Corpus { name: "annotation_heavy", source: build_annotation_heavy_corpus() },
        Corpus { name: "string_and_bytes", source: build_string_and_bytes_corpus() },
        Corpus { name: "number_suffix_heavy", source: build_number_suffix_corpus() },
    ]
}

fn lex_all(input: &str) -> usize {
    let mut lexer = Lexer::new(input);
    let mut count = 0usize;
    loop {
        match lexer.next(false) {
            Ok(tok) => {
                count += 1;
                if tok.kind == TokenKind::EndOfStream {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    count
}

fn bench_lexer_next(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("lexer/next");

    for corpus in &corpora {
        let input = corpus.source.as_str();
        group.throughput(Throughput::Bytes(input.as_bytes().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name), input, |b, input| {
            b.iter(|| {
                let token_count = lex_all(black_box(input));
                black_box(token_count);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer_next);
criterion_main!(benches);
