//! Lexer benchmarks. Run with `cargo bench --package dumbc-lex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dumbc_lex::Lexer;

fn lexer_token_count(source: &str) -> usize {
    Lexer::new(source).tokenize().unwrap().len()
}

fn bench_lexer_keywords(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "func main(): i32 { var y: i32 = 1; return y }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_var", |b| b.iter(|| lexer_token_count(black_box("var x: i32 = 42"))));
    group.bench_function("function_with_body", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        #[external]
        func print(message: str): void

        func fib(n: i32): i32 {
            if n <= 1 {
                return n
            }
            return fib(n - 1) + fib(n - 2)
        }

        func main(): i32 {
            var x: i32 = fib(10)
            while x > 0 {
                x = x - 1
                if x == 5 {
                    continue
                }
                print("tick")
            }
            return 0
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| b.iter(|| lexer_token_count(black_box(r#"var s: str = "hello""#))));

    let long = r#"var s: str = "This is a longer string that contains some text for benchmarking purposes.""#;
    group.bench_function("long_string", |b| b.iter(|| lexer_token_count(black_box(long))));

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| b.iter(|| lexer_token_count(black_box("var x: i32 = 123456"))));
    group.bench_function("float", |b| b.iter(|| lexer_token_count(black_box("var x: f32 = 3.14159"))));
    group.bench_function("float_exponent", |b| b.iter(|| lexer_token_count(black_box("var x: f64 = 2.5e-3"))));

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("short_ident", |b| b.iter(|| lexer_token_count(black_box("var x: i32 = 42"))));
    group.bench_function("long_ident", |b| b.iter(|| lexer_token_count(black_box("var very_long_variable_name: i32 = 42"))));
    group.bench_function("many_ident", |b| {
        b.iter(|| lexer_token_count(black_box("var a: i32 = 1 var b: i32 = 2 var c: i32 = 3 var d: i32 = 4 var e: i32 = 5")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_keywords,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_identifiers
);
criterion_main!(benches);
