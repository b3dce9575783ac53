use chatmark_engine::{ParseContext, RenderOptions, parse_message, render_message};
use criterion::{Criterion, criterion_group, criterion_main};

fn generate_message(lines: usize) -> String {
    let mut out = String::new();
    for i in 0..lines {
        match i % 5 {
            0 => out.push_str(&format!("Line {i} with *bold*, _italic_ and ~gone~ text :fire:\n")),
            1 => out.push_str(&format!("> quoted reply {i} with `inline code`\n")),
            2 => out.push_str("```rust\nfn main() { println!(\"hi\"); }\n```\n"),
            3 => out.push_str(&format!("mention $>kb$user:{i}$<kb$ and a link example.com\n")),
            _ => out.push('\n'),
        }
    }
    out
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let context = ParseContext::default();
    let content = generate_message(100);
    group.bench_function("parse_message", |b| {
        b.iter(|| {
            let ast = parse_message(std::hint::black_box(&content), &context);
            std::hint::black_box(ast)
        });
    });

    let options = RenderOptions::default();
    group.bench_function("render_message", |b| {
        b.iter(|| std::hint::black_box(render_message(std::hint::black_box(&content), &options)));
    });

    let deep_quotes = ">".repeat(1_000);
    group.bench_function("deep_quotes", |b| {
        b.iter(|| std::hint::black_box(parse_message(std::hint::black_box(&deep_quotes), &context)));
    });

    group.finish();
}

criterion_group!(benches, bench_parsing);
criterion_main!(benches);
