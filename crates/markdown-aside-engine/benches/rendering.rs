use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use markdown_aside_engine::{Markdown, aside};

fn generate_chapter(sections: usize) -> String {
    let base = "# Chapter\n\nIntro paragraph with some content.\n\nT> A tip that\nT> spans two lines.\n\n{blurb, class: warning}\nCareful with this.\n\n- one\n- two\n{/blurb}\n\n- A> aside in a list\n- plain item\n\n> quoted\n> W> warning in a quote\n\n```rust\nfn example() {}\n```\n\n";
    base.repeat(sections)
}

fn markdown() -> Markdown {
    let mut md = Markdown::new();
    md.use_plugin(aside::add);
    md
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(20);

    let content = generate_chapter(100);
    let plain = Markdown::new();
    let with_asides = markdown();

    group.bench_function("without_plugin", |b| {
        b.iter(|| black_box(plain.parse(black_box(&content))));
    });
    group.bench_function("with_asides", |b| {
        b.iter(|| black_box(with_asides.parse(black_box(&content))));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let md = markdown();
    let ast = md.parse(&generate_chapter(100)).ast;

    group.bench_function("html", |b| {
        b.iter(|| black_box(md.render(black_box(&ast))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
