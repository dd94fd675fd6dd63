//! Benchmarks for the content pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use codex::site::{SiteConfig, load_book, synthesize_document};
use codex::render_markdown;

const FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/codex");
const WELCOME: &str = include_str!("../tests/fixtures/codex/welcome.md");

/// A long chapter built by repeating the fixture pages.
fn long_chapter() -> String {
    let rules = include_str!("../tests/fixtures/codex/rules.md");
    let east = include_str!("../tests/fixtures/codex/wings/east.md");
    [WELCOME, rules, east].join("\n\n").repeat(200)
}

// ============================================================================
// Markdown Rendering
// ============================================================================

fn bench_render_page(c: &mut Criterion) {
    c.bench_function("render_page", |b| {
        b.iter(|| render_markdown(WELCOME));
    });
}

fn bench_render_long_chapter(c: &mut Criterion) {
    let chapter = long_chapter();
    c.bench_function("render_long_chapter", |b| {
        b.iter(|| render_markdown(&chapter));
    });
}

// ============================================================================
// Site Pipeline
// ============================================================================

fn bench_load_book(c: &mut Criterion) {
    let config = SiteConfig::default().with_content_root(FIXTURE_ROOT);
    c.bench_function("load_book", |b| {
        b.iter(|| load_book(&config).unwrap());
    });
}

fn bench_synthesize_document(c: &mut Criterion) {
    let config = SiteConfig::default().with_content_root(FIXTURE_ROOT);
    let book = load_book(&config).unwrap();
    c.bench_function("synthesize_document", |b| {
        b.iter(|| synthesize_document(&book, &config).unwrap());
    });
}

criterion_group!(
    benches,
    // Rendering
    bench_render_page,
    bench_render_long_chapter,
    // Pipeline
    bench_load_book,
    bench_synthesize_document,
);
criterion_main!(benches);
