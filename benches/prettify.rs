//! Benchmarks for URL prettifying and the document pass.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tidylinks::dom::parse_html;
use tidylinks::{FormatterOptions, LinkSnapshot, Rewriter, Settings, is_url_only_link, prettify};

const URLS: &[&str] = &[
    "https://www.example.com/",
    "https://www3.example.com/path/to/page?q=1",
    "http://m.wikipedia.org/wiki/Rust",
    "https://amp.theguardian.com/world",
    "HTTPS://WWW.EXAMPLE.COM",
    "https://example.com/already/clean",
    "ftp://files.example.com/pub/",
];

/// A note with a mix of URL-only and labelled links.
fn sample_document(links: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..links {
        let url = format!("https://www.example{i}.com/");
        if i % 3 == 0 {
            html.push_str(&format!(r#"<p>See <a href="{url}">our site</a>.</p>"#));
        } else {
            html.push_str(&format!(r#"<p><a href="{url}">{url}</a></p>"#));
        }
    }
    html.push_str("</body></html>");
    html
}

// ============================================================================
// Core Benchmarks
// ============================================================================

fn bench_prettify(c: &mut Criterion) {
    c.bench_function("prettify", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(prettify(black_box(url), &FormatterOptions::DEFAULT));
            }
        });
    });
}

fn bench_detect(c: &mut Criterion) {
    let nodes: Vec<_> = URLS
        .iter()
        .map(|url| LinkSnapshot::anchor(*url, url.trim_end_matches('/')))
        .collect();

    c.bench_function("is_url_only_link", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(is_url_only_link(black_box(node)));
            }
        });
    });
}

// ============================================================================
// Document Benchmarks
// ============================================================================

fn bench_rewrite_document(c: &mut Criterion) {
    let html = sample_document(200);
    let rewriter = Rewriter::new(Settings::DEFAULT).unwrap();

    c.bench_function("rewrite_document", |b| {
        b.iter(|| {
            let mut dom = parse_html(&html);
            black_box(rewriter.rewrite_document(&mut dom));
        });
    });
}

criterion_group!(
    benches,
    // Core
    bench_prettify,
    bench_detect,
    // Document
    bench_rewrite_document,
);
criterion_main!(benches);
