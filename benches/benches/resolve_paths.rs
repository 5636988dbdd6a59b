// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use picture_document::Document;
use picture_resolver::source_set::SourceSet;
use picture_resolver::types::{Condition, Descriptor, MediaMatcher, PlaceholderAttrs, Source};
use picture_resolver::{ResolveConfig, Resolver};

fn query(i: usize) -> String {
    format!("(min-width: {}px)", 100 * (i + 1))
}

fn gen_set(k: usize) -> SourceSet<()> {
    let mut descriptors = vec![Descriptor::new(Condition::Default, Source::new("d.jpg"))];
    for i in 0..k {
        descriptors.push(Descriptor::new(
            Condition::from_label(Some(&query(i))),
            Source::new(format!("{i}.jpg")),
        ));
    }
    SourceSet::new((), PlaceholderAttrs::default(), descriptors)
}

/// `n` placeholders, each declaring the same `k` queries plus a fallback.
fn gen_markup(n: usize, k: usize) -> String {
    let mut out = String::from("<body>");
    for p in 0..n {
        let _ = write!(out, r#"<span data-picture data-alt="p{p}"><span data-src="{p}.jpg"/>"#);
        for i in 0..k {
            let _ = write!(
                out,
                r#"<span data-src="{p}-{i}.jpg" data-media="{}" data-width="{i}" data-height="{i}"/>"#,
                query(i)
            );
        }
        out.push_str("</span>");
    }
    out.push_str("</body>");
    out
}

/// Matches nothing at scan time; handles are subscription order.
#[derive(Default)]
struct Quiet {
    next: u32,
}

#[derive(Debug)]
struct Never;

impl std::fmt::Display for Never {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("never")
    }
}

impl std::error::Error for Never {}

impl MediaMatcher for Quiet {
    type Handle = u32;
    type Error = Never;
    fn subscribe(&mut self, _query: &str) -> Result<u32, Never> {
        self.next += 1;
        Ok(self.next)
    }
    fn matches(&mut self, _query: &str) -> Result<bool, Never> {
        Ok(false)
    }
    fn unsubscribe(&mut self, _handle: u32) {}
}

fn bench_resolve_best(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_best");
    for &k in &[4usize, 16, 64] {
        let set = gen_set(k);
        let none: Vec<String> = Vec::new();
        let half: Vec<String> = (0..k / 2).map(query).collect();
        let all: Vec<String> = (0..k).rev().map(query).collect();
        group.throughput(Throughput::Elements(k as u64));
        group.bench_function(format!("none_k{k}"), |b| {
            b.iter(|| black_box(set.resolve_best(black_box(&none))));
        });
        group.bench_function(format!("half_k{k}"), |b| {
            b.iter(|| black_box(set.resolve_best(black_box(&half))));
        });
        group.bench_function(format!("all_k{k}"), |b| {
            b.iter(|| black_box(set.resolve_best(black_box(&all))));
        });
    }
    group.finish();
}

fn bench_resolve_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_all");
    for &n in &[16usize, 128, 512] {
        let markup = gen_markup(n, 4);
        let doc = Document::parse(&markup).expect("generated markup parses");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scan_n{n}"), |b| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| {
                    let mut resolver = Resolver::new(ResolveConfig::default());
                    let _ = resolver.resolve_all(&mut doc, &mut Quiet::default(), None);
                    black_box(resolver.source_sets().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify");
    for &(n, prune) in &[(128usize, false), (128, true)] {
        let k = 8;
        let markup = gen_markup(n, k);
        let doc = Document::parse(&markup).expect("generated markup parses");
        group.throughput(Throughput::Elements((n * k) as u64));
        group.bench_function(format!("ascending_n{n}_prune_{prune}"), |b| {
            b.iter_batched(
                || {
                    let mut doc = doc.clone();
                    let mut media = Quiet::default();
                    let mut resolver = Resolver::new(ResolveConfig::default().with_prune(prune));
                    let _ = resolver.resolve_all(&mut doc, &mut media, None);
                    (doc, media, resolver)
                },
                |(mut doc, mut media, mut resolver)| {
                    // Handles follow first-seen query order, which is ascending width here.
                    for handle in 1..=k as u32 {
                        resolver.notify(&handle, true, &mut doc, &mut media);
                    }
                    black_box(resolver.true_conditions().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve_best, bench_resolve_all, bench_notify);
criterion_main!(benches);
