// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolve placeholders in parsed markup.
//!
//! Parses a small page, resolves it for a viewport where one query already matches,
//! then delivers a late match and prints the markup after each step.
//!
//! Run:
//! - `cargo run -p picture_demos --example resolve_markup`

use picture_document::Document;
use picture_resolver::{ResolveConfig, Resolver};
use picture_resolver::types::MediaMatcher;

#[derive(Debug)]
struct Unsupported(String);

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported media query `{}`", self.0)
    }
}

impl std::error::Error for Unsupported {}

/// Host stand-in: a fixed list of matching queries, handles are subscription order.
#[derive(Default)]
struct Host {
    matching: Vec<&'static str>,
    subscribed: Vec<String>,
}

impl MediaMatcher for Host {
    type Handle = usize;
    type Error = Unsupported;
    fn subscribe(&mut self, query: &str) -> Result<usize, Unsupported> {
        if !query.starts_with('(') {
            return Err(Unsupported(query.into()));
        }
        self.subscribed.push(query.into());
        Ok(self.subscribed.len() - 1)
    }
    fn matches(&mut self, query: &str) -> Result<bool, Unsupported> {
        Ok(self.matching.contains(&query))
    }
    fn unsubscribe(&mut self, handle: usize) {
        println!("  unsubscribed `{}`", self.subscribed[handle]);
    }
}

const PAGE: &str = r#"<main>
  <span data-picture data-alt="Lighthouse" data-title="North light">
    <span data-src="light-320.jpg"></span>
    <span data-src="light-640.jpg" data-media="(min-width: 400px)"></span>
    <span data-src="light-1280.jpg" data-media="(min-width: 800px)" data-width="1280" data-height="853"></span>
  </span>
  <span data-picture>
    <span data-src="map.png" data-media="(min-width: 800px)"></span>
    <span data-src="map-print.png" data-media="print"></span>
  </span>
</main>"#;

fn main() {
    let mut doc = Document::parse(PAGE).expect("demo markup is well-formed");
    let mut host = Host {
        matching: vec!["(min-width: 400px)"],
        ..Host::default()
    };
    let mut resolver = Resolver::new(ResolveConfig::default());

    println!("== Initial pass ==");
    // `print` is rejected by this host; the other queries still resolve.
    let err = resolver
        .resolve_all(&mut doc, &mut host, None)
        .expect_err("`print` is unsupported");
    println!("  {err}");
    for failure in &err.failures {
        println!("  - {}", failure.source);
    }
    assert_eq!(err.queries().collect::<Vec<_>>(), vec!["print"]);
    println!("{}", doc.to_markup());

    println!("== Viewport grows past 800px ==");
    let wide = host
        .subscribed
        .iter()
        .position(|q| q == "(min-width: 800px)")
        .expect("query was subscribed");
    resolver.notify(&wide, true, &mut doc, &mut host);
    println!("{}", doc.to_markup());

    let shown: Vec<&str> = resolver
        .source_sets()
        .iter()
        .filter_map(|set| set.current_source())
        .map(|s| s.uri.as_str())
        .collect();
    assert_eq!(shown, vec!["light-1280.jpg", "map.png"]);
    // Matching at scan time does not end a subscription; only a notification does.
    let pending: Vec<&str> = resolver.pending_queries().collect();
    assert_eq!(pending, vec!["(min-width: 400px)"]);
}
