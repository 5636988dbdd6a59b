// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport resize.
//!
//! A host that understands `(min-width: Npx)` queries widens its viewport step by step and
//! forwards every query that starts matching. Shows pruning and the one-shot subscriptions.
//!
//! Run:
//! - `cargo run -p picture_demos --example viewport_resize`

use picture_document::{Document, ElementId};
use picture_resolver::types::MediaMatcher;
use picture_resolver::{ResolveConfig, Resolver};

#[derive(Debug)]
struct NotMinWidth(String);

impl std::fmt::Display for NotMinWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a min-width query", self.0)
    }
}

impl std::error::Error for NotMinWidth {}

fn min_width(query: &str) -> Result<u32, NotMinWidth> {
    query
        .strip_prefix("(min-width:")
        .and_then(|rest| rest.strip_suffix("px)"))
        .and_then(|px| px.trim().parse().ok())
        .ok_or_else(|| NotMinWidth(query.into()))
}

struct Viewport {
    width: u32,
    live: Vec<(u32, u32)>,
    next: u32,
}

impl Viewport {
    /// Widen the viewport and return the handles whose query started matching.
    fn resize(&mut self, width: u32) -> Vec<u32> {
        let before = self.width;
        self.width = width;
        self.live
            .iter()
            .filter(|(_, px)| *px > before && *px <= width)
            .map(|(handle, _)| *handle)
            .collect()
    }
}

impl MediaMatcher for Viewport {
    type Handle = u32;
    type Error = NotMinWidth;
    fn subscribe(&mut self, query: &str) -> Result<u32, NotMinWidth> {
        let px = min_width(query)?;
        self.next += 1;
        self.live.push((self.next, px));
        Ok(self.next)
    }
    fn matches(&mut self, query: &str) -> Result<bool, NotMinWidth> {
        Ok(min_width(query)? <= self.width)
    }
    fn unsubscribe(&mut self, handle: u32) {
        self.live.retain(|(h, _)| *h != handle);
    }
}

const PAGE: &str = r#"<article>
  <span data-picture data-alt="Skyline">
    <span data-src="sky-small.jpg"></span>
    <span data-src="sky-medium.jpg" data-media="(min-width: 480px)" data-width="480" data-height="320"></span>
    <span data-src="sky-large.jpg" data-media="(min-width: 960px)" data-width="960" data-height="640"></span>
    <span data-src="sky-huge.jpg" data-media="(min-width: 1920px)" data-width="1920" data-height="1280"></span>
  </span>
</article>"#;

fn image_of(doc: &Document, resolver: &Resolver<ElementId, u32>) -> String {
    let image = resolver.source_sets()[0]
        .rendered()
        .copied()
        .expect("initial pass renders");
    doc.element_markup(image)
}

fn main() {
    let mut doc = Document::parse(PAGE).expect("demo markup is well-formed");
    let mut viewport = Viewport {
        width: 320,
        live: Vec::new(),
        next: 0,
    };
    let mut resolver = Resolver::new(ResolveConfig::default().with_prune(true));
    resolver
        .resolve_all(&mut doc, &mut viewport, None)
        .expect("every query is a min-width query");
    println!("320px:  {}", image_of(&doc, &resolver));

    for width in [600, 1280, 2560] {
        for handle in viewport.resize(width) {
            resolver.notify(&handle, true, &mut doc, &mut viewport);
        }
        let set = &resolver.source_sets()[0];
        println!("{width}px: {}", image_of(&doc, &resolver));
        println!("        still considered: {:?}", set.conditions());
    }

    let set = &resolver.source_sets()[0];
    assert_eq!(set.current_source().map(|s| s.uri.as_str()), Some("sky-huge.jpg"));
    assert_eq!(set.conditions(), &["(min-width: 1920px)"]);
    assert!(viewport.live.is_empty());
}
