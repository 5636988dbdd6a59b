// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source set basics.
//!
//! Builds one source set by hand, resolves it against a few sets of matching queries,
//! and prints the element writes each swap performs.
//!
//! Run:
//! - `cargo run -p picture_demos --example source_set_basics`

use picture_resolver::source_set::SourceSet;
use picture_resolver::types::{Condition, Descriptor, PlaceholderAttrs, Renderer, Source, SwapFlags};

/// Prints every write instead of touching a real document.
struct Printer {
    next: u32,
}

impl Renderer for Printer {
    type Element = u32;
    fn create_image(&mut self) -> u32 {
        self.next += 1;
        println!("  create img #{}", self.next);
        self.next
    }
    fn set_attribute(&mut self, element: &u32, name: &str, value: &str) {
        println!("  #{element}.{name} = {value:?}");
    }
    fn append_child(&mut self, parent: &u32, child: &u32) {
        println!("  append #{child} to #{parent}");
    }
}

fn main() {
    let mut set = SourceSet::new(
        0,
        PlaceholderAttrs {
            alt: Some("Harbour at dusk".into()),
            title: None,
        },
        [
            Descriptor::new(Condition::Default, Source::new("harbour-480.jpg")),
            Descriptor::new(
                Condition::from_label(Some("(min-width: 600px)")),
                Source::new("harbour-960.jpg").with_dimensions("960", "640"),
            ),
            Descriptor::new(
                Condition::from_label(Some("(min-resolution: 2dppx)")),
                Source::new("harbour-480.jpg"),
            ),
        ],
    );
    let mut printer = Printer { next: 0 };

    println!("== Nothing matches ==");
    let flags = set.resolve_and_apply::<&str, _>(&[], false, &mut printer);
    assert_eq!(flags, SwapFlags::CREATED | SwapFlags::SOURCE);

    println!("== Wide viewport ==");
    let flags = set.resolve_and_apply(&["(min-width: 600px)"], false, &mut printer);
    assert_eq!(flags, SwapFlags::SOURCE | SwapFlags::DIMENSIONS);

    println!("== Wide, high-density viewport ==");
    // The density query is declared last, so it wins; its URI differs from the wide one.
    let truths = ["(min-width: 600px)", "(min-resolution: 2dppx)"];
    let flags = set.resolve_and_apply(&truths, false, &mut printer);
    assert_eq!(flags, SwapFlags::SOURCE);
    assert_eq!(set.current().map(Condition::as_str), Some("(min-resolution: 2dppx)"));

    println!("== Back to the fallback (same URI) ==");
    let flags = set.apply(&Condition::Default, &mut printer);
    println!("  (no writes: {})", flags.is_empty());
    assert!(flags.is_empty());
    assert_eq!(set.current(), Some(&Condition::Default));
}
