// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-placeholder candidate sources and the display-swap state machine.
//!
//! ## Resolution
//!
//! A [`SourceSet`] keeps its media queries in declaration order.
//! Given the queries known to match, [`SourceSet::resolve_best`] picks the one declared last;
//! when none match it falls back to [`Condition::Default`].
//!
//! ## Swapping
//!
//! [`SourceSet::apply`] moves the set to a condition. The image element is created on the
//! first drawing swap and reused afterwards. A swap whose URI equals the URI already
//! displayed only records the new condition.
//!
//! ## Minimal example
//!
//! ```
//! use picture_resolver::source_set::SourceSet;
//! use picture_resolver::types::{Condition, Descriptor, PlaceholderAttrs, Source};
//!
//! let set: SourceSet<()> = SourceSet::new(
//!     (),
//!     PlaceholderAttrs::default(),
//!     [
//!         Descriptor::new(Condition::Default, Source::new("small.jpg")),
//!         Descriptor::new(Condition::from_label(Some("(min-width: 400px)")), Source::new("medium.jpg")),
//!         Descriptor::new(Condition::from_label(Some("(min-width: 800px)")), Source::new("large.jpg")),
//!     ],
//! );
//! let best = set.resolve_best(&["(min-width: 400px)", "(min-width: 800px)"]);
//! assert_eq!(best.as_str(), "(min-width: 800px)");
//! assert_eq!(set.resolve_best::<&str>(&[]), Condition::Default);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::markup::{ALT, HEIGHT, SRC, TITLE, WIDTH};
use crate::types::{Condition, Descriptor, PlaceholderAttrs, Renderer, Source, SwapFlags};

/// Candidate sources of one placeholder, plus what is currently displayed.
///
/// `E` is the host's element handle (see [`Renderer::Element`]).
#[derive(Clone, Debug)]
pub struct SourceSet<E> {
    placeholder: E,
    attrs: PlaceholderAttrs,
    sources: BTreeMap<Condition, Source>,
    // Non-default queries, declaration order; later entries win.
    ordered: Vec<String>,
    current: Option<Condition>,
    rendered: Option<E>,
}

impl<E: Clone> SourceSet<E> {
    /// Build a set from descriptors in document order.
    ///
    /// A repeated condition keeps its first position in the priority order but takes the
    /// source declared last. When no descriptor declares the default condition, the last
    /// descriptor also serves as the fallback. Without descriptors the set is empty and
    /// every operation on it is a no-op.
    pub fn new(
        placeholder: E,
        attrs: PlaceholderAttrs,
        descriptors: impl IntoIterator<Item = Descriptor>,
    ) -> Self {
        let mut sources = BTreeMap::new();
        let mut ordered: Vec<String> = Vec::new();
        let mut last = None;
        for Descriptor { condition, source } in descriptors {
            if let Condition::Media(query) = &condition
                && !ordered.contains(query)
            {
                ordered.push(query.clone());
            }
            last = Some(source.clone());
            sources.insert(condition, source);
        }
        if let Some(last) = last {
            sources.entry(Condition::Default).or_insert(last);
        }
        Self {
            placeholder,
            attrs,
            sources,
            ordered,
            current: None,
            rendered: None,
        }
    }

    /// The placeholder element this set renders into.
    pub fn placeholder(&self) -> &E {
        &self.placeholder
    }

    /// The image element, once the first drawing swap created it.
    pub fn rendered(&self) -> Option<&E> {
        self.rendered.as_ref()
    }

    /// The condition currently displayed, if any swap happened.
    pub fn current(&self) -> Option<&Condition> {
        self.current.as_ref()
    }

    /// The source currently displayed.
    pub fn current_source(&self) -> Option<&Source> {
        self.current.as_ref().and_then(|c| self.sources.get(c))
    }

    /// The source declared for `condition`.
    pub fn source(&self, condition: &Condition) -> Option<&Source> {
        self.sources.get(condition)
    }

    /// Media queries still considered for resolution, in priority order (lowest first).
    pub fn conditions(&self) -> &[String] {
        &self.ordered
    }

    /// True if `query` is still considered for resolution.
    pub fn declares(&self, query: &str) -> bool {
        self.ordered.iter().any(|q| q == query)
    }

    /// Number of distinct conditions with a source, including the default.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True if the placeholder declared no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Pick the condition to display given the queries known to match.
    ///
    /// Returns the matching query declared last, or [`Condition::Default`] when none match.
    /// `true_conditions` is read through a private copy and never modified.
    pub fn resolve_best<S: AsRef<str>>(&self, true_conditions: &[S]) -> Condition {
        let mut pending: Vec<&str> = true_conditions.iter().map(AsRef::as_ref).collect();
        let mut best = None;
        for query in &self.ordered {
            if pending.is_empty() {
                break;
            }
            if let Some(i) = pending.iter().position(|t| *t == query.as_str()) {
                best = Some(query);
                pending.swap_remove(i);
            }
        }
        match best {
            Some(query) => Condition::Media(query.clone()),
            None => Condition::Default,
        }
    }

    /// Display the source declared for `condition`.
    ///
    /// Unknown conditions are ignored. When the URI already displayed equals the new one,
    /// no element is touched. Dimensions are written only when the new source has both;
    /// they are never cleared.
    pub fn apply<R>(&mut self, condition: &Condition, renderer: &mut R) -> SwapFlags
    where
        R: Renderer<Element = E>,
    {
        let Some(next) = self.sources.get(condition) else {
            log::trace!("ignoring unknown condition `{condition}`");
            return SwapFlags::empty();
        };
        let same_uri = self
            .current
            .as_ref()
            .and_then(|c| self.sources.get(c))
            .is_some_and(|shown| shown.uri == next.uri);

        let mut flags = SwapFlags::empty();
        if same_uri {
            log::trace!("`{condition}` shows the same image; skipping redraw");
        } else {
            let image = match &self.rendered {
                Some(image) => image.clone(),
                None => {
                    let image = renderer.create_image();
                    if let Some(alt) = self.attrs.alt.as_deref() {
                        renderer.set_attribute(&image, ALT, alt);
                    }
                    if let Some(title) = self.attrs.title.as_deref() {
                        renderer.set_attribute(&image, TITLE, title);
                    }
                    renderer.append_child(&self.placeholder, &image);
                    self.rendered = Some(image.clone());
                    flags |= SwapFlags::CREATED;
                    image
                }
            };
            renderer.set_attribute(&image, SRC, &next.uri);
            flags |= SwapFlags::SOURCE;
            if let Some((width, height)) = next.dimensions() {
                renderer.set_attribute(&image, WIDTH, width);
                renderer.set_attribute(&image, HEIGHT, height);
                flags |= SwapFlags::DIMENSIONS;
            }
            log::debug!("swapped to `{condition}` ({})", next.uri);
        }
        self.current = Some(condition.clone());
        flags
    }

    /// Drop every query declared before `condition` from future resolution.
    ///
    /// `condition` itself stays, so resolving again over the same or more matching queries
    /// yields the same result. Returns the number of queries removed.
    pub fn prune_before(&mut self, condition: &Condition) -> usize {
        let Some(query) = condition.query() else {
            return 0;
        };
        let Some(pos) = self.ordered.iter().position(|q| q == query) else {
            return 0;
        };
        self.ordered.drain(..pos);
        if pos > 0 {
            log::trace!("pruned {pos} queries declared before `{query}`");
        }
        pos
    }

    /// Resolve against `true_conditions`, display the result, and optionally prune.
    pub fn resolve_and_apply<S, R>(
        &mut self,
        true_conditions: &[S],
        prune: bool,
        renderer: &mut R,
    ) -> SwapFlags
    where
        S: AsRef<str>,
        R: Renderer<Element = E>,
    {
        let best = self.resolve_best(true_conditions);
        let flags = self.apply(&best, renderer);
        if prune && !best.is_default() {
            self.prune_before(&best);
        }
        flags
    }
}
