// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator implementations for the in-memory `picture_document` tree.
//!
//! ## Feature
//!
//! Enable with `document_adapter`.
//!
//! ## Notes
//!
//! Placeholders are `span` elements carrying `data-picture`; descriptors are every `span`
//! below a placeholder, so a nested placeholder also contributes its own descriptors to
//! the outer one. The rendered element is an `img`, which never counts as a descriptor.

use alloc::vec::Vec;

use picture_document::{Document as Tree, ElementId};

use crate::markup::{DATA_PICTURE, IMG, SPAN};
use crate::types::{Document, Renderer};

impl Renderer for Tree {
    type Element = ElementId;

    fn create_image(&mut self) -> ElementId {
        self.create_element(IMG)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        Self::set_attribute(self, *element, name, value);
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) {
        Self::append_child(self, *parent, *child);
    }
}

impl Document for Tree {
    fn placeholders(&self, root: Option<&ElementId>) -> Vec<ElementId> {
        self.elements_by_tag(root.copied(), SPAN)
            .into_iter()
            .filter(|id| self.has_attribute(*id, DATA_PICTURE))
            .collect()
    }

    fn descriptors(&self, placeholder: &ElementId) -> Vec<ElementId> {
        self.elements_by_tag(Some(*placeholder), SPAN)
    }

    fn attribute<'a>(&'a self, element: &ElementId, name: &str) -> Option<&'a str> {
        Self::attribute(self, *element, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolveConfig;
    use crate::resolver::Resolver;
    use crate::types::MediaMatcher;
    use alloc::string::{String, ToString};
    use alloc::vec;

    #[derive(Debug)]
    struct Never;

    impl core::fmt::Display for Never {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("never")
        }
    }

    impl core::error::Error for Never {}

    #[derive(Debug, Default)]
    struct Viewport {
        matching: Vec<String>,
        subscribed: Vec<String>,
    }

    impl MediaMatcher for Viewport {
        type Handle = usize;
        type Error = Never;
        fn subscribe(&mut self, query: &str) -> Result<usize, Never> {
            self.subscribed.push(query.to_string());
            Ok(self.subscribed.len() - 1)
        }
        fn matches(&mut self, query: &str) -> Result<bool, Never> {
            Ok(self.matching.iter().any(|q| q == query))
        }
        fn unsubscribe(&mut self, _handle: usize) {}
    }

    const MARKUP: &str = r#"<body>
        <span data-picture data-alt="A giant stone face">
          <span data-src="small.jpg"></span>
          <span data-src="medium.jpg" data-media="(min-width: 400px)"></span>
          <span data-src="large.jpg" data-media="(min-width: 800px)" data-width="800" data-height="600"></span>
        </span>
        <span>not a picture</span>
      </body>"#;

    #[test]
    fn placeholders_and_descriptors() {
        let doc = Tree::parse(MARKUP).unwrap();
        let pictures = Document::placeholders(&doc, None);
        assert_eq!(pictures.len(), 1);
        assert_eq!(Document::descriptors(&doc, &pictures[0]).len(), 3);
    }

    #[test]
    fn resolves_and_renders_into_the_tree() {
        let mut doc = Tree::parse(MARKUP).unwrap();
        let mut media = Viewport {
            matching: vec!["(min-width: 400px)".into()],
            ..Viewport::default()
        };
        let mut resolver = Resolver::new(ResolveConfig::default());
        resolver.resolve_all(&mut doc, &mut media, None).unwrap();

        let picture = *resolver.source_sets()[0].placeholder();
        let img = *resolver.source_sets()[0].rendered().unwrap();
        assert_eq!(doc.parent(img), Some(picture));
        assert_eq!(
            doc.element_markup(img),
            r#"<img alt="A giant stone face" src="medium.jpg"/>"#
        );

        resolver.notify(&1, true, &mut doc, &mut media);
        assert_eq!(
            doc.element_markup(img),
            r#"<img alt="A giant stone face" src="large.jpg" width="800" height="600"/>"#
        );
    }

    #[test]
    fn rendered_image_is_not_a_descriptor_on_rescan() {
        let mut doc = Tree::parse(MARKUP).unwrap();
        let mut media = Viewport::default();
        let mut resolver = Resolver::new(ResolveConfig::default());
        resolver.resolve_all(&mut doc, &mut media, None).unwrap();
        resolver.resolve_all(&mut doc, &mut media, None).unwrap();
        assert_eq!(resolver.source_sets()[0].len(), 3);
    }
}
