// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup vocabulary and reading placeholders into [`SourceSet`]s.
//!
//! ```html
//! <span data-picture data-alt="A cat">
//!   <span data-src="small.jpg"></span>
//!   <span data-src="large.jpg" data-media="(min-width: 800px)"
//!         data-width="800" data-height="600"></span>
//! </span>
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::source_set::SourceSet;
use crate::types::{Condition, Descriptor, Document, PlaceholderAttrs, Source};

/// Tag name shared by placeholders and descriptors.
pub const SPAN: &str = "span";
/// Marks a placeholder element.
pub const DATA_PICTURE: &str = "data-picture";
/// Placeholder alt-text override.
pub const DATA_ALT: &str = "data-alt";
/// Placeholder title override.
pub const DATA_TITLE: &str = "data-title";
/// Descriptor image URI.
pub const DATA_SRC: &str = "data-src";
/// Descriptor media-query condition.
pub const DATA_MEDIA: &str = "data-media";
/// Descriptor width.
pub const DATA_WIDTH: &str = "data-width";
/// Descriptor height.
pub const DATA_HEIGHT: &str = "data-height";

/// Tag name of the rendered element.
pub const IMG: &str = "img";
/// Rendered element attributes.
pub const SRC: &str = "src";
/// Rendered width attribute.
pub const WIDTH: &str = "width";
/// Rendered height attribute.
pub const HEIGHT: &str = "height";
/// Rendered alt attribute.
pub const ALT: &str = "alt";
/// Rendered title attribute.
pub const TITLE: &str = "title";

/// Read one placeholder's declarations.
///
/// Descriptors without `data-src` are skipped. Empty `data-alt` and `data-title`
/// values are treated as absent.
pub fn read_source_set<D: Document>(
    document: &D,
    placeholder: &D::Element,
) -> SourceSet<D::Element> {
    let non_empty = |element: &D::Element, name: &str| -> Option<String> {
        document
            .attribute(element, name)
            .filter(|v| !v.is_empty())
            .map(Into::into)
    };
    let attrs = PlaceholderAttrs {
        alt: non_empty(placeholder, DATA_ALT),
        title: non_empty(placeholder, DATA_TITLE),
    };
    let descriptors: Vec<Descriptor> = document
        .descriptors(placeholder)
        .iter()
        .filter_map(|element| {
            let Some(uri) = document.attribute(element, DATA_SRC) else {
                log::warn!("skipping picture source without `{DATA_SRC}`");
                return None;
            };
            let source = Source {
                uri: uri.into(),
                width: document.attribute(element, DATA_WIDTH).map(Into::into),
                height: document.attribute(element, DATA_HEIGHT).map(Into::into),
            };
            let condition = Condition::from_label(document.attribute(element, DATA_MEDIA));
            Some(Descriptor::new(condition, source))
        })
        .collect();
    SourceSet::new(placeholder.clone(), attrs, descriptors)
}

/// Read every placeholder under `root` (or in the whole document).
pub fn scan<D: Document>(
    document: &D,
    root: Option<&D::Element>,
) -> Vec<SourceSet<D::Element>> {
    document
        .placeholders(root)
        .iter()
        .map(|placeholder| read_source_set(document, placeholder))
        .collect()
}
