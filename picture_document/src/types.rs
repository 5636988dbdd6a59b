// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identifiers and per-element storage.

/// Identifier for an element in a [`Document`](crate::Document).
///
/// Elements are never removed, so an identifier stays valid for the lifetime of the
/// document that issued it. Identifiers increase in creation order; for a freshly parsed
/// document that is document order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}
