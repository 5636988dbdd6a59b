// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, attributes, queries.

use crate::types::{Element, ElementId};

/// An element tree with any number of top-level elements.
#[derive(Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements, attached or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the document holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Create a detached element. It becomes a top-level element until appended somewhere.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(tag));
        self.roots.push(id);
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from where it was.
    ///
    /// Ignored if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("refusing to append {child:?} under its own descendant {parent:?}");
            return;
        }
        match self.elements[child.idx()].parent {
            Some(old) => self.elements[old.idx()].children.retain(|c| *c != child),
            None => self.roots.retain(|r| *r != child),
        }
        self.elements[child.idx()].parent = Some(parent);
        self.elements[parent.idx()].children.push(child);
    }

    /// Set attribute `name` on `element`, replacing any previous value.
    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let attrs = &mut self.elements[element.idx()].attrs;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => attrs.push((name.into(), value.into())),
        }
    }

    /// Returns attribute `name` of `element`, if present.
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(element.idx())?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if `element` carries attribute `name`, with or without a value.
    pub fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    /// Attributes of `element` in insertion order.
    pub fn attributes(&self, element: ElementId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.elements[element.idx()]
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lowercase tag name of `element`.
    pub fn tag(&self, element: ElementId) -> &str {
        &self.elements[element.idx()].tag
    }

    /// Parent of `element`, or `None` for a top-level element.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements[element.idx()].parent
    }

    /// Children of `element` in order.
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.elements[element.idx()].children
    }

    /// Top-level elements in order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Descendants of `element` in document order, excluding `element` itself.
    pub fn descendants(&self, element: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_descendants(element, &mut out);
        out
    }

    /// Elements named `tag` below `root`, or in the whole document when `root` is `None`,
    /// in document order.
    pub fn elements_by_tag(&self, root: Option<ElementId>, tag: &str) -> Vec<ElementId> {
        let scope = match root {
            Some(root) => self.descendants(root),
            None => {
                let mut all = Vec::new();
                for &r in &self.roots {
                    all.push(r);
                    self.collect_descendants(r, &mut all);
                }
                all
            }
        };
        scope
            .into_iter()
            .filter(|id| self.tag(*id).eq_ignore_ascii_case(tag))
            .collect()
    }

    fn collect_descendants(&self, element: ElementId, out: &mut Vec<ElementId>) {
        // Pre-order with an explicit stack; children pushed in reverse.
        let mut stack: Vec<ElementId> = self.children(element).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, element: ElementId) -> bool {
        // A leaf can only be an ancestor of itself.
        if self.elements[candidate.idx()].children.is_empty() {
            return candidate == element;
        }
        let mut cur = Some(element);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.elements[id.idx()].parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_append_builds_tree() {
        let mut doc = Document::new();
        let root = doc.create_element("DIV");
        let a = doc.create_element("span");
        let b = doc.create_element("span");
        doc.append_child(root, a);
        doc.append_child(a, b);
        assert_eq!(doc.tag(root), "div");
        assert_eq!(doc.roots(), &[root]);
        assert_eq!(doc.children(root), &[a]);
        assert_eq!(doc.parent(b), Some(a));
        assert_eq!(doc.descendants(root), vec![a, b]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn append_moves_element() {
        let mut doc = Document::new();
        let p1 = doc.create_element("div");
        let p2 = doc.create_element("div");
        let c = doc.create_element("img");
        doc.append_child(p1, c);
        doc.append_child(p2, c);
        assert!(doc.children(p1).is_empty());
        assert_eq!(doc.children(p2), &[c]);
        assert_eq!(doc.parent(c), Some(p2));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(a, b);
        doc.append_child(b, a);
        assert_eq!(doc.parent(a), None);
        doc.append_child(a, a);
        assert!(doc.children(a).contains(&b));
        assert!(!doc.children(a).contains(&a));
    }

    #[test]
    fn attributes_replace_in_place() {
        let mut doc = Document::new();
        let e = doc.create_element("img");
        doc.set_attribute(e, "src", "a.jpg");
        doc.set_attribute(e, "alt", "x");
        doc.set_attribute(e, "src", "b.jpg");
        assert_eq!(doc.attribute(e, "src"), Some("b.jpg"));
        assert!(doc.has_attribute(e, "alt"));
        assert!(!doc.has_attribute(e, "title"));
        let attrs: Vec<_> = doc.attributes(e).collect();
        assert_eq!(attrs, vec![("src", "b.jpg"), ("alt", "x")]);
    }

    #[test]
    fn deep_nesting_is_walked_without_recursion() {
        let depth = 50_000;
        let mut doc = Document::new();
        let root = doc.create_element("span");
        let mut parent = root;
        for _ in 1..depth {
            let child = doc.create_element("span");
            doc.append_child(parent, child);
            parent = child;
        }
        assert_eq!(doc.roots(), &[root]);
        let all = doc.elements_by_tag(None, "span");
        assert_eq!(all.len(), depth);
        assert_eq!(all[depth - 1], parent);
        assert_eq!(doc.descendants(root).len(), depth - 1);
    }

    #[test]
    fn elements_by_tag_respects_root() {
        let mut doc = Document::new();
        let outer = doc.create_element("span");
        let inner = doc.create_element("span");
        let img = doc.create_element("img");
        let other = doc.create_element("span");
        doc.append_child(outer, inner);
        doc.append_child(outer, img);
        assert_eq!(doc.elements_by_tag(None, "span"), vec![outer, inner, other]);
        assert_eq!(doc.elements_by_tag(Some(outer), "SPAN"), vec![inner]);
        assert!(doc.elements_by_tag(Some(img), "span").is_empty());
    }
}
