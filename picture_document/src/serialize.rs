// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing a tree back out as markup.

use quick_xml::escape::escape;

use crate::document::Document;
use crate::types::ElementId;

impl Document {
    /// Serialize every top-level element in order.
    ///
    /// Childless elements are self-closed; attribute values are escaped.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for &root in self.roots() {
            self.write_element(root, &mut out);
        }
        out
    }

    /// Serialize a single element and its subtree.
    pub fn element_markup(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_element(element, &mut out);
        out
    }

    fn write_element(&self, element: ElementId, out: &mut String) {
        enum Step {
            Open(ElementId),
            Close(ElementId),
        }
        let mut stack = vec![Step::Open(element)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id) => {
                    out.push('<');
                    out.push_str(self.tag(id));
                    for (name, value) in self.attributes(id) {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&escape(value));
                        out.push('"');
                    }
                    let children = self.children(id);
                    if children.is_empty() {
                        out.push_str("/>");
                        continue;
                    }
                    out.push('>');
                    stack.push(Step::Close(id));
                    stack.extend(children.iter().rev().map(|&c| Step::Open(c)));
                }
                Step::Close(id) => {
                    out.push_str("</");
                    out.push_str(self.tag(id));
                    out.push('>');
                }
            }
        }
    }
}
