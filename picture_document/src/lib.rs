// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picture Document: a small in-memory element tree.
//!
//! - Parse XHTML-style markup with [`Document::parse`]; HTML-style value-less attributes
//!   such as `data-picture` are accepted.
//! - Query elements by tag, read and write attributes, create and append elements.
//! - Write the tree back out with [`Document::to_markup`].
//!
//! Only elements and attributes are retained; text, comments and processing instructions
//! are dropped while parsing.
//!
//! # Example
//!
//! ```rust
//! use picture_document::Document;
//!
//! let mut doc = Document::parse(r#"<div><span data-picture><span data-src="a.jpg"/></span></div>"#)?;
//! let spans = doc.elements_by_tag(None, "span");
//! assert_eq!(spans.len(), 2);
//! assert_eq!(doc.attribute(spans[1], "data-src"), Some("a.jpg"));
//!
//! let img = doc.create_element("img");
//! doc.set_attribute(img, "src", "a.jpg");
//! doc.append_child(spans[0], img);
//! assert_eq!(
//!     doc.to_markup(),
//!     r#"<div><span data-picture=""><span data-src="a.jpg"/><img src="a.jpg"/></span></div>"#
//! );
//! # Ok::<(), picture_document::ParseError>(())
//! ```

mod document;
mod parse;
mod serialize;
mod types;

pub use document::Document;
pub use parse::ParseError;
pub use types::ElementId;
