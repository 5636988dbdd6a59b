// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup parsing on top of `quick-xml`.

use quick_xml::escape::{EscapeError, unescape};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::Document;
use crate::types::ElementId;

/// Errors from [`Document::parse`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed markup, including mismatched end tags.
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Malformed attribute syntax.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),
    /// An attribute value contains an unknown or broken character reference.
    #[error("bad character reference: {0}")]
    Escape(#[from] EscapeError),
    /// A name or value is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] core::str::Utf8Error),
    /// Input ended inside an element.
    #[error("unclosed element <{tag}>")]
    Unclosed {
        /// Tag of the innermost open element.
        tag: String,
    },
}

impl Document {
    /// Parse XHTML-style markup.
    ///
    /// Elements must be closed (`<img/>` or `<span></span>`). Attribute values may be
    /// omitted, HTML style, and read back as empty strings.
    pub fn parse(markup: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(true);

        let mut doc = Self::new();
        let mut open: Vec<ElementId> = Vec::with_capacity(8);
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let id = open_element(&mut doc, &e, open.last().copied())?;
                    open.push(id);
                }
                Event::Empty(e) => {
                    open_element(&mut doc, &e, open.last().copied())?;
                }
                Event::End(_) => {
                    // The reader checks that end names match.
                    open.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if let Some(&id) = open.last() {
            return Err(ParseError::Unclosed {
                tag: doc.tag(id).into(),
            });
        }
        log::trace!("parsed {} elements", doc.len());
        Ok(doc)
    }
}

fn open_element(
    doc: &mut Document,
    e: &BytesStart<'_>,
    parent: Option<ElementId>,
) -> Result<ElementId, ParseError> {
    let name = e.name();
    let tag = core::str::from_utf8(name.as_ref())?;
    let id = doc.create_element(tag);
    for attr in e.html_attributes() {
        let attr = attr?;
        let key = core::str::from_utf8(attr.key.as_ref())?;
        let raw = core::str::from_utf8(&attr.value)?;
        let value = unescape(raw)?;
        doc.set_attribute(id, &key.to_ascii_lowercase(), &value);
    }
    if let Some(parent) = parent {
        doc.append_child(parent, id);
    }
    Ok(id)
}
